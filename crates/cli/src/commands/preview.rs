use anyhow::{Context, Result};
use axum::{
    Router,
    extract::{Query, State},
    handler::Handler,
    http::{StatusCode, Uri, header},
    response::{
        Html, IntoResponse, Response,
        sse::{Event, KeepAlive, Sse},
    },
    routing::get,
};
use chrono::Utc;
use notify::{Event as NotifyEvent, EventKind, RecursiveMode, Watcher};
use outseek_site_core::config::SITE_TOML;
use outseek_site_core::{Site, load_site};
use outseek_site_generator::feed::{FEED_CACHE_CONTROL, FEED_CONTENT_TYPE, render_feed};
use outseek_site_generator::pages::{self, PageStatus, RenderOptions, Route, error_page};
use outseek_site_generator::render_route;
use outseek_site_generator::robots::RobotsPolicy;
use outseek_site_generator::sitemap::render_sitemap;
use outseek_site_validator::PUBLIC_DIR;
use serde::Deserialize;
use std::{net::SocketAddr, path::PathBuf};
use tokio::sync::broadcast::{self, error::RecvError};
use tower_http::{services::ServeDir, trace::TraceLayer};

#[derive(Clone)]
struct AppState {
    site_path: PathBuf,
    reload_tx: broadcast::Sender<()>,
}

#[derive(Debug, Default, Deserialize)]
struct PageQuery {
    q: Option<String>,
}

/// Start preview server with hot reload for local development.
///
/// site.toml and content.toml are re-read on every request, so edits show
/// up without a restart. A file watcher pushes a reload event to open pages.
///
/// # Arguments
///
/// * `path` - Path to site directory containing site.toml
/// * `port` - Port to serve on (default: 8080)
pub async fn run(path: PathBuf, port: u16) -> Result<()> {
    println!("🌐 Starting preview server...");
    println!("   Site: {}", path.display());

    if !path.exists() {
        anyhow::bail!(
            "Site directory does not exist: {}\nRun 'outseek-site init {}' first",
            path.display(),
            path.display()
        );
    }

    if !path.join(SITE_TOML).exists() {
        anyhow::bail!(
            "site.toml not found in {}\nRun 'outseek-site init {}' first",
            path.display(),
            path.display()
        );
    }

    let site = load_site(&path).context("Failed to load site")?;

    println!("   ✓ Loaded: {}", site.config.brand);
    println!("   ✓ Records: {}", site.store.len());

    let (reload_tx, _) = broadcast::channel::<()>(100);

    let state = AppState {
        site_path: path.clone(),
        reload_tx: reload_tx.clone(),
    };
    let app = router(state);

    let watcher_path = path.clone();
    let watcher_tx = reload_tx.clone();
    tokio::spawn(async move {
        if let Err(e) = watch_files(watcher_path, watcher_tx).await {
            tracing::error!("file watcher error: {:#}", e);
        }
    });

    let addr = SocketAddr::from(([127, 0, 0, 1], port));
    println!("\n🚀 Preview ready at: http://localhost:{}", port);
    println!("   Press Ctrl+C to stop\n");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to port")?;

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}

fn router(state: AppState) -> Router {
    let assets = ServeDir::new(state.site_path.join(PUBLIC_DIR))
        .not_found_service(not_found_handler.with_state(state.clone()));

    Router::new()
        .route("/", get(page_handler))
        .route("/blog", get(page_handler))
        .route("/blog/{slug}", get(page_handler))
        .route("/services", get(page_handler))
        .route("/services/{slug}", get(page_handler))
        .route("/faq", get(page_handler))
        .route("/faq/{slug}", get(page_handler))
        .route("/privacy", get(page_handler))
        .route("/site-map", get(page_handler))
        .route("/feed.xml", get(feed_handler))
        .route("/robots.txt", get(robots_handler))
        .route("/sitemap.xml", get(sitemap_handler))
        .route("/_reload", get(sse_handler))
        .fallback_service(assets)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Watch for file changes and trigger reload
async fn watch_files(path: PathBuf, reload_tx: broadcast::Sender<()>) -> Result<()> {
    let (tx, mut rx) = tokio::sync::mpsc::channel(100);

    let mut watcher =
        notify::recommended_watcher(move |res: Result<NotifyEvent, notify::Error>| {
            if let Ok(event) = res {
                let _ = tx.blocking_send(event);
            }
        })?;

    watcher.watch(&path, RecursiveMode::Recursive)?;

    while let Some(event) = rx.recv().await {
        match event.kind {
            EventKind::Modify(_) | EventKind::Create(_) | EventKind::Remove(_) => {
                // Filter out temporary files and hidden files
                let changed: Vec<_> = event
                    .paths
                    .iter()
                    .filter(|p| {
                        let filename = p.file_name().unwrap_or_default().to_string_lossy();
                        !filename.starts_with('.') && !filename.ends_with('~')
                    })
                    .collect();

                if let Some(first) = changed.first() {
                    tracing::info!(path = %first.display(), "file changed, reloading");
                    let _ = reload_tx.send(());
                }
            }
            _ => {}
        }
    }

    Ok(())
}

/// SSE endpoint for hot reload
async fn sse_handler(
    State(state): State<AppState>,
) -> Sse<impl futures::Stream<Item = Result<Event, std::convert::Infallible>>> {
    let mut rx = state.reload_tx.subscribe();

    let stream = async_stream::stream! {
        loop {
            match rx.recv().await {
                Ok(()) | Err(RecvError::Lagged(_)) => yield Ok(Event::default().data("reload")),
                Err(RecvError::Closed) => break,
            }
        }
    };

    Sse::new(stream).keep_alive(KeepAlive::default())
}

/// Load the site fresh for this request, or an error page response
fn load(state: &AppState) -> Result<Site, Response> {
    load_site(&state.site_path).map_err(|e| {
        tracing::warn!("failed to load site: {}", e);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Html(error_page("Failed to load site", &e.to_string())),
        )
            .into_response()
    })
}

async fn page_handler(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
    uri: Uri,
) -> Response {
    let site = match load(&state) {
        Ok(site) => site,
        Err(response) => return response,
    };

    let options = RenderOptions {
        faq_query: query.q.unwrap_or_default(),
        live_reload: true,
    };

    match render_route(&Route::parse(uri.path()), &site, &options) {
        Ok(page) => {
            let status = match page.status {
                PageStatus::Ok => StatusCode::OK,
                PageStatus::NotFound => StatusCode::NOT_FOUND,
            };
            (status, Html(page.html)).into_response()
        }
        Err(e) => {
            tracing::warn!(path = %uri.path(), "render failed: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Html(error_page("Failed to render page", &e.to_string())),
            )
                .into_response()
        }
    }
}

async fn not_found_handler(State(state): State<AppState>) -> Response {
    let site = match load(&state) {
        Ok(site) => site,
        Err(response) => return response,
    };

    let options = RenderOptions {
        live_reload: true,
        ..Default::default()
    };
    (StatusCode::NOT_FOUND, Html(pages::not_found(&site, &options).html)).into_response()
}

async fn feed_handler(State(state): State<AppState>) -> Response {
    let site = match load(&state) {
        Ok(site) => site,
        Err(response) => return response,
    };

    if !site.config.feed.enabled {
        return not_found_handler(State(state)).await;
    }

    (
        [
            (header::CONTENT_TYPE, FEED_CONTENT_TYPE),
            (header::CACHE_CONTROL, FEED_CACHE_CONTROL),
        ],
        render_feed(&site.store, &site.config, Utc::now()),
    )
        .into_response()
}

async fn robots_handler(State(state): State<AppState>) -> Response {
    match load(&state) {
        Ok(site) => (
            [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
            RobotsPolicy::for_site(&site.config).render(),
        )
            .into_response(),
        Err(response) => response,
    }
}

async fn sitemap_handler(State(state): State<AppState>) -> Response {
    match load(&state) {
        Ok(site) => (
            [(header::CONTENT_TYPE, "application/xml; charset=utf-8")],
            render_sitemap(&site.store, &site.config, Utc::now().date_naive()),
        )
            .into_response(),
        Err(response) => response,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::init;
    use axum::body::{Body, to_bytes};
    use axum::http::{HeaderMap, Request};
    use std::fs;
    use tempfile::TempDir;
    use tower::ServiceExt;

    async fn site_dir() -> TempDir {
        let dir = TempDir::new().unwrap();
        init::run(dir.path().to_path_buf(), None, None, None).await.unwrap();
        dir
    }

    fn app(dir: &TempDir) -> Router {
        let (reload_tx, _) = broadcast::channel(4);
        router(AppState {
            site_path: dir.path().to_path_buf(),
            reload_tx,
        })
    }

    async fn fetch(app: Router, uri: &str) -> (StatusCode, HeaderMap, String) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, headers, String::from_utf8(body.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_feed_headers() {
        let dir = site_dir().await;
        let (status, headers, body) = fetch(app(&dir), "/feed.xml").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(headers[header::CONTENT_TYPE], "application/xml; charset=utf-8");
        assert_eq!(
            headers[header::CACHE_CONTROL],
            "public, s-maxage=3600, stale-while-revalidate=86400"
        );
        assert!(body.contains("<rss version=\"2.0\""));
        assert!(body.contains("https://outseek.net/blog/future-of-ai-in-business"));
    }

    #[tokio::test]
    async fn test_pages_render() {
        let dir = site_dir().await;
        let (status, _, body) = fetch(app(&dir), "/blog/cloud-migration-best-practices").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("<title>Cloud Migration Best Practices | Outseek</title>"));
        assert!(body.contains("new EventSource('/_reload')"));

        let (status, _, _) = fetch(app(&dir), "/services/devops").await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_missing_record_is_404() {
        let dir = site_dir().await;
        let (status, _, body) = fetch(app(&dir), "/blog/no-such-post").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body.contains("noindex"));
    }

    #[tokio::test]
    async fn test_unknown_path_is_404() {
        let dir = site_dir().await;
        let (status, _, body) = fetch(app(&dir), "/nothing/here.png").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body.contains("Page not found"));
    }

    #[tokio::test]
    async fn test_static_assets_served() {
        let dir = site_dir().await;
        let (status, _, body) = fetch(app(&dir), "/styles.css").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains(".grid"));
    }

    #[tokio::test]
    async fn test_faq_query_filters() {
        let dir = site_dir().await;
        let (status, _, body) = fetch(app(&dir), "/faq?q=cloud").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("Can you help with cloud migration?"));
        assert!(!body.contains("How long does a typical project take?"));
    }

    #[tokio::test]
    async fn test_robots_and_sitemap() {
        let dir = site_dir().await;
        let (status, headers, body) = fetch(app(&dir), "/robots.txt").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(headers[header::CONTENT_TYPE], "text/plain; charset=utf-8");
        assert!(body.contains("User-agent: Bingbot"));
        assert!(body.contains("Sitemap: https://outseek.net/sitemap.xml"));

        let (status, _, body) = fetch(app(&dir), "/sitemap.xml").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("<loc>https://outseek.net/services/devops</loc>"));
    }

    #[tokio::test]
    async fn test_broken_config_renders_error_page() {
        let dir = site_dir().await;
        fs::write(dir.path().join(SITE_TOML), "[site]\nbrand = ").unwrap();

        let (status, _, body) = fetch(app(&dir), "/").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body.contains("Failed to load site"));

        let (status, _, _) = fetch(app(&dir), "/feed.xml").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_edits_show_up_without_restart() {
        let dir = site_dir().await;
        let router = app(&dir);

        let content_path = dir.path().join("content.toml");
        let content = fs::read_to_string(&content_path)
            .unwrap()
            .replace("Cloud Migration Best Practices", "Cloud Migration Done Right");
        fs::write(&content_path, content).unwrap();

        let (_, _, body) = fetch(router, "/blog/cloud-migration-best-practices").await;
        assert!(body.contains("Cloud Migration Done Right"));
    }
}
