//! Route resolution and full-document rendering.
//!
//! Every page is `<head>` from [`PageMetadata::to_head_html`] plus JSON-LD,
//! and a leptos-rendered `<body>`. Record lookups that miss turn into the
//! not-found page; any other error is returned to the caller.

use crate::components::*;
use crate::escape::escape_html;
use crate::metadata::{PageMetadata, StaticPage, for_page, for_record};
use crate::schema::{self, JsonLd};
use leptos::prelude::*;
use outseek_site_core::{ContentKind, ContentRecord, Error, Result, Site};

/// Number of related posts shown under an article
pub const RELATED_LIMIT: usize = 3;

/// Number of posts previewed on the home page
const HOME_POST_LIMIT: usize = 3;

const RELOAD_SCRIPT: &str = r#"<script>
    // Live reload via Server-Sent Events
    const eventSource = new EventSource('/_reload');
    eventSource.onmessage = () => location.reload();
    eventSource.onerror = () => eventSource.close();
</script>"#;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Page(StaticPage),
    BlogPost(String),
    Service(String),
    FaqEntry(String),
}

impl Route {
    /// Map a request path (no query string) to a route. Anything unknown
    /// resolves to the not-found page.
    pub fn parse(path: &str) -> Route {
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        match segments.as_slice() {
            [] => Route::Page(StaticPage::Home),
            ["blog"] => Route::Page(StaticPage::BlogIndex),
            ["blog", slug] => Route::BlogPost(slug.to_string()),
            ["services"] => Route::Page(StaticPage::Services),
            ["services", slug] => Route::Service(slug.to_string()),
            ["faq"] => Route::Page(StaticPage::Faq),
            ["faq", slug] => Route::FaqEntry(slug.to_string()),
            ["privacy"] => Route::Page(StaticPage::Privacy),
            ["site-map"] => Route::Page(StaticPage::SiteMap),
            _ => Route::Page(StaticPage::NotFound),
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::Page(page) => page.path().to_string(),
            Route::BlogPost(slug) => format!("/blog/{}", slug),
            Route::Service(slug) => format!("/services/{}", slug),
            Route::FaqEntry(slug) => format!("/faq/{}", slug),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
    /// `?q=` filter for the FAQ page
    pub faq_query: String,
    /// Inject the `/_reload` listener (preview only)
    pub live_reload: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageStatus {
    Ok,
    NotFound,
}

#[derive(Debug, Clone)]
pub struct RenderedPage {
    pub status: PageStatus,
    pub html: String,
}

/// Render a route to a complete HTML document.
pub fn render_route(route: &Route, site: &Site, options: &RenderOptions) -> Result<RenderedPage> {
    let rendered = match route {
        Route::Page(StaticPage::NotFound) => return Ok(not_found(site, options)),
        Route::Page(page) => Ok(render_static(*page, site, options)),
        Route::BlogPost(slug) => site
            .store
            .find(ContentKind::Blog, slug)
            .and_then(|post| render_post(post, site, options)),
        Route::Service(slug) => site
            .store
            .find(ContentKind::Service, slug)
            .and_then(|service| render_service(service, site, options)),
        Route::FaqEntry(slug) => site
            .store
            .find(ContentKind::Faq, slug)
            .and_then(|faq| render_faq_entry(faq, site, options)),
    };

    match rendered {
        Ok(html) => Ok(RenderedPage {
            status: PageStatus::Ok,
            html,
        }),
        Err(e) if e.is_not_found() => {
            tracing::debug!(route = %route.path(), "{}", e);
            Ok(not_found(site, options))
        }
        Err(e) => Err(e),
    }
}

/// The not-found page, always with noindex robots metadata
pub fn not_found(site: &Site, options: &RenderOptions) -> RenderedPage {
    let meta = for_page(StaticPage::NotFound, &site.config);
    let body = render_body_html(site, "/404", || view! { <NotFoundView/> }.into_any());
    RenderedPage {
        status: PageStatus::NotFound,
        html: document(site, &meta, &[], &body, options),
    }
}

/// Error page for preview when the site cannot be loaded at all
pub fn error_page(title: &str, message: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<meta name="robots" content="noindex, nofollow">
<title>{title}</title>
</head>
<body>
<main class="error">
<h1>{title}</h1>
<pre>{message}</pre>
</main>
{reload}
</body>
</html>
"#,
        title = escape_html(title),
        message = escape_html(message),
        reload = RELOAD_SCRIPT,
    )
}

fn render_static(page: StaticPage, site: &Site, options: &RenderOptions) -> String {
    let config = &site.config;
    let store = &site.store;
    let meta = for_page(page, config);
    let canonical = page.canonical(config);

    let (graphs, body) = match page {
        StaticPage::Home => {
            let services: Vec<ContentRecord> = store.list_kind(ContentKind::Service).cloned().collect();
            let posts: Vec<ContentRecord> = store
                .recent(ContentKind::Blog)
                .into_iter()
                .take(HOME_POST_LIMIT)
                .cloned()
                .collect();
            let brand = config.brand.clone();
            (
                vec![schema::organization(config), schema::website(config)],
                render_body_html(site, page.path(), move || {
                    view! { <HomeView brand=brand services=services posts=posts/> }.into_any()
                }),
            )
        }
        StaticPage::BlogIndex => {
            let posts = store.recent(ContentKind::Blog);
            let graph = schema::collection_page(&meta.title, &meta.description, &canonical, &posts, config);
            let posts: Vec<ContentRecord> = posts.into_iter().cloned().collect();
            (
                vec![graph, section_breadcrumbs(site, "Blog", &canonical)],
                render_body_html(site, page.path(), move || {
                    view! { <BlogIndexView posts=posts/> }.into_any()
                }),
            )
        }
        StaticPage::Services => {
            let services: Vec<&ContentRecord> = store.list_kind(ContentKind::Service).collect();
            let graph = schema::collection_page(&meta.title, &meta.description, &canonical, &services, config);
            let (modern, standard) = split_by_tier(services.into_iter().cloned().collect());
            (
                vec![graph, section_breadcrumbs(site, "Services", &canonical)],
                render_body_html(site, page.path(), move || {
                    view! { <ServicesIndexView modern=modern standard=standard/> }.into_any()
                }),
            )
        }
        StaticPage::Faq => {
            let groups = store.search_faq(&options.faq_query);
            let matched: Vec<&ContentRecord> = groups.iter().flat_map(|g| g.items.iter().copied()).collect();
            let sections: Vec<FaqSection> = groups
                .iter()
                .map(|group| FaqSection {
                    category: group.category.to_string(),
                    icon: faq_group_icon(group.category),
                    items: group.items.iter().map(|r| (*r).clone()).collect(),
                })
                .collect();
            let query = options.faq_query.clone();
            let mut graphs: Vec<JsonLd> = schema::faq_page(&matched).into_iter().collect();
            graphs.push(section_breadcrumbs(site, "FAQ", &canonical));
            (
                graphs,
                render_body_html(site, page.path(), move || {
                    view! { <FaqView query=query sections=sections/> }.into_any()
                }),
            )
        }
        StaticPage::Privacy => {
            let brand = config.brand.clone();
            let email = config.contact_email.clone();
            (
                vec![section_breadcrumbs(site, "Privacy Policy", &canonical)],
                render_body_html(site, page.path(), move || {
                    view! { <PrivacyView brand=brand email=email/> }.into_any()
                }),
            )
        }
        StaticPage::SiteMap => {
            let sections = site_map_sections(site);
            (
                vec![section_breadcrumbs(site, "Site Map", &canonical)],
                render_body_html(site, page.path(), move || {
                    view! { <SiteMapView sections=sections/> }.into_any()
                }),
            )
        }
        StaticPage::NotFound => (
            Vec::new(),
            render_body_html(site, page.path(), || view! { <NotFoundView/> }.into_any()),
        ),
    };

    document(site, &meta, &graphs, &body, options)
}

fn render_post(post: &ContentRecord, site: &Site, options: &RenderOptions) -> Result<String> {
    let meta = for_record(post, &site.config)?;
    let graphs = vec![
        schema::article(post, &site.config),
        schema::record_breadcrumbs(post, &site.config),
    ];

    let related: Vec<ContentRecord> = site
        .store
        .get_related(&post.slug, RELATED_LIMIT)
        .into_iter()
        .cloned()
        .collect();
    let post = post.clone();
    let current = post.path();

    let body = render_body_html(site, &current, move || {
        view! { <ArticleView post=post related=related/> }.into_any()
    });
    Ok(document(site, &meta, &graphs, &body, options))
}

fn render_service(service: &ContentRecord, site: &Site, options: &RenderOptions) -> Result<String> {
    // Services without detail content have no page of their own
    if service.service.is_none() {
        return Err(Error::NotFound {
            kind: ContentKind::Service,
            slug: service.slug.clone(),
        });
    }

    let meta = for_record(service, &site.config)?;
    let graphs = vec![
        schema::service(service, &site.config),
        schema::record_breadcrumbs(service, &site.config),
    ];

    let service = service.clone();
    let current = service.path();
    let body = render_body_html(site, &current, move || {
        view! { <ServiceView service=service/> }.into_any()
    });
    Ok(document(site, &meta, &graphs, &body, options))
}

fn render_faq_entry(faq: &ContentRecord, site: &Site, options: &RenderOptions) -> Result<String> {
    let meta = for_record(faq, &site.config)?;
    let mut graphs: Vec<JsonLd> = schema::faq_page(&[faq]).into_iter().collect();
    graphs.push(schema::record_breadcrumbs(faq, &site.config));

    let section = FaqSection {
        category: faq.category.label().to_string(),
        icon: faq_group_icon(faq.category.label()),
        items: vec![faq.clone()],
    };
    let body = render_body_html(site, &faq.path(), move || {
        view! { <FaqView query={String::new()} sections={vec![section]}/> }.into_any()
    });
    Ok(document(site, &meta, &graphs, &body, options))
}

fn section_breadcrumbs(site: &Site, name: &str, url: &str) -> JsonLd {
    schema::breadcrumbs(&[
        ("Home".to_string(), site.config.base_url.clone()),
        (name.to_string(), url.to_string()),
    ])
}

fn site_map_sections(site: &Site) -> Vec<(String, Vec<(String, String)>)> {
    let pages = StaticPage::INDEXABLE
        .iter()
        .map(|page| (page.title().to_string(), page.path().to_string()))
        .collect();

    let services = site
        .store
        .list_kind(ContentKind::Service)
        .filter(|s| s.service.is_some())
        .map(|s| (s.title.clone(), s.path()))
        .collect();

    let posts = site
        .store
        .recent(ContentKind::Blog)
        .into_iter()
        .map(|p| (p.title.clone(), p.path()))
        .collect();

    let questions = site
        .store
        .list_kind(ContentKind::Faq)
        .map(|q| (q.title.clone(), q.path()))
        .collect();

    vec![
        ("Pages".to_string(), pages),
        ("Services".to_string(), services),
        ("Blog".to_string(), posts),
        ("FAQ".to_string(), questions),
    ]
}

/// Header, main content and footer rendered to an HTML string
fn render_body_html(site: &Site, current: &str, content: impl FnOnce() -> AnyView) -> String {
    let brand = site.config.brand.clone();
    let email = site.config.contact_email.clone();
    let current = current.to_string();

    Owner::new().with(move || {
        let main = content();
        view! {
            <SiteHeader brand=brand.clone() current=current/>
            <main id="main">{main}</main>
            <SiteFooter brand=brand email=email/>
        }
        .to_html()
    })
}

fn document(
    site: &Site,
    meta: &PageMetadata,
    graphs: &[JsonLd],
    body: &str,
    options: &RenderOptions,
) -> String {
    let mut head = vec![
        r#"<meta charset="UTF-8">"#.to_string(),
        r#"<meta name="viewport" content="width=device-width, initial-scale=1">"#.to_string(),
        meta.to_head_html(),
        r#"<link rel="stylesheet" href="/styles.css">"#.to_string(),
    ];
    if site.config.feed.enabled {
        head.push(format!(
            r#"<link rel="alternate" type="application/rss+xml" title="{} Blog" href="/feed.xml">"#,
            escape_html(&site.config.brand)
        ));
    }
    head.extend(graphs.iter().map(JsonLd::to_script_tag));

    format!(
        "<!DOCTYPE html>\n<html lang=\"{}\">\n<head>\n{}\n</head>\n<body>\n{}\n{}</body>\n</html>\n",
        escape_html(&meta.language),
        head.join("\n"),
        body,
        if options.live_reload {
            format!("{}\n", RELOAD_SCRIPT)
        } else {
            String::new()
        }
    )
}
