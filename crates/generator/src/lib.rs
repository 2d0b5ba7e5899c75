// Static site generation with Leptos SSR

pub mod components;
pub mod escape;
pub mod feed;
pub mod markup;
pub mod metadata;
pub mod pages;
pub mod robots;
pub mod schema;
pub mod sitemap;

use chrono::{DateTime, Utc};
use metadata::StaticPage;
use outseek_site_core::{ContentKind, Result, Site};
use pages::{PageStatus, RenderOptions, Route};

pub use pages::{RenderedPage, render_route};

pub struct GeneratedSite {
    pub pages: Vec<(String, String)>, // (route path, html)
    pub not_found: String,
    pub files: Vec<(String, String)>, // (file name, contents)
}

/// Every route the site serves, in output order
pub fn site_routes(site: &Site) -> Vec<Route> {
    let mut routes: Vec<Route> = StaticPage::INDEXABLE.iter().map(|p| Route::Page(*p)).collect();

    routes.extend(
        site.store
            .list_kind(ContentKind::Blog)
            .map(|r| Route::BlogPost(r.slug.clone())),
    );
    routes.extend(
        site.store
            .list_kind(ContentKind::Service)
            .filter(|r| r.service.is_some())
            .map(|r| Route::Service(r.slug.clone())),
    );
    routes.extend(
        site.store
            .list_kind(ContentKind::Faq)
            .map(|r| Route::FaqEntry(r.slug.clone())),
    );

    routes
}

/// Render every page plus feed.xml (when enabled), robots.txt and sitemap.xml.
pub fn generate_site(site: &Site, now: DateTime<Utc>) -> Result<GeneratedSite> {
    let options = RenderOptions::default();
    let mut pages = Vec::new();

    for route in site_routes(site) {
        let page = render_route(&route, site, &options)?;
        if page.status == PageStatus::NotFound {
            tracing::warn!(route = %route.path(), "route rendered as not found, skipping");
            continue;
        }
        pages.push((route.path(), page.html));
    }

    let not_found = pages::not_found(site, &options).html;

    let mut files = vec![
        (
            "robots.txt".to_string(),
            robots::RobotsPolicy::for_site(&site.config).render(),
        ),
        (
            "sitemap.xml".to_string(),
            sitemap::render_sitemap(&site.store, &site.config, now.date_naive()),
        ),
    ];
    if site.config.feed.enabled {
        files.push((
            "feed.xml".to_string(),
            feed::render_feed(&site.store, &site.config, now),
        ));
    }

    tracing::info!(pages = pages.len(), files = files.len(), "generated site");

    Ok(GeneratedSite {
        pages,
        not_found,
        files,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::tests::{post, site};
    use chrono::TimeZone;
    use outseek_site_core::ContentStore;

    #[test]
    fn test_generate_site() {
        let site = Site {
            config: site(),
            store: ContentStore::new(vec![post("a", "2024-01-01"), post("b", "2024-01-02")]).unwrap(),
        };
        let now = Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap();

        let generated = generate_site(&site, now).unwrap();
        let paths: Vec<&str> = generated.pages.iter().map(|(p, _)| p.as_str()).collect();
        assert_eq!(
            paths,
            vec!["/", "/blog", "/services", "/faq", "/privacy", "/site-map", "/blog/a", "/blog/b"]
        );
        assert!(generated.not_found.contains("noindex"));

        let names: Vec<&str> = generated.files.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, vec!["robots.txt", "sitemap.xml", "feed.xml"]);
    }

    #[test]
    fn test_generate_site_without_feed() {
        let mut config = site();
        config.feed.enabled = false;
        let site = Site {
            config,
            store: ContentStore::default(),
        };

        let generated = generate_site(&site, Utc::now()).unwrap();
        assert!(generated.files.iter().all(|(name, _)| name != "feed.xml"));
    }
}
