use crate::escape::escape_xml;
use crate::metadata::StaticPage;
use chrono::NaiveDate;
use outseek_site_core::{ContentKind, ContentStore, SiteConfig};

/// sitemap.xml listing the static pages, every blog post, every service that
/// has a detail page and every FAQ entry. `today` is the `lastmod` of static
/// pages.
pub fn render_sitemap(store: &ContentStore, site: &SiteConfig, today: NaiveDate) -> String {
    let mut urls: Vec<(String, NaiveDate, &str, &str)> = StaticPage::INDEXABLE
        .iter()
        .map(|page| {
            let priority = if *page == StaticPage::Home { "1.0" } else { "0.8" };
            (page.canonical(site), today, "weekly", priority)
        })
        .collect();

    for record in store.list_kind(ContentKind::Service) {
        if record.service.is_some() {
            urls.push((
                format!("{}{}", site.base_url, record.path()),
                record.published_at,
                "monthly",
                "0.9",
            ));
        }
    }

    for record in store.list_kind(ContentKind::Blog) {
        urls.push((
            format!("{}{}", site.base_url, record.path()),
            record.published_at,
            "monthly",
            "0.7",
        ));
    }

    for record in store.list_kind(ContentKind::Faq) {
        urls.push((
            format!("{}{}", site.base_url, record.path()),
            record.published_at,
            "monthly",
            "0.5",
        ));
    }

    let entries: Vec<String> = urls
        .into_iter()
        .map(|(loc, lastmod, changefreq, priority)| {
            format!(
                "  <url>\n    <loc>{}</loc>\n    <lastmod>{}</lastmod>\n    <changefreq>{}</changefreq>\n    <priority>{}</priority>\n  </url>",
                escape_xml(&loc),
                lastmod.format("%Y-%m-%d"),
                changefreq,
                priority
            )
        })
        .collect();

    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n{}\n</urlset>\n",
        entries.join("\n")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::tests::{post, site};

    #[test]
    fn test_sitemap_lists_pages_and_posts() {
        let mut bare_service = post("bare", "2024-01-01");
        bare_service.kind = ContentKind::Service;
        let store = ContentStore::new(vec![post("a", "2024-01-15"), bare_service]).unwrap();
        let today = NaiveDate::from_ymd_opt(2024, 2, 1).unwrap();

        let xml = render_sitemap(&store, &site(), today);
        assert!(xml.contains("<loc>https://outseek.net</loc>"));
        assert!(xml.contains("<loc>https://outseek.net/faq</loc>"));
        assert!(xml.contains("<loc>https://outseek.net/blog/a</loc>\n    <lastmod>2024-01-15</lastmod>"));
        // Services without a detail page would 404
        assert!(!xml.contains("/services/bare"));
        assert!(!xml.contains("/404"));
        assert_eq!(xml.matches("<url>").count(), StaticPage::INDEXABLE.len() + 1);
    }

    #[test]
    fn test_sitemap_lists_faq_entries() {
        let mut question = post("pricing", "2024-01-05");
        question.kind = ContentKind::Faq;
        let store = ContentStore::new(vec![post("a", "2024-01-15"), question]).unwrap();
        let today = NaiveDate::from_ymd_opt(2024, 2, 1).unwrap();

        let xml = render_sitemap(&store, &site(), today);
        assert!(xml.contains("<loc>https://outseek.net/faq/pricing</loc>\n    <lastmod>2024-01-05</lastmod>"));
        assert_eq!(xml.matches("<url>").count(), StaticPage::INDEXABLE.len() + 2);
    }
}
