//! Page metadata: titles, canonical URLs, Open Graph and Twitter cards.
//!
//! Everything here is a pure function of a record (or a static page) and the
//! site configuration.

use crate::escape::escape_html;
use outseek_site_core::{ContentKind, ContentRecord, Error, Result, SiteConfig};

pub const OG_IMAGE_WIDTH: u32 = 1200;
pub const OG_IMAGE_HEIGHT: u32 = 630;

/// `"{title} | {brand}"`, unless the title already mentions the brand.
pub fn compose_title(title: &str, brand: &str) -> String {
    if title.contains(brand) {
        title.to_string()
    } else {
        format!("{} | {}", title, brand)
    }
}

pub fn canonical_url(base_url: &str, section: &str, slug: &str) -> String {
    format!("{}/{}/{}", base_url, section, slug)
}

pub fn is_absolute_url(s: &str) -> bool {
    s.starts_with("https://") || s.starts_with("http://")
}

/// Absolute image URL for social previews. Relative paths are resolved
/// against the site; a missing image falls back to the site default.
pub fn resolve_image(image: Option<&str>, site: &SiteConfig) -> String {
    let image = image
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or(&site.default_image);

    if is_absolute_url(image) {
        image.to_string()
    } else if image.starts_with('/') {
        format!("{}{}", site.base_url, image)
    } else {
        format!("{}/{}", site.base_url, image)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OgType {
    Website,
    Article,
}

impl OgType {
    pub fn as_str(&self) -> &'static str {
        match self {
            OgType::Website => "website",
            OgType::Article => "article",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct OgImage {
    pub url: String,
    pub width: u32,
    pub height: u32,
    pub alt: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OpenGraph {
    pub og_type: OgType,
    pub title: String,
    pub description: String,
    pub url: String,
    pub site_name: String,
    pub image: OgImage,
    pub locale: String,
    pub published_time: Option<String>,
    pub modified_time: Option<String>,
    pub authors: Vec<String>,
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TwitterCard {
    pub title: String,
    pub description: String,
    pub image: String,
    pub creator: Option<String>,
    pub site: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Robots {
    pub index: bool,
    pub follow: bool,
}

impl Robots {
    fn directives(&self) -> String {
        format!(
            "{}, {}",
            if self.index { "index" } else { "noindex" },
            if self.follow { "follow" } else { "nofollow" }
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PageMetadata {
    pub title: String,
    pub description: String,
    pub canonical: String,
    pub language: String,
    pub keywords: Vec<String>,
    pub open_graph: OpenGraph,
    pub twitter: TwitterCard,
    pub robots: Robots,
    /// Extra `<meta property=...>` pairs, e.g. `article:section`
    pub extra: Vec<(String, String)>,
}

/// Pages that are not backed by a content record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StaticPage {
    Home,
    BlogIndex,
    Services,
    Faq,
    Privacy,
    SiteMap,
    NotFound,
}

impl StaticPage {
    pub const INDEXABLE: [StaticPage; 6] = [
        StaticPage::Home,
        StaticPage::BlogIndex,
        StaticPage::Services,
        StaticPage::Faq,
        StaticPage::Privacy,
        StaticPage::SiteMap,
    ];

    pub fn path(&self) -> &'static str {
        match self {
            StaticPage::Home => "/",
            StaticPage::BlogIndex => "/blog",
            StaticPage::Services => "/services",
            StaticPage::Faq => "/faq",
            StaticPage::Privacy => "/privacy",
            StaticPage::SiteMap => "/site-map",
            StaticPage::NotFound => "/404",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            StaticPage::Home => "Home",
            StaticPage::BlogIndex => "Blog & Insights",
            StaticPage::Services => "Our Services",
            StaticPage::Faq => "Frequently Asked Questions",
            StaticPage::Privacy => "Privacy Policy",
            StaticPage::SiteMap => "Site Map",
            StaticPage::NotFound => "Page Not Found",
        }
    }

    pub fn description(&self, brand: &str) -> String {
        match self {
            StaticPage::Home => format!(
                "{} delivers cutting-edge IT and software solutions including AI, machine learning, cloud computing, NLP, and comprehensive technology services.",
                brand
            ),
            StaticPage::BlogIndex => format!(
                "Stay updated with the latest technology trends, insights, and best practices from {}.",
                brand
            ),
            StaticPage::Services => "Comprehensive IT and software services including AI, machine learning, cloud computing, NLP, web development, mobile apps, cybersecurity, and more.".to_string(),
            StaticPage::Faq => format!(
                "Find answers to common questions about {}'s IT and software services, development process, project timelines, and business support.",
                brand
            ),
            StaticPage::Privacy => format!(
                "How {} collects, uses, and protects your information.",
                brand
            ),
            StaticPage::SiteMap => format!("Browse every page on the {} website.", brand),
            StaticPage::NotFound => "The page you are looking for does not exist.".to_string(),
        }
    }

    pub fn canonical(&self, site: &SiteConfig) -> String {
        match self {
            StaticPage::Home => site.base_url.clone(),
            _ => format!("{}{}", site.base_url, self.path()),
        }
    }
}

/// Metadata for a content record's own page.
///
/// Fails with [`Error::MalformedRecord`] if `slug` or `title` is empty.
pub fn for_record(record: &ContentRecord, site: &SiteConfig) -> Result<PageMetadata> {
    for (field, value) in [("slug", &record.slug), ("title", &record.title)] {
        if value.trim().is_empty() {
            return Err(Error::MalformedRecord {
                id: record.id.clone(),
                field,
            });
        }
    }

    let canonical = canonical_url(&site.base_url, record.kind.section(), &record.slug);
    let title = compose_title(&record.title, &site.brand);
    let image = resolve_image(record.image.as_deref(), site);
    let alt = record.image_alt.clone().unwrap_or_else(|| record.title.clone());

    let mut meta = base_metadata(site, title, record.excerpt.clone(), canonical, image, alt);

    match record.kind {
        ContentKind::Blog => {
            let date = record.published_at.format("%Y-%m-%d").to_string();
            let author = record.author.as_ref().map(|a| a.name.clone());

            meta.keywords = record.tags.clone();
            meta.open_graph.og_type = OgType::Article;
            meta.open_graph.published_time = Some(date.clone());
            meta.open_graph.modified_time = Some(date);
            meta.open_graph.authors = author.into_iter().collect();
            meta.open_graph.tags = record.tags.clone();

            meta.extra.push((
                "article:section".to_string(),
                record.category.label().to_string(),
            ));
        }
        ContentKind::Service => {
            meta.keywords = vec![
                record.title.clone(),
                format!("{} services", record.title.to_lowercase()),
                "IT services".to_string(),
                "software development".to_string(),
            ];
        }
        ContentKind::Faq => {
            meta.keywords = vec![record.category.label().to_string(), "FAQ".to_string()];
        }
    }

    Ok(meta)
}

/// Metadata for a page without a backing record
pub fn for_page(page: StaticPage, site: &SiteConfig) -> PageMetadata {
    let title = compose_title(page.title(), &site.brand);
    let title = if page == StaticPage::Home {
        site.brand.clone()
    } else {
        title
    };

    let mut meta = base_metadata(
        site,
        title,
        page.description(&site.brand),
        page.canonical(site),
        resolve_image(None, site),
        format!("{} {}", site.brand, page.title()),
    );

    if page == StaticPage::NotFound {
        meta.robots = Robots {
            index: false,
            follow: true,
        };
    }

    meta
}

fn base_metadata(
    site: &SiteConfig,
    title: String,
    description: String,
    canonical: String,
    image: String,
    alt: String,
) -> PageMetadata {
    PageMetadata {
        open_graph: OpenGraph {
            og_type: OgType::Website,
            title: title.clone(),
            description: description.clone(),
            url: canonical.clone(),
            site_name: site.brand.clone(),
            image: OgImage {
                url: image.clone(),
                width: OG_IMAGE_WIDTH,
                height: OG_IMAGE_HEIGHT,
                alt,
            },
            locale: site.locale.clone(),
            published_time: None,
            modified_time: None,
            authors: Vec::new(),
            tags: Vec::new(),
        },
        twitter: TwitterCard {
            title: title.clone(),
            description: description.clone(),
            image,
            creator: site.twitter_handle.clone(),
            site: site.twitter_handle.clone(),
        },
        title,
        description,
        canonical,
        language: site.language.clone(),
        keywords: Vec::new(),
        robots: Robots {
            index: true,
            follow: true,
        },
        extra: Vec::new(),
    }
}

impl PageMetadata {
    /// `<head>` tags for this page, every value HTML-escaped
    pub fn to_head_html(&self) -> String {
        let mut tags = vec![
            format!("<title>{}</title>", escape_html(&self.title)),
            meta_name("description", &self.description),
        ];

        if !self.keywords.is_empty() {
            tags.push(meta_name("keywords", &self.keywords.join(", ")));
        }

        let canonical = escape_html(&self.canonical);
        tags.push(format!(r#"<link rel="canonical" href="{}">"#, canonical));
        for lang in [self.language.as_str(), "x-default"] {
            tags.push(format!(
                r#"<link rel="alternate" hreflang="{}" href="{}">"#,
                escape_html(lang),
                canonical
            ));
        }

        let robots = self.robots.directives();
        tags.push(meta_name("robots", &robots));
        tags.push(meta_name(
            "googlebot",
            &format!(
                "{}, max-video-preview:-1, max-image-preview:large, max-snippet:-1",
                robots
            ),
        ));

        let og = &self.open_graph;
        tags.push(meta_property("og:type", og.og_type.as_str()));
        tags.push(meta_property("og:title", &og.title));
        tags.push(meta_property("og:description", &og.description));
        tags.push(meta_property("og:url", &og.url));
        tags.push(meta_property("og:site_name", &og.site_name));
        tags.push(meta_property("og:locale", &og.locale));
        tags.push(meta_property("og:image", &og.image.url));
        tags.push(meta_property("og:image:width", &og.image.width.to_string()));
        tags.push(meta_property("og:image:height", &og.image.height.to_string()));
        tags.push(meta_property("og:image:alt", &og.image.alt));
        if let Some(published) = &og.published_time {
            tags.push(meta_property("article:published_time", published));
        }
        if let Some(modified) = &og.modified_time {
            tags.push(meta_property("article:modified_time", modified));
        }
        for author in &og.authors {
            tags.push(meta_property("article:author", author));
        }
        for tag in &og.tags {
            tags.push(meta_property("article:tag", tag));
        }

        let tw = &self.twitter;
        tags.push(meta_name("twitter:card", "summary_large_image"));
        tags.push(meta_name("twitter:title", &tw.title));
        tags.push(meta_name("twitter:description", &tw.description));
        tags.push(meta_name("twitter:image", &tw.image));
        if let Some(creator) = &tw.creator {
            tags.push(meta_name("twitter:creator", creator));
        }
        if let Some(site) = &tw.site {
            tags.push(meta_name("twitter:site", site));
        }

        for (property, content) in &self.extra {
            tags.push(meta_property(property, content));
        }

        tags.join("\n")
    }
}

fn meta_name(name: &str, content: &str) -> String {
    format!(
        r#"<meta name="{}" content="{}">"#,
        escape_html(name),
        escape_html(content)
    )
}

fn meta_property(property: &str, content: &str) -> String {
    format!(
        r#"<meta property="{}" content="{}">"#,
        escape_html(property),
        escape_html(content)
    )
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use chrono::NaiveDate;
    use outseek_site_core::{Author, BodyFormat, Category, FeedConfig, SocialProfiles};
    use std::path::PathBuf;

    pub(crate) fn site() -> SiteConfig {
        SiteConfig {
            base_url: "https://outseek.net".to_string(),
            brand: "Outseek".to_string(),
            contact_email: "info@outseek.net".to_string(),
            default_image: "/assets/logos/OutseekLogo-01.png".to_string(),
            language: "en-US".to_string(),
            locale: "en_US".to_string(),
            twitter_handle: Some("@outseek".to_string()),
            established_year: Some(2020),
            social: SocialProfiles::default(),
            content: PathBuf::from("content.toml"),
            feed: FeedConfig { enabled: true },
        }
    }

    pub(crate) fn post(slug: &str, date: &str) -> ContentRecord {
        ContentRecord {
            id: slug.to_string(),
            kind: ContentKind::Blog,
            slug: slug.to_string(),
            title: format!("Post {}", slug),
            excerpt: format!("About {}", slug),
            body: format!("<p>{}</p>", slug),
            body_format: BodyFormat::Html,
            category: Category::Cloud,
            published_at: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            tags: vec!["Cloud".to_string(), "AWS".to_string()],
            author: Some(Author {
                name: "Rajesh Kumar".to_string(),
                role: "Cloud Solutions Architect".to_string(),
                avatar: None,
            }),
            image: None,
            image_alt: None,
            read_time: Some("7 min read".to_string()),
            service: None,
        }
    }

    #[test]
    fn test_compose_title_appends_brand() {
        assert_eq!(compose_title("Cloud Migration", "Outseek"), "Cloud Migration | Outseek");
    }

    #[test]
    fn test_compose_title_is_idempotent() {
        let once = compose_title("Cloud Migration", "Outseek");
        assert_eq!(compose_title(&once, "Outseek"), once);
        assert_eq!(compose_title("Why Outseek?", "Outseek"), "Why Outseek?");
    }

    #[test]
    fn test_resolve_image() {
        let site = site();
        assert_eq!(
            resolve_image(Some("https://cdn.example.com/a.jpg"), &site),
            "https://cdn.example.com/a.jpg"
        );
        assert_eq!(
            resolve_image(Some("/assets/a.jpg"), &site),
            "https://outseek.net/assets/a.jpg"
        );
        assert_eq!(
            resolve_image(Some("assets/a.jpg"), &site),
            "https://outseek.net/assets/a.jpg"
        );
        assert_eq!(
            resolve_image(None, &site),
            "https://outseek.net/assets/logos/OutseekLogo-01.png"
        );
        assert_eq!(resolve_image(Some("  "), &site), resolve_image(None, &site));
    }

    #[test]
    fn test_default_image_same_for_all_kinds() {
        let site = site();
        let blog = post("a", "2024-01-01");
        let mut service = post("b", "2024-01-01");
        service.kind = ContentKind::Service;
        service.author = None;

        let blog_meta = for_record(&blog, &site).unwrap();
        let service_meta = for_record(&service, &site).unwrap();
        let page_meta = for_page(StaticPage::Faq, &site);
        assert_eq!(blog_meta.open_graph.image.url, service_meta.open_graph.image.url);
        assert_eq!(blog_meta.open_graph.image.url, page_meta.open_graph.image.url);
    }

    #[test]
    fn test_canonical_is_deterministic() {
        let site = site();
        let record = post("cloud-migration-best-practices", "2024-01-10");
        let first = for_record(&record, &site).unwrap();
        let second = for_record(&record, &site).unwrap();
        assert_eq!(first.canonical, second.canonical);
        assert_eq!(
            first.canonical,
            "https://outseek.net/blog/cloud-migration-best-practices"
        );
    }

    #[test]
    fn test_blog_metadata_is_article() {
        let meta = for_record(&post("a", "2024-01-15"), &site()).unwrap();
        assert_eq!(meta.title, "Post a | Outseek");
        assert_eq!(meta.description, "About a");
        assert_eq!(meta.open_graph.og_type, OgType::Article);
        assert_eq!(meta.open_graph.published_time.as_deref(), Some("2024-01-15"));
        assert_eq!(meta.open_graph.authors, vec!["Rajesh Kumar"]);
        assert_eq!(meta.extra, vec![("article:section".to_string(), "Cloud".to_string())]);
        assert_eq!(meta.keywords, vec!["Cloud", "AWS"]);
    }

    #[test]
    fn test_service_metadata_keywords() {
        let mut record = post("devops", "2024-01-01");
        record.kind = ContentKind::Service;
        record.title = "DevOps".to_string();
        let meta = for_record(&record, &site()).unwrap();
        assert_eq!(meta.canonical, "https://outseek.net/services/devops");
        assert_eq!(meta.open_graph.og_type, OgType::Website);
        assert!(meta.keywords.contains(&"devops services".to_string()));
        assert!(meta.extra.is_empty());
    }

    #[test]
    fn test_malformed_record_fails_fast() {
        let mut record = post("a", "2024-01-01");
        record.title = String::new();
        let err = for_record(&record, &site()).unwrap_err();
        assert!(matches!(err, Error::MalformedRecord { field: "title", .. }));
    }

    #[test]
    fn test_static_pages() {
        let site = site();
        let home = for_page(StaticPage::Home, &site);
        assert_eq!(home.title, "Outseek");
        assert_eq!(home.canonical, "https://outseek.net");

        let faq = for_page(StaticPage::Faq, &site);
        assert_eq!(faq.title, "Frequently Asked Questions | Outseek");
        assert_eq!(faq.canonical, "https://outseek.net/faq");
        assert!(faq.robots.index);

        let missing = for_page(StaticPage::NotFound, &site);
        assert!(!missing.robots.index);
    }

    #[test]
    fn test_head_html_is_escaped() {
        let mut record = post("a", "2024-01-01");
        record.title = "Tom & \"Jerry\"".to_string();
        let head = for_record(&record, &site()).unwrap().to_head_html();
        assert!(head.contains("<title>Tom &amp; &quot;Jerry&quot; | Outseek</title>"));
        assert!(head.contains(r#"<link rel="canonical" href="https://outseek.net/blog/a">"#));
        assert!(head.contains(r#"<meta property="og:type" content="article">"#));
        assert!(head.contains(r#"<meta name="twitter:site" content="@outseek">"#));
        assert!(head.contains(r#"<meta property="article:section" content="Cloud">"#));
        assert_eq!(head.matches("article:published_time").count(), 1);
        assert_eq!(head.matches("article:author").count(), 1);
        assert_eq!(head.matches(r#"<meta property="article:tag""#).count(), 2);
    }

    #[test]
    fn test_head_html_noindex() {
        let head = for_page(StaticPage::NotFound, &site()).to_head_html();
        assert!(head.contains(r#"<meta name="robots" content="noindex, follow">"#));
    }
}
