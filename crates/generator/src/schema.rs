//! schema.org structured data (JSON-LD).
//!
//! Each builder is an independent function returning a [`JsonLd`] node.
//! Nodes keep keys in insertion order and drop absent values instead of
//! serializing `null`.

use crate::metadata::{OG_IMAGE_HEIGHT, OG_IMAGE_WIDTH, canonical_url, resolve_image};
use outseek_site_core::{ContentKind, ContentRecord, SiteConfig};
use serde_json::{Map, Value};

const SCHEMA_CONTEXT: &str = "https://schema.org";

#[derive(Debug, Clone, PartialEq, Default)]
pub struct JsonLd(Map<String, Value>);

impl JsonLd {
    /// Nested node with only a `@type`
    pub fn new(kind: &str) -> Self {
        let mut map = Map::new();
        map.insert("@type".to_string(), Value::from(kind));
        Self(map)
    }

    /// Top-level node carrying `@context`
    pub fn root(kind: &str) -> Self {
        let mut map = Map::new();
        map.insert("@context".to_string(), Value::from(SCHEMA_CONTEXT));
        map.insert("@type".to_string(), Value::from(kind));
        Self(map)
    }

    /// Set `key`, skipping null, empty strings, empty arrays and empty objects.
    pub fn set(mut self, key: &str, value: impl Into<Value>) -> Self {
        let value = value.into();
        if !is_absent(&value) {
            self.0.insert(key.to_string(), value);
        }
        self
    }

    pub fn set_opt<V: Into<Value>>(self, key: &str, value: Option<V>) -> Self {
        match value {
            Some(value) => self.set(key, value),
            None => self,
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }

    /// `<script type="application/ld+json">` element. Every `<` is written as
    /// `\u003c` so the payload cannot close the script or open a comment.
    pub fn to_script_tag(&self) -> String {
        let json = Value::Object(self.0.clone()).to_string().replace('<', "\\u003c");
        format!(r#"<script type="application/ld+json">{}</script>"#, json)
    }
}

impl From<JsonLd> for Value {
    fn from(node: JsonLd) -> Self {
        node.into_value()
    }
}

fn is_absent(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
        _ => false,
    }
}

fn image_object(url: String) -> JsonLd {
    JsonLd::new("ImageObject")
        .set("url", url)
        .set("width", OG_IMAGE_WIDTH)
        .set("height", OG_IMAGE_HEIGHT)
}

fn publisher(site: &SiteConfig) -> JsonLd {
    JsonLd::new("Organization")
        .set("name", site.brand.as_str())
        .set("url", site.base_url.as_str())
        .set("logo", image_object(resolve_image(None, site)))
}

pub fn organization(site: &SiteConfig) -> JsonLd {
    let logo = resolve_image(None, site);

    JsonLd::root("Organization")
        .set("@id", format!("{}#organization", site.base_url))
        .set("name", site.brand.as_str())
        .set("url", site.base_url.as_str())
        .set("logo", image_object(logo.clone()))
        .set("image", logo)
        .set("email", site.contact_email.as_str())
        .set_opt(
            "foundingDate",
            site.established_year.map(|y| format!("{}-01-01", y)),
        )
        .set("sameAs", site.social.urls())
        .set(
            "contactPoint",
            vec![Value::from(
                JsonLd::new("ContactPoint")
                    .set("email", site.contact_email.as_str())
                    .set("contactType", "Customer Service")
                    .set("availableLanguage", vec!["English"])
                    .set("areaServed", "Worldwide"),
            )],
        )
        .set(
            "description",
            format!(
                "{} delivers cutting-edge IT and software solutions including AI, machine learning, cloud computing, NLP, and comprehensive technology services.",
                site.brand
            ),
        )
}

/// WebSite node whose search action points at the FAQ filter
pub fn website(site: &SiteConfig) -> JsonLd {
    JsonLd::root("WebSite")
        .set("name", site.brand.as_str())
        .set("url", site.base_url.as_str())
        .set("inLanguage", site.language.as_str())
        .set(
            "potentialAction",
            JsonLd::new("SearchAction")
                .set(
                    "target",
                    JsonLd::new("EntryPoint").set(
                        "urlTemplate",
                        format!("{}/faq?q={{search_term_string}}", site.base_url),
                    ),
                )
                .set("query-input", "required name=search_term_string"),
        )
}

/// Breadcrumb trail from `(name, url)` pairs, positions starting at 1
pub fn breadcrumbs(items: &[(String, String)]) -> JsonLd {
    let elements: Vec<Value> = items
        .iter()
        .enumerate()
        .map(|(i, (name, url))| {
            JsonLd::new("ListItem")
                .set("position", i + 1)
                .set("name", name.as_str())
                .set("item", url.as_str())
                .into_value()
        })
        .collect();

    JsonLd::root("BreadcrumbList").set("itemListElement", elements)
}

/// Home > Section > Title
pub fn record_breadcrumbs(record: &ContentRecord, site: &SiteConfig) -> JsonLd {
    let section = record.kind.section();
    let section_name = match record.kind {
        ContentKind::Blog => "Blog",
        ContentKind::Service => "Services",
        ContentKind::Faq => "FAQ",
    };

    breadcrumbs(&[
        ("Home".to_string(), site.base_url.clone()),
        (
            section_name.to_string(),
            format!("{}/{}", site.base_url, section),
        ),
        (
            record.title.clone(),
            canonical_url(&site.base_url, section, &record.slug),
        ),
    ])
}

pub fn article(record: &ContentRecord, site: &SiteConfig) -> JsonLd {
    let url = canonical_url(&site.base_url, record.kind.section(), &record.slug);
    let date = record.published_at.format("%Y-%m-%d").to_string();
    let image = record
        .image
        .as_deref()
        .map(|image| vec![resolve_image(Some(image), site)]);

    let author = record.author.as_ref().map(|author| {
        JsonLd::new("Person")
            .set("name", author.name.as_str())
            .set("jobTitle", author.role.as_str())
            .set_opt(
                "image",
                author
                    .avatar
                    .as_deref()
                    .map(|avatar| resolve_image(Some(avatar), site)),
            )
    });

    JsonLd::root("Article")
        .set("headline", record.title.as_str())
        .set("description", record.excerpt.as_str())
        .set_opt("image", image)
        .set("datePublished", date.clone())
        .set("dateModified", date)
        .set_opt("author", author)
        .set("publisher", publisher(site))
        .set(
            "mainEntityOfPage",
            JsonLd::new("WebPage").set("@id", url),
        )
        .set("articleSection", record.category.label())
        .set("inLanguage", site.language.as_str())
        .set("keywords", record.tags.join(", "))
}

pub fn service(record: &ContentRecord, site: &SiteConfig) -> JsonLd {
    let offers: Vec<Value> = record
        .service
        .iter()
        .flat_map(|detail| &detail.subservices)
        .map(|sub| {
            JsonLd::new("Offer")
                .set(
                    "itemOffered",
                    JsonLd::new("Service")
                        .set("name", sub.title.as_str())
                        .set("description", sub.description.as_str()),
                )
                .into_value()
        })
        .collect();

    let catalog = (!offers.is_empty()).then(|| {
        JsonLd::new("OfferCatalog")
            .set("name", record.title.as_str())
            .set("itemListElement", offers)
    });

    JsonLd::root("Service")
        .set("name", record.title.as_str())
        .set("description", record.excerpt.as_str())
        .set(
            "url",
            canonical_url(&site.base_url, record.kind.section(), &record.slug),
        )
        .set("provider", publisher(site))
        .set("serviceType", record.category.label())
        .set("areaServed", JsonLd::new("Place").set("name", "Worldwide"))
        .set_opt("hasOfferCatalog", catalog)
}

/// FAQPage graph; each record's title is the question and body the answer.
/// `None` when there are no questions, since `mainEntity` is required.
pub fn faq_page(items: &[&ContentRecord]) -> Option<JsonLd> {
    if items.is_empty() {
        return None;
    }

    let questions: Vec<Value> = items
        .iter()
        .map(|faq| {
            JsonLd::new("Question")
                .set("name", faq.title.as_str())
                .set(
                    "acceptedAnswer",
                    JsonLd::new("Answer").set("text", faq.body.as_str()),
                )
                .into_value()
        })
        .collect();

    Some(JsonLd::root("FAQPage").set("mainEntity", questions))
}

/// CollectionPage wrapping an ItemList of record links
pub fn collection_page(
    name: &str,
    description: &str,
    url: &str,
    items: &[&ContentRecord],
    site: &SiteConfig,
) -> JsonLd {
    let elements: Vec<Value> = items
        .iter()
        .enumerate()
        .map(|(i, record)| {
            JsonLd::new("ListItem")
                .set("position", i + 1)
                .set("name", record.title.as_str())
                .set("description", record.excerpt.as_str())
                .set(
                    "url",
                    canonical_url(&site.base_url, record.kind.section(), &record.slug),
                )
                .into_value()
        })
        .collect();

    JsonLd::root("CollectionPage")
        .set("name", name)
        .set("description", description)
        .set("url", url)
        .set(
            "mainEntity",
            JsonLd::new("ItemList")
                .set("numberOfItems", items.len())
                .set("itemListElement", elements),
        )
}
