//! `content.toml` loading.
//!
//! The file declares `[[post]]`, `[[service]]` and `[[faq]]` tables. Records
//! come out in that order: posts, then services, then FAQ entries, each in
//! the order they appear in the file.

use crate::error::{Error, Result};
use crate::types::*;
use chrono::NaiveDate;
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawContentFile {
    #[serde(default)]
    post: Vec<RawPost>,
    #[serde(default)]
    service: Vec<RawService>,
    #[serde(default)]
    faq: Vec<RawFaqGroup>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawPost {
    id: Option<String>,
    slug: Option<String>, // Derived from title when absent
    title: String,
    excerpt: String,
    content: String,
    #[serde(default)]
    format: BodyFormat,
    date: String, // Parse as NaiveDate
    category: String,
    read_time: Option<String>,
    image: Option<String>,
    image_alt: Option<String>,
    author: Author,
    #[serde(default)]
    tags: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawService {
    id: Option<String>,
    slug: Option<String>,
    title: String,
    description: String,
    category: String,
    date: String,
    image: Option<String>,
    #[serde(default)]
    tags: Vec<String>,
    detail: Option<RawServiceDetail>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawServiceDetail {
    tier: ServiceTier,
    overview: String,
    #[serde(default)]
    benefits: Vec<String>,
    #[serde(default, rename = "subservice")]
    subservices: Vec<SubService>,
    approach: String,
    #[serde(default)]
    industries: Vec<String>,
    team: String,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawFaqGroup {
    category: String,
    date: String,
    #[serde(rename = "item")]
    items: Vec<RawFaqItem>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawFaqItem {
    slug: Option<String>,
    question: String,
    answer: String,
}

/// Parse content.toml from a file path
pub fn parse_content_toml<P: AsRef<Path>>(path: P) -> Result<Vec<ContentRecord>> {
    let content = fs::read_to_string(path)?;
    parse_content_toml_str(&content)
}

/// Parse content.toml from a string (useful for testing)
pub fn parse_content_toml_str(content: &str) -> Result<Vec<ContentRecord>> {
    let raw: RawContentFile = toml::from_str(content)?;
    let mut records = Vec::with_capacity(raw.post.len() + raw.service.len());

    for post in raw.post {
        let slug = post.slug.unwrap_or_else(|| slugify(&post.title));
        records.push(ContentRecord {
            id: post.id.unwrap_or_else(|| slug.clone()),
            kind: ContentKind::Blog,
            published_at: parse_date(&post.date, &slug)?,
            slug,
            title: post.title,
            excerpt: post.excerpt,
            body: post.content,
            body_format: post.format,
            category: Category::from(post.category),
            tags: post.tags,
            author: Some(post.author),
            image: post.image,
            image_alt: post.image_alt,
            read_time: post.read_time,
            service: None,
        });
    }

    for service in raw.service {
        let slug = service.slug.unwrap_or_else(|| slugify(&service.title));
        let detail = service.detail.map(|d| ServiceDetail {
            tier: d.tier,
            overview: d.overview,
            benefits: d.benefits,
            subservices: d.subservices,
            approach: d.approach,
            industries: d.industries,
            team: d.team,
        });
        let body = detail
            .as_ref()
            .map(|d| d.overview.clone())
            .unwrap_or_else(|| service.description.clone());

        records.push(ContentRecord {
            id: service.id.unwrap_or_else(|| slug.clone()),
            kind: ContentKind::Service,
            published_at: parse_date(&service.date, &slug)?,
            slug,
            title: service.title,
            excerpt: service.description,
            body,
            body_format: BodyFormat::Html,
            category: Category::from(service.category),
            tags: service.tags,
            author: None,
            image: service.image,
            image_alt: None,
            read_time: None,
            service: detail,
        });
    }

    let mut faq_index = 0;
    for group in raw.faq {
        let published_at = parse_date(&group.date, &group.category)?;
        for item in group.items {
            faq_index += 1;
            let slug = item.slug.unwrap_or_else(|| slugify(&item.question));
            records.push(ContentRecord {
                id: format!("faq-{}", faq_index),
                kind: ContentKind::Faq,
                slug,
                excerpt: item.answer.clone(),
                title: item.question,
                body: item.answer,
                body_format: BodyFormat::Html,
                category: Category::from(group.category.clone()),
                published_at,
                tags: Vec::new(),
                author: None,
                image: None,
                image_alt: None,
                read_time: None,
                service: None,
            });
        }
    }

    Ok(records)
}

fn parse_date(date: &str, owner: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d")
        .map_err(|e| Error::ConfigParse(format!("Invalid date '{}' in '{}': {}", date, owner, e)))
}
