//! Read-only content store.
//!
//! Records are handed in by the caller (usually [`crate::content`] after
//! parsing `content.toml`) and never change afterwards. Every listing keeps
//! declaration order unless it says otherwise.

use crate::error::{Error, Result};
use crate::types::{ContentKind, ContentRecord, is_valid_slug};
use std::collections::HashMap;

#[derive(Debug, Clone, Default)]
pub struct ContentStore {
    records: Vec<ContentRecord>,
    by_slug: HashMap<String, usize>,
}

/// FAQ entries sharing a category, as returned by [`ContentStore::search_faq`]
#[derive(Debug, Clone, PartialEq)]
pub struct FaqGroup<'a> {
    pub category: &'a str,
    pub items: Vec<&'a ContentRecord>,
}

impl ContentStore {
    /// Build a store, rejecting malformed records and duplicate slugs.
    pub fn new(records: Vec<ContentRecord>) -> Result<Self> {
        let mut by_slug = HashMap::with_capacity(records.len());

        for (index, record) in records.iter().enumerate() {
            check_record(record)?;
            if by_slug.insert(record.slug.clone(), index).is_some() {
                return Err(Error::DuplicateSlug(record.slug.clone()));
            }
        }

        tracing::debug!(records = records.len(), "content store ready");

        Ok(Self { records, by_slug })
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get_by_slug(&self, slug: &str) -> Option<&ContentRecord> {
        self.by_slug.get(slug).map(|&i| &self.records[i])
    }

    /// Lookup for page boundaries: a miss, or a slug of another kind,
    /// is reported as [`Error::NotFound`].
    pub fn find(&self, kind: ContentKind, slug: &str) -> Result<&ContentRecord> {
        self.get_by_slug(slug)
            .filter(|record| record.kind == kind)
            .ok_or_else(|| Error::NotFound {
                kind,
                slug: slug.to_string(),
            })
    }

    pub fn list_all(&self) -> &[ContentRecord] {
        &self.records
    }

    pub fn list_kind(&self, kind: ContentKind) -> impl Iterator<Item = &ContentRecord> {
        self.records.iter().filter(move |r| r.kind == kind)
    }

    /// Records of one kind, newest first. Same-day records keep
    /// declaration order.
    pub fn recent(&self, kind: ContentKind) -> Vec<&ContentRecord> {
        let mut records: Vec<_> = self.list_kind(kind).collect();
        records.sort_by(|a, b| b.published_at.cmp(&a.published_at));
        records
    }

    /// Up to `limit` records sharing kind and category with `slug`.
    pub fn get_related(&self, slug: &str, limit: usize) -> Vec<&ContentRecord> {
        let Some(target) = self.get_by_slug(slug) else {
            return Vec::new();
        };

        self.records
            .iter()
            .filter(|r| r.slug != target.slug)
            .filter(|r| r.kind == target.kind && r.category == target.category)
            .take(limit)
            .collect()
    }

    /// Case-insensitive substring search over FAQ questions and answers.
    pub fn search_faq(&self, query: &str) -> Vec<FaqGroup<'_>> {
        let needle = query.trim().to_lowercase();
        let mut groups: Vec<FaqGroup<'_>> = Vec::new();

        for record in self.list_kind(ContentKind::Faq) {
            let matches = needle.is_empty()
                || record.title.to_lowercase().contains(&needle)
                || record.body.to_lowercase().contains(&needle);
            if !matches {
                continue;
            }

            let label = record.category.label();
            match groups.iter_mut().find(|g| g.category == label) {
                Some(group) => group.items.push(record),
                None => groups.push(FaqGroup {
                    category: label,
                    items: vec![record],
                }),
            }
        }

        groups
    }
}

fn check_record(record: &ContentRecord) -> Result<()> {
    let id = if record.id.trim().is_empty() {
        record.slug.clone()
    } else {
        record.id.clone()
    };

    let required = [
        ("id", record.id.as_str()),
        ("slug", record.slug.as_str()),
        ("title", record.title.as_str()),
    ];
    for (field, value) in required {
        if value.trim().is_empty() {
            return Err(Error::MalformedRecord { id, field });
        }
    }

    if !is_valid_slug(&record.slug) {
        return Err(Error::InvalidData(format!(
            "Slug '{}' of record '{}' must be lowercase letters, digits and single hyphens",
            record.slug, id
        )));
    }

    if record.kind == ContentKind::Blog && record.author.is_none() {
        return Err(Error::MalformedRecord {
            id,
            field: "author",
        });
    }

    Ok(())
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::types::{Author, BodyFormat, Category};
    use chrono::NaiveDate;

    pub(crate) fn record(kind: ContentKind, slug: &str, category: Category, date: &str) -> ContentRecord {
        ContentRecord {
            id: slug.to_string(),
            kind,
            slug: slug.to_string(),
            title: format!("Title of {}", slug),
            excerpt: format!("Excerpt of {}", slug),
            body: format!("<p>Body of {}</p>", slug),
            body_format: BodyFormat::Html,
            category,
            published_at: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            tags: vec![],
            author: Some(Author {
                name: "Priya Sharma".to_string(),
                role: "AI Research Lead".to_string(),
                avatar: None,
            }),
            image: None,
            image_alt: None,
            read_time: None,
            service: None,
        }
    }

    fn faq(slug: &str, group: &str, question: &str, answer: &str) -> ContentRecord {
        let mut r = record(ContentKind::Faq, slug, Category::from(group.to_string()), "2024-01-01");
        r.title = question.to_string();
        r.body = answer.to_string();
        r.author = None;
        r
    }

    #[test]
    fn test_slugs_are_unique() {
        let result = ContentStore::new(vec![
            record(ContentKind::Blog, "a", Category::Cloud, "2024-01-01"),
            record(ContentKind::Service, "a", Category::Cloud, "2024-01-01"),
        ]);
        assert!(matches!(result, Err(Error::DuplicateSlug(ref s)) if s == "a"));
    }

    #[test]
    fn test_get_by_slug_not_found() {
        let store = ContentStore::new(vec![record(
            ContentKind::Blog,
            "a",
            Category::Cloud,
            "2024-01-01",
        )])
        .unwrap();

        assert!(store.get_by_slug("nonexistent-slug").is_none());
        let err = store.find(ContentKind::Blog, "nonexistent-slug").unwrap_err();
        assert!(err.is_not_found());
        assert!(err.to_string().contains("nonexistent-slug"));
    }

    #[test]
    fn test_find_rejects_other_kind() {
        let store = ContentStore::new(vec![record(
            ContentKind::Service,
            "devops",
            Category::DevOps,
            "2024-01-01",
        )])
        .unwrap();

        assert!(store.find(ContentKind::Service, "devops").is_ok());
        assert!(store.find(ContentKind::Blog, "devops").unwrap_err().is_not_found());
    }

    #[test]
    fn test_list_all_keeps_declaration_order() {
        let store = ContentStore::new(vec![
            record(ContentKind::Blog, "c", Category::Cloud, "2023-01-01"),
            record(ContentKind::Blog, "a", Category::Cloud, "2024-01-01"),
            record(ContentKind::Blog, "b", Category::Cloud, "2022-01-01"),
        ])
        .unwrap();

        let slugs: Vec<_> = store.list_all().iter().map(|r| r.slug.as_str()).collect();
        assert_eq!(slugs, vec!["c", "a", "b"]);
    }

    #[test]
    fn test_related_filter() {
        let store = ContentStore::new(vec![
            record(ContentKind::Blog, "a", Category::AiMl, "2024-01-01"),
            record(ContentKind::Blog, "b", Category::AiMl, "2024-01-02"),
            record(ContentKind::Blog, "c", Category::Cloud, "2024-01-03"),
        ])
        .unwrap();

        let related: Vec<_> = store.get_related("a", 2).iter().map(|r| r.slug.as_str()).collect();
        assert_eq!(related, vec!["b"]);
    }

    #[test]
    fn test_related_respects_limit_and_order() {
        let store = ContentStore::new(vec![
            record(ContentKind::Blog, "a", Category::Cloud, "2024-01-01"),
            record(ContentKind::Blog, "b", Category::Cloud, "2023-01-01"),
            record(ContentKind::Service, "s", Category::Cloud, "2024-01-01"),
            record(ContentKind::Blog, "c", Category::Cloud, "2025-01-01"),
            record(ContentKind::Blog, "d", Category::Cloud, "2022-01-01"),
        ])
        .unwrap();

        let related: Vec<_> = store.get_related("a", 2).iter().map(|r| r.slug.as_str()).collect();
        assert_eq!(related, vec!["b", "c"]);
        assert!(store.get_related("missing", 3).is_empty());
        assert!(store.get_related("a", 0).is_empty());
    }

    #[test]
    fn test_recent_is_stable_for_same_day() {
        let store = ContentStore::new(vec![
            record(ContentKind::Blog, "first", Category::Cloud, "2024-01-01"),
            record(ContentKind::Blog, "newest", Category::Cloud, "2024-02-01"),
            record(ContentKind::Blog, "second", Category::Cloud, "2024-01-01"),
        ])
        .unwrap();

        let slugs: Vec<_> = store
            .recent(ContentKind::Blog)
            .iter()
            .map(|r| r.slug.as_str())
            .collect();
        assert_eq!(slugs, vec!["newest", "first", "second"]);
    }

    #[test]
    fn test_rejects_empty_title() {
        let mut r = record(ContentKind::Blog, "a", Category::Cloud, "2024-01-01");
        r.title = "  ".to_string();
        let err = ContentStore::new(vec![r]).unwrap_err();
        assert!(matches!(err, Error::MalformedRecord { field: "title", .. }));
    }

    #[test]
    fn test_rejects_blog_without_author() {
        let mut r = record(ContentKind::Blog, "a", Category::Cloud, "2024-01-01");
        r.author = None;
        let err = ContentStore::new(vec![r]).unwrap_err();
        assert!(matches!(err, Error::MalformedRecord { field: "author", .. }));
    }

    #[test]
    fn test_rejects_invalid_slug() {
        let r = record(ContentKind::Blog, "Not A Slug", Category::Cloud, "2024-01-01");
        let err = ContentStore::new(vec![r]).unwrap_err();
        assert!(err.to_string().contains("Not A Slug"));
    }

    #[test]
    fn test_search_faq_groups_and_filters() {
        let store = ContentStore::new(vec![
            faq("q1", "Services", "Do you offer cybersecurity services?", "Yes, assessments."),
            faq("q2", "Process", "How long does a project take?", "Two to four weeks."),
            faq("q3", "Services", "Can you help with cloud migration?", "Absolutely, AWS and GCP."),
        ])
        .unwrap();

        let all = store.search_faq("   ");
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].category, "Services");
        assert_eq!(all[0].items.len(), 2);

        let hits = store.search_faq("CLOUD");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].items[0].slug, "q3");

        let by_answer = store.search_faq("weeks");
        assert_eq!(by_answer[0].category, "Process");

        assert!(store.search_faq("blockchain").is_empty());
    }
}
