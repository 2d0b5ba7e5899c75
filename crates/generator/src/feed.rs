//! RSS 2.0 feed of blog posts.

use crate::escape::{cdata, escape_xml};
use crate::markup::render_body;
use crate::metadata::{canonical_url, resolve_image};
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use outseek_site_core::{ContentKind, ContentRecord, ContentStore, SiteConfig};

/// Maximum number of items in the feed
pub const FEED_ITEM_LIMIT: usize = 20;

pub const FEED_CONTENT_TYPE: &str = "application/xml; charset=utf-8";
pub const FEED_CACHE_CONTROL: &str = "public, s-maxage=3600, stale-while-revalidate=86400";

/// Render the feed: blog posts only, newest first, at most
/// [`FEED_ITEM_LIMIT`] items. `now` becomes `lastBuildDate`.
pub fn render_feed(store: &ContentStore, site: &SiteConfig, now: DateTime<Utc>) -> String {
    let items: Vec<String> = store
        .recent(ContentKind::Blog)
        .into_iter()
        .take(FEED_ITEM_LIMIT)
        .map(|post| render_item(post, site))
        .collect();

    tracing::debug!(items = items.len(), "rendered feed");

    let brand = escape_xml(&site.brand);
    let email = escape_xml(&site.contact_email);

    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0" xmlns:atom="http://www.w3.org/2005/Atom" xmlns:content="http://purl.org/rss/1.0/modules/content/">
  <channel>
    <title>{brand} Blog</title>
    <link>{link}</link>
    <description>Latest technology insights, tutorials, and industry news from {brand}</description>
    <language>{language}</language>
    <managingEditor>{email} ({brand})</managingEditor>
    <webMaster>{email} ({brand})</webMaster>
    <lastBuildDate>{build_date}</lastBuildDate>
    <atom:link href="{link}/feed.xml" rel="self" type="application/rss+xml" />
{items}
  </channel>
</rss>
"#,
        brand = brand,
        link = escape_xml(&site.base_url),
        language = escape_xml(&site.language),
        email = email,
        build_date = now.to_rfc2822(),
        items = items.join("\n"),
    )
}

fn render_item(post: &ContentRecord, site: &SiteConfig) -> String {
    let url = escape_xml(&canonical_url(&site.base_url, post.kind.section(), &post.slug));
    let image = resolve_image(post.image.as_deref(), site);

    let mut lines = vec![
        "    <item>".to_string(),
        format!("      <title>{}</title>", escape_xml(&post.title)),
        format!("      <link>{}</link>", url),
        format!(r#"      <guid isPermaLink="true">{}</guid>"#, url),
        format!("      <description>{}</description>", escape_xml(&post.excerpt)),
        format!("      <pubDate>{}</pubDate>", rfc2822_date(post.published_at)),
    ];

    if let Some(author) = &post.author {
        lines.push(format!(
            "      <author>{} ({})</author>",
            escape_xml(&site.contact_email),
            escape_xml(&author.name)
        ));
    }

    lines.push(format!(
        "      <category>{}</category>",
        escape_xml(post.category.label())
    ));
    for tag in &post.tags {
        lines.push(format!("      <category>{}</category>", escape_xml(tag)));
    }

    lines.push(format!(
        r#"      <enclosure url="{}" length="0" type="{}" />"#,
        escape_xml(&image),
        image_mime(&image)
    ));
    lines.push(format!(
        "      <content:encoded>{}</content:encoded>",
        cdata(&render_body(post))
    ));
    lines.push("    </item>".to_string());

    lines.join("\n")
}

/// RFC 2822 date at midnight UTC, as RSS `pubDate` expects
pub fn rfc2822_date(date: NaiveDate) -> String {
    date.and_time(NaiveTime::default()).and_utc().to_rfc2822()
}

fn image_mime(url: &str) -> &'static str {
    mime_guess::from_path(url)
        .first_raw()
        .filter(|mime| mime.starts_with("image/"))
        .unwrap_or("image/jpeg")
}
