use crate::content::parse_content_toml;
use crate::error::{Error, Result};
use crate::store::ContentStore;
use crate::types::*;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const SITE_TOML: &str = "site.toml";

/// Raw TOML configuration structure
/// This matches the site.toml file structure exactly
#[derive(Debug, Deserialize)]
struct RawConfig {
    site: RawSite,
    #[serde(default)]
    social: SocialProfiles,
    #[serde(default)]
    content: RawContent,
    #[serde(default)]
    feed: RawFeed,
}

#[derive(Debug, Deserialize)]
struct RawSite {
    base_url: String,
    brand: String,
    contact_email: String,
    default_image: Option<String>,
    language: Option<String>,
    locale: Option<String>,
    twitter_handle: Option<String>,
    established_year: Option<u16>,
}

#[derive(Debug, Deserialize)]
struct RawContent {
    file: String, // Convert to PathBuf
}

impl Default for RawContent {
    fn default() -> Self {
        Self {
            file: "content.toml".to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawFeed {
    enabled: bool,
}

impl Default for RawFeed {
    fn default() -> Self {
        Self { enabled: true }
    }
}

/// Load `site.toml` and the content file it points to from a site directory
pub fn load_site<P: AsRef<Path>>(dir: P) -> Result<Site> {
    let dir = dir.as_ref();
    let config = parse_site_toml(dir.join(SITE_TOML))?;
    let records = parse_content_toml(dir.join(&config.content))?;
    let store = ContentStore::new(records)?;

    tracing::debug!(
        site = %dir.display(),
        records = store.len(),
        "site loaded"
    );

    Ok(Site { config, store })
}

/// Parse site.toml from a file path
pub fn parse_site_toml<P: AsRef<Path>>(path: P) -> Result<SiteConfig> {
    let content = fs::read_to_string(path)?;
    parse_site_toml_str(&content)
}

/// Parse site.toml from a string (useful for testing)
pub fn parse_site_toml_str(content: &str) -> Result<SiteConfig> {
    let raw: RawConfig = toml::from_str(content)?;

    let base_url = validate_base_url(&raw.site.base_url)?;

    if raw.site.brand.trim().is_empty() {
        return Err(Error::ConfigParse("site.brand must not be empty".to_string()));
    }

    if !is_valid_email(&raw.site.contact_email) {
        return Err(Error::ConfigParse(format!(
            "Invalid site.contact_email: '{}'",
            raw.site.contact_email
        )));
    }

    let default_image = raw
        .site
        .default_image
        .unwrap_or_else(|| "/assets/logos/logo.png".to_string());

    let content = validate_path(&raw.content.file, "content.file")?;

    Ok(SiteConfig {
        base_url,
        brand: raw.site.brand,
        contact_email: raw.site.contact_email,
        default_image,
        language: raw.site.language.unwrap_or_else(|| "en-US".to_string()),
        locale: raw.site.locale.unwrap_or_else(|| "en_US".to_string()),
        twitter_handle: raw.site.twitter_handle,
        established_year: raw.site.established_year,
        social: raw.social,
        content,
        feed: FeedConfig {
            enabled: raw.feed.enabled,
        },
    })
}

/// Require an http(s) base URL and strip trailing slashes so paths can be
/// appended with a single `/`.
fn validate_base_url(url: &str) -> Result<String> {
    let trimmed = url.trim().trim_end_matches('/');
    let host = trimmed
        .strip_prefix("https://")
        .or_else(|| trimmed.strip_prefix("http://"));

    match host {
        Some(host) if !host.is_empty() && !host.contains(char::is_whitespace) => {
            Ok(trimmed.to_string())
        }
        _ => Err(Error::ConfigParse(format!(
            "site.base_url must be an absolute http(s) URL, got '{}'",
            url
        ))),
    }
}

/// Validate email format
/// Checks for basic RFC 5322 compliance without full regex
pub fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };

    if domain.contains('@') || local.is_empty() || local.len() > 64 {
        return false;
    }

    if domain.is_empty() || domain.len() > 255 || !domain.contains('.') {
        return false;
    }

    // Domain can't start/end with dot or hyphen
    if domain.starts_with('.')
        || domain.ends_with('.')
        || domain.starts_with('-')
        || domain.ends_with('-')
        || domain.contains("..")
    {
        return false;
    }

    domain
        .rsplit('.')
        .next()
        .is_some_and(|tld| tld.len() >= 2)
}

/// Validate and convert a path string to PathBuf.
///
/// Rejects absolute paths and parent directory references (`..`) so a
/// site.toml cannot point outside the site directory.
///
/// ```text
/// validate_path("content.toml", "content.file")  → Ok(PathBuf)
/// validate_path("/etc/passwd", "content.file")  → Err("Absolute paths not allowed...")
/// validate_path("../secret.toml", "content.file")  → Err("Parent directory references...")
/// ```
pub(crate) fn validate_path(path_str: &str, field_name: &str) -> Result<PathBuf> {
    if path_str.trim().is_empty() {
        return Err(Error::ConfigParse(format!(
            "Empty path in '{}' field",
            field_name
        )));
    }

    let path = Path::new(path_str);

    if path.is_absolute() || path_str.starts_with('/') {
        return Err(Error::ConfigParse(format!(
            "Absolute paths not allowed in '{}': '{}'. Use relative paths only.",
            field_name, path_str
        )));
    }

    for component in path.components() {
        if component == std::path::Component::ParentDir {
            return Err(Error::ConfigParse(format!(
                "Parent directory references (..) not allowed in '{}': '{}'",
                field_name, path_str
            )));
        }
    }

    Ok(path.to_path_buf())
}
