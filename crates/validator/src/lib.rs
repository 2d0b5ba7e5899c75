// Content and asset checks run before a build

use anyhow::{Context, Result};
use chrono::NaiveDate;
use outseek_site_core::{ContentKind, ContentRecord, Site, load_site};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Directory under the site root holding static assets
pub const PUBLIC_DIR: &str = "public";

/// Recommended minimum size for social share images
pub const MIN_IMAGE_WIDTH: u32 = 1200;
pub const MIN_IMAGE_HEIGHT: u32 = 630;

/// Search engines truncate beyond these
pub const MAX_TITLE_CHARS: usize = 60;
pub const MAX_DESCRIPTION_CHARS: usize = 160;

#[derive(Debug, Default)]
pub struct ValidationReport {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    pub info: Vec<String>,
}

impl ValidationReport {
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Load the site at `root` and validate it.
pub fn validate_dir(root: &Path, today: NaiveDate) -> Result<(Site, ValidationReport)> {
    let site = load_site(root).with_context(|| format!("Failed to load site from {}", root.display()))?;
    let report = validate_site(root, &site, today);
    Ok((site, report))
}

/// Check content and assets of an already loaded site. Nothing here is
/// fatal to rendering; errors mark things that will show up broken.
pub fn validate_site(root: &Path, site: &Site, today: NaiveDate) -> ValidationReport {
    let mut report = ValidationReport::default();
    let public = root.join(PUBLIC_DIR);
    let assets = index_assets(&public);

    let count = |kind| site.store.list_kind(kind).count();
    report.info.push(format!(
        "{} blog posts, {} services, {} FAQ entries",
        count(ContentKind::Blog),
        count(ContentKind::Service),
        count(ContentKind::Faq)
    ));
    report.info.push(format!("{} files in {}/", assets.len(), PUBLIC_DIR));

    check_image(
        &site.config.default_image,
        "default_image in site.toml",
        &public,
        &assets,
        &mut report,
    );

    for record in site.store.list_all() {
        check_record(record, today, &mut report);

        let owner = format!("{} '{}'", record.kind, record.slug);
        if let Some(image) = &record.image {
            check_image(image, &owner, &public, &assets, &mut report);
        }
        if let Some(avatar) = record.author.as_ref().and_then(|a| a.avatar.as_ref()) {
            check_asset(avatar, &owner, &assets, &mut report);
        }
    }

    tracing::debug!(
        errors = report.errors.len(),
        warnings = report.warnings.len(),
        "validation finished"
    );

    report
}

fn check_record(record: &ContentRecord, today: NaiveDate, report: &mut ValidationReport) {
    let owner = format!("{} '{}'", record.kind, record.slug);

    let title_len = record.title.chars().count();
    if title_len > MAX_TITLE_CHARS {
        report.warnings.push(format!(
            "{}: title is {} characters, search results show about {}",
            owner, title_len, MAX_TITLE_CHARS
        ));
    }

    // FAQ answers are not used as page descriptions
    let description_len = record.excerpt.chars().count();
    if record.kind != ContentKind::Faq && description_len > MAX_DESCRIPTION_CHARS {
        report.warnings.push(format!(
            "{}: description is {} characters, search results show about {}",
            owner, description_len, MAX_DESCRIPTION_CHARS
        ));
    }

    if record.kind != ContentKind::Faq && !record.category.is_known() {
        report.warnings.push(format!(
            "{}: unknown category '{}', the default theme will be used",
            owner,
            record.category.label()
        ));
    }

    match record.kind {
        ContentKind::Blog => {
            if record.tags.is_empty() {
                report.warnings.push(format!("{}: no tags", owner));
            }
            if record.published_at > today {
                report.warnings.push(format!(
                    "{}: dated {} which is in the future",
                    owner, record.published_at
                ));
            }
        }
        ContentKind::Service => {
            if record.service.is_none() {
                report.warnings.push(format!(
                    "{}: no [service.detail], listed on /services but has no page of its own",
                    owner
                ));
            }
        }
        ContentKind::Faq => {}
    }
}

/// Site-relative asset path to a key in the asset index, or None for
/// remote URLs
fn local_key(url: &str) -> Option<String> {
    if url.starts_with("http://") || url.starts_with("https://") {
        return None;
    }
    let path = url.split(['?', '#']).next().unwrap_or(url);
    Some(path.trim_start_matches('/').to_string())
}

fn check_asset(url: &str, owner: &str, assets: &HashSet<String>, report: &mut ValidationReport) -> bool {
    match local_key(url) {
        Some(key) if assets.contains(&key) => true,
        Some(_) => {
            report.errors.push(format!(
                "{}: {} not found in {}/",
                owner, url, PUBLIC_DIR
            ));
            false
        }
        None => {
            report.info.push(format!("{}: remote asset {} not checked", owner, url));
            false
        }
    }
}

fn check_image(
    url: &str,
    owner: &str,
    public: &Path,
    assets: &HashSet<String>,
    report: &mut ValidationReport,
) {
    if !check_asset(url, owner, assets, report) {
        return;
    }
    let Some(key) = local_key(url) else {
        return;
    };

    let path: PathBuf = public.join(key);
    match image::image_dimensions(&path) {
        Ok((width, height)) if width < MIN_IMAGE_WIDTH || height < MIN_IMAGE_HEIGHT => {
            report.warnings.push(format!(
                "{}: {} is {}x{}, share previews expect at least {}x{}",
                owner, url, width, height, MIN_IMAGE_WIDTH, MIN_IMAGE_HEIGHT
            ));
        }
        Ok(_) => {}
        Err(e) => {
            report
                .warnings
                .push(format!("{}: could not read image {}: {}", owner, url, e));
        }
    }
}

/// Relative paths (with `/` separators) of every file under `public/`
fn index_assets(public: &Path) -> HashSet<String> {
    WalkDir::new(public)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .filter_map(|entry| {
            entry.path().strip_prefix(public).ok().map(|rel| {
                rel.components()
                    .map(|c| c.as_os_str().to_string_lossy())
                    .collect::<Vec<_>>()
                    .join("/")
            })
        })
        .collect()
}
