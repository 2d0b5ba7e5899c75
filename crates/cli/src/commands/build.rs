use anyhow::{Context, Result};
use chrono::{Local, Utc};
use outseek_site_core::load_site;
use outseek_site_generator::{GeneratedSite, generate_site};
use outseek_site_validator::{PUBLIC_DIR, validate_site};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use super::validate::print_report;

/// Build static site for deployment
pub async fn run(path: PathBuf, output: PathBuf) -> Result<()> {
    println!("🔨 Building static site...");
    println!("   Source: {}", path.display());
    println!("   Output: {}", output.display());
    println!();

    if !path.exists() {
        anyhow::bail!("Site directory does not exist: {}", path.display());
    }

    let site = load_site(&path).context("Failed to load site")?;

    println!("✓ Loaded: {}", site.config.brand);
    println!("  Base URL: {}", site.config.base_url);
    println!("  Records: {}", site.store.len());
    println!();

    println!("🔍 Checking content...");
    let report = validate_site(&path, &site, Local::now().date_naive());
    print_report(&report);
    if !report.is_ok() {
        eprintln!("   ⚠ Warning: building with {} validation error(s)", report.errors.len());
    }
    println!();

    println!("📄 Rendering pages...");
    let generated = generate_site(&site, Utc::now()).context("Failed to render site")?;
    fs::create_dir_all(&output).context("Failed to create output directory")?;
    let written = write_site(&generated, &output)?;
    println!("   ✓ Wrote {} pages", generated.pages.len());
    for (name, _) in &generated.files {
        println!("   ✓ Generated {}", name);
    }

    println!("🎨 Copying static assets...");
    let copied = copy_dir(&path.join(PUBLIC_DIR), &output)?;
    println!("   ✓ Copied {} files from {}/", copied, PUBLIC_DIR);

    tracing::info!(files = written + copied, output = %output.display(), "build finished");

    println!();
    println!("✅ Build complete!");
    println!("   Output: {}", output.display());
    println!();
    println!("To test locally:");
    println!("   cd {} && python3 -m http.server 8000", output.display());
    println!();

    Ok(())
}

/// `/` -> `index.html`, `/blog/post` -> `blog/post/index.html`
fn page_output_path(output: &Path, route: &str) -> PathBuf {
    let mut path = output.to_path_buf();
    for segment in route.split('/').filter(|s| !s.is_empty()) {
        path.push(segment);
    }
    path.join("index.html")
}

/// Write every page and generated file; returns the number of files written.
fn write_site(generated: &GeneratedSite, output: &Path) -> Result<usize> {
    let mut written = 0;

    for (route, html) in &generated.pages {
        let target = page_output_path(output, route);
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        fs::write(&target, html).with_context(|| format!("Failed to write {}", target.display()))?;
        written += 1;
    }

    fs::write(output.join("404.html"), &generated.not_found).context("Failed to write 404.html")?;
    written += 1;

    for (name, contents) in &generated.files {
        fs::write(output.join(name), contents).with_context(|| format!("Failed to write {}", name))?;
        written += 1;
    }

    Ok(written)
}

/// Recursively copy `src` into `dst`. A missing `src` copies nothing.
fn copy_dir(src: &Path, dst: &Path) -> Result<usize> {
    if !src.exists() {
        return Ok(0);
    }

    let mut copied = 0;
    for entry in WalkDir::new(src) {
        let entry = entry.with_context(|| format!("Failed to read {}", src.display()))?;
        let rel = entry
            .path()
            .strip_prefix(src)
            .context("Walked outside the source directory")?;
        let target = dst.join(rel);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)
                .with_context(|| format!("Failed to create {}", target.display()))?;
        } else if entry.file_type().is_file() {
            fs::copy(entry.path(), &target)
                .with_context(|| format!("Failed to copy {}", entry.path().display()))?;
            copied += 1;
        }
    }

    Ok(copied)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::init;
    use tempfile::TempDir;

    #[test]
    fn test_page_output_path() {
        let out = Path::new("out");
        assert_eq!(page_output_path(out, "/"), Path::new("out/index.html"));
        assert_eq!(page_output_path(out, "/blog"), Path::new("out/blog/index.html"));
        assert_eq!(
            page_output_path(out, "/services/devops"),
            Path::new("out/services/devops/index.html")
        );
    }

    #[test]
    fn test_copy_dir() {
        let src = TempDir::new().unwrap();
        let dst = TempDir::new().unwrap();
        fs::create_dir_all(src.path().join("assets/logos")).unwrap();
        fs::write(src.path().join("assets/logos/logo.png"), b"png").unwrap();
        fs::write(src.path().join("styles.css"), b"body {}").unwrap();

        let copied = copy_dir(src.path(), dst.path()).unwrap();
        assert_eq!(copied, 2);
        assert!(dst.path().join("assets/logos/logo.png").exists());
        assert!(dst.path().join("styles.css").exists());
    }

    #[test]
    fn test_copy_dir_missing_source() {
        let dst = TempDir::new().unwrap();
        assert_eq!(copy_dir(&dst.path().join("nope"), dst.path()).unwrap(), 0);
    }

    #[tokio::test]
    async fn test_build_initialized_site() {
        let site = TempDir::new().unwrap();
        let out = TempDir::new().unwrap();
        init::run(site.path().to_path_buf(), None, None, None).await.unwrap();

        run(site.path().to_path_buf(), out.path().to_path_buf()).await.unwrap();

        let out = out.path();
        assert!(out.join("index.html").exists());
        assert!(out.join("404.html").exists());
        assert!(out.join("blog/cloud-migration-best-practices/index.html").exists());
        assert!(out.join("services/devops/index.html").exists());
        assert!(out.join("faq/index.html").exists());
        assert!(out.join("feed.xml").exists());
        assert!(out.join("robots.txt").exists());
        assert!(out.join("sitemap.xml").exists());
        assert!(out.join("assets/logos/logo.png").exists());

        let feed = fs::read_to_string(out.join("feed.xml")).unwrap();
        assert_eq!(feed.matches("<item>").count(), 6);
    }
}
