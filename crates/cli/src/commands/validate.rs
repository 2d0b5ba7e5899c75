use anyhow::Result;
use chrono::Local;
use outseek_site_validator::{ValidationReport, validate_dir};
use std::path::PathBuf;

pub async fn run(path: PathBuf) -> Result<()> {
    println!("Validating site at: {}", path.display());

    let (site, report) = validate_dir(&path, Local::now().date_naive())?;

    println!("✓ site.toml valid");
    println!("  Site: {} ({})", site.config.brand, site.config.base_url);
    println!("  Records: {}", site.store.len());

    print_report(&report);

    if !report.is_ok() {
        anyhow::bail!("Validation failed with {} error(s)", report.errors.len());
    }

    println!("\n✅ Site is valid");
    Ok(())
}

pub fn print_report(report: &ValidationReport) {
    for line in &report.info {
        println!("  ℹ {}", line);
    }
    for line in &report.warnings {
        println!("  ⚠ {}", line);
    }
    for line in &report.errors {
        println!("  ✗ {}", line);
    }
}
