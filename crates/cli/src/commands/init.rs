use anyhow::{Context, Result};
use outseek_site_core::config::{SITE_TOML, is_valid_email, parse_site_toml_str};
use std::fs;
use std::path::{Path, PathBuf};

const CONTENT_TEMPLATE: &str = include_str!("../../templates/content.toml");

const DEFAULT_IMAGE: &str = "assets/logos/logo.png";

/// Brand purple used for the placeholder share image
const BRAND_COLOR: [u8; 3] = [0x4f, 0x3f, 0x7c];

const STYLESHEET: &str = r#"body { margin: 0; font-family: system-ui, sans-serif; color: #1f2937; }
.site-header, .site-footer { display: flex; justify-content: space-between; padding: 1rem 2rem; }
.site-header nav ul, .footer-links { display: flex; gap: 1rem; list-style: none; }
.nav-link.active { font-weight: 600; }
main { max-width: 72rem; margin: 0 auto; padding: 2rem; }
.grid { display: grid; grid-template-columns: repeat(auto-fill, minmax(18rem, 1fr)); gap: 1.5rem; }
.card-hero, .post-hero { min-height: 10rem; border-radius: 0.75rem; background: #4f3f7c; }
.faq-item { border-bottom: 1px solid #e5e7eb; padding: 1rem 0; }
"#;

/// Escape a string for safe inclusion in TOML per TOML v1.0.0 spec
///
/// Handles the required escape sequences for TOML basic strings:
/// - Backslash (\\) -> \\\\
/// - Quote (\") -> \\\"
/// - Backspace (\b) -> \\b
/// - Form feed (\f) -> \\f
/// - Newline (\n) -> \\n
/// - Carriage return (\r) -> \\r
/// - Tab (\t) -> \\t
///
/// The template keeps its comments, which toml serialization would drop.
///
/// See: https://toml.io/en/v1.0.0#string
fn toml_escape_string(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\x08', "\\b")
        .replace('\x0C', "\\f")
        .replace('\n', "\\n")
        .replace('\r', "\\r")
        .replace('\t', "\\t")
}

/// Initialize a new site directory.
///
/// Creates:
/// - `site.toml` with brand, base URL and contact email
/// - `content.toml` seeded with blog posts, services and FAQ entries
/// - `public/` with a stylesheet and a 1200x630 placeholder share image
///
/// # Errors
///
/// Returns an error if:
/// - The directory doesn't exist
/// - site.toml or content.toml already exists in the directory
/// - The email or base URL is invalid
/// - File operations fail
pub async fn run(
    path: PathBuf,
    brand: Option<String>,
    base_url: Option<String>,
    email: Option<String>,
) -> Result<()> {
    println!("Initializing site directory: {}", path.display());

    if !path.exists() {
        anyhow::bail!(
            "Directory '{}' does not exist. Create it first: mkdir {}",
            path.display(),
            path.display()
        );
    }

    for name in [SITE_TOML, "content.toml"] {
        let existing = path.join(name);
        if existing.exists() {
            anyhow::bail!(
                "{} already exists at {}\nHint: Delete it first or use a different directory",
                name,
                existing.display()
            );
        }
    }

    generate_site_toml(&path, brand.as_deref(), base_url.as_deref(), email.as_deref())?;
    println!("✓ Created {}", SITE_TOML);

    fs::write(path.join("content.toml"), CONTENT_TEMPLATE).context("Failed to write content.toml")?;
    println!("✓ Created content.toml");

    create_public_dir(&path)?;
    println!("✓ Created public/");

    println!("\n✓ Initialization complete!");
    println!("\nGenerated structure:");
    println!("  {}/", path.display());
    println!("  ├── site.toml            ← Brand, base URL, contact email");
    println!("  ├── content.toml         ← Blog posts, services, FAQ");
    println!("  └── public/");
    println!("      ├── styles.css");
    println!("      └── {}", DEFAULT_IMAGE);

    println!("\nNext steps:");
    println!("  1. Edit site.toml (set brand, base URL, social profiles)");
    println!("  2. Edit content.toml");
    println!("  3. Preview: outseek-site preview {}", path.display());

    Ok(())
}

fn generate_site_toml(
    base: &Path,
    brand: Option<&str>,
    base_url: Option<&str>,
    email: Option<&str>,
) -> Result<()> {
    if let Some(e) = email
        && !is_valid_email(e)
    {
        anyhow::bail!("Invalid email format: '{}'", e);
    }

    let brand_name = toml_escape_string(brand.unwrap_or("Outseek"));
    let site_url = toml_escape_string(base_url.unwrap_or("https://outseek.net"));
    let contact_email = toml_escape_string(email.unwrap_or("info@outseek.net"));

    let brand_comment = if brand.is_some() { "" } else { "  # TODO: Set brand name" };
    let url_comment = if base_url.is_some() { "" } else { "  # TODO: Set public URL" };
    let email_comment = if email.is_some() { "" } else { "  # TODO: Set contact email" };

    let toml = format!(
        "# Generated by outseek-site init\n\
# Edit this file to customize your site\n\
\n\
[site]\n\
brand = \"{brand_name}\"{brand_comment}\n\
base_url = \"{site_url}\"{url_comment}\n\
contact_email = \"{contact_email}\"{email_comment}\n\
default_image = \"/{DEFAULT_IMAGE}\"\n\
language = \"en-US\"\n\
locale = \"en_US\"\n\
# twitter_handle = \"@outseek\"\n\
# established_year = 2020\n\
\n\
[social]\n\
# twitter = \"https://twitter.com/outseek\"\n\
# facebook = \"https://facebook.com/outseek\"\n\
# linkedin = \"https://linkedin.com/company/outseek\"\n\
# instagram = \"https://instagram.com/outseek\"\n\
\n\
[content]\n\
file = \"content.toml\"\n\
\n\
[feed]\n\
enabled = true\n"
    );

    // Catch escaping bugs and bad URLs before writing anything
    parse_site_toml_str(&toml).context("Generated site.toml is invalid")?;

    fs::write(base.join(SITE_TOML), toml).context("Failed to write site.toml")?;

    Ok(())
}

fn create_public_dir(base: &Path) -> Result<()> {
    let public = base.join("public");
    let image_path = public.join(DEFAULT_IMAGE);
    if let Some(parent) = image_path.parent() {
        fs::create_dir_all(parent).context("Failed to create public directory")?;
    }

    fs::write(public.join("styles.css"), STYLESHEET).context("Failed to write styles.css")?;

    image::RgbImage::from_pixel(1200, 630, image::Rgb(BRAND_COLOR))
        .save(&image_path)
        .with_context(|| format!("Failed to write {}", image_path.display()))?;

    Ok(())
}
