use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Complete site: validated configuration plus its content store
#[derive(Debug, Clone)]
pub struct Site {
    pub config: SiteConfig,
    pub store: crate::store::ContentStore,
}

/// Site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Absolute base URL without trailing slash, e.g. "https://outseek.net"
    pub base_url: String,
    pub brand: String,
    pub contact_email: String,
    /// Site-relative fallback image for social previews
    pub default_image: String,
    pub language: String,
    pub locale: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub twitter_handle: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub established_year: Option<u16>,
    #[serde(default)]
    pub social: SocialProfiles,
    pub content: PathBuf,
    pub feed: FeedConfig,
}

/// Social profile links emitted as `sameAs` on the organization graph
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SocialProfiles {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub twitter: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub facebook: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instagram: Option<String>,
}

impl SocialProfiles {
    pub fn urls(&self) -> Vec<String> {
        [&self.twitter, &self.facebook, &self.linkedin, &self.instagram]
            .into_iter()
            .flatten()
            .cloned()
            .collect()
    }
}

/// RSS feed configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedConfig {
    pub enabled: bool,
}

/// Which section of the site a record belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    Blog,
    Service,
    Faq,
}

impl ContentKind {
    /// URL path segment for this kind
    pub fn section(&self) -> &'static str {
        match self {
            ContentKind::Blog => "blog",
            ContentKind::Service => "services",
            ContentKind::Faq => "faq",
        }
    }
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ContentKind::Blog => "blog",
            ContentKind::Service => "service",
            ContentKind::Faq => "FAQ",
        };
        f.write_str(name)
    }
}

/// Content category. Labels outside the known set are kept in `Other`
/// and get the default theme.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Category {
    AiMl,
    Cloud,
    Nlp,
    Security,
    DevOps,
    Mobile,
    Data,
    Web,
    Software,
    Consulting,
    Other(String),
}

/// Visual theme selected by category
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub gradient: &'static str,
    pub icon: &'static str,
}

pub const DEFAULT_THEME: Theme = Theme {
    gradient: "bg-gradient-to-br from-gray-500 via-gray-600 to-slate-700",
    icon: "sparkles",
};

impl Category {
    pub fn label(&self) -> &str {
        match self {
            Category::AiMl => "AI/ML",
            Category::Cloud => "Cloud",
            Category::Nlp => "NLP",
            Category::Security => "Security",
            Category::DevOps => "DevOps",
            Category::Mobile => "Mobile",
            Category::Data => "Data",
            Category::Web => "Web",
            Category::Software => "Software",
            Category::Consulting => "Consulting",
            Category::Other(label) => label,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Category::Other(_))
    }

    pub fn theme(&self) -> Theme {
        match self {
            Category::AiMl => Theme {
                gradient: "bg-gradient-to-br from-purple-500 via-purple-600 to-indigo-700",
                icon: "ai-machine-learning",
            },
            Category::Cloud => Theme {
                gradient: "bg-gradient-to-br from-blue-500 via-blue-600 to-cyan-700",
                icon: "cloud",
            },
            Category::Nlp => Theme {
                gradient: "bg-gradient-to-br from-green-500 via-green-600 to-emerald-700",
                icon: "message",
            },
            Category::Security => Theme {
                gradient: "bg-gradient-to-br from-red-500 via-red-600 to-rose-700",
                icon: "shield",
            },
            Category::DevOps => Theme {
                gradient: "bg-gradient-to-br from-orange-500 via-orange-600 to-amber-700",
                icon: "wrench",
            },
            Category::Mobile => Theme {
                gradient: "bg-gradient-to-br from-pink-500 via-pink-600 to-purple-700",
                icon: "mobile-development",
            },
            Category::Data => Theme {
                gradient: "bg-gradient-to-br from-teal-500 via-teal-600 to-cyan-700",
                icon: "data-analytics",
            },
            Category::Web => Theme {
                gradient: "bg-gradient-to-br from-sky-500 via-sky-600 to-blue-700",
                icon: "web-development",
            },
            Category::Software => Theme {
                gradient: "bg-gradient-to-br from-indigo-500 via-indigo-600 to-violet-700",
                icon: "software-development",
            },
            Category::Consulting => Theme {
                gradient: "bg-gradient-to-br from-yellow-500 via-amber-600 to-orange-700",
                icon: "it-consulting",
            },
            Category::Other(_) => DEFAULT_THEME,
        }
    }
}

impl From<String> for Category {
    fn from(label: String) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "ai/ml" | "ai-ml" | "ai" => Category::AiMl,
            "cloud" => Category::Cloud,
            "nlp" => Category::Nlp,
            "security" => Category::Security,
            "devops" => Category::DevOps,
            "mobile" => Category::Mobile,
            "data" => Category::Data,
            "web" => Category::Web,
            "software" => Category::Software,
            "consulting" => Category::Consulting,
            _ => Category::Other(label.trim().to_string()),
        }
    }
}

impl From<Category> for String {
    fn from(category: Category) -> Self {
        category.label().to_string()
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Record author
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Author {
    pub name: String,
    pub role: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

/// How a record body is authored
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BodyFormat {
    #[default]
    Html,
    Markdown,
}

/// Blog post, service or FAQ entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentRecord {
    pub id: String,
    pub kind: ContentKind,
    pub slug: String,
    pub title: String,
    pub excerpt: String,
    /// Trusted, author-written markup
    pub body: String,
    pub body_format: BodyFormat,
    pub category: Category,
    pub published_at: NaiveDate,
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<Author>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_alt: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub read_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service: Option<ServiceDetail>,
}

impl ContentRecord {
    /// Site-relative path of the record's page
    pub fn path(&self) -> String {
        format!("/{}/{}", self.kind.section(), self.slug)
    }
}

/// Service tier used to group the services index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceTier {
    Modern,
    Standard,
}

/// Long-form service page content
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceDetail {
    pub tier: ServiceTier,
    pub overview: String,
    pub benefits: Vec<String>,
    pub subservices: Vec<SubService>,
    pub approach: String,
    pub industries: Vec<String>,
    pub team: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SubService {
    pub title: String,
    pub description: String,
}

/// Icon name for a service page, falling back to a generic icon
pub fn service_icon(slug: &str) -> &'static str {
    match slug {
        "ai-machine-learning" => "brain",
        "cloud-computing" => "cloud",
        "natural-language-processing" => "file-text",
        "software-development" => "laptop",
        "web-development" => "globe",
        "mobile-development" => "smartphone",
        "devops" => "settings",
        "cybersecurity" => "lock",
        "data-analytics" => "bar-chart-3",
        "it-consulting" => "target",
        "ai-automation" => "zap",
        _ => "sparkles",
    }
}

/// Turn a title into a URL-safe slug
pub fn slugify(s: &str) -> String {
    s.to_lowercase()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c
            } else {
                '-'
            }
        })
        .collect::<String>()
        .split('-')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}

/// A slug is lowercase ASCII alphanumerics separated by single hyphens
pub fn is_valid_slug(slug: &str) -> bool {
    !slug.is_empty() && slugify(slug) == slug
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_from_known_labels() {
        assert_eq!(Category::from("AI/ML".to_string()), Category::AiMl);
        assert_eq!(Category::from("cloud".to_string()), Category::Cloud);
        assert_eq!(Category::from(" DevOps ".to_string()), Category::DevOps);
        assert_eq!(Category::AiMl.label(), "AI/ML");
    }

    #[test]
    fn test_unknown_category_gets_default_theme() {
        let category = Category::from("Quantum".to_string());
        assert_eq!(category, Category::Other("Quantum".to_string()));
        assert_eq!(category.label(), "Quantum");
        assert_eq!(category.theme(), DEFAULT_THEME);
        assert!(!category.is_known());
    }

    #[test]
    fn test_known_categories_have_distinct_themes() {
        let categories = [
            Category::AiMl,
            Category::Cloud,
            Category::Nlp,
            Category::Security,
            Category::DevOps,
            Category::Mobile,
            Category::Data,
            Category::Web,
            Category::Software,
            Category::Consulting,
        ];
        for category in &categories {
            assert_ne!(category.theme(), DEFAULT_THEME, "{}", category);
        }
        assert_eq!(Category::Nlp.theme().icon, "message");
    }

    #[test]
    fn test_service_icon_fallback() {
        assert_eq!(service_icon("devops"), "settings");
        assert_eq!(service_icon("quantum-computing"), "sparkles");
    }

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("The Future of AI in Business"), "the-future-of-ai-in-business");
        assert_eq!(slugify("  Cloud -- Migration!  "), "cloud-migration");
        assert_eq!(slugify("Café 2024"), "caf-2024");
    }

    #[test]
    fn test_is_valid_slug() {
        assert!(is_valid_slug("cloud-migration-best-practices"));
        assert!(is_valid_slug("devops"));
        assert!(!is_valid_slug(""));
        assert!(!is_valid_slug("Cloud"));
        assert!(!is_valid_slug("a--b"));
        assert!(!is_valid_slug("-leading"));
        assert!(!is_valid_slug("has space"));
    }

    #[test]
    fn test_record_path() {
        assert_eq!(ContentKind::Service.section(), "services");
        assert_eq!(ContentKind::Blog.to_string(), "blog");
    }
}
