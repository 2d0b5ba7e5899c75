use outseek_site_core::SiteConfig;

/// Paths crawlers should skip
pub const DISALLOWED_PATHS: &[&str] = &[
    "/login", "/signup", "/api/", "/admin/", "/_next/", "/404", "/500",
];

const USER_AGENTS: &[&str] = &["*", "Googlebot", "Bingbot"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RobotsRule {
    pub user_agent: String,
    pub allow: Vec<String>,
    pub disallow: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RobotsPolicy {
    pub rules: Vec<RobotsRule>,
    pub sitemap: String,
}

impl RobotsPolicy {
    pub fn for_site(site: &SiteConfig) -> Self {
        let rules = USER_AGENTS
            .iter()
            .map(|agent| RobotsRule {
                user_agent: agent.to_string(),
                allow: vec!["/".to_string()],
                disallow: DISALLOWED_PATHS.iter().map(|p| p.to_string()).collect(),
            })
            .collect();

        Self {
            rules,
            sitemap: format!("{}/sitemap.xml", site.base_url),
        }
    }

    /// robots.txt body
    pub fn render(&self) -> String {
        let mut out = String::new();
        for rule in &self.rules {
            out.push_str(&format!("User-agent: {}\n", rule.user_agent));
            for path in &rule.allow {
                out.push_str(&format!("Allow: {}\n", path));
            }
            for path in &rule.disallow {
                out.push_str(&format!("Disallow: {}\n", path));
            }
            out.push('\n');
        }
        out.push_str(&format!("Sitemap: {}\n", self.sitemap));
        out
    }
}
