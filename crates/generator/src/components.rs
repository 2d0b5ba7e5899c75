//! Leptos SSR components for page bodies.
//!
//! Markup is intentionally plain: class names carry the theme, styling lives
//! in the site's own stylesheet under `public/`.

use crate::markup::render_body;
use leptos::prelude::*;
use outseek_site_core::{ContentRecord, ServiceTier, service_icon};

/// A navigation link: (label, href)
pub type NavLink = (&'static str, &'static str);

pub const NAV_LINKS: &[NavLink] = &[
    ("Home", "/"),
    ("Services", "/services"),
    ("Blog", "/blog"),
    ("FAQ", "/faq"),
];

#[component]
pub fn SiteHeader(brand: String, current: String) -> impl IntoView {
    view! {
        <header class="site-header">
            <a class="brand" href="/">{brand}</a>
            <nav aria-label="Main">
                <ul>
                    {NAV_LINKS
                        .iter()
                        .map(|(label, href)| {
                            let class = if is_current(&current, href) { "nav-link active" } else { "nav-link" };
                            view! {
                                <li>
                                    <a class=class href=*href>{*label}</a>
                                </li>
                            }
                        })
                        .collect_view()}
                </ul>
            </nav>
        </header>
    }
}

fn is_current(current: &str, href: &str) -> bool {
    if href == "/" {
        current == "/"
    } else {
        current == href || current.starts_with(&format!("{}/", href))
    }
}

#[component]
pub fn SiteFooter(brand: String, email: String) -> impl IntoView {
    let mailto = format!("mailto:{}", email);
    view! {
        <footer class="site-footer">
            <p>{format!("© {}", brand)}</p>
            <p>
                <a href=mailto>{email}</a>
            </p>
            <ul class="footer-links">
                <li><a href="/privacy">"Privacy Policy"</a></li>
                <li><a href="/site-map">"Site Map"</a></li>
                <li><a href="/feed.xml">"RSS Feed"</a></li>
            </ul>
        </footer>
    }
}

#[component]
pub fn PostCard(post: ContentRecord) -> impl IntoView {
    let theme = post.category.theme();
    let href = post.path();
    let date = post.published_at.format("%B %-d, %Y").to_string();
    let read_time = post.read_time.clone();

    view! {
        <article class="post-card">
            <a href=href>
                <div class=format!("card-hero {}", theme.gradient) data-icon=theme.icon></div>
                <span class="category">{post.category.label().to_string()}</span>
                <h3>{post.title}</h3>
                <p class="excerpt">{post.excerpt}</p>
                <p class="meta">
                    <span class="date">{date}</span>
                    {read_time.map(|t| view! { <span class="read-time">{t}</span> })}
                </p>
            </a>
        </article>
    }
}

#[component]
pub fn ServiceCard(service: ContentRecord) -> impl IntoView {
    let href = service.path();
    let icon = service_icon(&service.slug);

    view! {
        <article class="service-card">
            <a href=href>
                <span class="service-icon" data-icon=icon></span>
                <h3>{service.title}</h3>
                <p>{service.excerpt}</p>
            </a>
        </article>
    }
}

#[component]
pub fn HomeView(brand: String, services: Vec<ContentRecord>, posts: Vec<ContentRecord>) -> impl IntoView {
    view! {
        <section class="hero">
            <h1>{brand}</h1>
            <p>"IT and software solutions: AI, cloud, data, and the engineering to ship them."</p>
            <a class="button" href="/services">"Explore our services"</a>
        </section>
        <section class="services-preview">
            <h2>"What we do"</h2>
            <div class="grid">
                {services.into_iter().map(|s| view! { <ServiceCard service=s/> }).collect_view()}
            </div>
        </section>
        <section class="posts-preview">
            <h2>"Latest insights"</h2>
            <div class="grid">
                {posts.into_iter().map(|p| view! { <PostCard post=p/> }).collect_view()}
            </div>
        </section>
    }
}

#[component]
pub fn BlogIndexView(posts: Vec<ContentRecord>) -> impl IntoView {
    view! {
        <section class="page-hero">
            <h1>"Blog & Insights"</h1>
            <p>"Technology trends, insights, and best practices from our team."</p>
        </section>
        <section class="grid">
            {posts.into_iter().map(|p| view! { <PostCard post=p/> }).collect_view()}
        </section>
    }
}

#[component]
pub fn ArticleView(post: ContentRecord, related: Vec<ContentRecord>) -> impl IntoView {
    let theme = post.category.theme();
    let body = render_body(&post);
    let date = post.published_at.format("%B %-d, %Y").to_string();
    let author = post.author.clone();
    let hero = post.image.clone();
    let alt = post.image_alt.clone().unwrap_or_else(|| post.category.label().to_string());
    let has_related = !related.is_empty();

    view! {
        <nav class="back"><a href="/blog">"Back to Blog"</a></nav>
        <article class="post">
            {match hero {
                Some(src) => view! { <img class="post-hero" src=src alt=alt/> }.into_any(),
                None => view! {
                    <div class=format!("post-hero {}", theme.gradient) data-icon=theme.icon></div>
                }.into_any(),
            }}
            <header>
                <span class="category">{post.category.label().to_string()}</span>
                <h1>{post.title}</h1>
                <p class="meta">
                    <span class="date">{date}</span>
                    {post.read_time.map(|t| view! { <span class="read-time">{t}</span> })}
                </p>
                {author.map(|a| view! {
                    <p class="author">
                        <span class="author-name">{a.name}</span>
                        <span class="author-role">{a.role}</span>
                    </p>
                })}
            </header>
            <div class="post-body" inner_html=body></div>
            <ul class="tags">
                {post.tags.into_iter().map(|t| view! { <li>{t}</li> }).collect_view()}
            </ul>
        </article>
        {has_related.then(|| view! {
            <section class="related">
                <h2>"Related articles"</h2>
                <div class="grid">
                    {related.into_iter().map(|p| view! { <PostCard post=p/> }).collect_view()}
                </div>
            </section>
        })}
    }
}

#[component]
pub fn ServicesIndexView(modern: Vec<ContentRecord>, standard: Vec<ContentRecord>) -> impl IntoView {
    view! {
        <section class="page-hero">
            <h1>"Our Services"</h1>
            <p>"From strategy to delivery across AI, cloud, software and security."</p>
        </section>
        <section class="services-modern">
            <h2>"Modern solutions"</h2>
            <div class="grid">
                {modern.into_iter().map(|s| view! { <ServiceCard service=s/> }).collect_view()}
            </div>
        </section>
        <section class="services-standard">
            <h2>"Core services"</h2>
            <div class="grid">
                {standard.into_iter().map(|s| view! { <ServiceCard service=s/> }).collect_view()}
            </div>
        </section>
    }
}

/// Split services by tier; services without a detail page count as standard.
pub fn split_by_tier(services: Vec<ContentRecord>) -> (Vec<ContentRecord>, Vec<ContentRecord>) {
    services
        .into_iter()
        .partition(|s| s.service.as_ref().is_some_and(|d| d.tier == ServiceTier::Modern))
}

#[component]
pub fn ServiceView(service: ContentRecord) -> impl IntoView {
    let icon = service_icon(&service.slug);
    let detail = service.service.clone();

    view! {
        <nav class="back"><a href="/services">"Back to Services"</a></nav>
        <article class="service">
            <header>
                <span class="service-icon" data-icon=icon></span>
                <h1>{service.title}</h1>
                <p class="lead">{service.excerpt}</p>
            </header>
            {detail.map(|d| view! {
                <section class="overview">
                    <h2>"Overview"</h2>
                    <p>{d.overview}</p>
                </section>
                <section class="benefits">
                    <h2>"Benefits"</h2>
                    <ul>
                        {d.benefits.into_iter().map(|b| view! { <li>{b}</li> }).collect_view()}
                    </ul>
                </section>
                <section class="subservices">
                    <h2>"What we offer"</h2>
                    {d.subservices.into_iter().map(|sub| view! {
                        <div class="subservice">
                            <h3>{sub.title}</h3>
                            <p>{sub.description}</p>
                        </div>
                    }).collect_view()}
                </section>
                <section class="approach">
                    <h2>"Our approach"</h2>
                    <p>{d.approach}</p>
                </section>
                <section class="industries">
                    <h2>"Industries"</h2>
                    <ul>
                        {d.industries.into_iter().map(|i| view! { <li>{i}</li> }).collect_view()}
                    </ul>
                </section>
                <section class="team">
                    <h2>"Our team"</h2>
                    <p>{d.team}</p>
                </section>
            })}
        </article>
    }
}

/// Icon for a FAQ group heading
pub fn faq_group_icon(category: &str) -> &'static str {
    match category {
        "Services" => "briefcase",
        "Projects & Process" => "rocket",
        "Business & Support" => "users",
        _ => "sparkles",
    }
}

/// One FAQ category after filtering
#[derive(Debug, Clone)]
pub struct FaqSection {
    pub category: String,
    pub icon: &'static str,
    pub items: Vec<ContentRecord>,
}

#[component]
pub fn FaqView(query: String, sections: Vec<FaqSection>) -> impl IntoView {
    let empty = sections.is_empty();

    view! {
        <section class="page-hero">
            <h1>"Frequently Asked Questions"</h1>
            <p>"Find answers to common questions about our services, processes, and how we work"</p>
        </section>
        <form class="faq-search" method="get" action="/faq">
            <input type="search" name="q" placeholder="Search for questions..." value=query/>
            <button type="submit">"Search"</button>
        </form>
        {if empty {
            view! {
                <div class="faq-empty">
                    <p>"No questions match your search."</p>
                    <a href="/faq">"Clear search"</a>
                </div>
            }.into_any()
        } else {
            sections.into_iter().map(|section| view! {
                <section class="faq-category">
                    <h2 data-icon=section.icon>{section.category}</h2>
                    {section.items.into_iter().map(|item| view! {
                        <details class="faq-item" id=item.slug>
                            <summary>{item.title}</summary>
                            <div class="answer" inner_html=item.body></div>
                        </details>
                    }).collect_view()}
                </section>
            }).collect_view().into_any()
        }}
    }
}

#[component]
pub fn SiteMapView(sections: Vec<(String, Vec<(String, String)>)>) -> impl IntoView {
    view! {
        <section class="page-hero">
            <h1>"Site Map"</h1>
        </section>
        {sections.into_iter().map(|(heading, links)| view! {
            <section class="sitemap-section">
                <h2>{heading}</h2>
                <ul>
                    {links.into_iter().map(|(label, href)| view! {
                        <li><a href=href>{label}</a></li>
                    }).collect_view()}
                </ul>
            </section>
        }).collect_view()}
    }
}

#[component]
pub fn PrivacyView(brand: String, email: String) -> impl IntoView {
    let mailto = format!("mailto:{}", email);
    view! {
        <article class="legal">
            <h1>"Privacy Policy"</h1>
            <p>{format!("{} respects your privacy. This page explains what we collect and why.", brand)}</p>
            <h2>"Information we collect"</h2>
            <p>"Contact details you send us, and anonymous usage statistics that help us improve the site."</p>
            <h2>"How we use it"</h2>
            <p>"To answer your enquiries and to deliver the services you request. We do not sell personal data."</p>
            <h2>"Contact"</h2>
            <p>"Questions about this policy: " <a href=mailto>{email}</a></p>
        </article>
    }
}

#[component]
pub fn NotFoundView() -> impl IntoView {
    view! {
        <section class="not-found">
            <h1>"Page not found"</h1>
            <p>"The page you are looking for does not exist or has moved."</p>
            <a class="button" href="/">"Back to home"</a>
        </section>
    }
}
