pub mod config;
pub mod content;
pub mod error;
pub mod store;
pub mod types;

pub use config::{load_site, parse_site_toml};
pub use content::parse_content_toml;
pub use error::{Error, Result};
pub use store::{ContentStore, FaqGroup};
pub use types::*;
