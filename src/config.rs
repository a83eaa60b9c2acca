use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub site: SiteConfig,
    pub storage: StorageConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    pub base_url: String,
    /// Path segment between the site root and the normalized manga name.
    pub manga_path: String,
    pub user_agent: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Cache root; one subdirectory per normalized name.
    pub data_root: String,
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            site: SiteConfig {
                base_url: "https://unionleitor.top".to_string(),
                manga_path: "pagina-manga".to_string(),
                user_agent: None,
            },
            storage: StorageConfig {
                data_root: "./data".to_string(),
            },
        }
    }
}

impl SiteConfig {
    /// Canonical home page URL for a normalized name.
    pub fn manga_url(&self, slug: &str) -> String {
        format!("{}/{}/{}", self.base_url, self.manga_path, slug)
    }
}
