use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub site: SiteConfig,
    pub dirs: DirsConfig,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// URL prefix substituted into absolute `href`/`src` links.
    pub basepath: String,
    /// Page template file name, relative to the site root.
    pub template: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            basepath: "/".to_string(),
            template: "template.html".to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct DirsConfig {
    pub content: String,
    #[serde(rename = "static")]
    pub static_dir: String,
    pub output: String,
}

impl Default for DirsConfig {
    fn default() -> Self {
        Self {
            content: "content".to_string(),
            static_dir: "static".to_string(),
            output: "public".to_string(),
        }
    }
}

impl Config {
    /// Load config from a TOML file, or return defaults if not found.
    pub fn load(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).unwrap_or_default(),
            Err(_) => Self::default(),
        }
    }
}
