use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::warn;

static DEFAULT_CONFIG: &str = include_str!("default_config.toml");

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub page: PageConfig,
    pub layout: LayoutConfig,
    pub html: HtmlConfig,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct PageConfig {
    /// Typst paper name, e.g. "a4" or "us-letter". Typst's default when unset.
    pub paper: Option<String>,
    pub numbers: bool,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub heading_keep_with_next: bool,
    /// Lists with at most this many items are not split across pages.
    pub list_keep_together: usize,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            heading_keep_with_next: true,
            list_keep_together: 5,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct HtmlConfig {
    pub wrapper_class: String,
}

impl Default for HtmlConfig {
    fn default() -> Self {
        Self {
            wrapper_class: "prose max-w-none".to_string(),
        }
    }
}

impl Config {
    /// The bundled default config. Checked for syntax errors by the build script.
    pub fn compiled_default() -> Self {
        toml::from_str(DEFAULT_CONFIG).unwrap_or_default()
    }

    /// Load config from a TOML file, or return the compiled defaults if it is
    /// missing or invalid.
    pub fn load(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(config) => config,
                Err(e) => {
                    warn!("Ignoring invalid config {}: {}", path.display(), e);
                    Self::compiled_default()
                }
            },
            Err(_) => Self::compiled_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compiled_default_matches_bundled_file() {
        let config = Config::compiled_default();
        assert_eq!(config.page.paper.as_deref(), Some("a4"));
        assert!(!config.page.numbers);
        assert!(config.layout.heading_keep_with_next);
        assert_eq!(config.layout.list_keep_together, 5);
        assert_eq!(config.html.wrapper_class, "prose max-w-none");
    }

    #[test]
    fn partial_sections_keep_defaults() {
        let config: Config = toml::from_str("[layout]\nlist_keep_together = 2\n").unwrap();
        assert_eq!(config.layout.list_keep_together, 2);
        assert!(config.layout.heading_keep_with_next);
        assert_eq!(config.html.wrapper_class, "prose max-w-none");
        assert_eq!(config.page.paper, None);
    }

    #[test]
    fn missing_file_falls_back() {
        let config = Config::load(Path::new("/nonexistent/compare-report.toml"));
        assert_eq!(config.page.paper.as_deref(), Some("a4"));
    }
}
