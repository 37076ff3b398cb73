use tracing::Level;

/// Identity token the host matches notes against.
pub const COMPONENT_UUID: &str = "org.standardnotes.eule-recipe";
pub const EDITOR_AREA: &str = "editor-editor";
pub const CONTENT_MODE: &str = "json";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EditorConfig {
    pub log_level: Level,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            log_level: Level::INFO,
        }
    }
}

impl EditorConfig {
    /// Reads `log=<level>` from a `?a=b&c=d` query string.
    pub fn from_query(search: &str) -> Self {
        let mut config = Self::default();
        let pairs = search.trim_start_matches('?').split('&');
        for (key, value) in pairs.filter_map(|pair| pair.split_once('=')) {
            if key == "log" {
                config.log_level = value.parse().unwrap_or(Level::INFO);
            }
        }
        config
    }
}
