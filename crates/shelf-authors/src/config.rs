use serde::{Deserialize, Serialize};

/// Connection settings for the hosted content API.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentConfig {
    /// Project identifier on the hosted service.
    pub project_id: String,
    /// Dataset name within the project.
    pub dataset: String,
    /// API version pin.
    pub api_version: String,
    /// Serve reads from the CDN. Off by default so reads see the latest
    /// content.
    pub use_cdn: bool,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            project_id: String::new(),
            dataset: "production".to_string(),
            api_version: "v2022-03-07".to_string(),
            use_cdn: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let c = ContentConfig::default();
        assert_eq!(c.dataset, "production");
        assert_eq!(c.api_version, "v2022-03-07");
        assert!(!c.use_cdn);
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let c: ContentConfig = serde_json::from_value(serde_json::json!({
            "project_id": "nk7ubj",
        }))
        .unwrap();
        assert_eq!(c.project_id, "nk7ubj");
        assert_eq!(c.dataset, "production");
    }
}
