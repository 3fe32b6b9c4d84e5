use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use shelf_authors::ContentConfig;

/// Top-level configuration for the `shelf` binary: one section per remote
/// service.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ShelfConfig {
    pub remote: RemoteConfig,
    pub content: ContentConfig,
}

/// Connection settings for the hosted document store.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RemoteConfig {
    /// Project identifier on the hosting service.
    pub project_id: String,
    /// Application identifier within the project.
    pub app_id: String,
}

impl ShelfConfig {
    /// Load configuration from a toml file.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        toml::from_str(&raw).with_context(|| format!("parsing config file {}", path.display()))
    }
}
