//! Snippet tree persistence as `snippets.json`.

use crate::error::StoreError;
use crate::model::{RootConfig, Snippet, SnippetGroup};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

#[cfg(test)]
mod tests;

pub const SNIPPETS_FILE_NAME: &str = "snippets.json";

/// Source of the snippet tree.
pub trait ConfigProvider {
    /// Loads the tree. Never fails: a missing store is seeded with
    /// [`default_config`], an unreadable one yields an empty tree.
    fn load(&self) -> RootConfig;

    fn save(&self, config: &RootConfig) -> Result<(), StoreError>;
}

/// JSON file store.
#[derive(Debug, Clone)]
pub struct JsonConfigStore {
    path: PathBuf,
}

impl JsonConfigStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at `snippets.json` inside `data_dir`.
    pub fn in_dir(data_dir: &Path) -> Self {
        Self::new(data_dir.join(SNIPPETS_FILE_NAME))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads and parses the file without any fallback. Member names are
    /// matched case-insensitively.
    pub fn read(&self) -> Result<RootConfig, StoreError> {
        let content = std::fs::read_to_string(&self.path)?;
        let mut value: Value = serde_json::from_str(&content).map_err(StoreError::Parse)?;
        lowercase_keys(&mut value);
        serde_json::from_value(value).map_err(StoreError::Parse)
    }
}

fn lowercase_keys(value: &mut Value) {
    match value {
        Value::Object(members) => {
            let lowered: Map<String, Value> = std::mem::take(members)
                .into_iter()
                .map(|(key, mut member)| {
                    lowercase_keys(&mut member);
                    (key.to_lowercase(), member)
                })
                .collect();
            *members = lowered;
        }
        Value::Array(items) => items.iter_mut().for_each(lowercase_keys),
        _ => {}
    }
}

impl ConfigProvider for JsonConfigStore {
    fn load(&self) -> RootConfig {
        if !self.path.exists() {
            let seed = default_config();
            match self.save(&seed) {
                Ok(()) => info!(path = %self.path.display(), "created default snippets"),
                Err(err) => warn!(path = %self.path.display(), error = %err, "could not write default snippets"),
            }
            return seed;
        }

        match self.read() {
            Ok(config) => config,
            Err(err) => {
                warn!(path = %self.path.display(), error = %err, "snippets unreadable, loading empty set");
                RootConfig::default()
            }
        }
    }

    fn save(&self, config: &RootConfig) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(config).map_err(StoreError::Serialize)?;
        std::fs::write(&self.path, content)?;
        Ok(())
    }
}

/// Seed written on first launch so the panel is never blank.
pub fn default_config() -> RootConfig {
    RootConfig::new(vec![
        SnippetGroup::new(
            "Greetings",
            vec![
                Snippet::new("Hello", "Hello, hope you are doing well."),
                Snippet::new("Thanks", "Thank you for your help!"),
                Snippet::new("Regards", "Best regards,"),
            ],
        ),
        SnippetGroup::new(
            "Replies",
            vec![
                Snippet::new("On it", "Got it, I'm looking into this now."),
                Snippet::new("Follow up", "Just following up on my previous message."),
                Snippet::untitled("Could you share a bit more detail about the issue?"),
            ],
        ),
    ])
}
