//! Dataset registry.
//!
//! Maps a dataset id to its [`DatasetPipeline`]. Every step is validated
//! when the registry is built, so a malformed configuration fails at load
//! time instead of halfway through a cleaning run.

use std::sync::LazyLock;

use indexmap::IndexMap;
use nis_model::DatasetConfig;

use crate::datasets::builtin_configs;
use crate::error::{CleanError, Result};
use crate::pipeline::DatasetPipeline;

static BUILTIN: LazyLock<std::result::Result<DatasetRegistry, String>> =
    LazyLock::new(|| DatasetRegistry::from_configs(builtin_configs()).map_err(|e| e.to_string()));

#[derive(Debug, Clone, Default)]
pub struct DatasetRegistry {
    pipelines: IndexMap<String, DatasetPipeline>,
}

impl DatasetRegistry {
    /// The process-wide registry of built-in pipelines.
    pub fn builtin() -> Result<&'static Self> {
        BUILTIN.as_ref().map_err(|reason| CleanError::Registry {
            reason: reason.clone(),
        })
    }

    /// Builds a registry, rejecting invalid steps and repeated ids.
    pub fn from_configs(configs: impl IntoIterator<Item = DatasetConfig>) -> Result<Self> {
        let mut pipelines = IndexMap::new();
        for config in configs {
            let id = config.id.clone();
            let pipeline = DatasetPipeline::new(config).map_err(|error| CleanError::Registry {
                reason: format!("dataset `{id}`: {error}"),
            })?;
            if pipelines.insert(id.clone(), pipeline).is_some() {
                return Err(CleanError::Registry {
                    reason: format!("dataset `{id}` is defined more than once"),
                });
            }
        }
        tracing::debug!(datasets = pipelines.len(), "loaded dataset registry");
        Ok(Self { pipelines })
    }

    /// Parses a JSON array of `{"id": .., "steps": [..]}` entries.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let configs: Vec<DatasetConfig> =
            serde_json::from_str(json).map_err(|error| CleanError::Registry {
                reason: error.to_string(),
            })?;
        Self::from_configs(configs)
    }

    pub fn get(&self, id: &str) -> Result<&DatasetPipeline> {
        self.pipelines
            .get(id)
            .ok_or_else(|| CleanError::UnknownDataset { id: id.to_string() })
    }

    pub fn contains(&self, id: &str) -> bool {
        self.pipelines.contains_key(id)
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.pipelines.keys().map(String::as_str)
    }

    pub fn pipelines(&self) -> impl Iterator<Item = &DatasetPipeline> {
        self.pipelines.values()
    }

    pub fn len(&self) -> usize {
        self.pipelines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pipelines.is_empty()
    }
}
