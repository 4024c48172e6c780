//! Model registry

use std::collections::HashMap;

use crate::propagation::PropagationError;

use super::{CollisionModel, NasaBreakupModel};

/// Failures when resolving or running a collision simulation
#[derive(Debug)]
pub enum SimulationError {
    /// No model is registered under the requested name
    ModelNotFound { name: String },

    /// An object's state could not be computed at the collision instant;
    /// there is no partial outcome
    Propagation {
        norad_id: u32,
        source: PropagationError,
    },
}

impl std::fmt::Display for SimulationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ModelNotFound { name } => {
                write!(f, "Collision model not found: {}", name)
            }
            Self::Propagation { norad_id, source } => {
                write!(
                    f,
                    "Cannot propagate object {} to the collision instant: {}",
                    norad_id, source
                )
            }
        }
    }
}

impl std::error::Error for SimulationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Propagation { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Registry of collision models, keyed by name
///
/// An explicit value constructed and passed by the caller; registration and
/// lookup are the only operations. The default model, when set, answers
/// `get(None)`.
pub struct ModelRegistry {
    models: HashMap<String, Box<dyn CollisionModel>>,
    default_name: Option<String>,
}

impl Default for ModelRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ModelRegistry {
    /// An empty registry with no default
    pub fn new() -> Self {
        Self {
            models: HashMap::new(),
            default_name: None,
        }
    }

    /// A registry with the NASA model registered as the default
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register("nasa", Box::new(NasaBreakupModel::new()));
        registry.default_name = Some("nasa".to_string());
        registry
    }

    /// Store a model under a unique name, replacing any previous entry
    pub fn register(&mut self, name: &str, model: Box<dyn CollisionModel>) {
        log::debug!("Registering collision model: {}", name);
        self.models.insert(name.to_string(), model);
    }

    /// Set which registered model `get(None)` resolves to
    pub fn set_default(&mut self, name: &str) {
        self.default_name = Some(name.to_string());
    }

    /// Resolve a model by name, or the default when no name is given
    pub fn get(&self, name: Option<&str>) -> Result<&dyn CollisionModel, SimulationError> {
        let requested = match name {
            Some(name) => name.to_string(),
            None => self
                .default_name
                .clone()
                .ok_or_else(|| SimulationError::ModelNotFound {
                    name: "(default)".to_string(),
                })?,
        };

        self.models
            .get(&requested)
            .map(|model| model.as_ref())
            .ok_or(SimulationError::ModelNotFound { name: requested })
    }

    /// All registered names with human-readable descriptions, sorted
    pub fn list(&self) -> Vec<(String, &'static str)> {
        let mut entries: Vec<(String, &'static str)> = self
            .models
            .keys()
            .map(|name| (name.clone(), describe_model(name)))
            .collect();
        entries.sort();
        entries
    }
}

/// Static description table for known model names
fn describe_model(name: &str) -> &'static str {
    match name {
        "nasa" => "NASA-style power-law breakup model (simplified)",
        "custom" => "User-registered collision model",
        _ => "Unknown model",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_resolution() {
        let registry = ModelRegistry::with_defaults();
        let model = registry.get(None).unwrap();
        assert_eq!(model.name(), "nasa");
    }

    #[test]
    fn test_unknown_name_is_an_error() {
        let registry = ModelRegistry::with_defaults();
        let error = registry.get(Some("sbm-2008")).err().unwrap();
        assert!(matches!(error, SimulationError::ModelNotFound { .. }));
        assert!(error.to_string().contains("sbm-2008"));
    }

    #[test]
    fn test_empty_registry_has_no_default() {
        let registry = ModelRegistry::new();
        assert!(registry.get(None).is_err());
    }

    #[test]
    fn test_list_describes_known_and_unknown_names() {
        let mut registry = ModelRegistry::with_defaults();
        registry.register("experimental", Box::new(NasaBreakupModel::new()));

        let entries = registry.list();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].0, "experimental");
        assert_eq!(entries[0].1, "Unknown model");
        assert_eq!(entries[1].0, "nasa");
        assert!(entries[1].1.contains("power-law"));
    }
}
