use crate::error::{BridgeError, Result};
use crate::models::is_known_gemini_model;
use crate::resolver::{EnvOverride, MappingMode, ModelResolver, OverrideSource, StaticOverride};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Setting this to `1` turns model mapping off.
pub const DISABLE_MAPPING_ENV: &str = "DISABLE_MODEL_MAPPING";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BridgeConfig {
    #[serde(default)]
    pub mapping: MappingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MappingConfig {
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Fixes the vision override at startup. When unset the environment is
    /// consulted on every vision request.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vision_override: Option<String>,
}

impl Default for MappingConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            vision_override: None,
        }
    }
}

fn default_enabled() -> bool {
    true
}

impl BridgeConfig {
    /// Load config from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            BridgeError::config(format!("Failed to read config file {}: {}", path.display(), e))
        })?;
        let config: Self = toml::from_str(&content)?;
        config.validate();
        Ok(config)
    }

    /// Search standard locations for a config file.
    /// Priority: CLI arg > CWD > XDG config > home dir > built-in defaults
    pub fn find_and_load(explicit_path: Option<&Path>) -> Result<Self> {
        Self::find_and_load_in(explicit_path, &config_search_paths())
    }

    fn find_and_load_in(explicit_path: Option<&Path>, candidates: &[PathBuf]) -> Result<Self> {
        if let Some(path) = explicit_path {
            return Self::load(path);
        }

        match candidates.iter().find(|candidate| candidate.exists()) {
            Some(candidate) => {
                tracing::info!(path = %candidate.display(), "Loading config");
                Self::load(candidate)
            }
            None => {
                tracing::debug!(searched = candidates.len(), "No config file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Apply overrides from the process environment.
    #[must_use]
    pub fn apply_env(self) -> Self {
        self.apply_env_with(|key| std::env::var(key).ok())
    }

    /// Apply environment overrides through `lookup`.
    #[must_use]
    pub fn apply_env_with<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if lookup(DISABLE_MAPPING_ENV).as_deref() == Some("1") {
            tracing::info!("{} is set, model mapping disabled", DISABLE_MAPPING_ENV);
            self.mapping.enabled = false;
        }
        self
    }

    #[must_use]
    pub fn mapping_mode(&self) -> MappingMode {
        MappingMode::from(self.mapping.enabled)
    }

    /// Build a resolver. A configured vision override is fixed for the
    /// resolver's lifetime; otherwise it is read from the environment per call.
    #[must_use]
    pub fn resolver(&self) -> ModelResolver<Box<dyn OverrideSource + Send + Sync>> {
        let overrides: Box<dyn OverrideSource + Send + Sync> = match self.mapping.vision_override {
            Some(ref value) => Box::new(StaticOverride::new(value.clone())),
            None => Box::new(EnvOverride),
        };
        ModelResolver::with_overrides(self.mapping_mode(), overrides)
    }

    fn validate(&self) {
        if let Some(ref value) = self.mapping.vision_override {
            if !is_known_gemini_model(value) {
                tracing::warn!(
                    vision_override = %value,
                    "Unknown Gemini model in vision_override; vision requests will use the flash model"
                );
            }
        }
    }
}

pub fn config_search_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();

    // CWD
    paths.push(PathBuf::from("model-bridge.toml"));

    // XDG / platform config dir
    if cfg!(target_os = "macos") {
        if let Some(home) = home_dir() {
            paths.push(
                home.join("Library")
                    .join("Application Support")
                    .join("model-bridge")
                    .join("config.toml"),
            );
        }
    } else {
        if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
            paths.push(PathBuf::from(xdg).join("model-bridge").join("config.toml"));
        }
        if let Some(home) = home_dir() {
            paths.push(home.join(".config").join("model-bridge").join("config.toml"));
        }
    }

    // Home directory fallback
    if let Some(home) = home_dir() {
        paths.push(home.join(".model-bridge.toml"));
    }

    paths
}

fn home_dir() -> Option<PathBuf> {
    std::env::var("HOME").ok().map(PathBuf::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let pairs: Vec<(String, String)> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| {
            pairs
                .iter()
                .find(|(k, _)| k == key)
                .map(|(_, v)| v.clone())
        }
    }

    #[test]
    fn test_load_config() {
        let mut f = NamedTempFile::new().unwrap();
        writeln!(
            f,
            r#"
[mapping]
enabled = false
vision_override = "gemini-1.5-pro-002"
"#
        )
        .unwrap();

        let config = BridgeConfig::load(f.path()).unwrap();
        assert!(!config.mapping.enabled);
        assert_eq!(
            config.mapping.vision_override.as_deref(),
            Some("gemini-1.5-pro-002")
        );
    }

    #[test]
    fn test_empty_file_uses_defaults() {
        let f = NamedTempFile::new().unwrap();
        let config = BridgeConfig::load(f.path()).unwrap();
        assert!(config.mapping.enabled);
        assert!(config.mapping.vision_override.is_none());
    }

    #[test]
    fn test_malformed_toml_is_an_error() {
        let mut f = NamedTempFile::new().unwrap();
        writeln!(f, "[mapping\nenabled = ").unwrap();
        let err = BridgeConfig::load(f.path()).unwrap_err();
        assert!(matches!(err, BridgeError::Toml(_)));
    }

    #[test]
    fn test_explicit_missing_path_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        let err = BridgeConfig::find_and_load(Some(&missing)).unwrap_err();
        assert!(matches!(err, BridgeError::Config { .. }));
    }

    #[test]
    fn test_env_disables_mapping() {
        let config =
            BridgeConfig::default().apply_env_with(lookup_from(&[(DISABLE_MAPPING_ENV, "1")]));
        assert!(!config.mapping.enabled);
    }

    #[test]
    fn test_env_other_values_keep_mapping() {
        for value in ["0", "true", "yes", ""] {
            let config = BridgeConfig::default()
                .apply_env_with(lookup_from(&[(DISABLE_MAPPING_ENV, value)]));
            assert!(config.mapping.enabled, "value {value:?} should not disable");
        }
        let config = BridgeConfig::default().apply_env_with(lookup_from(&[]));
        assert!(config.mapping.enabled);
    }

    #[test]
    fn test_resolver_uses_configured_override() {
        let config = BridgeConfig {
            mapping: MappingConfig {
                enabled: true,
                vision_override: Some("gemini-1.5-pro-002".to_string()),
            },
        };
        let resolver = config.resolver();
        assert_eq!(
            resolver.resolve_chat_model("gpt-4-vision-preview"),
            "gemini-1.5-pro-002"
        );
        assert_eq!(resolver.owner_label(), "openai");
    }

    #[test]
    fn test_no_candidate_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let candidates = vec![dir.path().join("model-bridge.toml"), dir.path().join("config.toml")];

        let config = BridgeConfig::find_and_load_in(None, &candidates).unwrap();
        assert!(config.mapping.enabled);
        assert!(config.mapping.vision_override.is_none());
    }

    #[test]
    fn test_first_existing_candidate_wins() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.toml");
        let first = dir.path().join("first.toml");
        let second = dir.path().join("second.toml");
        std::fs::write(&first, "[mapping]\nenabled = false\n").unwrap();
        std::fs::write(
            &second,
            "[mapping]\nenabled = true\nvision_override = \"gemini-1.5-pro-002\"\n",
        )
        .unwrap();

        let config =
            BridgeConfig::find_and_load_in(None, &[missing, first, second.clone()]).unwrap();
        assert!(!config.mapping.enabled);
        assert!(config.mapping.vision_override.is_none());

        // An explicit path bypasses the candidate list entirely.
        let explicit = BridgeConfig::find_and_load_in(Some(&second), &[]).unwrap();
        assert!(explicit.mapping.enabled);
    }

    #[test]
    fn test_search_paths_start_in_cwd() {
        let paths = config_search_paths();
        assert_eq!(paths[0], PathBuf::from("model-bridge.toml"));
    }
}
