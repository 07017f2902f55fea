//! Runtime configuration: TOML file merged with `ONCO_`-prefixed
//! environment variables over built-in defaults.

use crate::errors::ScreenResult;
use crate::feature_schema::FeatureSchema;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

pub const CONFIG_FILE: &str = "oncoscope.toml";
pub const ENV_PREFIX: &str = "ONCO_";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ScreenerConfig {
    /// Path of the serialized classifier artifact loaded at startup.
    pub model_path: String,
    /// Feature set shared with the trainer: `core5`, `full30`, or a
    /// comma-separated column list.
    pub feature_set: String,
    pub telemetry_enabled: bool,
    /// Toggles the per-measurement detail block in explanations.
    pub explanation_enabled: bool,
    pub log_dir: String,
}

impl Default for ScreenerConfig {
    fn default() -> Self {
        ScreenerConfig {
            model_path: "models/wdbc_logistic.json".to_string(),
            feature_set: "core5".to_string(),
            telemetry_enabled: true,
            explanation_enabled: true,
            log_dir: "logs".to_string(),
        }
    }
}

impl ScreenerConfig {
    /// Resolve the configured feature set into a schema.
    pub fn schema(&self) -> ScreenResult<FeatureSchema> {
        FeatureSchema::from_config_key(&self.feature_set)
    }
}

pub fn load_config() -> Result<ScreenerConfig, figment::Error> {
    let figment = Figment::from(Serialized::defaults(ScreenerConfig::default()))
        .merge(Toml::file(CONFIG_FILE))
        .merge(Env::prefixed(ENV_PREFIX));

    let config: ScreenerConfig = figment.extract()?;

    if config.model_path.trim().is_empty() {
        return Err(figment::Error::from("model_path must be set".to_string()));
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_resolve_to_core5() {
        figment::Jail::expect_with(|_jail| {
            let config = load_config().expect("defaults load");
            assert_eq!(config.feature_set, "core5");
            assert_eq!(config.schema().unwrap().arity(), 5);
            assert!(config.telemetry_enabled);
            Ok(())
        });
    }

    #[test]
    fn env_overrides_defaults() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("ONCO_FEATURE_SET", "full30");
            jail.set_env("ONCO_MODEL_PATH", "artifacts/full.json");
            let config = load_config().expect("env load");
            assert_eq!(config.schema().unwrap().arity(), 30);
            assert_eq!(config.model_path, "artifacts/full.json");
            Ok(())
        });
    }

    #[test]
    fn toml_file_merges_under_env() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(
                CONFIG_FILE,
                r#"
                model_path = "models/from_toml.json"
                telemetry_enabled = false
                "#,
            )?;
            let config = load_config().expect("toml load");
            assert_eq!(config.model_path, "models/from_toml.json");
            assert!(!config.telemetry_enabled);
            Ok(())
        });
    }

    #[test]
    fn empty_model_path_rejected() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("ONCO_MODEL_PATH", "");
            assert!(load_config().is_err());
            Ok(())
        });
    }
}
