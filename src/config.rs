use serde::{Deserialize, Serialize};

use crate::model::DEFAULT_SCHEMA_VERSION;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    pub migration: MigrationConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MigrationConfig {
    /// Legacy herb records, a JSON array
    pub input_file: String,
    pub output_dir: String,
    pub schema_version: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// `error`, `warn`, `info`, `debug` or `trace`
    pub level: String,
}

impl Default for MigrationConfig {
    fn default() -> Self {
        Self {
            input_file: "public/data/herbs_with_images.json".to_string(),
            output_dir: "public/data/new-schema".to_string(),
            schema_version: DEFAULT_SCHEMA_VERSION.to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration from defaults, an optional `tcm-migrate` config file
    /// and `TCM_` environment variables, later sources winning
    pub fn load() -> anyhow::Result<Self> {
        Self::load_with(Self::environment())
    }

    // e.g. TCM_MIGRATION__OUTPUT_DIR=out
    fn environment() -> config::Environment {
        config::Environment::with_prefix("TCM")
            .prefix_separator("_")
            .separator("__")
    }

    fn load_with(environment: config::Environment) -> anyhow::Result<Self> {
        let mut config = config::Config::builder();

        config = config.add_source(config::Config::try_from(&AppConfig::default())?);

        config = config.add_source(config::File::with_name("tcm-migrate").required(false));

        config = config.add_source(environment);

        let config = config.build()?;
        let app_config: AppConfig = config.try_deserialize()?;

        Ok(app_config)
    }

    /// Log level filter, falling back to `info` for unknown names
    pub fn log_level(&self) -> log::LevelFilter {
        self.logging
            .level
            .parse()
            .unwrap_or(log::LevelFilter::Info)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.migration.schema_version, "1.0.0");
        assert_eq!(config.migration.output_dir, "public/data/new-schema");
        assert_eq!(config.log_level(), log::LevelFilter::Info);
    }

    #[test]
    fn test_log_level_parsing() {
        let mut config = AppConfig::default();
        config.logging.level = "debug".to_string();
        assert_eq!(config.log_level(), log::LevelFilter::Debug);

        config.logging.level = "loud".to_string();
        assert_eq!(config.log_level(), log::LevelFilter::Info);
    }

    #[test]
    fn test_load_reads_environment() {
        let vars = config::Map::from([(
            "TCM_MIGRATION__SCHEMA_VERSION".to_string(),
            "2.1.0".to_string(),
        )]);
        let config = AppConfig::load_with(AppConfig::environment().source(Some(vars))).unwrap();

        assert_eq!(config.migration.schema_version, "2.1.0");
        assert_eq!(config.logging.level, "info");
    }
}
