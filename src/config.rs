use crate::{
    catalog::Catalog,
    error::{AppError, CatalogError},
    pipeline::extraction::{ExtractionConfig, ResizeFilter},
};
use config::{Config, Environment, File};
use serde::Deserialize;
use std::path::PathBuf;
use tracing::Level;

/// Process settings, read once at startup.
///
/// Values come from an optional config file layered under `MOODBOARD_*`
/// environment variables, e.g. `MOODBOARD_NUM_COLORS=8`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub num_colors: usize,
    pub grid_width: u32,
    pub grid_height: u32,
    pub resize_filter: ResizeFilter,
    pub max_concurrency: usize,
    pub log_level: String,
    /// Catalog file to use instead of the built-in palettes.
    pub catalog_path: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            num_colors: 5,
            grid_width: 100,
            grid_height: 100,
            resize_filter: ResizeFilter::Nearest,
            max_concurrency: 4,
            log_level: "info".to_string(),
            catalog_path: None,
        }
    }
}

impl Settings {
    /// Loads `name` (with or without extension, may be absent) plus the environment.
    pub fn load(name: &str) -> Result<Self, AppError> {
        Self::load_with(name, Self::environment())
    }

    /// `MOODBOARD_<KEY>`, with `__` separating nested keys.
    pub fn environment() -> Environment {
        Environment::with_prefix("MOODBOARD")
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true)
    }

    pub fn load_with(name: &str, environment: Environment) -> Result<Self, AppError> {
        let settings: Self = Config::builder()
            .add_source(File::with_name(name).required(false))
            .add_source(environment)
            .build()?
            .try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), AppError> {
        if self.num_colors == 0 {
            return Err(invalid("num_colors", self.num_colors));
        }
        if self.grid_width == 0 {
            return Err(invalid("grid_width", self.grid_width));
        }
        if self.grid_height == 0 {
            return Err(invalid("grid_height", self.grid_height));
        }
        if self.max_concurrency == 0 {
            return Err(invalid("max_concurrency", self.max_concurrency));
        }
        self.tracing_level()?;
        Ok(())
    }

    pub fn tracing_level(&self) -> Result<Level, AppError> {
        self.log_level
            .parse()
            .map_err(|_| invalid("log_level", &self.log_level))
    }

    pub fn extraction_config(&self) -> ExtractionConfig {
        ExtractionConfig {
            num_colors: self.num_colors,
            grid_width: self.grid_width,
            grid_height: self.grid_height,
            resize_filter: self.resize_filter,
        }
    }

    pub fn load_catalog(&self) -> Result<Catalog, CatalogError> {
        match &self.catalog_path {
            Some(path) => Catalog::from_file(path),
            None => Ok(Catalog::builtin()),
        }
    }
}

fn invalid(name: &'static str, value: impl ToString) -> AppError {
    AppError::InvalidSetting(name, value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn settings_file(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn defaults_match_extraction_defaults() {
        let settings = Settings::default();
        settings.validate().unwrap();
        let config = settings.extraction_config();
        let defaults = ExtractionConfig::default();
        assert_eq!(config.num_colors, defaults.num_colors);
        assert_eq!((config.grid_width, config.grid_height), (100, 100));
        assert_eq!(config.resize_filter, ResizeFilter::Nearest);
        assert_eq!(settings.tracing_level().unwrap(), Level::INFO);
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let settings = Settings::load("/nonexistent/moodboard-settings").unwrap();
        assert_eq!(settings.grid_width, 100);
        assert!(settings.catalog_path.is_none());
    }

    #[test]
    fn reads_values_from_file() {
        let file = settings_file(
            r#"
            num_colors = 8
            grid_width = 64
            resize_filter = "catmull_rom"
            log_level = "debug"
            "#,
        );
        let settings = Settings::load(file.path().to_str().unwrap()).unwrap();
        assert_eq!(settings.num_colors, 8);
        assert_eq!(settings.grid_width, 64);
        assert_eq!(settings.grid_height, 100);
        assert_eq!(settings.resize_filter, ResizeFilter::CatmullRom);
        assert_eq!(settings.tracing_level().unwrap(), Level::DEBUG);
    }

    #[test]
    fn environment_overrides_file() {
        let file = settings_file(
            r#"
            num_colors = 8
            grid_width = 64
            "#,
        );
        let vars: ::config::Map<String, String> = [
            ("MOODBOARD_NUM_COLORS", "3"),
            ("MOODBOARD_RESIZE_FILTER", "lanczos3"),
            ("MOODBOARD_CATALOG_PATH", "/etc/moodboard/catalog.toml"),
            ("OTHER_NUM_COLORS", "99"),
        ]
        .into_iter()
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect();

        let settings = Settings::load_with(
            file.path().to_str().unwrap(),
            Settings::environment().source(Some(vars)),
        )
        .unwrap();
        assert_eq!(settings.num_colors, 3);
        assert_eq!(settings.grid_width, 64);
        assert_eq!(settings.resize_filter, ResizeFilter::Lanczos3);
        assert_eq!(
            settings.catalog_path,
            Some(PathBuf::from("/etc/moodboard/catalog.toml"))
        );
    }

    #[test]
    fn invalid_environment_values_are_rejected() {
        let vars: ::config::Map<String, String> =
            [("MOODBOARD_MAX_CONCURRENCY".to_string(), "0".to_string())]
                .into_iter()
                .collect();
        let err = Settings::load_with(
            "/nonexistent/moodboard-settings",
            Settings::environment().source(Some(vars)),
        )
        .unwrap_err();
        assert!(matches!(err, AppError::InvalidSetting("max_concurrency", _)));
    }

    #[test]
    fn rejects_invalid_values() {
        let file = settings_file("num_colors = 0");
        let err = Settings::load(file.path().to_str().unwrap()).unwrap_err();
        assert!(matches!(err, AppError::InvalidSetting("num_colors", _)));

        let settings = Settings {
            log_level: "chatty".to_string(),
            ..Settings::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(AppError::InvalidSetting("log_level", _))
        ));
    }

    #[test]
    fn loads_catalog_from_configured_path() {
        let catalog_file = settings_file(r##"serenity = ["#a8dadc"]"##);
        let settings = Settings {
            catalog_path: Some(catalog_file.path().to_path_buf()),
            ..Settings::default()
        };
        let catalog = settings.load_catalog().unwrap();
        assert_eq!(catalog.labels().collect::<Vec<_>>(), vec!["serenity"]);

        let builtin = Settings::default().load_catalog().unwrap();
        assert_eq!(builtin, Catalog::builtin());
    }
}
