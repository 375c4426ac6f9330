use std::path::Path;

use crate::config::schema::Config;
use crate::error::ConfigError;

const MIN_DPI: u32 = 72;
const MAX_DPI: u32 = 1200;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Json,
    Yaml,
}

impl ConfigFormat {
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml") => {
                ConfigFormat::Yaml
            }
            _ => ConfigFormat::Json,
        }
    }
}

pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadFile {
        path: path.to_path_buf(),
        source: e,
    })?;

    load_config_from_str(&content, ConfigFormat::from_path(path))
}

pub fn load_config_from_str(content: &str, format: ConfigFormat) -> Result<Config, ConfigError> {
    let config: Config = match format {
        ConfigFormat::Json => serde_json::from_str(content)?,
        ConfigFormat::Yaml => serde_yaml::from_str(content)?,
    };

    validate_config(&config)?;

    Ok(config)
}

pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if !(MIN_DPI..=MAX_DPI).contains(&config.ocr.dpi) {
        return Err(ConfigError::Validation {
            message: format!(
                "OCR dpi must be between {} and {}, got {}",
                MIN_DPI, MAX_DPI, config.ocr.dpi
            ),
        });
    }

    if config.ocr.languages.is_empty() {
        return Err(ConfigError::Validation {
            message: "At least one OCR language is required".to_string(),
        });
    }

    for lang in &config.ocr.languages {
        let valid = !lang.is_empty()
            && lang
                .chars()
                .all(|c| c.is_ascii_lowercase() || c == '_');
        if !valid {
            return Err(ConfigError::Validation {
                message: format!("Invalid OCR language code: '{}'", lang),
            });
        }
    }

    let archive_name = &config.output.archive_name;
    if archive_name.is_empty()
        || archive_name.contains('/')
        || archive_name.contains('\\')
        || !archive_name.ends_with(".zip")
    {
        return Err(ConfigError::Validation {
            message: format!(
                "Archive name must be a bare file name ending in .zip: '{}'",
                archive_name
            ),
        });
    }

    Ok(())
}
