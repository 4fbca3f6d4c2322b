mod schema;

pub use schema::{Config, DEFAULT_ROSTER};

use anyhow::{Context, Result};
use atomic_write_file::AtomicWriteFile;
use std::collections::HashSet;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::scoring::validate_scoring;
use crate::season::parse_cutoff;

/// Get the config directory path (~/.config/peloton-picks/)
pub fn get_config_dir() -> PathBuf {
    let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
    home.join(".config").join("peloton-picks")
}

/// Get the default config file path (~/.config/peloton-picks/config.yaml)
pub fn get_config_path() -> PathBuf {
    get_config_dir().join("config.yaml")
}

/// Load configuration from a YAML file
///
/// # Arguments
///
/// * `path` - Optional path to config file. If None, uses the default path
///
/// # Errors
///
/// Returns an error if:
/// - The config file does not exist
/// - The config file cannot be read
/// - The YAML cannot be parsed
pub fn load_config(path: Option<PathBuf>) -> Result<Config> {
    let config_path = path.unwrap_or_else(get_config_path);

    if !config_path.exists() {
        anyhow::bail!(
            "Config file not found at {}. Run `peloton-picks init` to create one",
            config_path.display()
        );
    }

    let config_content = fs::read_to_string(&config_path)
        .with_context(|| format!("Failed to read config file at {}", config_path.display()))?;

    let config: Config = serde_saphyr::from_str(&config_content).with_context(|| {
        format!("Failed to parse config: invalid YAML in {}", config_path.display())
    })?;

    Ok(config)
}

/// Write `config` as YAML, refusing to overwrite an existing file.
pub fn write_config(path: &Path, config: &Config) -> Result<()> {
    if path.exists() {
        anyhow::bail!("Config file already exists at {}", path.display());
    }
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory at {}", parent.display())
            })?;
        }
    }

    let yaml = serde_saphyr::to_string(config).context("Failed to serialize config")?;

    let mut file = AtomicWriteFile::open(path)
        .with_context(|| format!("Failed to open atomic write file at {}", path.display()))?;
    file.write_all(yaml.as_bytes())
        .context("Failed to write config")?;
    file.commit().context("Failed to save config")?;

    Ok(())
}

/// Validate the whole config, scoring section included.
/// Returns all validation errors at once (not just the first).
pub fn validate_config(config: &Config) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    if config.roster.is_empty() {
        errors.push("roster: must name at least one participant".to_string());
    }

    let mut seen = HashSet::new();
    for (i, name) in config.roster.iter().enumerate() {
        if name.trim().is_empty() {
            errors.push(format!("roster[{}]: name must not be empty", i));
        } else if !seen.insert(name.as_str()) {
            errors.push(format!("roster[{}]: duplicate participant '{}'", i, name));
        }
    }

    if let Err(e) = parse_cutoff(config.pick_cutoff_str()) {
        errors.push(format!(
            "pick_cutoff: invalid duration '{}' - {}",
            config.pick_cutoff_str(),
            e
        ));
    }

    if let Some(ref scoring) = config.scoring {
        if let Err(scoring_errors) = validate_scoring(scoring) {
            errors.extend(scoring_errors);
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
