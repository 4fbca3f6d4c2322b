use super::state::{Season, SEASON_VERSION};
use anyhow::{Context, Result};
use atomic_write_file::AtomicWriteFile;
use std::fs::File;
use std::path::{Path, PathBuf};

/// Default season file path (~/.config/peloton-picks/season.json)
pub fn get_season_path() -> PathBuf {
    crate::config::get_config_dir().join("season.json")
}

/// Load a season from JSON.
///
/// A missing file is an empty season. An unsupported version is an error.
pub fn load_season(path: &Path) -> Result<Season> {
    if !path.exists() {
        return Ok(Season::new());
    }

    let file = File::open(path)
        .with_context(|| format!("Failed to open season file at {}", path.display()))?;

    let season: Season = serde_json::from_reader(file)
        .with_context(|| format!("Failed to parse season file at {}", path.display()))?;

    if season.version != SEASON_VERSION {
        anyhow::bail!("Unsupported season file version: {}", season.version);
    }

    Ok(season)
}

/// Save a season atomically, creating the parent directory if needed.
pub fn save_season(path: &Path, season: &Season) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create season directory at {}", parent.display())
            })?;
        }
    }

    let mut file = AtomicWriteFile::open(path)
        .with_context(|| format!("Failed to open atomic write file at {}", path.display()))?;

    serde_json::to_writer_pretty(&mut file, season).context("Failed to serialize season")?;

    file.commit().context("Failed to save season")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::season::types::{Race, RatingTable};
    use std::env;

    #[test]
    fn test_load_missing_file_returns_empty() {
        let temp_path = env::temp_dir().join("peloton_picks_test_missing.json");
        let _ = std::fs::remove_file(&temp_path);

        let season = load_season(&temp_path).unwrap();
        assert_eq!(season.version, SEASON_VERSION);
        assert!(season.races.is_empty());
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let temp_path = env::temp_dir().join("peloton_picks_test_roundtrip.json");
        let _ = std::fs::remove_file(&temp_path);

        let mut season = Season::new();
        let mut ratings = RatingTable::new();
        ratings.set("Mads Pedersen (DK)", 4);
        season.ratings = ratings;
        let mut race = Race::new("Gent-Wevelgem", "2025-03-30T10:00");
        race.record_results(["Mads Pedersen (DK)", "Tim Merlier"]);
        season.races.push(race);
        season.start_counts.insert("Anders".to_string(), 1);

        save_season(&temp_path, &season).unwrap();
        let loaded = load_season(&temp_path).unwrap();

        assert_eq!(loaded.races, season.races);
        assert_eq!(loaded.ratings.get("Mads Pedersen (DK)"), Some(4));
        assert_eq!(loaded.start_counts["Anders"], 1);

        let _ = std::fs::remove_file(&temp_path);
    }

    #[test]
    fn test_load_rejects_unknown_version() {
        let temp_path = env::temp_dir().join("peloton_picks_test_version.json");
        std::fs::write(&temp_path, r#"{ "version": 7 }"#).unwrap();

        let err = load_season(&temp_path).unwrap_err();
        assert!(err.to_string().contains("Unsupported season file version"));

        let _ = std::fs::remove_file(&temp_path);
    }
}
