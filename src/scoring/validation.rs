use super::config::ScoringConfig;

/// Validate scoring configuration at startup.
/// Returns all validation errors at once (not just the first).
pub fn validate_scoring(config: &ScoringConfig) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    if let Some(ref points) = config.position_points {
        if points.is_empty() {
            errors.push("scoring.position_points: must list at least one position".to_string());
        }
        for (i, value) in points.iter().enumerate() {
            if *value < 0 {
                errors.push(format!(
                    "scoring.position_points[{}]: must be non-negative, got {}",
                    i, value
                ));
            }
        }
    }

    if let Some(ref marker) = config.nationality_marker {
        if marker.trim().is_empty() {
            errors.push("scoring.nationality_marker: must not be empty".to_string());
        }
    }

    if let Some(bonus) = config.nationality_bonus {
        if bonus < 0 {
            errors.push("scoring.nationality_bonus: must be non-negative".to_string());
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
