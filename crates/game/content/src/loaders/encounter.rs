//! Encounter roster loader.

use std::path::Path;

use overload_core::{TargetKind, UnitSpec};

use crate::loaders::{LoadResult, read_file};

/// Loader for the units spawned when an encounter begins.
pub struct EncounterLoader;

impl EncounterLoader {
    pub fn load(path: &Path) -> LoadResult<Vec<UnitSpec>> {
        let content = read_file(path)?;
        Self::parse(&content, &path.display().to_string())
    }

    /// Parses a roster. The player is implicit, so `Player` entries are rejected.
    pub fn parse(source: &str, origin: &str) -> LoadResult<Vec<UnitSpec>> {
        let roster: Vec<UnitSpec> = ron::from_str(source)
            .map_err(|e| anyhow::anyhow!("Failed to parse encounter RON {}: {}", origin, e))?;

        for unit in &roster {
            if unit.kind == TargetKind::Player {
                anyhow::bail!("{}: roster entry {:?} cannot be a player", origin, unit.name);
            }
            if unit.max_health == 0 {
                anyhow::bail!("{}: roster entry {:?} has no health", origin, unit.name);
            }
        }

        Ok(roster)
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use overload_core::Element;
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn loads_roster_from_disk() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("encounter.ron");
        fs::write(
            &path,
            r#"[
                (name: "Imp", kind: Enemy, max_health: 30, weakness: Some(Shock)),
                (name: "Crate", kind: Environment, max_health: 5, distance: Some(2.5)),
            ]"#,
        )
        .unwrap();

        let roster = EncounterLoader::load(&path).unwrap();
        assert_eq!(roster.len(), 2);
        assert_eq!(roster[0].weakness, Some(Element::Shock));
        assert_eq!(roster[0].distance, None);
        assert_eq!(roster[1].distance, Some(2.5));
    }

    #[test]
    fn rejects_player_entries() {
        let err = EncounterLoader::parse(
            r#"[(name: "Twin", kind: Player, max_health: 10)]"#,
            "inline",
        )
        .unwrap_err();
        assert!(err.to_string().contains("Twin"));
    }

    #[test]
    fn missing_file_is_reported_with_path() {
        let dir = TempDir::new().unwrap();
        let err = EncounterLoader::load(&dir.path().join("nope.ron")).unwrap_err();
        assert!(err.to_string().contains("nope.ron"));
    }
}
