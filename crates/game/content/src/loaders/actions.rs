//! Action catalog loader.
//!
//! Actions are split across one RON file per category under `actions/`. Each
//! file holds a `Vec<ActionDef>`; ids must be unique across all of them.

use std::path::Path;

use overload_core::{ActionCatalog, ActionDef};

use crate::loaders::{LoadResult, read_file};

/// Category files read from an `actions/` directory, in load order.
pub const ACTION_FILES: [&str; 4] = ["attack.ron", "imbue.ron", "items.ron", "menu.ron"];

const EMBEDDED: [(&str, &str); 4] = [
    ("attack.ron", include_str!("../../data/actions/attack.ron")),
    ("imbue.ron", include_str!("../../data/actions/imbue.ron")),
    ("items.ron", include_str!("../../data/actions/items.ron")),
    ("menu.ron", include_str!("../../data/actions/menu.ron")),
];

/// Loader for action definitions from RON files.
pub struct ActionLoader;

impl ActionLoader {
    /// Load the action definitions of a single RON file.
    pub fn load(path: &Path) -> LoadResult<Vec<ActionDef>> {
        let content = read_file(path)?;
        Self::parse(&content, &path.display().to_string())
    }

    pub fn parse(source: &str, origin: &str) -> LoadResult<Vec<ActionDef>> {
        ron::from_str(source)
            .map_err(|e| anyhow::anyhow!("Failed to parse actions RON {}: {}", origin, e))
    }

    /// Load every category file from `dir` into one catalog.
    ///
    /// Category files that do not exist are skipped, so a directory may
    /// override only part of the catalog.
    pub fn load_dir(dir: &Path) -> LoadResult<ActionCatalog> {
        let mut catalog = ActionCatalog::new();
        for file in ACTION_FILES {
            let path = dir.join(file);
            if !path.exists() {
                continue;
            }
            Self::extend(&mut catalog, Self::load(&path)?, &path.display().to_string())?;
        }
        Ok(catalog)
    }

    /// The catalog built from the copies embedded at compile time.
    pub fn embedded() -> LoadResult<ActionCatalog> {
        let mut catalog = ActionCatalog::new();
        for (name, source) in EMBEDDED {
            Self::extend(&mut catalog, Self::parse(source, name)?, name)?;
        }
        Ok(catalog)
    }

    fn extend(catalog: &mut ActionCatalog, defs: Vec<ActionDef>, origin: &str) -> LoadResult<()> {
        for def in defs {
            catalog
                .insert(def)
                .map_err(|e| anyhow::anyhow!("{}: {}", origin, e))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use overload_core::{ActionCategory, ActionId, ActionKind, Element, TargetKind, TargetMask};
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn embedded_catalog_covers_every_category() {
        let catalog = ActionLoader::embedded().unwrap();
        for category in [
            ActionCategory::Attack,
            ActionCategory::Imbue,
            ActionCategory::Item,
            ActionCategory::Menu,
        ] {
            assert!(
                catalog.iter().any(|def| def.category() == category),
                "no {category} actions"
            );
        }
    }

    #[test]
    fn parses_flag_strings_and_variants() {
        let source = r#"[
            (
                id: 7,
                name: "Ember",
                energy_cost: 3,
                targets: "PLAYER",
                single_use: true,
                kind: Imbue(element: Fire),
            ),
        ]"#;
        let defs = ActionLoader::parse(source, "inline").unwrap();

        assert_eq!(defs.len(), 1);
        let ember = &defs[0];
        assert_eq!(ember.id, ActionId(7));
        assert_eq!(ember.action_cost, 0);
        assert_eq!(ember.targets, TargetMask::PLAYER);
        assert!(ember.can_target(TargetKind::Player));
        assert!(ember.single_use);
        assert_eq!(ember.kind, ActionKind::Imbue { element: Element::Fire });
    }

    #[test]
    fn duplicate_ids_across_files_are_rejected() {
        let dir = TempDir::new().unwrap();
        let entry = r#"[(id: 1, name: "Shot", targets: "ENEMY", kind: Attack(damage: 1))]"#;
        fs::write(dir.path().join("attack.ron"), entry).unwrap();
        fs::write(dir.path().join("menu.ron"), entry).unwrap();

        let err = ActionLoader::load_dir(dir.path()).unwrap_err();
        assert!(err.to_string().contains("menu.ron"));
    }

    #[test]
    fn load_dir_skips_missing_categories() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("menu.ron"),
            r#"[(id: 30, name: "Wait", targets: "PLAYER", kind: Menu)]"#,
        )
        .unwrap();

        let catalog = ActionLoader::load_dir(dir.path()).unwrap();
        assert_eq!(catalog.len(), 1);
        assert!(catalog.find_by_name("wait").is_some());
    }

    #[test]
    fn malformed_file_names_its_origin() {
        let err = ActionLoader::parse("[(id: )]", "broken.ron").unwrap_err();
        assert!(err.to_string().contains("broken.ron"));
    }
}
