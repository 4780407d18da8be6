//! Item catalog loader.

use std::path::Path;

use emberveil_core::ItemDefinition;
use serde::{Deserialize, Serialize};

use crate::loaders::{read_file, LoadResult};

/// Item catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemCatalog {
    pub items: Vec<ItemDefinition>,
}

/// Loader for item catalogs from RON files.
pub struct ItemLoader;

impl ItemLoader {
    /// Load an item catalog from a RON file.
    pub fn load(path: &Path) -> LoadResult<Vec<ItemDefinition>> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    /// Parse an item catalog from RON text.
    pub fn parse(content: &str) -> LoadResult<Vec<ItemDefinition>> {
        let catalog: ItemCatalog = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse item catalog RON: {}", e))?;
        Ok(catalog.items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use emberveil_core::{ItemCategory, ItemId};

    const CATALOG: &str = r#"(
        items: [
            (
                id: (1),
                name: "Wood",
                description: "A sturdy branch.",
                category: Material,
                stackable: true,
                max_stack: 99,
                recipe: None,
            ),
            (
                id: (20),
                name: "Hawk's Glasses",
                description: "Mended frames and lenses.",
                category: Crafted,
                stackable: false,
                max_stack: 1,
                recipe: Some((
                    ingredients: [
                        (item: (1), quantity: 2),
                        (item: (2), quantity: 1),
                    ],
                )),
            ),
        ],
    )"#;

    #[test]
    fn parses_a_catalog_with_recipes() {
        let items = ItemLoader::parse(CATALOG).unwrap();
        assert_eq!(items.len(), 2);

        let glasses = &items[1];
        assert_eq!(glasses.id, ItemId(20));
        assert_eq!(glasses.category, ItemCategory::Crafted);
        assert!(!glasses.stackable);
        let recipe = glasses.recipe.as_ref().unwrap();
        assert_eq!(recipe.ingredients.len(), 2);
        assert_eq!(recipe.ingredients[0].item, ItemId(1));
        assert_eq!(recipe.ingredients[0].quantity, 2);
    }

    #[test]
    fn load_reads_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("items.ron");
        std::fs::write(&path, CATALOG).unwrap();

        let items = ItemLoader::load(&path).unwrap();
        assert_eq!(items[0].name, "Wood");
    }

    #[test]
    fn missing_file_is_an_error() {
        assert!(ItemLoader::load(Path::new("/definitely/not/here.ron")).is_err());
    }
}
