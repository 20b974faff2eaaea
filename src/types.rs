//! Menu data model.
//!
//! Mirrors the static `menu.json` source: categories of items, each item
//! carrying its price as free-form text. Prices are never stored in
//! structured form; [`MenuItem::descriptor`] classifies on every call.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::fmt;

use crate::price::{classify, PriceDescriptor, PriceShape};

// ---------------------------------------------------------------------------
// Menu item
// ---------------------------------------------------------------------------

/// A single dish as authored in the menu file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuItem {
    pub id: u32,
    pub name: String,
    /// Free-form price text, e.g. `"Half 100 | Full 180"`.
    pub price: String,
    pub veg: bool,
}

impl MenuItem {
    /// Classify this item's price text.
    pub fn descriptor(&self) -> PriceDescriptor {
        classify(&self.price)
    }

    #[cfg(test)]
    pub fn sample(id: u32, name: &str, price: &str, veg: bool) -> Self {
        MenuItem {
            id,
            name: name.to_string(),
            price: price.to_string(),
            veg,
        }
    }
}

impl fmt::Display for MenuItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let marker = if self.veg { "veg" } else { "non-veg" };
        write!(f, "#{} {} [{}] ({})", self.id, self.name, self.price.trim(), marker)
    }
}

// ---------------------------------------------------------------------------
// Category
// ---------------------------------------------------------------------------

/// A navigable section of the menu ("Starters", "Omelettes", ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub items: Vec<MenuItem>,
}

impl Category {
    pub fn item(&self, id: u32) -> Option<&MenuItem> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn veg_count(&self) -> usize {
        self.items.iter().filter(|item| item.veg).count()
    }
}

// ---------------------------------------------------------------------------
// Menu
// ---------------------------------------------------------------------------

/// The whole menu, in display order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Menu {
    pub categories: Vec<Category>,
}

impl Menu {
    pub fn category(&self, id: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }

    /// Category to highlight first: `preferred` when present, else the first one.
    pub fn default_category(&self, preferred: Option<&str>) -> Option<&Category> {
        preferred
            .and_then(|id| self.category(id))
            .or_else(|| self.categories.first())
    }

    pub fn item_count(&self) -> usize {
        self.categories.iter().map(|c| c.items.len()).sum()
    }

    pub fn items(&self) -> impl Iterator<Item = &MenuItem> {
        self.categories.iter().flat_map(|c| c.items.iter())
    }

    pub fn veg_items(&self) -> impl Iterator<Item = &MenuItem> {
        self.items().filter(|item| item.veg)
    }

    /// How many items classify to each price shape.
    pub fn shape_counts(&self) -> BTreeMap<PriceShape, usize> {
        let mut counts = BTreeMap::new();
        for item in self.items() {
            *counts.entry(item.descriptor().shape()).or_insert(0) += 1;
        }
        counts
    }

    /// Check the structure of the menu file. Price text is never validated.
    pub fn validate(&self) -> Result<(), MenuError> {
        let mut seen_categories = HashSet::new();
        for category in &self.categories {
            if category.id.trim().is_empty() {
                return Err(MenuError::EmptyCategoryId(category.name.clone()));
            }
            if !seen_categories.insert(category.id.as_str()) {
                return Err(MenuError::DuplicateCategory(category.id.clone()));
            }

            let mut seen_items = HashSet::new();
            for item in &category.items {
                if !seen_items.insert(item.id) {
                    return Err(MenuError::DuplicateItem {
                        category: category.id.clone(),
                        item_id: item.id,
                    });
                }
            }
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Structural problems in the menu data.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum MenuError {
    #[error("Duplicate category id: {0}")]
    DuplicateCategory(String),

    #[error("Category \"{0}\" has an empty id")]
    EmptyCategoryId(String),

    #[error("Duplicate item id {item_id} in category {category}")]
    DuplicateItem { category: String, item_id: u32 },

    #[error("Category not found: {0}")]
    CategoryNotFound(String),
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_menu() -> Menu {
        Menu {
            categories: vec![
                Category {
                    id: "starter".into(),
                    name: "Starters".into(),
                    items: vec![
                        MenuItem::sample(1, "Veg Manchurian", "Half 90 | Full 160", true),
                        MenuItem::sample(2, "Chicken Lollipop", "₹220", false),
                    ],
                },
                Category {
                    id: "omelette".into(),
                    name: "Omelettes".into(),
                    items: vec![
                        MenuItem::sample(1, "Masala Omelette", "Oil | 60, Butter | 80", false),
                        MenuItem::sample(2, "Cheese Omelette", "Half: Oil | 70, Full: Butter | 130", false),
                        MenuItem::sample(3, "Bread Butter", "₹40 | ₹50", true),
                    ],
                },
            ],
        }
    }

    #[test]
    fn test_category_lookup() {
        let menu = sample_menu();
        assert_eq!(menu.category("omelette").unwrap().name, "Omelettes");
        assert!(menu.category("dessert").is_none());
    }

    #[test]
    fn test_default_category_prefers_configured() {
        let menu = sample_menu();
        assert_eq!(menu.default_category(Some("omelette")).unwrap().id, "omelette");
        assert_eq!(menu.default_category(Some("missing")).unwrap().id, "starter");
        assert_eq!(menu.default_category(None).unwrap().id, "starter");
        assert!(Menu::default().default_category(None).is_none());
    }

    #[test]
    fn test_counts() {
        let menu = sample_menu();
        assert_eq!(menu.item_count(), 5);
        assert_eq!(menu.veg_items().count(), 2);
        assert_eq!(menu.category("starter").unwrap().veg_count(), 1);
    }

    #[test]
    fn test_shape_counts() {
        let counts = sample_menu().shape_counts();
        assert_eq!(counts[&PriceShape::HalfFull], 1);
        assert_eq!(counts[&PriceShape::Single], 1);
        assert_eq!(counts[&PriceShape::Grouped], 1);
        assert_eq!(counts[&PriceShape::Complex], 1);
        assert_eq!(counts[&PriceShape::Simple], 1);
    }

    #[test]
    fn test_descriptor_recomputed_from_price_text() {
        let mut item = MenuItem::sample(9, "Fried Rice", "₹120", true);
        assert_eq!(item.descriptor().shape(), PriceShape::Single);
        item.price = "₹120 | ₹150".into();
        assert_eq!(item.descriptor().shape(), PriceShape::Simple);
    }

    #[test]
    fn test_validate_ok() {
        assert!(sample_menu().validate().is_ok());
    }

    #[test]
    fn test_validate_duplicate_category() {
        let mut menu = sample_menu();
        menu.categories[1].id = "starter".into();
        assert_eq!(
            menu.validate(),
            Err(MenuError::DuplicateCategory("starter".into()))
        );
    }

    #[test]
    fn test_validate_empty_category_id() {
        let mut menu = sample_menu();
        menu.categories[0].id = "  ".into();
        assert_eq!(
            menu.validate(),
            Err(MenuError::EmptyCategoryId("Starters".into()))
        );
    }

    #[test]
    fn test_validate_duplicate_item() {
        let mut menu = sample_menu();
        menu.categories[1].items[2].id = 1;
        assert_eq!(
            menu.validate(),
            Err(MenuError::DuplicateItem { category: "omelette".into(), item_id: 1 })
        );
    }

    #[test]
    fn test_item_ids_may_repeat_across_categories() {
        let menu = sample_menu();
        assert_eq!(menu.category("starter").unwrap().item(1).unwrap().name, "Veg Manchurian");
        assert_eq!(menu.category("omelette").unwrap().item(1).unwrap().name, "Masala Omelette");
    }

    #[test]
    fn test_item_display() {
        let item = MenuItem::sample(3, "Paneer Chilli", " ₹180 ", true);
        assert_eq!(item.to_string(), "#3 Paneer Chilli [₹180] (veg)");
    }

    #[test]
    fn test_menu_deserializes_without_items() {
        let menu: Menu =
            serde_json::from_str(r#"{"categories":[{"id":"soup","name":"Soups"}]}"#).unwrap();
        assert!(menu.categories[0].items.is_empty());
    }

    #[test]
    fn test_error_display() {
        let err = MenuError::DuplicateItem { category: "soup".into(), item_id: 4 };
        assert_eq!(err.to_string(), "Duplicate item id 4 in category soup");
    }
}
