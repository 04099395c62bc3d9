//! Menu catalog: categories and items.
//!
//! The catalog is read-only for the lifetime of the kiosk. The built-in
//! catalog matches the menu served by the web API; a different catalog can
//! be loaded from the same JSON shape.

use serde::{Deserialize, Serialize};

use crate::billing::BillingPolicy;

/// Glyph drawn on a category card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryIcon {
    Starters,
    Food,
    Dessert,
    Drinks,
}

/// A menu category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    pub icon: CategoryIcon,
}

/// A single orderable item. Prices are whole currency units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItem {
    pub id: u32,
    pub name: String,
    pub description: String,
    pub price: u32,
    /// Owning category id.
    pub category: String,
}

/// The full catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Menu {
    pub categories: Vec<Category>,
    pub items: Vec<MenuItem>,
}

/// Catalog loading failure.
#[derive(Debug, thiserror::Error)]
pub enum MenuError {
    #[error("invalid menu JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("item {item_id} references unknown category '{category}'")]
    UnknownCategory { item_id: u32, category: String },

    #[error("duplicate item id {0}")]
    DuplicateItem(u32),
}

const BUILTIN_CATEGORIES: &[(&str, &str, CategoryIcon)] = &[
    ("starters", "Starters", CategoryIcon::Starters),
    ("mains", "Main Course", CategoryIcon::Food),
    ("desserts", "Desserts", CategoryIcon::Dessert),
    ("beverages", "Beverages", CategoryIcon::Drinks),
];

const BUILTIN_ITEMS: &[(u32, &str, &str, u32, &str)] = &[
    (1, "Paneer Tikka", "Grilled cottage cheese with spices", 180, "starters"),
    (2, "Spring Rolls", "Crispy vegetable rolls", 120, "starters"),
    (3, "Mushroom Soup", "Creamy mushroom soup", 100, "starters"),
    (4, "Garlic Bread", "Toasted bread with garlic butter", 90, "starters"),
    (5, "Chicken Wings", "Spicy grilled chicken wings", 220, "starters"),
    (6, "Butter Chicken", "Rich tomato-based curry with chicken", 280, "mains"),
    (7, "Dal Makhani", "Black lentils in creamy gravy", 200, "mains"),
    (8, "Veg Biryani", "Fragrant rice with vegetables", 240, "mains"),
    (9, "Paneer Butter Masala", "Cottage cheese in rich gravy", 260, "mains"),
    (10, "Chicken Biryani", "Aromatic rice with chicken", 300, "mains"),
    (11, "Pasta Alfredo", "Creamy white sauce pasta", 250, "mains"),
    (12, "Gulab Jamun", "Sweet milk solid balls in syrup", 80, "desserts"),
    (13, "Ice Cream Sundae", "Vanilla ice cream with toppings", 120, "desserts"),
    (14, "Chocolate Brownie", "Warm chocolate brownie with ice cream", 140, "desserts"),
    (15, "Tiramisu", "Italian coffee-flavored dessert", 160, "desserts"),
    (16, "Fresh Lime Soda", "Refreshing lime drink", 60, "beverages"),
    (17, "Mango Shake", "Thick mango milkshake", 100, "beverages"),
    (18, "Cold Coffee", "Iced coffee with milk", 90, "beverages"),
    (19, "Masala Chai", "Traditional Indian spiced tea", 40, "beverages"),
    (20, "Fresh Fruit Juice", "Seasonal fruit juice", 80, "beverages"),
];

impl Menu {
    /// The restaurant's built-in catalog.
    pub fn builtin() -> Self {
        let categories = BUILTIN_CATEGORIES
            .iter()
            .map(|&(id, name, icon)| Category {
                id: id.to_string(),
                name: name.to_string(),
                icon,
            })
            .collect();
        let items = BUILTIN_ITEMS
            .iter()
            .map(|&(id, name, description, price, category)| MenuItem {
                id,
                name: name.to_string(),
                description: description.to_string(),
                price,
                category: category.to_string(),
            })
            .collect();
        Self { categories, items }
    }

    /// Load a catalog from JSON (`{"categories": [...], "items": [...]}`).
    ///
    /// Extra top-level keys such as `config` are ignored.
    pub fn from_json(json: &str) -> Result<Self, MenuError> {
        let menu: Menu = serde_json::from_str(json)?;
        menu.check()?;
        Ok(menu)
    }

    fn check(&self) -> Result<(), MenuError> {
        let mut seen = std::collections::HashSet::new();
        for item in &self.items {
            if !seen.insert(item.id) {
                return Err(MenuError::DuplicateItem(item.id));
            }
            if self.category(&item.category).is_none() {
                return Err(MenuError::UnknownCategory {
                    item_id: item.id,
                    category: item.category.clone(),
                });
            }
        }
        Ok(())
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn category(&self, id: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }

    /// Items of one category, in catalog order.
    pub fn items_in(&self, category_id: &str) -> Vec<&MenuItem> {
        self.items
            .iter()
            .filter(|item| item.category == category_id)
            .collect()
    }

    pub fn item(&self, id: u32) -> Option<&MenuItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// The catalog in the web API's `/api/menu` shape.
    pub fn to_api_json(&self, policy: &BillingPolicy) -> serde_json::Value {
        serde_json::json!({
            "categories": self.categories,
            "items": self.items,
            "config": {
                "restaurantName": policy.restaurant_name,
                "currencySymbol": policy.currency_symbol,
                "gstRate": policy.gst_rate,
            }
        })
    }
}
