use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;
use validator::Validate;

use crate::models::money::{Money, Pricing};

pub const ALL_CATEGORIES: &str = "all";

#[derive(Debug, Error)]
pub enum MenuError {
    #[error("Failed to read menu file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse menu file: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid menu item '{name}': {message}")]
    InvalidItem { name: String, message: String },

    #[error("Menu has no items")]
    Empty,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct MenuItem {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: String,

    #[validate(length(min = 1, max = 50, message = "Category must be 1-50 characters"))]
    pub category: String,

    /// Display price, e.g. `"$8.00"`.
    pub price: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl MenuItem {
    pub fn new(name: &str, category: &str, price: &str, description: Option<&str>) -> Self {
        Self {
            name: name.to_string(),
            category: category.to_string(),
            price: price.to_string(),
            description: description.map(str::to_string),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Menu {
    pub items: Vec<MenuItem>,
}

impl Menu {
    pub fn new(items: Vec<MenuItem>) -> Self {
        Self { items }
    }

    /// The house menu used when no menu file is configured, priced in the
    /// configured currency.
    pub fn house(pricing: &Pricing) -> Self {
        let price = |cents| pricing.format(Money::from_cents(cents));
        Self::new(vec![
            MenuItem::new("Bruschetta", "starters", &price(750), Some("Grilled bread, tomato, basil")),
            MenuItem::new("Garlic Bread", "starters", &price(500), None),
            MenuItem::new("Burger", "mains", &price(800), Some("Beef patty, cheddar, pickles")),
            MenuItem::new("Margherita Pizza", "mains", &price(1200), Some("Tomato, mozzarella, basil")),
            MenuItem::new("Grilled Salmon", "mains", &price(1850), Some("With lemon butter")),
            MenuItem::new("Fries", "sides", &price(300), None),
            MenuItem::new("House Salad", "sides", &price(450), None),
            MenuItem::new("Tiramisu", "desserts", &price(650), None),
            MenuItem::new("Chocolate Cake", "desserts", &price(550), None),
            MenuItem::new("Soda", "drinks", &price(200), None),
            MenuItem::new("Lemonade", "drinks", &price(350), Some("Freshly squeezed")),
            MenuItem::new("Espresso", "drinks", &price(250), None),
        ])
    }

    pub fn from_path(path: impl AsRef<Path>, pricing: &Pricing) -> Result<Self, MenuError> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        let menu: Menu = serde_json::from_str(&raw)?;
        menu.validate(pricing)?;
        Ok(menu)
    }

    /// Every item needs a name, a category and a price that parses.
    pub fn validate(&self, pricing: &Pricing) -> Result<(), MenuError> {
        if self.items.is_empty() {
            return Err(MenuError::Empty);
        }

        for item in &self.items {
            Validate::validate(item).map_err(|e| MenuError::InvalidItem {
                name: item.name.clone(),
                message: e.to_string(),
            })?;
            pricing.parse(&item.price).map_err(|e| MenuError::InvalidItem {
                name: item.name.clone(),
                message: e.to_string(),
            })?;
        }

        Ok(())
    }

    /// Items in `category`, or all items for `None` / `"all"`.
    pub fn filter(&self, category: Option<&str>) -> Vec<&MenuItem> {
        match category {
            None => self.items.iter().collect(),
            Some(c) if c.eq_ignore_ascii_case(ALL_CATEGORIES) => self.items.iter().collect(),
            Some(c) => self
                .items
                .iter()
                .filter(|item| item.category.eq_ignore_ascii_case(c))
                .collect(),
        }
    }

    pub fn find(&self, name: &str) -> Option<&MenuItem> {
        let name = name.trim();
        self.items
            .iter()
            .find(|item| item.name == name)
            .or_else(|| self.items.iter().find(|item| item.name.eq_ignore_ascii_case(name)))
    }

    pub fn categories(&self) -> Vec<&str> {
        let mut categories: Vec<&str> = Vec::new();
        for item in &self.items {
            if !categories.contains(&item.category.as_str()) {
                categories.push(&item.category);
            }
        }
        categories
    }
}
