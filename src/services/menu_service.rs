use std::path::Path;
use tracing::{debug, info};

use crate::models::{
    menu::{Menu, MenuError},
    money::Pricing,
};

/// Load the menu from `path`, or the house menu when no path is given.
/// Either way the menu is checked against `pricing`.
pub fn load_menu(path: Option<&Path>, pricing: &Pricing) -> Result<Menu, MenuError> {
    let menu = match path {
        Some(path) => {
            debug!("Loading menu from {}", path.display());
            Menu::from_path(path, pricing)?
        }
        None => {
            let menu = Menu::house(pricing);
            menu.validate(pricing)?;
            menu
        }
    };

    info!(
        "Menu loaded: {} items in {} categories",
        menu.items.len(),
        menu.categories().len()
    );
    Ok(menu)
}
