use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info, warn};
use uuid::Uuid;
use validator::Validate;

use crate::models::{
    cart::{AddItemRequest, Cart, CartError, CartSnapshot, CheckoutReceipt},
    menu::Menu,
    money::Pricing,
    notification::Notification,
};

#[derive(Error, Debug)]
pub enum OrderServiceError {
    #[error("Invalid item: {message}")]
    InvalidItem { message: String },

    #[error("Menu item not found: {name}")]
    MenuItemNotFound { name: String },

    #[error("Cart error: {0}")]
    CartError(#[from] CartError),
}

/// What the renderer needs after an order action.
#[derive(Debug, Clone, Serialize)]
pub struct OrderUpdate {
    pub snapshot: CartSnapshot,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notification: Option<Notification>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub receipt: Option<CheckoutReceipt>,
}

impl OrderUpdate {
    fn new(snapshot: CartSnapshot, notification: Option<Notification>) -> Self {
        Self {
            snapshot,
            notification,
            receipt: None,
        }
    }
}

/// Owns the session's cart and turns UI triggers into cart operations.
pub struct OrderService {
    cart: Cart,
}

impl OrderService {
    pub fn new(pricing: Pricing) -> Self {
        Self {
            cart: Cart::with_pricing(pricing),
        }
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn pricing(&self) -> &Pricing {
        self.cart.pricing()
    }

    pub fn snapshot(&self) -> CartSnapshot {
        self.cart.snapshot()
    }

    /// Handle an item picked from the menu with its display price.
    pub fn select_item(&mut self, name: &str, price_text: &str) -> Result<OrderUpdate, OrderServiceError> {
        let request = AddItemRequest::new(name, price_text);
        request
            .validate()
            .map_err(|e| OrderServiceError::InvalidItem {
                message: format!("Add item validation failed: {}", e),
            })?;

        let unit_price = self.cart.pricing().parse(&request.price_text)?;
        let snapshot = self.cart.add_item(&request.name, unit_price)?;

        info!(
            "Added '{}' at {} ({} items in order)",
            request.name,
            self.cart.pricing().format(unit_price),
            snapshot.item_count
        );

        let notification = Notification::item_added(&request.name);
        Ok(OrderUpdate::new(snapshot, Some(notification)))
    }

    /// Look up `name` on the menu and order it at the menu's price.
    pub fn select_menu_item(&mut self, menu: &Menu, name: &str) -> Result<OrderUpdate, OrderServiceError> {
        let item = menu.find(name).ok_or_else(|| {
            warn!("Menu item not found: {}", name);
            OrderServiceError::MenuItemNotFound {
                name: name.trim().to_string(),
            }
        })?;

        self.select_item(&item.name, &item.price)
    }

    pub fn remove_requested(&mut self, id: &Uuid) -> OrderUpdate {
        let removed = self.cart.get(id).map(|line| line.name.clone());
        let snapshot = self.cart.remove_item(id);

        match removed {
            Some(name) => {
                info!("Removed '{}' from order", name);
                OrderUpdate::new(snapshot, Some(Notification::item_removed(&name)))
            }
            None => {
                debug!("Remove requested for unknown line {}", id);
                OrderUpdate::new(snapshot, None)
            }
        }
    }

    /// Place the order. An empty cart is reported through the notification.
    pub fn checkout_requested(&mut self) -> OrderUpdate {
        match self.cart.checkout() {
            Ok(receipt) => {
                info!(
                    "Order {} placed: {} items, total {}",
                    receipt.order_id,
                    receipt.order.item_count,
                    self.cart.pricing().format(receipt.order.grand_total)
                );
                OrderUpdate {
                    snapshot: self.cart.snapshot(),
                    notification: Some(Notification::order_placed()),
                    receipt: Some(receipt),
                }
            }
            Err(e) => {
                warn!("Checkout rejected: {}", e);
                OrderUpdate::new(self.cart.snapshot(), Some(Notification::cart_empty()))
            }
        }
    }
}

impl Default for OrderService {
    fn default() -> Self {
        Self::new(Pricing::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{money::Money, notification::NotificationKind};

    #[test]
    fn test_select_item_parses_price_text() {
        let mut service = OrderService::default();
        let update = service.select_item("Burger", "$8.00").unwrap();

        assert_eq!(update.snapshot.item_count, 1);
        assert_eq!(update.snapshot.lines[0].unit_price, Money::from_cents(800));
        assert_eq!(
            update.notification,
            Some(Notification::item_added("Burger"))
        );
        assert!(update.receipt.is_none());
    }

    #[test]
    fn test_select_item_rejects_bad_input() {
        let mut service = OrderService::default();

        let blank = service.select_item("  ", "$1.00");
        assert!(matches!(blank, Err(OrderServiceError::InvalidItem { .. })));

        let negative = service.select_item("Soup", "-$1.00");
        assert!(matches!(
            negative,
            Err(OrderServiceError::CartError(CartError::InvalidArgument { .. }))
        ));

        let missing_price = service.select_item("Soup", "");
        assert!(matches!(missing_price, Err(OrderServiceError::InvalidItem { .. })));

        assert!(service.cart().is_empty());
    }

    #[test]
    fn test_select_menu_item() {
        let menu = Menu::house(&Pricing::default());
        let mut service = OrderService::default();

        let update = service.select_menu_item(&menu, "fries").unwrap();
        assert_eq!(update.snapshot.lines[0].name, "Fries");
        assert_eq!(update.snapshot.subtotal, Money::from_cents(300));

        let missing = service.select_menu_item(&menu, "Lobster");
        assert!(matches!(missing, Err(OrderServiceError::MenuItemNotFound { ref name }) if name == "Lobster"));
    }

    #[test]
    fn test_select_item_rejects_oversized_prices() {
        let mut service = OrderService::default();

        let result = service.select_item("Caviar", "$180000000000000000");
        assert!(matches!(
            result,
            Err(OrderServiceError::CartError(CartError::InvalidArgument { .. }))
        ));
        assert!(service.cart().is_empty());

        let update = service.select_item("Caviar", "$1000000.00").unwrap();
        assert_eq!(update.snapshot.subtotal, Money::from_cents(100_000_000));
        assert_eq!(update.snapshot.tax, Money::from_cents(8_000_000));
    }

    #[test]
    fn test_select_item_keeps_name_as_given() {
        let mut service = OrderService::default();
        service.select_item("Burger", "$8.00").unwrap();
        let update = service.select_item("Burger ", "$8.00").unwrap();

        assert_eq!(update.snapshot.lines.len(), 2);
        assert_eq!(update.notification, Some(Notification::item_added("Burger ")));
    }

    #[test]
    fn test_remove_requested_notifies_only_when_found() {
        let mut service = OrderService::default();
        service.select_item("Soda", "$2.00").unwrap();
        let id = service.snapshot().lines[0].id;

        let update = service.remove_requested(&id);
        assert_eq!(update.notification, Some(Notification::item_removed("Soda")));
        assert_eq!(update.snapshot.item_count, 0);
        assert_eq!(update.snapshot.subtotal, Money::ZERO);

        let again = service.remove_requested(&id);
        assert!(again.notification.is_none());
        assert_eq!(again.snapshot, update.snapshot);
    }

    #[test]
    fn test_checkout_requested_on_empty_cart() {
        let mut service = OrderService::default();
        let update = service.checkout_requested();

        let notification = update.notification.unwrap();
        assert_eq!(notification.kind, NotificationKind::Error);
        assert_eq!(notification.message, "Your cart is empty. Add some items first!");
        assert!(update.receipt.is_none());
        assert!(update.snapshot.is_empty());
    }

    #[test]
    fn test_checkout_requested_places_order() {
        let mut service = OrderService::default();
        service.select_item("Burger", "$8.00").unwrap();
        service.select_item("Fries", "$3.00").unwrap();
        service.select_item("Burger", "$8.00").unwrap();

        let update = service.checkout_requested();
        assert_eq!(update.notification, Some(Notification::order_placed()));

        let receipt = update.receipt.unwrap();
        assert_eq!(receipt.order.item_count, 3);
        assert_eq!(receipt.order.grand_total, Money::from_cents(2052));
        assert!(update.snapshot.is_empty());
        assert_eq!(update.snapshot.grand_total, Money::ZERO);
    }
}
