use std::io::Write;

use bistro_order::models::menu::Menu;
use bistro_order::models::money::{Money, Pricing};
use bistro_order::models::notification::NotificationKind;
use bistro_order::services::{load_menu, OrderService, OrderServiceError};

#[test]
fn test_session_flow_against_house_menu() {
    let menu = Menu::house(&Pricing::default());
    let mut service = OrderService::default();

    for name in ["Burger", "Fries", "Burger"] {
        let update = service.select_menu_item(&menu, name).unwrap();
        let notification = update.notification.unwrap();
        assert_eq!(notification.kind, NotificationKind::Success);
        assert_eq!(notification.message, format!("Added {} to your order!", name));
    }

    let snapshot = service.snapshot();
    assert_eq!(snapshot.item_count, 3);
    assert_eq!(snapshot.subtotal, Money::from_cents(1900));
    assert_eq!(snapshot.tax, Money::from_cents(152));
    assert_eq!(snapshot.grand_total, Money::from_cents(2052));

    let fries = snapshot.lines[1].id;
    let update = service.remove_requested(&fries);
    let notification = update.notification.unwrap();
    assert_eq!(notification.kind, NotificationKind::Info);
    assert_eq!(notification.message, "Removed Fries from your order");
    assert_eq!(update.snapshot.item_count, 2);
    assert_eq!(update.snapshot.subtotal, Money::from_cents(1600));

    let placed = service.checkout_requested();
    assert_eq!(placed.notification.unwrap().kind, NotificationKind::Success);
    assert_eq!(placed.receipt.unwrap().order.item_count, 2);
    assert_eq!(service.snapshot().item_count, 0);

    let rejected = service.checkout_requested();
    assert_eq!(rejected.notification.unwrap().kind, NotificationKind::Error);
    assert!(rejected.receipt.is_none());
}

#[test]
fn test_configured_pricing_and_menu_file() {
    let pricing = Pricing::new(1000, "€");
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{"items": [
            {{"name": "Croissant", "category": "bakery", "price": "€2.40"}},
            {{"name": "Café", "category": "drinks", "price": "€1.80", "description": "Filter"}}
        ]}}"#
    )
    .unwrap();

    let menu = load_menu(Some(file.path()), &pricing).unwrap();
    assert_eq!(menu.categories(), vec!["bakery", "drinks"]);

    let mut service = OrderService::new(pricing);
    service.select_menu_item(&menu, "Croissant").unwrap();
    let update = service.select_menu_item(&menu, "Café").unwrap();

    assert_eq!(update.snapshot.subtotal, Money::from_cents(420));
    assert_eq!(update.snapshot.tax, Money::from_cents(42));
    assert_eq!(service.pricing().format(update.snapshot.grand_total), "€4.62");
}

#[test]
fn test_menu_price_with_other_symbol_is_rejected() {
    let mut service = OrderService::default();
    let result = service.select_item("Croissant", "€2.40");
    assert!(matches!(result, Err(OrderServiceError::CartError(_))));
    assert!(service.cart().is_empty());
}

#[test]
fn test_order_update_json_shape() {
    let mut service = OrderService::default();
    let update = service.select_item("Soda", "$2.00").unwrap();

    let json = serde_json::to_value(&update).unwrap();
    assert_eq!(json["snapshot"]["item_count"], 1);
    assert_eq!(json["notification"]["kind"], "success");
    assert!(json.get("receipt").is_none());
}
