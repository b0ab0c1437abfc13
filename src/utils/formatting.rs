use chrono::{DateTime, Local, Utc};
use console::{style, Emoji};
use tabled::{Table, Tabled, settings::{Style, Alignment}};

use crate::models::{
    cart::{CartSnapshot, CheckoutReceipt},
    menu::MenuItem,
    money::Pricing,
    notification::{Notification, NotificationKind},
};

pub static CHECKMARK: Emoji<'_, '_> = Emoji("✅ ", "");
pub static CROSS: Emoji<'_, '_> = Emoji("❌ ", "");
pub static INFO: Emoji<'_, '_> = Emoji("ℹ️ ", "");
pub static CART: Emoji<'_, '_> = Emoji("🛒 ", "");

#[derive(Tabled)]
struct MenuTableRow {
    #[tabled(rename = "Item")]
    name: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Price")]
    price: String,
    #[tabled(rename = "Description")]
    description: String,
}

#[derive(Tabled)]
struct OrderTableRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Item")]
    name: String,
    #[tabled(rename = "Qty")]
    quantity: u32,
    #[tabled(rename = "Total")]
    line_total: String,
}

pub fn format_menu_table(items: &[&MenuItem]) -> String {
    if items.is_empty() {
        return String::new();
    }

    let rows: Vec<MenuTableRow> = items
        .iter()
        .map(|item| MenuTableRow {
            name: item.name.clone(),
            category: item.category.clone(),
            price: item.price.clone(),
            description: match &item.description {
                Some(d) if d.chars().count() > 40 => {
                    format!("{}...", d.chars().take(37).collect::<String>())
                }
                Some(d) => d.clone(),
                None => "-".to_string(),
            },
        })
        .collect();

    let mut table = Table::new(rows);
    table
        .with(Style::rounded())
        .with(Alignment::left());

    table.to_string()
}

pub fn format_order_table(snapshot: &CartSnapshot, pricing: &Pricing) -> String {
    if snapshot.is_empty() {
        return String::new();
    }

    let rows: Vec<OrderTableRow> = snapshot
        .lines
        .iter()
        .map(|line| OrderTableRow {
            id: format!("{:.8}", line.id.to_string()),
            name: line.name.clone(),
            quantity: line.quantity,
            line_total: pricing.format(line.line_total),
        })
        .collect();

    let mut table = Table::new(rows);
    table
        .with(Style::rounded())
        .with(Alignment::left());

    table.to_string()
}

/// Item count, line table and totals, as shown in the order panel.
pub fn format_order_summary(snapshot: &CartSnapshot, pricing: &Pricing) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "{}{}: {}\n",
        CART,
        style("Items").bold(),
        style(snapshot.item_count).cyan()
    ));

    if snapshot.is_empty() {
        output.push_str(&format!("{}\n", style("Your order is empty").dim()));
    } else {
        output.push_str(&format_order_table(snapshot, pricing));
        output.push('\n');
    }

    output.push_str(&format!("{}: {}\n", style("Subtotal").bold(), pricing.format(snapshot.subtotal)));
    output.push_str(&format!("{}: {}\n", style("Tax").bold(), pricing.format(snapshot.tax)));
    output.push_str(&format!(
        "{}: {}\n",
        style("Total").bold(),
        style(pricing.format(snapshot.grand_total)).green()
    ));

    output
}

pub fn format_receipt(receipt: &CheckoutReceipt, pricing: &Pricing) -> String {
    let mut output = String::new();

    output.push_str(&format!("{}: {}\n", style("Order").bold(), style(&receipt.order_id).cyan()));
    output.push_str(&format!("{}: {}\n", style("Placed").bold(), style(format_date(&receipt.placed_at)).dim()));
    output.push_str(&format_order_summary(&receipt.order, pricing));

    output
}

pub fn format_notification(notification: &Notification) -> String {
    match notification.kind {
        NotificationKind::Success => format!("{}{}", CHECKMARK, style(&notification.message).green()),
        NotificationKind::Error => format!("{}{}", CROSS, style(&notification.message).red()),
        NotificationKind::Info => format!("{}{}", INFO, style(&notification.message).cyan()),
    }
}

pub fn format_date(dt: &DateTime<Utc>) -> String {
    dt.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{cart::Cart, menu::Menu, money::Money};

    #[test]
    fn test_empty_order_summary() {
        let summary = format_order_summary(&Cart::new().snapshot(), &Pricing::default());
        assert!(summary.contains("Your order is empty"));
        assert!(summary.contains("$0.00"));
        assert!(!summary.contains("Qty"));
    }

    #[test]
    fn test_order_summary_lists_lines_and_totals() {
        let mut cart = Cart::new();
        cart.add_item("Burger", Money::from_cents(800)).unwrap();
        cart.add_item("Fries", Money::from_cents(300)).unwrap();
        cart.add_item("Burger", Money::from_cents(800)).unwrap();

        let snapshot = cart.snapshot();
        let summary = format_order_summary(&snapshot, cart.pricing());
        assert!(summary.contains("Burger"));
        assert!(summary.contains("$16.00"));
        assert!(summary.contains("$19.00"));
        assert!(summary.contains("$1.52"));
        assert!(summary.contains("$20.52"));
        assert!(summary.contains(&snapshot.lines[0].id.to_string()[..8]));
    }

    #[test]
    fn test_menu_table_truncates_long_descriptions() {
        let long = "a".repeat(60);
        let item = MenuItem::new("Platter", "mains", "$20.00", Some(&long));
        let table = format_menu_table(&[&item]);
        assert!(table.contains("Platter"));
        assert!(table.contains(&format!("{}...", "a".repeat(37))));
        assert!(!table.contains(&long));

        assert!(format_menu_table(&[]).is_empty());
        assert!(format_menu_table(&Menu::house(&Pricing::default()).filter(None)).contains("Espresso"));
    }

    #[test]
    fn test_notification_keeps_message() {
        let text = format_notification(&Notification::cart_empty());
        assert!(text.contains("Your cart is empty. Add some items first!"));
    }
}
