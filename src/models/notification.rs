use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Success,
    Error,
    Info,
}

impl std::fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NotificationKind::Success => write!(f, "success"),
            NotificationKind::Error => write!(f, "error"),
            NotificationKind::Info => write!(f, "info"),
        }
    }
}

/// User-facing message produced by an order action.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
}

impl Notification {
    pub fn new(kind: NotificationKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn item_added(name: &str) -> Self {
        Self::new(NotificationKind::Success, format!("Added {} to your order!", name))
    }

    pub fn item_removed(name: &str) -> Self {
        Self::new(NotificationKind::Info, format!("Removed {} from your order", name))
    }

    pub fn order_placed() -> Self {
        Self::new(
            NotificationKind::Success,
            "Order placed successfully! Your food will be ready soon.",
        )
    }

    pub fn reservation_received(name: &str, date: &str, time: &str) -> Self {
        Self::new(
            NotificationKind::Success,
            format!(
                "Thank you, {}! Your reservation for {} at {} has been received. We will confirm shortly.",
                name, date, time
            ),
        )
    }

    pub fn cart_empty() -> Self {
        Self::new(
            NotificationKind::Error,
            "Your cart is empty. Add some items first!",
        )
    }
}
