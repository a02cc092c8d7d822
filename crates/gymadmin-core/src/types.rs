//! Core entity types for the gym admin toolkit
//!
//! Field names follow the backend's camelCase JSON. Ids are opaque strings;
//! documents that arrive with a Mongo-style `_id` are accepted as well.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Generates `as_str`, `Display`, `FromStr` and `ALL` for a lowercase wire enum
macro_rules! wire_enum {
    ($name:ident { $($variant:ident => $text:literal),+ $(,)? }) => {
        impl $name {
            /// Every variant, in declaration order
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            /// Lowercase wire representation
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $text),+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = crate::Error;

            fn from_str(s: &str) -> crate::Result<Self> {
                match s.trim().to_ascii_lowercase().as_str() {
                    $($text => Ok(Self::$variant),)+
                    other => Err(crate::Error::validation(
                        stringify!($name),
                        format!("unknown value '{other}'"),
                    )),
                }
            }
        }
    };
}

/// Account role
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Staff with access to the admin tools
    Admin,
    /// Gym member
    Member,
    /// Shop customer
    #[default]
    Customer,
}

wire_enum!(Role {
    Admin => "admin",
    Member => "member",
    Customer => "customer",
});

/// Account status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum UserStatus {
    /// Active account
    #[default]
    Active,
    /// Deactivated account
    Inactive,
    /// Suspended by staff
    Suspended,
}

wire_enum!(UserStatus {
    Active => "active",
    Inactive => "inactive",
    Suspended => "suspended",
});

/// A platform account
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Backend identifier
    #[serde(alias = "_id", default)]
    pub id: String,
    /// Display name
    pub name: String,
    /// Login email
    pub email: String,
    /// Account role
    #[serde(default)]
    pub role: Role,
    /// Account status
    #[serde(default)]
    pub status: UserStatus,
    /// Contact phone
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// Creation time
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    /// Last update time
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// A membership plan offered by the gym
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MembershipPlan {
    /// Backend identifier
    #[serde(alias = "_id", default)]
    pub id: String,
    /// Plan name
    pub name: String,
    /// Price per billing period
    pub price: Decimal,
    /// Duration in months
    pub duration: u32,
    /// Marketing description
    #[serde(default)]
    pub description: String,
    /// Included features
    #[serde(default)]
    pub features: Vec<String>,
    /// Number of subscriptions currently active on this plan
    #[serde(default)]
    pub active_subscriptions: u32,
}

/// Subscription lifecycle status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionStatus {
    /// Currently running
    Active,
    /// Ran past its end date
    Expired,
    /// Canceled by the member or staff
    Canceled,
    /// Awaiting first payment
    #[default]
    Pending,
}

wire_enum!(SubscriptionStatus {
    Active => "active",
    Expired => "expired",
    Canceled => "canceled",
    Pending => "pending",
});

/// Payment status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    /// Settled
    Paid,
    /// Not yet settled
    #[default]
    Pending,
    /// Declined
    Failed,
    /// Returned to the payer
    Refunded,
}

wire_enum!(PaymentStatus {
    Paid => "paid",
    Pending => "pending",
    Failed => "failed",
    Refunded => "refunded",
});

/// A single payment made against a subscription
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    /// Backend identifier
    #[serde(alias = "_id", default)]
    pub id: String,
    /// Amount charged
    pub amount: Decimal,
    /// Payment date
    pub date: NaiveDate,
    /// Settlement status
    #[serde(default)]
    pub status: PaymentStatus,
    /// Payment method label (card, cash, ...)
    #[serde(default)]
    pub method: String,
}

/// User fields embedded in subscriptions and orders
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    /// Backend identifier
    #[serde(alias = "_id", default)]
    pub id: String,
    /// Display name
    #[serde(default)]
    pub name: String,
    /// Email
    #[serde(default)]
    pub email: String,
}

/// Plan fields embedded in subscriptions
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct PlanSummary {
    /// Backend identifier
    #[serde(alias = "_id", default)]
    pub id: String,
    /// Plan name
    #[serde(default)]
    pub name: String,
    /// Price
    #[serde(default)]
    pub price: Decimal,
    /// Duration in months
    #[serde(default)]
    pub duration: u32,
}

/// A member's subscription to a plan
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Subscription {
    /// Backend identifier
    #[serde(alias = "_id", default)]
    pub id: String,
    /// Subscribed member
    pub user: UserSummary,
    /// Subscribed plan
    pub plan: PlanSummary,
    /// First day of the subscription
    pub start_date: NaiveDate,
    /// Last day of the subscription
    pub end_date: NaiveDate,
    /// Lifecycle status
    #[serde(default)]
    pub status: SubscriptionStatus,
    /// Payment method label
    #[serde(default)]
    pub payment_method: String,
    /// Whether the subscription renews automatically
    #[serde(default)]
    pub auto_renew: bool,
    /// Payment history, oldest first
    #[serde(default)]
    pub payments: Vec<Payment>,
}

/// Product color
///
/// Older product documents store a bare color name, newer ones an object
/// with an optional hex code. Both deserialize into this type.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum Color {
    /// Legacy form: just the name
    Named(String),
    /// Object form
    Detailed {
        /// Color name
        name: String,
        /// Hex code such as `#ff0000`
        #[serde(default, skip_serializing_if = "Option::is_none")]
        hex: Option<String>,
    },
}

impl Color {
    /// Color name regardless of form
    pub fn name(&self) -> &str {
        match self {
            Self::Named(name) | Self::Detailed { name, .. } => name,
        }
    }

    /// Hex code, only available in the object form
    pub fn hex(&self) -> Option<&str> {
        match self {
            Self::Named(_) => None,
            Self::Detailed { hex, .. } => hex.as_deref(),
        }
    }

    /// Convert to the object form
    #[must_use]
    pub fn normalized(self) -> Self {
        match self {
            Self::Named(name) => Self::Detailed { name, hex: None },
            detailed @ Self::Detailed { .. } => detailed,
        }
    }
}

/// A shop product
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Backend identifier
    #[serde(alias = "_id", default)]
    pub id: String,
    /// Product name
    pub name: String,
    /// Description
    #[serde(default)]
    pub description: String,
    /// Unit price
    pub price: Decimal,
    /// Category name
    #[serde(default)]
    pub category: String,
    /// Units in stock
    #[serde(default)]
    pub stock_quantity: u32,
    /// Available sizes
    #[serde(default)]
    pub sizes: Vec<String>,
    /// Available colors
    #[serde(default)]
    pub colors: Vec<Color>,
    /// Image URLs
    #[serde(default)]
    pub images: Vec<String>,
    /// Average rating, 0 to 5
    #[serde(default)]
    pub rating: f32,
    /// Shown on the storefront landing page
    #[serde(default)]
    pub featured: bool,
}

/// A product category
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    /// Backend identifier
    #[serde(alias = "_id", default)]
    pub id: String,
    /// Category name
    pub name: String,
    /// URL slug
    #[serde(default)]
    pub slug: String,
    /// Description
    #[serde(default)]
    pub description: String,
}

/// Order fulfilment status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    /// Placed, not yet handled
    #[default]
    Pending,
    /// Being packed
    Processing,
    /// Handed to the carrier
    Shipped,
    /// Received by the customer
    Delivered,
    /// Canceled before shipping
    Canceled,
}

wire_enum!(OrderStatus {
    Pending => "pending",
    Processing => "processing",
    Shipped => "shipped",
    Delivered => "delivered",
    Canceled => "canceled",
});

/// One line of an order
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    /// Ordered product
    #[serde(alias = "product")]
    pub product_id: String,
    /// Product name at the time of ordering
    #[serde(default)]
    pub name: String,
    /// Quantity
    pub quantity: u32,
    /// Unit price at the time of ordering
    pub price: Decimal,
}

impl OrderItem {
    /// Quantity times unit price
    pub fn line_total(&self) -> Decimal {
        self.price * Decimal::from(self.quantity)
    }
}

/// Delivery address
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct ShippingAddress {
    /// Street and number
    pub street: String,
    /// City
    pub city: String,
    /// State or region
    pub state: String,
    /// Postal code
    pub postal_code: String,
    /// Country
    pub country: String,
}

/// A shop order
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// Backend identifier
    #[serde(alias = "_id", default)]
    pub id: String,
    /// Ordering customer
    pub user: UserSummary,
    /// Order lines
    #[serde(default)]
    pub items: Vec<OrderItem>,
    /// Order total as charged
    pub total_amount: Decimal,
    /// Fulfilment status
    #[serde(default)]
    pub status: OrderStatus,
    /// Payment status
    #[serde(default)]
    pub payment_status: PaymentStatus,
    /// Delivery address
    #[serde(default)]
    pub shipping_address: ShippingAddress,
    /// Carrier tracking number
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tracking_number: Option<String>,
    /// Time the order was placed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Order {
    /// Sum of the order lines, which may differ from `total_amount` when
    /// shipping or discounts were applied
    pub fn items_total(&self) -> Decimal {
        self.items.iter().map(OrderItem::line_total).sum()
    }
}
