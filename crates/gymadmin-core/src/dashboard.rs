//! Aggregate figures for the dashboard overview

use crate::types::{
    Order, OrderStatus, Product, Role, Subscription, SubscriptionStatus, User, UserStatus,
};
use indexmap::IndexMap;
use rust_decimal::Decimal;
use serde::Serialize;

/// Headline numbers computed from already-fetched collections
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DashboardSummary {
    /// All accounts
    pub total_users: usize,
    /// Active accounts with the member role
    pub active_members: usize,
    /// Subscriptions in the active state
    pub active_subscriptions: usize,
    /// Sum of order totals, excluding canceled orders
    pub total_revenue: Decimal,
    /// Order count per status, every status present, in pipeline order
    pub orders_by_status: IndexMap<OrderStatus, usize>,
    /// Products with stock below the threshold
    pub low_stock: Vec<LowStockProduct>,
}

/// A product that needs restocking
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct LowStockProduct {
    /// Product id
    pub id: String,
    /// Product name
    pub name: String,
    /// Units left
    pub stock_quantity: u32,
}

impl DashboardSummary {
    /// Compute the summary
    pub fn compute(
        users: &[User],
        subscriptions: &[Subscription],
        orders: &[Order],
        products: &[Product],
        low_stock_threshold: u32,
    ) -> Self {
        let active_members = users
            .iter()
            .filter(|u| u.role == Role::Member && u.status == UserStatus::Active)
            .count();

        let active_subscriptions = subscriptions
            .iter()
            .filter(|s| s.status == SubscriptionStatus::Active)
            .count();

        let mut orders_by_status: IndexMap<OrderStatus, usize> =
            OrderStatus::ALL.iter().map(|s| (*s, 0)).collect();
        let mut total_revenue = Decimal::ZERO;
        for order in orders {
            *orders_by_status.entry(order.status).or_insert(0) += 1;
            if order.status != OrderStatus::Canceled {
                total_revenue += order.total_amount;
            }
        }

        let low_stock = products
            .iter()
            .filter(|p| p.stock_quantity < low_stock_threshold)
            .map(|p| LowStockProduct {
                id: p.id.clone(),
                name: p.name.clone(),
                stock_quantity: p.stock_quantity,
            })
            .collect();

        Self {
            total_users: users.len(),
            active_members,
            active_subscriptions,
            total_revenue,
            orders_by_status,
            low_stock,
        }
    }
}
