//! [`Filterable`] for the platform entities
//!
//! | entity       | search                         | status | category | role | date         |
//! |--------------|--------------------------------|--------|----------|------|--------------|
//! | user         | name, email, phone             | yes    |          | yes  | created      |
//! | plan         | name, description              |        |          |      |              |
//! | subscription | member name/email, plan name   | yes    | plan id  |      | start date   |
//! | product      | name, description, category    |        | yes      |      |              |
//! | order        | id, customer name/email, track | yes    |          |      | placed       |
//! | category     | name, slug, description        |        |          |      |              |

use crate::filter::Filterable;
use crate::sort::SortValue;
use chrono::NaiveDate;
use gymadmin_core::types::{Category, MembershipPlan, Order, Product, Subscription, User};
use rust_decimal::Decimal;

fn text(value: &str) -> SortValue {
    SortValue::Text(value.to_lowercase())
}

fn date(value: Option<NaiveDate>) -> SortValue {
    value.map_or(SortValue::Missing, SortValue::Date)
}

impl Filterable for User {
    const ENTITY: &'static str = "user";
    const SORT_KEYS: &'static [&'static str] = &["name", "email", "role", "status", "created"];

    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.name.as_str(), self.email.as_str()];
        fields.extend(self.phone.as_deref());
        fields
    }

    fn status_key(&self) -> Option<&str> {
        Some(self.status.as_str())
    }

    fn role_key(&self) -> Option<&str> {
        Some(self.role.as_str())
    }

    fn date_key(&self) -> Option<NaiveDate> {
        self.created_at.map(|t| t.date_naive())
    }

    fn sort_value(&self, key: &str) -> Option<SortValue> {
        match key {
            "name" => Some(text(&self.name)),
            "email" => Some(text(&self.email)),
            "role" => Some(text(self.role.as_str())),
            "status" => Some(text(self.status.as_str())),
            "created" => Some(date(self.date_key())),
            _ => None,
        }
    }
}

impl Filterable for MembershipPlan {
    const ENTITY: &'static str = "plan";
    const SORT_KEYS: &'static [&'static str] = &["name", "price", "duration", "subscribers"];

    fn search_fields(&self) -> Vec<&str> {
        vec![self.name.as_str(), self.description.as_str()]
    }

    fn sort_value(&self, key: &str) -> Option<SortValue> {
        match key {
            "name" => Some(text(&self.name)),
            "price" => Some(SortValue::Number(self.price)),
            "duration" => Some(SortValue::Number(Decimal::from(self.duration))),
            "subscribers" => Some(SortValue::Number(Decimal::from(self.active_subscriptions))),
            _ => None,
        }
    }
}

impl Filterable for Subscription {
    const ENTITY: &'static str = "subscription";
    const SORT_KEYS: &'static [&'static str] = &["member", "plan", "start", "end", "status"];

    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.user.name.as_str(),
            self.user.email.as_str(),
            self.plan.name.as_str(),
        ]
    }

    fn status_key(&self) -> Option<&str> {
        Some(self.status.as_str())
    }

    fn category_key(&self) -> Option<&str> {
        Some(self.plan.id.as_str())
    }

    fn date_key(&self) -> Option<NaiveDate> {
        Some(self.start_date)
    }

    fn sort_value(&self, key: &str) -> Option<SortValue> {
        match key {
            "member" => Some(text(&self.user.name)),
            "plan" => Some(text(&self.plan.name)),
            "start" => Some(SortValue::Date(self.start_date)),
            "end" => Some(SortValue::Date(self.end_date)),
            "status" => Some(text(self.status.as_str())),
            _ => None,
        }
    }
}

impl Filterable for Product {
    const ENTITY: &'static str = "product";
    const SORT_KEYS: &'static [&'static str] = &["name", "price", "stock", "rating", "category"];

    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.name.as_str(),
            self.description.as_str(),
            self.category.as_str(),
        ]
    }

    fn category_key(&self) -> Option<&str> {
        Some(self.category.as_str())
    }

    fn sort_value(&self, key: &str) -> Option<SortValue> {
        match key {
            "name" => Some(text(&self.name)),
            "price" => Some(SortValue::Number(self.price)),
            "stock" => Some(SortValue::Number(Decimal::from(self.stock_quantity))),
            "rating" => Some(
                Decimal::try_from(self.rating).map_or(SortValue::Missing, SortValue::Number),
            ),
            "category" => Some(text(&self.category)),
            _ => None,
        }
    }
}

impl Filterable for Order {
    const ENTITY: &'static str = "order";
    const SORT_KEYS: &'static [&'static str] = &["date", "total", "status", "customer"];

    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![
            self.id.as_str(),
            self.user.name.as_str(),
            self.user.email.as_str(),
        ];
        fields.extend(self.tracking_number.as_deref());
        fields
    }

    fn status_key(&self) -> Option<&str> {
        Some(self.status.as_str())
    }

    fn date_key(&self) -> Option<NaiveDate> {
        self.created_at.map(|t| t.date_naive())
    }

    fn sort_value(&self, key: &str) -> Option<SortValue> {
        match key {
            "date" => Some(date(self.date_key())),
            "total" => Some(SortValue::Number(self.total_amount)),
            "status" => Some(text(self.status.as_str())),
            "customer" => Some(text(&self.user.name)),
            _ => None,
        }
    }
}

impl Filterable for Category {
    const ENTITY: &'static str = "category";
    const SORT_KEYS: &'static [&'static str] = &["name"];

    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.name.as_str(),
            self.slug.as_str(),
            self.description.as_str(),
        ]
    }

    fn sort_value(&self, key: &str) -> Option<SortValue> {
        (key == "name").then(|| text(&self.name))
    }
}
