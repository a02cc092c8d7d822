//! Filter criteria and the trait entities implement to be filtered

use crate::error::{ListingError, ListingResult};
use crate::sort::SortValue;
use chrono::NaiveDate;
use gymadmin_core::utils::contains_ignore_case;
use serde::{Deserialize, Serialize};

/// What an entity exposes to list filtering and sorting
///
/// Keys an entity does not have return `None`; a filter on such a key then
/// matches nothing.
pub trait Filterable {
    /// Entity name used in error messages
    const ENTITY: &'static str;

    /// Sort keys accepted by [`Filterable::sort_value`]
    const SORT_KEYS: &'static [&'static str];

    /// Text fields searched by the free-text filter
    fn search_fields(&self) -> Vec<&str>;

    /// Status value
    fn status_key(&self) -> Option<&str> {
        None
    }

    /// Category value
    fn category_key(&self) -> Option<&str> {
        None
    }

    /// Role value
    fn role_key(&self) -> Option<&str> {
        None
    }

    /// Date used by the date-range filter
    fn date_key(&self) -> Option<NaiveDate> {
        None
    }

    /// Value for a sort key, `None` if the key is unknown
    fn sort_value(&self, key: &str) -> Option<SortValue>;
}

/// Filter criteria; unset criteria match everything
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Filter {
    /// Case-insensitive substring over the entity's search fields
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    /// Exact status (case-insensitive)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// Exact category (case-insensitive)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Exact role (case-insensitive)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    /// Inclusive lower date bound
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<NaiveDate>,
    /// Inclusive upper date bound
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<NaiveDate>,
}

fn equal_key(wanted: Option<&String>, actual: Option<&str>) -> bool {
    match wanted.map(|w| w.trim()).filter(|w| !w.is_empty() && *w != "all") {
        None => true,
        Some(wanted) => actual.is_some_and(|a| a.eq_ignore_ascii_case(wanted)),
    }
}

impl Filter {
    /// Filter matching everything
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the free-text search
    #[must_use]
    pub fn search(mut self, text: impl Into<String>) -> Self {
        self.search = Some(text.into());
        self
    }

    /// Set the status criterion
    #[must_use]
    pub fn status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    /// Set the category criterion
    #[must_use]
    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Set the role criterion
    #[must_use]
    pub fn role(mut self, role: impl Into<String>) -> Self {
        self.role = Some(role.into());
        self
    }

    /// Set the inclusive date range; either end may be open
    #[must_use]
    pub const fn between(mut self, from: Option<NaiveDate>, to: Option<NaiveDate>) -> Self {
        self.from = from;
        self.to = to;
        self
    }

    /// Reject a range whose start is after its end
    ///
    /// # Errors
    ///
    /// Returns [`ListingError::InvalidDateRange`].
    pub fn validate(&self) -> ListingResult<()> {
        match (self.from, self.to) {
            (Some(from), Some(to)) if from > to => Err(ListingError::InvalidDateRange { from, to }),
            _ => Ok(()),
        }
    }

    /// Whether no criterion is set
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// Whether `item` satisfies every criterion
    pub fn matches<T: Filterable>(&self, item: &T) -> bool {
        if let Some(search) = self.search.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            if !item
                .search_fields()
                .iter()
                .any(|field| contains_ignore_case(field, search))
            {
                return false;
            }
        }

        if !equal_key(self.status.as_ref(), item.status_key())
            || !equal_key(self.category.as_ref(), item.category_key())
            || !equal_key(self.role.as_ref(), item.role_key())
        {
            return false;
        }

        if self.from.is_some() || self.to.is_some() {
            let Some(date) = item.date_key() else {
                return false;
            };
            if self.from.is_some_and(|from| date < from) || self.to.is_some_and(|to| date > to) {
                return false;
            }
        }

        true
    }

    /// Keep matching items, in their original order
    pub fn apply<'a, T: Filterable>(&self, items: &'a [T]) -> Vec<&'a T> {
        items.iter().filter(|item| self.matches(*item)).collect()
    }
}
