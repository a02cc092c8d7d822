//! Ordering of list results

use crate::error::{ListingError, ListingResult};
use crate::filter::Filterable;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// A comparable value extracted from an entity
///
/// Values for one key always use the same variant.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum SortValue {
    /// Missing value; sorts first
    Missing,
    /// Text, compared as given (entities lowercase it)
    Text(String),
    /// Number
    Number(Decimal),
    /// Date
    Date(NaiveDate),
}

/// Sort direction
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    /// Smallest first
    #[default]
    Asc,
    /// Largest first
    Desc,
}

/// Sort request: a key plus a direction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sort {
    /// Key understood by the entity
    pub key: String,
    /// Direction
    #[serde(default)]
    pub direction: SortDirection,
}

impl Sort {
    /// Ascending sort on `key`
    pub fn asc(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            direction: SortDirection::Asc,
        }
    }

    /// Descending sort on `key`
    pub fn desc(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            direction: SortDirection::Desc,
        }
    }

    /// Stable in-place sort of `items`
    ///
    /// # Errors
    ///
    /// Returns [`ListingError::UnknownSortKey`] if `T` has no such key.
    pub fn apply<T: Filterable>(&self, items: &mut [&T]) -> ListingResult<()> {
        if !T::SORT_KEYS.contains(&self.key.as_str()) {
            return Err(ListingError::UnknownSortKey {
                entity: T::ENTITY,
                key: self.key.clone(),
            });
        }

        let value = |item: &T| item.sort_value(&self.key).unwrap_or(SortValue::Missing);
        items.sort_by(|a, b| {
            let ordering = value(*a).cmp(&value(*b));
            match self.direction {
                SortDirection::Asc => ordering,
                SortDirection::Desc => ordering.reverse(),
            }
        });
        Ok(())
    }
}

/// Parses `key` or `-key` (descending)
impl FromStr for Sort {
    type Err = ListingError;

    fn from_str(s: &str) -> ListingResult<Self> {
        let s = s.trim();
        Ok(s.strip_prefix('-').map_or_else(|| Self::asc(s), Self::desc))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    struct Item(&'static str, u32);

    impl Filterable for Item {
        const ENTITY: &'static str = "item";
        const SORT_KEYS: &'static [&'static str] = &["name", "qty"];

        fn search_fields(&self) -> Vec<&str> {
            vec![self.0]
        }

        fn sort_value(&self, key: &str) -> Option<SortValue> {
            match key {
                "name" => Some(SortValue::Text(self.0.to_lowercase())),
                "qty" => Some(SortValue::Number(Decimal::from(self.1))),
                _ => None,
            }
        }
    }

    fn names(items: &[&Item]) -> Vec<&'static str> {
        items.iter().map(|i| i.0).collect()
    }

    #[test]
    fn test_parse_sort() {
        assert_eq!("name".parse::<Sort>().unwrap(), Sort::asc("name"));
        assert_eq!("-qty".parse::<Sort>().unwrap(), Sort::desc("qty"));
    }

    #[test]
    fn test_sort_is_stable_both_ways() {
        let data = [Item("b", 2), Item("a", 1), Item("c", 2)];
        let mut refs: Vec<&Item> = data.iter().collect();

        Sort::asc("qty").apply(&mut refs).unwrap();
        assert_eq!(names(&refs), vec!["a", "b", "c"]);

        let mut refs: Vec<&Item> = data.iter().collect();
        Sort::desc("qty").apply(&mut refs).unwrap();
        assert_eq!(names(&refs), vec!["b", "c", "a"]);
    }

    #[test]
    fn test_unknown_key() {
        let data = [Item("a", 1)];
        let mut refs: Vec<&Item> = data.iter().collect();
        let err = Sort::asc("colour").apply(&mut refs).unwrap_err();
        assert_eq!(err.to_string(), "Cannot sort item by 'colour'");
    }

    #[test]
    fn test_missing_sorts_first() {
        assert!(SortValue::Missing < SortValue::Text(String::new()));
    }
}
