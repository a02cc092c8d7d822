//! Filter, sort and paginate in one step

use crate::error::ListingResult;
use crate::filter::{Filter, Filterable};
use crate::pagination::{Page, PageRequest, paginate};
use crate::sort::Sort;
use serde::{Deserialize, Serialize};

/// Everything a list view asks for
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListQuery {
    /// Filter criteria
    #[serde(default)]
    pub filter: Filter,
    /// Optional ordering, applied after filtering
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort: Option<Sort>,
    /// Page window
    #[serde(default)]
    pub page: PageRequest,
}

impl ListQuery {
    /// Query for one page with no filter
    pub fn new(page: PageRequest) -> Self {
        Self {
            page,
            ..Self::default()
        }
    }

    /// Replace the filter
    #[must_use]
    pub fn with_filter(mut self, filter: Filter) -> Self {
        self.filter = filter;
        self
    }

    /// Set the ordering
    #[must_use]
    pub fn with_sort(mut self, sort: Sort) -> Self {
        self.sort = Some(sort);
        self
    }

    /// Run the query over `items`, cloning only the items on the page
    ///
    /// # Errors
    ///
    /// Fails for a zero page size, an inverted date range or a sort key
    /// the entity does not have.
    pub fn run<T: Filterable + Clone>(&self, items: &[T]) -> ListingResult<Page<T>> {
        self.filter.validate()?;

        let mut matched = self.filter.apply(items);
        if let Some(sort) = &self.sort {
            sort.apply(&mut matched)?;
        }

        Ok(paginate(matched, self.page)?.map(T::clone))
    }
}
