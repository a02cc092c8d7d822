//! Filtering, sorting and pagination over already-fetched collections
//!
//! Every list view works the same way: the whole collection is fetched,
//! narrowed by a [`Filter`], optionally ordered by a [`Sort`], and cut into
//! a [`Page`]. Everything here is pure and keeps the input order unless a
//! sort is requested.
//!
//! ```
//! use gymadmin_listing::{paginate, PageRequest};
//!
//! let products: Vec<u32> = (1..=23).collect();
//! let page = paginate(products, PageRequest::new(2, 12)).unwrap();
//! assert_eq!(page.total_pages, 2);
//! assert_eq!(page.items.len(), 11);
//! ```

#![forbid(unsafe_code)]

pub mod entities;
pub mod error;
pub mod filter;
pub mod pagination;
pub mod query;
pub mod sort;

pub use error::{ListingError, ListingResult};
pub use filter::{Filter, Filterable};
pub use pagination::{Page, PageRequest, paginate};
pub use query::ListQuery;
pub use sort::{Sort, SortDirection, SortValue};
