//! Backends for the gym admin toolkit
//!
//! [`AdminApi`] is the seam between the front end and the data source.
//! [`HttpAdminClient`] talks to the REST backend; [`MockAdminClient`] keeps
//! collections in memory and is what the tools use without a server.

#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    rust_2018_idioms
)]

pub mod api;
pub mod http;
pub mod mock;
pub mod resource;

pub use api::AdminApi;
pub use http::HttpAdminClient;
pub use mock::MockAdminClient;
pub use resource::Resource;
