//! Clients for the catalog site
//!
//! - auth: sign-in exchange producing a Session
//! - catalog: authenticated search and lesson reads
//! - scrape: HTML field extraction

pub mod auth;
pub mod catalog;
pub mod scrape;

pub use auth::{AuthClient, AuthError};
pub use catalog::{CatalogClient, FetchError};
