//! Paginated authenticated collection fetches.
//!
//! All API calls run inside the authenticated page context (in-page
//! `fetch` with the bearer token from local storage) rather than as raw
//! HTTP from the engine — the dashboard's API gateway only accepts calls
//! that look like the SPA's own.

pub mod client;
pub mod errors;

pub use client::{Collection, FetchClient};
pub use errors::FetchError;
