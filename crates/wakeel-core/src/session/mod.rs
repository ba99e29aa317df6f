//! Auth session lifecycle.
//!
//! Owns the persisted [`AuthSession`] blob and the state machine that turns
//! "whatever is on disk" into a valid bearer token: restore the saved
//! browser state, detect expiry (landing on the SSO domain), try an in-page
//! refresh, and fall back to a full credential login. Refresh always goes
//! through the authenticated browser context — the identity provider
//! rejects non-interactive refresh requests from datacenter origins, so a
//! raw token-endpoint call is not an option.

pub mod errors;
pub mod manager;
pub mod store;
pub mod types;

pub use errors::AuthError;
pub use manager::{LoginCredentials, SessionManager};
pub use types::AuthSession;
