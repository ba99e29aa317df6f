//! Persisted authentication session.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Age past which the remote authority is known to reject the refresh
/// token. Enforced server-side; locally we only log when a session is
/// likely dead so the operator alert is less surprising.
pub const SESSION_LIKELY_EXPIRED_DAYS: i64 = 8;

/// The durable authentication state carried between runs.
///
/// `storage_state` is an opaque serialized browser storage blob (cookies
/// plus local storage) produced and consumed by the driver. Tokens are
/// cached alongside for diagnostics and for the one-shot 401 retry; the
/// blob is the authority.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthSession {
    pub storage_state: String,
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default)]
    pub refresh_token: Option<String>,
    pub saved_at: DateTime<Utc>,
}

impl AuthSession {
    pub fn new(storage_state: String, access_token: Option<String>, refresh_token: Option<String>) -> Self {
        Self {
            storage_state,
            access_token,
            refresh_token,
            saved_at: Utc::now(),
        }
    }

    /// Whether the session is old enough that the remote side has probably
    /// revoked the refresh token already.
    pub fn likely_expired(&self, now: DateTime<Utc>) -> bool {
        now.signed_duration_since(self.saved_at).num_days() >= SESSION_LIKELY_EXPIRED_DAYS
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn fresh_session_is_not_likely_expired() {
        let session = AuthSession::new("{}".to_string(), None, None);
        assert!(!session.likely_expired(Utc::now()));
    }

    #[test]
    fn old_session_is_likely_expired() {
        let mut session = AuthSession::new("{}".to_string(), None, None);
        session.saved_at = Utc::now() - Duration::days(9);
        assert!(session.likely_expired(Utc::now()));
    }
}
