//! The auth session state machine.

use std::path::PathBuf;
use std::time::Duration;

use tracing::{info, warn};
use wakeel_config::DashboardConfig;

use crate::browser::{BrowserSurface, WaitPolicy, click_first, fill_first};

use super::errors::AuthError;
use super::store;
use super::types::AuthSession;

/// Candidate selectors for the SSO login form, in priority order. The
/// identity provider renders an Angular Material form; the first entry is
/// the current markup, the rest are fallbacks for older deployments.
const USERNAME_SELECTORS: &[&str] = &[
    r#"input[formcontrolname="Username"]"#,
    r#"input[formcontrolname="username"]"#,
    "#mat-input-0",
    r#"input[name="username"]"#,
];

const PASSWORD_SELECTORS: &[&str] = &[
    r#"input[formcontrolname="Password"]"#,
    r#"input[formcontrolname="password"]"#,
    "#mat-input-1",
    r#"input[name="password"]"#,
    r#"input[type="password"]"#,
];

const SUBMIT_SELECTORS: &[&str] = &[
    r#"button[type="submit"]"#,
    "#kc-login",
    r#"input[type="submit"]"#,
];

const ACCESS_TOKEN_JS: &str = "localStorage.getItem('access_token')";
const REFRESH_TOKEN_JS: &str = "localStorage.getItem('refresh_token')";

/// How long to let the site's own client-side refresh logic run after a
/// dashboard reload before concluding no token is coming.
const TOKEN_REFRESH_WAIT: Duration = Duration::from_secs(5);

#[derive(Clone)]
pub struct LoginCredentials {
    pub username: String,
    pub password: String,
}

/// Owns the persisted session file and knows how to get from any on-disk
/// state to a valid bearer token.
pub struct SessionManager {
    session_file: PathBuf,
    dashboard: DashboardConfig,
    credentials: LoginCredentials,
}

impl SessionManager {
    pub fn new(
        session_file: PathBuf,
        dashboard: DashboardConfig,
        credentials: LoginCredentials,
    ) -> Self {
        Self {
            session_file,
            dashboard,
            credentials,
        }
    }

    fn dashboard_url(&self) -> String {
        format!("{}/dashboard", self.dashboard.base_url)
    }

    fn navigation_timeout(&self) -> Duration {
        Duration::from_secs(self.dashboard.navigation_timeout_secs)
    }

    /// Produce a valid bearer token, re-authenticating as needed.
    ///
    /// Every successful transition persists the session immediately, so a
    /// crash mid-run loses at most one run's progress, never the session.
    pub async fn ensure_valid_token(
        &self,
        browser: &dyn BrowserSurface,
    ) -> Result<String, AuthError> {
        match store::load_session(&self.session_file)? {
            None => {
                info!(event = "core.auth.no_session");
                self.credential_login(browser).await
            }
            Some(session) => {
                if session.likely_expired(chrono::Utc::now()) {
                    warn!(
                        event = "core.auth.session_past_max_age",
                        saved_at = %session.saved_at,
                        "Saved session is older than the remote refresh window, expecting re-login"
                    );
                }

                browser.write_persisted_state(&session.storage_state).await?;

                match self.try_restore(browser).await? {
                    Some(token) => {
                        self.persist_session(browser, &token).await?;
                        Ok(token)
                    }
                    None => {
                        info!(event = "core.auth.session_expired");
                        self.credential_login(browser).await
                    }
                }
            }
        }
    }

    /// Force a fresh credential login regardless of on-disk state.
    ///
    /// Used by the caller's one auth-recovery-and-refetch cycle after a
    /// fetch failure.
    pub async fn force_relogin(&self, browser: &dyn BrowserSurface) -> Result<String, AuthError> {
        info!(event = "core.auth.forced_relogin");
        self.credential_login(browser).await
    }

    /// Try to reuse the restored session. Returns `Ok(None)` when the
    /// session is expired (SSO redirect or no token even after an in-page
    /// refresh) and a credential login is required.
    async fn try_restore(
        &self,
        browser: &dyn BrowserSurface,
    ) -> Result<Option<String>, AuthError> {
        browser
            .navigate(
                &self.dashboard_url(),
                WaitPolicy::DomContentLoaded,
                self.navigation_timeout(),
            )
            .await?;

        let url = browser.current_url().await?;
        if url.contains(&self.dashboard.sso_host) {
            info!(event = "core.auth.restore_landed_on_sso", url = url);
            return Ok(None);
        }

        if let Some(token) = self.read_token(browser).await? {
            info!(event = "core.auth.restore_token_present");
            return Ok(Some(token));
        }

        // Token missing but still on the dashboard domain: reload and let
        // the site's own refresh logic run, then look again.
        info!(event = "core.auth.in_page_refresh_started");
        browser
            .navigate(
                &self.dashboard_url(),
                WaitPolicy::NetworkIdle,
                self.navigation_timeout(),
            )
            .await?;
        tokio::time::sleep(TOKEN_REFRESH_WAIT).await;

        match self.read_token(browser).await? {
            Some(token) => {
                info!(event = "core.auth.in_page_refresh_completed");
                Ok(Some(token))
            }
            None => {
                warn!(event = "core.auth.in_page_refresh_no_token");
                Ok(None)
            }
        }
    }

    /// Full interactive login with the configured credentials.
    async fn credential_login(&self, browser: &dyn BrowserSurface) -> Result<String, AuthError> {
        info!(event = "core.auth.login_started");

        match self.login_steps(browser).await {
            Ok(token) => {
                self.persist_session(browser, &token).await?;
                info!(event = "core.auth.login_completed");
                Ok(token)
            }
            Err(e) => {
                warn!(event = "core.auth.login_failed", error = %e);
                Err(AuthError::Fatal {
                    message: e.to_string(),
                })
            }
        }
    }

    async fn login_steps(&self, browser: &dyn BrowserSurface) -> Result<String, AuthError> {
        browser
            .navigate(
                &self.dashboard_url(),
                WaitPolicy::DomContentLoaded,
                self.navigation_timeout(),
            )
            .await?;

        let url = browser.current_url().await?;
        if url.contains(&self.dashboard.sso_host) {
            fill_first(browser, "login_username", USERNAME_SELECTORS, &self.credentials.username)
                .await?;
            fill_first(browser, "login_password", PASSWORD_SELECTORS, &self.credentials.password)
                .await?;
            click_first(browser, "login_submit", SUBMIT_SELECTORS).await?;

            browser
                .wait_for_url_pattern(
                    "/dashboard",
                    Duration::from_secs(self.dashboard.dashboard_wait_timeout_secs),
                )
                .await?;
        }

        // Give the freshly loaded dashboard a moment to stash its token.
        tokio::time::sleep(Duration::from_secs(
            self.dashboard.login_field_timeout_secs.min(5),
        ))
        .await;

        self.read_token(browser).await?.ok_or(AuthError::Fatal {
            message: "no access token after login".to_string(),
        })
    }

    /// Read the current access token from page local storage.
    pub async fn read_token(
        &self,
        browser: &dyn BrowserSurface,
    ) -> Result<Option<String>, AuthError> {
        let value = browser.evaluate_script(ACCESS_TOKEN_JS).await?;
        Ok(value
            .as_str()
            .map(str::to_string)
            .filter(|t| !t.is_empty()))
    }

    /// Persist the current browser storage state plus cached tokens.
    async fn persist_session(
        &self,
        browser: &dyn BrowserSurface,
        access_token: &str,
    ) -> Result<(), AuthError> {
        let blob = browser.read_persisted_state().await?;
        let refresh_token = browser
            .evaluate_script(REFRESH_TOKEN_JS)
            .await?
            .as_str()
            .map(str::to_string)
            .filter(|t| !t.is_empty());

        let session = AuthSession::new(blob, Some(access_token.to_string()), refresh_token);
        store::save_session(&self.session_file, &session)?;
        Ok(())
    }

    /// Re-persist the storage state after API activity — tokens rotate
    /// under the site's own refresh logic and losing the rotation would
    /// expire the session early. Best-effort.
    pub async fn save_rotated_state(&self, browser: &dyn BrowserSurface) {
        let token = match self.read_token(browser).await {
            Ok(token) => token,
            Err(e) => {
                warn!(event = "core.auth.rotated_state_read_failed", error = %e);
                return;
            }
        };

        let Some(token) = token else {
            return;
        };

        if let Err(e) = self.persist_session(browser, &token).await {
            warn!(event = "core.auth.rotated_state_save_failed", error = %e);
        }
    }
}
