//! Full run orchestration.
//!
//! A run is one sequential pass: guard check, auth, ticket fetch and
//! diff, subscription fetch and diff, notification fan-out, state
//! persistence. State is always persisted *before* the notifications it
//! gates, so a crash mid-dispatch costs a missed message, never a
//! duplicate on the next run.

use chrono::Utc;
use tracing::{info, warn};
use wakeel_config::{WakeelConfig, WakeelPaths};

use crate::browser::BrowserSurface;
use crate::fetch::{Collection, FetchClient, FetchError};
use crate::jitter;
use crate::notify::{
    Dispatcher, render_new_ticket, render_operator_note, render_started_summary,
    render_subscription_event,
};
use crate::session::SessionManager;
use crate::settings::{Category, SettingsHandle, SettingsSource};
use crate::subscriptions::{SubscriptionRecord, SubscriptionState, diff_subscriptions};
use crate::tickets::{
    KnownTicketsState, SORT_NEWEST_FIRST, TicketRecord, diff_new_tickets, within_notify_window,
};

use super::errors::RunError;
use super::guard;

/// What one completed run observed and did.
#[derive(Debug)]
pub struct RunSummary {
    /// True when this run seeded empty state instead of diffing.
    pub first_run: bool,
    pub tickets_fetched: usize,
    pub new_tickets: usize,
    pub tickets_notified: usize,
    pub subscriptions_fetched: usize,
    pub subscriptions_expired: usize,
    pub subscriptions_renewed: usize,
    pub subscriptions_added: usize,
    pub settings_source: SettingsSource,
}

impl RunSummary {
    pub fn has_changes(&self) -> bool {
        self.new_tickets > 0
            || self.subscriptions_expired > 0
            || self.subscriptions_renewed > 0
            || self.subscriptions_added > 0
    }
}

#[derive(Debug)]
pub enum RunOutcome {
    Completed(RunSummary),
    /// The run guard refused the run; nothing was fetched or sent.
    Skipped {
        last_run: i64,
        elapsed_secs: i64,
        min_interval_secs: u64,
    },
}

pub struct Runner {
    config: WakeelConfig,
    paths: WakeelPaths,
    session: SessionManager,
    fetch: FetchClient,
    dispatcher: Dispatcher,
    settings: SettingsHandle,
}

impl Runner {
    pub fn new(
        config: WakeelConfig,
        paths: WakeelPaths,
        session: SessionManager,
        fetch: FetchClient,
        dispatcher: Dispatcher,
        settings: SettingsHandle,
    ) -> Self {
        Self {
            config,
            paths,
            session,
            fetch,
            dispatcher,
            settings,
        }
    }

    /// Execute one monitoring run end to end.
    pub async fn run_once(&self, browser: &dyn BrowserSurface) -> Result<RunOutcome, RunError> {
        let mut tickets_state = KnownTicketsState::load(&self.paths.known_tickets_file())?;

        let now = Utc::now().timestamp();
        let min_interval = self.config.monitor.min_run_interval_secs;
        if !guard::should_run(tickets_state.last_run(), min_interval, now) {
            let last_run = tickets_state.last_run().unwrap_or(now);
            let elapsed = now - last_run;
            info!(
                event = "core.runner.run_skipped",
                elapsed_secs = elapsed,
                min_interval_secs = min_interval,
            );
            return Ok(RunOutcome::Skipped {
                last_run,
                elapsed_secs: elapsed,
                min_interval_secs: min_interval,
            });
        }

        info!(event = "core.runner.run_started");

        if let Err(e) = self.session.ensure_valid_token(browser).await {
            warn!(event = "core.runner.auth_failed", error = %e);
            self.dispatcher
                .dispatch_operator(&render_operator_note(&format!(
                    "🛑 Monitor run aborted: authentication failed ({e}). \
                     Check the dashboard credentials or re-extract the browser session."
                )))
                .await;
            return Err(e.into());
        }

        // At most one auth-recovery-and-refetch cycle per run, shared
        // across both collections.
        let mut recovered = false;

        let tickets_endpoint = format!(
            "{}?{}",
            self.config.dashboard.tickets_endpoint, SORT_NEWEST_FIRST
        );
        let ticket_collection = self
            .fetch_with_recovery(browser, &tickets_endpoint, &mut recovered)
            .await?;
        let fetched_tickets: Vec<TicketRecord> = ticket_collection
            .items
            .iter()
            .filter_map(TicketRecord::from_api_item)
            .collect();

        // Settings are read fresh every run, at dispatch time.
        let (settings, settings_source) = self.settings.load().await;

        let tickets_first_run = tickets_state.is_first_run();
        let new_tickets = diff_new_tickets(&fetched_tickets, &tickets_state);
        for ticket in &new_tickets {
            tickets_state.insert(&ticket.display_id);
        }
        tickets_state.save()?;

        let mut tickets_notified = 0;
        if !tickets_first_run {
            let max_age = chrono::Duration::hours(self.config.monitor.max_ticket_age_hours as i64);
            let detected_at = Utc::now();
            for ticket in &new_tickets {
                if !within_notify_window(ticket, max_age, detected_at) {
                    info!(
                        event = "core.runner.ticket_outside_window",
                        display_id = %ticket.display_id,
                    );
                    continue;
                }
                if tickets_notified > 0 {
                    jitter::sleep_ms(&self.config.monitor.inter_message_delay).await;
                }
                let message = render_new_ticket(ticket, &self.config.dashboard.base_url);
                self.dispatcher
                    .dispatch_business(Category::TicketCreated, &settings, &message)
                    .await;
                tickets_notified += 1;
            }
        }

        let mut subscription_state = SubscriptionState::load(&self.paths.subscriptions_file())?;
        let subscriptions_first_run = subscription_state.is_first_run();

        let subscription_collection = self
            .fetch_with_recovery(
                browser,
                &self.config.dashboard.subscriptions_endpoint,
                &mut recovered,
            )
            .await?;
        let fetched_subscriptions: Vec<SubscriptionRecord> = subscription_collection
            .items
            .iter()
            .filter_map(SubscriptionRecord::from_api_item)
            .collect();

        let diff = diff_subscriptions(&fetched_subscriptions, &subscription_state);
        for record in &fetched_subscriptions {
            subscription_state.record(&record.id, &record.normalized_status());
        }
        subscription_state.save()?;

        if !subscriptions_first_run {
            let events: [(Category, &[SubscriptionRecord]); 3] = [
                (Category::SubscriptionExpired, &diff.expired),
                (Category::SubscriptionRenewed, &diff.renewed),
                (Category::SubscriberNew, &diff.added),
            ];
            let mut sent_any = false;
            for (category, records) in events {
                for record in records {
                    if sent_any {
                        jitter::sleep_ms(&self.config.monitor.inter_message_delay).await;
                    }
                    let message = render_subscription_event(category, record);
                    self.dispatcher
                        .dispatch_business(category, &settings, &message)
                        .await;
                    sent_any = true;
                }
            }
        }

        // Tokens rotate under the site's own refresh logic during API
        // activity; keep the persisted session current.
        self.session.save_rotated_state(browser).await;

        tickets_state.mark_run(Utc::now().timestamp());
        tickets_state.save()?;

        let summary = RunSummary {
            first_run: tickets_first_run || subscriptions_first_run,
            tickets_fetched: fetched_tickets.len(),
            new_tickets: new_tickets.len(),
            tickets_notified,
            subscriptions_fetched: fetched_subscriptions.len(),
            subscriptions_expired: if subscriptions_first_run { 0 } else { diff.expired.len() },
            subscriptions_renewed: if subscriptions_first_run { 0 } else { diff.renewed.len() },
            subscriptions_added: if subscriptions_first_run { 0 } else { diff.added.len() },
            settings_source,
        };

        if summary.first_run {
            self.dispatcher
                .dispatch_operator(&render_started_summary(
                    tickets_state.len(),
                    subscription_state.len(),
                ))
                .await;
        }

        info!(
            event = "core.runner.run_completed",
            first_run = summary.first_run,
            new_tickets = summary.new_tickets,
            tickets_notified = summary.tickets_notified,
            subscriptions_expired = summary.subscriptions_expired,
            subscriptions_renewed = summary.subscriptions_renewed,
            subscriptions_added = summary.subscriptions_added,
        );
        Ok(RunOutcome::Completed(summary))
    }

    /// Fetch a collection, running the auth-recovery-and-refetch cycle
    /// once per run when the failure looks auth-related. Any terminal
    /// failure is reported to the operator before propagating.
    async fn fetch_with_recovery(
        &self,
        browser: &dyn BrowserSurface,
        endpoint: &str,
        recovered: &mut bool,
    ) -> Result<Collection, RunError> {
        let first_error = match self.fetch.fetch_collection(browser, endpoint).await {
            Ok(collection) => return Ok(collection),
            Err(e) => e,
        };

        if !first_error.is_auth_related() || *recovered {
            return Err(self.report_fetch_failure(endpoint, first_error).await);
        }

        warn!(
            event = "core.runner.auth_recovery_started",
            endpoint = endpoint,
            error = %first_error,
        );
        *recovered = true;

        if let Err(e) = self.session.force_relogin(browser).await {
            self.dispatcher
                .dispatch_operator(&render_operator_note(&format!(
                    "🛑 Monitor run aborted: re-login failed ({e}). \
                     Check the dashboard credentials or re-extract the browser session."
                )))
                .await;
            return Err(e.into());
        }

        match self.fetch.fetch_collection(browser, endpoint).await {
            Ok(collection) => {
                info!(event = "core.runner.auth_recovery_completed", endpoint = endpoint);
                Ok(collection)
            }
            Err(e) => Err(self.report_fetch_failure(endpoint, e).await),
        }
    }

    async fn report_fetch_failure(&self, endpoint: &str, error: FetchError) -> RunError {
        warn!(
            event = "core.runner.fetch_failed",
            endpoint = endpoint,
            error = %error,
        );
        self.dispatcher
            .dispatch_operator(&render_operator_note(&format!(
                "🛑 Monitor run aborted: fetch of {endpoint} failed ({error})"
            )))
            .await;
        error.into()
    }
}
