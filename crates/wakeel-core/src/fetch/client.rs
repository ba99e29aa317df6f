//! In-page fetch execution and pagination assembly.

use std::time::Duration;

use serde_json::Value;
use tracing::{info, warn};
use wakeel_config::{DashboardConfig, DelayRange};

use crate::browser::BrowserSurface;
use crate::jitter;

use super::errors::FetchError;

/// Wait before the one-shot 401 retry, giving the site's own refresh logic
/// a chance to rotate the token.
const UNAUTHORIZED_RETRY_WAIT: Duration = Duration::from_secs(2);

/// A fully assembled multi-page collection.
#[derive(Debug, Clone)]
pub struct Collection {
    /// Items in server order (typically newest-first).
    pub items: Vec<Value>,
    /// Server-reported total, or the assembled length if never reported.
    pub total_count: u64,
}

struct PageData {
    items: Vec<Value>,
    total_count: Option<u64>,
}

pub struct FetchClient {
    dashboard: DashboardConfig,
    inter_page_delay: DelayRange,
}

impl FetchClient {
    pub fn new(dashboard: DashboardConfig, inter_page_delay: DelayRange) -> Self {
        Self {
            dashboard,
            inter_page_delay,
        }
    }

    /// Fetch every page of `endpoint` (a path, optionally with a query
    /// string) and assemble the collection.
    ///
    /// Pages are sequential with jittered spacing. Termination: a page
    /// shorter than the requested size, or cumulative count reaching the
    /// server-reported total. A failure on any page after the first
    /// discards everything fetched so far.
    pub async fn fetch_collection(
        &self,
        browser: &dyn BrowserSurface,
        endpoint: &str,
    ) -> Result<Collection, FetchError> {
        let page_size = self.dashboard.page_size;
        let mut items: Vec<Value> = Vec::new();
        let mut total_count: Option<u64> = None;
        let mut page_number: u32 = 1;

        loop {
            let page = match self.fetch_page_with_retry(browser, endpoint, page_number).await {
                Ok(page) => page,
                Err(e) if page_number > 1 => {
                    warn!(
                        event = "core.fetch.page_failed_discarding",
                        endpoint = endpoint,
                        page = page_number,
                        fetched_so_far = items.len(),
                        error = %e,
                    );
                    return Err(FetchError::PartialCollection {
                        page: page_number,
                        source: Box::new(e),
                    });
                }
                Err(e) => return Err(e),
            };

            let page_len = page.items.len();
            if page.total_count.is_some() {
                total_count = page.total_count;
            }
            items.extend(page.items);

            info!(
                event = "core.fetch.page_completed",
                endpoint = endpoint,
                page = page_number,
                page_len = page_len,
                cumulative = items.len(),
                total = ?total_count,
            );

            if (page_len as u32) < page_size {
                break;
            }
            if let Some(total) = total_count {
                if items.len() as u64 >= total {
                    break;
                }
            }

            page_number += 1;
            jitter::sleep_ms(&self.inter_page_delay).await;
        }

        let total = total_count.unwrap_or(items.len() as u64);
        Ok(Collection {
            items,
            total_count: total,
        })
    }

    /// Fetch one page, retrying exactly once on 401 after a short wait.
    ///
    /// The retry re-reads the token from local storage (it may have rotated
    /// under the site's own refresh logic). Any other failure is terminal
    /// for this call.
    async fn fetch_page_with_retry(
        &self,
        browser: &dyn BrowserSurface,
        endpoint: &str,
        page_number: u32,
    ) -> Result<PageData, FetchError> {
        match self.fetch_page(browser, endpoint, page_number).await {
            Err(FetchError::Unauthorized) => {
                info!(
                    event = "core.fetch.unauthorized_retry",
                    endpoint = endpoint,
                    page = page_number,
                );
                tokio::time::sleep(UNAUTHORIZED_RETRY_WAIT).await;
                self.fetch_page(browser, endpoint, page_number).await
            }
            other => other,
        }
    }

    async fn fetch_page(
        &self,
        browser: &dyn BrowserSurface,
        endpoint: &str,
        page_number: u32,
    ) -> Result<PageData, FetchError> {
        let url = self.page_url(endpoint, page_number);
        let js = page_fetch_script(&url);
        let outcome = browser.evaluate_script(&js).await?;
        parse_page_outcome(&outcome)
    }

    fn page_url(&self, endpoint: &str, page_number: u32) -> String {
        let separator = if endpoint.contains('?') { '&' } else { '?' };
        format!(
            "{}{}{}pageSize={}&pageNumber={}",
            self.dashboard.base_url, endpoint, separator, self.dashboard.page_size, page_number
        )
    }
}

/// Build the in-page fetch script for one URL.
///
/// The script never throws: every outcome is reported as
/// `{status, body?, error?}` so the engine sees exactly one shape.
fn page_fetch_script(url: &str) -> String {
    format!(
        r#"(async () => {{
    try {{
        const token = localStorage.getItem('access_token');
        if (!token) return {{ status: 0, error: 'no_token' }};
        const r = await fetch('{url}', {{
            headers: {{ 'Authorization': 'Bearer ' + token, 'Accept': 'application/json' }}
        }});
        const body = r.ok ? await r.json() : null;
        return {{ status: r.status, body: body }};
    }} catch (e) {{
        return {{ status: 0, error: String(e) }};
    }}
}})()"#
    )
}

fn parse_page_outcome(outcome: &Value) -> Result<PageData, FetchError> {
    let status = outcome
        .get("status")
        .and_then(Value::as_u64)
        .ok_or_else(|| FetchError::BadPayload {
            message: "missing status in page outcome".to_string(),
        })?;

    match status {
        0 => {
            let message = outcome
                .get("error")
                .and_then(Value::as_str)
                .unwrap_or("unknown")
                .to_string();
            if message == "no_token" {
                Err(FetchError::TokenMissing)
            } else {
                Err(FetchError::Transport { message })
            }
        }
        401 => Err(FetchError::Unauthorized),
        s if !(200..300).contains(&s) => Err(FetchError::Http { status: s as u16 }),
        _ => {
            let body = outcome.get("body").ok_or_else(|| FetchError::BadPayload {
                message: "missing body in 2xx page outcome".to_string(),
            })?;
            let items = body
                .get("items")
                .and_then(Value::as_array)
                .cloned()
                .ok_or_else(|| FetchError::BadPayload {
                    message: "response has no items array".to_string(),
                })?;
            let total_count = body.get("totalCount").and_then(Value::as_u64);
            Ok(PageData { items, total_count })
        }
    }
}
