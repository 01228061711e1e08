use crate::error::{ProspectorError, Result, UserFriendlyError};
use crate::fetcher::client::{PageRequest, TrialSource};
use crate::fetcher::query::build_query_term;
use crate::trial::RawTrial;
use std::time::Duration;

/// Records requested per page; the registry caps pages at this size anyway.
pub const PAGE_SIZE: usize = 100;

/// Fixed politeness pause between pages. Not a backoff strategy.
const PAGE_DELAY: Duration = Duration::from_millis(200);

/// Ceiling applied when the caller asks for "all" results.
pub const MAX_RESULTS_CAP: usize = 10_000;

/// What a fetch run produced. Partial results are valid output: a transport
/// failure mid-run ends the loop and is reported here, not raised.
#[derive(Debug, Default)]
pub struct FetchOutcome {
    pub trials: Vec<RawTrial>,
    pub pages_fetched: usize,
    pub transport_error: Option<String>,
}

/// Clamp the caller's budget: 0 means "all", capped to keep runs bounded.
pub fn effective_max_results(max_results: usize) -> usize {
    if max_results == 0 {
        MAX_RESULTS_CAP
    } else {
        max_results.min(MAX_RESULTS_CAP)
    }
}

/// Drive pagination until one of the termination conditions hits, in priority
/// order: budget reached, empty page, no continuation token, transport
/// failure. Strictly sequential; each page request blocks the next.
pub async fn fetch_trials<S: TrialSource>(
    source: &S,
    keywords: &[String],
    statuses: &[String],
    phases: &[String],
    max_results: usize,
    mut on_progress: impl FnMut(usize, usize),
    is_cancelled: impl Fn() -> bool,
) -> Result<FetchOutcome> {
    if keywords.iter().all(|k| k.trim().is_empty()) {
        return Err(ProspectorError::InvalidQuery {
            message: "at least one non-empty keyword is required".to_string(),
        });
    }

    let target = effective_max_results(max_results);
    let term = build_query_term(keywords, phases);

    let mut outcome = FetchOutcome::default();
    let mut page_token: Option<String> = None;

    while outcome.trials.len() < target {
        if is_cancelled() {
            return Err(ProspectorError::Cancelled);
        }

        let request = PageRequest {
            term: term.clone(),
            page_size: PAGE_SIZE.min(target - outcome.trials.len()),
            statuses: statuses.to_vec(),
            page_token: page_token.take(),
        };

        let page = match source.fetch_page(&request).await {
            Ok(page) => page,
            Err(error) => {
                // Degrade to "stop fetching": what was accumulated stands.
                outcome.transport_error = Some(error.user_message());
                break;
            }
        };

        outcome.pages_fetched += 1;
        if page.trials.is_empty() {
            break;
        }

        let room = target - outcome.trials.len();
        outcome.trials.extend(page.trials.into_iter().take(room));
        on_progress(outcome.trials.len(), target);

        match page.next_page_token {
            Some(token) => page_token = Some(token),
            None => break,
        }

        tokio::time::sleep(PAGE_DELAY).await;
    }

    Ok(outcome)
}
