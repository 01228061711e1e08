mod client;
mod pager;
mod query;

pub use client::{PageRequest, RegistryClient, TrialPage, TrialSource, DEFAULT_BASE_URL};
pub use pager::{effective_max_results, fetch_trials, FetchOutcome, MAX_RESULTS_CAP, PAGE_SIZE};
pub use query::build_query_term;
