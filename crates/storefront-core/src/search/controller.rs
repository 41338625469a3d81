// crates/storefront-core/src/search/controller.rs
use super::dropdown::Dropdown;
use super::executor::{Completion, RequestExecutor, SearchRequest};
use super::state::{SearchState, SearchView};
use crate::clock::Clock;
use crate::config::SearchSettings;
use crate::error::SearchFailure;
use crate::model::SearchResult;
use log::{debug, warn};
use std::time::Duration;

#[derive(Debug, Clone)]
struct DebounceTimer {
    deadline: Duration,
    query: String,
}

/// Debounced search box.
///
/// Keystrokes go in through [`on_query_changed`](Self::on_query_changed);
/// the host calls [`tick`](Self::tick) from the same thread whenever time
/// has passed or an executor may have completions, and renders
/// [`view`](Self::view) afterwards.
///
/// Every cycle (each call to `on_query_changed`, and `dispose`) takes a new
/// sequence number. A request carries the number of the cycle that issued
/// it, and its completion is applied only while that number is still the
/// latest one. A slow answer to an old query therefore can never replace the
/// results of a newer one.
pub struct SearchController<K, E> {
    clock: K,
    executor: E,
    settings: SearchSettings,
    query: String,
    state: SearchState,
    timer: Option<DebounceTimer>,
    seq: u64,
    dropdown: Dropdown,
    disposed: bool,
}

impl<K: Clock, E: RequestExecutor> SearchController<K, E> {
    pub fn new(clock: K, executor: E, settings: SearchSettings) -> Self {
        Self {
            clock,
            executor,
            settings,
            query: String::new(),
            state: SearchState::Idle,
            timer: None,
            seq: 0,
            dropdown: Dropdown::Closed,
            disposed: false,
        }
    }

    /// Feeds the full current text of the search box.
    ///
    /// Short queries (trimmed length at or below the configured minimum)
    /// clear everything synchronously. Longer ones (re)arm the debounce
    /// timer; the fetch happens on the first `tick` after it expires.
    pub fn on_query_changed(&mut self, text: &str) {
        if self.disposed {
            debug!("ignoring input after dispose");
            return;
        }

        self.query.clear();
        self.query.push_str(text);
        self.next_cycle();

        let settled = text.trim();
        if settled.chars().count() <= self.settings.min_query_chars {
            self.timer = None;
            self.state = SearchState::Idle;
            return;
        }

        let deadline = self.clock.now() + self.settings.debounce;
        debug!("search #{} armed for {:?}", self.seq, settled);
        self.timer = Some(DebounceTimer {
            deadline,
            query: settled.to_string(),
        });
        self.state = SearchState::Debouncing {
            query: settled.to_string(),
        };
    }

    /// Fires the debounce timer if it is due, then applies whatever the
    /// executor has finished. Returns `true` if the published state changed.
    pub fn tick(&mut self) -> bool {
        if self.disposed {
            return false;
        }
        let mut changed = self.fire_due_timer();
        for completion in self.executor.poll() {
            changed |= self.complete(completion);
        }
        changed
    }

    /// Applies one completion under the stale-response rule. Returns `true`
    /// if it was current and the state changed.
    ///
    /// `tick` already routes executor completions here; hosts that run
    /// requests outside an executor can call it directly.
    pub fn complete(&mut self, completion: Completion) -> bool {
        let current = !self.disposed
            && completion.seq == self.seq
            && matches!(self.state, SearchState::Loading { seq, .. } if seq == completion.seq);
        if !current {
            debug!(
                "discarding stale search #{} (latest #{})",
                completion.seq, self.seq
            );
            return false;
        }

        self.state = match completion.outcome {
            Ok(results) => {
                debug!("search #{} returned {} results", completion.seq, results.len());
                SearchState::Success(results)
            }
            Err(err) => {
                warn!("search #{} failed: {}", completion.seq, err);
                SearchState::Failed(SearchFailure::from(&err))
            }
        };
        true
    }

    /// Tears the controller down. Nothing changes published state afterwards.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.timer = None;
        self.next_cycle();
        self.disposed = true;
    }

    /// Time left until the pending debounce timer fires.
    pub fn next_deadline(&self) -> Option<Duration> {
        let now = self.clock.now();
        self.timer
            .as_ref()
            .map(|t| t.deadline.saturating_sub(now))
    }

    // --- Dropdown -----------------------------------------------------------

    /// The search box gained focus. Returns `true` if the dropdown opened.
    pub fn focus(&mut self) -> bool {
        !self.disposed && self.dropdown.open()
    }

    /// The user left the search box. Returns `true` if the dropdown closed.
    pub fn close(&mut self) -> bool {
        !self.disposed && self.dropdown.close()
    }

    pub fn is_open(&self) -> bool {
        self.dropdown.is_open()
    }

    // --- Published state ----------------------------------------------------

    pub fn state(&self) -> &SearchState {
        &self.state
    }

    pub fn results(&self) -> &[SearchResult] {
        self.state.results()
    }

    pub fn is_loading(&self) -> bool {
        self.state.is_loading()
    }

    pub fn is_pending(&self) -> bool {
        self.state.is_pending()
    }

    pub fn error(&self) -> Option<&SearchFailure> {
        self.state.error()
    }

    /// Raw text last passed to `on_query_changed`.
    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    pub fn view(&self) -> SearchView<'_> {
        if !self.dropdown.is_open() {
            return SearchView::Hidden;
        }
        match &self.state {
            SearchState::Debouncing { .. } | SearchState::Loading { .. } => {
                SearchView::Skeleton {
                    rows: self.settings.skeleton_rows,
                }
            }
            SearchState::Success(results) if !results.is_empty() => SearchView::Results(results),
            SearchState::Success(_) | SearchState::Idle => SearchView::NoResults,
            SearchState::Failed(failure) => SearchView::Error(failure),
        }
    }

    pub fn settings(&self) -> &SearchSettings {
        &self.settings
    }

    pub fn clock(&self) -> &K {
        &self.clock
    }

    pub fn executor(&self) -> &E {
        &self.executor
    }

    pub fn executor_mut(&mut self) -> &mut E {
        &mut self.executor
    }

    // --- Internals ----------------------------------------------------------

    /// Starts a new cycle, making every earlier request stale.
    fn next_cycle(&mut self) {
        self.seq += 1;
        self.executor.invalidate(self.seq);
    }

    fn fire_due_timer(&mut self) -> bool {
        let due = matches!(&self.timer, Some(t) if self.clock.now() >= t.deadline);
        if !due {
            return false;
        }
        let Some(timer) = self.timer.take() else {
            return false;
        };

        debug!("search #{} issued for {:?}", self.seq, timer.query);
        self.state = SearchState::Loading {
            query: timer.query.clone(),
            seq: self.seq,
        };
        self.executor.submit(SearchRequest {
            seq: self.seq,
            query: timer.query,
        });
        true
    }
}
