//! Search session — the per-card state machine driven by user input.
//!
//! ```text
//! Empty ──input──▶ Typing ──outcome──▶ Results | NoResults
//!   ▲                 │                      │
//!   └──── cleared ────┴───── input ──────────┘ (back to Typing)
//! ```
//!
//! `Empty` means no text and no active facet. Every keystroke re-enters
//! `Typing`; the debounced query's outcome settles the session.

use serde::Serialize;

use crate::id::AreaId;
use crate::query::{Filters, Query, QueryOutcome, QueryStatus};

/// Where the session stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    #[default]
    Empty,
    Typing,
    Results,
    NoResults,
}

/// Input, facets and paging of one search card.
#[derive(Debug, Clone)]
pub struct SearchSession {
    text: String,
    filters: Filters,
    pages: usize,
    state: SessionState,
    generation: u64,
}

impl Default for SearchSession {
    fn default() -> Self {
        Self {
            text: String::new(),
            filters: Filters::default(),
            pages: 1,
            state: SessionState::Empty,
            generation: 0,
        }
    }
}

impl SearchSession {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn state(&self) -> SessionState {
        self.state
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn filters(&self) -> &Filters {
        &self.filters
    }

    /// Incremented on every change of text or facets.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    #[must_use]
    pub fn query(&self) -> Query {
        Query::parse(&self.text)
    }

    /// Record a keystroke. Returns the generation the eventual outcome must carry.
    pub fn input(&mut self, text: impl Into<String>) -> u64 {
        self.text = text.into();
        self.restart()
    }

    pub fn toggle_domain(&mut self, domain: impl Into<String>) -> u64 {
        self.filters.toggle_domain(domain);
        self.restart()
    }

    pub fn toggle_area(&mut self, area: impl Into<AreaId>) -> u64 {
        self.filters.toggle_area(area);
        self.restart()
    }

    /// Drop text and facets.
    pub fn clear(&mut self) -> u64 {
        self.text.clear();
        self.filters.clear();
        self.restart()
    }

    /// Ask for one more page. Only meaningful while showing results.
    pub fn load_more(&mut self) -> bool {
        if self.state != SessionState::Results {
            return false;
        }
        self.pages += 1;
        true
    }

    /// Page limit for the current paging depth; `None` when paging is off.
    #[must_use]
    pub fn limit(&self, page_size: usize, paginate: bool) -> Option<usize> {
        paginate.then(|| page_size.saturating_mul(self.pages.max(1)))
    }

    /// Settle the session with the outcome of the query for `generation`.
    ///
    /// Outcomes for an older generation are ignored and `false` is returned.
    pub fn complete(&mut self, generation: u64, outcome: &QueryOutcome) -> bool {
        if generation != self.generation {
            return false;
        }
        self.state = match outcome.status {
            QueryStatus::Prompt => SessionState::Empty,
            QueryStatus::Results => SessionState::Results,
            QueryStatus::NoMatches => SessionState::NoResults,
        };
        true
    }

    fn restart(&mut self) -> u64 {
        self.generation += 1;
        self.pages = 1;
        self.state = if self.text.trim().is_empty() && !self.filters.is_active() {
            SessionState::Empty
        } else {
            SessionState::Typing
        };
        self.generation
    }
}
