//! Query engine — facet filtering, multi-term matching, ranking, paging and grouping.
//!
//! A query runs against the already-joined [`IndexedEntity`] list; it never
//! touches the registries. The pipeline is:
//!
//! 1. facet pre-filter (`domain`, `area`), exact match
//! 2. term matching ([`MatchMode::All`] by default)
//! 3. optional usage ranking (stable, ties keep index order)
//! 4. truncation to the page limit
//! 5. optional grouping of the page

mod filter;
mod group;
mod rank;

pub use filter::Filters;
pub use group::{Group, Grouping};
pub use rank::{Ranking, RankingWeights, recency_bonus};

use serde::{Deserialize, Serialize};

use crate::index::IndexedEntity;

/// How the terms of a multi-word query combine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
    /// Every term must match (narrows as the user types more words).
    #[default]
    All,
    /// At least one term must match.
    Any,
}

/// Normalised free-text query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    terms: Vec<String>,
}

impl Query {
    /// Trim, lower-case and split on whitespace runs.
    #[must_use]
    pub fn parse(text: &str) -> Self {
        Self {
            terms: text.split_whitespace().map(str::to_lowercase).collect(),
        }
    }

    /// Parse a host-supplied value; anything but a string is an empty query.
    #[must_use]
    pub fn from_value(value: &serde_json::Value) -> Self {
        value.as_str().map(Self::parse).unwrap_or_default()
    }

    #[must_use]
    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Whether `entity` satisfies the terms under `mode`.
    ///
    /// An empty query matches everything.
    #[must_use]
    pub fn matches(&self, entity: &IndexedEntity, mode: MatchMode) -> bool {
        if self.terms.is_empty() {
            return true;
        }
        let keys = entity.search_keys();
        match mode {
            MatchMode::All => self.terms.iter().all(|term| keys.contains(term)),
            MatchMode::Any => self.terms.iter().any(|term| keys.contains(term)),
        }
    }
}

/// Engine options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryOptions {
    pub match_mode: MatchMode,
    /// Page limit; `None` disables paging.
    pub limit: Option<usize>,
    pub grouping: Grouping,
}

impl Default for QueryOptions {
    fn default() -> Self {
        Self {
            match_mode: MatchMode::All,
            limit: Some(30),
            grouping: Grouping::None,
        }
    }
}

/// Outcome class of a query, as shown by the card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryStatus {
    /// Nothing typed and no facet selected: invite the user to search.
    Prompt,
    /// At least one entity matched.
    Results,
    /// The query ran and nothing matched.
    NoMatches,
}

/// Result of one query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QueryOutcome {
    pub status: QueryStatus,
    /// Matches in engine order, truncated to the limit.
    pub entities: Vec<IndexedEntity>,
    /// Groups over `entities`; empty when grouping is disabled.
    pub groups: Vec<Group>,
    /// Matches before truncation.
    pub total_matches: usize,
    /// Whether a larger limit would return more entities.
    pub has_more: bool,
}

impl QueryOutcome {
    /// The zero-result prompt outcome.
    #[must_use]
    pub fn prompt() -> Self {
        Self {
            status: QueryStatus::Prompt,
            entities: Vec::new(),
            groups: Vec::new(),
            total_matches: 0,
            has_more: false,
        }
    }

    /// Entities of `group`, in engine order.
    pub fn members<'a>(&'a self, group: &'a Group) -> impl Iterator<Item = &'a IndexedEntity> + 'a {
        group
            .members
            .iter()
            .filter_map(|&position| self.entities.get(position))
    }
}

/// Run a query over `entities` (in index order).
#[must_use]
pub fn run(
    entities: &[IndexedEntity],
    query: &Query,
    filters: &Filters,
    options: &QueryOptions,
    ranking: Option<&Ranking<'_>>,
) -> QueryOutcome {
    if query.is_empty() && !filters.is_active() {
        return QueryOutcome::prompt();
    }

    let mut matches: Vec<&IndexedEntity> = entities
        .iter()
        .filter(|entity| filters.admits(entity))
        .filter(|entity| query.matches(entity, options.match_mode))
        .collect();

    if let Some(ranking) = ranking {
        ranking.sort(&mut matches, query);
    }

    let total_matches = matches.len();
    let has_more = options.limit.is_some_and(|limit| total_matches > limit);
    if let Some(limit) = options.limit {
        matches.truncate(limit);
    }

    let entities: Vec<IndexedEntity> = matches.into_iter().cloned().collect();
    let groups = options.grouping.apply(&entities);
    let status = if entities.is_empty() {
        QueryStatus::NoMatches
    } else {
        QueryStatus::Results
    };

    QueryOutcome {
        status,
        entities,
        groups,
        total_matches,
        has_more,
    }
}
