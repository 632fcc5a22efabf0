//! Usage-based ranking.
//!
//! `score = count * usage_weight + recency_bonus + area_match_bonus + name_match_bonus`

use serde::{Deserialize, Serialize};

use super::Query;
use crate::index::IndexedEntity;
use crate::time::{Timestamp, days_between};
use crate::usage::{UsageRecord, UsageTable};

/// Ranking weights. Every field has a default so a partial table is valid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RankingWeights {
    /// Points per recorded use.
    pub usage_weight: f64,
    /// Bonus for an entity used just now.
    pub recency_max: f64,
    /// Days after which the recency bonus reaches zero.
    pub recency_window_days: f64,
    /// Bonus when a term matches the area name.
    pub area_match_bonus: f64,
    /// Bonus when a term matches the display name.
    pub name_match_bonus: f64,
}

impl Default for RankingWeights {
    fn default() -> Self {
        Self {
            usage_weight: 10.0,
            recency_max: 100.0,
            recency_window_days: 7.0,
            area_match_bonus: 50.0,
            name_match_bonus: 25.0,
        }
    }
}

/// Linear decay from `recency_max` at `now` to zero after the window.
#[must_use]
pub fn recency_bonus(weights: &RankingWeights, last_used_at: Timestamp, now: Timestamp) -> f64 {
    let age = days_between(last_used_at, now).max(0.0);
    let window = weights.recency_window_days.max(f64::MIN_POSITIVE);
    (weights.recency_max * (1.0 - age / window)).max(0.0)
}

/// Everything needed to rank a result list at a point in time.
#[derive(Debug, Clone, Copy)]
pub struct Ranking<'a> {
    pub weights: &'a RankingWeights,
    pub usage: &'a UsageTable,
    pub now: Timestamp,
}

impl Ranking<'_> {
    /// Score of `entity` for `query`.
    #[must_use]
    pub fn score(&self, entity: &IndexedEntity, query: &Query) -> f64 {
        let usage = self
            .usage
            .get(entity.entity_id().as_str())
            .map_or(0.0, |record| self.usage_score(record));

        let keys = entity.search_keys();
        let area_bonus = if query.terms().iter().any(|t| keys.area_name.contains(t.as_str())) {
            self.weights.area_match_bonus
        } else {
            0.0
        };
        let name_bonus = if query
            .terms()
            .iter()
            .any(|t| keys.display_name.contains(t.as_str()))
        {
            self.weights.name_match_bonus
        } else {
            0.0
        };

        usage + area_bonus + name_bonus
    }

    fn usage_score(&self, record: &UsageRecord) -> f64 {
        f64::from(record.count) * self.weights.usage_weight
            + recency_bonus(self.weights, record.last_used_at, self.now)
    }

    /// Sort `entities` by descending score; equal scores keep their order.
    pub fn sort(&self, entities: &mut [&IndexedEntity], query: &Query) {
        entities.sort_by_cached_key(|entity| std::cmp::Reverse(OrderedScore(self.score(entity, query))));
    }
}

/// Total order over `f64` scores for sorting.
#[derive(Debug, Clone, Copy, PartialEq)]
struct OrderedScore(f64);

impl Eq for OrderedScore {}

impl PartialOrd for OrderedScore {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for OrderedScore {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.0.total_cmp(&other.0)
    }
}
