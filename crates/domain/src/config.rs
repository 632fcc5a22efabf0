//! Card configuration — the options a dashboard passes when setting up a search card.
//!
//! Every option has a default, but the configuration object itself is
//! required: setup with no configuration fails fast with
//! [`ConfigurationError::Missing`].

use serde::{Deserialize, Serialize};

use crate::error::ConfigurationError;
use crate::index::{IndexOptions, UnassignedPolicy};
use crate::query::{Grouping, MatchMode, QueryOptions, RankingWeights};

/// Upper bound for the keystroke debounce window, in milliseconds.
pub const MAX_DEBOUNCE_MS: u64 = 2_000;

/// Label used for entities without a resolvable area.
pub const DEFAULT_UNASSIGNED_LABEL: &str = "Unknown";

/// Options of a single search card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CardConfig {
    /// Optional card header.
    pub title: Option<String>,
    /// How multiple search terms combine.
    pub match_mode: MatchMode,
    /// Whether entities without an area are listed.
    pub unassigned: UnassignedPolicy,
    /// Area name shown for entities without an area.
    pub unassigned_label: String,
    /// Result grouping.
    pub group_by: Grouping,
    /// Results per page.
    pub page_size: usize,
    /// When `false`, every match is returned at once.
    pub paginate: bool,
    /// Quiet window before a keystroke triggers a query.
    pub debounce_ms: u64,
    /// Usage-based ranking; disabled when absent.
    pub ranking: Option<RankingWeights>,
}

impl Default for CardConfig {
    fn default() -> Self {
        Self {
            title: None,
            match_mode: MatchMode::default(),
            unassigned: UnassignedPolicy::default(),
            unassigned_label: DEFAULT_UNASSIGNED_LABEL.to_string(),
            group_by: Grouping::Area,
            page_size: 30,
            paginate: true,
            debounce_ms: 200,
            ranking: None,
        }
    }
}

impl CardConfig {
    /// Decode and validate the configuration handed over by the host.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::Missing`] when no configuration (or
    /// `null`) is given, [`ConfigurationError::NotAnObject`] for any other
    /// non-object value, and decode/validation errors otherwise.
    pub fn from_value(value: Option<&serde_json::Value>) -> Result<Self, ConfigurationError> {
        let value = match value {
            None | Some(serde_json::Value::Null) => return Err(ConfigurationError::Missing),
            Some(value @ serde_json::Value::Object(_)) => value,
            Some(_) => return Err(ConfigurationError::NotAnObject),
        };
        let config: Self =
            serde_json::from_value(value.clone()).map_err(ConfigurationError::Decode)?;
        config.validate()?;
        Ok(config)
    }

    /// Check option invariants.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::Invalid`] naming the first bad option.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.page_size == 0 {
            return Err(ConfigurationError::Invalid {
                option: "page_size",
                reason: "must be greater than zero",
            });
        }
        if self.debounce_ms > MAX_DEBOUNCE_MS {
            return Err(ConfigurationError::Invalid {
                option: "debounce_ms",
                reason: "must not exceed 2000",
            });
        }
        if self.unassigned_label.trim().is_empty() {
            return Err(ConfigurationError::Invalid {
                option: "unassigned_label",
                reason: "must not be blank",
            });
        }
        if let Some(ranking) = &self.ranking {
            if ranking.recency_window_days <= 0.0 {
                return Err(ConfigurationError::Invalid {
                    option: "ranking.recency_window_days",
                    reason: "must be positive",
                });
            }
        }
        Ok(())
    }

    /// Options for the registry joiner.
    #[must_use]
    pub fn index_options(&self) -> IndexOptions {
        IndexOptions {
            unassigned: self.unassigned,
            unassigned_label: self.unassigned_label.clone(),
        }
    }

    /// Options for the query engine.
    #[must_use]
    pub fn query_options(&self) -> QueryOptions {
        QueryOptions {
            match_mode: self.match_mode,
            limit: self.paginate.then_some(self.page_size),
            grouping: self.group_by,
        }
    }

    /// Keystroke quiet window.
    #[must_use]
    pub fn debounce(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.debounce_ms)
    }

    /// Layout height hint for the dashboard, in rows.
    #[must_use]
    pub const fn card_size() -> u32 {
        3
    }
}
