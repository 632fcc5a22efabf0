//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts via `#[from]`.
//! Only [`ConfigurationError`] is ever surfaced to the host; load failures
//! degrade to an empty index.

/// Umbrella error carried across port boundaries.
#[derive(Debug, thiserror::Error)]
pub enum HubSearchError {
    #[error("data load error")]
    DataLoad(#[from] DataLoadError),

    #[error("configuration error")]
    Configuration(#[from] ConfigurationError),
}

/// The host registries or live state could not be turned into records.
#[derive(Debug, thiserror::Error)]
pub enum DataLoadError {
    /// A collection was expected to be an array (or map) and was not.
    #[error("{collection} is not enumerable")]
    NotEnumerable {
        /// Name of the offending collection (`areas`, `devices`, …).
        collection: &'static str,
    },

    /// A collection was enumerable but one of its records could not be decoded.
    #[error("failed to decode {collection}")]
    Decode {
        collection: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// The registry call itself failed.
    #[error("registry source failed")]
    Source(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl DataLoadError {
    /// Wrap an arbitrary adapter failure.
    pub fn from_source(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Source(Box::new(err))
    }
}

/// Card setup was given an unusable configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigurationError {
    #[error("configuration is missing")]
    Missing,

    #[error("configuration must be an object")]
    NotAnObject,

    #[error("failed to decode configuration")]
    Decode(#[source] serde_json::Error),

    #[error("invalid option `{option}`: {reason}")]
    Invalid {
        option: &'static str,
        reason: &'static str,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_name_collection_in_not_enumerable_message() {
        let err = DataLoadError::NotEnumerable {
            collection: "devices",
        };
        assert_eq!(err.to_string(), "devices is not enumerable");
    }

    #[test]
    fn should_describe_invalid_option() {
        let err = ConfigurationError::Invalid {
            option: "page_size",
            reason: "must be greater than zero",
        };
        assert_eq!(
            err.to_string(),
            "invalid option `page_size`: must be greater than zero"
        );
    }

    #[test]
    fn should_convert_into_umbrella_error() {
        let err: HubSearchError = ConfigurationError::Missing.into();
        assert!(matches!(
            err,
            HubSearchError::Configuration(ConfigurationError::Missing)
        ));
    }

    #[test]
    fn should_convert_load_failure_into_umbrella_error() {
        let err: HubSearchError = DataLoadError::NotEnumerable {
            collection: "areas",
        }
        .into();
        assert!(matches!(
            err,
            HubSearchError::DataLoad(DataLoadError::NotEnumerable { collection: "areas" })
        ));
    }

    #[test]
    fn should_keep_source_error_when_wrapping_adapter_failure() {
        let io = std::io::Error::other("host unreachable");
        let err = DataLoadError::from_source(io);
        let source = std::error::Error::source(&err).unwrap();
        assert_eq!(source.to_string(), "host unreachable");
    }
}
