//! Collection decoding with per-collection error reporting.

use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use hubsearch_domain::entity::{LiveState, StateObject};
use hubsearch_domain::error::DataLoadError;
use hubsearch_domain::id::EntityId;

/// An element of the array form of `states`.
#[derive(Deserialize)]
struct StateRecord {
    entity_id: EntityId,
    #[serde(flatten)]
    object: StateObject,
}

/// Decode `document[collection]` as an array of `T`.
///
/// An absent or `null` collection decodes as empty.
pub(crate) fn records<T: DeserializeOwned>(
    document: &Value,
    collection: &'static str,
) -> Result<Vec<T>, DataLoadError> {
    match document.get(collection) {
        None | Some(Value::Null) => {
            tracing::debug!(collection, "collection absent, treated as empty");
            Ok(Vec::new())
        }
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| decode(item, collection))
            .collect(),
        Some(_) => Err(DataLoadError::NotEnumerable { collection }),
    }
}

/// Decode a `states` value in either object or array form.
pub(crate) fn states(value: Option<&Value>) -> Result<LiveState, DataLoadError> {
    const COLLECTION: &str = "states";

    match value {
        None | Some(Value::Null) => Ok(LiveState::new()),
        Some(Value::Object(map)) => map
            .iter()
            .map(|(entity_id, item)| {
                let object: StateObject = decode(item, COLLECTION)?;
                Ok((EntityId::new(entity_id.as_str()), object))
            })
            .collect(),
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| {
                let record: StateRecord = decode(item, COLLECTION)?;
                Ok((record.entity_id, record.object))
            })
            .collect(),
        Some(_) => Err(DataLoadError::NotEnumerable {
            collection: COLLECTION,
        }),
    }
}

fn decode<T: DeserializeOwned>(item: &Value, collection: &'static str) -> Result<T, DataLoadError> {
    T::deserialize(item).map_err(|source| DataLoadError::Decode { collection, source })
}
