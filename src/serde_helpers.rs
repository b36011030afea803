//! Serde helpers for shaping API responses.
//!
//! When the `tracing` feature is enabled, decode failures are logged together with the
//! JSON path that did not match the expected shape, e.g. the index of the first row of a
//! table that is not an object.

use serde::de::DeserializeOwned;
use serde_json::Value;

/// Deserialize a JSON value into the shape an endpoint returns.
///
/// # Example
///
/// ```ignore
/// let json = serde_json::json!([{ "raceId": 1 }, 2]);
/// let result: crate::Result<Table> = deserialize_with_context(json);
/// // Logs: ERROR path=[1] error="invalid type: integer `2`, expected a map"
/// ```
#[cfg(feature = "tracing")]
pub fn deserialize_with_context<T: DeserializeOwned>(value: Value) -> crate::Result<T> {
    use std::any::type_name;

    tracing::trace!(
        type_name = %type_name::<T>(),
        json = %value,
        "deserializing JSON"
    );

    let result: T = serde_path_to_error::deserialize(value).map_err(|err| {
        let path = err.path().to_string();

        tracing::error!(
            type_name = %type_name::<T>(),
            path = %path,
            error = %err.inner(),
            "deserialization failed"
        );

        err.into_inner()
    })?;

    Ok(result)
}

/// Pass-through deserialization when tracing is disabled.
#[cfg(not(feature = "tracing"))]
pub fn deserialize_with_context<T: DeserializeOwned>(value: Value) -> crate::Result<T> {
    Ok(serde_json::from_value(value)?)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::deserialize_with_context;
    use crate::error::Kind;
    use crate::types::{Record, Table};

    #[test]
    fn deserialize_object_as_record() {
        let json = json!({ "code": "BK", "description": "Black" });

        let record: Record = deserialize_with_context(json).expect("deserialization failed");
        assert_eq!(record["code"], "BK");
        assert_eq!(record["description"], "Black");
    }

    #[test]
    fn deserialize_array_as_record_fails() {
        let json = json!([{ "code": "BK" }]);

        let err = deserialize_with_context::<Record>(json).unwrap_err();
        assert_eq!(err.kind(), Kind::Decode);
    }

    #[test]
    fn deserialize_object_as_table_fails() {
        let json = json!({ "code": "BK" });

        let err = deserialize_with_context::<Table>(json).unwrap_err();
        assert_eq!(err.kind(), Kind::Decode);
    }

    #[test]
    fn deserialize_table_with_scalar_row_fails() {
        let json = json!([{ "raceId": 1 }, 2]);

        let err = deserialize_with_context::<Table>(json).unwrap_err();
        assert_eq!(err.kind(), Kind::Decode);
    }

    #[test]
    fn deserialize_empty_array_as_table() {
        let table: Table = deserialize_with_context(json!([])).expect("deserialization failed");
        assert!(table.is_empty());
    }
}
