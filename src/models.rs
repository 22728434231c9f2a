use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::error::ApiError;
use crate::hex::{validate, ValidationError};
use crate::store::Entries;

/// Response type for successful bulk writes
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct BulkResponse {
    /// Number of entries the store accepted
    pub stored: usize,
}

/// A fully validated bulk write
///
/// Keys that differ only by case collapse into one entry; the one that
/// appears last in the payload wins.
#[derive(Debug)]
pub struct BulkRequest {
    pub entries: Entries,
}

impl BulkRequest {
    /// Parse and validate a raw JSON body
    ///
    /// Fails on the first bad key or value, so nothing is written unless the
    /// whole batch is well formed.
    pub fn from_json(body: &[u8]) -> Result<Self, ApiError> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Err(ApiError::validation("payload", ValidationError::EmptyPayload));
        }

        let payload: JsonValue = serde_json::from_slice(body)
            .map_err(|e| ApiError::MalformedBody(format!("JSON parse error: {}", e)))?;

        let JsonValue::Object(map) = payload else {
            return Err(ApiError::MalformedBody(
                "expected a JSON object of key/value pairs".to_string(),
            ));
        };

        if map.is_empty() {
            return Err(ApiError::validation("payload", ValidationError::EmptyPayload));
        }

        let mut entries = Entries::new();
        for (raw_key, raw_value) in map {
            let key = validate(&raw_key)
                .map_err(|e| ApiError::validation(format!("key {:?}", raw_key), e))?;

            let value = match &raw_value {
                JsonValue::String(s) => validate(s),
                other => Err(ValidationError::InvalidFormat(format!(
                    "expected a string, got {}",
                    other
                ))),
            }
            .map_err(|e| ApiError::validation(format!("value for key {:?}", raw_key), e))?;

            entries.insert(key, value);
        }

        Ok(Self { entries })
    }
}
