use tracing::warn;

use crate::config::ApiKey;
use crate::error::ApiError;

use super::body::JsonBody;

/// Shared-secret check for mutating requests.
///
/// The body's `apiKey` must equal the configured secret exactly; a missing or
/// non-string value is a mismatch.
pub fn authorize(api_key: &ApiKey, body: &JsonBody) -> Result<(), ApiError> {
    let candidate = body.0.get("apiKey").and_then(|v| v.as_str());
    if api_key.matches(candidate) {
        Ok(())
    } else {
        warn!("Rejected request with invalid API key");
        Err(ApiError::unauthorized())
    }
}
