use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRequest, Request},
};
use serde_json::{Map, Value};

use crate::error::ApiError;

/// Request body read as an untyped JSON object.
///
/// Content type is not enforced. An empty body reads as `{}`; anything that is
/// not a JSON object is rejected with 400 before any handler logic runs.
#[derive(Debug, Clone)]
pub struct JsonBody(pub Value);

impl JsonBody {
    /// String value of `field`.
    ///
    /// Missing and falsy values (`null`, `""`, `false`, `0`) read as absent.
    pub fn str_field(&self, field: &str) -> Result<Option<&str>, &Value> {
        match self.0.get(field) {
            None | Some(Value::Null) | Some(Value::Bool(false)) => Ok(None),
            Some(Value::Number(n)) if n.as_f64() == Some(0.0) => Ok(None),
            Some(Value::String(s)) if s.is_empty() => Ok(None),
            Some(Value::String(s)) => Ok(Some(s)),
            Some(other) => Err(other),
        }
    }
}

#[async_trait]
impl<S> FromRequest<S> for JsonBody
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| ApiError::bad_request(format!("Unreadable request body: {}", e)))?;

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self(Value::Object(Map::new())));
        }

        match serde_json::from_slice::<Value>(&bytes) {
            Ok(value @ Value::Object(_)) => Ok(Self(value)),
            Ok(_) => Err(ApiError::invalid_json("Invalid JSON body: expected an object")),
            Err(e) => Err(ApiError::invalid_json(format!("Invalid JSON body: {}", e))),
        }
    }
}
