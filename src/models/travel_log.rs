use std::collections::HashMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

/// Rejection from the travel log validator, one message per offending field
#[derive(Debug, Clone, Error, PartialEq)]
#[error("Invalid travel log: {}", describe(.field_errors))]
pub struct ValidationError {
    pub field_errors: HashMap<String, String>,
}

fn describe(field_errors: &HashMap<String, String>) -> String {
    let mut fields: Vec<_> = field_errors.keys().map(String::as_str).collect();
    fields.sort_unstable();
    fields.join(", ")
}

/// Fields that fall back to a default when a create request omits them
const DEFAULTED_FIELDS: &[&str] = &["rating"];

/// A validated travel log as it is persisted.
///
/// Only these fields ever reach the store: request-level keys such as
/// `apiKey` and `logID` have no place in this type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TravelLog {
    pub title: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comments: Option<String>,
    pub image: String,
    pub rating: f64,
    pub latitude: f64,
    pub longitude: f64,
    pub visit_date: DateTime<Utc>,
}

impl TravelLog {
    /// Validate an untyped request body into a `TravelLog`.
    ///
    /// Unknown keys are dropped. Every field is checked so the error lists all
    /// problems at once.
    pub fn parse(input: &Value) -> Result<Self, ValidationError> {
        let empty = Map::new();
        let object = match input {
            Value::Object(map) => map,
            _ => &empty,
        };

        let mut v = FieldValidator {
            object,
            errors: HashMap::new(),
        };

        let title = v.required_string("title");
        let description = v.required_string("description");
        let comments = v.optional_string("comments");
        let image = v.url("image");
        let rating = v.number("rating", 0.0..=10.0, Some(0.0));
        let latitude = v.number("latitude", -90.0..=90.0, None);
        let longitude = v.number("longitude", -180.0..=180.0, None);
        let visit_date = v.date("visitDate");

        if !v.errors.is_empty() {
            return Err(ValidationError { field_errors: v.errors });
        }

        match (title, description, image, rating, latitude, longitude, visit_date) {
            (
                Some(title),
                Some(description),
                Some(image),
                Some(rating),
                Some(latitude),
                Some(longitude),
                Some(visit_date),
            ) => Ok(Self {
                title,
                description,
                comments,
                image,
                rating,
                latitude,
                longitude,
                visit_date,
            }),
            _ => Err(ValidationError { field_errors: v.errors }),
        }
    }

    /// Validate a PATCH body into the field set to merge.
    ///
    /// Fields with a create-time default are left out when not submitted, so
    /// the stored value survives the merge.
    pub fn parse_update(input: &Value) -> Result<Map<String, Value>, ValidationError> {
        let mut document = Self::parse(input)?.to_document();
        for field in DEFAULTED_FIELDS {
            if input.get(field).map_or(true, Value::is_null) {
                document.remove(*field);
            }
        }
        Ok(document)
    }

    /// Field set handed to the record store
    pub fn to_document(&self) -> Map<String, Value> {
        match serde_json::to_value(self) {
            Ok(Value::Object(map)) => map,
            // A struct of strings and finite numbers always serializes to an object
            _ => Map::new(),
        }
    }
}

struct FieldValidator<'a> {
    object: &'a Map<String, Value>,
    errors: HashMap<String, String>,
}

impl<'a> FieldValidator<'a> {
    fn fail<T>(&mut self, field: &str, message: impl Into<String>) -> Option<T> {
        self.errors.insert(field.to_string(), message.into());
        None
    }

    fn present(&self, field: &str) -> Option<&'a Value> {
        self.object.get(field).filter(|value| !value.is_null())
    }

    fn required_string(&mut self, field: &str) -> Option<String> {
        match self.present(field) {
            Some(Value::String(s)) if !s.trim().is_empty() => Some(s.trim().to_string()),
            Some(Value::String(_)) => self.fail(field, "must not be empty"),
            Some(_) => self.fail(field, "must be a string"),
            None => self.fail(field, "is required"),
        }
    }

    fn optional_string(&mut self, field: &str) -> Option<String> {
        match self.present(field) {
            Some(Value::String(s)) => Some(s.trim().to_string()),
            Some(_) => self.fail(field, "must be a string"),
            None => None,
        }
    }

    fn url(&mut self, field: &str) -> Option<String> {
        let raw = self.required_string(field)?;
        match url::Url::parse(&raw) {
            Ok(_) => Some(raw),
            Err(_) => self.fail(field, "must be a valid URL"),
        }
    }

    /// Numbers may arrive as JSON numbers or numeric strings
    fn number(
        &mut self,
        field: &str,
        range: std::ops::RangeInclusive<f64>,
        default: Option<f64>,
    ) -> Option<f64> {
        let number = match self.present(field) {
            Some(Value::Number(n)) => n.as_f64(),
            Some(Value::String(s)) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
            Some(_) => None,
            None => match default {
                Some(default) => return Some(default),
                None => return self.fail(field, "is required"),
            },
        };

        match number {
            Some(n) if range.contains(&n) => Some(n),
            Some(_) => self.fail(
                field,
                format!("must be between {} and {}", range.start(), range.end()),
            ),
            None => self.fail(field, "must be a number"),
        }
    }

    /// Accepts RFC 3339 timestamps or plain `YYYY-MM-DD` dates (midnight UTC)
    fn date(&mut self, field: &str) -> Option<DateTime<Utc>> {
        let raw = match self.present(field) {
            Some(Value::String(s)) => s.trim().to_string(),
            Some(_) => return self.fail(field, "must be a date string"),
            None => return self.fail(field, "is required"),
        };

        if let Ok(timestamp) = DateTime::parse_from_rfc3339(&raw) {
            return Some(timestamp.with_timezone(&Utc));
        }
        match NaiveDate::parse_from_str(&raw, "%Y-%m-%d")
            .ok()
            .and_then(|date| date.and_hms_opt(0, 0, 0))
        {
            Some(midnight) => Some(midnight.and_utc()),
            None => self.fail(field, "must be a valid date"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn kyoto() -> Value {
        json!({
            "apiKey": "K",
            "title": "  Kyoto  ",
            "description": "Temples and tea",
            "image": "https://example.com/kyoto.jpg",
            "rating": "8.5",
            "latitude": 35.0116,
            "longitude": 135.7681,
            "visitDate": "2024-04-02"
        })
    }

    #[test]
    fn parses_and_coerces_valid_input() {
        let log = TravelLog::parse(&kyoto()).unwrap();
        assert_eq!(log.title, "Kyoto");
        assert_eq!(log.rating, 8.5);
        assert_eq!(log.comments, None);
        assert_eq!(log.visit_date.to_rfc3339(), "2024-04-02T00:00:00+00:00");
    }

    #[test]
    fn document_never_contains_request_keys() {
        let mut input = kyoto();
        input["logID"] = json!("c1e5a8a2-4a52-4b3e-9d7e-111111111111");
        input["unexpected"] = json!(true);

        let document = TravelLog::parse(&input).unwrap().to_document();
        assert!(!document.contains_key("apiKey"));
        assert!(!document.contains_key("logID"));
        assert!(!document.contains_key("unexpected"));
        assert!(!document.contains_key("comments"));
        assert_eq!(document["visitDate"], json!("2024-04-02T00:00:00Z"));
        assert_eq!(document["title"], json!("Kyoto"));
    }

    #[test]
    fn rating_defaults_to_zero() {
        let mut input = kyoto();
        input.as_object_mut().unwrap().remove("rating");
        assert_eq!(TravelLog::parse(&input).unwrap().rating, 0.0);
    }

    #[test]
    fn update_leaves_out_unsubmitted_defaults() {
        let mut input = kyoto();
        input.as_object_mut().unwrap().remove("rating");
        let document = TravelLog::parse_update(&input).unwrap();
        assert!(!document.contains_key("rating"));
        assert!(!document.contains_key("comments"));
        assert_eq!(document["title"], json!("Kyoto"));

        input["rating"] = json!(null);
        assert!(!TravelLog::parse_update(&input).unwrap().contains_key("rating"));

        input["rating"] = json!(0);
        assert_eq!(TravelLog::parse_update(&input).unwrap()["rating"], json!(0.0));
    }

    #[test]
    fn accepts_rfc3339_visit_date() {
        let mut input = kyoto();
        input["visitDate"] = json!("2024-04-02T09:30:00+09:00");
        let log = TravelLog::parse(&input).unwrap();
        assert_eq!(log.visit_date.to_rfc3339(), "2024-04-02T00:30:00+00:00");
    }

    #[test]
    fn collects_every_field_error() {
        let input = json!({
            "title": "   ",
            "description": 7,
            "image": "not a url",
            "rating": 11,
            "latitude": "north",
            "visitDate": "yesterday"
        });

        let err = TravelLog::parse(&input).unwrap_err();
        let errors = &err.field_errors;
        assert_eq!(errors["title"], "must not be empty");
        assert_eq!(errors["description"], "must be a string");
        assert_eq!(errors["image"], "must be a valid URL");
        assert_eq!(errors["rating"], "must be between 0 and 10");
        assert_eq!(errors["latitude"], "must be a number");
        assert_eq!(errors["longitude"], "is required");
        assert_eq!(errors["visitDate"], "must be a valid date");
        assert_eq!(errors.len(), 7);
    }

    #[test]
    fn non_object_input_reports_required_fields() {
        let err = TravelLog::parse(&json!("Kyoto")).unwrap_err();
        assert_eq!(err.field_errors["title"], "is required");
        assert!(err.to_string().starts_with("Invalid travel log: "));
    }
}
