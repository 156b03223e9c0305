//! Prediction request parsing and validation
//!
//! Field handling mirrors the form client: `peso` may arrive as a number or a
//! numeric string, and a missing field counts as empty rather than invalid.

use super::PredictError;
use crate::vocabulary::is_known_city;
use serde_json::{Map, Value};

/// A validated shipment to price, read from the `peso`, `inicio` and
/// `llegada` body fields.
#[derive(Debug, Clone, PartialEq)]
pub struct PredictionRequest {
    /// Package weight in kilograms, finite and > 0
    pub weight: f64,
    /// Origin city, in the vocabulary
    pub origin: String,
    /// Destination city, in the vocabulary
    pub destination: String,
}

impl PredictionRequest {
    /// Parse and validate a raw request body.
    ///
    /// Checks run in a fixed order so each bad input maps to one message:
    /// body, weight coercion, required fields, cities, weight sign.
    ///
    /// The weight-sign check also rejects `NaN` and `±inf` (parsed from
    /// strings such as `"inf"`). `+inf` is not a usable weight either, so it
    /// shares the "El peso debe ser mayor que 0" answer with non-positive
    /// values rather than surfacing as an internal error.
    pub fn from_body(body: &[u8]) -> Result<Self, PredictError> {
        let value: Value = serde_json::from_slice(body).map_err(|_| PredictError::NoJson)?;
        if !is_truthy(&value) {
            return Err(PredictError::NoJson);
        }
        let Value::Object(fields) = value else {
            return Err(PredictError::Internal(format!(
                "expected a JSON object, got {}",
                kind(&value)
            )));
        };
        Self::from_fields(&fields)
    }

    fn from_fields(fields: &Map<String, Value>) -> Result<Self, PredictError> {
        let weight = coerce_weight(fields.get("peso"))?;
        let origin = fields.get("inicio").unwrap_or(&Value::Null);
        let destination = fields.get("llegada").unwrap_or(&Value::Null);

        if weight == 0.0 || !is_truthy(origin) || !is_truthy(destination) {
            return Err(PredictError::MissingFields);
        }

        let (Some(origin), Some(destination)) = (known_city(origin), known_city(destination))
        else {
            return Err(PredictError::InvalidCity);
        };

        // NaN fails the comparison; +inf is grouped with non-positive weights
        if !(weight > 0.0) || !weight.is_finite() {
            return Err(PredictError::NonPositiveWeight);
        }

        Ok(Self { weight, origin: origin.to_string(), destination: destination.to_string() })
    }
}

fn known_city(value: &Value) -> Option<&str> {
    value.as_str().filter(|c| is_known_city(c))
}

/// Convert `peso` to a float; absent counts as zero.
fn coerce_weight(value: Option<&Value>) -> Result<f64, PredictError> {
    match value {
        None => Ok(0.0),
        Some(Value::Number(n)) => n.as_f64().ok_or_else(|| {
            PredictError::Internal(format!("could not convert number to float: {n}"))
        }),
        Some(Value::String(s)) => s.trim().parse::<f64>().map_err(|_| {
            PredictError::Internal(format!("could not convert string to float: '{s}'"))
        }),
        Some(Value::Bool(b)) => Ok(if *b { 1.0 } else { 0.0 }),
        Some(other) => Err(PredictError::Internal(format!(
            "float() argument must be a string or a number, not '{}'",
            kind(other)
        ))),
    }
}

/// Truthiness of a JSON value: null, false, zero and empty containers are falsy.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(body: &str) -> Result<PredictionRequest, PredictError> {
        PredictionRequest::from_body(body.as_bytes())
    }

    #[test]
    fn test_valid_numeric_weight() {
        let req = parse(r#"{"peso": 5, "inicio": "Lima", "llegada": "Cusco"}"#).unwrap();
        assert_eq!(req.weight, 5.0);
        assert_eq!(req.origin, "Lima");
        assert_eq!(req.destination, "Cusco");
    }

    #[test]
    fn test_weight_as_string() {
        let req = parse(r#"{"peso": " 2.5 ", "inicio": "Ica", "llegada": "Tacna"}"#).unwrap();
        assert_eq!(req.weight, 2.5);
    }

    #[test]
    fn test_empty_body() {
        assert!(matches!(parse(""), Err(PredictError::NoJson)));
    }

    #[test]
    fn test_malformed_body() {
        assert!(matches!(parse("{peso: 5"), Err(PredictError::NoJson)));
    }

    #[test]
    fn test_falsy_bodies() {
        for body in ["{}", "null", "[]", "0", "false", "\"\""] {
            assert!(matches!(parse(body), Err(PredictError::NoJson)), "body {body}");
        }
    }

    #[test]
    fn test_non_object_body_is_internal() {
        assert!(matches!(parse("[1, 2]"), Err(PredictError::Internal(_))));
    }

    #[test]
    fn test_missing_fields() {
        let cases = [
            r#"{"inicio": "Lima", "llegada": "Cusco"}"#,
            r#"{"peso": 5, "llegada": "Cusco"}"#,
            r#"{"peso": 5, "inicio": "Lima"}"#,
            r#"{"peso": 0, "inicio": "Lima", "llegada": "Cusco"}"#,
            r#"{"peso": "0", "inicio": "Lima", "llegada": "Cusco"}"#,
            r#"{"peso": 5, "inicio": "", "llegada": "Cusco"}"#,
            r#"{"peso": 5, "inicio": "Lima", "llegada": null}"#,
        ];
        for body in cases {
            assert!(matches!(parse(body), Err(PredictError::MissingFields)), "body {body}");
        }
    }

    #[test]
    fn test_unparseable_weight_is_internal() {
        let err = parse(r#"{"peso": "abc", "inicio": "Lima", "llegada": "Cusco"}"#).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Error en la predicción: could not convert string to float: 'abc'"
        );
    }

    #[test]
    fn test_null_weight_is_internal() {
        let err = parse(r#"{"peso": null, "inicio": "Lima", "llegada": "Cusco"}"#).unwrap_err();
        assert!(matches!(err, PredictError::Internal(_)));
    }

    #[test]
    fn test_invalid_city() {
        let cases = [
            r#"{"peso": 5, "inicio": "Atlantis", "llegada": "Cusco"}"#,
            r#"{"peso": 5, "inicio": "Lima", "llegada": "cusco"}"#,
            r#"{"peso": 5, "inicio": 7, "llegada": "Cusco"}"#,
        ];
        for body in cases {
            assert!(matches!(parse(body), Err(PredictError::InvalidCity)), "body {body}");
        }
    }

    #[test]
    fn test_city_checked_before_weight_sign() {
        let err = parse(r#"{"peso": -1, "inicio": "Atlantis", "llegada": "Cusco"}"#).unwrap_err();
        assert!(matches!(err, PredictError::InvalidCity));
    }

    #[test]
    fn test_negative_weight() {
        let err = parse(r#"{"peso": -1, "inicio": "Lima", "llegada": "Cusco"}"#).unwrap_err();
        assert_eq!(err.to_string(), "El peso debe ser mayor que 0");
    }

    #[test]
    fn test_non_finite_weight() {
        for peso in ["NaN", "inf", "-inf"] {
            let body = format!(r#"{{"peso": "{peso}", "inicio": "Lima", "llegada": "Cusco"}}"#);
            let err = parse(&body).unwrap_err();
            assert!(matches!(err, PredictError::NonPositiveWeight), "peso {peso}");
        }
    }

    #[test]
    fn test_positive_infinity_is_a_client_error() {
        let err = parse(r#"{"peso": "inf", "inicio": "Lima", "llegada": "Cusco"}"#).unwrap_err();
        assert!(err.is_client_error());
        assert_eq!(err.to_string(), "El peso debe ser mayor que 0");
    }

    #[test]
    fn test_boolean_weight() {
        let req = parse(r#"{"peso": true, "inicio": "Lima", "llegada": "Cusco"}"#).unwrap();
        assert_eq!(req.weight, 1.0);
    }

    #[test]
    fn test_extra_fields_ignored() {
        let req =
            parse(r#"{"peso": 1, "inicio": "Lima", "llegada": "Lima", "nota": "frágil"}"#).unwrap();
        assert_eq!(req.origin, req.destination);
    }
}
