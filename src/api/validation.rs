// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Request validation.
//!
//! [`Validated<S>`] merges the JSON body and the query string of a request
//! into one object (query keys win), decodes it into the schema `S`, runs the
//! `validator` rules and hands the handler the converted value. Any failure
//! short-circuits with a 422 [`ApiError::Validation`] whose text is every
//! field message joined with `,` in [`Schema::FIELDS`] order.
//!
//! ```text
//! body {"title":"a","price":"3"} + query ?price=4
//!     -> {"title":"a","price":"4"}
//!     -> CreateItemRequest { title: Some("a"), price: Some(4.0), .. }
//!     -> validate()
//!     -> NewItem
//! ```

use std::collections::HashMap;

use axum::{
    body::Bytes,
    extract::{FromRequest, Query, Request}
};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use validator::{Validate, ValidationErrors};

use super::error::ApiError;

/// A request schema: decodable, validatable, convertible.
pub trait Schema: DeserializeOwned + Validate {
    /// Field names in the order their messages are reported.
    const FIELDS: &'static [&'static str];

    /// Value handed to the handler after validation.
    type Output;

    /// Convert a validated schema. `None` only if a rule that `validate`
    /// enforces did not hold.
    fn into_output(self) -> Option<Self::Output>;
}

/// Extractor yielding a validated and converted request.
pub struct Validated<S: Schema>(pub S::Output);

impl<S, St> FromRequest<St> for Validated<S>
where
    S: Schema,
    St: Send + Sync
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &St) -> Result<Self, Self::Rejection> {
        let query = Query::<HashMap<String, String>>::try_from_uri(req.uri())
            .map_err(|e| reject(e.body_text()))?
            .0;
        let body = Bytes::from_request(req, state)
            .await
            .map_err(|e| reject(e.body_text()))?;

        let params = merge(body_object(&body)?, query);
        let schema: S = serde_json::from_value(Value::Object(params))
            .map_err(|e| reject(e.to_string()))?;

        if let Err(errors) = schema.validate() {
            return Err(reject(collect_messages(&errors, S::FIELDS)));
        }

        schema
            .into_output()
            .map(Validated)
            .ok_or_else(|| reject("request could not be converted".to_string()))
    }
}

fn reject(message: String) -> ApiError {
    tracing::debug!(%message, "request rejected by validation");
    ApiError::Validation(message)
}

/// Decode a request body. An empty body is an empty object.
fn body_object(body: &[u8]) -> Result<Map<String, Value>, ApiError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Map::new());
    }
    match serde_json::from_slice(body) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Err(reject("request body must be a JSON object".to_string())),
        Err(e) => Err(reject(e.to_string()))
    }
}

/// Overlay query parameters onto body fields.
fn merge(mut body: Map<String, Value>, query: HashMap<String, String>) -> Map<String, Value> {
    for (key, value) in query {
        body.insert(key, Value::String(value));
    }
    body
}

/// Every field message, in `fields` order, joined with `,`.
pub fn collect_messages(errors: &ValidationErrors, fields: &[&str]) -> String {
    let by_field = errors.field_errors();
    let mut messages = Vec::new();
    for field in fields {
        let Some(field_errors) = by_field.get(*field) else {
            continue;
        };
        for error in field_errors.iter() {
            messages.push(
                error
                    .message
                    .as_deref()
                    .map_or_else(|| format!("\"{field}\" is invalid"), str::to_string)
            );
        }
    }
    messages.join(",")
}

/// Deserializers accepting either JSON numbers or numeric strings, since
/// query string values always arrive as strings.
pub mod lenient {
    use std::{fmt, str::FromStr};

    use serde::{Deserialize, Deserializer, de::Error};
    use serde_json::Value;

    /// A string parsed through `FromStr`, reporting the parse error.
    pub fn parsed<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: FromStr,
        T::Err: fmt::Display
    {
        Option::<String>::deserialize(deserializer)?
            .map(|s| s.parse().map_err(D::Error::custom))
            .transpose()
    }

    /// A finite number, or a string holding one.
    pub fn number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
        let parsed = match Option::<Value>::deserialize(deserializer)? {
            None | Some(Value::Null) => return Ok(None),
            Some(Value::Number(n)) => n.as_f64(),
            Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
            Some(_) => None
        };
        match parsed {
            Some(v) if v.is_finite() => Ok(Some(v)),
            _ => Err(D::Error::custom("expected a number"))
        }
    }

    /// An integer, or a string holding one.
    pub fn integer<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<i64>, D::Error> {
        let parsed = match Option::<Value>::deserialize(deserializer)? {
            None | Some(Value::Null) => return Ok(None),
            Some(Value::Number(n)) => n.as_i64(),
            Some(Value::String(s)) => s.trim().parse::<i64>().ok(),
            Some(_) => None
        };
        parsed
            .map(Some)
            .ok_or_else(|| D::Error::custom("expected an integer"))
    }

    /// Like [`integer`], but a blank string counts as absent.
    pub fn optional_integer<'de, D: Deserializer<'de>>(
        deserializer: D
    ) -> Result<Option<i64>, D::Error> {
        match Option::<Value>::deserialize(deserializer)? {
            Some(Value::String(s)) if s.trim().is_empty() => Ok(None),
            value => integer(value.unwrap_or(Value::Null)).map_err(D::Error::custom)
        }
    }
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;
    use serde_json::json;

    use super::*;

    #[derive(Debug, Deserialize, Validate)]
    struct Sample {
        #[validate(
            required(message = "\"name\" is required"),
            length(min = 1, message = "\"name\" is not allowed to be empty")
        )]
        name: Option<String>,

        #[serde(default, deserialize_with = "lenient::number")]
        #[validate(
            required(message = "\"amount\" is required"),
            range(exclusive_min = 0.0, message = "\"amount\" must be a positive number")
        )]
        amount: Option<f64>,

        #[serde(default, deserialize_with = "lenient::integer")]
        count: Option<i64>
    }

    fn sample(value: Value) -> Result<Sample, serde_json::Error> {
        serde_json::from_value(value)
    }

    #[test]
    fn empty_body_is_empty_object() {
        assert!(body_object(b"").unwrap().is_empty());
        assert!(body_object(b"  \n").unwrap().is_empty());
    }

    #[test]
    fn non_object_body_is_rejected() {
        assert_eq!(
            body_object(b"[1,2]").unwrap_err(),
            ApiError::Validation("request body must be a JSON object".into())
        );
        assert!(matches!(body_object(b"{oops"), Err(ApiError::Validation(_))));
    }

    #[test]
    fn query_overrides_body() {
        let body = body_object(br#"{"name":"body","amount":1}"#).unwrap();
        let query = HashMap::from([("name".to_string(), "query".to_string())]);
        let merged = merge(body, query);
        assert_eq!(merged["name"], json!("query"));
        assert_eq!(merged["amount"], json!(1));
    }

    #[test]
    fn lenient_number_accepts_strings() {
        let p = sample(json!({"name": "a", "amount": "2.5", "count": "7"})).unwrap();
        assert_eq!(p.amount, Some(2.5));
        assert_eq!(p.count, Some(7));

        let p = sample(json!({"amount": 3, "count": 4})).unwrap();
        assert_eq!(p.amount, Some(3.0));
        assert_eq!(p.count, Some(4));
    }

    #[test]
    fn lenient_rejects_garbage() {
        let err = sample(json!({"amount": "lots"})).unwrap_err();
        assert!(err.to_string().contains("expected a number"), "{err}");
        assert!(sample(json!({"amount": "NaN"})).is_err());
        assert!(sample(json!({"amount": true})).is_err());
        let err = sample(json!({"count": 1.5})).unwrap_err();
        assert!(err.to_string().contains("expected an integer"), "{err}");
    }

    #[test]
    fn missing_and_null_are_none() {
        let p = sample(json!({"amount": null})).unwrap();
        assert_eq!(p.amount, None);
        assert_eq!(p.count, None);
    }

    #[test]
    fn messages_follow_field_order() {
        let p = sample(json!({"name": "", "amount": -5})).unwrap();
        let errors = p.validate().unwrap_err();
        assert_eq!(
            collect_messages(&errors, &["name", "amount"]),
            "\"name\" is not allowed to be empty,\"amount\" must be a positive number"
        );
        assert_eq!(
            collect_messages(&errors, &["amount", "name"]),
            "\"amount\" must be a positive number,\"name\" is not allowed to be empty"
        );
    }

    #[test]
    fn required_messages() {
        let p = sample(json!({})).unwrap();
        let errors = p.validate().unwrap_err();
        assert_eq!(
            collect_messages(&errors, &["name", "amount"]),
            "\"name\" is required,\"amount\" is required"
        );
    }
}
