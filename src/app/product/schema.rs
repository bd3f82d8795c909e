//! Request payload schemas
//!
//! `CreateProduct` and `UpdateProduct` are independent types. They agree on
//! one contract: both describe the fields listed in [`PRODUCT_FIELDS`] with
//! the same string types and length limits. Creation requires every field;
//! an update carries any subset and only the fields actually present end up
//! in the resulting change-set. An update may send `"description": null` to
//! clear the description; `header` and `owner` are never nullable.

use serde::{de::DeserializeOwned, Deserialize, Deserializer, Serialize};
use serde_json::Value;
use validator::{Validate, ValidationErrors};

use super::model::{NewProduct, ProductChanges};

/// Client-writable fields, in declaration order. Violations are reported
/// for the first offending field in this order.
pub const PRODUCT_FIELDS: [&str; 3] = ["header", "description", "owner"];

/// A single sanitized validation failure, as sent back to the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    /// Path to the offending field; empty when the body as a whole is bad.
    pub loc: Vec<String>,
    #[serde(rename = "type")]
    pub code: String,
    pub msg: String,
}

impl Violation {
    pub fn new(loc: &[&str], code: &str, msg: impl Into<String>) -> Self {
        Self {
            loc: loc.iter().map(|s| s.to_string()).collect(),
            code: code.to_string(),
            msg: msg.into(),
        }
    }

    pub fn body(msg: impl Into<String>) -> Self {
        Self::new(&[], "json_invalid", msg)
    }
}

/// An input shape that can be checked with [`validate`].
pub trait Schema: DeserializeOwned + Validate {
    /// Fields that must be present in the payload.
    const REQUIRED: &'static [&'static str];
    /// Fields that may be sent as JSON `null`.
    const NULLABLE: &'static [&'static str];
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateProduct {
    #[validate(length(
        max = 100,
        code = "string_too_long",
        message = "String should have at most 100 characters"
    ))]
    pub header: String,
    #[validate(length(
        max = 2048,
        code = "string_too_long",
        message = "String should have at most 2048 characters"
    ))]
    pub description: String,
    #[validate(length(
        max = 100,
        code = "string_too_long",
        message = "String should have at most 100 characters"
    ))]
    pub owner: String,
}

impl Schema for CreateProduct {
    const REQUIRED: &'static [&'static str] = &PRODUCT_FIELDS;
    const NULLABLE: &'static [&'static str] = &[];
}

impl From<CreateProduct> for NewProduct {
    fn from(input: CreateProduct) -> Self {
        Self {
            header: input.header,
            description: input.description,
            owner: input.owner,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateProduct {
    #[validate(length(
        max = 100,
        code = "string_too_long",
        message = "String should have at most 100 characters"
    ))]
    pub header: Option<String>,
    /// Absent: `None`. Explicit null: `Some(None)`.
    #[serde(default, deserialize_with = "present")]
    #[validate(length(
        max = 2048,
        code = "string_too_long",
        message = "String should have at most 2048 characters"
    ))]
    pub description: Option<Option<String>>,
    #[validate(length(
        max = 100,
        code = "string_too_long",
        message = "String should have at most 100 characters"
    ))]
    pub owner: Option<String>,
}

impl Schema for UpdateProduct {
    const REQUIRED: &'static [&'static str] = &[];
    const NULLABLE: &'static [&'static str] = &["description"];
}

/// Marks a field as present, keeping an explicit `null` apart from a missing key.
fn present<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Some)
}

impl From<UpdateProduct> for ProductChanges {
    fn from(input: UpdateProduct) -> Self {
        Self {
            header: input.header,
            description: input.description,
            owner: input.owner,
        }
    }
}

/// Checks `raw` against schema `S` and returns the typed payload, or the
/// first violation found.
pub fn validate<S: Schema>(raw: Value) -> Result<S, Violation> {
    let Value::Object(fields) = &raw else {
        return Err(Violation::new(
            &[],
            "model_type",
            "Input should be a valid dictionary",
        ));
    };

    for name in PRODUCT_FIELDS {
        match fields.get(name) {
            Some(Value::String(_)) => {}
            Some(Value::Null) if S::NULLABLE.contains(&name) => {}
            Some(_) => {
                return Err(Violation::new(
                    &[name],
                    "string_type",
                    "Input should be a valid string",
                ))
            }
            None if S::REQUIRED.contains(&name) => {
                return Err(Violation::new(&[name], "missing", "Field required"))
            }
            None => {}
        }
    }

    let input: S = serde_json::from_value(raw).map_err(|e| Violation::body(e.to_string()))?;
    input.validate().map_err(first_violation)?;
    Ok(input)
}

fn first_violation(errors: ValidationErrors) -> Violation {
    let field_errors = errors.field_errors();
    PRODUCT_FIELDS
        .iter()
        .find_map(|name| {
            let error = field_errors.get(*name)?.first()?;
            let msg = error
                .message
                .as_ref()
                .map(|m| m.to_string())
                .unwrap_or_else(|| "Invalid value".to_string());
            // `params` carries the rejected value and limits; it stays server-side.
            Some(Violation::new(&[*name], &error.code, msg))
        })
        .unwrap_or_else(|| Violation::body("Invalid input"))
}
