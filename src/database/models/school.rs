use std::collections::BTreeMap;
use std::num::IntErrorKind;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use sqlx::FromRow;

/// Column list shared by every query that returns whole rows
pub const SCHOOL_COLUMNS: &str = "id, name, address, city, state, contact, image, email_id";

const NULL_NOT_ALLOWED: &str = "This field may not be null.";
const INVALID_STRING: &str = "Not a valid string.";
const NULL_CHARACTER: &str = "Null characters are not allowed.";
const INVALID_INTEGER: &str = "A valid integer is required.";
const INTEGER_TOO_LARGE: &str = "Ensure this value is less than or equal to 9223372036854775807.";
const INTEGER_TOO_SMALL: &str = "Ensure this value is greater than or equal to -9223372036854775808.";

/// A stored school record, exactly as it is returned by the API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct School {
    pub id: i64,
    pub name: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub contact: Option<i64>,
    pub image: String,
    pub email_id: String,
}

/// Coerced create payload: every field the client may set, with defaults
/// already applied
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewSchool {
    pub name: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub contact: Option<i64>,
    pub image: String,
    pub email_id: String,
}

#[derive(Debug, thiserror::Error)]
pub enum PayloadError {
    #[error("Invalid JSON format: {0}")]
    InvalidJson(String),
    #[error("Expected a JSON object but received {0}")]
    NotAnObject(&'static str),
    #[error("Invalid values for {} field(s)", .0.len())]
    InvalidFields(BTreeMap<String, String>),
}

impl NewSchool {
    /// Parse a raw request body. An empty or whitespace-only body is the
    /// same as `{}`.
    pub fn from_slice(body: &[u8]) -> Result<Self, PayloadError> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::default());
        }
        let value: Value = serde_json::from_slice(body)
            .map_err(|e| PayloadError::InvalidJson(e.to_string()))?;
        Self::from_json(value)
    }

    pub fn from_json(value: Value) -> Result<Self, PayloadError> {
        match value {
            Value::Object(fields) => Self::from_fields(&fields),
            other => Err(PayloadError::NotAnObject(json_type_name(&other))),
        }
    }

    /// Apply type coercion field by field. Unknown keys (including `id`)
    /// are ignored; every failing field is reported.
    pub fn from_fields(fields: &Map<String, Value>) -> Result<Self, PayloadError> {
        let mut school = Self::default();
        let mut errors = BTreeMap::new();

        {
            let Self { name, address, city, state, image, email_id, .. } = &mut school;
            let text_fields = [
                ("name", name),
                ("address", address),
                ("city", city),
                ("state", state),
                ("image", image),
                ("email_id", email_id),
            ];
            for (key, slot) in text_fields {
                let Some(raw) = fields.get(key) else { continue };
                match coerce_text(raw) {
                    Ok(text) => *slot = text,
                    Err(message) => {
                        errors.insert(key.to_string(), message.to_string());
                    }
                }
            }
        }

        if let Some(raw) = fields.get("contact") {
            match coerce_contact(raw) {
                Ok(contact) => school.contact = contact,
                Err(message) => {
                    errors.insert("contact".to_string(), message.to_string());
                }
            }
        }

        if errors.is_empty() {
            Ok(school)
        } else {
            Err(PayloadError::InvalidFields(errors))
        }
    }

    pub fn into_school(self, id: i64) -> School {
        School {
            id,
            name: self.name,
            address: self.address,
            city: self.city,
            state: self.state,
            contact: self.contact,
            image: self.image,
            email_id: self.email_id,
        }
    }
}

fn coerce_text(raw: &Value) -> Result<String, &'static str> {
    match raw {
        // Postgres TEXT cannot hold NUL
        Value::String(s) if s.contains('\0') => Err(NULL_CHARACTER),
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        Value::Null => Err(NULL_NOT_ALLOWED),
        _ => Err(INVALID_STRING),
    }
}

/// `null` and `""` leave the contact unset
fn coerce_contact(raw: &Value) -> Result<Option<i64>, &'static str> {
    match raw {
        Value::Null => Ok(None),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Ok(Some(i))
            } else if n.is_u64() {
                Err(INTEGER_TOO_LARGE)
            } else {
                n.as_f64().map(integral_float).unwrap_or(Err(INVALID_INTEGER)).map(Some)
            }
        }
        Value::String(s) if s.trim().is_empty() => Ok(None),
        Value::String(s) => parse_integer_text(s).map(Some),
        _ => Err(INVALID_INTEGER),
    }
}

fn integral_float(f: f64) -> Result<i64, &'static str> {
    if !f.is_finite() || f.fract() != 0.0 {
        return Err(INVALID_INTEGER);
    }
    // i64::MAX is not exactly representable; 2^63 is the first value past it
    if f >= 9_223_372_036_854_775_808.0 {
        return Err(INTEGER_TOO_LARGE);
    }
    if f < i64::MIN as f64 {
        return Err(INTEGER_TOO_SMALL);
    }
    Ok(f as i64)
}

/// Accepts an optionally signed integer with surrounding whitespace and an
/// optional trailing `.0…` (e.g. "5551234567", " 42 ", "7.00")
fn parse_integer_text(s: &str) -> Result<i64, &'static str> {
    let trimmed = s.trim();
    let digits = match trimmed.split_once('.') {
        Some((whole, frac)) if frac.chars().all(|c| c == '0') => whole,
        Some(_) => return Err(INVALID_INTEGER),
        None => trimmed,
    };
    digits.parse::<i64>().map_err(|e| match e.kind() {
        IntErrorKind::PosOverflow => INTEGER_TOO_LARGE,
        IntErrorKind::NegOverflow => INTEGER_TOO_SMALL,
        _ => INVALID_INTEGER,
    })
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
