use serde_json::{Map, Number, Value};

use crate::error::{FieldError, ValidationError};

/// Desired state of one air-conditioning unit, as submitted by a client.
///
/// Lives for a single request. Nothing ties one `AcState` to the next.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AcState {
    pub is_on: bool,
    /// Any JSON integer, kept at full precision.
    pub temperature: Number,
    pub mode: String,
    pub fan_speed: String,
}

impl AcState {
    /// Parse a raw request body. The body must be a JSON object carrying all
    /// four fields with the right JSON types; extra keys are ignored.
    pub fn from_body(body: &[u8]) -> Result<Self, ValidationError> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Err(ValidationError::single(FieldError::missing_body()));
        }
        let value: Value = serde_json::from_slice(body)
            .map_err(|e| ValidationError::single(FieldError::json_invalid(&e)))?;
        Self::from_value(&value)
    }

    /// Validate an already-decoded JSON value. Every violated field is
    /// reported, in declaration order.
    pub fn from_value(value: &Value) -> Result<Self, ValidationError> {
        let Some(obj) = value.as_object() else {
            return Err(ValidationError::single(FieldError::not_an_object()));
        };

        let mut errors = Vec::new();
        let is_on = field(obj, "isOn", FieldKind::Bool, Value::as_bool, &mut errors);
        let temperature = field(obj, "temperature", FieldKind::Int, as_integer, &mut errors);
        let mode = field(obj, "mode", FieldKind::Str, as_string, &mut errors);
        let fan_speed = field(obj, "fanSpeed", FieldKind::Str, as_string, &mut errors);

        match (is_on, temperature, mode, fan_speed) {
            (Some(is_on), Some(temperature), Some(mode), Some(fan_speed)) if errors.is_empty() => {
                Ok(Self { is_on, temperature, mode, fan_speed })
            }
            _ => Err(ValidationError::new(errors)),
        }
    }

    pub fn power_label(&self) -> &'static str {
        if self.is_on { "ON" } else { "OFF" }
    }
}

#[derive(Debug, Clone, Copy)]
pub(crate) enum FieldKind {
    Bool,
    Int,
    Str,
}

fn as_integer(v: &Value) -> Option<Number> {
    match v {
        Value::Number(n) if is_integer(n) => Some(n.clone()),
        _ => None,
    }
}

// Needs serde_json's arbitrary_precision so out-of-range literals keep their digits.
fn is_integer(n: &Number) -> bool {
    if n.is_i64() || n.is_u64() {
        return true;
    }
    let repr = n.to_string();
    let digits = repr.strip_prefix('-').unwrap_or(&repr);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

fn as_string(v: &Value) -> Option<String> {
    v.as_str().map(str::to_owned)
}

fn field<T>(
    obj: &Map<String, Value>,
    name: &str,
    kind: FieldKind,
    extract: impl Fn(&Value) -> Option<T>,
    errors: &mut Vec<FieldError>,
) -> Option<T> {
    match obj.get(name) {
        None => {
            errors.push(FieldError::missing(name));
            None
        }
        Some(v) => {
            let out = extract(v);
            if out.is_none() {
                errors.push(FieldError::wrong_type(name, kind));
            }
            out
        }
    }
}
