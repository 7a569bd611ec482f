use serde::Serialize;
use thiserror::Error;

use crate::state::FieldKind;

/// One violated constraint in a submitted body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub loc: Vec<String>,
    pub msg: String,
}

impl FieldError {
    pub(crate) fn missing(field: &str) -> Self {
        Self { kind: "missing", loc: body_loc(Some(field)), msg: "Field required".into() }
    }

    pub(crate) fn missing_body() -> Self {
        Self { kind: "missing", loc: body_loc(None), msg: "Field required".into() }
    }

    pub(crate) fn wrong_type(field: &str, kind: FieldKind) -> Self {
        let (kind, msg) = match kind {
            FieldKind::Bool => ("bool_type", "Input should be a valid boolean"),
            FieldKind::Int => ("int_type", "Input should be a valid integer"),
            FieldKind::Str => ("string_type", "Input should be a valid string"),
        };
        Self { kind, loc: body_loc(Some(field)), msg: msg.into() }
    }

    pub(crate) fn not_an_object() -> Self {
        Self {
            kind: "model_attributes_type",
            loc: body_loc(None),
            msg: "Input should be a valid dictionary or object to extract fields from".into(),
        }
    }

    pub(crate) fn json_invalid(err: &serde_json::Error) -> Self {
        Self { kind: "json_invalid", loc: body_loc(None), msg: format!("JSON decode error: {}", err) }
    }
}

fn body_loc(field: Option<&str>) -> Vec<String> {
    let mut loc = vec!["body".to_string()];
    if let Some(f) = field {
        loc.push(f.to_string());
    }
    loc
}

/// Rejection of a submitted state. Serializes as `{"detail": [...]}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Error)]
#[error("invalid AC state: {}", summary(.detail))]
pub struct ValidationError {
    detail: Vec<FieldError>,
}

impl ValidationError {
    pub(crate) fn new(detail: Vec<FieldError>) -> Self {
        Self { detail }
    }

    pub(crate) fn single(err: FieldError) -> Self {
        Self { detail: vec![err] }
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.detail
    }
}

fn summary(detail: &[FieldError]) -> String {
    detail
        .iter()
        .map(|e| format!("{} ({})", e.loc.join("."), e.kind))
        .collect::<Vec<_>>()
        .join(", ")
}
