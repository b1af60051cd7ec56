//! Loosely-typed question input.
//!
//! Content generators disagree on field names and value types, so a raw
//! question is read through [`RawField`], which keeps the handful of coercions
//! the alias chains rely on (nullish fallback, string and number coercion as
//! the authoring tools' JavaScript performs them) in one place.

use serde_json::{Map, Number, Value};

/// A single field of a raw question, as found.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RawField<'a> {
    Undefined,
    Null,
    Text(&'a str),
    Number(&'a Number),
    List(&'a [Value]),
    /// Booleans and nested objects.
    Other(&'a Value),
}

impl<'a> RawField<'a> {
    pub fn of(value: Option<&'a Value>) -> Self {
        match value {
            None => RawField::Undefined,
            Some(Value::Null) => RawField::Null,
            Some(Value::String(s)) => RawField::Text(s),
            Some(Value::Number(n)) => RawField::Number(n),
            Some(Value::Array(items)) => RawField::List(items),
            Some(other) => RawField::Other(other),
        }
    }

    /// Anything but null or a missing key.
    pub fn is_present(&self) -> bool {
        !matches!(self, RawField::Undefined | RawField::Null)
    }

    /// Nullish coalescing: `self` unless it is null or missing.
    pub fn or(self, fallback: RawField<'a>) -> RawField<'a> {
        if self.is_present() {
            self
        } else {
            fallback
        }
    }

    /// The value when the field holds a JSON number.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            RawField::Number(n) => n.as_f64(),
            _ => None,
        }
    }

    /// String coercion (`String(x)`).
    pub fn coerce_string(&self) -> String {
        match self {
            RawField::Undefined => "undefined".to_string(),
            RawField::Null => "null".to_string(),
            RawField::Text(s) => (*s).to_string(),
            RawField::Number(n) => number_to_string(n),
            RawField::List(items) => items
                .iter()
                .map(|item| match item {
                    Value::Null => String::new(),
                    other => RawField::of(Some(other)).coerce_string(),
                })
                .collect::<Vec<_>>()
                .join(","),
            RawField::Other(Value::Bool(b)) => b.to_string(),
            RawField::Other(_) => "[object Object]".to_string(),
        }
    }

    /// Numeric coercion (`Number(x)`); `None` stands for NaN.
    pub fn coerce_number(&self) -> Option<f64> {
        match self {
            RawField::Undefined => None,
            RawField::Null => Some(0.0),
            RawField::Number(n) => n.as_f64(),
            RawField::Text(s) => parse_number_text(s),
            RawField::List(_) => parse_number_text(&self.coerce_string()),
            RawField::Other(Value::Bool(b)) => Some(if *b { 1.0 } else { 0.0 }),
            RawField::Other(_) => None,
        }
    }
}

fn parse_number_text(s: &str) -> Option<f64> {
    let s = s.trim();
    if s.is_empty() {
        return Some(0.0);
    }
    s.parse::<f64>().ok().filter(|n| !n.is_nan())
}

fn number_to_string(n: &Number) -> String {
    if n.is_i64() || n.is_u64() {
        return n.to_string();
    }
    match n.as_f64() {
        Some(f) => format_f64(f),
        None => n.to_string(),
    }
}

pub(crate) fn format_f64(f: f64) -> String {
    if f.fract() == 0.0 && f.abs() < 1e15 {
        format!("{}", f as i64)
    } else {
        format!("{}", f)
    }
}

/// Borrowed view over one raw question object.
#[derive(Debug, Clone, Copy)]
pub struct RawQuestion<'a> {
    fields: &'a Map<String, Value>,
}

impl<'a> RawQuestion<'a> {
    /// Only JSON objects can carry question fields.
    pub fn from_value(value: &'a Value) -> Option<Self> {
        value.as_object().map(|fields| RawQuestion { fields })
    }

    pub fn field(&self, key: &str) -> RawField<'a> {
        RawField::of(self.fields.get(key))
    }

    // ---- alias chains ----

    /// `question` → `question_text` → `text`, trimmed.
    pub fn resolve_text(&self) -> String {
        let field = self
            .field("question")
            .or(self.field("question_text"))
            .or(self.field("text"));
        if field.is_present() {
            field.coerce_string().trim().to_string()
        } else {
            String::new()
        }
    }

    /// `type` → `question_type` → `"multiple-choice"`, lower-cased.
    pub fn resolve_type(&self) -> String {
        let field = self.field("type").or(self.field("question_type"));
        if field.is_present() {
            field.coerce_string().to_lowercase()
        } else {
            "multiple-choice".to_string()
        }
    }

    /// Trimmed option strings; empty unless `options` is an array.
    pub fn resolve_options(&self) -> Vec<String> {
        match self.field("options") {
            RawField::List(items) => items
                .iter()
                .map(|item| RawField::of(Some(item)).coerce_string().trim().to_string())
                .collect(),
            _ => Vec::new(),
        }
    }

    pub fn answer(&self) -> RawField<'a> {
        self.field("answer")
    }

    pub fn correct_answer(&self) -> RawField<'a> {
        self.field("correct_answer")
    }

    /// `feedback` → `explanation`, trimmed, or empty.
    pub fn resolve_feedback(&self) -> String {
        let field = self.field("feedback").or(self.field("explanation"));
        if field.is_present() {
            field.coerce_string().trim().to_string()
        } else {
            String::new()
        }
    }

    /// `id` → `question_number`, when it coerces to a whole finite number.
    pub fn resolve_id(&self) -> Option<i64> {
        let field = self.field("id").or(self.field("question_number"));
        if !field.is_present() {
            return None;
        }
        field
            .coerce_number()
            .filter(|n| n.is_finite() && n.fract() == 0.0 && n.abs() < 9.0e15)
            .map(|n| n as i64)
    }
}
