//! Field-level validation engine for candidate records.
//!
//! [`RecordValidator`] is the seam between the record service and the rules a
//! deployment enforces. [`StandardRecordValidator`] implements the default
//! rule set; every rule that fails contributes one [`FieldViolation`], in
//! field order (name, email, age).

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;
use serde_json::Value;
use utoipa::ToSchema;

use super::{NewRecord, RecordDraft};

/// Record field a violation refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum RecordField {
    Name,
    Email,
    Age,
}

impl RecordField {
    /// Wire name of the field.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Age => "age",
        }
    }
}

impl fmt::Display for RecordField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One broken rule on one field.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FieldViolation {
    pub field: RecordField,
    /// Value that broke the rule, `null` when absent.
    #[schema(value_type = Object)]
    pub rejected_value: Value,
    pub message: String,
}

impl FieldViolation {
    fn new(field: RecordField, rejected_value: Value, message: impl Into<String>) -> Self {
        Self {
            field,
            rejected_value,
            message: message.into(),
        }
    }
}

/// Non-empty, ordered set of violations for one candidate.
#[derive(Debug, Clone, PartialEq)]
pub struct Violations {
    first: FieldViolation,
    rest: Vec<FieldViolation>,
}

impl Violations {
    /// First violation in rule order.
    #[must_use]
    pub const fn first(&self) -> &FieldViolation {
        &self.first
    }

    /// All violations in rule order.
    pub fn iter(&self) -> impl Iterator<Item = &FieldViolation> {
        std::iter::once(&self.first).chain(self.rest.iter())
    }

    /// Messages of all violations in rule order.
    #[must_use]
    pub fn messages(&self) -> Vec<String> {
        self.iter().map(|violation| violation.message.clone()).collect()
    }
}

/// Validation engine turning candidates into insertable records.
pub trait RecordValidator: Send + Sync {
    /// Accept `draft` as a [`NewRecord`] or report every broken rule.
    fn validate(&self, draft: &RecordDraft) -> Result<NewRecord, Violations>;
}

/// Default rules: name and email required, email well formed, age required
/// and not negative.
///
/// # Examples
/// ```
/// use backend::domain::{RecordDraft, RecordValidator, StandardRecordValidator};
///
/// let validator = StandardRecordValidator;
/// assert!(validator.validate(&RecordDraft::new("Ada", "ada@example.com", 36)).is_ok());
///
/// let rejected = validator
///     .validate(&RecordDraft::new(" ", "ada@example.com", -1))
///     .expect_err("blank name and negative age");
/// assert_eq!(
///     rejected.messages(),
///     vec!["name is required", "age must not be negative"]
/// );
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct StandardRecordValidator;

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        Regex::new(r"^[^\s@]+@[^\s@]+$")
            .unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

fn text_value(value: Option<&str>) -> Value {
    value.map_or(Value::Null, |text| Value::String(text.to_owned()))
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|text| !text.trim().is_empty())
}

impl StandardRecordValidator {
    fn check_name(draft: &RecordDraft) -> Result<&str, FieldViolation> {
        let name = draft.name.as_deref();
        non_blank(name).ok_or_else(|| {
            FieldViolation::new(RecordField::Name, text_value(name), "name is required")
        })
    }

    fn check_email(draft: &RecordDraft) -> Result<&str, FieldViolation> {
        let email = draft.email.as_deref();
        match non_blank(email) {
            None => Err(FieldViolation::new(
                RecordField::Email,
                text_value(email),
                "email is required",
            )),
            Some(candidate) if !email_regex().is_match(candidate) => Err(FieldViolation::new(
                RecordField::Email,
                text_value(email),
                "email must be a valid address",
            )),
            Some(accepted) => Ok(accepted),
        }
    }

    fn check_age(draft: &RecordDraft) -> Result<i32, FieldViolation> {
        match draft.age {
            None => Err(FieldViolation::new(
                RecordField::Age,
                Value::Null,
                "age is required",
            )),
            Some(age) if age < 0 => Err(FieldViolation::new(
                RecordField::Age,
                Value::from(age),
                "age must not be negative",
            )),
            Some(age) => Ok(age),
        }
    }
}

impl RecordValidator for StandardRecordValidator {
    fn validate(&self, draft: &RecordDraft) -> Result<NewRecord, Violations> {
        let name = Self::check_name(draft);
        let email = Self::check_email(draft);
        let age = Self::check_age(draft);

        match (name, email, age) {
            (Ok(name), Ok(email), Ok(age)) => Ok(NewRecord::new(name, email, age)),
            (Err(first), email, age) => Err(Violations {
                first,
                rest: [email.err(), age.err()].into_iter().flatten().collect(),
            }),
            (Ok(_), Err(first), age) => Err(Violations {
                first,
                rest: age.err().into_iter().collect(),
            }),
            (Ok(_), Ok(_), Err(first)) => Err(Violations {
                first,
                rest: Vec::new(),
            }),
        }
    }
}
