//! Contact form: per-field validation and submission.
//!
//! Submission is the only operation in the storefront that waits on the
//! network. It never touches the cart, has no timeout or retry, and every
//! failure ends as one user-facing message.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use async_trait::async_trait;
use http::StatusCode;
use regex::Regex;
use thiserror::Error;
use tracing::{debug, warn};

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"));

static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\+\d][\d\s\-\(\)]{9,}$").expect("valid phone regex"));

/// Minimum number of digits in a phone number.
const MIN_PHONE_DIGITS: usize = 10;

/// Input type of a form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Email,
    Tel,
    TextArea,
}

/// Declarative description of a form field, mirroring its HTML attributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: String,
    pub kind: FieldKind,
    pub required: bool,
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
}

impl FieldSpec {
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            kind,
            required: false,
            min_length: None,
            max_length: None,
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn min_length(mut self, n: usize) -> Self {
        self.min_length = Some(n);
        self
    }

    pub fn max_length(mut self, n: usize) -> Self {
        self.max_length = Some(n);
        self
    }

    /// Validate one value. Checks run in order and stop at the first failure.
    pub fn validate(&self, raw: &str) -> Result<(), FieldError> {
        let value = raw.trim();

        if self.required && value.is_empty() {
            return Err(FieldError::Required);
        }
        if value.is_empty() {
            return Ok(());
        }

        // Email and phone have their own format rules; length limits apply
        // only to the other fields
        if self.kind == FieldKind::Email {
            return if EMAIL_RE.is_match(value) {
                Ok(())
            } else {
                Err(FieldError::InvalidEmail)
            };
        }

        if self.name == "phone" {
            let digits = value.chars().filter(char::is_ascii_digit).count();
            return if PHONE_RE.is_match(value) && digits >= MIN_PHONE_DIGITS {
                Ok(())
            } else {
                Err(FieldError::InvalidPhone)
            };
        }

        let len = value.chars().count();
        if let Some(min) = self.min_length {
            if len < min {
                return Err(FieldError::TooShort(min));
            }
        }
        if let Some(max) = self.max_length {
            if len > max {
                return Err(FieldError::TooLong(max));
            }
        }

        Ok(())
    }
}

/// Why a field value was rejected. The message is shown under the field.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FieldError {
    #[error("This field is required")]
    Required,

    #[error("Enter a valid email address")]
    InvalidEmail,

    #[error("Enter a valid phone number (at least 10 digits)")]
    InvalidPhone,

    #[error("At least {0} characters")]
    TooShort(usize),

    #[error("At most {0} characters")]
    TooLong(usize),
}

/// Per-field state after validation, used to set the `error`/`valid` classes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldState {
    /// Empty optional field: no class.
    Neutral,
    Valid,
    Invalid(FieldError),
}

/// Submitted values, keyed by field name.
pub type FormValues = BTreeMap<String, String>;

/// Error reaching the form endpoint.
#[derive(Error, Debug)]
pub enum TransportError {
    #[error("Network error: {0}")]
    Network(String),
}

/// Sends a validated form somewhere.
#[async_trait]
pub trait FormTransport {
    /// POST the fields; returns the response status.
    async fn post(&self, fields: &FormValues) -> Result<StatusCode, TransportError>;
}

/// Posts the form over HTTP as `application/x-www-form-urlencoded`.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    action: String,
}

impl HttpTransport {
    /// Create a transport posting to the form's `action` URL.
    pub fn new(action: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            action: action.into(),
        }
    }

    pub fn action(&self) -> &str {
        &self.action
    }
}

#[async_trait]
impl FormTransport for HttpTransport {
    async fn post(&self, fields: &FormValues) -> Result<StatusCode, TransportError> {
        let response = self
            .client
            .post(&self.action)
            .header(http::header::ACCEPT, "application/json")
            .form(fields)
            .send()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;
        Ok(response.status())
    }
}

/// Final state of a submission attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormOutcome {
    /// Validation failed; nothing was sent.
    Invalid(Vec<(String, FieldError)>),
    /// The endpoint accepted the message. The form should be reset.
    Sent,
    /// The endpoint answered with a non-success status.
    Rejected(StatusCode),
    /// The endpoint could not be reached.
    NetworkError,
}

impl FormOutcome {
    /// The single message shown in the form's message area.
    pub fn message(&self) -> &'static str {
        match self {
            FormOutcome::Invalid(_) => "Please fix the errors in the form",
            FormOutcome::Sent => "Message sent! We will contact you soon.",
            FormOutcome::Rejected(_) => "Sending failed. Please try again.",
            FormOutcome::NetworkError => "Network error. Check your connection.",
        }
    }

    /// CSS modifier for the message area.
    pub fn kind(&self) -> &'static str {
        match self {
            FormOutcome::Sent => "success",
            _ => "error",
        }
    }

    pub fn is_sent(&self) -> bool {
        matches!(self, FormOutcome::Sent)
    }
}

/// Message shown while a submission is in flight.
pub const SENDING_MESSAGE: &str = "Sending...";

/// The contact form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactForm {
    fields: Vec<FieldSpec>,
}

impl ContactForm {
    pub fn new(fields: Vec<FieldSpec>) -> Self {
        Self { fields }
    }

    /// The storefront's contact form: name, email, phone and message.
    pub fn standard() -> Self {
        Self::new(vec![
            FieldSpec::new("name", FieldKind::Text)
                .required()
                .min_length(2)
                .max_length(50),
            FieldSpec::new("email", FieldKind::Email).required(),
            FieldSpec::new("phone", FieldKind::Tel),
            FieldSpec::new("message", FieldKind::TextArea)
                .required()
                .min_length(10)
                .max_length(1000),
        ])
    }

    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    /// Validate a single field, as done when it loses focus.
    pub fn field_state(&self, name: &str, values: &FormValues) -> Option<FieldState> {
        let spec = self.fields.iter().find(|f| f.name == name)?;
        let value = values.get(name).map(String::as_str).unwrap_or_default();
        Some(match spec.validate(value) {
            Err(e) => FieldState::Invalid(e),
            Ok(()) if value.trim().is_empty() => FieldState::Neutral,
            Ok(()) => FieldState::Valid,
        })
    }

    /// Validate every field. Returns all failures, in field order.
    pub fn validate(&self, values: &FormValues) -> Vec<(String, FieldError)> {
        self.fields
            .iter()
            .filter_map(|spec| {
                let value = values.get(&spec.name).map(String::as_str).unwrap_or_default();
                spec.validate(value).err().map(|e| (spec.name.clone(), e))
            })
            .collect()
    }

    /// Validate and, if valid, send the form.
    pub async fn submit<T>(&self, transport: &T, values: &FormValues) -> FormOutcome
    where
        T: FormTransport + ?Sized,
    {
        let errors = self.validate(values);
        if !errors.is_empty() {
            debug!(count = errors.len(), "contact form has invalid fields");
            return FormOutcome::Invalid(errors);
        }

        match transport.post(values).await {
            Ok(status) if status.is_success() => FormOutcome::Sent,
            Ok(status) => {
                warn!(%status, "contact form rejected");
                FormOutcome::Rejected(status)
            }
            Err(e) => {
                warn!(error = %e, "contact form could not be sent");
                FormOutcome::NetworkError
            }
        }
    }
}

impl Default for ContactForm {
    fn default() -> Self {
        Self::standard()
    }
}
