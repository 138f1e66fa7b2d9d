use std::fmt;

/// Error returned when an operation needs a stored entry that is not there.
///
/// Plain lookups such as [`FormRenderer::field`](crate::FormRenderer::field)
/// return `Option` instead. `FormError` is reserved for operations that
/// cannot produce a meaningful result without the entry.
///
/// # Examples
///
/// ```
/// use cms_forms::{FormError, FormErrorKind};
///
/// let error = FormError::new(FormErrorKind::UnknownField, "no field stored under 'email'");
/// assert_eq!(error.kind(), FormErrorKind::UnknownField);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormError {
    kind: FormErrorKind,
    message: String,
}

impl FormError {
    /// Creates a new form error.
    pub fn new(kind: FormErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub(crate) fn unknown_field(key: &str) -> Self {
        Self::new(
            FormErrorKind::UnknownField,
            format!("no field stored under '{}'", key),
        )
    }

    pub(crate) fn unknown_message(key: &str) -> Self {
        Self::new(
            FormErrorKind::UnknownMessage,
            format!("no validator message stored under '{}'", key),
        )
    }

    /// Returns the error kind.
    pub fn kind(&self) -> FormErrorKind {
        self.kind
    }

    /// Returns the error message.
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for FormError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "form error ({}): {}", self.kind, self.message)
    }
}

impl std::error::Error for FormError {}

/// Kind of form error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormErrorKind {
    /// No field markup is stored under the requested key.
    UnknownField,
    /// No validator message is stored under the requested key.
    UnknownMessage,
}

impl fmt::Display for FormErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownField => write!(f, "unknown field"),
            Self::UnknownMessage => write!(f, "unknown message"),
        }
    }
}
