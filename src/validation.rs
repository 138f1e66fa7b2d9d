use std::fmt;

/// Outcome of validating a submission against field metadata.
///
/// # Examples
///
/// ```
/// use cms_forms::{FieldMeta, FieldMetaMap, MetaFlag, RejectionKind, Submission, SubmissionValidator};
///
/// let mut meta = FieldMetaMap::new();
/// meta.insert("website".to_string(), FieldMeta::new().honeypot());
///
/// let submitted: Submission = [("website", "http://spam.example")].into_iter().collect();
/// let outcome = SubmissionValidator::new().validate_honeypot(&meta, MetaFlag::Honeypot, &submitted);
///
/// assert!(!outcome.is_valid());
/// assert_eq!(outcome.rejection().map(|r| r.field()), Some(Some("website")));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
pub enum Validation {
    /// Every check passed.
    Valid,
    /// A check failed. Carries the first failure found.
    Invalid(Rejection),
}

impl Validation {
    /// Returns `true` if the submission passed.
    pub fn is_valid(&self) -> bool {
        matches!(self, Validation::Valid)
    }

    /// Returns the rejection, if the submission failed.
    pub fn rejection(&self) -> Option<&Rejection> {
        match self {
            Validation::Valid => None,
            Validation::Invalid(rejection) => Some(rejection),
        }
    }

    /// Converts into a `Result` so failures can be propagated with `?`.
    pub fn into_result(self) -> Result<(), Rejection> {
        match self {
            Validation::Valid => Ok(()),
            Validation::Invalid(rejection) => Err(rejection),
        }
    }
}

impl From<Rejection> for Validation {
    fn from(rejection: Rejection) -> Self {
        Validation::Invalid(rejection)
    }
}

/// Why a submission was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rejection {
    kind: RejectionKind,
}

impl Rejection {
    /// Creates a rejection of the given kind.
    pub fn new(kind: RejectionKind) -> Self {
        Self { kind }
    }

    /// Returns the rejection kind.
    pub fn kind(&self) -> &RejectionKind {
        &self.kind
    }

    /// Returns the offending field, if the failure is tied to one.
    pub fn field(&self) -> Option<&str> {
        match &self.kind {
            RejectionKind::RequiredFieldMissing { field }
            | RejectionKind::RequiredFieldEmpty { field }
            | RejectionKind::HoneypotMissing { field }
            | RejectionKind::HoneypotFilled { field, .. }
            | RejectionKind::SpamAnswerMissing { field }
            | RejectionKind::SpamAnswerWrong { field } => Some(field),
            RejectionKind::SpamCheckNotConfigured => None,
        }
    }
}

// Display names the field but never echoes a submitted value.
impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            RejectionKind::RequiredFieldMissing { field } => {
                write!(f, "required field '{}' was not submitted", field)
            }
            RejectionKind::RequiredFieldEmpty { field } => {
                write!(f, "required field '{}' is empty", field)
            }
            RejectionKind::HoneypotMissing { field } => {
                write!(f, "honeypot field '{}' was not submitted", field)
            }
            RejectionKind::HoneypotFilled { field, .. } => {
                write!(f, "honeypot field '{}' was filled in", field)
            }
            RejectionKind::SpamAnswerMissing { field } => {
                write!(f, "spam check '{}' was not answered", field)
            }
            RejectionKind::SpamAnswerWrong { field } => {
                write!(f, "spam check '{}' was answered incorrectly", field)
            }
            RejectionKind::SpamCheckNotConfigured => {
                write!(f, "no spam check field is configured")
            }
        }
    }
}

impl std::error::Error for Rejection {}

/// The kind of validation failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RejectionKind {
    /// A required field was absent from the submitted data.
    RequiredFieldMissing {
        /// The required field.
        field: String,
    },
    /// A required field was submitted empty.
    RequiredFieldEmpty {
        /// The required field.
        field: String,
    },
    /// The honeypot field was absent from the submitted data.
    HoneypotMissing {
        /// The honeypot field.
        field: String,
    },
    /// The honeypot field carried a value.
    HoneypotFilled {
        /// The honeypot field.
        field: String,
        /// What was submitted in it.
        value: String,
    },
    /// The spam-check field was absent from the submitted data.
    SpamAnswerMissing {
        /// The spam-check field.
        field: String,
    },
    /// The spam-check answer matched none of the accepted answers.
    SpamAnswerWrong {
        /// The spam-check field.
        field: String,
    },
    /// No field is flagged as a spam check with accepted answers.
    ///
    /// A form without a spam check fails the spam check. A form without a
    /// honeypot passes the honeypot check.
    SpamCheckNotConfigured,
}
