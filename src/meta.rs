//! Declarative per-field validation metadata.

use indexmap::IndexMap;

/// Field metadata keyed by field identifier, in insertion order.
///
/// Every validator scan walks this map front to back and stops at the first
/// disqualifying field, so insertion order decides which failure is reported.
pub type FieldMetaMap = IndexMap<String, FieldMeta>;

/// Selects one of the boolean flags on a [`FieldMeta`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetaFlag {
    /// The field must be filled in.
    Required,
    /// The field holds the submitter's email address.
    Email,
    /// The field is a hidden trap that humans leave empty.
    Honeypot,
    /// The field is a challenge question with a fixed set of answers.
    SpamCheck,
}

/// Validation flags attached to a single form field.
///
/// Flags are independently optional. `None` means "not applicable" and is
/// skipped by every scan, the same as `Some(false)`.
///
/// # Examples
///
/// ```
/// use cms_forms::{FieldMeta, MetaFlag};
///
/// let meta = FieldMeta::new().required().email();
/// assert_eq!(meta.flag(MetaFlag::Required), Some(true));
/// assert_eq!(meta.flag(MetaFlag::Honeypot), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldMeta {
    /// Field must carry a non-empty value.
    pub is_required: Option<bool>,
    /// Field carries the submitter's email address.
    pub is_email: Option<bool>,
    /// Field is a honeypot.
    pub is_honeypot: Option<bool>,
    /// Field is a spam-check question.
    pub is_spam_check: Option<bool>,
    /// Answers accepted for a spam-check field, compared case-insensitively.
    pub accepted_answers: Option<Vec<String>>,
}

impl FieldMeta {
    /// Creates metadata with every flag unset.
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks the field as required.
    pub fn required(mut self) -> Self {
        self.is_required = Some(true);
        self
    }

    /// Marks the field as the email field.
    pub fn email(mut self) -> Self {
        self.is_email = Some(true);
        self
    }

    /// Marks the field as a honeypot.
    pub fn honeypot(mut self) -> Self {
        self.is_honeypot = Some(true);
        self
    }

    /// Marks the field as a spam check with the given accepted answers.
    pub fn spam_check<I, S>(mut self, answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.is_spam_check = Some(true);
        self.accepted_answers = Some(answers.into_iter().map(Into::into).collect());
        self
    }

    /// Reads the selected flag.
    pub fn flag(&self, flag: MetaFlag) -> Option<bool> {
        match flag {
            MetaFlag::Required => self.is_required,
            MetaFlag::Email => self.is_email,
            MetaFlag::Honeypot => self.is_honeypot,
            MetaFlag::SpamCheck => self.is_spam_check,
        }
    }

    /// Returns `true` only when the selected flag is explicitly set to `true`.
    pub fn is_flagged(&self, flag: MetaFlag) -> bool {
        self.flag(flag).unwrap_or(false)
    }
}

/// Returns the first field in `meta` flagged with `flag`, in insertion order.
pub(crate) fn first_flagged(meta: &FieldMetaMap, flag: MetaFlag) -> Option<(&str, &FieldMeta)> {
    meta.iter()
        .find(|(_, field)| field.is_flagged(flag))
        .map(|(name, field)| (name.as_str(), field))
}
