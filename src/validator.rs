//! Submission validation against field metadata.
//!
//! Every `validate_*` scan walks the metadata in insertion order and stops at
//! the first disqualifying field. Only that field is reported, so a form with
//! two empty required fields names whichever was declared first.

use indexmap::IndexMap;

use crate::meta::{FieldMetaMap, MetaFlag};
use crate::{FieldValues, FormError, Rejection, RejectionKind, Validation};

/// Validates submitted data and keeps the human-readable messages shown on failure.
///
/// # Examples
///
/// ```
/// use cms_forms::{FieldMeta, FieldMetaMap, MetaFlag, Submission, SubmissionValidator};
///
/// let mut meta = FieldMetaMap::new();
/// meta.insert("name".to_string(), FieldMeta::new().required());
///
/// let mut validator = SubmissionValidator::new();
/// validator.set_message("form", "Please fix the form.");
///
/// let submitted: Submission = [("name", "")].into_iter().collect();
/// let outcome = validator
///     .validate_required_fields(&meta, MetaFlag::Required, &submitted, Some("form"), true)
///     .expect("message exists");
///
/// assert!(!outcome.is_valid());
/// assert_eq!(validator.message("form"), Some("The Name field is empty. Please fix the form."));
/// ```
#[derive(Debug, Clone, Default)]
pub struct SubmissionValidator {
    messages: IndexMap<String, String>,
}

impl SubmissionValidator {
    /// Creates a validator with no messages.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores the message text for `key`.
    pub fn set_message(&mut self, key: impl Into<String>, text: impl Into<String>) -> &mut Self {
        self.messages.insert(key.into(), text.into());
        self
    }

    /// Returns the message text stored under `key`.
    pub fn message(&self, key: &str) -> Option<&str> {
        self.messages.get(key).map(String::as_str)
    }

    /// Composes `"The {Field} field is empty. {previous}"`.
    ///
    /// Only the first character of `field_name` is uppercased.
    pub fn required_field_message(field_name: &str, previous: &str) -> String {
        format!("The {} field is empty. {}", capitalize(field_name), previous)
    }

    /// Prefixes the message under `key` with the name of an empty required field.
    ///
    /// This rewrites the stored message, so calling it twice stacks two prefixes.
    /// Use [`required_field_message`](Self::required_field_message) to compose
    /// without touching the store.
    ///
    /// # Errors
    ///
    /// Returns [`FormErrorKind::UnknownMessage`](crate::FormErrorKind::UnknownMessage)
    /// if no message is stored under `key`.
    pub fn append_required_field_name_to_message(
        &mut self,
        field_name: &str,
        key: &str,
    ) -> Result<(), FormError> {
        let message = self
            .messages
            .get_mut(key)
            .ok_or_else(|| FormError::unknown_message(key))?;
        *message = Self::required_field_message(field_name, message);
        Ok(())
    }

    /// Passes iff the honeypot value is exactly empty.
    ///
    /// Whitespace counts as filled.
    pub fn is_valid_against_honeypot(value: &str) -> bool {
        value.is_empty()
    }

    /// Checks every field flagged with `flag` as a honeypot and stops at the first failure.
    ///
    /// A honeypot that was not submitted at all is rejected. The form passes
    /// only when every honeypot came back empty, which includes a form with
    /// no honeypot field.
    pub fn validate_honeypot<D>(
        &self,
        meta: &FieldMetaMap,
        flag: MetaFlag,
        submitted: &D,
    ) -> Validation
    where
        D: FieldValues + ?Sized,
    {
        for (field, _) in meta.iter().filter(|(_, field)| field.is_flagged(flag)) {
            match submitted.value(field) {
                Some(value) if Self::is_valid_against_honeypot(value) => continue,
                Some(value) => {
                    tracing::warn!(field = %field, "honeypot field filled in");
                    return reject(RejectionKind::HoneypotFilled {
                        field: field.clone(),
                        value: value.to_string(),
                    });
                }
                None => {
                    tracing::warn!(field = %field, "honeypot field missing from submission");
                    return reject(RejectionKind::HoneypotMissing {
                        field: field.clone(),
                    });
                }
            }
        }

        Validation::Valid
    }

    /// Passes iff `answer` equals one of `accepted`, ignoring case.
    pub fn is_valid_against_spam_check<S: AsRef<str>>(accepted: &[S], answer: &str) -> bool {
        let answer = answer.to_lowercase();
        accepted
            .iter()
            .any(|candidate| candidate.as_ref().to_lowercase() == answer)
    }

    /// Checks the first field flagged with `flag` that also carries accepted answers.
    ///
    /// Unlike the honeypot check, a form with no such field is rejected with
    /// [`RejectionKind::SpamCheckNotConfigured`].
    pub fn validate_spam_check<D>(
        &self,
        meta: &FieldMetaMap,
        flag: MetaFlag,
        submitted: &D,
    ) -> Validation
    where
        D: FieldValues + ?Sized,
    {
        let spam_field = meta.iter().find_map(|(name, field)| {
            if !field.is_flagged(flag) {
                return None;
            }
            field
                .accepted_answers
                .as_deref()
                .map(|answers| (name.as_str(), answers))
        });

        let Some((field, accepted)) = spam_field else {
            tracing::debug!("no spam check field configured");
            return reject(RejectionKind::SpamCheckNotConfigured);
        };

        match submitted.value(field) {
            Some(answer) if Self::is_valid_against_spam_check(accepted, answer) => {
                Validation::Valid
            }
            Some(_) => {
                tracing::debug!(field = %field, "spam check answered incorrectly");
                reject(RejectionKind::SpamAnswerWrong {
                    field: field.to_string(),
                })
            }
            None => {
                tracing::debug!(field = %field, "spam check missing from submission");
                reject(RejectionKind::SpamAnswerMissing {
                    field: field.to_string(),
                })
            }
        }
    }

    /// Passes iff `value` is non-empty.
    ///
    /// `"0"` and whitespace-only values pass.
    pub fn is_valid_against_required_field(value: &str) -> bool {
        !value.is_empty()
    }

    /// Checks every field flagged with `flag` and stops at the first empty or missing one.
    ///
    /// When `append_message` is set and `message_key` is given, the failing
    /// field's name is prefixed to that message, as with
    /// [`append_required_field_name_to_message`](Self::append_required_field_name_to_message).
    ///
    /// # Errors
    ///
    /// Returns [`FormErrorKind::UnknownMessage`](crate::FormErrorKind::UnknownMessage)
    /// if `append_message` is set and no message is stored under `message_key`.
    /// This is checked before any field is examined, so no outcome is computed.
    pub fn validate_required_fields<D>(
        &mut self,
        meta: &FieldMetaMap,
        flag: MetaFlag,
        submitted: &D,
        message_key: Option<&str>,
        append_message: bool,
    ) -> Result<Validation, FormError>
    where
        D: FieldValues + ?Sized,
    {
        let message_key = message_key.filter(|_| append_message);
        if let Some(key) = message_key {
            if !self.messages.contains_key(key) {
                return Err(FormError::unknown_message(key));
            }
        }

        for (field, _) in meta.iter().filter(|(_, field)| field.is_flagged(flag)) {
            let kind = match submitted.value(field) {
                Some(value) if Self::is_valid_against_required_field(value) => continue,
                Some(_) => RejectionKind::RequiredFieldEmpty {
                    field: field.clone(),
                },
                None => RejectionKind::RequiredFieldMissing {
                    field: field.clone(),
                },
            };

            tracing::debug!(field = %field, "required field not filled in");

            if let Some(key) = message_key {
                self.append_required_field_name_to_message(field, key)?;
            }

            return Ok(reject(kind));
        }

        Ok(Validation::Valid)
    }
}

fn reject(kind: RejectionKind) -> Validation {
    Validation::Invalid(Rejection::new(kind))
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{FieldMeta, FormErrorKind, Submission};

    fn meta_of(fields: &[(&str, FieldMeta)]) -> FieldMetaMap {
        fields
            .iter()
            .map(|(name, meta)| (name.to_string(), meta.clone()))
            .collect()
    }

    #[test]
    fn messages_round_trip() {
        let mut validator = SubmissionValidator::new();
        validator.set_message("error", "Try again.");

        assert_eq!(validator.message("error"), Some("Try again."));
        assert_eq!(validator.message("missing"), None);
    }

    #[test]
    fn capitalize_first_char_only() {
        assert_eq!(capitalize("first name"), "First name");
        assert_eq!(capitalize("éclair"), "Éclair");
        assert_eq!(capitalize(""), "");
    }

    #[test]
    fn required_field_message_is_pure() {
        assert_eq!(
            SubmissionValidator::required_field_message("email", "Fix it."),
            "The Email field is empty. Fix it."
        );
    }

    #[test]
    fn append_stacks_prefixes() {
        let mut validator = SubmissionValidator::new();
        validator.set_message("err", "Fix it.");

        validator
            .append_required_field_name_to_message("name", "err")
            .expect("message exists");
        validator
            .append_required_field_name_to_message("email", "err")
            .expect("message exists");

        assert_eq!(
            validator.message("err"),
            Some("The Email field is empty. The Name field is empty. Fix it.")
        );
    }

    #[test]
    fn append_to_unknown_message_fails() {
        let mut validator = SubmissionValidator::new();

        let error = validator
            .append_required_field_name_to_message("name", "nope")
            .unwrap_err();
        assert_eq!(error.kind(), FormErrorKind::UnknownMessage);
    }

    #[test]
    fn honeypot_predicate() {
        assert!(SubmissionValidator::is_valid_against_honeypot(""));
        assert!(!SubmissionValidator::is_valid_against_honeypot("anything"));
        assert!(!SubmissionValidator::is_valid_against_honeypot(" "));
    }

    #[test]
    fn honeypot_empty_passes() {
        let meta = meta_of(&[("website", FieldMeta::new().honeypot())]);
        let submitted: Submission = [("website", "")].into_iter().collect();

        let outcome = SubmissionValidator::new().validate_honeypot(&meta, MetaFlag::Honeypot, &submitted);
        assert!(outcome.is_valid());
    }

    #[test]
    fn honeypot_filled_carries_value() {
        let meta = meta_of(&[("website", FieldMeta::new().honeypot())]);
        let submitted: Submission = [("website", "bot")].into_iter().collect();

        let outcome = SubmissionValidator::new().validate_honeypot(&meta, MetaFlag::Honeypot, &submitted);
        assert_eq!(
            outcome.rejection().map(|r| r.kind().clone()),
            Some(RejectionKind::HoneypotFilled {
                field: "website".to_string(),
                value: "bot".to_string(),
            })
        );
    }

    #[test]
    fn honeypot_missing_fails() {
        let meta = meta_of(&[("website", FieldMeta::new().honeypot())]);

        let outcome =
            SubmissionValidator::new().validate_honeypot(&meta, MetaFlag::Honeypot, &Submission::new());
        assert_eq!(
            outcome.rejection().map(|r| r.kind().clone()),
            Some(RejectionKind::HoneypotMissing {
                field: "website".to_string()
            })
        );
    }

    #[test]
    fn honeypot_checks_every_trap() {
        let meta = meta_of(&[
            ("trap_a", FieldMeta::new().honeypot()),
            ("trap_b", FieldMeta::new().honeypot()),
        ]);
        let submitted: Submission = [("trap_a", ""), ("trap_b", "BOT")].into_iter().collect();

        let outcome = SubmissionValidator::new().validate_honeypot(&meta, MetaFlag::Honeypot, &submitted);
        assert_eq!(
            outcome.rejection().map(|r| r.kind().clone()),
            Some(RejectionKind::HoneypotFilled {
                field: "trap_b".to_string(),
                value: "BOT".to_string(),
            })
        );
    }

    #[test]
    fn honeypot_second_trap_missing_fails() {
        let meta = meta_of(&[
            ("trap_a", FieldMeta::new().honeypot()),
            ("trap_b", FieldMeta::new().honeypot()),
        ]);
        let submitted: Submission = [("trap_a", "")].into_iter().collect();

        let outcome = SubmissionValidator::new().validate_honeypot(&meta, MetaFlag::Honeypot, &submitted);
        assert_eq!(outcome.rejection().and_then(Rejection::field), Some("trap_b"));
    }

    #[test]
    fn honeypot_all_traps_empty_passes() {
        let meta = meta_of(&[
            ("trap_a", FieldMeta::new().honeypot()),
            ("name", FieldMeta::new().required()),
            ("trap_b", FieldMeta::new().honeypot()),
        ]);
        let submitted: Submission = [("trap_a", ""), ("trap_b", "")].into_iter().collect();

        let outcome = SubmissionValidator::new().validate_honeypot(&meta, MetaFlag::Honeypot, &submitted);
        assert!(outcome.is_valid());
    }

    #[test]
    fn no_honeypot_field_passes() {
        let meta = meta_of(&[("name", FieldMeta::new().required())]);

        let outcome =
            SubmissionValidator::new().validate_honeypot(&meta, MetaFlag::Honeypot, &Submission::new());
        assert!(outcome.is_valid());
    }

    #[test]
    fn spam_check_predicate_ignores_case() {
        assert!(SubmissionValidator::is_valid_against_spam_check(
            &["Blue", "green"],
            "BLUE"
        ));
        assert!(SubmissionValidator::is_valid_against_spam_check(
            &["Blue", "green"],
            "Green"
        ));
        assert!(!SubmissionValidator::is_valid_against_spam_check(&["Blue"], "Red"));
        assert!(!SubmissionValidator::is_valid_against_spam_check::<&str>(&[], "Blue"));
    }

    #[test]
    fn spam_check_correct_answer_passes() {
        let meta = meta_of(&[("sky", FieldMeta::new().spam_check(["blue"]))]);
        let submitted: Submission = [("sky", "Blue")].into_iter().collect();

        let outcome = SubmissionValidator::new().validate_spam_check(&meta, MetaFlag::SpamCheck, &submitted);
        assert!(outcome.is_valid());
    }

    #[test]
    fn spam_check_wrong_answer_fails() {
        let meta = meta_of(&[("sky", FieldMeta::new().spam_check(["blue"]))]);
        let submitted: Submission = [("sky", "red")].into_iter().collect();

        let outcome = SubmissionValidator::new().validate_spam_check(&meta, MetaFlag::SpamCheck, &submitted);
        assert_eq!(
            outcome.rejection().map(|r| r.kind().clone()),
            Some(RejectionKind::SpamAnswerWrong {
                field: "sky".to_string()
            })
        );
    }

    #[test]
    fn spam_check_missing_answer_fails() {
        let meta = meta_of(&[("sky", FieldMeta::new().spam_check(["blue"]))]);

        let outcome =
            SubmissionValidator::new().validate_spam_check(&meta, MetaFlag::SpamCheck, &Submission::new());
        assert_eq!(
            outcome.rejection().and_then(Rejection::field),
            Some("sky")
        );
    }

    #[test]
    fn spam_check_without_field_fails() {
        let meta = meta_of(&[("name", FieldMeta::new().required())]);

        let outcome =
            SubmissionValidator::new().validate_spam_check(&meta, MetaFlag::SpamCheck, &Submission::new());
        assert_eq!(
            outcome.rejection().map(|r| r.kind().clone()),
            Some(RejectionKind::SpamCheckNotConfigured)
        );
    }

    #[test]
    fn spam_check_skips_flag_without_answers() {
        let flagged_only = FieldMeta {
            is_spam_check: Some(true),
            ..FieldMeta::default()
        };
        let meta = meta_of(&[
            ("bare", flagged_only),
            ("sky", FieldMeta::new().spam_check(["blue"])),
        ]);
        let submitted: Submission = [("sky", "blue")].into_iter().collect();

        let outcome = SubmissionValidator::new().validate_spam_check(&meta, MetaFlag::SpamCheck, &submitted);
        assert!(outcome.is_valid());
    }

    #[test]
    fn required_predicate() {
        assert!(!SubmissionValidator::is_valid_against_required_field(""));
        assert!(SubmissionValidator::is_valid_against_required_field("   "));
        assert!(SubmissionValidator::is_valid_against_required_field("x"));
        assert!(SubmissionValidator::is_valid_against_required_field("0"));
    }

    #[test]
    fn required_reports_first_failure_only() {
        let meta = meta_of(&[
            ("name", FieldMeta::new().required()),
            ("email", FieldMeta::new().required()),
        ]);
        let submitted: Submission = [("name", "")].into_iter().collect();
        let mut validator = SubmissionValidator::new();
        validator.set_message("form", "Please try again.");

        let outcome = validator
            .validate_required_fields(&meta, MetaFlag::Required, &submitted, Some("form"), true)
            .expect("message exists");

        assert_eq!(
            outcome.rejection().map(|r| r.kind().clone()),
            Some(RejectionKind::RequiredFieldEmpty {
                field: "name".to_string()
            })
        );
        let message = validator.message("form").unwrap_or_default();
        assert!(message.contains("Name"));
        assert!(!message.contains("Email"));
    }

    #[test]
    fn required_missing_field() {
        let meta = meta_of(&[("name", FieldMeta::new().required())]);
        let mut validator = SubmissionValidator::new();

        let outcome = validator
            .validate_required_fields(&meta, MetaFlag::Required, &Submission::new(), None, true)
            .expect("no message requested");

        assert_eq!(
            outcome.rejection().map(|r| r.kind().clone()),
            Some(RejectionKind::RequiredFieldMissing {
                field: "name".to_string()
            })
        );
    }

    #[test]
    fn required_without_append_leaves_message() {
        let meta = meta_of(&[("name", FieldMeta::new().required())]);
        let mut validator = SubmissionValidator::new();
        validator.set_message("form", "Original.");

        let outcome = validator
            .validate_required_fields(&meta, MetaFlag::Required, &Submission::new(), Some("form"), false)
            .expect("no append");

        assert!(!outcome.is_valid());
        assert_eq!(validator.message("form"), Some("Original."));
    }

    #[test]
    fn required_append_to_unknown_message_errors() {
        let meta = meta_of(&[("name", FieldMeta::new().required())]);
        let mut validator = SubmissionValidator::new();

        let error = validator
            .validate_required_fields(&meta, MetaFlag::Required, &Submission::new(), Some("nope"), true)
            .unwrap_err();
        assert_eq!(error.kind(), FormErrorKind::UnknownMessage);
    }

    #[test]
    fn required_whitespace_value_passes() {
        let meta = meta_of(&[("name", FieldMeta::new().required())]);
        let submitted: Submission = [("name", "   ")].into_iter().collect();
        let mut validator = SubmissionValidator::new();

        let outcome = validator
            .validate_required_fields(&meta, MetaFlag::Required, &submitted, None, true)
            .expect("no message requested");
        assert!(outcome.is_valid());
    }

    #[test]
    fn required_unknown_message_checked_before_scan() {
        let meta = meta_of(&[("name", FieldMeta::new().required())]);
        let submitted: Submission = [("name", "Ada")].into_iter().collect();
        let mut validator = SubmissionValidator::new();

        let error = validator
            .validate_required_fields(&meta, MetaFlag::Required, &submitted, Some("nope"), true)
            .unwrap_err();
        assert_eq!(error.kind(), FormErrorKind::UnknownMessage);

        let outcome = validator
            .validate_required_fields(&meta, MetaFlag::Required, &submitted, Some("nope"), false)
            .expect("no append requested");
        assert!(outcome.is_valid());
    }

    #[test]
    fn required_all_filled_passes() {
        let meta = meta_of(&[
            ("name", FieldMeta::new().required()),
            ("note", FieldMeta::new()),
        ]);
        let submitted: Submission = [("name", "Ada")].into_iter().collect();
        let mut validator = SubmissionValidator::new();

        let outcome = validator
            .validate_required_fields(&meta, MetaFlag::Required, &submitted, None, true)
            .expect("valid");
        assert!(outcome.is_valid());
    }

    mod proptests {
        use super::*;
        use crate::test_utils::{arb_field_name, arb_filled_value, arb_whitespace_value};
        use proptest::prelude::*;

        proptest! {
            /// Property: Any non-empty value satisfies a required field, whitespace included
            #[test]
            fn proptest_required_predicate_accepts_non_empty(
                whitespace in arb_whitespace_value(),
                filled in arb_filled_value()
            ) {
                prop_assert!(SubmissionValidator::is_valid_against_required_field(&whitespace));
                prop_assert!(SubmissionValidator::is_valid_against_required_field(&filled));
                prop_assert!(!SubmissionValidator::is_valid_against_required_field(""));
            }

            /// Property: A filled honeypot is always rejected and names its field
            #[test]
            fn proptest_filled_honeypot_rejected(
                field in arb_field_name(),
                value in arb_filled_value()
            ) {
                let meta = meta_of(&[(field.as_str(), FieldMeta::new().honeypot())]);
                let submitted: Submission = [(field.clone(), value)].into_iter().collect();

                let outcome = SubmissionValidator::new()
                    .validate_honeypot(&meta, MetaFlag::Honeypot, &submitted);

                prop_assert_eq!(outcome.rejection().and_then(Rejection::field), Some(field.as_str()));
            }

            /// Property: Spam answers match regardless of letter case
            #[test]
            fn proptest_spam_answer_case_insensitive(
                answer in prop::string::string_regex("[A-Za-z]{1,12}").unwrap()
            ) {
                let accepted = [answer.to_lowercase()];

                prop_assert!(SubmissionValidator::is_valid_against_spam_check(&accepted, &answer.to_uppercase()));
                prop_assert!(SubmissionValidator::is_valid_against_spam_check(&accepted, &answer));
            }
        }
    }
}
