//! HTML form construction and submission validation for small CMS applications.
//!
//! This crate covers the two halves of a form round trip:
//! - **Rendering**: [`FormRenderer`] builds labels, inputs, textareas, selects
//!   and the enclosing `<form>` tag, and keeps per-field markup and metadata
//! - **Validation**: [`SubmissionValidator`] checks submitted values against
//!   that metadata (required fields, honeypot traps, spam-check questions)
//!
//! Both are scoped to a single request. Nothing here performs I/O, decodes
//! request bodies or escapes markup on its own; see [`escape_html`].
//!
//! # Core Types
//!
//! - [`FieldMeta`]: Declarative per-field flags, keyed by field in a [`FieldMetaMap`]
//! - [`FieldValues`]: Lookup of submitted values, implemented for [`Submission`] and std maps
//! - [`Validation`]: Tagged outcome, `Valid` or `Invalid(Rejection)`
//! - [`FormError`]: Returned when an operation needs a stored entry that is missing
//!
//! # Examples
//!
//! ```
//! use cms_forms::{FieldMeta, FormRenderer, InputOptions, MetaFlag, Submission, SubmissionValidator};
//!
//! let mut form = FormRenderer::new("/contact", "post");
//! let name = form.build_input("name", "name", Some(50), true, &InputOptions::default());
//! let trap = form.build_input("website", "website", None, false, &InputOptions::default());
//! form.set_field("name", name)
//!     .set_field_meta("name", FieldMeta::new().required())
//!     .set_field("website", trap)
//!     .set_field_meta("website", FieldMeta::new().honeypot());
//!
//! let submitted: Submission = [("name", "Ada"), ("website", "")].into_iter().collect();
//! let validator = SubmissionValidator::new();
//!
//! assert!(validator
//!     .validate_honeypot(form.all_field_meta(), MetaFlag::Honeypot, &submitted)
//!     .is_valid());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod error;
mod html;
mod meta;
mod renderer;
mod submission;
mod validation;
mod validator;

#[cfg(test)]
mod test_utils;

pub use error::{FormError, FormErrorKind};
pub use html::escape_html;
pub use meta::{FieldMeta, FieldMetaMap, MetaFlag};
pub use renderer::{FormRenderer, InputOptions};
pub use submission::{FieldValues, Submission};
pub use validation::{Rejection, RejectionKind, Validation};
pub use validator::SubmissionValidator;
