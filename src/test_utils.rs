//! Shared proptest strategies for unit tests.

use proptest::prelude::*;

/// Field identifiers as a CMS would declare them.
pub(crate) fn arb_field_name() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-z][a-z_]{0,15}").unwrap()
}

/// Values with at least one non-whitespace character.
pub(crate) fn arb_filled_value() -> impl Strategy<Value = String> {
    prop::string::string_regex("[ ]{0,3}[A-Za-z0-9@.]{1,20}[ ]{0,3}").unwrap()
}

/// Non-empty values made only of whitespace.
pub(crate) fn arb_whitespace_value() -> impl Strategy<Value = String> {
    prop::string::string_regex("[ \\t\\n\\r]{1,10}").unwrap()
}
