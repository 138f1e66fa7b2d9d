//! Attribute rendering shared by the tag builders.

/// Ordered list of HTML attributes that drops empty values.
///
/// Each emitted attribute renders as `name="value"` followed by one space.
/// Values are written verbatim.
#[derive(Debug, Default)]
pub(crate) struct Attributes {
    rendered: String,
}

impl Attributes {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Adds a string attribute unless `value` is empty.
    pub(crate) fn text(mut self, name: &str, value: Option<&str>) -> Self {
        if let Some(value) = value.filter(|v| !v.is_empty()) {
            self.push(name, value);
        }
        self
    }

    /// Adds a numeric attribute unless `value` is `None`. Zero is emitted.
    pub(crate) fn number(mut self, name: &str, value: Option<u32>) -> Self {
        if let Some(value) = value {
            self.push(name, value);
        }
        self
    }

    fn push(&mut self, name: &str, value: impl std::fmt::Display) {
        self.rendered.push_str(&format!("{}=\"{}\" ", name, value));
    }

    pub(crate) fn render(self) -> String {
        self.rendered
    }
}

/// Class name emitted on fields that must be filled in.
pub(crate) const REQUIRED_CLASS: &str = "required";

pub(crate) fn required_class(is_required: bool) -> Option<&'static str> {
    is_required.then_some(REQUIRED_CLASS)
}

/// Escapes text for safe inclusion in HTML content or a quoted attribute.
///
/// The tag builders never escape. Run untrusted text through this before
/// handing it to them.
///
/// # Examples
///
/// ```
/// use cms_forms::escape_html;
///
/// assert_eq!(escape_html(r#"<b>"Tom" & 'Jerry'</b>"#),
///            "&lt;b&gt;&quot;Tom&quot; &amp; &#39;Jerry&#39;&lt;/b&gt;");
/// ```
#[must_use]
pub fn escape_html(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
