//! HTML form construction.

use indexmap::IndexMap;

use crate::html::{required_class, Attributes};
use crate::meta::{first_flagged, FieldMeta, FieldMetaMap, MetaFlag};
use crate::{FieldValues, FormError};

/// Optional attributes for [`FormRenderer::build_input`].
///
/// Anything left at its default is omitted from the tag.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputOptions<'a> {
    /// `type` attribute.
    pub input_type: Option<&'a str>,
    /// `value` attribute, written verbatim.
    pub value: Option<&'a str>,
    /// `size` attribute.
    pub size: Option<u32>,
}

/// Builds form markup and keeps per-field markup, labels and metadata for one request.
///
/// The tag builders write their arguments into the markup as-is. Text that
/// came from a user must go through [`escape_html`](crate::escape_html) first.
///
/// # Examples
///
/// ```
/// use cms_forms::{FieldMeta, FormRenderer, InputOptions};
///
/// let mut form = FormRenderer::new("/contact", "post");
/// let input = form.build_input("name", "name", Some(50), true, &InputOptions::default());
/// form.set_field("name", input).set_field_meta("name", FieldMeta::new().required());
///
/// let html = form.render_form(form.field("name").unwrap_or_default(), None, Some("contact"));
/// assert_eq!(
///     html,
///     r#"<form action="/contact" method="post" id="contact" ><input name="name" id="name" class="required" maxlength="50" /></form>"#
/// );
/// ```
#[derive(Debug, Clone, Default)]
pub struct FormRenderer {
    action: String,
    method: String,
    labels: IndexMap<String, String>,
    fields: IndexMap<String, String>,
    field_meta: FieldMetaMap,
}

impl FormRenderer {
    /// Creates a renderer that targets `action` with the HTTP `method`.
    ///
    /// Either may be empty, in which case the attribute is left off the `<form>` tag.
    pub fn new(action: impl Into<String>, method: impl Into<String>) -> Self {
        Self {
            action: action.into(),
            method: method.into(),
            ..Self::default()
        }
    }

    /// Returns the form action URL.
    pub fn action(&self) -> &str {
        &self.action
    }

    /// Returns the form HTTP method.
    pub fn method(&self) -> &str {
        &self.method
    }

    /// Stores pre-rendered field markup under `key`.
    pub fn set_field(&mut self, key: impl Into<String>, markup: impl Into<String>) -> &mut Self {
        self.fields.insert(key.into(), markup.into());
        self
    }

    /// Returns the field markup stored under `key`.
    pub fn field(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }

    /// Returns all stored field markup in insertion order.
    pub fn fields(&self) -> &IndexMap<String, String> {
        &self.fields
    }

    /// Stores validation metadata for the field `key`.
    pub fn set_field_meta(&mut self, key: impl Into<String>, meta: FieldMeta) -> &mut Self {
        self.field_meta.insert(key.into(), meta);
        self
    }

    /// Returns the metadata stored for `key`.
    pub fn field_meta(&self, key: &str) -> Option<&FieldMeta> {
        self.field_meta.get(key)
    }

    /// Returns all field metadata in insertion order.
    ///
    /// This is the map the [`SubmissionValidator`](crate::SubmissionValidator)
    /// scans when the form comes back.
    pub fn all_field_meta(&self) -> &FieldMetaMap {
        &self.field_meta
    }

    /// Stores label markup for the field `key`.
    pub fn set_label(&mut self, key: impl Into<String>, label: impl Into<String>) -> &mut Self {
        self.labels.insert(key.into(), label.into());
        self
    }

    /// Returns the label stored for the field `key`.
    pub fn label_matching_field_key(&self, key: &str) -> Option<&str> {
        self.labels.get(key).map(String::as_str)
    }

    /// Returns the label for `key` followed by its field markup.
    ///
    /// A missing label contributes nothing.
    ///
    /// # Errors
    ///
    /// Returns [`FormErrorKind::UnknownField`](crate::FormErrorKind::UnknownField)
    /// if no field markup is stored under `key`.
    pub fn render_labelled_field(&self, key: &str) -> Result<String, FormError> {
        let field = self.field(key).ok_or_else(|| FormError::unknown_field(key))?;
        let label = self.label_matching_field_key(key).unwrap_or_default();

        Ok(format!("{}{}", label, field))
    }

    /// Builds `<label for="..">text</label>`.
    pub fn build_label(&self, for_attr: &str, text: &str) -> String {
        format!("<label for=\"{}\">{}</label>", for_attr, text)
    }

    /// Builds a self-closing `<input/>` tag.
    ///
    /// Empty strings and `None` are omitted. A `maxlength` of `Some(0)` is emitted.
    /// Required inputs carry `class="required"`. Other inputs get no class attribute.
    pub fn build_input(
        &self,
        name: &str,
        id: &str,
        maxlength: Option<u32>,
        is_required: bool,
        options: &InputOptions<'_>,
    ) -> String {
        let attrs = Attributes::new()
            .text("name", Some(name))
            .text("id", Some(id))
            .text("class", required_class(is_required))
            .number("maxlength", maxlength)
            .text("type", options.input_type)
            .text("value", options.value)
            .number("size", options.size)
            .render();

        format!("<input {}/>", attrs)
    }

    /// Builds an empty `<textarea></textarea>`.
    pub fn build_text_area(&self, name: &str, id: &str, is_required: bool) -> String {
        let attrs = field_attributes(name, id, is_required);

        format!("<textarea {}></textarea>", attrs)
    }

    /// Builds a `<select>` with one `<option>` per `(text, value)` pair, in iteration order.
    ///
    /// # Examples
    ///
    /// ```
    /// use cms_forms::FormRenderer;
    ///
    /// let form = FormRenderer::default();
    /// let html = form.build_select("size", [("Small", "s"), ("Large", "l")], "size", false);
    /// assert_eq!(
    ///     html,
    ///     r#"<select name="size" id="size" ><option value="s">Small</option><option value="l">Large</option></select>"#
    /// );
    /// ```
    pub fn build_select<I, T, V>(
        &self,
        name: &str,
        options: I,
        id: &str,
        is_required: bool,
    ) -> String
    where
        I: IntoIterator<Item = (T, V)>,
        T: AsRef<str>,
        V: AsRef<str>,
    {
        let options: String = options
            .into_iter()
            .map(|(text, value)| {
                format!(
                    "<option value=\"{}\">{}</option>",
                    value.as_ref(),
                    text.as_ref()
                )
            })
            .collect();
        let attrs = field_attributes(name, id, is_required);

        format!("<select {}>{}</select>", attrs, options)
    }

    /// Wraps `fields` in a `<form>` tag.
    ///
    /// `action` and `method` come from construction. `name` and `id` apply to
    /// this call only. Empty or missing values are left off.
    pub fn render_form(&self, fields: &str, name: Option<&str>, id: Option<&str>) -> String {
        let attrs = Attributes::new()
            .text("action", Some(self.action.as_str()))
            .text("method", Some(self.method.as_str()))
            .text("name", name)
            .text("id", id)
            .render();

        tracing::trace!(action = %self.action, markup_len = fields.len(), "rendered form");

        format!("<form {}>{}</form>", attrs, fields)
    }

    /// Returns the value submitted for the first field flagged as email.
    ///
    /// Only the first email field in metadata order is considered. `None`
    /// means no field is flagged, or the flagged field was not submitted.
    pub fn find_user_entered_email<'a, D>(&self, submitted: &'a D) -> Option<&'a str>
    where
        D: FieldValues + ?Sized,
    {
        let (name, _) = first_flagged(&self.field_meta, MetaFlag::Email)?;
        submitted.value(name)
    }
}

fn field_attributes(name: &str, id: &str, is_required: bool) -> String {
    Attributes::new()
        .text("name", Some(name))
        .text("id", Some(id))
        .text("class", required_class(is_required))
        .render()
}
