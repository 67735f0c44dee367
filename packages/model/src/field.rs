//! Field definitions and the designer palette

use serde::{Deserialize, Serialize};
use std::fmt;

/// Closed set of input kinds a form can contain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Text,
    Textarea,
    Dropdown,
    Checkbox,
    Date,
    Email,
    Phone,
    Number,
    Radio,
}

impl FieldType {
    /// Palette order
    pub const ALL: [FieldType; 9] = [
        FieldType::Text,
        FieldType::Textarea,
        FieldType::Dropdown,
        FieldType::Checkbox,
        FieldType::Radio,
        FieldType::Date,
        FieldType::Email,
        FieldType::Phone,
        FieldType::Number,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FieldType::Text => "text",
            FieldType::Textarea => "textarea",
            FieldType::Dropdown => "dropdown",
            FieldType::Checkbox => "checkbox",
            FieldType::Date => "date",
            FieldType::Email => "email",
            FieldType::Phone => "phone",
            FieldType::Number => "number",
            FieldType::Radio => "radio",
        }
    }

    /// Parse the lowercase wire name
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == name)
    }

    /// Name shown on the palette tile
    pub fn palette_label(&self) -> &'static str {
        match self {
            FieldType::Text => "Text Input",
            FieldType::Textarea => "Textarea",
            FieldType::Dropdown => "Dropdown",
            FieldType::Checkbox => "Checkbox",
            FieldType::Radio => "Radio Group",
            FieldType::Date => "Date",
            FieldType::Email => "Email",
            FieldType::Phone => "Phone",
            FieldType::Number => "Number",
        }
    }

    /// Whether the field carries an `options` list
    pub fn has_options(&self) -> bool {
        matches!(self, FieldType::Dropdown | FieldType::Radio)
    }

    /// Whether `minLength`/`maxLength` apply
    pub fn supports_length(&self) -> bool {
        matches!(self, FieldType::Text | FieldType::Textarea)
    }

    /// Whether `pattern` applies
    pub fn supports_pattern(&self) -> bool {
        matches!(self, FieldType::Text)
    }

    /// Draft dropped onto the canvas when this palette tile is used
    pub fn default_field(&self) -> FieldDraft {
        let (label, placeholder) = match self {
            FieldType::Text => ("Text Input", Some("Enter text")),
            FieldType::Textarea => ("Textarea", Some("Enter your message")),
            FieldType::Dropdown => ("Dropdown", None),
            FieldType::Checkbox => ("Checkbox", None),
            FieldType::Radio => ("Radio Group", None),
            FieldType::Date => ("Date", None),
            FieldType::Email => ("Email", Some("Enter email address")),
            FieldType::Phone => ("Phone Number", Some("Enter phone number")),
            FieldType::Number => ("Number", Some("Enter number")),
        };

        let options = self.has_options().then(|| {
            vec![
                "Option 1".to_string(),
                "Option 2".to_string(),
                "Option 3".to_string(),
            ]
        });

        FieldDraft {
            field_type: *self,
            label: label.to_string(),
            placeholder: placeholder.map(str::to_string),
            options,
            ..FieldDraft::new(*self, label)
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Optional constraints for text-like fields
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldValidation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_length: Option<usize>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<usize>,

    /// Regular expression the value must match (unanchored search)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
}

impl FieldValidation {
    pub fn is_empty(&self) -> bool {
        self.min_length.is_none() && self.max_length.is_none() && self.pattern.is_none()
    }
}

/// One input definition within a form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Field {
    pub id: String,

    #[serde(rename = "type")]
    pub field_type: FieldType,

    pub label: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,

    #[serde(default)]
    pub required: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub help_text: Option<String>,

    /// Display order is insertion order
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validation: Option<FieldValidation>,

    /// Zero-based index into the owning form's steps
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub step: Option<usize>,
}

impl Field {
    /// Apply a partial update. `id` is never touched.
    pub fn merge(&mut self, patch: &FieldPatch) {
        if let Some(field_type) = patch.field_type {
            self.field_type = field_type;
        }
        if let Some(label) = &patch.label {
            self.label = label.clone();
        }
        if let Some(placeholder) = &patch.placeholder {
            self.placeholder = placeholder.clone();
        }
        if let Some(required) = patch.required {
            self.required = required;
        }
        if let Some(help_text) = &patch.help_text {
            self.help_text = help_text.clone();
        }
        if let Some(options) = &patch.options {
            self.options = options.clone();
        }
        if let Some(validation) = &patch.validation {
            self.validation = validation.clone();
        }
        if let Some(step) = patch.step {
            self.step = step;
        }
    }

    /// Options for dropdown/radio fields, empty otherwise
    pub fn options(&self) -> &[String] {
        self.options.as_deref().unwrap_or_default()
    }
}

/// A field that has not been assigned an id yet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDraft {
    #[serde(rename = "type")]
    pub field_type: FieldType,

    pub label: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,

    #[serde(default)]
    pub required: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub help_text: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validation: Option<FieldValidation>,
}

impl FieldDraft {
    pub fn new(field_type: FieldType, label: impl Into<String>) -> Self {
        Self {
            field_type,
            label: label.into(),
            placeholder: None,
            required: false,
            help_text: None,
            options: None,
            validation: None,
        }
    }

    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    pub fn with_options<I, S>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options = Some(options.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_validation(mut self, validation: FieldValidation) -> Self {
        self.validation = Some(validation);
        self
    }

    /// Materialize the draft with an id and optional step assignment
    pub fn into_field(self, id: String, step: Option<usize>) -> Field {
        Field {
            id,
            field_type: self.field_type,
            label: self.label,
            placeholder: self.placeholder,
            required: self.required,
            help_text: self.help_text,
            options: self.options,
            validation: self.validation,
            step,
        }
    }
}

/// Partial update for a field.
///
/// Outer `None` leaves a property untouched; for optional properties
/// `Some(None)` clears it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldPatch {
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub field_type: Option<FieldType>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    #[serde(
        default,
        deserialize_with = "crate::double_option::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    pub placeholder: Option<Option<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,

    #[serde(
        default,
        deserialize_with = "crate::double_option::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    pub help_text: Option<Option<String>>,

    #[serde(
        default,
        deserialize_with = "crate::double_option::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    pub options: Option<Option<Vec<String>>>,

    #[serde(
        default,
        deserialize_with = "crate::double_option::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    pub validation: Option<Option<FieldValidation>>,

    #[serde(
        default,
        deserialize_with = "crate::double_option::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    pub step: Option<Option<usize>>,
}

impl FieldPatch {
    pub fn label(label: impl Into<String>) -> Self {
        Self {
            label: Some(label.into()),
            ..Self::default()
        }
    }

    pub fn required(required: bool) -> Self {
        Self {
            required: Some(required),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palette_defaults() {
        let dropdown = FieldType::Dropdown.default_field();
        assert_eq!(dropdown.label, "Dropdown");
        assert_eq!(dropdown.options.as_ref().map(Vec::len), Some(3));
        assert!(!dropdown.required);

        let phone = FieldType::Phone.default_field();
        assert_eq!(phone.label, "Phone Number");
        assert_eq!(phone.placeholder.as_deref(), Some("Enter phone number"));
        assert!(phone.options.is_none());
    }

    #[test]
    fn test_field_type_wire_names() {
        let json = serde_json::to_string(&FieldType::Textarea).unwrap();
        assert_eq!(json, "\"textarea\"");
        assert_eq!(FieldType::parse("radio"), Some(FieldType::Radio));
        assert_eq!(FieldType::parse("slider"), None);
    }

    #[test]
    fn test_merge_keeps_id_and_clears_optionals() {
        let mut field = FieldDraft::new(FieldType::Text, "Name")
            .with_placeholder("Your name")
            .into_field("f1".to_string(), None);

        field.merge(&FieldPatch {
            label: Some("Full name".to_string()),
            placeholder: Some(None),
            required: Some(true),
            ..FieldPatch::default()
        });

        assert_eq!(field.id, "f1");
        assert_eq!(field.label, "Full name");
        assert_eq!(field.placeholder, None);
        assert!(field.required);
    }

    #[test]
    fn test_patch_null_clears_and_missing_leaves() {
        let patch: FieldPatch =
            serde_json::from_str(r#"{"placeholder":null,"label":"Name"}"#).unwrap();
        assert_eq!(patch.placeholder, Some(None));
        assert_eq!(patch.help_text, None);

        let clear = FieldPatch {
            validation: Some(None),
            step: Some(None),
            ..FieldPatch::default()
        };
        let json = serde_json::to_string(&clear).unwrap();
        assert_eq!(json, r#"{"validation":null,"step":null}"#);
        assert_eq!(serde_json::from_str::<FieldPatch>(&json).unwrap(), clear);
    }

    #[test]
    fn test_field_json_shape() {
        let field = FieldDraft::new(FieldType::Text, "Name")
            .with_validation(FieldValidation {
                min_length: Some(2),
                ..FieldValidation::default()
            })
            .into_field("name".to_string(), Some(0));

        let json = serde_json::to_value(&field).unwrap();
        assert_eq!(json["type"], "text");
        assert_eq!(json["validation"]["minLength"], 2);
        assert_eq!(json["step"], 0);
        assert!(json.get("helpText").is_none());
    }
}
