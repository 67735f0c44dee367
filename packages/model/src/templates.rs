//! Templates shipped with a fresh store

use crate::field::{FieldDraft, FieldType, FieldValidation};
use crate::form::{FormBody, StepDraft, Template};

fn min_length(n: usize) -> FieldValidation {
    FieldValidation {
        min_length: Some(n),
        ..FieldValidation::default()
    }
}

fn contact_us() -> Template {
    Template {
        id: "contact-us".to_string(),
        name: "Contact Us".to_string(),
        description: "A simple contact form with name, email, and message fields".to_string(),
        form_data: FormBody {
            title: "Contact Us".to_string(),
            description: Some("Get in touch with us".to_string()),
            is_multi_step: false,
            fields: vec![
                FieldDraft::new(FieldType::Text, "Full Name")
                    .with_placeholder("Enter your full name")
                    .required(true)
                    .with_validation(min_length(2))
                    .into_field("name".to_string(), None),
                FieldDraft::new(FieldType::Email, "Email Address")
                    .with_placeholder("Enter your email")
                    .required(true)
                    .into_field("email".to_string(), None),
                FieldDraft::new(FieldType::Textarea, "Message")
                    .with_placeholder("Enter your message")
                    .required(true)
                    .with_validation(min_length(10))
                    .into_field("message".to_string(), None),
            ],
            steps: vec![],
        },
    }
}

fn survey() -> Template {
    Template {
        id: "survey".to_string(),
        name: "Customer Survey".to_string(),
        description: "Multi-step customer feedback survey".to_string(),
        form_data: FormBody {
            title: "Customer Satisfaction Survey".to_string(),
            description: Some("Help us improve our services".to_string()),
            is_multi_step: true,
            fields: vec![
                FieldDraft::new(FieldType::Text, "Your Name")
                    .required(true)
                    .into_field("name".to_string(), Some(0)),
                FieldDraft::new(FieldType::Radio, "Overall Satisfaction")
                    .required(true)
                    .with_options([
                        "Very Satisfied",
                        "Satisfied",
                        "Neutral",
                        "Dissatisfied",
                        "Very Dissatisfied",
                    ])
                    .into_field("rating".to_string(), Some(1)),
                FieldDraft::new(FieldType::Textarea, "Additional Feedback")
                    .with_placeholder("Tell us more about your experience")
                    .into_field("feedback".to_string(), Some(1)),
            ],
            steps: vec![
                StepDraft::new("Personal Information").into_step("step1".to_string()),
                StepDraft::new("Feedback").into_step("step2".to_string()),
            ],
        },
    }
}

/// Templates available before the user saves any of their own
pub fn builtin_templates() -> Vec<Template> {
    vec![contact_us(), survey()]
}
