//! Contact page form: a local field object and a synchronous submit handler.

use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Subject {
    Quote,
    Product,
    Training,
    Support,
    Other,
}

impl Subject {
    /// Select-option value; the empty placeholder maps to `None`.
    pub fn from_value(value: &str) -> Option<Subject> {
        match value {
            "quote" => Some(Subject::Quote),
            "product" => Some(Subject::Product),
            "training" => Some(Subject::Training),
            "support" => Some(Subject::Support),
            "other" => Some(Subject::Other),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub company: String,
    pub phone: String,
    pub subject: Option<Subject>,
    pub message: String,
}

impl ContactForm {
    /// Update a field by its input `name`. Returns false for unknown fields.
    pub fn set_field(&mut self, field: &str, value: &str) -> bool {
        let slot = match field {
            "name" => &mut self.name,
            "email" => &mut self.email,
            "company" => &mut self.company,
            "phone" => &mut self.phone,
            "message" => &mut self.message,
            "subject" => {
                self.subject = Subject::from_value(value);
                return true;
            }
            _ => return false,
        };
        value.clone_into(slot);
        true
    }
}

pub trait ContactHandler {
    fn submit(&mut self, form: &ContactForm);
}

/// Logs each submission and otherwise does nothing.
#[derive(Debug, Default)]
pub struct LoggingContactHandler {
    submitted: usize,
}

impl LoggingContactHandler {
    pub fn submitted(&self) -> usize {
        self.submitted
    }
}

impl ContactHandler for LoggingContactHandler {
    fn submit(&mut self, form: &ContactForm) {
        self.submitted += 1;
        log::info!("contact form submitted: {form:?}");
    }
}
