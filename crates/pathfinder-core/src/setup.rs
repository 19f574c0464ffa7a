//! One-time onboarding form and its validation.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::i18n;
use crate::profile::{Language, DEFAULT_CLASS};

/// Raw input from the setup screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetupForm {
    pub name: String,
    pub grade: String,
    pub age: String,
    pub consent: bool,
}

impl Default for SetupForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            grade: DEFAULT_CLASS.to_string(),
            age: String::new(),
            consent: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SetupField {
    Name,
    Grade,
    Age,
    Consent,
}

/// Field-level validation messages, localised.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[error("setup form has {} invalid field(s)", .fields.len())]
pub struct SetupErrors {
    pub fields: BTreeMap<SetupField, String>,
}

impl SetupErrors {
    pub fn get(&self, field: SetupField) -> Option<&str> {
        self.fields.get(&field).map(String::as_str)
    }
}

/// A form that passed validation, with whitespace trimmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidSetup {
    pub name: String,
    pub grade: String,
    pub age: String,
}

impl SetupForm {
    /// Check required fields and consent. Messages use `lang`.
    pub fn validate(&self, lang: Language) -> Result<ValidSetup, SetupErrors> {
        let text = i18n::setup_text(lang);
        let mut fields = BTreeMap::new();

        let name = self.name.trim();
        let grade = self.grade.trim();
        let age = self.age.trim();

        for (field, value) in [
            (SetupField::Name, name),
            (SetupField::Grade, grade),
            (SetupField::Age, age),
        ] {
            if value.is_empty() {
                fields.insert(field, text.required.to_string());
            }
        }
        if !self.consent {
            fields.insert(SetupField::Consent, text.consent_required.to_string());
        }

        if !fields.is_empty() {
            return Err(SetupErrors { fields });
        }
        Ok(ValidSetup {
            name: name.to_string(),
            grade: grade.to_string(),
            age: age.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> SetupForm {
        SetupForm {
            name: "  Asha ".into(),
            grade: "9th".into(),
            age: "14".into(),
            consent: true,
        }
    }

    #[test]
    fn valid_form_is_trimmed() {
        let v = filled().validate(Language::En).unwrap();
        assert_eq!(v.name, "Asha");
        assert_eq!(v.grade, "9th");
    }

    #[test]
    fn every_missing_field_is_reported() {
        let form = SetupForm {
            name: "   ".into(),
            grade: String::new(),
            age: String::new(),
            consent: false,
        };
        let errs = form.validate(Language::En).unwrap_err();
        assert_eq!(errs.fields.len(), 4);
        assert_eq!(errs.get(SetupField::Name), Some("This field is required"));
        assert_eq!(
            errs.get(SetupField::Consent),
            Some("Please consent to continue")
        );
    }

    #[test]
    fn messages_follow_language() {
        let form = SetupForm {
            consent: false,
            ..filled()
        };
        let errs = form.validate(Language::Hi).unwrap_err();
        assert_eq!(
            errs.get(SetupField::Consent),
            Some(i18n::setup_text(Language::Hi).consent_required)
        );
        assert!(errs.get(SetupField::Name).is_none());
    }

    #[test]
    fn default_form_prefills_grade() {
        assert_eq!(SetupForm::default().grade, "10th");
    }
}
