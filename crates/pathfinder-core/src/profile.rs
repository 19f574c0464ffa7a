//! Student profile and locale preference.
//!
//! The profile is replaced wholesale on every edit; there is no field-level
//! mutation API. Only name, grade, age and language are mirrored to durable
//! storage.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::StorageError;
use crate::storage::{keys, LocalStore};

pub const DEFAULT_NAME: &str = "<Student name>";
pub const DEFAULT_CLASS: &str = "10th";

/// Supported UI locales.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Hi,
    Te,
    Ta,
    Bn,
    Gu,
}

impl Language {
    pub const ALL: [Language; 6] = [
        Language::En,
        Language::Hi,
        Language::Te,
        Language::Ta,
        Language::Bn,
        Language::Gu,
    ];

    pub fn code(self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Hi => "hi",
            Language::Te => "te",
            Language::Ta => "ta",
            Language::Bn => "bn",
            Language::Gu => "gu",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Language::ALL
            .into_iter()
            .find(|lang| lang.code() == s)
            .ok_or_else(|| format!("unsupported language: {s}"))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub name: String,
    /// School grade, e.g. "10th".
    pub class: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<String>,
    pub language: Language,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

impl Default for UserProfile {
    fn default() -> Self {
        Self {
            name: DEFAULT_NAME.to_string(),
            class: DEFAULT_CLASS.to_string(),
            age: None,
            language: Language::En,
            email: None,
            phone: None,
            password: None,
        }
    }
}

impl UserProfile {
    /// Build a profile from the persisted fields, falling back to defaults
    /// for anything missing or empty.
    pub fn load<S: LocalStore>(store: &S) -> Result<Self, StorageError> {
        let non_empty = |v: Option<String>| v.filter(|s| !s.is_empty());
        let defaults = Self::default();
        Ok(Self {
            name: non_empty(store.get(keys::USER_NAME)?).unwrap_or(defaults.name),
            class: non_empty(store.get(keys::USER_GRADE)?).unwrap_or(defaults.class),
            age: non_empty(store.get(keys::USER_AGE)?),
            language: load_language(store)?.unwrap_or_default(),
            ..Self::default()
        })
    }

    /// Persist name, grade, age and language in one write.
    pub fn persist<S: LocalStore>(&self, store: &S) -> Result<(), StorageError> {
        let age = self.age.as_deref().unwrap_or_default();
        store.set_many(&[
            (keys::USER_NAME, self.name.as_str()),
            (keys::USER_GRADE, self.class.as_str()),
            (keys::USER_AGE, age),
            (keys::USER_LANGUAGE, self.language.code()),
        ])
    }
}

/// Read the stored language. Unknown codes are ignored rather than failing
/// the whole boot.
pub fn load_language<S: LocalStore>(store: &S) -> Result<Option<Language>, StorageError> {
    Ok(store
        .get(keys::USER_LANGUAGE)?
        .and_then(|code| code.parse().ok()))
}
