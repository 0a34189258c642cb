//! Supported storefront locales and localized text.

use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::value_object::ValueObject;

/// One of the three languages the storefront is published in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    Ka,
    Ru,
    En,
}

impl Locale {
    pub const ALL: [Locale; 3] = [Locale::Ka, Locale::Ru, Locale::En];

    pub fn as_str(self) -> &'static str {
        match self {
            Locale::Ka => "ka",
            Locale::Ru => "ru",
            Locale::En => "en",
        }
    }
}

impl core::fmt::Display for Locale {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Locale {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ka" => Ok(Locale::Ka),
            "ru" => Ok(Locale::Ru),
            "en" => Ok(Locale::En),
            other => Err(DomainError::invalid_id(format!("Locale: {other:?}"))),
        }
    }
}

/// A string translated into every supported locale.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalizedText {
    #[serde(default)]
    pub ka: String,
    #[serde(default)]
    pub ru: String,
    #[serde(default)]
    pub en: String,
}

impl ValueObject for LocalizedText {}

impl LocalizedText {
    pub fn new(ka: impl Into<String>, ru: impl Into<String>, en: impl Into<String>) -> Self {
        Self {
            ka: ka.into(),
            ru: ru.into(),
            en: en.into(),
        }
    }

    /// Same text in every locale (brand names, model numbers).
    pub fn uniform(text: impl Into<String>) -> Self {
        let text = text.into();
        Self {
            ka: text.clone(),
            ru: text.clone(),
            en: text,
        }
    }

    pub fn get(&self, locale: Locale) -> &str {
        match locale {
            Locale::Ka => &self.ka,
            Locale::Ru => &self.ru,
            Locale::En => &self.en,
        }
    }

    /// All translations, in [`Locale::ALL`] order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        Locale::ALL.into_iter().map(move |l| self.get(l))
    }
}
