//! Verdict and answer types
//!
//! Shared by the manual rule path and the AI path:
//! - VerdictStatus: allowed / conditional / not_allowed, ordered by severity
//! - Verdict: one sub-verdict per baggage type, never partial
//! - Answers: guided-question answers keyed by question id

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Answers to guided questions (question id → option value)
pub type Answers = BTreeMap<String, String>;

/// Display language
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    De,
    En,
}

impl Language {
    pub fn code(&self) -> &'static str {
        match self {
            Language::De => "de",
            Language::En => "en",
        }
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "de" => Ok(Language::De),
            "en" => Ok(Language::En),
            _ => Err(format!("Unknown language: {}. Use de or en", s)),
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Pre-authored text in both languages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Localized {
    pub de: &'static str,
    pub en: &'static str,
}

impl Localized {
    pub const fn new(de: &'static str, en: &'static str) -> Self {
        Self { de, en }
    }

    pub fn get(&self, lang: Language) -> &'static str {
        match lang {
            Language::De => self.de,
            Language::En => self.en,
        }
    }
}

/// Verdict status
///
/// Variant order is the severity order: `Allowed < Conditional < NotAllowed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerdictStatus {
    Allowed,
    Conditional,
    NotAllowed,
}

impl VerdictStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            VerdictStatus::Allowed => "allowed",
            VerdictStatus::Conditional => "conditional",
            VerdictStatus::NotAllowed => "not_allowed",
        }
    }

    /// Strict parse of the wire value; anything else is rejected.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "allowed" => Some(VerdictStatus::Allowed),
            "conditional" => Some(VerdictStatus::Conditional),
            "not_allowed" => Some(VerdictStatus::NotAllowed),
            _ => None,
        }
    }

    pub fn label(&self, lang: Language) -> &'static str {
        let text = match self {
            VerdictStatus::Allowed => Localized::new("Erlaubt", "Allowed"),
            VerdictStatus::Conditional => Localized::new("Mit Auflagen", "Conditional"),
            VerdictStatus::NotAllowed => Localized::new("Nicht erlaubt", "Not allowed"),
        };
        text.get(lang)
    }
}

impl fmt::Display for VerdictStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Verdict for one baggage type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaggageVerdict {
    pub status: VerdictStatus,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tip: Option<String>,
}

impl BaggageVerdict {
    pub fn new(status: VerdictStatus, text: impl Into<String>) -> Self {
        Self {
            status,
            text: text.into(),
            tip: None,
        }
    }

    pub fn with_tip(mut self, tip: impl Into<String>) -> Self {
        self.tip = Some(tip.into());
        self
    }
}

/// Full verdict: hand baggage and checked baggage
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Verdict {
    pub hand_baggage: BaggageVerdict,
    pub checked_baggage: BaggageVerdict,
}

impl Verdict {
    pub fn new(hand_baggage: BaggageVerdict, checked_baggage: BaggageVerdict) -> Self {
        Self {
            hand_baggage,
            checked_baggage,
        }
    }

    /// The more severe of the two sub-verdicts.
    pub fn overall_status(&self) -> VerdictStatus {
        self.hand_baggage.status.max(self.checked_baggage.status)
    }
}
