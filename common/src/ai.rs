//! AI result adapter
//!
//! Turns the untrusted classifier payload into an `AiAnalysis` that is
//! always well-formed. Malformed input never escapes as an error: it
//! becomes `identified: false` with a summary the UI can show.

use crate::catalog::{self, CategoryId};
use crate::parser::parse_response_object;
use crate::types::{BaggageVerdict, Language, Localized, Verdict, VerdictStatus};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, warn};

const UNPARSEABLE_SUMMARY: Localized = Localized::new(
    "KI-Antwort konnte nicht verarbeitet werden. Bitte wählen Sie den Gegenstand manuell aus.",
    "The AI response could not be processed. Please select the item manually.",
);

const NOT_IDENTIFIED_SUMMARY: Localized = Localized::new(
    "Der Gegenstand konnte nicht erkannt werden. Bitte wählen Sie ihn manuell aus.",
    "The item could not be identified. Please select it manually.",
);

/// Classifier confidence, display only
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    High,
    Medium,
    Low,
}

impl Confidence {
    fn parse(s: &str) -> Option<Self> {
        match s {
            "high" => Some(Confidence::High),
            "medium" => Some(Confidence::Medium),
            "low" => Some(Confidence::Low),
            _ => None,
        }
    }

    pub fn label(&self, lang: Language) -> &'static str {
        let text = match self {
            Confidence::High => Localized::new("hoch", "high"),
            Confidence::Medium => Localized::new("mittel", "medium"),
            Confidence::Low => Localized::new("niedrig", "low"),
        };
        text.get(lang)
    }
}

/// Technical data read off the item (label values)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DetectedProperties {
    pub mah: Option<f64>,
    pub voltage: Option<f64>,
    pub wh: Option<f64>,
    pub volume_ml: Option<f64>,
    pub blade_length_cm: Option<f64>,
}

impl DetectedProperties {
    pub fn is_empty(&self) -> bool {
        self.mah.is_none()
            && self.voltage.is_none()
            && self.wh.is_none()
            && self.volume_ml.is_none()
            && self.blade_length_cm.is_none()
    }
}

/// Normalized classifier result
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AiAnalysis {
    pub identified: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<Confidence>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detected_properties: Option<DetectedProperties>,
    /// Only set when both sub-verdicts validated
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verdict: Option<Verdict>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
}

/// What the session should do with an analysis
#[derive(Debug, Clone, PartialEq)]
pub enum AiResolution {
    /// Classifier verdict accepted as-is
    Verdict {
        category_id: Option<String>,
        category_name: String,
        verdict: Verdict,
    },
    /// Known category, no usable verdict: rules evaluated with no answers
    CategoryFallback {
        category: CategoryId,
        category_name: String,
        verdict: Verdict,
    },
    /// Route the user to manual category selection
    Unclassified { summary: String },
}

impl AiAnalysis {
    pub fn unidentified(summary: impl Into<String>) -> Self {
        Self {
            identified: false,
            summary: Some(summary.into()),
            ..Default::default()
        }
    }

    /// Catalog category named by the classifier, if it is a known id
    pub fn known_category(&self) -> Option<CategoryId> {
        self.category_id.as_deref().and_then(|id| id.parse().ok())
    }

    /// Decide how this analysis resolves a session
    pub fn resolve(&self, lang: Language) -> AiResolution {
        if self.identified {
            if let Some(verdict) = &self.verdict {
                let category_name = self
                    .item_name
                    .clone()
                    .or_else(|| self.known_category().map(|id| catalog::category(id).name.get(lang).to_string()))
                    .unwrap_or_default();
                return AiResolution::Verdict {
                    category_id: self.category_id.clone(),
                    category_name,
                    verdict: verdict.clone(),
                };
            }

            if let Some(id) = self.known_category() {
                let category = catalog::category(id);
                return AiResolution::CategoryFallback {
                    category: id,
                    category_name: category.name.get(lang).to_string(),
                    verdict: category.evaluate(&Default::default(), lang),
                };
            }
        }

        AiResolution::Unclassified {
            summary: self
                .summary
                .clone()
                .unwrap_or_else(|| NOT_IDENTIFIED_SUMMARY.get(lang).to_string()),
        }
    }
}

/// Normalize a raw classifier response
///
/// Infallible: fences and surrounding prose are stripped, and anything that
/// still fails to parse or lacks the `identified` flag yields
/// `identified: false` with a non-empty summary.
pub fn normalize(raw: &str, lang: Language) -> AiAnalysis {
    let value = match parse_response_object(raw) {
        Ok(v) => v,
        Err(e) => {
            warn!(error = %e, "unparseable classification result");
            return AiAnalysis::unidentified(UNPARSEABLE_SUMMARY.get(lang));
        }
    };
    // parse_response_object guarantees an object
    let obj = match value.as_object() {
        Some(obj) => obj,
        None => return AiAnalysis::unidentified(UNPARSEABLE_SUMMARY.get(lang)),
    };

    let summary = non_empty_str(obj, "summary");

    let identified = match obj.get("identified").and_then(Value::as_bool) {
        Some(flag) => flag,
        None => {
            warn!("classification result without identified flag");
            return AiAnalysis::unidentified(UNPARSEABLE_SUMMARY.get(lang));
        }
    };

    if !identified {
        return AiAnalysis::unidentified(
            summary.unwrap_or_else(|| NOT_IDENTIFIED_SUMMARY.get(lang).to_string()),
        );
    }

    let verdict = obj.get("verdict").and_then(|v| {
        let parsed = parse_verdict(v);
        if parsed.is_none() && !v.is_null() {
            debug!("classification verdict rejected by validation");
        }
        parsed
    });

    AiAnalysis {
        identified: true,
        item_name: non_empty_str(obj, "itemName"),
        category_id: non_empty_str(obj, "categoryId"),
        confidence: obj
            .get("confidence")
            .and_then(Value::as_str)
            .and_then(Confidence::parse),
        detected_properties: obj
            .get("detectedProperties")
            .and_then(Value::as_object)
            .map(parse_properties)
            .filter(|p| !p.is_empty()),
        verdict,
        summary,
    }
}

fn non_empty_str(obj: &Map<String, Value>, key: &str) -> Option<String> {
    obj.get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn parse_properties(obj: &Map<String, Value>) -> DetectedProperties {
    let num = |key: &str| obj.get(key).and_then(Value::as_f64);
    DetectedProperties {
        mah: num("mah"),
        voltage: num("voltage"),
        wh: num("wh"),
        volume_ml: num("volume_ml"),
        blade_length_cm: num("blade_length_cm"),
    }
}

/// Both sub-verdicts must be present with a valid status and text
fn parse_verdict(value: &Value) -> Option<Verdict> {
    let obj = value.as_object()?;
    let hand = parse_baggage_verdict(obj.get("handBaggage")?)?;
    let checked = parse_baggage_verdict(obj.get("checkedBaggage")?)?;
    Some(Verdict::new(hand, checked))
}

fn parse_baggage_verdict(value: &Value) -> Option<BaggageVerdict> {
    let obj = value.as_object()?;
    let status = VerdictStatus::parse(obj.get("status")?.as_str()?)?;
    let text = non_empty_str(obj, "text")?;
    Some(BaggageVerdict {
        status,
        text,
        tip: non_empty_str(obj, "tip"),
    })
}
