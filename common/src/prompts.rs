//! Classification prompt
//!
//! Built from the catalog so the category list the classifier sees is
//! always the one the rule engine knows.

use crate::catalog::CATEGORIES;
use crate::types::{Language, Localized};

/// Rule summary handed to the classifier
pub const RULE_SUMMARY: &[&str] = &[
    "Spare batteries / power banks: under 100 Wh allowed in hand baggage (tape terminals). 100-160 Wh: max 2, airline approval required. Over 160 Wh: prohibited. ALWAYS prohibited in checked baggage.",
    "Devices with installed batteries: under 100 Wh allowed. 100-160 Wh allowed with airline approval. Over 160 Wh prohibited. Checked baggage: device must be switched off.",
    "Liquids: hand baggage max 100 ml per container, in a transparent 1-litre bag. Medication and baby food exempt. Checked baggage: no size limit.",
    "Knives / scissors / tools: blades or tools under 6 cm allowed in hand baggage. 6 cm or longer: checked baggage only.",
    "Lighters: prohibited in baggage. Only one carried on the person.",
    "Matches: prohibited in baggage. Only one box carried on the person.",
    "E-cigarettes: hand baggage only. Prohibited in checked baggage.",
    "Smart luggage with fixed battery: prohibited. With removable battery: remove the battery and carry it in hand baggage.",
    "Fireworks, fuels, toxic substances, gas, paints: ALWAYS prohibited.",
];

const ANSWER_LANGUAGE: Localized = Localized::new("German", "English");

/// Build the classifier prompt
///
/// # Arguments
/// * `lang` - language for itemName, summary and verdict texts
pub fn build_classification_prompt(lang: Language) -> String {
    let categories = CATEGORIES
        .iter()
        .map(|c| format!("- ID: \"{}\" | Name: \"{}\" | Keywords: {}", c.id, c.name.en, c.keywords))
        .collect::<Vec<_>>()
        .join("\n");

    let rules = RULE_SUMMARY
        .iter()
        .map(|r| format!("- {}", r))
        .collect::<Vec<_>>()
        .join("\n");

    let language = ANSWER_LANGUAGE.get(lang);

    format!(
        r#"You are an airport security expert at Zurich Airport (ZRH). Identify the item in the photo and give a complete verdict on whether it may be carried in hand baggage and in checked baggage.

## Available categories
{categories}

## Rules
{rules}

## Task
1. Identify the item
2. Read ALL visible technical data (mAh, Wh, ml, cm, weight); the traveller should not have to enter anything
3. Apply the rules and return the COMPLETE verdict
4. Write itemName, summary and all verdict texts in {language}

## Output (raw JSON only, no markdown)
{{
  "identified": true,
  "itemName": "descriptive name",
  "categoryId": "one of the category IDs above",
  "confidence": "high" | "medium" | "low",
  "detectedProperties": {{
    "mah": number or null,
    "voltage": number or null,
    "wh": number or null,
    "volume_ml": number or null,
    "blade_length_cm": number or null
  }},
  "verdict": {{
    "handBaggage": {{ "status": "allowed" | "conditional" | "not_allowed", "text": "clear explanation", "tip": "optional tip" }},
    "checkedBaggage": {{ "status": "allowed" | "conditional" | "not_allowed", "text": "clear explanation", "tip": "optional tip" }}
  }},
  "summary": "short description of what you recognised"
}}

If you cannot identify the item:
{{
  "identified": false,
  "summary": "why the item could not be identified"
}}

IMPORTANT:
- ALWAYS return a complete verdict when identified is true
- The user is an ordinary traveller, write plainly
- Batteries: read mAh/Wh from the label and compute the verdict yourself
- Liquids: read ml from the label
- Knives/scissors: estimate the blade length"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_lists_every_category() {
        let prompt = build_classification_prompt(Language::En);
        for c in CATEGORIES {
            assert!(prompt.contains(&format!("\"{}\"", c.id)), "{}", c.id);
        }
    }

    #[test]
    fn test_prompt_language() {
        assert!(build_classification_prompt(Language::De).contains("in German"));
        assert!(build_classification_prompt(Language::En).contains("in English"));
    }

    #[test]
    fn test_prompt_describes_output_shape() {
        let prompt = build_classification_prompt(Language::En);
        assert!(prompt.contains("\"identified\": false"));
        assert!(prompt.contains("\"checkedBaggage\""));
        assert!(prompt.contains("blade_length_cm"));
    }
}
