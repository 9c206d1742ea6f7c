//! Terminal output
//!
//! Everything here returns plain strings so commands stay thin and the
//! layout can be tested without a terminal.

use baggage_check_common::{
    catalog, AiAnalysis, BaggageVerdict, Language, Localized, ScanRecord, Verdict, VerdictStatus,
};
use chrono::{Local, TimeZone};

const HAND_BAGGAGE: Localized = Localized::new("Handgepäck", "Hand baggage");
const CHECKED_BAGGAGE: Localized = Localized::new("Aufgegebenes Gepäck", "Checked baggage");
const TIP: Localized = Localized::new("Tipp", "Tip");
const QUESTIONS: Localized = Localized::new("Fragen", "questions");
const NO_HISTORY: Localized = Localized::new("Noch keine Scans gespeichert.", "No scans saved yet.");
const CONFIDENCE: Localized = Localized::new("Sicherheit", "Confidence");
const ANSWERS: Localized = Localized::new("Antworten", "Answers");

pub fn status_icon(status: VerdictStatus) -> &'static str {
    match status {
        VerdictStatus::Allowed => "✅",
        VerdictStatus::Conditional => "⚠️",
        VerdictStatus::NotAllowed => "❌",
    }
}

fn baggage_lines(title: &str, verdict: &BaggageVerdict, lang: Language) -> Vec<String> {
    let mut lines = vec![
        format!("{} {}: {}", status_icon(verdict.status), title, verdict.status.label(lang)),
        format!("   {}", verdict.text),
    ];
    if let Some(tip) = &verdict.tip {
        lines.push(format!("   💡 {}: {}", TIP.get(lang), tip));
    }
    lines
}

/// Verdict card for both baggage types
pub fn render_verdict(item_name: &str, verdict: &Verdict, lang: Language) -> String {
    let mut lines = Vec::new();
    if !item_name.is_empty() {
        lines.push(format!("📦 {}", item_name));
        lines.push(String::new());
    }
    lines.extend(baggage_lines(HAND_BAGGAGE.get(lang), &verdict.hand_baggage, lang));
    lines.push(String::new());
    lines.extend(baggage_lines(CHECKED_BAGGAGE.get(lang), &verdict.checked_baggage, lang));
    lines.join("\n")
}

/// Grouped catalog listing
pub fn render_categories(lang: Language) -> String {
    let mut lines = Vec::new();
    for group in catalog::groups(lang) {
        lines.push(format!("{}:", group));
        for c in catalog::in_group(group, lang) {
            let suffix = if c.is_direct() {
                String::new()
            } else {
                format!(" ({} {})", c.questions.len(), QUESTIONS.get(lang))
            };
            lines.push(format!("  {:<24} {}{}", c.id.as_str(), c.name.get(lang), suffix));
        }
        lines.push(String::new());
    }
    lines.join("\n").trim_end().to_string()
}

fn format_timestamp(millis: i64) -> String {
    match Local.timestamp_millis_opt(millis).single() {
        Some(t) => t.format("%Y-%m-%d %H:%M").to_string(),
        None => "-".to_string(),
    }
}

/// One line per record
pub fn render_history_list(records: &[ScanRecord], lang: Language) -> String {
    if records.is_empty() {
        return NO_HISTORY.get(lang).to_string();
    }
    records
        .iter()
        .map(|r| {
            format!(
                "{} {}  {}  {}",
                status_icon(r.overall_status()),
                format_timestamp(r.timestamp),
                r.id,
                r.category_name
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Detail view of a saved record
pub fn render_record(record: &ScanRecord, lang: Language) -> String {
    let mut lines = vec![
        format!("{}  {}", format_timestamp(record.timestamp), record.id),
    ];
    if let Some(photo) = &record.photo_uri {
        lines.push(format!("📷 {}", photo));
    }
    if !record.answers.is_empty() {
        let answers = record
            .answers
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect::<Vec<_>>()
            .join(", ");
        lines.push(format!("{}: {}", ANSWERS.get(lang), answers));
    }
    lines.push(String::new());
    lines.push(render_verdict(&record.category_name, &record.verdict(), lang));
    lines.join("\n")
}

/// Confidence and label readings reported by the classifier
pub fn render_analysis_details(analysis: &AiAnalysis, lang: Language) -> Option<String> {
    let mut parts = Vec::new();
    if let Some(confidence) = analysis.confidence {
        parts.push(format!("{}: {}", CONFIDENCE.get(lang), confidence.label(lang)));
    }
    if let Some(p) = &analysis.detected_properties {
        let readings = [
            (p.mah, "mAh"),
            (p.voltage, "V"),
            (p.wh, "Wh"),
            (p.volume_ml, "ml"),
            (p.blade_length_cm, "cm"),
        ];
        for (value, unit) in readings {
            if let Some(v) = value {
                parts.push(format!("{} {}", v, unit));
            }
        }
    }
    if parts.is_empty() {
        None
    } else {
        Some(parts.join(" · "))
    }
}
