//! Scan session state machine
//!
//! One classification attempt from empty state to a persisted record:
//!
//! ```text
//! Empty → PhotoOptional → Classifying(manual | ai) → Answering → Resolved → Persisted
//! ```
//!
//! Every mutation goes through a transition method; calls out of sequence
//! fail with `InvalidSessionState` instead of being tolerated. The resolved
//! verdict is moved into the `Persisted` stage on save, so a session can
//! produce at most one record.

use crate::ai::{AiAnalysis, AiResolution};
use crate::catalog::{self, CategoryId, ItemCategory, Question};
use crate::error::{Error, Result};
use crate::history::{RecordSink, ScanRecord};
use crate::types::{Answers, Language, Verdict};
use tracing::{debug, info, warn};

/// How the item is being classified
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassificationMode {
    /// Waiting for the user to pick a category
    Manual,
    /// Waiting for the image classifier
    Ai,
}

/// Externally visible session state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Empty,
    PhotoOptional,
    Classifying(ClassificationMode),
    Answering,
    Resolved,
    Persisted,
}

/// Identifies one AI classification request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AttemptId(u64);

/// Where a verdict came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerdictSource {
    Manual,
    Ai,
    /// Classifier named a category but gave no usable verdict
    AiCategoryFallback,
}

/// Resolved outcome of a session
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    pub category_id: Option<String>,
    pub category_name: String,
    pub answers: Answers,
    pub verdict: Verdict,
    pub source: VerdictSource,
}

/// Result of `resolve_from_ai`
#[derive(Debug, Clone, PartialEq)]
pub enum AiOutcome {
    Resolved(VerdictSource),
    /// Session is back in `Classifying(Manual)`
    NeedsManualSelection { summary: String },
}

/// Result of `persist`
#[derive(Debug, Clone, PartialEq)]
pub enum PersistOutcome {
    Saved(ScanRecord),
    /// Nothing written; id of the record saved earlier
    AlreadyPersisted(String),
}

#[derive(Debug)]
enum Stage {
    Empty,
    PhotoOptional,
    AwaitingCategory,
    Classifying { attempt: AttemptId },
    Answering { category: CategoryId },
    Resolved(Resolution),
    Persisted { resolution: Resolution, record_id: String },
}

/// Working state of one classification attempt
#[derive(Debug)]
pub struct ScanSession {
    photo: Option<String>,
    category: Option<CategoryId>,
    answers: Answers,
    ai_analysis: Option<AiAnalysis>,
    stage: Stage,
    // survives start_scan so attempts from a discarded session stay stale
    next_attempt: u64,
}

impl Default for ScanSession {
    fn default() -> Self {
        Self::new()
    }
}

impl ScanSession {
    pub fn new() -> Self {
        Self {
            photo: None,
            category: None,
            answers: Answers::new(),
            ai_analysis: None,
            stage: Stage::Empty,
            next_attempt: 0,
        }
    }

    // =============================================
    // Accessors
    // =============================================

    pub fn state(&self) -> SessionState {
        match self.stage {
            Stage::Empty => SessionState::Empty,
            Stage::PhotoOptional => SessionState::PhotoOptional,
            Stage::AwaitingCategory => SessionState::Classifying(ClassificationMode::Manual),
            Stage::Classifying { .. } => SessionState::Classifying(ClassificationMode::Ai),
            Stage::Answering { .. } => SessionState::Answering,
            Stage::Resolved(_) => SessionState::Resolved,
            Stage::Persisted { .. } => SessionState::Persisted,
        }
    }

    pub fn photo(&self) -> Option<&str> {
        self.photo.as_deref()
    }

    pub fn category(&self) -> Option<&'static ItemCategory> {
        self.category.map(catalog::category)
    }

    pub fn answers(&self) -> &Answers {
        &self.answers
    }

    pub fn ai_analysis(&self) -> Option<&AiAnalysis> {
        self.ai_analysis.as_ref()
    }

    pub fn resolution(&self) -> Option<&Resolution> {
        match &self.stage {
            Stage::Resolved(r) => Some(r),
            Stage::Persisted { resolution, .. } => Some(resolution),
            _ => None,
        }
    }

    pub fn verdict(&self) -> Option<&Verdict> {
        self.resolution().map(|r| &r.verdict)
    }

    pub fn record_id(&self) -> Option<&str> {
        match &self.stage {
            Stage::Persisted { record_id, .. } => Some(record_id),
            _ => None,
        }
    }

    /// Questions of the selected category without an answer yet
    pub fn pending_questions(&self) -> Vec<&'static Question> {
        match self.stage {
            Stage::Answering { category } => catalog::category(category)
                .questions
                .iter()
                .filter(|q| !self.answers.contains_key(q.id))
                .collect(),
            _ => Vec::new(),
        }
    }

    pub fn is_ready_to_resolve(&self) -> bool {
        matches!(self.stage, Stage::Answering { .. }) && self.pending_questions().is_empty()
    }

    fn invalid(&self, operation: &str, detail: &str) -> Error {
        let state = self.state();
        warn!(operation, ?state, detail, "rejected session transition");
        Error::InvalidSessionState(format!("{} in state {:?}: {}", operation, state, detail))
    }

    // =============================================
    // Transitions
    // =============================================

    /// Discard everything and start over
    pub fn start_scan(&mut self) {
        debug!(previous = ?self.state(), "starting new scan");
        self.photo = None;
        self.category = None;
        self.answers.clear();
        self.ai_analysis = None;
        self.stage = Stage::Empty;
    }

    /// Attach or skip the photo; `None` is a valid choice
    pub fn attach_photo(&mut self, photo: Option<String>) -> Result<()> {
        match self.stage {
            Stage::Empty | Stage::PhotoOptional => {
                self.photo = photo;
                self.stage = Stage::PhotoOptional;
                Ok(())
            }
            _ => Err(self.invalid("attach_photo", "photo can only be set before classification")),
        }
    }

    /// Go to manual category selection
    pub fn choose_manual(&mut self) -> Result<()> {
        match self.stage {
            Stage::Empty | Stage::PhotoOptional | Stage::AwaitingCategory | Stage::Classifying { .. } => {
                self.stage = Stage::AwaitingCategory;
                Ok(())
            }
            _ => Err(self.invalid("choose_manual", "category already chosen")),
        }
    }

    /// Select a category; answers always start fresh
    pub fn select_category(&mut self, id: CategoryId) -> Result<&'static ItemCategory> {
        match self.stage {
            Stage::Empty
            | Stage::PhotoOptional
            | Stage::AwaitingCategory
            | Stage::Classifying { .. }
            | Stage::Answering { .. } => {
                self.category = Some(id);
                self.answers.clear();
                self.stage = Stage::Answering { category: id };
                Ok(catalog::category(id))
            }
            _ => Err(self.invalid("select_category", "session already resolved")),
        }
    }

    /// Record an answer for the selected category
    pub fn set_answer(&mut self, question_id: &str, value: &str) -> Result<()> {
        let category = match self.stage {
            Stage::Answering { category } => catalog::category(category),
            _ => return Err(self.invalid("set_answer", "no category selected")),
        };

        let question = match category.question(question_id) {
            Some(q) => q,
            None => {
                let detail = format!("{} has no question {}", category.id, question_id);
                return Err(self.invalid("set_answer", &detail));
            }
        };
        if !question.has_option(value) {
            let detail = format!("{} is not an option of {}", value, question_id);
            return Err(self.invalid("set_answer", &detail));
        }

        self.answers.insert(question_id.to_string(), value.to_string());
        Ok(())
    }

    /// Evaluate the rules once every question is answered
    pub fn resolve_manual(&mut self, lang: Language) -> Result<&Verdict> {
        let category = match self.stage {
            Stage::Answering { category } => catalog::category(category),
            _ => return Err(self.invalid("resolve_manual", "no category selected")),
        };

        let pending: Vec<&str> = self.pending_questions().iter().map(|q| q.id).collect();
        if !pending.is_empty() {
            let detail = format!("unanswered questions: {}", pending.join(", "));
            return Err(self.invalid("resolve_manual", &detail));
        }

        let verdict = category.evaluate(&self.answers, lang);
        self.stage = Stage::Resolved(Resolution {
            category_id: Some(category.id.as_str().to_string()),
            category_name: category.name.get(lang).to_string(),
            answers: self.answers.clone(),
            verdict,
            source: VerdictSource::Manual,
        });
        debug!(category = %category.id, "resolved manually");

        match self.verdict() {
            Some(v) => Ok(v),
            None => Err(Error::InvalidSessionState("verdict missing after resolve".into())),
        }
    }

    /// Start an AI classification; supersedes any earlier attempt
    pub fn begin_ai_attempt(&mut self) -> Result<AttemptId> {
        match self.stage {
            Stage::PhotoOptional | Stage::AwaitingCategory | Stage::Classifying { .. } => {}
            _ => return Err(self.invalid("begin_ai_attempt", "classification already decided")),
        }
        if self.photo.is_none() {
            return Err(self.invalid("begin_ai_attempt", "no photo attached"));
        }

        self.next_attempt += 1;
        let attempt = AttemptId(self.next_attempt);
        self.stage = Stage::Classifying { attempt };
        info!(attempt = attempt.0, "classification attempt started");
        Ok(attempt)
    }

    fn is_current_attempt(&self, attempt: AttemptId) -> bool {
        matches!(self.stage, Stage::Classifying { attempt: current } if current == attempt)
    }

    /// Apply a classifier result
    ///
    /// Rejected when `attempt` is no longer the current one (a newer
    /// attempt, manual selection or `start_scan` happened meanwhile).
    pub fn resolve_from_ai(
        &mut self,
        attempt: AttemptId,
        analysis: AiAnalysis,
        lang: Language,
    ) -> Result<AiOutcome> {
        if !self.is_current_attempt(attempt) {
            return Err(self.invalid("resolve_from_ai", "stale classification attempt"));
        }

        let resolution = analysis.resolve(lang);
        self.ai_analysis = Some(analysis);
        self.answers.clear();

        match resolution {
            AiResolution::Verdict { category_id, category_name, verdict } => {
                self.category = category_id.as_deref().and_then(|id| id.parse().ok());
                self.stage = Stage::Resolved(Resolution {
                    category_id,
                    category_name,
                    answers: Answers::new(),
                    verdict,
                    source: VerdictSource::Ai,
                });
                Ok(AiOutcome::Resolved(VerdictSource::Ai))
            }
            AiResolution::CategoryFallback { category, category_name, verdict } => {
                self.category = Some(category);
                self.stage = Stage::Resolved(Resolution {
                    category_id: Some(category.as_str().to_string()),
                    category_name,
                    answers: Answers::new(),
                    verdict,
                    source: VerdictSource::AiCategoryFallback,
                });
                Ok(AiOutcome::Resolved(VerdictSource::AiCategoryFallback))
            }
            AiResolution::Unclassified { summary } => {
                self.stage = Stage::AwaitingCategory;
                Ok(AiOutcome::NeedsManualSelection { summary })
            }
        }
    }

    /// Give up on a failed, timed-out or cancelled attempt
    ///
    /// Returns false (and changes nothing) for a stale attempt.
    pub fn abandon_ai_attempt(&mut self, attempt: AttemptId) -> bool {
        if !self.is_current_attempt(attempt) {
            debug!(attempt = attempt.0, "ignoring stale attempt");
            return false;
        }
        self.stage = Stage::AwaitingCategory;
        info!(attempt = attempt.0, "classification attempt abandoned");
        true
    }

    /// Save the resolved result exactly once
    pub fn persist<R: RecordSink + ?Sized>(&mut self, sink: &R) -> Result<PersistOutcome> {
        match std::mem::replace(&mut self.stage, Stage::Empty) {
            Stage::Resolved(resolution) => {
                let record = self.build_record(&resolution);
                match sink.append_record(record.clone()) {
                    Ok(()) => {
                        self.stage = Stage::Persisted {
                            resolution,
                            record_id: record.id.clone(),
                        };
                        Ok(PersistOutcome::Saved(record))
                    }
                    Err(e) => {
                        // nothing written: stay resolved so a retry is safe
                        self.stage = Stage::Resolved(resolution);
                        warn!(error = %e, "scan record not saved");
                        Err(e)
                    }
                }
            }
            Stage::Persisted { resolution, record_id } => {
                let id = record_id.clone();
                self.stage = Stage::Persisted { resolution, record_id };
                debug!(record_id = %id, "already persisted");
                Ok(PersistOutcome::AlreadyPersisted(id))
            }
            other => {
                self.stage = other;
                Err(self.invalid("persist", "nothing resolved yet"))
            }
        }
    }

    fn build_record(&self, resolution: &Resolution) -> ScanRecord {
        let verdict = &resolution.verdict;
        ScanRecord {
            id: uuid::Uuid::new_v4().to_string(),
            category_id: resolution.category_id.clone().unwrap_or_default(),
            category_name: resolution.category_name.clone(),
            answers: resolution.answers.clone(),
            hand_baggage_status: verdict.hand_baggage.status,
            checked_baggage_status: verdict.checked_baggage.status,
            hand_baggage_text: verdict.hand_baggage.text.clone(),
            checked_baggage_text: verdict.checked_baggage.text.clone(),
            hand_baggage_tip: verdict.hand_baggage.tip.clone(),
            checked_baggage_tip: verdict.checked_baggage.tip.clone(),
            photo_uri: self.photo.clone(),
            timestamp: chrono::Utc::now().timestamp_millis(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::normalize;
    use crate::history::HistoryStore;
    use crate::store::MemoryStore;
    use crate::types::VerdictStatus;
    use std::sync::Arc;

    fn ai_session() -> (ScanSession, AttemptId) {
        let mut s = ScanSession::new();
        s.attach_photo(Some("file:///tmp/item.jpg".into())).unwrap();
        let attempt = s.begin_ai_attempt().unwrap();
        (s, attempt)
    }

    #[test]
    fn test_manual_flow_knife_long() {
        let mut s = ScanSession::new();
        assert_eq!(s.state(), SessionState::Empty);
        s.attach_photo(None).unwrap();
        assert_eq!(s.state(), SessionState::PhotoOptional);

        s.select_category(CategoryId::Knife).unwrap();
        assert_eq!(s.state(), SessionState::Answering);
        assert!(!s.is_ready_to_resolve());

        s.set_answer("blade_size", "long").unwrap();
        assert!(s.is_ready_to_resolve());
        let v = s.resolve_manual(Language::En).unwrap();
        assert_eq!(v.hand_baggage.status, VerdictStatus::NotAllowed);
        assert_eq!(v.checked_baggage.status, VerdictStatus::Allowed);
        assert_eq!(s.state(), SessionState::Resolved);
    }

    #[test]
    fn test_direct_category_ready_immediately() {
        let mut s = ScanSession::new();
        s.select_category(CategoryId::Lighter).unwrap();
        assert!(s.is_ready_to_resolve());
        let v = s.resolve_manual(Language::En).unwrap();
        assert_eq!(v.overall_status(), VerdictStatus::NotAllowed);
    }

    #[test]
    fn test_reselect_clears_answers() {
        let mut s = ScanSession::new();
        s.select_category(CategoryId::Knife).unwrap();
        s.set_answer("blade_size", "long").unwrap();
        s.select_category(CategoryId::Knife).unwrap();
        assert!(s.answers().is_empty());
        assert_eq!(s.pending_questions().len(), 1);
    }

    #[test]
    fn test_set_answer_without_category() {
        let mut s = ScanSession::new();
        let err = s.set_answer("blade_size", "long").unwrap_err();
        assert!(matches!(err, Error::InvalidSessionState(_)));
    }

    #[test]
    fn test_set_answer_foreign_question_or_option() {
        let mut s = ScanSession::new();
        s.select_category(CategoryId::Knife).unwrap();
        assert!(s.set_answer("tool_size", "long").is_err());
        assert!(s.set_answer("blade_size", "huge").is_err());
        assert!(s.answers().is_empty());
    }

    #[test]
    fn test_resolve_with_missing_answers() {
        let mut s = ScanSession::new();
        s.select_category(CategoryId::LiquidsGeneral).unwrap();
        s.set_answer("container_size", "large").unwrap();
        match s.resolve_manual(Language::En) {
            Err(Error::InvalidSessionState(msg)) => assert!(msg.contains("liquid_type")),
            other => panic!("unexpected {:?}", other),
        }
        assert_eq!(s.state(), SessionState::Answering);
    }

    #[test]
    fn test_resolve_without_category() {
        let mut s = ScanSession::new();
        assert!(matches!(
            s.resolve_manual(Language::En),
            Err(Error::InvalidSessionState(_))
        ));
    }

    #[test]
    fn test_persist_is_idempotent() {
        let history = HistoryStore::new(MemoryStore::new());
        let mut s = ScanSession::new();
        s.select_category(CategoryId::Lighter).unwrap();
        s.resolve_manual(Language::En).unwrap();

        let first = s.persist(&history).unwrap();
        let saved_id = match first {
            PersistOutcome::Saved(record) => {
                assert_eq!(record.category_id, "lighter");
                assert_eq!(record.category_name, "Lighter");
                assert!(record.timestamp > 0);
                record.id
            }
            other => panic!("unexpected {:?}", other),
        };
        assert_eq!(s.state(), SessionState::Persisted);

        let second = s.persist(&history).unwrap();
        assert_eq!(second, PersistOutcome::AlreadyPersisted(saved_id.clone()));
        assert_eq!(history.list().len(), 1);
        assert_eq!(s.record_id(), Some(saved_id.as_str()));
        // verdict still readable after saving
        assert!(s.verdict().is_some());
    }

    #[test]
    fn test_persist_before_resolve() {
        let history = HistoryStore::new(MemoryStore::new());
        let mut s = ScanSession::new();
        s.select_category(CategoryId::Knife).unwrap();
        assert!(matches!(s.persist(&history), Err(Error::InvalidSessionState(_))));
        assert_eq!(s.state(), SessionState::Answering);
        assert!(history.list().is_empty());
    }

    #[test]
    fn test_persist_storage_failure_keeps_result() {
        let store = Arc::new(MemoryStore::new());
        let history = HistoryStore::new(Arc::clone(&store));
        let mut s = ScanSession::new();
        s.select_category(CategoryId::Electronics).unwrap();
        s.resolve_manual(Language::De).unwrap();

        store.set_unavailable(true);
        assert!(matches!(s.persist(&history), Err(Error::StorageUnavailable(_))));
        assert_eq!(s.state(), SessionState::Resolved);
        assert!(s.verdict().is_some());

        store.set_unavailable(false);
        assert!(matches!(s.persist(&history), Ok(PersistOutcome::Saved(_))));
        assert_eq!(history.list().len(), 1);
    }

    #[test]
    fn test_record_keeps_answers_and_photo() {
        let history = HistoryStore::new(MemoryStore::new());
        let mut s = ScanSession::new();
        s.attach_photo(Some("photo.jpg".into())).unwrap();
        s.select_category(CategoryId::BatterySpare).unwrap();
        s.set_answer("size", "large").unwrap();
        s.resolve_manual(Language::En).unwrap();
        s.persist(&history).unwrap();

        let record = &history.list()[0];
        assert_eq!(record.answers.get("size").map(String::as_str), Some("large"));
        assert_eq!(record.photo_uri.as_deref(), Some("photo.jpg"));
        assert_eq!(record.hand_baggage_status, VerdictStatus::Conditional);
        assert_eq!(record.checked_baggage_status, VerdictStatus::NotAllowed);
    }

    #[test]
    fn test_start_scan_discards_everything() {
        let mut s = ScanSession::new();
        s.attach_photo(Some("a.jpg".into())).unwrap();
        s.select_category(CategoryId::Knife).unwrap();
        s.set_answer("blade_size", "short").unwrap();
        s.start_scan();
        assert_eq!(s.state(), SessionState::Empty);
        assert!(s.photo().is_none());
        assert!(s.category().is_none());
        assert!(s.answers().is_empty());
    }

    #[test]
    fn test_select_after_resolve_rejected() {
        let mut s = ScanSession::new();
        s.select_category(CategoryId::Matches).unwrap();
        s.resolve_manual(Language::En).unwrap();
        assert!(s.select_category(CategoryId::Knife).is_err());
        assert!(s.attach_photo(None).is_err());
    }

    // =============================================
    // AI path
    // =============================================

    #[test]
    fn test_ai_requires_photo() {
        let mut s = ScanSession::new();
        s.attach_photo(None).unwrap();
        assert!(matches!(s.begin_ai_attempt(), Err(Error::InvalidSessionState(_))));
    }

    #[test]
    fn test_ai_verdict_accepted() {
        let (mut s, attempt) = ai_session();
        assert_eq!(s.state(), SessionState::Classifying(ClassificationMode::Ai));
        let analysis = normalize(
            r#"{"identified": true, "itemName": "Zippo", "categoryId": "lighter",
                "verdict": {"handBaggage": {"status": "not_allowed", "text": "No"},
                            "checkedBaggage": {"status": "not_allowed", "text": "No"}}}"#,
            Language::En,
        );
        let outcome = s.resolve_from_ai(attempt, analysis, Language::En).unwrap();
        assert_eq!(outcome, AiOutcome::Resolved(VerdictSource::Ai));
        assert_eq!(s.state(), SessionState::Resolved);
        assert_eq!(s.category().map(|c| c.id), Some(CategoryId::Lighter));
        assert_eq!(s.resolution().unwrap().category_name, "Zippo");
        assert!(s.ai_analysis().is_some());
    }

    #[test]
    fn test_ai_category_fallback() {
        let (mut s, attempt) = ai_session();
        let analysis = normalize(r#"{"identified": true, "categoryId": "knife"}"#, Language::En);
        let outcome = s.resolve_from_ai(attempt, analysis, Language::En).unwrap();
        assert_eq!(outcome, AiOutcome::Resolved(VerdictSource::AiCategoryFallback));
        let expected = catalog::evaluate("knife", &Answers::new(), Language::En).unwrap();
        assert_eq!(s.verdict(), Some(&expected));
    }

    #[test]
    fn test_ai_unclassified_routes_to_manual() {
        let (mut s, attempt) = ai_session();
        let analysis = normalize("sorry, no idea", Language::En);
        match s.resolve_from_ai(attempt, analysis, Language::En).unwrap() {
            AiOutcome::NeedsManualSelection { summary } => assert!(!summary.is_empty()),
            other => panic!("unexpected {:?}", other),
        }
        assert_eq!(s.state(), SessionState::Classifying(ClassificationMode::Manual));
        assert!(s.verdict().is_none());

        s.select_category(CategoryId::Scissors).unwrap();
        s.set_answer("blade_size", "short").unwrap();
        assert!(s.resolve_manual(Language::En).is_ok());
    }

    #[test]
    fn test_stale_attempt_cannot_resolve() {
        let (mut s, old) = ai_session();
        let new = s.begin_ai_attempt().unwrap();
        assert_ne!(old, new);

        let analysis = normalize(r#"{"identified": true, "categoryId": "knife"}"#, Language::En);
        assert!(s.resolve_from_ai(old, analysis.clone(), Language::En).is_err());
        assert_eq!(s.state(), SessionState::Classifying(ClassificationMode::Ai));
        assert!(!s.abandon_ai_attempt(old));

        assert!(s.resolve_from_ai(new, analysis, Language::En).is_ok());
    }

    #[test]
    fn test_attempt_stale_after_start_scan() {
        let (mut s, attempt) = ai_session();
        s.start_scan();
        s.attach_photo(Some("other.jpg".into())).unwrap();
        let analysis = normalize(r#"{"identified": true, "categoryId": "knife"}"#, Language::En);
        assert!(s.resolve_from_ai(attempt, analysis, Language::En).is_err());
        assert_eq!(s.state(), SessionState::PhotoOptional);
    }

    #[test]
    fn test_attempt_stale_after_manual_selection() {
        let (mut s, attempt) = ai_session();
        s.select_category(CategoryId::Tools).unwrap();
        let analysis = normalize(r#"{"identified": true, "categoryId": "knife"}"#, Language::En);
        assert!(s.resolve_from_ai(attempt, analysis, Language::En).is_err());
        assert_eq!(s.category().map(|c| c.id), Some(CategoryId::Tools));
    }

    #[test]
    fn test_abandon_attempt() {
        let (mut s, attempt) = ai_session();
        assert!(s.abandon_ai_attempt(attempt));
        assert_eq!(s.state(), SessionState::Classifying(ClassificationMode::Manual));
        // retry is allowed after a failure
        assert!(s.begin_ai_attempt().is_ok());
    }
}
