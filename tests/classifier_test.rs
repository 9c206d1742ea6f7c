//! Classification runner tests
//!
//! Timeout, cancellation and failure handling with fake classifiers

use baggage_check::classifier::{
    cancel_pair, classify_session, classify_with_timeout, CancelToken, Classifier,
};
use baggage_check::error::{AppError, Result};
use baggage_check::photo::ClassificationRequest;
use baggage_check_common::{
    AiOutcome, ClassificationMode, Error, Language, ScanSession, SessionState, VerdictSource,
    VerdictStatus,
};
use std::time::Duration;

/// Answers with a fixed text after an optional delay
struct FakeClassifier {
    response: &'static str,
    delay: Duration,
}

impl FakeClassifier {
    fn immediate(response: &'static str) -> Self {
        Self { response, delay: Duration::ZERO }
    }

    fn slow() -> Self {
        Self { response: "{}", delay: Duration::from_secs(30) }
    }
}

impl Classifier for FakeClassifier {
    async fn classify(&self, _request: &ClassificationRequest) -> Result<String> {
        tokio::time::sleep(self.delay).await;
        Ok(self.response.to_string())
    }
}

struct FailingClassifier;

impl Classifier for FailingClassifier {
    async fn classify(&self, _request: &ClassificationRequest) -> Result<String> {
        Err(AppError::ClassifierExecution("exit code 1".into()))
    }
}

const ZIPPO: &str = r#"```json
{"identified": true, "itemName": "Zippo lighter", "categoryId": "lighter",
 "verdict": {"handBaggage": {"status": "not_allowed", "text": "Not in baggage"},
             "checkedBaggage": {"status": "not_allowed", "text": "Not in baggage"}}}
```"#;

fn request() -> ClassificationRequest {
    ClassificationRequest::from_base64("QUJD")
}

fn photo_session() -> ScanSession {
    let mut session = ScanSession::new();
    session.attach_photo(Some("item.jpg".into())).unwrap();
    session
}

#[tokio::test]
async fn test_returns_raw_text() {
    let text = classify_with_timeout(
        &FakeClassifier::immediate(ZIPPO),
        &request(),
        Duration::from_secs(5),
        &CancelToken::never(),
    )
    .await
    .unwrap();
    assert_eq!(text, ZIPPO);
}

#[tokio::test]
async fn test_timeout_is_unavailable() {
    let result = classify_with_timeout(
        &FakeClassifier::slow(),
        &request(),
        Duration::from_millis(50),
        &CancelToken::never(),
    )
    .await;
    assert!(matches!(result, Err(Error::ClassificationUnavailable(_))));
}

#[tokio::test]
async fn test_failure_is_unavailable() {
    let result =
        classify_with_timeout(&FailingClassifier, &request(), Duration::from_secs(5), &CancelToken::never())
            .await;
    match result {
        Err(Error::ClassificationUnavailable(msg)) => assert!(msg.contains("exit code 1")),
        other => panic!("unexpected {:?}", other),
    }
}

#[tokio::test]
async fn test_cancel_while_running() {
    let (handle, token) = cancel_pair();
    let canceller = tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(20)).await;
        handle.cancel();
    });

    let started = std::time::Instant::now();
    let result =
        classify_with_timeout(&FakeClassifier::slow(), &request(), Duration::from_secs(60), &token).await;
    canceller.await.unwrap();

    assert!(matches!(result, Err(Error::ClassificationUnavailable(_))));
    assert!(started.elapsed() < Duration::from_secs(10));
}

#[tokio::test]
async fn test_already_cancelled() {
    let (handle, token) = cancel_pair();
    handle.cancel();
    let result = classify_with_timeout(
        &FakeClassifier::immediate(ZIPPO),
        &request(),
        Duration::from_secs(5),
        &token,
    )
    .await;
    assert!(matches!(result, Err(Error::ClassificationUnavailable(_))));
}

#[tokio::test]
async fn test_session_resolved_by_ai() {
    let mut session = photo_session();
    let outcome = classify_session(
        &mut session,
        &FakeClassifier::immediate(ZIPPO),
        &request(),
        Duration::from_secs(5),
        &CancelToken::never(),
        Language::En,
    )
    .await
    .unwrap();

    assert_eq!(outcome, AiOutcome::Resolved(VerdictSource::Ai));
    assert_eq!(session.state(), SessionState::Resolved);
    let resolution = session.resolution().unwrap();
    assert_eq!(resolution.category_name, "Zippo lighter");
    assert_eq!(resolution.verdict.overall_status(), VerdictStatus::NotAllowed);
}

#[tokio::test]
async fn test_session_unparseable_goes_manual() {
    let mut session = photo_session();
    let outcome = classify_session(
        &mut session,
        &FakeClassifier::immediate("I think it is a lighter."),
        &request(),
        Duration::from_secs(5),
        &CancelToken::never(),
        Language::De,
    )
    .await
    .unwrap();

    assert!(matches!(outcome, AiOutcome::NeedsManualSelection { .. }));
    assert_eq!(session.state(), SessionState::Classifying(ClassificationMode::Manual));
}

#[tokio::test]
async fn test_session_timeout_goes_manual() {
    let mut session = photo_session();
    let result = classify_session(
        &mut session,
        &FakeClassifier::slow(),
        &request(),
        Duration::from_millis(30),
        &CancelToken::never(),
        Language::En,
    )
    .await;

    assert!(matches!(result, Err(Error::ClassificationUnavailable(_))));
    assert_eq!(session.state(), SessionState::Classifying(ClassificationMode::Manual));
    assert!(session.verdict().is_none());
}

#[tokio::test]
async fn test_session_without_photo_rejected() {
    let mut session = ScanSession::new();
    let result = classify_session(
        &mut session,
        &FakeClassifier::immediate(ZIPPO),
        &request(),
        Duration::from_secs(5),
        &CancelToken::never(),
        Language::En,
    )
    .await;
    assert!(matches!(result, Err(Error::InvalidSessionState(_))));
    assert_eq!(session.state(), SessionState::Empty);
}
