//! AI classifier
//!
//! The classifier is an untrusted collaborator: it gets an encoded photo
//! and returns raw text that `normalize` turns into an `AiAnalysis`.
//! Calls are raced against a timeout and a user cancellation; every kind
//! of failure reaches the caller as `ClassificationUnavailable`.

use crate::ai_provider::AiProvider;
use crate::config::Config;
use crate::error::{AppError, Result};
use crate::photo::ClassificationRequest;
use baggage_check_common::{
    build_classification_prompt, normalize, AiOutcome, Error as CoreError, Language,
    Result as CoreResult, ScanSession,
};
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tokio::sync::watch;
use tracing::{debug, info, warn};

/// Image classification service
///
/// Futures are not required to be `Send`; callers await them in place.
#[allow(async_fn_in_trait)]
pub trait Classifier {
    /// Raw response text for one photo
    async fn classify(&self, request: &ClassificationRequest) -> Result<String>;
}

// =============================================
// Cancellation
// =============================================

/// Cancels the paired `CancelToken`
#[derive(Debug)]
pub struct CancelHandle {
    tx: watch::Sender<bool>,
}

impl CancelHandle {
    pub fn cancel(&self) {
        self.tx.send_replace(true);
    }
}

#[derive(Debug, Clone)]
pub struct CancelToken {
    rx: watch::Receiver<bool>,
}

pub fn cancel_pair() -> (CancelHandle, CancelToken) {
    let (tx, rx) = watch::channel(false);
    (CancelHandle { tx }, CancelToken { rx })
}

impl CancelToken {
    /// Token that is never cancelled
    pub fn never() -> Self {
        let (_, token) = cancel_pair();
        token
    }

    pub fn is_cancelled(&self) -> bool {
        *self.rx.borrow()
    }

    /// Resolves once cancelled; pends forever if the handle is gone
    pub async fn cancelled(&mut self) {
        if self.rx.wait_for(|cancelled| *cancelled).await.is_err() {
            std::future::pending::<()>().await;
        }
    }
}

// =============================================
// Runner
// =============================================

/// Classify with a deadline and a cancellation token
///
/// The in-flight call is dropped on timeout or cancellation; no retries.
pub async fn classify_with_timeout<C: Classifier>(
    classifier: &C,
    request: &ClassificationRequest,
    timeout: Duration,
    cancel: &CancelToken,
) -> CoreResult<String> {
    let mut cancel = cancel.clone();
    if cancel.is_cancelled() {
        return Err(CoreError::ClassificationUnavailable("cancelled".into()));
    }

    tokio::select! {
        biased;
        _ = cancel.cancelled() => {
            info!("classification cancelled");
            Err(CoreError::ClassificationUnavailable("cancelled".into()))
        }
        result = tokio::time::timeout(timeout, classifier.classify(request)) => match result {
            Ok(Ok(text)) => Ok(text),
            Ok(Err(e)) => {
                warn!(error = %e, "classifier failed");
                Err(CoreError::ClassificationUnavailable(e.to_string()))
            }
            Err(_) => {
                warn!(timeout_ms = timeout.as_millis() as u64, "classification timed out");
                Err(CoreError::ClassificationUnavailable(format!(
                    "no answer within {:?}",
                    timeout
                )))
            }
        },
    }
}

/// Run one AI attempt against the session
///
/// On failure the attempt is abandoned, leaving the session in manual
/// selection, and the error is returned.
pub async fn classify_session<C: Classifier>(
    session: &mut ScanSession,
    classifier: &C,
    request: &ClassificationRequest,
    timeout: Duration,
    cancel: &CancelToken,
    lang: Language,
) -> CoreResult<AiOutcome> {
    let attempt = session.begin_ai_attempt()?;

    match classify_with_timeout(classifier, request, timeout, cancel).await {
        Ok(raw) => {
            let analysis = normalize(&raw, lang);
            session.resolve_from_ai(attempt, analysis, lang)
        }
        Err(e) => {
            session.abandon_ai_attempt(attempt);
            Err(e)
        }
    }
}

// =============================================
// CLI transport
// =============================================

/// Classifier backed by an AI command line tool
#[derive(Debug, Clone)]
pub struct CliClassifier {
    provider: AiProvider,
    model: Option<String>,
    lang: Language,
    work_dir: PathBuf,
}

/// Removes the materialised photo when the call ends
struct TempImage(PathBuf);

impl Drop for TempImage {
    fn drop(&mut self) {
        if let Err(e) = std::fs::remove_file(&self.0) {
            debug!(path = %self.0.display(), error = %e, "temp image not removed");
        }
    }
}

impl CliClassifier {
    pub fn new(provider: AiProvider, model: Option<String>, lang: Language) -> Self {
        Self {
            provider,
            model,
            lang,
            work_dir: std::env::temp_dir(),
        }
    }

    pub fn from_config(config: &Config, lang: Language) -> Self {
        Self::new(config.ai_provider, config.model.clone(), lang)
    }

    /// Directory for the temporary image file
    pub fn with_work_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.work_dir = dir.into();
        self
    }

    pub(crate) fn build_prompt(&self, image_path: &Path) -> String {
        let path = image_path.display().to_string().replace('\\', "/");
        format!(
            "Read the image file {} and analyze it.\n\n{}",
            path,
            build_classification_prompt(self.lang)
        )
    }

    async fn run_cli(&self, prompt: &str) -> Result<String> {
        let command_name = self.provider.command_name();

        // cmd /c needs a single-line prompt
        #[cfg(windows)]
        let (mut command, prompt) = {
            let mut c = Command::new("cmd");
            c.args(["/c", command_name]);
            (c, prompt.replace('\n', " ").replace('"', "\\\""))
        };
        #[cfg(not(windows))]
        let (mut command, prompt) = (Command::new(command_name), prompt.to_string());

        command
            .args(self.provider.prompt_args(&prompt, self.model.as_deref()))
            .stdin(Stdio::null())
            .kill_on_drop(true);

        debug!(provider = %self.provider, prompt_chars = prompt.len(), "running classifier");
        let output = command
            .output()
            .await
            .map_err(|e| AppError::ClassifierExecution(format!("{}: {}", command_name, e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(AppError::ClassifierExecution(format!(
                "{} failed (code {:?}): {}",
                command_name,
                output.status.code(),
                stderr.trim()
            )));
        }

        let response = String::from_utf8_lossy(&output.stdout).to_string();
        let preview: String = response.chars().take(500).collect();
        debug!(chars = response.len(), %preview, "classifier response");
        Ok(response)
    }
}

impl Classifier for CliClassifier {
    async fn classify(&self, request: &ClassificationRequest) -> Result<String> {
        let bytes = request.image_bytes()?;
        tokio::fs::create_dir_all(&self.work_dir).await?;
        let path = self
            .work_dir
            .join(format!("baggage-check-{}.jpg", uuid::Uuid::new_v4()));
        tokio::fs::write(&path, &bytes).await?;
        let image = TempImage(path);

        let prompt = self.build_prompt(&image.0);
        self.run_cli(&prompt).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_references_image() {
        let classifier = CliClassifier::new(AiProvider::Claude, None, Language::En);
        let prompt = classifier.build_prompt(Path::new("/tmp/item.jpg"));
        assert!(prompt.starts_with("Read the image file /tmp/item.jpg"));
        assert!(prompt.contains("in English"));
    }

    #[test]
    fn test_cancel_token() {
        let (handle, token) = cancel_pair();
        assert!(!token.is_cancelled());
        handle.cancel();
        assert!(token.is_cancelled());
        assert!(!CancelToken::never().is_cancelled());
    }

    #[test]
    fn test_temp_image_removed_on_drop() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("x.jpg");
        std::fs::write(&path, b"x").unwrap();
        drop(TempImage(path.clone()));
        assert!(!path.exists());
    }
}
