use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

/// Failure of a single text-generation attempt.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AiError {
    #[error("AI request timed out after {0:?}")]
    Timeout(Duration),

    #[error("AI quota exceeded: {0}")]
    QuotaExceeded(String),

    #[error("AI transport error: {0}")]
    Transport(String),

    #[error("malformed AI upstream response: {0}")]
    MalformedUpstream(String),
}

/// Text-generation capability used by the forecast and report pipelines.
///
/// Implementations own vendor selection, credentials and response unwrapping.
/// Callers make exactly one attempt per request; implementations must not retry.
#[async_trait]
pub trait AiClient: Send + Sync + 'static {
    /// Provider name for logging.
    fn name(&self) -> &'static str;

    /// Generate text for `prompt`, giving up after `timeout`.
    async fn generate(&self, prompt: &str, timeout: Duration) -> Result<String, AiError>;
}

/// Invoke `client` once, bounded by `timeout` even if the client ignores it.
///
/// Dropping the returned future cancels the call.
pub async fn generate_bounded(
    client: &dyn AiClient,
    prompt: &str,
    timeout: Duration,
) -> Result<String, AiError> {
    match tokio::time::timeout(timeout, client.generate(prompt, timeout)).await {
        Ok(result) => result,
        Err(_elapsed) => Err(AiError::Timeout(timeout)),
    }
}

/// Client for running without a model: every call fails, so every forecast falls back.
#[derive(Debug, Default, Copy, Clone)]
pub struct OfflineAiClient;

#[async_trait]
impl AiClient for OfflineAiClient {
    fn name(&self) -> &'static str {
        "offline"
    }

    async fn generate(&self, _prompt: &str, _timeout: Duration) -> Result<String, AiError> {
        Err(AiError::Transport("AI provider disabled".to_string()))
    }
}

/// Canned client for tests and demos.
///
/// Replies are consumed in order; the last one repeats once the queue is down to it.
/// Records every prompt it receives.
#[derive(Debug)]
pub struct ScriptedAiClient {
    replies: Mutex<VecDeque<Result<String, AiError>>>,
    delay: Option<Duration>,
    prompts: Mutex<Vec<String>>,
    calls: AtomicUsize,
}

impl ScriptedAiClient {
    pub fn new(replies: impl IntoIterator<Item = Result<String, AiError>>) -> Self {
        Self {
            replies: Mutex::new(replies.into_iter().collect()),
            delay: None,
            prompts: Mutex::new(Vec::new()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn replying(text: impl Into<String>) -> Self {
        Self::new([Ok(text.into())])
    }

    pub fn failing(err: AiError) -> Self {
        Self::new([Err(err)])
    }

    /// Sleep before answering (for exercising timeouts).
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().map(|p| p.clone()).unwrap_or_default()
    }

    fn next_reply(&self) -> Result<String, AiError> {
        let mut replies = self
            .replies
            .lock()
            .map_err(|_| AiError::Transport("scripted client poisoned".to_string()))?;
        let reply = if replies.len() > 1 {
            replies.pop_front()
        } else {
            replies.front().cloned()
        };
        reply.unwrap_or_else(|| Err(AiError::Transport("no scripted reply".to_string())))
    }
}

#[async_trait]
impl AiClient for ScriptedAiClient {
    fn name(&self) -> &'static str {
        "scripted"
    }

    async fn generate(&self, prompt: &str, _timeout: Duration) -> Result<String, AiError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut prompts) = self.prompts.lock() {
            prompts.push(prompt.to_string());
        }
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.next_reply()
    }
}
