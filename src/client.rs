//! The pi.ai client and its builder.
//!
//! One [`PiAiClient`] owns one immutable [`SessionConfig`] and drives the
//! whole pipeline for a single `chat` call: build the wire payload, POST it,
//! classify the status, parse the event stream, then optionally synthesize
//! and download audio. Each call is strictly sequential and starts fresh; no
//! state is shared across calls, so concurrent calls are safe at the client
//! level, but the remote conversation itself gives no ordering guarantee —
//! callers needing strict ordering must serialize themselves.
//!
//! No retry or backoff is built in. Every failure surfaces immediately with
//! one of the five error kinds; a caller wanting resilience wraps `chat` in
//! its own policy (retrying a remote conversation mutation blindly risks
//! duplicate prompts).

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use tracing::debug;

use crate::audio::{self, AudioArtifact, DEFAULT_OUTPUT_FILE};
use crate::chat::{parse_event_stream, ChatRequest};
use crate::config::SessionConfig;
use crate::transport::{describe_transport_error, HttpTransport};
use crate::voice::Voice;
use crate::{Error, Result};

const CHAT_PATH: &str = "/api/chat";

/// Statuses that mean the session artifacts are stale, not that the network
/// is down. The upstream is versionless, so these are overridable.
const DEFAULT_SESSION_EXPIRY_STATUSES: [u16; 2] = [401, 403];

/// Client for one authenticated pi.ai conversation.
#[derive(Debug)]
pub struct PiAiClient {
    config: SessionConfig,
    transport: HttpTransport,
    session_expiry_statuses: Vec<u16>,
}

/// Per-call options for [`PiAiClient::chat_with_options`].
#[derive(Debug, Clone, Default)]
pub struct ChatOptions {
    voice_name: Option<String>,
    output_file: Option<PathBuf>,
}

impl ChatOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request audio of the reply in this voice. The name must be one of the
    /// fixed supported set; anything else fails before any network call.
    pub fn voice(mut self, name: impl Into<String>) -> Self {
        self.voice_name = Some(name.into());
        self
    }

    /// Where to save the audio. Defaults to `PiAI.mp3` in the working
    /// directory. An existing file at the path is overwritten.
    pub fn output_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_file = Some(path.into());
        self
    }
}

/// A successful chat result.
#[derive(Debug)]
pub struct ChatReply {
    /// The assembled reply text. Non-empty on success.
    pub text: String,
    /// Present iff a voice was requested and the download succeeded.
    pub audio: Option<AudioArtifact>,
}

impl PiAiClient {
    pub fn builder() -> PiAiClientBuilder {
        PiAiClientBuilder::new()
    }

    /// Build a client from an already-validated session config.
    pub fn new(config: SessionConfig) -> Result<Self> {
        let transport = HttpTransport::new(&config, None)?;
        Ok(Self {
            config,
            transport,
            session_expiry_statuses: DEFAULT_SESSION_EXPIRY_STATUSES.to_vec(),
        })
    }

    /// Send a prompt and return the text reply.
    pub async fn chat(&self, prompt: &str) -> Result<ChatReply> {
        self.chat_with_options(prompt, &ChatOptions::default())
            .await
    }

    /// Send a prompt; optionally synthesize and download the reply as audio.
    ///
    /// Input validation (non-empty prompt, known voice name) happens before
    /// any network call. The operation is not idempotent — each call mutates
    /// the remote conversation — and is never retried internally.
    pub async fn chat_with_options(
        &self,
        prompt: &str,
        options: &ChatOptions,
    ) -> Result<ChatReply> {
        let prompt = prompt.trim();
        if prompt.is_empty() {
            return Err(Error::client("prompt must be non-empty"));
        }
        let voice = options
            .voice_name
            .as_deref()
            .map(Voice::from_str)
            .transpose()?;

        let request = ChatRequest {
            text: prompt,
            conversation: self.config.conversation_id(),
        };
        let response = self
            .transport
            .post_json(CHAT_PATH, &request)
            .await
            .map_err(|e| {
                Error::api_connection(format!(
                    "failed to communicate with pi.ai: {}",
                    describe_transport_error(&e)
                ))
            })?;

        let status = response.status();
        if self.session_expiry_statuses.contains(&status.as_u16()) {
            return Err(Error::session_expired(format!(
                "upstream rejected the session with HTTP {status}; update credentials"
            )));
        }
        if !status.is_success() {
            return Err(Error::api_connection(format!(
                "upstream returned HTTP {status} for the chat request"
            )));
        }

        let body = HttpTransport::collect_body(response)
            .await
            .map_err(|e| Error::api_connection(format!("failed to read chat response: {e}")))?;
        let raw = String::from_utf8_lossy(&body);
        let payload = parse_event_stream(&raw)?;
        debug!(chars = payload.text.len(), sids = payload.sids.len(), "chat reply parsed");

        let audio = match voice {
            None => None,
            Some(voice) => {
                let sid = payload.message_sid().ok_or_else(|| {
                    Error::api_connection(
                        "chat response carried no synthesis reference for the audio request",
                    )
                })?;
                let default_path = PathBuf::from(DEFAULT_OUTPUT_FILE);
                let output = options.output_file.as_deref().unwrap_or(&default_path);
                Some(audio::fetch_and_save(&self.transport, voice, sid, output).await?)
            }
        };

        Ok(ChatReply {
            text: payload.text,
            audio,
        })
    }

    /// The session config this client was built with.
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }
}

/// Builder for [`PiAiClient`].
///
/// Keep this surface small and predictable: the two required identifiers,
/// the optional cookie and timeout, and test-only knobs.
pub struct PiAiClientBuilder {
    host_session: Option<String>,
    conversation_id: Option<String>,
    cf_bm: Option<String>,
    timeout: Option<Duration>,
    base_url_override: Option<String>,
    session_expiry_statuses: Vec<u16>,
}

impl PiAiClientBuilder {
    pub fn new() -> Self {
        Self {
            host_session: None,
            conversation_id: None,
            cf_bm: None,
            timeout: None,
            base_url_override: None,
            session_expiry_statuses: DEFAULT_SESSION_EXPIRY_STATUSES.to_vec(),
        }
    }

    /// The `__Host-session` cookie value obtained from a logged-in browser.
    pub fn host_session(mut self, value: impl Into<String>) -> Self {
        self.host_session = Some(value.into());
        self
    }

    /// The conversation identifier the prompts are appended to.
    pub fn conversation_id(mut self, value: impl Into<String>) -> Self {
        self.conversation_id = Some(value.into());
        self
    }

    /// The `__cf_bm` bot-management cookie, when the browser had one.
    pub fn cf_bm(mut self, value: impl Into<String>) -> Self {
        self.cf_bm = Some(value.into());
        self
    }

    /// Per-request timeout. Defaults to 10 seconds.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Override the endpoint root. Primarily for testing with mock servers.
    pub fn base_url_override(mut self, base_url: impl Into<String>) -> Self {
        self.base_url_override = Some(base_url.into());
        self
    }

    /// Override which HTTP statuses are treated as session expiry.
    ///
    /// The upstream is versionless and its status conventions have drifted
    /// before; this keeps the expired/not-expired boundary adjustable without
    /// a code change.
    pub fn session_expiry_statuses(mut self, statuses: impl Into<Vec<u16>>) -> Self {
        self.session_expiry_statuses = statuses.into();
        self
    }

    /// Validate the configuration once and build the client.
    pub fn build(self) -> Result<PiAiClient> {
        let host_session = self
            .host_session
            .ok_or_else(|| Error::client("host_session is required"))?;
        let conversation_id = self
            .conversation_id
            .ok_or_else(|| Error::client("conversation_id is required"))?;

        let mut config = SessionConfig::new(host_session, conversation_id)?;
        if let Some(cf_bm) = self.cf_bm {
            config = config.with_cf_bm(cf_bm);
        }
        if let Some(timeout) = self.timeout {
            config = config.with_timeout(timeout);
        }

        let transport = HttpTransport::new(&config, self.base_url_override.as_deref())?;
        Ok(PiAiClient {
            config,
            transport,
            session_expiry_statuses: self.session_expiry_statuses,
        })
    }
}

impl Default for PiAiClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_requires_both_identifiers() {
        let err = PiAiClient::builder().build().unwrap_err();
        assert!(err.message().contains("host_session"));

        let err = PiAiClient::builder()
            .host_session("sess")
            .build()
            .unwrap_err();
        assert!(err.message().contains("conversation_id"));
    }

    #[test]
    fn builder_rejects_zero_timeout() {
        let err = PiAiClient::builder()
            .host_session("sess")
            .conversation_id("conv")
            .timeout(Duration::ZERO)
            .build()
            .unwrap_err();
        assert!(err.message().contains("timeout"));
    }

    #[test]
    fn builder_applies_optional_fields() {
        let client = PiAiClient::builder()
            .host_session("sess")
            .conversation_id("conv")
            .cf_bm("bm")
            .timeout(Duration::from_secs(3))
            .build()
            .unwrap();
        assert_eq!(client.config().cf_bm(), Some("bm"));
        assert_eq!(client.config().timeout(), Duration::from_secs(3));
    }
}
