//! Error taxonomy for the pi.ai client.
//!
//! Every failure crossing the public boundary is one of these five kinds;
//! raw transport errors never leak to callers. Each failure is attributed to
//! exactly one stage (input, session, voice, connection, download) and is
//! never double-wrapped.

use thiserror::Error;

/// Unified error type for the pi.ai client pipeline.
#[derive(Debug, Error)]
pub enum Error {
    /// Catch-all for failures outside the more specific kinds, including
    /// invalid input handed to the client itself (empty prompt, empty
    /// session parameters).
    #[error("pi.ai client error: {message}")]
    Client { message: String },

    /// The upstream rejected or invalidated the session/conversation
    /// identifiers. Retrying with the same credentials is pointless; the
    /// caller must re-derive fresh session artifacts.
    #[error("session expired: {message}")]
    SessionExpired { message: String },

    /// The requested voice name is outside the fixed supported set.
    #[error("voice not found: {message}")]
    VoiceNotFound { message: String },

    /// Network/transport failure, a non-2xx status not attributable to
    /// session expiry, or empty/malformed chat content.
    #[error("API connection error: {message}")]
    ApiConnection { message: String },

    /// The synthesis reference was obtained but retrieving the audio bytes
    /// or persisting them locally failed. Text generation already succeeded;
    /// only the media step needs to be redone.
    #[error("audio download error: {message}")]
    AudioDownload { message: String },
}

impl Error {
    pub fn client(message: impl Into<String>) -> Self {
        Error::Client {
            message: message.into(),
        }
    }

    pub fn session_expired(message: impl Into<String>) -> Self {
        Error::SessionExpired {
            message: message.into(),
        }
    }

    pub fn voice_not_found(message: impl Into<String>) -> Self {
        Error::VoiceNotFound {
            message: message.into(),
        }
    }

    pub fn api_connection(message: impl Into<String>) -> Self {
        Error::ApiConnection {
            message: message.into(),
        }
    }

    pub fn audio_download(message: impl Into<String>) -> Self {
        Error::AudioDownload {
            message: message.into(),
        }
    }

    /// True when the only fix is re-deriving session artifacts.
    pub fn is_session_expired(&self) -> bool {
        matches!(self, Error::SessionExpired { .. })
    }

    /// True when the caller picked a name outside the supported voice set.
    pub fn is_voice_not_found(&self) -> bool {
        matches!(self, Error::VoiceNotFound { .. })
    }

    /// True for transport-level and content-level upstream failures.
    pub fn is_api_connection(&self) -> bool {
        matches!(self, Error::ApiConnection { .. })
    }

    /// True when the reply text succeeded and only the audio step failed;
    /// the caller may retry just the download.
    pub fn is_audio_download(&self) -> bool {
        matches!(self, Error::AudioDownload { .. })
    }

    /// The human-readable message carried by every kind.
    pub fn message(&self) -> &str {
        match self {
            Error::Client { message }
            | Error::SessionExpired { message }
            | Error::VoiceNotFound { message }
            | Error::ApiConnection { message }
            | Error::AudioDownload { message } => message,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_kind_and_message() {
        let err = Error::session_expired("please update credentials");
        assert_eq!(
            err.to_string(),
            "session expired: please update credentials"
        );
        assert!(err.is_session_expired());
        assert!(!err.is_api_connection());
    }

    #[test]
    fn message_accessor_matches_all_kinds() {
        let errs = [
            Error::client("a"),
            Error::session_expired("b"),
            Error::voice_not_found("c"),
            Error::api_connection("d"),
            Error::audio_download("e"),
        ];
        let messages: Vec<&str> = errs.iter().map(|e| e.message()).collect();
        assert_eq!(messages, ["a", "b", "c", "d", "e"]);
    }
}
