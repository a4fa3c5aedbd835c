//! Voice synthesis and audio persistence.
//!
//! Dereferences a synthesis reference (the assistant turn's sid) into audio
//! bytes and writes them to disk. The body is buffered in full before the
//! output file is created, so a failed download never leaves a partial file
//! that looks valid. The write overwrites any existing file at the path.

use std::path::{Path, PathBuf};

use tracing::info;

use crate::transport::{describe_transport_error, HttpTransport};
use crate::voice::Voice;
use crate::{Error, Result};

/// Where the audio lands when the caller does not pick a path.
pub const DEFAULT_OUTPUT_FILE: &str = "PiAI.mp3";

const VOICE_PATH: &str = "/api/chat/voice";

/// A successfully downloaded audio file.
#[derive(Debug, Clone)]
pub struct AudioArtifact {
    /// The upstream URL the bytes were fetched from.
    pub source_url: String,
    /// Where the bytes were written.
    pub local_path: PathBuf,
}

/// Fetch synthesized audio for `message_sid` and persist it at `output`.
///
/// Any failure past this point is an [`Error::AudioDownload`]: the reply text
/// already succeeded, so the caller can retry just this step.
pub(crate) async fn fetch_and_save(
    transport: &HttpTransport,
    voice: Voice,
    message_sid: &str,
    output: &Path,
) -> Result<AudioArtifact> {
    let query = [
        ("mode", "eager".to_string()),
        ("voice", voice.query_value()),
        ("messageSid", message_sid.to_string()),
    ];

    let response = transport
        .get(VOICE_PATH, &query)
        .await
        .map_err(|e| Error::audio_download(describe_transport_error(&e)))?;

    let status = response.status();
    let source_url = response.url().to_string();
    if !status.is_success() {
        return Err(Error::audio_download(format!(
            "upstream returned HTTP {status} for the audio request"
        )));
    }

    let bytes = HttpTransport::collect_body(response)
        .await
        .map_err(|e| Error::audio_download(format!("failed to read audio body: {e}")))?;
    if bytes.is_empty() {
        return Err(Error::audio_download("upstream returned an empty audio body"));
    }

    tokio::fs::write(output, &bytes)
        .await
        .map_err(|e| Error::audio_download(format!("failed to write {}: {e}", output.display())))?;

    info!(path = %output.display(), bytes = bytes.len(), voice = %voice, "audio file saved");
    Ok(AudioArtifact {
        source_url,
        local_path: output.to_path_buf(),
    })
}
