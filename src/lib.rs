//! # pi-ai-client
//!
//! Unofficial client for the pi.ai conversational service, which exposes no
//! official API. It authenticates with browser session artifacts (the
//! `__Host-session` cookie plus a conversation identifier), submits a prompt
//! into that conversation, returns the generated reply, and can synthesize
//! the reply as a downloadable speech-audio file in one of six fixed voices.
//!
//! ## Overview
//!
//! One [`PiAiClient`] owns one immutable session and exposes a single
//! operation: [`PiAiClient::chat`] (or [`PiAiClient::chat_with_options`] when
//! audio is wanted). Every way that pipeline can fail maps to exactly one
//! variant of [`Error`], so callers can branch on "credentials are stale"
//! versus "network is down" versus "voice name is wrong" versus "text
//! succeeded but audio failed".
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use pi_ai_client::{ChatOptions, PiAiClient};
//!
//! #[tokio::main]
//! async fn main() -> pi_ai_client::Result<()> {
//!     let client = PiAiClient::builder()
//!         .host_session("your __Host-session cookie")
//!         .conversation_id("your conversation id")
//!         .build()?;
//!
//!     // Text only.
//!     let reply = client.chat("What is a neural network?").await?;
//!     println!("{}", reply.text);
//!
//!     // Text plus downloaded audio.
//!     let options = ChatOptions::new().voice("Alice").output_file("reply.mp3");
//!     let reply = client.chat_with_options("Say hi!", &options).await?;
//!     println!("saved {:?}", reply.audio.unwrap().local_path);
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`client`] | `PiAiClient`, its builder, and the per-call pipeline |
//! | [`config`] | Immutable, validated session parameters |
//! | `chat` | Wire payload and event-stream parsing (internal) |
//! | [`voice`] | The fixed six-voice vocabulary |
//! | [`audio`] | Synthesis reference dereferencing and file persistence |
//! | [`error`] | The closed five-kind error taxonomy |
//!
//! The transport (a `reqwest` wrapper carrying the browser identity headers)
//! is an internal detail; it performs no classification of its own.

pub mod audio;
pub(crate) mod chat;
pub mod client;
pub mod config;
pub mod error;
pub(crate) mod transport;
pub mod voice;

pub use audio::{AudioArtifact, DEFAULT_OUTPUT_FILE};
pub use client::{ChatOptions, ChatReply, PiAiClient, PiAiClientBuilder};
pub use config::SessionConfig;
pub use error::Error;
pub use voice::Voice;

/// Result type alias for the library.
pub type Result<T> = std::result::Result<T, Error>;
