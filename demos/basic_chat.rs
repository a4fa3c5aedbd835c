//! Minimal end-to-end usage: text reply plus optional audio download.
//!
//! Expects the session artifacts in the environment:
//!
//! ```text
//! PI_HOST_SESSION=<__Host-session cookie> \
//! PI_CONVERSATION_ID=<conversation id> \
//! PI_CF_BM=<optional __cf_bm cookie> \
//! cargo run --example basic_chat
//! ```

use pi_ai_client::{ChatOptions, PiAiClient};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let host_session = std::env::var("PI_HOST_SESSION")?;
    let conversation_id = std::env::var("PI_CONVERSATION_ID")?;

    let mut builder = PiAiClient::builder()
        .host_session(host_session)
        .conversation_id(conversation_id);
    if let Ok(cf_bm) = std::env::var("PI_CF_BM") {
        builder = builder.cf_bm(cf_bm);
    }
    let client = builder.build()?;

    let reply = client.chat("And what is a neural network?").await?;
    println!("\nPi: {}\n", reply.text);

    let options = ChatOptions::new().voice("Alice").output_file("PiAI.mp3");
    let reply = client.chat_with_options("Say that again, briefly.", &options).await?;
    println!("Pi: {}", reply.text);
    if let Some(audio) = reply.audio {
        println!("audio saved to {}", audio.local_path.display());
    }

    Ok(())
}
