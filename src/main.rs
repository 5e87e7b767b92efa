use anyhow::Result;
use clap::Parser;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use voice_loop::{
    AudioCapture, ChatResponder, Config, ConversationSession, CpalCapture, DisabledCapture,
    OpenAiClient, SessionConfig, SessionLoop, SpeechSynthesizer, StdinTrigger, WhisperTranscriber,
};

/// Push-to-talk voice conversation loop.
///
/// Press Enter to record an utterance, type text to skip recording, or
/// type `q` to quit.
#[derive(Parser)]
#[command(name = "voice-loop", version)]
struct Cli {
    /// Configuration file, without extension
    #[arg(long, default_value = "config/voice-loop")]
    config: String,

    /// Override the synthesis voice
    #[arg(long)]
    voice: Option<String>,

    /// Override the output path template for synthesized audio
    #[arg(long)]
    output: Option<String>,

    /// Override the recording duration in seconds
    #[arg(long)]
    duration: Option<u64>,

    /// Type utterances instead of recording them (no audio device needed)
    #[arg(long)]
    text_only: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let mut cfg = Config::load(&cli.config)?;

    if let Some(voice) = cli.voice {
        cfg.voice.name = voice;
    }
    if let Some(output) = cli.output {
        cfg.session.output_path = output;
    }
    if let Some(duration) = cli.duration {
        cfg.audio.capture_duration_secs = duration;
    }

    // One credential-bound client, injected into all three collaborators
    let api_key = Config::api_key_from_env()?;
    let client = Arc::new(OpenAiClient::new(api_key, cfg.openai.api_base.clone())?);

    let transcriber = Arc::new(WhisperTranscriber::new(
        Arc::clone(&client),
        cfg.openai.transcribe_model.clone(),
    ));
    let responder = Arc::new(ChatResponder::new(
        Arc::clone(&client),
        cfg.openai.chat_model.clone(),
    ));
    let synthesizer = Arc::new(SpeechSynthesizer::new(
        client,
        cfg.openai.speech_model.clone(),
    ));

    let capture: Box<dyn AudioCapture> = if cli.text_only {
        Box::new(DisabledCapture)
    } else {
        Box::new(CpalCapture::new()?)
    };

    let session_config = SessionConfig {
        system_prompt: cfg.session.system_prompt.clone(),
        voice: cfg.voice.name.clone(),
        instructions: cfg.voice.instructions.clone(),
        output_path: cfg.session.output_path.clone(),
        ..SessionConfig::default()
    };

    info!("voice-loop v{}", env!("CARGO_PKG_VERSION"));
    info!("session: {}", session_config.session_id);
    info!("voice: {}, output: {}", session_config.voice, session_config.output_path);

    println!("Press Enter to record, type text to chat directly, or 'q' to quit.");

    let session = ConversationSession::new(session_config, responder, synthesizer);
    let mut session_loop = SessionLoop::new(
        session,
        capture,
        transcriber,
        Box::new(StdinTrigger::new()),
        Duration::from_secs(cfg.audio.capture_duration_secs),
    );

    // Ctrl-C is queued and honored at the next turn boundary
    let shutdown = session_loop.shutdown_flag();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            shutdown.store(true, Ordering::SeqCst);
        }
    });

    session_loop.run().await?;

    let session = session_loop.into_session();
    if session.turns_completed() > 0 {
        println!("\n--- conversation ---");
        print!("{}", session.transcript().dump());
    }

    Ok(())
}
