//! One-shot CLI subcommands.
//!
//! Each command validates its input, makes at most the remote calls it needs
//! and writes a single WAV file (or prints text).

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Args;
use tracing::info;

use crate::config::ServerConfig;
use crate::core::audio::write_wav;
use crate::core::content::{VoiceSelection, generate_and_speak, generate_content};
use crate::core::credential::Credential;
use crate::core::tts::{
    GeminiVoice, SpeechProvider, SynthesisRequest, SynthesisResult, parse_speaker_arg,
};

#[derive(Args, Debug, Clone)]
pub struct SpeakArgs {
    /// Text to convert to speech
    #[arg(short = 't', long)]
    pub text: String,

    /// Voice name (defaults to the configured voice, Kore unless overridden)
    #[arg(short = 'v', long)]
    pub voice: Option<String>,

    /// Delivery hint prefixed to the text, e.g. "Say cheerfully"
    #[arg(short = 's', long)]
    pub style: Option<String>,

    /// TTS model identifier
    #[arg(short = 'm', long)]
    pub model: Option<String>,

    /// Output WAV file
    #[arg(short = 'o', long, default_value = "output.wav")]
    pub output: PathBuf,
}

#[derive(Args, Debug, Clone)]
pub struct DialogueArgs {
    /// Dialogue text; lines should start with the speaker names
    #[arg(short = 't', long)]
    pub text: String,

    /// Speaker binding as Name:Voice (give exactly two)
    #[arg(long = "speaker", value_name = "NAME:VOICE", required = true)]
    pub speakers: Vec<String>,

    /// TTS model identifier
    #[arg(short = 'm', long)]
    pub model: Option<String>,

    /// Output WAV file
    #[arg(short = 'o', long, default_value = "output.wav")]
    pub output: PathBuf,
}

#[derive(Args, Debug, Clone)]
pub struct GenerateArgs {
    /// Topic to write about
    #[arg(long)]
    pub topic: String,

    /// Speaker binding as Name:Voice; two of them produce a dialogue
    #[arg(long = "speaker", value_name = "NAME:VOICE")]
    pub speakers: Vec<String>,

    /// Narrator voice when no speakers are given
    #[arg(short = 'v', long)]
    pub voice: Option<String>,

    /// Output WAV file
    #[arg(short = 'o', long, default_value = "generated_speech.wav")]
    pub output: PathBuf,

    /// Print the generated text without synthesizing it
    #[arg(long)]
    pub text_only: bool,
}

/// Numbered voice listing with tone families.
pub fn format_voice_list() -> String {
    let mut out = String::from("Available voices:\n");
    for (i, voice) in GeminiVoice::all().iter().enumerate() {
        out.push_str(&format!("{:2}. {:<14} {}\n", i + 1, voice.as_str(), voice.tone()));
    }
    out
}

/// Parse repeated `Name:Voice` arguments.
pub fn parse_speakers(args: &[String]) -> anyhow::Result<Vec<(String, String)>> {
    args.iter()
        .map(|arg| parse_speaker_arg(arg).map_err(anyhow::Error::from))
        .collect()
}

fn report_saved(audio: &SynthesisResult, output: &Path) {
    println!(
        "✓ Audio saved to {} ({:.1}s)",
        output.display(),
        audio.duration_ms() as f64 / 1000.0
    );
}

/// `speak`: single-voice synthesis to a file
pub async fn speak(
    provider: &dyn SpeechProvider,
    config: &ServerConfig,
    credential: &Credential,
    args: &SpeakArgs,
) -> anyhow::Result<()> {
    let voice = args
        .voice
        .as_deref()
        .unwrap_or(config.default_voice.as_str());
    let model = args.model.as_deref().unwrap_or(config.tts_model.as_str());

    let request = SynthesisRequest::build(&args.text, Some(model), voice, args.style.as_deref())?;
    info!(voice, model = %request.model, "Generating single-speaker audio");

    let audio = provider
        .synthesize(&request, credential)
        .await
        .context("Speech synthesis failed")?;
    write_wav(&audio, &args.output)?;
    report_saved(&audio, &args.output);
    Ok(())
}

/// `dialogue`: two-speaker synthesis to a file
pub async fn dialogue(
    provider: &dyn SpeechProvider,
    config: &ServerConfig,
    credential: &Credential,
    args: &DialogueArgs,
) -> anyhow::Result<()> {
    let speakers = parse_speakers(&args.speakers)?;
    let model = args.model.as_deref().unwrap_or(config.tts_model.as_str());

    let request = SynthesisRequest::build_multi_speaker(&args.text, &speakers, Some(model))?;
    info!(speakers = speakers.len(), model = %request.model, "Generating multi-speaker audio");

    let audio = provider
        .synthesize(&request, credential)
        .await
        .context("Speech synthesis failed")?;
    write_wav(&audio, &args.output)?;
    report_saved(&audio, &args.output);
    Ok(())
}

/// `generate`: topic to text, optionally to speech
pub async fn generate(
    provider: &dyn SpeechProvider,
    config: &ServerConfig,
    credential: &Credential,
    args: &GenerateArgs,
) -> anyhow::Result<()> {
    let speakers = parse_speakers(&args.speakers)?;
    let voices = if speakers.is_empty() {
        VoiceSelection::Single(
            args.voice
                .clone()
                .unwrap_or_else(|| config.default_voice.as_str().to_string()),
        )
    } else {
        VoiceSelection::Dialogue(speakers)
    };

    if args.text_only {
        let labels = voices.speaker_labels();
        let text = generate_content(provider, &args.topic, labels.as_deref(), credential)
            .await
            .context("Content generation failed")?;
        println!("{text}");
        return Ok(());
    }

    let text = generate_and_speak(
        provider,
        &args.topic,
        &voices,
        Some(config.tts_model.as_str()),
        &args.output,
        credential,
    )
    .await
    .with_context(|| format!("Failed to generate speech about '{}'", args.topic.trim()))?;

    println!("Generated text:\n{text}\n");
    println!("✓ Audio saved to {}", args.output.display());
    Ok(())
}
