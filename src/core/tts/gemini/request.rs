//! Validated synthesis requests.
//!
//! Building a request is pure and synchronous. Every rule that can be checked
//! locally is checked here, so an invalid request never reaches the network.

use std::collections::HashSet;

use super::config::{GeminiTTSModel, GeminiVoice, MULTI_SPEAKER_COUNT};
use crate::core::tts::{TTSError, TTSResult};

/// A named speaker bound to one prebuilt voice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpeakerAssignment {
    pub speaker: String,
    pub voice: GeminiVoice,
}

/// Voice selection carried by a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VoiceConfig {
    Single(GeminiVoice),
    /// Exactly `MULTI_SPEAKER_COUNT` assignments with distinct labels
    MultiSpeaker(Vec<SpeakerAssignment>),
}

/// Request ready to send to the TTS endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SynthesisRequest {
    /// Final prompt text, style prefix already applied
    pub text: String,
    pub model: GeminiTTSModel,
    pub voice_config: VoiceConfig,
}

impl SynthesisRequest {
    /// Build a single-voice request.
    ///
    /// A non-blank `style` is prefixed to the text as `"{style}: {text}"`.
    pub fn build(
        text: &str,
        model: Option<&str>,
        voice: &str,
        style: Option<&str>,
    ) -> TTSResult<Self> {
        let text = require_text(text)?;
        let model = GeminiTTSModel::parse_or_default(model)?;
        let voice: GeminiVoice = voice.parse()?;

        let text = match style.map(str::trim).filter(|s| !s.is_empty()) {
            Some(style) => format!("{style}: {text}"),
            None => text.to_string(),
        };

        Ok(Self {
            text,
            model,
            voice_config: VoiceConfig::Single(voice),
        })
    }

    /// Build a dialogue request from `(label, voice)` pairs.
    ///
    /// Labels are not checked against the text; the model decides how to
    /// attribute lines.
    pub fn build_multi_speaker<S, V>(
        text: &str,
        speakers: &[(S, V)],
        model: Option<&str>,
    ) -> TTSResult<Self>
    where
        S: AsRef<str>,
        V: AsRef<str>,
    {
        let text = require_text(text)?;
        let model = GeminiTTSModel::parse_or_default(model)?;

        if speakers.len() != MULTI_SPEAKER_COUNT {
            return Err(TTSError::Validation(format!(
                "Multi-speaker synthesis requires exactly {MULTI_SPEAKER_COUNT} speakers, got {}",
                speakers.len()
            )));
        }

        let mut seen = HashSet::with_capacity(speakers.len());
        let mut assignments = Vec::with_capacity(speakers.len());
        for (label, voice) in speakers {
            let label = label.as_ref().trim();
            if label.is_empty() {
                return Err(TTSError::Validation(
                    "Speaker name cannot be empty".to_string(),
                ));
            }
            if !seen.insert(label.to_string()) {
                return Err(TTSError::Validation(format!(
                    "Speaker '{label}' is listed more than once"
                )));
            }
            assignments.push(SpeakerAssignment {
                speaker: label.to_string(),
                voice: voice.as_ref().parse()?,
            });
        }

        Ok(Self {
            text: text.to_string(),
            model,
            voice_config: VoiceConfig::MultiSpeaker(assignments),
        })
    }
}

/// Parse a `Name:Voice` speaker argument.
///
/// Only the label and voice are split here; the voice is validated when the
/// request is built.
pub fn parse_speaker_arg(arg: &str) -> TTSResult<(String, String)> {
    let Some((name, voice)) = arg.split_once(':') else {
        return Err(TTSError::Validation(format!(
            "Invalid speaker format '{arg}'. Use 'Name:Voice'"
        )));
    };
    let (name, voice) = (name.trim(), voice.trim());
    if name.is_empty() || voice.is_empty() {
        return Err(TTSError::Validation(format!(
            "Invalid speaker format '{arg}'. Use 'Name:Voice'"
        )));
    }
    Ok((name.to_string(), voice.to_string()))
}

fn require_text(text: &str) -> TTSResult<&str> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(TTSError::Validation("Text cannot be empty".to_string()));
    }
    Ok(trimmed)
}
