//! Wire types for the `generateContent` endpoint.
//!
//! Request types serialize to the exact JSON body the API expects. Response
//! types keep every level optional so a missing field surfaces as an explicit
//! `TTSError::Api` instead of a generic decode failure.

use serde::{Deserialize, Serialize};

use super::request::{SynthesisRequest, VoiceConfig};

// =============================================================================
// Request
// =============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GenerateContentRequest {
    pub contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct Content {
    #[serde(default)]
    pub parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inline_data: Option<InlineData>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct InlineData {
    #[serde(default)]
    pub mime_type: Option<String>,
    #[serde(default)]
    pub data: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GenerationConfig {
    pub response_modalities: Vec<&'static str>,
    pub speech_config: SpeechConfig,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SpeechConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub voice_config: Option<VoiceConfigBody>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub multi_speaker_voice_config: Option<MultiSpeakerVoiceConfig>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct VoiceConfigBody {
    pub prebuilt_voice_config: PrebuiltVoiceConfig,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PrebuiltVoiceConfig {
    pub voice_name: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct MultiSpeakerVoiceConfig {
    pub speaker_voice_configs: Vec<SpeakerVoiceConfig>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SpeakerVoiceConfig {
    pub speaker: String,
    pub voice_config: VoiceConfigBody,
}

impl GenerateContentRequest {
    fn with_text(text: &str) -> Vec<Content> {
        vec![Content {
            parts: vec![Part {
                text: Some(text.to_string()),
                inline_data: None,
            }],
        }]
    }

    /// Audio-only request body for a synthesis call.
    pub fn speech(request: &SynthesisRequest) -> Self {
        let speech_config = match &request.voice_config {
            VoiceConfig::Single(voice) => SpeechConfig {
                voice_config: Some(VoiceConfigBody::prebuilt(voice.as_str())),
                multi_speaker_voice_config: None,
            },
            VoiceConfig::MultiSpeaker(assignments) => SpeechConfig {
                voice_config: None,
                multi_speaker_voice_config: Some(MultiSpeakerVoiceConfig {
                    speaker_voice_configs: assignments
                        .iter()
                        .map(|a| SpeakerVoiceConfig {
                            speaker: a.speaker.clone(),
                            voice_config: VoiceConfigBody::prebuilt(a.voice.as_str()),
                        })
                        .collect(),
                }),
            },
        };

        Self {
            contents: Self::with_text(&request.text),
            generation_config: Some(GenerationConfig {
                response_modalities: vec!["AUDIO"],
                speech_config,
            }),
        }
    }

    /// Plain text-generation request body.
    pub fn text(prompt: &str) -> Self {
        Self {
            contents: Self::with_text(prompt),
            generation_config: None,
        }
    }
}

impl VoiceConfigBody {
    fn prebuilt(voice_name: &'static str) -> Self {
        Self {
            prebuilt_voice_config: PrebuiltVoiceConfig { voice_name },
        }
    }
}

// =============================================================================
// Response
// =============================================================================

#[derive(Debug, Deserialize)]
pub(crate) struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Candidate {
    #[serde(default)]
    pub content: Option<Content>,
}

impl GenerateContentResponse {
    /// Base64 audio of the first inline-data part, if any.
    pub fn audio_payload(&self) -> Option<&InlineData> {
        self.candidates
            .first()?
            .content
            .as_ref()?
            .parts
            .iter()
            .find_map(|part| part.inline_data.as_ref())
    }

    /// Concatenated text parts of the first candidate.
    pub fn text(&self) -> Option<String> {
        let content = self.candidates.first()?.content.as_ref()?;
        let text: String = content
            .parts
            .iter()
            .filter_map(|part| part.text.as_deref())
            .collect();
        Some(text)
    }
}

/// Error envelope returned on non-2xx responses.
#[derive(Debug, Deserialize)]
pub(crate) struct ApiErrorResponse {
    pub error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ApiErrorBody {
    #[serde(default)]
    pub code: Option<u16>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}
