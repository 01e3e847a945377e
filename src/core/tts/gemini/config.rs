//! Voice and model catalog for the Gemini TTS models.
//!
//! This module contains the closed sets the request builder validates against:
//! - Model selection (flash and pro preview TTS models)
//! - Voice selection (30 prebuilt voices with a descriptive tone)
//! - The multi-speaker limit of the backend

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::tts::{TTSError, TTSResult};

/// Gemini API base URL
pub const GEMINI_API_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Default model used for topic text generation
pub const DEFAULT_GENERATION_MODEL: &str = "gemini-2.0-flash";

/// Number of speakers a multi-speaker request must carry.
///
/// This mirrors the backend's current capability rather than anything in
/// this crate; raise it together with the service limit.
pub const MULTI_SPEAKER_COUNT: usize = 2;

/// Default request timeout in seconds
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 60;

/// Connection settings for [`GeminiTTS`](super::GeminiTTS).
///
/// Holds no credential; keys travel with each call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeminiTTSConfig {
    /// API base URL, without a trailing `/v1beta`
    pub base_url: String,
    /// Model used by `generate_text`
    pub generation_model: String,
    pub request_timeout_secs: u64,
}

impl Default for GeminiTTSConfig {
    fn default() -> Self {
        Self {
            base_url: GEMINI_API_BASE_URL.to_string(),
            generation_model: DEFAULT_GENERATION_MODEL.to_string(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}

impl GeminiTTSConfig {
    /// Config pointing at a different base URL (mock servers, proxies).
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    /// `generateContent` URL for a model.
    pub fn endpoint(&self, model: &str) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            model
        )
    }
}

// =============================================================================
// Gemini TTS Models
// =============================================================================

/// Supported Gemini TTS models.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum GeminiTTSModel {
    /// Faster, cheaper preview model
    #[default]
    #[serde(rename = "gemini-2.5-flash-preview-tts")]
    Flash,
    /// Higher quality preview model
    #[serde(rename = "gemini-2.5-pro-preview-tts")]
    Pro,
}

impl GeminiTTSModel {
    /// Convert to the API model identifier.
    #[inline]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Flash => "gemini-2.5-flash-preview-tts",
            Self::Pro => "gemini-2.5-pro-preview-tts",
        }
    }

    /// Get all supported models.
    pub fn all() -> &'static [GeminiTTSModel] {
        &[Self::Flash, Self::Pro]
    }

    /// Parse an optional identifier, defaulting to flash when absent or blank.
    pub fn parse_or_default(model: Option<&str>) -> TTSResult<Self> {
        match model.map(str::trim) {
            None | Some("") => Ok(Self::default()),
            Some(value) => value.parse(),
        }
    }
}

impl FromStr for GeminiTTSModel {
    type Err = TTSError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "gemini-2.5-flash-preview-tts" | "flash" => Ok(Self::Flash),
            "gemini-2.5-pro-preview-tts" | "pro" => Ok(Self::Pro),
            _ => Err(TTSError::Validation(format!(
                "Model '{}' not supported. Choose from: {}",
                s.trim(),
                Self::all()
                    .iter()
                    .map(|m| m.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            ))),
        }
    }
}

impl fmt::Display for GeminiTTSModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// =============================================================================
// Gemini TTS Voices
// =============================================================================

/// Prebuilt voices offered by the Gemini TTS models.
///
/// The tone is descriptive only; it is surfaced in listings so users can pick
/// a voice, and plays no part in the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum GeminiVoice {
    Zephyr,
    Puck,
    Charon,
    #[default]
    Kore,
    Fenrir,
    Leda,
    Orus,
    Aoede,
    Callirrhoe,
    Autonoe,
    Enceladus,
    Iapetus,
    Umbriel,
    Algieba,
    Despina,
    Erinome,
    Algenib,
    Rasalgethi,
    Laomedeia,
    Achernar,
    Alnilam,
    Schedar,
    Gacrux,
    Pulcherrima,
    Achird,
    Zubenelgenubi,
    Vindemiatrix,
    Sadachbia,
    Sadaltager,
    Sulafat,
}

impl GeminiVoice {
    /// Convert to the API voice name.
    #[inline]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Zephyr => "Zephyr",
            Self::Puck => "Puck",
            Self::Charon => "Charon",
            Self::Kore => "Kore",
            Self::Fenrir => "Fenrir",
            Self::Leda => "Leda",
            Self::Orus => "Orus",
            Self::Aoede => "Aoede",
            Self::Callirrhoe => "Callirrhoe",
            Self::Autonoe => "Autonoe",
            Self::Enceladus => "Enceladus",
            Self::Iapetus => "Iapetus",
            Self::Umbriel => "Umbriel",
            Self::Algieba => "Algieba",
            Self::Despina => "Despina",
            Self::Erinome => "Erinome",
            Self::Algenib => "Algenib",
            Self::Rasalgethi => "Rasalgethi",
            Self::Laomedeia => "Laomedeia",
            Self::Achernar => "Achernar",
            Self::Alnilam => "Alnilam",
            Self::Schedar => "Schedar",
            Self::Gacrux => "Gacrux",
            Self::Pulcherrima => "Pulcherrima",
            Self::Achird => "Achird",
            Self::Zubenelgenubi => "Zubenelgenubi",
            Self::Vindemiatrix => "Vindemiatrix",
            Self::Sadachbia => "Sadachbia",
            Self::Sadaltager => "Sadaltager",
            Self::Sulafat => "Sulafat",
        }
    }

    /// Descriptive tone family of the voice.
    pub fn tone(&self) -> &'static str {
        match self {
            Self::Zephyr => "Bright",
            Self::Puck => "Upbeat",
            Self::Charon => "Informative",
            Self::Kore => "Firm",
            Self::Fenrir => "Excitable",
            Self::Leda => "Youthful",
            Self::Orus => "Firm",
            Self::Aoede => "Breezy",
            Self::Callirrhoe => "Easy-going",
            Self::Autonoe => "Bright",
            Self::Enceladus => "Breathy",
            Self::Iapetus => "Clear",
            Self::Umbriel => "Easy-going",
            Self::Algieba => "Smooth",
            Self::Despina => "Smooth",
            Self::Erinome => "Clear",
            Self::Algenib => "Gravelly",
            Self::Rasalgethi => "Informative",
            Self::Laomedeia => "Upbeat",
            Self::Achernar => "Soft",
            Self::Alnilam => "Firm",
            Self::Schedar => "Even",
            Self::Gacrux => "Mature",
            Self::Pulcherrima => "Forward",
            Self::Achird => "Friendly",
            Self::Zubenelgenubi => "Casual",
            Self::Vindemiatrix => "Gentle",
            Self::Sadachbia => "Lively",
            Self::Sadaltager => "Knowledgeable",
            Self::Sulafat => "Warm",
        }
    }

    /// Get all available voices, in catalog order.
    pub fn all() -> &'static [GeminiVoice] {
        &[
            Self::Zephyr,
            Self::Puck,
            Self::Charon,
            Self::Kore,
            Self::Fenrir,
            Self::Leda,
            Self::Orus,
            Self::Aoede,
            Self::Callirrhoe,
            Self::Autonoe,
            Self::Enceladus,
            Self::Iapetus,
            Self::Umbriel,
            Self::Algieba,
            Self::Despina,
            Self::Erinome,
            Self::Algenib,
            Self::Rasalgethi,
            Self::Laomedeia,
            Self::Achernar,
            Self::Alnilam,
            Self::Schedar,
            Self::Gacrux,
            Self::Pulcherrima,
            Self::Achird,
            Self::Zubenelgenubi,
            Self::Vindemiatrix,
            Self::Sadachbia,
            Self::Sadaltager,
            Self::Sulafat,
        ]
    }

    fn catalog_names() -> String {
        Self::all()
            .iter()
            .map(|v| v.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl FromStr for GeminiVoice {
    type Err = TTSError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::all()
            .iter()
            .copied()
            .find(|voice| voice.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| {
                TTSError::Validation(format!(
                    "Voice '{wanted}' not supported. Choose from: {}",
                    Self::catalog_names()
                ))
            })
    }
}

impl fmt::Display for GeminiVoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
