//! Topic-driven content generation.
//!
//! A topic is turned into a narration or a two-speaker dialogue by the text
//! model, then optionally synthesized with the matching voice setup.

use std::path::Path;

use tracing::info;

use crate::core::audio;
use crate::core::credential::Credential;
use crate::core::tts::{
    GeminiVoice, MULTI_SPEAKER_COUNT, SpeechProvider, SynthesisRequest, SynthesisResult, TTSError,
    TTSResult,
};

/// Voice setup for generated speech.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VoiceSelection {
    /// Narration read by one voice
    Single(String),
    /// Dialogue between `(label, voice)` speakers
    Dialogue(Vec<(String, String)>),
}

impl Default for VoiceSelection {
    fn default() -> Self {
        Self::Single(GeminiVoice::default().as_str().to_string())
    }
}

impl VoiceSelection {
    /// Speaker labels, when this is a dialogue.
    pub fn speaker_labels(&self) -> Option<Vec<String>> {
        match self {
            Self::Single(_) => None,
            Self::Dialogue(speakers) => Some(speakers.iter().map(|(l, _)| l.clone()).collect()),
        }
    }

    fn request(&self, text: &str, model: Option<&str>) -> TTSResult<SynthesisRequest> {
        match self {
            Self::Single(voice) => SynthesisRequest::build(text, model, voice, None),
            Self::Dialogue(speakers) => SynthesisRequest::build_multi_speaker(text, speakers, model),
        }
    }
}

/// Text generated for a topic together with its synthesized audio.
#[derive(Debug, Clone)]
pub struct GeneratedSpeech {
    pub text: String,
    pub audio: SynthesisResult,
}

/// Prompt sent to the text model for a topic.
///
/// With at least two speaker labels the prompt asks for dialogue lines only,
/// using the first two labels.
pub fn generation_prompt(topic: &str, speakers: Option<&[String]>) -> String {
    match speakers {
        Some([a, b, ..]) => format!(
            "Create a dialogue conversation about {topic}. \
             Use ONLY this exact format with no narrative text:\n\n\
             {a}: Hello, let's discuss {topic}.\n\
             {b}: Great idea! What's your perspective?\n\
             {a}: Well, I think...\n\
             {b}: That's interesting...\n\n\
             Write 4-6 exchanges between {a} and {b}. \
             Each line must start with the speaker name and colon. \
             NO story text, NO descriptions, ONLY dialogue lines."
        ),
        _ => format!(
            "Generate a short, engaging explanation (around 100 words) about {topic}."
        ),
    }
}

/// Generate narration or dialogue text for a topic.
pub async fn generate_content(
    provider: &dyn SpeechProvider,
    topic: &str,
    speakers: Option<&[String]>,
    credential: &Credential,
) -> TTSResult<String> {
    let topic = topic.trim();
    if topic.is_empty() {
        return Err(TTSError::Validation("Topic cannot be empty".to_string()));
    }
    if let Some(labels) = speakers {
        if labels.len() != MULTI_SPEAKER_COUNT {
            return Err(TTSError::Validation(format!(
                "Dialogue generation requires exactly {MULTI_SPEAKER_COUNT} speakers, got {}",
                labels.len()
            )));
        }
    }

    let prompt = generation_prompt(topic, speakers);
    let text = provider.generate_text(&prompt, credential).await?;
    let text = text.trim();
    if text.is_empty() {
        return Err(TTSError::Api("no text in response".to_string()));
    }

    info!(topic, chars = text.len(), "Generated content");
    Ok(text.to_string())
}

/// Generate text for a topic and synthesize it.
///
/// The voice setup is validated against the topic before any remote call.
pub async fn generate_speech(
    provider: &dyn SpeechProvider,
    topic: &str,
    voices: &VoiceSelection,
    model: Option<&str>,
    credential: &Credential,
) -> TTSResult<GeneratedSpeech> {
    voices.request(topic, model)?;

    let labels = voices.speaker_labels();
    let text = generate_content(provider, topic, labels.as_deref(), credential).await?;
    let request = voices.request(&text, model)?;
    let audio = provider.synthesize(&request, credential).await?;

    Ok(GeneratedSpeech { text, audio })
}

/// Generate text for a topic, synthesize it and write the WAV to `output`.
///
/// Returns the generated text.
pub async fn generate_and_speak(
    provider: &dyn SpeechProvider,
    topic: &str,
    voices: &VoiceSelection,
    model: Option<&str>,
    output: &Path,
    credential: &Credential,
) -> TTSResult<String> {
    let generated = generate_speech(provider, topic, voices, model, credential).await?;
    audio::write_wav(&generated.audio, output)?;
    info!(output = %output.display(), "Saved generated speech");
    Ok(generated.text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Records prompts and requests, answers with canned data.
    #[derive(Default)]
    struct FakeProvider {
        reply: String,
        prompts: Mutex<Vec<String>>,
        requests: Mutex<Vec<SynthesisRequest>>,
    }

    impl FakeProvider {
        fn replying(reply: &str) -> Self {
            Self {
                reply: reply.to_string(),
                ..Default::default()
            }
        }
    }

    #[async_trait]
    impl SpeechProvider for FakeProvider {
        async fn synthesize(
            &self,
            request: &SynthesisRequest,
            _credential: &Credential,
        ) -> TTSResult<SynthesisResult> {
            self.requests.lock().unwrap().push(request.clone());
            SynthesisResult::from_pcm(vec![0u8; 48_000])
        }

        async fn generate_text(&self, prompt: &str, _credential: &Credential) -> TTSResult<String> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            Ok(self.reply.clone())
        }

        fn get_provider_info(&self) -> serde_json::Value {
            serde_json::json!({"provider": "fake"})
        }
    }

    fn credential() -> Credential {
        Credential::new("test-key").unwrap()
    }

    #[test]
    fn test_single_prompt() {
        let prompt = generation_prompt("black holes", None);
        assert_eq!(
            prompt,
            "Generate a short, engaging explanation (around 100 words) about black holes."
        );
    }

    #[test]
    fn test_dialogue_prompt_uses_labels() {
        let labels = vec!["Alice".to_string(), "Bob".to_string()];
        let prompt = generation_prompt("coffee", Some(labels.as_slice()));
        assert!(prompt.starts_with("Create a dialogue conversation about coffee."));
        assert!(prompt.contains("Alice: Hello, let's discuss coffee.\n"));
        assert!(prompt.contains("Bob: Great idea! What's your perspective?\n"));
        assert!(prompt.contains("Write 4-6 exchanges between Alice and Bob."));
        assert!(prompt.ends_with("ONLY dialogue lines."));
    }

    #[tokio::test]
    async fn test_generate_content_trims_output() {
        let provider = FakeProvider::replying("  Black holes are dense.\n\n");
        let text = generate_content(&provider, "black holes", None, &credential())
            .await
            .unwrap();
        assert_eq!(text, "Black holes are dense.");
    }

    #[tokio::test]
    async fn test_generate_content_empty_topic() {
        let provider = FakeProvider::replying("unused");
        let err = generate_content(&provider, "  ", None, &credential())
            .await
            .unwrap_err();
        assert!(matches!(err, TTSError::Validation(_)));
        assert!(provider.prompts.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_generate_content_empty_reply() {
        let provider = FakeProvider::replying("   ");
        let err = generate_content(&provider, "tea", None, &credential())
            .await
            .unwrap_err();
        assert_eq!(err, TTSError::Api("no text in response".to_string()));
    }

    #[tokio::test]
    async fn test_generate_speech_single_uses_default_voice() {
        let provider = FakeProvider::replying("Tea is a brewed drink.");
        let generated = generate_speech(
            &provider,
            "tea",
            &VoiceSelection::default(),
            None,
            &credential(),
        )
        .await
        .unwrap();

        assert_eq!(generated.text, "Tea is a brewed drink.");
        assert_eq!(generated.audio.duration_ms(), 1000);

        let requests = provider.requests.lock().unwrap();
        assert_eq!(requests.len(), 1);
        assert_eq!(
            requests[0].voice_config,
            crate::core::tts::VoiceConfig::Single(GeminiVoice::Kore)
        );
    }

    #[tokio::test]
    async fn test_generate_speech_rejects_bad_voice_before_calls() {
        let provider = FakeProvider::replying("unused");
        let voices = VoiceSelection::Dialogue(vec![
            ("Alice".to_string(), "Kore".to_string()),
            ("Bob".to_string(), "Nobody".to_string()),
        ]);

        let err = generate_speech(&provider, "tea", &voices, None, &credential())
            .await
            .unwrap_err();
        assert!(matches!(err, TTSError::Validation(_)));
        assert!(provider.prompts.lock().unwrap().is_empty());
        assert!(provider.requests.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_generate_and_speak_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("generated.wav");
        let provider = FakeProvider::replying("Alice: Hi\nBob: Hello");
        let voices = VoiceSelection::Dialogue(vec![
            ("Alice".to_string(), "Kore".to_string()),
            ("Bob".to_string(), "Puck".to_string()),
        ]);

        let text = generate_and_speak(&provider, "greetings", &voices, None, &output, &credential())
            .await
            .unwrap();

        assert_eq!(text, "Alice: Hi\nBob: Hello");
        assert!(output.exists());
        assert!(provider.prompts.lock().unwrap()[0].contains("between Alice and Bob"));
    }
}
