//! Line-oriented interactive shell.
//!
//! Commands are parsed into [`ReplCommand`] first so the grammar can be tested
//! without a terminal. Errors from a command are printed and the session goes
//! on; only `quit` or end of input stops it.

use std::io::Write;
use std::path::Path;

use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::debug;
use zeroize::Zeroize;

use crate::commands::format_voice_list;
use crate::core::audio::write_wav;
use crate::core::content::{VoiceSelection, generate_and_speak};
use crate::core::credential::Credential;
use crate::core::tts::{
    GeminiTTSModel, GeminiVoice, SpeechProvider, SynthesisRequest, TTSError, TTSResult,
    parse_speaker_arg,
};

pub const SPEAK_OUTPUT: &str = "speech.wav";
pub const DIALOGUE_OUTPUT: &str = "dialogue.wav";
pub const GENERATE_OUTPUT: &str = "generated.wav";

const HELP: &str = "\
Available commands:
  speak <text>                  - Convert text to speech
  multi <N:V> <N:V> <text>      - Two-speaker dialogue (e.g. multi Joe:Kore Jane:Puck Joe: Hi!)
  generate <topic>              - Generate content and convert to speech
  voice <name>                  - Set the voice used by speak and generate
  voices                        - List all available voices
  help                          - Show this help
  quit/exit/q                   - Exit

Examples:
  speak Hello, this is a test!
  generate space exploration
";

/// A parsed shell line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    Speak(String),
    Multi {
        speakers: Vec<(String, String)>,
        text: String,
    },
    Generate(String),
    SetVoice(String),
    Voices,
    Help,
    Quit,
    Empty,
    Unknown(String),
}

fn split_word(input: &str) -> (&str, &str) {
    match input.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim_start()),
        None => (input, ""),
    }
}

/// Parse one input line.
pub fn parse_command(line: &str) -> TTSResult<ReplCommand> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(ReplCommand::Empty);
    }

    let (word, rest) = split_word(line);
    let command = match word.to_lowercase().as_str() {
        "quit" | "exit" | "q" => ReplCommand::Quit,
        "help" => ReplCommand::Help,
        "voices" => ReplCommand::Voices,
        "speak" => ReplCommand::Speak(rest.to_string()),
        "generate" => ReplCommand::Generate(rest.to_string()),
        "voice" => ReplCommand::SetVoice(rest.to_string()),
        "multi" => {
            let (first, rest) = split_word(rest);
            let (second, text) = split_word(rest);
            ReplCommand::Multi {
                speakers: vec![parse_speaker_arg(first)?, parse_speaker_arg(second)?],
                text: text.to_string(),
            }
        }
        _ => ReplCommand::Unknown(line.to_string()),
    };
    Ok(command)
}

/// Mutable per-session settings.
pub struct Session<'a> {
    provider: &'a dyn SpeechProvider,
    credential: Credential,
    voice: GeminiVoice,
    model: GeminiTTSModel,
}

impl<'a> Session<'a> {
    pub fn new(
        provider: &'a dyn SpeechProvider,
        credential: Credential,
        voice: GeminiVoice,
        model: GeminiTTSModel,
    ) -> Self {
        Self {
            provider,
            credential,
            voice,
            model,
        }
    }

    /// Run one command. Returns `false` when the session should end.
    pub async fn execute<W: Write>(
        &mut self,
        command: ReplCommand,
        out: &mut W,
    ) -> std::io::Result<bool> {
        match command {
            ReplCommand::Quit => {
                writeln!(out, "Goodbye!")?;
                return Ok(false);
            }
            ReplCommand::Empty => {}
            ReplCommand::Help => write!(out, "{HELP}")?,
            ReplCommand::Voices => write!(out, "{}", format_voice_list())?,
            ReplCommand::Unknown(_) => {
                writeln!(out, "Unknown command. Type 'help' for available commands.")?
            }
            ReplCommand::SetVoice(name) => match name.parse::<GeminiVoice>() {
                Ok(voice) => {
                    self.voice = voice;
                    writeln!(out, "Voice set to {voice} ({})", voice.tone())?;
                }
                Err(e) => writeln!(out, "✗ {e}")?,
            },
            ReplCommand::Speak(text) => {
                let outcome = self.speak(&text, Path::new(SPEAK_OUTPUT)).await;
                report(out, outcome, SPEAK_OUTPUT)?;
            }
            ReplCommand::Multi { speakers, text } => {
                let outcome = self.multi(&speakers, &text, Path::new(DIALOGUE_OUTPUT)).await;
                report(out, outcome, DIALOGUE_OUTPUT)?;
            }
            ReplCommand::Generate(topic) => {
                let voices = VoiceSelection::Single(self.voice.as_str().to_string());
                let outcome = generate_and_speak(
                    self.provider,
                    &topic,
                    &voices,
                    Some(self.model.as_str()),
                    Path::new(GENERATE_OUTPUT),
                    &self.credential,
                )
                .await;
                match outcome {
                    Ok(text) => {
                        writeln!(out, "{text}")?;
                        writeln!(out, "✓ Generated: {GENERATE_OUTPUT}")?;
                    }
                    Err(e) => writeln!(out, "✗ {e}")?,
                }
            }
        }
        Ok(true)
    }

    async fn speak(&self, text: &str, output: &Path) -> TTSResult<()> {
        let request =
            SynthesisRequest::build(text, Some(self.model.as_str()), self.voice.as_str(), None)?;
        let audio = self.provider.synthesize(&request, &self.credential).await?;
        write_wav(&audio, output)
    }

    async fn multi(&self, speakers: &[(String, String)], text: &str, output: &Path) -> TTSResult<()> {
        let request =
            SynthesisRequest::build_multi_speaker(text, speakers, Some(self.model.as_str()))?;
        let audio = self.provider.synthesize(&request, &self.credential).await?;
        write_wav(&audio, output)
    }

    /// Read commands until `quit` or end of input.
    pub async fn run<R, W>(&mut self, input: R, out: &mut W) -> std::io::Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: Write,
    {
        writeln!(out, "=== Gemini Text-to-Speech Interactive Mode ===")?;
        writeln!(out, "Type 'help' for available commands, 'quit' to exit")?;

        let mut lines = input.lines();
        loop {
            write!(out, "\n> ")?;
            out.flush()?;

            let Some(line) = lines.next_line().await? else {
                writeln!(out, "\nGoodbye!")?;
                return Ok(());
            };
            debug!(len = line.len(), "REPL input");

            let keep_going = match parse_command(&line) {
                Ok(command) => self.execute(command, out).await?,
                Err(e) => {
                    writeln!(out, "✗ {e}")?;
                    true
                }
            };
            if !keep_going {
                return Ok(());
            }
        }
    }
}

/// Ask for an API key on `input`.
///
/// Reads exactly one line, so the same reader can go on to drive
/// [`Session::run`] without losing buffered commands.
pub async fn prompt_for_credential<R, W>(input: &mut R, out: &mut W) -> TTSResult<Credential>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let terminal_error = |e: std::io::Error| TTSError::Io {
        path: "<terminal>".to_string(),
        message: e.to_string(),
    };

    write!(out, "Enter your Google AI API key: ").map_err(terminal_error)?;
    out.flush().map_err(terminal_error)?;

    let mut line = String::new();
    input.read_line(&mut line).await.map_err(terminal_error)?;
    let credential = Credential::new(line.as_str());
    line.zeroize();
    credential
}

fn report<W: Write>(out: &mut W, outcome: TTSResult<()>, output: &str) -> std::io::Result<()> {
    match outcome {
        Ok(()) => writeln!(out, "✓ Generated: {output}"),
        Err(e) => writeln!(out, "✗ {e}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::tts::SynthesisResult;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct CountingProvider {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl SpeechProvider for CountingProvider {
        async fn synthesize(
            &self,
            _request: &SynthesisRequest,
            _credential: &Credential,
        ) -> TTSResult<SynthesisResult> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(TTSError::Network("offline".to_string()))
        }

        async fn generate_text(&self, _prompt: &str, _credential: &Credential) -> TTSResult<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(TTSError::Network("offline".to_string()))
        }

        fn get_provider_info(&self) -> serde_json::Value {
            serde_json::json!({"provider": "counting"})
        }
    }

    #[test]
    fn test_parse_basic_commands() {
        assert_eq!(parse_command("  ").unwrap(), ReplCommand::Empty);
        assert_eq!(parse_command("QUIT").unwrap(), ReplCommand::Quit);
        assert_eq!(parse_command("q").unwrap(), ReplCommand::Quit);
        assert_eq!(parse_command("exit").unwrap(), ReplCommand::Quit);
        assert_eq!(parse_command("help").unwrap(), ReplCommand::Help);
        assert_eq!(parse_command("voices").unwrap(), ReplCommand::Voices);
        assert_eq!(
            parse_command("speak Hello, this is a test!").unwrap(),
            ReplCommand::Speak("Hello, this is a test!".to_string())
        );
        assert_eq!(
            parse_command("generate space exploration").unwrap(),
            ReplCommand::Generate("space exploration".to_string())
        );
        assert_eq!(
            parse_command("voice puck").unwrap(),
            ReplCommand::SetVoice("puck".to_string())
        );
        assert_eq!(
            parse_command("dance").unwrap(),
            ReplCommand::Unknown("dance".to_string())
        );
    }

    #[test]
    fn test_parse_multi() {
        let command = parse_command("multi Joe:Kore Jane:Puck Joe: Hi! Jane: Hello!").unwrap();
        assert_eq!(
            command,
            ReplCommand::Multi {
                speakers: vec![
                    ("Joe".to_string(), "Kore".to_string()),
                    ("Jane".to_string(), "Puck".to_string()),
                ],
                text: "Joe: Hi! Jane: Hello!".to_string(),
            }
        );

        let err = parse_command("multi Joe Jane hi").unwrap_err();
        assert!(matches!(err, TTSError::Validation(_)));
    }

    #[tokio::test]
    async fn test_session_script() {
        let provider = CountingProvider::default();
        let mut session = Session::new(
            &provider,
            Credential::new("key").unwrap(),
            GeminiVoice::Kore,
            GeminiTTSModel::Flash,
        );

        let script: &[u8] = b"help\nvoice nobody\nvoice Puck\nspeak\nspeak hi there\nbogus\nquit\nspeak never\n";
        let mut out = Vec::new();
        session.run(script, &mut out).await.unwrap();
        let out = String::from_utf8(out).unwrap();

        assert!(out.contains("Available commands:"));
        assert!(out.contains("Voice 'nobody' not supported"));
        assert!(out.contains("Voice set to Puck (Upbeat)"));
        assert!(out.contains("Text cannot be empty"));
        assert!(out.contains("Network error: offline"));
        assert!(out.contains("Unknown command."));
        assert!(out.trim_end().ends_with("Goodbye!"));
        // Empty text is rejected locally; only "speak hi there" reached the provider.
        assert_eq!(provider.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_session_ends_on_eof() {
        let provider = CountingProvider::default();
        let mut session = Session::new(
            &provider,
            Credential::new("key").unwrap(),
            GeminiVoice::default(),
            GeminiTTSModel::default(),
        );

        let mut out = Vec::new();
        session.run(&b"voices\n"[..], &mut out).await.unwrap();
        let out = String::from_utf8(out).unwrap();
        assert!(out.contains("30. Sulafat"));
        assert!(out.contains("Goodbye!"));
    }

    #[tokio::test]
    async fn test_key_prompt_leaves_remaining_commands() {
        let script: &[u8] = b"fake-key\nvoices\nquit\n";
        let mut input = tokio::io::BufReader::new(script);
        let mut out = Vec::new();

        let credential = prompt_for_credential(&mut input, &mut out).await.unwrap();
        assert_eq!(format!("{credential:?}"), "Credential(***)");

        let provider = CountingProvider::default();
        let mut session = Session::new(
            &provider,
            credential,
            GeminiVoice::default(),
            GeminiTTSModel::default(),
        );
        session.run(input, &mut out).await.unwrap();
        let out = String::from_utf8(out).unwrap();

        assert!(out.starts_with("Enter your Google AI API key: "));
        assert!(out.contains("30. Sulafat"));
        assert!(out.trim_end().ends_with("Goodbye!"));
        assert!(!out.contains("fake-key"));
    }

    #[tokio::test]
    async fn test_key_prompt_rejects_blank_line() {
        let mut input = tokio::io::BufReader::new(&b"   \n"[..]);
        let mut out = Vec::new();
        let err = prompt_for_credential(&mut input, &mut out).await.unwrap_err();
        assert!(matches!(err, TTSError::Auth(_)));
    }
}
