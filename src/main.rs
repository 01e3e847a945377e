use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::anyhow;
use clap::{Parser, Subcommand};
use tokio::io::BufReader;
use tracing::info;

use gemini_tts::{
    ServerConfig, TTSError,
    commands::{self, DialogueArgs, GenerateArgs, SpeakArgs},
    core::tts::{BoxedProvider, create_speech_provider},
    interactive::{Session, prompt_for_credential},
    server,
};

/// Gemini TTS - text-to-speech from the command line or a local web page
#[derive(Parser, Debug)]
#[command(name = "gemini-tts")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to configuration file (YAML)
    #[arg(short = 'c', long = "config", value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Gemini API key (overrides GOOGLE_API_KEY / GEMINI_API_KEY)
    #[arg(long = "api-key", value_name = "KEY", global = true)]
    api_key: Option<String>,

    /// Subcommand to run
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Convert text to speech with a single voice
    Speak(SpeakArgs),

    /// Convert a two-speaker dialogue to speech
    Dialogue(DialogueArgs),

    /// Generate content about a topic and convert it to speech
    Generate(GenerateArgs),

    /// List available voices
    Voices,

    /// Start an interactive session
    Interactive,

    /// Start the web server
    Serve,
}

fn load_config(path: Option<&PathBuf>) -> anyhow::Result<ServerConfig> {
    match path {
        Some(config_path) => {
            info!(path = %config_path.display(), "Loading configuration");
            ServerConfig::from_file(config_path).map_err(|e| anyhow!(e.to_string()))
        }
        None => ServerConfig::from_env().map_err(|e| anyhow!(e.to_string())),
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = load_config(cli.config.as_ref())?;
    let explicit_key = cli.api_key.as_deref();

    let provider = || -> anyhow::Result<BoxedProvider> {
        Ok(create_speech_provider("gemini", config.gemini_config())?)
    };

    match &cli.command {
        Commands::Voices => {
            print!("{}", commands::format_voice_list());
        }
        Commands::Serve => {
            server::serve(config.clone()).await?;
        }
        Commands::Speak(args) => {
            let credential = config.credential(explicit_key)?;
            commands::speak(provider()?.as_ref(), &config, &credential, args).await?;
        }
        Commands::Dialogue(args) => {
            let credential = config.credential(explicit_key)?;
            commands::dialogue(provider()?.as_ref(), &config, &credential, args).await?;
        }
        Commands::Generate(args) => {
            let credential = config.credential(explicit_key)?;
            commands::generate(provider()?.as_ref(), &config, &credential, args).await?;
        }
        Commands::Interactive => {
            // One reader for the key prompt and the session, so piped input
            // buffered past the key line is not lost.
            let mut stdin = BufReader::new(tokio::io::stdin());
            let credential = match config.credential(explicit_key) {
                Ok(credential) => credential,
                Err(_) => prompt_for_credential(&mut stdin, &mut std::io::stdout()).await?,
            };
            let backend = provider()?;
            let mut session =
                Session::new(backend.as_ref(), credential, config.default_voice, config.tts_model);
            session.run(stdin, &mut std::io::stdout()).await?;
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    // Load .env file if it exists (must be done before config loading)
    let _ = dotenvy::dotenv();

    // Initialize tracing; stdout is reserved for command output
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    // Initialize crypto provider for TLS connections
    // This must be done before any TLS connections are attempted
    if rustls::crypto::ring::default_provider()
        .install_default()
        .is_err()
    {
        eprintln!("✗ Failed to install default crypto provider");
        return ExitCode::FAILURE;
    }

    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("✗ Error: {e:#}");
            if let Some(tts_error) = e.downcast_ref::<TTSError>() {
                eprintln!("  {}", tts_error.hint());
            }
            ExitCode::FAILURE
        }
    }
}
