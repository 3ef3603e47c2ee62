//! `bight`: terminal front-end for the turn controller.

use anyhow::Context;
use clap::{Parser, Subcommand};
use console::style;
use rustyline::error::ReadlineError;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use bight::assistant::OpenAiAssistantClient;
use bight::catalog;
use bight::config::Config;
use bight::speech::{ElevenLabsClient, SpeechSynthesizer};
use bight::translate::{LibreTranslateClient, PassthroughTranslator, Translator};
use bight::turn::{ControllerSettings, LengthHint, Submission, TurnController, TurnError};

/// Chat with a hosted assistant from the terminal.
#[derive(Debug, Parser)]
#[command(name = "bight", version, about)]
struct Cli {
    /// Config file (defaults to ~/.bight/config.toml).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Raise log verbosity (-v debug, -vv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Interactive chat session (default).
    Chat,
    /// Ask a single question and print the reply.
    Ask {
        query: String,
        /// Response length hint: 50, 100 or 200.
        #[arg(long)]
        limit: Option<u32>,
        /// Reply locale code, e.g. `fr`.
        #[arg(long)]
        lang: Option<String>,
        /// Voice name from `bight catalog voices`.
        #[arg(long)]
        voice: Option<String>,
        /// Write the extracted code fragment to this file.
        #[arg(long)]
        save_code: Option<PathBuf>,
        /// Synthesize the reply and write the audio to this file.
        #[arg(long)]
        speak_to: Option<PathBuf>,
    },
    /// List selectable voices or locales.
    Catalog {
        #[command(subcommand)]
        kind: CatalogKind,
    },
    /// Inspect configuration.
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Debug, Subcommand)]
enum CatalogKind {
    Voices,
    Languages,
}

#[derive(Debug, Subcommand)]
enum ConfigAction {
    /// Print the config file JSON schema.
    Schema,
    /// Print the resolved config file path.
    Path,
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "bight=info",
        1 => "bight=debug",
        _ => "bight=trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command.unwrap_or(Command::Chat) {
        Command::Catalog { kind } => {
            print_catalog(&kind);
            Ok(())
        }
        Command::Config { action } => match action {
            ConfigAction::Schema => {
                println!("{}", serde_json::to_string_pretty(&Config::json_schema()?)?);
                Ok(())
            }
            ConfigAction::Path => {
                let path = cli.config.unwrap_or_else(Config::default_path);
                println!("{}", path.display());
                Ok(())
            }
        },
        Command::Chat => {
            let config = load_config(cli.config.as_deref())?;
            chat(&config).await
        }
        Command::Ask {
            query,
            limit,
            lang,
            voice,
            save_code,
            speak_to,
        } => {
            let config = load_config(cli.config.as_deref())?;
            let opts = AskOptions {
                limit,
                lang,
                voice,
                save_code,
                speak_to,
            };
            ask(&config, &query, opts).await
        }
    }
}

fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let config = Config::load(path)?;
    config.validate()?;
    Ok(config)
}

// ── Wiring ───────────────────────────────────────────────────────

fn build_controller(config: &Config) -> anyhow::Result<TurnController> {
    let api_key = config.assistant.api_key.clone().unwrap_or_default();
    let assistant = Arc::new(OpenAiAssistantClient::new(
        api_key,
        config.assistant.base_url.clone(),
    )?);

    let translator: Arc<dyn Translator> = if config.translation.enabled {
        Arc::new(LibreTranslateClient::new(
            config.translation.base_url.clone(),
            config.translation.api_key.clone(),
        )?)
    } else {
        Arc::new(PassthroughTranslator)
    };

    Ok(TurnController::new(
        assistant,
        translator,
        ControllerSettings::from_config(config),
    ))
}

fn build_speech(config: &Config) -> anyhow::Result<Option<ElevenLabsClient>> {
    match config.speech.api_key {
        Some(ref key) if !key.is_empty() => Ok(Some(ElevenLabsClient::new(
            key.clone(),
            config.speech.base_url.clone(),
            config.speech.model_id.clone(),
        )?)),
        _ => Ok(None),
    }
}

// ── Presentation ─────────────────────────────────────────────────

fn alert(err: &TurnError) {
    tracing::error!(error = %err, "Turn failed");
    eprintln!("{} {}", style("⚠").red().bold(), style(err.alert()).red().bold());
    eprintln!("  {}", style(err.to_string()).dim());
}

fn print_reply(ctl: &TurnController) {
    let state = ctl.state();
    println!();
    println!("{}", style(&state.reply).bold());
    if let Some(ref code) = state.code {
        println!();
        println!("{}", style("── code ─────────────────────────").cyan());
        println!("{code}");
        println!("{}", style("─────────────────────────────────").cyan());
    }
    println!();
}

fn print_catalog(kind: &CatalogKind) {
    match kind {
        CatalogKind::Voices => {
            for voice in catalog::voices() {
                println!("{:<12} {:<20} {}", voice.category.label(), voice.name, voice.id);
            }
        }
        CatalogKind::Languages => {
            for locale in catalog::locales() {
                println!("{} {:<4} {}", locale.flag, locale.code, locale.name);
            }
        }
    }
}

fn save_code(ctl: &TurnController, path: &Path) -> anyhow::Result<()> {
    let code = ctl
        .state()
        .code
        .as_deref()
        .context("The last reply has no code to save")?;
    std::fs::write(path, code).with_context(|| format!("Failed to write {}", path.display()))?;
    println!("Saved code to {}", path.display());
    Ok(())
}

async fn speak(
    ctl: &TurnController,
    speech: Option<&ElevenLabsClient>,
    path: &Path,
) -> anyhow::Result<()> {
    let state = ctl.state();
    if !state.audio_ready {
        anyhow::bail!("No reply ready to speak");
    }
    let voice = catalog::find_voice(&state.voice)
        .with_context(|| format!("Unknown voice '{}'", state.voice))?;
    if voice.is_silent() {
        anyhow::bail!("Voice '{}' is silent; pick another with /voice", voice.name);
    }
    let speech = speech.context("No speech API key configured (ELEVENLABS_API_KEY)")?;

    let audio = speech.synthesize(voice.id, &state.reply).await?;
    tokio::fs::write(path, &audio.bytes)
        .await
        .with_context(|| format!("Failed to write {}", path.display()))?;
    println!("Wrote {} ({}) to {}", voice.name, audio.mime, path.display());
    Ok(())
}

// ── Commands ─────────────────────────────────────────────────────

struct AskOptions {
    limit: Option<u32>,
    lang: Option<String>,
    voice: Option<String>,
    save_code: Option<PathBuf>,
    speak_to: Option<PathBuf>,
}

async fn ask(config: &Config, query: &str, opts: AskOptions) -> anyhow::Result<()> {
    let mut ctl = build_controller(config)?;
    let speech = build_speech(config)?;

    let limit = match opts.limit {
        Some(words) => LengthHint::from_words(words)
            .with_context(|| format!("--limit must be 50, 100 or 200 (got {words})"))?,
        None => ctl.state().limit,
    };
    if let Some(ref lang) = opts.lang {
        let locale =
            catalog::find_locale(lang).with_context(|| format!("Unknown locale '{lang}'"))?;
        ctl.select_locale(locale.code).await;
    }
    if let Some(ref voice) = opts.voice {
        let voice =
            catalog::find_voice(voice).with_context(|| format!("Unknown voice '{voice}'"))?;
        ctl.select_voice(voice.name);
    }

    ctl.start_session().await;
    if let Err(e) = ctl.run_turn(query, limit).await {
        alert(&e);
        anyhow::bail!(e);
    }
    print_reply(&ctl);

    if let Some(ref path) = opts.save_code {
        save_code(&ctl, path)?;
    }
    if let Some(ref path) = opts.speak_to {
        speak(&ctl, speech.as_ref(), path).await?;
    }
    Ok(())
}

const CHAT_HELP: &str = "\
Commands:
  /limit          cycle response length (50 → 100 → 200)
  /lang <code>    reply locale, e.g. /lang fr
  /voice <name>   select a voice (see `bight catalog voices`)
  /random         fill in a random question and voice
  /save <path>    save the last code fragment
  /speak <path>   synthesize the last reply to an audio file
  /reset          abandon a stuck turn
  /quit           exit
Anything else is sent to the assistant.";

async fn chat(config: &Config) -> anyhow::Result<()> {
    let mut ctl = build_controller(config)?;
    let speech = build_speech(config)?;
    ctl.start_session().await;

    let mut editor = rustyline::DefaultEditor::new()?;
    println!("{}", style("Bight: type /help for commands").cyan().bold());

    loop {
        let state = ctl.state();
        let prompt = format!(
            "[{} {} {}] {} › ",
            state.limit, state.locale, state.voice, state.placeholder
        );
        let initial = state.query.clone();
        let line = match editor.readline_with_initial(&prompt, (&initial, "")) {
            Ok(line) => line,
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => break,
            Err(e) => return Err(e.into()),
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if let Err(e) = editor.add_history_entry(line) {
            tracing::debug!(error = %e, "Failed to record history entry");
        }

        let (command, arg) = match line.split_once(char::is_whitespace) {
            Some((c, a)) => (c, a.trim()),
            None => (line, ""),
        };

        let outcome: anyhow::Result<()> = match command {
            "/quit" | "/exit" => break,
            "/help" => {
                println!("{CHAT_HELP}");
                Ok(())
            }
            "/limit" => {
                println!("Response limit: {}", ctl.cycle_limit());
                Ok(())
            }
            "/lang" => match catalog::find_locale(arg) {
                Some(locale) => {
                    let placeholder = ctl.select_locale(locale.code).await;
                    println!("{} {}", locale.flag, placeholder);
                    Ok(())
                }
                None => Err(anyhow::anyhow!("Unknown locale '{arg}'")),
            },
            "/voice" => match catalog::find_voice(arg) {
                Some(voice) => {
                    ctl.select_voice(voice.name);
                    println!("Voice: {} ({})", voice.name, voice.category.label());
                    Ok(())
                }
                None => Err(anyhow::anyhow!("Unknown voice '{arg}'")),
            },
            "/random" => {
                ctl.randomize();
                Ok(())
            }
            "/save" if !arg.is_empty() => save_code(&ctl, Path::new(arg)),
            "/speak" if !arg.is_empty() => speak(&ctl, speech.as_ref(), Path::new(arg)).await,
            "/reset" => {
                ctl.reset();
                Ok(())
            }
            cmd if cmd.starts_with('/') => {
                Err(anyhow::anyhow!("Unknown or incomplete command '{cmd}', try /help"))
            }
            _ => {
                ctl.set_query(line);
                submit(&mut ctl).await;
                Ok(())
            }
        };

        if let Err(e) = outcome {
            eprintln!("{} {e}", style("✗").red());
        }
    }

    Ok(())
}

async fn submit(ctl: &mut TurnController) {
    let query = ctl.state().query.clone();
    let limit = ctl.state().limit;
    println!("{}", style("…").dim());

    match ctl.run_turn(&query, limit).await {
        Ok(Submission::Started(_)) => print_reply(ctl),
        Ok(Submission::Rejected) => {
            eprintln!(
                "{}",
                style("Still waiting on the previous answer (/reset to abandon it)").yellow()
            );
        }
        Err(e) => {
            alert(&e);
            if ctl.state().is_waiting() {
                eprintln!("{}", style("The turn is still pending; /reset to abandon it").yellow());
            }
        }
    }
}
