use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tokio::runtime::Runtime;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use munassist::MunError;
use munassist::cli::Output;
use munassist::cli::commands::{self, generate::GenerateOptions};

#[derive(Parser)]
#[command(name = "munassist")]
#[command(
    version,
    about = "Model United Nations preparation assistant backed by the Hugging Face Inference API"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(long, short, global = true, help = "Load configuration from this file only")]
    config: Option<PathBuf>,

    #[arg(long, global = true)]
    verbose: bool,

    #[arg(long, short, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a position paper, resolution, speech, or other MUN output
    Generate {
        #[arg(long, short, default_value = "Position Paper", help = "Mode name or slug (see `modes`)")]
        mode: String,
        #[arg(long, short, help = "Debate topic")]
        topic: String,
        #[arg(long, short = 'Q', default_value = "", help = "Question or crisis update")]
        question: String,
        #[arg(long, help = "Delegation country")]
        country: Option<String>,
        #[arg(long, help = "Committee code, e.g. UNSC")]
        committee: Option<String>,
        #[arg(long, help = "Model preset alias or Hugging Face model id")]
        model: Option<String>,
        #[arg(long, env = "HUGGINGFACE_API_KEY", hide_env_values = true, help = "Hugging Face access token")]
        api_key: Option<String>,
        #[arg(long, help = "Maximum new tokens")]
        max_tokens: Option<u32>,
        #[arg(long, help = "Sampling temperature (0.0-2.0)")]
        temperature: Option<f32>,
        #[arg(long, short, help = "Append the exchange to a transcript file")]
        output: Option<PathBuf>,
        #[arg(long, help = "Print the composed prompt")]
        show_prompt: bool,
    },

    /// Check that an API key is well formed (no request is sent)
    CheckKey {
        #[arg(long, env = "HUGGINGFACE_API_KEY", hide_env_values = true)]
        api_key: Option<String>,
    },

    /// List committees
    Committees,

    /// List countries and their profiles
    Countries,

    /// List generation modes
    Modes,

    /// List model presets
    Models,

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Show current configuration (merged from all sources)
    Show {
        #[arg(
            short = 'f',
            long,
            default_value = "toml",
            help = "Output format: toml, json"
        )]
        format: String,
    },
    /// Show configuration file paths
    Path,
    /// Initialize configuration
    Init {
        #[arg(long, short, help = "Initialize global config")]
        global: bool,
        #[arg(long, help = "Overwrite existing config")]
        force: bool,
    },
}

/// Set up panic handler for graceful error reporting
fn setup_panic_handler() {
    let default_hook = std::panic::take_hook();

    std::panic::set_hook(Box::new(move |panic_info| {
        let message = if let Some(s) = panic_info.payload().downcast_ref::<&str>() {
            s.to_string()
        } else if let Some(s) = panic_info.payload().downcast_ref::<String>() {
            s.clone()
        } else {
            "Unknown panic".to_string()
        };

        eprintln!("\n\x1b[1;31m━━━ PANIC ━━━\x1b[0m");
        eprintln!("\x1b[31mmunassist encountered an unexpected error:\x1b[0m");
        eprintln!("  {}", message);

        if let Some(location) = panic_info.location() {
            eprintln!(
                "\x1b[90mLocation: {}:{}:{}\x1b[0m",
                location.file(),
                location.line(),
                location.column()
            );
        }
        eprintln!();

        // Call default hook for backtrace (if RUST_BACKTRACE=1)
        default_hook(panic_info);
    }));
}

fn main() -> ExitCode {
    setup_panic_handler();

    match run_cli() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            match e.downcast_ref::<MunError>() {
                Some(MunError::Inference(err)) => Output::new().failure(err),
                _ => eprintln!("\x1b[31mError:\x1b[0m {}", e),
            }
            ExitCode::FAILURE
        }
    }
}

fn run_cli() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        "info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match cli.command {
        Commands::Generate {
            mode,
            topic,
            question,
            country,
            committee,
            model,
            api_key,
            max_tokens,
            temperature,
            output,
            show_prompt,
        } => {
            let config = commands::load_config(cli.config.as_deref())?;
            let options = GenerateOptions {
                mode,
                topic,
                question,
                country,
                committee,
                model,
                api_key,
                max_tokens,
                temperature,
                output,
                show_prompt,
            };
            let rt = Runtime::new()?;
            rt.block_on(commands::generate::run(options, config))?;
        }
        Commands::CheckKey { api_key } => {
            let config = commands::load_config(cli.config.as_deref())?;
            commands::key::run(api_key, &config)?;
        }
        Commands::Committees => commands::catalog::committees(),
        Commands::Countries => commands::catalog::countries(),
        Commands::Modes => commands::catalog::modes(),
        Commands::Models => commands::catalog::models(),
        Commands::Config { action } => match action {
            ConfigAction::Show { format } => {
                let config = commands::load_config(cli.config.as_deref())?;
                commands::config::show(&config, &format)?;
            }
            ConfigAction::Path => commands::config::path(),
            ConfigAction::Init { global, force } => {
                commands::config::init(global, force)?;
            }
        },
    }

    Ok(())
}
