use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use model_bridge::config::config_search_paths;
use model_bridge::{BridgeConfig, ChatCompletionRequest, EmbeddingRequest};
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(
    name = "model-bridge",
    about = "Inspect how OpenAI model names are resolved to Gemini backends",
    version
)]
struct Cli {
    /// Path to config file (TOML)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Disable model mapping (overrides config and environment)
    #[arg(long, global = true)]
    no_mapping: bool,

    /// Print config search paths and exit
    #[arg(long)]
    show_config_paths: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Print the owner label reported to clients
    Owner,
    /// Translate an OpenAI model name to its Gemini backend
    Translate { model: String },
    /// Resolve the model name exposed for a caller-supplied name
    Outbound { model: String },
    /// Report a Gemini model name in OpenAI vocabulary
    Report { model: String },
    /// Resolve the backend model for a request
    Resolve {
        model: String,
        #[arg(long, value_enum, default_value_t = RequestKind::Chat)]
        kind: RequestKind,
    },
    /// Print the model listing as JSON
    Models,
}

#[derive(Clone, Copy, ValueEnum)]
enum RequestKind {
    Chat,
    Embedding,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "model_bridge=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if cli.show_config_paths {
        println!("Config search paths:");
        for (i, path) in config_search_paths().iter().enumerate() {
            println!("  {}. {}", i + 1, path.display());
        }
        return Ok(());
    }

    let mut config = BridgeConfig::find_and_load(cli.config.as_deref())?.apply_env();
    if cli.no_mapping {
        config.mapping.enabled = false;
    }

    let resolver = config.resolver();
    debug!(
        mapping = config.mapping.enabled,
        fixed_override = config.mapping.vision_override.is_some(),
        "model-bridge v{}",
        env!("CARGO_PKG_VERSION")
    );

    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    match command {
        Command::Owner => println!("{}", resolver.owner_label()),
        Command::Translate { model } => println!("{}", resolver.translate_a_to_b(&model)),
        Command::Outbound { model } => println!("{}", resolver.resolve_outbound_model(&model)),
        Command::Report { model } => println!("{}", resolver.translate_b_to_a(&model)),
        Command::Resolve { model, kind } => {
            let resolved = match kind {
                RequestKind::Chat => resolver.resolve_request(&ChatCompletionRequest::new(model)),
                RequestKind::Embedding => {
                    resolver.resolve_request(&EmbeddingRequest::new(model))
                }
            };
            println!("{resolved}");
        }
        Command::Models => {
            println!("{}", serde_json::to_string_pretty(&resolver.model_list())?);
        }
    }

    Ok(())
}
