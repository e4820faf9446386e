use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use securechat_config::Settings;
use securechat_engine::{BlockId, MemoryOutline, WebhookClient, ask, parse_markdown, prepare};
use std::io::Read;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "securechat", version, about = "Chat with a completion webhook from an outline")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Parse markdown into content blocks and print them as JSON
    Parse {
        /// Markdown file to read; stdin when omitted
        file: Option<PathBuf>,
    },
    /// Print the prompt that would be sent for a block
    Context {
        /// Outline JSON file (flat array of blocks)
        outline: PathBuf,
        /// Id of the block being edited
        block_id: String,
    },
    /// Send the prompt for a block and insert the answer under it
    Ask {
        /// Outline JSON file (flat array of blocks)
        outline: PathBuf,
        /// Id of the block being edited
        block_id: String,
        /// Settings file to use instead of the default location
        #[arg(long)]
        config: Option<PathBuf>,
        /// Do not write the updated outline back
        #[arg(long)]
        dry_run: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    match Cli::parse().command {
        Command::Parse { file } => run_parse(file.as_deref()),
        Command::Context { outline, block_id } => run_context(&outline, &block_id).await,
        Command::Ask {
            outline,
            block_id,
            config,
            dry_run,
        } => run_ask(&outline, &block_id, config.as_deref(), dry_run).await,
    }
}

fn run_parse(file: Option<&Path>) -> Result<()> {
    let markdown = match file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read stdin")?;
            buf
        }
    };
    println!("{}", serde_json::to_string_pretty(&parse_markdown(&markdown))?);
    Ok(())
}

async fn run_context(outline_path: &Path, block_id: &str) -> Result<()> {
    let outline = load_outline(outline_path)?;
    let prepared = prepare(&outline, &BlockId::new(block_id))
        .await
        .with_context(|| format!("Failed to build context for block {block_id}"))?;
    println!("{}", prepared.prompt);
    Ok(())
}

async fn run_ask(
    outline_path: &Path,
    block_id: &str,
    config_path: Option<&Path>,
    dry_run: bool,
) -> Result<()> {
    let config_path = config_path
        .map(Path::to_path_buf)
        .unwrap_or_else(Settings::config_path);
    log::info!("Config path: {}", config_path.display());

    let Some(settings) = Settings::load_from_path(&config_path)? else {
        bail!(
            "No settings found; create {} with webhook_url, project_id and api_key",
            config_path.display()
        );
    };
    settings.validate()?;

    let client = WebhookClient::new(settings.webhook_url, settings.project_id, settings.api_key)
        .context("Failed to create webhook client")?;
    let mut outline = load_outline(outline_path)?;

    let outcome = ask(&mut outline, &client, &BlockId::new(block_id))
        .await
        .with_context(|| format!("SecureChat request for block {block_id} failed"))?;

    if dry_run {
        log::info!("Dry run: {} not modified", outline_path.display());
    } else if !outcome.inserted.is_empty() {
        outline
            .save(outline_path)
            .with_context(|| format!("Failed to write {}", outline_path.display()))?;
    }

    println!("{}", serde_json::to_string_pretty(&outcome.blocks)?);
    Ok(())
}

fn load_outline(path: &Path) -> Result<MemoryOutline> {
    MemoryOutline::load(path).with_context(|| format!("Failed to load outline {}", path.display()))
}
