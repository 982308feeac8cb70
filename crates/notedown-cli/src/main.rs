mod input;
mod preview;
mod terminal;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use notedown_config::Config;
use notedown_engine::encoding::hex_to_bech32;
use notedown_engine::markdown::NodeType;
use notedown_engine::{HtmlRenderer, Renderer, UserMetadata};
use std::path::PathBuf;

use crate::input::{load_profiles, read_post, render_options};
use crate::preview::App;
use crate::terminal::TerminalRenderer;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    /// Scrollable terminal preview
    Tui,
    Html,
    /// Fragment tree as JSON
    Json,
}

/// Render a nostr post with its mentions, links, invoices and hashtags.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Event JSON file, or `-` to read from stdin
    #[arg(required_unless_present = "write_config")]
    post: Option<PathBuf>,

    #[arg(short, long, value_enum, default_value_t = Format::Tui)]
    format: Format,

    /// JSON object of cached profiles keyed by hex pubkey
    #[arg(long, value_name = "FILE")]
    profiles: Option<PathBuf>,

    /// Config file to use instead of the default location
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Keep native rendering for a markdown node type (e.g. `image`)
    #[arg(long = "allow", value_name = "NODE_TYPE")]
    allow: Vec<NodeType>,

    /// Characters shown for event reference labels
    #[arg(long)]
    event_label_len: Option<usize>,

    /// Save the effective configuration and exit unless a post is given
    #[arg(long)]
    write_config: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config_path = args.config.clone().unwrap_or_else(Config::config_path);
    let mut config = Config::load_from_path(&config_path)
        .with_context(|| format!("Failed to load config file {}", config_path.display()))?
        .unwrap_or_default();
    apply_overrides(&mut config, &args);

    if args.write_config {
        config.save_to_path(&config_path)?;
        eprintln!("Wrote config to {}", config_path.display());
    }

    let Some(post_path) = args.post else {
        return Ok(());
    };
    let post = read_post(&post_path)?;
    let users = match &config.profiles_path {
        Some(path) => load_profiles(path)?,
        None => UserMetadata::new(),
    };

    let renderer = Renderer::new(render_options(&config)?);
    let fragments = renderer.render_post(&post, &users)?;
    log::debug!("rendered {} top-level fragments", fragments.len());

    match args.format {
        Format::Html => println!("{}", HtmlRenderer::new(&users).document(&fragments)),
        Format::Json => println!("{}", serde_json::to_string_pretty(&fragments)?),
        Format::Tui => {
            let author = hex_to_bech32("npub", &post.pubkey);
            let title = if author.is_empty() {
                post.pubkey.clone()
            } else {
                author
            };
            let lines = TerminalRenderer::new(&users).lines(&fragments);
            preview::run(App::new(title, lines))?;
        }
    }

    Ok(())
}

fn apply_overrides(config: &mut Config, args: &Args) {
    if let Some(len) = args.event_label_len {
        config.event_label_len = Some(len);
    }
    if let Some(path) = &args.profiles {
        config.profiles_path = Some(path.clone());
    }
    for node_type in &args.allow {
        let name = node_type.to_string();
        if !config.allow_markdown.contains(&name) {
            config.allow_markdown.push(name);
        }
    }
}
