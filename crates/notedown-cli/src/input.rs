use anyhow::{Context, Result};
use notedown_config::Config;
use notedown_engine::markdown::NodeType;
use notedown_engine::{Post, RenderOptions, UserMetadata};
use std::io::Read;
use std::path::Path;

/// Reads a nostr event JSON from `path`, or from stdin when `path` is `-`.
pub fn read_post(path: &Path) -> Result<Post> {
    let json = if path == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read post from stdin")?;
        buf
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read post file {}", path.display()))?
    };
    parse_post(&json)
}

pub fn parse_post(json: &str) -> Result<Post> {
    serde_json::from_str(json).context("Post is not a valid nostr event")
}

/// Loads a profile cache: a JSON object mapping hex pubkeys to profiles.
pub fn load_profiles(path: &Path) -> Result<UserMetadata> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read profiles file {}", path.display()))?;
    let users: UserMetadata = serde_json::from_str(&json)
        .with_context(|| format!("Failed to parse profiles file {}", path.display()))?;
    log::debug!("loaded {} profiles from {}", users.len(), path.display());
    Ok(users)
}

/// Render options from `config`; unset values keep the engine defaults.
pub fn render_options(config: &Config) -> Result<RenderOptions> {
    let mut options = RenderOptions::default();
    for name in &config.allow_markdown {
        let node_type: NodeType = name
            .parse()
            .with_context(|| format!("Invalid allow_markdown entry {name:?}"))?;
        options.intercept = options.intercept.allow(node_type);
    }
    if let Some(len) = config.event_label_len {
        options.event_label_len = len;
    }
    Ok(options)
}
