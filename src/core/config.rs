//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.murmur/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use clap::ValueEnum;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::room::{RoomKind, Show};

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct MurmurConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub completion: CompletionConfig,
    #[serde(default)]
    pub rooms: Vec<RoomEntry>,
    #[serde(default)]
    pub contacts: Vec<ContactEntry>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub nick: Option<String>,
    pub show_timestamps: Option<bool>,
    pub request_receipts: Option<bool>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct CompletionConfig {
    pub mode: Option<CompletionMode>,
    pub after_completion: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RoomEntry {
    pub name: String,
    pub kind: Option<RoomKind>,
    pub topic: Option<String>,
    #[serde(default)]
    pub occupants: Vec<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ContactEntry {
    pub jid: String,
    pub name: Option<String>,
    pub group: Option<String>,
    pub presence: Option<Show>,
}

/// Which nickname completion strategy Tab runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum CompletionMode {
    /// Each Tab rotates through all matching nicks.
    #[default]
    Normal,
    /// First Tab completes the common prefix, like a shell.
    Shell,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_NICK: &str = "murmur";
pub const DEFAULT_AFTER_COMPLETION: &str = ",";
pub const DEFAULT_ROOM: &str = "lounge@conference.localhost";
const DEFAULT_OCCUPANTS: [&str; 3] = ["alice", "alicia", "bob"];
const DEFAULT_GROUP: &str = "Contacts";

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct CompletionSettings {
    pub mode: CompletionMode,
    /// Punctuation placed after a nick completed at the start of the line.
    pub after_completion: String,
}

impl Default for CompletionSettings {
    fn default() -> Self {
        Self {
            mode: CompletionMode::Normal,
            after_completion: DEFAULT_AFTER_COMPLETION.to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub nick: String,
    pub show_timestamps: bool,
    pub request_receipts: bool,
    pub completion: CompletionSettings,
    pub rooms: Vec<RoomEntry>,
    pub contacts: Vec<ResolvedContact>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedContact {
    pub jid: String,
    pub name: Option<String>,
    pub group: String,
    pub presence: Show,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.murmur/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".murmur").join("config.toml"))
}

/// Load config from `~/.murmur/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `MurmurConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<MurmurConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(MurmurConfig::default());
        }
    };

    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(&path);
        return Ok(MurmurConfig::default());
    }

    load_config_from(&path)
}

pub fn load_config_from(path: &Path) -> Result<MurmurConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: MurmurConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

fn generate_default_config(path: &Path) {
    let default_content = r#"# Murmur Configuration
# All settings are optional; defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [general]
# nick = "murmur"                    # Or set MURMUR_NICK env var
# show_timestamps = true
# request_receipts = true            # Ask for delivery receipts on messages with a body

# [completion]
# mode = "normal"                    # "normal" (rotate) or "shell" (common prefix)
# after_completion = ","             # Placed after a nick completed at line start

# [[rooms]]
# name = "lounge@conference.localhost"
# kind = "muc"                       # "muc", "private" or "conversation"
# topic = "Welcome"
# occupants = ["alice", "alicia", "bob"]

# [[contacts]]
# jid = "alice@example.org"
# name = "Alice"
# group = "Friends"
# presence = "available"             # available, chat, away, xa, dnd, unavailable
"#;

    if let Some(parent) = path.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            warn!("Failed to create config directory: {}", e);
            return;
        }
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
///
/// `cli_nick` and `cli_completion` are from CLI flags (None = not specified).
pub fn resolve(
    config: &MurmurConfig,
    cli_nick: Option<&str>,
    cli_completion: Option<CompletionMode>,
) -> ResolvedConfig {
    // Nick: CLI → env → config → default
    let nick = cli_nick
        .map(|s| s.to_string())
        .or_else(|| std::env::var("MURMUR_NICK").ok())
        .or_else(|| config.general.nick.clone())
        .filter(|n| !n.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_NICK.to_string());

    // Completion mode: CLI → env → config → default
    let mode = cli_completion
        .or_else(|| {
            std::env::var("MURMUR_COMPLETION")
                .ok()
                .and_then(|v| CompletionMode::from_str(&v, true).ok())
        })
        .or(config.completion.mode)
        .unwrap_or_default();

    let after_completion = config
        .completion
        .after_completion
        .clone()
        .unwrap_or_else(|| DEFAULT_AFTER_COMPLETION.to_string());

    let rooms = if config.rooms.is_empty() {
        vec![RoomEntry {
            name: DEFAULT_ROOM.to_string(),
            kind: Some(RoomKind::Muc),
            topic: None,
            occupants: DEFAULT_OCCUPANTS.iter().map(|s| s.to_string()).collect(),
        }]
    } else {
        config.rooms.clone()
    };

    let contacts = config
        .contacts
        .iter()
        .map(|c| ResolvedContact {
            jid: c.jid.clone(),
            name: c.name.clone(),
            group: c.group.clone().unwrap_or_else(|| DEFAULT_GROUP.to_string()),
            presence: c.presence.unwrap_or(Show::Unavailable),
        })
        .collect();

    ResolvedConfig {
        nick,
        show_timestamps: config.general.show_timestamps.unwrap_or(true),
        request_receipts: config.general.request_receipts.unwrap_or(true),
        completion: CompletionSettings {
            mode,
            after_completion,
        },
        rooms,
        contacts,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_parses() {
        let config = MurmurConfig::default();
        assert!(config.rooms.is_empty());
        assert!(config.general.nick.is_none());
    }

    #[test]
    fn test_resolve_uses_defaults_when_empty() {
        let config = MurmurConfig::default();
        let resolved = resolve(&config, Some("tester"), Some(CompletionMode::Normal));
        assert_eq!(resolved.completion.after_completion, ",");
        assert!(resolved.show_timestamps);
        assert!(resolved.request_receipts);
        assert_eq!(resolved.rooms.len(), 1);
        assert_eq!(resolved.rooms[0].name, DEFAULT_ROOM);
        assert!(resolved.contacts.is_empty());
    }

    #[test]
    fn test_resolve_config_values_override_defaults() {
        let config = MurmurConfig {
            general: GeneralConfig {
                nick: Some("dana".to_string()),
                show_timestamps: Some(false),
                request_receipts: Some(false),
            },
            completion: CompletionConfig {
                mode: Some(CompletionMode::Shell),
                after_completion: Some(":".to_string()),
            },
            ..Default::default()
        };
        let resolved = resolve(&config, None, Some(CompletionMode::Shell));
        assert!(!resolved.show_timestamps);
        assert!(!resolved.request_receipts);
        assert_eq!(resolved.completion.mode, CompletionMode::Shell);
        assert_eq!(resolved.completion.after_completion, ":");
    }

    #[test]
    fn test_resolve_cli_wins() {
        let config = MurmurConfig {
            general: GeneralConfig {
                nick: Some("from-file".to_string()),
                ..Default::default()
            },
            completion: CompletionConfig {
                mode: Some(CompletionMode::Shell),
                after_completion: None,
            },
            ..Default::default()
        };
        let resolved = resolve(&config, Some("from-cli"), Some(CompletionMode::Normal));
        assert_eq!(resolved.nick, "from-cli");
        assert_eq!(resolved.completion.mode, CompletionMode::Normal);
    }

    #[test]
    fn test_toml_round_trip() {
        let toml_str = r#"
[general]
nick = "dana"
show_timestamps = false

[completion]
mode = "shell"
after_completion = ":"

[[rooms]]
name = "chat@muc.example.net"
kind = "muc"
topic = "General chat"
occupants = ["alice", "bob"]

[[rooms]]
name = "bob@example.org"
kind = "conversation"

[[contacts]]
jid = "bob@example.org"
group = "Friends"
presence = "away"
"#;
        let config: MurmurConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.general.nick.as_deref(), Some("dana"));
        assert_eq!(config.completion.mode, Some(CompletionMode::Shell));
        assert_eq!(config.rooms.len(), 2);
        assert_eq!(config.rooms[0].occupants, vec!["alice", "bob"]);
        assert_eq!(config.rooms[1].kind, Some(RoomKind::Conversation));
        assert!(config.rooms[1].occupants.is_empty());
        assert_eq!(config.contacts[0].presence, Some(Show::Away));
    }

    #[test]
    fn test_contacts_get_default_group_and_presence() {
        let toml_str = r#"
[[contacts]]
jid = "carol@example.org"
"#;
        let config: MurmurConfig = toml::from_str(toml_str).unwrap();
        let resolved = resolve(&config, Some("x"), Some(CompletionMode::Normal));
        assert_eq!(resolved.contacts[0].group, "Contacts");
        assert_eq!(resolved.contacts[0].presence, Show::Unavailable);
    }

    #[test]
    fn test_sparse_toml_parses() {
        // Only override one thing, everything else stays default
        let toml_str = r#"
[completion]
after_completion = ";"
"#;
        let config: MurmurConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.completion.after_completion.as_deref(), Some(";"));
        assert!(config.completion.mode.is_none());
        assert!(config.rooms.is_empty());
    }

    #[test]
    fn test_malformed_toml_is_parse_error() {
        let dir = std::env::temp_dir().join(format!("murmur-config-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.toml");
        fs::write(&path, "[general\nnick = ").unwrap();
        let err = load_config_from(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
        assert!(err.to_string().starts_with("config parse error"));
        fs::remove_dir_all(&dir).unwrap();
    }
}
