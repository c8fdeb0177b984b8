use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

// ============================================================================
// CLI Argument Parsing (clap derive)
// ============================================================================

#[derive(Parser, Debug)]
#[command(
    name = "change-tracker",
    version,
    about = "Track, report and revert edits to form controls"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to config file (default: change-tracker.yaml in current dir)
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// Append tracker events as JSON lines to this file
    #[arg(long, global = true)]
    pub trace: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the trackable controls under a container
    Inspect {
        /// Form description (YAML or JSON)
        #[arg(long)]
        form: String,

        /// Container element id
        #[arg(long)]
        root: Option<String>,
    },

    /// Replay interaction scripts against a form and check the tracker
    Replay {
        /// Form description (YAML or JSON)
        #[arg(long)]
        form: String,

        /// Script YAML file or directory of scripts
        #[arg(long)]
        script: String,

        /// Output format: console or json
        #[arg(long)]
        format: Option<String>,

        /// Output file path (default: stdout)
        #[arg(short, long)]
        output: Option<String>,
    },
}

// ============================================================================
// Config File Model (optional YAML)
// ============================================================================

/// Optional YAML config file: `change-tracker.yaml`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Container id used when a command or script does not name one
    #[serde(default = "default_root")]
    pub root: String,
    #[serde(default)]
    pub replay: ReplayConfig,
    #[serde(default)]
    pub trace: TraceConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            root: default_root(),
            replay: ReplayConfig::default(),
            trace: TraceConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplayConfig {
    #[serde(default = "default_console")]
    pub format: String,

    pub output: Option<String>,
}

impl Default for ReplayConfig {
    fn default() -> Self {
        Self {
            format: default_console(),
            output: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TraceConfig {
    pub path: Option<String>,
}

fn default_root() -> String { "container".to_string() }
fn default_console() -> String { "console".to_string() }

// ============================================================================
// Config File Loading
// ============================================================================

/// Load config from a YAML file. Returns defaults if file is missing or malformed.
pub fn load_config(path: Option<&str>) -> AppConfig {
    let config_path = path.unwrap_or("change-tracker.yaml");
    match std::fs::read_to_string(config_path) {
        Ok(content) => serde_yaml::from_str(&content).unwrap_or_default(),
        Err(_) => AppConfig::default(),
    }
}

// ============================================================================
// Resolution (CLI > config > defaults)
// ============================================================================

/// Settings a command runs with once CLI flags and config are merged.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedSettings {
    pub root: String,
    pub format: String,
    pub output: Option<String>,
    pub trace: Option<String>,
}

pub fn resolve_settings(
    config: &AppConfig,
    root: Option<&str>,
    format: Option<&str>,
    output: Option<&str>,
    trace: Option<&str>,
) -> ResolvedSettings {
    ResolvedSettings {
        root: root.unwrap_or(config.root.as_str()).to_string(),
        format: format.unwrap_or(config.replay.format.as_str()).to_string(),
        output: output.map(str::to_string).or_else(|| config.replay.output.clone()),
        trace: trace.map(str::to_string).or_else(|| config.trace.path.clone()),
    }
}
