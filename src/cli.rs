// CLI module for argument parsing and configuration

use crate::config::UserConfig;
use crate::error::{CtxpickError, Result};
use crate::sink::Destination;
use crate::tokenizer::DEFAULT_ENCODING;
use clap::{ArgAction, Parser};
use std::path::PathBuf;

/// Ctxpick - pick files from a checklist and copy them for an AI assistant
///
/// Every file is prefixed with a comment naming it, and the token count of the
/// selection is shown live while you pick.
#[derive(Parser, Debug, Clone)]
#[command(name = "ctxpick")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Files to offer in the checklist (wildcards are expanded by your shell)
    #[arg(value_name = "FILE")]
    pub paths: Vec<String>,

    /// Skip the checklist and use every file
    #[arg(short = 'n', long = "no-ui", action = ArgAction::SetTrue)]
    pub no_ui: bool,

    /// Print the result to stdout instead of copying it to the clipboard
    #[arg(short = 'o', long = "stdout", action = ArgAction::SetTrue)]
    pub stdout: bool,

    /// Token encoding used for the estimate (cl100k_base, o200k_base, p50k_base, p50k_edit, r50k_base)
    #[arg(short = 'e', long = "encoding")]
    pub encoding: Option<String>,

    /// Read settings from this file instead of ~/.config/ctxpick/config.json
    #[arg(long = "config", value_name = "PATH")]
    pub config: Option<PathBuf>,
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Args::parse()
    }

    /// Validate the arguments before any file is read
    pub fn validate(&self) -> Result<()> {
        if self.paths.is_empty() {
            return Err(CtxpickError::NoInputPaths);
        }
        Ok(())
    }

    /// Loads the user config named by `--config`, or the default one
    pub fn load_user_config(&self) -> Result<UserConfig> {
        match &self.config {
            Some(path) => UserConfig::load_from(path),
            None => UserConfig::load(),
        }
    }
}

/// Configuration resolved from CLI arguments and the user config file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub paths: Vec<String>,
    pub interactive: bool,
    pub destination: Destination,
    pub encoding: String,
}

impl AppConfig {
    /// Command-line flags win over the config file, which wins over built-in defaults
    pub fn resolve(args: Args, user: &UserConfig) -> Self {
        let destination = if args.stdout || user.stdout {
            Destination::Stdout
        } else {
            Destination::Clipboard
        };

        let encoding = args
            .encoding
            .or_else(|| user.encoding.clone())
            .unwrap_or_else(|| DEFAULT_ENCODING.to_string());

        AppConfig {
            paths: args.paths,
            interactive: !args.no_ui,
            destination,
            encoding,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            paths: Vec::new(),
            interactive: true,
            destination: Destination::Clipboard,
            encoding: DEFAULT_ENCODING.to_string(),
        }
    }
}
