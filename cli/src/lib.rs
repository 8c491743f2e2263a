//! `cfgbackup` — client for device configuration backups.
//!
//! Fetches the blob a device serves under `/config.b64`, reverses its
//! encoding with a locally supplied key, and saves the original file. Also
//! produces such blobs for embedding in firmware.

#![cfg_attr(test, allow(clippy::unwrap_used, clippy::arithmetic_side_effects))]

pub mod cli;
pub mod commands;
pub mod logging;
pub mod settings;
pub mod transport;

use std::process::ExitCode;

use cfgbackup_blob::BlobError;
use clap::error::ErrorKind;
use clap::Parser;

use cli::{Cli, Command};
use settings::Settings;

/// What the user should try next after a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hint {
    /// Another key may work.
    RetryKey,
    /// The device served something this client cannot read.
    DeviceIssue,
}

impl Hint {
    /// One-line advice.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::RetryKey => "the key is probably wrong; retry with another key",
            Self::DeviceIssue => {
                "the device served a blob this client cannot read; check the device firmware"
            }
        }
    }
}

/// Classify `err` by the first [`BlobError`] in its chain.
#[must_use]
pub fn hint(err: &anyhow::Error) -> Option<Hint> {
    let blob_err = err.chain().find_map(|e| e.downcast_ref::<BlobError>())?;
    if blob_err.is_wrong_passphrase() {
        Some(Hint::RetryKey)
    } else if blob_err.is_structural() {
        Some(Hint::DeviceIssue)
    } else {
        None
    }
}

fn dispatch(cli: &Cli, settings: &Settings) -> anyhow::Result<()> {
    match &cli.command {
        Command::Decode(args) => commands::decode::execute(args, settings),
        Command::Encode(args) => commands::encode::execute(args),
    }
}

/// Parse arguments, run the subcommand and map the outcome to an exit code.
///
/// Usage errors exit with 1 like every other failure; `--help` and
/// `--version` exit with 0.
#[must_use]
pub fn run() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            // Nothing is left to report if stdout/stderr are gone.
            err.print().ok();
            return match err.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ExitCode::SUCCESS,
                _ => ExitCode::FAILURE,
            };
        }
    };
    let settings = Settings::load_optional(cli.config.as_deref());
    let level = cli.log_level.as_deref().unwrap_or(settings.log_level.as_str());
    let _guard = logging::init(level, settings.log_file.as_deref());

    match dispatch(&cli, &settings) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::debug!(error = ?err, "Command failed");
            eprintln!("error: {err:#}");
            if let Some(hint) = hint(&err) {
                eprintln!("hint: {}", hint.message());
            }
            ExitCode::FAILURE
        }
    }
}
