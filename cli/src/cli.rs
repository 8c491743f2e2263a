//! Command-line definition.

use std::path::PathBuf;

use cfgbackup_blob::{Compression, SchemeId};
use clap::{Args, Parser, Subcommand};

/// Environment variable holding the passphrase.
pub const KEY_ENV: &str = "CFGBACKUP_KEY";

#[derive(Parser, Debug)]
#[command(
    name = "cfgbackup",
    version,
    long_version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("CFGBACKUP_BUILD_HASH"), ")"),
    about = "Decode and produce device config backup blobs"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Settings file (JSON).
    #[arg(long, global = true, env = "CFGBACKUP_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log filter (trace, debug, info, warn, error). Overrides the settings file.
    #[arg(long, global = true)]
    pub log_level: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Fetch or read a blob and recover the original file
    Decode(DecodeArgs),
    /// Produce a blob from a file, as the firmware build does
    Encode(EncodeArgs),
}

#[derive(Args, Debug)]
pub struct DecodeArgs {
    /// Blob file, device URL (`http://<device>/config.b64`) or bare device URL
    pub input: String,

    /// Passphrase for `xor` and `aes256` blobs
    #[arg(long, env = "CFGBACKUP_KEY", hide_env_values = true)]
    pub key: Option<String>,

    /// Encryption scheme; overrides the `X-Encryption-Type` header
    #[arg(long, value_parser = parse_scheme)]
    pub scheme: Option<SchemeId>,

    /// Payload compression; overrides the `X-Compression-Type` header
    #[arg(long, value_parser = parse_compression)]
    pub compression: Option<Compression>,

    /// Write to PATH, or to the embedded filename when PATH is omitted
    #[arg(short, long, num_args = 0..=1, value_name = "PATH")]
    pub output: Option<Option<PathBuf>>,
}

#[derive(Args, Debug)]
pub struct EncodeArgs {
    /// File to encode
    pub file: PathBuf,

    /// Encryption scheme
    #[arg(long, value_parser = parse_scheme, default_value = "none")]
    pub scheme: SchemeId,

    /// Passphrase for `xor` and `aes256`
    #[arg(long, env = "CFGBACKUP_KEY", hide_env_values = true)]
    pub key: Option<String>,

    /// Do not gzip the payload before encryption
    #[arg(long)]
    pub no_compress: bool,

    /// Do not embed the `# filename:` line
    #[arg(long)]
    pub no_filename: bool,

    /// Gzip the base64 text as well, as the firmware stores it
    #[arg(long)]
    pub gzip_transit: bool,

    /// Emit a C byte array with this name instead of raw output
    #[arg(long, value_name = "NAME", conflicts_with = "raw_literal")]
    pub c_array: Option<String>,

    /// Emit a header holding the base64 text as a raw string literal with this name
    #[arg(long, value_name = "NAME", conflicts_with = "gzip_transit")]
    pub raw_literal: Option<String>,

    /// Output file (stdout when omitted)
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,
}

fn parse_scheme(s: &str) -> Result<SchemeId, cfgbackup_blob::BlobError> {
    s.parse()
}

fn parse_compression(s: &str) -> Result<Compression, cfgbackup_blob::BlobError> {
    s.parse()
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn output_without_value_means_embedded() {
        let cli = Cli::try_parse_from(["cfgbackup", "decode", "blob.b64", "-o"]).unwrap();
        let Command::Decode(args) = cli.command else {
            panic!("expected decode");
        };
        assert_eq!(args.output, Some(None));
    }

    #[test]
    fn output_with_value() {
        let cli =
            Cli::try_parse_from(["cfgbackup", "decode", "blob.b64", "-o", "out.yaml"]).unwrap();
        let Command::Decode(args) = cli.command else {
            panic!("expected decode");
        };
        assert_eq!(args.output, Some(Some(PathBuf::from("out.yaml"))));
    }

    #[test]
    fn scheme_flag_is_validated() {
        let err = Cli::try_parse_from(["cfgbackup", "decode", "b", "--scheme", "rot13"]);
        assert!(err.is_err());
        let cli = Cli::try_parse_from(["cfgbackup", "decode", "b", "--scheme", "aes256"]).unwrap();
        let Command::Decode(args) = cli.command else {
            panic!("expected decode");
        };
        assert_eq!(args.scheme, Some(SchemeId::Aes256));
    }

    #[test]
    fn encode_defaults() {
        let cli = Cli::try_parse_from(["cfgbackup", "encode", "node.yaml"]).unwrap();
        let Command::Encode(args) = cli.command else {
            panic!("expected encode");
        };
        assert_eq!(args.scheme, SchemeId::Plain);
        assert!(!args.no_compress);
        assert!(args.c_array.is_none());
    }
}
