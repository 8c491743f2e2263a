//! `cfgbackup decode` — obtain a blob, recover the file, save or print it.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{bail, Context, Result};
use cfgbackup_blob::{
    decode_response, default_filename, BlobError, Compression, ExtractedFile, SchemeId,
};
use zeroize::Zeroizing;

use crate::cli::{DecodeArgs, KEY_ENV};
use crate::settings::Settings;
use crate::transport;
use crate::Hint;

/// Where recovered content goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    /// Print to stdout.
    Stdout,
    /// Write to the filename embedded in the blob.
    Embedded,
    /// Write to an explicit path.
    Path(PathBuf),
}

impl From<Option<Option<PathBuf>>> for Target {
    fn from(output: Option<Option<PathBuf>>) -> Self {
        match output {
            None => Self::Stdout,
            Some(None) => Self::Embedded,
            Some(Some(path)) => Self::Path(path),
        }
    }
}

/// Flag wins over header; an absent header means `none`.
///
/// # Errors
///
/// Returns [`BlobError::UnknownScheme`] for an unrecognized header value.
pub fn resolve_scheme(
    flag: Option<SchemeId>,
    header: Option<&str>,
) -> Result<SchemeId, BlobError> {
    flag.map_or_else(|| SchemeId::from_header(header), Ok)
}

/// Flag wins over header; an absent header means `none`.
///
/// # Errors
///
/// Returns [`BlobError::UnknownCompression`] for an unrecognized header value.
pub fn resolve_compression(
    flag: Option<Compression>,
    header: Option<&str>,
) -> Result<Compression, BlobError> {
    flag.map_or_else(|| Compression::from_header(header), Ok)
}

/// Fail early when `scheme` needs a key and none was given.
///
/// # Errors
///
/// Returns an error naming the flag and environment variable to use.
pub fn check_key(scheme: SchemeId, key: &str) -> Result<()> {
    if scheme.scheme().requires_passphrase() && key.is_empty() {
        bail!("`{scheme}` encryption requires a key (--key or {KEY_ENV})");
    }
    if !scheme.scheme().requires_passphrase() && !key.is_empty() {
        tracing::warn!("A key was supplied but the blob is not encrypted; ignoring it");
    }
    Ok(())
}

/// Reduce an embedded filename to its final component.
///
/// The name comes from the decrypted payload and is not trusted to pick a
/// directory.
#[must_use]
pub fn safe_file_name(name: &str) -> Option<PathBuf> {
    let base = Path::new(name).file_name()?;
    Some(PathBuf::from(base))
}

/// `true` when `xor` output shows no metadata line.
///
/// A wrong `xor` key never fails the cipher step; the only sign is that the
/// `# filename:` line the device writes is missing from the output.
#[must_use]
pub fn suspect_wrong_key(scheme: SchemeId, file: &ExtractedFile) -> bool {
    scheme == SchemeId::Xor && !file.embedded
}

/// Resolve the path to write to, or `None` for stdout.
///
/// # Errors
///
/// Fails for [`Target::Embedded`] when the blob carries no usable name.
pub fn output_path(
    target: &Target,
    scheme: SchemeId,
    file: &ExtractedFile,
) -> Result<Option<PathBuf>> {
    match target {
        Target::Stdout => Ok(None),
        Target::Path(path) => Ok(Some(path.clone())),
        Target::Embedded => {
            let Some(name) = file.filename.as_deref().filter(|_| file.embedded) else {
                if suspect_wrong_key(scheme, file) {
                    bail!(
                        "xor output carries no filename metadata; {}",
                        Hint::RetryKey.message()
                    );
                }
                bail!("blob carries no embedded filename; pass -o PATH");
            };
            safe_file_name(name)
                .map(Some)
                .with_context(|| format!("embedded filename {name:?} is not a file name"))
        }
    }
}

/// Run `decode`.
///
/// # Errors
///
/// Transport, key, decode and write failures. Decode failures keep their
/// [`BlobError`] so the caller can classify them.
pub fn execute(args: &DecodeArgs, settings: &Settings) -> Result<()> {
    let fetched = transport::fetch(
        &args.input,
        &settings.resource_path,
        Duration::from_secs(settings.timeout_secs),
    )?;

    let scheme = resolve_scheme(args.scheme, fetched.encryption.as_deref())?;
    let compression = resolve_compression(args.compression, fetched.compression.as_deref())?;
    let key = Zeroizing::new(args.key.clone().unwrap_or_default());
    check_key(scheme, &key)?;

    let fallback = default_filename(
        fetched.host.as_deref().unwrap_or_default(),
        &settings.default_extension,
    );
    // Flags were already folded into `scheme` and `compression`.
    let file = decode_response(
        &fetched.body,
        Some(scheme.as_str()),
        Some(compression.as_str()),
        key.as_bytes(),
        Some(&fallback),
    )?;
    tracing::info!(
        scheme = %scheme,
        filename = file.filename_or(&fallback),
        bytes = file.content.len(),
        "Config recovered"
    );

    let target = Target::from(args.output.clone());
    if target != Target::Embedded && suspect_wrong_key(scheme, &file) {
        tracing::warn!("No filename metadata in xor output");
        eprintln!("hint: {}", Hint::RetryKey.message());
    }

    match output_path(&target, scheme, &file)? {
        Some(path) => {
            fs::write(&path, &file.content)
                .with_context(|| format!("cannot write {}", path.display()))?;
            eprintln!("Wrote {} bytes to {}", file.content.len(), path.display());
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(file.content_lossy().as_bytes())?;
            stdout.flush()?;
        }
    }
    Ok(())
}
