//! `cfgbackup encode` — produce the blob a device would serve.

use std::fs;
use std::io::Write;

use anyhow::{bail, Context, Result};
use cfgbackup_blob::compression::compress;
use cfgbackup_blob::{seal, to_c_array, to_raw_literal_header, Compression, SealOptions};
use zeroize::Zeroizing;

use crate::cli::{EncodeArgs, KEY_ENV};

/// Shape of the encoded output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Render<'a> {
    /// Transit bytes as-is.
    Raw,
    /// `const uint8_t NAME[n] PROGMEM = {...};`
    CArray(&'a str),
    /// `const char NAME[] PROGMEM = R"rawliteral(...)rawliteral";`
    RawLiteral(&'a str),
}

impl<'a> Render<'a> {
    fn from_args(args: &'a EncodeArgs) -> Self {
        match (args.c_array.as_deref(), args.raw_literal.as_deref()) {
            (Some(name), _) => Self::CArray(name),
            (None, Some(name)) => Self::RawLiteral(name),
            (None, None) => Self::Raw,
        }
    }
}

/// Turn sealed transit text into the bytes to emit.
///
/// # Errors
///
/// Fails if the transit gzip layer cannot be produced.
pub fn render(transit: &str, gzip_transit: bool, render: Render<'_>) -> Result<Vec<u8>> {
    let transit_bytes = if gzip_transit {
        compress(transit.as_bytes(), Compression::Gzip)?
    } else {
        transit.as_bytes().to_vec()
    };
    Ok(match render {
        Render::Raw => transit_bytes,
        Render::CArray(name) => to_c_array(&transit_bytes, name).into_bytes(),
        Render::RawLiteral(name) => to_raw_literal_header(transit, name).into_bytes(),
    })
}

/// Run `encode`.
///
/// # Errors
///
/// Read, key, seal and write failures.
pub fn execute(args: &EncodeArgs) -> Result<()> {
    let content = Zeroizing::new(
        fs::read(&args.file).with_context(|| format!("cannot read {}", args.file.display()))?,
    );
    let key = Zeroizing::new(args.key.clone().unwrap_or_default());
    if args.scheme.scheme().requires_passphrase() && key.is_empty() {
        bail!("`{}` encryption requires a key (--key or {KEY_ENV})", args.scheme);
    }

    let compression = if args.no_compress {
        Compression::None
    } else {
        Compression::Gzip
    };
    let mut options = SealOptions::new(args.scheme, key.as_bytes()).with_compression(compression);
    let name = args.file.file_name().and_then(|n| n.to_str());
    if let (false, Some(name)) = (args.no_filename, name) {
        options = options.with_filename(name);
    }

    let transit = seal(&content, &options)?;
    let shape = Render::from_args(args);
    let out = render(&transit, args.gzip_transit, shape)?;
    tracing::info!(
        "Serve with X-Encryption-Type: {} and X-Compression-Type: {}",
        args.scheme,
        compression
    );

    match &args.output {
        Some(path) => {
            fs::write(path, &out).with_context(|| format!("cannot write {}", path.display()))?;
            eprintln!("Wrote {} bytes to {}", out.len(), path.display());
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(&out)?;
            // Gzipped raw output is binary; everything else is text.
            if !(args.gzip_transit && shape == Render::Raw) {
                stdout.write_all(b"\n")?;
            }
            stdout.flush()?;
        }
    }
    Ok(())
}
