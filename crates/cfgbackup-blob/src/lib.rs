//! `cfgbackup-blob` — the config backup blob format and its decode engine.
//!
//! A device serves its configuration file as base64 text plus an
//! `X-Encryption-Type` header (`none`, `xor` or `aes256`) and an optional
//! `X-Compression-Type` header. This crate turns that response back into the
//! original file and its name, and produces such blobs for the firmware.
//!
//! No network, no filesystem. Transport lives in the `cfgbackup` CLI.

#![cfg_attr(test, allow(clippy::unwrap_used, clippy::arithmetic_side_effects))]

pub mod blob;
pub mod compression;
pub mod engine;
pub mod error;
pub mod extract;
pub mod scheme;
pub mod seal;

pub use blob::{decode_transit, encode_transit, parse, parse_decoded, ParsedCiphertext};
pub use compression::{decompress, inflate_transit, Compression};
pub use engine::{
    decode, decode_response, DecodeRequest, COMPRESSION_HEADER, DEFAULT_RESOURCE_PATH,
    ENCRYPTION_HEADER,
};
pub use error::BlobError;
pub use extract::{default_filename, extract, ExtractedFile, DEFAULT_EXTENSION, FILENAME_MARKER};
pub use scheme::{lookup, BlobLayout, Scheme, SchemeId};
pub use seal::{seal, seal_with_header, to_c_array, to_raw_literal_header, SealOptions};
