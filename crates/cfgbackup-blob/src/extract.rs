//! Content extractor — recovers the original filename from the first line.
//!
//! The device may prepend a single metadata line to the file before encoding:
//!
//! ```text
//! # filename: living-room.yaml
//! <original file content>
//! ```
//!
//! Only the first line is ever inspected. A file whose own first line
//! happens to start with `# filename:` loses that line to the extractor;
//! there is no escaping mechanism in the format.

/// Marker prefix of the metadata line (matched after trimming the line).
pub const FILENAME_MARKER: &str = "# filename:";

/// Extension appended to the host name when no filename is embedded.
pub const DEFAULT_EXTENSION: &str = "yaml";

/// Stem used when the host name is unknown.
pub const FALLBACK_STEM: &str = "download";

/// A recovered file: content plus the name to save it under.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ExtractedFile {
    /// Embedded name if present and non-empty, otherwise the caller's default.
    pub filename: Option<String>,
    /// File content (the metadata line, when present, is removed).
    pub content: Vec<u8>,
    /// `true` when a metadata line was found and consumed.
    pub embedded: bool,
}

impl ExtractedFile {
    /// Filename, or `fallback` when neither an embedded nor a default name exists.
    #[must_use]
    pub fn filename_or<'a>(&'a self, fallback: &'a str) -> &'a str {
        self.filename.as_deref().unwrap_or(fallback)
    }

    /// Content as text, replacing invalid UTF-8 sequences.
    #[must_use]
    pub fn content_lossy(&self) -> std::borrow::Cow<'_, str> {
        String::from_utf8_lossy(&self.content)
    }
}

/// Name the web UI would give a download from `host`: `<host>.<extension>`,
/// or `download.<extension>` when `host` is empty.
#[must_use]
pub fn default_filename(host: &str, extension: &str) -> String {
    let stem = match host.trim() {
        "" => FALLBACK_STEM,
        h => h,
    };
    format!("{stem}.{extension}")
}

fn marker_name(first_line: &[u8]) -> Option<&str> {
    let line = std::str::from_utf8(first_line).ok()?.trim();
    line.strip_prefix(FILENAME_MARKER).map(str::trim)
}

/// Split `plaintext` into an optional embedded filename and the content.
///
/// - No `\n` anywhere: no metadata, the whole plaintext is content.
/// - First line (trimmed, UTF-8) starts with [`FILENAME_MARKER`]: the rest of
///   that line (trimmed) is the filename and everything after the first
///   `\n` is content. An empty name falls back to `default_filename`.
/// - Otherwise the whole plaintext is content under `default_filename`.
///
/// Never fails; a plaintext that is not text simply carries no metadata.
#[must_use]
pub fn extract(plaintext: &[u8], default_filename: Option<&str>) -> ExtractedFile {
    let fallback = || default_filename.map(str::to_owned);

    let Some(newline) = plaintext.iter().position(|&b| b == b'\n') else {
        return ExtractedFile {
            filename: fallback(),
            content: plaintext.to_vec(),
            embedded: false,
        };
    };

    let (first_line, rest) = plaintext.split_at(newline);
    match marker_name(first_line) {
        Some(name) => ExtractedFile {
            filename: if name.is_empty() {
                fallback()
            } else {
                Some(name.to_owned())
            },
            // `rest` starts with the newline itself.
            content: rest.get(1..).unwrap_or_default().to_vec(),
            embedded: true,
        },
        None => ExtractedFile {
            filename: fallback(),
            content: plaintext.to_vec(),
            embedded: false,
        },
    }
}

/// Prepend the metadata line for `filename` to `content`.
#[must_use]
pub fn embed_filename(content: &[u8], filename: &str) -> Vec<u8> {
    let header = format!("{FILENAME_MARKER} {filename}\n");
    let mut out = Vec::with_capacity(header.len().saturating_add(content.len()));
    out.extend_from_slice(header.as_bytes());
    out.extend_from_slice(content);
    out
}
