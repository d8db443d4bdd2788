//! Corpus file loading with encoding fallback
//!
//! Bytes are decoded as UTF-8 first, then latin-1, cp1252 and ascii in that
//! order. Latin-1 assigns a character to every byte, so in practice it ends
//! the chain; the remaining entries only matter if the order is changed.

use crate::error::InputError;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Text encodings tried when reading a corpus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Encoding {
    Utf8,
    Latin1,
    Windows1252,
    Ascii,
}

impl Encoding {
    /// Order in which encodings are attempted.
    pub const FALLBACK_ORDER: [Encoding; 4] = [
        Encoding::Utf8,
        Encoding::Latin1,
        Encoding::Windows1252,
        Encoding::Ascii,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Encoding::Utf8 => "utf-8",
            Encoding::Latin1 => "latin-1",
            Encoding::Windows1252 => "cp1252",
            Encoding::Ascii => "ascii",
        }
    }

    /// Decode `bytes`, or `None` if they are not valid in this encoding.
    pub fn decode(&self, bytes: &[u8]) -> Option<String> {
        match self {
            Encoding::Utf8 => {
                let bytes = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);
                std::str::from_utf8(bytes).ok().map(str::to_owned)
            }
            Encoding::Latin1 => Some(bytes.iter().map(|&b| b as char).collect()),
            Encoding::Windows1252 => bytes.iter().map(|&b| cp1252_char(b)).collect(),
            Encoding::Ascii => bytes
                .iter()
                .map(|&b| b.is_ascii().then_some(b as char))
                .collect(),
        }
    }
}

impl std::fmt::Display for Encoding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Map one cp1252 byte to its character. Five bytes in 0x80..=0x9F are unassigned.
fn cp1252_char(byte: u8) -> Option<char> {
    const HIGH: [Option<char>; 32] = [
        Some('\u{20AC}'),
        None,
        Some('\u{201A}'),
        Some('\u{0192}'),
        Some('\u{201E}'),
        Some('\u{2026}'),
        Some('\u{2020}'),
        Some('\u{2021}'),
        Some('\u{02C6}'),
        Some('\u{2030}'),
        Some('\u{0160}'),
        Some('\u{2039}'),
        Some('\u{0152}'),
        None,
        Some('\u{017D}'),
        None,
        None,
        Some('\u{2018}'),
        Some('\u{2019}'),
        Some('\u{201C}'),
        Some('\u{201D}'),
        Some('\u{2022}'),
        Some('\u{2013}'),
        Some('\u{2014}'),
        Some('\u{02DC}'),
        Some('\u{2122}'),
        Some('\u{0161}'),
        Some('\u{203A}'),
        Some('\u{0153}'),
        None,
        Some('\u{017E}'),
        Some('\u{0178}'),
    ];
    match byte {
        0x80..=0x9F => HIGH[(byte - 0x80) as usize],
        _ => Some(byte as char),
    }
}

/// A decoded corpus file.
#[derive(Debug, Clone)]
pub struct CorpusText {
    pub path: PathBuf,
    pub encoding: Encoding,
    pub text: String,
}

/// Decode raw bytes with the fallback chain, returning the first success.
pub fn decode_with_fallback(bytes: &[u8]) -> Option<(Encoding, String)> {
    Encoding::FALLBACK_ORDER
        .iter()
        .find_map(|enc| enc.decode(bytes).map(|text| (*enc, text)))
}

/// Read a corpus file from disk.
pub fn read_corpus(path: &Path) -> Result<CorpusText, InputError> {
    if !path.exists() {
        return Err(InputError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let bytes = std::fs::read(path).map_err(|source| InputError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let (encoding, text) = decode_with_fallback(&bytes).ok_or_else(|| InputError::Decode {
        path: path.to_path_buf(),
        tried: Encoding::FALLBACK_ORDER
            .iter()
            .map(Encoding::name)
            .collect::<Vec<_>>()
            .join(", "),
    })?;

    debug!(
        "Read {} bytes from {} as {}",
        bytes.len(),
        path.display(),
        encoding
    );

    Ok(CorpusText {
        path: path.to_path_buf(),
        encoding,
        text,
    })
}
