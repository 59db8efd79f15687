// `.env` file loading with text-encoding fallback
// Author: kelexine (https://github.com/kelexine)

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Text encodings tried, in order, when decoding a `.env` file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextEncoding {
    Utf8,
    /// UTF-8 with a leading byte-order mark.
    Utf8Sig,
    Latin1,
}

impl TextEncoding {
    pub const CANDIDATES: [TextEncoding; 3] =
        [TextEncoding::Utf8, TextEncoding::Utf8Sig, TextEncoding::Latin1];

    pub fn as_str(&self) -> &'static str {
        match self {
            TextEncoding::Utf8 => "utf-8",
            TextEncoding::Utf8Sig => "utf-8-sig",
            TextEncoding::Latin1 => "latin-1",
        }
    }

    pub fn decode(&self, bytes: &[u8]) -> Option<String> {
        match self {
            TextEncoding::Utf8 => std::str::from_utf8(bytes).ok().map(str::to_string),
            TextEncoding::Utf8Sig => {
                let body = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
                std::str::from_utf8(body).ok().map(str::to_string)
            }
            // Every byte maps to the code point of the same value.
            TextEncoding::Latin1 => Some(bytes.iter().map(|&b| b as char).collect()),
        }
    }
}

impl fmt::Display for TextEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Decode with the first candidate encoding that accepts the bytes.
pub fn decode_with_fallback(bytes: &[u8]) -> Option<(TextEncoding, String)> {
    TextEncoding::CANDIDATES
        .iter()
        .find_map(|enc| enc.decode(bytes).map(|text| (*enc, text)))
}

/// Variables read from a `.env` file.
#[derive(Debug, Clone, Default)]
pub struct EnvFile {
    pub path: PathBuf,
    pub encoding: Option<TextEncoding>,
    vars: HashMap<String, String>,
}

impl EnvFile {
    /// Read and parse `path`. A missing or undecodable file yields `None`.
    pub fn load(path: &Path) -> Option<Self> {
        let bytes = std::fs::read(path).ok()?;
        let (encoding, text) = decode_with_fallback(&bytes)?;

        Some(Self {
            path: path.to_path_buf(),
            encoding: Some(encoding),
            vars: parse(&text),
        })
    }

    pub fn from_vars(vars: HashMap<String, String>) -> Self {
        Self {
            vars,
            ..Self::default()
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.vars.get(name).map(String::as_str)
    }

    pub fn vars(&self) -> &HashMap<String, String> {
        &self.vars
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}

/// Parse `KEY=VALUE` lines. Supports `#` comments, an optional `export `
/// prefix, and single or double quoted values.
pub fn parse(contents: &str) -> HashMap<String, String> {
    let contents = contents.strip_prefix('\u{feff}').unwrap_or(contents);
    let mut vars = HashMap::new();

    for line in contents.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let line = line.strip_prefix("export ").unwrap_or(line);
        let Some((key, value)) = line.split_once('=') else {
            continue;
        };

        let key = key.trim();
        if key.is_empty() {
            continue;
        }

        vars.insert(key.to_string(), parse_value(value.trim()));
    }

    vars
}

fn parse_value(raw: &str) -> String {
    // Quoted values end at the closing quote; anything after it is ignored
    for quote in ['"', '\''] {
        if let Some(rest) = raw.strip_prefix(quote) {
            if let Some(end) = rest.find(quote) {
                return rest[..end].to_string();
            }
        }
    }

    // Unquoted values may carry a trailing comment
    match raw.find(" #") {
        Some(pos) => raw[..pos].trim_end().to_string(),
        None => raw.to_string(),
    }
}
