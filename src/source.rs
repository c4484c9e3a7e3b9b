use crate::models::Archive;
use crate::{json, xml};
use anyhow::{bail, Context, Result};
use bzip2::read::BzDecoder;
use clap::ValueEnum;
use std::fmt;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use tracing::{info, warn};

const BZ2_EXTENSION: &str = ".bz2";

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Encoding of an archive document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Xml,
    Json,
}

impl Format {
    /// Detects the format from the file name, ignoring a trailing `.bz2`.
    pub fn from_path(path: &Path) -> Option<Self> {
        let name = path.file_name()?.to_str()?.to_ascii_lowercase();
        let name = name.strip_suffix(BZ2_EXTENSION).unwrap_or(&name);
        if name.ends_with(".xml") {
            Some(Format::Xml)
        } else if name.ends_with(".json") {
            Some(Format::Json)
        } else {
            None
        }
    }

    /// Guesses the format from the first non-whitespace byte.
    pub fn sniff(document: &[u8]) -> Option<Self> {
        match document.iter().find(|b| !b.is_ascii_whitespace())? {
            b'<' => Some(Format::Xml),
            b'{' | b'[' => Some(Format::Json),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Format::Xml => "XML",
            Format::Json => "JSON",
        }
    }

    fn parse(self, document: &[u8]) -> Result<Archive> {
        match self {
            Format::Xml => xml::parse_archive(document),
            Format::Json => {
                let text =
                    std::str::from_utf8(document).context("JSON document is not valid UTF-8")?;
                json::parse_archive(text)
            }
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn is_bz2(path: &Path) -> bool {
    path.to_str()
        .map(|p| p.to_ascii_lowercase().ends_with(BZ2_EXTENSION))
        .unwrap_or(false)
}

/// Reads the whole document into memory, decompressing `.bz2` input and
/// dropping a UTF-8 byte order mark. Character decoding is left to the parser.
///
/// The file handle is closed before this returns.
pub fn read_document(path: &Path) -> Result<Vec<u8>> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open input file: {}", path.display()))?;

    let mut reader: Box<dyn Read> = if is_bz2(path) {
        Box::new(BzDecoder::new(BufReader::new(file)))
    } else {
        Box::new(BufReader::new(file))
    };

    let mut document = Vec::new();
    reader
        .read_to_end(&mut document)
        .with_context(|| format!("Failed to read input file: {}", path.display()))?;

    if document.starts_with(UTF8_BOM) {
        document.drain(..UTF8_BOM.len());
    }
    Ok(document)
}

impl Archive {
    pub fn from_xml_str(text: &str) -> Result<Self> {
        xml::parse_archive(text.as_bytes())
    }

    pub fn from_json_str(text: &str) -> Result<Self> {
        json::parse_archive(text)
    }

    /// Loads an archive, taking the format from `format`, then the file name,
    /// then the content itself.
    pub fn load(path: impl AsRef<Path>, format: Option<Format>) -> Result<Self> {
        let path = path.as_ref();
        let document = read_document(path)?;

        let format = match format
            .or_else(|| Format::from_path(path))
            .or_else(|| Format::sniff(&document))
        {
            Some(format) => format,
            None => bail!("Unable to detect document format of {}", path.display()),
        };

        let archive = format
            .parse(&document)
            .with_context(|| format!("Failed to parse {} as {}", path.display(), format))?;

        info!(
            path = %path.display(),
            format = %format,
            artefacts = archive.artefacts().len(),
            individuals = archive.individuals().len(),
            "Loaded archive"
        );
        Ok(archive)
    }

    pub fn load_xml(path: impl AsRef<Path>) -> Result<Self> {
        Self::load(path, Some(Format::Xml))
    }

    pub fn load_json(path: impl AsRef<Path>) -> Result<Self> {
        Self::load(path, Some(Format::Json))
    }

    /// Like [`Archive::load`], but an unreadable input is logged and read as
    /// an empty archive.
    pub fn open(path: impl AsRef<Path>, format: Option<Format>) -> Self {
        let path = path.as_ref();
        match Self::load(path, format) {
            Ok(archive) => archive,
            Err(e) => {
                let message = format!("{:#}", e);
                warn!(
                    path = %path.display(),
                    error = %message,
                    "Input unreadable, continuing with an empty archive"
                );
                Self::default()
            }
        }
    }

    pub fn open_xml(path: impl AsRef<Path>) -> Self {
        Self::open(path, Some(Format::Xml))
    }

    pub fn open_json(path: impl AsRef<Path>) -> Self {
        Self::open(path, Some(Format::Json))
    }
}
