//! Multi-format alignment file parser.
//!
//! Supports automatic format detection for:
//! - FASTA (.fasta, .fa, .fas, .faa, .fna)
//! - A3M (.a3m)
//! - Stockholm (.sto, .stk, .stockholm)
//! - FoldSeek tabular output (.m8)
//!
//! Format detection priority:
//! 1. Explicit format specification (-f option)
//! 2. File extension
//! 3. Content-based detection
//!
//! Content detection cannot tell A3M from FASTA; A3M input without a
//! `.a3m` extension has to be forced.

pub mod a3m;
pub mod fasta;
pub mod m8;
pub mod stockholm;

use std::ffi::OsStr;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use thiserror::Error;

use crate::model::{AlignmentBuilder, AlignmentCollection};
use m8::{M8Parser, StructuralAlignment};

/// Detected file format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Fasta,
    A3m,
    Stockholm,
    M8,
}

impl FileFormat {
    /// True for the formats that produce an [`AlignmentCollection`].
    pub fn is_alignment(self) -> bool {
        !matches!(self, FileFormat::M8)
    }
}

impl std::fmt::Display for FileFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FileFormat::Fasta => write!(f, "FASTA"),
            FileFormat::A3m => write!(f, "A3M"),
            FileFormat::Stockholm => write!(f, "Stockholm"),
            FileFormat::M8 => write!(f, "FoldSeek m8"),
        }
    }
}

/// Errors that can occur during file parsing.
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("Failed to open file: {0}")]
    IoError(#[from] io::Error),

    #[error("Empty file")]
    EmptyFile,

    #[error("Could not determine file format.\n\
             Hint: Use -f/--format to specify the format explicitly:\n  \
             protaln -f fasta <file>   # FASTA format\n  \
             protaln -f a3m <file>     # A3M format\n  \
             protaln -f sto <file>     # Stockholm format\n  \
             protaln -f m8 <file>      # FoldSeek tabular format")]
    UnknownFormat,

    #[error("m8 error: {0}")]
    M8Error(#[from] m8::M8Error),
}

/// Result type for parsing operations.
pub type ParseResult<T> = Result<T, ParseError>;

/// What a file parsed into.
#[derive(Debug, Clone)]
pub enum ParsedFile {
    /// FASTA, A3M, Stockholm
    Alignment(AlignmentCollection),
    /// FoldSeek m8
    Structural(Vec<StructuralAlignment>),
}

/// Detects format from file extension.
pub fn detect_format_from_extension<P: AsRef<Path>>(path: P) -> Option<FileFormat> {
    let ext = path.as_ref().extension().and_then(OsStr::to_str)?;
    match ext.to_lowercase().as_str() {
        "fa" | "fas" | "fasta" | "faa" | "fna" => Some(FileFormat::Fasta),
        "a3m" => Some(FileFormat::A3m),
        "sto" | "stk" | "stockholm" => Some(FileFormat::Stockholm),
        "m8" => Some(FileFormat::M8),
        _ => None,
    }
}

/// Detects the file format from its first non-empty line.
pub fn detect_format_from_line(line: &str) -> Option<FileFormat> {
    if line.starts_with("# STOCKHOLM") {
        return Some(FileFormat::Stockholm);
    }
    if line.starts_with('>') {
        return Some(FileFormat::Fasta);
    }
    let fields = line.trim_end().split('\t').count();
    if fields == m8::FULL_FIELD_COUNT || fields == m8::REDUCED_FIELD_COUNT {
        return Some(FileFormat::M8);
    }
    None
}

/// Detects the file format by examining the content.
pub fn detect_format_from_content<R: BufRead>(reader: R) -> ParseResult<FileFormat> {
    for line in reader.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        // First non-empty line decides
        return detect_format_from_line(&line).ok_or(ParseError::UnknownFormat);
    }
    Err(ParseError::EmptyFile)
}

/// Picks the format for `path`: forced, then extension, then content.
pub fn resolve_format<P: AsRef<Path>>(path: P, forced_format: Option<FileFormat>) -> ParseResult<FileFormat> {
    if let Some(format) = forced_format {
        return Ok(format);
    }
    if let Some(format) = detect_format_from_extension(&path) {
        return Ok(format);
    }
    let file = File::open(&path)?;
    detect_format_from_content(BufReader::new(file))
}

/// Reads an alignment file into `builder` using that format's merge policy.
///
/// m8 files do not hold alignments and are rejected with `UnknownFormat`.
pub fn read_alignment_into<P: AsRef<Path>>(
    builder: &mut AlignmentBuilder,
    path: P,
    format: FileFormat,
) -> ParseResult<()> {
    match format {
        FileFormat::Fasta => builder.read_fasta(path)?,
        FileFormat::A3m => builder.read_a3m(path)?,
        FileFormat::Stockholm => builder.read_sto(path)?,
        FileFormat::M8 => return Err(ParseError::UnknownFormat),
    };
    Ok(())
}

/// Parses a file with optional format specification.
pub fn parse_file_with_options<P: AsRef<Path>>(
    path: P,
    forced_format: Option<FileFormat>,
) -> ParseResult<ParsedFile> {
    let format = resolve_format(&path, forced_format)?;
    log::debug!("{}: reading as {}", path.as_ref().display(), format);

    if format == FileFormat::M8 {
        let records = M8Parser::from_path(&path)?.parse()?;
        return Ok(ParsedFile::Structural(records));
    }

    let mut builder = AlignmentBuilder::new();
    read_alignment_into(&mut builder, &path, format)?;
    Ok(ParsedFile::Alignment(builder.build()))
}

/// Parses a file, automatically detecting the format.
/// Convenience wrapper around parse_file_with_options.
pub fn parse_file<P: AsRef<Path>>(path: P) -> ParseResult<ParsedFile> {
    parse_file_with_options(path, None)
}

/// Parses a file with explicit format specification.
pub fn parse_file_as<P: AsRef<Path>>(path: P, format: FileFormat) -> ParseResult<ParsedFile> {
    parse_file_with_options(path, Some(format))
}
