//! FASTA file parser.
//!
//! This module handles reading FASTA format files, either into normalized
//! [`Sequence`]s or, raw, into an [`AlignmentBuilder`].
//! It supports both single-line and multi-line sequences.
//!
//! ## FASTA Format
//!
//! ```text
//! >sequence_identifier optional description
//! MKVLAAGIVG...
//! >another_sequence
//! MSTNPKPQRK...
//! ```
//!
//! The whole trimmed line after `>` is the header. Lines before the first
//! header are ignored, so a file without any header yields nothing.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use crate::model::{AlignmentBuilder, Sequence};

/// How body lines are joined into a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum BodyLines {
    /// Only the line terminator is removed.
    Verbatim,
    /// Surrounding whitespace is removed from every line.
    Trimmed,
}

/// Walks the `>`-delimited records of a FASTA-like source.
///
/// `on_record` receives each `(header, body)` in file order.
pub(crate) fn for_each_record<R, F>(reader: R, body_lines: BodyLines, mut on_record: F) -> io::Result<()>
where
    R: BufRead,
    F: FnMut(String, String),
{
    let mut current: Option<(String, String)> = None;

    for line in reader.lines() {
        let line = line?;

        if let Some(header) = line.strip_prefix('>') {
            if let Some((id, body)) = current.take() {
                on_record(id, body);
            }
            current = Some((header.trim().to_string(), String::new()));
        } else if let Some((_, body)) = current.as_mut() {
            match body_lines {
                BodyLines::Verbatim => body.push_str(&line),
                BodyLines::Trimmed => body.push_str(line.trim()),
            }
        }
    }

    // Don't forget the last record
    if let Some((id, body)) = current {
        on_record(id, body);
    }

    Ok(())
}

/// Parses a FASTA file into normalized sequences.
///
/// # Examples
///
/// ```no_run
/// use protaln::formats::fasta::parse_fasta_file;
/// use protaln::model::SequenceLike;
///
/// let sequences = parse_fasta_file("proteins.fasta").unwrap();
/// for seq in &sequences {
///     println!("{}: {} residues", seq.header(), seq.len());
/// }
/// ```
pub fn parse_fasta_file<P: AsRef<Path>>(path: P) -> io::Result<Vec<Sequence>> {
    let file = File::open(path)?;
    parse_fasta(BufReader::new(file))
}

/// Parses FASTA content from a reader into normalized sequences.
///
/// Records with the same header are kept as separate entries.
pub fn parse_fasta<R: BufRead>(reader: R) -> io::Result<Vec<Sequence>> {
    let mut sequences = Vec::new();
    for_each_record(reader, BodyLines::Verbatim, |header, body| {
        sequences.push(Sequence::new(header, &body));
    })?;
    Ok(sequences)
}

/// Parses FASTA content from a string.
///
/// Useful for testing or processing in-memory data.
pub fn parse_fasta_str(content: &str) -> Vec<Sequence> {
    // Reading from a byte slice cannot fail.
    parse_fasta(content.as_bytes()).unwrap_or_default()
}

/// Reads FASTA records into `builder`, raw.
///
/// Body lines are trimmed and joined; an existing id is replaced.
pub fn read_fasta_into<R: BufRead>(builder: &mut AlignmentBuilder, reader: R) -> io::Result<()> {
    for_each_record(reader, BodyLines::Trimmed, |id, body| {
        builder.insert(id, body);
    })
}
