//! Data model for parsed alignments.
//!
//! This module contains the data structures shared by all readers:
//! - `SequenceLike`: the access contract for anything that behaves like a sequence
//! - `Sequence`: a named sequence with normalized residues
//! - `AlignmentCollection` / `AlignmentBuilder`: keyed store of sequence strings
//!
//! Readers never share mutable state: they accumulate into an owned
//! `AlignmentBuilder` and hand back an immutable `AlignmentCollection`.

use std::collections::HashMap;
use std::fmt;
use std::fs::File;
use std::io::{self, BufReader};
use std::path::Path;

use crate::formats::{a3m, fasta, stockholm};
use crate::residue::normalize_residues;

/// Sequence-like access: length, indexed residues, iteration, emptiness.
pub trait SequenceLike {
    /// The residues as a string slice.
    fn as_str(&self) -> &str;

    /// Returns the number of residues.
    fn len(&self) -> usize {
        self.as_str().chars().count()
    }

    /// Returns true if there are no residues.
    fn is_empty(&self) -> bool {
        self.as_str().is_empty()
    }

    /// Gets the residue at a specific position.
    fn residue_at(&self, pos: usize) -> Option<char> {
        self.as_str().chars().nth(pos)
    }

    /// Iterates over residues, first to last.
    fn residues(&self) -> std::str::Chars<'_> {
        self.as_str().chars()
    }
}

/// Represents a single sequence with its header and normalized residues.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sequence {
    header: String,
    residues: String,
}

impl Sequence {
    /// Creates a new sequence, normalizing the raw residues.
    ///
    /// See [`crate::residue`] for the normalization rules.
    pub fn new(header: impl Into<String>, raw: &str) -> Self {
        Self {
            header: header.into(),
            residues: normalize_residues(raw),
        }
    }

    /// The header (text after `>` in FASTA-like formats).
    pub fn header(&self) -> &str {
        &self.header
    }

    /// Consumes the sequence, returning `(header, residues)`.
    pub fn into_parts(self) -> (String, String) {
        (self.header, self.residues)
    }
}

impl SequenceLike for Sequence {
    fn as_str(&self) -> &str {
        &self.residues
    }

    // Normalized residues are ASCII, so byte length is residue count.
    fn len(&self) -> usize {
        self.residues.len()
    }

    fn residue_at(&self, pos: usize) -> Option<char> {
        self.residues.as_bytes().get(pos).map(|&b| b as char)
    }
}

impl fmt::Display for Sequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.residues)
    }
}

impl<'a> IntoIterator for &'a Sequence {
    type Item = char;
    type IntoIter = std::str::Chars<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.residues.chars()
    }
}

/// A keyed collection of sequence strings, indexed by sequence id.
///
/// Ids keep the order in which they were first seen. Values are raw or
/// normalized depending on which reader produced them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AlignmentCollection {
    order: Vec<String>,
    sequences: HashMap<String, String>,
}

impl AlignmentCollection {
    /// Returns the number of sequences.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Returns true if the collection is empty.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Gets a sequence by id.
    pub fn get(&self, id: &str) -> Option<&str> {
        self.sequences.get(id).map(String::as_str)
    }

    /// Returns true if `id` is present.
    pub fn contains(&self, id: &str) -> bool {
        self.sequences.contains_key(id)
    }

    /// Sequence ids, in first-seen order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    /// `(id, sequence)` pairs, in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.order.iter().map(move |id| {
            let seq = self.sequences.get(id).map(String::as_str).unwrap_or_default();
            (id.as_str(), seq)
        })
    }

    /// Returns every entry as a normalized [`Sequence`].
    pub fn to_sequences(&self) -> Vec<Sequence> {
        self.iter().map(|(id, seq)| Sequence::new(id, seq)).collect()
    }

    /// Reopens the collection for further accumulation.
    pub fn into_builder(self) -> AlignmentBuilder {
        AlignmentBuilder { inner: self }
    }
}

/// Accumulates sequences from one or more readers into an [`AlignmentCollection`].
///
/// Each reader applies its own merge policy: FASTA and A3M replace existing
/// entries, Stockholm appends fragments to them.
///
/// # Examples
///
/// ```no_run
/// use protaln::model::AlignmentBuilder;
///
/// let collection = AlignmentBuilder::new()
///     .read_sto("family.sto")?
///     .read_a3m("hits.a3m")?
///     .build();
/// println!("{} sequences", collection.len());
/// # Ok::<(), std::io::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct AlignmentBuilder {
    inner: AlignmentCollection,
}

impl AlignmentBuilder {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of sequences accumulated so far.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Returns true if nothing has been accumulated.
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Stores `sequence` under `id`, replacing any previous value.
    pub fn insert(&mut self, id: impl Into<String>, sequence: impl Into<String>) -> &mut Self {
        let id = id.into();
        if !self.inner.sequences.contains_key(&id) {
            self.inner.order.push(id.clone());
        }
        self.inner.sequences.insert(id, sequence.into());
        self
    }

    /// Appends `fragment` to the sequence stored under `id`, creating it if needed.
    pub fn append(&mut self, id: &str, fragment: &str) -> &mut Self {
        match self.inner.sequences.get_mut(id) {
            Some(existing) => existing.push_str(fragment),
            None => {
                self.inner.order.push(id.to_string());
                self.inner
                    .sequences
                    .insert(id.to_string(), fragment.to_string());
            }
        }
        self
    }

    /// Reads a FASTA file; sequences are stored raw.
    pub fn read_fasta<P: AsRef<Path>>(&mut self, path: P) -> io::Result<&mut Self> {
        let file = File::open(&path)?;
        let before = self.len();
        fasta::read_fasta_into(self, BufReader::new(file))?;
        log::debug!(
            "{}: FASTA, {} new ids",
            path.as_ref().display(),
            self.len() - before
        );
        Ok(self)
    }

    /// Reads an A3M file; gap dots are removed and residues upper-cased.
    pub fn read_a3m<P: AsRef<Path>>(&mut self, path: P) -> io::Result<&mut Self> {
        let file = File::open(&path)?;
        let before = self.len();
        a3m::read_a3m_into(self, BufReader::new(file))?;
        log::debug!(
            "{}: A3M, {} new ids",
            path.as_ref().display(),
            self.len() - before
        );
        Ok(self)
    }

    /// Reads a Stockholm file; fragments are appended per id, stored raw.
    pub fn read_sto<P: AsRef<Path>>(&mut self, path: P) -> io::Result<&mut Self> {
        let file = File::open(&path)?;
        let before = self.len();
        stockholm::read_stockholm_into(self, BufReader::new(file))?;
        log::debug!(
            "{}: Stockholm, {} new ids",
            path.as_ref().display(),
            self.len() - before
        );
        Ok(self)
    }

    /// Finishes accumulation.
    pub fn build(&mut self) -> AlignmentCollection {
        std::mem::take(&mut self.inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequence_normalized_on_construction() {
        let seq = Sequence::new("sp|P1|X", "mkv*b l");
        assert_eq!(seq.header(), "sp|P1|X");
        assert_eq!(seq.as_str(), "MKVUUL");
        assert_eq!(seq.to_string(), "MKVUUL");
    }

    #[test]
    fn test_sequence_like_access() {
        let seq = Sequence::new("s", "ACDE");
        assert_eq!(seq.len(), 4);
        assert!(!seq.is_empty());
        assert_eq!(seq.residue_at(0), Some('A'));
        assert_eq!(seq.residue_at(3), Some('E'));
        assert_eq!(seq.residue_at(4), None);
        assert_eq!(seq.residues().collect::<String>(), "ACDE");
        assert_eq!((&seq).into_iter().count(), 4);
    }

    #[test]
    fn test_sequence_empty() {
        assert!(Sequence::new("s", "").is_empty());
        assert!(Sequence::new("s", "**").is_empty());
        assert!(!Sequence::new("s", " ").is_empty());
    }

    #[test]
    fn test_builder_insert_replaces() {
        let mut builder = AlignmentBuilder::new();
        builder.insert("a", "AAA").insert("b", "CCC").insert("a", "GGG");
        let collection = builder.build();
        assert_eq!(collection.len(), 2);
        assert_eq!(collection.get("a"), Some("GGG"));
        assert_eq!(collection.ids().collect::<Vec<_>>(), vec!["a", "b"]);
    }

    #[test]
    fn test_builder_append_concatenates() {
        let mut builder = AlignmentBuilder::new();
        builder.append("a", "AA").append("b", "CC").append("a", "GG");
        let collection = builder.build();
        assert_eq!(collection.get("a"), Some("AAGG"));
        assert_eq!(collection.get("b"), Some("CC"));
        assert!(collection.contains("b"));
        assert!(!collection.contains("c"));
    }

    #[test]
    fn test_into_builder_continues() {
        let mut builder = AlignmentBuilder::new();
        builder.append("a", "AA");
        let mut builder = builder.build().into_builder();
        builder.append("a", "CC");
        assert_eq!(builder.build().get("a"), Some("AACC"));
    }

    #[test]
    fn test_to_sequences_normalizes() {
        let mut builder = AlignmentBuilder::new();
        builder.insert("x", "ac-d");
        let seqs = builder.build().to_sequences();
        assert_eq!(seqs.len(), 1);
        assert_eq!(seqs[0].header(), "x");
        assert_eq!(seqs[0].as_str(), "ACUD");
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = AlignmentBuilder::new()
            .read_fasta("test_data/does-not-exist.fasta")
            .unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn test_read_multiple_files_into_one_collection() {
        let collection = AlignmentBuilder::new()
            .read_sto("test_data/PF00571-mini.sto")
            .unwrap()
            .read_a3m("test_data/hits.a3m")
            .unwrap()
            .build();
        assert!(collection.contains("O83071/192-246"));
        assert!(collection.contains("query"));
        assert_eq!(collection.ids().next(), Some("O83071/192-246"));
    }
}
