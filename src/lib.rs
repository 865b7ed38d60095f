//! # protaln - Protein Alignment Readers
//!
//! Readers for the alignment files produced by protein search pipelines,
//! normalized into in-memory records.
//!
//! ## Architecture
//!
//! - `residue`: residue alphabet and normalization rules
//! - `model`: `Sequence`, the `SequenceLike` contract, and the keyed
//!   `AlignmentCollection` with its `AlignmentBuilder`
//! - `formats`: FASTA, A3M, Stockholm and FoldSeek `.m8` readers, plus
//!   format detection
//!
//! Everything is synchronous and single-pass: each reader opens its file,
//! reads it once, and closes it before returning.
//!
//! ## Example
//!
//! ```no_run
//! use protaln::formats::m8::M8Parser;
//! use protaln::model::AlignmentBuilder;
//!
//! # fn main() -> anyhow::Result<()> {
//! let msa = AlignmentBuilder::new().read_sto("PF00571.sto")?.build();
//! let hits = M8Parser::from_path("aln.m8")?.parse()?;
//! println!("{} sequences, {} structural hits", msa.len(), hits.len());
//! # Ok(())
//! # }
//! ```

pub mod formats;
pub mod model;
pub mod residue;
