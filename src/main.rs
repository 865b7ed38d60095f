//! protaln - read and normalize protein alignment files
//!
//! ## Usage
//!
//! ```bash
//! protaln family.sto hits.a3m            # merge into one FASTA on stdout
//! protaln -n -o merged.fasta family.sto  # normalized residues, to a file
//! protaln -a aln.m8                      # FoldSeek hits with aligned strings
//! protaln -f a3m msa.txt                 # force a format
//! ```
//!
//! Set `RUST_LOG=debug` to see what each reader did.

// Use jemalloc for better memory management (returns memory to OS)
#[cfg(not(windows))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};

use protaln::formats::m8::{M8Parser, StructuralAlignment};
use protaln::formats::{read_alignment_into, resolve_format, FileFormat};
use protaln::model::{AlignmentBuilder, AlignmentCollection, SequenceLike};

/// File format specification for command line
#[derive(Debug, Clone, Copy, ValueEnum)]
enum FormatArg {
    /// FASTA format
    Fasta,
    /// A3M format
    A3m,
    /// Stockholm format
    Sto,
    /// FoldSeek tabular format
    M8,
    /// Auto-detect from extension and content
    Auto,
}

impl From<FormatArg> for Option<FileFormat> {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Fasta => Some(FileFormat::Fasta),
            FormatArg::A3m => Some(FileFormat::A3m),
            FormatArg::Sto => Some(FileFormat::Stockholm),
            FormatArg::M8 => Some(FileFormat::M8),
            FormatArg::Auto => None,
        }
    }
}

/// protaln - read FASTA, A3M, Stockholm and FoldSeek .m8 files
///
/// Alignment inputs are merged into a single collection and written as FASTA.
/// FoldSeek inputs are written as one summary line per hit.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Input files
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Force a specific file format (overrides auto-detection)
    #[arg(short = 'f', long = "format", value_enum, default_value = "auto")]
    format: FormatArg,

    /// Output file. Use "-" for stdout.
    #[arg(short = 'o', long = "output", default_value = "-")]
    output: String,

    /// Write normalized residues instead of the stored sequences
    #[arg(short = 'n', long = "normalize")]
    normalize: bool,

    /// Show aligned query/target strings for FoldSeek hits
    #[arg(short = 'a', long = "show-alignments")]
    show_alignments: bool,
}

fn write_collection<W: Write>(out: &mut W, collection: &AlignmentCollection, normalize: bool) -> io::Result<()> {
    if normalize {
        for seq in collection.to_sequences() {
            writeln!(out, ">{}", seq.header())?;
            writeln!(out, "{}", seq.as_str())?;
        }
    } else {
        for (id, seq) in collection.iter() {
            writeln!(out, ">{}", id)?;
            writeln!(out, "{}", seq)?;
        }
    }
    Ok(())
}

fn write_hits<W: Write>(out: &mut W, hits: &[StructuralAlignment], show_alignments: bool) -> io::Result<()> {
    for hit in hits {
        writeln!(out, "{}", hit)?;
        if show_alignments {
            writeln!(out, "{}", hit.render_alignment())?;
        }
    }
    Ok(())
}

fn run<W: Write>(args: &Args, out: &mut W) -> Result<()> {
    let forced_format: Option<FileFormat> = args.format.into();
    let mut builder = AlignmentBuilder::new();
    let mut hits = Vec::new();

    for path in &args.files {
        let format = resolve_format(path, forced_format)
            .with_context(|| format!("Cannot read {}", path.display()))?;
        log::info!("Reading {} as {}", path.display(), format);

        if format.is_alignment() {
            read_alignment_into(&mut builder, path, format)
                .with_context(|| format!("Cannot read {}", path.display()))?;
        } else {
            let records = M8Parser::from_path(path)
                .and_then(|parser| parser.parse())
                .with_context(|| format!("Cannot parse {}", path.display()))?;
            hits.extend(records);
        }
    }

    let collection = builder.build();
    if !collection.is_empty() {
        write_collection(out, &collection, args.normalize)?;
    }
    if !hits.is_empty() {
        write_hits(out, &hits, args.show_alignments)?;
    }
    log::info!("{} sequences, {} structural hits", collection.len(), hits.len());
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    if args.output == "-" {
        let stdout = io::stdout();
        let mut handle = BufWriter::new(stdout.lock());
        run(&args, &mut handle)?;
        handle.flush()?;
    } else {
        let file = File::create(&args.output)
            .with_context(|| format!("Cannot create {}", args.output))?;
        let mut writer = BufWriter::new(file);
        run(&args, &mut writer)?;
        writer.flush()?;
        eprintln!("Wrote {}", args.output);
    }

    Ok(())
}
