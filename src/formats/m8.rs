//! FoldSeek tabular (`.m8`) alignment parser.
//!
//! FoldSeek writes one structural alignment per line, tab-delimited, no
//! header. Two column layouts are in use, told apart by field count:
//!
//! - **21 fields**: most databases (AFDB, PDB, ...), target taxonomy included
//! - **19 fields**: GMGC and MGnify, no taxonomy
//!
//! ## Columns
//!
//! 1. **query**: query id
//! 2. **target**: target id
//! 3. **pident**: percent identity
//! 4. **alnlen**: alignment length
//! 5. **mismatch**: number of mismatches
//! 6. **gapopen**: number of gap openings
//! 7. **qstart** / 8. **qend**: query span (1-based)
//! 9. **tstart** / 10. **tend**: target span (1-based)
//! 11. **evalue**: E-value
//! 12. **bits**: bit score
//! 13. **prob**: probability
//! 14. **qlen** / 15. **tlen**: query and target lengths
//! 16. **qaln** / 17. **taln**: aligned query and target strings
//! 18. **tca**: target C-alpha coordinates, comma-separated
//! 19. **tseq**: target sequence
//! 20. **taxid** / 21. **taxname**: target taxonomy (21-field layout only)
//!
//! Any other field count is rejected.

use std::fmt;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;
use std::str::FromStr;

use thiserror::Error;

/// Field count of the layout with target taxonomy.
pub const FULL_FIELD_COUNT: usize = 21;

/// Field count of the layout without target taxonomy.
pub const REDUCED_FIELD_COUNT: usize = 19;

/// Errors that can occur during `.m8` parsing.
#[derive(Error, Debug)]
pub enum M8Error {
    #[error("Failed to read file: {0}")]
    IoError(#[from] io::Error),

    #[error("Line {line}: invalid FoldSeek .m8 line format, expected 19 or 21 tab-separated fields, found {found}")]
    FieldCount { line: usize, found: usize },

    #[error("Line {line}: invalid value '{value}' for field '{field}'")]
    InvalidField {
        line: usize,
        field: &'static str,
        value: String,
    },
}

/// Result type for `.m8` operations.
pub type M8Result<T> = Result<T, M8Error>;

/// Column layout of a record, fixed when the line is parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Schema {
    /// 21-field layout, with target taxonomy.
    Full { taxon_id: String, taxon_name: String },
    /// 19-field layout, no taxonomy.
    Reduced,
}

/// One FoldSeek structural alignment.
#[derive(Debug, Clone, PartialEq)]
pub struct StructuralAlignment {
    /// Query id
    pub query_id: String,
    /// Target id
    pub target_id: String,
    /// Percent identity
    pub pident: f64,
    /// Alignment length
    pub alnlen: u32,
    /// Number of mismatches
    pub mismatch: u32,
    /// Number of gap openings
    pub gapopen: u32,
    /// Query start (1-based)
    pub qstart: u32,
    /// Query end (1-based)
    pub qend: u32,
    /// Target start (1-based)
    pub tstart: u32,
    /// Target end (1-based)
    pub tend: u32,
    /// E-value (lower is better)
    pub evalue: f64,
    /// Bit score (higher is better)
    pub bitscore: f64,
    /// Probability of homology
    pub prob: u32,
    /// Query length
    pub qlen: u32,
    /// Target length
    pub tlen: u32,
    /// Aligned query string
    pub qaln: String,
    /// Aligned target string
    pub taln: String,
    /// Target C-alpha coordinates, flattened
    pub tca: Vec<f64>,
    /// Target sequence
    pub tseq: String,
    /// Column layout, with taxonomy for the 21-field one
    pub schema: Schema,
}

/// Parses a numeric field, reporting the field name on failure.
fn parse_field<T: FromStr>(value: &str, field: &'static str, line: usize) -> M8Result<T> {
    value.trim().parse().map_err(|_| M8Error::InvalidField {
        line,
        field,
        value: value.to_string(),
    })
}

fn parse_coordinates(value: &str, line: usize) -> M8Result<Vec<f64>> {
    value
        .split(',')
        .map(|coord| parse_field(coord, "tca", line))
        .collect()
}

impl StructuralAlignment {
    /// Parses one line; `line_number` is only used in errors.
    pub fn parse_line(line: &str, line_number: usize) -> M8Result<Self> {
        let fields: Vec<&str> = line.trim_end().split('\t').collect();

        let schema = match fields.len() {
            FULL_FIELD_COUNT => Schema::Full {
                taxon_id: fields[19].to_string(),
                taxon_name: fields[20].to_string(),
            },
            REDUCED_FIELD_COUNT => Schema::Reduced,
            found => {
                return Err(M8Error::FieldCount {
                    line: line_number,
                    found,
                })
            }
        };

        let n = line_number;
        Ok(StructuralAlignment {
            query_id: fields[0].to_string(),
            target_id: fields[1].to_string(),
            pident: parse_field(fields[2], "pident", n)?,
            alnlen: parse_field(fields[3], "alnlen", n)?,
            mismatch: parse_field(fields[4], "mismatch", n)?,
            gapopen: parse_field(fields[5], "gapopen", n)?,
            qstart: parse_field(fields[6], "qstart", n)?,
            qend: parse_field(fields[7], "qend", n)?,
            tstart: parse_field(fields[8], "tstart", n)?,
            tend: parse_field(fields[9], "tend", n)?,
            evalue: parse_field(fields[10], "evalue", n)?,
            bitscore: parse_field(fields[11], "bitscore", n)?,
            prob: parse_field(fields[12], "prob", n)?,
            qlen: parse_field(fields[13], "qlen", n)?,
            tlen: parse_field(fields[14], "tlen", n)?,
            qaln: fields[15].to_string(),
            taln: fields[16].to_string(),
            tca: parse_coordinates(fields[17], n)?,
            tseq: fields[18].to_string(),
            schema,
        })
    }

    /// Target taxonomy id, `None` for the 19-field layout.
    pub fn taxon_id(&self) -> Option<&str> {
        match &self.schema {
            Schema::Full { taxon_id, .. } => Some(taxon_id.as_str()),
            Schema::Reduced => None,
        }
    }

    /// Target taxonomy name, `None` for the 19-field layout.
    pub fn taxon_name(&self) -> Option<&str> {
        match &self.schema {
            Schema::Full { taxon_name, .. } => Some(taxon_name.as_str()),
            Schema::Reduced => None,
        }
    }

    /// The aligned query and target strings, one per line.
    pub fn render_alignment(&self) -> String {
        format!("Query: {}\nTargt: {}", self.qaln, self.taln)
    }

    /// Prints [`render_alignment`](Self::render_alignment) to stdout.
    pub fn print_alignment(&self) {
        println!("{}", self.render_alignment());
    }
}

impl FromStr for StructuralAlignment {
    type Err = M8Error;

    fn from_str(line: &str) -> M8Result<Self> {
        Self::parse_line(line, 1)
    }
}

impl fmt::Display for StructuralAlignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Query: {}, target: {}, E-value: {}, Bit Score: {}",
            self.query_id, self.target_id, self.evalue, self.bitscore
        )
    }
}

/// Reads a whole `.m8` source into records.
///
/// Every line becomes one record, in file order; the first bad line aborts.
///
/// # Examples
///
/// ```no_run
/// use protaln::formats::m8::M8Parser;
///
/// let hits = M8Parser::from_path("aln.m8")?.parse()?;
/// for hit in hits.iter().filter(|h| h.evalue < 1e-5) {
///     println!("{}", hit);
/// }
/// # Ok::<(), protaln::formats::m8::M8Error>(())
/// ```
pub struct M8Parser<R> {
    reader: R,
}

impl M8Parser<BufReader<File>> {
    /// Opens a `.m8` file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> M8Result<Self> {
        let file = File::open(path)?;
        Ok(Self::new(BufReader::new(file)))
    }
}

impl<R: BufRead> M8Parser<R> {
    /// Wraps any buffered reader.
    pub fn new(reader: R) -> Self {
        Self { reader }
    }

    /// Parses every line.
    pub fn parse(self) -> M8Result<Vec<StructuralAlignment>> {
        let mut records = Vec::new();
        for (idx, line) in self.reader.lines().enumerate() {
            let line = line?;
            records.push(StructuralAlignment::parse_line(&line, idx + 1)?);
        }
        log::debug!("Parsed {} structural alignments", records.len());
        Ok(records)
    }
}

/// Parses `.m8` content from a string.
pub fn parse_m8_str(content: &str) -> M8Result<Vec<StructuralAlignment>> {
    M8Parser::new(content.as_bytes()).parse()
}
