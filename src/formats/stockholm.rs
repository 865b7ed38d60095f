//! Stockholm format parser.
//!
//! Stockholm files (Pfam, Rfam, HMMER) carry `#` annotation lines, a `//`
//! terminator, and `name  fragment` lines. Alignments may be split into
//! blocks, in which case the same name appears once per block and its
//! fragments are concatenated in file order.
//!
//! ```text
//! # STOCKHOLM 1.0
//! #=GF ID CBS
//! O83071/192-246   MTCRAQLIAVPRASSLAE..AIACAQKM
//! O31698/18-71     MIEADKVAHVQVGNNLEH..ALLVLTKT
//!
//! O83071/192-246   ....RVSRVPVYERS
//! O31698/18-71     ....GYSAIPVLDPA
//! //
//! ```
//!
//! Fragments are stored raw. Lines that do not split into exactly two
//! whitespace-separated fields are skipped.

use std::io::{self, BufRead};

use crate::model::AlignmentBuilder;

/// Splits a sequence line into `(name, fragment)`.
///
/// Returns `None` for annotation, terminator, blank, and malformed lines.
fn split_sequence_line(line: &str) -> Option<(&str, &str)> {
    if line.starts_with('#') || line.starts_with("//") || line.trim().is_empty() {
        return None;
    }

    let mut fields = line.split_whitespace();
    match (fields.next(), fields.next(), fields.next()) {
        (Some(name), Some(fragment), None) => Some((name, fragment)),
        _ => None,
    }
}

/// Reads Stockholm sequence lines into `builder`, appending fragments per name.
pub fn read_stockholm_into<R: BufRead>(builder: &mut AlignmentBuilder, reader: R) -> io::Result<()> {
    for (line_number, line) in reader.lines().enumerate() {
        let line = line?;
        match split_sequence_line(&line) {
            Some((name, fragment)) => {
                builder.append(name, fragment);
            }
            None => {
                log::trace!("Stockholm line {} skipped", line_number + 1);
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read_str(content: &str) -> crate::model::AlignmentCollection {
        let mut builder = AlignmentBuilder::new();
        read_stockholm_into(&mut builder, content.as_bytes()).unwrap();
        builder.build()
    }

    #[test]
    fn test_split_sequence_line() {
        assert_eq!(split_sequence_line("seq1  AC-D"), Some(("seq1", "AC-D")));
        assert_eq!(split_sequence_line("# STOCKHOLM 1.0"), None);
        assert_eq!(split_sequence_line("#=GC SS_cons <<..>>"), None);
        assert_eq!(split_sequence_line("//"), None);
        assert_eq!(split_sequence_line("   \t"), None);
        assert_eq!(split_sequence_line("lonely"), None);
        assert_eq!(split_sequence_line("a b c"), None);
    }

    #[test]
    fn test_interleaved_blocks_concatenate() {
        let content = "# STOCKHOLM 1.0\nid1 frag1\nid2 AAAA\n\nid1 frag2\nid2 CCCC\n//\n";
        let collection = read_str(content);
        assert_eq!(collection.len(), 2);
        assert_eq!(collection.get("id1"), Some("frag1frag2"));
        assert_eq!(collection.get("id2"), Some("AAAACCCC"));
    }

    #[test]
    fn test_malformed_lines_are_skipped() {
        let content = "seq1 AC\nthis line has four\nseq1 DE\n";
        let collection = read_str(content);
        assert_eq!(collection.len(), 1);
        assert_eq!(collection.get("seq1"), Some("ACDE"));
    }

    #[test]
    fn test_lines_after_terminator_are_read() {
        let content = "seq1 AC\n//\nseq1 DE\n";
        assert_eq!(read_str(content).get("seq1"), Some("ACDE"));
    }

    #[test]
    fn test_values_stay_raw() {
        let collection = read_str("seq1 ac..D-\n");
        assert_eq!(collection.get("seq1"), Some("ac..D-"));
    }

    #[test]
    fn test_empty_input() {
        assert!(read_str("").is_empty());
        assert!(read_str("# STOCKHOLM 1.0\n//\n").is_empty());
    }

    #[test]
    fn test_read_stockholm_file() {
        let mut builder = AlignmentBuilder::new();
        builder
            .read_sto("test_data/PF00571-mini.sto")
            .expect("Test file not found");
        let collection = builder.build();
        assert_eq!(collection.len(), 3);
        assert_eq!(
            collection.get("O83071/192-246"),
            Some("MTCRAQLIAVPRASSLAE..AIACAQKM....RVSRVPVYERS")
        );
        assert_eq!(
            collection.ids().collect::<Vec<_>>(),
            vec!["O83071/192-246", "O31698/18-71", "O31699/88-139"]
        );
    }
}
