//! A3M format parser.
//!
//! A3M is FASTA with two extra conventions, used by HHblits and friends:
//! lower-case letters mark insertions relative to the query, and `.` marks
//! gap columns.
//!
//! ```text
//! >query
//! MKVLAAGIVG
//! >hit_1
//! MKv..LAAGiVG
//! ```
//!
//! Reading removes every `.` and upper-cases what is left, so the stored
//! sequence normalizes to the same residues as the raw one would.

use std::io::{self, BufRead};

use crate::formats::fasta::{for_each_record, BodyLines};
use crate::model::AlignmentBuilder;

/// Upper-cases `c` when that gives a single character; otherwise keeps it.
fn fold_char(c: char) -> char {
    let mut upper = c.to_uppercase();
    match (upper.next(), upper.next()) {
        (Some(u), None) => u,
        _ => c,
    }
}

/// Removes gap dots and upper-cases an A3M body.
///
/// Characters such as `ß` that upper-case to several letters are kept as
/// they are, so they still normalize to a single unknown residue.
pub fn fold_a3m_body(body: &str) -> String {
    body.chars().filter(|&c| c != '.').map(fold_char).collect()
}

/// Reads A3M records into `builder`.
///
/// Same grammar as FASTA; an existing id is replaced.
pub fn read_a3m_into<R: BufRead>(builder: &mut AlignmentBuilder, reader: R) -> io::Result<()> {
    for_each_record(reader, BodyLines::Trimmed, |id, body| {
        builder.insert(id, fold_a3m_body(&body));
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::residue::normalize_residues;

    #[test]
    fn test_fold_removes_dots_and_uppercases() {
        assert_eq!(fold_a3m_body("MKv..LAAGiVG"), "MKVLAAGIVG");
        assert_eq!(fold_a3m_body("...."), "");
        // Dashes are alignment gaps, not insertions: they stay.
        assert_eq!(fold_a3m_body("a-c.d"), "A-CD");
    }

    #[test]
    fn test_fold_keeps_multichar_uppercase() {
        assert_eq!(fold_a3m_body("ß"), "ß");
        assert_eq!(fold_a3m_body("a\u{FB03}.c"), "A\u{FB03}C");
        assert_eq!(normalize_residues(&fold_a3m_body("mß.k")), "MUK");
    }

    #[test]
    fn test_fold_is_compatible_with_normalizer() {
        for raw in ["MKv..LAAGiVG", "a-c.d*", "x.b.z", "mkvl", "ß", "a\u{FB03}.c", "m\u{FB06}k"] {
            let dotless: String = raw.chars().filter(|&c| c != '.').collect();
            assert_eq!(
                normalize_residues(&fold_a3m_body(raw)),
                normalize_residues(&dotless),
                "input {:?}",
                raw
            );
        }
    }

    #[test]
    fn test_read_a3m_into() {
        let content = ">query\nMKVLAAGIVG\n>hit_1 some description\nMKv..LA\nAGiVG\n";
        let mut builder = AlignmentBuilder::new();
        read_a3m_into(&mut builder, content.as_bytes()).unwrap();
        let collection = builder.build();

        assert_eq!(collection.len(), 2);
        assert_eq!(collection.get("query"), Some("MKVLAAGIVG"));
        assert_eq!(collection.get("hit_1 some description"), Some("MKVLAAGIVG"));
    }

    #[test]
    fn test_read_a3m_output_has_no_dots_or_lowercase() {
        let mut builder = AlignmentBuilder::new();
        builder.read_a3m("test_data/hits.a3m").expect("Test file not found");
        let collection = builder.build();

        assert!(!collection.is_empty());
        for (_, seq) in collection.iter() {
            assert!(!seq.contains('.'));
            assert!(!seq.chars().any(|c| c.is_lowercase()));
        }
    }

    #[test]
    fn test_read_a3m_empty() {
        let mut builder = AlignmentBuilder::new();
        read_a3m_into(&mut builder, "".as_bytes()).unwrap();
        assert!(builder.is_empty());
    }
}
