//! Residue alphabet and normalization.
//!
//! Every sequence handed out by this crate's normalizing readers is written
//! over a fixed alphabet: the 20 standard amino acids in upper case, plus
//! `U` standing in for anything that could not be recognised.
//!
//! The rules, applied character by character:
//! - `*` (stop) is dropped.
//! - Letters whose upper-case form is a standard amino acid are kept, upper-cased.
//! - Everything else, whitespace included, becomes `U`.

/// The 20 standard amino acids, one-letter codes.
pub const STANDARD_AMINO_ACIDS: &str = "ACDEFGHIKLMNPQRSTVWY";

/// Placeholder for residues outside the standard alphabet.
pub const UNKNOWN_RESIDUE: char = 'U';

/// Translation stop symbol, removed during normalization.
pub const STOP_SYMBOL: char = '*';

/// Returns true if `c` is one of the 20 standard (upper-case) amino acids.
pub fn is_standard_amino_acid(c: char) -> bool {
    c.is_ascii_uppercase() && STANDARD_AMINO_ACIDS.contains(c)
}

/// Maps a single raw character to its canonical residue.
///
/// Returns `None` for the stop symbol, which contributes nothing.
pub fn canonical_residue(c: char) -> Option<char> {
    if c == STOP_SYMBOL {
        return None;
    }
    if c.is_whitespace() {
        return Some(UNKNOWN_RESIDUE);
    }

    // Some characters upper-case to more than one letter; those are unknown.
    let mut upper = c.to_uppercase();
    match (upper.next(), upper.next()) {
        (Some(u), None) if is_standard_amino_acid(u) => Some(u),
        _ => Some(UNKNOWN_RESIDUE),
    }
}

/// Normalizes a raw residue string.
///
/// Idempotent: normalizing an already normalized string returns it unchanged.
///
/// # Examples
///
/// ```
/// use protaln::residue::normalize_residues;
///
/// assert_eq!(normalize_residues("mkv*B-x"), "MKVUUU");
/// ```
pub fn normalize_residues(raw: &str) -> String {
    raw.chars().filter_map(canonical_residue).collect()
}

/// Returns true if `s` only contains standard amino acids and `U`.
pub fn is_canonical(s: &str) -> bool {
    s.chars()
        .all(|c| c == UNKNOWN_RESIDUE || is_standard_amino_acid(c))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_letters_kept() {
        assert_eq!(normalize_residues(STANDARD_AMINO_ACIDS), STANDARD_AMINO_ACIDS);
    }

    #[test]
    fn test_lowercase_folded() {
        assert_eq!(normalize_residues("acdefghik"), "ACDEFGHIK");
    }

    #[test]
    fn test_stop_dropped() {
        assert_eq!(normalize_residues("MK*"), "MK");
        assert_eq!(normalize_residues("***"), "");
        assert!(!normalize_residues("A*B*C").contains('*'));
        assert_eq!(normalize_residues("A*B*C"), "AUC");
    }

    #[test]
    fn test_unknown_becomes_u() {
        // B, J, O, X, Z are not in the standard 20
        assert_eq!(normalize_residues("BJOXZ"), "UUUUU");
        assert_eq!(normalize_residues("A-C.D"), "AUCUD");
        assert_eq!(normalize_residues("12"), "UU");
    }

    #[test]
    fn test_whitespace_becomes_u() {
        assert_eq!(normalize_residues("A C\tD"), "AUCUD");
        assert_eq!(normalize_residues(" "), "U");
    }

    #[test]
    fn test_multichar_uppercase_is_unknown() {
        // 'ß' upper-cases to "SS"
        assert_eq!(normalize_residues("ß"), "U");
    }

    #[test]
    fn test_idempotent() {
        let inputs = [
            "",
            "mkvLLA*",
            "A C\tD\n",
            "..--xxBZ",
            "ACDEFGHIKLMNPQRSTVWYU",
            "ßéñ*u",
        ];
        for raw in inputs {
            let once = normalize_residues(raw);
            assert_eq!(normalize_residues(&once), once, "input {:?}", raw);
            assert!(is_canonical(&once), "input {:?}", raw);
        }
    }

    #[test]
    fn test_is_canonical() {
        assert!(is_canonical("ACDU"));
        assert!(is_canonical(""));
        assert!(!is_canonical("acd"));
        assert!(!is_canonical("A-C"));
        assert!(!is_canonical("B"));
    }
}
