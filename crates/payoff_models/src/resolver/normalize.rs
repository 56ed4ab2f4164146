//! Product-name normalisation.

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Folds a product name for comparison.
///
/// Lowercases, decomposes to NFD and drops combining marks, then collapses
/// every run of non-alphanumeric characters into one space and trims.
///
/// # Examples
/// ```
/// use payoff_models::resolver::normalize;
///
/// assert_eq!(normalize("  Écart haussier (Call)  "), "ecart haussier call");
/// assert_eq!(normalize("Up-and-Out Call"), "up and out call");
/// assert_eq!(normalize("---"), "");
/// ```
pub fn normalize(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut pending_space = false;
    let lowered = name.to_lowercase();
    for c in lowered.nfd().filter(|c| !is_combining_mark(*c)) {
        if c.is_alphanumeric() {
            if pending_space && !out.is_empty() {
                out.push(' ');
            }
            pending_space = false;
            out.push(c);
        } else {
            pending_space = true;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_diacritics() {
        assert_eq!(normalize("Stellage acheté"), "stellage achete");
        assert_eq!(normalize("Capital Garanti Protégé"), "capital garanti protege");
        assert_eq!(normalize("Phénix mémoire"), "phenix memoire");
    }

    #[test]
    fn test_collapses_punctuation_runs() {
        assert_eq!(normalize("Asset-or-Nothing  Call!!"), "asset or nothing call");
        assert_eq!(normalize("Iron/Condor__(short)"), "iron condor short");
    }

    #[test]
    fn test_empty_and_symbol_only() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize(" \t\n"), "");
        assert_eq!(normalize("€$%"), "");
    }

    #[test]
    fn test_idempotent() {
        let once = normalize("Turbo Long (Knock-Out)");
        assert_eq!(normalize(&once), once);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig::with_cases(300))]

            #[test]
            fn test_output_is_folded(name in "[a-zA-Z0-9éèêàçôÉÈ \\-_/().,]{0,40}") {
                let folded = normalize(&name);
                prop_assert!(!folded.starts_with(' '));
                prop_assert!(!folded.ends_with(' '));
                prop_assert!(!folded.contains("  "));
                prop_assert_eq!(normalize(&folded), folded.clone());
            }
        }
    }
}
