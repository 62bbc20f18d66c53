//! Multi-value cell splitting.
//!
//! Catalogue exports pack several values into one cell (`"India, United States"`).

/// Separator between values inside a multi-value cell.
pub const MULTI_VALUE_SEPARATOR: char = ',';

/// Split a multi-value cell into trimmed, non-empty tokens.
///
/// Source order is kept and duplicates are not removed. An empty or
/// whitespace-only cell yields no tokens.
pub fn normalize(cell: &str) -> Vec<String> {
    cell.split(MULTI_VALUE_SEPARATOR)
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(String::from)
        .collect()
}

/// Join tokens back into a single cell.
pub fn join_tokens<S: AsRef<str>>(tokens: &[S]) -> String {
    tokens
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_and_trim() {
        assert_eq!(
            normalize(" India ,United States,  Brazil"),
            vec!["India", "United States", "Brazil"]
        );
    }

    #[test]
    fn test_empty_tokens_dropped() {
        assert_eq!(normalize("Dramas,, ,Comedies,"), vec!["Dramas", "Comedies"]);
    }

    #[test]
    fn test_blank_cell_yields_nothing() {
        assert!(normalize("").is_empty());
        assert!(normalize("   ").is_empty());
        assert!(normalize(" , ,").is_empty());
    }

    #[test]
    fn test_duplicates_preserved() {
        assert_eq!(normalize("Dramas, Dramas"), vec!["Dramas", "Dramas"]);
    }

    #[test]
    fn test_idempotent_through_join() {
        let cells = [
            "",
            "India",
            " India , , United States ",
            "Dramas,Comedies,,Dramas",
            "\tKids' TV ,\n",
        ];
        for cell in cells {
            let once = normalize(cell);
            let twice = normalize(&join_tokens(&once));
            assert_eq!(once, twice, "cell {:?}", cell);
            assert!(once.iter().all(|t| !t.trim().is_empty()));
        }
    }
}
