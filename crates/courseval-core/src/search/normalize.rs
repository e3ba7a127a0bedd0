//! Text normalization for search.
//!
//! Queries and candidate names are compared in a normalized form:
//! lowercased, common Latin diacritics folded to ASCII, punctuation
//! stripped, and whitespace collapsed to single spaces. Names are
//! normalized once at index build; queries once per call.

enum Fold {
    Keep(char),
    Expand(&'static str),
    Separator,
    Drop,
}

fn fold(c: char) -> Fold {
    match c {
        'a'..='z' | '0'..='9' => Fold::Keep(c),
        'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' => Fold::Keep('a'),
        'ç' => Fold::Keep('c'),
        'è' | 'é' | 'ê' | 'ë' => Fold::Keep('e'),
        'ì' | 'í' | 'î' | 'ï' => Fold::Keep('i'),
        'ñ' => Fold::Keep('n'),
        'ò' | 'ó' | 'ô' | 'õ' | 'ö' | 'ø' => Fold::Keep('o'),
        'ù' | 'ú' | 'û' | 'ü' => Fold::Keep('u'),
        'ý' | 'ÿ' => Fold::Keep('y'),
        'đ' => Fold::Keep('d'),
        'æ' => Fold::Expand("ae"),
        'œ' => Fold::Expand("oe"),
        'ß' => Fold::Expand("ss"),
        // Apostrophes and periods vanish: "St. John's" -> "st johns"
        '\'' | '’' | '.' => Fold::Drop,
        c if c.is_whitespace() => Fold::Separator,
        c if c.is_alphanumeric() => Fold::Keep(c),
        // Remaining punctuation separates tokens: "CS-135" -> "cs 135"
        _ => Fold::Separator,
    }
}

/// Normalizes a query or candidate name for matching.
///
/// Empty and whitespace-only input normalizes to the empty string.
pub fn normalize(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        for lc in c.to_lowercase() {
            match fold(lc) {
                Fold::Keep(ch) => out.push(ch),
                Fold::Expand(s) => out.push_str(s),
                Fold::Separator => {
                    if !out.is_empty() && !out.ends_with(' ') {
                        out.push(' ');
                    }
                }
                Fold::Drop => {}
            }
        }
    }
    while out.ends_with(' ') {
        out.pop();
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lowercases_and_strips_punctuation() {
        assert_eq!(
            normalize("University of Nevada, Las Vegas"),
            "university of nevada las vegas"
        );
    }

    #[test]
    fn test_folds_diacritics() {
        assert_eq!(normalize("Université de Montréal"), "universite de montreal");
        assert_eq!(normalize("Weißenburg"), "weissenburg");
    }

    #[test]
    fn test_separating_punctuation_becomes_space() {
        assert_eq!(normalize("CS-135"), "cs 135");
        assert_eq!(normalize("Texas A&M"), "texas a m");
    }

    #[test]
    fn test_dropped_punctuation() {
        assert_eq!(normalize("St. John's"), "st johns");
    }

    #[test]
    fn test_whitespace_collapses() {
        assert_eq!(normalize("  intro   to\tprogramming  "), "intro to programming");
        assert_eq!(normalize("   "), "");
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("!!!"), "");
    }
}
