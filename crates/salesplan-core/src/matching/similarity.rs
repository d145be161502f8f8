//! Levenshtein edit distance and normalized similarity.

/// Minimum number of single-character insertions, deletions or
/// substitutions that turn `a` into `b`.
///
/// Characters are Unicode scalar values, so "Гаджеты" has length 7.
pub fn levenshtein_distance(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let (m, n) = (a.len(), b.len());

    let mut table = vec![vec![0usize; n + 1]; m + 1];
    for (i, row) in table.iter_mut().enumerate() {
        row[0] = i;
    }
    for (j, cell) in table[0].iter_mut().enumerate() {
        *cell = j;
    }

    for i in 1..=m {
        for j in 1..=n {
            let cost = if a[i - 1] == b[j - 1] { 0 } else { 1 };
            table[i][j] = (table[i - 1][j] + 1)
                .min(table[i][j - 1] + 1)
                .min(table[i - 1][j - 1] + cost);
        }
    }

    table[m][n]
}

/// Normalized similarity `1 - distance / max(len)` in `[0, 1]`.
///
/// Two empty strings are identical (1.0). Inputs are compared as given;
/// callers normalize case and whitespace.
pub fn similarity(a: &str, b: &str) -> f64 {
    let max_len = a.chars().count().max(b.chars().count());
    if max_len == 0 {
        return 1.0;
    }
    1.0 - levenshtein_distance(a, b) as f64 / max_len as f64
}

/// Lowercase and trim a string for comparison.
pub fn normalize(s: &str) -> String {
    s.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance() {
        assert_eq!(levenshtein_distance("kitten", "sitting"), 3);
        assert_eq!(levenshtein_distance("", "abc"), 3);
        assert_eq!(levenshtein_distance("abc", ""), 3);
        assert_eq!(levenshtein_distance("gsm", "gsm"), 0);
        assert_eq!(levenshtein_distance("гаджеты", "гаджет"), 1);
    }

    #[test]
    fn test_identity() {
        for s in ["", "a", "gadgets", "Бытовая техника", "123.5"] {
            assert_eq!(similarity(s, s), 1.0);
        }
    }

    #[test]
    fn test_empty_cases() {
        assert_eq!(similarity("", ""), 1.0);
        assert_eq!(similarity("", "abc"), 0.0);
        assert_eq!(similarity("abc", ""), 0.0);
    }

    #[test]
    fn test_bounds_and_symmetry() {
        let words = ["gsm", "sim", "smart", "sp", "spice", "zzz999", "сервис", ""];
        for a in words {
            for b in words {
                let s = similarity(a, b);
                assert!((0.0..=1.0).contains(&s), "{} vs {} = {}", a, b, s);
                assert_eq!(s, similarity(b, a));
            }
        }
    }

    #[test]
    fn test_known_values() {
        // two edits over three characters
        assert!((similarity("gsm", "sim") - (1.0 - 2.0 / 3.0)).abs() < 1e-12);
        assert!((similarity("gadget", "gadgets") - (1.0 - 1.0 / 7.0)).abs() < 1e-12);
        // cyrillic compared per character, not per byte
        assert!((similarity("фото", "фот") - 0.75).abs() < 1e-12);
    }

    #[test]
    fn test_normalize() {
        assert_eq!(normalize("  GSM\t"), "gsm");
        assert_eq!(normalize("ГАДЖЕТЫ"), "гаджеты");
    }
}
