// Character and word predicates used by the token builder and the scanner

use crate::config::MAX_TOKEN_LEN;

/// Characters that end a lexeme without being absorbed into it.
///
/// A stopper that starts a lexeme is the whole lexeme.
pub fn is_stopper(ch: char) -> bool {
    ch.is_ascii_whitespace() || matches!(ch, ':' | ';' | '(' | ')' | ',' | '+' | '-' | '*')
}

/// Leading letter, then letters or digits, at most [`MAX_TOKEN_LEN`] long.
pub fn is_identifier(word: &str) -> bool {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() => {}
        _ => return false,
    }
    word.chars().count() <= MAX_TOKEN_LEN && chars.all(|ch| ch.is_ascii_alphanumeric())
}

/// Optional sign, then digits only, at most [`MAX_TOKEN_LEN`] long.
pub fn is_integer(word: &str) -> bool {
    if word.is_empty() || word.chars().count() > MAX_TOKEN_LEN {
        return false;
    }
    let digits = word.strip_prefix(|ch: char| ch == '+' || ch == '-').unwrap_or(word);
    !digits.is_empty() && digits.chars().all(|ch| ch.is_ascii_digit())
}

/// Fold a freshly read line to the canonical (upper) case in place.
pub fn fold_case(line: &mut [char]) {
    for ch in line.iter_mut() {
        *ch = ch.to_ascii_uppercase();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stoppers() {
        for ch in [' ', '\t', ':', ';', '(', ')', ',', '+', '-', '*'] {
            assert!(is_stopper(ch), "{:?} should stop a lexeme", ch);
        }
        for ch in ['A', '1', '.', '/', '=', '_'] {
            assert!(!is_stopper(ch), "{:?} should not stop a lexeme", ch);
        }
    }

    #[test]
    fn test_identifiers() {
        assert!(is_identifier("A"));
        assert!(is_identifier("COUNT2"));
        assert!(is_identifier("ABCDEFGH"));
        assert!(!is_identifier("ABCDEFGHI"));
        assert!(!is_identifier("2X"));
        assert!(!is_identifier("A_B"));
        assert!(!is_identifier("A.B"));
        assert!(!is_identifier(""));
    }

    #[test]
    fn test_integers() {
        assert!(is_integer("0"));
        assert!(is_integer("12345678"));
        assert!(is_integer("-42"));
        assert!(is_integer("+7"));
        assert!(!is_integer("123456789"));
        assert!(!is_integer("3A"));
        assert!(!is_integer("+"));
        assert!(!is_integer(""));
    }

    #[test]
    fn test_fold_case() {
        let mut line: Vec<char> = "Begin x := 1 end.".chars().collect();
        fold_case(&mut line);
        assert_eq!(line.iter().collect::<String>(), "BEGIN X := 1 END.");
    }
}
