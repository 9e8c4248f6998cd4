use std::borrow::Cow;

/// Rewrites full-width digits, `．`, `－` and `＋` to ASCII so numbers typed
/// through a Japanese IME parse like any other.
pub fn fold_full_width(text: &str) -> Cow<'_, str> {
    if text.chars().all(|c| fold_char(c) == c) {
        return Cow::Borrowed(text);
    }
    Cow::Owned(text.chars().map(fold_char).collect())
}

fn fold_char(c: char) -> char {
    match c {
        '０'..='９' => char::from_digit(c as u32 - '０' as u32, 10).unwrap_or(c),
        '．' => '.',
        '－' => '-',
        '＋' => '+',
        _ => c,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_folds_full_width_number() {
        assert_eq!(fold_full_width("３５．０１２３"), "35.0123");
        assert_eq!(fold_full_width("－７０.５"), "-70.5");
        assert_eq!(fold_full_width("＋１"), "+1");
    }

    #[test]
    fn test_ascii_is_borrowed() {
        assert!(matches!(fold_full_width("35.0"), Cow::Borrowed("35.0")));
    }

    #[test]
    fn test_other_characters_are_kept() {
        assert_eq!(fold_full_width("３台"), "3台");
        assert_eq!(fold_full_width("ｘ"), "ｘ");
    }
}
