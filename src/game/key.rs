//! Key input decoding
//!
//! Raw key names from a front end are decoded once into a closed set of keys.

/// A key the session understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// A letter, always lowercase
    Letter(char),
    Backspace,
    Enter,
}

impl Key {
    /// Decode a key name such as `"a"`, `"Enter"` or `"Backspace"`
    ///
    /// Names are case-insensitive. Anything else is not a game key.
    ///
    /// # Examples
    /// ```
    /// use quotle::game::Key;
    ///
    /// assert_eq!(Key::from_name("Q"), Some(Key::Letter('q')));
    /// assert_eq!(Key::from_name("enter"), Some(Key::Enter));
    /// assert_eq!(Key::from_name("Shift"), None);
    /// ```
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        if name.eq_ignore_ascii_case("enter") {
            return Some(Self::Enter);
        }
        if name.eq_ignore_ascii_case("backspace") {
            return Some(Self::Backspace);
        }

        let mut chars = name.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Self::from_char(c),
            _ => None,
        }
    }

    /// Decode a typed character; only ASCII letters are game keys
    #[must_use]
    pub fn from_char(c: char) -> Option<Self> {
        c.is_ascii_alphabetic()
            .then(|| Self::Letter(c.to_ascii_lowercase()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_letters() {
        assert_eq!(Key::from_name("a"), Some(Key::Letter('a')));
        assert_eq!(Key::from_name("Z"), Some(Key::Letter('z')));
        assert_eq!(Key::from_char('M'), Some(Key::Letter('m')));
    }

    #[test]
    fn decode_named_keys() {
        assert_eq!(Key::from_name("Enter"), Some(Key::Enter));
        assert_eq!(Key::from_name("ENTER"), Some(Key::Enter));
        assert_eq!(Key::from_name("Backspace"), Some(Key::Backspace));
    }

    #[test]
    fn reject_other_keys() {
        assert_eq!(Key::from_name(""), None);
        assert_eq!(Key::from_name("1"), None);
        assert_eq!(Key::from_name("ab"), None);
        assert_eq!(Key::from_name("é"), None);
        assert_eq!(Key::from_char(' '), None);
    }
}
