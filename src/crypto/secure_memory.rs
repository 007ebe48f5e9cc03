//! Secure memory handling for passphrases
//!
//! `SecureString` wipes its buffer on drop and never prints its contents.

use std::fmt;
use std::ops::Deref;

use zeroize::Zeroizing;

/// A string type that zeros its contents on drop
pub struct SecureString {
    inner: Zeroizing<String>,
}

impl SecureString {
    pub fn new(s: impl Into<String>) -> Self {
        Self {
            inner: Zeroizing::new(s.into()),
        }
    }

    pub fn as_str(&self) -> &str {
        self.inner.as_str()
    }

    /// Length in characters, which is what the passphrase minimum counts
    pub fn char_len(&self) -> usize {
        self.inner.chars().count()
    }
}

impl Deref for SecureString {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        self.inner.as_str()
    }
}

impl AsRef<str> for SecureString {
    fn as_ref(&self) -> &str {
        self.inner.as_str()
    }
}

impl From<String> for SecureString {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for SecureString {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl PartialEq for SecureString {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

// Don't print the contents in Debug output
impl fmt::Debug for SecureString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecureString")
            .field("len", &self.inner.len())
            .finish()
    }
}

impl fmt::Display for SecureString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[REDACTED {} bytes]", self.inner.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_secure_string_creation() {
        let s = SecureString::new("test");
        assert_eq!(s.as_str(), "test");
        assert_eq!(s.len(), 4);
    }

    #[test]
    fn test_char_len_counts_characters() {
        let s = SecureString::new("pässwö");
        assert_eq!(s.char_len(), 6);
        assert!(s.len() > 6);
    }

    #[test]
    fn test_secure_string_debug_and_display_redacted() {
        let s = SecureString::new("secret");
        assert!(!format!("{:?}", s).contains("secret"));
        assert!(format!("{}", s).contains("REDACTED"));
    }

    #[test]
    fn test_equality() {
        assert_eq!(SecureString::from("abc"), SecureString::from("abc".to_string()));
        assert_ne!(SecureString::from("abc"), SecureString::from("abd"));
    }
}
