//! Store password handling

use zeroize::{Zeroize, ZeroizeOnDrop};

/// Password used to unlock a credential store
///
/// The bytes are wiped when the value is dropped. An empty password is a
/// valid value; an absent one is a configuration error at the call sites
/// that take `Option<Password>`.
#[derive(Clone, Default, Zeroize, ZeroizeOnDrop)]
pub struct Password(Vec<u8>);

impl Password {
    /// Create a password from raw bytes
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&str> for Password {
    fn from(value: &str) -> Self {
        Self::new(value.as_bytes())
    }
}

impl From<String> for Password {
    fn from(value: String) -> Self {
        Self::new(value.into_bytes())
    }
}

impl From<Vec<u8>> for Password {
    fn from(value: Vec<u8>) -> Self {
        Self::new(value)
    }
}

impl std::fmt::Debug for Password {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Password(<{} bytes>)", self.0.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_conversions() {
        assert_eq!(Password::from("changeit").as_bytes(), b"changeit");
        assert_eq!(Password::from("changeit".to_string()).len(), 8);
        assert_eq!(Password::from(vec![1u8, 2, 3]).as_bytes(), &[1, 2, 3]);
        assert!(Password::from("").is_empty());
    }

    #[test]
    fn test_password_debug_redacted() {
        let rendered = format!("{:?}", Password::from("hunter2"));
        assert!(!rendered.contains("hunter2"));
        assert!(rendered.contains("7 bytes"));
    }

    #[test]
    fn test_password_zeroize() {
        let mut password = Password::from("hunter2");
        password.zeroize();
        assert!(password.is_empty());
    }
}
