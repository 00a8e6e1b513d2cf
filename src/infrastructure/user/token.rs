//! Opaque login token generation

use rand::distributions::Alphanumeric;
use rand::rngs::OsRng;
use rand::Rng;

/// Length of every login token, in characters
pub const DEFAULT_TOKEN_LENGTH: usize = 32;

/// Issues random alphanumeric tokens
///
/// Tokens are drawn uniformly from `[A-Za-z0-9]` using the OS random source.
/// They carry no claims and are not recorded anywhere. If the OS random
/// source fails the process panics; that is an environment fault, not a
/// request error.
#[derive(Debug, Clone, Default)]
pub struct TokenIssuer;

impl TokenIssuer {
    pub fn new() -> Self {
        Self
    }

    /// Issue a token of `length` characters
    pub fn issue(&self, length: usize) -> String {
        OsRng
            .sample_iter(&Alphanumeric)
            .take(length)
            .map(char::from)
            .collect()
    }

    /// Issue a token of [`DEFAULT_TOKEN_LENGTH`] characters
    pub fn issue_default(&self) -> String {
        self.issue(DEFAULT_TOKEN_LENGTH)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_issue_default_length() {
        let issuer = TokenIssuer::new();
        let token = issuer.issue_default();

        assert_eq!(token.len(), 32);
    }

    #[test]
    fn test_issue_custom_length() {
        let issuer = TokenIssuer::new();

        assert_eq!(issuer.issue(8).len(), 8);
        assert_eq!(issuer.issue(128).len(), 128);
        assert!(issuer.issue(0).is_empty());
    }

    #[test]
    fn test_alphabet() {
        let issuer = TokenIssuer::new();
        let token = issuer.issue(1024);

        assert!(token.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn test_covers_alphabet() {
        let issuer = TokenIssuer::new();
        let seen: HashSet<char> = issuer.issue(10_000).chars().collect();

        // 10k draws over 62 symbols leaves a negligible chance of a gap
        assert_eq!(seen.len(), 62);
    }

    #[test]
    fn test_token_uniqueness() {
        let issuer = TokenIssuer::new();
        assert_ne!(issuer.issue_default(), issuer.issue_default());
    }
}
