//! Token classification and short-flag cluster expansion

/// How a single input token reads before it is matched against declarations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token<'a> {
    /// `--name`
    Long(&'a str),
    /// `-x`, or a cluster such as `-xyz` before expansion
    Short(&'a str),
    /// Anything else: a value or a positional
    Bare(&'a str),
}

impl<'a> Token<'a> {
    pub fn classify(token: &'a str) -> Self {
        if is_long_flag(token) {
            Token::Long(token)
        } else if is_short_flag(token) {
            Token::Short(token)
        } else {
            Token::Bare(token)
        }
    }

    pub fn as_str(&self) -> &'a str {
        match *self {
            Token::Long(s) | Token::Short(s) | Token::Bare(s) => s,
        }
    }

    /// A short token carrying more than one flag character, e.g. `-yz`
    pub fn is_cluster(&self) -> bool {
        matches!(self, Token::Short(s) if s.chars().count() > 2)
    }
}

/// `--` followed by at least one character
pub fn is_long_flag(s: &str) -> bool {
    s.len() > 2 && s.starts_with("--")
}

/// `-` followed by at least one character, long flags included
pub fn is_short_flag(s: &str) -> bool {
    s.len() > 1 && s.starts_with('-')
}

/// Split every short-flag cluster into one token per flag character.
///
/// `["-x", "1", "-yz"]` becomes `["-x", "1", "-y", "-z"]`. Other tokens pass
/// through unchanged and relative order is kept.
pub fn expand_short_clusters<S: AsRef<str>>(tokens: &[S]) -> Vec<String> {
    let mut expanded = Vec::with_capacity(tokens.len());

    for raw in tokens {
        let token = Token::classify(raw.as_ref());
        if token.is_cluster() {
            tracing::trace!(cluster = token.as_str(), "expanding short flag cluster");
            expanded.extend(token.as_str().chars().skip(1).map(|c| format!("-{c}")));
        } else {
            expanded.push(token.as_str().to_string());
        }
    }

    expanded
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify() {
        assert_eq!(Token::classify("--test"), Token::Long("--test"));
        assert_eq!(Token::classify("-x"), Token::Short("-x"));
        assert_eq!(Token::classify("-xyz"), Token::Short("-xyz"));
        assert_eq!(Token::classify("value"), Token::Bare("value"));
        assert_eq!(Token::classify("-"), Token::Bare("-"));
        assert_eq!(Token::classify(""), Token::Bare(""));
    }

    #[test]
    fn test_double_dash_alone_is_short_shaped() {
        // Too short to be a long flag; it can never match a declared short flag.
        assert_eq!(Token::classify("--"), Token::Short("--"));
        assert!(!Token::classify("--").is_cluster());
    }

    #[test]
    fn test_expand_cluster() {
        let tokens = ["-x", "1", "-yz", "test"];
        assert_eq!(
            expand_short_clusters(&tokens),
            vec!["-x", "1", "-y", "-z", "test"]
        );
    }

    #[test]
    fn test_long_flags_are_not_expanded() {
        let tokens = ["--verbose", "-v", "-5"];
        assert_eq!(expand_short_clusters(&tokens), vec!["--verbose", "-v", "-5"]);
    }

    #[test]
    fn test_expand_empty() {
        let tokens: [&str; 0] = [];
        assert!(expand_short_clusters(&tokens).is_empty());
    }
}
