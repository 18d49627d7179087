//! Shared text normalization for every word-emitting mapper.
//!
//! Lowercase, replace anything that is neither `a`-`z` nor whitespace with a
//! space, split on whitespace, drop tokens of two letters or fewer. No
//! stemming, no stopwords, no dedup.

use once_cell::sync::Lazy;
use regex::Regex;

static NON_LETTER: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^a-z\s]").unwrap());

/// Tokens shorter than this many letters are dropped.
pub const MIN_TOKEN_LEN: usize = 3;

/// Normalized text, ready to be walked any number of times.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tokens {
    normalized: String,
}

impl Tokens {
    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        self.normalized
            .split_whitespace()
            .filter(|token| token.len() >= MIN_TOKEN_LEN)
    }
}

impl<'a> IntoIterator for &'a Tokens {
    type Item = &'a str;
    type IntoIter = Box<dyn Iterator<Item = &'a str> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.iter())
    }
}

pub fn tokenize(text: &str) -> Tokens {
    let lowered = text.to_lowercase();
    let normalized = NON_LETTER.replace_all(&lowered, " ").into_owned();
    Tokens { normalized }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn words(text: &str) -> Vec<String> {
        tokenize(text).iter().map(str::to_string).collect()
    }

    #[test]
    fn lowercases_and_strips_punctuation() {
        assert_eq!(
            words("Great product, GREAT value!!"),
            vec!["great", "product", "great", "value"]
        );
    }

    #[test]
    fn drops_short_tokens() {
        assert_eq!(words("it is ok but not bad"), vec!["but", "not", "bad"]);
    }

    #[test]
    fn digits_and_symbols_split_words() {
        assert_eq!(words("barang2 bagus#sekali"), vec!["barang", "bagus", "sekali"]);
        assert!(words("100% 5/5 :)").is_empty());
    }

    #[test]
    fn non_ascii_letters_are_separators() {
        assert_eq!(words("café crème"), vec!["caf"]);
    }

    #[test]
    fn keeps_duplicates() {
        assert_eq!(words("nice nice nice"), vec!["nice", "nice", "nice"]);
    }

    #[test]
    fn can_be_walked_twice() {
        let tokens = tokenize("fast shipping fast");
        let first: Vec<&str> = tokens.iter().collect();
        let second: Vec<&str> = (&tokens).into_iter().collect();
        assert_eq!(first, second);
    }

    proptest! {
        #[test]
        fn tokenizing_is_deterministic(text in ".{0,200}") {
            prop_assert_eq!(tokenize(&text), tokenize(&text));
        }

        #[test]
        fn tokens_are_long_lowercase_ascii(text in ".{0,200}") {
            for token in tokenize(&text).iter() {
                prop_assert!(token.len() > 2);
                prop_assert!(token.bytes().all(|b| b.is_ascii_lowercase()));
            }
        }
    }
}
