//! Tokenizer and n-gram generator
//!
//! Descriptions are lowercased, stripped of punctuation and split on whitespace.
//! Tokens carrying a digit (store numbers, dates, card suffixes) are dropped so that
//! "Woolworths Metro #123" and "Woolworths Metro #456" produce the same terms.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeSet;

/// Anything that is not a letter, a number (any `N` category, so `½` survives),
/// an underscore or whitespace. Combining marks are stripped.
static NON_WORD_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^\p{L}\p{N}_\s]").unwrap());

/// Decimal digits plus the superscript, subscript and enclosed digit forms.
/// Fractions, Roman numerals and other numeric symbols do not count.
static DIGIT_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"[\p{Nd}\x{00B2}\x{00B3}\x{00B9}\x{1369}-\x{1371}\x{19DA}",
        r"\x{2070}\x{2074}-\x{2079}\x{2080}-\x{2089}",
        r"\x{2460}-\x{2468}\x{2474}-\x{247C}\x{2488}-\x{2490}",
        r"\x{24EA}\x{24F5}-\x{24FD}\x{24FF}",
        r"\x{2776}-\x{277E}\x{2780}-\x{2788}\x{278A}-\x{2792}",
        r"\x{1F100}-\x{1F10A}]",
    ))
    .unwrap()
});

/// Split free text into normalized word tokens, preserving their order.
pub fn tokenize(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    let cleaned = NON_WORD_REGEX.replace_all(&lowered, "");
    cleaned
        .split_whitespace()
        .filter(|token| !DIGIT_REGEX.is_match(token))
        .map(str::to_string)
        .collect()
}

/// Contiguous `n`-token phrases of `tokens`, joined with a single space.
///
/// Returned as a set: a phrase repeated within one description counts once.
pub fn ngrams(tokens: &[String], n: usize) -> BTreeSet<String> {
    if n == 0 || tokens.len() < n {
        return BTreeSet::new();
    }
    tokens.windows(n).map(|window| window.join(" ")).collect()
}
