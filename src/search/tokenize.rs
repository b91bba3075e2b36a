//! Text tokenization for search indexing and queries.

/// Common English stop words to filter out from indexing.
/// These high-frequency words add little value to search relevance.
pub const STOP_WORDS: &[&str] = &[
    "a", "an", "and", "for", "from", "in", "of", "on", "or", "the", "to", "with",
];

/// Tokenizes text into normalized search terms.
///
/// Lower-cases the input and splits on any run of characters outside
/// `[a-z0-9]`, so `_`, `/`, punctuation, and whitespace all act as word
/// boundaries:
/// - `"retry_policy"` → `["retry", "policy"]`
/// - `"billing/invoices"` → `["billing", "invoices"]`
///
/// Empty tokens and stop words are dropped. Total over any input; an empty
/// string produces an empty sequence.
pub fn tokenize(text: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();

    for c in text.to_lowercase().chars() {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            current.push(c);
        } else if !current.is_empty() {
            push_token(&mut tokens, std::mem::take(&mut current));
        }
    }
    if !current.is_empty() {
        push_token(&mut tokens, current);
    }

    tokens
}

fn push_token(tokens: &mut Vec<String>, token: String) {
    if !STOP_WORDS.contains(&token.as_str()) {
        tokens.push(token);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert2::check;
    use rstest::rstest;

    #[rstest]
    #[case("Refund Policy", vec!["refund", "policy"])]
    #[case("retry_policy", vec!["retry", "policy"])]
    #[case("billing/invoices", vec!["billing", "invoices"])]
    #[case("order.created", vec!["order", "created"])]
    #[case("HTTP2 server", vec!["http2", "server"])]
    fn test_tokenize_splits_on_boundaries(#[case] input: &str, #[case] expected: Vec<&str>) {
        let expected_owned: Vec<String> = expected.iter().map(|s| (*s).to_string()).collect();
        check!(tokenize(input) == expected_owned);
    }

    #[rstest]
    #[case("the refund for an order", vec!["refund", "order"])]
    #[case("a an and for from in of on or the to with", vec![])]
    fn test_stop_words_dropped(#[case] input: &str, #[case] expected: Vec<&str>) {
        let expected_owned: Vec<String> = expected.iter().map(|s| (*s).to_string()).collect();
        check!(tokenize(input) == expected_owned);
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    #[case("\n\t---")]
    #[case("🦀")]
    fn test_no_tokens(#[case] input: &str) {
        check!(tokenize(input).is_empty());
    }

    #[test]
    fn test_deterministic() {
        let input = "Webhook subscriptions: order.created, order/refunded";
        check!(tokenize(input) == tokenize(input));
    }
}
