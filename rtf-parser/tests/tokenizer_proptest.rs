//! Property-based tests for the tokenizer
//!
//! These tests ensure that, whatever the input, the tokenizer accounts for every byte exactly
//! once, never moves backwards and keeps brace nesting balanced.

use proptest::prelude::*;
use rtf_parser::rtf::lexing::Tokenizer;
use rtf_parser::rtf::token::{detokenize, Token};

fn tokenize(input: &str) -> Vec<Token> {
    Tokenizer::from_string(input)
        .tokenize_all()
        .expect("in-memory source never fails")
}

/// Arbitrary RTF-ish text built from the characters the tokenizer dispatches on
fn rtf_soup_strategy() -> impl Strategy<Value = String> {
    "[a-z0-9{}\\\\ ;'*~\\-\n]{0,80}"
}

/// Same as the soup, carriage returns included
fn rtf_soup_with_cr_strategy() -> impl Strategy<Value = String> {
    "[a-z0-9{}\\\\ ;'*\r\n]{0,80}"
}

/// A control word that can never be `\bin`, so braces always stay syntax
fn control_word_strategy() -> impl Strategy<Value = String> {
    ("[a-z]{0,4}", "(-?[0-9]{1,3})?", prop::bool::ANY)
        .prop_map(|(name, parameter, space)| {
            format!("\\x{}{}{}", name, parameter, if space { " " } else { "" })
        })
}

/// Well formed documents: balanced groups of text and control words
fn balanced_document_strategy() -> impl Strategy<Value = String> {
    let leaf = prop_oneof![
        "[a-z ;]{1,8}",
        control_word_strategy(),
        Just("\\'e9".to_string()),
        Just("\\{".to_string()),
        Just("\n".to_string()),
    ];
    leaf.prop_recursive(4, 32, 6, |inner| {
        prop::collection::vec(inner, 0..6).prop_map(|children| format!("{{{}}}", children.concat()))
    })
}

#[cfg(test)]
mod proptest_tests {
    use super::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        #[test]
        fn test_spans_partition_the_input(input in rtf_soup_with_cr_strategy()) {
            let tokens = tokenize(&input);
            let mut expected_start = 0;
            for token in &tokens {
                prop_assert_eq!(token.span.start, expected_start, "gap before {}", token);
                prop_assert!(token.span.end > token.span.start, "empty span for {}", token);
                expected_start = token.span.end;
            }
            prop_assert_eq!(expected_start, input.len());
        }

        #[test]
        fn test_offsets_never_decrease(input in rtf_soup_strategy()) {
            let tokens = tokenize(&input);
            for pair in tokens.windows(2) {
                prop_assert!(pair[0].offset <= pair[1].offset);
                prop_assert!(pair[0].line <= pair[1].line);
            }
        }

        #[test]
        fn test_detokenize_restores_input_without_cr(input in rtf_soup_strategy()) {
            let tokens = tokenize(&input);
            prop_assert_eq!(detokenize(&tokens), input);
        }

        #[test]
        fn test_balanced_documents_end_at_root(document in balanced_document_strategy()) {
            let mut tokenizer = Tokenizer::from_string(document.as_str());
            prop_assert_eq!(tokenizer.nesting_level(), 0);
            let tokens = tokenizer.tokenize_all().unwrap();
            prop_assert_eq!(tokenizer.nesting_level(), 0);

            let opened = tokens.iter().filter(|token| token.is_left_brace()).count();
            let closed = tokens.iter().filter(|token| token.is_right_brace()).count();
            prop_assert_eq!(opened, closed);
        }

        #[test]
        fn test_ignored_compounds_leave_nesting_unchanged(
            document in balanced_document_strategy(),
            prefix in "[a-z ]{0,8}",
        ) {
            let input = format!("{{{}{{\\fonttbl {}}}}}", prefix, document);
            let mut tokenizer = Tokenizer::from_string(input.as_str());
            tokenizer.ignore_compounds(["fonttbl"]);
            let tokens = tokenizer.tokenize_all().unwrap();

            prop_assert_eq!(tokenizer.nesting_level(), 0);
            prop_assert!(tokens.iter().all(|token| token.control_word_name() != Some("fonttbl")));
            prop_assert_eq!(tokenizer.offset(), input.len());
        }
    }
}
