//! Behavioural tests for the tokenizer
//!
//! These tests exercise the public tokenizer surface the way a document processor would:
//! registering tracked words, ignoring compounds and pulling tokens one at a time.

use rstest::rstest;
use rtf_parser::rtf::lexing::{Tokenizer, BINARY_WORD, PICTURE_WORD};
use rtf_parser::rtf::token::{ControlWord, Token, TokenKind};

fn next(tokenizer: &mut Tokenizer<rtf_parser::rtf::source::StringSource>) -> Token {
    tokenizer
        .next_token()
        .expect("in-memory source never fails")
        .expect("token before end of stream")
}

#[rstest]
#[case(r"\~", TokenKind::ControlSymbol('~'))]
#[case(r"\-", TokenKind::ControlSymbol('-'))]
#[case(r"\_", TokenKind::ControlSymbol('_'))]
#[case(r"\:", TokenKind::ControlSymbol(':'))]
#[case(r"\|", TokenKind::ControlSymbol('|'))]
#[case(r"\,", TokenKind::EscapedExpression(','))]
#[case(r"\{", TokenKind::EscapedExpression('{'))]
#[case(r"\}", TokenKind::EscapedExpression('}'))]
#[case(r"\\", TokenKind::EscapedExpression('\\'))]
#[case(r"\'7f", TokenKind::EscapedCharacter("7f".into()))]
#[case(r"\'", TokenKind::Invalid("\\'".into()))]
#[case(r"\", TokenKind::Invalid("\\".into()))]
#[case(r"\#", TokenKind::Invalid("\\#".into()))]
#[case(r"\*", TokenKind::ControlSymbol('*'))]
#[case("\n", TokenKind::Newline("\n".into()))]
#[case("\r\n", TokenKind::Newline("\r\n".into()))]
fn test_single_token_dispatch(#[case] input: &str, #[case] expected: TokenKind) {
    let mut tokenizer = Tokenizer::from_string(input);
    let token = next(&mut tokenizer);
    assert_eq!(token.kind, expected);
    assert_eq!(token.offset, 0);
    assert_eq!(tokenizer.next_token().unwrap(), None);
}

#[rstest]
#[case(r"\uc2 ", "uc", Some(2), true)]
#[case(r"\li-720", "li", Some(-720), false)]
#[case(r"\pard;", "pard", None, false)]
#[case(r"\b0{", "b", Some(0), false)]
fn test_control_word_parsing(
    #[case] input: &str,
    #[case] name: &str,
    #[case] parameter: Option<i32>,
    #[case] trailing_space: bool,
) {
    let mut tokenizer = Tokenizer::from_string(input);
    let token = next(&mut tokenizer);
    let word = token.control_word().expect("control word");
    assert_eq!(word.name, name);
    assert_eq!(word.parameter, parameter);
    assert_eq!(word.trailing_space, trailing_space);
}

#[test]
fn test_scoped_values_revert_after_brace() {
    let mut tokenizer = Tokenizer::from_string(r"{\uc2 \u10356\'a1\'b0}");
    tokenizer.track_control_word("uc", true, Some(1));
    assert_eq!(tokenizer.control_word_value("uc", 0), 1);

    assert!(next(&mut tokenizer).is_left_brace());
    let uc = next(&mut tokenizer);
    assert_eq!(uc.control_word_name(), Some("uc"));
    assert_eq!(tokenizer.control_word_value("uc", 0), 2);

    assert_eq!(next(&mut tokenizer).control_word_name(), Some("u"));
    assert_eq!(
        next(&mut tokenizer).kind,
        TokenKind::EscapedCharacter("a1".into())
    );
    assert_eq!(
        next(&mut tokenizer).kind,
        TokenKind::EscapedCharacter("b0".into())
    );
    assert_eq!(tokenizer.control_word_value("uc", 0), 2);

    assert!(next(&mut tokenizer).is_right_brace());
    assert_eq!(tokenizer.control_word_value("uc", 0), 1);
}

#[test]
fn test_picture_word_switches_to_hex_data() {
    let mut tokenizer = Tokenizer::from_string(r"{\pict 89504e470d0a}");
    tokenizer.track_control_word(PICTURE_WORD, false, None);

    next(&mut tokenizer);
    assert_eq!(next(&mut tokenizer).control_word_name(), Some("pict"));
    let data = next(&mut tokenizer);
    assert_eq!(data.kind, TokenKind::SData("89504e470d0a".into()));
    assert_eq!(
        data.related_control_word.map(|related| related.word),
        Some(PICTURE_WORD.to_string())
    );
}

#[test]
fn test_binary_payload_is_exact() {
    let input = r"{\bin5 ABCDE}";
    let mut tokenizer = Tokenizer::from_string(input);
    tokenizer.track_control_word(BINARY_WORD, false, None);

    next(&mut tokenizer);
    next(&mut tokenizer);
    assert_eq!(tokenizer.control_word_value(BINARY_WORD, 0), 5);

    let data = next(&mut tokenizer);
    assert_eq!(data.kind, TokenKind::BData(b"ABCDE".to_vec()));
    assert_eq!(data.span, 7..12);

    let close = next(&mut tokenizer);
    assert!(close.is_right_brace());
    assert_eq!(close.offset, 12);
}

#[test]
fn test_binary_payload_may_contain_syntax() {
    let mut tokenizer = Tokenizer::from_bytes(b"{\\bin5 A{\\\x00}}".to_vec());
    next(&mut tokenizer);
    next(&mut tokenizer);
    let data = next(&mut tokenizer);
    assert_eq!(data.kind, TokenKind::BData(vec![b'A', b'{', b'\\', 0, b'}']));
    assert_eq!(data.span, 7..12);
    let close = next(&mut tokenizer);
    assert!(close.is_right_brace());
    assert_eq!(close.offset, 12);
    assert_eq!(tokenizer.nesting_level(), 0);
}

#[test]
fn test_ignored_compound_is_skipped_in_one_call() {
    let mut tokenizer = Tokenizer::from_string(r"{\rtf1{\fonttbl{Arial;}}Hello}");
    tokenizer.ignore_compounds(["fonttbl"]);

    next(&mut tokenizer);
    next(&mut tokenizer);
    let before = tokenizer.nesting_level();

    assert!(next(&mut tokenizer).is_left_brace());
    let after_skip = next(&mut tokenizer);
    assert_eq!(after_skip.kind, TokenKind::PcData("Hello".into()));
    assert_eq!(tokenizer.nesting_level(), before);
}

#[test]
fn test_explicit_skip_compound() {
    let mut tokenizer = Tokenizer::from_string(r"{\*\generator Writer{x}}after");
    next(&mut tokenizer);
    let generator = next(&mut tokenizer);
    assert!(generator.control_word().is_some_and(|word| word.is_special));

    tokenizer.skip_compound().unwrap();
    assert_eq!(tokenizer.nesting_level(), 0);
    assert_eq!(
        next(&mut tokenizer).kind,
        TokenKind::PcData("after".into())
    );
}

#[test]
fn test_default_fallback_for_untracked_words() {
    let tokenizer = Tokenizer::from_string(r"{\fs24 x}");
    assert_eq!(tokenizer.control_word_value("fs", 12), 12);
    assert_eq!(tokenizer.control_word_value("never-seen", -3), -3);
}

#[test]
fn test_non_stackable_flag_only_counts_at_its_level() {
    let mut tokenizer = Tokenizer::from_string(r"{\pict{\picw10 }ab}");
    let tokens = tokenizer.tokenize_all().unwrap();
    let kinds: Vec<&TokenKind> = tokens.iter().map(|token| &token.kind).collect();
    assert_eq!(
        kinds,
        vec![
            &TokenKind::LeftBrace { trailing_space: false },
            &TokenKind::ControlWord(ControlWord::parse("pict", false, false)),
            &TokenKind::LeftBrace { trailing_space: false },
            &TokenKind::ControlWord(ControlWord::parse("picw10", true, false)),
            &TokenKind::RightBrace { trailing_space: false },
            &TokenKind::SData("ab".into()),
            &TokenKind::RightBrace { trailing_space: false },
        ]
    );
}

#[test]
fn test_tokens_serialize_to_json() {
    let tokens = Tokenizer::from_string(r"{\b x}").tokenize_all().unwrap();
    let json = serde_json::to_string(&tokens).unwrap();
    let back: Vec<Token> = serde_json::from_str(&json).unwrap();
    assert_eq!(back, tokens);
}
