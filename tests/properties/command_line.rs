//! Property tests for post-update command tokenization.

use proptest::prelude::*;

use gitdeploy::{DeployError, PostUpdateAction};

fn plain_word() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[A-Za-z0-9_./=-]{1,12}").unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: A command made only of separators is always empty.
    #[test]
    fn property_whitespace_only_is_empty_command(line in "[ \t\n]{0,16}") {
        let result = PostUpdateAction::parse(&line);
        prop_assert!(matches!(result, Err(DeployError::EmptyCommand)));
    }

    /// PROPERTY: Unquoted words split on whitespace, first word is the program.
    #[test]
    fn property_plain_words_split_on_whitespace(
        words in proptest::collection::vec(plain_word(), 1..=6),
        sep in "[ \t]{1,3}",
    ) {
        let action = PostUpdateAction::parse(&words.join(&sep)).unwrap();

        prop_assert_eq!(action.program(), words[0].as_str());
        prop_assert_eq!(action.args(), &words[1..]);
    }

    /// PROPERTY: Single-quoted text reaches the program verbatim, shell syntax included.
    #[test]
    fn property_single_quoted_text_is_literal(text in "[A-Za-z0-9 $*;|&<>`~]{0,24}") {
        let action = PostUpdateAction::parse(&format!("echo '{text}'")).unwrap();

        prop_assert_eq!(action.program(), "echo");
        prop_assert_eq!(action.args(), &[text]);
    }

    /// PROPERTY: Tokenizing arbitrary text never panics.
    #[test]
    fn property_parse_never_panics(line in "\\PC{0,40}") {
        let _ = PostUpdateAction::parse(&line);
    }
}
