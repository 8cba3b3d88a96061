use proptest::prelude::*;
use sophie_lex::{Lexer, TokenKind};

proptest! {
    #[test]
    fn tokens_cover_the_input(src in "[a-z {}.\n]{0,40}") {
        let tokens = Lexer::new(&src).lex().expect("lexing never fails");
        let joined: String = tokens.iter().map(|t| t.text.as_str()).collect();
        prop_assert_eq!(joined, src);
        for t in &tokens {
            prop_assert!(!t.text.is_empty());
        }
    }

    #[test]
    fn plain_text_is_a_single_token(src in "[a-z ,.!?]{1,40}") {
        let tokens = Lexer::new(&src).lex().unwrap();
        prop_assert_eq!(tokens.len(), 1);
        prop_assert_eq!(tokens[0].kind, TokenKind::Text);
    }
}
