#![forbid(unsafe_code)]

mod alphabet;
mod error;
mod presenter;
mod template;

pub use alphabet::Alphabet;
pub use error::TemplateError;
pub use presenter::{NLPresenter, PresentationRule};
pub use template::{Field, FormatTemplate, resolve_field};

#[cfg(test)]
mod tests {
    use super::*;
    use sophie_tree::{BinOp, Term};

    fn sym(name: &str) -> Term {
        Term::symbol(name)
    }

    fn with_literals(mut presenter: NLPresenter) -> NLPresenter {
        presenter.push(PresentationRule::compile(Term::Bool(true), "true").unwrap());
        presenter.push(PresentationRule::compile(Term::Bool(false), "false").unwrap());
        presenter
    }

    #[test]
    fn render_stringifies_fields() {
        let template = FormatTemplate::compile("{lhs} and {rhs}").unwrap();
        let term = Term::and(Term::Bool(true), Term::Bool(false));
        assert_eq!(template.render(&term).unwrap(), "true and false");
    }

    #[test]
    fn present_with_literal_rules() {
        let presenter = with_literals(NLPresenter::new([PresentationRule::compile(
            Term::and(Term::Wildcard, Term::Wildcard),
            "{lhs} and {rhs}",
        )
        .unwrap()]));
        let term = Term::and(Term::Bool(true), Term::Bool(false));
        assert_eq!(presenter.present(&term).unwrap(), "true and false");
    }

    #[test]
    fn present_falls_back_without_rules() {
        let presenter = NLPresenter::default();
        assert_eq!(presenter.present(&sym("x")).unwrap(), "[x]");
        let nested = Term::and(sym("b0"), Term::not(sym("b1")));
        assert_eq!(presenter.present(&nested).unwrap(), "[b0 and not b1]");
    }

    #[test]
    fn present_escaped_text() {
        let presenter = NLPresenter::new([PresentationRule::compile(
            Term::not(Term::Wildcard),
            "{{literal}} {arg}",
        )
        .unwrap()]);
        let term = Term::not(sym("b0"));
        assert_eq!(presenter.present(&term).unwrap(), "{literal} [b0]");
    }

    #[test]
    fn present_nests_english() {
        let presenter = NLPresenter::english().unwrap();
        let term = Term::implies(
            Term::and(sym("b0"), Term::not(sym("b1"))),
            Term::binary(BinOp::Lt, sym("i0"), Term::Int(5)),
        );
        assert_eq!(
            presenter.present(&term).unwrap(),
            "if [b0] and [b1] is false, then [i0] is less than [5]"
        );
    }

    #[test]
    fn first_matching_rule_wins() {
        let presenter = NLPresenter::new([
            PresentationRule::compile(Term::and(sym("b0"), Term::Wildcard), "b0 and {rhs}").unwrap(),
            PresentationRule::compile(Term::and(Term::Wildcard, Term::Wildcard), "both").unwrap(),
        ]);
        assert_eq!(presenter.present(&Term::and(sym("b0"), sym("b1"))).unwrap(), "b0 and [b1]");
        assert_eq!(presenter.present(&Term::and(sym("b1"), sym("b0"))).unwrap(), "both");
    }

    #[test]
    fn present_data_and_argument_lists() {
        let presenter = NLPresenter::new([
            PresentationRule::compile(
                Term::call(Term::Wildcard, [Term::Wildcard, Term::Wildcard]),
                "{callee.name} of {args}",
            )
            .unwrap(),
        ]);
        let term = Term::call(sym("f0"), [sym("a0"), Term::Int(-1)]);
        assert_eq!(presenter.present(&term).unwrap(), "f0 of [a0], [-1]");
    }

    #[test]
    fn render_reports_missing_field() {
        let template = FormatTemplate::compile("{arg}").unwrap();
        let err = template.render(&Term::and(sym("b0"), sym("b1"))).unwrap_err();
        assert_eq!(
            err,
            TemplateError::MissingField {
                kind: "And",
                field: "arg".to_string()
            }
        );
        assert_eq!(err.to_string(), "object of type And has no field 'arg'");
    }

    #[test]
    fn render_rejects_bad_paths() {
        let term = Term::not(Term::Bool(true));

        let empty = FormatTemplate::compile("{}").unwrap();
        assert_eq!(empty.render(&term).unwrap_err(), TemplateError::EmptyPath);

        let dots = FormatTemplate::compile("{arg..value}").unwrap();
        assert!(matches!(
            dots.render(&term).unwrap_err(),
            TemplateError::EmptySegment { .. }
        ));

        let through_data = FormatTemplate::compile("{arg.value.x}").unwrap();
        assert_eq!(
            through_data.render(&term).unwrap_err(),
            TemplateError::NotATerm {
                field: "x".to_string()
            }
        );

        let ok = FormatTemplate::compile("{arg.value}").unwrap();
        assert_eq!(ok.render(&term).unwrap(), "true");
    }

    #[test]
    fn alphabet_covers_text_only() {
        let template = FormatTemplate::compile("ab {lhs} c").unwrap();
        let chars: Vec<char> = template.alphabet().chars().collect();
        assert_eq!(chars, vec![' ', 'a', 'b', 'c']);
        assert_eq!(template.field_paths().collect::<Vec<_>>(), vec!["lhs"]);
    }

    #[test]
    fn english_alphabet_encodes_its_own_text() {
        let presenter = NLPresenter::english().unwrap();
        let alphabet = presenter.alphabet();
        assert!(alphabet.contains(','));
        assert!(!alphabet.contains('{'));

        let encoded = alphabet.encode("if then").unwrap();
        assert_eq!(encoded.len(), 7);
        assert_eq!(encoded[2], alphabet.index_of(' ').unwrap());
        assert_eq!(
            alphabet.encode("is!").unwrap_err(),
            TemplateError::OutOfAlphabet { character: '!' }
        );
    }

    #[test]
    fn index_of_matches_sorted_position() {
        let alphabet: Alphabet = "cab".chars().collect();
        assert_eq!(alphabet.index_of('a'), Some(0));
        assert_eq!(alphabet.index_of('c'), Some(2));
        assert_eq!(alphabet.index_of('z'), None);
        assert_eq!(alphabet.encode("cab").unwrap(), vec![2, 0, 1]);
    }

    #[test]
    fn present_all_pairs_terms_with_text() {
        let presenter = NLPresenter::english().unwrap();
        let rows = presenter
            .present_all([Term::not(sym("b0")), sym("b1")])
            .unwrap();
        assert_eq!(rows[0].1, "[b0] is false");
        assert_eq!(rows[1], (sym("b1"), "[b1]".to_string()));
    }

    #[test]
    fn render_rejects_unclosed_nested_field() {
        let template = FormatTemplate::compile("{lhs{rhs}").unwrap();
        assert_eq!(template.field_paths().collect::<Vec<_>>(), vec!["lhs{rhs"]);
        assert_eq!(
            template.render(&Term::and(sym("b0"), sym("b1"))).unwrap_err(),
            TemplateError::MissingField {
                kind: "And",
                field: "lhs{rhs".to_string()
            }
        );
    }

    #[test]
    fn render_normalizes_line_endings() {
        let template = FormatTemplate::compile("a\r\nb\r{arg}").unwrap();
        assert_eq!(template.render(&Term::not(sym("b0"))).unwrap(), "a\nb\nb0");
        assert!(!template.alphabet().contains('\r'));
        assert!(template.alphabet().contains('\n'));
    }
}
