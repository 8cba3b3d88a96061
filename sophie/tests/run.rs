use proptest::prelude::*;
use sophie::{Run, RunConfig, RunError};
use sophie_tree::{Term, Type};

fn config(text: &str) -> RunConfig {
    text.parse().unwrap()
}

#[test]
fn default_run_generates_a_scope() {
    let run = Run::from_config(&RunConfig::default()).unwrap();
    let names: Vec<&str> = run.scope().symbols().collect();
    assert_eq!(names, vec!["a0", "b0", "b1", "f0", "f1", "i0"]);
    assert!(run.alphabet().is_none());
}

#[test]
fn explicit_scope_rows_verify() {
    let run = Run::from_config(&config(
        r#"
        [scope]
        b0 = "Bool"
        i0 = "Int"

        [output]
        verify = true
        "#,
    ))
    .unwrap();

    let rows = run.rows().unwrap();
    assert!(!rows.is_empty());
    for row in &rows {
        assert_eq!(row.term.get_type(run.scope()).unwrap(), Type::Bool);
        assert!(!row.text.is_empty());
        assert!(row.encoding.is_none());
    }
    assert!(rows.iter().any(|r| r.text == "[b0] and [b0]"));
    assert!(rows.iter().any(|r| r.text == "[i0] is less than [5]"));
}

#[test]
fn custom_rules_replace_english() {
    let run = Run::from_config(&config(
        r#"
        [scope]
        b0 = "Bool"

        [[rules]]
        pattern = "b0"
        template = "the light is on"

        [[rules]]
        pattern = "And(*, *)"
        template = "{lhs} and {rhs}"
        "#,
    ))
    .unwrap();

    let rows = run.rows().unwrap();
    let and = Term::and(Term::symbol("b0"), Term::symbol("b0"));
    let row = rows.iter().find(|r| r.term == and).unwrap();
    assert_eq!(row.text, "the light is on and the light is on");

    let not = Term::not(Term::symbol("b0"));
    let row = rows.iter().find(|r| r.term == not).unwrap();
    assert_eq!(row.text, "[not b0]");
}

#[test]
fn sampling_is_bounded_and_seeded() {
    let text = r#"
        [scope]
        b0 = "Bool"
        a0 = "Abstract"

        [synthesis]
        probability = 0.5
        seed = 11
        sample = 6
    "#;
    let first: Vec<Term> = Run::from_config(&config(text)).unwrap().terms().unwrap();
    let second: Vec<Term> = Run::from_config(&config(text)).unwrap().terms().unwrap();
    assert!(first.len() <= 6);
    assert_eq!(first, second);
}

#[test]
fn sampling_without_probability_draws_from_enumeration() {
    let run = Run::from_config(&config(
        r#"
        [scope]
        b0 = "Bool"

        [synthesis]
        sample = 4
        "#,
    ))
    .unwrap();
    assert_eq!(run.terms().unwrap().len(), 4);
}

#[test]
fn encoding_covers_every_character() {
    let run = Run::from_config(&config(
        r#"
        [scope]
        b0 = "Bool"
        i0 = "Int"

        [output]
        encode = true
        "#,
    ))
    .unwrap();

    let alphabet = run.alphabet().unwrap();
    for row in run.rows().unwrap() {
        let codes = row.encoding.clone().unwrap();
        assert_eq!(codes.len(), row.text.chars().count());
        assert!(codes.iter().all(|&c| c < alphabet.len()));
        assert_eq!(row.to_string().split('\t').count(), 3);
    }
}

#[test]
fn bad_inputs_are_reported() {
    let err = Run::from_config(&config(
        r#"
        [[rules]]
        pattern = "And(*)"
        template = "{lhs}"
        "#,
    ))
    .unwrap_err();
    assert!(matches!(err, RunError::Syntax(_)));

    let err = Run::from_config(&config(
        r#"
        [scope]
        f0 = "Bool <- (Int <- (Int))"
        "#,
    ))
    .unwrap_err();
    assert!(matches!(err, RunError::Types(_)));

    let err = Run::from_config(&config(
        r#"
        [generate]
        max_function_argument_count = 0
        "#,
    ))
    .unwrap_err();
    assert!(matches!(err, RunError::Synthesis(_)));
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn sampled_runs_respect_the_sample_size(
        seed in any::<u64>(),
        sample in 0usize..12,
        probability in prop::option::of(0.0f64..=1.0),
    ) {
        let mut cfg = config("[scope]\nb0 = \"Bool\"\na0 = \"Abstract\"\n");
        cfg.synthesis.seed = seed;
        cfg.synthesis.sample = Some(sample);
        cfg.synthesis.probability = probability;

        let run = Run::from_config(&cfg).unwrap();
        let terms = run.terms().unwrap();
        prop_assert!(terms.len() <= sample);
        if probability.is_none() {
            prop_assert_eq!(terms.len(), sample);
        }
        for term in &terms {
            prop_assert!(term.verify(run.scope()).is_ok());
        }
    }
}
