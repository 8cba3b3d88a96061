#![forbid(unsafe_code)]

use sophie_tree::{BinOp, Term, glob_match};

use crate::alphabet::Alphabet;
use crate::error::TemplateError;
use crate::template::{Field, FormatTemplate};

#[derive(Clone, Debug, PartialEq)]
pub struct PresentationRule {
    pattern: Term,
    template: FormatTemplate,
}

impl PresentationRule {
    pub fn new(pattern: Term, template: FormatTemplate) -> Self {
        Self { pattern, template }
    }

    pub fn compile(pattern: Term, template: &str) -> Result<Self, TemplateError> {
        Ok(Self::new(pattern, FormatTemplate::compile(template)?))
    }

    pub fn pattern(&self) -> &Term {
        &self.pattern
    }

    pub fn template(&self) -> &FormatTemplate {
        &self.template
    }

    pub fn alphabet(&self) -> Alphabet {
        self.template.alphabet()
    }

    pub fn matches(&self, term: &Term) -> bool {
        glob_match(&self.pattern, term).matched
    }
}

/// Renders terms as natural language through an ordered list of rules.
///
/// The first rule whose pattern glob-matches a term renders it; its fields
/// are presented recursively. Terms no rule matches come out as `[term]`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NLPresenter {
    rules: Vec<PresentationRule>,
}

impl NLPresenter {
    pub fn new(rules: impl IntoIterator<Item = PresentationRule>) -> Self {
        Self {
            rules: rules.into_iter().collect(),
        }
    }

    /// Rules for the logical and relational operators.
    pub fn english() -> Result<Self, TemplateError> {
        let binary = |op| Term::binary(op, Term::Wildcard, Term::Wildcard);
        let rules = [
            (binary(BinOp::And), "{lhs} and {rhs}"),
            (binary(BinOp::Or), "{lhs} or {rhs}"),
            (binary(BinOp::Implies), "if {lhs}, then {rhs}"),
            (Term::not(Term::Wildcard), "{arg} is false"),
            (binary(BinOp::Lt), "{lhs} is less than {rhs}"),
            (binary(BinOp::Le), "{lhs} is less than or equal to {rhs}"),
            (binary(BinOp::Gt), "{lhs} is greater than {rhs}"),
            (binary(BinOp::Ge), "{lhs} is greater than or equal to {rhs}"),
            (binary(BinOp::Ne), "{lhs} is not equal to {rhs}"),
            (binary(BinOp::Eq), "{lhs} is equal to {rhs}"),
        ];

        rules
            .into_iter()
            .map(|(pattern, template)| PresentationRule::compile(pattern, template))
            .collect::<Result<Vec<_>, _>>()
            .map(Self::new)
    }

    pub fn rules(&self) -> &[PresentationRule] {
        &self.rules
    }

    pub fn push(&mut self, rule: PresentationRule) {
        self.rules.push(rule);
    }

    pub fn present(&self, term: &Term) -> Result<String, TemplateError> {
        match self.rules.iter().find(|rule| rule.matches(term)) {
            Some(rule) => rule
                .template
                .render_with(term, |field| self.present_field(field)),
            None => {
                log::trace!("no presentation rule for {term}, using structural form");
                Ok(format!("[{term}]"))
            }
        }
    }

    /// Presents a resolved template field. Non-term data is stringified.
    pub fn present_field(&self, field: Field<'_>) -> Result<String, TemplateError> {
        match field {
            Field::Term(term) => self.present(term),
            Field::Terms(terms) => Ok(terms
                .iter()
                .map(|t| self.present(t))
                .collect::<Result<Vec<_>, _>>()?
                .join(", ")),
            Field::Data(datum) => Ok(datum.to_string()),
        }
    }

    pub fn present_all<I>(&self, terms: I) -> Result<Vec<(Term, String)>, TemplateError>
    where
        I: IntoIterator<Item = Term>,
    {
        terms
            .into_iter()
            .map(|term| {
                let text = self.present(&term)?;
                Ok((term, text))
            })
            .collect()
    }

    /// Union of every rule's template alphabet.
    pub fn alphabet(&self) -> Alphabet {
        let mut alphabet = Alphabet::new();
        for rule in &self.rules {
            alphabet.union(&rule.alphabet());
        }
        alphabet
    }
}
