#![forbid(unsafe_code)]

use std::fmt;

use miette::Diagnostic;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use sophie_nl::{Alphabet, NLPresenter, PresentationRule, TemplateError};
use sophie_synth::{ScopeGenerator, SynthesisError, TreeSynthesizer};
use sophie_tree::{Scope, Term, TreeVerificationError, TypeDeclarationError};
use thiserror::Error;

use crate::config::{ConfigError, RunConfig};
use crate::syntax::{parse_pattern, parse_type, SyntaxError};

/// Characters always admitted when encoding: digits, the minus sign and the
/// brackets of the structural fallback.
const BASE_ALPHABET: &str = "0123456789-[]";

#[derive(Debug, Error, Diagnostic)]
pub enum RunError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Syntax(#[from] SyntaxError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Types(#[from] TypeDeclarationError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Synthesis(#[from] SynthesisError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Verify(#[from] TreeVerificationError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Template(#[from] TemplateError),
}

/// One output line: a term, its presentation and optionally the encoded
/// presentation.
#[derive(Clone, Debug, PartialEq)]
pub struct Row {
    pub term: Term,
    pub text: String,
    pub encoding: Option<Vec<usize>>,
}

impl fmt::Display for Row {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\t{}", self.term, self.text)?;
        if let Some(codes) = &self.encoding {
            f.write_str("\t")?;
            for (i, code) in codes.iter().enumerate() {
                if i > 0 {
                    f.write_str(" ")?;
                }
                write!(f, "{code}")?;
            }
        }
        Ok(())
    }
}

/// A run file resolved into a scope, a presenter and synthesis settings.
#[derive(Clone, Debug)]
pub struct Run {
    scope: Scope,
    presenter: NLPresenter,
    alphabet: Option<Alphabet>,
    max_depth: usize,
    probability: Option<f64>,
    sample: Option<usize>,
    verify: bool,
    rng: ChaCha8Rng,
}

impl Run {
    pub fn from_config(config: &RunConfig) -> Result<Self, RunError> {
        let mut rng = ChaCha8Rng::seed_from_u64(config.synthesis.seed);

        let mut scope = if config.generates_scope() {
            let generate = config.generate.clone().unwrap_or_default();
            ScopeGenerator::from(&generate).generate(&mut rng)?
        } else {
            Scope::new()
        };
        for (name, text) in &config.scope {
            scope.define(name.clone(), parse_type(text)?);
        }
        scope.verify()?;

        let presenter = if config.rules.is_empty() {
            NLPresenter::english()?
        } else {
            let rules = config
                .rules
                .iter()
                .map(|rule| -> Result<PresentationRule, RunError> {
                    let pattern = parse_pattern(&rule.pattern)?;
                    Ok(PresentationRule::compile(pattern, &rule.template)?)
                })
                .collect::<Result<Vec<_>, _>>()?;
            NLPresenter::new(rules)
        };

        let alphabet = config.output.encode.then(|| {
            let mut alphabet = presenter.alphabet();
            alphabet.extend(BASE_ALPHABET.chars());
            alphabet.extend(config.output.alphabet.chars());
            alphabet.extend(scope.symbols().flat_map(str::chars));
            alphabet
        });

        log::debug!(
            "resolved run: {} symbols, {} rules, max_depth {}",
            scope.symbols().count(),
            presenter.rules().len(),
            config.synthesis.max_depth
        );

        Ok(Self {
            scope,
            presenter,
            alphabet,
            max_depth: config.synthesis.max_depth,
            probability: config.synthesis.probability,
            sample: config.synthesis.sample,
            verify: config.output.verify,
            rng,
        })
    }

    pub fn scope(&self) -> &Scope {
        &self.scope
    }

    pub fn presenter(&self) -> &NLPresenter {
        &self.presenter
    }

    pub fn alphabet(&self) -> Option<&Alphabet> {
        self.alphabet.as_ref()
    }

    /// Synthesizes terms. Sampling without a probability samples the full
    /// enumeration.
    pub fn terms(&self) -> Result<Vec<Term>, RunError> {
        let rng = self.rng.clone();
        let terms = match (self.probability, self.sample) {
            (None, None) => {
                let mut synth = TreeSynthesizer::enumerative(&self.scope, self.max_depth)?;
                synth.synthesize().collect()
            }
            (probability, Some(n)) => {
                let p = probability.unwrap_or(1.0);
                let mut synth = TreeSynthesizer::stochastic(&self.scope, self.max_depth, p, rng)?;
                synth.sample(n)
            }
            (Some(p), None) => {
                let mut synth = TreeSynthesizer::stochastic(&self.scope, self.max_depth, p, rng)?;
                synth.synthesize().collect()
            }
        };
        log::debug!("synthesized {} terms", terms.len());
        Ok(terms)
    }

    pub fn rows(&self) -> Result<Vec<Row>, RunError> {
        let terms = self.terms()?;
        if self.verify {
            for term in &terms {
                term.verify(&self.scope)?;
            }
        }

        self.presenter
            .present_all(terms)?
            .into_iter()
            .map(|(term, text)| -> Result<Row, RunError> {
                let encoding = match &self.alphabet {
                    Some(alphabet) => Some(alphabet.encode(&text)?),
                    None => None,
                };
                Ok(Row {
                    term,
                    text,
                    encoding,
                })
            })
            .collect()
    }
}
