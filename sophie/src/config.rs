#![forbid(unsafe_code)]
#![allow(unused_assignments)]

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use miette::Diagnostic;
use sophie_synth::ScopeGenerator;
use thiserror::Error;

#[derive(Debug, Error, Diagnostic, PartialEq)]
#[error("config error: {message}")]
#[diagnostic(code(sophie::config))]
#[allow(unused_assignments)]
pub struct ConfigError {
    pub message: String,
}

/// A TOML run file. Every section is optional.
#[derive(Clone, Debug, Default, PartialEq, serde::Deserialize)]
pub struct RunConfig {
    /// Explicit symbols: name = type expression.
    #[serde(default)]
    pub scope: BTreeMap<String, String>,

    /// Generated `b0..`, `a0..`, `i0..`, `f0..` symbols. Used when present,
    /// or when `scope` is empty.
    #[serde(default)]
    pub generate: Option<GenerateConfig>,

    #[serde(default)]
    pub synthesis: SynthesisConfig,

    #[serde(default)]
    pub output: OutputConfig,

    /// Presentation rules, tried in order. Empty means the English rules.
    #[serde(default)]
    pub rules: Vec<RuleConfig>,
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Deserialize)]
#[serde(default)]
pub struct GenerateConfig {
    pub boolean_symbol_count: usize,
    pub abstract_symbol_count: usize,
    pub int_symbol_count: usize,
    pub function_symbol_count: usize,
    pub max_function_argument_count: usize,
}

impl Default for GenerateConfig {
    fn default() -> Self {
        Self {
            boolean_symbol_count: 2,
            abstract_symbol_count: 1,
            int_symbol_count: 1,
            function_symbol_count: 2,
            max_function_argument_count: 2,
        }
    }
}

impl From<&GenerateConfig> for ScopeGenerator {
    fn from(cfg: &GenerateConfig) -> Self {
        ScopeGenerator {
            boolean_symbol_count: cfg.boolean_symbol_count,
            abstract_symbol_count: cfg.abstract_symbol_count,
            int_symbol_count: cfg.int_symbol_count,
            function_symbol_count: cfg.function_symbol_count,
            max_function_argument_count: cfg.max_function_argument_count,
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Deserialize)]
#[serde(default)]
pub struct SynthesisConfig {
    pub max_depth: usize,
    /// Absent means exhaustive enumeration.
    pub probability: Option<f64>,
    pub seed: u64,
    /// Absent means the whole stream.
    pub sample: Option<usize>,
}

impl Default for SynthesisConfig {
    fn default() -> Self {
        Self {
            max_depth: 2,
            probability: None,
            seed: 0,
            sample: None,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, serde::Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Type-check every synthesized term before presenting it.
    pub verify: bool,
    /// Append the alphabet encoding of each presentation.
    pub encode: bool,
    /// Characters added to the encoding alphabet.
    pub alphabet: String,
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Deserialize)]
pub struct RuleConfig {
    pub pattern: String,
    pub template: String,
}

impl RunConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|e| ConfigError {
            message: format!("failed to read {}: {e}", path.display()),
        })?;
        raw.parse().map_err(|e: ConfigError| ConfigError {
            message: format!("{}: {}", path.display(), e.message),
        })
    }

    /// Whether symbols come from a [`ScopeGenerator`].
    pub fn generates_scope(&self) -> bool {
        self.generate.is_some() || self.scope.is_empty()
    }
}

impl FromStr for RunConfig {
    type Err = ConfigError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let parsed: RunConfig = toml::from_str(raw).map_err(|e| ConfigError {
            message: format!("failed to parse run file: {e}"),
        })?;

        if let Some(p) = parsed.synthesis.probability {
            if !(0.0..=1.0).contains(&p) {
                return Err(ConfigError {
                    message: format!("synthesis.probability must lie in [0, 1], got {p}"),
                });
            }
        }
        if parsed.synthesis.max_depth == 0 {
            return Err(ConfigError {
                message: "synthesis.max_depth must be greater than zero".to_string(),
            });
        }

        Ok(parsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_uses_defaults() {
        let cfg: RunConfig = "".parse().unwrap();
        assert_eq!(cfg, RunConfig::default());
        assert_eq!(cfg.synthesis.max_depth, 2);
        assert!(cfg.generates_scope());
    }

    #[test]
    fn parse_full_run_file() {
        let cfg: RunConfig = r#"
            [scope]
            b0 = "Bool"
            f0 = "Bool <- (Abstract, Int)"

            [synthesis]
            max_depth = 3
            probability = 0.4
            seed = 7
            sample = 10

            [output]
            verify = true
            encode = true
            alphabet = "+*"

            [[rules]]
            pattern = "And(*, *)"
            template = "{lhs} and {rhs}"
        "#
        .parse()
        .unwrap();

        assert_eq!(cfg.scope.len(), 2);
        assert_eq!(cfg.scope["f0"], "Bool <- (Abstract, Int)");
        assert!(!cfg.generates_scope());
        assert_eq!(cfg.synthesis.probability, Some(0.4));
        assert_eq!(cfg.synthesis.sample, Some(10));
        assert!(cfg.output.verify && cfg.output.encode);
        assert_eq!(cfg.rules.len(), 1);
        assert_eq!(cfg.rules[0].template, "{lhs} and {rhs}");
    }

    #[test]
    fn partial_generate_section_keeps_other_defaults() {
        let cfg: RunConfig = "[generate]\nint_symbol_count = 3\n".parse().unwrap();
        let generate = cfg.generate.unwrap();
        assert_eq!(generate.int_symbol_count, 3);
        assert_eq!(generate.boolean_symbol_count, 2);
        assert_eq!(generate.max_function_argument_count, 2);
    }

    #[test]
    fn reject_out_of_range_values() {
        let err = "[synthesis]\nprobability = 1.5\n".parse::<RunConfig>().unwrap_err();
        assert!(err.message.contains("probability"));

        let err = "[synthesis]\nmax_depth = 0\n".parse::<RunConfig>().unwrap_err();
        assert!(err.message.contains("max_depth"));

        assert!("[synthesis]\nmax_depth = \"two\"\n".parse::<RunConfig>().is_err());
    }
}
