#![forbid(unsafe_code)]

pub mod config;
pub mod run;
pub mod syntax;

pub use config::{ConfigError, GenerateConfig, OutputConfig, RuleConfig, RunConfig, SynthesisConfig};
pub use run::{Row, Run, RunError};
pub use syntax::{parse_pattern, parse_type, SyntaxError};
