//! Error types for the modifier and resolution engine.
//!
//! Only caller bugs and configuration problems are errors. Disabled
//! ledgers, untestable skills and dice-less impacts are ordinary states
//! reported through return values.

/// Errors that can occur while building ledgers or resolving tests.
#[derive(Debug, thiserror::Error)]
pub enum SohlError {
    /// An arithmetic operator received a value that is not a number.
    #[error("modifier '{abbrev}' requires a numeric value, got '{value}'")]
    NonNumericValue {
        /// Abbreviation of the modifier source.
        abbrev: String,
        /// The offending value as text.
        value: String,
    },

    /// A CUSTOM entry was requested on a ledger with no custom handler.
    #[error("modifier '{abbrev}' uses the custom operator but no custom handler is registered")]
    NoCustomHandler {
        /// Abbreviation of the modifier source.
        abbrev: String,
    },

    /// A result was constructed without the ledger it depends on.
    #[error("missing required ledger for {0}")]
    MissingLedger(&'static str),

    /// An opposed test was built from a test that has not been rolled.
    #[error("test '{0}' has not been evaluated")]
    NotEvaluated(String),

    /// A textual modifier request could not be parsed.
    #[error("invalid modifier: {0}")]
    InvalidModifier(String),

    /// A die size is not permitted by the active variant.
    #[error("die size d{0} is not allowed by this variant")]
    InvalidDie(u32),

    /// An impact asks for more dice than the active variant allows.
    #[error("{count} dice requested, this variant allows at most {max}")]
    TooManyDice {
        /// Dice requested.
        count: u32,
        /// The variant's limit.
        max: u32,
    },

    /// A variant configuration is malformed or unknown.
    #[error("invalid variant config: {0}")]
    InvalidConfig(String),

    /// Reading a configuration file failed.
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    /// A configuration file is not valid JSON for the expected shape.
    #[error("failed to parse config: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience result type for engine operations.
pub type SohlResult<T> = Result<T, SohlError>;
