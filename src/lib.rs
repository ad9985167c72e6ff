// PhotonQL - fluent predicate builder
// Builds AND/OR constraint trees and evaluates them into canonical documents

#![warn(rust_2018_idioms)]

pub mod config;
pub mod predicate;

// Re-exports for convenience
pub use predicate::{
    Constraint, Document, Evaluator, Expression, ExpressionType, Factory, Operand, Operator,
    Predicate, Resume, ValidationRules, Validator,
};

/// PhotonQL error types
pub mod error {
    use thiserror::Error;

    #[derive(Error, Debug)]
    pub enum Error {
        #[error("Invalid state: {0}")]
        InvalidState(String),

        #[error("Invalid argument: {0}")]
        InvalidArgument(String),

        #[error("Validation error: {0}")]
        Validation(String),

        #[error("Configuration error: {0}")]
        Config(String),

        #[error("Serialization error: {0}")]
        Serialization(String),
    }

    impl From<::config::ConfigError> for Error {
        fn from(err: ::config::ConfigError) -> Self {
            Error::Config(err.to_string())
        }
    }

    impl From<serde_json::Error> for Error {
        fn from(err: serde_json::Error) -> Self {
            Error::Serialization(err.to_string())
        }
    }

    impl From<toml::ser::Error> for Error {
        fn from(err: toml::ser::Error) -> Self {
            Error::Serialization(err.to_string())
        }
    }

    pub type Result<T> = std::result::Result<T, Error>;
}

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
