//! Error types for lookup and coercion.

use crate::domain::value::ConfigValue;

/// Why a present value could not be turned into the requested type.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CoercionError {
    #[error("not a number: {text:?}")]
    Number { text: String },

    #[error("expected {expected}, found {found}")]
    Type {
        expected: &'static str,
        found: &'static str,
    },
}

impl CoercionError {
    pub(crate) fn mismatch(expected: &'static str, found: &ConfigValue) -> Self {
        CoercionError::Type {
            expected,
            found: found.kind(),
        }
    }
}

/// Top-level error type for keyconf.
#[derive(Debug, thiserror::Error)]
pub enum KeyconfError {
    #[error("config not found: {key}")]
    NotFound { key: String },

    #[error("wrong config value for {key}: {value:?}")]
    WrongValue {
        key: String,
        value: ConfigValue,
        #[source]
        cause: CoercionError,
    },

    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("logger error: {0}")]
    Logger(String),
}

impl From<&KeyconfError> for std::process::ExitCode {
    fn from(err: &KeyconfError) -> Self {
        let code: u8 = match err {
            KeyconfError::Logger(_) => 1,
            KeyconfError::NotFound { .. } => 2,
            KeyconfError::WrongValue { .. } => 3,
            KeyconfError::ConfigParse { .. } => 4,
        };
        std::process::ExitCode::from(code)
    }
}
