//! Typed access to a registered [`ConfigSource`].
//!
//! Every typed getter comes in two flavours:
//! - strict (`get_int`, `get_bool`, ...) returns [`KeyconfError::NotFound`]
//!   when the key is absent and [`KeyconfError::WrongValue`] when the value
//!   cannot be coerced;
//! - defaulted (`get_int_or`, `get_bool_or`, ...) never fails and returns the
//!   supplied default in both of those cases.
//!
//! The accessor is an ordinary value passed to whoever needs configuration.
//! It starts without a source; lookups made before
//! [`ConfigAccessor::set_default_config`] see every key as absent.

use std::fmt;
use std::sync::Arc;

use tracing::warn;

use crate::domain::coerce;
use crate::domain::error::{CoercionError, KeyconfError};
use crate::domain::value::ConfigValue;
use crate::ports::config_source::ConfigSource;

/// Shared handle to a thread-safe config source.
pub type SharedSource = Arc<dyn ConfigSource + Send + Sync>;

#[derive(Clone, Default)]
pub struct ConfigAccessor {
    source: Option<SharedSource>,
}

impl fmt::Debug for ConfigAccessor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfigAccessor")
            .field("registered", &self.source.is_some())
            .finish()
    }
}

impl ConfigAccessor {
    /// An accessor with no source registered yet.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_source<S>(source: S) -> Self
    where
        S: ConfigSource + Send + Sync + 'static,
    {
        Self {
            source: Some(Arc::new(source)),
        }
    }

    /// Registers `source`, replacing any previously registered one.
    pub fn set_default_config<S>(&mut self, source: S)
    where
        S: ConfigSource + Send + Sync + 'static,
    {
        self.source = Some(Arc::new(source));
    }

    /// Like [`set_default_config`](Self::set_default_config) for a source that
    /// is already shared elsewhere.
    pub fn set_shared_config(&mut self, source: SharedSource) {
        self.source = Some(source);
    }

    pub fn is_registered(&self) -> bool {
        self.source.is_some()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get_or_null(key).is_some()
    }

    pub fn get(&self, key: &str) -> Result<ConfigValue, KeyconfError> {
        self.get_or_null(key).ok_or_else(|| KeyconfError::NotFound {
            key: key.to_string(),
        })
    }

    pub fn get_or(&self, key: &str, default: impl Into<ConfigValue>) -> ConfigValue {
        self.get_or_null(key).unwrap_or_else(|| default.into())
    }

    /// Raw lookup. Returns `None` for absent keys, and logs a warning on every
    /// call made while no source is registered.
    pub fn get_or_null(&self, key: &str) -> Option<ConfigValue> {
        match &self.source {
            Some(source) => source.get(key),
            None => {
                warn!(
                    key,
                    "no config source registered; call ConfigAccessor::set_default_config first"
                );
                None
            }
        }
    }

    pub fn get_bool(&self, key: &str) -> Result<bool, KeyconfError> {
        self.strict(key, coerce::to_bool)
    }

    pub fn get_bool_or(&self, key: &str, default: bool) -> bool {
        self.defaulted(key, default, coerce::to_bool)
    }

    pub fn get_int(&self, key: &str) -> Result<i32, KeyconfError> {
        self.strict(key, coerce::to_i32)
    }

    pub fn get_int_or(&self, key: &str, default: i32) -> i32 {
        self.defaulted(key, default, coerce::to_i32)
    }

    pub fn get_long(&self, key: &str) -> Result<i64, KeyconfError> {
        self.strict(key, coerce::to_i64)
    }

    pub fn get_long_or(&self, key: &str, default: i64) -> i64 {
        self.defaulted(key, default, coerce::to_i64)
    }

    pub fn get_float(&self, key: &str) -> Result<f32, KeyconfError> {
        self.strict(key, coerce::to_f32)
    }

    pub fn get_float_or(&self, key: &str, default: f32) -> f32 {
        self.defaulted(key, default, coerce::to_f32)
    }

    pub fn get_double(&self, key: &str) -> Result<f64, KeyconfError> {
        self.strict(key, coerce::to_f64)
    }

    pub fn get_double_or(&self, key: &str, default: f64) -> f64 {
        self.defaulted(key, default, coerce::to_f64)
    }

    pub fn get_string(&self, key: &str) -> Result<String, KeyconfError> {
        self.get(key).map(|value| coerce::to_text(&value))
    }

    /// The default is substituted before stringification, so an absent key
    /// yields `default` itself.
    pub fn get_string_or(&self, key: &str, default: &str) -> String {
        coerce::to_text(&self.get_or(key, default))
    }

    fn strict<T>(
        &self,
        key: &str,
        convert: fn(&ConfigValue) -> Result<T, CoercionError>,
    ) -> Result<T, KeyconfError> {
        let value = self.get(key)?;
        convert(&value).map_err(|cause| KeyconfError::WrongValue {
            key: key.to_string(),
            value,
            cause,
        })
    }

    fn defaulted<T>(
        &self,
        key: &str,
        default: T,
        convert: fn(&ConfigValue) -> Result<T, CoercionError>,
    ) -> T {
        self.get_or_null(key)
            .and_then(|value| convert(&value).ok())
            .unwrap_or(default)
    }
}
