//! Configuration source port trait.

use crate::domain::value::ConfigValue;

/// A read-only key-value lookup backing a
/// [`ConfigAccessor`](crate::domain::accessor::ConfigAccessor).
///
/// Implementations decide how keys are addressed and where values come from.
/// Returning `None` means the key has no value.
pub trait ConfigSource {
    fn get(&self, key: &str) -> Option<ConfigValue>;
}
