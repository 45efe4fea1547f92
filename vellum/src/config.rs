//! Configuration for the schema layer.

use serde::Deserialize;

use crate::common::DEFAULT_FIELD_SEPARATOR;
use crate::errors::{ErrorKind, VellumError, VellumResult};
use crate::query::MAX_SORT_ORDERS;

/// Tunables shared by the builder, the operator engine and the sort parser.
///
/// A host service usually embeds this in its own configuration file; every
/// key is optional and falls back to the default.
///
/// # Examples
///
/// ```rust,ignore
/// use vellum::config::CoreConfig;
///
/// let config = CoreConfig::builder()
///     .max_sort_orders(3)
///     .field_separator(".")
///     .build()?;
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CoreConfig {
    max_sort_orders: usize,
    field_separator: String,
}

impl Default for CoreConfig {
    fn default() -> Self {
        CoreConfig {
            max_sort_orders: MAX_SORT_ORDERS,
            field_separator: DEFAULT_FIELD_SEPARATOR.to_string(),
        }
    }
}

impl CoreConfig {
    pub fn builder() -> CoreConfigBuilder {
        CoreConfigBuilder::default()
    }

    /// Parses a JSON configuration fragment and validates it.
    pub fn from_json(payload: &[u8]) -> VellumResult<CoreConfig> {
        let config: CoreConfig = serde_json::from_slice(payload).map_err(|err| {
            log::error!("Invalid core configuration: {}", err);
            VellumError::new(&format!("invalid core configuration: {}", err), ErrorKind::ConfigError)
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Maximum number of fields a sort request may name.
    pub fn max_sort_orders(&self) -> usize {
        self.max_sort_orders
    }

    /// Separator between the segments of a dotted field path.
    pub fn field_separator(&self) -> &str {
        &self.field_separator
    }

    pub fn validate(&self) -> VellumResult<()> {
        if self.max_sort_orders == 0 {
            log::error!("max_sort_orders must be at least 1");
            return Err(VellumError::new(
                "max_sort_orders must be at least 1",
                ErrorKind::ConfigError,
            ));
        }
        if self.field_separator.is_empty() {
            log::error!("field_separator cannot be empty");
            return Err(VellumError::new(
                "field_separator cannot be empty",
                ErrorKind::ConfigError,
            ));
        }
        Ok(())
    }
}

/// Builder for [CoreConfig].
#[derive(Debug, Default)]
pub struct CoreConfigBuilder {
    config: CoreConfig,
}

impl CoreConfigBuilder {
    pub fn max_sort_orders(mut self, max_sort_orders: usize) -> Self {
        self.config.max_sort_orders = max_sort_orders;
        self
    }

    pub fn field_separator(mut self, separator: &str) -> Self {
        self.config.field_separator = separator.to_string();
        self
    }

    pub fn build(self) -> VellumResult<CoreConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}
