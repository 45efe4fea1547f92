use serde_json::Value;

use crate::common::util::decode_value;
use crate::common::SortOrder;
use crate::config::CoreConfig;
use crate::errors::{ErrorKind, VellumError, VellumResult};

/// Maximum number of sort fields accepted by default.
pub const MAX_SORT_ORDERS: usize = 2;
pub const ASC: &str = "$asc";
pub const DESC: &str = "$desc";
/// Missing, empty and null values always sort last.
pub const MISSING_VALUES_FIRST: bool = false;

/// One field of a requested sort order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortField {
    name: String,
    order: SortOrder,
    missing_values_first: bool,
}

impl SortField {
    pub fn new(name: &str, order: SortOrder) -> Self {
        SortField {
            name: name.to_string(),
            order,
            missing_values_first: MISSING_VALUES_FIRST,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn order(&self) -> SortOrder {
        self.order
    }

    pub fn is_ascending(&self) -> bool {
        self.order.is_ascending()
    }

    pub fn missing_values_first(&self) -> bool {
        self.missing_values_first
    }
}

/// A parsed, non-empty sort request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ordering {
    fields: Vec<SortField>,
}

impl Ordering {
    pub fn fields(&self) -> &[SortField] {
        &self.fields
    }

    pub fn iter(&self) -> impl Iterator<Item = &SortField> {
        self.fields.iter()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    #[inline]
    pub fn sorting_order(&self) -> Vec<(String, SortOrder)> {
        let mut sorting_order = Vec::with_capacity(self.fields.len());
        for field in &self.fields {
            sorting_order.push((field.name.clone(), field.order));
        }
        sorting_order
    }
}

/// Parses client sort requests such as `[{"f": "$asc"}, {"g": "$desc"}]`.
#[derive(Debug, Clone)]
pub struct SortParser {
    max_sort_orders: usize,
}

impl Default for SortParser {
    fn default() -> Self {
        SortParser {
            max_sort_orders: MAX_SORT_ORDERS,
        }
    }
}

impl SortParser {
    pub fn new(config: &CoreConfig) -> Self {
        SortParser {
            max_sort_orders: config.max_sort_orders(),
        }
    }

    /// Parses a sort request.
    ///
    /// Empty, whitespace-only, `null` and `[]` inputs request no ordering and
    /// yield `None`.
    ///
    /// # Errors
    ///
    /// Returns [ErrorKind::SortParseError] for malformed input, a non-object
    /// element, an element with other than one key, too many fields or a
    /// token other than `$asc` / `$desc`. Elements are checked in order.
    pub fn parse(&self, input: &[u8]) -> VellumResult<Option<Ordering>> {
        if input.iter().all(u8::is_ascii_whitespace) {
            return Ok(None);
        }

        let elements = match decode_value(input) {
            Ok(Value::Null) => return Ok(None),
            Ok(Value::Array(elements)) => elements,
            Ok(_) => return Err(invalid_value()),
            Err(err) => {
                log::error!("Malformed sort request: {}", err);
                return Err(VellumError::new_with_cause(
                    "Invalid value for `sort`",
                    ErrorKind::SortParseError,
                    err,
                ));
            }
        };
        if elements.is_empty() {
            return Ok(None);
        }

        let mut fields = Vec::with_capacity(elements.len().min(self.max_sort_orders));
        for element in &elements {
            let object = match element {
                Value::Object(object) if object.len() == 1 => object,
                _ => return Err(invalid_value()),
            };

            if fields.len() >= self.max_sort_orders {
                let message = format!(
                    "Sorting can support up to `{}` fields only",
                    self.max_sort_orders
                );
                log::error!("{}", message);
                return Err(VellumError::new(&message, ErrorKind::SortParseError));
            }

            for (name, token) in object {
                let order = match token.as_str() {
                    Some(ASC) => SortOrder::Ascending,
                    Some(DESC) => SortOrder::Descending,
                    _ => {
                        let message = format!("Sort order can only be `{}` or `{}`", ASC, DESC);
                        log::error!("{}", message);
                        return Err(VellumError::new(&message, ErrorKind::SortParseError));
                    }
                };
                fields.push(SortField::new(name, order));
            }
        }

        Ok(Some(Ordering { fields }))
    }
}

/// Parses a sort request with the default field limit.
pub fn unmarshal_sort(input: &[u8]) -> VellumResult<Option<Ordering>> {
    SortParser::default().parse(input)
}

fn invalid_value() -> VellumError {
    log::error!("Invalid value for `sort`");
    VellumError::new("Invalid value for `sort`", ErrorKind::SortParseError)
}
