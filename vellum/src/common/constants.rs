// reserved names
pub const RESERVED_PREFIX: &str = "_vellum_";
pub const INTERNAL_ID_FIELD: &str = "_vellum_id";
pub const SEARCH_DATE_KEY_PREFIX: &str = "_vellum_date_";
pub const CREATED_AT: &str = "created_at";
pub const UPDATED_AT: &str = "updated_at";
pub const RESERVED_FIELD_NAMES: [&str; 3] = [INTERNAL_ID_FIELD, CREATED_AT, UPDATED_AT];

// schema constants
pub const INITIAL_SCHEMA_VERSION: u32 = 1;
pub const DEFAULT_FIELD_SEPARATOR: &str = ".";

// identifiers that collide with generated client code
pub const RESERVED_COLLECTION_NAMES: [&str; 24] = [
    "abstract", "as", "async", "await", "break", "class", "const", "continue", "default", "enum",
    "export", "extends", "final", "fn", "import", "interface", "package", "private", "protected",
    "public", "static", "super", "type", "yield",
];

// update operators
pub const SET_OPERATOR: &str = "$set";
pub const UNSET_OPERATOR: &str = "$unset";

/// Returns the search-index key that carries the numeric form of a date-time field.
pub fn to_search_date_key(key: &str) -> String {
    format!("{}{}", SEARCH_DATE_KEY_PREFIX, key)
}
