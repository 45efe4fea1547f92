use vellum::common::SortOrder;
use vellum::config::CoreConfig;
use vellum::errors::{ErrorCode, ErrorKind};
use vellum::query::{unmarshal_sort, SortField, SortParser, MAX_SORT_ORDERS};

#[test]
fn test_unmarshal_sort() {
    let ordering = unmarshal_sort(br#"[{"f":"$asc"},{"g":"$desc"}]"#).unwrap().unwrap();
    let fields: Vec<(&str, bool, bool)> = ordering
        .iter()
        .map(|f| (f.name(), f.is_ascending(), f.missing_values_first()))
        .collect();
    assert_eq!(fields, vec![("f", true, false), ("g", false, false)]);
}

#[test]
fn test_unmarshal_sort_absent() {
    assert_eq!(unmarshal_sort(b"").unwrap(), None);
    assert_eq!(unmarshal_sort(b"[]").unwrap(), None);
    assert_eq!(unmarshal_sort(b"null").unwrap(), None);
}

#[test]
fn test_unmarshal_sort_limit() {
    let err = unmarshal_sort(br#"[{"a":"$asc"},{"b":"$desc"},{"c":"$asc"}]"#).unwrap_err();
    assert_eq!(err.kind(), &ErrorKind::SortParseError);
    assert_eq!(err.code(), ErrorCode::InvalidArgument);
    assert_eq!(
        err.message(),
        format!("Sorting can support up to `{}` fields only", MAX_SORT_ORDERS)
    );
}

#[test]
fn test_unmarshal_sort_invalid_token() {
    let err = unmarshal_sort(br#"[{"a":"$ascending"}]"#).unwrap_err();
    assert_eq!(err.message(), "Sort order can only be `$asc` or `$desc`");
}

#[test]
fn test_sort_parser_from_config() {
    let config = CoreConfig::from_json(br#"{"max_sort_orders": 3}"#).unwrap();
    let parser = SortParser::new(&config);
    let ordering = parser
        .parse(br#"[{"a":"$asc"},{"b":"$desc"},{"c":"$asc"}]"#)
        .unwrap()
        .unwrap();
    assert_eq!(ordering.fields()[2], SortField::new("c", SortOrder::Ascending));
    assert_eq!(
        ordering.sorting_order()[1],
        ("b".to_string(), SortOrder::Descending)
    );
}
