mod schema_build_test;
mod schema_store_test;
mod search_field_test;
