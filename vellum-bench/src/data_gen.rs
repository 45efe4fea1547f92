//! Data generators for benchmarks

use chrono::{Duration, Utc};
use fake::faker::address::en::{CityName, StreetName};
use fake::faker::company::en::*;
use fake::faker::internet::en::*;
use fake::faker::lorem::en::*;
use fake::faker::name::en::*;
use fake::Fake;
use rand::Rng;
use serde_json::json;
use uuid::Uuid;

/// Schema of the benchmark collection: every primitive type, a nested
/// object and an array of objects.
pub const ORDER_SCHEMA: &str = r#"{
    "title": "orders",
    "properties": {
        "id": {"type": "integer"},
        "order_uuid": {"type": "string", "format": "uuid"},
        "customer": {"type": "string", "maxLength": 128},
        "email": {"type": "string"},
        "company": {"type": "string"},
        "quantity": {"type": "integer", "format": "int32"},
        "total": {"type": "number"},
        "paid": {"type": "boolean"},
        "placed_at": {"type": "string", "format": "date-time"},
        "signature": {"type": "string", "format": "byte"},
        "tags": {"type": "array", "items": {"type": "string"}},
        "shipping": {
            "type": "object",
            "properties": {
                "city": {"type": "string"},
                "street": {"type": "string"},
                "geo": {
                    "type": "object",
                    "properties": {
                        "lat": {"type": "number"},
                        "lon": {"type": "number"}
                    }
                }
            }
        },
        "lines": {
            "type": "array",
            "items": {
                "type": "object",
                "properties": {
                    "sku": {"type": "string"},
                    "count": {"type": "integer"},
                    "note": {"type": "string"}
                }
            }
        },
        "metadata": {"type": "object"}
    },
    "primary_key": ["id"]
}"#;

/// Generate serialized documents matching [ORDER_SCHEMA]
pub fn generate_orders(count: usize) -> Vec<Vec<u8>> {
    let mut rng = rand::thread_rng();
    (0..count)
        .map(|i| {
            let customer: String = Name().fake();
            let email: String = FreeEmail().fake();
            let company: String = CompanyName().fake();
            let city: String = CityName().fake();
            let street: String = StreetName().fake();
            let tags: Vec<String> = Words(1..5).fake();
            let placed_at = Utc::now() - Duration::minutes(rng.gen_range(0..100_000));
            let lines: Vec<_> = (0..rng.gen_range(1..6))
                .map(|n| {
                    let note: String = Sentence(2..6).fake();
                    json!({
                        "sku": format!("SKU-{}-{}", i, n),
                        "count": rng.gen_range(1..20i64),
                        "note": note
                    })
                })
                .collect();

            let document = json!({
                "id": i as i64,
                "order_uuid": Uuid::new_v4().to_string(),
                "customer": customer,
                "email": email,
                "company": company,
                "quantity": rng.gen_range(1..1000i32),
                "total": rng.gen_range(1.0..5000.0f64),
                "paid": rng.gen_bool(0.7),
                "placed_at": placed_at.to_rfc3339(),
                "signature": "c2lnbmF0dXJl",
                "tags": tags,
                "shipping": {
                    "city": city,
                    "street": street,
                    "geo": {"lat": rng.gen_range(-90.0..90.0f64), "lon": rng.gen_range(-180.0..180.0f64)}
                },
                "lines": lines,
                "metadata": {"source": "bench", "attempt": rng.gen_range(0..3i64)}
            });
            serde_json::to_vec(&document).unwrap_or_default()
        })
        .collect()
}

/// Generate `$set` / `$unset` requests against [ORDER_SCHEMA] documents
pub fn generate_update_requests(count: usize) -> Vec<Vec<u8>> {
    let mut rng = rand::thread_rng();
    (0..count)
        .map(|_| {
            let city: String = CityName().fake();
            let request = json!({
                "$set": {
                    "paid": true,
                    "total": rng.gen_range(1.0..5000.0f64),
                    "shipping.city": city,
                    "shipping.geo.lat": rng.gen_range(-90.0..90.0f64),
                    "status": "shipped"
                },
                "$unset": ["metadata.attempt", "signature"]
            });
            serde_json::to_vec(&request).unwrap_or_default()
        })
        .collect()
}

/// Generate sort requests with one or two fields
pub fn generate_sort_requests(count: usize) -> Vec<Vec<u8>> {
    let fields = ["total", "placed_at", "customer", "quantity"];
    let mut rng = rand::thread_rng();
    (0..count)
        .map(|_| {
            let first = fields[rng.gen_range(0..fields.len())];
            let order = if rng.gen_bool(0.5) { "$asc" } else { "$desc" };
            let request = if rng.gen_bool(0.5) {
                json!([{ first: order }])
            } else {
                json!([{ first: order }, { "id": "$asc" }])
            };
            serde_json::to_vec(&request).unwrap_or_default()
        })
        .collect()
}
