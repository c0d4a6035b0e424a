// Criterion benchmarks for Listing Locator

use criterion::{black_box, criterion_group, criterion_main, Criterion, BenchmarkId};
use listing_locator::core::{derive_criteria, haversine_distance, BoundaryIndex, Matcher};
use listing_locator::models::{Boundary, Coordinate, Listing, ResolvedAddress};
use serde_json::json;

const LAT: f64 = 30.2672;
const LON: f64 = -97.7431;

fn create_listing(id: usize, lat: f64, lon: f64) -> Listing {
    let street_name = if id % 3 == 0 { "Congress Avenue" } else { "Lamar Boulevard" };
    let postal_id = if id % 2 == 0 { 78701 } else { 78704 };

    serde_json::from_value(json!({
        "list_id": id,
        "list_address": {
            "street_number": (100 + id % 50).to_string(),
            "street_name": street_name,
            "city": "Austin",
            "state_prov": "TX",
            "country": "US",
            "coordinates_gp": {"lat": lat, "lon": lon}
        },
        "geo": {
            "city": [949963],
            "postal_code": [postal_id],
            "boundary_agg": [949963, 78701]
        }
    }))
    .unwrap()
}

fn create_address(street_number: Option<&str>) -> ResolvedAddress {
    ResolvedAddress {
        street_number: street_number.map(str::to_string),
        route: street_number.map(|_| "Congress Avenue".to_string()),
        locality: Some("Austin".to_string()),
        admin_level_1: Some("TX".to_string()),
        postal_code: Some("78701".to_string()),
        country: Some("US".to_string()),
        formatted_address: "Austin, TX, USA".to_string(),
        coordinates: Coordinate { lat: LAT, lng: LON },
        ..Default::default()
    }
}

fn create_index() -> BoundaryIndex {
    let boundaries: Vec<Boundary> = (0..2_000)
        .map(|i| {
            let category = if i % 2 == 0 { "CITY" } else { "POSTALCODE" };
            let city = if i == 0 { "Austin".to_string() } else { format!("Town {}", i) };

            serde_json::from_value(json!({
                "_id": 900_000 + i,
                "category": category,
                "city": city,
                "country": "US",
                "display": format!("{}", 78_000 + i)
            }))
            .unwrap()
        })
        .collect();
    BoundaryIndex::new(boundaries)
}

fn bench_haversine_distance(c: &mut Criterion) {
    c.bench_function("haversine_distance", |b| {
        b.iter(|| {
            haversine_distance(
                black_box(LAT),
                black_box(LON),
                black_box(30.2747),
                black_box(-97.7404),
            )
        });
    });
}

fn bench_find_boundary_ids(c: &mut Criterion) {
    let index = create_index();
    let address = create_address(None);

    c.bench_function("find_boundary_ids_2000", |b| {
        b.iter(|| index.find_boundary_ids(black_box(&address)));
    });
}

fn bench_matching(c: &mut Criterion) {
    let matcher = Matcher::with_default_weights();
    let index = create_index();

    let mut group = c.benchmark_group("matching");

    for (label, address) in [("city", create_address(None)), ("exact", create_address(Some("120")))] {
        let criteria = derive_criteria(&address);
        let boundary_ids = index.find_boundary_ids(&address);

        for listing_count in [100, 1_000, 10_000].iter() {
            let listings: Vec<Listing> = (0..*listing_count)
                .map(|i| {
                    let lat_offset = (i as f64 * 0.0001) % 0.05;
                    let lon_offset = (i as f64 * 0.00007) % 0.05;
                    create_listing(i, LAT + lat_offset, LON - lon_offset)
                })
                .collect();

            group.bench_with_input(
                BenchmarkId::new(label, listing_count),
                listing_count,
                |b, _| {
                    b.iter(|| {
                        matcher
                            .search(black_box(&criteria), black_box(&boundary_ids), black_box(&listings))
                            .matches
                            .len()
                    });
                },
            );
        }
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_haversine_distance,
    bench_find_boundary_ids,
    bench_matching
);

criterion_main!(benches);
