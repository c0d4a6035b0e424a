use actix_web::{web, HttpResponse, Responder};
use std::sync::Arc;
use validator::Validate;
use crate::config::DataSettings;
use crate::models::{ErrorResponse, HealthResponse, ReloadResponse, SearchListingsRequest, SearchResponse};
use crate::services::{load_boundaries, load_listings, ListingSearchService, LoadError, SearchError};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<ListingSearchService>,
    pub data: DataSettings,
}

/// Configure all listing-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/listings/search", web::post().to(search_listings))
        .route("/listings/{list_id}/boundaries", web::get().to(listing_boundaries))
        .route("/boundaries/{id}", web::get().to(boundary_info))
        .route("/admin/reload", web::post().to(reload_data));
}

fn error_response(status: actix_web::http::StatusCode, error: &str, message: String) -> HttpResponse {
    HttpResponse::build(status).json(ErrorResponse {
        error: error.to_string(),
        message,
        status_code: status.as_u16(),
    })
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let snapshot = state.service.snapshot();

    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
        listings: snapshot.listings().len(),
        boundaries: snapshot.index().len(),
    })
}

/// Search listings endpoint
///
/// POST /api/v1/listings/search
///
/// Request body:
/// ```json
/// {
///   "address": "400 Inwood Road, Austin",
///   "limit": 20
/// }
/// ```
async fn search_listings(
    state: web::Data<AppState>,
    req: web::Json<SearchListingsRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for search request: {:?}", errors);
        return error_response(
            actix_web::http::StatusCode::BAD_REQUEST,
            "validation_failed",
            errors.to_string(),
        );
    }

    let limit = req.limit.map(usize::from);
    tracing::info!("Searching listings for {:?}, limit: {:?}", req.address, limit);

    match state.service.search(&req.address, limit).await {
        Ok(outcome) => HttpResponse::Ok().json(SearchResponse {
            query: req.address.clone(),
            formatted_address: outcome.resolved.formatted_address,
            specificity: outcome.criteria.specificity,
            radius_m: outcome.criteria.radius_m,
            boundary_ids: outcome.boundary_ids,
            total_results: outcome.results.len(),
            results: outcome.results,
        }),
        Err(e @ SearchError::AddressNotFound) => {
            error_response(actix_web::http::StatusCode::NOT_FOUND, "address_not_found", e.to_string())
        }
        Err(e @ SearchError::Resolver(_)) => {
            error_response(actix_web::http::StatusCode::BAD_GATEWAY, "resolver_error", e.to_string())
        }
    }
}

/// Boundary lookup endpoint
///
/// GET /api/v1/boundaries/{id}
async fn boundary_info(state: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    let id = path.into_inner();

    match state.service.get_boundary_info(&id) {
        Some(lookup) => HttpResponse::Ok().json(lookup),
        None => error_response(
            actix_web::http::StatusCode::NOT_FOUND,
            "boundary_not_found",
            format!("No boundary with id {}", id),
        ),
    }
}

/// Listing boundaries endpoint
///
/// GET /api/v1/listings/{list_id}/boundaries
async fn listing_boundaries(state: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    let list_id = path.into_inner();

    match state.service.listing_boundaries_by_id(&list_id) {
        Some(boundaries) => HttpResponse::Ok().json(boundaries),
        None => error_response(
            actix_web::http::StatusCode::NOT_FOUND,
            "listing_not_found",
            format!("No listing with id {}", list_id),
        ),
    }
}

/// Reload both data snapshots from disk
///
/// POST /api/v1/admin/reload
async fn reload_data(state: web::Data<AppState>) -> impl Responder {
    let paths = state.data.clone();
    let loaded = web::block(move || -> Result<_, LoadError> {
        Ok((load_listings(&paths.listings_path)?, load_boundaries(&paths.boundaries_path)?))
    })
    .await;

    match loaded {
        Ok(Ok((listings, boundaries))) => {
            let response = ReloadResponse {
                listings: listings.len(),
                boundaries: boundaries.len(),
            };
            state.service.load_data(listings, boundaries);
            HttpResponse::Ok().json(response)
        }
        Ok(Err(e)) => {
            tracing::error!("Data reload failed: {}", e);
            error_response(actix_web::http::StatusCode::INTERNAL_SERVER_ERROR, "reload_failed", e.to_string())
        }
        Err(e) => {
            tracing::error!("Data reload task failed: {}", e);
            error_response(actix_web::http::StatusCode::INTERNAL_SERVER_ERROR, "reload_failed", e.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{http::StatusCode, test, App};
    use async_trait::async_trait;
    use crate::core::Matcher;
    use crate::models::{Coordinate, ResolvedAddress};
    use crate::services::{AddressResolver, GeocodeError};

    struct AustinResolver;

    #[async_trait]
    impl AddressResolver for AustinResolver {
        async fn resolve(&self, address: &str) -> Result<Option<ResolvedAddress>, GeocodeError> {
            if address == "nowhere" {
                return Ok(None);
            }
            Ok(Some(ResolvedAddress {
                locality: Some("Austin".to_string()),
                admin_level_1: Some("TX".to_string()),
                country: Some("US".to_string()),
                formatted_address: "Austin, TX, USA".to_string(),
                coordinates: Coordinate { lat: 30.2672, lng: -97.7431 },
                ..Default::default()
            }))
        }
    }

    fn create_state() -> AppState {
        AppState {
            service: Arc::new(ListingSearchService::new(
                Arc::new(AustinResolver),
                Matcher::default(),
                vec![],
                vec![],
            )),
            data: DataSettings::default(),
        }
    }

    #[actix_web::test]
    async fn test_search_validation() {
        let app = test::init_service(
            App::new().app_data(web::Data::new(create_state())).configure(configure),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/listings/search")
            .set_json(serde_json::json!({"address": ""}))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn test_search_not_found() {
        let app = test::init_service(
            App::new().app_data(web::Data::new(create_state())).configure(configure),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/listings/search")
            .set_json(serde_json::json!({"address": "nowhere"}))
            .to_request();
        let body: ErrorResponse = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body.error, "address_not_found");
        assert_eq!(body.message, "could not parse address");
        assert_eq!(body.status_code, 404);
    }

    #[actix_web::test]
    async fn test_unknown_boundary() {
        let app = test::init_service(
            App::new().app_data(web::Data::new(create_state())).configure(configure),
        )
        .await;

        let req = test::TestRequest::get().uri("/boundaries/missing").to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }
}
