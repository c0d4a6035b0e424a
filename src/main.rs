use actix_cors::Cors;
use actix_web::{web, App, HttpServer, HttpResponse, middleware, error, http::StatusCode};
use listing_locator::config::{LoggingSettings, Settings};
use listing_locator::core::Matcher;
use listing_locator::models::ErrorResponse;
use listing_locator::routes::{self, listings::AppState};
use listing_locator::services::{
    load_boundaries, load_listings, CachedResolver, GoogleGeocoder, ListingSearchService,
};
use std::sync::Arc;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

/// JSON error response for payload errors
#[derive(Debug)]
struct JsonError(ErrorResponse);

impl std::fmt::Display for JsonError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.0.error, self.0.message)
    }
}

impl std::error::Error for JsonError {}

impl error::ResponseError for JsonError {
    fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.0.status_code).unwrap_or(StatusCode::BAD_REQUEST)
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(&self.0)
    }
}

/// Handle JSON payload errors
fn handle_json_payload_error(err: error::JsonPayloadError, req: &actix_web::HttpRequest) -> actix_web::Error {
    tracing::info!("JSON payload error on {}: {}", req.path(), err);
    JsonError(ErrorResponse {
        error: "invalid_json".to_string(),
        message: format!("Invalid JSON: {}", err),
        status_code: 400,
    })
    .into()
}

/// Handle query payload errors
fn handle_query_payload_error(err: error::QueryPayloadError, _req: &actix_web::HttpRequest) -> actix_web::Error {
    JsonError(ErrorResponse {
        error: "invalid_query".to_string(),
        message: format!("Invalid query: {}", err),
        status_code: 400,
    })
    .into()
}

fn init_logging(logging: &LoggingSettings) {
    // RUST_LOG wins over LOG_LEVEL and the config file
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true);

    if logging.is_pretty() {
        subscriber.pretty().init();
    } else {
        subscriber.compact().init();
    }
}

fn startup_error<E: std::fmt::Display>(context: &str, e: E) -> std::io::Error {
    error!("{}: {}", context, e);
    std::io::Error::new(std::io::ErrorKind::Other, format!("{}: {}", context, e))
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    let settings = Settings::load();
    let logging = settings
        .as_ref()
        .map(|s| s.logging.clone())
        .unwrap_or_default()
        .with_env_overrides();
    init_logging(&logging);

    info!("Starting listing locator service...");

    let settings = settings.map_err(|e| startup_error("Configuration error", e))?;

    info!("Configuration loaded successfully");

    if settings.geocoder.api_key.is_empty() {
        warn!("No geocoder API key configured, address searches will be rejected");
    }

    let geocoder = GoogleGeocoder::new(
        settings.geocoder.endpoint.clone(),
        settings.geocoder.api_key.clone(),
        settings.geocoder.timeout(),
    )
    .map_err(|e| startup_error("Failed to build geocoder client", e))?;

    let resolver = CachedResolver::new(geocoder, settings.cache.capacity(), settings.cache.ttl());

    info!(
        "Geocode cache initialized ({} entries, TTL: {}s)",
        settings.cache.capacity(),
        settings.cache.ttl().as_secs()
    );

    let listings = load_listings(&settings.data.listings_path)
        .map_err(|e| startup_error("Failed to load listings", e))?;
    let boundaries = load_boundaries(&settings.data.boundaries_path)
        .map_err(|e| startup_error("Failed to load boundaries", e))?;

    let weights = settings.scoring_weights();
    let matcher = Matcher::new(weights);

    info!("Matcher initialized with weights: {:?}", weights);

    let service = Arc::new(ListingSearchService::new(
        Arc::new(resolver),
        matcher,
        listings,
        boundaries,
    ));

    let app_state = AppState {
        service,
        data: settings.data.clone(),
    };

    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .app_data(web::JsonConfig::default().error_handler(handle_json_payload_error))
            .app_data(web::QueryConfig::default().error_handler(handle_query_payload_error))
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .configure(routes::configure_routes)
    })
    .workers(workers)
    .bind((host, port))?
    .run()
    .await
}
