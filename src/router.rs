use axum::{
    Router,
    extract::FromRef,
    http::{HeaderValue, header},
    middleware::from_extractor_with_state,
    routing::{get, put},
};
use std::path::Path;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

use crate::db::AcceptedStorage;
use crate::handlers::accepted::{
    create_row, delete_row, list_rows, list_values, lookup_ids, update_from_query,
};
use crate::handlers::health::health;
use crate::middleware::{ApiKey, RequireApiKey};
use crate::types::{InvoiceNumbers, ResourceKind, VendorNames};

#[derive(Clone)]
pub struct AppState {
    pub storage: AcceptedStorage,
    pub api_key: ApiKey,
}

impl AppState {
    pub fn new(storage: AcceptedStorage, api_key: ApiKey) -> Self {
        Self { storage, api_key }
    }
}

impl FromRef<AppState> for ApiKey {
    fn from_ref(state: &AppState) -> Self {
        state.api_key.clone()
    }
}

/// Full application router.
///
/// - `/healthz`, `/` and `/static/*` are public
/// - every resource route sits behind [`RequireApiKey`]
pub fn app_router(state: AppState, static_dir: impl AsRef<Path>) -> Router {
    let static_dir = static_dir.as_ref();

    let protected = Router::new()
        .merge(resource_routes::<InvoiceNumbers>())
        .merge(resource_routes::<VendorNames>())
        .route_layer(from_extractor_with_state::<RequireApiKey, _>(
            state.clone(),
        ));

    let assets = Router::new()
        .route_service("/", ServeFile::new(static_dir.join("index.html")))
        .nest_service("/static", ServeDir::new(static_dir))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::CACHE_CONTROL,
            HeaderValue::from_static("no-cache"),
        ));

    Router::new()
        .route("/healthz", get(health))
        .merge(assets)
        .merge(protected)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn resource_routes<K: ResourceKind>() -> Router<AppState> {
    let item_path = format!("{}/{{id}}", K::COLLECTION_PATH);
    Router::new()
        .route(
            K::COLLECTION_PATH,
            get(list_rows::<K>).post(create_row::<K>),
        )
        .route(
            &item_path,
            put(update_from_query::<K>).delete(delete_row::<K>),
        )
        .route(K::VALUES_PATH, get(list_values::<K>))
        .route(K::LOOKUP_PATH, get(lookup_ids::<K>))
}
