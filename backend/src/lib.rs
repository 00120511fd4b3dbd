//! Lava-Jato backend: appointment scheduling, loyalty and finances for a
//! car-wash, over a cloud store with local JSON fallback.

pub mod config;
pub mod domain;
pub mod io;
pub mod storage;

use std::sync::Arc;

use anyhow::Result;
use axum::http::Method;
use axum::Router;
use log::info;
use tower_http::cors::{Any, CorsLayer};

use domain::sync::{build_sync, Heartbeat, SharedCache, Synchronizer};
use domain::{
    AppointmentService, BookingService, CatalogService, EstablishmentService, ExpenseService,
    RevenueService, UserService, VehicleService,
};
use storage::EntityStore;

/// Shared handler state: the store, the synchronized cache and one instance
/// of each domain service.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<EntityStore>,
    pub cache: SharedCache,
    pub sync: Arc<Synchronizer>,
    pub heartbeat: Arc<Heartbeat>,
    pub appointment_service: Arc<AppointmentService>,
    pub booking_service: Arc<BookingService>,
    pub revenue_service: Arc<RevenueService>,
    pub expense_service: Arc<ExpenseService>,
    pub catalog_service: Arc<CatalogService>,
    pub user_service: Arc<UserService>,
    pub vehicle_service: Arc<VehicleService>,
    pub establishment_service: Arc<EstablishmentService>,
}

/// Wire up the store, cache and services, and run the initial sync.
pub async fn initialize_backend(cfg: &config::Config) -> Result<AppState> {
    info!("setting up entity store");
    let store = Arc::new(EntityStore::new(cfg.db_url.clone(), &cfg.data_dir)?);
    store.init(&cfg.admin_phone, &cfg.admin_password).await?;

    info!("setting up domain services");
    let (cache, sync) = build_sync(store.clone());
    sync.sync_all().await;

    let appointment_service = Arc::new(AppointmentService::new(
        store.clone(),
        cache.clone(),
        sync.clone(),
    ));
    let state = AppState {
        booking_service: Arc::new(BookingService::new(
            store.clone(),
            cache.clone(),
            appointment_service.clone(),
        )),
        appointment_service,
        revenue_service: Arc::new(RevenueService::new(
            store.clone(),
            cache.clone(),
            sync.clone(),
        )),
        expense_service: Arc::new(ExpenseService::new(
            store.clone(),
            cache.clone(),
            sync.clone(),
        )),
        catalog_service: Arc::new(CatalogService::new(
            store.clone(),
            cache.clone(),
            sync.clone(),
        )),
        user_service: Arc::new(UserService::new(store.clone())),
        vehicle_service: Arc::new(VehicleService::new(store.clone())),
        establishment_service: Arc::new(EstablishmentService::new(
            store.clone(),
            cache.clone(),
            sync.clone(),
        )),
        heartbeat: Arc::new(Heartbeat::default()),
        store,
        cache,
        sync,
    };
    Ok(state)
}

/// The Axum router with all routes configured.
pub fn create_router(app_state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any);

    let api_routes = Router::new()
        .nest("/health", io::rest::health_apis::router())
        .nest("/auth", io::rest::auth_apis::router())
        .nest("/appointments", io::rest::appointment_apis::router())
        .nest("/bookings", io::rest::booking_apis::router())
        .nest("/services", io::rest::catalog_apis::router())
        .nest("/establishment", io::rest::establishment_apis::router())
        .merge(io::rest::finance_apis::router())
        .merge(io::rest::user_apis::router());

    Router::new()
        .nest("/api", api_routes)
        .layer(cors)
        .with_state(app_state)
}
