//! HTTP API layer with Axum routes and middleware.
//!
//! This crate provides:
//! - REST routes for sales, the admin menu and the HR dashboard
//! - Authentication and mode-switch middleware
//! - JSON error responses

pub mod error;
pub mod middleware;
pub mod routes;

use axum::Router;
use erp_core::admin::{AdminMenu, ModeSwitchService, ModuleRegistry};
use erp_core::dashboard::{DashboardService, DashboardSettings, WidgetRegistry};
use erp_core::sales::SalesService;
use erp_db::{
    AnnouncementRepository, EmployeeRepository, PeopleRepository, PreferenceRepository,
    SaleRepository,
};
use erp_shared::{AppConfig, JwtService, NonceService};
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub db: Arc<DatabaseConnection>,
    /// JWT service for token operations.
    pub jwt_service: Arc<JwtService>,
    /// Nonce service for mode-switch links.
    pub nonce_service: Arc<NonceService>,
    /// Loaded configuration.
    pub config: Arc<AppConfig>,
}

impl AppState {
    /// Sales service over the database repositories.
    #[must_use]
    pub fn sales_service(&self) -> SalesService<SaleRepository, PeopleRepository> {
        SalesService::new(
            Arc::new(SaleRepository::new(
                (*self.db).clone(),
                self.config.accounting.invoice_format.clone(),
            )),
            Arc::new(PeopleRepository::new((*self.db).clone())),
            &self.config.server.public_url,
        )
    }

    /// Mode switch service backed by user preferences.
    #[must_use]
    pub fn mode_switch_service(&self) -> ModeSwitchService<PreferenceRepository> {
        ModeSwitchService::new(
            Arc::new(PreferenceRepository::new((*self.db).clone())),
            ModuleRegistry::standard(),
            self.config.admin.dashboard_url.clone(),
        )
    }

    /// Dashboard service for the HR widgets.
    #[must_use]
    pub fn dashboard_service(&self) -> DashboardService<EmployeeRepository, AnnouncementRepository> {
        DashboardService::new(
            Arc::new(EmployeeRepository::new((*self.db).clone())),
            Arc::new(AnnouncementRepository::new((*self.db).clone())),
            WidgetRegistry::standard(),
            DashboardSettings {
                date_format: self.config.dashboard.date_format.clone(),
                excerpt_words: self.config.dashboard.excerpt_words,
            },
        )
    }

    /// Admin menu registered with the configured position.
    #[must_use]
    pub fn admin_menu(&self) -> AdminMenu {
        AdminMenu::standard(self.config.admin.menu_position)
    }
}

/// Creates the main application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .merge(routes::api_routes_with_state(state.clone()))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
