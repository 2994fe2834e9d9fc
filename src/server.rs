use std::sync::Arc;

use poem::middleware::{Cors, Tracing};
use poem::{Endpoint, EndpointExt, Route};
use poem_openapi::OpenApiService;

use crate::api::{
    AdminApi, AuthApi, BookingsApi, EventsApi, FunctionsApi, HealthApi, HotelServicesApi, NavigationApi, ProfileApi,
    PromotionsApi, RestaurantApi, RoomsApi,
};
use crate::app_data::AppData;

/// Compose the HTTP application
///
/// API under `/api`, Swagger UI under `/swagger`, wrapped in CORS and
/// request tracing.
pub fn build_app(app_data: Arc<AppData>) -> impl Endpoint {
    let apis = (
        (
            HealthApi::new(app_data.clone()),
            AuthApi::new(app_data.clone()),
            ProfileApi::new(app_data.clone()),
            NavigationApi::new(app_data.clone()),
            FunctionsApi::new(app_data.clone()),
            AdminApi::new(app_data.clone()),
        ),
        (
            RoomsApi::new(app_data.clone()),
            BookingsApi::new(app_data.clone()),
            RestaurantApi::new(app_data.clone()),
            EventsApi::new(app_data.clone()),
            PromotionsApi::new(app_data.clone()),
            HotelServicesApi::new(app_data.clone()),
        ),
    );

    let api_service = OpenApiService::new(apis, "Hotel Backend API", env!("CARGO_PKG_VERSION"))
        .server(format!("http://{}/api", app_data.settings.server_address()));
    let ui = api_service.swagger_ui();

    let cors = match app_data.settings.cors_allow_origin() {
        Some(origin) => Cors::new().allow_origin(origin),
        None => Cors::new(),
    };

    Route::new()
        .nest("/api", api_service)
        .nest("/swagger", ui)
        .with(cors)
        .with(Tracing)
}
