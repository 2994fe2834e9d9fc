// API layer - HTTP endpoints
pub mod admin;
pub mod auth;
pub mod bookings;
pub mod events;
pub mod functions;
pub mod health;
pub mod helpers;
pub mod hotel_services;
pub mod navigation;
pub mod profile;
pub mod promotions;
pub mod restaurant;
pub mod rooms;

pub use admin::AdminApi;
pub use auth::AuthApi;
pub use bookings::BookingsApi;
pub use events::EventsApi;
pub use functions::FunctionsApi;
pub use health::HealthApi;
pub use hotel_services::HotelServicesApi;
pub use navigation::NavigationApi;
pub use profile::ProfileApi;
pub use promotions::PromotionsApi;
pub use restaurant::RestaurantApi;
pub use rooms::RoomsApi;

#[cfg(test)]
mod helpers_test;
