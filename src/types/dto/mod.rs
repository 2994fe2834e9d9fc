// Request and response models exposed through the OpenAPI surface
pub mod admin;
pub mod auth;
pub mod bookings;
pub mod common;
pub mod events;
pub mod hotel_services;
pub mod navigation;
pub mod profile;
pub mod promotions;
pub mod restaurant;
pub mod rooms;
