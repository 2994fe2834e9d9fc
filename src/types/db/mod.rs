// Database entities - SeaORM models
pub mod booking;
pub mod event;
pub mod event_registration;
pub mod menu_item;
pub mod profile;
pub mod promotion;
pub mod refresh_token;
pub mod room;
pub mod service;
pub mod table_reservation;
pub mod user;
pub mod user_role;
