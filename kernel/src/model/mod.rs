pub mod auth;
pub mod booking;
pub mod date_range;
pub mod flight;
pub mod hotel;
pub mod id;
pub mod itinerary;
pub mod notification;
pub mod user;
