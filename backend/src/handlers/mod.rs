pub mod admin;
pub mod auth;
pub mod campaigns;
pub mod health;
pub mod models;
pub mod products;
