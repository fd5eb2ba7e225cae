pub mod admin;
pub mod auth;
pub mod cart;
pub mod payment;
pub mod products;
pub mod sellers;
pub mod users;
pub mod wishlist;
