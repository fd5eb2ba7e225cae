use axum::Router;

use crate::state::AppState;

pub mod admin;
pub mod auth;
pub mod cart;
pub mod doc;
pub mod health;
pub mod images;
pub mod params;
pub mod payment;
pub mod products;
pub mod seller;
pub mod user;
pub mod wishlist;

// Build the API router without binding state; it is provided at the top level.
pub fn create_api_router() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/products", products::router())
        .nest("/cart", cart::router())
        .nest("/wishlist", wishlist::router())
        .nest("/seller", seller::router())
        .nest("/user", user::router())
        .nest("/payment", payment::router())
        .nest("/admin", admin::router())
}
