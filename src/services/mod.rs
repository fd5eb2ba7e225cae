pub mod admin_service;
pub mod auth_service;
pub mod cart_service;
pub mod otp_service;
pub mod payment_service;
pub mod product_service;
pub mod seller_service;
pub mod user_service;
pub mod wishlist_service;
