use utoipa::{
    Modify, OpenApi,
    openapi::{
        self,
        OpenApi as OpenApiSpec,
        security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    },
};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    dto::{
        admin,
        auth::{
            LoginRequest, LoginResponse, ResendOtpRequest, ResendOtpResponse, SignupRequest,
            SignupResponse, VerifyEmailRequest,
        },
        cart::{CartItemDto, CartResponse},
        payment::{
            BuyNowResponse, CreateOrderRequest, CreateOrderResponse, OrderList,
            PaymentSuccessRequest, SaveAddressRequest,
        },
        products::ProductList,
        sellers::{SellerLoginResponse, SellerSignupRequest, SellerSignupResponse},
        users::HomeResponse,
        wishlist::WishlistItemDto,
    },
    models::{Order, Product, Seller, User, Variant},
    response::{ApiResponse, Meta},
    routes::{admin as admin_routes, auth, cart, health, images, params, payment, products, seller, user, wishlist},
};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        auth::signup,
        auth::verify_email,
        auth::resend_otp,
        auth::login,
        auth::me,
        products::list_products,
        products::get_product,
        products::products_by_category,
        products::search_products,
        cart::get_cart,
        cart::add_to_cart,
        cart::update_quantity,
        cart::remove_from_cart,
        wishlist::get_wishlist,
        wishlist::add_to_wishlist,
        wishlist::remove_from_wishlist,
        wishlist::check_wishlist,
        seller::signup,
        seller::login,
        seller::verify_email,
        seller::resend_otp,
        seller::profile,
        seller::update_profile,
        seller::my_products,
        seller::upload_product,
        seller::dashboard,
        seller::home,
        user::profile,
        user::update_profile,
        user::home,
        payment::buy_now,
        payment::save_address,
        payment::create_order,
        payment::payment_success,
        payment::list_orders,
        admin_routes::login,
        admin_routes::list_users,
        admin_routes::list_sellers,
        admin_routes::list_products,
        admin_routes::update_user,
        admin_routes::update_seller,
        admin_routes::update_product,
        admin_routes::delete_user,
        admin_routes::delete_seller,
        admin_routes::delete_product,
        images::primary_image,
        images::image_by_id,
    ),
    components(
        schemas(
            User,
            Seller,
            Product,
            Variant,
            Order,
            SignupRequest,
            SignupResponse,
            VerifyEmailRequest,
            ResendOtpRequest,
            ResendOtpResponse,
            LoginRequest,
            LoginResponse,
            SellerSignupRequest,
            SellerSignupResponse,
            SellerLoginResponse,
            ProductList,
            CartItemDto,
            CartResponse,
            WishlistItemDto,
            HomeResponse,
            BuyNowResponse,
            SaveAddressRequest,
            CreateOrderRequest,
            CreateOrderResponse,
            PaymentSuccessRequest,
            OrderList,
            admin::AdminLoginResponse,
            admin::UserUpdateRequest,
            admin::SellerUpdateRequest,
            admin::ProductUpdateRequest,
            admin::UserList,
            admin::SellerList,
            admin::ProductList,
            params::Pagination,
            Meta,
            ApiResponse<Product>,
            ApiResponse<ProductList>,
            ApiResponse<User>,
            ApiResponse<Seller>,
            ApiResponse<CartResponse>,
            ApiResponse<OrderList>
        )
    ),
    security(
        ("bearer_auth" = [])
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Auth", description = "Shopper signup, OTP verification and login"),
        (name = "Products", description = "Public catalog reads"),
        (name = "Cart", description = "Cart endpoints"),
        (name = "Wishlist", description = "Wishlist endpoints"),
        (name = "Seller", description = "Seller onboarding, profile and listings"),
        (name = "User", description = "Shopper profile"),
        (name = "Payment", description = "Gateway handoff and payment recording"),
        (name = "Admin", description = "Account and listing moderation"),
        (name = "Images", description = "Product image passthrough"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
