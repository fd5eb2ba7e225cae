use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    models::{Product, User},
    validation::UploadedFile,
};

/// Profile update parsed out of a multipart form.
#[derive(Debug, Default)]
pub struct UserProfileUpdate {
    pub alternate_number: Option<String>,
    pub address: Option<String>,
    pub photo: Option<UploadedFile>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct HomeResponse {
    pub user: User,
    pub products: Vec<Product>,
    pub categories: Vec<String>,
}
