pub mod audit_logs;
pub mod cart_items;
pub mod email_otps;
pub mod orders;
pub mod product_documents;
pub mod product_images;
pub mod product_specifications;
pub mod product_variants;
pub mod products;
pub mod sellers;
pub mod users;
pub mod wishlist_items;

pub use audit_logs::Entity as AuditLogs;
pub use cart_items::Entity as CartItems;
pub use email_otps::Entity as EmailOtps;
pub use orders::Entity as Orders;
pub use product_documents::Entity as ProductDocuments;
pub use product_images::Entity as ProductImages;
pub use product_specifications::Entity as ProductSpecifications;
pub use product_variants::Entity as ProductVariants;
pub use products::Entity as Products;
pub use sellers::Entity as Sellers;
pub use users::Entity as Users;
pub use wishlist_items::Entity as WishlistItems;
