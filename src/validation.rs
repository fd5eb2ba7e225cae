use email_address::EmailAddress;

use crate::error::{AppError, AppResult};

pub const PASSWORD_SYMBOLS: &str = "!@#$%^&*()_+=<>?";
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// A file part pulled out of a multipart request.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub file_name: String,
    pub content_type: Option<String>,
    pub data: Vec<u8>,
}

pub fn validate_password(password: &str) -> AppResult<()> {
    if password.len() < 8 {
        return Err(AppError::BadRequest(
            "Password must be at least 8 characters long".to_string(),
        ));
    }
    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        return Err(AppError::BadRequest(
            "Password must include an uppercase letter".to_string(),
        ));
    }
    if !password.chars().any(|c| c.is_ascii_lowercase()) {
        return Err(AppError::BadRequest(
            "Password must include a lowercase letter".to_string(),
        ));
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        return Err(AppError::BadRequest(
            "Password must include a digit".to_string(),
        ));
    }
    if !password.chars().any(|c| PASSWORD_SYMBOLS.contains(c)) {
        return Err(AppError::BadRequest(format!(
            "Password must include a special character from {PASSWORD_SYMBOLS}"
        )));
    }
    Ok(())
}

pub fn validate_email(email: &str) -> AppResult<()> {
    if email.trim().is_empty() {
        return Err(AppError::BadRequest("Email is required".to_string()));
    }
    if email.parse::<EmailAddress>().is_err() {
        return Err(AppError::BadRequest("Invalid email format".to_string()));
    }
    Ok(())
}

/// Product images must be JPG/JPEG by filename extension, whatever the part's
/// declared content type says, and at most 10 MB measured.
pub fn validate_product_image(file: &UploadedFile) -> AppResult<()> {
    if file.file_name.trim().is_empty() {
        return Err(AppError::BadRequest(
            "Image filename is required".to_string(),
        ));
    }

    let lower = file.file_name.to_lowercase();
    if !lower.ends_with(".jpg") && !lower.ends_with(".jpeg") {
        return Err(AppError::BadRequest(format!(
            "Only JPG and JPEG image formats are allowed. Provided: {}",
            file.file_name
        )));
    }

    if file.data.len() > MAX_UPLOAD_BYTES {
        let size_mb = file.data.len() as f64 / (1024.0 * 1024.0);
        return Err(AppError::BadRequest(format!(
            "Image size exceeds 10MB limit. Size: {size_mb:.2} MB"
        )));
    }

    if let Some(content_type) = file.content_type.as_deref() {
        if !content_type.eq_ignore_ascii_case("image/jpeg")
            && !content_type.eq_ignore_ascii_case("image/jpg")
        {
            tracing::warn!(content_type, "content type mismatch, expected image/jpeg");
        }
    }

    Ok(())
}

/// Profile photos additionally accept PNG.
pub fn validate_profile_photo(file: &UploadedFile) -> AppResult<()> {
    if file.file_name.trim().is_empty() {
        return Err(AppError::BadRequest(
            "Photo filename is required".to_string(),
        ));
    }

    let lower = file.file_name.to_lowercase();
    if !lower.ends_with(".jpg") && !lower.ends_with(".jpeg") && !lower.ends_with(".png") {
        return Err(AppError::BadRequest(format!(
            "Only JPG, JPEG, and PNG image formats are allowed. Provided: {}",
            file.file_name
        )));
    }

    if file.data.len() > MAX_UPLOAD_BYTES {
        let size_mb = file.data.len() as f64 / (1024.0 * 1024.0);
        return Err(AppError::BadRequest(format!(
            "Photo size exceeds 10MB limit. Size: {size_mb:.2} MB"
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(result: AppResult<()>) -> String {
        match result {
            Err(AppError::BadRequest(msg)) => msg,
            other => panic!("expected BadRequest, got {other:?}"),
        }
    }

    #[test]
    fn password_too_short_is_rejected() {
        let msg = message(validate_password("Ab1!x"));
        assert!(msg.contains("at least 8 characters"), "{msg}");
    }

    #[test]
    fn password_missing_uppercase_is_rejected() {
        let msg = message(validate_password("abcdef1!"));
        assert!(msg.contains("uppercase"), "{msg}");
    }

    #[test]
    fn password_missing_lowercase_is_rejected() {
        let msg = message(validate_password("ABCDEF1!"));
        assert!(msg.contains("lowercase"), "{msg}");
    }

    #[test]
    fn password_missing_digit_is_rejected() {
        let msg = message(validate_password("Abcdefg!"));
        assert!(msg.contains("digit"), "{msg}");
    }

    #[test]
    fn password_missing_symbol_is_rejected() {
        let msg = message(validate_password("Abcdefg1"));
        assert!(msg.contains("special character"), "{msg}");
    }

    #[test]
    fn strong_password_is_accepted() {
        assert!(validate_password("Str0ng_pass!").is_ok());
        // Every symbol in the allowed set satisfies the rule.
        for symbol in PASSWORD_SYMBOLS.chars() {
            let password = format!("Abcdefg1{symbol}");
            assert!(validate_password(&password).is_ok(), "{password}");
        }
    }

    #[test]
    fn email_format_is_checked() {
        assert!(validate_email("alice@example.com").is_ok());
        assert!(validate_email("").is_err());
        assert!(validate_email("not-an-email").is_err());
    }

    fn image(name: &str, content_type: Option<&str>, len: usize) -> UploadedFile {
        UploadedFile {
            file_name: name.to_string(),
            content_type: content_type.map(str::to_string),
            data: vec![0u8; len],
        }
    }

    #[test]
    fn image_extension_beats_content_type() {
        // Declared image/jpeg, but the extension is what counts.
        let msg = message(validate_product_image(&image(
            "photo.png",
            Some("image/jpeg"),
            128,
        )));
        assert!(msg.contains("Only JPG and JPEG"), "{msg}");
        assert!(msg.contains("photo.png"), "{msg}");
    }

    #[test]
    fn image_case_insensitive_extension_is_accepted() {
        assert!(validate_product_image(&image("PHOTO.JPEG", None, 128)).is_ok());
        assert!(validate_product_image(&image("photo.jpg", Some("application/octet-stream"), 128)).is_ok());
    }

    #[test]
    fn oversized_image_reports_measured_size() {
        let msg = message(validate_product_image(&image(
            "big.jpg",
            None,
            11 * 1024 * 1024,
        )));
        assert!(msg.contains("exceeds 10MB"), "{msg}");
        assert!(msg.contains("11.00 MB"), "{msg}");
    }

    #[test]
    fn profile_photo_accepts_png() {
        assert!(validate_profile_photo(&image("me.png", None, 128)).is_ok());
        let msg = message(validate_profile_photo(&image("me.gif", None, 128)));
        assert!(msg.contains("Only JPG, JPEG, and PNG"), "{msg}");
    }
}
