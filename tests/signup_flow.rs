mod common;

use std::sync::Arc;

use bazaar_api::{
    dto::auth::{LoginRequest, SignupRequest, VerifyEmailRequest},
    error::AppError,
    services::auth_service,
};
use common::{FailingMailer, setup_state, setup_state_with, unique};

fn signup_request(username: &str, email: &str) -> SignupRequest {
    SignupRequest {
        username: username.to_string(),
        password: "Sup3r_secret!".to_string(),
        email: email.to_string(),
        phone_number: Some("9999999999".to_string()),
        address: None,
    }
}

// Signup -> OTP via the mail double -> verify-email -> me shows the flag.
#[tokio::test]
async fn signup_verify_me_flow() -> anyhow::Result<()> {
    let Some(url) = common::database_url() else {
        eprintln!("Skipping test: set TEST_DATABASE_URL or DATABASE_URL.");
        return Ok(());
    };
    let (state, mailer) = setup_state(&url).await?;
    let username = unique("alice");
    let email = format!("{username}@example.com");

    let signup = auth_service::signup(&state, signup_request(&username, &email)).await?;
    let signup = signup.data.unwrap();
    assert!(signup.otp.is_none(), "delivery succeeded, no fallback code");

    let code = mailer.last_otp_for(&email).expect("OTP mail captured");

    auth_service::verify_email(
        &state,
        VerifyEmailRequest {
            email: email.clone(),
            otp: code,
        },
    )
    .await?;

    let me = auth_service::me(&state, &common::auth_user(signup.user_id)).await?;
    let me = me.data.unwrap();
    assert!(me.email_verified);
    assert_eq!(me.email.as_deref(), Some(email.as_str()));

    Ok(())
}

// When the mail provider is down, signup still succeeds and the code rides
// the response as a fallback.
#[tokio::test]
async fn signup_survives_mail_outage() -> anyhow::Result<()> {
    let Some(url) = common::database_url() else {
        eprintln!("Skipping test: set TEST_DATABASE_URL or DATABASE_URL.");
        return Ok(());
    };
    let state = setup_state_with(&url, Arc::new(FailingMailer)).await?;
    let username = unique("bob");
    let email = format!("{username}@example.com");

    let signup = auth_service::signup(&state, signup_request(&username, &email)).await?;
    let signup = signup.data.unwrap();
    assert_eq!(signup.email_delivery_failed, Some(true));
    let code = signup.otp.expect("fallback code in response");

    auth_service::verify_email(&state, VerifyEmailRequest { email, otp: code }).await?;
    Ok(())
}

#[tokio::test]
async fn weak_passwords_are_rejected_at_signup() -> anyhow::Result<()> {
    let Some(url) = common::database_url() else {
        eprintln!("Skipping test: set TEST_DATABASE_URL or DATABASE_URL.");
        return Ok(());
    };
    let (state, _mailer) = setup_state(&url).await?;
    let username = unique("carol");
    let email = format!("{username}@example.com");

    let mut request = signup_request(&username, &email);
    request.password = "short".to_string();
    let err = auth_service::signup(&state, request).await.unwrap_err();
    assert!(
        matches!(err, AppError::BadRequest(ref msg) if msg.contains("at least 8 characters")),
        "{err:?}"
    );

    let mut request = signup_request(&username, &email);
    request.password = "alllowercase1!".to_string();
    let err = auth_service::signup(&state, request).await.unwrap_err();
    assert!(
        matches!(err, AppError::BadRequest(ref msg) if msg.contains("uppercase")),
        "{err:?}"
    );

    Ok(())
}

// Login is blocked until the email is verified, then allowed.
#[tokio::test]
async fn login_requires_verified_email() -> anyhow::Result<()> {
    let Some(url) = common::database_url() else {
        eprintln!("Skipping test: set TEST_DATABASE_URL or DATABASE_URL.");
        return Ok(());
    };
    let (state, mailer) = setup_state(&url).await?;
    let username = unique("dave");
    let email = format!("{username}@example.com");

    auth_service::signup(&state, signup_request(&username, &email)).await?;

    let blocked = auth_service::login(
        &state,
        LoginRequest {
            username: username.clone(),
            password: "Sup3r_secret!".to_string(),
        },
    )
    .await;
    assert!(matches!(blocked, Err(AppError::Forbidden(_))), "{blocked:?}");

    // Wrong password gets the same generic message as an unknown user.
    let wrong = auth_service::login(
        &state,
        LoginRequest {
            username: username.clone(),
            password: "Wrong_pass1!".to_string(),
        },
    )
    .await;
    let missing = auth_service::login(
        &state,
        LoginRequest {
            username: unique("nobody"),
            password: "Wrong_pass1!".to_string(),
        },
    )
    .await;
    match (wrong, missing) {
        (Err(AppError::Unauthorized(a)), Err(AppError::Unauthorized(b))) => assert_eq!(a, b),
        other => panic!("expected Unauthorized for both, got {other:?}"),
    }

    let code = mailer.last_otp_for(&email).expect("OTP mail captured");
    auth_service::verify_email(&state, VerifyEmailRequest { email, otp: code }).await?;

    Ok(())
}
