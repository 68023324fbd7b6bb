//! OTP endpoints
//!
//! Both endpoints answer `{success, message}`. Verification failures use one
//! deliberately generic message so callers cannot distinguish an unknown
//! email from a wrong or expired code.

use axum::extract::rejection::JsonRejection;
use axum::{extract::Extension, http::StatusCode, Json};
use serde::{Deserialize, Serialize};

use crate::domains::auth::actions::{send_otp, verify_otp, VerifyOtpResult};
use crate::domains::auth::models::OTP_LENGTH;
use crate::server::app::AppState;

#[derive(Debug, Deserialize)]
pub struct SendOtpRequest {
    pub email: String,
}

#[derive(Debug, Deserialize)]
pub struct VerifyOtpRequest {
    pub email: String,
    pub otp: String,
}

#[derive(Serialize)]
pub struct OtpResponse {
    pub success: bool,
    pub message: String,
}

impl OtpResponse {
    fn ok(message: &str) -> Json<Self> {
        Json(Self {
            success: true,
            message: message.to_string(),
        })
    }

    fn failure(message: &str) -> Json<Self> {
        Json(Self {
            success: false,
            message: message.to_string(),
        })
    }
}

fn is_plausible_email(email: &str) -> bool {
    !email.is_empty() && email.contains('@')
}

/// Issue a code and deliver it by email
///
/// Returns 400 on a malformed email, 500 when delivery fails (the issued
/// code stays live; the client requests a fresh one to retry).
pub async fn send_otp_handler(
    Extension(state): Extension<AppState>,
    payload: Result<Json<SendOtpRequest>, JsonRejection>,
) -> (StatusCode, Json<OtpResponse>) {
    let email = match &payload {
        Ok(Json(body)) => body.email.trim().to_string(),
        Err(_) => {
            return (
                StatusCode::BAD_REQUEST,
                OtpResponse::failure("Invalid email address"),
            )
        }
    };

    if !is_plausible_email(&email) {
        return (
            StatusCode::BAD_REQUEST,
            OtpResponse::failure("Invalid email address"),
        );
    }

    match send_otp(&email, &state.deps).await {
        Ok(()) => (StatusCode::OK, OtpResponse::ok("OTP sent successfully")),
        Err(e) => {
            tracing::error!(error = %e, "Failed to send OTP");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                OtpResponse::failure("Failed to send OTP email"),
            )
        }
    }
}

/// Check a submitted code
///
/// Returns 400 on malformed input and on any failed verification.
pub async fn verify_otp_handler(
    Extension(state): Extension<AppState>,
    payload: Result<Json<VerifyOtpRequest>, JsonRejection>,
) -> (StatusCode, Json<OtpResponse>) {
    let (email, otp) = match &payload {
        Ok(Json(body)) => (body.email.trim().to_string(), body.otp.clone()),
        Err(_) => {
            return (
                StatusCode::BAD_REQUEST,
                OtpResponse::failure("Invalid email address"),
            )
        }
    };

    if !is_plausible_email(&email) {
        return (
            StatusCode::BAD_REQUEST,
            OtpResponse::failure("Invalid email address"),
        );
    }

    if otp.len() != OTP_LENGTH || !otp.chars().all(|c| c.is_ascii_digit()) {
        return (
            StatusCode::BAD_REQUEST,
            OtpResponse::failure("Invalid OTP format"),
        );
    }

    match verify_otp(&email, &otp, &state.deps).await {
        VerifyOtpResult::Verified => {
            (StatusCode::OK, OtpResponse::ok("OTP verified successfully"))
        }
        VerifyOtpResult::Failed => (
            StatusCode::BAD_REQUEST,
            OtpResponse::failure("Invalid or expired OTP"),
        ),
    }
}
