//! Send OTP action

use anyhow::{Context, Result};
use chrono::Duration;
use tracing::info;

use crate::domains::auth::models::{generate_code, OtpRecord, OTP_LENGTH, OTP_TTL_MINUTES};
use crate::domains::auth::store::OtpStore;
use crate::kernel::ServerDeps;

/// Generate a fresh code and register it for the email.
///
/// Any previously issued, unconsumed code for the same email becomes
/// permanently invalid. Returns the code for delivery.
pub async fn issue(store: &dyn OtpStore, email: &str, length: usize, ttl: Duration) -> String {
    let code = generate_code(length);
    store.put(OtpRecord::new(email, code.as_str(), ttl)).await;
    code
}

/// Issue a code for the email and deliver it via the mail collaborator.
///
/// The record is stored before delivery is attempted, matching the send
/// endpoint's contract: a delivery failure leaves the code live, and the
/// caller retries by requesting a fresh one.
pub async fn send_otp(email: &str, deps: &ServerDeps) -> Result<()> {
    let code = issue(
        deps.otp_store.as_ref(),
        email,
        OTP_LENGTH,
        Duration::minutes(OTP_TTL_MINUTES),
    )
    .await;

    deps.mailer
        .send_otp_email(email, &code)
        .await
        .context("Failed to send OTP email")?;

    info!(email = %email, "OTP sent successfully");
    Ok(())
}
