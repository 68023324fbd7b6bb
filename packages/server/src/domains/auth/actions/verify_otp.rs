//! Verify OTP action

use tracing::{debug, info};

use crate::domains::auth::store::ConsumeOutcome;
use crate::kernel::ServerDeps;

/// Result of verifying OTP
pub enum VerifyOtpResult {
    Verified,
    Failed,
}

/// Verify a submitted code against the store.
///
/// Consumption is atomic: a matching code is removed in the same store
/// operation that checks it. Unknown emails, wrong codes, and expired codes
/// all collapse to `Failed`; only the logs keep the distinction.
pub async fn verify_otp(email: &str, code: &str, deps: &ServerDeps) -> VerifyOtpResult {
    match deps.otp_store.consume(email, code).await {
        ConsumeOutcome::Consumed => {
            info!(email = %email, "OTP verified");
            VerifyOtpResult::Verified
        }
        outcome => {
            debug!(email = %email, ?outcome, "OTP verification failed");
            VerifyOtpResult::Failed
        }
    }
}
