//! Auth domain - handles authentication via email OTP
//!
//! Responsibilities:
//! - Issuing short-lived numeric codes, one live code per email
//! - Single-use, time-boxed verification against the in-process store
//! - Delivery via the mail collaborator

pub mod actions;
pub mod models;
pub mod store;

pub use models::{generate_code, normalize_email, OtpRecord, OTP_LENGTH, OTP_TTL_MINUTES};
pub use store::{ConsumeOutcome, InMemoryOtpStore, OtpStore};
