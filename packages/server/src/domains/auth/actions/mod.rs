//! Auth domain actions - business logic functions
//!
//! Actions are async functions called directly from the REST handlers.

mod send_otp;
mod verify_otp;

pub use send_otp::{issue, send_otp};
pub use verify_otp::{verify_otp, VerifyOtpResult};
