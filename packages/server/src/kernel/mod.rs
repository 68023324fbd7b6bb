//! Kernel module - server infrastructure and dependencies.

pub mod deps;
pub mod mailer;
pub mod scheduled_tasks;
pub mod test_dependencies;
pub mod traits;

pub use deps::{GeminiAdapter, ServerDeps};
pub use mailer::SmtpMailer;
pub use scheduled_tasks::start_scheduler;
pub use test_dependencies::{MockChatModel, MockMailService, TestDependencies};
pub use traits::*;
