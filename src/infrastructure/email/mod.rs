//! Outbound email delivery.

mod resend;
mod service;

pub use resend::{DEFAULT_RESEND_API_URL, ResendClient};
pub use service::{EmailError, EmailResult, EmailSender};

#[cfg(test)]
pub use service::MockEmailSender;
