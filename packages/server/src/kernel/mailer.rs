//! SMTP mailer - delivers one-time codes over email
//!
//! Thin adapter over lettre's async SMTP transport. The transport is built
//! once at startup; misconfigured mail settings surface as an error on the
//! first delivery call, not at construction.

use anyhow::{Context, Result};
use async_trait::async_trait;
use lettre::message::{Mailbox, MultiPart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use tracing::info;

use super::traits::BaseMailService;

/// SMTP implementation of OTP delivery
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from_address: String,
}

impl SmtpMailer {
    /// Build a transport for the given relay.
    ///
    /// Port 465 uses implicit TLS; other ports negotiate STARTTLS.
    pub fn new(
        host: &str,
        port: u16,
        username: String,
        password: String,
        from_address: String,
    ) -> Result<Self> {
        let credentials = Credentials::new(username, password);

        let builder = if port == 465 {
            AsyncSmtpTransport::<Tokio1Executor>::relay(host)
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(host)
        }
        .context("Failed to create SMTP transport")?;

        let transport = builder.port(port).credentials(credentials).build();

        Ok(Self {
            transport,
            from_address,
        })
    }

    fn otp_bodies(code: &str) -> (String, String) {
        let plain = format!(
            "Your one-time password is: {}. It will expire in 10 minutes.",
            code
        );
        let html = format!(
            r#"<div style="font-family: Arial, sans-serif; max-width: 600px; margin: 0 auto; padding: 20px; border: 1px solid #e0e0e0; border-radius: 5px;">
  <div style="text-align: center; margin-bottom: 20px;">
    <h1 style="color: #4f46e5;">LegalAI</h1>
  </div>
  <div style="background-color: #f9fafb; padding: 20px; border-radius: 5px; margin-bottom: 20px;">
    <h2 style="margin-top: 0; color: #111827;">Your Login Code</h2>
    <p style="margin-bottom: 10px; color: #4b5563;">Use the following one-time password to log in to your LegalAI account:</p>
    <div style="background-color: #ffffff; padding: 15px; border-radius: 5px; text-align: center; font-size: 24px; letter-spacing: 5px; font-weight: bold; color: #4f46e5; border: 1px dashed #4f46e5;">
      {}
    </div>
    <p style="margin-top: 15px; color: #4b5563;">This code will expire in 10 minutes.</p>
  </div>
  <div style="color: #6b7280; font-size: 14px; text-align: center;">
    <p>If you didn't request this code, you can safely ignore this email.</p>
  </div>
</div>"#,
            code
        );
        (plain, html)
    }
}

#[async_trait]
impl BaseMailService for SmtpMailer {
    async fn send_otp_email(&self, to: &str, code: &str) -> Result<()> {
        let from: Mailbox = self
            .from_address
            .parse()
            .context("EMAIL_FROM is not a valid mailbox")?;
        let to_mailbox: Mailbox = to.parse().context("Recipient is not a valid mailbox")?;

        let (plain, html) = Self::otp_bodies(code);

        let message = Message::builder()
            .from(from)
            .to(to_mailbox)
            .subject("Your LegalAI Login OTP")
            .multipart(MultiPart::alternative_plain_html(plain, html))
            .context("Failed to build OTP email")?;

        let response = self
            .transport
            .send(message)
            .await
            .context("Failed to send OTP email over SMTP")?;

        info!(to = %to, code = %response.code(), "OTP email accepted by relay");
        Ok(())
    }
}
