//! SMTP mail relay
//!
//! Sends the registration verification code. The relay is optional:
//! when credentials are absent the server starts without it and the
//! register endpoint reports the mail service as unconfigured.

use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use shared::error::{AppError, ErrorCode};

use crate::core::Config;

#[derive(Clone)]
pub struct Mailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: String,
}

impl Mailer {
    /// Build the relay from config; `None` unless host and credentials are all set
    pub fn from_config(config: &Config) -> Option<Self> {
        let host = config.smtp_host.as_deref()?;
        let username = config.smtp_username.clone()?;
        let password = config.smtp_password.clone()?;

        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(host)
            .inspect_err(|e| tracing::error!(error = %e, "SMTP relay setup failed"))
            .ok()?
            .port(config.smtp_port)
            .credentials(Credentials::new(username, password))
            .build();

        Some(Self {
            transport,
            from: config.smtp_from.clone(),
        })
    }

    pub async fn send_verification_code(&self, to: &str, code: &str) -> Result<(), AppError> {
        let message = Message::builder()
            .from(self.from.parse().map_err(|e| mail_err("from address", e))?)
            .to(to.parse().map_err(|e| mail_err("to address", e))?)
            .subject("Verify your Atelier account")
            .header(ContentType::TEXT_PLAIN)
            .body(format!(
                "Your verification code is {code}. It expires in 10 minutes."
            ))
            .map_err(|e| AppError::with_message(ErrorCode::MailError, e.to_string()))?;

        self.transport
            .send(message)
            .await
            .map_err(|e| AppError::with_message(ErrorCode::MailError, e.to_string()))?;

        tracing::info!(to, "Verification code sent");
        Ok(())
    }
}

fn mail_err(what: &str, e: lettre::address::AddressError) -> AppError {
    AppError::with_message(ErrorCode::MailError, format!("Invalid {what}: {e}"))
}
