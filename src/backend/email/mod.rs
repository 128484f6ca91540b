//! Email Module
//!
//! Outbound mail over SMTP using lettre's async transport. The portal only
//! sends one message, the welcome email after registration, and sending is
//! best-effort: failures are logged and never reach the client.
//!
//! When email is disabled (or no SMTP host is configured) the mailer is a
//! no-op that only logs.

use lettre::message::{header::ContentType, Mailbox};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use std::sync::Arc;
use thiserror::Error;

use crate::backend::auth::users::Student;
use crate::shared::config::EmailSettings;

#[derive(Debug, Error)]
pub enum EmailError {
    #[error("invalid address: {0}")]
    Address(#[from] lettre::address::AddressError),
    #[error("failed to build message: {0}")]
    Message(#[from] lettre::error::Error),
    #[error("smtp error: {0}")]
    Smtp(#[from] lettre::transport::smtp::Error),
}

struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
    app_url: String,
}

/// Cheap to clone; all clones share one SMTP transport.
#[derive(Clone)]
pub struct Mailer {
    inner: Option<Arc<SmtpMailer>>,
}

impl std::fmt::Debug for Mailer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Mailer")
            .field("enabled", &self.is_enabled())
            .finish()
    }
}

impl Mailer {
    /// A mailer that never sends.
    pub fn disabled() -> Self {
        Self { inner: None }
    }

    /// Build the SMTP transport described by `settings`.
    pub fn from_settings(settings: &EmailSettings) -> Result<Self, EmailError> {
        if !settings.enabled {
            tracing::info!("Email service disabled");
            return Ok(Self::disabled());
        }

        // 465 is implicit TLS; anything else negotiates STARTTLS.
        let builder = if settings.port == 465 {
            AsyncSmtpTransport::<Tokio1Executor>::relay(&settings.host)?
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&settings.host)?
        };
        let mut builder = builder.port(settings.port);
        if let (Some(user), Some(password)) = (&settings.username, &settings.password) {
            builder = builder.credentials(Credentials::new(user.clone(), password.clone()));
        }

        let from: Mailbox = settings.from.parse()?;
        tracing::info!("Email service configured for {}:{}", settings.host, settings.port);

        Ok(Self {
            inner: Some(Arc::new(SmtpMailer {
                transport: builder.build(),
                from,
                app_url: settings.app_url.trim_end_matches('/').to_string(),
            })),
        })
    }

    pub fn is_enabled(&self) -> bool {
        self.inner.is_some()
    }

    /// Send the welcome email. Errors are logged, not returned.
    pub async fn send_welcome_email(&self, student: &Student) {
        let Some(smtp) = &self.inner else {
            tracing::debug!("Email service disabled - skipping welcome email");
            return;
        };

        match smtp.send_welcome(student).await {
            Ok(()) => tracing::info!("Welcome email sent to {}", student.email),
            Err(e) => tracing::error!("Error sending welcome email to {}: {}", student.email, e),
        }
    }
}

impl SmtpMailer {
    async fn send_welcome(&self, student: &Student) -> Result<(), EmailError> {
        let to: Mailbox = student.email.parse()?;
        let message = Message::builder()
            .from(self.from.clone())
            .to(to)
            .subject("Welcome to SkillForge Free Academy!")
            .header(ContentType::TEXT_HTML)
            .body(welcome_body(&student.full_name, student.track.as_str(), &self.app_url))?;

        self.transport.send(message).await?;
        Ok(())
    }
}

fn welcome_body(full_name: &str, track: &str, app_url: &str) -> String {
    format!(
        r#"<div style="font-family: Arial, sans-serif; max-width: 600px; margin: 0 auto;">
  <h2 style="color: #050B18;">Welcome to SkillForge Free Academy!</h2>
  <p>Hi {full_name},</p>
  <p>Thank you for registering for the <strong>{track}</strong> track.</p>
  <p>You can now access your exclusive handbooks by logging into your student portal.</p>
  <p style="margin-top: 30px;">
    <a href="{app_url}/login.html"
       style="background-color: #D4AF37; color: #050B18; padding: 12px 24px; text-decoration: none; border-radius: 5px; font-weight: bold;">
      Access Your Portal
    </a>
  </p>
  <p style="margin-top: 30px; color: #666; font-size: 14px;">
    Best regards,<br>
    The SkillForge Team
  </p>
</div>"#
    )
}
