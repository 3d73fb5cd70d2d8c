use lettre::message::header::{ContentType, ContentTypeErr};
use lettre::message::{Attachment, Mailbox, MultiPart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Tokio1Executor};
use std::time::Duration;

use crate::config::MailConfig;
use crate::delivery::message::Message;

#[derive(Debug, thiserror::Error)]
pub enum MailError {
    #[error("DAILYVERSE_EMAIL_USER and DAILYVERSE_EMAIL_PASS must both be set to send mail")]
    MissingCredentials,
    #[error("Invalid mail address '{0}'")]
    InvalidAddress(String),
    #[error("Invalid attachment content type: {0}")]
    ContentType(#[from] ContentTypeErr),
    #[error("Failed to build email: {0}")]
    Build(#[from] lettre::error::Error),
    #[error("SMTP error: {0}")]
    Smtp(#[from] lettre::transport::smtp::Error),
}

fn mailbox(address: &str) -> Result<Mailbox, MailError> {
    address
        .trim()
        .parse::<Mailbox>()
        .map_err(|_| MailError::InvalidAddress(address.to_string()))
}

/// Build the outgoing email: the document as the plain-text alternative of the
/// HTML message, with the document and illustration attached.
pub fn build_email(
    from: &str,
    to: &str,
    message: &Message,
    document: &str,
    image: Option<&[u8]>,
) -> Result<lettre::Message, MailError> {
    let mut body = MultiPart::mixed()
        .multipart(MultiPart::alternative_plain_html(
            document.to_string(),
            message.html.clone(),
        ))
        .singlepart(
            Attachment::new("document.txt".to_string())
                .body(document.to_string(), ContentType::TEXT_PLAIN),
        );
    if let Some(bytes) = image {
        let jpeg = ContentType::parse("image/jpeg")?;
        body = body.singlepart(
            Attachment::new("illustration.jpg".to_string()).body(bytes.to_vec(), jpeg),
        );
    }

    let email = lettre::Message::builder()
        .from(mailbox(from)?)
        .to(mailbox(to)?)
        .subject(message.subject.clone())
        .multipart(body)?;
    Ok(email)
}

/// SMTP submission over STARTTLS with login credentials.
pub struct Mailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: String,
    to: String,
}

impl Mailer {
    pub fn new(config: &MailConfig) -> Result<Self, MailError> {
        let (user, pass) = config.credentials().ok_or(MailError::MissingCredentials)?;
        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)?
            .port(config.smtp_port)
            .credentials(Credentials::new(user.to_string(), pass.to_string()))
            .timeout(Some(Duration::from_secs(config.smtp_timeout_secs)))
            .build();
        Ok(Self {
            transport,
            from: user.to_string(),
            to: config.recipient().unwrap_or(user).to_string(),
        })
    }

    pub fn recipient(&self) -> &str {
        &self.to
    }

    pub async fn send(
        &self,
        message: &Message,
        document: &str,
        image: Option<&[u8]>,
    ) -> Result<(), MailError> {
        let email = build_email(&self.from, &self.to, message, document, image)?;
        log::info!("sending '{}' to {}...", message.subject, self.to);
        let response = self.transport.send(email).await?;
        log::debug!("SMTP server replied {}", response.code());
        Ok(())
    }
}
