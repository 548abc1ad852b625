use std::time::Duration;

use tokio::sync::mpsc;

use crate::error::Error;

/// Outbound messages emitted by the organization workflow after the entity
/// write has committed. Delivery runs outside the request path, so a slow
/// or failing mail transport never turns a successful write into an error
/// response.
#[derive(Debug, Clone, PartialEq)]
pub enum Notification {
    OrganizationRegistered { name: String, email: String },
    OrganizationDecision { name: String, email: String, approved: bool },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Mail {
    pub to: String,
    pub subject: String,
    pub body: String,
}

impl Notification {
    pub fn into_mail(self) -> Mail {
        match self {
            Notification::OrganizationRegistered { name, email } => Mail {
                to: email,
                subject: "Your Organization Application is Under Review".to_string(),
                body: format!(
                    "Dear {},\n\nYour application for organization registration is under review. \
                     We will notify you once your application has been approved.\n\nThank you!",
                    name
                ),
            },
            Notification::OrganizationDecision { name, email, approved: true } => Mail {
                to: email,
                subject: "Your Organization Application has been Approved".to_string(),
                body: format!(
                    "Dear {},\n\nWe are pleased to inform you that your organization application \
                     has been approved.\n\nWelcome aboard!",
                    name
                ),
            },
            Notification::OrganizationDecision { name, email, approved: false } => Mail {
                to: email,
                subject: "Your Organization Application has been Rejected".to_string(),
                body: format!(
                    "Dear {},\n\nWe regret to inform you that your organization application \
                     has been rejected.\n\nThank you for your interest!",
                    name
                ),
            },
        }
    }
}

#[allow(async_fn_in_trait)]
pub trait Mailer {
    async fn send(&self, mail: &Mail) -> Result<(), Error>;
}

/// Sending half of the notification channel, cloned into workflow services.
#[derive(Debug, Clone)]
pub struct Outbox(mpsc::UnboundedSender<Notification>);

impl Outbox {
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<Notification>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Outbox(tx), rx)
    }

    /// Fire-and-forget: a closed channel only loses the notification, never
    /// the entity write that preceded it.
    pub fn publish(&self, notification: Notification) {
        if self.0.send(notification).is_err() {
            log::warn!("notification channel closed, dropping outbound mail");
        }
    }
}

/// Delivery loop: drains the outbox and hands each mail to the mailer,
/// retrying with exponential backoff before giving up on a message.
pub async fn deliver<M: Mailer>(mut rx: mpsc::UnboundedReceiver<Notification>, mailer: M, max_attempts: u32) {
    while let Some(notification) = rx.recv().await {
        let mail = notification.into_mail();
        let mut attempt = 0;
        loop {
            attempt += 1;
            match mailer.send(&mail).await {
                Ok(()) => {
                    log::info!("mail sent to {}: {}", mail.to, mail.subject);
                    break;
                }
                Err(e) if attempt < max_attempts => {
                    log::warn!("mail to {} failed on attempt {}: {}", mail.to, attempt, e);
                    tokio::time::sleep(Duration::from_secs(1 << attempt)).await;
                }
                Err(e) => {
                    log::error!("giving up on mail to {} after {} attempts: {}", mail.to, attempt, e);
                    break;
                }
            }
        }
    }
}
