use std::env;

use serde_json::json;

use crate::core::notifier::{Mail, Mailer};
use crate::error::Error;

/// Sends mail through an HTTP mail API with a bearer token.
#[derive(Debug, Clone)]
pub struct HttpMailer {
    client: reqwest::Client,
    api_url: String,
    api_key: String,
    from: String,
}

impl HttpMailer {
    pub fn new(api_url: String, api_key: String, from: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_url,
            api_key,
            from,
        }
    }

    /// Built from MAIL_API_URL, MAIL_API_KEY and MAIL_FROM; absent when the
    /// transport is not configured.
    pub fn from_env() -> Option<Self> {
        let api_url = env::var("MAIL_API_URL").ok()?;
        let api_key = env::var("MAIL_API_KEY").ok()?;
        let from = env::var("MAIL_FROM").ok()?;
        Some(Self::new(api_url, api_key, from))
    }
}

impl Mailer for HttpMailer {
    async fn send(&self, mail: &Mail) -> Result<(), Error> {
        let resp = self
            .client
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(&json!({
                "from": self.from,
                "to": mail.to,
                "subject": mail.subject,
                "text": mail.body,
            }))
            .send()
            .await
            .map_err(|e| Error::Upstream(format!("mail api request failed: {e}")))?;
        if !resp.status().is_success() {
            return Err(Error::Upstream(format!("mail api returned {}", resp.status())));
        }
        Ok(())
    }
}

/// Logs mail instead of sending it. Used when no transport is configured.
#[derive(Debug, Clone, Default)]
pub struct LogMailer;

impl Mailer for LogMailer {
    async fn send(&self, mail: &Mail) -> Result<(), Error> {
        log::info!("mail (not sent) to {}: {}\n{}", mail.to, mail.subject, mail.body);
        Ok(())
    }
}
