use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use tracing::{debug, error};

/// Resend API endpoint
const RESEND_API_URL: &str = "https://api.resend.com/emails";

/// Errors raised while delivering a notification email.
#[derive(Debug, thiserror::Error)]
pub enum NotificationError {
    #[error("Email request failed: {0}")]
    Request(String),

    #[error("Email provider returned {status}: {body}")]
    Provider { status: u16, body: String },
}

/// Outbound notification channel.
///
/// The task service talks to this trait so tests can substitute an
/// in-memory implementation for the HTTP provider.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send_email(
        &self,
        to: &str,
        subject: &str,
        html: &str,
    ) -> Result<(), NotificationError>;
}

/// Notifier backed by the Resend HTTP API.
pub struct ResendNotifier {
    api_key: String,
    from_email: String,
    client: Client,
}

impl ResendNotifier {
    pub fn new(api_key: impl Into<String>, from_email: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            from_email: from_email.into(),
            client: Client::new(),
        }
    }
}

/// Resend API request payload
#[derive(Debug, Serialize)]
struct ResendRequest<'a> {
    from: String,
    to: Vec<&'a str>,
    subject: &'a str,
    html: &'a str,
}

#[async_trait]
impl Notifier for ResendNotifier {
    async fn send_email(
        &self,
        to: &str,
        subject: &str,
        html: &str,
    ) -> Result<(), NotificationError> {
        let request = ResendRequest {
            from: format!("Task Manager <{}>", self.from_email),
            to: vec![to],
            subject,
            html,
        };

        debug!("Sending email to {} via Resend", to);

        let response = self
            .client
            .post(RESEND_API_URL)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&request)
            .send()
            .await
            .map_err(|e| NotificationError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!("Resend API error for {}: {} {}", to, status, body);
            return Err(NotificationError::Provider {
                status: status.as_u16(),
                body,
            });
        }

        debug!("Email to {} accepted by Resend", to);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resend_request_serialization() {
        let request = ResendRequest {
            from: "Task Manager <noreply@example.com>".to_string(),
            to: vec!["user@example.com"],
            subject: "Task updated",
            html: "The task Write report has been assigned to you, please check it out.",
        };

        let json = serde_json::to_string(&request).unwrap();
        assert!(json.contains("\"from\":\"Task Manager <noreply@example.com>\""));
        assert!(json.contains("\"to\":[\"user@example.com\"]"));
        assert!(json.contains("\"subject\":\"Task updated\""));
        assert!(json.contains("has been assigned to you"));
    }
}
