use crate::models::EmailId;
use crate::templates;
use serde::Serialize;
use std::time::Duration;

// Email provider request format (Resend-compatible)
#[derive(Serialize)]
struct EmailPayload<'a> {
    from: String,
    to: Vec<&'a str>,
    subject: String,
    html: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    reply_to: Option<&'a str>,
}

// Outbound email client. Two operations back the contact form: an
// auto-reply to whoever wrote in, and a notification copy to the owner.
pub struct Mailer {
    client: reqwest::Client,
    api_url: String,
    api_key: String,
    sender_name: String,
    sender_address: String,
    recipient: String,
}

impl Mailer {
    pub fn new(
        client: reqwest::Client,
        api_url: String,
        api_key: String,
        sender_name: String,
        sender_address: String,
        recipient: String,
    ) -> Self {
        Self {
            client,
            api_url,
            api_key,
            sender_name,
            sender_address,
            recipient,
        }
    }

    // Confirmation back to the person who submitted the form
    pub async fn send_auto_reply(&self, to: &str, first_name: &str) -> Result<EmailId, String> {
        self.send(EmailPayload {
            from: format!("{} <{}>", self.sender_name, self.sender_address),
            to: vec![to],
            subject: "Thank you for reaching out!".to_string(),
            html: templates::auto_reply_html(first_name, &self.sender_name),
            reply_to: None,
        })
        .await
    }

    // Contact details to the site owner, reply-to set so answering goes
    // straight back to the sender
    pub async fn send_notification(
        &self,
        name: &str,
        email: &str,
        message: &str,
    ) -> Result<EmailId, String> {
        self.send(EmailPayload {
            from: format!("Portfolio Contact <{}>", self.sender_address),
            to: vec![self.recipient.as_str()],
            subject: format!("New Portfolio Contact from {}", name),
            html: templates::contact_notification_html(name, email, message),
            reply_to: Some(email),
        })
        .await
    }

    async fn send(&self, payload: EmailPayload<'_>) -> Result<EmailId, String> {
        let result = self
            .client
            .post(format!("{}/emails", self.api_url))
            .bearer_auth(&self.api_key)
            .json(&payload)
            .timeout(Duration::from_secs(10))
            .send()
            .await;

        match result {
            Ok(res) if res.status().is_success() => res
                .json::<EmailId>()
                .await
                .map_err(|e| format!("Parse error: {}", e)),
            Ok(res) => Err(format!("Email provider returned {}", res.status())),
            Err(e) => Err(format!("Request failed: {}", e)),
        }
    }
}
