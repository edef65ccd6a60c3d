//! Mail actions: send and draft
//!
//! Both actions share one message shape; send wraps it in the
//! `sendMail` envelope while draft posts it to the messages
//! collection. Attachments ride along base64-encoded; the 4MB upstream
//! cap is enforced by Graph and surfaces through the middleware's 413
//! classification.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use mailbridge_common::{GraphClient, GraphRequest};
use mailbridge_domain::{BridgeError, Credential, Result};
use serde::Deserialize;
use serde_json::{json, Value};

/// Message body format choices exposed to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum BodyFormat {
    Text,
    Html,
}

impl Default for BodyFormat {
    fn default() -> Self {
        Self::Text
    }
}

impl BodyFormat {
    fn as_graph_content_type(self) -> &'static str {
        match self {
            Self::Text => "Text",
            Self::Html => "HTML",
        }
    }
}

/// A file to attach, already materialized as bytes by the host
/// platform (it handles URL downloads and text-to-file conversion).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttachmentInput {
    pub name: String,
    pub content: Vec<u8>,
}

/// Fields for sending or drafting an email.
#[derive(Debug, Clone, Default)]
pub struct EmailInput {
    pub recipients: Vec<String>,
    pub cc_recipients: Vec<String>,
    pub bcc_recipients: Vec<String>,
    pub subject: String,
    pub body_format: BodyFormat,
    pub body: String,
    pub attachment: Option<AttachmentInput>,
}

/// Send an email from the connected account.
pub async fn send_email(
    client: &GraphClient,
    api_base: &str,
    credential: &Credential,
    input: &EmailInput,
) -> Result<()> {
    let request = GraphRequest::post(format!("{api_base}/me/sendMail"))
        .json(json!({ "message": message_body(input), "saveToSentItems": true }))
        .error_prefix("Unable to send the email");

    // Graph answers 202 with an empty body on success.
    client.execute(Some(&credential.access_token), request).await?;
    Ok(())
}

/// Create a draft that can be reviewed and sent later.
pub async fn create_draft_email(
    client: &GraphClient,
    api_base: &str,
    credential: &Credential,
    input: &EmailInput,
) -> Result<Value> {
    let request = GraphRequest::post(format!("{api_base}/me/messages"))
        .json(message_body(input))
        .error_prefix("Unable to create the draft email");

    let response = client.execute(Some(&credential.access_token), request).await?;
    response.json().map_err(|err| {
        BridgeError::Network(format!("Unable to create the draft email: {err}"))
    })
}

fn message_body(input: &EmailInput) -> Value {
    let mut message = json!({
        "subject": input.subject,
        "body": {
            "contentType": input.body_format.as_graph_content_type(),
            "content": input.body,
        },
        "toRecipients": format_recipients(&input.recipients),
        "ccRecipients": format_recipients(&input.cc_recipients),
        "bccRecipients": format_recipients(&input.bcc_recipients),
    });

    if let (Some(map), Some(attachment)) = (message.as_object_mut(), &input.attachment) {
        map.insert(
            "attachments".to_string(),
            json!([{
                "@odata.type": "#microsoft.graph.fileAttachment",
                "name": attachment.name,
                "contentBytes": BASE64.encode(&attachment.content),
            }]),
        );
    }

    message
}

fn format_recipients(addresses: &[String]) -> Vec<Value> {
    addresses
        .iter()
        .map(|address| json!({ "emailAddress": { "address": address } }))
        .collect()
}
