use super::{ISmsGateway, OutgoingSms, SmsError};
use forening_domain::SmsSettings;
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;
use tracing::debug;

/// SMS provider client. One HTTP POST per recipient against the
/// organization's configured endpoint, with an explicit timeout; a
/// timed out call counts as a failed send.
pub struct RestSmsGateway {
    client: Client,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SendSmsBody<'a> {
    sender: &'a str,
    msisdn: &'a str,
    message: &'a str,
    reference: &'a str,
}

impl RestSmsGateway {
    pub fn new(timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .expect("The SMS http client to be created");

        Self { client }
    }
}

#[async_trait::async_trait]
impl ISmsGateway for RestSmsGateway {
    async fn send(&self, settings: &SmsSettings, sms: &OutgoingSms) -> Result<(), SmsError> {
        let body = SendSmsBody {
            sender: &settings.sender_id,
            msisdn: sms.to.trim_start_matches('+'),
            message: &sms.body,
            reference: &sms.reference,
        };

        let res = self
            .client
            .post(&settings.api_url)
            .header("Authorization", format!("Bearer {}", settings.api_key))
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    SmsError::Timeout
                } else {
                    SmsError::Network(e.to_string())
                }
            })?;

        let status = res.status();
        let raw = res
            .text()
            .await
            .map_err(|e| SmsError::Network(e.to_string()))?;
        // The provider contract is informally documented, so keep the
        // full payload around for forensics
        debug!(
            "SMS provider answered {} for reference {}: {}",
            status, sms.reference, raw
        );

        if !status.is_success() {
            return Err(SmsError::Rejected(format!("{}: {}", status, raw)));
        }
        if is_accepted_response(&raw) {
            Ok(())
        } else {
            Err(SmsError::Rejected(raw))
        }
    }
}

/// Best-effort classification of a provider reply as a successful
/// hand-off. The provider has no published response schema, so this
/// accepts an explicit success flag, the usual progress words in a
/// plain-text reply, or a json data payload without an error field.
pub fn is_accepted_response(raw: &str) -> bool {
    if let Ok(json) = serde_json::from_str::<serde_json::Value>(raw) {
        if let Some(success) = json.get("success").and_then(|v| v.as_bool()) {
            return success;
        }
        if json.get("error").map(|e| !e.is_null()).unwrap_or(false) {
            return false;
        }
        if json.get("data").is_some() {
            return true;
        }
    }
    let lowered = raw.to_lowercase();
    ["accepted", "processing", "sent"]
        .iter()
        .any(|word| lowered.contains(word))
}
