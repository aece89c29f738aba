mod gateway;

use forening_domain::SmsSettings;
pub use gateway::RestSmsGateway;
use std::sync::Mutex;
use thiserror::Error;

/// One text message ready for the provider
#[derive(Debug, Clone)]
pub struct OutgoingSms {
    /// Destination in normalized international format
    pub to: String,
    pub body: String,
    /// Caller-supplied id, unique per send attempt
    pub reference: String,
}

#[derive(Error, Debug)]
pub enum SmsError {
    #[error("SMS provider could not be reached: {0}")]
    Network(String),
    #[error("SMS provider did not answer within the timeout")]
    Timeout,
    #[error("SMS provider rejected the message: {0}")]
    Rejected(String),
}

#[async_trait::async_trait]
pub trait ISmsGateway: Send + Sync {
    async fn send(&self, settings: &SmsSettings, sms: &OutgoingSms) -> Result<(), SmsError>;
}

/// Gateway used in tests: records what would have been sent and can be
/// told to reject specific destination numbers.
pub struct StubSmsGateway {
    pub sent: Mutex<Vec<OutgoingSms>>,
    pub reject_numbers: Mutex<Vec<String>>,
}

impl StubSmsGateway {
    pub fn new() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            reject_numbers: Mutex::new(Vec::new()),
        }
    }

    pub fn reject_number(&self, number: &str) {
        self.reject_numbers.lock().unwrap().push(number.to_string());
    }

    pub fn sent_count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }
}

impl Default for StubSmsGateway {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl ISmsGateway for StubSmsGateway {
    async fn send(&self, _settings: &SmsSettings, sms: &OutgoingSms) -> Result<(), SmsError> {
        if self.reject_numbers.lock().unwrap().contains(&sms.to) {
            return Err(SmsError::Rejected("rejected by stub gateway".into()));
        }
        self.sent.lock().unwrap().push(sms.clone());
        Ok(())
    }
}
