use forening_utils::create_random_secret;
use std::time::Duration;
use tracing::{info, warn};

#[derive(Debug, Clone)]
pub struct Config {
    /// Secret code used to create new `Organization`s
    pub create_organization_secret_code: String,
    /// Port for the application to run on
    pub port: usize,
    /// How long to wait for the SMS provider before treating a send as
    /// failed
    pub sms_request_timeout: Duration,
}

const DEFAULT_SMS_TIMEOUT_SECS: u64 = 30;

impl Config {
    pub fn new() -> Self {
        let create_organization_secret_code = match std::env::var("CREATE_ORG_SECRET_CODE") {
            Ok(code) => code,
            Err(_) => {
                info!("Did not find CREATE_ORG_SECRET_CODE environment variable. Going to create one.");
                let code = create_random_secret(16);
                info!(
                    "Secret code for creating organizations was generated and set to: {}",
                    code
                );
                code
            }
        };
        let default_port = "5000";
        let port = std::env::var("PORT").unwrap_or(default_port.into());
        let port = match port.parse::<usize>() {
            Ok(port) => port,
            Err(_) => {
                warn!(
                    "The given PORT: {} is not valid, falling back to the default port: {}.",
                    port, default_port
                );
                default_port.parse::<usize>().unwrap()
            }
        };
        let sms_request_timeout = match std::env::var("SMS_REQUEST_TIMEOUT_SECS") {
            Ok(secs) => match secs.parse::<u64>() {
                Ok(secs) => Duration::from_secs(secs),
                Err(_) => {
                    warn!(
                        "The given SMS_REQUEST_TIMEOUT_SECS: {} is not valid, falling back to the default: {}.",
                        secs, DEFAULT_SMS_TIMEOUT_SECS
                    );
                    Duration::from_secs(DEFAULT_SMS_TIMEOUT_SECS)
                }
            },
            Err(_) => Duration::from_secs(DEFAULT_SMS_TIMEOUT_SECS),
        };
        Self {
            create_organization_secret_code,
            port,
            sms_request_timeout,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
