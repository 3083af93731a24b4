//! Error types for the token launcher

use thiserror::Error;

#[derive(Error, Debug)]
pub enum LaunchError {
    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Wallet error: {0}")]
    Wallet(String),

    #[error("Insufficient funds: balance {balance} lamports, need at least {required}")]
    Funding { balance: u64, required: u64 },

    #[error("Metadata upload failed: {0}")]
    Upload(String),

    #[error("Token issuance failed: {0}")]
    Issuance(String),

    #[error("Failed to revoke {authority} authority: {reason}")]
    AuthorityRevocation { authority: String, reason: String },

    #[error("RPC error: {0}")]
    Rpc(String),

    #[error("Prompt error: {0}")]
    Prompt(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Launch cancelled by operator")]
    Cancelled,
}

impl LaunchError {
    /// Cancellation is a clean exit, everything else is fatal
    pub fn is_cancelled(&self) -> bool {
        matches!(self, LaunchError::Cancelled)
    }
}

impl From<std::io::Error> for LaunchError {
    fn from(err: std::io::Error) -> Self {
        LaunchError::Prompt(err.to_string())
    }
}

impl From<solana_client::client_error::ClientError> for LaunchError {
    fn from(err: solana_client::client_error::ClientError) -> Self {
        LaunchError::Rpc(err.to_string())
    }
}

pub type LaunchResult<T> = Result<T, LaunchError>;
