//! Token Launcher
//!
//! Interactive provisioning of a fungible SPL token:
//! - Wallet load-or-generate
//! - Funding gate
//! - Operator interview
//! - Metadata pinning
//! - Token creation, minting and authority revocation

pub mod config;
pub mod console;
pub mod error;
pub mod funding;
pub mod interview;
pub mod issuer;
pub mod math;
pub mod metadata;
pub mod prompt;
pub mod report;
pub mod rpc;
pub mod testing;
pub mod types;
pub mod wallet;
pub mod workflow;

pub use config::{LaunchConfig, Network};
pub use error::{LaunchError, LaunchResult};
pub use issuer::{RevocationPolicy, TokenIssuer};
pub use metadata::{HttpUploader, MetadataUploader};
pub use prompt::{Prompter, TerminalPrompter};
pub use rpc::{ChainClient, RpcChainClient};
pub use types::*;
pub use workflow::{Launch, Launcher};
