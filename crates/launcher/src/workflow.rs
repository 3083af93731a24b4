//! The launch workflow
//!
//! Steps run strictly in order: wallet, network and funding, interview,
//! metadata upload, issuance, report. The final confirmation is the last
//! point where the operator can back out; after it everything is submitted.

use solana_sdk::signature::Signer;
use tracing::info;

use crate::config::{LaunchConfig, Network, MIN_BALANCE_LAMPORTS};
use crate::console;
use crate::error::{LaunchError, LaunchResult};
use crate::funding::await_funding;
use crate::interview::{choose_network, collect_details, confirm_launch};
use crate::issuer::{RevocationPolicy, TokenIssuer};
use crate::metadata::{MetadataUpload, MetadataUploader};
use crate::prompt::Prompter;
use crate::report::print_report;
use crate::rpc::ChainClient;
use crate::types::Receipt;
use crate::wallet::ensure_wallet;

/// Outcome of a completed launch
#[derive(Debug, Clone)]
pub struct Launch {
    pub network: Network,
    pub receipt: Receipt,
}

pub struct Launcher<'a> {
    config: &'a LaunchConfig,
    uploader: &'a dyn MetadataUploader,
    policy: RevocationPolicy,
}

impl<'a> Launcher<'a> {
    pub fn new(config: &'a LaunchConfig, uploader: &'a dyn MetadataUploader) -> Self {
        Self {
            config,
            uploader,
            policy: RevocationPolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: RevocationPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Run one launch. `connect` builds the chain client once the operator
    /// has picked a network. Returns [`LaunchError::Cancelled`] when the
    /// operator backs out.
    pub async fn run<C, F>(&self, prompter: &mut dyn Prompter, connect: F) -> LaunchResult<Launch>
    where
        C: ChainClient,
        F: FnOnce(&str) -> C,
    {
        console::step(1, "Preparing wallet...");
        let wallet = ensure_wallet(&self.config.wallet_path)?;
        console::info(&format!("Wallet: {}", wallet.pubkey()));

        let network = choose_network(prompter).await?;
        let rpc_url = network.rpc_url(self.config);
        info!(network = network.label(), %rpc_url, "Network selected");
        let chain = connect(rpc_url.as_str());

        console::step(2, "Checking wallet balance...");
        let balance =
            await_funding(&chain, prompter, &wallet.pubkey(), MIN_BALANCE_LAMPORTS).await?;
        console::success("Wallet funded");

        console::step(3, "Token details");
        let details = collect_details(prompter).await?;
        if !confirm_launch(prompter, &details, &network).await? {
            return Err(LaunchError::Cancelled);
        }

        console::step(4, "Uploading image and metadata...");
        let uri = self
            .uploader
            .publish(&MetadataUpload::from(&details))
            .await?;
        console::success(&format!("Metadata URI: {}", uri));

        console::step(5, "Creating token...");
        let params = details.into_params(uri);
        let receipt = TokenIssuer::new(&chain)
            .with_policy(self.policy)
            .issue(&wallet, &params)
            .await?;

        console::step(6, "Summary");
        print_report(&receipt, &network, params.decimals, balance);

        Ok(Launch { network, receipt })
    }
}
