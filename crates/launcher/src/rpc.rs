//! Chain access used by the funding gate and the token issuer

use async_trait::async_trait;
use solana_client::nonblocking::rpc_client::RpcClient;
use solana_sdk::{
    commitment_config::CommitmentConfig,
    instruction::Instruction,
    pubkey::Pubkey,
    signature::{Keypair, Signature},
    signer::Signer,
    transaction::Transaction,
};
use std::sync::Arc;
use tracing::debug;

use crate::error::{LaunchError, LaunchResult};

/// The two RPC capabilities the launcher needs
#[async_trait]
pub trait ChainClient: Send + Sync {
    /// Balance of `pubkey` in lamports
    async fn get_balance(&self, pubkey: &Pubkey) -> LaunchResult<u64>;

    /// Sign `instructions` into one transaction, submit it and wait for
    /// confirmation. The first signer pays the fee.
    async fn send_and_confirm(
        &self,
        instructions: &[Instruction],
        signers: &[&Keypair],
    ) -> LaunchResult<Signature>;
}

/// `ChainClient` backed by a JSON-RPC endpoint
pub struct RpcChainClient {
    rpc: RpcClient,
}

impl RpcChainClient {
    pub fn new(rpc_url: &str) -> Self {
        Self {
            rpc: RpcClient::new_with_commitment(rpc_url.to_string(), CommitmentConfig::confirmed()),
        }
    }
}

#[async_trait]
impl ChainClient for RpcChainClient {
    async fn get_balance(&self, pubkey: &Pubkey) -> LaunchResult<u64> {
        let balance = self.rpc.get_balance(pubkey).await?;
        debug!(%pubkey, balance, "Fetched balance");
        Ok(balance)
    }

    async fn send_and_confirm(
        &self,
        instructions: &[Instruction],
        signers: &[&Keypair],
    ) -> LaunchResult<Signature> {
        let payer = signers
            .first()
            .ok_or_else(|| LaunchError::Issuance("Transaction has no signers".to_string()))?;
        let recent_blockhash = self.rpc.get_latest_blockhash().await?;

        let tx = Transaction::new_signed_with_payer(
            instructions,
            Some(&payer.pubkey()),
            signers,
            recent_blockhash,
        );

        let signature = self.rpc.send_and_confirm_transaction(&tx).await?;
        debug!(%signature, instructions = instructions.len(), "Transaction confirmed");
        Ok(signature)
    }
}

#[async_trait]
impl<T: ChainClient + ?Sized> ChainClient for Arc<T> {
    async fn get_balance(&self, pubkey: &Pubkey) -> LaunchResult<u64> {
        (**self).get_balance(pubkey).await
    }

    async fn send_and_confirm(
        &self,
        instructions: &[Instruction],
        signers: &[&Keypair],
    ) -> LaunchResult<Signature> {
        (**self).send_and_confirm(instructions, signers).await
    }
}
