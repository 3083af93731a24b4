//! Token issuance
//!
//! One atomic transaction creates the mint with its metadata, opens the
//! payer's associated token account and mints the full supply into it.
//! Mint and freeze authority revocations follow as independent transactions.

use mpl_token_metadata::{instructions::CreateV1Builder, types::TokenStandard};
use solana_sdk::{
    instruction::Instruction,
    pubkey::Pubkey,
    signature::{Keypair, Signer},
};
use spl_associated_token_account::{
    get_associated_token_address, instruction::create_associated_token_account_idempotent,
};
use spl_token::instruction::AuthorityType;
use std::fmt;
use tracing::{info, warn};

use crate::console;
use crate::error::{LaunchError, LaunchResult};
use crate::math::to_base_units;
use crate::rpc::ChainClient;
use crate::types::{Receipt, RevocationOutcome, TokenParams};

/// What a failed authority revocation does to the run.
///
/// The token already exists once a revocation is attempted, so the default
/// records the failure in the receipt and carries on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RevocationPolicy {
    #[default]
    Continue,
    Abort,
}

/// Mint authorities that can be revoked after creation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Authority {
    Mint,
    Freeze,
}

impl Authority {
    fn authority_type(self) -> AuthorityType {
        match self {
            Authority::Mint => AuthorityType::MintTokens,
            Authority::Freeze => AuthorityType::FreezeAccount,
        }
    }
}

impl fmt::Display for Authority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Authority::Mint => write!(f, "mint"),
            Authority::Freeze => write!(f, "freeze"),
        }
    }
}

/// Address of the Token Metadata account for `mint`
pub fn metadata_address(mint: &Pubkey) -> Pubkey {
    Pubkey::find_program_address(
        &[
            b"metadata",
            mpl_token_metadata::ID.as_ref(),
            mint.as_ref(),
        ],
        &mpl_token_metadata::ID,
    )
    .0
}

/// Build the create, associated-account and mint instructions.
/// `payer` is also the mint, freeze and update authority.
pub fn build_issue_instructions(
    payer: &Pubkey,
    mint: &Pubkey,
    params: &TokenParams,
    amount: u64,
) -> LaunchResult<Vec<Instruction>> {
    let create_ix = CreateV1Builder::new()
        .metadata(metadata_address(mint))
        .mint(*mint, true)
        .authority(*payer)
        .payer(*payer)
        .update_authority(*payer, true)
        .spl_token_program(Some(spl_token::id()))
        .name(params.name.clone())
        .symbol(params.symbol.clone())
        .uri(params.uri.clone())
        .seller_fee_basis_points(0)
        .decimals(params.decimals)
        .token_standard(TokenStandard::Fungible)
        .is_mutable(!params.authorities.revoke_update)
        .instruction();

    let token_account = get_associated_token_address(payer, mint);
    let ata_ix = create_associated_token_account_idempotent(payer, payer, mint, &spl_token::id());

    let mint_ix = spl_token::instruction::mint_to(
        &spl_token::id(),
        mint,
        &token_account,
        payer,
        &[],
        amount,
    )
    .map_err(|e| LaunchError::Issuance(format!("Failed to build mint_to: {}", e)))?;

    Ok(vec![create_ix, ata_ix, mint_ix])
}

/// Instruction removing `authority` from `mint` for good
pub fn revoke_authority_instruction(
    mint: &Pubkey,
    current_authority: &Pubkey,
    authority: Authority,
) -> LaunchResult<Instruction> {
    spl_token::instruction::set_authority(
        &spl_token::id(),
        mint,
        None,
        authority.authority_type(),
        current_authority,
        &[],
    )
    .map_err(|e| LaunchError::AuthorityRevocation {
        authority: authority.to_string(),
        reason: e.to_string(),
    })
}

pub struct TokenIssuer<'a> {
    chain: &'a dyn ChainClient,
    policy: RevocationPolicy,
}

impl<'a> TokenIssuer<'a> {
    pub fn new(chain: &'a dyn ChainClient) -> Self {
        Self {
            chain,
            policy: RevocationPolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: RevocationPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Create the token and mint the supply to `wallet`, then revoke the
    /// requested authorities. Nothing is retried.
    pub async fn issue(&self, wallet: &Keypair, params: &TokenParams) -> LaunchResult<Receipt> {
        let amount = to_base_units(params.supply, params.decimals)
            .map_err(|e| LaunchError::Issuance(e.to_string()))?;

        // Never persisted: an interrupted run loses this address
        let mint = Keypair::new();
        let mint_pubkey = mint.pubkey();
        let payer = wallet.pubkey();
        let token_account = get_associated_token_address(&payer, &mint_pubkey);
        info!(mint = %mint_pubkey, amount, "Issuing token");

        let instructions = build_issue_instructions(&payer, &mint_pubkey, params, amount)?;
        let signature = self
            .chain
            .send_and_confirm(&instructions, &[wallet, &mint])
            .await
            .map_err(|e| LaunchError::Issuance(e.to_string()))?;
        console::success(&format!("Token created: {}", signature));

        let mint_revocation = if params.authorities.revoke_mint {
            Some(self.revoke(wallet, &mint_pubkey, Authority::Mint).await?)
        } else {
            None
        };

        let freeze_revocation = if params.authorities.revoke_freeze {
            Some(self.revoke(wallet, &mint_pubkey, Authority::Freeze).await?)
        } else {
            None
        };

        Ok(Receipt {
            signature,
            mint: mint_pubkey,
            token_account,
            amount,
            uri: params.uri.clone(),
            mint_revocation,
            freeze_revocation,
        })
    }

    async fn revoke(
        &self,
        wallet: &Keypair,
        mint: &Pubkey,
        authority: Authority,
    ) -> LaunchResult<RevocationOutcome> {
        let result = match revoke_authority_instruction(mint, &wallet.pubkey(), authority) {
            Ok(ix) => self.chain.send_and_confirm(&[ix], &[wallet]).await,
            Err(e) => Err(e),
        };

        match result {
            Ok(signature) => {
                console::success(&format!("{} authority revoked: {}", authority, signature));
                Ok(RevocationOutcome::Revoked(signature))
            }
            Err(e) => {
                let err = LaunchError::AuthorityRevocation {
                    authority: authority.to_string(),
                    reason: e.to_string(),
                };
                if self.policy == RevocationPolicy::Abort {
                    return Err(err);
                }
                warn!(%mint, %authority, error = %e, "Authority revocation failed");
                console::warn(&err.to_string());
                Ok(RevocationOutcome::Failed(e.to_string()))
            }
        }
    }
}
