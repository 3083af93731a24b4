use rust_decimal::Decimal;
use solana_sdk::{pubkey::Pubkey, signature::Signature};
use std::path::PathBuf;

/// Which authorities the operator asked to give up
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AuthorityFlags {
    pub revoke_mint: bool,
    pub revoke_freeze: bool,
    /// Folded into the create instruction as `is_mutable = false`
    pub revoke_update: bool,
}

/// Everything collected by the interview, before the metadata is pinned
#[derive(Debug, Clone, PartialEq)]
pub struct TokenDetails {
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
    pub supply: Decimal,
    pub image_path: PathBuf,
    pub description: String,
    pub twitter: String,
    pub website: String,
    pub authorities: AuthorityFlags,
}

impl TokenDetails {
    /// Attach the pinned metadata URI, producing the issuance parameters
    pub fn into_params(self, uri: String) -> TokenParams {
        TokenParams {
            name: self.name,
            symbol: self.symbol,
            uri,
            decimals: self.decimals,
            supply: self.supply,
            authorities: self.authorities,
        }
    }
}

/// Parameters consumed by the token issuer
#[derive(Debug, Clone, PartialEq)]
pub struct TokenParams {
    pub name: String,
    pub symbol: String,
    pub uri: String,
    pub decimals: u8,
    pub supply: Decimal,
    pub authorities: AuthorityFlags,
}

/// Result of one authority revocation transaction
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RevocationOutcome {
    Revoked(Signature),
    Failed(String),
}

impl RevocationOutcome {
    pub fn signature(&self) -> Option<&Signature> {
        match self {
            RevocationOutcome::Revoked(sig) => Some(sig),
            RevocationOutcome::Failed(_) => None,
        }
    }
}

/// What the issuer did on chain
#[derive(Debug, Clone, PartialEq)]
pub struct Receipt {
    /// Signature of the create + ATA + mint transaction
    pub signature: Signature,
    pub mint: Pubkey,
    pub token_account: Pubkey,
    /// Base units minted to `token_account`
    pub amount: u64,
    pub uri: String,
    pub mint_revocation: Option<RevocationOutcome>,
    pub freeze_revocation: Option<RevocationOutcome>,
}
