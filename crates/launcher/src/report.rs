//! Final launch report

use crate::config::Network;
use crate::console;
use crate::types::{Receipt, RevocationOutcome};

const EXPLORER_URL: &str = "https://explorer.solana.com";

/// Query string selecting the cluster on the explorer
pub fn cluster_suffix(network: &Network) -> String {
    match network {
        Network::Mainnet => String::new(),
        Network::Devnet => "?cluster=devnet".to_string(),
        Network::Custom(url) => format!(
            "?cluster=custom&customUrl={}",
            url::form_urlencoded::byte_serialize(url.as_bytes()).collect::<String>()
        ),
    }
}

pub fn transaction_link(signature: &impl ToString, network: &Network) -> String {
    format!(
        "{}/tx/{}{}",
        EXPLORER_URL,
        signature.to_string(),
        cluster_suffix(network)
    )
}

pub fn address_link(address: &impl ToString, network: &Network) -> String {
    format!(
        "{}/address/{}{}",
        EXPLORER_URL,
        address.to_string(),
        cluster_suffix(network)
    )
}

/// Lines describing a finished launch
pub fn render(receipt: &Receipt, network: &Network, decimals: u8) -> Vec<String> {
    let mut lines = vec![
        format!("Mint address:  {}", receipt.mint),
        format!("Token account: {}", receipt.token_account),
        format!(
            "Minted:        {} base units ({} decimals)",
            receipt.amount, decimals
        ),
        format!("Metadata URI:  {}", receipt.uri),
        format!("Transaction:   {}", transaction_link(&receipt.signature, network)),
        format!("Token:         {}", address_link(&receipt.mint, network)),
    ];

    for (label, outcome) in [
        ("Mint authority", &receipt.mint_revocation),
        ("Freeze authority", &receipt.freeze_revocation),
    ] {
        match outcome {
            Some(RevocationOutcome::Revoked(sig)) => lines.push(format!(
                "{} revoked: {}",
                label,
                transaction_link(sig, network)
            )),
            Some(RevocationOutcome::Failed(reason)) => {
                lines.push(format!("{} NOT revoked: {}", label, reason))
            }
            None => lines.push(format!("{} retained", label)),
        }
    }

    lines
}

pub fn print_report(receipt: &Receipt, network: &Network, decimals: u8, wallet_balance: u64) {
    console::success("Token launched!");
    for line in render(receipt, network, decimals) {
        console::info(&line);
    }
    console::info(&format!(
        "Wallet balance before launch: {} SOL",
        console::sol(wallet_balance)
    ));
}
