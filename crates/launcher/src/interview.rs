//! Operator interview
//!
//! Questions are asked in a fixed order. Every answer is validated on the
//! spot; a rejected answer repeats the same question.

use rust_decimal::Decimal;
use std::path::{Path, PathBuf};

use crate::config::{has_http_scheme, Network};
use crate::error::{LaunchError, LaunchResult};
use crate::math::{parse_supply, to_base_units};
use crate::prompt::{ask_optional, ask_validated, confirm, Prompter};
use crate::types::{AuthorityFlags, TokenDetails};

/// Ask which cluster to launch on. A custom choice also asks for its URL.
pub async fn choose_network(prompter: &mut dyn Prompter) -> LaunchResult<Network> {
    println!("Select network:");
    println!("  1) mainnet-beta");
    println!("  2) devnet");
    println!("  3) custom RPC URL");

    let choice = ask_validated(prompter, "Network [1-3]:", parse_network_choice).await?;
    match choice {
        NetworkChoice::Mainnet => Ok(Network::Mainnet),
        NetworkChoice::Devnet => Ok(Network::Devnet),
        NetworkChoice::Custom => {
            let url = ask_validated(prompter, "RPC URL:", validate_rpc_url).await?;
            Ok(Network::Custom(url))
        }
    }
}

/// Collect the token fields and the three authority toggles
pub async fn collect_details(prompter: &mut dyn Prompter) -> LaunchResult<TokenDetails> {
    let name = ask_validated(prompter, "Token name:", |a| validate_required("Name", a)).await?;
    let symbol =
        ask_validated(prompter, "Token symbol:", |a| validate_required("Symbol", a)).await?;
    let decimals = ask_validated(prompter, "Decimals (e.g. 6):", validate_decimals).await?;
    let supply = ask_validated(prompter, "Total supply:", |a| {
        validate_supply(a, decimals)
    })
    .await?;
    let image_path = ask_validated(prompter, "Image file path:", validate_image_path).await?;
    let description = ask_optional(prompter, "Description (optional):").await?;
    let twitter = ask_optional(prompter, "Twitter link (optional):").await?;
    let website = ask_optional(prompter, "Website (optional):").await?;

    let authorities = AuthorityFlags {
        revoke_mint: confirm(prompter, "Revoke mint authority (fixed supply)?", false).await?,
        revoke_freeze: confirm(prompter, "Revoke freeze authority?", true).await?,
        revoke_update: confirm(prompter, "Revoke update authority (immutable metadata)?", false)
            .await?,
    };

    Ok(TokenDetails {
        name,
        symbol,
        decimals,
        supply,
        image_path,
        description,
        twitter,
        website,
        authorities,
    })
}

/// Print a summary and ask for the final go-ahead
pub async fn confirm_launch(
    prompter: &mut dyn Prompter,
    details: &TokenDetails,
    network: &Network,
) -> LaunchResult<bool> {
    println!("\nLaunch summary");
    println!("  Network:    {}", network.label());
    println!("  Name:       {}", details.name);
    println!("  Symbol:     {}", details.symbol);
    println!("  Decimals:   {}", details.decimals);
    println!("  Supply:     {}", details.supply);
    println!("  Image:      {}", details.image_path.display());
    println!("  Revoke mint authority:   {}", yes_no(details.authorities.revoke_mint));
    println!("  Revoke freeze authority: {}", yes_no(details.authorities.revoke_freeze));
    println!("  Revoke update authority: {}", yes_no(details.authorities.revoke_update));

    confirm(prompter, "Create this token?", true).await
}

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "yes"
    } else {
        "no"
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NetworkChoice {
    Mainnet,
    Devnet,
    Custom,
}

pub fn parse_network_choice(answer: &str) -> LaunchResult<NetworkChoice> {
    match answer.trim() {
        "1" => Ok(NetworkChoice::Mainnet),
        "2" => Ok(NetworkChoice::Devnet),
        "3" => Ok(NetworkChoice::Custom),
        other => Err(LaunchError::Validation(format!(
            "Choose 1, 2 or 3 (got '{}')",
            other
        ))),
    }
}

pub fn validate_rpc_url(answer: &str) -> LaunchResult<String> {
    let url = answer.trim();
    if !has_http_scheme(url) {
        return Err(LaunchError::Validation(
            "RPC URL must start with http:// or https://".to_string(),
        ));
    }
    Ok(url.to_string())
}

pub fn validate_required(field: &str, answer: &str) -> LaunchResult<String> {
    let value = answer.trim();
    if value.is_empty() {
        return Err(LaunchError::Validation(format!("{} is required", field)));
    }
    Ok(value.to_string())
}

pub fn validate_decimals(answer: &str) -> LaunchResult<u8> {
    answer.trim().parse::<u8>().map_err(|_| {
        LaunchError::Validation(format!(
            "Decimals must be a whole number between 0 and {} (got '{}')",
            u8::MAX,
            answer.trim()
        ))
    })
}

/// Supply must be positive and still at least one base unit once scaled
pub fn validate_supply(answer: &str, decimals: u8) -> LaunchResult<Decimal> {
    let supply = parse_supply(answer)?;
    if to_base_units(supply, decimals)? == 0 {
        return Err(LaunchError::Validation(format!(
            "Supply {} is smaller than one base unit at {} decimals",
            supply, decimals
        )));
    }
    Ok(supply)
}

pub fn validate_image_path(answer: &str) -> LaunchResult<PathBuf> {
    let path = Path::new(answer.trim());
    if !path.is_file() {
        return Err(LaunchError::Validation(format!(
            "No file found at '{}'",
            path.display()
        )));
    }
    Ok(path.to_path_buf())
}
