//! Funding gate
//!
//! Blocks the launch until the wallet holds enough SOL to pay for the mint,
//! metadata and token accounts. The operator gets exactly one chance to top
//! up the wallet.

use solana_sdk::pubkey::Pubkey;
use tracing::{info, warn};

use crate::console;
use crate::error::{LaunchError, LaunchResult};
use crate::prompt::{pause, Prompter, Resume};
use crate::rpc::ChainClient;

pub async fn await_funding(
    chain: &dyn ChainClient,
    prompter: &mut dyn Prompter,
    pubkey: &Pubkey,
    minimum_lamports: u64,
) -> LaunchResult<u64> {
    let balance = chain.get_balance(pubkey).await?;
    if balance >= minimum_lamports {
        info!(%pubkey, balance, "Wallet funded");
        return Ok(balance);
    }

    console::warn(&format!(
        "Wallet balance is {} SOL, at least {} SOL is required",
        console::sol(balance),
        console::sol(minimum_lamports)
    ));
    console::info(&format!("Send SOL to: {}", pubkey));

    match pause(prompter, "Press Enter once funded (or 'q' to quit):").await? {
        Resume::Abort => return Err(LaunchError::Cancelled),
        Resume::Continue => {}
    }

    let balance = chain.get_balance(pubkey).await?;
    if balance < minimum_lamports {
        warn!(%pubkey, balance, minimum_lamports, "Wallet still underfunded");
        return Err(LaunchError::Funding {
            balance,
            required: minimum_lamports,
        });
    }

    info!(%pubkey, balance, "Wallet funded after pause");
    Ok(balance)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{MockChain, ScriptedPrompter};

    const MIN: u64 = 100_000_000;

    #[tokio::test]
    async fn test_funded_wallet_skips_prompt() {
        let chain = MockChain::with_balances([MIN]);
        let mut prompter = ScriptedPrompter::new(Vec::<&str>::new());
        let pubkey = Pubkey::new_unique();

        let balance = await_funding(&chain, &mut prompter, &pubkey, MIN).await.unwrap();

        assert_eq!(balance, MIN);
        assert!(prompter.asked().is_empty());
        assert_eq!(chain.balance_queries(), 1);
    }

    #[tokio::test]
    async fn test_funded_during_pause() {
        let chain = MockChain::with_balances([0, 2 * MIN]);
        let mut prompter = ScriptedPrompter::new([""]);
        let pubkey = Pubkey::new_unique();

        let balance = await_funding(&chain, &mut prompter, &pubkey, MIN).await.unwrap();

        assert_eq!(balance, 2 * MIN);
        assert_eq!(prompter.asked().len(), 1);
        assert_eq!(chain.balance_queries(), 2);
    }

    #[tokio::test]
    async fn test_still_underfunded_after_pause_is_fatal() {
        let chain = MockChain::with_balances([0, MIN - 1, MIN]);
        let mut prompter = ScriptedPrompter::new(["", ""]);
        let pubkey = Pubkey::new_unique();

        let err = await_funding(&chain, &mut prompter, &pubkey, MIN).await.unwrap_err();

        match err {
            LaunchError::Funding { balance, required } => {
                assert_eq!(balance, MIN - 1);
                assert_eq!(required, MIN);
            }
            other => panic!("unexpected error: {other}"),
        }
        // one pause, no retry loop
        assert_eq!(prompter.asked().len(), 1);
        assert_eq!(chain.balance_queries(), 2);
    }

    #[tokio::test]
    async fn test_operator_abort_cancels() {
        let chain = MockChain::with_balances([0]);
        let mut prompter = ScriptedPrompter::new(["q"]);
        let pubkey = Pubkey::new_unique();

        let err = await_funding(&chain, &mut prompter, &pubkey, MIN).await.unwrap_err();

        assert!(err.is_cancelled());
        assert_eq!(chain.balance_queries(), 1);
    }
}
