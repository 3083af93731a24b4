//! End-to-end launch workflow against in-memory collaborators

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use solana_sdk::signature::Signer;
use tempfile::TempDir;
use token_launcher::{
    testing::{MockChain, MockUploader, ScriptedPrompter},
    wallet::load_wallet,
    LaunchConfig, LaunchError, Launcher, Network, RevocationOutcome,
};

struct Fixture {
    _dir: TempDir,
    config: LaunchConfig,
    image: PathBuf,
}

fn fixture() -> Fixture {
    let dir = tempfile::tempdir().unwrap();
    let image = dir.path().join("logo.png");
    std::fs::write(&image, [0x89, b'P', b'N', b'G', 0x0d, 0x0a]).unwrap();
    let config = LaunchConfig {
        wallet_path: dir.path().join("wallet.json"),
        ..LaunchConfig::default()
    };
    Fixture {
        _dir: dir,
        config,
        image,
    }
}

/// Answers for a devnet launch of "My Token"
fn answers(image: &Path, revoke_mint: &str, confirm: &str) -> Vec<String> {
    [
        "2",
        "My Token",
        "MTK",
        "6",
        "1000000000",
        image.to_str().unwrap(),
        "A token for testing",
        "https://x.com/mytoken",
        "",
        revoke_mint,
        "n",
        "n",
        confirm,
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

#[tokio::test]
async fn test_devnet_launch_with_mint_revocation() {
    let fx = fixture();
    let chain = Arc::new(MockChain::funded());
    let uploader = MockUploader::returning("https://ipfs.io/ipfs/QmMeta");
    let mut prompter = ScriptedPrompter::new(answers(&fx.image, "y", "y"));
    let connected_to = Mutex::new(None);

    let launch = Launcher::new(&fx.config, &uploader)
        .run(&mut prompter, |url| {
            *connected_to.lock().unwrap() = Some(url.to_string());
            Arc::clone(&chain)
        })
        .await
        .unwrap();

    assert_eq!(launch.network, Network::Devnet);
    assert_eq!(
        connected_to.lock().unwrap().as_deref(),
        Some("https://api.devnet.solana.com")
    );
    assert_eq!(prompter.remaining(), 0);

    let receipt = &launch.receipt;
    assert_eq!(receipt.amount, 1_000_000_000_000_000);
    assert_eq!(receipt.uri, "https://ipfs.io/ipfs/QmMeta");
    match &receipt.mint_revocation {
        Some(RevocationOutcome::Revoked(sig)) => assert_ne!(*sig, receipt.signature),
        other => panic!("expected mint revocation, got {:?}", other),
    }
    assert!(receipt.freeze_revocation.is_none());

    // issuance then one revocation, both paid by the stored wallet
    let wallet = load_wallet(&fx.config.wallet_path).unwrap();
    let sent = chain.sent();
    assert_eq!(sent.len(), 2);
    assert_eq!(sent[0].signers[0], wallet.pubkey());
    assert_eq!(sent[1].instructions[0].accounts[0].pubkey, receipt.mint);

    let uploads = uploader.uploads();
    assert_eq!(uploads.len(), 1);
    assert_eq!(uploads[0].name, "My Token");
    assert_eq!(uploads[0].symbol, "MTK");
    assert_eq!(uploads[0].twitter, "https://x.com/mytoken");
    assert_eq!(uploads[0].website, "");
}

#[tokio::test]
async fn test_declined_confirmation_submits_nothing() {
    let fx = fixture();
    let chain = Arc::new(MockChain::funded());
    let uploader = MockUploader::returning("https://ipfs.io/ipfs/QmMeta");
    let mut prompter = ScriptedPrompter::new(answers(&fx.image, "n", "n"));

    let err = Launcher::new(&fx.config, &uploader)
        .run(&mut prompter, |_| Arc::clone(&chain))
        .await
        .unwrap_err();

    assert!(err.is_cancelled());
    assert!(uploader.uploads().is_empty());
    assert!(chain.sent().is_empty());
    // the wallet created in step one stays behind
    assert!(fx.config.wallet_path.exists());
}

#[tokio::test]
async fn test_upload_failure_stops_before_chain() {
    let fx = fixture();
    let chain = Arc::new(MockChain::funded());
    let uploader = MockUploader::failing("Response has no 'metadataUri' field");
    let mut prompter = ScriptedPrompter::new(answers(&fx.image, "y", "y"));

    let err = Launcher::new(&fx.config, &uploader)
        .run(&mut prompter, |_| Arc::clone(&chain))
        .await
        .unwrap_err();

    assert!(matches!(err, LaunchError::Upload(_)));
    assert_eq!(uploader.uploads().len(), 1);
    assert!(chain.sent().is_empty());
}

#[tokio::test]
async fn test_underfunded_wallet_never_reaches_interview() {
    let fx = fixture();
    let chain = Arc::new(MockChain::with_balances([0, 50_000_000]));
    let uploader = MockUploader::returning("https://ipfs.io/ipfs/QmMeta");
    // network choice, then Enter at the funding pause
    let mut prompter = ScriptedPrompter::new(["1", ""]);

    let err = Launcher::new(&fx.config, &uploader)
        .run(&mut prompter, |_| Arc::clone(&chain))
        .await
        .unwrap_err();

    assert!(matches!(err, LaunchError::Funding { balance: 50_000_000, .. }));
    assert_eq!(prompter.asked().len(), 2);
    assert!(uploader.uploads().is_empty());
    assert!(chain.sent().is_empty());
}

#[tokio::test]
async fn test_existing_wallet_pays_for_launch() {
    let fx = fixture();
    let existing = solana_sdk::signature::Keypair::new();
    std::fs::write(
        &fx.config.wallet_path,
        serde_json::to_string(&existing.to_bytes().to_vec()).unwrap(),
    )
    .unwrap();
    let before = std::fs::read(&fx.config.wallet_path).unwrap();

    let chain = Arc::new(MockChain::funded());
    let uploader = MockUploader::returning("https://ipfs.io/ipfs/QmMeta");
    let mut prompter = ScriptedPrompter::new(answers(&fx.image, "n", ""));

    Launcher::new(&fx.config, &uploader)
        .run(&mut prompter, |_| Arc::clone(&chain))
        .await
        .unwrap();

    assert_eq!(std::fs::read(&fx.config.wallet_path).unwrap(), before);
    assert_eq!(chain.sent()[0].signers[0], existing.pubkey());
}
