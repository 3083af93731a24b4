//! Local signing wallet
//!
//! The wallet is a JSON array of the 64 raw keypair bytes, the same layout the
//! Solana CLI writes. It is created on first run and only read afterwards.

use solana_sdk::signature::{Keypair, Signer};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;
use tracing::{debug, info};

use crate::error::{LaunchError, LaunchResult};

/// Load the keypair stored at `path`, generating and persisting a new one if
/// the file does not exist yet. An existing file is never rewritten.
pub fn ensure_wallet(path: impl AsRef<Path>) -> LaunchResult<Keypair> {
    let path = path.as_ref();

    if path.exists() {
        let wallet = load_wallet(path)?;
        debug!(path = %path.display(), pubkey = %wallet.pubkey(), "Loaded existing wallet");
        return Ok(wallet);
    }

    let wallet = Keypair::new();
    write_new_wallet(path, &wallet)?;
    info!(path = %path.display(), pubkey = %wallet.pubkey(), "Generated new wallet");
    Ok(wallet)
}

/// Parse a wallet file into a keypair
pub fn load_wallet(path: &Path) -> LaunchResult<Keypair> {
    let content = fs::read_to_string(path).map_err(|e| {
        LaunchError::Wallet(format!("Failed to read {}: {}", path.display(), e))
    })?;
    keypair_from_json(&content)
        .map_err(|e| LaunchError::Wallet(format!("{} in {}", e, path.display())))
}

/// Decode a JSON byte array into a keypair
pub fn keypair_from_json(content: &str) -> Result<Keypair, String> {
    let bytes: Vec<u8> = serde_json::from_str(content)
        .map_err(|e| format!("Malformed keypair bytes: {}", e))?;
    Keypair::from_bytes(&bytes).map_err(|e| format!("Invalid keypair: {}", e))
}

fn write_new_wallet(path: &Path, wallet: &Keypair) -> LaunchResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| {
            LaunchError::Wallet(format!("Failed to create {}: {}", parent.display(), e))
        })?;
    }

    let encoded = serde_json::to_string(&wallet.to_bytes().to_vec())
        .map_err(|e| LaunchError::Wallet(format!("Failed to encode keypair: {}", e)))?;

    // create_new refuses to clobber a file that appeared since the exists() check
    let mut file = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .map_err(|e| LaunchError::Wallet(format!("Failed to create {}: {}", path.display(), e)))?;
    file.write_all(encoded.as_bytes())
        .map_err(|e| LaunchError::Wallet(format!("Failed to write {}: {}", path.display(), e)))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generates_wallet_when_missing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("keys").join("wallet.json");

        let wallet = ensure_wallet(&path).unwrap();

        assert!(path.exists());
        let stored: Vec<u8> = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(stored.len(), 64);
        assert_eq!(stored, wallet.to_bytes().to_vec());
    }

    #[test]
    fn test_existing_wallet_is_reused_and_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wallet.json");

        let first = ensure_wallet(&path).unwrap();
        let before = fs::read(&path).unwrap();

        let second = ensure_wallet(&path).unwrap();
        let after = fs::read(&path).unwrap();

        assert_eq!(first.pubkey(), second.pubkey());
        assert_eq!(before, after);
    }

    #[test]
    fn test_reads_cli_style_keypair() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("id.json");
        let keypair = Keypair::new();
        fs::write(&path, serde_json::to_string(&keypair.to_bytes().to_vec()).unwrap()).unwrap();

        let loaded = ensure_wallet(&path).unwrap();
        assert_eq!(loaded.pubkey(), keypair.pubkey());
    }

    #[test]
    fn test_malformed_wallet_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wallet.json");
        fs::write(&path, "not a keypair").unwrap();

        let err = ensure_wallet(&path).unwrap_err();
        assert!(matches!(err, LaunchError::Wallet(_)));
        assert_eq!(fs::read_to_string(&path).unwrap(), "not a keypair");
    }

    #[test]
    fn test_wrong_length_is_rejected() {
        assert!(keypair_from_json("[1,2,3]").is_err());
    }
}
