//! Testing utilities for the launcher
//!
//! In-memory stand-ins for the terminal, the chain and the pinning service,
//! so the whole workflow can run without a network.

use async_trait::async_trait;
use solana_sdk::{
    instruction::Instruction,
    pubkey::Pubkey,
    signature::{Keypair, Signature, Signer},
};
use std::collections::{HashSet, VecDeque};
use std::sync::Mutex;

use crate::error::{LaunchError, LaunchResult};
use crate::metadata::{MetadataUpload, MetadataUploader};
use crate::prompt::Prompter;
use crate::rpc::ChainClient;

/// Prompter answering from a fixed script. Runs out like a closed stdin.
pub struct ScriptedPrompter {
    answers: VecDeque<String>,
    asked: Vec<String>,
}

impl ScriptedPrompter {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: answers.into_iter().map(Into::into).collect(),
            asked: Vec::new(),
        }
    }

    /// Questions shown so far, in order
    pub fn asked(&self) -> &[String] {
        &self.asked
    }

    /// Answers not yet consumed
    pub fn remaining(&self) -> usize {
        self.answers.len()
    }
}

#[async_trait]
impl Prompter for ScriptedPrompter {
    async fn read_line(&mut self, question: &str) -> LaunchResult<Option<String>> {
        self.asked.push(question.to_string());
        Ok(self.answers.pop_front())
    }
}

/// A transaction captured by [`MockChain`]
#[derive(Debug, Clone)]
pub struct SentTransaction {
    pub instructions: Vec<Instruction>,
    pub signers: Vec<Pubkey>,
}

/// Chain double with scripted balances and recorded submissions
pub struct MockChain {
    balances: Mutex<VecDeque<u64>>,
    balance_queries: Mutex<usize>,
    sent: Mutex<Vec<SentTransaction>>,
    failing_sends: HashSet<usize>,
}

impl MockChain {
    /// Balances returned by successive queries; the last one repeats
    pub fn with_balances<I: IntoIterator<Item = u64>>(balances: I) -> Self {
        Self {
            balances: Mutex::new(balances.into_iter().collect()),
            balance_queries: Mutex::new(0),
            sent: Mutex::new(Vec::new()),
            failing_sends: HashSet::new(),
        }
    }

    /// Wallet holding 1 SOL
    pub fn funded() -> Self {
        Self::with_balances([1_000_000_000])
    }

    /// Make the `index`-th submitted transaction (zero based) fail
    pub fn fail_send_at(mut self, index: usize) -> Self {
        self.failing_sends.insert(index);
        self
    }

    pub fn balance_queries(&self) -> usize {
        *self.balance_queries.lock().unwrap()
    }

    /// Every transaction submitted so far, failed ones included
    pub fn sent(&self) -> Vec<SentTransaction> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChainClient for MockChain {
    async fn get_balance(&self, _pubkey: &Pubkey) -> LaunchResult<u64> {
        *self.balance_queries.lock().unwrap() += 1;
        let mut balances = self.balances.lock().unwrap();
        let balance = if balances.len() > 1 {
            balances.pop_front()
        } else {
            balances.front().copied()
        };
        balance.ok_or_else(|| LaunchError::Rpc("no balance scripted".to_string()))
    }

    async fn send_and_confirm(
        &self,
        instructions: &[Instruction],
        signers: &[&Keypair],
    ) -> LaunchResult<Signature> {
        let mut sent = self.sent.lock().unwrap();
        let index = sent.len();
        sent.push(SentTransaction {
            instructions: instructions.to_vec(),
            signers: signers.iter().map(|s| s.pubkey()).collect(),
        });

        if self.failing_sends.contains(&index) {
            return Err(LaunchError::Rpc(format!(
                "Transaction {} simulation failed",
                index
            )));
        }
        Ok(Signature::new_unique())
    }
}

/// Uploader double returning a canned response
pub struct MockUploader {
    response: Result<String, String>,
    uploads: Mutex<Vec<MetadataUpload>>,
}

impl MockUploader {
    pub fn returning(uri: impl Into<String>) -> Self {
        Self {
            response: Ok(uri.into()),
            uploads: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(reason: impl Into<String>) -> Self {
        Self {
            response: Err(reason.into()),
            uploads: Mutex::new(Vec::new()),
        }
    }

    pub fn uploads(&self) -> Vec<MetadataUpload> {
        self.uploads.lock().unwrap().clone()
    }
}

#[async_trait]
impl MetadataUploader for MockUploader {
    async fn publish(&self, upload: &MetadataUpload) -> LaunchResult<String> {
        self.uploads.lock().unwrap().push(upload.clone());
        match &self.response {
            Ok(uri) => Ok(uri.clone()),
            Err(reason) => Err(LaunchError::Upload(reason.clone())),
        }
    }
}
