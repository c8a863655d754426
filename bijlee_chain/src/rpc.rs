use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use serde_json::{Value, json};
use tracing::debug;

use bijlee_core::error::TransferError;
use bijlee_core::helpers::amount::{BIJLEE_DECIMALS, from_base_units};
use bijlee_core::helpers::dto::{AccountSummary, SignatureStatus, TokenBalance};

use crate::address::Address;
use crate::token::BIJLEE_MINT;

/// Public RPC endpoints the dashboard can point at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Network {
    MainnetBeta,
    Testnet,
    Devnet,
}

impl Network {
    pub fn url(&self) -> &'static str {
        match self {
            Network::MainnetBeta => "https://api.mainnet-beta.solana.com",
            Network::Testnet => "https://api.testnet.solana.com",
            Network::Devnet => "https://api.devnet.solana.com",
        }
    }
}

/// The chain-client collaborator: account lookup, freshness token, raw
/// submission, confirmation polling, balance lookup. Everything else about
/// the chain is opaque to this system.
#[async_trait]
pub trait ChainClient: Send + Sync {
    /// `None` means the account does not exist, a recognized normal branch.
    async fn get_account_info(
        &self,
        address: &Address,
    ) -> Result<Option<AccountSummary>, TransferError>;

    async fn get_latest_blockhash(&self) -> Result<String, TransferError>;

    /// Submits signed wire bytes (Base64) and returns the signature id.
    async fn send_transaction(&self, transaction_base64: &str) -> Result<String, TransferError>;

    async fn get_signature_status(
        &self,
        signature: &str,
    ) -> Result<Option<SignatureStatus>, TransferError>;

    /// The owner's Bijlee balance; zero when no token account exists yet.
    async fn get_token_balance(&self, owner: &Address) -> Result<TokenBalance, TransferError>;
}

/// JSON-RPC 2.0 client over a shared `reqwest` connection.
pub struct HttpChainClient {
    url: String,
    http: reqwest::Client,
    request_id: AtomicU64,
}

impl HttpChainClient {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            http: reqwest::Client::new(),
            request_id: AtomicU64::new(0),
        }
    }

    pub fn for_network(network: Network) -> Self {
        Self::new(network.url())
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    async fn call(&self, method: &str, params: Value) -> Result<Value, TransferError> {
        let id = self.request_id.fetch_add(1, Ordering::Relaxed) + 1;
        let body = json!({
            "jsonrpc": "2.0",
            "id": id,
            "method": method,
            "params": params,
        });
        debug!(method, id, "rpc request");

        let response = self
            .http
            .post(&self.url)
            .json(&body)
            .send()
            .await
            .map_err(|e| TransferError::Unknown(format!("rpc transport error: {e}")))?;
        let payload: Value = response
            .json()
            .await
            .map_err(|e| TransferError::Unknown(format!("rpc returned malformed json: {e}")))?;

        if let Some(error) = payload.get("error") {
            let message = error
                .get("message")
                .and_then(|m| m.as_str())
                .unwrap_or("unknown rpc error");
            return Err(TransferError::Unknown(format!("rpc error: {message}")));
        }
        Ok(payload.get("result").cloned().unwrap_or(Value::Null))
    }
}

#[async_trait]
impl ChainClient for HttpChainClient {
    async fn get_account_info(
        &self,
        address: &Address,
    ) -> Result<Option<AccountSummary>, TransferError> {
        let result = self
            .call(
                "getAccountInfo",
                json!([address.to_base58(), { "encoding": "base64", "commitment": "confirmed" }]),
            )
            .await?;
        let value = result.get("value").cloned().unwrap_or(Value::Null);
        if value.is_null() {
            return Ok(None);
        }
        let summary = serde_json::from_value::<AccountSummary>(value)
            .map_err(|e| TransferError::Unknown(format!("malformed account info: {e}")))?;
        Ok(Some(summary))
    }

    async fn get_latest_blockhash(&self) -> Result<String, TransferError> {
        let result = self
            .call("getLatestBlockhash", json!([{ "commitment": "finalized" }]))
            .await?;
        result
            .get("value")
            .and_then(|v| v.get("blockhash"))
            .and_then(|b| b.as_str())
            .map(str::to_string)
            .ok_or_else(|| TransferError::Unknown("blockhash missing from rpc response".to_string()))
    }

    async fn send_transaction(&self, transaction_base64: &str) -> Result<String, TransferError> {
        let result = self
            .call(
                "sendTransaction",
                json!([transaction_base64, { "encoding": "base64", "preflightCommitment": "confirmed" }]),
            )
            .await?;
        result
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| TransferError::Unknown("signature missing from rpc response".to_string()))
    }

    async fn get_signature_status(
        &self,
        signature: &str,
    ) -> Result<Option<SignatureStatus>, TransferError> {
        let result = self
            .call("getSignatureStatuses", json!([[signature]]))
            .await?;
        let value = result
            .get("value")
            .and_then(|v| v.get(0))
            .cloned()
            .unwrap_or(Value::Null);
        if value.is_null() {
            return Ok(None);
        }
        let confirmation_status = value
            .get("confirmationStatus")
            .and_then(|s| s.as_str())
            .map(str::to_string);
        let err = match value.get("err") {
            None => None,
            Some(Value::Null) => None,
            Some(detail) => Some(detail.to_string()),
        };
        Ok(Some(SignatureStatus {
            confirmation_status,
            err,
        }))
    }

    async fn get_token_balance(&self, owner: &Address) -> Result<TokenBalance, TransferError> {
        let result = self
            .call(
                "getTokenAccountsByOwner",
                json!([owner.to_base58(), { "mint": BIJLEE_MINT }, { "encoding": "jsonParsed" }]),
            )
            .await?;
        let accounts = result
            .get("value")
            .and_then(|v| v.as_array())
            .cloned()
            .unwrap_or_default();
        let Some(first) = accounts.first() else {
            // No token account yet: zero balance, not an error.
            return Ok(TokenBalance {
                amount: 0,
                decimals: BIJLEE_DECIMALS,
                ui_amount: 0.0,
            });
        };

        let token_amount = first
            .pointer("/account/data/parsed/info/tokenAmount")
            .ok_or_else(|| {
                TransferError::Unknown("token amount missing from rpc response".to_string())
            })?;
        let amount = token_amount
            .get("amount")
            .and_then(|a| a.as_str())
            .ok_or_else(|| {
                TransferError::Unknown("token amount missing from rpc response".to_string())
            })?
            .parse::<u64>()
            .map_err(|e| TransferError::Unknown(format!("malformed token amount: {e}")))?;
        let decimals = token_amount
            .get("decimals")
            .and_then(|d| d.as_u64())
            .unwrap_or(BIJLEE_DECIMALS as u64) as u8;

        Ok(TokenBalance {
            amount,
            decimals,
            ui_amount: from_base_units(amount, decimals),
        })
    }
}
