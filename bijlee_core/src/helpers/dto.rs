use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;

#[derive(Deserialize, Serialize, Debug, ToSchema)]
pub struct TransferRequest {
    pub recipient: String,
    pub amount: f64,
}

#[derive(Deserialize, Serialize, Debug, ToSchema)]
pub struct TransferResponse {
    pub signature: String,
}

/// User-visible status of a transfer attempt, owned by the UI layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum TransferStatus {
    Idle,
    Processing,
    Success,
    Error,
}

impl TransferStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransferStatus::Idle => "idle",
            TransferStatus::Processing => "processing",
            TransferStatus::Success => "success",
            TransferStatus::Error => "error",
        }
    }
}

impl fmt::Display for TransferStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A token balance in base units plus its display form.
#[derive(Deserialize, Serialize, Debug, Clone, ToSchema)]
pub struct TokenBalance {
    pub amount: u64,
    pub decimals: u8,
    pub ui_amount: f64,
}

#[derive(Deserialize, Serialize, Debug, Clone, ToSchema)]
pub struct TokenMetadata {
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
    pub mint: String,
    pub total_supply: u64,
}

#[derive(Deserialize, Serialize, Debug, ToSchema)]
pub struct TokenInfoResponse {
    pub metadata: TokenMetadata,
    pub balance: TokenBalance,
}

/// Subset of on-chain account state the transfer flow interprets.
#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct AccountSummary {
    pub lamports: u64,
    pub owner: String,
    #[serde(default)]
    pub executable: bool,
}

/// Confirmation-poll result for a submitted signature.
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct SignatureStatus {
    pub confirmation_status: Option<String>,
    pub err: Option<String>,
}

impl SignatureStatus {
    /// True once the chain reports at least `confirmed` commitment.
    pub fn is_confirmed(&self) -> bool {
        matches!(
            self.confirmation_status.as_deref(),
            Some("confirmed") | Some("finalized")
        )
    }
}
