use thiserror::Error;

/// Failure kinds for the token-transfer flow.
///
/// Every error coming out of a collaborator (chain client, wallet signer) is
/// normalized to one of these before it reaches a caller.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TransferError {
    #[error("invalid recipient address: {0}")]
    InvalidAddress(String),

    #[error("amount must be a positive number")]
    InvalidAmount,

    #[error("wallet is not connected")]
    WalletNotConnected,

    #[error("account lookup failed: {0}")]
    AccountLookupFailed(String),

    #[error("wallet rejected the signing request: {0}")]
    SigningRejected(String),

    #[error("transaction failed: {0}")]
    TransactionFailed(String),

    #[error("unexpected error: {0}")]
    Unknown(String),
}

impl TransferError {
    /// Stable error code for API responses and logs.
    pub fn code(&self) -> &'static str {
        match self {
            TransferError::InvalidAddress(_) => "INVALID_ADDRESS",
            TransferError::InvalidAmount => "INVALID_AMOUNT",
            TransferError::WalletNotConnected => "WALLET_NOT_CONNECTED",
            TransferError::AccountLookupFailed(_) => "ACCOUNT_LOOKUP_FAILED",
            TransferError::SigningRejected(_) => "SIGNING_REJECTED",
            TransferError::TransactionFailed(_) => "TRANSACTION_FAILED",
            TransferError::Unknown(_) => "UNKNOWN_ERROR",
        }
    }
}

pub type TransferResult<T> = Result<T, TransferError>;
