use std::time::Duration;

use base64::{Engine as _, engine::general_purpose::STANDARD};
use tracing::{error, info};

use bijlee_core::error::TransferError;
use bijlee_core::helpers::amount::validate_amount;

use crate::address::Address;
use crate::ensure::ensure_token_account;
use crate::rpc::ChainClient;
use crate::token::create_token_transfer_instruction;
use crate::transaction::{Message, Transaction, decode_blockhash};
use crate::wallet::WalletSigner;

/// Poll cadence for confirmation at the `confirmed` commitment level.
const CONFIRM_POLL_INTERVAL: Duration = Duration::from_millis(500);
const CONFIRM_POLL_ATTEMPTS: u32 = 30;

/// Runs one transfer attempt end to end: validate, ensure the recipient's
/// token account, build, sign, submit, await confirmation. Returns the
/// submitted signature. Nothing is retried automatically; a fresh call
/// builds a fresh transaction with a fresh freshness token.
pub async fn execute_transfer(
    node: &dyn ChainClient,
    wallet: &dyn WalletSigner,
    recipient: &str,
    amount: f64,
) -> Result<String, TransferError> {
    if !wallet.is_connected() {
        return Err(TransferError::WalletNotConnected);
    }
    let sender = wallet.address();

    // Fail fast: both validations run before any network call.
    let recipient_key = Address::from_base58(recipient)?;
    validate_amount(amount)?;

    info!(%sender, recipient = %recipient_key, amount, "building transfer");

    let (_recipient_token_account, create_instruction) =
        ensure_token_account(node, &recipient_key, &sender).await?;
    let transfer_instruction = create_token_transfer_instruction(&sender, recipient, amount)?;

    // The creation instruction, when present, must precede the transfer:
    // the transfer depends on the sub-account existing.
    let mut instructions = Vec::with_capacity(2);
    if let Some(create) = create_instruction {
        instructions.push(create);
    }
    instructions.push(transfer_instruction);

    let blockhash = node.get_latest_blockhash().await?;
    let message = Message::compile(&sender, &instructions, decode_blockhash(&blockhash)?)?;
    let mut transaction = Transaction::new_unsigned(message);

    let signature_bytes = wallet
        .sign_transaction(&transaction)
        .await
        .map_err(|e| match e {
            TransferError::SigningRejected(_) => e,
            other => TransferError::SigningRejected(other.to_string()),
        })?;
    transaction.signatures.push(signature_bytes);

    let wire = STANDARD.encode(transaction.serialize());
    let signature = node
        .send_transaction(&wire)
        .await
        .map_err(reclassify_chain_error)?;
    info!(%signature, "transaction submitted, awaiting confirmation");

    confirm_transaction(node, &signature).await?;
    info!(%signature, "transfer confirmed");
    Ok(signature)
}

fn reclassify_chain_error(err: TransferError) -> TransferError {
    match err {
        TransferError::Unknown(message) => TransferError::TransactionFailed(message),
        other => other,
    }
}

async fn confirm_transaction(
    node: &dyn ChainClient,
    signature: &str,
) -> Result<(), TransferError> {
    for _ in 0..CONFIRM_POLL_ATTEMPTS {
        let status = node
            .get_signature_status(signature)
            .await
            .map_err(reclassify_chain_error)?;
        if let Some(status) = status {
            if let Some(detail) = status.err {
                error!(%signature, %detail, "transaction failed on chain");
                return Err(TransferError::TransactionFailed(detail));
            }
            if status.is_confirmed() {
                return Ok(());
            }
        }
        tokio::time::sleep(CONFIRM_POLL_INTERVAL).await;
    }
    Err(TransferError::TransactionFailed(
        "confirmation timed out".to_string(),
    ))
}
