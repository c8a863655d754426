use tracing::debug;

use bijlee_core::error::TransferError;

use crate::address::Address;
use crate::instruction::Instruction;
use crate::rpc::ChainClient;
use crate::token::{
    bijlee_mint, create_associated_token_account_instruction, derive_associated_token_address,
};

/// Resolves the owner's associated token account and checks chain state for
/// it. Absent accounts yield the creation instruction (payer funds rent);
/// lookup failures surface as `AccountLookupFailed` and are not retried here.
pub async fn ensure_token_account(
    node: &dyn ChainClient,
    owner: &Address,
    payer: &Address,
) -> Result<(Address, Option<Instruction>), TransferError> {
    let token_account = derive_associated_token_address(owner, &bijlee_mint())?;

    let existing = node
        .get_account_info(&token_account)
        .await
        .map_err(|e| match e {
            TransferError::Unknown(message) => TransferError::AccountLookupFailed(message),
            other => other,
        })?;

    match existing {
        Some(_) => {
            debug!(%token_account, "token account exists");
            Ok((token_account, None))
        }
        None => {
            debug!(%token_account, "token account missing, will create");
            let create = create_associated_token_account_instruction(payer, &token_account, owner);
            Ok((token_account, Some(create)))
        }
    }
}
