use ed25519_dalek::VerifyingKey;
use sha2::{Digest, Sha256};

use bijlee_core::error::TransferError;
use bijlee_core::helpers::amount::{BIJLEE_DECIMALS, to_base_units};

use crate::address::Address;
use crate::instruction::{AccountMeta, Instruction};

/// The deployed Bijlee mint.
pub const BIJLEE_MINT: &str = "HQbqWP4LSUYLySNXP8gRbXuKRy6bioH15CsrePQnfT86";
/// The deployed Bijlee token program.
pub const BIJLEE_PROGRAM_ID: &str = "Furu4efFjUJBs94Hc1MfJAg5nHZcP9y7F5qwtusTyG7i";
pub const TOKEN_PROGRAM_ID: &str = "TokenkegQfeZyiNwAJbNbGKPFXCWuBvf9Ss623VQ5DA";
pub const ASSOCIATED_TOKEN_PROGRAM_ID: &str = "ATokenGPvbdGVxr1b2hvZbsiqW5xWH25efTNsLJA8knL";
pub const SYSTEM_PROGRAM_ID: &str = "11111111111111111111111111111111";

/// 0 - Transfer: move base units between the sender's and recipient's
/// associated accounts.
pub const TRANSFER_SELECTOR: u8 = 0;
/// 0 - Create: initialize the owner's associated token account.
pub const CREATE_ACCOUNT_SELECTOR: u8 = 0;

const PDA_MARKER: &[u8] = b"ProgramDerivedAddress";

pub fn bijlee_mint() -> Address {
    Address::from_base58(BIJLEE_MINT).expect("mint constant is a valid address")
}

pub fn bijlee_program() -> Address {
    Address::from_base58(BIJLEE_PROGRAM_ID).expect("program constant is a valid address")
}

pub fn token_program() -> Address {
    Address::from_base58(TOKEN_PROGRAM_ID).expect("token program constant is a valid address")
}

pub fn associated_token_program() -> Address {
    Address::from_base58(ASSOCIATED_TOKEN_PROGRAM_ID)
        .expect("associated token program constant is a valid address")
}

pub fn system_program() -> Address {
    Address::from_base58(SYSTEM_PROGRAM_ID).expect("system program constant is a valid address")
}

/// A derived address must not be a valid curve point, so that no keypair can
/// ever sign for it.
fn is_on_curve(bytes: &[u8; 32]) -> bool {
    VerifyingKey::from_bytes(bytes).is_ok()
}

/// Walks the bump seed downward from 255 until the digest of
/// `seeds ‖ bump ‖ program_id ‖ marker` falls off the curve. Deterministic,
/// no I/O.
pub fn find_program_address(
    seeds: &[&[u8]],
    program_id: &Address,
) -> Result<(Address, u8), TransferError> {
    for bump in (0..=255u8).rev() {
        let mut hasher = Sha256::new();
        for seed in seeds {
            hasher.update(seed);
        }
        hasher.update([bump]);
        hasher.update(program_id.as_bytes());
        hasher.update(PDA_MARKER);
        let digest: [u8; 32] = hasher.finalize().into();
        if !is_on_curve(&digest) {
            return Ok((Address::new(digest), bump));
        }
    }
    Err(TransferError::Unknown(
        "no viable bump seed for derived address".to_string(),
    ))
}

/// The deterministic sub-account holding `owner`'s Bijlee balance.
pub fn derive_associated_token_address(
    owner: &Address,
    mint: &Address,
) -> Result<Address, TransferError> {
    let token_program = token_program();
    let (address, _bump) = find_program_address(
        &[owner.as_bytes(), token_program.as_bytes(), mint.as_bytes()],
        &associated_token_program(),
    )?;
    Ok(address)
}

/// Builds the Bijlee-program transfer instruction: selector byte plus the
/// amount scaled to base units as a little-endian u64, over the fixed
/// six-account list.
pub fn create_token_transfer_instruction(
    sender: &Address,
    recipient: &str,
    amount: f64,
) -> Result<Instruction, TransferError> {
    // Re-validated here even though the orchestrator validates first.
    let recipient = Address::from_base58(recipient)?;
    let base_units = to_base_units(amount, BIJLEE_DECIMALS)?;

    let mint = bijlee_mint();
    let sender_token_account = derive_associated_token_address(sender, &mint)?;
    let recipient_token_account = derive_associated_token_address(&recipient, &mint)?;

    let mut data = Vec::with_capacity(9);
    data.push(TRANSFER_SELECTOR);
    data.extend_from_slice(&base_units.to_le_bytes());

    Ok(Instruction::new(
        bijlee_program(),
        vec![
            AccountMeta::new(*sender, true),
            AccountMeta::new(recipient, false),
            AccountMeta::new_readonly(mint, false),
            AccountMeta::new_readonly(token_program(), false),
            AccountMeta::new(sender_token_account, false),
            AccountMeta::new(recipient_token_account, false),
        ],
        data,
    ))
}

/// Builds the creation instruction for a missing associated account: the
/// payer funds rent, the owner becomes the holder of the new sub-account.
pub fn create_associated_token_account_instruction(
    payer: &Address,
    token_account: &Address,
    owner: &Address,
) -> Instruction {
    Instruction::new(
        associated_token_program(),
        vec![
            AccountMeta::new(*payer, true),
            AccountMeta::new(*token_account, false),
            AccountMeta::new_readonly(*owner, false),
            AccountMeta::new_readonly(bijlee_mint(), false),
            AccountMeta::new_readonly(system_program(), false),
            AccountMeta::new_readonly(token_program(), false),
        ],
        vec![CREATE_ACCOUNT_SELECTOR],
    )
}
