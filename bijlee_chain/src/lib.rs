//! Chain support for the Bijlee dashboard.
//!
//! Addresses, the transaction wire format, associated-account derivation,
//! the JSON-RPC chain client and the transfer orchestration live here. The
//! wire format is built by hand from `ed25519-dalek`, `sha2` and `bs58`
//! rather than a full chain SDK.

pub mod address;
pub mod ensure;
pub mod instruction;
pub mod rpc;
pub mod token;
pub mod transaction;
pub mod transfer;
pub mod wallet;

pub use address::Address;
pub use ensure::ensure_token_account;
pub use instruction::{AccountMeta, Instruction};
pub use rpc::{ChainClient, HttpChainClient, Network};
pub use token::{
    ASSOCIATED_TOKEN_PROGRAM_ID, BIJLEE_MINT, BIJLEE_PROGRAM_ID, TOKEN_PROGRAM_ID,
    create_associated_token_account_instruction, create_token_transfer_instruction,
    derive_associated_token_address, find_program_address,
};
pub use transaction::{
    CompiledInstruction, Message, MessageHeader, Transaction, decode_compact_u16,
    encode_compact_u16,
};
pub use transfer::execute_transfer;
pub use wallet::{LocalWallet, WalletSigner};
