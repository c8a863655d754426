use bijlee_core::error::TransferError;

use crate::address::Address;
use crate::instruction::{AccountMeta, Instruction};

/// Appends `value` in the chain's compact-u16 ("shortvec") encoding: seven
/// bits per byte, high bit set while more bytes follow.
pub fn encode_compact_u16(mut value: u16, out: &mut Vec<u8>) {
    loop {
        let mut byte = (value & 0x7f) as u8;
        value >>= 7;
        if value != 0 {
            byte |= 0x80;
            out.push(byte);
        } else {
            out.push(byte);
            break;
        }
    }
}

/// Decodes a compact-u16, returning the value and the bytes consumed.
pub fn decode_compact_u16(bytes: &[u8]) -> Option<(u16, usize)> {
    let mut value: u32 = 0;
    for (i, byte) in bytes.iter().take(3).enumerate() {
        value |= ((byte & 0x7f) as u32) << (7 * i);
        if byte & 0x80 == 0 {
            if value > u16::MAX as u32 {
                return None;
            }
            return Some((value as u16, i + 1));
        }
    }
    None
}

/// Decodes the Base58 freshness token returned by the chain client.
pub fn decode_blockhash(text: &str) -> Result<[u8; 32], TransferError> {
    let bytes = bs58::decode(text)
        .into_vec()
        .map_err(|e| TransferError::Unknown(format!("malformed blockhash {text}: {e}")))?;
    bytes
        .try_into()
        .map_err(|_| TransferError::Unknown(format!("blockhash {text} is not 32 bytes")))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MessageHeader {
    pub num_required_signatures: u8,
    pub num_readonly_signed_accounts: u8,
    pub num_readonly_unsigned_accounts: u8,
}

/// An instruction with its accounts rewritten as indices into the message's
/// account table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledInstruction {
    pub program_id_index: u8,
    pub accounts: Vec<u8>,
    pub data: Vec<u8>,
}

/// The signable body of a transaction: header, de-duplicated account table,
/// freshness token, compiled instructions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub header: MessageHeader,
    pub account_keys: Vec<Address>,
    pub recent_blockhash: [u8; 32],
    pub instructions: Vec<CompiledInstruction>,
}

impl Message {
    /// Compiles instructions into a message. The account table is ordered
    /// fee payer first, then writable signers, readonly signers, writable
    /// non-signers, readonly non-signers; duplicate references are merged
    /// with their signer/writable flags OR-ed together.
    pub fn compile(
        fee_payer: &Address,
        instructions: &[Instruction],
        recent_blockhash: [u8; 32],
    ) -> Result<Self, TransferError> {
        let mut metas: Vec<AccountMeta> = vec![AccountMeta::new(*fee_payer, true)];
        for instruction in instructions {
            for meta in &instruction.accounts {
                upsert(&mut metas, meta.clone());
            }
            upsert(&mut metas, AccountMeta::new_readonly(instruction.program_id, false));
        }

        let mut account_keys = Vec::with_capacity(metas.len());
        let mut num_required_signatures = 0u8;
        let mut num_readonly_signed_accounts = 0u8;
        let mut num_readonly_unsigned_accounts = 0u8;
        for (signer, writable) in [(true, true), (true, false), (false, true), (false, false)] {
            for meta in metas
                .iter()
                .filter(|m| m.is_signer == signer && m.is_writable == writable)
            {
                if signer {
                    num_required_signatures += 1;
                    if !writable {
                        num_readonly_signed_accounts += 1;
                    }
                } else if !writable {
                    num_readonly_unsigned_accounts += 1;
                }
                account_keys.push(meta.pubkey);
            }
        }

        let mut compiled = Vec::with_capacity(instructions.len());
        for instruction in instructions {
            let mut accounts = Vec::with_capacity(instruction.accounts.len());
            for meta in &instruction.accounts {
                accounts.push(index_of(&account_keys, &meta.pubkey)?);
            }
            compiled.push(CompiledInstruction {
                program_id_index: index_of(&account_keys, &instruction.program_id)?,
                accounts,
                data: instruction.data.clone(),
            });
        }

        Ok(Message {
            header: MessageHeader {
                num_required_signatures,
                num_readonly_signed_accounts,
                num_readonly_unsigned_accounts,
            },
            account_keys,
            recent_blockhash,
            instructions: compiled,
        })
    }

    pub fn serialize(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(128);
        out.push(self.header.num_required_signatures);
        out.push(self.header.num_readonly_signed_accounts);
        out.push(self.header.num_readonly_unsigned_accounts);
        encode_compact_u16(self.account_keys.len() as u16, &mut out);
        for key in &self.account_keys {
            out.extend_from_slice(key.as_bytes());
        }
        out.extend_from_slice(&self.recent_blockhash);
        encode_compact_u16(self.instructions.len() as u16, &mut out);
        for instruction in &self.instructions {
            out.push(instruction.program_id_index);
            encode_compact_u16(instruction.accounts.len() as u16, &mut out);
            out.extend_from_slice(&instruction.accounts);
            encode_compact_u16(instruction.data.len() as u16, &mut out);
            out.extend_from_slice(&instruction.data);
        }
        out
    }
}

fn upsert(metas: &mut Vec<AccountMeta>, meta: AccountMeta) {
    match metas.iter_mut().find(|m| m.pubkey == meta.pubkey) {
        Some(existing) => {
            existing.is_signer |= meta.is_signer;
            existing.is_writable |= meta.is_writable;
        }
        None => metas.push(meta),
    }
}

fn index_of(account_keys: &[Address], key: &Address) -> Result<u8, TransferError> {
    account_keys
        .iter()
        .position(|k| k == key)
        .map(|i| i as u8)
        .ok_or_else(|| TransferError::Unknown("account key missing from message table".to_string()))
}

/// A message plus its signatures. Built fresh per transfer attempt; the
/// freshness token inside must never be reused across attempts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    pub message: Message,
    pub signatures: Vec<[u8; 64]>,
}

impl Transaction {
    pub fn new_unsigned(message: Message) -> Self {
        Self {
            message,
            signatures: Vec::new(),
        }
    }

    /// The bytes a wallet signs.
    pub fn message_data(&self) -> Vec<u8> {
        self.message.serialize()
    }

    /// Signed wire form: compact signature count, signatures, message.
    pub fn serialize(&self) -> Vec<u8> {
        let message = self.message.serialize();
        let mut out = Vec::with_capacity(1 + self.signatures.len() * 64 + message.len());
        encode_compact_u16(self.signatures.len() as u16, &mut out);
        for signature in &self.signatures {
            out.extend_from_slice(signature);
        }
        out.extend_from_slice(&message);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addr(byte: u8) -> Address {
        Address::new([byte; 32])
    }

    #[test]
    fn compact_u16_known_vectors() {
        for (value, expected) in [
            (0u16, vec![0x00]),
            (1, vec![0x01]),
            (127, vec![0x7f]),
            (128, vec![0x80, 0x01]),
            (16384, vec![0x80, 0x80, 0x01]),
        ] {
            let mut out = Vec::new();
            encode_compact_u16(value, &mut out);
            assert_eq!(out, expected, "encoding {value}");
            assert_eq!(decode_compact_u16(&out), Some((value, expected.len())));
        }
    }

    #[test]
    fn compile_orders_and_deduplicates_accounts() {
        let payer = addr(1);
        let program = addr(9);
        let instruction = Instruction::new(
            program,
            vec![
                AccountMeta::new(payer, true),
                AccountMeta::new(addr(2), false),
                AccountMeta::new_readonly(addr(3), false),
                AccountMeta::new(addr(2), false),
            ],
            vec![7],
        );
        let message = Message::compile(&payer, &[instruction], [0u8; 32]).unwrap();

        assert_eq!(message.account_keys, vec![payer, addr(2), addr(3), program]);
        assert_eq!(message.header.num_required_signatures, 1);
        assert_eq!(message.header.num_readonly_signed_accounts, 0);
        assert_eq!(message.header.num_readonly_unsigned_accounts, 2);
        assert_eq!(message.instructions.len(), 1);
        assert_eq!(message.instructions[0].program_id_index, 3);
        assert_eq!(message.instructions[0].accounts, vec![0, 1, 2, 1]);
    }

    #[test]
    fn compile_preserves_instruction_order() {
        let payer = addr(1);
        let first = Instruction::new(addr(8), vec![AccountMeta::new(payer, true)], vec![0]);
        let second = Instruction::new(addr(9), vec![AccountMeta::new(payer, true)], vec![1]);
        let message = Message::compile(&payer, &[first, second], [0u8; 32]).unwrap();

        assert_eq!(message.instructions.len(), 2);
        assert_eq!(
            message.account_keys[message.instructions[0].program_id_index as usize],
            addr(8)
        );
        assert_eq!(
            message.account_keys[message.instructions[1].program_id_index as usize],
            addr(9)
        );
    }

    #[test]
    fn serialized_message_layout_is_stable() {
        let payer = addr(1);
        let instruction = Instruction::new(
            addr(9),
            vec![AccountMeta::new(payer, true), AccountMeta::new(addr(2), false)],
            vec![0xaa, 0xbb],
        );
        let message = Message::compile(&payer, &[instruction], [5u8; 32]).unwrap();
        let bytes = message.serialize();

        // header + key count + 3 keys + blockhash + ix count + one instruction
        assert_eq!(bytes.len(), 3 + 1 + 3 * 32 + 32 + 1 + (1 + 1 + 2 + 1 + 2));
        assert_eq!(bytes[0], 1); // one required signature
        assert_eq!(bytes[3], 3); // three account keys
    }

    #[test]
    fn signed_transaction_prepends_signatures() {
        let payer = addr(1);
        let instruction = Instruction::new(addr(9), vec![AccountMeta::new(payer, true)], vec![]);
        let message = Message::compile(&payer, &[instruction], [0u8; 32]).unwrap();
        let mut transaction = Transaction::new_unsigned(message);
        transaction.signatures.push([0x42; 64]);

        let wire = transaction.serialize();
        assert_eq!(wire[0], 1);
        assert_eq!(&wire[1..65], &[0x42; 64]);
        assert_eq!(&wire[65..], &transaction.message_data()[..]);
    }
}
