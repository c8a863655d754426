use std::fmt;

use async_trait::async_trait;
use ed25519_dalek::{Signer, SigningKey};
use rand::rngs::OsRng;

use bijlee_core::error::TransferError;

use crate::address::Address;
use crate::transaction::Transaction;

/// The external signing collaborator. Holds the user's key material; the
/// transfer flow never sees a private key, only this seam.
#[async_trait]
pub trait WalletSigner: Send + Sync {
    fn address(&self) -> Address;

    fn is_connected(&self) -> bool {
        true
    }

    /// Signs the assembled transaction's message bytes. A refusal or any
    /// signer-side failure surfaces as `SigningRejected`.
    async fn sign_transaction(&self, transaction: &Transaction) -> Result<[u8; 64], TransferError>;
}

/// In-process wallet over an Ed25519 keypair, keyed from the environment.
pub struct LocalWallet {
    signing_key: SigningKey,
}

impl LocalWallet {
    pub fn generate() -> Self {
        Self {
            signing_key: SigningKey::generate(&mut OsRng),
        }
    }

    pub fn from_seed(seed: [u8; 32]) -> Self {
        Self {
            signing_key: SigningKey::from_bytes(&seed),
        }
    }

    /// Restores a wallet from a Base58-encoded 32-byte seed.
    pub fn from_base58_seed(text: &str) -> Result<Self, TransferError> {
        let bytes = bs58::decode(text)
            .into_vec()
            .map_err(|e| TransferError::Unknown(format!("wallet seed is not valid base58: {e}")))?;
        let seed: [u8; 32] = bytes
            .try_into()
            .map_err(|_| TransferError::Unknown("wallet seed must be 32 bytes".to_string()))?;
        Ok(Self::from_seed(seed))
    }

    pub fn address(&self) -> Address {
        Address::new(self.signing_key.verifying_key().to_bytes())
    }
}

// Secret material stays out of Debug output and logs.
impl fmt::Debug for LocalWallet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LocalWallet")
            .field("address", &self.address())
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl WalletSigner for LocalWallet {
    fn address(&self) -> Address {
        LocalWallet::address(self)
    }

    async fn sign_transaction(&self, transaction: &Transaction) -> Result<[u8; 64], TransferError> {
        let message = transaction.message_data();
        Ok(self.signing_key.sign(&message).to_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instruction::{AccountMeta, Instruction};
    use crate::transaction::Message;
    use ed25519_dalek::{Signature, Verifier, VerifyingKey};

    fn wallet() -> LocalWallet {
        LocalWallet::from_seed([7u8; 32])
    }

    #[test]
    fn seed_restores_the_same_address() {
        let encoded = bs58::encode([7u8; 32]).into_string();
        let restored = LocalWallet::from_base58_seed(&encoded).unwrap();
        assert_eq!(restored.address(), wallet().address());
    }

    #[test]
    fn rejects_seeds_of_the_wrong_length() {
        let short = bs58::encode([7u8; 16]).into_string();
        assert!(LocalWallet::from_base58_seed(&short).is_err());
        assert!(LocalWallet::from_base58_seed("!!not-base58!!").is_err());
    }

    #[test]
    fn debug_output_hides_key_material() {
        let rendered = format!("{:?}", wallet());
        assert!(rendered.contains("address"));
        assert!(!rendered.contains("signing_key"));
    }

    #[tokio::test]
    async fn signature_verifies_against_the_wallet_address() {
        let wallet = wallet();
        let payer = wallet.address();
        let instruction = Instruction::new(
            Address::new([9u8; 32]),
            vec![AccountMeta::new(payer, true)],
            vec![1, 2, 3],
        );
        let message = Message::compile(&payer, &[instruction], [0u8; 32]).unwrap();
        let transaction = Transaction::new_unsigned(message);

        let signature = wallet.sign_transaction(&transaction).await.unwrap();
        let verifying_key = VerifyingKey::from_bytes(payer.as_bytes()).unwrap();
        assert!(
            verifying_key
                .verify(
                    &transaction.message_data(),
                    &Signature::from_bytes(&signature)
                )
                .is_ok()
        );
    }
}
