use std::fmt;
use std::str::FromStr;

use bijlee_core::error::TransferError;

/// A 32-byte on-chain account address with a Base58 textual form.
///
/// Malformed text is rejected at parse time, before any instruction is
/// built from it.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Address([u8; Self::LEN]);

impl Address {
    pub const LEN: usize = 32;

    pub const fn new(bytes: [u8; Self::LEN]) -> Self {
        Self(bytes)
    }

    pub fn from_base58(text: &str) -> Result<Self, TransferError> {
        let bytes = bs58::decode(text)
            .into_vec()
            .map_err(|e| TransferError::InvalidAddress(format!("{text}: {e}")))?;
        let bytes: [u8; Self::LEN] = bytes.try_into().map_err(|_| {
            TransferError::InvalidAddress(format!("{text} does not decode to {} bytes", Self::LEN))
        })?;
        Ok(Self(bytes))
    }

    pub fn to_base58(&self) -> String {
        bs58::encode(self.0).into_string()
    }

    pub fn as_bytes(&self) -> &[u8; Self::LEN] {
        &self.0
    }

    pub fn to_bytes(&self) -> [u8; Self::LEN] {
        self.0
    }
}

impl FromStr for Address {
    type Err = TransferError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        Self::from_base58(text)
    }
}

impl AsRef<[u8]> for Address {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_base58())
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({})", self.to_base58())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::BIJLEE_MINT;

    #[test]
    fn parses_and_round_trips_base58() {
        let address = Address::from_base58(BIJLEE_MINT).unwrap();
        assert_eq!(address.to_base58(), BIJLEE_MINT);
    }

    #[test]
    fn system_program_is_all_zero_bytes() {
        let address = Address::from_base58("11111111111111111111111111111111").unwrap();
        assert_eq!(address.to_bytes(), [0u8; 32]);
    }

    #[test]
    fn rejects_malformed_text() {
        assert!(matches!(
            Address::from_base58("not-an-address"),
            Err(TransferError::InvalidAddress(_))
        ));
        assert!(matches!(
            Address::from_base58("abc"),
            Err(TransferError::InvalidAddress(_))
        ));
        assert!(matches!(
            Address::from_base58(""),
            Err(TransferError::InvalidAddress(_))
        ));
    }
}
