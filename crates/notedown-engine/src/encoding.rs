//! NIP-19 re-encoding of hex identifiers into their human readable bech32 form.

use bech32::{Bech32, Hrp};

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum EncodeError {
    #[error("empty identifier")]
    Empty,
    #[error("invalid hex identifier: {0}")]
    InvalidHex(#[from] hex::FromHexError),
    #[error("bech32 encoding failed: {0}")]
    Bech32(String),
}

/// Encodes `hex` under the human readable prefix `hrp` (`note`, `npub`, ...).
pub fn try_hex_to_bech32(hrp: &str, hex: &str) -> Result<String, EncodeError> {
    if hex.is_empty() {
        return Err(EncodeError::Empty);
    }
    let bytes = hex::decode(hex)?;
    let hrp = Hrp::parse(hrp).map_err(|e| EncodeError::Bech32(e.to_string()))?;
    bech32::encode::<Bech32>(hrp, &bytes).map_err(|e| EncodeError::Bech32(e.to_string()))
}

/// Like [`try_hex_to_bech32`] but yields an empty string on bad input.
pub fn hex_to_bech32(hrp: &str, hex: &str) -> String {
    match try_hex_to_bech32(hrp, hex) {
        Ok(encoded) => encoded,
        Err(EncodeError::Empty) => String::new(),
        Err(e) => {
            log::warn!("cannot encode {hex:?} as {hrp}: {e}");
            String::new()
        }
    }
}
