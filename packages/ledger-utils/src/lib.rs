pub mod error;
pub mod msg;

#[cfg(feature = "testing")]
pub mod testing;

/// Trust keys are fixed-length attestation keys.
pub const TRUST_KEY_LEN: usize = 32;
