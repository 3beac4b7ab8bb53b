use cosmwasm_std::StdError;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("Unauthorized: {0}")]
    Unauthorized(#[from] UnauthorizedReason),

    #[error("Invalid trust key length: expected {expected} bytes, got {actual}")]
    InvalidTrustKeyLength { expected: usize, actual: usize },
}

#[derive(Error, Debug, PartialEq)]
pub enum UnauthorizedReason {
    #[error("Unauthorized: Not the admin")]
    NotAdmin,
}
