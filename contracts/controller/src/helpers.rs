use cosmwasm_std::{Binary, DepsMut, MessageInfo};
use custody_ledger_utils::{
    error::{ContractError, UnauthorizedReason},
    msg::LedgerQuery,
    TRUST_KEY_LEN,
};

use crate::state::ADMIN;

pub fn check_admin(deps: &DepsMut<LedgerQuery>, info: &MessageInfo) -> Result<(), ContractError> {
    let admin = ADMIN.load(deps.storage)?;
    if info.sender != admin {
        return Err(UnauthorizedReason::NotAdmin.into());
    }
    Ok(())
}

pub fn validate_trust_key(key: &Binary) -> Result<(), ContractError> {
    if key.len() != TRUST_KEY_LEN {
        return Err(ContractError::InvalidTrustKeyLength {
            expected: TRUST_KEY_LEN,
            actual: key.len(),
        });
    }
    Ok(())
}
