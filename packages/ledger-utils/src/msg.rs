use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, CosmosMsg, CustomMsg, CustomQuery, Uint128};

/// Transaction types of the asset ledger, carried as the custom variant of
/// `CosmosMsg`. The ledger settles each message atomically with the state
/// changes of the transaction that emitted it.
#[cw_serde]
pub enum LedgerMsg {
    /// Moves `amount` units of `asset_id` from the emitting account to
    /// `receiver`. When `close_to` is set, the emitter's entire remaining
    /// holding of the asset is additionally moved to that address and the
    /// holding is closed.
    AssetTransfer {
        asset_id: u64,
        amount: Uint128,
        receiver: String,
        close_to: Option<String>,
    },
}

impl LedgerMsg {
    /// Plain transfer of `amount` units to `receiver`.
    pub fn transfer(asset_id: u64, amount: Uint128, receiver: &Addr) -> Self {
        LedgerMsg::AssetTransfer {
            asset_id,
            amount,
            receiver: receiver.to_string(),
            close_to: None,
        }
    }

    /// Zero-amount self-transfer, which the ledger treats as the emitting
    /// account opting in to hold `asset_id`.
    pub fn opt_in(asset_id: u64, account: &Addr) -> Self {
        LedgerMsg::AssetTransfer {
            asset_id,
            amount: Uint128::zero(),
            receiver: account.to_string(),
            close_to: None,
        }
    }

    /// Evacuates the emitter's full remaining holding of `asset_id` to
    /// `receiver` and closes the holding.
    pub fn close_out(asset_id: u64, receiver: &Addr) -> Self {
        LedgerMsg::AssetTransfer {
            asset_id,
            amount: Uint128::zero(),
            receiver: receiver.to_string(),
            close_to: Some(receiver.to_string()),
        }
    }
}

impl From<LedgerMsg> for CosmosMsg<LedgerMsg> {
    fn from(msg: LedgerMsg) -> Self {
        CosmosMsg::Custom(msg)
    }
}

impl CustomMsg for LedgerMsg {}

/// Read-side of the ledger's asset module.
#[cw_serde]
pub enum LedgerQuery {
    AssetBalance { address: String, asset_id: u64 },
}

impl CustomQuery for LedgerQuery {}

#[cw_serde]
pub struct AssetBalanceResponse {
    pub balance: Uint128,
    pub opted_in: bool,
}
