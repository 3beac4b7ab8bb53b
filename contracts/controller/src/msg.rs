use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Addr, Binary, Uint128};

#[cw_serde]
pub struct InstantiateMsg {
    pub trust_key: Binary, // 32-byte attestation key, stored as-is
    pub asset_id: u64,     // Id of the asset to custody
}

#[cw_serde]
pub enum ExecuteMsg {
    // Replace the stored trust key (only admin)
    SetTrustKey { new_key: Binary },
    // Point the controller at a different asset id (only admin)
    SetAsset { asset_id: u64 },
    // Opt the controller's own account in to hold the configured asset (only admin)
    OptInAsset {},
    // Transfer `amount` units of the configured asset to `recipient` (only admin)
    ReleaseAsset { recipient: String, amount: Uint128 },
    // Close out the full remaining holding to `receiver` (only admin)
    Sweep { receiver: String },
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    // Get the admin address
    #[returns(Addr)]
    Admin {},
    // Get the full controller configuration
    #[returns(ConfigResponse)]
    Config {},
}

#[cw_serde]
pub struct ConfigResponse {
    pub admin: Addr,
    pub trust_key: Binary,
    pub asset_id: u64,
    pub paused: bool,
}
