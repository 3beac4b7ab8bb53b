use cosmwasm_std::{Addr, Binary};
use cw_storage_plus::Item;

// Set to the instantiator once and never reassigned; every execute handler
// gates on it.
pub const ADMIN: Item<Addr> = Item::new("admin");

// 32-byte attestation key. Stored and settable only; no handler consults it.
pub const TRUST_KEY: Item<Binary> = Item::new("trust_key");

// Id of the ledger asset this controller custodies.
pub const ASSET_ID: Item<u64> = Item::new("asset_id");

// Kill-switch flag, reserved: initialized to false, not read by any handler.
pub const PAUSED: Item<bool> = Item::new("paused");
