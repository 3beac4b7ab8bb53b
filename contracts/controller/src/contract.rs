#[cfg(not(feature = "library"))]
use cosmwasm_std::entry_point;
use cosmwasm_std::{to_json_binary, Binary, Deps, DepsMut, Env, MessageInfo, Response, StdResult};
use cw2::set_contract_version;
use custody_ledger_utils::error::ContractError;
use custody_ledger_utils::msg::{LedgerMsg, LedgerQuery};

use crate::helpers::validate_trust_key;
use crate::msg::{ConfigResponse, ExecuteMsg, InstantiateMsg, QueryMsg};
use crate::state::{ADMIN, ASSET_ID, PAUSED, TRUST_KEY};

// version info for migration info
const CONTRACT_NAME: &str = env!("CARGO_PKG_NAME");
const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    deps: DepsMut<LedgerQuery>,
    _env: Env,
    info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response<LedgerMsg>, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    validate_trust_key(&msg.trust_key)?;

    // The instantiator is the sole authority for the lifetime of the
    // contract; there is no transfer operation.
    ADMIN.save(deps.storage, &info.sender)?;
    TRUST_KEY.save(deps.storage, &msg.trust_key)?;
    ASSET_ID.save(deps.storage, &msg.asset_id)?;
    PAUSED.save(deps.storage, &false)?;

    Ok(Response::new()
        .add_attribute("method", "instantiate")
        .add_attribute("admin", info.sender)
        .add_attribute("asset_id", msg.asset_id.to_string()))
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut<LedgerQuery>,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response<LedgerMsg>, ContractError> {
    match msg {
        ExecuteMsg::SetTrustKey { new_key } => execute::set_trust_key(deps, info, new_key),
        ExecuteMsg::SetAsset { asset_id } => execute::set_asset(deps, info, asset_id),
        ExecuteMsg::OptInAsset {} => execute::opt_in_asset(deps, env, info),
        ExecuteMsg::ReleaseAsset { recipient, amount } => {
            execute::release_asset(deps, info, recipient, amount)
        }
        ExecuteMsg::Sweep { receiver } => execute::sweep(deps, info, receiver),
    }
}

mod execute {
    use cosmwasm_std::{Binary, DepsMut, Env, MessageInfo, Response, Uint128};
    use custody_ledger_utils::error::ContractError;
    use custody_ledger_utils::msg::{LedgerMsg, LedgerQuery};

    use crate::helpers::{check_admin, validate_trust_key};
    use crate::state::{ASSET_ID, TRUST_KEY};

    pub fn set_trust_key(
        deps: DepsMut<LedgerQuery>,
        info: MessageInfo,
        new_key: Binary,
    ) -> Result<Response<LedgerMsg>, ContractError> {
        check_admin(&deps, &info)?;
        validate_trust_key(&new_key)?;

        TRUST_KEY.save(deps.storage, &new_key)?;

        Ok(Response::new().add_attribute("method", "set_trust_key"))
    }

    pub fn set_asset(
        deps: DepsMut<LedgerQuery>,
        info: MessageInfo,
        asset_id: u64,
    ) -> Result<Response<LedgerMsg>, ContractError> {
        check_admin(&deps, &info)?;

        // Any holding of the previous asset stays with the contract until the
        // asset id is pointed back at it and swept.
        ASSET_ID.save(deps.storage, &asset_id)?;

        Ok(Response::new()
            .add_attribute("method", "set_asset")
            .add_attribute("asset_id", asset_id.to_string()))
    }

    pub fn opt_in_asset(
        deps: DepsMut<LedgerQuery>,
        env: Env,
        info: MessageInfo,
    ) -> Result<Response<LedgerMsg>, ContractError> {
        check_admin(&deps, &info)?;

        let asset_id = ASSET_ID.load(deps.storage)?;

        Ok(Response::new()
            .add_message(LedgerMsg::opt_in(asset_id, &env.contract.address))
            .add_attribute("method", "opt_in_asset")
            .add_attribute("asset_id", asset_id.to_string()))
    }

    pub fn release_asset(
        deps: DepsMut<LedgerQuery>,
        info: MessageInfo,
        recipient: String,
        amount: Uint128,
    ) -> Result<Response<LedgerMsg>, ContractError> {
        check_admin(&deps, &info)?;

        let recipient = deps.api.addr_validate(&recipient)?;
        let asset_id = ASSET_ID.load(deps.storage)?;

        // The ledger enforces the balance precondition; the transfer and this
        // transaction fail together if it does not hold.
        Ok(Response::new()
            .add_message(LedgerMsg::transfer(asset_id, amount, &recipient))
            .add_attribute("method", "release_asset")
            .add_attribute("recipient", recipient)
            .add_attribute("amount", amount))
    }

    pub fn sweep(
        deps: DepsMut<LedgerQuery>,
        info: MessageInfo,
        receiver: String,
    ) -> Result<Response<LedgerMsg>, ContractError> {
        check_admin(&deps, &info)?;

        let receiver = deps.api.addr_validate(&receiver)?;
        let asset_id = ASSET_ID.load(deps.storage)?;

        Ok(Response::new()
            .add_message(LedgerMsg::close_out(asset_id, &receiver))
            .add_attribute("method", "sweep")
            .add_attribute("receiver", receiver))
    }
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps<LedgerQuery>, _env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::Admin {} => to_json_binary(&ADMIN.load(deps.storage)?),
        QueryMsg::Config {} => to_json_binary(&ConfigResponse {
            admin: ADMIN.load(deps.storage)?,
            trust_key: TRUST_KEY.load(deps.storage)?,
            asset_id: ASSET_ID.load(deps.storage)?,
            paused: PAUSED.load(deps.storage)?,
        }),
    }
}
