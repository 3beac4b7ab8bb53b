use anyhow::bail;
use cosmwasm_std::{
    testing::{MockApi, MockStorage},
    to_json_binary, Addr, Api, Binary, BlockInfo, CustomMsg, CustomQuery, Empty, Querier,
    QueryRequest, Storage, Uint128,
};
use cw_multi_test::{
    error::AnyResult, no_init, App, AppResponse, BankKeeper, BasicAppBuilder, Contract,
    CosmosRouter, Executor, Module, WasmKeeper,
};
use cw_storage_plus::Map;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt::Debug;

use crate::msg::{AssetBalanceResponse, LedgerMsg, LedgerQuery};

const ASSETS: Map<u64, Empty> = Map::new("ledger_assets");
const HOLDINGS: Map<(&Addr, u64), Uint128> = Map::new("ledger_holdings");

/// Emulation of the host ledger's asset module for cw-multi-test: integer
/// asset ids, explicit opt-in before an account may hold an asset, and
/// close-to semantics that evacuate the full remaining holding. Fails the
/// whole transaction on any violated precondition, so contract state writes
/// staged alongside a bad transfer are rolled back by the framework.
#[derive(Default)]
pub struct AssetLedger;

impl AssetLedger {
    /// Registers an asset id so transfers of it are accepted.
    pub fn create_asset(storage: &mut dyn Storage, asset_id: u64) -> AnyResult<()> {
        ASSETS.save(storage, asset_id, &Empty {})?;
        Ok(())
    }

    /// Opens a holding for `account` (idempotent).
    pub fn opt_in(storage: &mut dyn Storage, account: &Addr, asset_id: u64) -> AnyResult<()> {
        if !ASSETS.has(storage, asset_id) {
            bail!("asset {} does not exist", asset_id);
        }
        if !HOLDINGS.has(storage, (account, asset_id)) {
            HOLDINGS.save(storage, (account, asset_id), &Uint128::zero())?;
        }
        Ok(())
    }

    /// Credits `amount` units to `account`, opening the holding if needed.
    /// Stands in for an external party funding the account.
    pub fn fund(
        storage: &mut dyn Storage,
        account: &Addr,
        asset_id: u64,
        amount: u128,
    ) -> AnyResult<()> {
        Self::opt_in(storage, account, asset_id)?;
        HOLDINGS.update(storage, (account, asset_id), |bal| -> AnyResult<_> {
            Ok(bal.unwrap_or_default() + Uint128::new(amount))
        })?;
        Ok(())
    }

    fn credit(
        storage: &mut dyn Storage,
        account: &Addr,
        asset_id: u64,
        amount: Uint128,
    ) -> AnyResult<()> {
        match HOLDINGS.may_load(storage, (account, asset_id))? {
            Some(balance) => {
                HOLDINGS.save(storage, (account, asset_id), &(balance + amount))?;
                Ok(())
            }
            None => bail!("receiver {} is not opted in to asset {}", account, asset_id),
        }
    }
}

impl Module for AssetLedger {
    type ExecT = LedgerMsg;
    type QueryT = LedgerQuery;
    type SudoT = Empty;

    fn execute<ExecC, QueryC>(
        &self,
        api: &dyn Api,
        storage: &mut dyn Storage,
        _router: &dyn CosmosRouter<ExecC = ExecC, QueryC = QueryC>,
        _block: &BlockInfo,
        sender: Addr,
        msg: Self::ExecT,
    ) -> AnyResult<AppResponse>
    where
        ExecC: CustomMsg + DeserializeOwned + 'static,
        QueryC: CustomQuery + DeserializeOwned + 'static,
    {
        let LedgerMsg::AssetTransfer {
            asset_id,
            amount,
            receiver,
            close_to,
        } = msg;

        if !ASSETS.has(storage, asset_id) {
            bail!("asset {} does not exist", asset_id);
        }
        let receiver = api.addr_validate(&receiver)?;

        // A zero-amount self-transfer without close-to is the opt-in form.
        if close_to.is_none() && receiver == sender && amount.is_zero() {
            AssetLedger::opt_in(storage, &sender, asset_id)?;
            return Ok(AppResponse::default());
        }

        let sender_balance = match HOLDINGS.may_load(storage, (&sender, asset_id))? {
            Some(balance) => balance,
            None => bail!("sender {} is not opted in to asset {}", sender, asset_id),
        };
        let remaining = match sender_balance.checked_sub(amount) {
            Ok(remaining) => remaining,
            Err(_) => bail!(
                "insufficient balance of asset {}: have {}, need {}",
                asset_id,
                sender_balance,
                amount
            ),
        };

        match close_to {
            Some(close_to) => {
                let close_to = api.addr_validate(&close_to)?;
                if close_to == sender {
                    bail!("cannot close an asset holding to the holder itself");
                }
                HOLDINGS.remove(storage, (&sender, asset_id));
                if !amount.is_zero() {
                    AssetLedger::credit(storage, &receiver, asset_id, amount)?;
                }
                AssetLedger::credit(storage, &close_to, asset_id, remaining)?;
            }
            None => {
                HOLDINGS.save(storage, (&sender, asset_id), &remaining)?;
                AssetLedger::credit(storage, &receiver, asset_id, amount)?;
            }
        }

        Ok(AppResponse::default())
    }

    fn query(
        &self,
        api: &dyn Api,
        storage: &dyn Storage,
        _querier: &dyn Querier,
        _block: &BlockInfo,
        request: Self::QueryT,
    ) -> AnyResult<Binary> {
        match request {
            LedgerQuery::AssetBalance { address, asset_id } => {
                let address = api.addr_validate(&address)?;
                let holding = HOLDINGS.may_load(storage, (&address, asset_id))?;
                let response = AssetBalanceResponse {
                    balance: holding.unwrap_or_default(),
                    opted_in: holding.is_some(),
                };
                Ok(to_json_binary(&response)?)
            }
        }
    }

    fn sudo<ExecC, QueryC>(
        &self,
        _api: &dyn Api,
        _storage: &mut dyn Storage,
        _router: &dyn CosmosRouter<ExecC = ExecC, QueryC = QueryC>,
        _block: &BlockInfo,
        _msg: Self::SudoT,
    ) -> AnyResult<AppResponse>
    where
        ExecC: CustomMsg + DeserializeOwned + 'static,
        QueryC: CustomQuery + DeserializeOwned + 'static,
    {
        bail!("sudo is not supported by the asset ledger")
    }
}

pub type LedgerApp = App<
    BankKeeper,
    MockApi,
    MockStorage,
    AssetLedger,
    WasmKeeper<LedgerMsg, LedgerQuery>,
>;

pub struct ControllerTestSuiteBase {
    app: LedgerApp,
    owner: Addr,
    controller_code_id: u64,
}

impl ControllerTestSuiteBase {
    pub fn new(controller_contract: Box<dyn Contract<LedgerMsg, LedgerQuery>>) -> Self {
        let mut app = BasicAppBuilder::<LedgerMsg, LedgerQuery>::new_custom()
            .with_custom(AssetLedger)
            .build(no_init);

        let owner = app.api().addr_make("owner");

        let controller_code_id = app.store_code(controller_contract);

        Self {
            app,
            owner,
            controller_code_id,
        }
    }
}

pub trait ControllerTestSuite {
    fn app(&self) -> &LedgerApp;
    fn app_mut(&mut self) -> &mut LedgerApp;
    fn owner(&self) -> &Addr;
    fn controller_code_id(&self) -> u64;

    fn api(&self) -> &MockApi {
        self.app().api()
    }

    fn contract_init<T: Serialize>(&mut self, code_id: u64, label: &str, init_msg: &T) -> Addr {
        let owner = self.owner().clone();
        self.app_mut()
            .instantiate_contract(
                code_id,
                owner.clone(),
                &init_msg,
                &[],
                label,
                Some(owner.to_string()),
            )
            .unwrap()
    }

    fn contract_execute<T: Serialize + Debug>(
        &mut self,
        addr: Addr,
        msg: &T,
    ) -> AnyResult<AppResponse> {
        let sender = self.owner().clone();
        self.app_mut().execute_contract(sender, addr, &msg, &[])
    }

    fn query_wasm<T, U>(&self, addr: &Addr, query: &T) -> U
    where
        T: Serialize,
        U: DeserializeOwned,
    {
        self.app()
            .wrap()
            .query_wasm_smart::<U>(addr, &query)
            .unwrap()
    }

    fn create_asset(&mut self, asset_id: u64) {
        self.app_mut().init_modules(|_router, _api, storage| {
            AssetLedger::create_asset(storage, asset_id).unwrap();
        });
    }

    fn fund_asset(&mut self, account: &Addr, asset_id: u64, amount: u128) {
        let account = account.clone();
        self.app_mut().init_modules(|_router, _api, storage| {
            AssetLedger::fund(storage, &account, asset_id, amount).unwrap();
        });
    }

    fn opt_in_account(&mut self, account: &Addr, asset_id: u64) {
        let account = account.clone();
        self.app_mut().init_modules(|_router, _api, storage| {
            AssetLedger::opt_in(storage, &account, asset_id).unwrap();
        });
    }

    fn query_asset_balance(&self, account: &Addr, asset_id: u64) -> AssetBalanceResponse {
        self.app()
            .wrap()
            .query(&QueryRequest::Custom(LedgerQuery::AssetBalance {
                address: account.to_string(),
                asset_id,
            }))
            .unwrap()
    }

    fn assert_asset_balance(&self, account: &Addr, asset_id: u64, expected: u128) {
        let response = self.query_asset_balance(account, asset_id);
        assert_eq!(response.balance, Uint128::new(expected));
    }
}

impl ControllerTestSuite for ControllerTestSuiteBase {
    fn app(&self) -> &LedgerApp {
        &self.app
    }

    fn app_mut(&mut self) -> &mut LedgerApp {
        &mut self.app
    }

    fn owner(&self) -> &Addr {
        &self.owner
    }

    fn controller_code_id(&self) -> u64 {
        self.controller_code_id
    }
}
