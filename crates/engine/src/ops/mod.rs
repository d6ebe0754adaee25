use std::{fmt, sync::Arc};

use sea_orm::DatabaseConnection;

use crate::{
    CallOffOrderStore, Contract, ContractStore, EngineError, Request, RequestStore, ResultEngine,
    SqlStore, TimeSheetStore,
};

mod allocation;
mod amounts;
mod requests;
mod views;

/// Coordinates the request lifecycle over the injected stores.
///
/// Every operation is a sequence of awaited store calls. Nothing is locked:
/// two operations on the same request or call-off order may interleave.
pub struct Engine {
    requests: Arc<dyn RequestStore>,
    time_sheets: Arc<dyn TimeSheetStore>,
    call_off_orders: Arc<dyn CallOffOrderStore>,
    contracts: Arc<dyn ContractStore>,
}

impl fmt::Debug for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Engine").finish_non_exhaustive()
    }
}

impl Engine {
    /// Return a builder for `Engine`. Help to build the struct.
    pub fn builder() -> EngineBuilder {
        EngineBuilder::default()
    }

    async fn require_request(&self, request_id: &str) -> ResultEngine<Request> {
        self.requests
            .get(request_id)
            .await?
            .ok_or_else(|| EngineError::NotFound(format!("request {request_id}")))
    }

    async fn require_contract(&self, contract_id: &str) -> ResultEngine<Contract> {
        self.contracts
            .get(contract_id)
            .await?
            .ok_or_else(|| EngineError::NotFound(format!("contract {contract_id}")))
    }
}

/// The builder for `Engine`
#[derive(Default)]
pub struct EngineBuilder {
    requests: Option<Arc<dyn RequestStore>>,
    time_sheets: Option<Arc<dyn TimeSheetStore>>,
    call_off_orders: Option<Arc<dyn CallOffOrderStore>>,
    contracts: Option<Arc<dyn ContractStore>>,
}

impl EngineBuilder {
    /// Use the database for every store.
    pub fn database(self, db: DatabaseConnection) -> EngineBuilder {
        let store = Arc::new(SqlStore::new(db));
        self.request_store(store.clone())
            .time_sheet_store(store.clone())
            .call_off_order_store(store.clone())
            .contract_store(store)
    }

    pub fn request_store(mut self, store: Arc<dyn RequestStore>) -> EngineBuilder {
        self.requests = Some(store);
        self
    }

    pub fn time_sheet_store(mut self, store: Arc<dyn TimeSheetStore>) -> EngineBuilder {
        self.time_sheets = Some(store);
        self
    }

    pub fn call_off_order_store(mut self, store: Arc<dyn CallOffOrderStore>) -> EngineBuilder {
        self.call_off_orders = Some(store);
        self
    }

    pub fn contract_store(mut self, store: Arc<dyn ContractStore>) -> EngineBuilder {
        self.contracts = Some(store);
        self
    }

    /// Construct `Engine`. Fails if a store was not provided.
    pub fn build(self) -> ResultEngine<Engine> {
        Ok(Engine {
            requests: self.requests.ok_or_else(|| missing("request"))?,
            time_sheets: self.time_sheets.ok_or_else(|| missing("time sheet"))?,
            call_off_orders: self.call_off_orders.ok_or_else(|| missing("call-off order"))?,
            contracts: self.contracts.ok_or_else(|| missing("contract"))?,
        })
    }
}

fn missing(store: &str) -> EngineError {
    EngineError::Configuration(format!("{store} store is not configured"))
}
