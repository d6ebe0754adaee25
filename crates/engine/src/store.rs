//! Store interfaces the engine depends on.
//!
//! Every collaborator is injected explicitly through [`EngineBuilder`]. Reads
//! return `Ok(None)` for absent records; updates and deletes of absent
//! records fail with [`EngineError::NotFound`].
//!
//! [`EngineBuilder`]: crate::EngineBuilder
//! [`EngineError::NotFound`]: crate::EngineError::NotFound

use async_trait::async_trait;

use crate::{CallOffOrder, Contract, NewTimeSheet, Request, ResultEngine, TimeSheet};

#[async_trait]
pub trait RequestStore: Send + Sync {
    async fn get(&self, id: &str) -> ResultEngine<Option<Request>>;

    /// Persist a new `Empty` request and return its id.
    async fn create(&self, contract_id: &str, call_off_order_ids: &[String])
    -> ResultEngine<String>;

    /// Persist status and composition. Assigns a new revision id.
    async fn update(&self, request: &Request) -> ResultEngine<()>;

    async fn delete(&self, id: &str) -> ResultEngine<()>;

    async fn list_all(&self) -> ResultEngine<Vec<Request>>;

    async fn list_by_contract(&self, contract_id: &str) -> ResultEngine<Vec<Request>>;
}

#[async_trait]
pub trait TimeSheetStore: Send + Sync {
    async fn get(&self, id: &str) -> ResultEngine<Option<TimeSheet>>;

    async fn create(&self, time_sheet: &NewTimeSheet) -> ResultEngine<String>;

    async fn update(&self, time_sheet: &TimeSheet) -> ResultEngine<()>;

    async fn delete(&self, id: &str) -> ResultEngine<()>;

    async fn get_by_call_off_order_and_request(
        &self,
        call_off_order_id: &str,
        request_id: &str,
    ) -> ResultEngine<Option<TimeSheet>>;

    async fn ids_by_request(&self, request_id: &str) -> ResultEngine<Vec<String>>;

    /// Time sheets of a request, ordered by period start.
    async fn get_by_request(&self, request_id: &str) -> ResultEngine<Vec<TimeSheet>>;

    /// Time sheets of a call-off order across all requests, ordered by
    /// period start.
    async fn get_by_call_off_order(&self, call_off_order_id: &str)
    -> ResultEngine<Vec<TimeSheet>>;
}

#[async_trait]
pub trait CallOffOrderStore: Send + Sync {
    async fn get(&self, id: &str) -> ResultEngine<Option<CallOffOrder>>;
}

#[async_trait]
pub trait ContractStore: Send + Sync {
    async fn get(&self, id: &str) -> ResultEngine<Option<Contract>>;
}
