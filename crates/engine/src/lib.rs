//! Request lifecycle engine.
//!
//! A request groups call-off orders of one contract. Creating it generates one
//! monthly time sheet per call-off order in the first billing period that no
//! other time sheet of that order covers yet. The engine guards status
//! transitions, cascades review to the time sheets and summarizes amounts per
//! currency.

pub use call_off_orders::CallOffOrder;
pub use commands::Actor;
pub use contracts::Contract;
pub use currency::Currency;
pub use error::EngineError;
pub use ops::{Engine, EngineBuilder};
pub use period::Period;
pub use requests::Request;
pub use sql_store::SqlStore;
pub use status::{Status, Transition};
pub use store::{CallOffOrderStore, ContractStore, RequestStore, TimeSheetStore};
pub use summary::{CurrencyAmount, CurrencySummary};
pub use time_sheets::{NewTimeSheet, TimeSheet};
pub use views::{RequestDetail, RequestListItem, RequestSummary, TimeSheetView};

pub mod call_off_orders;
mod commands;
pub mod contract_amounts;
pub mod contracts;
mod currency;
mod error;
mod ops;
pub mod period;
pub mod requests;
mod sql_store;
pub mod status;
mod store;
pub mod summary;
pub mod time_sheets;
mod util;
mod views;

pub type ResultEngine<T> = Result<T, EngineError>;
