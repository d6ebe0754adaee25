//! Read models returned by the engine.
//!
//! Views are built once from persisted records plus their computed summary
//! and are never mutated afterwards.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::{
    CallOffOrder, Contract, Currency, CurrencyAmount, Period, Request, TimeSheet, summary,
    summary::CurrencySummary,
};

pub const TIME_SHEET_DOC_TYPE: &str = "timesheet";

/// A time sheet as listed in a request's documentation.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeSheetView {
    #[serde(rename = "type")]
    pub doc_type: &'static str,
    pub id: String,
    pub call_off_order_id: String,
    pub assignee: String,
    pub name: String,
    pub position: String,
    pub period: Period,
    pub month: u32,
    pub year: i32,
    pub amount: f64,
    pub currency: Currency,
    pub status_name: &'static str,
    pub status_sys_name: &'static str,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TimeSheetView {
    pub fn new(time_sheet: &TimeSheet, order: &CallOffOrder) -> Self {
        Self {
            doc_type: TIME_SHEET_DOC_TYPE,
            id: time_sheet.id.clone(),
            call_off_order_id: order.id.clone(),
            assignee: order.assignee.clone(),
            name: order.name.clone(),
            position: order.position.clone(),
            period: time_sheet.period,
            month: time_sheet.period.month(),
            year: time_sheet.period.year(),
            amount: time_sheet.amount,
            currency: time_sheet.currency.clone(),
            status_name: time_sheet.status.label(),
            status_sys_name: time_sheet.status.as_str(),
            created_at: time_sheet.created_at,
            updated_at: time_sheet.updated_at,
        }
    }

    fn priced(&self) -> CurrencyAmount {
        CurrencyAmount::new(self.currency.clone(), self.amount)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestSummary {
    pub works_quantity: usize,
    pub works_amount: Vec<CurrencyAmount>,
    pub materials_quantity: usize,
    pub materials_amount: Vec<CurrencyAmount>,
    pub amounts: Vec<CurrencyAmount>,
    pub vats: Vec<CurrencyAmount>,
    pub totals: Vec<CurrencyAmount>,
}

/// A request with its documentation and money summary.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestDetail {
    pub id: String,
    pub rev_id: String,
    pub contract_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub call_off_order_ids: Vec<String>,
    pub documents: Vec<TimeSheetView>,
    pub summary: RequestSummary,
    pub status_name: &'static str,
    pub status_sys_name: &'static str,
}

impl RequestDetail {
    /// Build the view of `request` from its documents.
    pub fn build(request: &Request, documents: Vec<TimeSheetView>, vat_included: bool) -> Self {
        let CurrencySummary {
            amounts,
            vats,
            totals,
        } = summary::aggregate(
            documents.iter().map(TimeSheetView::priced),
            vat_included,
        );

        Self {
            id: request.id.clone(),
            rev_id: request.rev_id.clone(),
            contract_id: request.contract_id.clone(),
            created_at: request.created_at,
            updated_at: request.updated_at,
            call_off_order_ids: request.call_off_order_ids.clone(),
            documents,
            summary: RequestSummary {
                works_quantity: request.call_off_order_ids.len(),
                works_amount: amounts.clone(),
                materials_quantity: 0,
                materials_amount: Vec::new(),
                amounts,
                vats,
                totals,
            },
            status_name: request.status.label(),
            status_sys_name: request.status.as_str(),
        }
    }
}

/// A request as shown in lists.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestListItem {
    pub id: String,
    pub rev_id: String,
    pub contract_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub contract_number: String,
    pub contractor_name: String,
    pub amounts: Vec<CurrencyAmount>,
    pub status_name: &'static str,
    pub status_sys_name: &'static str,
}

impl RequestListItem {
    pub fn build(request: &Request, contract: &Contract, time_sheets: &[TimeSheet]) -> Self {
        Self {
            id: request.id.clone(),
            rev_id: request.rev_id.clone(),
            contract_id: request.contract_id.clone(),
            created_at: request.created_at,
            updated_at: request.updated_at,
            contract_number: contract.number.clone(),
            contractor_name: contract.contractor_name.clone(),
            amounts: summary::group_by_currency(time_sheets.iter().map(TimeSheet::priced)),
            status_name: request.status.label(),
            status_sys_name: request.status.as_str(),
        }
    }
}
