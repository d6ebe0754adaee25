use std::collections::HashMap;

use tracing::warn;

use crate::{
    Contract, Request, RequestDetail, RequestListItem, ResultEngine, TimeSheetView,
    util::normalize_required_id,
};

use super::Engine;

impl Engine {
    /// Return the detailed view of a request.
    pub async fn request(&self, request_id: &str) -> ResultEngine<RequestDetail> {
        let request_id = normalize_required_id(request_id, "request")?;
        let request = self.require_request(&request_id).await?;
        let contract = self.require_contract(&request.contract_id).await?;
        self.detail(&request, contract.vat_included).await
    }

    /// List all requests, newest first.
    pub async fn list_requests(&self) -> ResultEngine<Vec<RequestListItem>> {
        let requests = self.requests.list_all().await?;
        self.list_items(requests).await
    }

    /// List the requests of a contract, newest first.
    pub async fn list_requests_by_contract(
        &self,
        contract_id: &str,
    ) -> ResultEngine<Vec<RequestListItem>> {
        let contract_id = normalize_required_id(contract_id, "contract")?;
        self.require_contract(&contract_id).await?;
        let requests = self.requests.list_by_contract(&contract_id).await?;
        self.list_items(requests).await
    }

    pub(super) async fn detail(
        &self,
        request: &Request,
        vat_included: bool,
    ) -> ResultEngine<RequestDetail> {
        let mut documents = Vec::with_capacity(request.call_off_order_ids.len());
        for call_off_order_id in &request.call_off_order_ids {
            let Some(order) = self.call_off_orders.get(call_off_order_id).await? else {
                warn!(
                    request_id = request.id,
                    call_off_order_id, "call-off order not found, left out of the view"
                );
                continue;
            };
            let Some(time_sheet) = self
                .time_sheets
                .get_by_call_off_order_and_request(call_off_order_id, &request.id)
                .await?
            else {
                warn!(
                    request_id = request.id,
                    call_off_order_id, "call-off order has no time sheet, left out of the view"
                );
                continue;
            };
            documents.push(TimeSheetView::new(&time_sheet, &order));
        }
        Ok(RequestDetail::build(request, documents, vat_included))
    }

    async fn list_items(&self, requests: Vec<Request>) -> ResultEngine<Vec<RequestListItem>> {
        let mut contracts: HashMap<String, Option<Contract>> = HashMap::new();
        let mut items = Vec::with_capacity(requests.len());
        for request in requests {
            if !contracts.contains_key(&request.contract_id) {
                let contract = self.contracts.get(&request.contract_id).await?;
                contracts.insert(request.contract_id.clone(), contract);
            }
            let Some(Some(contract)) = contracts.get(&request.contract_id) else {
                warn!(
                    request_id = request.id,
                    contract_id = request.contract_id,
                    "contract not found, request left out of the list"
                );
                continue;
            };
            let time_sheets = self.time_sheets.get_by_request(&request.id).await?;
            items.push(RequestListItem::build(&request, contract, &time_sheets));
        }
        Ok(items)
    }
}
