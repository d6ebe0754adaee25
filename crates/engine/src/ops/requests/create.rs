use tracing::info;

use crate::{
    RequestDetail, ResultEngine,
    util::{normalize_call_off_order_ids, normalize_required_id},
};

use super::super::{Engine, allocation::AllocationFailure};

impl Engine {
    /// Create a request for a contract and generate its time sheets.
    ///
    /// The request starts `Empty`. Each call-off order gets one time sheet
    /// for its first uncovered billing period of at most one month. If any
    /// step fails, everything written so far is deleted and the original
    /// error is returned.
    pub async fn create_request(
        &self,
        contract_id: &str,
        call_off_order_ids: &[String],
    ) -> ResultEngine<RequestDetail> {
        let contract_id = normalize_required_id(contract_id, "contract")?;
        let call_off_order_ids = normalize_call_off_order_ids(call_off_order_ids)?;
        let contract = self.require_contract(&contract_id).await?;

        let request_id = self
            .requests
            .create(&contract_id, &call_off_order_ids)
            .await?;

        let created = match self
            .generate_time_sheets(&request_id, &call_off_order_ids)
            .await
        {
            Ok(created) => created,
            Err(AllocationFailure { created, error }) => {
                return Err(self.compensate(error, &created, Some(&request_id)).await);
            }
        };

        let detail = match self.require_request(&request_id).await {
            Ok(request) => self.detail(&request, contract.vat_included).await,
            Err(err) => Err(err),
        };
        match detail {
            Ok(detail) => {
                info!(
                    request_id,
                    contract_id,
                    time_sheets = created.len(),
                    "request created"
                );
                Ok(detail)
            }
            Err(error) => Err(self.compensate(error, &created, Some(&request_id)).await),
        }
    }
}
