use tracing::{error, info};

use crate::{
    Actor, EngineError, RequestDetail, ResultEngine, Status,
    util::{normalize_call_off_order_ids, normalize_required_id},
};

use super::super::{Engine, allocation::AllocationFailure};

impl Engine {
    /// Replace the call-off orders of a request.
    ///
    /// The time sheets of the current composition are discarded and new ones
    /// are generated as on creation. Discarding requires every current time
    /// sheet to be still unfilled; nothing is deleted otherwise.
    pub async fn update_composition(
        &self,
        request_id: &str,
        call_off_order_ids: &[String],
        actor: &Actor,
    ) -> ResultEngine<RequestDetail> {
        let request_id = normalize_required_id(request_id, "request")?;
        let call_off_order_ids = normalize_call_off_order_ids(call_off_order_ids)?;
        let mut request = self.require_request(&request_id).await?;
        if request.status == Status::Approved && !actor.is_admin {
            return Err(EngineError::Forbidden(format!(
                "request {request_id} is approved"
            )));
        }
        let contract = self.require_contract(&request.contract_id).await?;

        let mut discarded = Vec::with_capacity(request.call_off_order_ids.len());
        for call_off_order_id in &request.call_off_order_ids {
            let Some(time_sheet) = self
                .time_sheets
                .get_by_call_off_order_and_request(call_off_order_id, &request_id)
                .await?
            else {
                continue;
            };
            if !time_sheet.status.is_unfilled() {
                return Err(EngineError::Conflict(format!(
                    "time sheet {} of call-off order {call_off_order_id} is {}",
                    time_sheet.id, time_sheet.status
                )));
            }
            discarded.push(time_sheet.id);
        }
        for time_sheet_id in &discarded {
            self.time_sheets.delete(time_sheet_id).await?;
        }

        let created = match self
            .generate_time_sheets(&request_id, &call_off_order_ids)
            .await
        {
            Ok(created) => created,
            Err(AllocationFailure { created, error: err }) => {
                log_lost_time_sheets(&request_id, &discarded, &err);
                return Err(self.compensate(err, &created, None).await);
            }
        };

        request.call_off_order_ids = call_off_order_ids;
        if let Err(err) = self.requests.update(&request).await {
            log_lost_time_sheets(&request_id, &discarded, &err);
            return Err(self.compensate(err, &created, None).await);
        }
        info!(
            request_id,
            user_id = actor.user_id,
            discarded = discarded.len(),
            created = created.len(),
            "request composition updated"
        );

        let request = self.require_request(&request_id).await?;
        self.detail(&request, contract.vat_included).await
    }
}

/// The discarded time sheets are gone while the request still lists its old
/// call-off orders.
fn log_lost_time_sheets(request_id: &str, discarded: &[String], err: &EngineError) {
    if discarded.is_empty() {
        return;
    }
    error!(
        request_id,
        discarded = ?discarded,
        error = %err,
        "composition update failed after discarding time sheets; request has none for its call-off orders"
    );
}
