use tracing::{debug, error, info};

use crate::{
    Actor, RequestDetail, ResultEngine, Status, Transition,
    status::{cascade_targets, check_transition},
    util::normalize_required_id,
};

use super::super::Engine;

impl Engine {
    /// Move a request to the status named `status_name`.
    ///
    /// Setting the current status again writes nothing. Entering review
    /// moves every time sheet not yet in review or approved along with the
    /// request. The request is written first; a failing time sheet write is
    /// reported but the request keeps its new status.
    pub async fn update_status(
        &self,
        request_id: &str,
        status_name: &str,
        actor: &Actor,
    ) -> ResultEngine<RequestDetail> {
        let target: Status = status_name.parse()?;
        let request_id = normalize_required_id(request_id, "request")?;
        let mut request = self.require_request(&request_id).await?;
        let contract = self.require_contract(&request.contract_id).await?;
        let time_sheets = self.time_sheets.get_by_request(&request_id).await?;
        let dependents: Vec<Status> = time_sheets.iter().map(|ts| ts.status).collect();

        let cascade = match check_transition(request.status, target, &dependents, actor.is_admin)? {
            Transition::Unchanged => {
                debug!(request_id, status = %target, "status unchanged");
                return self.detail(&request, contract.vat_included).await;
            }
            Transition::Apply { cascade } => cascade,
        };

        let previous = request.status;
        request.status = target;
        self.requests.update(&request).await?;
        info!(
            request_id,
            user_id = actor.user_id,
            from = %previous,
            to = %target,
            "request status updated"
        );

        if cascade {
            for time_sheet in cascade_targets(&time_sheets) {
                let mut time_sheet = time_sheet.clone();
                time_sheet.status = target;
                if let Err(err) = self.time_sheets.update(&time_sheet).await {
                    error!(
                        request_id,
                        time_sheet_id = time_sheet.id,
                        error = %err,
                        "time sheet status not cascaded, request already updated"
                    );
                    return Err(err);
                }
            }
        }

        let request = self.require_request(&request_id).await?;
        self.detail(&request, contract.vat_included).await
    }
}
