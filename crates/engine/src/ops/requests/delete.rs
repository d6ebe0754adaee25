use tracing::info;

use crate::{Actor, EngineError, ResultEngine, Status, util::normalize_required_id};

use super::super::Engine;

impl Engine {
    /// Delete a request together with its time sheets.
    ///
    /// Approved requests can only be deleted by an administrator. Time
    /// sheets are deleted one by one before the request; the first failure
    /// stops the operation.
    pub async fn delete_request(&self, request_id: &str, actor: &Actor) -> ResultEngine<()> {
        let request_id = normalize_required_id(request_id, "request")?;
        let request = self.require_request(&request_id).await?;
        if request.status == Status::Approved && !actor.is_admin {
            return Err(EngineError::Forbidden(format!(
                "request {request_id} is approved"
            )));
        }

        let time_sheet_ids = self.time_sheets.ids_by_request(&request_id).await?;
        for time_sheet_id in &time_sheet_ids {
            self.time_sheets.delete(time_sheet_id).await?;
        }
        self.requests.delete(&request_id).await?;

        info!(
            request_id,
            user_id = actor.user_id,
            time_sheets = time_sheet_ids.len(),
            "request deleted"
        );
        Ok(())
    }
}
