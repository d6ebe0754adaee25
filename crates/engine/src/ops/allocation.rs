//! Time sheet generation and compensation.

use tracing::{debug, error, warn};

use crate::{
    EngineError, NewTimeSheet, ResultEngine,
    period::{Period, available_ranges, propose_range},
};

use super::Engine;

/// A generation run that stopped on `error` after persisting `created`.
#[derive(Debug)]
pub(super) struct AllocationFailure {
    pub(super) created: Vec<String>,
    pub(super) error: EngineError,
}

impl Engine {
    /// Generate one time sheet per call-off order, in order.
    ///
    /// Each order is processed against the store state left by the previous
    /// one. Orders that are unknown or fully covered are skipped.
    pub(super) async fn generate_time_sheets(
        &self,
        request_id: &str,
        call_off_order_ids: &[String],
    ) -> Result<Vec<String>, AllocationFailure> {
        let mut created = Vec::with_capacity(call_off_order_ids.len());
        for call_off_order_id in call_off_order_ids {
            match self.allocate_time_sheet(request_id, call_off_order_id).await {
                Ok(Some(time_sheet_id)) => created.push(time_sheet_id),
                Ok(None) => {}
                Err(error) => return Err(AllocationFailure { created, error }),
            }
        }
        Ok(created)
    }

    async fn allocate_time_sheet(
        &self,
        request_id: &str,
        call_off_order_id: &str,
    ) -> ResultEngine<Option<String>> {
        let Some(order) = self.call_off_orders.get(call_off_order_id).await? else {
            warn!(call_off_order_id, request_id, "call-off order not found, skipped");
            return Ok(None);
        };

        let existing: Vec<Period> = self
            .time_sheets
            .get_by_call_off_order(call_off_order_id)
            .await?
            .iter()
            .map(|time_sheet| time_sheet.period)
            .collect();
        let ranges = available_ranges(&existing, order.bounds()?);
        let Some(period) = propose_range(&ranges) else {
            warn!(
                call_off_order_id,
                request_id, "no free period left for call-off order, skipped"
            );
            return Ok(None);
        };

        let time_sheet_id = self
            .time_sheets
            .create(&NewTimeSheet {
                call_off_order_id: order.id,
                request_id: request_id.to_string(),
                period,
                currency: order.currency,
            })
            .await?;
        debug!(
            time_sheet_id,
            call_off_order_id,
            start = %period.start,
            end = %period.end,
            "time sheet created"
        );
        Ok(Some(time_sheet_id))
    }

    /// Undo the writes of a failed operation and return the error to report.
    ///
    /// Deletes `time_sheet_ids`, then the request if given. Records that are
    /// already gone count as removed. Every delete is attempted; the first
    /// cleanup failure is reported together with `original`.
    pub(super) async fn compensate(
        &self,
        original: EngineError,
        time_sheet_ids: &[String],
        request_id: Option<&str>,
    ) -> EngineError {
        warn!(
            error = %original,
            time_sheets = time_sheet_ids.len(),
            request_id,
            "operation failed, compensating"
        );

        let mut cleanup = None;
        for time_sheet_id in time_sheet_ids {
            if let Err(err) = already_gone(self.time_sheets.delete(time_sheet_id).await) {
                error!(time_sheet_id, error = %err, "compensation: time sheet not deleted");
                cleanup.get_or_insert(err);
            }
        }
        if let Some(request_id) = request_id
            && let Err(err) = already_gone(self.requests.delete(request_id).await)
        {
            error!(request_id, error = %err, "compensation: request not deleted");
            cleanup.get_or_insert(err);
        }

        match cleanup {
            None => original,
            Some(cleanup) => EngineError::compensation(original, cleanup),
        }
    }
}

fn already_gone(result: ResultEngine<()>) -> ResultEngine<()> {
    match result {
        Err(err) if err.is_not_found() => Ok(()),
        other => other,
    }
}
