use crate::{
    CurrencyAmount, ResultEngine, TimeSheet, summary::group_by_currency,
    util::normalize_required_id,
};

use super::Engine;

impl Engine {
    /// Return, per currency billed by the request's time sheets, the
    /// contracted amount minus what the time sheets bill.
    ///
    /// The contract must hold exactly one amount for each of these
    /// currencies; otherwise the contract is misconfigured and a conflict is
    /// returned.
    pub async fn check_available_amount(
        &self,
        request_id: &str,
    ) -> ResultEngine<Vec<CurrencyAmount>> {
        let request_id = normalize_required_id(request_id, "request")?;
        let request = self.require_request(&request_id).await?;
        let contract = self.require_contract(&request.contract_id).await?;
        let time_sheets = self.time_sheets.get_by_request(&request_id).await?;

        group_by_currency(time_sheets.iter().map(TimeSheet::priced))
            .into_iter()
            .map(|billed| {
                let contracted = contract.contracted_amount(&billed.currency)?;
                Ok(CurrencyAmount::new(billed.currency, contracted - billed.value))
            })
            .collect()
    }
}
