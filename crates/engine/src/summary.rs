//! Per-currency totals of monetary documents.
//!
//! Amounts are major units (`150.0 RUR`), VAT is rounded to whole major
//! units.

use serde::Serialize;

use crate::Currency;

/// Divisor used to extract VAT from a VAT-inclusive amount (18%).
pub const VAT_DIVISOR: f64 = 1.18;

/// An amount in a single currency.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CurrencyAmount {
    pub currency: Currency,
    pub value: f64,
}

impl CurrencyAmount {
    pub fn new(currency: Currency, value: f64) -> Self {
        Self { currency, value }
    }
}

/// Per-currency amounts, VAT and totals of a set of documents.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct CurrencySummary {
    pub amounts: Vec<CurrencyAmount>,
    pub vats: Vec<CurrencyAmount>,
    pub totals: Vec<CurrencyAmount>,
}

/// Sum documents by currency, keeping the order in which currencies first
/// appear.
pub fn group_by_currency<I>(documents: I) -> Vec<CurrencyAmount>
where
    I: IntoIterator<Item = CurrencyAmount>,
{
    let mut groups: Vec<CurrencyAmount> = Vec::new();
    for document in documents {
        match groups.iter_mut().find(|g| g.currency == document.currency) {
            Some(group) => group.value += document.value,
            None => groups.push(document),
        }
    }
    groups
}

/// VAT contained in `amount`; zero when the contract prices exclude VAT.
///
/// Exact halves round to the even whole unit.
pub fn vat(amount: f64, vat_included: bool) -> f64 {
    if vat_included {
        ((amount / VAT_DIVISOR - amount) * -1.0).round_ties_even()
    } else {
        0.0
    }
}

/// Aggregate documents into per-currency amounts, VAT and totals.
///
/// Every observed currency gets a VAT line, even a zero one.
pub fn aggregate<I>(documents: I, vat_included: bool) -> CurrencySummary
where
    I: IntoIterator<Item = CurrencyAmount>,
{
    let amounts = group_by_currency(documents);
    let vats = amounts
        .iter()
        .map(|a| CurrencyAmount::new(a.currency.clone(), vat(a.value, vat_included)))
        .collect();
    let totals = amounts.clone();

    CurrencySummary {
        amounts,
        vats,
        totals,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn amount(value: f64, code: &str) -> CurrencyAmount {
        CurrencyAmount::new(Currency::try_from(code).unwrap(), value)
    }

    #[test]
    fn groups_by_currency_with_vat() {
        let summary = aggregate(
            vec![amount(100.0, "RUR"), amount(50.0, "rur"), amount(10.0, "USD")],
            true,
        );

        assert_eq!(summary.amounts, vec![amount(150.0, "RUR"), amount(10.0, "USD")]);
        assert_eq!(summary.vats, vec![amount(23.0, "RUR"), amount(2.0, "USD")]);
        assert_eq!(summary.totals, summary.amounts);
    }

    #[test]
    fn vat_lines_are_kept_when_excluded() {
        let summary = aggregate(vec![amount(100.0, "RUR"), amount(10.0, "USD")], false);

        assert_eq!(summary.vats, vec![amount(0.0, "RUR"), amount(0.0, "USD")]);
    }

    #[test]
    fn vat_halves_round_to_even() {
        assert_eq!(vat(29.5, true), 4.0);
        assert_eq!(vat(88.5, true), 14.0);
        assert_eq!(vat(29.5, false), 0.0);
    }

    #[test]
    fn empty_documents_give_empty_summary() {
        assert_eq!(aggregate(Vec::new(), true), CurrencySummary::default());
    }
}
