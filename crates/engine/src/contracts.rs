//! Contracts: the agreements requests are billed against. The engine only
//! reads them; they supply the VAT policy and the contracted amount per
//! currency.

use sea_orm::{ActiveValue, entity::prelude::*};
use serde::Serialize;
use uuid::Uuid;

use crate::{CurrencyAmount, EngineError, ResultEngine, contract_amounts};

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Contract {
    pub id: String,
    pub number: String,
    pub contractor_name: String,
    /// Whether time sheet amounts already include VAT.
    pub vat_included: bool,
    /// Contracted amount per currency. A well-formed contract lists each
    /// currency once.
    pub amounts: Vec<CurrencyAmount>,
}

impl Contract {
    pub fn new(
        number: impl Into<String>,
        contractor_name: impl Into<String>,
        vat_included: bool,
        amounts: Vec<CurrencyAmount>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            number: number.into(),
            contractor_name: contractor_name.into(),
            vat_included,
            amounts,
        }
    }

    /// The single contracted amount in `currency`.
    pub fn contracted_amount(&self, currency: &crate::Currency) -> ResultEngine<f64> {
        let mut entries = self.amounts.iter().filter(|a| &a.currency == currency);
        match (entries.next(), entries.next()) {
            (Some(entry), None) => Ok(entry.value),
            (None, _) => Err(EngineError::Conflict(format!(
                "contract {} has no amount in {currency}",
                self.number
            ))),
            (Some(_), Some(_)) => Err(EngineError::Conflict(format!(
                "contract {} has more than one amount in {currency}",
                self.number
            ))),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "contracts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub number: String,
    pub contractor_name: String,
    pub vat_included: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::contract_amounts::Entity")]
    ContractAmounts,
    #[sea_orm(has_many = "super::call_off_orders::Entity")]
    CallOffOrders,
}

impl Related<super::contract_amounts::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ContractAmounts.def()
    }
}

impl Related<super::call_off_orders::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CallOffOrders.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<&Contract> for ActiveModel {
    fn from(value: &Contract) -> Self {
        Self {
            id: ActiveValue::Set(value.id.clone()),
            number: ActiveValue::Set(value.number.clone()),
            contractor_name: ActiveValue::Set(value.contractor_name.clone()),
            vat_included: ActiveValue::Set(value.vat_included),
        }
    }
}

impl TryFrom<(Model, Vec<contract_amounts::Model>)> for Contract {
    type Error = EngineError;

    fn try_from(
        (model, amount_models): (Model, Vec<contract_amounts::Model>),
    ) -> Result<Self, Self::Error> {
        let amounts = amount_models
            .into_iter()
            .map(CurrencyAmount::try_from)
            .collect::<ResultEngine<Vec<_>>>()?;
        Ok(Self {
            id: model.id,
            number: model.number,
            contractor_name: model.contractor_name,
            vat_included: model.vat_included,
            amounts,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Currency;

    fn rur() -> Currency {
        Currency::try_from("RUR").unwrap()
    }

    #[test]
    fn contracted_amount_requires_exactly_one_entry() {
        let usd = Currency::try_from("USD").unwrap();
        let contract = Contract::new(
            "42/2024",
            "Acme",
            true,
            vec![
                CurrencyAmount::new(rur(), 1000.0),
                CurrencyAmount::new(usd.clone(), 10.0),
                CurrencyAmount::new(usd.clone(), 20.0),
            ],
        );

        assert_eq!(contract.contracted_amount(&rur()).unwrap(), 1000.0);
        assert!(matches!(
            contract.contracted_amount(&usd),
            Err(EngineError::Conflict(_))
        ));
        assert!(matches!(
            contract.contracted_amount(&Currency::try_from("EUR").unwrap()),
            Err(EngineError::Conflict(_))
        ));
    }
}
