//! Contracted amount per currency, stored one row per entry.

use sea_orm::{ActiveValue, entity::prelude::*};

use crate::{Currency, CurrencyAmount, EngineError};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "contract_amounts")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub contract_id: String,
    pub currency: String,
    pub amount: f64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::contracts::Entity",
        from = "Column::ContractId",
        to = "super::contracts::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Contracts,
}

impl Related<super::contracts::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Contracts.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl ActiveModel {
    pub(crate) fn for_contract(contract_id: &str, amount: &CurrencyAmount) -> Self {
        Self {
            id: ActiveValue::NotSet,
            contract_id: ActiveValue::Set(contract_id.to_string()),
            currency: ActiveValue::Set(amount.currency.code().to_string()),
            amount: ActiveValue::Set(amount.value),
        }
    }
}

impl TryFrom<Model> for CurrencyAmount {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(CurrencyAmount::new(
            Currency::try_from(model.currency.as_str())?,
            model.amount,
        ))
    }
}
