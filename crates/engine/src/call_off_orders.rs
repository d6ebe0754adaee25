//! Call-off orders: work orders assigning a person and a role to a contract
//! for a date range. The engine only reads them.

use chrono::NaiveDate;
use sea_orm::{ActiveValue, entity::prelude::*};
use serde::Serialize;
use uuid::Uuid;

use crate::{Currency, EngineError, Period, ResultEngine};

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CallOffOrder {
    pub id: String,
    pub contract_id: String,
    pub assignee: String,
    pub name: String,
    pub position: String,
    pub start_date: NaiveDate,
    /// Inclusive.
    pub finish_date: NaiveDate,
    pub currency: Currency,
}

impl CallOffOrder {
    pub fn new(
        contract_id: impl Into<String>,
        assignee: impl Into<String>,
        name: impl Into<String>,
        position: impl Into<String>,
        start_date: NaiveDate,
        finish_date: NaiveDate,
        currency: Currency,
    ) -> ResultEngine<Self> {
        let order = Self {
            id: Uuid::new_v4().to_string(),
            contract_id: contract_id.into(),
            assignee: assignee.into(),
            name: name.into(),
            position: position.into(),
            start_date,
            finish_date,
            currency,
        };
        order.bounds()?;
        Ok(order)
    }

    /// The half-open period billable for this order.
    pub fn bounds(&self) -> ResultEngine<Period> {
        Period::from_inclusive(self.start_date, self.finish_date)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "call_off_orders")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub contract_id: String,
    pub assignee: String,
    pub name: String,
    pub position: String,
    pub start_date: NaiveDate,
    pub finish_date: NaiveDate,
    pub currency: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::time_sheets::Entity")]
    TimeSheets,
    #[sea_orm(
        belongs_to = "super::contracts::Entity",
        from = "Column::ContractId",
        to = "super::contracts::Column::Id",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    Contracts,
}

impl Related<super::time_sheets::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TimeSheets.def()
    }
}

impl Related<super::contracts::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Contracts.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<&CallOffOrder> for ActiveModel {
    fn from(value: &CallOffOrder) -> Self {
        Self {
            id: ActiveValue::Set(value.id.clone()),
            contract_id: ActiveValue::Set(value.contract_id.clone()),
            assignee: ActiveValue::Set(value.assignee.clone()),
            name: ActiveValue::Set(value.name.clone()),
            position: ActiveValue::Set(value.position.clone()),
            start_date: ActiveValue::Set(value.start_date),
            finish_date: ActiveValue::Set(value.finish_date),
            currency: ActiveValue::Set(value.currency.code().to_string()),
        }
    }
}

impl TryFrom<Model> for CallOffOrder {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            currency: Currency::try_from(model.currency.as_str())?,
            id: model.id,
            contract_id: model.contract_id,
            assignee: model.assignee,
            name: model.name,
            position: model.position,
            start_date: model.start_date,
            finish_date: model.finish_date,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn bounds_include_finish_day() {
        let order = CallOffOrder::new(
            "c1",
            "Ivanov I.I.",
            "Drilling supervision",
            "Engineer",
            date(2024, 1, 1),
            date(2024, 3, 31),
            Currency::try_from("RUR").unwrap(),
        )
        .unwrap();

        let bounds = order.bounds().unwrap();
        assert_eq!(bounds.start, date(2024, 1, 1));
        assert_eq!(bounds.end, date(2024, 4, 1));
    }

    #[test]
    #[should_panic(expected = "Validation")]
    fn finish_before_start_is_rejected() {
        CallOffOrder::new(
            "c1",
            "Ivanov I.I.",
            "Drilling supervision",
            "Engineer",
            date(2024, 3, 1),
            date(2024, 1, 1),
            Currency::try_from("RUR").unwrap(),
        )
        .unwrap();
    }
}
