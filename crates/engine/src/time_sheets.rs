//! Time sheets: monthly billing documents generated for a request, one per
//! call-off order and billing period.

use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::{ActiveValue, entity::prelude::*};
use serde::Serialize;

use crate::{Currency, CurrencyAmount, EngineError, Period, Status};

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeSheet {
    pub id: String,
    pub call_off_order_id: String,
    pub request_id: String,
    pub period: Period,
    pub amount: f64,
    /// Always the currency of the call-off order.
    pub currency: Currency,
    pub status: Status,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TimeSheet {
    /// The time sheet as a monetary document.
    pub fn priced(&self) -> CurrencyAmount {
        CurrencyAmount::new(self.currency.clone(), self.amount)
    }
}

/// Data needed to create a time sheet. New time sheets are `Empty` and
/// carry no amount.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewTimeSheet {
    pub call_off_order_id: String,
    pub request_id: String,
    pub period: Period,
    pub currency: Currency,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "time_sheets")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub call_off_order_id: String,
    pub request_id: String,
    pub period_start: NaiveDate,
    pub period_end: NaiveDate,
    pub amount: f64,
    pub currency: String,
    pub status: String,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::call_off_orders::Entity",
        from = "Column::CallOffOrderId",
        to = "super::call_off_orders::Column::Id",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    CallOffOrders,
}

impl Related<super::call_off_orders::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CallOffOrders.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<&TimeSheet> for ActiveModel {
    fn from(value: &TimeSheet) -> Self {
        Self {
            id: ActiveValue::Set(value.id.clone()),
            call_off_order_id: ActiveValue::Set(value.call_off_order_id.clone()),
            request_id: ActiveValue::Set(value.request_id.clone()),
            period_start: ActiveValue::Set(value.period.start),
            period_end: ActiveValue::Set(value.period.end),
            amount: ActiveValue::Set(value.amount),
            currency: ActiveValue::Set(value.currency.code().to_string()),
            status: ActiveValue::Set(value.status.as_str().to_string()),
            created_at: ActiveValue::Set(value.created_at),
            updated_at: ActiveValue::Set(value.updated_at),
        }
    }
}

impl TryFrom<Model> for TimeSheet {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            period: Period::new(model.period_start, model.period_end)?,
            currency: Currency::try_from(model.currency.as_str())?,
            status: Status::try_from(model.status.as_str())?,
            id: model.id,
            call_off_order_id: model.call_off_order_id,
            request_id: model.request_id,
            amount: model.amount,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}
