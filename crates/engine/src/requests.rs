//! Requests: payment-approval documents composed of call-off orders.

use chrono::{DateTime, Utc};
use sea_orm::{ActiveValue, entity::prelude::*};
use serde::Serialize;

use crate::{EngineError, Status};

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Request {
    pub id: String,
    /// Changes on every persisted write.
    pub rev_id: String,
    pub contract_id: String,
    pub call_off_order_ids: Vec<String>,
    pub status: Status,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "requests")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub rev_id: String,
    pub contract_id: String,
    /// JSON array of call-off order ids, in composition order.
    #[sea_orm(column_type = "Text")]
    pub call_off_order_ids: String,
    pub status: String,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl TryFrom<&Request> for ActiveModel {
    type Error = EngineError;

    fn try_from(request: &Request) -> Result<Self, Self::Error> {
        Ok(Self {
            id: ActiveValue::Set(request.id.clone()),
            rev_id: ActiveValue::Set(request.rev_id.clone()),
            contract_id: ActiveValue::Set(request.contract_id.clone()),
            call_off_order_ids: ActiveValue::Set(serde_json::to_string(
                &request.call_off_order_ids,
            )?),
            status: ActiveValue::Set(request.status.as_str().to_string()),
            created_at: ActiveValue::Set(request.created_at),
            updated_at: ActiveValue::Set(request.updated_at),
        })
    }
}

impl TryFrom<Model> for Request {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: model.id,
            rev_id: model.rev_id,
            contract_id: model.contract_id,
            call_off_order_ids: serde_json::from_str(&model.call_off_order_ids)?,
            status: Status::try_from(model.status.as_str())?,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}
