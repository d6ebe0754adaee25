//! sea-orm implementation of the engine stores.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder, QuerySelect, TransactionTrait,
};
use uuid::Uuid;

use crate::{
    CallOffOrder, Contract, EngineError, NewTimeSheet, Request, ResultEngine, Status, TimeSheet,
    call_off_orders, contract_amounts, contracts, requests,
    store::{CallOffOrderStore, ContractStore, RequestStore, TimeSheetStore},
    time_sheets,
};

/// All engine stores backed by one database connection.
#[derive(Clone, Debug)]
pub struct SqlStore {
    database: DatabaseConnection,
}

impl SqlStore {
    pub fn new(database: DatabaseConnection) -> Self {
        Self { database }
    }

    /// Register a contract with its per-currency amounts.
    pub async fn insert_contract(&self, contract: &Contract) -> ResultEngine<()> {
        let db_tx = self.database.begin().await?;
        contracts::ActiveModel::from(contract).insert(&db_tx).await?;
        for amount in &contract.amounts {
            contract_amounts::ActiveModel::for_contract(&contract.id, amount)
                .insert(&db_tx)
                .await?;
        }
        db_tx.commit().await?;
        Ok(())
    }

    /// Register a call-off order. Its contract must exist.
    pub async fn insert_call_off_order(&self, order: &CallOffOrder) -> ResultEngine<()> {
        call_off_orders::ActiveModel::from(order)
            .insert(&self.database)
            .await?;
        Ok(())
    }
}

fn not_updated(err: DbErr, label: &str, id: &str) -> EngineError {
    match err {
        DbErr::RecordNotUpdated => EngineError::NotFound(format!("{label} {id}")),
        other => EngineError::Database(other),
    }
}

#[async_trait]
impl RequestStore for SqlStore {
    async fn get(&self, id: &str) -> ResultEngine<Option<Request>> {
        requests::Entity::find_by_id(id.to_string())
            .one(&self.database)
            .await?
            .map(Request::try_from)
            .transpose()
    }

    async fn create(
        &self,
        contract_id: &str,
        call_off_order_ids: &[String],
    ) -> ResultEngine<String> {
        let now = Utc::now();
        let request = Request {
            id: Uuid::new_v4().to_string(),
            rev_id: Uuid::new_v4().to_string(),
            contract_id: contract_id.to_string(),
            call_off_order_ids: call_off_order_ids.to_vec(),
            status: Status::Empty,
            created_at: now,
            updated_at: now,
        };
        requests::ActiveModel::try_from(&request)?
            .insert(&self.database)
            .await?;
        Ok(request.id)
    }

    async fn update(&self, request: &Request) -> ResultEngine<()> {
        let mut model = requests::ActiveModel::try_from(request)?;
        model.rev_id = ActiveValue::Set(Uuid::new_v4().to_string());
        model.updated_at = ActiveValue::Set(Utc::now());
        model
            .update(&self.database)
            .await
            .map_err(|err| not_updated(err, "request", &request.id))?;
        Ok(())
    }

    async fn delete(&self, id: &str) -> ResultEngine<()> {
        let result = requests::Entity::delete_by_id(id.to_string())
            .exec(&self.database)
            .await?;
        if result.rows_affected == 0 {
            return Err(EngineError::NotFound(format!("request {id}")));
        }
        Ok(())
    }

    async fn list_all(&self) -> ResultEngine<Vec<Request>> {
        requests::Entity::find()
            .order_by_desc(requests::Column::CreatedAt)
            .all(&self.database)
            .await?
            .into_iter()
            .map(Request::try_from)
            .collect()
    }

    async fn list_by_contract(&self, contract_id: &str) -> ResultEngine<Vec<Request>> {
        requests::Entity::find()
            .filter(requests::Column::ContractId.eq(contract_id))
            .order_by_desc(requests::Column::CreatedAt)
            .all(&self.database)
            .await?
            .into_iter()
            .map(Request::try_from)
            .collect()
    }
}

#[async_trait]
impl TimeSheetStore for SqlStore {
    async fn get(&self, id: &str) -> ResultEngine<Option<TimeSheet>> {
        time_sheets::Entity::find_by_id(id.to_string())
            .one(&self.database)
            .await?
            .map(TimeSheet::try_from)
            .transpose()
    }

    async fn create(&self, new: &NewTimeSheet) -> ResultEngine<String> {
        let now = Utc::now();
        let time_sheet = TimeSheet {
            id: Uuid::new_v4().to_string(),
            call_off_order_id: new.call_off_order_id.clone(),
            request_id: new.request_id.clone(),
            period: new.period,
            amount: 0.0,
            currency: new.currency.clone(),
            status: Status::Empty,
            created_at: now,
            updated_at: now,
        };
        time_sheets::ActiveModel::from(&time_sheet)
            .insert(&self.database)
            .await?;
        Ok(time_sheet.id)
    }

    async fn update(&self, time_sheet: &TimeSheet) -> ResultEngine<()> {
        let mut model = time_sheets::ActiveModel::from(time_sheet);
        model.updated_at = ActiveValue::Set(Utc::now());
        model
            .update(&self.database)
            .await
            .map_err(|err| not_updated(err, "time sheet", &time_sheet.id))?;
        Ok(())
    }

    async fn delete(&self, id: &str) -> ResultEngine<()> {
        let result = time_sheets::Entity::delete_by_id(id.to_string())
            .exec(&self.database)
            .await?;
        if result.rows_affected == 0 {
            return Err(EngineError::NotFound(format!("time sheet {id}")));
        }
        Ok(())
    }

    async fn get_by_call_off_order_and_request(
        &self,
        call_off_order_id: &str,
        request_id: &str,
    ) -> ResultEngine<Option<TimeSheet>> {
        time_sheets::Entity::find()
            .filter(time_sheets::Column::CallOffOrderId.eq(call_off_order_id))
            .filter(time_sheets::Column::RequestId.eq(request_id))
            .order_by_asc(time_sheets::Column::PeriodStart)
            .one(&self.database)
            .await?
            .map(TimeSheet::try_from)
            .transpose()
    }

    async fn ids_by_request(&self, request_id: &str) -> ResultEngine<Vec<String>> {
        let ids = time_sheets::Entity::find()
            .select_only()
            .column(time_sheets::Column::Id)
            .filter(time_sheets::Column::RequestId.eq(request_id))
            .order_by_asc(time_sheets::Column::PeriodStart)
            .into_tuple::<String>()
            .all(&self.database)
            .await?;
        Ok(ids)
    }

    async fn get_by_request(&self, request_id: &str) -> ResultEngine<Vec<TimeSheet>> {
        time_sheets::Entity::find()
            .filter(time_sheets::Column::RequestId.eq(request_id))
            .order_by_asc(time_sheets::Column::PeriodStart)
            .all(&self.database)
            .await?
            .into_iter()
            .map(TimeSheet::try_from)
            .collect()
    }

    async fn get_by_call_off_order(
        &self,
        call_off_order_id: &str,
    ) -> ResultEngine<Vec<TimeSheet>> {
        time_sheets::Entity::find()
            .filter(time_sheets::Column::CallOffOrderId.eq(call_off_order_id))
            .order_by_asc(time_sheets::Column::PeriodStart)
            .all(&self.database)
            .await?
            .into_iter()
            .map(TimeSheet::try_from)
            .collect()
    }
}

#[async_trait]
impl CallOffOrderStore for SqlStore {
    async fn get(&self, id: &str) -> ResultEngine<Option<CallOffOrder>> {
        call_off_orders::Entity::find_by_id(id.to_string())
            .one(&self.database)
            .await?
            .map(CallOffOrder::try_from)
            .transpose()
    }
}

#[async_trait]
impl ContractStore for SqlStore {
    async fn get(&self, id: &str) -> ResultEngine<Option<Contract>> {
        let Some(model) = contracts::Entity::find_by_id(id.to_string())
            .one(&self.database)
            .await?
        else {
            return Ok(None);
        };
        let amounts = contract_amounts::Entity::find()
            .filter(contract_amounts::Column::ContractId.eq(id))
            .order_by_asc(contract_amounts::Column::Id)
            .all(&self.database)
            .await?;
        Contract::try_from((model, amounts)).map(Some)
    }
}
