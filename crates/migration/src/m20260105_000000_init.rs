//! Initial schema migration - creates all tables from scratch.
//!
//! - `users`: authentication and the administrator capability
//! - `contracts`: contracts requests are billed against
//! - `contract_amounts`: contracted amount per currency
//! - `call_off_orders`: work orders with their date bounds
//! - `requests`: payment-approval documents
//! - `time_sheets`: monthly billing documents generated for requests
//!
//! `time_sheets.request_id` is not a foreign key. The engine deletes a
//! request's time sheets before the request itself.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

// ─────────────────────────────────────────────────────────────────────────────
// Table identifiers
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Iden)]
enum Users {
    Table,
    Username,
    Password,
    IsAdmin,
}

#[derive(Iden)]
enum Contracts {
    Table,
    Id,
    Number,
    ContractorName,
    VatIncluded,
}

#[derive(Iden)]
enum ContractAmounts {
    Table,
    Id,
    ContractId,
    Currency,
    Amount,
}

#[derive(Iden)]
enum CallOffOrders {
    Table,
    Id,
    ContractId,
    Assignee,
    Name,
    Position,
    StartDate,
    FinishDate,
    Currency,
}

#[derive(Iden)]
enum Requests {
    Table,
    Id,
    RevId,
    ContractId,
    CallOffOrderIds,
    Status,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum TimeSheets {
    Table,
    Id,
    CallOffOrderId,
    RequestId,
    PeriodStart,
    PeriodEnd,
    Amount,
    Currency,
    Status,
    CreatedAt,
    UpdatedAt,
}

// ─────────────────────────────────────────────────────────────────────────────
// Migration implementation
// ─────────────────────────────────────────────────────────────────────────────

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // ───────────────────────────────────────────────────────────────────
        // 1. Users
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Users::Username)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Users::Password).string().not_null())
                    .col(
                        ColumnDef::new(Users::IsAdmin)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 2. Contracts
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(Contracts::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Contracts::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Contracts::Number).string().not_null())
                    .col(
                        ColumnDef::new(Contracts::ContractorName)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Contracts::VatIncluded)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .to_owned(),
            )
            .await?;

        // No uniqueness on (contract_id, currency): a duplicated currency is a
        // configuration error the engine reports instead of hiding.
        manager
            .create_table(
                Table::create()
                    .table(ContractAmounts::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ContractAmounts::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(ContractAmounts::ContractId)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(ContractAmounts::Currency).string().not_null())
                    .col(ColumnDef::new(ContractAmounts::Amount).double().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-contract_amounts-contract_id")
                            .from(ContractAmounts::Table, ContractAmounts::ContractId)
                            .to(Contracts::Table, Contracts::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 3. Call-off orders
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(CallOffOrders::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CallOffOrders::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(CallOffOrders::ContractId).string().not_null())
                    .col(ColumnDef::new(CallOffOrders::Assignee).string().not_null())
                    .col(ColumnDef::new(CallOffOrders::Name).string().not_null())
                    .col(ColumnDef::new(CallOffOrders::Position).string().not_null())
                    .col(ColumnDef::new(CallOffOrders::StartDate).date().not_null())
                    .col(ColumnDef::new(CallOffOrders::FinishDate).date().not_null())
                    .col(ColumnDef::new(CallOffOrders::Currency).string().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-call_off_orders-contract_id")
                            .from(CallOffOrders::Table, CallOffOrders::ContractId)
                            .to(Contracts::Table, Contracts::Id),
                    )
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 4. Requests
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(Requests::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Requests::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Requests::RevId).string().not_null())
                    .col(ColumnDef::new(Requests::ContractId).string().not_null())
                    .col(
                        ColumnDef::new(Requests::CallOffOrderIds)
                            .text()
                            .not_null()
                            .default("[]"),
                    )
                    .col(ColumnDef::new(Requests::Status).string().not_null())
                    .col(ColumnDef::new(Requests::CreatedAt).timestamp().not_null())
                    .col(ColumnDef::new(Requests::UpdatedAt).timestamp().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-requests-contract_id")
                    .table(Requests::Table)
                    .col(Requests::ContractId)
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 5. Time sheets
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(TimeSheets::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(TimeSheets::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(TimeSheets::CallOffOrderId)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(TimeSheets::RequestId).string().not_null())
                    .col(ColumnDef::new(TimeSheets::PeriodStart).date().not_null())
                    .col(ColumnDef::new(TimeSheets::PeriodEnd).date().not_null())
                    .col(
                        ColumnDef::new(TimeSheets::Amount)
                            .double()
                            .not_null()
                            .default(0.0),
                    )
                    .col(ColumnDef::new(TimeSheets::Currency).string().not_null())
                    .col(ColumnDef::new(TimeSheets::Status).string().not_null())
                    .col(ColumnDef::new(TimeSheets::CreatedAt).timestamp().not_null())
                    .col(ColumnDef::new(TimeSheets::UpdatedAt).timestamp().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-time_sheets-call_off_order_id-period_start")
                    .table(TimeSheets::Table)
                    .col(TimeSheets::CallOffOrderId)
                    .col(TimeSheets::PeriodStart)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-time_sheets-request_id")
                    .table(TimeSheets::Table)
                    .col(TimeSheets::RequestId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(TimeSheets::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Requests::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(CallOffOrders::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ContractAmounts::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Contracts::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await?;
        Ok(())
    }
}
