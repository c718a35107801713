//! Initial schema.
//!
//! Creates the customers and bank_accounts tables. Deleting a customer removes
//! its bank accounts.

use sea_orm_migration::prelude::*;
use sea_orm_migration::schema::{boolean, integer, pk_auto, string, string_len};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Customers::Table)
                    .if_not_exists()
                    .col(pk_auto(Customers::Id))
                    .col(string(Customers::FirstName))
                    .col(string(Customers::LastName))
                    .col(string(Customers::Ssn))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_customers_ssn")
                    .table(Customers::Table)
                    .col(Customers::Ssn)
                    .unique()
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(BankAccounts::Table)
                    .if_not_exists()
                    .col(pk_auto(BankAccounts::Id))
                    .col(integer(BankAccounts::CustomerId))
                    .col(string_len(BankAccounts::AccountNumber, 11))
                    .col(string_len(BankAccounts::AccountType, 16))
                    .col(string(BankAccounts::AccountName))
                    .col(string_len(BankAccounts::Currency, 3))
                    .col(boolean(BankAccounts::IsPreferred).default(false))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_bank_accounts_customer")
                            .from(BankAccounts::Table, BankAccounts::CustomerId)
                            .to(Customers::Table, Customers::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_bank_accounts_customer")
                    .table(BankAccounts::Table)
                    .col(BankAccounts::CustomerId)
                    .if_not_exists()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(BankAccounts::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Customers::Table).if_exists().to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Customers {
    Table,
    Id,
    FirstName,
    LastName,
    Ssn,
}

#[derive(DeriveIden)]
enum BankAccounts {
    Table,
    Id,
    CustomerId,
    AccountNumber,
    AccountType,
    AccountName,
    Currency,
    IsPreferred,
}
