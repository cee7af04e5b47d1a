use sea_orm_migration::{prelude::*, schema::*};

use crate::m20251017_000001_create_account_table::Account;

static IDX_PASSWORD_RESET_TOKEN_ACCOUNT_ID: &str = "idx_password_reset_token_account_id";
static FK_PASSWORD_RESET_TOKEN_ACCOUNT_ID: &str = "fk_password_reset_token_account_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(PasswordResetToken::Table)
                    .if_not_exists()
                    .col(pk_auto(PasswordResetToken::Id))
                    .col(integer(PasswordResetToken::AccountId))
                    .col(string_uniq(PasswordResetToken::TokenHash))
                    .col(timestamp(PasswordResetToken::ExpiresAt))
                    .col(timestamp_null(PasswordResetToken::UsedAt))
                    .col(timestamp(PasswordResetToken::CreatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_PASSWORD_RESET_TOKEN_ACCOUNT_ID)
                    .table(PasswordResetToken::Table)
                    .col(PasswordResetToken::AccountId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_PASSWORD_RESET_TOKEN_ACCOUNT_ID)
                    .from_tbl(PasswordResetToken::Table)
                    .from_col(PasswordResetToken::AccountId)
                    .to_tbl(Account::Table)
                    .to_col(Account::Id)
                    .on_delete(ForeignKeyAction::Cascade)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_foreign_key(
                ForeignKey::drop()
                    .name(FK_PASSWORD_RESET_TOKEN_ACCOUNT_ID)
                    .table(PasswordResetToken::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name(IDX_PASSWORD_RESET_TOKEN_ACCOUNT_ID)
                    .table(PasswordResetToken::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(PasswordResetToken::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum PasswordResetToken {
    Table,
    Id,
    AccountId,
    TokenHash,
    ExpiresAt,
    UsedAt,
    CreatedAt,
}
