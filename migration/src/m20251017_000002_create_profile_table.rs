use sea_orm_migration::{prelude::*, schema::*};

use crate::m20251017_000001_create_account_table::Account;

static FK_PROFILE_ACCOUNT_ID: &str = "fk_profile_account_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Profile::Table)
                    .if_not_exists()
                    .col(pk_auto(Profile::Id))
                    .col(integer_uniq(Profile::AccountId))
                    .col(text(Profile::Bio).default(""))
                    .col(string(Profile::Avatar).default("profile_images/default.jpg"))
                    .col(timestamp(Profile::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_PROFILE_ACCOUNT_ID)
                    .from_tbl(Profile::Table)
                    .from_col(Profile::AccountId)
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
                    .name(FK_PROFILE_ACCOUNT_ID)
                    .table(Profile::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(Profile::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Profile {
    Table,
    Id,
    AccountId,
    Bio,
    Avatar,
    UpdatedAt,
}
