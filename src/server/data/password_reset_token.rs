use chrono::{NaiveDateTime, Utc};
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ActiveValue, ColumnTrait, Condition, ConnectionTrait,
    DbErr, EntityTrait, QueryFilter,
};

pub struct PasswordResetTokenRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> PasswordResetTokenRepository<'a, C> {
    /// Creates a new instance of [`PasswordResetTokenRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Stores the hash of a freshly issued reset token
    pub async fn create(
        &self,
        account_id: i32,
        token_hash: &str,
        expires_at: NaiveDateTime,
    ) -> Result<entity::password_reset_token::Model, DbErr> {
        let token = entity::password_reset_token::ActiveModel {
            account_id: ActiveValue::Set(account_id),
            token_hash: ActiveValue::Set(token_hash.to_string()),
            expires_at: ActiveValue::Set(expires_at),
            used_at: ActiveValue::Set(None),
            created_at: ActiveValue::Set(Utc::now().naive_utc()),
            ..Default::default()
        };

        token.insert(self.db).await
    }

    pub async fn find_by_token_hash(
        &self,
        token_hash: &str,
    ) -> Result<Option<entity::password_reset_token::Model>, DbErr> {
        entity::prelude::PasswordResetToken::find()
            .filter(entity::password_reset_token::Column::TokenHash.eq(token_hash))
            .one(self.db)
            .await
    }

    /// Spends a token if it is still unused and unexpired
    ///
    /// The check and the update are a single conditional `UPDATE`, so of two concurrent
    /// callers at most one sees a row affected.
    ///
    /// # Returns
    /// - `Ok(true)` - Token was valid and is now marked used
    /// - `Ok(false)` - Token unknown, already used or expired
    pub async fn consume(&self, token_hash: &str) -> Result<bool, DbErr> {
        let now = Utc::now().naive_utc();

        let result = entity::prelude::PasswordResetToken::update_many()
            .col_expr(
                entity::password_reset_token::Column::UsedAt,
                Expr::value(Some(now)),
            )
            .filter(entity::password_reset_token::Column::TokenHash.eq(token_hash))
            .filter(entity::password_reset_token::Column::UsedAt.is_null())
            .filter(entity::password_reset_token::Column::ExpiresAt.gt(now))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected == 1)
    }

    /// Marks every unused token of an account as used
    ///
    /// Returns the number of tokens invalidated.
    pub async fn invalidate_for_account(&self, account_id: i32) -> Result<u64, DbErr> {
        let result = entity::prelude::PasswordResetToken::update_many()
            .col_expr(
                entity::password_reset_token::Column::UsedAt,
                Expr::value(Some(Utc::now().naive_utc())),
            )
            .filter(entity::password_reset_token::Column::AccountId.eq(account_id))
            .filter(entity::password_reset_token::Column::UsedAt.is_null())
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }

    /// Deletes every token that is used or expired, for any account
    ///
    /// Returns the number of tokens deleted.
    pub async fn delete_stale(&self) -> Result<u64, DbErr> {
        let now = Utc::now().naive_utc();

        let result = entity::prelude::PasswordResetToken::delete_many()
            .filter(
                Condition::any()
                    .add(entity::password_reset_token::Column::UsedAt.is_not_null())
                    .add(entity::password_reset_token::Column::ExpiresAt.lte(now)),
            )
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }
}
