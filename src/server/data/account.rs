use chrono::Utc;
use sea_orm::{
    sea_query::{Expr, ExprTrait, Func},
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait,
    IntoActiveModel, PaginatorTrait, QueryFilter,
};

pub struct AccountRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> AccountRepository<'a, C> {
    /// Creates a new instance of [`AccountRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Creates a new account
    pub async fn create(
        &self,
        username: &str,
        email: &str,
        password_hash: &str,
    ) -> Result<entity::account::Model, DbErr> {
        let now = Utc::now().naive_utc();

        let account = entity::account::ActiveModel {
            username: ActiveValue::Set(username.to_string()),
            email: ActiveValue::Set(email.to_string()),
            password_hash: ActiveValue::Set(password_hash.to_string()),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        };

        account.insert(self.db).await
    }

    pub async fn get(&self, account_id: i32) -> Result<Option<entity::account::Model>, DbErr> {
        entity::prelude::Account::find_by_id(account_id)
            .one(self.db)
            .await
    }

    /// Finds an account by exact username, as used for login
    pub async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<entity::account::Model>, DbErr> {
        entity::prelude::Account::find()
            .filter(entity::account::Column::Username.eq(username))
            .one(self.db)
            .await
    }

    /// Finds an account by email address, ignoring case
    pub async fn find_by_email(
        &self,
        email: &str,
    ) -> Result<Option<entity::account::Model>, DbErr> {
        entity::prelude::Account::find()
            .filter(
                Expr::expr(Func::lower(Expr::col(entity::account::Column::Email)))
                    .eq(email.to_lowercase()),
            )
            .one(self.db)
            .await
    }

    /// Returns true if another account already uses the username, ignoring case
    ///
    /// `exclude_account_id` skips the account being edited so it does not conflict with itself.
    pub async fn username_taken(
        &self,
        username: &str,
        exclude_account_id: Option<i32>,
    ) -> Result<bool, DbErr> {
        let mut query = entity::prelude::Account::find().filter(
            Expr::expr(Func::lower(Expr::col(entity::account::Column::Username)))
                .eq(username.to_lowercase()),
        );

        if let Some(account_id) = exclude_account_id {
            query = query.filter(entity::account::Column::Id.ne(account_id));
        }

        Ok(query.count(self.db).await? > 0)
    }

    /// Returns true if another account already uses the email address, ignoring case
    pub async fn email_taken(
        &self,
        email: &str,
        exclude_account_id: Option<i32>,
    ) -> Result<bool, DbErr> {
        let mut query = entity::prelude::Account::find().filter(
            Expr::expr(Func::lower(Expr::col(entity::account::Column::Email)))
                .eq(email.to_lowercase()),
        );

        if let Some(account_id) = exclude_account_id {
            query = query.filter(entity::account::Column::Id.ne(account_id));
        }

        Ok(query.count(self.db).await? > 0)
    }

    /// Updates username and email of an account
    ///
    /// Returns `Ok(None)` if the account does not exist.
    pub async fn update_identity(
        &self,
        account_id: i32,
        username: &str,
        email: &str,
    ) -> Result<Option<entity::account::Model>, DbErr> {
        let Some(account) = self.get(account_id).await? else {
            return Ok(None);
        };

        let mut account_am = account.into_active_model();
        account_am.username = ActiveValue::Set(username.to_string());
        account_am.email = ActiveValue::Set(email.to_string());
        account_am.updated_at = ActiveValue::Set(Utc::now().naive_utc());

        Ok(Some(account_am.update(self.db).await?))
    }

    /// Replaces the stored password hash of an account
    ///
    /// Returns `Ok(None)` if the account does not exist.
    pub async fn update_password_hash(
        &self,
        account_id: i32,
        password_hash: &str,
    ) -> Result<Option<entity::account::Model>, DbErr> {
        let Some(account) = self.get(account_id).await? else {
            return Ok(None);
        };

        let mut account_am = account.into_active_model();
        account_am.password_hash = ActiveValue::Set(password_hash.to_string());
        account_am.updated_at = ActiveValue::Set(Utc::now().naive_utc());

        Ok(Some(account_am.update(self.db).await?))
    }
}
