use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter,
};

pub struct ProfileRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> ProfileRepository<'a, C> {
    /// Creates a new instance of [`ProfileRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Creates the profile of an account
    pub async fn create(
        &self,
        account_id: i32,
        bio: &str,
        avatar: &str,
    ) -> Result<entity::profile::Model, DbErr> {
        let profile = entity::profile::ActiveModel {
            account_id: ActiveValue::Set(account_id),
            bio: ActiveValue::Set(bio.to_string()),
            avatar: ActiveValue::Set(avatar.to_string()),
            updated_at: ActiveValue::Set(Utc::now().naive_utc()),
            ..Default::default()
        };

        profile.insert(self.db).await
    }

    /// Finds the profile belonging to an account
    pub async fn find_by_account_id(
        &self,
        account_id: i32,
    ) -> Result<Option<entity::profile::Model>, DbErr> {
        entity::prelude::Profile::find()
            .filter(entity::profile::Column::AccountId.eq(account_id))
            .one(self.db)
            .await
    }

    /// Writes bio and avatar of a profile and refreshes its `updated_at`
    ///
    /// Fails with [`DbErr::RecordNotUpdated`] if the profile no longer exists.
    pub async fn update(
        &self,
        profile: entity::profile::Model,
    ) -> Result<entity::profile::Model, DbErr> {
        let profile_am = entity::profile::ActiveModel {
            id: ActiveValue::Unchanged(profile.id),
            account_id: ActiveValue::Unchanged(profile.account_id),
            bio: ActiveValue::Set(profile.bio),
            avatar: ActiveValue::Set(profile.avatar),
            updated_at: ActiveValue::Set(Utc::now().naive_utc()),
        };

        profile_am.update(self.db).await
    }
}
