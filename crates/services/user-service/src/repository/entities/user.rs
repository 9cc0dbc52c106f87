//! User database entity for SeaORM.

use sea_orm::entity::prelude::*;

use domain::{User, UserId};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub birthday: Option<Date>,
    #[sea_orm(unique)]
    pub login: String,
    /// Argon2 PHC string
    pub password: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Convert database model to domain entity.
///
/// The credential is carried over as stored; callers mask it before it
/// leaves the service.
impl From<Model> for User {
    fn from(model: Model) -> Self {
        User {
            // BIGSERIAL never hands out negative ids
            id: model.id as UserId,
            first_name: model.first_name,
            last_name: model.last_name,
            birthday: model.birthday,
            login: model.login,
            password: model.password,
        }
    }
}
