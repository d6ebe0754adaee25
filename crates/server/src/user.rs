//! The module contains the definition of an API user.

use engine::Actor;
use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub username: String,
    pub password: String,
    pub is_admin: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// The engine caller acting as this user.
    pub fn actor(&self) -> Actor {
        Actor {
            user_id: self.username.clone(),
            is_admin: self.is_admin,
        }
    }
}
