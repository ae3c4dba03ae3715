//! Tag registry shared by all flows.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "tags")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub tag: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::flows_tags::Entity")]
    FlowsTags,
}

impl Related<super::flows_tags::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::FlowsTags.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
