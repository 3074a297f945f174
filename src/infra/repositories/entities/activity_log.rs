//! SeaORM entity for the `activity_log` table.
//!
//! `order_id` is a weak reference on purpose: the referenced order may
//! be deleted later, so there is no foreign key and the display fields
//! `order_ref` / `customer_ref` carry denormalized snapshots.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "activity_log")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub actor_id: Uuid,
    pub action: String,
    pub description: String,
    pub order_id: Option<Uuid>,
    pub order_ref: Option<String>,
    pub customer_ref: Option<String>,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for crate::domain::ActivityLogEntry {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            actor_id: model.actor_id,
            action: model.action,
            description: model.description,
            order_id: model.order_id,
            order_ref: model.order_ref,
            customer_ref: model.customer_ref,
            created_at: model.created_at,
        }
    }
}
