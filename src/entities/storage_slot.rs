//! Storage slot entity - One row per persisted state collection.
//! The current menu, the selection history and the activity log are each
//! stored whole as a JSON document under their own key.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Storage slot database model - a key holding one serialized snapshot
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "storage_slots")]
pub struct Model {
    /// Slot key (e.g., `"meal_tracker_menu"`)
    #[sea_orm(primary_key, auto_increment = false)]
    pub key: String,
    /// Serialized JSON snapshot of the slot's collection
    #[sea_orm(column_type = "Text")]
    pub value: String,
    /// When this slot was last written
    pub updated_at: DateTime,
}

/// `StorageSlot` has no relationships with other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
