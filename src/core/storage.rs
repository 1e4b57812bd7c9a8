//! Durable slot storage.
//!
//! State is kept in three independently addressable slots of the `storage_slots`
//! table. A slot is always read and written whole; there is no field-level update.

use crate::{
    entities::{StorageSlot, storage_slot},
    errors::Result,
};
use chrono::Utc;
use sea_orm::{Set, TransactionTrait, prelude::*};
use tracing::trace;

/// Slot holding the current menu (or `null`).
pub const MENU_SLOT: &str = "meal_tracker_menu";
/// Slot holding the selection history.
pub const SELECTIONS_SLOT: &str = "meal_tracker_selections";
/// Slot holding the activity log.
pub const LOGS_SLOT: &str = "meal_tracker_logs";

/// Reads the raw contents of a slot.
///
/// # Returns
/// * `Ok(Some(value))` - The slot has been written before
/// * `Ok(None)` - The slot has never been written
pub async fn read_slot<C>(db: &C, key: &str) -> Result<Option<String>>
where
    C: ConnectionTrait,
{
    let slot = StorageSlot::find_by_id(key.to_string()).one(db).await?;
    Ok(slot.map(|s| s.value))
}

/// Replaces the contents of a slot, creating it if needed.
pub async fn write_slot<C>(db: &C, key: &str, value: String) -> Result<()>
where
    C: ConnectionTrait,
{
    let now = Utc::now().naive_utc();
    trace!("Writing {} bytes to slot {key}", value.len());

    let existing = StorageSlot::find_by_id(key.to_string()).one(db).await?;

    if let Some(slot) = existing {
        let mut active_model: storage_slot::ActiveModel = slot.into();
        active_model.value = Set(value);
        active_model.updated_at = Set(now);
        active_model.update(db).await?;
    } else {
        let new_slot = storage_slot::ActiveModel {
            key: Set(key.to_string()),
            value: Set(value),
            updated_at: Set(now),
        };
        new_slot.insert(db).await?;
    }

    Ok(())
}

/// Writes several slots in one database transaction; either all are replaced or none.
pub async fn write_slots(db: &DatabaseConnection, slots: Vec<(&str, String)>) -> Result<()> {
    let txn = db.begin().await?;
    for (key, value) in slots {
        write_slot(&txn, key, value).await?;
    }
    txn.commit().await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::setup_test_db;

    #[tokio::test]
    async fn test_read_missing_slot() -> Result<()> {
        let db = setup_test_db().await?;
        assert_eq!(read_slot(&db, MENU_SLOT).await?, None);
        Ok(())
    }

    #[tokio::test]
    async fn test_write_then_read_slot() -> Result<()> {
        let db = setup_test_db().await?;
        write_slot(&db, LOGS_SLOT, "[]".to_string()).await?;
        assert_eq!(read_slot(&db, LOGS_SLOT).await?.as_deref(), Some("[]"));
        Ok(())
    }

    #[tokio::test]
    async fn test_write_slot_overwrites_whole_value() -> Result<()> {
        let db = setup_test_db().await?;
        write_slot(&db, SELECTIONS_SLOT, "[1,2,3]".to_string()).await?;
        write_slot(&db, SELECTIONS_SLOT, "[]".to_string()).await?;

        assert_eq!(read_slot(&db, SELECTIONS_SLOT).await?.as_deref(), Some("[]"));
        assert_eq!(StorageSlot::find().all(&db).await?.len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_write_slots_writes_every_slot() -> Result<()> {
        let db = setup_test_db().await?;
        write_slots(
            &db,
            vec![
                (MENU_SLOT, "null".to_string()),
                (SELECTIONS_SLOT, "[]".to_string()),
                (LOGS_SLOT, "[]".to_string()),
            ],
        )
        .await?;

        assert_eq!(read_slot(&db, MENU_SLOT).await?.as_deref(), Some("null"));
        assert_eq!(StorageSlot::find().all(&db).await?.len(), 3);
        Ok(())
    }
}
