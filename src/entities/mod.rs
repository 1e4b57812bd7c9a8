//! Entity module - SeaORM entity definitions for the database.
//! `MealBuddy` keeps its whole state in a single key-value table.

pub mod storage_slot;

pub use storage_slot::{
    Column as StorageSlotColumn, Entity as StorageSlot, Model as StorageSlotModel,
};
