//! Core business logic - framework-agnostic menu, selection and statistics operations.

/// Gemini implementation of the menu parser
pub mod gemini;
/// Menu ingestion contract and conversion of parsed items into meals
pub mod ingestion;
/// Domain entities and identifier generation
pub mod model;
/// Popularity ranking of menu meals
pub mod ranking;
/// Text rendering of rankings, menus and logs
pub mod report;
/// The state store: menu, selections and activity log
pub mod state;
/// Durable slot storage
pub mod storage;
/// Input validation ahead of store mutations
pub mod validation;
