//! Application state store - the single owner of menu, selections and activity log.
//!
//! `MealState` holds the collections and implements the state transitions without
//! touching storage. `StateStore` wraps it together with a database connection and
//! persists the full snapshot after every mutation.
//!
//! Mutations trust their callers: publishing expects a non-empty meal list and
//! recording a selection expects a non-empty name and exactly four meal ids. Those
//! checks live in [`crate::core::validation`] and run before the store is touched.

use crate::{
    core::{
        model::{ActivityLog, DailyMenu, LogCategory, Meal, Selection, new_id},
        ranking::{self, MealCount, SelectionSummary},
        storage::{self, LOGS_SLOT, MENU_SLOT, SELECTIONS_SLOT},
    },
    errors::Result,
};
use chrono::{Local, Utc};
use sea_orm::DatabaseConnection;
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

/// Maximum number of activity log entries kept.
pub const ACTIVITY_LOG_CAPACITY: usize = 100;

/// Actor recorded for menu uploads and clears.
pub const ADMIN_ACTOR: &str = "Admin";

/// In-memory snapshot of everything the tracker knows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MealState {
    /// Menu in force, if any
    pub menu: Option<DailyMenu>,
    /// Every selection made against the current menu, oldest first
    pub selections: Vec<Selection>,
    /// Activity log, newest first, at most [`ACTIVITY_LOG_CAPACITY`] entries
    pub logs: Vec<ActivityLog>,
}

impl MealState {
    /// Replaces the menu and discards every selection made against the old one.
    pub fn publish_menu(&mut self, meals: Vec<Meal>) -> DailyMenu {
        let count = meals.len();
        let menu = DailyMenu {
            id: new_id("menu"),
            date: Local::now().date_naive(),
            meals,
            uploaded_at: Utc::now(),
        };

        self.menu = Some(menu.clone());
        self.selections.clear();
        self.append_log(
            LogCategory::Upload,
            format!("Uploaded a new menu with {count} items."),
            ADMIN_ACTOR,
        );

        menu
    }

    /// Appends a selection to the history.
    pub fn record_selection(&mut self, user_name: String, meal_ids: Vec<String>) -> Selection {
        let message = format!("{user_name} selected {} meals.", meal_ids.len());
        let selection = Selection {
            id: new_id("sel"),
            user_name,
            meal_ids,
            timestamp: Utc::now(),
        };

        self.selections.push(selection.clone());
        let actor = selection.user_name.clone();
        self.append_log(LogCategory::Selection, message, &actor);

        selection
    }

    /// Removes the menu and all selections. The activity log is kept.
    pub fn clear_all(&mut self) {
        self.menu = None;
        self.selections.clear();
        self.append_log(LogCategory::Deletion, "Cleared all data.".to_string(), ADMIN_ACTOR);
    }

    fn append_log(&mut self, category: LogCategory, message: String, actor: &str) {
        let entry = ActivityLog {
            id: new_id("log"),
            category,
            message,
            actor: actor.to_string(),
            timestamp: Utc::now(),
        };
        self.logs.insert(0, entry);
        self.logs.truncate(ACTIVITY_LOG_CAPACITY);
    }
}

/// Reads the persisted snapshot.
///
/// Never fails: a slot that is missing, unreadable or does not deserialize loads as
/// its empty default, independently of the other slots.
pub async fn load_state(db: &DatabaseConnection) -> MealState {
    let menu: Option<DailyMenu> = load_slot(db, MENU_SLOT).await;
    let selections: Vec<Selection> = load_slot(db, SELECTIONS_SLOT).await;
    let mut logs: Vec<ActivityLog> = load_slot(db, LOGS_SLOT).await;
    logs.truncate(ACTIVITY_LOG_CAPACITY);

    info!(
        "Loaded state: menu {}, {} selections, {} log entries",
        if menu.is_some() { "present" } else { "absent" },
        selections.len(),
        logs.len()
    );

    MealState {
        menu,
        selections,
        logs,
    }
}

async fn load_slot<T>(db: &DatabaseConnection, key: &str) -> T
where
    T: DeserializeOwned + Default,
{
    let raw = match storage::read_slot(db, key).await {
        Ok(Some(raw)) => raw,
        Ok(None) => {
            debug!("Slot {key} has never been written");
            return T::default();
        }
        Err(e) => {
            warn!("Failed to read slot {key}, starting empty: {e}");
            return T::default();
        }
    };

    serde_json::from_str(&raw).unwrap_or_else(|e| {
        warn!("Slot {key} is corrupt, starting empty: {e}");
        T::default()
    })
}

/// State store bound to its durable storage.
pub struct StateStore {
    db: DatabaseConnection,
    state: MealState,
}

impl StateStore {
    /// Opens the store, loading whatever state was persisted before.
    pub async fn open(db: DatabaseConnection) -> Self {
        let state = load_state(&db).await;
        Self { db, state }
    }

    /// Full in-memory snapshot.
    #[must_use]
    pub const fn state(&self) -> &MealState {
        &self.state
    }

    /// Current menu, if one is published.
    #[must_use]
    pub const fn menu(&self) -> Option<&DailyMenu> {
        self.state.menu.as_ref()
    }

    /// Selections recorded against the current menu.
    #[must_use]
    pub fn selections(&self) -> &[Selection] {
        &self.state.selections
    }

    /// Activity log entries, newest first.
    #[must_use]
    pub fn logs(&self) -> &[ActivityLog] {
        &self.state.logs
    }

    /// Popularity ranking derived from the current menu and selections.
    #[must_use]
    pub fn rankings(&self) -> Vec<MealCount> {
        ranking::rank_meals(self.state.menu.as_ref(), &self.state.selections)
    }

    /// Ranking plus order totals, with the `top_n` most picked meals split out.
    #[must_use]
    pub fn summary(&self, top_n: usize) -> SelectionSummary {
        ranking::summarize(self.state.menu.as_ref(), &self.state.selections, top_n)
    }

    /// Publishes a new menu, clearing all selections, and persists.
    pub async fn publish_menu(&mut self, meals: Vec<Meal>) -> Result<DailyMenu> {
        let menu = self.state.publish_menu(meals);
        info!("Published menu {} with {} meals", menu.id, menu.meals.len());
        self.persist().await?;
        Ok(menu)
    }

    /// Records a selection and persists.
    pub async fn record_selection(
        &mut self,
        user_name: String,
        meal_ids: Vec<String>,
    ) -> Result<Selection> {
        let selection = self.state.record_selection(user_name, meal_ids);
        info!("Recorded selection {} for {}", selection.id, selection.user_name);
        self.persist().await?;
        Ok(selection)
    }

    /// Clears menu and selections and persists.
    pub async fn clear_all(&mut self) -> Result<()> {
        self.state.clear_all();
        info!("Cleared menu and selections");
        self.persist().await
    }

    async fn persist(&self) -> Result<()> {
        let slots = vec![
            (MENU_SLOT, serde_json::to_string(&self.state.menu)?),
            (SELECTIONS_SLOT, serde_json::to_string(&self.state.selections)?),
            (LOGS_SLOT, serde_json::to_string(&self.state.logs)?),
        ];
        storage::write_slots(&self.db, slots).await
    }
}
