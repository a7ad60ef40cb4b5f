//! Hardwood Game Engine
//!
//! Platform-agnostic core game logic for the Hardwood basketball career sim.
//! This crate provides all game mechanics without UI or platform-specific dependencies.

pub mod career;
pub mod data;
pub mod error;
pub mod events;
pub mod legacy;
pub mod performance;
pub mod progression;
pub mod roles;
pub mod schedule;
pub mod state;
pub mod stats;
pub mod traits;

// Re-export commonly used types
pub use career::{CareerSession, Messages, TurnOutcome};
pub use data::{Choice, ChoiceEffects, EventCategory, EventCondition, EventData, GameEvent, StatCost};
pub use error::EngineError;
pub use legacy::{RetirementSummary, career_payout, finalize_retirement};
pub use performance::{GameStatLine, GameSummary, game_impact_score, simulate_game};
pub use progression::{ProgressionOutcome, evaluate_progression, performance_score};
pub use roles::{GameMode, Position, TIER_COUNT, base_minutes, role_multiplier, role_name};
pub use schedule::{
    ScheduleError, ScheduleSlot, SeasonSchedule, SlotType, generate_schedule,
};
pub use state::{GamePhase, Player, SaveData, seed_bytes};
pub use stats::{StatKey, Stats, training_gain};
pub use traits::{TraitCatalog, TraitDef, TraitKind, TraitLevel};

/// Trait for abstracting data loading operations
/// Platform-specific implementations should provide this
pub trait DataLoader {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Load the event catalog from the platform-specific source
    ///
    /// # Errors
    ///
    /// Returns an error if the event catalog cannot be loaded.
    fn load_event_data(&self) -> Result<EventData, Self::Error>;

    /// Load configuration data for a specific system
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be loaded or parsed.
    fn load_config<T>(&self, config_name: &str) -> Result<T, Self::Error>
    where
        T: serde::de::DeserializeOwned;
}

/// Trait for abstracting save/load operations
/// Platform-specific implementations should provide this
pub trait GameStorage {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Save a career snapshot
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot cannot be saved.
    fn save_game(&self, save_name: &str, save: &SaveData) -> Result<(), Self::Error>;

    /// Load a career snapshot
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot cannot be loaded.
    fn load_game(&self, save_name: &str) -> Result<Option<SaveData>, Self::Error>;

    /// Delete a saved career
    ///
    /// # Errors
    ///
    /// Returns an error if the save cannot be deleted.
    fn delete_save(&self, save_name: &str) -> Result<(), Self::Error>;
}

/// Main game engine for managing career instances
pub struct GameEngine<L, S>
where
    L: DataLoader,
    S: GameStorage,
{
    data_loader: L,
    storage: S,
}

impl<L, S> GameEngine<L, S>
where
    L: DataLoader,
    S: GameStorage,
{
    /// Create a new game engine with the provided data loader and storage
    pub const fn new(data_loader: L, storage: S) -> Self {
        Self {
            data_loader,
            storage,
        }
    }

    /// Start a new career with the specified identity, seed, and banked meta
    /// points.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Persistence`] when the event catalog cannot be
    /// loaded, or [`EngineError::ScheduleGeneration`] when the opening season
    /// cannot be built.
    pub fn new_career(
        &self,
        name: &str,
        position: Position,
        seed: u64,
        meta_points: i64,
    ) -> Result<CareerSession, EngineError> {
        let data = self
            .data_loader
            .load_event_data()
            .map_err(|e| EngineError::Persistence(e.to_string()))?;
        CareerSession::new(name, position, seed, meta_points, data)
    }

    /// Save a career snapshot
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Persistence`] if the storage backend fails.
    pub fn save_career(&self, save_name: &str, session: &CareerSession) -> Result<(), EngineError> {
        self.storage
            .save_game(save_name, &session.save_data())
            .map_err(|e| EngineError::Persistence(e.to_string()))
    }

    /// Load a career, rehydrating the random source and regenerating the
    /// active event from the restored player.
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot or the event catalog cannot be
    /// loaded.
    pub fn load_career(&self, save_name: &str) -> Result<Option<CareerSession>, anyhow::Error>
    where
        L::Error: Into<anyhow::Error>,
        S::Error: Into<anyhow::Error>,
    {
        if let Some(save) = self.storage.load_game(save_name).map_err(Into::into)? {
            // Rehydrate with fresh catalog data
            let data = self.data_loader.load_event_data().map_err(Into::into)?;
            Ok(Some(CareerSession::from_save(save, data)))
        } else {
            Ok(None)
        }
    }

    /// Delete a saved career
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Persistence`] if the storage backend fails.
    pub fn delete_save(&self, save_name: &str) -> Result<(), EngineError> {
        self.storage
            .delete_save(save_name)
            .map_err(|e| EngineError::Persistence(e.to_string()))
    }
}
