//! Ошибки player model
//!
//! Большинство отказов НЕ ошибки: отклонённый переход состояния, полный hotbar,
//! занятый lock — тихо игнорируются (debug log). Здесь только то, что требует
//! внимания разработчика или вызывающего кода.

use bevy::prelude::Entity;
use thiserror::Error;

use crate::logger::{log_error, log_warning};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlayerError {
    /// Сырое значение состояния вне закрытого множества MovementState
    #[error("movement state index {0} is outside the known set")]
    UnknownMovementState(u8),

    /// Target entity не реализует нужную capability (Interactable, Item)
    #[error("entity {entity:?} lacks required capability `{capability}`")]
    MissingCapability {
        entity: Entity,
        capability: &'static str,
    },

    #[error("hotbar slot {index} is out of range (slot count {count})")]
    SlotOutOfRange { index: usize, count: usize },
}

impl PlayerError {
    /// Fatal = programmer error (broken content/wiring), не пользовательский ввод
    pub fn is_fatal(&self) -> bool {
        match self {
            PlayerError::UnknownMovementState(_) => true,
            PlayerError::MissingCapability { .. } => true,
            PlayerError::SlotOutOfRange { .. } => false,
        }
    }
}

pub type PlayerResult<T> = std::result::Result<T, PlayerError>;

/// Ошибки загрузки/валидации `PlayerConfig`
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Сообщить об ошибке операции.
///
/// Fatal → `log_error` + panic в debug сборке (операция прерывается до
/// частичной записи состояния). В release только log, операция отбрасывается.
/// Recoverable → `log_warning`.
pub fn escalate(err: PlayerError) {
    if !err.is_fatal() {
        log_warning(&format!("⚠️ {}", err));
        return;
    }

    log_error(&format!("❌ {}", err));

    if cfg!(debug_assertions) {
        panic!("fatal player error: {}", err);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fatality_classification() {
        assert!(PlayerError::UnknownMovementState(9).is_fatal());
        assert!(PlayerError::MissingCapability {
            entity: Entity::PLACEHOLDER,
            capability: "Interactable",
        }
        .is_fatal());
        assert!(!PlayerError::SlotOutOfRange { index: 7, count: 4 }.is_fatal());
    }

    #[test]
    fn test_recoverable_error_does_not_panic() {
        escalate(PlayerError::SlotOutOfRange { index: 7, count: 4 });
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "fatal player error")]
    fn test_fatal_error_panics_in_debug() {
        escalate(PlayerError::UnknownMovementState(42));
    }

    #[test]
    fn test_error_messages() {
        let err = PlayerError::SlotOutOfRange { index: 5, count: 4 };
        assert_eq!(err.to_string(), "hotbar slot 5 is out of range (slot count 4)");
    }
}
