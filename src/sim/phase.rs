//! Game phase state machine
//!
//! Phases change only through the transitions below. Requests that don't
//! match one are rejected with [`TransitionError`].

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen, waiting for start
    #[default]
    Idle,
    /// Active gameplay
    Running,
    /// Frozen by the player
    Paused,
    /// Score went negative
    GameOver,
    /// Victory wall reached
    Victory,
}

impl GamePhase {
    /// Whether the per-frame simulation runs in this phase
    pub fn simulates(self) -> bool {
        self == GamePhase::Running
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, GamePhase::GameOver | GamePhase::Victory)
    }
}

/// Phase change requests, external and internal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Start,
    Pause,
    Resume,
    Restart,
    NextLevel,
    ContinueAfterPenalty,
    Underflow,
    ReachWall,
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Intent::Start => "start",
            Intent::Pause => "pause",
            Intent::Resume => "resume",
            Intent::Restart => "restart",
            Intent::NextLevel => "next level",
            Intent::ContinueAfterPenalty => "continue after penalty",
            Intent::Underflow => "score underflow",
            Intent::ReachWall => "victory wall contact",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TransitionError {
    #[error("cannot {intent} while {from:?}")]
    Illegal { from: GamePhase, intent: Intent },
}

/// Target phase for `intent` from `from`, if the transition is legal
pub fn transition(from: GamePhase, intent: Intent) -> Result<GamePhase, TransitionError> {
    use GamePhase::*;
    let to = match (from, intent) {
        (Idle, Intent::Start) => Running,
        (Running, Intent::Pause) => Paused,
        (Paused, Intent::Resume) => Running,
        (Running, Intent::Underflow) => GameOver,
        (Running, Intent::ReachWall) => Victory,
        (GameOver, Intent::Restart) => Running,
        (GameOver, Intent::ContinueAfterPenalty) => Running,
        (Victory, Intent::NextLevel) => Running,
        _ => return Err(TransitionError::Illegal { from, intent }),
    };
    Ok(to)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_happy_path() {
        let mut phase = GamePhase::default();
        for intent in [Intent::Start, Intent::Pause, Intent::Resume, Intent::Underflow, Intent::Restart] {
            phase = transition(phase, intent).expect("legal");
        }
        assert_eq!(phase, GamePhase::Running);
        phase = transition(phase, Intent::ReachWall).expect("legal");
        assert_eq!(phase, GamePhase::Victory);
        assert_eq!(transition(phase, Intent::NextLevel), Ok(GamePhase::Running));
    }

    #[test]
    fn test_pause_rejected_after_run_ends() {
        for from in [GamePhase::GameOver, GamePhase::Victory, GamePhase::Idle] {
            let err = transition(from, Intent::Pause).unwrap_err();
            assert_eq!(err, TransitionError::Illegal { from, intent: Intent::Pause });
        }
        let err = transition(GamePhase::Victory, Intent::Pause).unwrap_err();
        assert_eq!(err.to_string(), "cannot pause while Victory");
    }

    #[test]
    fn test_only_running_simulates() {
        assert!(GamePhase::Running.simulates());
        for phase in [GamePhase::Idle, GamePhase::Paused, GamePhase::GameOver, GamePhase::Victory] {
            assert!(!phase.simulates());
        }
    }

    #[test]
    fn test_restart_only_from_game_over() {
        assert!(transition(GamePhase::Running, Intent::Restart).is_err());
        assert!(transition(GamePhase::Victory, Intent::Restart).is_err());
        assert!(transition(GamePhase::GameOver, Intent::NextLevel).is_err());
    }
}
