//! Turn phase state machine.
//!
//! ```text
//! AwaitingPlayerInput -> ResolvingPlayerAction -> ResolvingSummonActions
//!     -> ResolvingMonsterActions -> ResolvingBuffDecay -> AwaitingPlayerInput
//! ```
//!
//! `GameOver` is terminal and entered from `ResolvingPlayerAction` or
//! `ResolvingMonsterActions` when the player's hp reaches 0.

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum TurnPhase {
    #[default]
    AwaitingPlayerInput,
    ResolvingPlayerAction,
    ResolvingSummonActions,
    ResolvingMonsterActions,
    ResolvingBuffDecay,
    GameOver,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[error("invalid phase transition {from:?} -> {to:?}")]
pub struct PhaseTransitionError {
    pub from: TurnPhase,
    pub to: TurnPhase,
}

impl TurnPhase {
    pub fn is_terminal(self) -> bool {
        self == TurnPhase::GameOver
    }

    pub fn can_transition_to(self, next: TurnPhase) -> bool {
        use TurnPhase::*;
        matches!(
            (self, next),
            (AwaitingPlayerInput, ResolvingPlayerAction)
                | (ResolvingPlayerAction, AwaitingPlayerInput)
                | (ResolvingPlayerAction, ResolvingSummonActions)
                | (ResolvingPlayerAction, ResolvingBuffDecay)
                | (ResolvingPlayerAction, GameOver)
                | (ResolvingSummonActions, ResolvingMonsterActions)
                | (ResolvingMonsterActions, ResolvingBuffDecay)
                | (ResolvingMonsterActions, GameOver)
                | (ResolvingBuffDecay, AwaitingPlayerInput)
        )
    }

    pub fn transition(self, next: TurnPhase) -> Result<TurnPhase, PhaseTransitionError> {
        if self.can_transition_to(next) {
            Ok(next)
        } else {
            Err(PhaseTransitionError {
                from: self,
                to: next,
            })
        }
    }
}
