// SPDX-License-Identifier: MIT OR Apache-2.0

//! Game events and the notifications derived from them.
//!
//! The engine never delivers anything. It reports what happened as
//! [`GameEvent`]s, and [`Notification::for_transition`] turns an accepted
//! operation into the message the other player should receive. Delivery is
//! up to whatever implements [`Notifier`].

use crate::game::Transition;
use crate::{Color, Coord, Move};
use serde::{Deserialize, Serialize};

/// Game events emitted during play
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A stone was placed, or a player passed or resigned
    MoveMade {
        /// The move that was made
        mv: Move,
        /// The player who made the move
        by: Color,
        /// Move number after the move
        move_number: u32,
    },
    /// Stones were captured
    StonesCaptured {
        /// The number of stones captured
        count: u32,
        /// The coordinates of captured stones
        positions: Vec<Coord>,
        /// The player who lost the stones
        player: Color,
    },
    /// Groups adjacent to the last stone were left with one liberty
    Atari {
        /// One per adjacent direction, so a group touched twice counts twice
        count: u32,
        /// The player whose stones are in atari
        player: Color,
    },
    /// Both players passed; territory has been marked automatically
    ScoringStarted {
        /// Initial scoring number
        scoring_number: u32,
    },
    /// A group was marked dead or alive
    StonesMarked {
        /// The player who marked the stones
        by: Color,
        /// New owner of the stones; `Color::None` means alive
        owner: Color,
        /// Every stone whose owner changed
        stones: Vec<Coord>,
        /// Scoring number after the change
        scoring_number: u32,
        /// The opponent had agreed to the previous score
        opponent_was_done: bool,
    },
    /// A player agreed to the current score
    DoneScoring {
        /// The player who agreed
        by: Color,
        /// Scoring number agreed to
        scoring_number: u32,
    },
    /// The game is finished
    GameFinished {
        /// The winner
        winner: Color,
        /// Black's total when the game was scored
        black_score: Option<f32>,
        /// White's total when the game was scored
        white_score: Option<f32>,
    },
}

/// What a notification is about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NotificationKind {
    /// The recipient is to move
    YourTurn,
    /// Both players passed and scoring begins
    ScoringStarted,
    /// The opponent agreed to the score
    OpponentDoneScoring,
    /// The opponent changed the board after the recipient agreed
    NoLongerDone,
    /// The game ended
    GameOver,
}

/// A message for one player, ready to hand to a delivery channel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    /// Who should receive it
    pub recipient: Color,
    /// What it is about
    pub kind: NotificationKind,
    /// The last-move message of the new state
    pub message: String,
    /// Live move number
    pub move_number: u32,
    /// Live scoring number, when scoring
    pub scoring_number: Option<u32>,
}

impl Notification {
    /// Build the notification for the opponent of `actor`, if the transition
    /// warrants one.
    ///
    /// Marking stones only notifies an opponent who had already agreed to
    /// the score, since their agreement was just withdrawn.
    pub fn for_transition(transition: &Transition, actor: Color) -> Option<Self> {
        let state = transition.state();
        let mut kind = None;
        for event in &transition.events {
            let next = match event {
                GameEvent::GameFinished { .. } => Some(NotificationKind::GameOver),
                GameEvent::ScoringStarted { .. } => Some(NotificationKind::ScoringStarted),
                GameEvent::DoneScoring { .. } => Some(NotificationKind::OpponentDoneScoring),
                GameEvent::StonesMarked {
                    opponent_was_done: true,
                    ..
                } => Some(NotificationKind::NoLongerDone),
                GameEvent::MoveMade { .. } => Some(NotificationKind::YourTurn),
                _ => None,
            };
            // Later events win, except that nothing overrides the game ending
            if kind != Some(NotificationKind::GameOver) {
                kind = next.or(kind);
            }
        }

        kind.map(|kind| Notification {
            recipient: actor.opposite(),
            kind,
            message: state.last_move_message().to_string(),
            move_number: state.move_number(),
            scoring_number: state.scoring_number(),
        })
    }

    /// One-line summary, naming the opponent
    pub fn subject(&self, opponent_name: &str) -> String {
        match self.kind {
            NotificationKind::YourTurn => format!(
                "[GO - Move #{}] It's your turn against {}",
                self.move_number, opponent_name
            ),
            _ => format!("[GO - Scoring] Scoring against {}", opponent_name),
        }
    }

    /// Message body, naming the opponent
    pub fn body(&self, opponent_name: &str) -> String {
        match self.kind {
            NotificationKind::YourTurn if self.message == "It's your turn to move." => {
                format!("It's your turn to make a move against {}.", opponent_name)
            }
            NotificationKind::YourTurn | NotificationKind::ScoringStarted => self.message.clone(),
            NotificationKind::OpponentDoneScoring => format!(
                "{} has finished scoring; you should do the same.",
                opponent_name
            ),
            NotificationKind::NoLongerDone => format!(
                "{} has continued scoring; you are no longer finished.",
                opponent_name
            ),
            NotificationKind::GameOver => "The game is over!".to_string(),
        }
    }
}

/// Delivery channel for notifications (email, chat, console...).
///
/// Delivery is fire-and-forget: failures are the implementation's concern.
pub trait Notifier {
    /// Deliver a notification
    fn notify(&self, notification: &Notification);
}
