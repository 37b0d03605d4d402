//! Board state and the mutations applied to it

mod action;
mod mv;
mod state;

pub use action::BoardAction;
pub use mv::{Location, MoveGesture, MoveOutcome};
pub use state::{BoardState, Column};
