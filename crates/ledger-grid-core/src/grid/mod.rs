//! The grid facade (UI-agnostic).

mod autofill;
mod gestures;
mod ops;
mod state;
mod transfer;
mod view;

#[cfg(test)]
mod fixtures;

pub use state::Grid;
