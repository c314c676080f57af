//! ledger_grid_engine - addressing, numbers, formulas and fill patterns for
//! the ledger grid. Nothing in this crate holds grid state.

pub mod engine;
