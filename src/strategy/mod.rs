//! Row addition and deletion strategies.
//!
//! Strategies are stateless: each call receives the `TableControl` it acts
//! on, mutates the model through it and rebuilds the page. Which addition
//! strategy applies depends on the kind of cell that owns the displayed
//! table; see [`addition_strategy_for`].

mod addition;
mod deletion;

pub use addition::{
    addition_strategy_for, ListRowAddition, NullableRowAddition, RowAddition, RowAdditionStrategy,
};
pub use deletion::{RowDeletionStrategy, SelectionRowDeletion};
