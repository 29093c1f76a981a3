//! Ordered state maps for batch changes and initial states.

use crate::address::{Address, State};
use crate::error::GridError;
use crate::shape::Shape;
use indexmap::IndexMap;

/// Address-to-state changes, applied in insertion order.
pub type StateMap = IndexMap<Address, State>;

/// Cooperative builder for a [`StateMap`].
///
/// Every command starts from the state already recorded for an address, or
/// [`State::DEFAULT`], so an address can be both selected and hidden.
///
/// # Examples
///
/// ```
/// use hexgrid_core::{build_state_map, Address, State};
///
/// let map = build_state_map(|b| {
///     let a = b.at(0, 0);
///     b.select([a, b.at(1, 1)]);
///     b.hide([a]);
/// });
/// assert_eq!(map[&Address::new(0, 0)], State::new(false, true));
/// assert_eq!(map[&Address::new(1, 1)], State::new(true, true));
/// ```
#[derive(Clone, Debug, Default)]
pub struct StateMapBuilder {
    map: StateMap,
}

impl StateMapBuilder {
    /// An empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark each address selected.
    pub fn select(&mut self, addresses: impl IntoIterator<Item = Address>) -> &mut Self {
        for address in addresses {
            let state = self.map.entry(address).or_default();
            *state = state.with_selected(true);
        }
        self
    }

    /// Mark each address hidden.
    pub fn hide(&mut self, addresses: impl IntoIterator<Item = Address>) -> &mut Self {
        for address in addresses {
            let state = self.map.entry(address).or_default();
            *state = state.with_visible(false);
        }
        self
    }

    /// Record an explicit state, replacing anything recorded so far.
    pub fn put(&mut self, address: Address, state: State) -> &mut Self {
        self.map.insert(address, state);
        self
    }

    /// Shorthand for [`Address::new`].
    pub fn at(&self, row: i32, column: i32) -> Address {
        Address::new(row, column)
    }

    /// Finish building.
    pub fn build(self) -> StateMap {
        self.map
    }
}

/// Build a [`StateMap`] inside a closure. See [`StateMapBuilder`].
pub fn build_state_map(block: impl FnOnce(&mut StateMapBuilder)) -> StateMap {
    let mut builder = StateMapBuilder::new();
    block(&mut builder);
    builder.build()
}

/// Validate every key of a change set before anything is applied.
pub(crate) fn check_changes(shape: &Shape, changes: &StateMap) -> Result<(), GridError> {
    changes
        .keys()
        .try_for_each(|address| shape.check_address(*address))
}
