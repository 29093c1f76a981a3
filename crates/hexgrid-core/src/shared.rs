//! A thread-safe grid holder with optimistic updates and change observers.
//!
//! [`SharedGrid`] keeps the current version as a [`PersistentGrid`]
//! snapshot. Readers take a snapshot under a short lock and work on it
//! without blocking writers. Writers compute the next version off-lock from
//! the snapshot they read, then install it only if no other writer got in
//! first; otherwise they back off and recompute.
//!
//! Every installed version notifies subscribed observers once per changed
//! cell, after the version lock is released. Deliveries are serialized in
//! install order, so the last change an observer sees for a cell is that
//! cell's current state.

use crate::address::{Address, State};
use crate::error::GridError;
use crate::persistent::PersistentGrid;
use crate::rows::Cells;
use crate::shape::Shape;
use crate::state_map::{check_changes, StateMap};
use crate::traits::{write_cells, Grid, MutableGrid};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tracing::{trace, warn};

/// One cell's transition between two installed versions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CellChange {
    /// The cell that changed.
    pub address: Address,
    /// State before the update.
    pub old: State,
    /// State after the update.
    pub new: State,
}

/// Handle returned by [`SharedGrid::subscribe`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObserverId(u64);

/// How a writer waits after losing an install race.
///
/// The first `spin_attempts` retries only yield the thread. After that the
/// writer sleeps, starting at `initial_backoff` and doubling up to
/// `max_backoff`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Retries that yield instead of sleeping.
    pub spin_attempts: u32,
    /// First sleep after spinning.
    pub initial_backoff: Duration,
    /// Cap on any single sleep.
    pub max_backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            spin_attempts: 16,
            initial_backoff: Duration::from_micros(10),
            max_backoff: Duration::from_millis(1),
        }
    }
}

impl RetryPolicy {
    /// Delay before retry number `conflicts` (1-based), or `None` to yield.
    fn delay(&self, conflicts: u32) -> Option<Duration> {
        let over = conflicts.checked_sub(self.spin_attempts)?.checked_sub(1)?;
        let factor = 1u32 << over.min(16);
        Some(self.initial_backoff.saturating_mul(factor).min(self.max_backoff))
    }
}

type Observer = Arc<dyn Fn(&CellChange) + Send + Sync>;

struct Record {
    grid: PersistentGrid,
    modification: u64,
}

/// A grid that many threads read and update concurrently.
///
/// All updates are linearizable: each one is computed from the version it
/// replaces, so no update is lost, and a reader never sees a half-applied
/// batch.
///
/// # Examples
///
/// ```
/// use hexgrid_core::{Address, Grid, Shape, SharedGrid, State};
/// use std::sync::Arc;
///
/// let grid = Arc::new(SharedGrid::new(Shape::of(5, 5).unwrap()));
/// let workers: Vec<_> = [(0, 0), (2, 2), (4, 4)]
///     .into_iter()
///     .map(|(r, c)| {
///         let grid = Arc::clone(&grid);
///         std::thread::spawn(move || {
///             grid.set_state(Address::new(r, c), State::new(true, true)).unwrap();
///         })
///     })
///     .collect();
/// for w in workers {
///     w.join().unwrap();
/// }
/// assert_eq!(grid.states().filter(|s| s.is_selected).count(), 3);
/// ```
pub struct SharedGrid {
    shape: Shape,
    record: Mutex<Record>,
    observers: Mutex<Vec<(ObserverId, Observer)>>,
    // Taken before `record` is released, held while observers run.
    delivery: Mutex<()>,
    next_observer: AtomicU64,
    retry: RetryPolicy,
}

// Compile-time assertion: SharedGrid must be Send + Sync.
const _: fn() = || {
    fn assert<T: Send + Sync>() {}
    assert::<SharedGrid>();
};

impl SharedGrid {
    /// A shared grid with every cell at [`State::DEFAULT`].
    pub fn new(shape: Shape) -> Self {
        Self::from_snapshot(PersistentGrid::new(shape))
    }

    /// A shared grid initialized from `initial`; invalid keys are ignored.
    pub fn with_states(shape: Shape, initial: &StateMap) -> Self {
        Self::from_snapshot(PersistentGrid::with_states(shape, initial))
    }

    /// A shared grid whose cells come from `init`.
    pub fn with_init(shape: Shape, init: impl FnMut(Address) -> Option<State>) -> Self {
        Self::from_snapshot(PersistentGrid::with_init(shape, init))
    }

    /// A shared copy of any grid's shape and states.
    pub fn from_grid(grid: &dyn Grid) -> Self {
        Self::from_snapshot(PersistentGrid::from_grid(grid))
    }

    /// A shared grid starting at `snapshot`, with no observers.
    pub fn from_snapshot(snapshot: PersistentGrid) -> Self {
        Self {
            shape: *snapshot.shape(),
            record: Mutex::new(Record {
                grid: snapshot,
                modification: 0,
            }),
            observers: Mutex::new(Vec::new()),
            delivery: Mutex::new(()),
            next_observer: AtomicU64::new(0),
            retry: RetryPolicy::default(),
        }
    }

    /// Replace the retry policy.
    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// The retry policy in use.
    pub fn retry_policy(&self) -> &RetryPolicy {
        &self.retry
    }

    /// The current version.
    pub fn snapshot(&self) -> PersistentGrid {
        self.lock_record().grid.clone()
    }

    /// Number of versions installed since construction.
    pub fn modification_count(&self) -> u64 {
        self.lock_record().modification
    }

    /// Install `step(current)` as the new version, recomputing on conflict.
    ///
    /// `step` may run several times and should have no side effects. An
    /// error from `step` aborts the update and is returned unchanged. If
    /// `step` returns the snapshot it was given, nothing is installed and
    /// no observer runs. Returns the version this call installed or kept.
    pub fn update(
        &self,
        mut step: impl FnMut(&PersistentGrid) -> Result<PersistentGrid, GridError>,
    ) -> Result<PersistentGrid, GridError> {
        let mut conflicts = 0u32;
        loop {
            let (current, seen) = {
                let record = self.lock_record();
                (record.grid.clone(), record.modification)
            };
            let next = step(&current)?;
            if next.ptr_eq(&current) {
                return Ok(current);
            }
            if next.shape() != &self.shape {
                return Err(GridError::ShapeMismatch {
                    expected: self.shape,
                    found: *next.shape(),
                });
            }

            let delivery = {
                let mut record = self.lock_record();
                if record.modification == seen {
                    record.grid = next.clone();
                    record.modification += 1;
                    Some(self.lock_delivery())
                } else {
                    None
                }
            };
            if let Some(_turn) = delivery {
                self.notify(&current, &next);
                return Ok(next);
            }

            conflicts += 1;
            self.back_off(conflicts);
        }
    }

    /// Set one cell.
    ///
    /// Returns `Err(GridError::InvalidAddress)` before touching the grid if
    /// `address` is not valid.
    pub fn set_state(&self, address: Address, state: State) -> Result<(), GridError> {
        self.shape.check_address(address)?;
        self.update(|grid| grid.copy(address, state)).map(drop)
    }

    /// Apply a batch of changes as one version.
    ///
    /// An invalid key fails the whole batch before anything is applied.
    pub fn set_states(&self, changes: &StateMap) -> Result<(), GridError> {
        check_changes(&self.shape, changes)?;
        self.update(|grid| grid.copy_with(changes)).map(drop)
    }

    /// Flip the selection at `address` atomically, returning the new state.
    pub fn toggle_selection(&self, address: Address) -> Result<State, GridError> {
        self.shape.check_address(address)?;
        let next = self.update(|grid| {
            let current = grid.get(address)?;
            grid.copy(address, current.toggled_selection())
        })?;
        next.get(address)
    }

    /// Register `observer` for every future cell change.
    ///
    /// Observers run on the updating thread after the new version is
    /// visible, one installed version at a time in install order. They must
    /// not write to this grid, subscribe or unsubscribe from inside the
    /// callback.
    pub fn subscribe(&self, observer: impl Fn(&CellChange) + Send + Sync + 'static) -> ObserverId {
        let id = ObserverId(self.next_observer.fetch_add(1, Ordering::Relaxed));
        self.lock_observers().push((id, Arc::new(observer)));
        trace!(observer = id.0, "grid observer subscribed");
        id
    }

    /// Remove an observer. Returns `false` if it was not subscribed.
    pub fn unsubscribe(&self, id: ObserverId) -> bool {
        let mut observers = self.lock_observers();
        let before = observers.len();
        observers.retain(|(other, _)| *other != id);
        observers.len() != before
    }

    fn notify(&self, old: &PersistentGrid, new: &PersistentGrid) {
        let changes = old.diff(new);
        if changes.is_empty() {
            return;
        }
        // Snapshot the list so callbacks run without the observer lock.
        let observers: Vec<Observer> = self
            .lock_observers()
            .iter()
            .map(|(_, o)| Arc::clone(o))
            .collect();
        for change in &changes {
            for observer in &observers {
                observer(change);
            }
        }
    }

    fn back_off(&self, conflicts: u32) {
        match self.retry.delay(conflicts) {
            None => {
                trace!(conflicts, "shared grid write conflict, retrying");
                std::thread::yield_now();
            }
            Some(delay) => {
                if conflicts == self.retry.spin_attempts + 1 {
                    warn!(conflicts, "shared grid under heavy write contention, backing off");
                }
                std::thread::sleep(delay);
            }
        }
    }

    fn lock_record(&self) -> MutexGuard<'_, Record> {
        // A panicking observer never holds this lock, and a Record is
        // replaced whole, so a poisoned value is still consistent.
        self.record.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn lock_delivery(&self) -> MutexGuard<'_, ()> {
        self.delivery.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn lock_observers(&self) -> MutexGuard<'_, Vec<(ObserverId, Observer)>> {
        self.observers.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Grid for SharedGrid {
    fn shape(&self) -> &Shape {
        &self.shape
    }

    fn lookup(&self, row: i32, column: i32) -> Option<State> {
        self.snapshot().lookup(row, column)
    }

    /// Iterates one snapshot, so concurrent writers never tear the sequence.
    fn cells(&self) -> Cells<'_> {
        let snapshot = self.snapshot();
        let cells: Vec<_> = snapshot.cells().collect();
        let count = cells.len();
        Cells::new(cells.into_iter(), count)
    }

    fn for_each(&self, visit: &mut dyn FnMut(Address, State)) {
        self.snapshot().for_each(visit);
    }

    /// A new, unobserved holder starting from the copied snapshot.
    fn copy(&self, address: Address, state: State) -> Result<Self, GridError> {
        let next = self.snapshot().copy(address, state)?;
        Ok(Self::from_snapshot(next).with_retry_policy(self.retry.clone()))
    }

    /// A new, unobserved holder starting from the copied snapshot.
    fn copy_with(&self, changes: &StateMap) -> Result<Self, GridError> {
        let next = self.snapshot().copy_with(changes)?;
        Ok(Self::from_snapshot(next).with_retry_policy(self.retry.clone()))
    }
}

impl MutableGrid for SharedGrid {
    fn set(&mut self, address: Address, state: State) -> Result<(), GridError> {
        self.set_state(address, state)
    }

    fn set_all(&mut self, changes: &StateMap) -> Result<(), GridError> {
        self.set_states(changes)
    }

    fn toggle(&mut self, address: Address) -> Result<State, GridError> {
        self.toggle_selection(address)
    }
}

impl fmt::Debug for SharedGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let record = self.lock_record();
        f.debug_struct("SharedGrid")
            .field("shape", &self.shape)
            .field("modification", &record.modification)
            .field("observers", &self.lock_observers().len())
            .field("retry", &self.retry)
            .finish()
    }
}

impl fmt::Display for SharedGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_cells(&self.snapshot(), f)
    }
}
