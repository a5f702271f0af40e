//! Session layer: coordinator state, crop dragging, debounced estimation.
//!
//! Everything the host UI talks to lives here. The session owns the
//! mutable workspace state and snapshots it into the pure planner/engine
//! on each run; the drag controller turns pointer events into crop edits;
//! the estimator debounces size estimation and guards against stale
//! results.
//!
//! # Components
//!
//! - [`SlicerSession`]: explicit top-level state struct and run/estimate
//!   entry points
//! - [`DragController`] / [`Handle`] / [`DragState`]: crop handle state
//!   machine
//! - [`DebouncedEstimator`]: debounce + generation-counter staleness guard

mod drag;
mod estimator;
mod state;

pub use drag::{DragController, DragState, Handle, MIN_HANDLE_GAP};
pub use estimator::{DebouncedEstimator, ESTIMATE_DEBOUNCE};
pub use state::{SlicerSession, DEFAULT_SLICE_HEIGHT};
