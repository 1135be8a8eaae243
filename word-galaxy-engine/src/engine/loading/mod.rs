//! Startup loading of the optional static word collection.
//!
//! The app stays in `AppState::Loading` until the snapshot is applied, fails
//! or turns out not to be configured.

/// Guest galaxy snapshot asset and the Loading → Running transition.
pub mod snapshot_loader;
