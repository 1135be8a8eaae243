//! JSON-RPC 2.0 communication layer for host page integration.
//!
//! Implements bidirectional messaging between the Bevy engine and the page
//! embedding it via `postMessage`, supporting both request-response and
//! notification patterns.
//!
//! ## Message Flow
//!
//! ```text
//! Host page (parent window)  <──postMessage──>  Bevy (iframe / canvas)
//!        │                                        │
//!        ├─ Request (with ID) ──────────────────> │
//!        │                                        ├─ GalaxyControl call
//!        │ <───────────────── Response (with ID) ─┤
//!        │                                        │
//!        │ <────────── Notification (no ID) ─────┤
//! ```
//!
//! Requests without an ID are executed but never answered.
//!
//! ## Error Handling
//!
//! Standard JSON-RPC 2.0 error codes:
//! - `-32600`: Invalid request
//! - `-32601`: Method not found
//! - `-32602`: Invalid params (including unknown filter tokens and malformed words)
//! - `-32603`: Internal error
//!
//! ## Methods
//!
//! ### Data
//! - `update_data`: Replace the word collection (`{ words: [...] }`)
//! - `get_clusters`: Distinct clusters with display labels, first-seen order
//! - `get_label_stats`: Visible and total word counts from the last sync
//!
//! ### Filters
//! - `apply_filters`: `{ cluster, type, addDate, reviewDate, srsLevel, search, component? }`;
//!   an omitted `component` keeps the current drill-down token, `null` clears it
//! - `set_component_filter`: Drill down to words sharing a component
//! - `clear_component_filter`: Drop the drill-down token
//!
//! ### Camera
//! - `reset_camera`: Animate back to the home pose
//!
//! ### Diagnostics
//! - `get_fps`: Retrieve current frame rate
//!
//! ## Notifications
//!
//! `word_selected`, `labels_synced`, `clusters_updated`, `camera_reset_completed`,
//! `fps_update` and `debug_message`.

/// JSON-RPC 2.0 bidirectional communication system for host page integration.
///
/// Handles request-response patterns, notifications, and WASM message listeners.
pub mod web_rpc;
