//! User interaction with the galaxy.
//!
//! ## Selection
//!
//! Labels carry pointer observers. A press on a label stops propagation and
//! engages `LabelPointerGuard`, so dragging from a word never orbits the
//! camera. A primary click triggers `LabelActivated` on the label entity:
//!
//! ```text
//! Pointer<Click> on label
//!   └─> LabelActivated (entity-targeted)
//!       └─> dispatch_label_activation()
//!           ├─> SelectionDispatcher callback (synchronous, full item)
//!           └─> WordSelected event → `word_selected` RPC notification
//! ```
//!
//! ## Cross-Platform Considerations
//!
//! Native builds map `R` to a camera reset and `Escape` to clearing the
//! component filter. WASM builds have no shortcuts; the host page calls
//! `reset_camera` and `clear_component_filter` over JSON-RPC instead.

/// Label pointer observers, the selection callback holder and selection events.
pub mod selection;

/// Native keyboard shortcuts (no-op for WASM).
pub mod shortcuts;
