//! ═══════════════════════════════════════════════════════════════════════════════
//! FILE: lib.rs | src/lib.rs
//! PURPOSE: Parametric laser-cut box geometry engine
//! LAYER: boxen (root)
//! ═══════════════════════════════════════════════════════════════════════════════
//!
//! Boxen derives the flat, finger-jointed 2D panels of a laser-cut box from a
//! parametric description: outer dimensions, material thickness, per-face
//! open/solid state, lid insets, axis-aligned interior subdivisions, edge
//! extensions, corner fillets/chamfers, and panel cutouts.
//!
//! ┌─────────────────────────────────────────────────────────────────────────────┐
//! │ ARCHITECTURE                                                                │
//! ├─────────────────────────────────────────────────────────────────────────────┤
//! │                                                                             │
//! │   command (Workspace, Action)                                              │
//! │       │  dispatch / preview / undo-redo                                    │
//! │       ▼                                                                     │
//! │   tree (Scene → Assembly → Void → SubAssembly)                             │
//! │       │  bounds propagation, subdivision, derive_panels()                  │
//! │       ├── finger      (AssemblyFingerData - shared tab/slot anchors)       │
//! │       ├── gender      (per-edge male/female/none resolution)               │
//! │       ├── panel       (outline builder: fingers, feet, extensions)         │
//! │       ├── holes       (divider slots, cross-lap notches, terminating)      │
//! │       ├── fillet      (corner eligibility + fillet/chamfer rewriting)      │
//! │       ├── cutout       (user holes + safe-space validation)                │
//! │       └── joint       (mating edge-pair discovery + alignment checks)      │
//! │       ▼                                                                     │
//! │   snapshot (SceneSnapshot/AssemblySnapshot/PanelSnapshot - read-only view)  │
//! │       │                                                                     │
//! │       ├── template    (parameterized action-sequence replay)               │
//! │       └── sharelink   (ProjectState serde codec, canonical-key rebind)     │
//! │                                                                             │
//! └─────────────────────────────────────────────────────────────────────────────┘
//!
//! DEPENDS ON:
//!   • glam       → 2D vector math for panel-local coordinates
//!   • serde/json → snapshot, config, and share-link (de)serialization
//!
//! No CLI, environment, or on-disk formats live in this crate: it is an
//! in-process library. File I/O, URL-state glue, and the 3D/2D rendering
//! layers are external collaborators that consume [`snapshot::SceneSnapshot`].
//! ═══════════════════════════════════════════════════════════════════════════════

pub mod command;
pub mod constants;
pub mod cutout;
pub mod error;
pub mod fillet;
pub mod finger;
pub mod gender;
pub mod geometry;
pub mod holes;
pub mod joint;
pub mod material;
pub mod panel;
pub mod sharelink;
pub mod snapshot;
pub mod template;
pub mod tree;
pub mod validator;

pub use command::{Action, Workspace};
pub use error::{BoxenError, BoxenWarning, Diagnostics};
pub use material::{Axis, EdgePosition, FaceId, Gender, LidSide, MaterialConfig};
pub use snapshot::SceneSnapshot;
pub use tree::Scene;
