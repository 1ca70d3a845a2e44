//! slate shell core
//!
//! Everything written once and shared by every backend:
//!
//! - **Layout contract**: the trait the external layout engine is consumed
//!   through ([`layout::LayoutEngine`])
//! - **Scroll interaction**: the pointer/touch state machine that turns raw
//!   input into offset changes, thumb drags, page jumps, and momentum
//! - **Command interpreter**: the per-frame walk over the render command
//!   list that issues primitive draws and rebuilds the scroll registry
//! - **Backend contract**: window/resource/event/present adapter trait
//! - **Shell**: the frame driver orchestrating one iteration
//!
//! Backends implement only event translation and primitive draws; all
//! interaction semantics live here so the two backends cannot drift apart.

pub mod arena;
pub mod backend;
pub mod error;
pub mod fonts;
pub mod interpreter;
pub mod layout;
pub mod registry;
pub mod scroll;
pub mod scrollbar;
pub mod session;
pub mod shell;
pub mod testing;

pub use arena::{ArenaHandle, FrameArena};
pub use backend::Backend;
pub use error::{BackendError, EngineError, Result};
pub use fonts::{FontTable, FONT_SLOTS};
pub use interpreter::{CommandInterpreter, FrameInfo};
pub use layout::{LayoutEngine, ScrollContainerInfo};
pub use registry::{ScrollContainerRef, ScrollRegistry};
pub use scroll::{DragMode, ScrollInteraction, ScrollTuning, TouchPhase};
pub use session::{ActiveSlots, Session, WidgetId};
pub use shell::{Shell, ShellConfig};
