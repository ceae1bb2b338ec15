//! Presentation-facing view models.
//!
//! Drawing pixels belongs to the host UI. This layer stops at immutable,
//! render-ready structures:
//!
//! ```text
//! ScreenState → compute_viewmodel → UIViewModel → host renderer
//! ```
//!
//! # Modules
//!
//! - [`viewmodel`]: View model types representing renderable listing state

pub mod viewmodel;

pub use viewmodel::{EmptyState, HeaderInfo, SearchBarInfo, UIViewModel, WordRow};
