//! Server-side hosting of widgets.
//!
//! Each page load mounts its own [`ChatWidget`](crate::widget::ChatWidget)
//! in the [`WidgetRegistry`]; the rendered fragment talks back to the routes
//! in [`routes`] through htmx.
//!
//! # Example
//!
//! ```rust
//! use chat_widget::host::WidgetRegistry;
//!
//! let registry = WidgetRegistry::new();
//! assert!(registry.is_empty());
//! ```

mod registry;
pub mod routes;

pub use registry::{DEFAULT_IDLE_TIMEOUT, WidgetHandle, WidgetRegistry};
pub use routes::router;
