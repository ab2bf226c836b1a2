//! # day-layout
//!
//! Deterministic layout for a calendar day view.
//!
//! Events are `[start, end)` ranges on a shared vertical axis, drawn as bars
//! in one day column. [`layout()`] gives each event a horizontal slot (width
//! and left offset) so that colliding events never share horizontal space,
//! and each event is as wide as its own collisions allow rather than as
//! narrow as the busiest moment of the day.
//!
//! Drawing is left to the caller: the output carries `top`, `height`,
//! `width`, `margin_left` and the column index for a renderer to consume.
//!
//! ## Modules
//!
//! - [`event`] — Input/output event types and the half-open collision test
//! - [`columns`] — First-fit column assignment
//! - [`overlap`] — Symmetric collision adjacency
//! - [`reflow`] — Global width pass and local width reflow
//! - [`mod@layout`] — Per-run state and the public entry points
//! - [`config`] — Widths, gutter, ordering and reflow strategy
//! - [`telemetry`] — Opt-in tracing subscriber
//! - [`error`] — Error types

pub mod columns;
pub mod config;
pub mod error;
pub mod event;
pub mod layout;
pub mod overlap;
pub mod reflow;
pub mod telemetry;

pub use columns::Columns;
pub use config::{EventOrder, LayoutConfig, ReflowStrategy};
pub use error::LayoutError;
pub use event::{EventInput, EventLayout, Span};
pub use layout::{layout, layout_json, DayLayout, LayoutState};
pub use overlap::OverlapIndex;
