//! Print layout reconciliation.
//!
//! This crate matches a table of print designs (one row per design, keyed by
//! article code) against the named layers of a canvas document, measures the
//! matched layers in millimeters, and computes the scale needed to bring a
//! layer to an exact physical size.
//!
//! The host application is reached only through the traits in [`canvas`] and
//! [`table`]; [`session::Session`] ties the engines together the way a UI
//! panel would. The binary `printlayout` drives a session from the command
//! line against a JSON canvas.

pub mod canvas;
pub mod dimension;
pub mod error;
pub mod model;
pub mod reconcile;
pub mod selection;
pub mod session;
pub mod table;
pub mod units;

pub use error::LayoutError;
pub use session::Session;
