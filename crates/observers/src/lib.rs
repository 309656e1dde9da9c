//! Reusable observers for normplot solvers.
//!
//! This crate provides [`Observer`] implementations and capability traits that
//! work across solvers.
//!
//! # Modules
//!
//! - [`traits`] — Capability traits for cross-solver observers
//!   ([`HasObjective`], [`HasIterate`])
//!
//! # Observers
//!
//! - [`LogObserver`] — forwards every event to `tracing`
//! - [`History`] — records the accepted iterates of a solve, e.g. to draw the
//!   solver path on a plot
//!
//! [`Observer`]: normplot_core::Observer
//! [`HasObjective`]: traits::HasObjective
//! [`HasIterate`]: traits::HasIterate

pub mod traits;

mod history;
mod logging;

pub use history::History;
pub use logging::LogObserver;
