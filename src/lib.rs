//! Kanban-style job application tracker.
//!
//! Job applications live in one of four status columns (Applied,
//! Interviewing, Offer Received, Rejected) and are ordered within a column
//! by a sparse integer key, so a card can be dropped between two others
//! without renumbering its neighbours.

pub mod api;
pub mod cli;
pub mod config;
pub mod db;
pub mod shutdown;
pub mod telemetry;
