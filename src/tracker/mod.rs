//! Task tracking for taskboard.
//!
//! This module implements the full tracking engine: three kinds of work
//! items (standalone tasks, epics, and their subtasks), a recency-ordered
//! view history with O(1) deduplication, and a start-time priority index
//! that doubles as the scheduling-conflict detector. Epic status and time
//! windows are derived from children and recomputed by the store on every
//! relevant change. The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - The store orchestrator in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
