//! Taskboard: a task-tracking engine with a scheduling-aware priority view.
//!
//! This crate provides an in-memory store for three kinds of work items —
//! standalone tasks, epics, and subtasks — together with a view-history
//! log, a global "next up" ordering by scheduled start time, and a
//! time-window conflict detector that keeps the schedule consistent.
//!
//! # Architecture
//!
//! Taskboard follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (file snapshot
//!   archive, HTTP façade)
//!
//! # Modules
//!
//! - [`tracker`]: the engine, its ports, and its adapters

pub mod tracker;
