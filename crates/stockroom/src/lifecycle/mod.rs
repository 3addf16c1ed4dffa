//! # System Lifecycle & Orchestration
//!
//! Starting, wiring and stopping the collection actors, plus the user-level
//! workflows that span more than one of them.
//!
//! ## The InventorySystem Pattern
//!
//! [`InventorySystem::new`] creates every actor against one shared storage
//! backend and one shared id generator, spawns them, and starts the
//! notification dispatcher. Nothing is injected at run time: the actors never
//! call each other. Cross-collection work (adjust stock, then record it) is
//! sequenced by the workflow methods instead.
//!
//! ## Graceful Shutdown
//!
//! 1. **Drop all clients** - closes the sending side of every mailbox
//! 2. **Actors drain** - each finishes queued requests, then `recv()` returns `None`
//! 3. **Await completion** - wait for every actor task
//! 4. **Stop the dispatcher** - notifications not yet shown are discarded
//!
//! ## Observability
//!
//! See [`telemetry`] for the subscriber setup used by the binary.

pub mod inventory_system;
pub mod telemetry;

pub use inventory_system::*;
pub use telemetry::setup_tracing;
