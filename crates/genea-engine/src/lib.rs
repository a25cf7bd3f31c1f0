//! Genea engine: command handlers on the write side, query services on the
//! read side, and the snapshot/rollback machinery in between.
//!
//! Commands validate their input against the domain model, load the current
//! aggregate version from the event store, emit events, and append them
//! under optimistic concurrency; the store projects into the read model
//! within the same transaction. Query services are stateless readers over
//! the read model and the log.

pub mod commands;
pub mod fold;
pub mod query;
