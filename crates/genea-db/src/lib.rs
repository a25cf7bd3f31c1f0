//! Genea storage layer: event log, read-model entities, migrations,
//! repositories, and the projection engine.
//!
//! This crate provides:
//! - SeaORM entity models for the append-only `event_log` and all read-model
//!   tables
//! - Database migrations via `sea_orm_migration`
//! - The [`store::EventStore`] trait with SQL and in-memory implementations;
//!   the SQL append runs the projector inside the same transaction
//! - Read-model repositories (CRUD, pagination, search)
//! - The projection engine and full rebuild

pub mod entities;
pub mod migration;
pub mod projection;
pub mod repo;
pub mod store;

pub use migration::Migrator;

/// Convenience re-export of `sea_orm` for downstream crates.
pub use sea_orm;
