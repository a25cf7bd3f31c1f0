//! Genea REST API: handlers, DTOs, error envelope, and router.
//!
//! Handlers are thin: they translate HTTP shapes into engine commands and
//! query-service calls, and map [`genea_core::GeneaError`] kinds onto HTTP
//! statuses (400 validation, 404 not-found, 409 version conflict, 422
//! unreadable GEDCOM, 500 backend).

pub mod rest;
pub mod router;
pub mod service;

pub use rest::state::AppState;
pub use router::build_router;
