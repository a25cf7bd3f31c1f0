//! SeaORM entity definitions for the event log and all read-model tables.

pub mod association;
pub mod attribute;
pub mod citation;
pub mod event_log;
pub mod family;
pub mod family_child;
pub mod lds_ordinance;
pub mod life_event;
pub mod media;
pub mod note;
pub mod person;
pub mod person_name;
pub mod repository;
pub mod sea_enums;
pub mod snapshot;
pub mod source;
pub mod submitter;
