//! Domain model types for Genea.

pub mod association;
pub mod attribute;
pub mod citation;
pub mod family;
pub mod lds;
pub mod life_event;
pub mod media;
pub mod note;
pub mod pagination;
pub mod person;
pub mod place;
pub mod repository;
pub mod snapshot;
pub mod source;
pub mod submitter;

pub use association::Association;
pub use attribute::Attribute;
pub use citation::Citation;
pub use family::{Family, FamilyChild};
pub use lds::LdsOrdinance;
pub use life_event::LifeEvent;
pub use media::{CropRect, Media, MAX_MEDIA_BYTES};
pub use note::Note;
pub use pagination::{ListOptions, Page, SortOrder};
pub use person::{Person, PersonName};
pub use place::{Address, Place};
pub use repository::Repository;
pub use snapshot::Snapshot;
pub use source::Source;
pub use submitter::Submitter;
