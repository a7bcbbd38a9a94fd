//! Entity model for persistgate.
//!
//! Defines the types the write pipeline operates on:
//! - [`Entity`] — the generic data container (id, type name, JSON payload)
//! - [`EntityType`] — a persistent entity type with declared properties and an optional parent
//! - [`MappingContext`] — classifies entities into their [`EntityType`]
//! - [`EntityAccess`] — uniform read/write view over one entity for the duration of an event
//! - [`Validator`] / [`ValidatorRegistry`] — pluggable per-type validation
//! - [`ValidationResult`] — ordered field errors produced by a validator
//!
//! Nothing here performs writes or raises events; that is the engine's job.

mod access;
mod entity;
mod error;
mod mapping;
mod registry;
mod schema;
mod validation;
mod validator;

pub use access::EntityAccess;
pub use entity::Entity;
pub use error::{LookupError, ModelError, ModelResult};
pub use mapping::{EntityTypeDef, MappingContext, MappingDocument};
pub use registry::ValidatorRegistry;
pub use schema::{EntityType, FieldType, PropertyDef};
pub use validation::{FieldError, ValidationResult};
pub use validator::{Validator, ValidatorFault};
