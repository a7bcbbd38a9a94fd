//! Validation gate for the persistgate write pipeline.
//!
//! [`ValidatingListener`] listens for pre-insert and pre-update events,
//! runs the validator registered for the entity's type and vetoes the write
//! when the validator reports errors. The errors are handed to an
//! [`ErrorStrategy`]; by default they are recorded in the session so the
//! caller can read them back with [`ValidationAttributes::validation_errors`].
//!
//! ```text
//! no validator for type     -> accept, nothing recorded
//! skip flag set to true     -> accept, validator not called
//! validator reports nothing -> accept, stale errors for the instance cleared
//! validator reports errors  -> strategy.on_errors(..), reject
//! validator faults          -> error propagates, write aborted
//! ```

mod attributes;
mod listener;
mod strategy;

pub use attributes::ValidationAttributes;
pub use listener::{SkipPolicy, ValidatingListener};
pub use strategy::{CollectErrors, ErrorStrategy, LogErrors, RecordInSession};
