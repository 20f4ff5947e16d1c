//! Storage layer: record types, the backend trait, and the JSON-file store

mod json_store;
mod models;
mod traits;

pub use json_store::JsonStore;
pub use models::{
    EndpointRecord, PageRecord, ParameterRecord, PropertyRecord, ResponseRecord, ResponseSchema,
    SchemaRecord, SiteInfo,
};
pub use traits::{Storage, StorageError, StorageResult};
