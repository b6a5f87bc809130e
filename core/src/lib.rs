//! Weft Core Types
//!
//! This crate provides the foundational types used throughout weft:
//! - Identity types (ObjectId, GraphId, IdGenerator)
//! - Label sets and the reserved system labels
//! - Attribute values and typed components
//! - Entity structures (Node, Edge)
//! - Structural error types

mod component;
mod entity;
mod error;
mod id;
mod label;
mod value;

pub use component::*;
pub use entity::*;
pub use error::*;
pub use id::*;
pub use label::*;
pub use value::*;
