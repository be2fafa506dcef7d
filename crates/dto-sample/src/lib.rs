//! # DTO Sample Library
//!
//! A small blog backed by an in-memory store, read through immutable DTOs.
//!
//! - **[store]**: the tables and their relation queries.
//! - **[model]**: store rows exposed as [`SourceRecord`](dto_framework::SourceRecord)s.
//! - **[dto]**: read models declared with [`value_type!`](dto_framework::value_type).
//! - **[queries]**: load a row and convert it into a read model.

pub mod dto;
pub mod error;
pub mod model;
pub mod queries;
pub mod store;
