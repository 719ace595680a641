//! Rule-file schema

pub mod schema;

pub use schema::*;
