//! Domains module containing business logic organized by bounded contexts.

pub mod sim;
pub mod tools;
