//! Operation registration and dispatch integration tests.

mod support;
mod registry;
mod help;
mod composition;
