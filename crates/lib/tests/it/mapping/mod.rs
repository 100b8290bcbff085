//! DottedMapping integration tests
//!
//! Tests are organized by operation group: basic get/set/delete, flattening
//! iteration, default handling, and error reporting.

mod basic_operations;
