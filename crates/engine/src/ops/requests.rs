//! Request write operations.

mod composition;
mod create;
mod delete;
mod status;
