// handlers/mod.rs - Request handlers, one file per operation
//
// Public: service banner and health check.
// Scoped: everything else runs behind the identity middleware and receives
// the resolved caller as an explicit `Extension<Caller>`.

pub mod data_items;
pub mod projects;
pub mod system;
pub mod users;
