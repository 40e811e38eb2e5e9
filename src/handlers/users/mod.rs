// handlers/users/mod.rs - User handlers
//
// The caller's own record; users are created by the identity middleware and
// never modified here.

pub mod whoami; // GET /users/me

pub use whoami::user_whoami;
