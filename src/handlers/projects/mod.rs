// handlers/projects/mod.rs - Project handlers
//
// Every route here runs behind the identity middleware and only ever touches
// projects owned by the resolved caller.

pub mod create; // POST /projects/
pub mod list;   // GET /projects/
pub mod show;   // GET /projects/:project_id
pub mod update; // PATCH /projects/:project_id

pub use create::project_create;
pub use list::project_list;
pub use show::project_show;
pub use update::project_update;
