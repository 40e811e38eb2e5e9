// handlers/data_items/mod.rs - Data item handlers
//
// All routes are nested under a project. The project must belong to the
// caller before any item is looked at.

pub mod create; // POST /projects/:project_id/data-items/
pub mod delete; // DELETE /projects/:project_id/data-items/:data_item_id
pub mod list;   // GET /projects/:project_id/data-items/
pub mod show;   // GET /projects/:project_id/data-items/:data_item_id
pub mod update; // PATCH /projects/:project_id/data-items/:data_item_id

pub use create::data_item_create;
pub use delete::data_item_delete;
pub use list::data_item_list;
pub use show::data_item_show;
pub use update::data_item_update;
