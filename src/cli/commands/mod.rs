mod add;
mod fields;
mod get;

pub use add::cmd_add_anime;
pub use fields::cmd_list_fields;
pub use get::cmd_get_anime;
