//! Categories group expenses and goals.

mod create;
mod db;
mod delete;
mod domain;
mod edit;
mod list;

pub use create::create_category_endpoint;
pub use db::{
    create_category, create_category_table, ensure_category_exists, get_all_categories,
    get_category,
};
pub use delete::delete_category_endpoint;
pub use domain::{Category, CategoryId, CategoryResponse, CategoryTitle};
pub use edit::update_category_endpoint;
pub use list::{get_categories_endpoint, get_category_endpoint};
