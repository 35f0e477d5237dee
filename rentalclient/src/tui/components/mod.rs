pub mod actor_details;
pub mod component;
pub mod customer_details;
pub mod customers;
pub mod film_details;
pub mod form;
pub mod item_list;
pub mod menu;
pub mod records;
pub mod search;
pub mod status_log;
pub mod text_field;
