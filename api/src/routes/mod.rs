pub mod compare;
pub mod find;
pub mod health_route;
pub mod updates;
