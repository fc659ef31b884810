pub mod assistant;
pub mod chat;
pub mod status;
pub mod storefront;
