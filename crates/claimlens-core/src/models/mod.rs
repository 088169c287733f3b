pub mod chat;
pub mod claim;
pub mod image;
pub mod table;
