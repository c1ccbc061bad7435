pub mod keys;
pub mod layout;
pub mod markdown;
pub mod render;
