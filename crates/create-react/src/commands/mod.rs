pub mod create;
pub mod version;
