pub mod find;
pub mod generate;
pub mod model;
pub mod token;
pub mod verify;
