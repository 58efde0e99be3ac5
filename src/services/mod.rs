pub mod conversation;
pub mod echo;
pub mod generator;
