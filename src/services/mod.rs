pub mod campaign;
pub mod config;
pub mod core;
pub mod crush;
pub mod interest;
pub mod matching;
pub mod message;
pub mod survey;
