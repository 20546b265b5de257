pub mod config;
pub mod describe;
pub mod doctor;
pub mod execute;
pub mod operations;
pub mod run;
pub mod validate;
