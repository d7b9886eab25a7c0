pub mod calendar;
pub mod config;
pub mod dectime;
pub mod error;
pub mod monthly;
pub mod table;

type Result<T> = anyhow::Result<T>;
