pub mod capture;
pub mod classify;
pub mod embedding;
pub mod shared;
pub mod workflow;
