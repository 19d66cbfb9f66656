#![forbid(unsafe_code)]

pub mod context;
pub mod gateway;
pub mod rest;

pub use context::ApiContext;
pub use rest::RestBackend;

pub use gateway::{
    AccountGateway, ApiError, Backend, DetectionGateway, InMemoryBackend, ProblemGateway,
    ProgressGateway, TherapistGateway,
};
