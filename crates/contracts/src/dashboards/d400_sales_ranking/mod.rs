pub mod dto;

pub use dto::TopModelsResponse;
