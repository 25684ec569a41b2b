pub mod executor;

pub use executor::GenerateFixturesExecutor;
