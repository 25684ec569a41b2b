pub mod request;
pub mod response;

pub use request::GenerateFixturesRequest;
pub use response::GenerateFixturesResponse;

use crate::usecases::common::UseCaseMetadata;

pub struct GenerateFixtures;

impl UseCaseMetadata for GenerateFixtures {
    fn usecase_index() -> &'static str {
        "u501"
    }

    fn usecase_name() -> &'static str {
        "generate_fixtures"
    }

    fn display_name() -> &'static str {
        "Génération de données de test"
    }

    fn description() -> &'static str {
        "Associates models with boutiques, with random prices and quantities"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_name() {
        assert_eq!(GenerateFixtures::full_name(), "u501_generate_fixtures");
    }
}
