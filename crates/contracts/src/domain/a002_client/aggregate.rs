use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::define_aggregate_id;
use crate::domain::common::{AggregateRoot, BaseAggregate, EntityMetadata};

define_aggregate_id!(
    /// Client identifier
    ClientId
);

/// Client record, optionally attached to a home boutique and carrying a
/// subscription (abonnement) window.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Client {
    #[serde(flatten)]
    pub base: BaseAggregate<ClientId>,

    pub email: Option<String>,
    pub telephone: Option<String>,

    #[serde(rename = "boutiqueId")]
    pub boutique_id: Option<String>,

    /// Subscription plan name, None when the client has no subscription
    pub abonnement: Option<String>,
    #[serde(rename = "abonnementDebut")]
    pub abonnement_debut: Option<NaiveDate>,
    #[serde(rename = "abonnementFin")]
    pub abonnement_fin: Option<NaiveDate>,
}

impl Client {
    pub fn new_for_insert(code: String, description: String) -> Self {
        Self {
            base: BaseAggregate::new(ClientId::new_v4(), code, description),
            email: None,
            telephone: None,
            boutique_id: None,
            abonnement: None,
            abonnement_debut: None,
            abonnement_fin: None,
        }
    }

    pub fn update(&mut self, dto: &ClientDto) {
        if let Some(code) = dto.code.as_ref().filter(|c| !c.trim().is_empty()) {
            self.base.code = code.clone();
        }
        self.base.description = dto.description.clone();
        self.base.comment = dto.comment.clone();
        self.email = dto.email.clone().filter(|e| !e.trim().is_empty());
        self.telephone = dto.telephone.clone();
        self.boutique_id = dto.boutique_id.clone();
        self.abonnement = dto.abonnement.clone().filter(|a| !a.trim().is_empty());
        self.abonnement_debut = dto.abonnement_debut;
        self.abonnement_fin = dto.abonnement_fin;
    }

    /// Subscription covers `day` (both bounds inclusive, open bounds allowed)
    pub fn is_abonnement_actif(&self, day: NaiveDate) -> bool {
        if self.abonnement.is_none() {
            return false;
        }
        let started = !self.abonnement_debut.is_some_and(|d| d > day);
        let not_ended = !self.abonnement_fin.is_some_and(|f| f < day);
        started && not_ended
    }

    pub fn validate(&self) -> Result<(), String> {
        self.base.validate_base()?;

        if let Some(email) = &self.email {
            let email = email.trim();
            let at = email.find('@');
            if !at.is_some_and(|i| i > 0 && i < email.len() - 1) {
                return Err(format!("Invalid email address: {}", email));
            }
        }

        if let (Some(debut), Some(fin)) = (self.abonnement_debut, self.abonnement_fin) {
            if fin < debut {
                return Err("Subscription end date is before its start date".into());
            }
        }
        Ok(())
    }

    pub fn before_write(&mut self) {
        self.base.touch();
    }
}

impl AggregateRoot for Client {
    type Id = ClientId;

    fn id(&self) -> Self::Id {
        self.base.id
    }

    fn code(&self) -> &str {
        &self.base.code
    }

    fn description(&self) -> &str {
        &self.base.description
    }

    fn metadata(&self) -> &EntityMetadata {
        &self.base.metadata
    }

    fn metadata_mut(&mut self) -> &mut EntityMetadata {
        &mut self.base.metadata
    }

    fn aggregate_index() -> &'static str {
        "a002"
    }

    fn collection_name() -> &'static str {
        "client"
    }

    fn element_name() -> &'static str {
        "Client"
    }

    fn list_name() -> &'static str {
        "Clients"
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ClientDto {
    pub id: Option<String>,
    pub code: Option<String>,
    pub description: String,
    pub email: Option<String>,
    pub telephone: Option<String>,
    #[serde(rename = "boutiqueId")]
    pub boutique_id: Option<String>,
    pub abonnement: Option<String>,
    #[serde(rename = "abonnementDebut")]
    pub abonnement_debut: Option<NaiveDate>,
    #[serde(rename = "abonnementFin")]
    pub abonnement_fin: Option<NaiveDate>,
    pub comment: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn client_with(dto: ClientDto) -> Client {
        let mut c = Client::new_for_insert("CLT-001".into(), "Marie Curie".into());
        c.update(&dto);
        c
    }

    #[test]
    fn test_email_must_contain_at_sign() {
        let bad = client_with(ClientDto {
            description: "Marie Curie".into(),
            email: Some("marie.example.com".into()),
            ..Default::default()
        });
        assert!(bad.validate().is_err());

        let good = client_with(ClientDto {
            description: "Marie Curie".into(),
            email: Some("marie@example.com".into()),
            ..Default::default()
        });
        assert!(good.validate().is_ok());
    }

    #[test]
    fn test_subscription_window_must_be_ordered() {
        let c = client_with(ClientDto {
            description: "Marie Curie".into(),
            abonnement: Some("premium".into()),
            abonnement_debut: Some(date("2025-06-10")),
            abonnement_fin: Some(date("2025-06-01")),
            ..Default::default()
        });
        assert!(c.validate().is_err());
    }

    #[test]
    fn test_subscription_activity_is_inclusive() {
        let c = client_with(ClientDto {
            description: "Marie Curie".into(),
            abonnement: Some("premium".into()),
            abonnement_debut: Some(date("2025-01-01")),
            abonnement_fin: Some(date("2025-12-31")),
            ..Default::default()
        });
        assert!(c.is_abonnement_actif(date("2025-01-01")));
        assert!(c.is_abonnement_actif(date("2025-12-31")));
        assert!(!c.is_abonnement_actif(date("2026-01-01")));
    }

    #[test]
    fn test_email_at_sign_needs_both_sides() {
        for email in ["@example.com", "marie@"] {
            let c = client_with(ClientDto {
                description: "Marie Curie".into(),
                email: Some(email.into()),
                ..Default::default()
            });
            assert!(c.validate().is_err(), "{}", email);
        }
    }

    #[test]
    fn test_open_subscription_bounds() {
        let open_start = client_with(ClientDto {
            description: "Marie Curie".into(),
            abonnement: Some("premium".into()),
            abonnement_fin: Some(date("2025-06-30")),
            ..Default::default()
        });
        assert!(open_start.is_abonnement_actif(date("2020-01-01")));
        assert!(!open_start.is_abonnement_actif(date("2025-07-01")));

        let open_end = client_with(ClientDto {
            description: "Marie Curie".into(),
            abonnement: Some("premium".into()),
            abonnement_debut: Some(date("2025-06-01")),
            ..Default::default()
        });
        assert!(!open_end.is_abonnement_actif(date("2025-05-31")));
        assert!(open_end.is_abonnement_actif(date("2030-01-01")));
    }

    #[test]
    fn test_no_plan_means_no_active_subscription() {
        let c = client_with(ClientDto {
            description: "Marie Curie".into(),
            abonnement: Some("   ".into()),
            ..Default::default()
        });
        assert!(!c.is_abonnement_actif(date("2025-06-01")));
    }
}
