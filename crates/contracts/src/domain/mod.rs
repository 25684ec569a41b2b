pub mod common;

pub mod a001_boutique;
pub mod a002_client;
pub mod a003_modele;
pub mod a004_modele_boutique;
pub mod a005_facture;
pub mod a006_paiement;
pub mod a007_vente;
pub mod a008_reservation;
