//! Minimal schema bootstrap: one table per aggregate.

/// (table name, CREATE statement)
pub const TABLES: &[(&str, &str)] = &[
    (
        "a001_boutique",
        r#"
        CREATE TABLE IF NOT EXISTS a001_boutique (
            id TEXT PRIMARY KEY NOT NULL,
            code TEXT NOT NULL DEFAULT '',
            description TEXT NOT NULL,
            comment TEXT,
            adresse TEXT NOT NULL DEFAULT '',
            telephone TEXT,
            is_succursale INTEGER NOT NULL DEFAULT 0,
            parent_id TEXT,
            is_deleted INTEGER NOT NULL DEFAULT 0,
            is_posted INTEGER NOT NULL DEFAULT 0,
            created_at TEXT,
            updated_at TEXT,
            version INTEGER NOT NULL DEFAULT 0
        );
        "#,
    ),
    (
        "a002_client",
        r#"
        CREATE TABLE IF NOT EXISTS a002_client (
            id TEXT PRIMARY KEY NOT NULL,
            code TEXT NOT NULL DEFAULT '',
            description TEXT NOT NULL,
            comment TEXT,
            email TEXT,
            telephone TEXT,
            boutique_id TEXT,
            abonnement TEXT,
            abonnement_debut TEXT,
            abonnement_fin TEXT,
            is_deleted INTEGER NOT NULL DEFAULT 0,
            is_posted INTEGER NOT NULL DEFAULT 0,
            created_at TEXT,
            updated_at TEXT,
            version INTEGER NOT NULL DEFAULT 0
        );
        "#,
    ),
    (
        "a003_modele",
        r#"
        CREATE TABLE IF NOT EXISTS a003_modele (
            id TEXT PRIMARY KEY NOT NULL,
            code TEXT NOT NULL DEFAULT '',
            description TEXT NOT NULL,
            comment TEXT,
            reference TEXT NOT NULL DEFAULT '',
            prix_base REAL NOT NULL DEFAULT 0,
            is_active INTEGER NOT NULL DEFAULT 1,
            is_deleted INTEGER NOT NULL DEFAULT 0,
            is_posted INTEGER NOT NULL DEFAULT 0,
            created_at TEXT,
            updated_at TEXT,
            version INTEGER NOT NULL DEFAULT 0
        );
        "#,
    ),
    (
        "a004_modele_boutique",
        r#"
        CREATE TABLE IF NOT EXISTS a004_modele_boutique (
            id TEXT PRIMARY KEY NOT NULL,
            code TEXT NOT NULL DEFAULT '',
            description TEXT NOT NULL,
            comment TEXT,
            modele_id TEXT NOT NULL,
            boutique_id TEXT NOT NULL,
            prix REAL NOT NULL DEFAULT 0,
            quantite INTEGER NOT NULL DEFAULT 0,
            is_deleted INTEGER NOT NULL DEFAULT 0,
            is_posted INTEGER NOT NULL DEFAULT 0,
            created_at TEXT,
            updated_at TEXT,
            version INTEGER NOT NULL DEFAULT 0
        );
        "#,
    ),
    (
        "a005_facture",
        r#"
        CREATE TABLE IF NOT EXISTS a005_facture (
            id TEXT PRIMARY KEY NOT NULL,
            code TEXT NOT NULL DEFAULT '',
            description TEXT NOT NULL,
            comment TEXT,
            client_id TEXT NOT NULL,
            boutique_id TEXT,
            date_facture TEXT NOT NULL,
            date_echeance TEXT,
            montant_total REAL NOT NULL DEFAULT 0,
            montant_paye REAL NOT NULL DEFAULT 0,
            statut TEXT NOT NULL DEFAULT 'emise',
            is_deleted INTEGER NOT NULL DEFAULT 0,
            is_posted INTEGER NOT NULL DEFAULT 0,
            created_at TEXT,
            updated_at TEXT,
            version INTEGER NOT NULL DEFAULT 0
        );
        "#,
    ),
    (
        "a006_paiement",
        r#"
        CREATE TABLE IF NOT EXISTS a006_paiement (
            id TEXT PRIMARY KEY NOT NULL,
            code TEXT NOT NULL DEFAULT '',
            description TEXT NOT NULL,
            comment TEXT,
            facture_id TEXT NOT NULL,
            date_paiement TEXT NOT NULL,
            montant REAL NOT NULL DEFAULT 0,
            mode TEXT NOT NULL DEFAULT 'especes',
            is_deleted INTEGER NOT NULL DEFAULT 0,
            is_posted INTEGER NOT NULL DEFAULT 0,
            created_at TEXT,
            updated_at TEXT,
            version INTEGER NOT NULL DEFAULT 0
        );
        "#,
    ),
    (
        "a007_vente",
        r#"
        CREATE TABLE IF NOT EXISTS a007_vente (
            id TEXT PRIMARY KEY NOT NULL,
            code TEXT NOT NULL DEFAULT '',
            description TEXT NOT NULL,
            comment TEXT,
            boutique_id TEXT NOT NULL,
            modele_id TEXT NOT NULL,
            client_id TEXT,
            date_vente TEXT NOT NULL,
            quantite INTEGER NOT NULL DEFAULT 0,
            prix_unitaire REAL NOT NULL DEFAULT 0,
            is_deleted INTEGER NOT NULL DEFAULT 0,
            is_posted INTEGER NOT NULL DEFAULT 0,
            created_at TEXT,
            updated_at TEXT,
            version INTEGER NOT NULL DEFAULT 0
        );
        "#,
    ),
    (
        "a008_reservation",
        r#"
        CREATE TABLE IF NOT EXISTS a008_reservation (
            id TEXT PRIMARY KEY NOT NULL,
            code TEXT NOT NULL DEFAULT '',
            description TEXT NOT NULL,
            comment TEXT,
            boutique_id TEXT NOT NULL,
            modele_id TEXT NOT NULL,
            client_id TEXT NOT NULL,
            date_reservation TEXT NOT NULL,
            quantite INTEGER NOT NULL DEFAULT 0,
            montant REAL NOT NULL DEFAULT 0,
            statut TEXT NOT NULL DEFAULT 'en_attente',
            is_deleted INTEGER NOT NULL DEFAULT 0,
            is_posted INTEGER NOT NULL DEFAULT 0,
            created_at TEXT,
            updated_at TEXT,
            version INTEGER NOT NULL DEFAULT 0
        );
        "#,
    ),
];

pub const INDEXES: &[&str] = &[
    // A model is stocked at most once per boutique (soft-deleted rows excluded)
    "CREATE UNIQUE INDEX IF NOT EXISTS ux_a004_modele_boutique_pair \
     ON a004_modele_boutique (modele_id, boutique_id) WHERE is_deleted = 0;",
    "CREATE INDEX IF NOT EXISTS ix_a005_facture_client ON a005_facture (client_id);",
    "CREATE INDEX IF NOT EXISTS ix_a006_paiement_facture ON a006_paiement (facture_id);",
    "CREATE INDEX IF NOT EXISTS ix_a007_vente_date ON a007_vente (date_vente);",
    "CREATE INDEX IF NOT EXISTS ix_a008_reservation_date ON a008_reservation (date_reservation);",
];
