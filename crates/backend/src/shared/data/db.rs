use once_cell::sync::OnceCell;
use sea_orm::{ConnectionTrait, Database, DatabaseBackend, DatabaseConnection, Statement};
use std::path::Path;

use super::schema::{INDEXES, TABLES};

static DB_CONN: OnceCell<DatabaseConnection> = OnceCell::new();

pub async fn initialize_database(db_file: &Path) -> anyhow::Result<()> {
    if let Some(parent) = db_file.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let absolute_path = if db_file.is_absolute() {
        db_file.to_path_buf()
    } else {
        std::env::current_dir()?.join(db_file)
    };
    // Normalize separators so the URL is valid on Windows too
    let normalized = absolute_path.to_string_lossy().replace('\\', "/");
    let needs_leading_slash = !normalized.starts_with('/') && normalized.contains(':');
    let prefix = if needs_leading_slash { "/" } else { "" };
    let db_url = format!("sqlite://{}{}?mode=rwc", prefix, normalized);

    tracing::info!("Opening database {}", db_url);
    let conn = Database::connect(&db_url).await?;
    bootstrap_schema(&conn).await?;

    DB_CONN
        .set(conn)
        .map_err(|_| anyhow::anyhow!("Failed to set DB_CONN"))?;
    Ok(())
}

/// Create missing tables and indexes
pub async fn bootstrap_schema<C: ConnectionTrait>(conn: &C) -> anyhow::Result<()> {
    for (table, ddl) in TABLES {
        if !table_exists(conn, table).await? {
            tracing::info!("Creating {} table", table);
        }
        conn.execute(Statement::from_string(
            DatabaseBackend::Sqlite,
            ddl.to_string(),
        ))
        .await?;
    }

    for ddl in INDEXES {
        conn.execute(Statement::from_string(
            DatabaseBackend::Sqlite,
            ddl.to_string(),
        ))
        .await?;
    }
    Ok(())
}

async fn table_exists<C: ConnectionTrait>(conn: &C, table: &str) -> anyhow::Result<bool> {
    let rows = conn
        .query_all(Statement::from_sql_and_values(
            DatabaseBackend::Sqlite,
            "SELECT name FROM sqlite_master WHERE type='table' AND name = ?;",
            [table.into()],
        ))
        .await?;
    Ok(!rows.is_empty())
}

pub fn get_connection() -> &'static DatabaseConnection {
    DB_CONN
        .get()
        .expect("Database connection has not been initialized")
}

/// Fresh in-memory database with the schema applied
#[cfg(test)]
pub async fn connect_in_memory() -> DatabaseConnection {
    let mut options = sea_orm::ConnectOptions::new("sqlite::memory:".to_owned());
    // A single connection: every pooled connection would get its own memory db
    options
        .max_connections(1)
        .min_connections(1)
        .sqlx_logging(false);
    let conn = Database::connect(options)
        .await
        .expect("in-memory sqlite connection");
    bootstrap_schema(&conn).await.expect("schema bootstrap");
    conn
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_bootstrap_creates_every_table_and_is_idempotent() {
        let conn = connect_in_memory().await;
        for (table, _) in TABLES {
            assert!(table_exists(&conn, table).await.unwrap(), "{}", table);
        }
        bootstrap_schema(&conn).await.unwrap();
    }

    #[test]
    fn test_schema_matches_aggregate_table_names() {
        use contracts::domain::a001_boutique::aggregate::Boutique;
        use contracts::domain::a002_client::aggregate::Client;
        use contracts::domain::a003_modele::aggregate::Modele;
        use contracts::domain::a004_modele_boutique::aggregate::ModeleBoutique;
        use contracts::domain::a005_facture::aggregate::Facture;
        use contracts::domain::a006_paiement::aggregate::Paiement;
        use contracts::domain::a007_vente::aggregate::Vente;
        use contracts::domain::a008_reservation::aggregate::Reservation;
        use contracts::domain::common::AggregateRoot;

        let expected = [
            Boutique::table_name(),
            Client::table_name(),
            Modele::table_name(),
            ModeleBoutique::table_name(),
            Facture::table_name(),
            Paiement::table_name(),
            Vente::table_name(),
            Reservation::table_name(),
        ];
        let actual: Vec<&str> = TABLES.iter().map(|(table, _)| *table).collect();
        assert_eq!(actual, expected.iter().map(String::as_str).collect::<Vec<_>>());
    }
}
