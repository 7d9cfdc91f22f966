use sqlx::postgres::PgConnectOptions;
use sqlx::{Connection, PgConnection};
use tracing::{debug, info};

use crate::config::Config;
use crate::error::Result;
use crate::models::{Client, ClientLookup, ClientUpdate, Phone, TableDump};

/// Repository over the `client` and `phone` tables, backed by one connection
pub struct Database {
    conn: PgConnection,
}

impl Database {
    /// Open the single connection the repository works on
    pub async fn connect(options: &PgConnectOptions) -> Result<Self> {
        let conn = PgConnection::connect_with(options).await?;
        info!(
            host = options.get_host(),
            database = options.get_database().unwrap_or_default(),
            "database connection established"
        );

        Ok(Self { conn })
    }

    /// Release the connection
    pub async fn close(self) -> Result<()> {
        self.conn.close().await?;
        info!("database connection closed");

        Ok(())
    }

    // Schema operations
    pub async fn initialize_schema(&mut self) -> Result<()> {
        let mut tx = self.conn.begin().await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS client (
                id SERIAL PRIMARY KEY,
                first_name VARCHAR(64) NOT NULL,
                last_name VARCHAR(64) NOT NULL,
                email VARCHAR(64) UNIQUE NOT NULL
            )
            "#,
        )
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS phone (
                id SERIAL PRIMARY KEY,
                phone_number DECIMAL(11) UNIQUE NOT NULL,
                client_id INTEGER NOT NULL REFERENCES client(id) ON DELETE CASCADE
            )
            "#,
        )
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        info!("schema initialized");

        Ok(())
    }

    pub async fn drop_schema(&mut self) -> Result<()> {
        let mut tx = self.conn.begin().await?;

        // phone references client, so it goes first
        sqlx::query("DROP TABLE IF EXISTS phone")
            .execute(&mut *tx)
            .await?;
        sqlx::query("DROP TABLE IF EXISTS client")
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        info!("schema dropped");

        Ok(())
    }

    // Client operations
    pub async fn create_client(
        &mut self,
        first_name: &str,
        last_name: &str,
        email: &str,
        phones: &[i64],
    ) -> Result<i32> {
        let mut tx = self.conn.begin().await?;

        let client_id = sqlx::query_scalar::<_, i32>(
            r#"
            INSERT INTO client (first_name, last_name, email)
            VALUES ($1, $2, $3)
            RETURNING id
            "#,
        )
        .bind(first_name)
        .bind(last_name)
        .bind(email)
        .fetch_one(&mut *tx)
        .await?;

        for phone in phones {
            sqlx::query(
                r#"
                INSERT INTO phone (phone_number, client_id)
                VALUES ($1, $2)
                "#,
            )
            .bind(*phone)
            .bind(client_id)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        debug!(client_id, phones = phones.len(), "client created");

        Ok(client_id)
    }

    pub async fn update_client(&mut self, client_id: i32, update: &ClientUpdate) -> Result<()> {
        let mut tx = self.conn.begin().await?;

        if let Some(first_name) = &update.first_name {
            sqlx::query("UPDATE client SET first_name = $1 WHERE id = $2")
                .bind(first_name)
                .bind(client_id)
                .execute(&mut *tx)
                .await?;
        }
        if let Some(last_name) = &update.last_name {
            sqlx::query("UPDATE client SET last_name = $1 WHERE id = $2")
                .bind(last_name)
                .bind(client_id)
                .execute(&mut *tx)
                .await?;
        }
        if let Some(email) = &update.email {
            sqlx::query("UPDATE client SET email = $1 WHERE id = $2")
                .bind(email)
                .bind(client_id)
                .execute(&mut *tx)
                .await?;
        }
        for phone in &update.phones {
            sqlx::query("UPDATE phone SET phone_number = $1 WHERE id = $2")
                .bind(phone.number)
                .bind(phone.phone_id)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        debug!(client_id, phones = update.phones.len(), "client updated");

        Ok(())
    }

    /// Remove a client; its phones go with it through the cascade
    pub async fn delete_client(&mut self, client_id: i32) -> Result<u64> {
        let removed = sqlx::query("DELETE FROM client WHERE id = $1")
            .bind(client_id)
            .execute(&mut self.conn)
            .await?
            .rows_affected();
        debug!(client_id, removed, "client deleted");

        Ok(removed)
    }

    /// First client matching the lookup, if any
    pub async fn find_client(&mut self, lookup: &ClientLookup) -> Result<Option<Client>> {
        let client = match lookup {
            ClientLookup::Identity {
                first_name,
                last_name,
                email,
            } => {
                sqlx::query_as::<_, Client>(
                    r#"
                    SELECT id, first_name, last_name, email
                    FROM client
                    WHERE email = $1 AND first_name = $2 AND last_name = $3
                    "#,
                )
                .bind(email)
                .bind(first_name)
                .bind(last_name)
                .fetch_optional(&mut self.conn)
                .await?
            }
            ClientLookup::Phone(number) => {
                sqlx::query_as::<_, Client>(
                    r#"
                    SELECT id, first_name, last_name, email
                    FROM client
                    WHERE id = (SELECT client_id FROM phone WHERE phone_number = $1)
                    "#,
                )
                .bind(*number)
                .fetch_optional(&mut self.conn)
                .await?
            }
        };

        Ok(client)
    }

    // Phone operations
    pub async fn add_phone(&mut self, client_id: i32, number: i64) -> Result<i32> {
        let phone_id = sqlx::query_scalar::<_, i32>(
            r#"
            INSERT INTO phone (phone_number, client_id)
            VALUES ($1, $2)
            RETURNING id
            "#,
        )
        .bind(number)
        .bind(client_id)
        .fetch_one(&mut self.conn)
        .await?;
        debug!(client_id, phone_id, "phone added");

        Ok(phone_id)
    }

    pub async fn delete_phone(&mut self, number: i64) -> Result<u64> {
        let removed = sqlx::query("DELETE FROM phone WHERE phone_number = $1")
            .bind(number)
            .execute(&mut self.conn)
            .await?
            .rows_affected();
        debug!(removed, "phone deleted");

        Ok(removed)
    }

    pub async fn get_phones_by_client(&mut self, client_id: i32) -> Result<Vec<Phone>> {
        let phones = sqlx::query_as::<_, Phone>(
            r#"
            SELECT id, phone_number::int8 AS phone_number, client_id
            FROM phone
            WHERE client_id = $1
            ORDER BY id ASC
            "#,
        )
        .bind(client_id)
        .fetch_all(&mut self.conn)
        .await?;

        Ok(phones)
    }

    // Diagnostics
    pub async fn dump_all(&mut self) -> Result<TableDump> {
        let clients = sqlx::query_as::<_, Client>(
            "SELECT id, first_name, last_name, email FROM client ORDER BY id ASC",
        )
        .fetch_all(&mut self.conn)
        .await?;

        let phones = sqlx::query_as::<_, Phone>(
            "SELECT id, phone_number::int8 AS phone_number, client_id FROM phone ORDER BY id ASC",
        )
        .fetch_all(&mut self.conn)
        .await?;

        let dump = TableDump { clients, phones };
        println!("{dump}");

        Ok(dump)
    }
}

/// Connect using the loaded configuration
pub async fn init(config: &Config) -> Result<Database> {
    let options = config.connect_options()?;
    Database::connect(&options).await
}
