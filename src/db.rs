use sqlx::{postgres::PgPoolOptions, PgPool};

const CREATE_LEADS_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS prospectos_clientes (
        id UUID PRIMARY KEY,
        email TEXT,
        name TEXT,
        phone TEXT,
        created_at TIMESTAMPTZ NOT NULL DEFAULT now()
    )
"#;

const CREATE_EMAIL_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS prospectos_clientes_email_idx ON prospectos_clientes (email)";

pub struct Database {
    pub pool: PgPool,
}

impl Database {
    pub async fn new(database_url: &str, max_connections: u32) -> anyhow::Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;

        sqlx::query("SELECT 1").execute(&pool).await?;

        Ok(Self { pool })
    }

    /// Creates the leads table if it does not exist yet.
    ///
    /// The email index only speeds up the duplicate lookup; it is not unique.
    pub async fn ensure_schema(&self) -> anyhow::Result<()> {
        sqlx::query(CREATE_LEADS_TABLE).execute(&self.pool).await?;
        sqlx::query(CREATE_EMAIL_INDEX).execute(&self.pool).await?;
        tracing::debug!("Lead schema ready");
        Ok(())
    }
}
