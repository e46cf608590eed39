use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::errors::{AppError, ResultExt};
use crate::models::{Lead, NewLead};

/// Storage seam for leads: a filtered read and a single atomic insert.
#[async_trait]
pub trait LeadStore: Send + Sync {
    /// Returns every stored lead whose email equals `email`.
    ///
    /// `None` matches leads stored without an email.
    async fn find_by_email(&self, email: Option<&str>) -> Result<Vec<Lead>, AppError>;

    /// Writes one lead, assigning its id and timestamp. All or nothing.
    async fn insert(&self, lead: NewLead) -> Result<Lead, AppError>;
}

/// PostgreSQL-backed lead storage.
pub struct PgLeadStore {
    pool: PgPool,
}

impl PgLeadStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Most recent leads first, optionally restricted to one email.
    pub async fn recent(&self, email: Option<&str>, limit: i64) -> Result<Vec<Lead>, AppError> {
        let leads = match email {
            Some(email) => {
                sqlx::query_as::<_, Lead>(
                    r#"
                    SELECT id, email, name, phone, created_at
                    FROM prospectos_clientes
                    WHERE email = $1
                    ORDER BY created_at DESC
                    LIMIT $2
                    "#,
                )
                .bind(email)
                .bind(limit)
                .fetch_all(&self.pool)
                .await
            }
            None => {
                sqlx::query_as::<_, Lead>(
                    r#"
                    SELECT id, email, name, phone, created_at
                    FROM prospectos_clientes
                    ORDER BY created_at DESC
                    LIMIT $1
                    "#,
                )
                .bind(limit)
                .fetch_all(&self.pool)
                .await
            }
        };

        leads.context("Failed to list leads")
    }
}

#[async_trait]
impl LeadStore for PgLeadStore {
    async fn find_by_email(&self, email: Option<&str>) -> Result<Vec<Lead>, AppError> {
        sqlx::query_as::<_, Lead>(
            r#"
            SELECT id, email, name, phone, created_at
            FROM prospectos_clientes
            WHERE email IS NOT DISTINCT FROM $1
            ORDER BY created_at ASC
            "#,
        )
        .bind(email)
        .fetch_all(&self.pool)
        .await
        .context("Failed to query leads by email")
    }

    async fn insert(&self, lead: NewLead) -> Result<Lead, AppError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .context("Failed to open lead transaction")?;

        let stored = sqlx::query_as::<_, Lead>(
            r#"
            INSERT INTO prospectos_clientes (id, email, name, phone, created_at)
            VALUES ($1, $2, $3, $4, now())
            RETURNING id, email, name, phone, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&lead.email)
        .bind(&lead.name)
        .bind(&lead.phone)
        .fetch_one(&mut *tx)
        .await
        .context("Failed to insert lead")?;

        tx.commit().await.context("Failed to commit lead")?;

        Ok(stored)
    }
}

/// In-process lead storage, for tests and local runs without a database.
#[derive(Default)]
pub struct MemoryLeadStore {
    leads: RwLock<Vec<Lead>>,
}

impl MemoryLeadStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every stored lead in insertion order.
    pub async fn all(&self) -> Vec<Lead> {
        self.leads.read().await.clone()
    }

    pub async fn len(&self) -> usize {
        self.leads.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.leads.read().await.is_empty()
    }
}

#[async_trait]
impl LeadStore for MemoryLeadStore {
    async fn find_by_email(&self, email: Option<&str>) -> Result<Vec<Lead>, AppError> {
        let leads = self.leads.read().await;
        Ok(leads
            .iter()
            .filter(|lead| lead.email.as_deref() == email)
            .cloned()
            .collect())
    }

    async fn insert(&self, lead: NewLead) -> Result<Lead, AppError> {
        let stored = Lead {
            id: Uuid::new_v4(),
            email: lead.email,
            name: lead.name,
            phone: lead.phone,
            created_at: Utc::now(),
        };
        self.leads.write().await.push(stored.clone());
        Ok(stored)
    }
}
