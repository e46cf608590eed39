use std::env;
use uuid::Uuid;

use rust_promo_leads::data::db::Database;
use rust_promo_leads::data::db_storage::{LeadStore, PgLeadStore};
use rust_promo_leads::intake::submit;
use rust_promo_leads::models::{IntakeOutcome, LeadSubmission};

/// Integration smoke test for lead storage against a real PostgreSQL.
/// Marked ignored to avoid running against production by accident; set TEST_DATABASE_URL to run.
#[tokio::test]
#[ignore]
async fn lead_intake_smoke_test() -> anyhow::Result<()> {
    let db_url = env::var("TEST_DATABASE_URL")
        .map_err(|_| anyhow::anyhow!("Set TEST_DATABASE_URL to run this test"))?;

    let db = Database::new(&db_url, 2).await?;
    db.ensure_schema().await?;
    let store = PgLeadStore::new(db.pool.clone());

    // Unique email so repeated runs start from zero matches.
    let email = format!("smoke-{}@example.com", Uuid::new_v4());
    let submission = LeadSubmission {
        name: Some("Smoke Test".to_string()),
        email: Some(email.clone()),
        phone: Some("555".to_string()),
    };

    let started = chrono::Utc::now();
    let first = submit(&store, submission.clone()).await?;
    let IntakeOutcome::Created { lead } = first else {
        anyhow::bail!("first submission should create a lead");
    };
    assert_eq!(lead.email.as_deref(), Some(email.as_str()));
    // Allow for clock skew between the test host and the database.
    assert!(lead.created_at >= started - chrono::Duration::seconds(5));

    submit(&store, submission.clone()).await?;
    let third = submit(&store, submission).await?;
    assert!(matches!(third, IntakeOutcome::DuplicateDetected { .. }));

    let stored = store.find_by_email(Some(email.as_str())).await?;
    assert_eq!(stored.len(), 2);

    let recent = store.recent(Some(email.as_str()), 10).await?;
    assert_eq!(recent.len(), 2);
    assert!(recent[0].created_at >= recent[1].created_at);

    Ok(())
}
