/// Property-based tests using proptest
/// Tests invariants that should hold for all submitted values
use proptest::prelude::*;
use rust_promo_leads::db_storage::{LeadStore, MemoryLeadStore};
use rust_promo_leads::intake::{submit, DUPLICATE_THRESHOLD};
use rust_promo_leads::models::{IntakeOutcome, LeadSubmission, NewLead};
use rust_promo_leads::pages::escape_html;

fn runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_current_thread()
        .build()
        .unwrap()
}

// Property: escaping never leaves markup characters behind
proptest! {
    #[test]
    fn escaped_text_has_no_markup(raw in "\\PC*") {
        let escaped = escape_html(&raw);
        prop_assert!(!escaped.contains('<'));
        prop_assert!(!escaped.contains('>'));
        prop_assert!(!escaped.contains('"'));
        prop_assert!(!escaped.contains('\''));
    }

    #[test]
    fn plain_text_is_unchanged(raw in "[a-zA-Z0-9 @.]*") {
        prop_assert_eq!(escape_html(&raw), raw);
    }
}

// Property: the duplicate branch depends only on how many leads share the email
proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn outcome_follows_prior_count(
        prior in 0usize..5,
        name in "[A-Za-z ]{0,20}",
        email in "[a-z]{1,8}@[a-z]{1,8}\\.com",
        phone in "[0-9 +()-]{0,15}",
    ) {
        let rt = runtime();
        let (outcome, before, after) = rt.block_on(async {
            let store = MemoryLeadStore::new();
            for _ in 0..prior {
                store
                    .insert(NewLead {
                        email: Some(email.clone()),
                        name: None,
                        phone: None,
                    })
                    .await
                    .unwrap();
            }
            // Noise under another address must not count
            store
                .insert(NewLead {
                    email: Some(format!("other.{}", email)),
                    name: None,
                    phone: None,
                })
                .await
                .unwrap();

            let before = store.len().await;
            let outcome = submit(
                &store,
                LeadSubmission {
                    name: Some(name.clone()),
                    email: Some(email.clone()),
                    phone: Some(phone.clone()),
                },
            )
            .await
            .unwrap();
            (outcome, before, store.len().await)
        });

        if prior > DUPLICATE_THRESHOLD {
            prop_assert_eq!(outcome, IntakeOutcome::DuplicateDetected { email: Some(email) });
            prop_assert_eq!(after, before);
        } else {
            match outcome {
                IntakeOutcome::Created { lead } => {
                    prop_assert_eq!(lead.name, Some(name));
                    prop_assert_eq!(lead.email, Some(email));
                    prop_assert_eq!(lead.phone, Some(phone));
                }
                other => prop_assert!(false, "expected Created, got {:?}", other),
            }
            prop_assert_eq!(after, before + 1);
        }
    }
}
