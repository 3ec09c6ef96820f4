use super::*;
use crate::database::match_repo::{insert_match, NewMatchRow};
use crate::services::interest::mark_interest;
use crate::test_utils::{init_test_db, seed_campaign, seed_user};

async fn setup() -> (SqlitePool, String) {
    let pool = init_test_db().await.pool;
    seed_campaign(&pool, "c1").await;
    seed_user(&pool, "ana", "female", "male").await;
    seed_user(&pool, "ben", "male", "female").await;
    seed_user(&pool, "cy", "male", "female").await;

    let id = insert_match(
        &pool,
        &NewMatchRow {
            campaign_id: "c1".into(),
            user1_id: "ana".into(),
            user2_id: "ben".into(),
            compatibility_score: 90.0,
            match_tier: "excellent".into(),
            shared_interests: "{}".into(),
            is_mutual_crush: false,
            rank_for_user1: Some(1),
            rank_for_user2: Some(1),
        },
    )
    .await
    .unwrap();
    (pool, id)
}

async fn unlock(pool: &SqlitePool, match_id: &str) {
    mark_interest(pool, match_id, "ana", true).await.unwrap();
    let outcome = mark_interest(pool, match_id, "ben", true).await.unwrap();
    assert!(outcome.is_mutual_interest);
}

#[tokio::test]
async fn test_locked_until_mutual_interest() {
    let (pool, id) = setup().await;

    assert!(matches!(
        send_message(&pool, &id, "ana", "hi", Utc::now()).await,
        Err(MessageError::Locked(_))
    ));
    assert!(matches!(
        list_messages(&pool, &id, "ana", Utc::now()).await,
        Err(MessageError::Locked(_))
    ));

    // One-sided interest is not enough
    mark_interest(&pool, &id, "ana", true).await.unwrap();
    assert!(matches!(
        mark_read(&pool, &id, "ana", &["x".to_string()], Utc::now()).await,
        Err(MessageError::Locked(_))
    ));
}

#[tokio::test]
async fn test_outsiders_and_missing_matches_rejected() {
    let (pool, id) = setup().await;
    unlock(&pool, &id).await;

    assert!(matches!(
        send_message(&pool, &id, "cy", "hi", Utc::now()).await,
        Err(MessageError::Forbidden { .. })
    ));
    assert!(matches!(
        list_messages(&pool, &id, "cy", Utc::now()).await,
        Err(MessageError::Forbidden { .. })
    ));
    assert!(matches!(
        mark_read(&pool, &id, "cy", &["x".to_string()], Utc::now()).await,
        Err(MessageError::Forbidden { .. })
    ));
    assert!(matches!(
        send_message(&pool, "missing", "ana", "hi", Utc::now()).await,
        Err(MessageError::NotFound(_))
    ));
}

#[tokio::test]
async fn test_blank_message_rejected() {
    let (pool, id) = setup().await;
    unlock(&pool, &id).await;

    assert!(matches!(
        send_message(&pool, &id, "ana", "   ", Utc::now()).await,
        Err(MessageError::EmptyContent)
    ));
}

#[tokio::test]
async fn test_send_addresses_partner_and_reading_marks_read() {
    let (pool, id) = setup().await;
    unlock(&pool, &id).await;

    let sent = send_message(&pool, &id, "ana", "coffee?", Utc::now()).await.unwrap();
    assert_eq!(sent.recipient_id, "ben");
    assert_eq!(unread_count(&pool, "ben").await.unwrap(), 1);

    // The sender reading does not clear the recipient's unread state
    list_messages(&pool, &id, "ana", Utc::now()).await.unwrap();
    assert_eq!(unread_count(&pool, "ben").await.unwrap(), 1);

    let seen = list_messages(&pool, &id, "ben", Utc::now()).await.unwrap();
    assert_eq!(seen.len(), 1);
    assert!(!seen[0].is_read, "listing returns the pre-read state");
    assert_eq!(unread_count(&pool, "ben").await.unwrap(), 0);

    let again = list_messages(&pool, &id, "ben", Utc::now()).await.unwrap();
    assert!(again[0].is_read);
}

#[tokio::test]
async fn test_mark_read_ignores_foreign_ids() {
    let (pool, id) = setup().await;
    unlock(&pool, &id).await;

    let to_ben = send_message(&pool, &id, "ana", "one", Utc::now()).await.unwrap();
    let to_ana = send_message(&pool, &id, "ben", "two", Utc::now()).await.unwrap();

    let changed = mark_read(&pool, &id, "ben", &[to_ben.id, to_ana.id], Utc::now())
        .await
        .unwrap();
    assert_eq!(changed, 1);
    assert_eq!(unread_count(&pool, "ana").await.unwrap(), 1);
}
