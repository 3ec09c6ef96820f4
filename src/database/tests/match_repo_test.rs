use super::*;
use crate::test_utils::{init_test_db, seed_campaign, seed_user};

fn new_match(campaign_id: &str, user1: &str, user2: &str, score: f64) -> NewMatchRow {
    NewMatchRow {
        campaign_id: campaign_id.into(),
        user1_id: user1.into(),
        user2_id: user2.into(),
        compatibility_score: score,
        match_tier: "great".into(),
        shared_interests: "{}".into(),
        is_mutual_crush: false,
        rank_for_user1: Some(1),
        rank_for_user2: Some(1),
    }
}

async fn seed_pair(pool: &SqlitePool) {
    seed_campaign(pool, "c1").await;
    seed_campaign(pool, "c2").await;
    seed_user(pool, "u1", "male", "female").await;
    seed_user(pool, "u2", "female", "male").await;
    seed_user(pool, "u3", "female", "male").await;
}

#[tokio::test]
async fn test_insert_and_get_match_defaults() {
    let pool = init_test_db().await.pool;
    seed_pair(&pool).await;

    let id = insert_match(&pool, &new_match("c1", "u1", "u2", 81.5)).await.unwrap();
    let row = get_match(&pool, &id).await.unwrap().expect("match");

    assert_eq!(row.compatibility_score, 81.5);
    assert!(!row.is_revealed);
    assert!(row.revealed_at.is_none());
    assert!(!row.is_mutual_interest);
    assert!(!row.messaging_unlocked);
}

#[tokio::test]
async fn test_self_pair_rejected_by_schema() {
    let pool = init_test_db().await.pool;
    seed_pair(&pool).await;

    let result = insert_match(&pool, &new_match("c1", "u1", "u1", 90.0)).await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_delete_matches_by_campaign_is_scoped() {
    let pool = init_test_db().await.pool;
    seed_pair(&pool).await;

    let m1 = insert_match(&pool, &new_match("c1", "u1", "u2", 70.0)).await.unwrap();
    insert_match(&pool, &new_match("c1", "u1", "u3", 60.0)).await.unwrap();
    insert_match(&pool, &new_match("c2", "u1", "u2", 65.0)).await.unwrap();
    insert_interaction(&pool, &m1, "u1", "interested").await.unwrap();
    crate::database::message_repo::insert_message(&pool, &m1, "u1", "u2", "hi", chrono::Utc::now())
        .await
        .unwrap();

    let removed = delete_matches_by_campaign(&pool, "c1").await.unwrap();
    assert_eq!(removed, 2);
    assert_eq!(count_matches_for_campaign(&pool, "c1").await.unwrap(), 0);
    assert_eq!(count_matches_for_campaign(&pool, "c2").await.unwrap(), 1);

    let orphans: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM match_interactions")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(orphans.0, 0);

    let messages: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM messages")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(messages.0, 0);
}

#[tokio::test]
async fn test_list_matches_for_user_orders_by_own_rank() {
    let pool = init_test_db().await.pool;
    seed_pair(&pool).await;

    let mut first = new_match("c1", "u2", "u1", 90.0);
    first.rank_for_user1 = Some(1);
    first.rank_for_user2 = Some(2);
    let mut second = new_match("c1", "u1", "u3", 80.0);
    second.rank_for_user1 = Some(1);
    second.rank_for_user2 = Some(1);
    insert_match(&pool, &first).await.unwrap();
    insert_match(&pool, &second).await.unwrap();

    let rows = list_matches_for_user(&pool, "u1", "c1").await.unwrap();
    let partners: Vec<&str> = rows.iter().filter_map(|m| m.partner_of("u1")).collect();
    assert_eq!(partners, vec!["u3", "u2"]);
}

#[tokio::test]
async fn test_reveal_and_interest_flags() {
    let pool = init_test_db().await.pool;
    seed_pair(&pool).await;

    let id = insert_match(&pool, &new_match("c1", "u1", "u2", 75.0)).await.unwrap();
    reveal_match(&pool, &id, chrono::Utc::now()).await.unwrap();
    insert_interaction(&pool, &id, "u2", "interested").await.unwrap();
    set_mutual_interest(&pool, &id).await.unwrap();

    let row = get_match(&pool, &id).await.unwrap().unwrap();
    assert!(row.is_revealed);
    assert!(row.revealed_at.is_some());
    assert!(row.is_mutual_interest);
    assert!(row.messaging_unlocked);
    assert_eq!(
        latest_interaction(&pool, &id, "u2").await.unwrap().as_deref(),
        Some("interested")
    );
    assert!(latest_interaction(&pool, &id, "u1").await.unwrap().is_none());
}
