use super::*;
use crate::test_utils::{init_test_db, seed_campaign, seed_user};

#[tokio::test]
async fn test_crush_list_crud() {
    let pool = init_test_db().await.pool;
    seed_campaign(&pool, "c1").await;
    seed_user(&pool, "u1", "male", "female").await;

    {
        let mut conn = pool.acquire().await.unwrap();
        insert_crush(&mut conn, "u1", "c1", "b@campus.test", Some("Bea"), false)
            .await
            .unwrap();
        insert_crush(&mut conn, "u1", "c1", "a@campus.test", None, false)
            .await
            .unwrap();
        assert!(has_crush_on(&mut conn, "u1", "c1", "a@campus.test").await.unwrap());
        assert!(!has_crush_on(&mut conn, "u1", "c1", "z@campus.test").await.unwrap());
    }

    let emails = list_crush_emails(&pool, "u1", "c1").await.unwrap();
    assert_eq!(emails, vec!["a@campus.test", "b@campus.test"]);
    assert_eq!(count_crushed_by(&pool, "b@campus.test", "c1").await.unwrap(), 1);

    {
        let mut conn = pool.acquire().await.unwrap();
        delete_crushes_for_user(&mut conn, "u1", "c1").await.unwrap();
    }
    assert!(list_crush_emails(&pool, "u1", "c1").await.unwrap().is_empty());
}

#[tokio::test]
async fn test_mark_and_clear_mutual() {
    let pool = init_test_db().await.pool;
    seed_campaign(&pool, "c1").await;
    seed_user(&pool, "u1", "male", "female").await;

    {
        let mut conn = pool.acquire().await.unwrap();
        insert_crush(&mut conn, "u1", "c1", "u2@campus.test", None, false)
            .await
            .unwrap();
        mark_mutual(&mut conn, "u1", "c1", "u2@campus.test").await.unwrap();
    }
    let rows = list_crushes_for_user(&pool, "u1", "c1").await.unwrap();
    assert!(rows[0].is_mutual);

    {
        let mut conn = pool.acquire().await.unwrap();
        clear_mutual_pointing_at(&mut conn, "u2@campus.test", "c1").await.unwrap();
        assert_eq!(
            find_user_id_by_email(&mut conn, "u1@campus.test")
                .await
                .unwrap()
                .as_deref(),
            Some("u1")
        );
    }
    let rows = list_crushes_for_user(&pool, "u1", "c1").await.unwrap();
    assert!(!rows[0].is_mutual);
}
