use std::time::Duration;
use tokio::time::sleep;
use tulu::Role;
use tulu::services::session_manager::SessionManager;

#[tokio::test]
async fn basic_session_flow() {
    let mgr = SessionManager::new(Duration::from_secs(60));
    let sid = mgr.create_session().await;
    assert!(!sid.is_empty());
    let len = mgr.append(&sid, Role::User, "merhaba").await;
    assert_eq!(len, 1);
    let len = mgr.append(&sid, Role::Assistant, "Merhaba!").await;
    assert_eq!(len, 2);
    let history = mgr.history(&sid).await.unwrap();
    assert_eq!(history[0].role, Role::User);
    assert_eq!(history[1].content, "Merhaba!");
    assert!(mgr.remove(&sid).await);
}

#[tokio::test]
async fn test_session_expiration() {
    let mgr = SessionManager::new(Duration::from_millis(10));
    let sid = mgr.create_session().await;

    sleep(Duration::from_millis(20)).await;

    let removed_count = mgr.purge_expired().await;
    assert_eq!(removed_count, 1, "Should have removed 1 expired session");
    assert!(!mgr.remove(&sid).await, "Session should already be gone");
}

#[tokio::test]
async fn test_expired_token_is_reregistered() {
    let mgr = SessionManager::new(Duration::from_millis(10));
    let sid = mgr.create_session().await;
    sleep(Duration::from_millis(20)).await;
    mgr.purge_expired().await;

    assert_eq!(mgr.resolve(Some(&sid)).await, sid);
    assert_eq!(mgr.history(&sid).await.unwrap().len(), 0);
}
