use chrono::{Duration, Utc};

use mediscan::application::ports::{SessionRepository, SessionRepositoryError};
use mediscan::domain::{
    ChatEntry, ContentType, Document, DocumentText, Session, SessionId, TaskKind,
};
use mediscan::infrastructure::persistence::InMemorySessionRepository;

fn session(text: &str) -> Session {
    Session::new(
        Document::new("labs.pdf".to_string(), ContentType::Pdf, text.len() as u64),
        DocumentText::from(text),
    )
}

#[tokio::test]
async fn given_created_session_when_getting_then_returns_it() {
    let repo = InMemorySessionRepository::new();
    let id = repo.create(session("LDL 130")).await.unwrap();

    let stored = repo.get(id).await.unwrap();

    assert_eq!(stored.id, id);
    assert_eq!(stored.text.as_str(), "LDL 130");
    assert!(stored.history.is_empty());
}

#[tokio::test]
async fn given_duplicate_id_when_creating_then_returns_already_exists() {
    let repo = InMemorySessionRepository::new();
    let original = session("a");
    let duplicate = original.clone();
    repo.create(original).await.unwrap();

    let result = repo.create(duplicate.clone()).await;

    assert!(matches!(
        result,
        Err(SessionRepositoryError::AlreadyExists(id)) if id == duplicate.id
    ));
}

#[tokio::test]
async fn given_session_when_replacing_document_then_text_changes_and_history_stays() {
    let repo = InMemorySessionRepository::new();
    let id = repo.create(session("old")).await.unwrap();
    repo.append_history(id, ChatEntry::new(TaskKind::Summary, None, "s".to_string()))
        .await
        .unwrap();

    let replacement = Document::new("new.pdf".to_string(), ContentType::Pdf, 3);
    repo.replace_document(id, replacement.clone(), DocumentText::from("new"))
        .await
        .unwrap();

    let stored = repo.get(id).await.unwrap();
    assert_eq!(stored.text.as_str(), "new");
    assert_eq!(stored.document, replacement);
    assert_eq!(stored.history.len(), 1);
}

#[tokio::test]
async fn given_history_entries_when_appending_then_keeps_insertion_order() {
    let repo = InMemorySessionRepository::new();
    let id = repo.create(session("x")).await.unwrap();

    for answer in ["one", "two", "three"] {
        repo.append_history(id, ChatEntry::new(TaskKind::Qa, Some("q".to_string()), answer.to_string()))
            .await
            .unwrap();
    }

    let answers: Vec<String> = repo
        .get(id)
        .await
        .unwrap()
        .history
        .into_iter()
        .map(|e| e.answer)
        .collect();
    assert_eq!(answers, vec!["one", "two", "three"]);
}

#[tokio::test]
async fn given_missing_session_when_mutating_then_returns_not_found() {
    let repo = InMemorySessionRepository::new();
    let orphan = session("x");
    let id = orphan.id;

    assert!(matches!(repo.get(id).await, Err(SessionRepositoryError::NotFound(_))));
    assert!(matches!(
        repo.append_history(id, ChatEntry::new(TaskKind::Summary, None, String::new())).await,
        Err(SessionRepositoryError::NotFound(_))
    ));
    assert!(matches!(repo.delete(id).await, Err(SessionRepositoryError::NotFound(_))));
}

#[tokio::test]
async fn given_deleted_session_when_getting_then_returns_not_found() {
    let repo = InMemorySessionRepository::new();
    let id = repo.create(session("x")).await.unwrap();

    repo.delete(id).await.unwrap();

    assert!(repo.is_empty().await);
    assert!(repo.get(id).await.is_err());
}

#[tokio::test]
async fn given_mixed_activity_when_evicting_idle_then_removes_only_stale_sessions() {
    let repo = InMemorySessionRepository::new();
    let mut stale = session("stale");
    stale.last_active_at = Utc::now() - Duration::hours(2);
    let stale_id = repo.create(stale).await.unwrap();
    let fresh_id = repo.create(session("fresh")).await.unwrap();

    let evicted = repo.evict_idle(Utc::now() - Duration::hours(1)).await;

    assert_eq!(evicted, 1);
    assert!(repo.get(stale_id).await.is_err());
    assert!(repo.get(fresh_id).await.is_ok());
}

#[tokio::test]
async fn given_stale_session_when_touching_then_it_is_no_longer_idle() {
    let repo = InMemorySessionRepository::new();
    let mut stale = session("stale");
    stale.last_active_at = Utc::now() - Duration::hours(2);
    let id = repo.create(stale).await.unwrap();

    let created_at = repo.get(id).await.unwrap().created_at;

    let snapshot = repo.touch(id).await.unwrap();

    assert_eq!(snapshot.created_at, created_at);
    assert!(snapshot.last_active_at > created_at - Duration::hours(1));
    assert!(!snapshot.is_idle_since(Utc::now() - Duration::hours(1)));
    assert_eq!(repo.evict_idle(Utc::now() - Duration::hours(1)).await, 0);
    assert!(matches!(
        repo.touch(SessionId::new()).await,
        Err(SessionRepositoryError::NotFound(_))
    ));
}
