//! End-to-end payment flow through a single service instance.

use std::sync::Arc;

use veil_core::VeilError;
use veil_stealth::StealthService;

#[tokio::test]
async fn test_resolve_derive_deposit_sweep() {
    let service = StealthService::new();

    let meta = service.resolve("alice.eth").await.unwrap();
    let ann = service.derive("alice.eth", &meta).await.unwrap();

    let addr = ann.address.to_hex_string();
    assert_eq!(addr.len(), 42);
    assert!(addr.starts_with("0x"));
    assert!(addr[2..].chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));

    // The recipient finds the announcement by tag
    let found = service
        .scan(&ann.view_tag.to_hex(), &meta.view_key.to_hex())
        .await
        .unwrap();
    assert!(found.iter().any(|a| a.id == ann.id));

    let note = service.deposit(ann.id, 5).await.unwrap();
    assert_eq!(note.amount, 5);
    assert!(!note.spent);
    assert!(service.state().total >= 5);

    let outcome = service
        .sweep(&meta.view_key.to_hex(), "0xabc0000000000000000000000000000000000000")
        .await
        .unwrap();
    assert!(outcome.swept_total >= 5);
    assert_eq!(outcome.transfers.len(), 1);
    assert_eq!(outcome.transfers[0].value, outcome.swept_total);
    assert!(outcome.spent_note_ids.contains(&note.id));

    let state = service.state();
    let swept = state.commitments.iter().find(|n| n.id == note.id).unwrap();
    assert!(swept.spent);
    assert_eq!(state.total, 0);
    assert_eq!(state.nullifiers.len(), 1);

    // Monotone: nothing left to sweep
    let again = service
        .sweep(&meta.view_key.to_hex(), "0xabc0000000000000000000000000000000000000")
        .await
        .unwrap();
    assert_eq!(again.swept_total, 0);
    assert!(again.transfers.is_empty());
}

#[tokio::test]
async fn test_wrong_view_key_sweeps_nothing() {
    let service = StealthService::new();

    let alice = service.resolve("alice.eth").await.unwrap();
    let mallory = service.resolve("mallory.eth").await.unwrap();

    let ann = service.derive("alice.eth", &alice).await.unwrap();
    service.deposit(ann.id, 10).await.unwrap();

    let outcome = service.sweep(&mallory.view_key.to_hex(), "0xdead").await.unwrap();
    assert!(outcome.is_empty());
    assert_eq!(service.state().total, 10);
}

#[tokio::test]
async fn test_unknown_announcement_creates_no_note() {
    let service = StealthService::new();
    let meta = service.resolve("alice.eth").await.unwrap();
    let ann = service.derive("alice.eth", &meta).await.unwrap();
    service.deposit(ann.id, 1).await.unwrap();

    let before = service.state().commitments.len();
    let err = service.deposit(ann.id + 100, 1).await.unwrap_err();

    assert!(matches!(err, VeilError::UnknownAnnouncement(_)));
    assert_eq!(service.state().commitments.len(), before);
}

#[tokio::test]
async fn test_invalid_amounts_rejected() {
    let service = StealthService::new();
    let meta = service.resolve("alice.eth").await.unwrap();
    let ann = service.derive("alice.eth", &meta).await.unwrap();

    for amount in [0, -5] {
        let err = service.deposit(ann.id, amount).await.unwrap_err();
        assert!(matches!(err, VeilError::InvalidAmount(_)));
    }
    assert!(service.state().commitments.is_empty());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_sweeps_spend_each_note_once() {
    let service = Arc::new(StealthService::new());
    let meta = service.resolve("alice.eth").await.unwrap();

    let mut expected = 0u128;
    for i in 1..=20u64 {
        let ann = service.derive("alice.eth", &meta).await.unwrap();
        service.deposit(ann.id, i128::from(i)).await.unwrap();
        expected += u128::from(i);
    }

    let view_key = meta.view_key.to_hex();
    let mut handles = Vec::new();
    for _ in 0..8 {
        let service = service.clone();
        let view_key = view_key.clone();
        handles.push(tokio::spawn(async move {
            service.sweep(&view_key, "0xabc").await.unwrap()
        }));
    }

    let mut total = 0u128;
    let mut ids = Vec::new();
    for handle in handles {
        let outcome = handle.await.unwrap();
        total += outcome.swept_total;
        ids.extend(outcome.spent_note_ids);
    }

    ids.sort_unstable();
    assert_eq!(total, expected);
    assert_eq!(ids, (1..=20).collect::<Vec<u64>>());
    assert_eq!(service.state().total, 0);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_derive_ids_unique() {
    let service = Arc::new(StealthService::new());
    let meta = service.resolve("alice.eth").await.unwrap();

    let mut handles = Vec::new();
    for _ in 0..50 {
        let service = service.clone();
        let meta = meta.clone();
        handles.push(tokio::spawn(async move {
            service.derive("alice.eth", &meta).await.unwrap().id
        }));
    }

    let mut ids = Vec::new();
    for handle in handles {
        ids.push(handle.await.unwrap());
    }
    ids.sort_unstable();
    assert_eq!(ids, (1..=50).collect::<Vec<u64>>());
}
