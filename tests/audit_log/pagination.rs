//! Pagination Tests
//!
//! limit / offset / descending on the store, and page-size config on the
//! facade.

use crate::*;
use auditlog::prelude::*;

const FIVE: [&str; 5] = ["e0", "e1", "e2", "e3", "e4"];

#[test]
fn test_default_visits_all_in_append_order() {
    let store = create_store();
    let key = dashboard("1");
    append_all(store.as_ref(), &key, &FIVE);

    assert_eq!(visit_values(store.as_ref(), &key, FindOptions::new()), FIVE.to_vec());
}

#[test]
fn test_limit_caps_visits() {
    let store = create_store();
    let key = dashboard("1");
    append_all(store.as_ref(), &key, &FIVE);

    for limit in 0..8 {
        let visited = visit_values(store.as_ref(), &key, FindOptions::new().limit(limit));
        assert_eq!(visited.len(), limit.min(FIVE.len()), "limit {}", limit);
        assert_eq!(visited, FIVE[..limit.min(5)].to_vec());
    }
}

#[test]
fn test_offset_skips_first() {
    let store = create_store();
    let key = dashboard("1");
    append_all(store.as_ref(), &key, &FIVE);

    assert_eq!(
        visit_values(store.as_ref(), &key, FindOptions::new().offset(3)),
        vec!["e3", "e4"]
    );
    assert!(visit_values(store.as_ref(), &key, FindOptions::new().offset(5)).is_empty());
    assert!(visit_values(store.as_ref(), &key, FindOptions::new().offset(50)).is_empty());
}

#[test]
fn test_offset_then_limit() {
    let store = create_store();
    let key = dashboard("1");
    append_all(store.as_ref(), &key, &FIVE);

    assert_eq!(
        visit_values(store.as_ref(), &key, FindOptions::new().offset(1).limit(3)),
        vec!["e1", "e2", "e3"]
    );
    assert_eq!(
        visit_values(store.as_ref(), &key, FindOptions::new().offset(4).limit(3)),
        vec!["e4"]
    );
}

#[test]
fn test_descending() {
    let store = create_store();
    let key = dashboard("1");
    append_all(store.as_ref(), &key, &FIVE);

    assert_eq!(
        visit_values(store.as_ref(), &key, FindOptions::new().descending()),
        vec!["e4", "e3", "e2", "e1", "e0"]
    );
    assert_eq!(
        visit_values(store.as_ref(), &key, FindOptions::new().descending().limit(2)),
        vec!["e4", "e3"]
    );
    assert_eq!(
        visit_values(store.as_ref(), &key, FindOptions::new().descending().offset(3)),
        vec!["e1", "e0"]
    );
}

#[test]
fn test_pages_cover_log_exactly_once() {
    let store = create_store();
    let key = dashboard("paged");
    let values: Vec<String> = (0..20).map(|i| format!("v{:02}", i)).collect();
    let refs: Vec<&str> = values.iter().map(String::as_str).collect();
    append_all(store.as_ref(), &key, &refs);

    let mut seen = Vec::new();
    let mut offset = 0;
    loop {
        let page = visit_values(store.as_ref(), &key, FindOptions::new().offset(offset).limit(6));
        if page.is_empty() {
            break;
        }
        offset += page.len();
        seen.extend(page);
    }
    assert_eq!(seen, refs);
}

#[test]
fn test_facade_default_page_size() {
    let store = create_store();
    let key = dashboard("1");
    append_all(store.as_ref(), &key, &FIVE);

    let audit = AuditLog::builder()
        .store(store)
        .config(AuditLogConfig::from_toml_str("default_page_size = 2\nmax_page_size = 4").unwrap())
        .build()
        .unwrap();
    let ctx = audit.context();
    let id = ResourceId::new("1");

    let page = audit
        .history(&ctx, &ResourceType::Dashboards, &id, FindOptions::new())
        .unwrap();
    assert_eq!(page.len(), 2);

    let capped = audit
        .history(&ctx, &ResourceType::Dashboards, &id, FindOptions::new().limit(100))
        .unwrap();
    assert_eq!(capped.len(), 4);

    let newest = audit
        .history(&ctx, &ResourceType::Dashboards, &id, FindOptions::new().descending().limit(1))
        .unwrap();
    assert_eq!(newest[0].description, "e4");
    assert_eq!(newest[0].timestamp, day(5));
}
