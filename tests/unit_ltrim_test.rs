use bytes::Bytes;
use opaldb::{Db, OpalDBError};

fn b(s: &'static str) -> Bytes {
    Bytes::from_static(s.as_bytes())
}

fn seeded() -> Db<opaldb::MemoryEngine> {
    let db = Db::memory();
    db.rpush(b"mylist", &[b("a"), b("b"), b("c"), b("d"), b("e")])
        .unwrap();
    db
}

#[test]
fn test_ltrim_keeps_middle_window() {
    let db = seeded();

    db.ltrim(b"mylist", 1, 3).unwrap();
    assert_eq!(db.lrange(b"mylist", 0, -1).unwrap(), vec![b("b"), b("c"), b("d")]);
    assert_eq!(db.llen(b"mylist").unwrap(), 3);
}

#[test]
fn test_ltrim_whole_range_is_noop() {
    let db = seeded();

    db.ltrim(b"mylist", 0, -1).unwrap();
    assert_eq!(
        db.lrange(b"mylist", 0, -1).unwrap(),
        vec![b("a"), b("b"), b("c"), b("d"), b("e")]
    );
}

#[test]
fn test_ltrim_negative_indices() {
    let db = seeded();

    db.ltrim(b"mylist", -3, -2).unwrap();
    assert_eq!(db.lrange(b"mylist", 0, -1).unwrap(), vec![b("c"), b("d")]);
}

#[test]
fn test_ltrim_start_past_length_rejected() {
    let db = seeded();

    assert_eq!(db.ltrim(b"mylist", 5, 10).unwrap_err(), OpalDBError::TrimInvalid);
    assert_eq!(db.ltrim(b"mylist", 3, 1).unwrap_err(), OpalDBError::TrimInvalid);
    // The list is untouched on rejection.
    assert_eq!(db.llen(b"mylist").unwrap(), 5);
}

#[test]
fn test_ltrim_empty_list_rejected() {
    let db = Db::memory();

    assert_eq!(db.ltrim(b"missing", 0, -1).unwrap_err(), OpalDBError::TrimInvalid);
}

// The rejection happens after negative conversion but before `start` is
// clamped to zero, so a window that converts to [-5, -1] passes the check
// and then drains the whole list through the tail-side delete loop.
#[test]
fn test_ltrim_doubly_negative_window_drains_list() {
    let db = seeded();

    db.ltrim(b"mylist", -10, -6).unwrap();
    assert_eq!(db.llen(b"mylist").unwrap(), 0);
    assert!(!db.lkey_exists(b"mylist").unwrap());
    assert!(db.engine().is_empty());
}

#[test]
fn test_ltrim_to_single_element() {
    let db = seeded();

    db.ltrim(b"mylist", 2, 2).unwrap();
    assert_eq!(db.lrange(b"mylist", 0, -1).unwrap(), vec![b("c")]);
    assert!(db.lkey_exists(b"mylist").unwrap());
}
