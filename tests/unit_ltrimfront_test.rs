use bytes::Bytes;
use opaldb::Db;

fn b(s: &'static str) -> Bytes {
    Bytes::from_static(s.as_bytes())
}

#[test]
fn test_ltrim_front_partial() {
    let db = Db::memory();

    db.rpush(b"mylist", &[b("a"), b("b"), b("c"), b("d")]).unwrap();
    let removed = db.ltrim_front(b"mylist", 2).unwrap();
    assert_eq!(removed, 2);
    assert_eq!(db.lrange(b"mylist", 0, -1).unwrap(), vec![b("c"), b("d")]);
}

#[test]
fn test_ltrim_front_more_than_length_drains() {
    let db = Db::memory();

    db.rpush(b"mylist", &[b("a"), b("b"), b("c")]).unwrap();
    let removed = db.ltrim_front(b"mylist", 10).unwrap();
    assert_eq!(removed, 3);
    assert!(!db.lkey_exists(b"mylist").unwrap());
    assert_eq!(db.llen(b"mylist").unwrap(), 0);
}

#[test]
fn test_ltrim_front_zero_is_noop() {
    let db = Db::memory();

    db.rpush(b"mylist", &[b("a")]).unwrap();
    assert_eq!(db.ltrim_front(b"mylist", 0).unwrap(), 0);
    assert_eq!(db.llen(b"mylist").unwrap(), 1);
}

#[test]
fn test_ltrim_front_negative_is_noop() {
    let db = Db::memory();

    db.rpush(b"mylist", &[b("a"), b("b")]).unwrap();
    assert_eq!(db.ltrim_front(b"mylist", -3).unwrap(), 0);
    assert_eq!(db.llen(b"mylist").unwrap(), 2);
}

#[test]
fn test_ltrim_front_empty_list_is_noop() {
    let db = Db::memory();

    assert_eq!(db.ltrim_front(b"missing", 5).unwrap(), 0);
}
