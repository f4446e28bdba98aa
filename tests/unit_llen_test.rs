use bytes::Bytes;
use opaldb::Db;

fn b(s: &'static str) -> Bytes {
    Bytes::from_static(s.as_bytes())
}

#[test]
fn test_llen_missing_list_is_zero() {
    let db = Db::memory();

    assert_eq!(db.llen(b"missing").unwrap(), 0);
}

#[test]
fn test_llen_tracks_pushes_and_pops() {
    let db = Db::memory();

    db.rpush(b"mylist", &[b("a"), b("b"), b("c")]).unwrap();
    assert_eq!(db.llen(b"mylist").unwrap(), 3);

    db.lpush(b"mylist", &[b("z")]).unwrap();
    assert_eq!(db.llen(b"mylist").unwrap(), 4);

    db.lpop(b"mylist").unwrap();
    db.rpop(b"mylist").unwrap();
    assert_eq!(db.llen(b"mylist").unwrap(), 2);

    db.lpop(b"mylist").unwrap();
    db.lpop(b"mylist").unwrap();
    assert_eq!(db.llen(b"mylist").unwrap(), 0);
}

#[test]
fn test_llen_is_a_pure_read() {
    let db = Db::memory();

    db.rpush(b"mylist", &[b("a")]).unwrap();
    let before = db.engine().len();
    db.llen(b"mylist").unwrap();
    db.llen(b"missing").unwrap();
    assert_eq!(db.engine().len(), before);
}
