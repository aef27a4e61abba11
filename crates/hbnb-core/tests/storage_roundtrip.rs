//! Integration tests for file persistence.

use hbnb_core::{FileStorage, Kind, Record, StorageConfig, Value};

struct TestContext {
    storage: FileStorage,
    _dir: tempfile::TempDir,
}

impl TestContext {
    fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(StorageConfig::new(dir.path().join("file.json")));
        Self { storage, _dir: dir }
    }

    fn reopen(&self) -> FileStorage {
        FileStorage::open(StorageConfig::new(self.storage.path())).unwrap()
    }
}

fn populate(storage: &mut FileStorage) -> Vec<Record> {
    let mut records = Vec::new();
    for kind in Kind::ALL {
        let mut record = Record::new(kind);
        record.update("label", Value::from(format!("{} one", kind))).unwrap();
        records.push(record);
    }

    let mut place = Record::new(Kind::Place);
    place.update("number_rooms", Value::from("4")).unwrap();
    place.update("latitude", Value::from("37.77")).unwrap();
    place
        .update(
            "amenity_ids",
            Value::List(vec![Value::from("a-1"), Value::from("a-2")]),
        )
        .unwrap();
    place.update("pets", Value::Bool(true)).unwrap();
    place.update("notes", Value::Null).unwrap();
    records.push(place);

    for record in &records {
        storage.register(record.clone());
    }
    records
}

#[test]
fn test_flush_then_reload_reproduces_store() {
    let mut ctx = TestContext::new();
    let records = populate(&mut ctx.storage);
    ctx.storage.flush().unwrap();

    let reloaded = ctx.reopen();
    assert_eq!(reloaded.len(), records.len());

    let original_keys: Vec<&String> = ctx.storage.all().keys().collect();
    let reloaded_keys: Vec<&String> = reloaded.all().keys().collect();
    assert_eq!(original_keys, reloaded_keys);

    for record in &records {
        let back = reloaded.get(&record.key()).expect("record survives reload");
        assert_eq!(back.attributes(), record.attributes());
        assert_eq!(back.created_at(), record.created_at());
        assert_eq!(back.updated_at(), record.updated_at());
        assert_eq!(back.to_string(), record.to_string());
    }
}

#[test]
fn test_flush_overwrites_previous_content() {
    let mut ctx = TestContext::new();
    let records = populate(&mut ctx.storage);
    ctx.storage.flush().unwrap();

    for record in &records {
        ctx.storage.remove(&record.key());
    }
    let survivor = Record::new(Kind::User);
    ctx.storage.register(survivor.clone());
    ctx.storage.flush().unwrap();

    let reloaded = ctx.reopen();
    assert_eq!(reloaded.len(), 1);
    assert!(reloaded.get(&survivor.key()).is_some());
}

#[test]
fn test_unknown_kind_in_file_fails_load() {
    let ctx = TestContext::new();
    std::fs::write(
        ctx.storage.path(),
        r#"{"Castle.1": {"id": "1", "created_at": "2020-01-01T00:00:00.000000",
             "updated_at": "2020-01-01T00:00:00.000000", "__class__": "Castle"}}"#,
    )
    .unwrap();

    let err = FileStorage::open(StorageConfig::new(ctx.storage.path())).unwrap_err();
    assert_eq!(err.to_string(), "unknown kind 'Castle'");
}

#[test]
fn test_count_uses_dotted_prefix() {
    let mut ctx = TestContext::new();
    for _ in 0..3 {
        ctx.storage.register(Record::new(Kind::User));
    }
    for _ in 0..2 {
        ctx.storage.register(Record::new(Kind::Place));
    }

    assert_eq!(ctx.storage.count("User"), 3);
    assert_eq!(ctx.storage.count("Place"), 2);
    assert_eq!(ctx.storage.count("Review"), 0);

    // "Use" is a string prefix of "User" but not of "User.": the trailing
    // dot keeps one kind name from matching another's keys.
    assert_eq!(ctx.storage.count("Use"), 0);
    assert_eq!(ctx.storage.filter(Some("Use")).count(), 0);
    assert_eq!(ctx.storage.filter(Some("User")).count(), 3);
    assert_eq!(ctx.storage.filter(None).count(), 5);
}
