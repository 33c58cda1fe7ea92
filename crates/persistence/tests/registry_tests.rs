use authority_register::config::MAX_SEED;
use authority_register::{IdClass, IdentifierRecord, RecordId, Version};
use authority_register_persistence::fixtures::generate_damaged_database;
use authority_register_persistence::{Decrement, Increment, RegisterStore, StoreConfig, StoreError};
use chrono::NaiveDate;
use tempfile::tempdir;

fn fixed_day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2011, 6, 30).unwrap()
}

fn memory_store() -> RegisterStore {
    RegisterStore::open_in_memory().unwrap().with_clock(fixed_day)
}

#[test]
fn test_register_issues_sequential_numbers() {
    for class in IdClass::ALL {
        let mut store = memory_store();
        for expected in 1..=5 {
            assert_eq!(store.register(class).unwrap(), RecordId(expected));
        }

        let mut records = store.records(class).unwrap();
        records.reverse();
        assert_eq!(records.len(), 5);
        for (i, record) in records.iter().enumerate() {
            assert_eq!(record.id, RecordId(i as i64 + 1));
            assert_eq!(record.version, Some(Version(1)));
            assert_eq!(record.registered, Some(fixed_day()));
        }
    }
}

#[test]
fn test_classes_are_independent() {
    let mut store = memory_store();
    assert_eq!(store.register(IdClass::Fa).unwrap(), RecordId(1));
    assert_eq!(store.register(IdClass::Fa).unwrap(), RecordId(2));
    assert_eq!(store.register(IdClass::Ga).unwrap(), RecordId(1));
    assert_eq!(store.register(IdClass::Ar).unwrap(), RecordId(1));

    store.increment_version(IdClass::Fa, RecordId(1)).unwrap();
    assert_eq!(store.get(IdClass::Ga, RecordId(1)).unwrap().unwrap().version, Some(Version(1)));
    assert_eq!(store.count(IdClass::Fa).unwrap(), 2);
    assert_eq!(store.count(IdClass::Ga).unwrap(), 1);
}

#[test]
fn test_increment_then_decrement_round_trips() {
    let mut store = memory_store();
    let id = store.register(IdClass::Ga).unwrap();
    for _ in 0..3 {
        store.increment_version(IdClass::Ga, id).unwrap();
    }
    let before = store.get(IdClass::Ga, id).unwrap().unwrap().version;
    assert_eq!(before, Some(Version(4)));

    assert_eq!(
        store.increment_version(IdClass::Ga, id).unwrap(),
        Some(Increment::Raised(Version(5)))
    );
    assert_eq!(
        store.decrement_version(IdClass::Ga, id).unwrap(),
        Some(Decrement::Lowered(Version(4)))
    );
    assert_eq!(store.get(IdClass::Ga, id).unwrap().unwrap().version, before);
}

#[test]
fn test_decrement_stops_at_first_version() {
    let mut store = memory_store();
    let id = store.register(IdClass::Ar).unwrap();
    store.increment_version(IdClass::Ar, id).unwrap();

    assert_eq!(
        store.decrement_version(IdClass::Ar, id).unwrap(),
        Some(Decrement::Lowered(Version(1)))
    );
    for _ in 0..3 {
        let outcome = store.decrement_version(IdClass::Ar, id).unwrap();
        assert_eq!(outcome, Some(Decrement::AtFloor(Version(1))));
        assert_eq!(outcome.unwrap().version(), Version(1));
    }
    assert_eq!(store.get(IdClass::Ar, id).unwrap().unwrap().version, Some(Version(1)));
}

#[test]
fn test_missing_records_are_silent() {
    let mut store = memory_store();
    store.register(IdClass::Fa).unwrap();

    assert_eq!(store.deregister(IdClass::Fa, RecordId(42)).unwrap(), None);
    assert_eq!(store.increment_version(IdClass::Fa, RecordId(42)).unwrap(), None);
    assert_eq!(store.decrement_version(IdClass::Fa, RecordId(42)).unwrap(), None);
    // Same number, other class
    assert_eq!(store.deregister(IdClass::Ga, RecordId(1)).unwrap(), None);

    assert_eq!(
        store.records(IdClass::Fa).unwrap(),
        vec![IdentifierRecord::new(RecordId(1), Version(1), fixed_day())]
    );
}

#[test]
fn test_deregister_returns_prior_state() {
    let mut store = memory_store();
    store.register(IdClass::Fa).unwrap();
    store.register(IdClass::Fa).unwrap();
    store.increment_version(IdClass::Fa, RecordId(1)).unwrap();

    let removed = store.deregister(IdClass::Fa, RecordId(1)).unwrap();
    assert_eq!(
        removed,
        Some(IdentifierRecord::new(RecordId(1), Version(2), fixed_day()))
    );
    assert_eq!(store.get(IdClass::Fa, RecordId(1)).unwrap(), None);
    assert_eq!(store.deregister(IdClass::Fa, RecordId(1)).unwrap(), None);
}

#[test]
fn test_only_top_number_is_reused() {
    let mut store = memory_store();
    for _ in 0..3 {
        store.register(IdClass::Ga).unwrap();
    }

    // A gap below the top stays a gap
    store.deregister(IdClass::Ga, RecordId(2)).unwrap();
    assert_eq!(store.register(IdClass::Ga).unwrap(), RecordId(4));

    // The top number comes back
    store.deregister(IdClass::Ga, RecordId(4)).unwrap();
    assert_eq!(store.register(IdClass::Ga).unwrap(), RecordId(4));
    assert_eq!(store.max_id(IdClass::Ga).unwrap(), Some(RecordId(4)));
}

#[test]
fn test_seed_fills_empty_table() {
    let mut store = memory_store();
    assert_eq!(store.seed(IdClass::Fa, RecordId(5)).unwrap(), 5);

    let ids: Vec<i64> = store.records(IdClass::Fa).unwrap().iter().map(|r| r.id.0).collect();
    assert_eq!(ids, vec![5, 4, 3, 2, 1]);
    assert!(store
        .records(IdClass::Fa)
        .unwrap()
        .iter()
        .all(|r| r.version == Some(Version(1)) && r.registered == Some(fixed_day())));

    // Registration continues after the seeded range
    assert_eq!(store.register(IdClass::Fa).unwrap(), RecordId(6));
}

#[test]
fn test_seed_zero_inserts_nothing() {
    let mut store = memory_store();
    assert_eq!(store.seed(IdClass::Ar, RecordId(0)).unwrap(), 0);
    assert_eq!(store.count(IdClass::Ar).unwrap(), 0);
    assert_eq!(store.register(IdClass::Ar).unwrap(), RecordId(1));
}

#[test]
fn test_seed_rejects_non_empty_table() {
    let mut store = memory_store();
    store.register(IdClass::Ga).unwrap();
    store.register(IdClass::Ga).unwrap();

    let err = store.seed(IdClass::Ga, RecordId(10)).unwrap_err();
    match err {
        StoreError::PartitionNotEmpty { class, rows } => {
            assert_eq!(class, IdClass::Ga);
            assert_eq!(rows, 2);
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(store.count(IdClass::Ga).unwrap(), 2);

    // Other classes are unaffected
    assert_eq!(store.seed(IdClass::Fa, RecordId(2)).unwrap(), 2);
}

#[test]
fn test_seed_rejects_bound_above_limit() {
    let mut store = memory_store();

    for upto in [MAX_SEED + 1, i64::MAX] {
        let err = store.seed(IdClass::Fa, RecordId(upto)).unwrap_err();
        match err {
            StoreError::SeedTooLarge { class, upto: rejected, max } => {
                assert_eq!(class, IdClass::Fa);
                assert_eq!(rejected, upto);
                assert_eq!(max, MAX_SEED);
            }
            other => panic!("unexpected error: {other}"),
        }
    }
    assert_eq!(store.count(IdClass::Fa).unwrap(), 0);

    // The store is not left locked
    assert_eq!(store.register(IdClass::Fa).unwrap(), RecordId(1));
}

#[test]
fn test_seed_accepts_the_limit() {
    let mut store = memory_store();
    assert_eq!(store.seed(IdClass::Ga, RecordId(MAX_SEED)).unwrap(), MAX_SEED as usize);
    assert_eq!(store.max_id(IdClass::Ga).unwrap(), Some(RecordId(MAX_SEED)));
}

#[test]
fn test_increment_stops_at_last_version() {
    let dir = tempdir().unwrap();
    let paths = generate_damaged_database(dir.path()).unwrap();
    let mut store = RegisterStore::open(&StoreConfig::new(&paths.db)).unwrap();

    for _ in 0..2 {
        assert_eq!(
            store.increment_version(IdClass::Ga, RecordId(3)).unwrap(),
            Some(Increment::AtCeiling(Version::LAST))
        );
    }
    assert_eq!(
        store.get(IdClass::Ga, RecordId(3)).unwrap().unwrap().version,
        Some(Version::LAST)
    );

    // Still movable downward
    assert_eq!(
        store.decrement_version(IdClass::Ga, RecordId(3)).unwrap(),
        Some(Decrement::Lowered(Version(i64::MAX - 1)))
    );
    assert_eq!(
        store.increment_version(IdClass::Ga, RecordId(3)).unwrap(),
        Some(Increment::Raised(Version::LAST))
    );
}

#[test]
fn test_snapshot_tolerates_damaged_cells() {
    let dir = tempdir().unwrap();
    let paths = generate_damaged_database(dir.path()).unwrap();
    let store = RegisterStore::open(&StoreConfig::new(&paths.db)).unwrap();

    let snapshot = store.snapshot().unwrap();
    let ga = &snapshot.section(IdClass::Ga).unwrap().records;
    assert_eq!(ga.len(), 3);
    assert_eq!(
        ga[2],
        IdentifierRecord {
            id: RecordId(1),
            version: None,
            registered: None,
        }
    );
    assert_eq!(snapshot.section(IdClass::Fa).unwrap().records.len(), 2);
}

#[test]
fn test_documented_scenario() {
    let mut store = memory_store();
    assert_eq!(store.register(IdClass::Fa).unwrap(), RecordId(1));
    assert_eq!(store.register(IdClass::Fa).unwrap(), RecordId(2));
    assert!(store.deregister(IdClass::Fa, RecordId(2)).unwrap().is_some());
    assert_eq!(store.register(IdClass::Fa).unwrap(), RecordId(2));
    assert_eq!(
        store.increment_version(IdClass::Fa, RecordId(1)).unwrap().map(|i| i.version()),
        Some(Version(2))
    );

    let snapshot = store.snapshot().unwrap();
    let fa = snapshot.section(IdClass::Fa).unwrap();
    assert_eq!(
        fa.records,
        vec![
            IdentifierRecord::new(RecordId(2), Version(1), fixed_day()),
            IdentifierRecord::new(RecordId(1), Version(2), fixed_day()),
        ]
    );
    assert!(snapshot.section(IdClass::Ga).unwrap().records.is_empty());
    assert!(snapshot.section(IdClass::Ar).unwrap().records.is_empty());
    assert_eq!(snapshot.total(), 2);
}

#[test]
fn test_snapshot_is_read_only_and_repeatable() {
    let mut store = memory_store();
    store.seed(IdClass::Ar, RecordId(3)).unwrap();

    let first = store.snapshot().unwrap();
    let second = store.snapshot().unwrap();
    assert_eq!(first, second);
    assert_eq!(
        first.sections.iter().map(|s| s.class).collect::<Vec<_>>(),
        IdClass::ALL.to_vec()
    );
    assert_eq!(store.count(IdClass::Ar).unwrap(), 3);
}

#[test]
fn test_state_survives_reopen() {
    let dir = tempdir().unwrap();
    let config = StoreConfig::new(dir.path().join("register.db"));

    {
        let mut store = RegisterStore::open(&config).unwrap();
        store.register(IdClass::Fa).unwrap();
        store.increment_version(IdClass::Fa, RecordId(1)).unwrap();
        store.close().unwrap();
    }

    let mut store = RegisterStore::open(&config).unwrap();
    assert_eq!(store.get(IdClass::Fa, RecordId(1)).unwrap().unwrap().version, Some(Version(2)));
    assert_eq!(store.register(IdClass::Fa).unwrap(), RecordId(2));
}

#[test]
fn test_two_handles_share_the_file() {
    let dir = tempdir().unwrap();
    let config = StoreConfig::new(dir.path().join("register.db"));

    let mut first = RegisterStore::open(&config).unwrap();
    let mut second = RegisterStore::open(&config).unwrap();

    assert_eq!(first.register(IdClass::Ar).unwrap(), RecordId(1));
    assert_eq!(second.register(IdClass::Ar).unwrap(), RecordId(2));
    assert_eq!(first.register(IdClass::Ar).unwrap(), RecordId(3));
    assert_eq!(second.decrement_version(IdClass::Ar, RecordId(1)).unwrap(),
        Some(Decrement::AtFloor(Version(1))));
}
