use arbor_core::{BbKey, Blackboard, BlackboardError};

#[test]
fn blackboard_set_get_remove_roundtrip() {
    let k_u32 = BbKey::<u32>::new("ammo");
    let k_str = BbKey::<String>::new("target");

    let mut bb = Blackboard::new();
    assert!(!bb.contains(k_u32));
    assert!(bb.is_empty());

    bb.set(k_u32, 123);
    bb.set(k_str, "hello".to_string());

    assert!(bb.contains(k_u32));
    assert_eq!(bb.len(), 2);
    assert_eq!(bb.get(k_u32).copied(), Some(123));
    assert_eq!(bb.get(k_str).map(|s| s.as_str()), Some("hello"));

    assert_eq!(bb.remove(k_u32), Some(123));
    assert_eq!(bb.get(k_u32), None);
    assert_eq!(bb.keys().collect::<Vec<_>>(), vec!["target"]);
}

#[test]
fn absent_key_reads_as_none() {
    let bb = Blackboard::new();
    assert_eq!(bb.get(BbKey::<u32>::new("missing")), None);
    assert_eq!(bb.try_get(BbKey::<u32>::new("missing")), Ok(None));
}

#[test]
fn type_mismatch_is_absent_from_get_and_an_error_from_try_get() {
    let mut bb = Blackboard::new();
    bb.set(BbKey::<u32>::new("hp"), 1u32);

    assert_eq!(bb.get(BbKey::<i32>::new("hp")), None);
    assert_eq!(
        bb.try_get(BbKey::<i32>::new("hp")),
        Err(BlackboardError::TypeMismatch { key: "hp" })
    );
    assert_eq!(bb.remove(BbKey::<i32>::new("hp")), None);
    assert_eq!(bb.get(BbKey::<u32>::new("hp")).copied(), Some(1));
}

#[test]
fn get_mut_updates_in_place() {
    let key = BbKey::<Vec<u32>>::new("seen");
    let mut bb = Blackboard::new();
    bb.set(key, vec![1]);

    if let Some(seen) = bb.get_mut(key) {
        seen.push(2);
    }

    assert_eq!(bb.get(key).map(|v| v.as_slice()), Some(&[1, 2][..]));
    bb.clear();
    assert!(!bb.contains(key));
}
