#![cfg(feature = "serde")]

use sentinel_list::List;

#[test]
fn serializes_front_to_back() {
    let list: List<_> = vec![3, 1, 2].into_iter().collect();
    assert_eq!(serde_json::to_string(&list).unwrap(), "[3,1,2]");
}

#[test]
fn deserializes_into_a_linked_chain() {
    let list: List<String> = serde_json::from_str(r#"["a","b","c"]"#).unwrap();
    assert_eq!(list.len(), 3);
    assert_eq!(list.iter().rev().map(String::as_str).collect::<Vec<_>>(), ["c", "b", "a"]);

    let empty: List<u8> = serde_json::from_str("[]").unwrap();
    assert!(empty.is_empty());
    assert_eq!(empty.begin(), empty.end());
}

#[test]
fn rejects_non_sequences() {
    assert!(serde_json::from_str::<List<u8>>(r#"{"a":1}"#).is_err());
}
