use chatmem_types::{Message, Metadata, Role};
use serde_json::json;

#[test]
fn test_message_constructors() {
    assert_eq!(Message::user("hi").role, Role::User);
    assert_eq!(Message::assistant("hello").role, Role::Assistant);
    assert_eq!(Message::system("be brief").role, Role::System);
    assert_eq!(Message::tool("42").role, Role::Tool);
}

#[test]
fn test_message_serialization_omits_missing_metadata() {
    let json = serde_json::to_string(&Message::user("Hello")).unwrap();
    assert_eq!(json, r#"{"role":"user","content":"Hello"}"#);
}

#[test]
fn test_message_serialization_keeps_metadata() {
    let mut metadata = Metadata::new();
    metadata.insert("title".to_string(), json!("Using tool search"));
    let msg = Message::assistant("").with_metadata(metadata);

    let value = serde_json::to_value(&msg).unwrap();
    assert_eq!(value["metadata"]["title"], "Using tool search");
    assert_eq!(value["content"], "");
}

#[test]
fn test_message_deserialization_free_form_role() {
    let msg: Message = serde_json::from_str(r#"{"role":"developer","content":"x"}"#).unwrap();
    assert_eq!(msg.role, Role::Other("developer".to_string()));
    assert_eq!(msg.role.as_str(), "developer");
}

#[test]
fn test_from_value_accepts_well_formed_record() {
    let record = json!({"role": "user", "content": "Hi", "metadata": {"file": "a.txt"}, "extra": 1});
    let msg = Message::from_value(&record).unwrap();
    assert_eq!(msg.content, "Hi");
    assert_eq!(msg.metadata.unwrap()["file"], "a.txt");
}

#[test]
fn test_from_value_rejects_incomplete_records() {
    assert!(Message::from_value(&json!({"role": "user"})).is_none());
    assert!(Message::from_value(&json!({"content": "orphan"})).is_none());
    assert!(Message::from_value(&json!({"role": 3, "content": "x"})).is_none());
    assert!(Message::from_value(&json!("just a string")).is_none());
}

#[test]
fn test_from_value_ignores_non_object_metadata() {
    let msg = Message::from_value(&json!({"role": "assistant", "content": "ok", "metadata": "oops"})).unwrap();
    assert!(msg.metadata.is_none());
}
