use chatmem_archive::{
    deserialize, serialize, snapshots_from_json, snapshots_to_json, to_model_messages,
    ConversationArchive, Message, MessageRecord, Metadata, Snapshot, DEFAULT_STORAGE_KEY,
};
use chrono::{Local, TimeZone};
use serde_json::json;

fn snapshot(title: &str, timestamp: Option<&str>, message_count: i64) -> Snapshot {
    Snapshot {
        id: None,
        title: Some(title.to_string()),
        messages: vec![json!({"role": "user", "content": title})],
        timestamp: timestamp.map(str::to_string),
        message_count,
    }
}

fn three_snapshots() -> Vec<Snapshot> {
    vec![
        snapshot("first", Some("2024-01-01T09:00:00"), 2),
        snapshot("second", Some("2024-01-02T09:00:00"), 2),
        snapshot("third", Some("2024-01-03T09:00:00"), 2),
    ]
}

fn conversation() -> Vec<Message> {
    vec![Message::user("How do I sort a Vec?"), Message::assistant("Use sort_by.")]
}

#[test]
fn test_projection_survives_serialization() {
    let mut metadata = Metadata::new();
    metadata.insert("title".to_string(), json!("🔧 Using tool: search"));
    let messages = vec![
        Message::system("be brief"),
        Message::user("hi"),
        Message::assistant("").with_metadata(metadata),
        Message::new("tool", "42"),
    ];

    let records: Vec<_> = serialize(&messages).into_iter().map(MessageRecord::into_value).collect();
    let restored = deserialize(&records);

    assert_eq!(to_model_messages(&restored), to_model_messages(&messages));
    assert_eq!(restored, messages);
}

#[test]
fn test_save_new_inserts_at_front() {
    let archive = ConversationArchive::new();
    let (id, snapshots) = archive.save(None, &conversation(), three_snapshots());

    assert_eq!(id, Some(0));
    assert_eq!(snapshots.len(), 4);
    assert_eq!(snapshots[0].title.as_deref(), Some("How do I sort a Vec?"));
    assert_eq!(snapshots[0].message_count, 2);
    assert!(snapshots[0].id.is_some());
    assert!(snapshots[0].timestamp.is_some());
    assert_eq!(snapshots[1].title.as_deref(), Some("first"));
}

#[test]
fn test_save_out_of_range_id_inserts_new() {
    let archive = ConversationArchive::new();
    let (id, snapshots) = archive.save(Some(9), &conversation(), three_snapshots());

    assert_eq!(id, Some(0));
    assert_eq!(snapshots.len(), 4);
}

#[test]
fn test_save_existing_overwrites_in_place_and_keeps_id() {
    let archive = ConversationArchive::new();
    let (_, snapshots) = archive.save(None, &conversation(), three_snapshots());
    let stable_id = snapshots[0].id.clone().unwrap();

    let mut longer = conversation();
    longer.push(Message::user("And in reverse?"));
    let (id, snapshots) = archive.save(Some(0), &longer, snapshots);

    assert_eq!(id, Some(0));
    assert_eq!(snapshots.len(), 4);
    assert_eq!(snapshots[0].message_count, 3);
    assert_eq!(snapshots[0].id.as_deref(), Some(stable_id.as_str()));
}

#[test]
fn test_save_empty_is_noop() {
    let archive = ConversationArchive::new();
    let original = three_snapshots();

    let (id, snapshots) = archive.save(Some(1), &[], original.clone());
    assert_eq!(id, Some(1));
    assert_eq!(snapshots, original);

    let (id, snapshots) = archive.save(None, &[], original.clone());
    assert_eq!(id, None);
    assert_eq!(snapshots, original);
}

#[test]
fn test_position_of_follows_inserts() {
    let archive = ConversationArchive::new();
    let (_, snapshots) = archive.save(None, &conversation(), Vec::new());
    let stable_id = snapshots[0].id.clone().unwrap();

    let (_, snapshots) = archive.save(None, &[Message::user("another chat")], snapshots);

    assert_eq!(archive.position_of(&stable_id, &snapshots), Some(1));
    assert_eq!(archive.position_of("missing", &snapshots), None);
}

#[test]
fn test_save_uses_supplied_clock() {
    let archive = ConversationArchive::new();
    let now = Local.with_ymd_and_hms(2024, 6, 1, 8, 30, 0).unwrap();

    let (_, snapshots) = archive.save_at(None, &conversation(), Vec::new(), now);
    let rows = archive.list_for_display(&snapshots);

    assert_eq!(rows[0].text, "How do I sort a Vec? • 06/01 08:30 • 2 msgs");
}

#[test]
fn test_load_in_range() {
    let archive = ConversationArchive::new();
    let (index, messages) = archive.load(1, &three_snapshots());

    assert_eq!(index, Some(1));
    assert_eq!(messages, vec![Message::user("second")]);
}

#[test]
fn test_load_out_of_range_is_empty() {
    let archive = ConversationArchive::new();

    assert_eq!(archive.load(5, &three_snapshots()), (None, Vec::new()));
    assert_eq!(archive.load(0, &[]), (None, Vec::new()));
}

#[test]
fn test_load_skips_malformed_records() {
    let archive = ConversationArchive::new();
    let mut snapshots = three_snapshots();
    snapshots[0].messages = vec![
        json!({"role": "user", "content": "kept"}),
        json!({"role": "user"}),
        json!(null),
    ];

    let (_, messages) = archive.load(0, &snapshots);
    assert_eq!(messages, vec![Message::user("kept")]);
}

#[test]
fn test_delete_in_range_and_out_of_range() {
    let archive = ConversationArchive::new();

    let (id, snapshots) = archive.delete(Some(1), three_snapshots());
    assert_eq!(id, None);
    assert_eq!(snapshots.len(), 2);
    assert_eq!(snapshots[1].title.as_deref(), Some("third"));

    let (id, snapshots) = archive.delete(Some(7), snapshots);
    assert_eq!(id, None);
    assert_eq!(snapshots.len(), 2);

    let (_, snapshots) = archive.delete(None, snapshots);
    assert_eq!(snapshots.len(), 2);
}

#[test]
fn test_list_for_display_newest_first() {
    let archive = ConversationArchive::new();
    let rows = archive.list_for_display(&three_snapshots());

    let titles: Vec<_> = rows.iter().map(|row| row.text.split(" • ").next().unwrap()).collect();
    assert_eq!(titles, vec!["third", "second", "first"]);
    assert_eq!(rows.iter().map(|row| row.index).collect::<Vec<_>>(), vec![2, 1, 0]);
    assert_eq!(rows[0].text, "third • 01/03 09:00 • 2 msgs");
}

#[test]
fn test_list_for_display_missing_and_bad_timestamps_sort_last() {
    let archive = ConversationArchive::new();
    let mut snapshots = vec![snapshot("undated", None, 1)];
    snapshots.extend(three_snapshots());
    snapshots.push(snapshot("garbled", Some("not a date"), 0));

    let rows = archive.list_for_display(&snapshots);
    let texts: Vec<_> = rows.iter().map(|row| row.text.as_str()).collect();

    assert_eq!(texts[0], "third • 01/03 09:00 • 2 msgs");
    assert_eq!(texts[3], "undated • 1 msgs");
    assert_eq!(texts[4], "garbled");
}

#[test]
fn test_list_for_display_untitled_uses_position() {
    let archive = ConversationArchive::new();
    let snapshots = snapshots_from_json(
        r#"[{"timestamp": "2024-01-01T00:00:00"}, {"title": "newer", "timestamp": "2024-02-01T00:00:00"}]"#,
    );

    let rows = archive.list_for_display(&snapshots);
    assert_eq!(rows[0].text, "newer • 02/01 00:00");
    assert_eq!(rows[1].text, "Conversation 2 • 01/01 00:00");
}

#[test]
fn test_list_for_display_empty() {
    assert!(ConversationArchive::new().list_for_display(&[]).is_empty());
}

#[test]
fn test_new_conversation_sentinel() {
    assert_eq!(ConversationArchive::new_conversation(), (None, Vec::new()));
}

#[test]
fn test_custom_title_length_and_storage_key() {
    let archive = ConversationArchive::default()
        .with_title_max_length(5)
        .with_storage_key("my_chats");
    assert_eq!(archive.storage_key(), "my_chats");
    assert_eq!(ConversationArchive::new().storage_key(), DEFAULT_STORAGE_KEY);

    let (_, snapshots) = archive.save(None, &[Message::user("Hello there")], Vec::new());
    assert_eq!(snapshots[0].title.as_deref(), Some("Hello..."));
}

#[test]
fn test_json_codec_round_trip_through_archive() {
    let archive = ConversationArchive::new();
    let (_, snapshots) = archive.save(None, &conversation(), three_snapshots());

    let raw = snapshots_to_json(&snapshots).unwrap();
    let restored = snapshots_from_json(&raw);

    assert_eq!(restored, snapshots);
    assert_eq!(archive.load(0, &restored).1, conversation());
}
