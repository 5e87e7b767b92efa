// Tests for the transcript data model: system-turn seeding, append
// ordering, and rendering.

use voice_loop::{Role, Transcript};

#[test]
fn test_transcript_is_seeded_with_system_turn() {
    let transcript = Transcript::new("You are terse.");

    assert_eq!(transcript.len(), 1);
    assert_eq!(transcript.turns()[0].role, Role::System);
    assert_eq!(transcript.turns()[0].content, "You are terse.");
}

#[test]
fn test_turns_are_appended_in_order() {
    let mut transcript = Transcript::new("You are terse.");

    transcript.push_user("Hi");
    transcript.push_assistant("Hello.");

    assert_eq!(transcript.len(), 3);
    assert_eq!(transcript.turns()[1].role, Role::User);
    assert_eq!(transcript.turns()[1].content, "Hi");
    assert_eq!(transcript.turns()[2].role, Role::Assistant);
    assert_eq!(transcript.turns()[2].content, "Hello.");
    assert_eq!(transcript.last().unwrap().content, "Hello.");
}

#[test]
fn test_system_turn_is_unchanged_by_appends() {
    let mut transcript = Transcript::new("You are terse.");

    for i in 0..10 {
        transcript.push_user(format!("question {i}"));
        transcript.push_assistant(format!("answer {i}"));
    }

    assert_eq!(transcript.turns()[0].role, Role::System);
    assert_eq!(transcript.turns()[0].content, "You are terse.");
    // Exactly one system turn, and it stays first
    let system_count = transcript
        .turns()
        .iter()
        .filter(|t| t.role == Role::System)
        .count();
    assert_eq!(system_count, 1);
}

#[test]
fn test_repeated_identical_utterances_are_independent_turns() {
    let mut transcript = Transcript::new("sys");

    transcript.push_user("Hi");
    transcript.push_user("Hi");

    assert_eq!(transcript.len(), 3);
    assert_eq!(transcript.turns()[1].content, "Hi");
    assert_eq!(transcript.turns()[2].content, "Hi");
}

#[test]
fn test_dump_renders_role_tagged_lines() {
    let mut transcript = Transcript::new("You are terse.");
    transcript.push_user("Hi");
    transcript.push_assistant("Hello.");

    let dump = transcript.dump();
    let lines: Vec<&str> = dump.lines().collect();

    assert_eq!(lines, vec!["system: You are terse.", "user: Hi", "assistant: Hello."]);
}

#[test]
fn test_json_rendering_uses_lowercase_roles() {
    let mut transcript = Transcript::new("sys");
    transcript.push_user("Hi");

    let json = transcript.to_json().unwrap();

    assert!(json.contains("\"role\":\"system\""), "got: {json}");
    assert!(json.contains("\"role\":\"user\""), "got: {json}");
    assert!(json.contains("\"content\":\"Hi\""), "got: {json}");
}
