use nyaya::domain::{ChatMode, ChatSession, MessageRole};

#[test]
fn given_new_session_when_created_then_starts_in_ipc_mode_with_no_messages() {
    let session = ChatSession::default();

    assert_eq!(session.mode, ChatMode::Ipc);
    assert!(session.messages.is_empty());
}

#[test]
fn given_history_when_switching_to_other_mode_then_history_is_cleared() {
    let mut session = ChatSession::new(ChatMode::Ipc);
    session.record_exchange("What is Section 302?".to_string(), "Murder.".to_string());

    let changed = session.switch_mode(ChatMode::CustomDocument);

    assert!(changed);
    assert_eq!(session.mode, ChatMode::CustomDocument);
    assert!(session.messages.is_empty());
}

#[test]
fn given_history_when_switching_to_same_mode_then_history_is_kept() {
    let mut session = ChatSession::new(ChatMode::CustomDocument);
    session.record_exchange("q".to_string(), "a".to_string());

    let changed = session.switch_mode(ChatMode::CustomDocument);

    assert!(!changed);
    assert_eq!(session.messages.len(), 2);
}

#[test]
fn given_exchange_when_recorded_then_user_message_precedes_assistant_message() {
    let mut session = ChatSession::default();

    session.record_exchange("question".to_string(), "answer".to_string());

    assert_eq!(session.messages[0].role, MessageRole::User);
    assert_eq!(session.messages[0].content, "question");
    assert_eq!(session.messages[1].role, MessageRole::Assistant);
    assert_eq!(session.messages[1].content, "answer");
}

#[test]
fn given_history_when_cleared_then_mode_is_unchanged() {
    let mut session = ChatSession::new(ChatMode::CustomDocument);
    session.record_exchange("q".to_string(), "a".to_string());

    session.clear();

    assert!(session.messages.is_empty());
    assert_eq!(session.mode, ChatMode::CustomDocument);
}

#[test]
fn given_message_when_rendered_for_history_then_uses_role_label() {
    let mut session = ChatSession::default();
    session.record_exchange("Is theft bailable?".to_string(), "It depends.".to_string());

    assert_eq!(session.messages[0].as_history_line(), "User: Is theft bailable?");
    assert_eq!(session.messages[1].as_history_line(), "Assistant: It depends.");
}

#[test]
fn given_chat_modes_when_serialized_then_use_snake_case_wire_names() {
    assert_eq!(serde_json::to_string(&ChatMode::Ipc).unwrap(), "\"ipc\"");
    assert_eq!(
        serde_json::to_string(&ChatMode::CustomDocument).unwrap(),
        "\"custom_document\""
    );
    assert_eq!(
        "custom_document".parse::<ChatMode>().unwrap(),
        ChatMode::CustomDocument
    );
}

#[test]
fn given_chat_modes_when_labelled_then_match_display_names() {
    assert_eq!(ChatMode::Ipc.label(), "Indian Penal Code Mode");
    assert_eq!(ChatMode::CustomDocument.label(), "Custom Document Mode");
}
