use nyaya::application::services::count_tokens;

#[test]
fn given_empty_text_when_counting_then_returns_zero() {
    assert_eq!(count_tokens(""), 0);
}

#[test]
fn given_longer_text_when_counting_then_returns_more_tokens() {
    let short = count_tokens("Section 302");
    let long = count_tokens("Section 302 of the Indian Penal Code prescribes punishment for murder");

    assert!(short > 0);
    assert!(long > short);
}
