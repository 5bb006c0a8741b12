use nyaya::infrastructure::observability::sanitize_prompt;

#[test]
fn given_blank_prompt_when_sanitizing_then_returns_empty_marker() {
    assert_eq!(sanitize_prompt("  \n "), "[EMPTY]");
}

#[test]
fn given_short_prompt_when_sanitizing_then_returns_trimmed_prompt() {
    assert_eq!(sanitize_prompt("  What is Section 302?  "), "What is Section 302?");
}

#[test]
fn given_long_prompt_when_sanitizing_then_truncates_and_reports_length() {
    let prompt = "a".repeat(150);

    let sanitized = sanitize_prompt(&prompt);

    assert_eq!(sanitized, format!("{}... (150 chars total)", "a".repeat(100)));
}

#[test]
fn given_long_multibyte_prompt_when_sanitizing_then_truncates_on_char_boundary() {
    let prompt = "धारा".repeat(60);

    let sanitized = sanitize_prompt(&prompt);

    assert!(sanitized.ends_with("... (240 chars total)"));
    assert_eq!(
        sanitized.trim_end_matches("... (240 chars total)").chars().count(),
        100
    );
}

#[test]
fn given_bearer_token_when_sanitizing_then_token_is_redacted() {
    let sanitized = sanitize_prompt("Authorization: Bearer gsk_abc123 please");

    assert_eq!(sanitized, "Authorization: Bearer [REDACTED] please");
}

#[test]
fn given_query_style_secrets_when_sanitizing_then_each_value_is_redacted() {
    let sanitized = sanitize_prompt("api_key=abc&password=hunter2 token=t1 token=t2");

    assert_eq!(
        sanitized,
        "api_key=[REDACTED]&password=[REDACTED] token=[REDACTED] token=[REDACTED]"
    );
}
