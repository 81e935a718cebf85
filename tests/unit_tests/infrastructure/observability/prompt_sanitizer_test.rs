use mediscan::infrastructure::observability::sanitize_prompt;

#[test]
fn given_empty_prompt_when_sanitizing_then_returns_empty_marker() {
    assert_eq!(sanitize_prompt(""), "[EMPTY]");
    assert_eq!(sanitize_prompt("   "), "[EMPTY]");
}

#[test]
fn given_short_query_when_sanitizing_then_returns_unchanged() {
    let query = "What does my HbA1c mean?";
    assert_eq!(sanitize_prompt(query), query);
}

#[test]
fn given_long_document_prompt_when_sanitizing_then_keeps_first_100_chars() {
    let prompt = "a".repeat(150);
    let result = sanitize_prompt(&prompt);
    assert!(result.contains("... (150 chars total)"));
    assert!(result.starts_with(&"a".repeat(100)));
}

#[test]
fn given_long_multibyte_prompt_when_sanitizing_then_does_not_split_characters() {
    let prompt = "é".repeat(120);
    let result = sanitize_prompt(&prompt);
    assert!(result.starts_with(&"é".repeat(100)));
    assert!(result.contains("(120 chars total)"));
}

#[test]
fn given_bearer_token_when_sanitizing_then_redacts_token() {
    let result = sanitize_prompt("Authorization: Bearer abc.def.ghi");
    assert!(result.contains("Bearer [REDACTED]"));
    assert!(!result.contains("abc.def.ghi"));
}

#[test]
fn given_openai_key_when_sanitizing_then_redacts_key() {
    let result = sanitize_prompt("key is sk-proj-abcdefgh12345678");
    assert!(result.contains("sk-[REDACTED]"));
    assert!(!result.contains("abcdefgh12345678"));
}

#[test]
fn given_password_when_sanitizing_then_redacts_password() {
    let result = sanitize_prompt("Login with password=hunter2");
    assert!(result.contains("password=[REDACTED]"));
    assert!(!result.contains("hunter2"));
}
