use crate::database::schema::{self, STATEMENTS};

#[test]
fn test_statements_are_idempotent() {
    for statement in STATEMENTS {
        assert!(statement.contains("CREATE TABLE IF NOT EXISTS"));
    }
}

#[test]
fn test_users_created_before_dependents() {
    assert_eq!(STATEMENTS[0], schema::CREATE_USERS);
    for dependent in &STATEMENTS[1..] {
        assert!(dependent.contains("REFERENCES users (id)"));
    }
}

#[test]
fn test_token_hash_is_unique() {
    assert!(schema::CREATE_REFRESH_TOKENS.contains("UNIQUE KEY uq_refresh_tokens_hash (token_hash)"));
    assert!(schema::CREATE_USERS.contains("UNIQUE KEY uq_users_email (email)"));
}

#[test]
fn test_bootstrap_never_alters_existing_tables() {
    for statement in STATEMENTS {
        let upper = statement.to_uppercase();
        assert!(!upper.contains("DROP "));
        assert!(!upper.contains("ALTER "));
    }
}
