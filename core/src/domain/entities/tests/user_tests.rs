//! Unit tests for the user entity

use chrono::Utc;
use std::str::FromStr;

use crate::domain::entities::user::{Role, User};

fn user(role: Role) -> User {
    let now = Utc::now();
    User {
        id: 7,
        name: "Grace Hopper".to_string(),
        username: "grace".to_string(),
        password_hash: "$2b$04$hash".to_string(),
        role,
        created_at: now,
        updated_at: now,
    }
}

#[test]
fn test_password_hash_is_never_serialized() {
    let json = serde_json::to_value(user(Role::User)).unwrap();

    assert!(json.get("password_hash").is_none());
    assert_eq!(json["username"], "grace");
    assert_eq!(json["role"], "user");
}

#[test]
fn test_identity_snapshot() {
    let identity = user(Role::Admin).identity();

    assert_eq!(identity.user_id, 7);
    assert_eq!(identity.username, "grace");
    assert!(identity.role.is_admin());
}

#[test]
fn test_role_parsing() {
    assert_eq!(Role::from_str("ADMIN").unwrap(), Role::Admin);
    assert_eq!(Role::from_str("user").unwrap(), Role::User);
    assert!(Role::from_str("root").is_err());
    assert_eq!(Role::default(), Role::User);
}
