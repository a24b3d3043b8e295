//! Player profile: nickname and location, stored under the `user` key.

use crate::utils::persistence::{KeyValueStore, StoreError};
use serde::{Deserialize, Serialize};

/// Store key holding the serialized profile.
pub const USER_KEY: &str = "user";

pub const MAX_NICKNAME_LEN: usize = 16;
pub const MAX_LOCATION_LEN: usize = 32;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserProfile {
    pub nickname: String,
    pub location: String,
}

impl UserProfile {
    pub fn new(nickname: &str, location: &str) -> Self {
        Self {
            nickname: nickname.trim().to_string(),
            location: location.trim().to_string(),
        }
    }

    /// Stored profile, or an empty one if absent or unreadable.
    pub fn load(store: &KeyValueStore) -> Self {
        store.load_or_default(USER_KEY)
    }

    pub fn save(&self, store: &KeyValueStore) -> Result<(), StoreError> {
        store.set_json(USER_KEY, self)
    }
}

pub fn validate_nickname(name: &str) -> Result<(), String> {
    let trimmed = name.trim();

    if trimmed.chars().count() > MAX_NICKNAME_LEN {
        return Err(format!(
            "Nickname must be {} characters or less",
            MAX_NICKNAME_LEN
        ));
    }

    if trimmed.chars().any(char::is_control) {
        return Err("Nickname cannot contain control characters".to_string());
    }

    Ok(())
}

pub fn validate_location(location: &str) -> Result<(), String> {
    let trimmed = location.trim();

    if trimmed.chars().count() > MAX_LOCATION_LEN {
        return Err(format!(
            "Location must be {} characters or less",
            MAX_LOCATION_LEN
        ));
    }

    if trimmed.chars().any(char::is_control) {
        return Err("Location cannot contain control characters".to_string());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::persistence::{scratch_path, STORE_FILE};

    #[test]
    fn test_validate_nickname() {
        assert!(validate_nickname("").is_ok());
        assert!(validate_nickname("Crystal 🇺🇸").is_ok());
        assert!(validate_nickname("  padded  ").is_ok());
        assert!(validate_nickname("a".repeat(17).as_str()).is_err());
        assert!(validate_nickname("tab\there").is_err());
    }

    #[test]
    fn test_validate_location() {
        assert!(validate_location("Toronto").is_ok());
        assert!(validate_location("x".repeat(33).as_str()).is_err());
    }

    #[test]
    fn test_new_trims() {
        let profile = UserProfile::new("  Finn ", " Reef ");
        assert_eq!(profile.nickname, "Finn");
        assert_eq!(profile.location, "Reef");
    }

    #[test]
    fn test_missing_profile_is_empty() {
        let store = KeyValueStore::at(scratch_path(STORE_FILE));
        assert_eq!(UserProfile::load(&store), UserProfile::default());
    }

    #[test]
    fn test_save_and_load() {
        let store = KeyValueStore::at(scratch_path(STORE_FILE));
        let profile = UserProfile::new("Finn", "Reef");
        profile.save(&store).unwrap();
        assert_eq!(UserProfile::load(&store), profile);
    }

    #[test]
    fn test_extra_fields_are_ignored() {
        let store = KeyValueStore::at(scratch_path(STORE_FILE));
        store
            .set(USER_KEY, r#"{"nickname":"Finn","location":"Reef","score":0}"#)
            .unwrap();
        assert_eq!(UserProfile::load(&store).nickname, "Finn");
    }

    #[test]
    fn test_garbage_profile_falls_back() {
        let store = KeyValueStore::at(scratch_path(STORE_FILE));
        store.set(USER_KEY, "not json").unwrap();
        assert_eq!(UserProfile::load(&store), UserProfile::default());
    }
}
