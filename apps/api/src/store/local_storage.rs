//! Key/value storage standing in for the browser's local storage.
//!
//! Two key namespaces are in use: recorded auth tokens and per-user template
//! customizations. Values are stored as JSON strings.

use std::collections::HashMap;

use anyhow::{Context, Result};
use serde::{de::DeserializeOwned, Serialize};
use tokio::sync::RwLock;

pub const AUTH_TOKEN_PREFIX: &str = "authToken";
pub const CUSTOMIZATION_PREFIX: &str = "template_customization_";

pub fn auth_token_key(token: &str) -> String {
    format!("{AUTH_TOKEN_PREFIX}:{token}")
}

/// One customization slot per user and template.
pub fn customization_key(user_id: u64, template_id: u64) -> String {
    format!("user_{user_id}/{CUSTOMIZATION_PREFIX}{template_id}")
}

#[derive(Debug, Default)]
pub struct LocalStorage {
    items: RwLock<HashMap<String, String>>,
}

impl LocalStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get_item(&self, key: &str) -> Option<String> {
        self.items.read().await.get(key).cloned()
    }

    pub async fn set_item(&self, key: &str, value: String) {
        self.items.write().await.insert(key.to_string(), value);
    }

    /// Returns true if the key was present.
    pub async fn remove_item(&self, key: &str) -> bool {
        self.items.write().await.remove(key).is_some()
    }

    pub async fn get_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        match self.get_item(key).await {
            Some(raw) => {
                let value = serde_json::from_str(&raw)
                    .with_context(|| format!("Stored value under '{key}' is not valid JSON"))?;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    pub async fn set_json<T: Serialize>(&self, key: &str, value: &T) -> Result<()> {
        let raw = serde_json::to_string(value)
            .with_context(|| format!("Failed to serialize value for '{key}'"))?;
        self.set_item(key, raw).await;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Pref {
        theme: String,
    }

    #[test]
    fn test_key_namespaces() {
        assert_eq!(auth_token_key("mock-jwt-token-3"), "authToken:mock-jwt-token-3");
        assert_eq!(customization_key(7, 2), "user_7/template_customization_2");
        assert_ne!(customization_key(7, 2), customization_key(8, 2));
    }

    #[tokio::test]
    async fn test_json_round_trip_and_remove() {
        let storage = LocalStorage::new();
        let pref = Pref {
            theme: "dark".to_string(),
        };
        storage.set_json("pref", &pref).await.unwrap();
        assert_eq!(storage.get_json::<Pref>("pref").await.unwrap(), Some(pref));
        assert!(storage.remove_item("pref").await);
        assert!(!storage.remove_item("pref").await);
        assert_eq!(storage.get_json::<Pref>("pref").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_corrupt_json_is_an_error() {
        let storage = LocalStorage::new();
        storage.set_item("pref", "{not json".to_string()).await;
        let err = storage.get_json::<Pref>("pref").await.unwrap_err();
        assert!(err.to_string().contains("pref"));
    }
}
