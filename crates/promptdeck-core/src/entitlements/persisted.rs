//! Typed access to the three shared store keys.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::errors::StorageError;
use crate::traits::{AccountStore, StorageKey};
use crate::types::{DailyUsage, Identity, SubscriptionRecord};

fn read<T: DeserializeOwned>(
    store: &dyn AccountStore,
    key: StorageKey,
) -> Result<Option<T>, StorageError> {
    match store.get(key)? {
        Some(value) => Ok(Some(serde_json::from_value(value)?)),
        None => Ok(None),
    }
}

fn write<T: Serialize>(
    store: &dyn AccountStore,
    key: StorageKey,
    value: &T,
) -> Result<(), StorageError> {
    store.set(key, serde_json::to_value(value)?)
}

pub fn read_identity(store: &dyn AccountStore) -> Result<Option<Identity>, StorageError> {
    read(store, StorageKey::User)
}

pub fn write_identity(store: &dyn AccountStore, identity: &Identity) -> Result<(), StorageError> {
    write(store, StorageKey::User, identity)
}

pub fn read_usage(store: &dyn AccountStore) -> Result<Option<DailyUsage>, StorageError> {
    read(store, StorageKey::DailyUsage)
}

pub fn write_usage(store: &dyn AccountStore, usage: &DailyUsage) -> Result<(), StorageError> {
    write(store, StorageKey::DailyUsage, usage)
}

pub fn read_subscription(
    store: &dyn AccountStore,
) -> Result<Option<SubscriptionRecord>, StorageError> {
    read(store, StorageKey::Subscription)
}

pub fn write_subscription(
    store: &dyn AccountStore,
    record: &SubscriptionRecord,
) -> Result<(), StorageError> {
    write(store, StorageKey::Subscription, record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::MemoryAccountStore;
    use crate::types::SubscriptionStatus;

    #[test]
    fn test_identity_keeps_extra_fields() {
        let store = MemoryAccountStore::new();
        store
            .set(
                StorageKey::User,
                serde_json::json!({ "email": "a@b.com", "id": "u1", "avatar": "x.png" }),
            )
            .unwrap();

        let identity = read_identity(&store).unwrap().unwrap();
        assert_eq!(identity.email, "a@b.com");
        assert_eq!(identity.extra["avatar"], "x.png");

        write_identity(&store, &identity).unwrap();
        assert_eq!(store.peek(StorageKey::User).unwrap()["avatar"], "x.png");
    }

    #[test]
    fn test_subscription_shape_is_camel_case() {
        let store = MemoryAccountStore::new();
        let record = SubscriptionRecord {
            status: SubscriptionStatus::Cancelled,
            plan: "pro".into(),
            expires_at: None,
        };
        write_subscription(&store, &record).unwrap();

        let raw = store.peek(StorageKey::Subscription).unwrap();
        assert_eq!(raw["status"], "cancelled");
        assert!(raw.get("expiresAt").is_none());
        assert_eq!(read_subscription(&store).unwrap(), Some(record));
    }

    #[test]
    fn test_corrupt_usage_is_serialization_error() {
        let store = MemoryAccountStore::new();
        store
            .set(StorageKey::DailyUsage, serde_json::json!({ "count": -4 }))
            .unwrap();
        assert!(matches!(
            read_usage(&store),
            Err(StorageError::Serialization(_))
        ));
    }
}
