/// Port for the domain layer: a flat string key-value store.
///
/// Backends hold opaque strings; the domain decides the encoding. No
/// operation spans more than one key, and concurrent writers to the same key
/// are last-writer-wins.
pub trait KeyValueStore: Send + Sync {
    /// Raw value under `key`, `None` when never written or removed.
    fn get(&self, key: &str) -> anyhow::Result<Option<String>>;
    /// Replace the value under `key`.
    fn set(&self, key: &str, value: &str) -> anyhow::Result<()>;
    /// Drop `key`; removing an absent key is not an error.
    fn remove(&self, key: &str) -> anyhow::Result<()>;
}
