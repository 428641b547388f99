//! General settings access over the shared document.

use crate::document::GeneralSettings;
use crate::store::{ConfigStore, StoreError};

/// Handle for the `general` section of the configuration document.
///
/// Mutations are write-through like rule mutations: the whole document
/// is re-read, the section replaced, and the document re-written.
pub struct Settings<S> {
    store: S,
}

impl<S: ConfigStore> Settings<S> {
    /// Creates a settings handle over the given store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// The underlying store handle.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Reads the general settings.
    pub async fn general(&self) -> Result<GeneralSettings, StoreError> {
        Ok(self.store.load().await?.general)
    }

    /// Replaces the general settings and persists the document.
    pub async fn set_general(&self, general: GeneralSettings) -> Result<(), StoreError> {
        let mut doc = self.store.load().await?;
        doc.general = general;
        self.store.save(&doc).await
    }

    /// Whether the daemon is expected to run (`general.enabled`).
    pub async fn is_enabled(&self) -> Result<bool, StoreError> {
        Ok(self.store.load().await?.general.enabled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    #[tokio::test]
    async fn test_disabled_by_default() {
        let settings = Settings::new(MemoryStore::new());
        assert!(!settings.is_enabled().await.unwrap());
    }

    #[tokio::test]
    async fn test_set_general_round_trip() {
        let settings = Settings::new(MemoryStore::new());

        let mut general = settings.general().await.unwrap();
        general.enabled = true;
        general.tunnel_name = "edge".to_string();
        settings.set_general(general.clone()).await.unwrap();

        assert!(settings.is_enabled().await.unwrap());
        assert_eq!(settings.general().await.unwrap(), general);
    }
}
