//! Emergency data store.
//!
//! Injectable service owning the zone and alert collections. In-memory
//! state is authoritative while the process runs; every mutation writes
//! both collections back to the key-value cache in one transaction, and the
//! cache is only read back on cold start or when a refresh fails.

use std::sync::Arc;

use chrono::Utc;
use tokio::sync::RwLock;

use crate::feed::ReferenceFeed;
use crate::models::{
    CreateAlertRequest, CreateZoneRequest, EmergencyAlert, EmergencyZone, UpdateAlertRequest,
    UpdateZoneRequest, ZoneStatus,
};
use crate::storage::{keys, Storage};

#[derive(Default)]
struct Collections {
    zones: Vec<EmergencyZone>,
    alerts: Vec<EmergencyAlert>,
    last_sync: Option<String>,
    last_id: i64,
    refreshing: bool,
}

impl Collections {
    /// Time-based record identifier. Rapid mutations can land in the same
    /// millisecond, so the counter never moves backwards.
    fn allocate_id(&mut self) -> String {
        let millis = Utc::now().timestamp_millis();
        self.last_id = millis.max(self.last_id + 1);
        self.last_id.to_string()
    }
}

/// Shared store for zones and alerts.
pub struct EmergencyStore {
    storage: Storage,
    feed: Arc<dyn ReferenceFeed>,
    inner: RwLock<Collections>,
}

impl EmergencyStore {
    pub fn new(storage: Storage, feed: Arc<dyn ReferenceFeed>) -> Self {
        Self {
            storage,
            feed,
            inner: RwLock::new(Collections::default()),
        }
    }

    /// Warm-start from the persisted cache. Read failures are logged and
    /// leave the collections empty until the first refresh lands.
    pub async fn load_cache(&self) {
        let mut inner = self.inner.write().await;

        match self.storage.get(keys::ZONES).await {
            Ok(Some(raw)) => match serde_json::from_str(&raw) {
                Ok(zones) => inner.zones = zones,
                Err(e) => tracing::warn!("Ignoring malformed cached zones: {}", e),
            },
            Ok(None) => {}
            Err(e) => tracing::error!("Error loading cached zones: {}", e),
        }

        match self.storage.get(keys::ALERTS).await {
            Ok(Some(raw)) => match serde_json::from_str(&raw) {
                Ok(alerts) => inner.alerts = alerts,
                Err(e) => tracing::warn!("Ignoring malformed cached alerts: {}", e),
            },
            Ok(None) => {}
            Err(e) => tracing::error!("Error loading cached alerts: {}", e),
        }

        inner.last_sync = self.storage.get(keys::LAST_SYNC).await.unwrap_or_else(|e| {
            tracing::error!("Error loading last sync marker: {}", e);
            None
        });
    }

    /// Fetch a fresh snapshot from the reference feed and replace both
    /// collections. On fetch failure the persisted cache is reloaded
    /// instead. Returns whether the feed succeeded.
    pub async fn refresh(&self) -> bool {
        {
            let mut inner = self.inner.write().await;
            inner.refreshing = true;
        }

        let refreshed = match self.feed.fetch().await {
            Ok(snapshot) => {
                let mut inner = self.inner.write().await;
                inner.zones = snapshot.zones;
                inner.alerts = snapshot.alerts;
                self.persist(&mut inner).await;
                true
            }
            Err(e) => {
                tracing::warn!("Error refreshing data, falling back to cache: {}", e);
                self.load_cache().await;
                false
            }
        };

        let mut inner = self.inner.write().await;
        inner.refreshing = false;
        refreshed
    }

    /// Whether a refresh is currently in flight.
    pub async fn is_refreshing(&self) -> bool {
        self.inner.read().await.refreshing
    }

    /// Timestamp of the last successful cache write, if any.
    pub async fn last_sync(&self) -> Option<String> {
        self.inner.read().await.last_sync.clone()
    }

    // ==================== ZONE OPERATIONS ====================

    /// All zones, newest first.
    pub async fn zones(&self) -> Vec<EmergencyZone> {
        self.inner.read().await.zones.clone()
    }

    /// A single zone by id.
    pub async fn zone(&self, id: &str) -> Option<EmergencyZone> {
        self.inner
            .read()
            .await
            .zones
            .iter()
            .find(|z| z.id == id)
            .cloned()
    }

    /// Create a zone and prepend it to the collection.
    pub async fn add_zone(&self, request: CreateZoneRequest) -> EmergencyZone {
        let mut inner = self.inner.write().await;

        let zone = EmergencyZone {
            id: inner.allocate_id(),
            name: request.name,
            status: request.status,
            coordinates: request.coordinates,
            radius: request.radius,
            description: request.description,
            instructions: request.instructions,
            updated_at: Utc::now().to_rfc3339(),
        };

        inner.zones.insert(0, zone.clone());
        self.persist(&mut inner).await;
        zone
    }

    /// Full-record replace by id. Returns the stored record, or `None` when
    /// the id is unknown.
    pub async fn update_zone(
        &self,
        id: &str,
        request: UpdateZoneRequest,
    ) -> Option<EmergencyZone> {
        let mut inner = self.inner.write().await;

        let index = inner.zones.iter().position(|z| z.id == id)?;
        let zone = EmergencyZone {
            id: id.to_string(),
            name: request.name,
            status: request.status,
            coordinates: request.coordinates,
            radius: request.radius,
            description: request.description,
            instructions: request.instructions,
            updated_at: Utc::now().to_rfc3339(),
        };
        inner.zones[index] = zone.clone();

        self.persist(&mut inner).await;
        Some(zone)
    }

    /// Flip a zone's status to clear and refresh its timestamp. The record
    /// itself stays until deleted. No-op (`false`) when the id is unknown.
    pub async fn clear_zone(&self, id: &str) -> bool {
        let mut inner = self.inner.write().await;

        let Some(zone) = inner.zones.iter_mut().find(|z| z.id == id) else {
            return false;
        };
        zone.status = ZoneStatus::Clear;
        zone.updated_at = Utc::now().to_rfc3339();

        self.persist(&mut inner).await;
        true
    }

    /// Remove a zone permanently. No-op (`false`) when the id is unknown.
    pub async fn delete_zone(&self, id: &str) -> bool {
        let mut inner = self.inner.write().await;

        let before = inner.zones.len();
        inner.zones.retain(|z| z.id != id);
        if inner.zones.len() == before {
            return false;
        }

        self.persist(&mut inner).await;
        true
    }

    // ==================== ALERT OPERATIONS ====================

    /// All alerts, newest first.
    pub async fn alerts(&self) -> Vec<EmergencyAlert> {
        self.inner.read().await.alerts.clone()
    }

    /// A single alert by id.
    pub async fn alert(&self, id: &str) -> Option<EmergencyAlert> {
        self.inner
            .read()
            .await
            .alerts
            .iter()
            .find(|a| a.id == id)
            .cloned()
    }

    /// Alerts not yet cleared by an administrator.
    pub async fn active_alerts(&self) -> Vec<EmergencyAlert> {
        self.inner
            .read()
            .await
            .alerts
            .iter()
            .filter(|a| a.is_active)
            .cloned()
            .collect()
    }

    /// Create an alert and prepend it to the collection.
    pub async fn add_alert(&self, request: CreateAlertRequest) -> EmergencyAlert {
        let mut inner = self.inner.write().await;

        let alert = EmergencyAlert {
            id: inner.allocate_id(),
            title: request.title,
            message: request.message,
            severity: request.severity,
            timestamp: Utc::now().to_rfc3339(),
            is_active: request.is_active,
            location: request.location,
            affected_areas: request.affected_areas,
            instructions: request.instructions,
        };

        inner.alerts.insert(0, alert.clone());
        self.persist(&mut inner).await;
        alert
    }

    /// Full-record replace by id, preserving the creation timestamp.
    /// Returns the stored record, or `None` when the id is unknown.
    pub async fn update_alert(
        &self,
        id: &str,
        request: UpdateAlertRequest,
    ) -> Option<EmergencyAlert> {
        let mut inner = self.inner.write().await;

        let index = inner.alerts.iter().position(|a| a.id == id)?;
        let alert = EmergencyAlert {
            id: id.to_string(),
            title: request.title,
            message: request.message,
            severity: request.severity,
            timestamp: inner.alerts[index].timestamp.clone(),
            is_active: request.is_active,
            location: request.location,
            affected_areas: request.affected_areas,
            instructions: request.instructions,
        };
        inner.alerts[index] = alert.clone();

        self.persist(&mut inner).await;
        Some(alert)
    }

    /// Deactivate an alert. Idempotent: the flag only ever moves to false
    /// through this operation. No-op (`false`) when the id is unknown.
    pub async fn clear_alert(&self, id: &str) -> bool {
        let mut inner = self.inner.write().await;

        let Some(alert) = inner.alerts.iter_mut().find(|a| a.id == id) else {
            return false;
        };
        alert.is_active = false;

        self.persist(&mut inner).await;
        true
    }

    /// Write both collections plus the sync marker back to the cache in one
    /// transaction. Failures are logged; the in-memory state stays
    /// authoritative.
    async fn persist(&self, inner: &mut Collections) {
        let now = Utc::now().to_rfc3339();

        let (zones_json, alerts_json) = match (
            serde_json::to_string(&inner.zones),
            serde_json::to_string(&inner.alerts),
        ) {
            (Ok(z), Ok(a)) => (z, a),
            (z, a) => {
                tracing::warn!(
                    "Error serializing collections for cache: {:?} {:?}",
                    z.err(),
                    a.err()
                );
                return;
            }
        };

        match self
            .storage
            .put_many(&[
                (keys::ZONES, zones_json),
                (keys::ALERTS, alerts_json),
                (keys::LAST_SYNC, now.clone()),
            ])
            .await
        {
            Ok(()) => inner.last_sync = Some(now),
            Err(e) => tracing::warn!("Error saving to cache: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::{dataset, FailingFeed, StaticFeed};
    use crate::models::{AlertSeverity, ZoneCoordinates};
    use crate::storage::init_storage;
    use std::time::Duration;
    use tempfile::TempDir;

    async fn temp_store(feed: Arc<dyn ReferenceFeed>) -> (EmergencyStore, Storage, TempDir) {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let pool = init_storage(&dir.path().join("test.sqlite"))
            .await
            .expect("Failed to init storage");
        let storage = Storage::new(pool);
        (
            EmergencyStore::new(storage.clone(), feed),
            storage,
            dir,
        )
    }

    fn sample_zone() -> CreateZoneRequest {
        CreateZoneRequest {
            name: "Test Zone".to_string(),
            status: ZoneStatus::Active,
            coordinates: ZoneCoordinates { x: 0.5, y: 0.5 },
            radius: 50.0,
            description: "Unit test zone".to_string(),
            instructions: None,
        }
    }

    fn sample_alert(title: &str) -> CreateAlertRequest {
        CreateAlertRequest {
            title: title.to_string(),
            message: "Unit test alert".to_string(),
            severity: AlertSeverity::Medium,
            is_active: true,
            location: None,
            affected_areas: None,
            instructions: None,
        }
    }

    #[tokio::test]
    async fn test_refresh_replaces_collections_with_reference_data() {
        let (store, _storage, _dir) =
            temp_store(Arc::new(StaticFeed::new(Duration::ZERO))).await;

        assert!(store.refresh().await);

        assert_eq!(store.zones().await.len(), dataset::reference_zones().len());
        assert_eq!(
            store.alerts().await.len(),
            dataset::reference_alerts().len()
        );
        assert!(store.last_sync().await.is_some());
        assert!(!store.is_refreshing().await);
    }

    #[tokio::test]
    async fn test_refresh_failure_falls_back_to_cache() {
        let dir = TempDir::new().unwrap();
        let pool = init_storage(&dir.path().join("test.sqlite")).await.unwrap();
        let storage = Storage::new(pool);

        // Seed the cache through a working store first
        let seeded = EmergencyStore::new(
            storage.clone(),
            Arc::new(StaticFeed::new(Duration::ZERO)),
        );
        seeded.refresh().await;
        let cached_zone = seeded.add_zone(sample_zone()).await;

        // A fresh store with a broken feed serves the cached collections
        let store = EmergencyStore::new(storage, Arc::new(FailingFeed));
        assert!(!store.refresh().await);

        let zones = store.zones().await;
        assert_eq!(zones.len(), dataset::reference_zones().len() + 1);
        assert_eq!(zones[0].id, cached_zone.id);
    }

    #[tokio::test]
    async fn test_cold_start_reads_cache_before_refresh() {
        let dir = TempDir::new().unwrap();
        let pool = init_storage(&dir.path().join("test.sqlite")).await.unwrap();
        let storage = Storage::new(pool);

        let seeded = EmergencyStore::new(
            storage.clone(),
            Arc::new(StaticFeed::new(Duration::ZERO)),
        );
        seeded.refresh().await;

        let store = EmergencyStore::new(storage, Arc::new(FailingFeed));
        store.load_cache().await;

        assert_eq!(store.zones().await.len(), dataset::reference_zones().len());
        assert!(store.last_sync().await.is_some());
    }

    #[tokio::test]
    async fn test_add_zone_prepends_with_fresh_timestamp() {
        let (store, _storage, _dir) =
            temp_store(Arc::new(StaticFeed::new(Duration::ZERO))).await;
        store.refresh().await;

        let zone = store.add_zone(sample_zone()).await;

        let zones = store.zones().await;
        assert_eq!(zones[0].id, zone.id);
        assert_eq!(zones[0].coordinates, ZoneCoordinates { x: 0.5, y: 0.5 });
        assert_eq!(zones[0].radius, 50.0);
        assert_eq!(zones[0].status, ZoneStatus::Active);
        assert!(!zone.updated_at.is_empty());
    }

    #[tokio::test]
    async fn test_allocate_id_is_unique_under_rapid_adds() {
        let (store, _storage, _dir) =
            temp_store(Arc::new(StaticFeed::new(Duration::ZERO))).await;

        let a = store.add_zone(sample_zone()).await;
        let b = store.add_zone(sample_zone()).await;
        let c = store.add_zone(sample_zone()).await;

        assert_ne!(a.id, b.id);
        assert_ne!(b.id, c.id);
    }

    #[tokio::test]
    async fn test_clear_zone_flips_status_only() {
        let (store, _storage, _dir) =
            temp_store(Arc::new(StaticFeed::new(Duration::ZERO))).await;

        let zone = store.add_zone(sample_zone()).await;
        assert!(store.clear_zone(&zone.id).await);

        let cleared = store.zone(&zone.id).await.unwrap();
        assert_eq!(cleared.status, ZoneStatus::Clear);
        assert_eq!(cleared.id, zone.id);
        assert_eq!(cleared.coordinates, zone.coordinates);

        // unknown id is a no-op
        assert!(!store.clear_zone("missing").await);
    }

    #[tokio::test]
    async fn test_delete_zone_removes_exactly_one_and_is_noop_after() {
        let (store, _storage, _dir) =
            temp_store(Arc::new(StaticFeed::new(Duration::ZERO))).await;

        let zone = store.add_zone(sample_zone()).await;
        store.add_zone(sample_zone()).await;
        let before = store.zones().await.len();

        assert!(store.delete_zone(&zone.id).await);
        assert_eq!(store.zones().await.len(), before - 1);

        assert!(!store.delete_zone(&zone.id).await);
        assert_eq!(store.zones().await.len(), before - 1);
    }

    #[tokio::test]
    async fn test_clear_alert_is_idempotent_and_never_reactivates() {
        let (store, _storage, _dir) =
            temp_store(Arc::new(StaticFeed::new(Duration::ZERO))).await;

        let alert = store.add_alert(sample_alert("Trail Closure")).await;
        assert!(alert.is_active);

        assert!(store.clear_alert(&alert.id).await);
        assert!(!store.alert(&alert.id).await.unwrap().is_active);

        assert!(store.clear_alert(&alert.id).await);
        assert!(!store.alert(&alert.id).await.unwrap().is_active);

        assert!(!store.clear_alert("missing").await);
    }

    #[tokio::test]
    async fn test_active_alerts_matches_is_active_subset() {
        let (store, _storage, _dir) =
            temp_store(Arc::new(StaticFeed::new(Duration::ZERO))).await;

        let a = store.add_alert(sample_alert("A")).await;
        let b = store.add_alert(sample_alert("B")).await;
        store.add_alert(sample_alert("C")).await;

        store.clear_alert(&a.id).await;
        store.clear_alert(&b.id).await;

        let alerts = store.alerts().await;
        let expected: Vec<_> = alerts.iter().filter(|al| al.is_active).cloned().collect();
        let active = store.active_alerts().await;

        assert_eq!(active.len(), expected.len());
        assert!(active.iter().all(|al| al.is_active));
        assert_eq!(active.len(), 1);
    }

    #[tokio::test]
    async fn test_update_alert_preserves_creation_timestamp() {
        let (store, _storage, _dir) =
            temp_store(Arc::new(StaticFeed::new(Duration::ZERO))).await;

        let alert = store.add_alert(sample_alert("Original")).await;
        let updated = store
            .update_alert(
                &alert.id,
                UpdateAlertRequest {
                    title: "Replaced".to_string(),
                    message: "New message".to_string(),
                    severity: AlertSeverity::High,
                    is_active: true,
                    location: Some("Granite Basin".to_string()),
                    affected_areas: None,
                    instructions: None,
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.timestamp, alert.timestamp);
        assert_eq!(updated.title, "Replaced");

        let missing = store
            .update_alert(
                "missing",
                UpdateAlertRequest {
                    title: "x".to_string(),
                    message: "x".to_string(),
                    severity: AlertSeverity::Low,
                    is_active: false,
                    location: None,
                    affected_areas: None,
                    instructions: None,
                },
            )
            .await;
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn test_mutations_survive_reload_via_cache() {
        let dir = TempDir::new().unwrap();
        let pool = init_storage(&dir.path().join("test.sqlite")).await.unwrap();
        let storage = Storage::new(pool);

        let store = EmergencyStore::new(
            storage.clone(),
            Arc::new(StaticFeed::new(Duration::ZERO)),
        );
        let zone = store.add_zone(sample_zone()).await;
        let alert = store.add_alert(sample_alert("Persisted")).await;
        store.clear_alert(&alert.id).await;

        let reloaded = EmergencyStore::new(storage, Arc::new(FailingFeed));
        reloaded.load_cache().await;

        assert!(reloaded.zone(&zone.id).await.is_some());
        assert!(!reloaded.alert(&alert.id).await.unwrap().is_active);
    }
}
