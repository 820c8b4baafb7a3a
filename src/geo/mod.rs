//! Device location plumbing for the map display.
//!
//! A `LocationProvider` capability stands in for the platform location
//! service; `LocationTracker` drives the permission/fix state machine the
//! map layer renders from. Location failures are classified and held as a
//! dismissible message with a retry path. They never escalate.

mod mock;

pub use mock::MockLocationProvider;

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

/// Outcome of a permission request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionStatus {
    Granted,
    Denied,
}

/// A single position fix.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position {
    pub latitude: f64,
    pub longitude: f64,
}

/// Classified location failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocationError {
    PermissionDenied,
    PositionUnavailable,
    Timeout,
    Unknown,
}

impl LocationError {
    /// User-facing message paired with the retry affordance.
    pub fn message(&self) -> &'static str {
        match self {
            LocationError::PermissionDenied => {
                "Location permission denied. Enable it in device settings."
            }
            LocationError::PositionUnavailable => "Unable to get your current location.",
            LocationError::Timeout => "Timed out waiting for a location fix.",
            LocationError::Unknown => "Location unavailable. Please try again.",
        }
    }
}

/// Capability trait for the platform location service.
#[async_trait]
pub trait LocationProvider: Send + Sync {
    /// Ask the platform for foreground location permission.
    async fn request_permission(&self) -> Result<PermissionStatus, LocationError>;

    /// Request a single-shot position fix.
    async fn current_position(&self) -> Result<Position, LocationError>;
}

/// Permission/fix state as rendered by the map display.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LocationState {
    PermissionUnknown,
    PermissionDenied,
    GrantedNoFix,
    GrantedWithFix(Position),
}

#[derive(Debug)]
struct TrackerState {
    state: LocationState,
    error: Option<LocationError>,
}

/// Drives the location state machine over a provider.
pub struct LocationTracker {
    provider: Arc<dyn LocationProvider>,
    inner: RwLock<TrackerState>,
}

impl LocationTracker {
    pub fn new(provider: Arc<dyn LocationProvider>) -> Self {
        Self {
            provider,
            inner: RwLock::new(TrackerState {
                state: LocationState::PermissionUnknown,
                error: None,
            }),
        }
    }

    /// Mount-time entry point: request permission and, when granted, a fix.
    pub async fn start(&self) {
        match self.provider.request_permission().await {
            Ok(PermissionStatus::Granted) => {
                {
                    let mut inner = self.inner.write().await;
                    inner.state = LocationState::GrantedNoFix;
                }
                self.acquire_fix().await;
            }
            Ok(PermissionStatus::Denied) => {
                let mut inner = self.inner.write().await;
                inner.state = LocationState::PermissionDenied;
            }
            Err(e) => {
                tracing::warn!("Error requesting location permission: {}", e.message());
                let mut inner = self.inner.write().await;
                if e == LocationError::PermissionDenied {
                    inner.state = LocationState::PermissionDenied;
                }
                inner.error = Some(e);
            }
        }
    }

    /// Retry affordance: dismisses the error, then either re-requests
    /// permission or just re-acquires the fix, depending on where we are.
    pub async fn retry(&self) {
        self.dismiss_error().await;

        let state = self.state().await;
        match state {
            LocationState::GrantedNoFix | LocationState::GrantedWithFix(_) => {
                self.acquire_fix().await
            }
            LocationState::PermissionUnknown | LocationState::PermissionDenied => {
                self.start().await
            }
        }
    }

    async fn acquire_fix(&self) {
        match self.provider.current_position().await {
            Ok(position) => {
                let mut inner = self.inner.write().await;
                inner.state = LocationState::GrantedWithFix(position);
            }
            Err(e) => {
                tracing::warn!("Error getting current location: {}", e.message());
                // stay in no-fix (or keep the stale fix) and surface the error
                let mut inner = self.inner.write().await;
                inner.error = Some(e);
            }
        }
    }

    pub async fn state(&self) -> LocationState {
        self.inner.read().await.state
    }

    pub async fn last_error(&self) -> Option<LocationError> {
        self.inner.read().await.error
    }

    pub async fn dismiss_error(&self) {
        self.inner.write().await.error = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_granted_with_fix() {
        let provider = Arc::new(MockLocationProvider::granted(Position {
            latitude: 46.0059,
            longitude: -112.5362,
        }));
        let tracker = LocationTracker::new(provider);

        assert_eq!(tracker.state().await, LocationState::PermissionUnknown);
        tracker.start().await;

        match tracker.state().await {
            LocationState::GrantedWithFix(pos) => assert_eq!(pos.latitude, 46.0059),
            other => panic!("unexpected state {:?}", other),
        }
        assert!(tracker.last_error().await.is_none());
    }

    #[tokio::test]
    async fn test_denied_then_retry_grants() {
        let provider = Arc::new(MockLocationProvider::denied_then_granted(Position {
            latitude: 46.0,
            longitude: -112.5,
        }));
        let tracker = LocationTracker::new(provider);

        tracker.start().await;
        assert_eq!(tracker.state().await, LocationState::PermissionDenied);

        tracker.retry().await;
        assert!(matches!(
            tracker.state().await,
            LocationState::GrantedWithFix(_)
        ));
    }

    #[tokio::test]
    async fn test_fix_failure_stays_no_fix_with_error() {
        let provider = Arc::new(MockLocationProvider::granted_without_fix(
            LocationError::PositionUnavailable,
        ));
        let tracker = LocationTracker::new(provider);

        tracker.start().await;
        assert_eq!(tracker.state().await, LocationState::GrantedNoFix);
        assert_eq!(
            tracker.last_error().await,
            Some(LocationError::PositionUnavailable)
        );

        tracker.dismiss_error().await;
        assert!(tracker.last_error().await.is_none());
        assert_eq!(tracker.state().await, LocationState::GrantedNoFix);
    }

    #[tokio::test]
    async fn test_retry_after_timeout_reacquires_fix() {
        let provider = Arc::new(MockLocationProvider::flaky_fix(
            LocationError::Timeout,
            Position {
                latitude: 46.1,
                longitude: -112.4,
            },
        ));
        let tracker = LocationTracker::new(provider);

        tracker.start().await;
        assert_eq!(tracker.state().await, LocationState::GrantedNoFix);
        assert_eq!(tracker.last_error().await, Some(LocationError::Timeout));

        tracker.retry().await;
        assert!(matches!(
            tracker.state().await,
            LocationState::GrantedWithFix(_)
        ));
        assert!(tracker.last_error().await.is_none());
    }

    #[test]
    fn test_error_messages_are_user_facing() {
        assert!(LocationError::Timeout.message().contains("Timed out"));
        assert!(LocationError::PermissionDenied
            .message()
            .contains("permission"));
    }
}
