//! Mock location provider for testing and development.

use std::collections::VecDeque;

use async_trait::async_trait;
use tokio::sync::Mutex;

use super::{LocationError, LocationProvider, PermissionStatus, Position};

/// Scripted provider: each call pops the next queued result; an empty queue
/// repeats the last configured fallback.
pub struct MockLocationProvider {
    permissions: Mutex<VecDeque<Result<PermissionStatus, LocationError>>>,
    permission_fallback: Result<PermissionStatus, LocationError>,
    positions: Mutex<VecDeque<Result<Position, LocationError>>>,
    position_fallback: Result<Position, LocationError>,
}

impl MockLocationProvider {
    fn new(
        permissions: Vec<Result<PermissionStatus, LocationError>>,
        permission_fallback: Result<PermissionStatus, LocationError>,
        positions: Vec<Result<Position, LocationError>>,
        position_fallback: Result<Position, LocationError>,
    ) -> Self {
        Self {
            permissions: Mutex::new(permissions.into()),
            permission_fallback,
            positions: Mutex::new(positions.into()),
            position_fallback,
        }
    }

    /// Permission granted, every fix succeeds at `position`.
    pub fn granted(position: Position) -> Self {
        Self::new(
            Vec::new(),
            Ok(PermissionStatus::Granted),
            Vec::new(),
            Ok(position),
        )
    }

    /// First request denied, subsequent requests granted with a working fix.
    pub fn denied_then_granted(position: Position) -> Self {
        Self::new(
            vec![Ok(PermissionStatus::Denied)],
            Ok(PermissionStatus::Granted),
            Vec::new(),
            Ok(position),
        )
    }

    /// Permission granted but every fix fails with `error`.
    pub fn granted_without_fix(error: LocationError) -> Self {
        Self::new(
            Vec::new(),
            Ok(PermissionStatus::Granted),
            Vec::new(),
            Err(error),
        )
    }

    /// Permission granted; the first fix fails with `error`, later ones
    /// succeed at `position`.
    pub fn flaky_fix(error: LocationError, position: Position) -> Self {
        Self::new(
            Vec::new(),
            Ok(PermissionStatus::Granted),
            vec![Err(error)],
            Ok(position),
        )
    }
}

#[async_trait]
impl LocationProvider for MockLocationProvider {
    async fn request_permission(&self) -> Result<PermissionStatus, LocationError> {
        self.permissions
            .lock()
            .await
            .pop_front()
            .unwrap_or(self.permission_fallback)
    }

    async fn current_position(&self) -> Result<Position, LocationError> {
        self.positions
            .lock()
            .await
            .pop_front()
            .unwrap_or(self.position_fallback)
    }
}
