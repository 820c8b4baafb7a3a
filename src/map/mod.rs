//! Map rendering capability.
//!
//! `MapRenderer` turns the zone collection into drawable geometry. The
//! geographic implementation projects normalized coordinates into the
//! operating region for native map clients; the schematic implementation is
//! the fallback that places proportional circles over a flat viewport when
//! native mapping is unavailable. The concrete renderer is chosen at
//! composition time, not by platform sniffing inside the drawing code.

use serde::Serialize;

use crate::models::{EmergencyZone, ZoneStatus};

/// Pixel dimensions of the drawing surface (schematic rendering only).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Default for Viewport {
    /// Unit viewport: schematic output stays in normalized coordinates.
    fn default() -> Self {
        Self {
            width: 1.0,
            height: 1.0,
        }
    }
}

/// Geographic region the normalized coordinates are projected into.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapRegion {
    pub latitude: f64,
    pub longitude: f64,
    pub latitude_delta: f64,
    pub longitude_delta: f64,
}

impl Default for MapRegion {
    /// Montana operating area.
    fn default() -> Self {
        Self {
            latitude: 46.0059,
            longitude: -112.5362,
            latitude_delta: 0.5,
            longitude_delta: 0.5,
        }
    }
}

/// Drawable geometry for one zone marker.
///
/// For geographic rendering `x`/`y` are longitude/latitude and `radius` is
/// meters; for schematic rendering they are viewport pixels.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderedZone {
    pub zone_id: String,
    pub name: String,
    pub status: ZoneStatus,
    pub x: f64,
    pub y: f64,
    pub radius: f64,
    pub fill_color: String,
    pub stroke_color: String,
    pub selected: bool,
}

/// Capability trait implemented by each rendering mode.
pub trait MapRenderer: Send + Sync {
    fn render(
        &self,
        zones: &[EmergencyZone],
        viewport: &Viewport,
        selected: Option<&str>,
    ) -> Vec<RenderedZone>;
}

/// Zone fill color with the standard 0.3 overlay opacity.
pub fn status_fill(status: ZoneStatus) -> String {
    let (r, g, b) = status_rgb(status);
    format!("rgba({}, {}, {}, 0.3)", r, g, b)
}

/// Zone stroke/marker color.
pub fn status_stroke(status: ZoneStatus) -> &'static str {
    match status {
        ZoneStatus::Active => "#DC2626",
        ZoneStatus::Caution => "#F59E0B",
        ZoneStatus::Clear => "#10B981",
    }
}

fn status_rgb(status: ZoneStatus) -> (u8, u8, u8) {
    match status {
        ZoneStatus::Active => (220, 38, 38),
        ZoneStatus::Caution => (245, 158, 11),
        ZoneStatus::Clear => (16, 185, 129),
    }
}

fn marker(zone: &EmergencyZone, x: f64, y: f64, radius: f64, selected: Option<&str>) -> RenderedZone {
    RenderedZone {
        zone_id: zone.id.clone(),
        name: zone.name.clone(),
        status: zone.status,
        x,
        y,
        radius,
        fill_color: status_fill(zone.status),
        stroke_color: status_stroke(zone.status).to_string(),
        selected: selected == Some(zone.id.as_str()),
    }
}

/// Projects zones around the region center; zone radius becomes meters.
#[derive(Debug, Default)]
pub struct GeographicRenderer {
    pub region: MapRegion,
}

impl MapRenderer for GeographicRenderer {
    fn render(
        &self,
        zones: &[EmergencyZone],
        _viewport: &Viewport,
        selected: Option<&str>,
    ) -> Vec<RenderedZone> {
        zones
            .iter()
            .map(|zone| {
                let latitude = self.region.latitude + (zone.coordinates.y - 0.5) * 0.1;
                let longitude = self.region.longitude + (zone.coordinates.x - 0.5) * 0.1;
                marker(zone, longitude, latitude, zone.radius * 100.0, selected)
            })
            .collect()
    }
}

/// Fallback: proportionally positioned circles over a flat viewport.
#[derive(Debug, Default)]
pub struct SchematicRenderer;

impl MapRenderer for SchematicRenderer {
    fn render(
        &self,
        zones: &[EmergencyZone],
        viewport: &Viewport,
        selected: Option<&str>,
    ) -> Vec<RenderedZone> {
        zones
            .iter()
            .map(|zone| {
                let x = zone.coordinates.x * viewport.width;
                let y = zone.coordinates.y * viewport.height;
                marker(zone, x, y, zone.radius, selected)
            })
            .collect()
    }
}

/// Renderer choice made at composition time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RendererKind {
    Geographic,
    Schematic,
}

impl RendererKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RendererKind::Geographic => "geographic",
            RendererKind::Schematic => "schematic",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "geographic" => Some(RendererKind::Geographic),
            "schematic" => Some(RendererKind::Schematic),
            _ => None,
        }
    }

    pub fn build(&self) -> Box<dyn MapRenderer> {
        match self {
            RendererKind::Geographic => Box::new(GeographicRenderer::default()),
            RendererKind::Schematic => Box::new(SchematicRenderer),
        }
    }
}

/// Marker selection state: at most one zone, selecting another replaces it.
#[derive(Debug, Default)]
pub struct MapScene {
    selected: Option<String>,
}

impl MapScene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn select(&mut self, zone_id: &str) {
        self.selected = Some(zone_id.to_string());
    }

    pub fn deselect(&mut self) {
        self.selected = None;
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }
}
