//! Typed records for the scenario command vocabulary.
//!
//! [`Command`] is the internal tagged union the rest of the front end works
//! with; its serde shape (a `type` discriminant plus flattened sub-variant
//! tags) is the record format the player has always consumed.

use serde::de::Deserializer;
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};

/// A scenario number.
///
/// Integer and float literals both coerce to one decimal type, but integral
/// values serialize as JSON integers (`5000`, not `5000.0`) so downstream
/// consumers see the same rendering the source had.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scalar(pub f64);

impl From<f64> for Scalar {
    fn from(v: f64) -> Self {
        Scalar(v)
    }
}

impl std::fmt::Display for Scalar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serialize for Scalar {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        // 2^53 bounds the integers f64 represents exactly.
        if self.0.fract() == 0.0 && self.0.abs() <= 9_007_199_254_740_992.0 {
            serializer.serialize_i64(self.0 as i64)
        } else {
            serializer.serialize_f64(self.0)
        }
    }
}

impl<'de> Deserialize<'de> for Scalar {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        f64::deserialize(deserializer).map(Scalar)
    }
}

/// Chart rendering format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartType {
    /// Vector chart.
    Vector,
    /// Raster chart.
    Raster,
    /// MBTiles chart.
    Mbtiles,
}

/// A chart layer, selected either by numeric index or by symbolic name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ChartLayer {
    /// Numeric layer index.
    Index(i64),
    /// Symbolic layer name (lowercased).
    Name(String),
}

/// Track replay format for `#simulation`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SimFormat {
    /// JSON track file.
    Json,
    /// NMEA sentence log.
    Nmea,
}

/// The `#layer` sub-variants. Serialized flat under a `subtype` discriminant,
/// matching the record shape consumers have always seen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "subtype", rename_all = "camelCase")]
pub enum LayerKind {
    /// Bathymetry layer from a named source, optionally sonar-shaded.
    Bathymetry {
        /// Data source name (lowercased).
        source: String,
        /// Sonar shading; present only when the trailing flag was given.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        sonar: Option<bool>,
    },
    /// Litto3D altimetry for one region.
    Altimetry {
        /// Always `"litto3d"`.
        source: String,
        /// Region name (lowercased).
        region: String,
    },
    /// Oceanography layer with its own nested variants.
    Oceanography {
        /// Tides or currents.
        #[serde(flatten)]
        ocean: OceanLayer,
    },
}

/// Oceanography variants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "ocean", rename_all = "camelCase")]
pub enum OceanLayer {
    /// Tide display.
    Tides {
        /// Tide display type (lowercased).
        #[serde(rename = "tideType")]
        tide_type: String,
    },
    /// Current display.
    Currents {
        /// Tidal-atlas or forecast detail.
        #[serde(flatten)]
        detail: CurrentsDetail,
    },
}

/// Currents detail variants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "currents", rename_all = "camelCase")]
pub enum CurrentsDetail {
    /// Tidal atlas currents.
    TidalAtlas {
        /// Display dimension (lowercased).
        dim: String,
        /// Region name (lowercased).
        region: String,
        /// Depth selector (lowercased).
        depth: String,
    },
    /// Forecast model currents.
    Forecast {
        /// Forecast mode (lowercased).
        mode: String,
    },
}

/// The `#navigation` sub-variants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "nav", rename_all = "camelCase")]
pub enum NavKind {
    /// Monthly pilot chart.
    Pilotchart {
        /// Month number (1–12 expected, not validated).
        month: u32,
    },
    /// Navigation warnings for one region.
    Avurnav {
        /// Region name (lowercased).
        region: String,
    },
    /// GPX track overlay.
    Gpx {
        /// Track filename, preserved verbatim.
        filename: String,
    },
}

/// One extracted scenario command.
///
/// The tagged-union counterpart of the grammar's 24 command shapes: each
/// variant carries only the fields meaningful to it, defaults already
/// applied. Records are plain immutable values, created fresh per parse.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Command {
    /// Free-text annotation; ignored by the renderer.
    Comment {
        /// The annotation text (may be empty).
        text: String,
    },
    /// Bounding box of the area of interest.
    Bbox {
        /// Southern latitude bound.
        south: Scalar,
        /// Western longitude bound.
        west: Scalar,
        /// Northern latitude bound.
        north: Scalar,
        /// Eastern longitude bound.
        east: Scalar,
    },
    /// Camera move (flyTo).
    Move {
        /// Destination longitude in degrees.
        longitude: Scalar,
        /// Destination latitude in degrees.
        latitude: Scalar,
        /// Camera height in meters.
        height: Scalar,
        /// Heading in degrees, defaults to 0.
        heading: Scalar,
        /// Pitch in degrees, defaults to −45.
        pitch: Scalar,
        /// Roll in degrees, defaults to 0.
        roll: Scalar,
    },
    /// Day/night lighting toggle.
    Daynight {
        /// Lighting enabled.
        enabled: bool,
    },
    /// Nautical chart selection.
    Chart {
        /// Chart rendering format.
        #[serde(rename = "chartType")]
        chart_type: ChartType,
        /// Layer index or name.
        layer: ChartLayer,
    },
    /// Terrain source selection.
    Terrain {
        /// Terrain source name (lowercased).
        source: String,
    },
    /// Data layer with nested sub-variants.
    Layer {
        /// The selected layer subtype.
        #[serde(flatten)]
        layer: LayerKind,
    },
    /// 2D image overlay.
    Image {
        /// Image filename, preserved verbatim.
        filename: String,
        /// Optional title, present only when supplied.
        #[serde(skip_serializing_if = "Option::is_none")]
        title: Option<String>,
        /// Optional screen x position, present only with `y`.
        #[serde(skip_serializing_if = "Option::is_none")]
        x: Option<Scalar>,
        /// Optional screen y position, present only with `x`.
        #[serde(skip_serializing_if = "Option::is_none")]
        y: Option<Scalar>,
    },
    /// Image placed in the 3D scene.
    Image3D {
        /// Image filename, preserved verbatim.
        filename: String,
    },
    /// 2D video overlay.
    Video {
        /// Video URL.
        url: String,
        /// Title; empty when not supplied.
        title: String,
        /// Display width in pixels.
        width: Scalar,
        /// Display height in pixels.
        height: Scalar,
    },
    /// Video placed in the 3D scene.
    Video3D {
        /// Video URL.
        url: String,
        /// Autoplay; defaults to false when omitted.
        autoplay: bool,
    },
    /// Geolocated billboard.
    Billboard {
        /// Billboard image filename, preserved verbatim.
        filename: String,
        /// Title; empty when not supplied.
        title: String,
        /// Anchor longitude in degrees.
        longitude: Scalar,
        /// Anchor latitude in degrees.
        latitude: Scalar,
    },
    /// Callback billboard.
    #[serde(rename = "billboardCB")]
    BillboardCB {
        /// Billboard image filename, preserved verbatim.
        filename: String,
    },
    /// Fireworks effect at a position.
    Fireworks {
        /// Longitude in degrees.
        longitude: Scalar,
        /// Latitude in degrees.
        latitude: Scalar,
        /// Height in meters.
        height: Scalar,
    },
    /// Text panel.
    Text {
        /// Panel content; empty when not supplied.
        content: String,
        /// Panel title; empty when not supplied.
        title: String,
    },
    /// Audio playback.
    Audio {
        /// Audio filename, preserved verbatim.
        filename: String,
    },
    /// Speech synthesis.
    Speech {
        /// Text to speak (may be empty).
        text: String,
    },
    /// Webcam layer.
    Webcam,
    /// Track simulation.
    Simulation {
        /// Track file format.
        format: SimFormat,
        /// Track filename, preserved verbatim.
        filename: String,
        /// Trailing free-form parameters, preserved verbatim.
        params: Vec<String>,
    },
    /// Navigation documents.
    Navigation {
        /// The selected navigation mode.
        #[serde(flatten)]
        nav: NavKind,
    },
    /// Seabed view.
    Seabed,
    /// Quiz overlay.
    Quiz {
        /// Quiz definition filename, preserved verbatim.
        filename: String,
    },
    /// Clear one named layer.
    Clear {
        /// Layer name (lowercased).
        layer: String,
    },
    /// Clear everything.
    ClearAll,
}

impl Command {
    /// The record's discriminant string, as used in serialized output and
    /// validation messages.
    pub fn tag(&self) -> &'static str {
        match self {
            Command::Comment { .. } => "comment",
            Command::Bbox { .. } => "bbox",
            Command::Move { .. } => "move",
            Command::Daynight { .. } => "daynight",
            Command::Chart { .. } => "chart",
            Command::Terrain { .. } => "terrain",
            Command::Layer { .. } => "layer",
            Command::Image { .. } => "image",
            Command::Image3D { .. } => "image3D",
            Command::Video { .. } => "video",
            Command::Video3D { .. } => "video3D",
            Command::Billboard { .. } => "billboard",
            Command::BillboardCB { .. } => "billboardCB",
            Command::Fireworks { .. } => "fireworks",
            Command::Text { .. } => "text",
            Command::Audio { .. } => "audio",
            Command::Speech { .. } => "speech",
            Command::Webcam => "webcam",
            Command::Simulation { .. } => "simulation",
            Command::Navigation { .. } => "navigation",
            Command::Seabed => "seabed",
            Command::Quiz { .. } => "quiz",
            Command::Clear { .. } => "clear",
            Command::ClearAll => "clearAll",
        }
    }
}
