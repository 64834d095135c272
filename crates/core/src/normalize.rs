//! Normalization into the stable external schema.
//!
//! Maps the internal record shape 1:1 into the versioned consumer schema: a
//! uniform `kind` discriminant, constant fields made explicit (`move` gains
//! its `mode`/`target`), renames (`chartType` → `format`), and optional
//! fields omitted — never emitted as null or empty placeholders.

use crate::command::{ChartLayer, ChartType, Command, LayerKind, NavKind, Scalar, SimFormat};
use serde::Serialize;

/// The external-schema counterpart of [`Command`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum NormalizedCommand {
    /// Annotation.
    Comment {
        /// Annotation text.
        text: String,
    },
    /// Bounding box.
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
    /// Camera move with its constant mode/target made explicit.
    Move {
        /// Move mode, always `"flyTo"`.
        mode: &'static str,
        /// Move target, always `"camera"`.
        target: &'static str,
        /// Destination longitude in degrees.
        longitude: Scalar,
        /// Destination latitude in degrees.
        latitude: Scalar,
        /// Camera height in meters.
        height: Scalar,
        /// Heading in degrees.
        heading: Scalar,
        /// Pitch in degrees.
        pitch: Scalar,
        /// Roll in degrees.
        roll: Scalar,
    },
    /// Lighting toggle.
    Daynight {
        /// Lighting enabled.
        enabled: bool,
    },
    /// Chart selection, fields renamed for consumers.
    Chart {
        /// Chart rendering format (was `chartType`).
        format: ChartType,
        /// Layer index or name (was `layer`).
        name: ChartLayer,
    },
    /// Terrain source.
    Terrain {
        /// Terrain source name.
        source: String,
    },
    /// Data layer; subtype fields flattened.
    Layer {
        /// The selected layer subtype.
        #[serde(flatten)]
        layer: LayerKind,
    },
    /// 2D image overlay.
    Image {
        /// Image filename.
        filename: String,
        /// Title; omitted when absent or empty.
        #[serde(skip_serializing_if = "Option::is_none")]
        title: Option<String>,
        /// Screen x position; omitted when absent.
        #[serde(skip_serializing_if = "Option::is_none")]
        x: Option<Scalar>,
        /// Screen y position; omitted when absent.
        #[serde(skip_serializing_if = "Option::is_none")]
        y: Option<Scalar>,
    },
    /// 3D-scene image.
    Image3D {
        /// Image filename.
        filename: String,
    },
    /// 2D video overlay.
    Video {
        /// Video URL.
        url: String,
        /// Title; omitted when empty.
        #[serde(skip_serializing_if = "Option::is_none")]
        title: Option<String>,
        /// Display width in pixels.
        width: Scalar,
        /// Display height in pixels.
        height: Scalar,
    },
    /// 3D-scene video.
    Video3D {
        /// Video URL.
        url: String,
        /// Autoplay flag.
        autoplay: bool,
    },
    /// Geolocated billboard.
    Billboard {
        /// Billboard image filename.
        filename: String,
        /// Title; omitted when empty.
        #[serde(skip_serializing_if = "Option::is_none")]
        title: Option<String>,
        /// Anchor longitude in degrees.
        longitude: Scalar,
        /// Anchor latitude in degrees.
        latitude: Scalar,
    },
    /// Callback billboard.
    BillboardCB {
        /// Billboard image filename.
        filename: String,
    },
    /// Fireworks effect.
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
        /// Panel content.
        content: String,
        /// Title; omitted when empty.
        #[serde(skip_serializing_if = "Option::is_none")]
        title: Option<String>,
    },
    /// Audio playback.
    Audio {
        /// Audio filename.
        filename: String,
    },
    /// Speech synthesis.
    Speech {
        /// Text to speak.
        text: String,
    },
    /// Webcam layer.
    Webcam,
    /// Track simulation.
    Simulation {
        /// Track file format.
        format: SimFormat,
        /// Track filename.
        filename: String,
        /// Trailing free-form parameters.
        params: Vec<String>,
    },
    /// Navigation documents, dispatch tag renamed to `mode`.
    Navigation {
        /// Navigation mode (`pilotchart`, `avurnav` or `gpx`).
        mode: &'static str,
        /// Pilot-chart month; omitted otherwise.
        #[serde(skip_serializing_if = "Option::is_none")]
        month: Option<u32>,
        /// AVURNAV region; omitted otherwise.
        #[serde(skip_serializing_if = "Option::is_none")]
        region: Option<String>,
        /// GPX filename; omitted otherwise.
        #[serde(skip_serializing_if = "Option::is_none")]
        filename: Option<String>,
    },
    /// Seabed view.
    Seabed,
    /// Quiz overlay.
    Quiz {
        /// Quiz definition filename.
        filename: String,
    },
    /// Clear one named layer.
    Clear {
        /// Layer name.
        layer: String,
    },
    /// Clear everything.
    ClearAll,
}

/// A complete normalized scenario, the stable shape downstream consumers
/// deserialize.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedScenario {
    /// Schema discriminant, always `"scenario"`.
    #[serde(rename = "type")]
    pub kind: &'static str,
    /// Normalized commands in source order.
    pub commands: Vec<NormalizedCommand>,
}

/// Map extracted records into the external schema.
///
/// Taking records (not text) encodes the contract that normalization only
/// runs over a successful parse. Pure, total, and deterministic.
pub fn to_normalized(commands: &[Command]) -> NormalizedScenario {
    NormalizedScenario {
        kind: "scenario",
        commands: commands.iter().map(normalize_command).collect(),
    }
}

/// An empty title is "absent" for the external schema.
fn non_empty(s: &str) -> Option<String> {
    if s.is_empty() { None } else { Some(s.to_string()) }
}

fn normalize_command(cmd: &Command) -> NormalizedCommand {
    match cmd {
        Command::Comment { text } => NormalizedCommand::Comment { text: text.clone() },
        Command::Bbox {
            south,
            west,
            north,
            east,
        } => NormalizedCommand::Bbox {
            south: *south,
            west: *west,
            north: *north,
            east: *east,
        },
        Command::Move {
            longitude,
            latitude,
            height,
            heading,
            pitch,
            roll,
        } => NormalizedCommand::Move {
            mode: "flyTo",
            target: "camera",
            longitude: *longitude,
            latitude: *latitude,
            height: *height,
            heading: *heading,
            pitch: *pitch,
            roll: *roll,
        },
        Command::Daynight { enabled } => NormalizedCommand::Daynight { enabled: *enabled },
        Command::Chart { chart_type, layer } => NormalizedCommand::Chart {
            format: *chart_type,
            name: layer.clone(),
        },
        Command::Terrain { source } => NormalizedCommand::Terrain {
            source: source.clone(),
        },
        Command::Layer { layer } => NormalizedCommand::Layer {
            layer: layer.clone(),
        },
        Command::Image {
            filename,
            title,
            x,
            y,
        } => NormalizedCommand::Image {
            filename: filename.clone(),
            title: title.as_deref().and_then(non_empty),
            x: *x,
            y: *y,
        },
        Command::Image3D { filename } => NormalizedCommand::Image3D {
            filename: filename.clone(),
        },
        Command::Video {
            url,
            title,
            width,
            height,
        } => NormalizedCommand::Video {
            url: url.clone(),
            title: non_empty(title),
            width: *width,
            height: *height,
        },
        Command::Video3D { url, autoplay } => NormalizedCommand::Video3D {
            url: url.clone(),
            autoplay: *autoplay,
        },
        Command::Billboard {
            filename,
            title,
            longitude,
            latitude,
        } => NormalizedCommand::Billboard {
            filename: filename.clone(),
            title: non_empty(title),
            longitude: *longitude,
            latitude: *latitude,
        },
        Command::BillboardCB { filename } => NormalizedCommand::BillboardCB {
            filename: filename.clone(),
        },
        Command::Fireworks {
            longitude,
            latitude,
            height,
        } => NormalizedCommand::Fireworks {
            longitude: *longitude,
            latitude: *latitude,
            height: *height,
        },
        Command::Text { content, title } => NormalizedCommand::Text {
            content: content.clone(),
            title: non_empty(title),
        },
        Command::Audio { filename } => NormalizedCommand::Audio {
            filename: filename.clone(),
        },
        Command::Speech { text } => NormalizedCommand::Speech { text: text.clone() },
        Command::Webcam => NormalizedCommand::Webcam,
        Command::Simulation {
            format,
            filename,
            params,
        } => NormalizedCommand::Simulation {
            format: *format,
            filename: filename.clone(),
            params: params.clone(),
        },
        Command::Navigation { nav } => match nav {
            NavKind::Pilotchart { month } => NormalizedCommand::Navigation {
                mode: "pilotchart",
                month: Some(*month),
                region: None,
                filename: None,
            },
            NavKind::Avurnav { region } => NormalizedCommand::Navigation {
                mode: "avurnav",
                month: None,
                region: Some(region.clone()),
                filename: None,
            },
            NavKind::Gpx { filename } => NormalizedCommand::Navigation {
                mode: "gpx",
                month: None,
                region: None,
                filename: Some(filename.clone()),
            },
        },
        Command::Seabed => NormalizedCommand::Seabed,
        Command::Quiz { filename } => NormalizedCommand::Quiz {
            filename: filename.clone(),
        },
        Command::Clear { layer } => NormalizedCommand::Clear {
            layer: layer.clone(),
        },
        Command::ClearAll => NormalizedCommand::ClearAll,
    }
}
