use serde::Serialize;

/// The fixed, closed keyword vocabulary of the scenario language.
///
/// Recognition is case-insensitive: barewords are uppercased before lookup,
/// so `#BBOX`, `#bbox` and `#BbOx` all select [`Keyword::Bbox`]. Barewords
/// that match no keyword stay generic `Word` tokens, which keeps filenames
/// and region codes usable as arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Keyword {
    // Commands
    /// `#comment` — free-text annotation.
    Comment,
    /// `#bbox` — bounding box (south, west, north, east).
    Bbox,
    /// `#move` — camera move.
    Move,
    /// `flyTo` camera-move mode selector.
    FlyTo,
    /// `camera` move target selector.
    Camera,
    /// `#daynight` — day/night lighting toggle.
    Daynight,
    /// `#chart` — nautical chart layer.
    Chart,
    /// `#terrain` — terrain source.
    Terrain,
    /// `#layer` — data layer with sub-variants.
    Layer,
    /// `#image` — 2D image overlay.
    Image,
    /// `#image3D` — image placed in the 3D scene.
    Image3D,
    /// `#video` — 2D video overlay.
    Video,
    /// `#video3D` — video placed in the 3D scene.
    Video3D,
    /// `#billboard` — geolocated billboard.
    Billboard,
    /// `#billboardCB` — callback billboard.
    BillboardCB,
    /// `#fireworks` — fireworks effect.
    Fireworks,
    /// `#text` — text panel.
    Text,
    /// `#audio` — audio playback.
    Audio,
    /// `#speech` — speech synthesis.
    Speech,
    /// `#webcam` — webcam layer.
    Webcam,
    /// `#simulation` — track simulation.
    Simulation,
    /// `#navigation` — navigation documents.
    Navigation,
    /// `#seabed` — seabed view.
    Seabed,
    /// `#quiz` — quiz overlay.
    Quiz,
    /// `#clear` — clear one layer.
    Clear,
    /// `#clearAll` — clear everything.
    ClearAll,
    // Chart types
    /// Vector chart format.
    Vector,
    /// Raster chart format.
    Raster,
    /// MBTiles chart format.
    Mbtiles,
    // Terrain
    /// Google photorealistic 3D tiles terrain source.
    Google3D,
    // Layers
    /// Bathymetry layer selector.
    Bathymetry,
    /// Altimetry layer selector.
    Altimetry,
    /// Oceanography layer selector.
    Oceanography,
    /// Litto3D altimetry source.
    Litto3D,
    /// Sonar shading flag for bathymetry.
    Sonar,
    /// Tides oceanography variant.
    Tides,
    /// Currents oceanography variant.
    Currents,
    /// Tidal-atlas currents detail.
    TidalAtlas,
    /// Forecast currents detail.
    Forecast,
    // Navigation
    /// Pilot chart navigation variant.
    Pilotchart,
    /// NAC chart selector (reserved).
    Nac,
    /// AVURNAV (navigation warnings) variant.
    Avurnav,
    /// GPX track variant.
    Gpx,
    // Simulation formats
    /// JSON track format.
    Json,
    /// NMEA track format.
    Nmea,
    // Boolean literals
    /// Literal `true`.
    True,
    /// Literal `false`.
    False,
}

impl Keyword {
    /// Case-insensitive lookup of a bareword against the vocabulary table.
    pub fn from_bareword(text: &str) -> Option<Keyword> {
        Some(match text.to_ascii_uppercase().as_str() {
            "COMMENT" => Keyword::Comment,
            "BBOX" => Keyword::Bbox,
            "MOVE" => Keyword::Move,
            "FLYTO" => Keyword::FlyTo,
            "CAMERA" => Keyword::Camera,
            "DAYNIGHT" => Keyword::Daynight,
            "CHART" => Keyword::Chart,
            "TERRAIN" => Keyword::Terrain,
            "LAYER" => Keyword::Layer,
            "IMAGE" => Keyword::Image,
            "IMAGE3D" => Keyword::Image3D,
            "VIDEO" => Keyword::Video,
            "VIDEO3D" => Keyword::Video3D,
            "BILLBOARD" => Keyword::Billboard,
            "BILLBOARDCB" => Keyword::BillboardCB,
            "FIREWORKS" => Keyword::Fireworks,
            "TEXT" => Keyword::Text,
            "AUDIO" => Keyword::Audio,
            "SPEECH" => Keyword::Speech,
            "WEBCAM" => Keyword::Webcam,
            "SIMULATION" => Keyword::Simulation,
            "NAVIGATION" => Keyword::Navigation,
            "SEABED" => Keyword::Seabed,
            "QUIZ" => Keyword::Quiz,
            "CLEAR" => Keyword::Clear,
            "CLEARALL" => Keyword::ClearAll,
            "VECTOR" => Keyword::Vector,
            "RASTER" => Keyword::Raster,
            "MBTILES" => Keyword::Mbtiles,
            "GOOGLE3D" => Keyword::Google3D,
            "BATHYMETRY" => Keyword::Bathymetry,
            "ALTIMETRY" => Keyword::Altimetry,
            "OCEANOGRAPHY" => Keyword::Oceanography,
            "LITTO3D" => Keyword::Litto3D,
            "SONAR" => Keyword::Sonar,
            "TIDES" => Keyword::Tides,
            "CURRENTS" => Keyword::Currents,
            "TIDALATLAS" => Keyword::TidalAtlas,
            "FORECAST" => Keyword::Forecast,
            "PILOTCHART" => Keyword::Pilotchart,
            "NAC" => Keyword::Nac,
            "AVURNAV" => Keyword::Avurnav,
            "GPX" => Keyword::Gpx,
            "JSON" => Keyword::Json,
            "NMEA" => Keyword::Nmea,
            "TRUE" => Keyword::True,
            "FALSE" => Keyword::False,
            _ => return None,
        })
    }

    /// `true` for keywords that may appear directly after `#`.
    pub fn is_command(self) -> bool {
        matches!(
            self,
            Keyword::Comment
                | Keyword::Bbox
                | Keyword::Move
                | Keyword::Daynight
                | Keyword::Chart
                | Keyword::Terrain
                | Keyword::Layer
                | Keyword::Image
                | Keyword::Image3D
                | Keyword::Video
                | Keyword::Video3D
                | Keyword::Billboard
                | Keyword::BillboardCB
                | Keyword::Fireworks
                | Keyword::Text
                | Keyword::Audio
                | Keyword::Speech
                | Keyword::Webcam
                | Keyword::Simulation
                | Keyword::Navigation
                | Keyword::Seabed
                | Keyword::Quiz
                | Keyword::Clear
                | Keyword::ClearAll
        )
    }
}
