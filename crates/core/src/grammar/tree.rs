use super::lexer::Token;
use serde::Serialize;

/// Grammar rule names, one per internal parse-tree node shape.
///
/// The `*Cmd` rules correspond 1:1 to the command vocabulary; the remaining
/// rules are the nested variant sub-grammars (layer subtypes, oceanography,
/// currents detail, navigation modes).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Rule {
    /// `command+` — the whole input.
    CommandLine,
    /// `'#' commandName commandBody?` — one chained command.
    Command,
    /// `#comment` body.
    CommentCmd,
    /// `#bbox` body.
    BboxCmd,
    /// `#move` body.
    MoveCmd,
    /// `#daynight` body.
    DaynightCmd,
    /// `#chart` body.
    ChartCmd,
    /// `#terrain` body.
    TerrainCmd,
    /// `#layer` body.
    LayerCmd,
    /// `#image` body.
    ImageCmd,
    /// `#image3D` body.
    Image3DCmd,
    /// `#video` body.
    VideoCmd,
    /// `#video3D` body.
    Video3DCmd,
    /// `#billboard` body.
    BillboardCmd,
    /// `#billboardCB` body.
    BillboardCBCmd,
    /// `#fireworks` body.
    FireworksCmd,
    /// `#text` body.
    TextCmd,
    /// `#audio` body.
    AudioCmd,
    /// `#speech` body.
    SpeechCmd,
    /// `#webcam` body.
    WebcamCmd,
    /// `#simulation` body.
    SimulationCmd,
    /// `#navigation` body.
    NavigationCmd,
    /// `#seabed` body.
    SeabedCmd,
    /// `#quiz` body.
    QuizCmd,
    /// `#clear` body.
    ClearCmd,
    /// `#clearAll` body.
    ClearAllCmd,
    /// `bathymetry,source[,sonar]` layer subtype.
    BathymetryLayer,
    /// `altimetry,litto3d,region` layer subtype.
    AltimetryLayer,
    /// `oceanography,<oceanType>` layer subtype.
    OceanographyLayer,
    /// `tides,tideType` oceanography variant.
    TidesOcean,
    /// `currents,<currentsDetail>` oceanography variant.
    CurrentsOcean,
    /// `tidalAtlas,dim,region,depth` currents detail.
    TidalAtlasDetail,
    /// `forecast,mode` currents detail.
    ForecastDetail,
    /// `pilotchart,month` navigation variant.
    PilotchartNav,
    /// `avurnav,region` navigation variant.
    AvurnavNav,
    /// `gpx,filename` navigation variant.
    GpxNav,
}

/// A node in the parse tree: either an internal rule node with ordered
/// children, or a leaf holding one token. The tree borrows token text from
/// the source input and is discarded after extraction.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ParseNode<'a> {
    /// Internal node produced by a grammar rule.
    Rule {
        /// The rule that produced this node.
        rule: Rule,
        /// Ordered children (structural commas included).
        children: Vec<ParseNode<'a>>,
    },
    /// Leaf node wrapping a single token.
    Leaf {
        /// The wrapped token.
        token: Token<'a>,
    },
}

impl<'a> ParseNode<'a> {
    /// Build an internal node.
    pub fn rule(rule: Rule, children: Vec<ParseNode<'a>>) -> Self {
        ParseNode::Rule { rule, children }
    }

    /// Build a leaf node.
    pub fn leaf(token: Token<'a>) -> Self {
        ParseNode::Leaf { token }
    }

    /// The rule tag of an internal node, `None` for leaves.
    pub fn rule_name(&self) -> Option<Rule> {
        match self {
            ParseNode::Rule { rule, .. } => Some(*rule),
            ParseNode::Leaf { .. } => None,
        }
    }

    /// The children of an internal node, empty for leaves.
    pub fn children(&self) -> &[ParseNode<'a>] {
        match self {
            ParseNode::Rule { children, .. } => children,
            ParseNode::Leaf { .. } => &[],
        }
    }

    /// The token of a leaf node, `None` for internal nodes.
    pub fn token(&self) -> Option<&Token<'a>> {
        match self {
            ParseNode::Rule { .. } => None,
            ParseNode::Leaf { token } => Some(token),
        }
    }
}
