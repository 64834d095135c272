//! Tree-walking extraction: one conversion rule per grammar rule, turning a
//! recognized parse subtree into a [`Command`] record with defaults applied.
//!
//! Extraction is total over syntactically valid trees — the grammar already
//! constrained every token kind and arity, so the coercions here cannot fail.

use crate::command::{
    ChartLayer, ChartType, Command, CurrentsDetail, LayerKind, NavKind, OceanLayer, Scalar,
    SimFormat,
};
use crate::grammar::keyword::Keyword;
use crate::grammar::lexer::TokKind;
use crate::grammar::tree::{ParseNode, Rule};

/// Convert a `commandLine` parse tree into its ordered command records.
pub fn extract(tree: &ParseNode<'_>) -> Vec<Command> {
    let mut commands = Vec::new();
    for node in tree.children() {
        if node.rule_name() == Some(Rule::Command)
            && let Some(body) = node.children().iter().find(|c| c.rule_name().is_some())
        {
            commands.push(extract_command(body));
        }
    }
    commands
}

// ── Leaf helpers ────────────────────────────────────────────────────────────
// All helpers skip the leading keyword leaf (`args = &children[1..]`) and the
// structural comma leaves.

/// All numeric leaves of a slice, coerced to one decimal type.
fn nums(args: &[ParseNode<'_>]) -> Vec<f64> {
    args.iter()
        .filter_map(|n| n.token())
        .filter(|t| matches!(t.kind, TokKind::Int | TokKind::Float))
        .map(|t| t.text.parse::<f64>().unwrap_or_default())
        .collect()
}

/// All quoted leaves of a slice, delimiters stripped.
fn quoteds<'a>(args: &[ParseNode<'a>]) -> Vec<&'a str> {
    args.iter()
        .filter_map(|n| n.token())
        .filter(|t| t.kind == TokKind::Quoted)
        .map(|t| {
            // unquoted() borrows the token; reborrow from the input slice to
            // keep the 'a lifetime.
            &t.text[1..t.text.len() - 1]
        })
        .collect()
}

/// The first word-like leaf (bareword or keyword), raw text.
fn first_word<'a>(args: &[ParseNode<'a>]) -> &'a str {
    args.iter()
        .filter_map(|n| n.token())
        .find(|t| matches!(t.kind, TokKind::Word | TokKind::Keyword(_)))
        .map(|t| t.text)
        .unwrap_or("")
}

/// The text of the leaf at a fixed child position (commas count as children).
fn leaf_text<'a>(node: &ParseNode<'a>, idx: usize) -> &'a str {
    node.children()
        .get(idx)
        .and_then(|n| n.token())
        .map(|t| t.text)
        .unwrap_or("")
}

/// Permissive boolean: only a case-insensitive `true` is true.
fn parse_bool(text: &str) -> bool {
    text.eq_ignore_ascii_case("true")
}

fn scalar_at(n: &[f64], idx: usize, default: f64) -> Scalar {
    Scalar(n.get(idx).copied().unwrap_or(default))
}

// ── Per-rule conversion ─────────────────────────────────────────────────────

fn extract_command(body: &ParseNode<'_>) -> Command {
    let args = &body.children()[1..];
    match body.rule_name().unwrap_or(Rule::CommandLine) {
        Rule::CommentCmd => Command::Comment {
            text: quoteds(args).first().copied().unwrap_or("").to_string(),
        },
        Rule::BboxCmd => {
            let n = nums(args);
            Command::Bbox {
                south: scalar_at(&n, 0, 0.0),
                west: scalar_at(&n, 1, 0.0),
                north: scalar_at(&n, 2, 0.0),
                east: scalar_at(&n, 3, 0.0),
            }
        }
        Rule::MoveCmd => {
            let n = nums(args);
            Command::Move {
                longitude: scalar_at(&n, 0, 0.0),
                latitude: scalar_at(&n, 1, 0.0),
                height: scalar_at(&n, 2, 0.0),
                heading: scalar_at(&n, 3, 0.0),
                pitch: scalar_at(&n, 4, -45.0),
                roll: scalar_at(&n, 5, 0.0),
            }
        }
        Rule::DaynightCmd => Command::Daynight {
            enabled: parse_bool(first_word(args)),
        },
        Rule::ChartCmd => {
            // Children: kw, comma, type, comma, layer. Positional access, so
            // a layer name colliding with a chart-type keyword stays usable.
            let chart_type = match body.children().get(2).and_then(|n| n.token()).map(|t| t.kind) {
                Some(TokKind::Keyword(Keyword::Raster)) => ChartType::Raster,
                Some(TokKind::Keyword(Keyword::Mbtiles)) => ChartType::Mbtiles,
                _ => ChartType::Vector,
            };
            let layer = match body.children().get(4).and_then(|n| n.token()) {
                Some(t) if t.kind == TokKind::Int => t
                    .text
                    .parse::<i64>()
                    .map(ChartLayer::Index)
                    .unwrap_or_else(|_| ChartLayer::Name(t.text.to_lowercase())),
                Some(t) => ChartLayer::Name(t.text.to_lowercase()),
                None => ChartLayer::Name(String::new()),
            };
            Command::Chart { chart_type, layer }
        }
        Rule::TerrainCmd => Command::Terrain {
            source: first_word(args).to_lowercase(),
        },
        Rule::LayerCmd => Command::Layer {
            layer: extract_layer(args),
        },
        Rule::ImageCmd => {
            let n = nums(args);
            let (x, y) = if n.len() >= 2 {
                (Some(Scalar(n[0])), Some(Scalar(n[1])))
            } else {
                (None, None)
            };
            Command::Image {
                filename: first_word(args).to_string(),
                title: quoteds(args).first().map(|s| s.to_string()),
                x,
                y,
            }
        }
        Rule::Image3DCmd => Command::Image3D {
            filename: first_word(args).to_string(),
        },
        Rule::VideoCmd => {
            let n = nums(args);
            Command::Video {
                url: url_text(args),
                title: trailing_title(args),
                width: scalar_at(&n, 0, 0.0),
                height: scalar_at(&n, 1, 0.0),
            }
        }
        Rule::Video3DCmd => {
            // Children: kw, comma, url, (comma, bool)?
            let autoplay = body
                .children()
                .get(4)
                .and_then(|node| node.token())
                .map(|t| parse_bool(t.text))
                .unwrap_or(false);
            Command::Video3D {
                url: url_text(args),
                autoplay,
            }
        }
        Rule::BillboardCmd => {
            let n = nums(args);
            Command::Billboard {
                filename: first_word(args).to_string(),
                title: trailing_title(args),
                longitude: scalar_at(&n, 0, 0.0),
                latitude: scalar_at(&n, 1, 0.0),
            }
        }
        Rule::BillboardCBCmd => Command::BillboardCB {
            filename: first_word(args).to_string(),
        },
        Rule::FireworksCmd => {
            let n = nums(args);
            Command::Fireworks {
                longitude: scalar_at(&n, 0, 0.0),
                latitude: scalar_at(&n, 1, 0.0),
                height: scalar_at(&n, 2, 0.0),
            }
        }
        Rule::TextCmd => {
            let q = quoteds(args);
            Command::Text {
                content: q.first().copied().unwrap_or("").to_string(),
                title: q.get(1).copied().unwrap_or("").to_string(),
            }
        }
        Rule::AudioCmd => Command::Audio {
            filename: first_word(args).to_string(),
        },
        Rule::SpeechCmd => Command::Speech {
            text: quoteds(args).first().copied().unwrap_or("").to_string(),
        },
        Rule::WebcamCmd => Command::Webcam,
        Rule::SimulationCmd => {
            let format = args
                .iter()
                .filter_map(|n| n.token())
                .find_map(|t| match t.kind {
                    TokKind::Keyword(Keyword::Json) => Some(SimFormat::Json),
                    TokKind::Keyword(Keyword::Nmea) => Some(SimFormat::Nmea),
                    _ => None,
                })
                .unwrap_or(SimFormat::Json);
            // Children: kw, comma, format, comma, filename, (comma, param)*
            let filename = leaf_text(body, 4).to_string();
            let params = body.children()[5..]
                .iter()
                .filter_map(|n| n.token())
                .filter(|t| t.kind != TokKind::Comma)
                .map(|t| t.text.to_string())
                .collect();
            Command::Simulation {
                format,
                filename,
                params,
            }
        }
        Rule::NavigationCmd => Command::Navigation {
            nav: extract_nav(args),
        },
        Rule::SeabedCmd => Command::Seabed,
        Rule::QuizCmd => Command::Quiz {
            filename: first_word(args).to_string(),
        },
        Rule::ClearCmd => Command::Clear {
            layer: first_word(args).to_lowercase(),
        },
        Rule::ClearAllCmd => Command::ClearAll,
        rule => unreachable!(
            "rule {rule:?} is not a command body — the parser only nests it inside one"
        ),
    }
}

/// URL argument: first quoted (stripped) or word-like leaf.
fn url_text(args: &[ParseNode<'_>]) -> String {
    args.iter()
        .filter_map(|n| n.token())
        .find(|t| matches!(t.kind, TokKind::Quoted | TokKind::Word | TokKind::Keyword(_)))
        .map(|t| t.unquoted().to_string())
        .unwrap_or_default()
}

/// Optional quoted title appearing after the first positional argument;
/// empty string when absent.
fn trailing_title(args: &[ParseNode<'_>]) -> String {
    // Skip the first non-comma leaf (filename or URL, possibly quoted), then
    // take the first quoted leaf that remains.
    let mut seen_first = false;
    for node in args {
        let Some(t) = node.token() else { continue };
        if t.kind == TokKind::Comma {
            continue;
        }
        if !seen_first {
            seen_first = true;
            continue;
        }
        if t.kind == TokKind::Quoted {
            return t.unquoted().to_string();
        }
    }
    String::new()
}

fn extract_layer(args: &[ParseNode<'_>]) -> LayerKind {
    let sub = args.iter().find(|n| n.rule_name().is_some());
    let Some(sub) = sub else {
        return LayerKind::Bathymetry {
            source: String::new(),
            sonar: None,
        };
    };
    match sub.rule_name() {
        Some(Rule::BathymetryLayer) => {
            // Children: bathymetry, comma, source, (comma, sonar)?
            let sonar = sub
                .children()
                .iter()
                .filter_map(|n| n.token())
                .any(|t| t.kind == TokKind::Keyword(Keyword::Sonar));
            LayerKind::Bathymetry {
                source: leaf_text(sub, 2).to_lowercase(),
                // The flag is a presence marker: absent means absent, not false.
                sonar: sonar.then_some(true),
            }
        }
        Some(Rule::AltimetryLayer) => LayerKind::Altimetry {
            // Children: altimetry, comma, litto3d, comma, region
            source: leaf_text(sub, 2).to_lowercase(),
            region: leaf_text(sub, 4).to_lowercase(),
        },
        _ => {
            // OceanographyLayer — children: oceanography, comma, oceanType
            let ocean = sub.children().iter().find(|n| n.rule_name().is_some());
            LayerKind::Oceanography {
                ocean: extract_ocean(ocean),
            }
        }
    }
}

fn extract_ocean(node: Option<&ParseNode<'_>>) -> OceanLayer {
    let Some(node) = node else {
        return OceanLayer::Tides {
            tide_type: String::new(),
        };
    };
    match node.rule_name() {
        Some(Rule::TidesOcean) => OceanLayer::Tides {
            tide_type: leaf_text(node, 2).to_lowercase(),
        },
        _ => {
            // CurrentsOcean — children: currents, comma, currentsDetail
            let detail = node.children().iter().find(|n| n.rule_name().is_some());
            let detail = match detail.and_then(|d| d.rule_name()) {
                Some(Rule::TidalAtlasDetail) => {
                    let d = detail.unwrap_or(node);
                    CurrentsDetail::TidalAtlas {
                        dim: leaf_text(d, 2).to_lowercase(),
                        region: leaf_text(d, 4).to_lowercase(),
                        depth: leaf_text(d, 6).to_lowercase(),
                    }
                }
                _ => CurrentsDetail::Forecast {
                    mode: detail.map(|d| leaf_text(d, 2).to_lowercase()).unwrap_or_default(),
                },
            };
            OceanLayer::Currents { detail }
        }
    }
}

fn extract_nav(args: &[ParseNode<'_>]) -> NavKind {
    let sub = args.iter().find(|n| n.rule_name().is_some());
    let Some(sub) = sub else {
        return NavKind::Gpx {
            filename: String::new(),
        };
    };
    match sub.rule_name() {
        Some(Rule::PilotchartNav) => NavKind::Pilotchart {
            // Truncating parse, as the original did with parseInt.
            month: leaf_text(sub, 2).parse::<f64>().unwrap_or_default() as u32,
        },
        Some(Rule::AvurnavNav) => NavKind::Avurnav {
            region: leaf_text(sub, 2).to_lowercase(),
        },
        _ => NavKind::Gpx {
            filename: leaf_text(sub, 2).to_string(),
        },
    }
}
