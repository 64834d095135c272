//! Comprehensive tests for the scenario parser.
//!
//! Covers: tokenization, command recognition, chaining, optional arguments
//! and defaults, nested layer/navigation variants, diagnostics, and the raw
//! parse tree. Validator-specific tests live in `validator.rs`, external
//! schema tests in `normalizer.rs`.

mod common;

use common::{json, parse_err, parse_ok, tags};
use scenario4d_core::{
    ChartLayer, ChartType, Command, CurrentsDetail, LayerKind, NavKind, OceanLayer, Scalar,
    SimFormat,
};
use scenario4d_diagnostics::codes;

// ─── 1. Basic parsing and chaining ──────────────────────────────────────────

#[test]
fn single_bbox_command() {
    let cmds = parse_ok("#bbox,48,-5,49,2");
    assert_eq!(
        cmds,
        vec![Command::Bbox {
            south: Scalar(48.0),
            west: Scalar(-5.0),
            north: Scalar(49.0),
            east: Scalar(2.0),
        }]
    );
}

#[test]
fn clear_all_single_record() {
    let cmds = parse_ok("#clearAll");
    assert_eq!(cmds, vec![Command::ClearAll]);
}

#[test]
fn chained_commands_keep_source_order() {
    let cmds = parse_ok("#clearAll#bbox,48,-5,49,2");
    assert_eq!(tags(&cmds), vec!["clearAll", "bbox"]);
}

#[test]
fn commands_span_multiple_lines() {
    let cmds = parse_ok("#clearAll\n#bbox,48,-5,49,2\n#webcam\n");
    assert_eq!(tags(&cmds), vec!["clearAll", "bbox", "webcam"]);
}

#[test]
fn whitespace_around_arguments_is_ignored() {
    let cmds = parse_ok("#bbox , 48 , -5 ,\n49 , 2");
    assert_eq!(cmds.len(), 1, "whitespace must not split the command");
}

#[test]
fn keywords_are_case_insensitive() {
    let cmds = parse_ok("#BBOX,48,-5,49,2#ClearALL");
    assert_eq!(tags(&cmds), vec!["bbox", "clearAll"]);
}

// ─── 2. Quoted text ─────────────────────────────────────────────────────────

#[test]
fn comment_preserves_apostrophe_in_double_quotes() {
    let cmds = parse_ok("#comment,\"Test d'apostrophe\"");
    assert_eq!(
        cmds,
        vec![Command::Comment {
            text: "Test d'apostrophe".to_string(),
        }]
    );
}

#[test]
fn single_quoted_text_is_accepted() {
    let cmds = parse_ok("#comment,'hello world'");
    assert_eq!(
        cmds,
        vec![Command::Comment {
            text: "hello world".to_string(),
        }]
    );
}

#[test]
fn comment_without_text_is_empty() {
    let cmds = parse_ok("#comment");
    assert_eq!(cmds, vec![Command::Comment { text: String::new() }]);
}

#[test]
fn quoted_text_may_contain_structural_characters() {
    let cmds = parse_ok("#comment,\"a, b #and c\"");
    assert_eq!(
        cmds,
        vec![Command::Comment {
            text: "a, b #and c".to_string(),
        }]
    );
}

// ─── 3. Move defaults ───────────────────────────────────────────────────────

#[test]
fn move_applies_orientation_defaults() {
    let cmds = parse_ok("#move,flyTo,camera,-4.46,48.38,5000");
    assert_eq!(
        cmds,
        vec![Command::Move {
            longitude: Scalar(-4.46),
            latitude: Scalar(48.38),
            height: Scalar(5000.0),
            heading: Scalar(0.0),
            pitch: Scalar(-45.0),
            roll: Scalar(0.0),
        }]
    );
}

#[test]
fn move_with_full_orientation() {
    let cmds = parse_ok("#move,flyTo,camera,-4.46,48.38,5000,90,-30,10");
    let Command::Move {
        heading,
        pitch,
        roll,
        ..
    } = &cmds[0]
    else {
        panic!("expected a move record, got {:?}", cmds[0]);
    };
    assert_eq!(*heading, Scalar(90.0));
    assert_eq!(*pitch, Scalar(-30.0));
    assert_eq!(*roll, Scalar(10.0));
}

#[test]
fn move_selectors_are_case_insensitive() {
    let cmds = parse_ok("#MOVE,FLYTO,Camera,-4.46,48.38,5000");
    assert_eq!(tags(&cmds), vec!["move"]);
}

// ─── 4. Booleans ────────────────────────────────────────────────────────────

#[test]
fn daynight_true_any_case() {
    for input in ["#daynight,true", "#daynight,TRUE", "#daynight,True"] {
        let cmds = parse_ok(input);
        assert_eq!(cmds, vec![Command::Daynight { enabled: true }], "{input}");
    }
}

#[test]
fn daynight_non_true_word_is_false() {
    for input in ["#daynight,false", "#daynight,yes", "#daynight,on"] {
        let cmds = parse_ok(input);
        assert_eq!(cmds, vec![Command::Daynight { enabled: false }], "{input}");
    }
}

// ─── 5. Chart, terrain, clear ───────────────────────────────────────────────

#[test]
fn chart_with_numeric_layer() {
    let cmds = parse_ok("#chart,vector,3");
    assert_eq!(
        cmds,
        vec![Command::Chart {
            chart_type: ChartType::Vector,
            layer: ChartLayer::Index(3),
        }]
    );
}

#[test]
fn chart_with_named_layer_lowercased() {
    let cmds = parse_ok("#chart,raster,Harbour");
    assert_eq!(
        cmds,
        vec![Command::Chart {
            chart_type: ChartType::Raster,
            layer: ChartLayer::Name("harbour".to_string()),
        }]
    );
}

#[test]
fn chart_layer_name_may_collide_with_chart_types() {
    // The layer position is selected by position, so a name that happens to
    // be a chart-type keyword is not swallowed.
    let cmds = parse_ok("#chart,raster,vector");
    assert_eq!(
        cmds,
        vec![Command::Chart {
            chart_type: ChartType::Raster,
            layer: ChartLayer::Name("vector".to_string()),
        }]
    );
}

#[test]
fn chart_mbtiles_type() {
    let cmds = parse_ok("#chart,mbtiles,0");
    let Command::Chart { chart_type, .. } = &cmds[0] else {
        panic!("expected a chart record");
    };
    assert_eq!(*chart_type, ChartType::Mbtiles);
}

#[test]
fn terrain_source_lowercased() {
    let cmds = parse_ok("#terrain,Ign");
    assert_eq!(
        cmds,
        vec![Command::Terrain {
            source: "ign".to_string(),
        }]
    );
}

#[test]
fn clear_layer_name_lowercased() {
    let cmds = parse_ok("#clear,Image");
    assert_eq!(
        cmds,
        vec![Command::Clear {
            layer: "image".to_string(),
        }]
    );
}

// ─── 6. Layer variants ──────────────────────────────────────────────────────

#[test]
fn layer_bathymetry_without_sonar() {
    let cmds = parse_ok("#layer,bathymetry,Shom");
    assert_eq!(
        cmds,
        vec![Command::Layer {
            layer: LayerKind::Bathymetry {
                source: "shom".to_string(),
                sonar: None,
            },
        }]
    );
}

#[test]
fn layer_bathymetry_with_sonar() {
    let cmds = parse_ok("#layer,bathymetry,shom,sonar");
    let Command::Layer {
        layer: LayerKind::Bathymetry { sonar, .. },
    } = &cmds[0]
    else {
        panic!("expected a bathymetry layer, got {:?}", cmds[0]);
    };
    assert_eq!(*sonar, Some(true), "trailing sonar selector must set the flag");
}

#[test]
fn layer_altimetry_litto3d() {
    let cmds = parse_ok("#layer,altimetry,litto3d,Finistere");
    assert_eq!(
        cmds,
        vec![Command::Layer {
            layer: LayerKind::Altimetry {
                source: "litto3d".to_string(),
                region: "finistere".to_string(),
            },
        }]
    );
}

#[test]
fn layer_oceanography_tides() {
    let cmds = parse_ok("#layer,oceanography,tides,High");
    assert_eq!(
        cmds,
        vec![Command::Layer {
            layer: LayerKind::Oceanography {
                ocean: OceanLayer::Tides {
                    tide_type: "high".to_string(),
                },
            },
        }]
    );
}

#[test]
fn layer_oceanography_currents_tidal_atlas() {
    let cmds = parse_ok("#layer,oceanography,currents,tidalAtlas,2d,Brest,surface");
    assert_eq!(
        cmds,
        vec![Command::Layer {
            layer: LayerKind::Oceanography {
                ocean: OceanLayer::Currents {
                    detail: CurrentsDetail::TidalAtlas {
                        dim: "2d".to_string(),
                        region: "brest".to_string(),
                        depth: "surface".to_string(),
                    },
                },
            },
        }]
    );
}

#[test]
fn layer_oceanography_currents_forecast() {
    let cmds = parse_ok("#layer,oceanography,currents,forecast,Global");
    assert_eq!(
        cmds,
        vec![Command::Layer {
            layer: LayerKind::Oceanography {
                ocean: OceanLayer::Currents {
                    detail: CurrentsDetail::Forecast {
                        mode: "global".to_string(),
                    },
                },
            },
        }]
    );
}

#[test]
fn layer_rejects_unknown_subtype() {
    let failure = parse_err("#layer,seismology,x");
    assert_eq!(failure.diagnostics[0].code, codes::PARSER_BAD_VARIANT);
}

// ─── 7. Media commands ──────────────────────────────────────────────────────

#[test]
fn image_minimal() {
    let cmds = parse_ok("#image,photo.png");
    assert_eq!(
        cmds,
        vec![Command::Image {
            filename: "photo.png".to_string(),
            title: None,
            x: None,
            y: None,
        }]
    );
}

#[test]
fn image_with_title_and_position() {
    let cmds = parse_ok("#image,photo.png,\"Le port\",10,20");
    assert_eq!(
        cmds,
        vec![Command::Image {
            filename: "photo.png".to_string(),
            title: Some("Le port".to_string()),
            x: Some(Scalar(10.0)),
            y: Some(Scalar(20.0)),
        }]
    );
}

#[test]
fn image_with_title_but_no_position() {
    let cmds = parse_ok("#image,photo.png,\"Le port\"");
    assert_eq!(
        cmds,
        vec![Command::Image {
            filename: "photo.png".to_string(),
            title: Some("Le port".to_string()),
            x: None,
            y: None,
        }]
    );
}

#[test]
fn image_with_position_but_no_title() {
    let cmds = parse_ok("#image,photo.png,10,20");
    let Command::Image { title, x, .. } = &cmds[0] else {
        panic!("expected an image record");
    };
    assert!(title.is_none());
    assert_eq!(*x, Some(Scalar(10.0)));
}

#[test]
fn image3d_filename_verbatim() {
    let cmds = parse_ok("#image3D,Mesh.PNG");
    assert_eq!(
        cmds,
        vec![Command::Image3D {
            filename: "Mesh.PNG".to_string(),
        }]
    );
}

#[test]
fn video_with_quoted_url_and_title() {
    let cmds = parse_ok("#video,\"https://example.org/v.mp4\",\"Accueil\",640,360");
    assert_eq!(
        cmds,
        vec![Command::Video {
            url: "https://example.org/v.mp4".to_string(),
            title: "Accueil".to_string(),
            width: Scalar(640.0),
            height: Scalar(360.0),
        }]
    );
}

#[test]
fn video_title_defaults_to_empty() {
    let cmds = parse_ok("#video,clip.mp4,640,360");
    let Command::Video { title, .. } = &cmds[0] else {
        panic!("expected a video record");
    };
    assert_eq!(title, "");
}

#[test]
fn video3d_autoplay_defaults_to_false() {
    let cmds = parse_ok("#video3D,clip.mp4");
    assert_eq!(
        cmds,
        vec![Command::Video3D {
            url: "clip.mp4".to_string(),
            autoplay: false,
        }]
    );
}

#[test]
fn video3d_explicit_autoplay() {
    let cmds = parse_ok("#video3D,clip.mp4,true");
    let Command::Video3D { autoplay, .. } = &cmds[0] else {
        panic!("expected a video3D record");
    };
    assert!(*autoplay);
}

#[test]
fn billboard_with_title_and_position() {
    let cmds = parse_ok("#billboard,buoy.png,\"Rade de Brest\",-4.5,48.3");
    assert_eq!(
        cmds,
        vec![Command::Billboard {
            filename: "buoy.png".to_string(),
            title: "Rade de Brest".to_string(),
            longitude: Scalar(-4.5),
            latitude: Scalar(48.3),
        }]
    );
}

#[test]
fn billboard_cb_minimal() {
    let cmds = parse_ok("#billboardCB,marker.png");
    assert_eq!(
        cmds,
        vec![Command::BillboardCB {
            filename: "marker.png".to_string(),
        }]
    );
}

#[test]
fn fireworks_position() {
    let cmds = parse_ok("#fireworks,-4.5,48.3,100");
    assert_eq!(
        cmds,
        vec![Command::Fireworks {
            longitude: Scalar(-4.5),
            latitude: Scalar(48.3),
            height: Scalar(100.0),
        }]
    );
}

#[test]
fn text_with_content_and_title() {
    let cmds = parse_ok("#text,\"Bienvenue\",\"Titre\"");
    assert_eq!(
        cmds,
        vec![Command::Text {
            content: "Bienvenue".to_string(),
            title: "Titre".to_string(),
        }]
    );
}

#[test]
fn text_defaults_to_empty_strings() {
    let cmds = parse_ok("#text");
    assert_eq!(
        cmds,
        vec![Command::Text {
            content: String::new(),
            title: String::new(),
        }]
    );
}

#[test]
fn audio_and_speech() {
    let cmds = parse_ok("#audio,ambiance.mp3#speech,\"Bonjour\"");
    assert_eq!(
        cmds,
        vec![
            Command::Audio {
                filename: "ambiance.mp3".to_string(),
            },
            Command::Speech {
                text: "Bonjour".to_string(),
            },
        ]
    );
}

// ─── 8. Simulation and navigation ───────────────────────────────────────────

#[test]
fn simulation_with_trailing_params() {
    let cmds = parse_ok("#simulation,json,track.json,fast,2");
    assert_eq!(
        cmds,
        vec![Command::Simulation {
            format: SimFormat::Json,
            filename: "track.json".to_string(),
            params: vec!["fast".to_string(), "2".to_string()],
        }]
    );
}

#[test]
fn simulation_nmea_without_params() {
    let cmds = parse_ok("#simulation,nmea,log.nmea");
    let Command::Simulation { format, params, .. } = &cmds[0] else {
        panic!("expected a simulation record");
    };
    assert_eq!(*format, SimFormat::Nmea);
    assert!(params.is_empty());
}

#[test]
fn simulation_rejects_unknown_format() {
    let failure = parse_err("#simulation,csv,track.csv");
    assert_eq!(failure.diagnostics[0].code, codes::PARSER_BAD_VARIANT);
}

#[test]
fn navigation_pilotchart_month() {
    let cmds = parse_ok("#navigation,pilotchart,6");
    assert_eq!(
        cmds,
        vec![Command::Navigation {
            nav: NavKind::Pilotchart { month: 6 },
        }]
    );
}

#[test]
fn navigation_avurnav_region_collides_with_vocabulary() {
    // `NAC` is also a reserved word; it must still work as a region name.
    let cmds = parse_ok("#navigation,avurnav,NAC");
    assert_eq!(
        cmds,
        vec![Command::Navigation {
            nav: NavKind::Avurnav {
                region: "nac".to_string(),
            },
        }]
    );
}

#[test]
fn navigation_gpx_filename_verbatim() {
    let cmds = parse_ok("#navigation,gpx,Route-01.gpx");
    assert_eq!(
        cmds,
        vec![Command::Navigation {
            nav: NavKind::Gpx {
                filename: "Route-01.gpx".to_string(),
            },
        }]
    );
}

// ─── 9. Remaining zero-argument commands ────────────────────────────────────

#[test]
fn webcam_seabed_quiz() {
    let cmds = parse_ok("#webcam#seabed#quiz,quiz.json");
    assert_eq!(
        cmds,
        vec![
            Command::Webcam,
            Command::Seabed,
            Command::Quiz {
                filename: "quiz.json".to_string(),
            },
        ]
    );
}

// ─── 10. Diagnostics ────────────────────────────────────────────────────────

#[test]
fn empty_input_is_an_error() {
    let failure = parse_err("");
    assert_eq!(failure.diagnostics[0].code, codes::PARSER_EMPTY_INPUT);
}

#[test]
fn unknown_command_is_rejected() {
    let failure = parse_err("#frobnicate,1");
    assert_eq!(failure.diagnostics.len(), 1);
    assert_eq!(failure.diagnostics[0].code, codes::PARSER_UNKNOWN_COMMAND);
    assert_eq!(
        failure.messages[0],
        "L1:1 (parser) – unknown command 'frobnicate'"
    );
}

#[test]
fn all_syntax_errors_are_collected() {
    let failure = parse_err("#frobnicate#bbox,48#bogus");
    let codes_seen: Vec<&str> = failure
        .diagnostics
        .iter()
        .map(|d| d.code.as_ref())
        .collect();
    assert_eq!(
        codes_seen,
        vec![
            codes::PARSER_UNKNOWN_COMMAND,
            codes::PARSER_BAD_ARITY,
            codes::PARSER_UNKNOWN_COMMAND,
        ]
    );
}

#[test]
fn missing_arguments_reported() {
    let failure = parse_err("#bbox,48,-5");
    assert_eq!(failure.diagnostics[0].code, codes::PARSER_BAD_ARITY);
    assert!(
        failure.messages[0].contains("missing argument"),
        "got {:?}",
        failure.messages[0]
    );
}

#[test]
fn extra_arguments_reported() {
    let failure = parse_err("#seabed,1");
    assert_eq!(failure.diagnostics[0].code, codes::PARSER_BAD_ARITY);
    assert!(failure.messages[0].contains("too many arguments"));
}

#[test]
fn non_numeric_argument_reported() {
    let failure = parse_err("#bbox,48,-5,north,2");
    assert_eq!(failure.diagnostics[0].code, codes::PARSER_BAD_ARGUMENT);
}

#[test]
fn unterminated_string_is_lexical_and_fatal() {
    let failure = parse_err("#comment,\"abc\n#webcam");
    assert_eq!(failure.diagnostics.len(), 1, "lexical errors are fatal");
    assert_eq!(failure.diagnostics[0].code, codes::LEX_UNTERMINATED_STRING);
    assert!(failure.diagnostics[0].is_lexical());
    assert!(
        failure.messages[0].contains("(lexer)"),
        "got {:?}",
        failure.messages[0]
    );
}

#[test]
fn unexpected_character_is_lexical() {
    let failure = parse_err("#comment,héllo");
    assert_eq!(failure.diagnostics[0].code, codes::LEX_UNEXPECTED_CHAR);
}

#[test]
fn error_positions_count_lines() {
    let failure = parse_err("#webcam\n#frobnicate");
    assert!(
        failure.messages[0].starts_with("L2:"),
        "got {:?}",
        failure.messages[0]
    );
}

// ─── 11. Raw parse tree ─────────────────────────────────────────────────────

#[test]
fn raw_tree_root_is_command_line() {
    let tree = scenario4d_core::raw_tree("#webcam#seabed").expect("tree");
    let value = json(&tree);
    assert_eq!(value["rule"], "commandLine");
    assert_eq!(value["children"].as_array().map(Vec::len), Some(2));
}

#[test]
fn raw_tree_keeps_comma_leaves() {
    let tree = scenario4d_core::raw_tree("#bbox,48,-5,49,2").expect("tree");
    let value = json(&tree);
    let body = &value["children"][0]["children"][1];
    assert_eq!(body["rule"], "bboxCmd");
    // keyword + 4 commas + 4 numbers
    assert_eq!(body["children"].as_array().map(Vec::len), Some(9));
}

#[test]
fn raw_tree_is_partial_after_syntax_error() {
    let tree = scenario4d_core::raw_tree("#webcam#frobnicate,1").expect("tree");
    let value = json(&tree);
    assert_eq!(
        value["children"].as_array().map(Vec::len),
        Some(1),
        "the failed command contributes no node"
    );
}

#[test]
fn raw_tree_fails_on_lexical_error() {
    assert!(scenario4d_core::raw_tree("#comment,\"abc").is_err());
}
