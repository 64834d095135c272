use super::keyword::Keyword;
use super::lexer::{TokKind, Token, tokenize};
use super::tree::{ParseNode, Rule};
use scenario4d_diagnostics::{Diagnostic, Span, codes};

/// Result of parsing one scenario input string.
///
/// The tree is always present; when `diagnostics` is non-empty the tree is
/// partial (commands that failed mid-parse contribute no node) and must not
/// be handed to extraction.
pub struct ParseOutcome<'a> {
    /// The parse tree, rooted at a `commandLine` node.
    pub tree: ParseNode<'a>,
    /// Lexical and syntax errors collected during the parse.
    pub diagnostics: Vec<Diagnostic>,
}

/// Parse a scenario input string into a `commandLine` parse tree.
///
/// Error-tolerant: after a syntax error the parser resynchronizes at the next
/// `#` and keeps going, so all errors in one input are reported together. A
/// lexical error is fatal and yields an empty tree with a single diagnostic.
pub fn parse_command_line(input: &str) -> ParseOutcome<'_> {
    match tokenize(input) {
        Ok(toks) => Parser::new(input, toks).parse(),
        Err(diag) => ParseOutcome {
            tree: ParseNode::rule(Rule::CommandLine, Vec::new()),
            diagnostics: vec![diag],
        },
    }
}

struct Parser<'a> {
    input: &'a str,
    toks: Vec<Token<'a>>,
    pos: usize,
    diags: Vec<Diagnostic>,
}

impl<'a> Parser<'a> {
    fn new(input: &'a str, toks: Vec<Token<'a>>) -> Self {
        Self {
            input,
            toks,
            pos: 0,
            diags: Vec::new(),
        }
    }

    // ── Token navigation ────────────────────────────────────────────────

    fn at_end(&self) -> bool {
        self.pos >= self.toks.len()
    }

    fn peek_kind(&self) -> Option<TokKind> {
        self.toks.get(self.pos).map(|t| t.kind)
    }

    /// Kind of the token after the next one, for comma lookahead.
    fn peek2_kind(&self) -> Option<TokKind> {
        self.toks.get(self.pos + 1).map(|t| t.kind)
    }

    fn next_is_comma(&self) -> bool {
        self.peek_kind() == Some(TokKind::Comma)
    }

    /// End of the current command: end of input or the next `#`.
    fn at_boundary(&self) -> bool {
        matches!(self.peek_kind(), None | Some(TokKind::Hash))
    }

    fn bump(&mut self) -> Token<'a> {
        let t = self.toks[self.pos].clone();
        self.pos += 1;
        t
    }

    /// Span of the current token, or a zero-width span at end of input.
    fn cur_span(&self) -> Span {
        match self.toks.get(self.pos) {
            Some(t) => t.span(),
            None => Span::empty(self.input.len()),
        }
    }

    fn cur_text(&self) -> &'a str {
        self.toks.get(self.pos).map(|t| t.text).unwrap_or("")
    }

    /// Record a syntax error at the current position and resynchronize at the
    /// next `#` so the rest of the input still gets parsed.
    fn fail(&mut self, code: &'static str, message: String) {
        let span = self.cur_span();
        self.diags.push(Diagnostic::error(code, message, span));
        self.skip_to_next_hash();
    }

    fn skip_to_next_hash(&mut self) {
        while !self.at_end() && !matches!(self.toks[self.pos].kind, TokKind::Hash) {
            self.pos += 1;
        }
    }

    // ── Main parse loop ─────────────────────────────────────────────────

    fn parse(mut self) -> ParseOutcome<'a> {
        let mut commands = Vec::new();
        if self.toks.is_empty() {
            self.diags.push(Diagnostic::error(
                codes::PARSER_EMPTY_INPUT,
                "empty scenario: expected at least one command",
                Span::empty(0),
            ));
        }
        while !self.at_end() {
            if self.peek_kind() == Some(TokKind::Hash) {
                if let Some(cmd) = self.parse_command() {
                    commands.push(cmd);
                }
            } else {
                self.fail(
                    codes::PARSER_EXPECTED_COMMAND,
                    format!("expected '#' to start a command, found '{}'", self.cur_text()),
                );
            }
        }
        ParseOutcome {
            tree: ParseNode::rule(Rule::CommandLine, commands),
            diagnostics: self.diags,
        }
    }

    // ── Command parsing ─────────────────────────────────────────────────

    fn parse_command(&mut self) -> Option<ParseNode<'a>> {
        let hash = ParseNode::leaf(self.bump());

        let kw = match self.peek_kind() {
            Some(TokKind::Keyword(kw)) if kw.is_command() => kw,
            Some(_) => {
                self.fail(
                    codes::PARSER_UNKNOWN_COMMAND,
                    format!("unknown command '{}'", self.cur_text()),
                );
                return None;
            }
            None => {
                self.fail(
                    codes::PARSER_UNKNOWN_COMMAND,
                    "missing command name after '#'".to_string(),
                );
                return None;
            }
        };
        let name = self.cur_text();
        let kw_leaf = ParseNode::leaf(self.bump());

        let body = self.parse_body(kw, name, kw_leaf).ok()?;

        // Anything left before the next '#' means too many arguments.
        if !self.at_boundary() {
            self.fail(
                codes::PARSER_BAD_ARITY,
                format!("too many arguments for '#{name}'"),
            );
            return None;
        }

        Some(ParseNode::rule(Rule::Command, vec![hash, body]))
    }

    /// Parse the body of one command, dispatching on its keyword. The
    /// returned node carries the command's rule tag and owns the keyword
    /// leaf plus all argument leaves (commas included).
    fn parse_body(
        &mut self,
        kw: Keyword,
        name: &'a str,
        kw_leaf: ParseNode<'a>,
    ) -> Result<ParseNode<'a>, ()> {
        let mut ch = vec![kw_leaf];
        let rule = match kw {
            Keyword::Comment => {
                self.opt_free_text(name, &mut ch)?;
                Rule::CommentCmd
            }
            Keyword::Bbox => {
                for _ in 0..4 {
                    self.expect_comma(name, &mut ch)?;
                    self.expect_num(name, &mut ch)?;
                }
                Rule::BboxCmd
            }
            Keyword::Move => {
                self.expect_comma(name, &mut ch)?;
                self.expect_keyword(Keyword::FlyTo, "flyTo", name, &mut ch)?;
                self.expect_comma(name, &mut ch)?;
                self.expect_keyword(Keyword::Camera, "camera", name, &mut ch)?;
                for _ in 0..3 {
                    self.expect_comma(name, &mut ch)?;
                    self.expect_num(name, &mut ch)?;
                }
                // heading, pitch, roll are optional trailing numbers
                let mut extra = 0;
                while extra < 3 && self.next_is_comma() {
                    self.expect_comma(name, &mut ch)?;
                    self.expect_num(name, &mut ch)?;
                    extra += 1;
                }
                Rule::MoveCmd
            }
            Keyword::Daynight => {
                self.expect_comma(name, &mut ch)?;
                self.expect_bool(name, &mut ch)?;
                Rule::DaynightCmd
            }
            Keyword::Chart => {
                self.expect_comma(name, &mut ch)?;
                match self.peek_kind() {
                    Some(TokKind::Keyword(
                        Keyword::Vector | Keyword::Raster | Keyword::Mbtiles,
                    )) => ch.push(ParseNode::leaf(self.bump())),
                    _ => {
                        self.fail(
                            codes::PARSER_BAD_VARIANT,
                            format!("expected chart type (vector, raster or mbtiles) in '#{name}'"),
                        );
                        return Err(());
                    }
                }
                self.expect_comma(name, &mut ch)?;
                match self.peek_kind() {
                    Some(TokKind::Int | TokKind::Word | TokKind::Keyword(_)) => {
                        ch.push(ParseNode::leaf(self.bump()));
                    }
                    _ => {
                        self.fail(
                            codes::PARSER_BAD_ARGUMENT,
                            format!("expected chart layer (number or name) in '#{name}'"),
                        );
                        return Err(());
                    }
                }
                Rule::ChartCmd
            }
            Keyword::Terrain => {
                self.expect_comma(name, &mut ch)?;
                self.expect_word(name, &mut ch)?;
                Rule::TerrainCmd
            }
            Keyword::Layer => {
                self.expect_comma(name, &mut ch)?;
                let sub = self.parse_layer_type(name)?;
                ch.push(sub);
                Rule::LayerCmd
            }
            Keyword::Image => {
                self.expect_comma(name, &mut ch)?;
                self.expect_word(name, &mut ch)?;
                if self.next_is_comma() && self.peek2_kind() == Some(TokKind::Quoted) {
                    self.expect_comma(name, &mut ch)?;
                    self.expect_quoted(name, &mut ch)?;
                }
                if self.next_is_comma() {
                    self.expect_comma(name, &mut ch)?;
                    self.expect_num(name, &mut ch)?;
                    self.expect_comma(name, &mut ch)?;
                    self.expect_num(name, &mut ch)?;
                }
                Rule::ImageCmd
            }
            Keyword::Image3D => {
                self.expect_comma(name, &mut ch)?;
                self.expect_word(name, &mut ch)?;
                Rule::Image3DCmd
            }
            Keyword::Video => {
                self.expect_comma(name, &mut ch)?;
                self.expect_url(name, &mut ch)?;
                if self.next_is_comma() && self.peek2_kind() == Some(TokKind::Quoted) {
                    self.expect_comma(name, &mut ch)?;
                    self.expect_quoted(name, &mut ch)?;
                }
                self.expect_comma(name, &mut ch)?;
                self.expect_num(name, &mut ch)?;
                self.expect_comma(name, &mut ch)?;
                self.expect_num(name, &mut ch)?;
                Rule::VideoCmd
            }
            Keyword::Video3D => {
                self.expect_comma(name, &mut ch)?;
                self.expect_url(name, &mut ch)?;
                if self.next_is_comma() {
                    self.expect_comma(name, &mut ch)?;
                    self.expect_bool(name, &mut ch)?;
                }
                Rule::Video3DCmd
            }
            Keyword::Billboard => {
                self.expect_comma(name, &mut ch)?;
                self.expect_word(name, &mut ch)?;
                if self.next_is_comma() && self.peek2_kind() == Some(TokKind::Quoted) {
                    self.expect_comma(name, &mut ch)?;
                    self.expect_quoted(name, &mut ch)?;
                }
                self.expect_comma(name, &mut ch)?;
                self.expect_num(name, &mut ch)?;
                self.expect_comma(name, &mut ch)?;
                self.expect_num(name, &mut ch)?;
                Rule::BillboardCmd
            }
            Keyword::BillboardCB => {
                self.expect_comma(name, &mut ch)?;
                self.expect_word(name, &mut ch)?;
                Rule::BillboardCBCmd
            }
            Keyword::Fireworks => {
                for _ in 0..3 {
                    self.expect_comma(name, &mut ch)?;
                    self.expect_num(name, &mut ch)?;
                }
                Rule::FireworksCmd
            }
            Keyword::Text => {
                if self.next_is_comma() {
                    self.expect_comma(name, &mut ch)?;
                    self.expect_quoted(name, &mut ch)?;
                    if self.next_is_comma() {
                        self.expect_comma(name, &mut ch)?;
                        self.expect_quoted(name, &mut ch)?;
                    }
                }
                Rule::TextCmd
            }
            Keyword::Audio => {
                self.expect_comma(name, &mut ch)?;
                self.expect_word(name, &mut ch)?;
                Rule::AudioCmd
            }
            Keyword::Speech => {
                self.opt_free_text(name, &mut ch)?;
                Rule::SpeechCmd
            }
            Keyword::Webcam => Rule::WebcamCmd,
            Keyword::Simulation => {
                self.expect_comma(name, &mut ch)?;
                match self.peek_kind() {
                    Some(TokKind::Keyword(Keyword::Json | Keyword::Nmea)) => {
                        ch.push(ParseNode::leaf(self.bump()));
                    }
                    _ => {
                        self.fail(
                            codes::PARSER_BAD_VARIANT,
                            format!("expected simulation format (json or nmea) in '#{name}'"),
                        );
                        return Err(());
                    }
                }
                self.expect_comma(name, &mut ch)?;
                self.expect_word(name, &mut ch)?;
                while self.next_is_comma() {
                    self.expect_comma(name, &mut ch)?;
                    self.expect_sim_param(name, &mut ch)?;
                }
                Rule::SimulationCmd
            }
            Keyword::Navigation => {
                self.expect_comma(name, &mut ch)?;
                let sub = self.parse_nav_type(name)?;
                ch.push(sub);
                Rule::NavigationCmd
            }
            Keyword::Seabed => Rule::SeabedCmd,
            Keyword::Quiz => {
                self.expect_comma(name, &mut ch)?;
                self.expect_word(name, &mut ch)?;
                Rule::QuizCmd
            }
            Keyword::Clear => {
                self.expect_comma(name, &mut ch)?;
                self.expect_word(name, &mut ch)?;
                Rule::ClearCmd
            }
            Keyword::ClearAll => Rule::ClearAllCmd,
            // Non-command keywords never reach parse_body (is_command gate).
            _ => {
                self.fail(
                    codes::PARSER_UNKNOWN_COMMAND,
                    format!("unknown command '{name}'"),
                );
                return Err(());
            }
        };
        Ok(ParseNode::rule(rule, ch))
    }

    // ── Variant sub-grammars ────────────────────────────────────────────

    /// `layerType := bathymetry ... | altimetry ... | oceanography ...`,
    /// disambiguated purely by keyword lookahead.
    fn parse_layer_type(&mut self, name: &'a str) -> Result<ParseNode<'a>, ()> {
        match self.peek_kind() {
            Some(TokKind::Keyword(Keyword::Bathymetry)) => {
                let mut ch = vec![ParseNode::leaf(self.bump())];
                self.expect_comma(name, &mut ch)?;
                self.expect_word(name, &mut ch)?;
                if self.next_is_comma() {
                    self.expect_comma(name, &mut ch)?;
                    self.expect_keyword(Keyword::Sonar, "sonar", name, &mut ch)?;
                }
                Ok(ParseNode::rule(Rule::BathymetryLayer, ch))
            }
            Some(TokKind::Keyword(Keyword::Altimetry)) => {
                let mut ch = vec![ParseNode::leaf(self.bump())];
                self.expect_comma(name, &mut ch)?;
                self.expect_keyword(Keyword::Litto3D, "litto3d", name, &mut ch)?;
                self.expect_comma(name, &mut ch)?;
                self.expect_word(name, &mut ch)?;
                Ok(ParseNode::rule(Rule::AltimetryLayer, ch))
            }
            Some(TokKind::Keyword(Keyword::Oceanography)) => {
                let mut ch = vec![ParseNode::leaf(self.bump())];
                self.expect_comma(name, &mut ch)?;
                let ocean = self.parse_ocean_type(name)?;
                ch.push(ocean);
                Ok(ParseNode::rule(Rule::OceanographyLayer, ch))
            }
            _ => {
                self.fail(
                    codes::PARSER_BAD_VARIANT,
                    format!(
                        "expected layer subtype (bathymetry, altimetry or oceanography) in '#{name}'"
                    ),
                );
                Err(())
            }
        }
    }

    fn parse_ocean_type(&mut self, name: &'a str) -> Result<ParseNode<'a>, ()> {
        match self.peek_kind() {
            Some(TokKind::Keyword(Keyword::Tides)) => {
                let mut ch = vec![ParseNode::leaf(self.bump())];
                self.expect_comma(name, &mut ch)?;
                self.expect_word(name, &mut ch)?;
                Ok(ParseNode::rule(Rule::TidesOcean, ch))
            }
            Some(TokKind::Keyword(Keyword::Currents)) => {
                let mut ch = vec![ParseNode::leaf(self.bump())];
                self.expect_comma(name, &mut ch)?;
                let detail = self.parse_currents_detail(name)?;
                ch.push(detail);
                Ok(ParseNode::rule(Rule::CurrentsOcean, ch))
            }
            _ => {
                self.fail(
                    codes::PARSER_BAD_VARIANT,
                    format!("expected oceanography variant (tides or currents) in '#{name}'"),
                );
                Err(())
            }
        }
    }

    fn parse_currents_detail(&mut self, name: &'a str) -> Result<ParseNode<'a>, ()> {
        match self.peek_kind() {
            Some(TokKind::Keyword(Keyword::TidalAtlas)) => {
                let mut ch = vec![ParseNode::leaf(self.bump())];
                for _ in 0..3 {
                    self.expect_comma(name, &mut ch)?;
                    self.expect_word(name, &mut ch)?;
                }
                Ok(ParseNode::rule(Rule::TidalAtlasDetail, ch))
            }
            Some(TokKind::Keyword(Keyword::Forecast)) => {
                let mut ch = vec![ParseNode::leaf(self.bump())];
                self.expect_comma(name, &mut ch)?;
                self.expect_word(name, &mut ch)?;
                Ok(ParseNode::rule(Rule::ForecastDetail, ch))
            }
            _ => {
                self.fail(
                    codes::PARSER_BAD_VARIANT,
                    format!("expected currents detail (tidalAtlas or forecast) in '#{name}'"),
                );
                Err(())
            }
        }
    }

    fn parse_nav_type(&mut self, name: &'a str) -> Result<ParseNode<'a>, ()> {
        match self.peek_kind() {
            Some(TokKind::Keyword(Keyword::Pilotchart)) => {
                let mut ch = vec![ParseNode::leaf(self.bump())];
                self.expect_comma(name, &mut ch)?;
                self.expect_num(name, &mut ch)?;
                Ok(ParseNode::rule(Rule::PilotchartNav, ch))
            }
            Some(TokKind::Keyword(Keyword::Avurnav)) => {
                let mut ch = vec![ParseNode::leaf(self.bump())];
                self.expect_comma(name, &mut ch)?;
                self.expect_word(name, &mut ch)?;
                Ok(ParseNode::rule(Rule::AvurnavNav, ch))
            }
            Some(TokKind::Keyword(Keyword::Gpx)) => {
                let mut ch = vec![ParseNode::leaf(self.bump())];
                self.expect_comma(name, &mut ch)?;
                self.expect_word(name, &mut ch)?;
                Ok(ParseNode::rule(Rule::GpxNav, ch))
            }
            _ => {
                self.fail(
                    codes::PARSER_BAD_VARIANT,
                    format!("expected navigation mode (pilotchart, avurnav or gpx) in '#{name}'"),
                );
                Err(())
            }
        }
    }

    // ── Argument expectation helpers ────────────────────────────────────

    fn expect_comma(&mut self, name: &'a str, out: &mut Vec<ParseNode<'a>>) -> Result<(), ()> {
        if self.next_is_comma() {
            out.push(ParseNode::leaf(self.bump()));
            Ok(())
        } else if self.at_boundary() {
            self.fail(
                codes::PARSER_BAD_ARITY,
                format!("missing argument(s) for '#{name}'"),
            );
            Err(())
        } else {
            self.fail(
                codes::PARSER_BAD_ARITY,
                format!("expected ',' before next argument of '#{name}'"),
            );
            Err(())
        }
    }

    fn expect_num(&mut self, name: &'a str, out: &mut Vec<ParseNode<'a>>) -> Result<(), ()> {
        match self.peek_kind() {
            Some(TokKind::Int | TokKind::Float) => {
                out.push(ParseNode::leaf(self.bump()));
                Ok(())
            }
            _ => {
                self.fail(
                    codes::PARSER_BAD_ARGUMENT,
                    format!("expected a number in '#{name}'"),
                );
                Err(())
            }
        }
    }

    /// A bare word; reserved keywords are accepted too, so a region or source
    /// name that collides with the vocabulary (e.g. `nac`) stays usable.
    fn expect_word(&mut self, name: &'a str, out: &mut Vec<ParseNode<'a>>) -> Result<(), ()> {
        match self.peek_kind() {
            Some(TokKind::Word | TokKind::Keyword(_)) => {
                out.push(ParseNode::leaf(self.bump()));
                Ok(())
            }
            _ => {
                self.fail(
                    codes::PARSER_BAD_ARGUMENT,
                    format!("expected a word in '#{name}'"),
                );
                Err(())
            }
        }
    }

    fn expect_quoted(&mut self, name: &'a str, out: &mut Vec<ParseNode<'a>>) -> Result<(), ()> {
        match self.peek_kind() {
            Some(TokKind::Quoted) => {
                out.push(ParseNode::leaf(self.bump()));
                Ok(())
            }
            _ => {
                self.fail(
                    codes::PARSER_BAD_ARGUMENT,
                    format!("expected quoted text in '#{name}'"),
                );
                Err(())
            }
        }
    }

    /// A boolean position accepts any word-like token; the extractor maps
    /// everything but `true` (case-insensitive) to `false`.
    fn expect_bool(&mut self, name: &'a str, out: &mut Vec<ParseNode<'a>>) -> Result<(), ()> {
        match self.peek_kind() {
            Some(TokKind::Word | TokKind::Keyword(_)) => {
                out.push(ParseNode::leaf(self.bump()));
                Ok(())
            }
            _ => {
                self.fail(
                    codes::PARSER_BAD_ARGUMENT,
                    format!("expected a boolean in '#{name}'"),
                );
                Err(())
            }
        }
    }

    /// URLs carry characters outside the bareword alphabet, so the quoted
    /// form is accepted alongside plain words.
    fn expect_url(&mut self, name: &'a str, out: &mut Vec<ParseNode<'a>>) -> Result<(), ()> {
        match self.peek_kind() {
            Some(TokKind::Quoted | TokKind::Word | TokKind::Keyword(_)) => {
                out.push(ParseNode::leaf(self.bump()));
                Ok(())
            }
            _ => {
                self.fail(
                    codes::PARSER_BAD_ARGUMENT,
                    format!("expected a URL in '#{name}'"),
                );
                Err(())
            }
        }
    }

    fn expect_sim_param(&mut self, name: &'a str, out: &mut Vec<ParseNode<'a>>) -> Result<(), ()> {
        match self.peek_kind() {
            Some(TokKind::Word | TokKind::Keyword(_) | TokKind::Int | TokKind::Float) => {
                out.push(ParseNode::leaf(self.bump()));
                Ok(())
            }
            _ => {
                self.fail(
                    codes::PARSER_BAD_ARGUMENT,
                    format!("expected a simulation parameter in '#{name}'"),
                );
                Err(())
            }
        }
    }

    fn expect_keyword(
        &mut self,
        kw: Keyword,
        literal: &str,
        name: &'a str,
        out: &mut Vec<ParseNode<'a>>,
    ) -> Result<(), ()> {
        if self.peek_kind() == Some(TokKind::Keyword(kw)) {
            out.push(ParseNode::leaf(self.bump()));
            Ok(())
        } else {
            self.fail(
                codes::PARSER_BAD_ARGUMENT,
                format!("expected '{literal}' in '#{name}'"),
            );
            Err(())
        }
    }

    /// Optional trailing free text: `(',' quoted)?`, used by comment/speech.
    fn opt_free_text(&mut self, name: &'a str, out: &mut Vec<ParseNode<'a>>) -> Result<(), ()> {
        if self.next_is_comma() {
            self.expect_comma(name, out)?;
            self.expect_quoted(name, out)?;
        }
        Ok(())
    }
}
