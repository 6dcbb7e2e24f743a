use std::collections::BTreeMap;

use tokio::sync::OnceCell;

use crate::render::markup::MAX_NESTING;
use crate::render::typeset::{escape_html, Fragment, RenderTarget};

static ENGINE: OnceCell<MathEngine> = OnceCell::const_new();

/// Returns the shared math engine, building it on first use.
pub async fn load_math_engine() -> &'static MathEngine {
    ENGINE
        .get_or_init(|| async {
            tracing::debug!("initialising math engine");
            MathEngine::new()
        })
        .await
}

/// Typesets math fragments into HTML with Unicode symbols.
#[derive(Debug, Clone)]
pub struct MathEngine {
    symbols: BTreeMap<&'static str, &'static str>,
}

impl Default for MathEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl MathEngine {
    pub fn new() -> Self {
        Self {
            symbols: SYMBOLS.iter().copied().collect(),
        }
    }

    pub fn symbol(&self, name: &str) -> Option<&'static str> {
        self.symbols.get(name).copied()
    }

    /// Renders every pending math fragment in `target` and returns how
    /// many were rendered. Already rendered fragments are left alone.
    pub async fn typeset(&self, target: &mut RenderTarget) -> usize {
        let mut count = 0;
        for fragment in target.fragments_mut() {
            if let Fragment::Math {
                source,
                display,
                rendered: rendered @ None,
            } = fragment
            {
                *rendered = Some(self.render(source, *display));
                count += 1;
            }
        }
        count
    }

    pub fn render(&self, source: &str, display: bool) -> String {
        let mut writer = MathWriter {
            engine: self,
            source,
            pos: 0,
            depth: 0,
        };
        let body = writer.render_until_end();
        let class = if display { "math math-display" } else { "math math-inline" };
        format!("<span class=\"{class}\">{body}</span>")
    }
}

struct MathWriter<'e, 's> {
    engine: &'e MathEngine,
    source: &'s str,
    pos: usize,
    depth: usize,
}

impl MathWriter<'_, '_> {
    fn peek(&self) -> Option<char> {
        self.source[self.pos..].chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.pos += ch.len_utf8();
        Some(ch)
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.bump();
        }
    }

    fn render_until_end(&mut self) -> String {
        let mut out = String::new();
        while let Some(atom) = self.next_atom() {
            out.push_str(&atom);
        }
        out
    }

    fn render_group(&mut self) -> String {
        let mut out = String::new();
        loop {
            self.skip_whitespace();
            match self.peek() {
                None => break,
                Some('}') => {
                    self.bump();
                    break;
                }
                Some(_) => {
                    if let Some(atom) = self.next_atom() {
                        out.push_str(&atom);
                    }
                }
            }
        }
        out
    }

    /// Past [`MAX_NESTING`] the rest of the source is emitted as raw text.
    fn next_atom(&mut self) -> Option<String> {
        self.skip_whitespace();
        if self.depth == MAX_NESTING {
            let rest = &self.source[self.pos..];
            if rest.is_empty() {
                return None;
            }
            self.pos = self.source.len();
            return Some(escape_html(rest));
        }
        let ch = self.bump()?;
        self.depth += 1;
        let atom = self.render_atom(ch);
        self.depth -= 1;
        Some(atom)
    }

    fn render_atom(&mut self, ch: char) -> String {
        match ch {
            '{' => self.render_group(),
            // stray closing brace
            '}' => String::new(),
            '^' => format!("<sup>{}</sup>", self.next_atom().unwrap_or_default()),
            '_' => format!("<sub>{}</sub>", self.next_atom().unwrap_or_default()),
            '\\' => self.render_command(),
            c if c.is_alphabetic() => format!("<i>{c}</i>"),
            c => escape_html(&c.to_string()),
        }
    }

    fn render_command(&mut self) -> String {
        let start = self.pos;
        while self.peek().is_some_and(|c| c.is_ascii_alphabetic()) {
            self.bump();
        }
        if self.pos == start {
            return match self.bump() {
                Some(',') => "&thinsp;".to_string(),
                Some('\\') => " ".to_string(),
                Some(c) => escape_html(&c.to_string()),
                None => escape_html("\\"),
            };
        }

        let name = &self.source[start..self.pos];
        match name {
            "frac" => {
                let numerator = self.next_atom().unwrap_or_default();
                let denominator = self.next_atom().unwrap_or_default();
                format!(
                    "<span class=\"frac\"><sup>{numerator}</sup>&frasl;<sub>{denominator}</sub></span>"
                )
            }
            "sqrt" => format!(
                "&radic;<span class=\"radicand\">{}</span>",
                self.next_atom().unwrap_or_default()
            ),
            "mathrm" | "text" | "textrm" | "operatorname" => {
                let raw = self.raw_argument();
                format!("<span class=\"upright\">{}</span>", escape_html(&raw))
            }
            _ => match self.engine.symbol(name) {
                Some(symbol) => symbol.to_string(),
                None => escape_html(&format!("\\{name}")),
            },
        }
    }

    /// Reads a brace argument verbatim, without rendering its contents.
    fn raw_argument(&mut self) -> String {
        self.skip_whitespace();
        if self.peek() != Some('{') {
            return self.bump().map(String::from).unwrap_or_default();
        }
        self.bump();
        let start = self.pos;
        let mut depth = 1usize;
        while let Some(ch) = self.bump() {
            match ch {
                '{' => depth += 1,
                '}' => {
                    depth -= 1;
                    if depth == 0 {
                        return self.source[start..self.pos - 1].to_string();
                    }
                }
                _ => {}
            }
        }
        self.source[start..].to_string()
    }
}

const SYMBOLS: &[(&str, &str)] = &[
    ("alpha", "α"),
    ("beta", "β"),
    ("gamma", "γ"),
    ("delta", "δ"),
    ("epsilon", "ε"),
    ("zeta", "ζ"),
    ("eta", "η"),
    ("theta", "θ"),
    ("iota", "ι"),
    ("kappa", "κ"),
    ("lambda", "λ"),
    ("mu", "μ"),
    ("nu", "ν"),
    ("xi", "ξ"),
    ("pi", "π"),
    ("rho", "ρ"),
    ("sigma", "σ"),
    ("tau", "τ"),
    ("upsilon", "υ"),
    ("phi", "φ"),
    ("chi", "χ"),
    ("psi", "ψ"),
    ("omega", "ω"),
    ("Gamma", "Γ"),
    ("Delta", "Δ"),
    ("Theta", "Θ"),
    ("Lambda", "Λ"),
    ("Xi", "Ξ"),
    ("Pi", "Π"),
    ("Sigma", "Σ"),
    ("Phi", "Φ"),
    ("Psi", "Ψ"),
    ("Omega", "Ω"),
    ("pm", "±"),
    ("mp", "∓"),
    ("times", "×"),
    ("div", "÷"),
    ("cdot", "·"),
    ("leq", "≤"),
    ("le", "≤"),
    ("geq", "≥"),
    ("ge", "≥"),
    ("neq", "≠"),
    ("ne", "≠"),
    ("approx", "≈"),
    ("equiv", "≡"),
    ("infty", "∞"),
    ("partial", "∂"),
    ("nabla", "∇"),
    ("sum", "∑"),
    ("prod", "∏"),
    ("int", "∫"),
    ("in", "∈"),
    ("notin", "∉"),
    ("subset", "⊂"),
    ("cup", "∪"),
    ("cap", "∩"),
    ("forall", "∀"),
    ("exists", "∃"),
    ("to", "→"),
    ("rightarrow", "→"),
    ("leftarrow", "←"),
    ("Rightarrow", "⇒"),
    ("leftrightarrow", "↔"),
    ("degree", "°"),
    ("ldots", "…"),
    ("cdots", "⋯"),
];
