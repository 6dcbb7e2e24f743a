use crate::render::markup::{Node, NodeKind, Span};

/// One piece of rendered cell output.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Fragment {
    /// Ready-to-insert HTML.
    Markup(String),
    /// Math source waiting for the math engine. `rendered` is filled in by
    /// [`crate::render::math::MathEngine::typeset`].
    Math {
        source: String,
        display: bool,
        rendered: Option<String>,
    },
}

/// Render surface a cell's content is typeset into.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RenderTarget {
    fragments: Vec<Fragment>,
}

impl RenderTarget {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.fragments.clear();
    }

    pub fn fragments(&self) -> &[Fragment] {
        &self.fragments
    }

    pub fn fragments_mut(&mut self) -> &mut [Fragment] {
        &mut self.fragments
    }

    pub fn push_markup(&mut self, markup: &str) {
        if markup.is_empty() {
            return;
        }
        if let Some(Fragment::Markup(last)) = self.fragments.last_mut() {
            last.push_str(markup);
        } else {
            self.fragments.push(Fragment::Markup(markup.to_string()));
        }
    }

    pub fn push_text(&mut self, text: &str) {
        self.push_markup(&escape_html(text));
    }

    pub fn push_math(&mut self, source: &str, display: bool) {
        self.fragments.push(Fragment::Math {
            source: source.to_string(),
            display,
            rendered: None,
        });
    }

    pub fn pending_math(&self) -> usize {
        self.fragments
            .iter()
            .filter(|fragment| matches!(fragment, Fragment::Math { rendered: None, .. }))
            .count()
    }

    /// Math that has not been typeset yet is shown as its escaped source.
    pub fn to_html(&self) -> String {
        let mut html = String::new();
        for fragment in &self.fragments {
            match fragment {
                Fragment::Markup(markup) => html.push_str(markup),
                Fragment::Math {
                    rendered: Some(rendered),
                    ..
                } => html.push_str(rendered),
                Fragment::Math {
                    source,
                    display,
                    rendered: None,
                } => {
                    let class = if *display { "math-pending display" } else { "math-pending" };
                    html.push_str(&format!(
                        "<span class=\"{class}\">{}</span>",
                        escape_html(source)
                    ));
                }
            }
        }
        html
    }
}

/// Replaces the contents of `target` with the typeset form of `node`.
///
/// `slice` maps a span of the parsed source back to its text.
pub fn typeset_node_into<'a>(
    node: &Node,
    target: &mut RenderTarget,
    slice: impl Fn(Span) -> &'a str,
) {
    target.clear();
    write_node(node, target, &slice);
}

fn write_node<'a>(node: &Node, target: &mut RenderTarget, slice: &dyn Fn(Span) -> &'a str) {
    match &node.kind {
        NodeKind::Root | NodeKind::Group => write_children(node, target, slice),
        NodeKind::Text => target.push_text(slice(node.span)),
        NodeKind::Command { name } => write_command(slice(*name), node, target, slice),
        NodeKind::Math { display, body } => target.push_math(slice(*body), *display),
        NodeKind::Escaped => {
            let escaped = slice(Span::new(node.span.from + 1, node.span.to));
            match escaped {
                "," => target.push_markup("&thinsp;"),
                " " => target.push_markup(" "),
                other => target.push_text(other),
            }
        }
        NodeKind::LineBreak => target.push_markup("<br>"),
        NodeKind::NonBreakingSpace => target.push_markup("&nbsp;"),
        NodeKind::Comment => {}
    }
}

fn write_children<'a>(node: &Node, target: &mut RenderTarget, slice: &dyn Fn(Span) -> &'a str) {
    for child in &node.children {
        write_node(child, target, slice);
    }
}

fn write_command<'a>(
    name: &str,
    node: &Node,
    target: &mut RenderTarget,
    slice: &dyn Fn(Span) -> &'a str,
) {
    let wrapper = match name {
        "textbf" => Some(("<b>", "</b>")),
        "textit" | "emph" => Some(("<i>", "</i>")),
        "texttt" => Some(("<code>", "</code>")),
        "underline" => Some(("<u>", "</u>")),
        "textsc" => Some(("<span class=\"small-caps\">", "</span>")),
        "textrm" | "textsf" | "textnormal" | "mbox" => Some(("", "")),
        _ => None,
    };
    if let Some((open, close)) = wrapper {
        target.push_markup(open);
        write_children(node, target, slice);
        target.push_markup(close);
        return;
    }

    match name {
        "ldots" | "dots" => target.push_markup("&hellip;"),
        "textbackslash" => target.push_text("\\"),
        "LaTeX" => target.push_text("LaTeX"),
        "TeX" => target.push_text("TeX"),
        _ if node.children.is_empty() => target.push_text(slice(node.span)),
        _ => write_children(node, target, slice),
    }
}

pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}
