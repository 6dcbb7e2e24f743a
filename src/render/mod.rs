pub mod markup;
pub mod math;
pub mod typeset;

use crate::render::typeset::RenderTarget;

/// Parses and typesets `content` into a fresh target. Math is left pending.
///
/// Content that fails to parse is shown as plain escaped text.
pub fn typeset_content(content: &str) -> RenderTarget {
    let mut target = RenderTarget::new();
    match markup::parse(content) {
        Ok(tree) => typeset::typeset_node_into(tree.top_node(), &mut target, |span| tree.slice(span)),
        Err(err) => {
            tracing::warn!(content, "cell content did not parse, showing raw text: {err}");
            target.push_text(content);
        }
    }
    target
}

/// One view-mode render of a cell: trim, parse, typeset, then typeset math.
///
/// Returns the HTML to publish, or `None` when `ticket` is no longer
/// current once the math engine has finished.
pub async fn render_pass(
    content: &str,
    ticket: RenderTicket,
    is_current: impl Fn(RenderTicket) -> bool,
) -> Option<String> {
    let mut target = typeset_content(content.trim());
    if target.pending_math() > 0 {
        let engine = math::load_math_engine().await;
        engine.typeset(&mut target).await;
    }
    is_current(ticket).then(|| target.to_html())
}

/// Identifies one render pass of a cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RenderTicket(u64);

/// Guards a cell's render output against late writes.
///
/// Each render pass takes a ticket from [`TypesetSlot::begin`]; only the
/// holder of the newest ticket may publish output.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TypesetSlot {
    generation: u64,
}

impl TypesetSlot {
    pub fn begin(&mut self) -> RenderTicket {
        self.generation += 1;
        RenderTicket(self.generation)
    }

    pub fn is_current(&self, ticket: RenderTicket) -> bool {
        ticket.0 == self.generation
    }

    /// Makes every outstanding ticket stale.
    pub fn invalidate(&mut self) {
        self.generation += 1;
    }
}
