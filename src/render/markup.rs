//! Small LaTeX-flavoured markup parser for cell content.
//!
//! The parser understands just enough structure to typeset a table cell:
//! text runs, commands with brace arguments, groups, inline and display
//! math, escaped characters, line breaks, `~` and `%` comments. Every node
//! records the byte span it covers in the source so the typesetter can pull
//! raw text back out through [`Tree::slice`].

/// Half-open byte range into the parsed source.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Span {
    pub from: usize,
    pub to: usize,
}

impl Span {
    pub fn new(from: usize, to: usize) -> Self {
        Self { from, to }
    }

    pub fn is_empty(&self) -> bool {
        self.from >= self.to
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NodeKind {
    Root,
    Text,
    /// `name` excludes the leading backslash. Children are the brace
    /// arguments that immediately follow the name.
    Command { name: Span },
    Group,
    Math { display: bool, body: Span },
    /// A backslash followed by a single non-letter character, e.g. `\&`.
    Escaped,
    LineBreak,
    NonBreakingSpace,
    Comment,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Node {
    pub kind: NodeKind,
    pub span: Span,
    pub children: Vec<Node>,
}

impl Node {
    fn leaf(kind: NodeKind, from: usize, to: usize) -> Self {
        Self {
            kind,
            span: Span::new(from, to),
            children: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    UnclosedGroup { at: usize },
    UnexpectedCloseBrace { at: usize },
    UnclosedMath { at: usize },
    NestingTooDeep { at: usize },
}

impl ParseError {
    pub fn offset(&self) -> usize {
        match self {
            ParseError::UnclosedGroup { at }
            | ParseError::UnexpectedCloseBrace { at }
            | ParseError::UnclosedMath { at }
            | ParseError::NestingTooDeep { at } => *at,
        }
    }
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseError::UnclosedGroup { at } => write!(f, "group opened at byte {at} is never closed"),
            ParseError::UnexpectedCloseBrace { at } => {
                write!(f, "unexpected '}}' at byte {at}")
            }
            ParseError::UnclosedMath { at } => write!(f, "math opened at byte {at} is never closed"),
            ParseError::NestingTooDeep { at } => {
                write!(f, "groups nested deeper than {MAX_NESTING} at byte {at}")
            }
        }
    }
}

impl std::error::Error for ParseError {}

/// Parse result bound to the text it was parsed from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Tree<'a> {
    source: &'a str,
    root: Node,
}

impl<'a> Tree<'a> {
    pub fn top_node(&self) -> &Node {
        &self.root
    }

    pub fn slice(&self, span: Span) -> &'a str {
        self.source.get(span.from..span.to).unwrap_or_default()
    }
}

pub fn parse(source: &str) -> Result<Tree<'_>, ParseError> {
    let mut parser = Parser {
        source,
        pos: 0,
        depth: 0,
    };
    let children = parser.parse_sequence(None)?;
    Ok(Tree {
        source,
        root: Node {
            kind: NodeKind::Root,
            span: Span::new(0, source.len()),
            children,
        },
    })
}

const SPECIAL: &[u8] = b"{}$\\%~";

/// Deepest brace nesting accepted by the parser and the math engine.
pub const MAX_NESTING: usize = 128;

struct Parser<'a> {
    source: &'a str,
    pos: usize,
    depth: usize,
}

impl Parser<'_> {
    fn bytes(&self) -> &[u8] {
        self.source.as_bytes()
    }

    fn peek(&self) -> Option<u8> {
        self.bytes().get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<u8> {
        self.bytes().get(self.pos + offset).copied()
    }

    /// Parses nodes until end of input, or until the closing brace of the
    /// group that started at `group_start`.
    fn parse_sequence(&mut self, group_start: Option<usize>) -> Result<Vec<Node>, ParseError> {
        let mut nodes = Vec::new();
        loop {
            let Some(byte) = self.peek() else {
                return match group_start {
                    Some(at) => Err(ParseError::UnclosedGroup { at }),
                    None => Ok(nodes),
                };
            };

            let node = match byte {
                b'}' => {
                    return match group_start {
                        Some(_) => Ok(nodes),
                        None => Err(ParseError::UnexpectedCloseBrace { at: self.pos }),
                    };
                }
                b'{' => self.parse_group()?,
                b'$' => self.parse_dollar_math()?,
                b'\\' => self.parse_backslash()?,
                b'%' => self.parse_comment(),
                b'~' => {
                    self.pos += 1;
                    Node::leaf(NodeKind::NonBreakingSpace, self.pos - 1, self.pos)
                }
                _ => self.parse_text(),
            };
            nodes.push(node);
        }
    }

    fn parse_group(&mut self) -> Result<Node, ParseError> {
        let start = self.pos;
        if self.depth == MAX_NESTING {
            return Err(ParseError::NestingTooDeep { at: start });
        }
        self.pos += 1;
        self.depth += 1;
        let children = self.parse_sequence(Some(start))?;
        self.depth -= 1;
        // parse_sequence only returns Ok inside a group when it sits on '}'
        self.pos += 1;
        Ok(Node {
            kind: NodeKind::Group,
            span: Span::new(start, self.pos),
            children,
        })
    }

    fn parse_dollar_math(&mut self) -> Result<Node, ParseError> {
        let display = self.peek_at(1) == Some(b'$');
        let delimiter = if display { "$$" } else { "$" };
        self.parse_math(delimiter, delimiter, display)
    }

    fn parse_math(&mut self, open: &str, close: &str, display: bool) -> Result<Node, ParseError> {
        let start = self.pos;
        let body_start = start + open.len();
        let body_end = self
            .find_unescaped(body_start, close)
            .ok_or(ParseError::UnclosedMath { at: start })?;
        self.pos = body_end + close.len();
        Ok(Node::leaf(
            NodeKind::Math {
                display,
                body: Span::new(body_start, body_end),
            },
            start,
            self.pos,
        ))
    }

    fn find_unescaped(&self, from: usize, delimiter: &str) -> Option<usize> {
        let bytes = self.bytes();
        let mut i = from;
        while i < bytes.len() {
            if bytes[i..].starts_with(delimiter.as_bytes()) {
                return Some(i);
            }
            i += if bytes[i] == b'\\' { 2 } else { 1 };
        }
        None
    }

    fn parse_backslash(&mut self) -> Result<Node, ParseError> {
        let start = self.pos;
        let Some(next) = self.source[start + 1..].chars().next() else {
            self.pos += 1;
            return Ok(Node::leaf(NodeKind::Text, start, self.pos));
        };

        match next {
            '(' => self.parse_math("\\(", "\\)", false),
            '[' => self.parse_math("\\[", "\\]", true),
            '\\' => {
                self.pos += 2;
                Ok(Node::leaf(NodeKind::LineBreak, start, self.pos))
            }
            c if c.is_ascii_alphabetic() => self.parse_command(),
            c => {
                self.pos += 1 + c.len_utf8();
                Ok(Node::leaf(NodeKind::Escaped, start, self.pos))
            }
        }
    }

    fn parse_command(&mut self) -> Result<Node, ParseError> {
        let start = self.pos;
        self.pos += 1;
        while self.peek().is_some_and(|b| b.is_ascii_alphabetic()) {
            self.pos += 1;
        }
        let name = Span::new(start + 1, self.pos);

        let mut arguments = Vec::new();
        while self.peek() == Some(b'{') {
            arguments.push(self.parse_group()?);
        }

        Ok(Node {
            kind: NodeKind::Command { name },
            span: Span::new(start, self.pos),
            children: arguments,
        })
    }

    fn parse_comment(&mut self) -> Node {
        let start = self.pos;
        let end = self.source[start..]
            .find('\n')
            .map(|offset| start + offset)
            .unwrap_or(self.source.len());
        self.pos = end;
        Node::leaf(NodeKind::Comment, start, end)
    }

    fn parse_text(&mut self) -> Node {
        let start = self.pos;
        while self.peek().is_some_and(|b| !SPECIAL.contains(&b)) {
            self.pos += 1;
        }
        Node::leaf(NodeKind::Text, start, self.pos)
    }
}
