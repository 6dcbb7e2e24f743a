use tablegen::render::markup::{self, Node, NodeKind, ParseError, Span, Tree};

fn kinds(node: &Node) -> Vec<&NodeKind> {
    node.children.iter().map(|child| &child.kind).collect()
}

fn texts<'a>(tree: &Tree<'a>, node: &Node) -> Vec<&'a str> {
    node.children.iter().map(|child| tree.slice(child.span)).collect()
}

#[test]
fn test_plain_text_is_single_node() {
    let tree = markup::parse("hello world").unwrap();
    let root = tree.top_node();
    assert_eq!(root.kind, NodeKind::Root);
    assert_eq!(root.span, Span::new(0, 11));
    assert_eq!(kinds(root), vec![&NodeKind::Text]);
    assert_eq!(texts(&tree, root), vec!["hello world"]);
}

#[test]
fn test_empty_input() {
    let tree = markup::parse("").unwrap();
    assert!(tree.top_node().children.is_empty());
}

#[test]
fn test_command_with_argument() {
    let tree = markup::parse(r"a \textbf{bold} b").unwrap();
    let root = tree.top_node();
    assert_eq!(texts(&tree, root), vec!["a ", r"\textbf{bold}", " b"]);

    let command = &root.children[1];
    let NodeKind::Command { name } = &command.kind else {
        panic!("expected command, got {:?}", command.kind);
    };
    assert_eq!(tree.slice(*name), "textbf");
    assert_eq!(command.children.len(), 1);
    assert_eq!(command.children[0].kind, NodeKind::Group);
    assert_eq!(texts(&tree, &command.children[0]), vec!["bold"]);
}

#[test]
fn test_command_without_argument_stops_at_non_letter() {
    let tree = markup::parse(r"\alpha2").unwrap();
    let root = tree.top_node();
    assert_eq!(texts(&tree, root), vec![r"\alpha", "2"]);
    assert!(root.children[0].children.is_empty());
}

#[test]
fn test_nested_groups() {
    let tree = markup::parse(r"{a{b}c}").unwrap();
    let outer = &tree.top_node().children[0];
    assert_eq!(outer.kind, NodeKind::Group);
    assert_eq!(texts(&tree, outer), vec!["a", "{b}", "c"]);
}

#[test]
fn test_inline_and_display_math() {
    let tree = markup::parse(r"$x^2$ and $$\sum$$ or \(y\) \[z\]").unwrap();
    let maths: Vec<(bool, &str)> = tree
        .top_node()
        .children
        .iter()
        .filter_map(|node| match node.kind {
            NodeKind::Math { display, body } => Some((display, tree.slice(body))),
            _ => None,
        })
        .collect();
    assert_eq!(
        maths,
        vec![(false, "x^2"), (true, r"\sum"), (false, "y"), (true, "z")]
    );
}

#[test]
fn test_escaped_dollar_inside_math() {
    let tree = markup::parse(r"$a\$b$").unwrap();
    let NodeKind::Math { body, .. } = tree.top_node().children[0].kind else {
        panic!("expected math");
    };
    assert_eq!(tree.slice(body), r"a\$b");
}

#[test]
fn test_escapes_breaks_and_specials() {
    let tree = markup::parse("Fish \\& Chips\\\\50\\%~x % note\nnext").unwrap();
    let root = tree.top_node();
    assert_eq!(
        kinds(root),
        vec![
            &NodeKind::Text,
            &NodeKind::Escaped,
            &NodeKind::Text,
            &NodeKind::LineBreak,
            &NodeKind::Text,
            &NodeKind::Escaped,
            &NodeKind::NonBreakingSpace,
            &NodeKind::Text,
            &NodeKind::Comment,
            &NodeKind::Text,
        ]
    );
    assert_eq!(tree.slice(root.children[8].span), "% note");
    assert_eq!(tree.slice(root.children[9].span), "\nnext");
}

#[test]
fn test_multibyte_text_and_escape() {
    let tree = markup::parse("héllo \\é").unwrap();
    assert_eq!(texts(&tree, tree.top_node()), vec!["héllo ", "\\é"]);
}

#[test]
fn test_trailing_backslash_is_text() {
    let tree = markup::parse("end\\").unwrap();
    assert_eq!(kinds(tree.top_node()), vec![&NodeKind::Text, &NodeKind::Text]);
}

#[test]
fn test_unclosed_group_reports_opening_offset() {
    let err = markup::parse(r"ab\textbf{cd").unwrap_err();
    assert_eq!(err, ParseError::UnclosedGroup { at: 9 });
    assert_eq!(err.offset(), 9);
}

#[test]
fn test_stray_close_brace() {
    assert_eq!(
        markup::parse("a}b").unwrap_err(),
        ParseError::UnexpectedCloseBrace { at: 1 }
    );
}

#[test]
fn test_unclosed_math() {
    assert_eq!(
        markup::parse("cost $5").unwrap_err(),
        ParseError::UnclosedMath { at: 5 }
    );
    assert!(markup::parse(r"\(x").is_err());
}

#[test]
fn test_nesting_limit() {
    let at_limit = format!(
        "{}x{}",
        "{".repeat(markup::MAX_NESTING),
        "}".repeat(markup::MAX_NESTING)
    );
    assert!(markup::parse(&at_limit).is_ok());

    let too_deep = format!("{}x{}", "{".repeat(10_000), "}".repeat(10_000));
    assert_eq!(
        markup::parse(&too_deep).unwrap_err(),
        ParseError::NestingTooDeep {
            at: markup::MAX_NESTING
        }
    );

    let nested_arguments = r"\textbf{".repeat(500);
    assert!(matches!(
        markup::parse(&nested_arguments),
        Err(ParseError::NestingTooDeep { .. })
    ));
}

#[test]
fn test_error_messages() {
    assert_eq!(
        ParseError::UnclosedGroup { at: 3 }.to_string(),
        "group opened at byte 3 is never closed"
    );
    assert_eq!(
        ParseError::UnexpectedCloseBrace { at: 0 }.to_string(),
        "unexpected '}' at byte 0"
    );
    assert_eq!(
        ParseError::NestingTooDeep { at: 7 }.to_string(),
        "groups nested deeper than 128 at byte 7"
    );
}
