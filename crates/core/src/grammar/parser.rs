use log::{debug, trace};
use pest::error::{InputLocation, LineColLocation};
use pest::iterators::Pair;
use pest_vm::Vm;

use super::node::{Node, NodeKind};
use crate::error::Error;
use enumstr_diagnostics::Span;

/// Grammar bundled into the binary; used unless `--grammar` overrides it.
pub const BUNDLED_GRAMMAR: &str = include_str!("enumstr.pest");

/// Entry rule every grammar must define.
pub const ENTRY_RULE: &str = "root";

/// A compiled PEG grammar, ready to parse any number of sources.
pub struct Grammar {
    vm: Vm,
    rule_count: usize,
}

impl std::fmt::Debug for Grammar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Grammar")
            .field("rule_count", &self.rule_count)
            .finish_non_exhaustive()
    }
}

impl Grammar {
    /// Compile the bundled grammar.
    pub fn bundled() -> Result<Self, Error> {
        Self::from_source(BUNDLED_GRAMMAR)
    }

    /// Compile a grammar from its PEG text.
    ///
    /// Fails when the text is not a valid grammar or lacks the `root` rule.
    pub fn from_source(text: &str) -> Result<Self, Error> {
        let (_, rules) = pest_meta::parse_and_optimize(text).map_err(|errors| Error::Grammar {
            message: errors
                .iter()
                .map(|e| e.to_string())
                .collect::<Vec<_>>()
                .join("\n"),
        })?;
        if !rules.iter().any(|r| r.name == ENTRY_RULE) {
            return Err(Error::MissingEntryRule {
                rule: ENTRY_RULE.to_string(),
            });
        }
        let rule_count = rules.len();
        debug!("compiled grammar with {rule_count} rules");
        Ok(Self {
            vm: Vm::new(rules),
            rule_count,
        })
    }

    /// Number of rules in the compiled grammar.
    pub fn rule_count(&self) -> usize {
        self.rule_count
    }

    /// Parse `input` from the entry rule into an owned node tree.
    pub fn parse<'i>(&self, input: &'i str) -> Result<Node<'i>, Error> {
        let mut pairs = self.vm.parse(ENTRY_RULE, input).map_err(|e| {
            let span = match e.location {
                InputLocation::Pos(p) => Span::empty(p),
                InputLocation::Span((start, end)) => Span::new(start, end.max(start)),
            };
            let (line, col) = match e.line_col {
                LineColLocation::Pos(lc) | LineColLocation::Span(lc, _) => lc,
            };
            Error::Parse {
                message: e.variant.message().into_owned(),
                span,
                line,
                col,
            }
        })?;
        let root = pairs.next().ok_or_else(|| Error::Parse {
            message: format!("grammar produced no `{ENTRY_RULE}` node"),
            span: Span::empty(0),
            line: 1,
            col: 1,
        })?;
        let tree = build_node(root, input);
        trace!("parse tree has {} nodes", tree.size());
        Ok(tree)
    }
}

/// Convert a pest pair into an owned [`Node`], re-slicing `input` so the
/// node text outlives the VM borrow.
fn build_node<'a, 'i>(pair: Pair<'a, &'a str>, input: &'i str) -> Node<'i> {
    let rule = pair.as_rule();
    let span = pair.as_span();
    let line_col = span.start_pos().line_col();
    let (start, end) = (span.start(), span.end());
    let children = pair.into_inner().map(|p| build_node(p, input)).collect();
    Node::new(
        NodeKind::from_rule(rule),
        rule,
        &input[start..end],
        Span::new(start, end),
        line_col,
        children,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(node: &Node<'_>) -> Vec<NodeKind> {
        node.children.iter().map(|c| c.kind).collect()
    }

    fn constructs<'a>(root: &'a Node<'a>) -> Vec<&'a Node<'a>> {
        root.children.iter().filter(|c| c.is_construct()).collect()
    }

    #[test]
    fn bundled_grammar_compiles() {
        let g = Grammar::bundled().expect("bundled grammar");
        assert!(g.rule_count() > 10);
    }

    #[test]
    fn plain_enum_shape() {
        let g = Grammar::bundled().unwrap();
        let root = g.parse("enum Hello { Zero, One = 5 };").unwrap();
        assert_eq!(root.kind, NodeKind::Root);
        let found = constructs(&root);
        assert_eq!(found.len(), 1);
        let def = found[0];
        assert_eq!(def.kind, NodeKind::EnumDef);
        assert_eq!(
            kinds(def),
            [
                NodeKind::Keyword,
                NodeKind::Identifier,
                NodeKind::BraceOpen,
                NodeKind::EnumList,
                NodeKind::BraceClose,
                NodeKind::Semicolon,
            ]
        );
        let list = &def.children[3];
        assert_eq!(
            kinds(list),
            [NodeKind::EnumValue, NodeKind::Comma, NodeKind::EnumValue]
        );
        let second = &list.children[2];
        assert_eq!(
            kinds(second),
            [NodeKind::Identifier, NodeKind::Assign, NodeKind::Integer]
        );
        assert_eq!(second.children[2].text(), "5");
    }

    #[test]
    fn typedef_enum_shape() {
        let g = Grammar::bundled().unwrap();
        let root = g.parse("typedef enum Kuku { single } Kiki;").unwrap();
        let def = constructs(&root)[0];
        assert_eq!(def.kind, NodeKind::EnumType);
        assert_eq!(
            kinds(def),
            [
                NodeKind::Keyword,
                NodeKind::Keyword,
                NodeKind::Identifier,
                NodeKind::BraceOpen,
                NodeKind::EnumList,
                NodeKind::BraceClose,
                NodeKind::Identifier,
                NodeKind::Semicolon,
            ]
        );
        assert_eq!(def.children[6].text(), "Kiki");
    }

    #[test]
    fn declarator_tail_stops_at_semicolon() {
        let g = Grammar::bundled().unwrap();
        let root = g.parse("typedef enum { A, B } T, *PT;").unwrap();
        let def = constructs(&root)[0];
        let tail = def
            .children
            .iter()
            .find(|n| n.kind == NodeKind::DeclaratorTail)
            .expect("declarator tail");
        assert_eq!(tail.text(), ", *PT");
        assert_eq!(def.children.last().unwrap().kind, NodeKind::Semicolon);

        let root = g.parse("enum E { A } v[2] = { A, A };").unwrap();
        let def = constructs(&root)[0];
        let tail = def.children.iter().find(|n| n.kind == NodeKind::DeclaratorTail).unwrap();
        assert_eq!(tail.text(), "[2] = { A, A }");
    }

    #[test]
    fn enums_are_found_among_other_code() {
        let src = r#"
#include <stdio.h>
int enumerate(void) { return 0; }
const char *s = "enum Fake { A };";
/* enum Commented { B }; */
// enum AlsoCommented { C };
struct point { int x; };
enum Real { D };
"#;
        let g = Grammar::bundled().unwrap();
        let root = g.parse(src).unwrap();
        let found = constructs(&root);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].children[1].text(), "Real");
        assert_eq!(found[0].line, 8);
        assert_eq!(found[0].col, 1);
    }

    #[test]
    fn comments_inside_enum_are_skipped() {
        let g = Grammar::bundled().unwrap();
        let root = g
            .parse("enum E {\n  A, /* c */\n  B = /* x */ 5, // y\n};")
            .unwrap();
        let def = constructs(&root)[0];
        let list = &def.children[3];
        let values: Vec<_> = list
            .children
            .iter()
            .filter(|c| c.kind == NodeKind::EnumValue)
            .collect();
        assert_eq!(values.len(), 2);
        assert_eq!(values[1].children[2].text(), "5");
    }

    #[test]
    fn missing_semicolon_still_matches_construct() {
        let g = Grammar::bundled().unwrap();
        let root = g.parse("enum E { A }").unwrap();
        let def = constructs(&root)[0];
        assert_eq!(def.children.last().unwrap().kind, NodeKind::BraceClose);
    }

    #[test]
    fn keyword_prefixes_are_not_constructs() {
        let g = Grammar::bundled().unwrap();
        let root = g.parse("int enum_count; enumeration { A };").unwrap();
        assert!(constructs(&root).is_empty());
    }

    #[test]
    fn integer_literal_forms() {
        let g = Grammar::bundled().unwrap();
        let root = g.parse("enum E { A = -1, B = 0x1F, C = 010, D = 7u };").unwrap();
        let list = &constructs(&root)[0].children[3];
        let literals: Vec<&str> = list
            .children
            .iter()
            .filter(|c| c.kind == NodeKind::EnumValue)
            .map(|v| v.children[2].text())
            .collect();
        assert_eq!(literals, ["-1", "0x1F", "010", "7u"]);
    }

    #[test]
    fn invalid_grammar_is_rejected() {
        let err = Grammar::from_source("root = { undefined_rule }").unwrap_err();
        assert!(matches!(err, Error::Grammar { .. }), "{err:?}");
    }

    #[test]
    fn grammar_without_root_is_rejected() {
        let err = Grammar::from_source("start = { ANY* }").unwrap_err();
        assert!(matches!(err, Error::MissingEntryRule { .. }), "{err:?}");
    }

    #[test]
    fn parse_failure_reports_location() {
        let g = Grammar::from_source("root = { SOI ~ \"enum\" ~ EOI }").unwrap();
        let err = g.parse("\nstruct").unwrap_err();
        match err {
            Error::Parse { line, col, span, .. } => {
                assert_eq!((line, col), (1, 1));
                assert_eq!(span.start, 0);
            }
            other => panic!("expected parse error, got {other:?}"),
        }
    }
}
