//! Enum-construct walker: validates one `enum_def` / `enum_type` node and
//! extracts its name and members.

use log::{debug, trace};

use enumstr_diagnostics::{Diagnostic, Span, codes};

use crate::error::Error;
use crate::grammar::node::{Node, NodeKind};
use crate::resolve::{Member, MemberDecl, resolve};

/// A fully resolved enum, ready for emission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedEnum {
    /// Name used for generated symbols: the tag of a plain `enum`, the
    /// alias of a `typedef enum`.
    pub name: String,
    /// Members in declaration order.
    pub members: Vec<Member>,
    /// Declared through `typedef enum`; the accessor then takes `Name`
    /// rather than `enum Name`.
    pub is_typedef: bool,
}

impl ResolvedEnum {
    /// Accessor parameter type: `Name` or `enum Name`.
    pub fn param_type(&self) -> String {
        if self.is_typedef {
            self.name.clone()
        } else {
            format!("enum {}", self.name)
        }
    }
}

/// Result of walking one construct.
#[derive(Debug)]
pub enum Walked<'a> {
    /// The construct produced an enum.
    Enum {
        /// The resolved enum.
        resolved: ResolvedEnum,
        /// Verbatim source text of the whole construct.
        source: &'a str,
    },
    /// The construct was skipped; the diagnostic says why.
    Skipped(Diagnostic),
}

/// Walk an `enum_def` or `enum_type` node.
///
/// Fails with [`Error::Structure`] when the children deviate from the
/// expected sequence. Missing names (plain `enum`) and missing member lists
/// are soft skips.
pub fn walk_construct<'a>(node: &Node<'a>) -> Result<Walked<'a>, Error> {
    match node.kind {
        NodeKind::EnumType => walk_enum_type(node),
        NodeKind::EnumDef => walk_enum_def(node),
        _ => Err(Error::structure(
            codes::UNEXPECTED_NODE,
            "expected an enum construct",
            node,
        )),
    }
}

/// `typedef enum [Tag] { list? } Alias [declarators] ;`
fn walk_enum_type<'a>(node: &Node<'a>) -> Result<Walked<'a>, Error> {
    trace!("walking {}", node.describe());
    let mut cur = Cursor::new(node);

    // The tag is optional and never used: symbols are named after the alias.
    cur.eat(NodeKind::Identifier);
    cur.expect(
        NodeKind::BraceOpen,
        codes::MISSING_OPEN_BRACE,
        "enum type without '{'",
    )?;
    let list = cur.eat(NodeKind::EnumList);
    cur.expect(
        NodeKind::BraceClose,
        codes::MISSING_CLOSE_BRACE,
        "enum type without '}'",
    )?;
    // Without members there is nothing to name, so a missing alias is a skip.
    let alias = match cur.eat(NodeKind::Identifier) {
        Some(alias) => Some(alias),
        None if list.is_none() => None,
        None => {
            return Err(cur.mismatch(
                codes::MISSING_TYPE_NAME,
                "enum type without type identifier",
                NodeKind::Identifier,
            ));
        }
    };
    if let Some(tail) = cur.eat(NodeKind::DeclaratorTail) {
        debug!("enum type declares more names: '{}'", tail.text());
    }
    cur.expect(
        NodeKind::Semicolon,
        codes::MISSING_SEMICOLON,
        "enum type without ';'",
    )?;
    cur.finish()?;

    let Some(alias) = alias else {
        return Ok(Walked::Skipped(Diagnostic::warn(
            codes::EMPTY_ENUM,
            "skip empty enum type without type identifier",
            Some(node.span),
        )));
    };
    finish_construct(node, alias.text(), list, true)
}

/// `enum Tag { list? } [declarators] ;`
fn walk_enum_def<'a>(node: &Node<'a>) -> Result<Walked<'a>, Error> {
    trace!("walking {}", node.describe());
    let mut cur = Cursor::new(node);

    let Some(tag) = cur.eat(NodeKind::Identifier) else {
        return Ok(Walked::Skipped(Diagnostic::warn(
            codes::UNNAMED_ENUM,
            format!("skip enum def without name <{}>", node.describe()),
            Some(node.span),
        )));
    };
    cur.expect(
        NodeKind::BraceOpen,
        codes::MISSING_OPEN_BRACE,
        "enum def without '{'",
    )?;
    let list = cur.eat(NodeKind::EnumList);
    cur.expect(
        NodeKind::BraceClose,
        codes::MISSING_CLOSE_BRACE,
        "enum def without '}'",
    )?;
    if let Some(var) = cur.eat(NodeKind::Identifier) {
        debug!("enum {} declares variable '{}'", tag.text(), var.text());
    }
    if let Some(tail) = cur.eat(NodeKind::DeclaratorTail) {
        debug!("enum {} declares '{}'", tag.text(), tail.text());
    }
    cur.expect(
        NodeKind::Semicolon,
        codes::MISSING_SEMICOLON,
        "enum def without ';'",
    )?;
    cur.finish()?;

    finish_construct(node, tag.text(), list, false)
}

fn finish_construct<'a>(
    node: &Node<'a>,
    name: &str,
    list: Option<&Node<'a>>,
    is_typedef: bool,
) -> Result<Walked<'a>, Error> {
    let Some(list) = list else {
        return Ok(Walked::Skipped(Diagnostic::warn(
            codes::EMPTY_ENUM,
            format!("skip empty enum list of '{name}'"),
            Some(node.span),
        )));
    };
    let decls = member_decls(list)?;
    let resolved = ResolvedEnum {
        name: name.to_string(),
        members: resolve(&decls),
        is_typedef,
    };
    debug!(
        "resolved {} '{}' with {} members",
        if is_typedef { "enum type" } else { "enum def" },
        resolved.name,
        resolved.members.len()
    );
    Ok(Walked::Enum {
        resolved,
        source: node.text(),
    })
}

/// Collect `(name, literal?)` pairs from an `enum_list` node.
fn member_decls<'a>(list: &Node<'a>) -> Result<Vec<MemberDecl<'a>>, Error> {
    let mut decls = Vec::new();
    for child in &list.children {
        match child.kind {
            NodeKind::EnumValue => decls.push(member_decl(child)?),
            NodeKind::Comma => {}
            _ => {
                return Err(Error::structure(
                    codes::UNEXPECTED_NODE,
                    "unexpected node in enum list",
                    child,
                ));
            }
        }
    }
    Ok(decls)
}

/// `identifier (EQ integer)?`
fn member_decl<'a>(value: &Node<'a>) -> Result<MemberDecl<'a>, Error> {
    let mut cur = Cursor::new(value);
    let name = cur.expect(
        NodeKind::Identifier,
        codes::MEMBER_WITHOUT_NAME,
        "enum item without a name",
    )?;
    let assign = cur.eat(NodeKind::Assign);
    let literal = match (assign, cur.eat(NodeKind::Integer)) {
        (_, Some(lit)) => Some(lit.text()),
        (Some(eq), None) => {
            return Err(Error::structure(
                codes::MISSING_MEMBER_VALUE,
                format!("enum item '{}' without value after '='", name.text()),
                eq,
            ));
        }
        (None, None) => None,
    };
    cur.finish()?;
    trace!("member {} = {:?}", name.text(), literal);
    Ok(MemberDecl {
        name: name.text(),
        literal,
    })
}

/// Sequential reader over a node's children. Keyword nodes carry no
/// information for the walker and are skipped.
struct Cursor<'n, 'a> {
    parent: &'n Node<'a>,
    children: std::iter::Peekable<std::slice::Iter<'n, Node<'a>>>,
}

impl<'n, 'a> Cursor<'n, 'a> {
    fn new(parent: &'n Node<'a>) -> Self {
        let mut cursor = Self {
            parent,
            children: parent.children.iter().peekable(),
        };
        while cursor.children.next_if(|n| n.kind == NodeKind::Keyword).is_some() {}
        cursor
    }

    /// Consume the next child if it has `kind`.
    fn eat(&mut self, kind: NodeKind) -> Option<&'n Node<'a>> {
        self.children.next_if(|n| n.kind == kind)
    }

    /// Consume the next child, which must have `kind`.
    fn expect(
        &mut self,
        kind: NodeKind,
        code: &'static str,
        message: &str,
    ) -> Result<&'n Node<'a>, Error> {
        if let Some(node) = self.eat(kind) {
            return Ok(node);
        }
        Err(self.mismatch(code, message, kind))
    }

    /// All children must have been consumed.
    fn finish(&mut self) -> Result<(), Error> {
        match self.children.peek() {
            None => Ok(()),
            Some(node) => Err(Error::structure(
                codes::UNEXPECTED_NODE,
                format!("unexpected trailing '{}'", node.rule),
                node,
            )),
        }
    }

    fn mismatch(&mut self, code: &'static str, message: &str, kind: NodeKind) -> Error {
        match self.children.peek() {
            Some(found) => Error::structure(
                code,
                format!("{message}: expected {}, found '{}'", kind.expected_text(), found.rule),
                found,
            ),
            // Ran out of children: point at the end of the construct.
            None => {
                let end = self.parent.span.end;
                let mut err = Error::structure(code, message, self.parent);
                if let Error::Structure { span, .. } = &mut err {
                    *span = Span::empty(end);
                }
                err
            }
        }
    }
}
