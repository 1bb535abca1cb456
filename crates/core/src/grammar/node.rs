use enumstr_diagnostics::Span;

/// Longest node text quoted by [`Node::describe`].
const DESCRIBE_TEXT_LIMIT: usize = 64;

/// The grammar rule kinds the generator consumes.
///
/// Rule names are mapped once when the tree is built, so the walker matches
/// on variants instead of comparing rule-name strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// The entry rule (`root`).
    Root,
    /// `enum Tag { ... };` (`enum_def`).
    EnumDef,
    /// `typedef enum [Tag] { ... } Alias;` (`enum_type`).
    EnumType,
    /// The member list between the braces (`enum_list`).
    EnumList,
    /// One member, optionally with `= literal` (`enum_value`).
    EnumValue,
    /// An identifier (`identifier`).
    Identifier,
    /// An integer literal (`integer`).
    Integer,
    /// `{` (`LBRACE`).
    BraceOpen,
    /// `}` (`RBRACE`).
    BraceClose,
    /// `;` (`SEMI`).
    Semicolon,
    /// `=` (`EQ`).
    Assign,
    /// `,` (`COMMA`).
    Comma,
    /// `enum` / `typedef` keywords (`kw_enum`, `kw_typedef`).
    Keyword,
    /// Further declarators after the closing brace (`decl_tail`).
    DeclaratorTail,
    /// Any rule the generator does not consume.
    Other,
}

impl NodeKind {
    /// Map a grammar rule name to its kind.
    pub fn from_rule(rule: &str) -> Self {
        match rule {
            "root" => NodeKind::Root,
            "enum_def" => NodeKind::EnumDef,
            "enum_type" => NodeKind::EnumType,
            "enum_list" => NodeKind::EnumList,
            "enum_value" => NodeKind::EnumValue,
            "identifier" => NodeKind::Identifier,
            "integer" => NodeKind::Integer,
            "LBRACE" => NodeKind::BraceOpen,
            "RBRACE" => NodeKind::BraceClose,
            "SEMI" => NodeKind::Semicolon,
            "EQ" => NodeKind::Assign,
            "COMMA" => NodeKind::Comma,
            "kw_enum" | "kw_typedef" => NodeKind::Keyword,
            "decl_tail" => NodeKind::DeclaratorTail,
            _ => NodeKind::Other,
        }
    }

    /// Human-readable token description used in structural error messages.
    pub fn expected_text(self) -> &'static str {
        match self {
            NodeKind::BraceOpen => "'{'",
            NodeKind::BraceClose => "'}'",
            NodeKind::Semicolon => "';'",
            NodeKind::Assign => "'='",
            NodeKind::Comma => "','",
            NodeKind::Identifier => "identifier",
            NodeKind::Integer => "integer literal",
            NodeKind::EnumList => "member list",
            NodeKind::EnumValue => "member",
            NodeKind::EnumDef | NodeKind::EnumType => "enum construct",
            NodeKind::Keyword => "keyword",
            NodeKind::DeclaratorTail => "declarator",
            NodeKind::Root | NodeKind::Other => "node",
        }
    }
}

/// A node of the parse tree.
///
/// Nodes are owned by the tree but borrow their text from the source
/// buffer, so a tree lives exactly as long as the text it was parsed from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node<'a> {
    /// Kind derived from the grammar rule name.
    pub kind: NodeKind,
    /// Grammar rule name as written in the grammar.
    pub rule: String,
    /// Byte span in the source.
    pub span: Span,
    /// 1-based line of the first byte.
    pub line: usize,
    /// 1-based column of the first byte.
    pub col: usize,
    /// Ordered children.
    pub children: Vec<Node<'a>>,
    text: &'a str,
}

impl<'a> Node<'a> {
    /// Create a node. `text` must be the slice of the source covered by `span`.
    pub fn new(
        kind: NodeKind,
        rule: impl Into<String>,
        text: &'a str,
        span: Span,
        (line, col): (usize, usize),
        children: Vec<Node<'a>>,
    ) -> Self {
        Self {
            kind,
            rule: rule.into(),
            span,
            line,
            col,
            children,
            text,
        }
    }

    /// The literal source text this node spans.
    pub fn text(&self) -> &'a str {
        self.text
    }

    /// Whether this node is an enum construct (`enum_def` or `enum_type`).
    pub fn is_construct(&self) -> bool {
        matches!(self.kind, NodeKind::EnumDef | NodeKind::EnumType)
    }

    /// Format the node for diagnostics:
    /// `Node 'enum_def' [ln:3 col:1] text 'enum Foo { A }'`.
    ///
    /// Long text is cut at a character boundary and suffixed with `...`;
    /// line breaks are shown as `\n`.
    pub fn describe(&self) -> String {
        let mut text: String = self.text.chars().take(DESCRIBE_TEXT_LIMIT).collect();
        if text.len() < self.text.len() {
            text.push_str("...");
        }
        format!(
            "Node '{}' [ln:{} col:{}] text '{}'",
            self.rule,
            self.line,
            self.col,
            text.replace('\n', "\\n")
        )
    }

    /// Count of nodes in this subtree, including `self`.
    pub fn size(&self) -> usize {
        1 + self.children.iter().map(Node::size).sum::<usize>()
    }
}
