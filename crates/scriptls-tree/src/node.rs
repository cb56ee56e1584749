//! Parse-tree node types.
//!
//! The external parser (out of core scope) hands back a forest of these
//! nodes; the core only ever reads them. A [`Token`] is a lexeme span; a
//! [`Phrase`] is an interior node with ordered children that may themselves
//! be tokens or phrases.

use scriptls_position::ByteSpan;

/// Lexeme classification. Keyword/operator/sigil text is not stored on the
/// token — a consumer that needs it slices `source[token.span()]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Identifier,
    Variable,
    DocComment,
    StringLiteral,
    NumberLiteral,
    NamespaceSeparator,
    Namespace,
    Use,
    Class,
    Interface,
    Trait,
    Function,
    Extends,
    Implements,
    InsteadOf,
    As,
    Const,
    New,
    Static,
    Abstract,
    Final,
    Public,
    Protected,
    Private,
    Readonly,
    Ampersand,
    Ellipsis,
    Arrow,
    DoubleColon,
    Equals,
    LeftParen,
    RightParen,
    LeftBrace,
    RightBrace,
    Comma,
    Semicolon,
    Dollar,
    Backslash,
    Keyword,
    Operator,
    Whitespace,
    Error,
    Eof,
}

/// A lexeme: `(kind, offset, length)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub offset: usize,
    pub length: usize,
}

impl Token {
    pub fn new(kind: TokenKind, offset: usize, length: usize) -> Self {
        Self { kind, offset, length }
    }

    pub fn span(&self) -> ByteSpan {
        ByteSpan::new(self.offset, self.offset + self.length)
    }

    pub fn text<'a>(&self, source: &'a str) -> &'a str {
        self.span().try_slice(source).unwrap_or("")
    }
}

/// Interior phrase classification. This is the vocabulary the symbol
/// extractor and completion strategies pattern-match on; it names the
/// productions of an object-oriented, namespaced, dynamically typed
/// scripting grammar (classes, interfaces, traits, namespaces with
/// imports, doc-comment-declared magic members) without committing to any
/// concrete tokenizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PhraseKind {
    SourceFile,
    ErrorNode,

    NamespaceDefinition,
    NamespaceUseDeclaration,
    NamespaceUseGroupClause,
    NamespaceUseClause,
    QualifiedName,
    RelativeQualifiedName,
    FullyQualifiedName,
    NamePart,

    ClassDeclaration,
    InterfaceDeclaration,
    TraitDeclaration,
    ClassBaseClause,
    ClassInterfaceClause,
    TraitUseClause,
    TraitUseAdaptation,
    ClassMembers,
    AnonymousClassDeclaration,

    MethodDeclaration,
    MethodDeclarationHeader,
    FunctionDeclaration,
    AnonymousFunctionCreationExpression,
    ParameterDeclarationList,
    ParameterDeclaration,
    TypeDeclaration,

    PropertyDeclaration,
    PropertyElement,
    ClassConstDeclaration,
    ClassConstElement,
    ConstDeclaration,
    ConstElement,

    SimpleVariable,
    AssignmentExpression,
    ForeachStatement,
    ListIntrinsic,

    ScopedPropertyAccessExpression,
    ScopedCallExpression,
    PropertyAccessExpression,
    MethodCallExpression,
    ObjectCreationExpression,
    SubscriptExpression,
    FunctionCallExpression,
    ArgumentExpressionList,
    CompoundStatement,
}

/// A node of the parse forest: a lexeme or an interior production.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Token(Token),
    Phrase(Phrase),
}

/// `(kind, children[])`, each child a [`Node::Token`] or [`Node::Phrase`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Phrase {
    pub kind: PhraseKind,
    pub children: Vec<Node>,
}

impl Node {
    pub fn phrase(kind: PhraseKind, children: Vec<Node>) -> Self {
        Node::Phrase(Phrase { kind, children })
    }

    pub fn token(kind: TokenKind, offset: usize, length: usize) -> Self {
        Node::Token(Token::new(kind, offset, length))
    }

    pub fn children(&self) -> &[Node] {
        match self {
            Node::Token(_) => &[],
            Node::Phrase(p) => &p.children,
        }
    }

    pub fn phrase_kind(&self) -> Option<PhraseKind> {
        match self {
            Node::Phrase(p) => Some(p.kind),
            Node::Token(_) => None,
        }
    }

    pub fn token_kind(&self) -> Option<TokenKind> {
        match self {
            Node::Token(t) => Some(t.kind),
            Node::Phrase(_) => None,
        }
    }

    /// The byte span covering every descendant token, or an empty span at 0
    /// for a childless phrase (should not occur in a well-formed tree).
    pub fn span(&self) -> ByteSpan {
        match self {
            Node::Token(t) => t.span(),
            Node::Phrase(p) => {
                let mut iter = p.children.iter().map(Node::span);
                match iter.next() {
                    Some(first) => iter.fold(first, |acc, s| acc.union(s)),
                    None => ByteSpan::empty(0),
                }
            }
        }
    }

    pub fn text<'a>(&self, source: &'a str) -> &'a str {
        self.span().try_slice(source).unwrap_or("")
    }
}
