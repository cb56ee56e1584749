//! Completion result value types (§4.9).

use scriptls_symbols::SymbolKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletionItemKind {
    Class,
    Interface,
    Trait,
    Function,
    Method,
    Constructor,
    Property,
    ClassConstant,
    Constant,
    Variable,
    Keyword,
}

impl From<SymbolKind> for CompletionItemKind {
    fn from(kind: SymbolKind) -> Self {
        match kind {
            SymbolKind::Class => CompletionItemKind::Class,
            SymbolKind::Interface => CompletionItemKind::Interface,
            SymbolKind::Trait => CompletionItemKind::Trait,
            SymbolKind::Function => CompletionItemKind::Function,
            SymbolKind::Method => CompletionItemKind::Method,
            SymbolKind::Constructor => CompletionItemKind::Constructor,
            SymbolKind::Property => CompletionItemKind::Property,
            SymbolKind::ClassConstant => CompletionItemKind::ClassConstant,
            SymbolKind::Constant => CompletionItemKind::Constant,
            SymbolKind::Variable | SymbolKind::Parameter => CompletionItemKind::Variable,
            SymbolKind::Namespace | SymbolKind::File => CompletionItemKind::Keyword,
        }
    }
}

/// A byte-range replacement to apply alongside the primary completion,
/// e.g. a new `use` declaration inserted at the top of the namespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextEdit {
    pub span: scriptls_position::ByteSpan,
    pub new_text: String,
}

/// Whether an inserted snippet should trigger the editor's parameter-hint
/// UI once the insertion lands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Command {
    #[default]
    None,
    TriggerParameterHints,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionItem {
    pub kind: CompletionItemKind,
    pub label: String,
    pub detail: Option<String>,
    pub documentation: Option<String>,
    pub insert_text: String,
    pub is_snippet: bool,
    pub command: Command,
    pub additional_text_edits: Vec<TextEdit>,
}

impl CompletionItem {
    pub fn new(kind: CompletionItemKind, label: impl Into<String>, insert_text: impl Into<String>) -> Self {
        Self {
            kind,
            label: label.into(),
            detail: None,
            documentation: None,
            insert_text: insert_text.into(),
            is_snippet: false,
            command: Command::None,
            additional_text_edits: Vec::new(),
        }
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    pub fn with_documentation(mut self, doc: impl Into<String>) -> Self {
        self.documentation = Some(doc.into());
        self
    }

    pub fn as_snippet(mut self, command: Command) -> Self {
        self.is_snippet = true;
        self.command = command;
        self
    }

    pub fn with_additional_edit(mut self, edit: TextEdit) -> Self {
        self.additional_text_edits.push(edit);
        self
    }
}

/// `provideCompletions`'s result shape (§6).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompletionResult {
    pub items: Vec<CompletionItem>,
    pub is_incomplete: bool,
}
