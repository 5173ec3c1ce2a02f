use crate::errors::{RespecError, Result};
use std::path::Path;
use streaming_iterator::StreamingIterator;

/// Supported source language for scanning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    JavaScript,
    TypeScript,
    Tsx,
}

impl Language {
    /// File extensions for this language.
    pub fn extensions(&self) -> &'static [&'static str] {
        match self {
            Language::JavaScript => &["js", "mjs", "cjs", "jsx"],
            Language::TypeScript => &["ts", "mts", "cts"],
            Language::Tsx => &["tsx"],
        }
    }

    /// All languages the scanner understands.
    pub fn all() -> &'static [Language] {
        &[Language::JavaScript, Language::TypeScript, Language::Tsx]
    }

    /// Detect the language from a file extension.
    pub fn from_extension(ext: &str) -> Option<Language> {
        match ext.to_lowercase().as_str() {
            "js" | "mjs" | "cjs" | "jsx" => Some(Language::JavaScript),
            "ts" | "mts" | "cts" => Some(Language::TypeScript),
            "tsx" => Some(Language::Tsx),
            _ => None,
        }
    }

    /// Detect the language from a file path's extension.
    pub fn from_path(path: &Path) -> Option<Language> {
        path.extension()
            .and_then(|e| e.to_str())
            .and_then(Language::from_extension)
    }

    /// The tree-sitter grammar for this language.
    pub fn tree_sitter_language(&self) -> tree_sitter::Language {
        match self {
            Language::JavaScript => tree_sitter_javascript::LANGUAGE.into(),
            Language::TypeScript => tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into(),
            Language::Tsx => tree_sitter_typescript::LANGUAGE_TSX.into(),
        }
    }
}

impl std::str::FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "javascript" | "js" => Ok(Language::JavaScript),
            "typescript" | "ts" => Ok(Language::TypeScript),
            "tsx" => Ok(Language::Tsx),
            _ => Err(format!("unsupported language: {s}")),
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Language::JavaScript => write!(f, "javascript"),
            Language::TypeScript => write!(f, "typescript"),
            Language::Tsx => write!(f, "tsx"),
        }
    }
}

/// Whether the source is parsed as an ES module or a classic script.
///
/// Classic scripts have no static module syntax, so finding an import or
/// re-export specifier under `Script` is reported as a parse error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SourceType {
    #[default]
    Module,
    Script,
}

impl std::str::FromStr for SourceType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "module" => Ok(SourceType::Module),
            "script" => Ok(SourceType::Script),
            _ => Err(format!("unsupported source type: {s}")),
        }
    }
}

impl std::fmt::Display for SourceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SourceType::Module => write!(f, "module"),
            SourceType::Script => write!(f, "script"),
        }
    }
}

/// Parser configuration for one scan.
#[derive(Debug, Clone, Copy)]
pub struct ScanOptions {
    pub language: Language,
    pub source_type: SourceType,
}

impl ScanOptions {
    pub fn new(language: Language) -> Self {
        Self {
            language,
            source_type: SourceType::Module,
        }
    }

    pub fn with_source_type(mut self, source_type: SourceType) -> Self {
        self.source_type = source_type;
        self
    }
}

/// A module-specifier string literal found in specifier position.
///
/// `text` is the exact byte span `[start, end)` of the original buffer,
/// including the delimiting quote characters. `line` and `column` are
/// 1-based.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLiteral {
    pub start: usize,
    pub end: usize,
    pub text: String,
    pub line: usize,
    pub column: usize,
}

/// Matches the string literal in specifier position of a static import
/// declaration (`import d from "m"`, `import "m"`) or a re-export
/// declaration (`export * from "m"`, `export { x } from "m"`). Dynamic
/// `import()` arguments are call expressions and template specifiers are
/// `template_string` nodes, so neither can match.
const SPECIFIER_QUERY: &str = r#"
(import_statement source: (string) @source)
(export_statement source: (string) @source)
"#;

/// Extract every import/re-export specifier literal from `source`.
///
/// Returns literals in source order. Fails with a parse error (carrying the
/// position of the first offending node) if the source does not parse under
/// the configured language, or if module syntax appears in a `Script`
/// source.
pub fn scan_module_specifiers(
    source: &[u8],
    options: &ScanOptions,
    file: &Path,
) -> Result<Vec<SourceLiteral>> {
    let lang = options.language.tree_sitter_language();

    let mut parser = tree_sitter::Parser::new();
    parser
        .set_language(&lang)
        .expect("failed to set scanner language");

    let tree = parser.parse(source, None).ok_or_else(|| RespecError::Parse {
        file: file.to_path_buf(),
        line: 1,
        column: 1,
        message: format!("{} parser produced no tree", options.language),
    })?;

    if let Some(node) = first_error_node(tree.root_node()) {
        let pos = node.start_position();
        let message = if node.is_missing() {
            format!("missing {}", node.kind())
        } else {
            "syntax error".to_string()
        };
        return Err(RespecError::Parse {
            file: file.to_path_buf(),
            line: pos.row + 1,
            column: pos.column + 1,
            message,
        });
    }

    let query = tree_sitter::Query::new(&lang, SPECIFIER_QUERY)
        .expect("failed to compile specifier query");

    let mut literals = Vec::new();
    let mut cursor = tree_sitter::QueryCursor::new();
    let mut matches = cursor.matches(&query, tree.root_node(), source);
    while let Some(m) = matches.next() {
        for capture in m.captures {
            let node = capture.node;
            let text = node.utf8_text(source).unwrap_or_default().to_string();
            if text.is_empty() {
                continue;
            }
            literals.push(SourceLiteral {
                start: node.start_byte(),
                end: node.end_byte(),
                text,
                line: node.start_position().row + 1,
                column: node.start_position().column + 1,
            });
        }
    }

    literals.sort_by_key(|l| l.start);

    if options.source_type == SourceType::Script {
        if let Some(first) = literals.first() {
            return Err(RespecError::Parse {
                file: file.to_path_buf(),
                line: first.line,
                column: first.column,
                message: "module syntax is not allowed in script sources".to_string(),
            });
        }
    }

    Ok(literals)
}

/// First ERROR or MISSING node in tree order, if any.
fn first_error_node(node: tree_sitter::Node) -> Option<tree_sitter::Node> {
    if !node.has_error() {
        return None;
    }
    if node.is_error() || node.is_missing() {
        return Some(node);
    }
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if let Some(found) = first_error_node(child) {
            return Some(found);
        }
    }
    None
}
