use std::fmt;
use std::path::PathBuf;

/// Full text of a grammar file, as read from disk.
#[derive(Debug, Clone)]
pub struct GrammarSource {
    pub path: PathBuf,
    pub text: String,
}

/// The regions of `grammar.js` that declare tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockKind {
    /// `function tokens() { ... };`
    Tokens,
    /// `module.exports = grammar({ ... });`
    Grammar,
}

impl BlockKind {
    pub fn start_marker(self) -> &'static str {
        match self {
            BlockKind::Tokens => "function tokens() {",
            BlockKind::Grammar => "module.exports = grammar({",
        }
    }

    pub fn end_marker(self) -> &'static str {
        match self {
            BlockKind::Tokens => "};",
            BlockKind::Grammar => "});",
        }
    }
}

impl fmt::Display for BlockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BlockKind::Tokens => f.write_str("tokens"),
            BlockKind::Grammar => f.write_str("grammar"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Block {
    pub kind: BlockKind,
    pub text: String,
}

/// Token names in first-seen order. Duplicates are kept.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenList {
    names: Vec<String>,
}

impl TokenList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, name: impl Into<String>) {
        self.names.push(name.into());
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.names
    }
}

impl Extend<String> for TokenList {
    fn extend<I: IntoIterator<Item = String>>(&mut self, iter: I) {
        self.names.extend(iter);
    }
}

impl<S: Into<String>> FromIterator<S> for TokenList {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            names: iter.into_iter().map(Into::into).collect(),
        }
    }
}

/// What to do with tree-sitter's hidden rules (names starting with `_`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HiddenRules {
    #[default]
    Keep,
    Skip,
}

/// Presets matching the successive versions of the generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Profile {
    /// Grammar rules only, bare enum.
    Minimal,
    /// Tokens and grammar rules, extra literal tokens, fallback variant and helpers.
    #[default]
    Full,
}

pub const DEFAULT_EXTRA_TOKENS: &[&str] = &["literal_string", "inline_token"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Blocks to scan, in output order.
    pub blocks: Vec<BlockKind>,
    /// Names appended after everything scanned from the blocks.
    pub extra_tokens: Vec<String>,
    pub enum_name: String,
    /// Variant carrying token text outside the known set.
    pub fallback: Option<String>,
    /// Emit `as_str`/`from_name` plus the `Display` and `From<&str>` impls.
    pub helpers: bool,
    pub hidden_rules: HiddenRules,
}

impl Config {
    pub fn from_profile(profile: Profile) -> Self {
        match profile {
            Profile::Minimal => Self {
                blocks: vec![BlockKind::Grammar],
                extra_tokens: Vec::new(),
                enum_name: "Token".to_owned(),
                fallback: None,
                helpers: false,
                hidden_rules: HiddenRules::Keep,
            },
            Profile::Full => Self {
                blocks: vec![BlockKind::Tokens, BlockKind::Grammar],
                extra_tokens: DEFAULT_EXTRA_TOKENS.iter().map(|s| s.to_string()).collect(),
                enum_name: "Token".to_owned(),
                fallback: Some("Other".to_owned()),
                helpers: true,
                hidden_rules: HiddenRules::Keep,
            },
        }
    }

    pub fn with_enum_name(mut self, name: impl Into<String>) -> Self {
        self.enum_name = name.into();
        self
    }

    pub fn with_fallback(mut self, fallback: Option<String>) -> Self {
        self.fallback = fallback;
        self
    }

    pub fn with_extra_tokens<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extra_tokens.extend(names.into_iter().map(Into::into));
        self
    }

    pub fn with_helpers(mut self, helpers: bool) -> Self {
        self.helpers = helpers;
        self
    }

    pub fn with_hidden_rules(mut self, hidden_rules: HiddenRules) -> Self {
        self.hidden_rules = hidden_rules;
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_profile(Profile::default())
    }
}
