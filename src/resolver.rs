use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::model::{Block, BlockKind, Config, GrammarSource, TokenList};
use crate::parser;

/// Reads grammar files relative to a base directory and turns them into token lists.
pub struct GrammarResolver {
    base_dir: PathBuf,
}

impl GrammarResolver {
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Self {
        Self {
            base_dir: base_dir.as_ref().to_path_buf(),
        }
    }

    pub fn load<P: AsRef<Path>>(&self, filename: P) -> Result<GrammarSource> {
        let path = self.base_dir.join(filename);
        let text = fs::read_to_string(&path).map_err(|source| Error::Io {
            path: path.clone(),
            source,
        })?;
        tracing::debug!(path = %path.display(), bytes = text.len(), "loaded grammar");
        Ok(GrammarSource { path, text })
    }

    /// Loads `filename` and collects the tokens of every configured block,
    /// followed by the configured extra names.
    pub fn resolve<P: AsRef<Path>>(&self, filename: P, config: &Config) -> Result<TokenList> {
        let source = self.load(filename)?;
        let blocks = config
            .blocks
            .iter()
            .map(|&kind| block(&source, kind))
            .collect::<Result<Vec<_>>>()?;
        Ok(collect_tokens(&blocks, config))
    }
}

pub fn block(source: &GrammarSource, kind: BlockKind) -> Result<Block> {
    let text = parser::extract_block(&source.text, kind)?;
    tracing::debug!(%kind, bytes = text.len(), "found block");
    Ok(Block {
        kind,
        text: text.to_owned(),
    })
}

pub fn collect_tokens(blocks: &[Block], config: &Config) -> TokenList {
    let mut tokens = TokenList::new();
    for block in blocks {
        let found = parser::extract_rule_tokens(&block.text, config.hidden_rules);
        tracing::debug!(kind = %block.kind, count = found.len(), "extracted tokens");
        tokens.extend(found.as_slice().iter().cloned());
    }
    tokens.extend(config.extra_tokens.iter().cloned());
    tokens
}
