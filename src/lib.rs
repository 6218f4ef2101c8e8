use std::path::Path;
use proc_macro2::TokenStream;

mod codegen;    // Rust enum generator
mod error;
mod model;      // Document, blocks, token list, config
mod parser;     // Block and token line extraction
mod resolver;   // Loads grammar files

pub use codegen::render;
pub use error::{Error, Result};
pub use model::{
    Block, BlockKind, Config, GrammarSource, HiddenRules, Profile, TokenList, DEFAULT_EXTRA_TOKENS,
};
pub use parser::{extract_block, extract_tokens, TOKEN_RULE};

#[cfg(feature = "testing")]
pub mod testing;

pub struct Generator {
    resolver: resolver::GrammarResolver,
    config: Config,
}

impl Generator {
    pub fn new<P: AsRef<Path>>(base_dir: P, config: Config) -> Self {
        Self {
            resolver: resolver::GrammarResolver::new(base_dir),
            config,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Reads the grammar file and returns its tokens in output order.
    pub fn tokens<P: AsRef<Path>>(&self, grammar_file: P) -> Result<TokenList> {
        self.resolver.resolve(grammar_file, &self.config)
    }

    /// The enum and its helpers, one stream per item.
    pub fn generate<P: AsRef<Path>>(&self, grammar_file: P) -> Result<Vec<TokenStream>> {
        let tokens = self.tokens(grammar_file)?;
        codegen::generate_rust(&tokens, &self.config)
    }

    /// [`Generator::generate`] rendered to source text.
    pub fn generate_source<P: AsRef<Path>>(&self, grammar_file: P, rustfmt: bool) -> Result<String> {
        let units = self.generate(grammar_file)?;
        render(&units, rustfmt)
    }
}
