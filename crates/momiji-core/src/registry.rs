//! Per file source registry
//!
//! [`SourceRegistry`] owns one semantic tree per file path together with
//! the parse result it was translated from. Registering source text (or
//! loading it from disk) parses it immediately; analysis, expansion and
//! rendering then go through the registry, so every consumer of a path
//! works on the same tree instance.
//!
//! Replacing a file's source text resets its tree to the pristine
//! unexpanded state: existing structure, caches and origins all refer to
//! the old text and are dropped wholesale rather than patched.

use std::fs;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;

use crate::Result;
use crate::ast::Node;
use crate::error::MomijiError;
use crate::parser::{ParsedSource, SourceLanguage, SourceParser};
use crate::translate::{Translator, TranslatorConfig};

struct SourceEntry {
    source: Option<ParsedSource>,
    root: Node,
}

impl SourceEntry {
    fn new() -> Self {
        Self {
            source: None,
            root: Node::source_root(),
        }
    }
}

/// Registry of per file syntax trees, keyed by path
pub struct SourceRegistry {
    files: IndexMap<PathBuf, SourceEntry>,
    config: TranslatorConfig,
    language: SourceLanguage,
}

impl Default for SourceRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl SourceRegistry {
    pub fn new() -> Self {
        Self {
            files: IndexMap::new(),
            config: TranslatorConfig::default(),
            language: SourceLanguage::default(),
        }
    }

    /// Registry whose analyses run with `config`
    pub fn with_config(mut self, config: TranslatorConfig) -> Self {
        self.config = config;
        self
    }

    /// Registry that parses sources as `language`
    pub fn with_language(mut self, language: SourceLanguage) -> Self {
        self.language = language;
        self
    }

    pub fn config(&self) -> TranslatorConfig {
        self.config
    }

    pub fn language(&self) -> SourceLanguage {
        self.language
    }

    /// The tree registered for `path`, creating an empty pristine one
    /// when the path is new. The returned reference is the canonical
    /// instance: resolving the same path again yields the same tree.
    pub fn resolve(&mut self, path: impl Into<PathBuf>) -> &mut Node {
        let entry = self
            .files
            .entry(path.into())
            .or_insert_with(SourceEntry::new);
        &mut entry.root
    }

    /// The tree registered for `path`, if any
    pub fn get(&self, path: impl AsRef<Path>) -> Option<&Node> {
        self.files.get(path.as_ref()).map(|entry| &entry.root)
    }

    pub fn get_mut(&mut self, path: impl AsRef<Path>) -> Option<&mut Node> {
        self.files
            .get_mut(path.as_ref())
            .map(|entry| &mut entry.root)
    }

    /// Registered source text for `path`, if any was set
    pub fn source_text(&self, path: impl AsRef<Path>) -> Option<&str> {
        self.files
            .get(path.as_ref())
            .and_then(|entry| entry.source.as_ref())
            .map(ParsedSource::text)
    }

    pub fn contains(&self, path: impl AsRef<Path>) -> bool {
        self.files.contains_key(path.as_ref())
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Registered paths in registration order
    pub fn paths(&self) -> impl Iterator<Item = &Path> {
        self.files.keys().map(PathBuf::as_path)
    }

    /// Register `text` as the source of `path`, parsing it now.
    ///
    /// The path's tree is reset to its pristine state: any previously
    /// analyzed structure referred to the old text and is dropped.
    pub fn set_source_text(
        &mut self,
        path: impl Into<PathBuf>,
        text: impl Into<String>,
    ) -> Result<()> {
        let path = path.into();
        let parsed = SourceParser::new(self.language).parse(text)?;
        tracing::debug!(
            path = %path.display(),
            bytes = parsed.text().len(),
            "registered source text"
        );
        let entry = self.files.entry(path).or_insert_with(SourceEntry::new);
        entry.source = Some(parsed);
        entry.root.reset();
        entry.root.text = None;
        entry.root.origin = None;
        Ok(())
    }

    /// Read `path` from disk and register its contents
    pub fn load(&mut self, path: impl Into<PathBuf>) -> Result<()> {
        let path = path.into();
        let text = fs::read_to_string(&path)
            .map_err(|source| MomijiError::io_error(path.clone(), source))?;
        self.set_source_text(path, text)
    }

    /// Analyze the tree registered for `path` against its source text.
    ///
    /// A pristine root is analyzed from scratch, shallowly unless
    /// `recursive`. An already analyzed root is completed instead when
    /// `recursive`, expanding any blocks that are still lazy. Fails with
    /// [`MomijiError::NullSource`] when no source text was registered.
    pub fn analyze(&mut self, path: impl AsRef<Path>, recursive: bool) -> Result<()> {
        let path = path.as_ref();
        let config = self.config;
        let Some(entry) = self.files.get_mut(path) else {
            return Err(MomijiError::null_source(path));
        };
        let SourceEntry { source, root } = entry;
        let Some(parsed) = source.as_ref() else {
            return Err(MomijiError::null_source(path));
        };
        let translator = Translator::for_parsed(parsed, config);
        if root.can_analyze() {
            tracing::debug!(path = %path.display(), recursive, "analyzing source");
            translator.analyze_source(root, recursive)
        } else if recursive {
            translator.expand_all(root)
        } else {
            Ok(())
        }
    }

    /// Expand one lazy block of `path`'s tree, chosen by `select`.
    ///
    /// The selector navigates to the block to expand; returning `None`
    /// fails the call. Expansion resolves the block's origin against the
    /// registered parse tree.
    pub fn expand<F>(&mut self, path: impl AsRef<Path>, recursive: bool, select: F) -> Result<()>
    where
        F: FnOnce(&mut Node) -> Option<&mut Node>,
    {
        let path = path.as_ref();
        let config = self.config;
        let Some(entry) = self.files.get_mut(path) else {
            return Err(MomijiError::null_source(path));
        };
        let SourceEntry { source, root } = entry;
        let Some(parsed) = source.as_ref() else {
            return Err(MomijiError::null_source(path));
        };
        let translator = Translator::for_parsed(parsed, config);
        let Some(block) = select(root) else {
            return Err(MomijiError::malformed_reference(
                "block expansion",
                "selector matched no node",
            ));
        };
        translator.expand(block, recursive)
    }

    /// Rendered text of `path`'s tree, analyzing shallowly first when the
    /// tree is still pristine
    pub fn render(&mut self, path: impl AsRef<Path>) -> Result<&str> {
        let path = path.as_ref();
        let needs_analysis = self
            .files
            .get(path)
            .is_some_and(|entry| entry.root.can_analyze() && entry.source.is_some());
        if needs_analysis {
            self.analyze(path, false)?;
        }
        let Some(entry) = self.files.get_mut(path) else {
            return Err(MomijiError::null_source(path));
        };
        Ok(entry.root.render())
    }

    /// Drop `path`'s tree and source. Returns whether it was registered.
    pub fn remove(&mut self, path: impl AsRef<Path>) -> bool {
        self.files.shift_remove(path.as_ref()).is_some()
    }
}
