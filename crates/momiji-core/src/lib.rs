//! Momiji Core
//!
//! Lossless, lazily expanded syntax trees for TypeScript sources.
//! This crate provides the fundamental components for parsing sources,
//! translating parse trees into editable semantic nodes, and rendering
//! them back byte for byte.

pub mod ast;
pub mod error;
pub mod parser;
pub mod registry;
pub mod result;
pub mod translate;

// Re-export commonly used types
pub use ast::{
    BindingData, BlockData, BlockShape, DeclData, Delimiters, ExprData, HeritageData, Node,
    NodeData, Origin, StmtData, TypeData, VarKind,
};
pub use error::{ErrorKind, MomijiError};
pub use parser::{ParsedSource, SourceLanguage, SourceParser};
pub use registry::SourceRegistry;
pub use result::{Result, ResultExt};
pub use translate::{TranslationMode, Translator, TranslatorConfig};

/// Initialize the tracing subscriber for logging
pub fn init_tracing() {
    use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("momiji=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .with_file(true)
                .with_line_number(true),
        )
        .init();
}

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
