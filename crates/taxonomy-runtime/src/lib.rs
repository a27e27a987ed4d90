//! # Taxonomy Runtime
//!
//! Wires the taxonomy subsystems into one engine.
//!
//! ## Modules
//!
//! - `config` - `EngineConfig`, aggregating every subsystem's configuration
//! - `engine` - `TaxonomyEngine`, the facade over hierarchy, ledger and rules
//! - `error` - `EngineError`
//! - `runtime` - `TaxonomyRuntime::bootstrap`, the startup sequence
//!
//! ## Example
//!
//! ```rust,ignore
//! use taxonomy_runtime::{EngineConfig, TaxonomyRuntime};
//!
//! let runtime = TaxonomyRuntime::bootstrap(EngineConfig::from_env())?;
//! let engine = runtime.engine();
//!
//! let audience = engine.create_term(Term::new("Audience"))?;
//! let format = engine.create_term(Term::new("Format").requires(audience.id))?;
//! let video = engine.create_term(
//!     Term::new("Video").with_parent(format.id).inherit_root_required_types(true),
//! )?;
//!
//! // Rejected: Video needs a tag from Audience.
//! assert!(engine.set_tags(&OwnerRef::new("Page", 1), &[video.id]).is_err());
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod runtime;

pub use config::{ConfigError, EngineConfig};
pub use engine::{EngineLedger, EngineTermService, InMemoryEngine, TaxonomyEngine, TermDeletion};
pub use error::{EngineError, EngineResult};
pub use runtime::TaxonomyRuntime;
