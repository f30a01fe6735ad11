//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! registry.rs  → debug: handler registered / already registered
//! source.rs    → debug: attribute ignored
//! proxy.rs     → debug: field installed / updated, warn: write rejected
//! loader       → info: module loaded, warn: module load failed
//!     → whatever subscriber the host installed (logging.rs for ours)
//! ```

pub mod logging;

pub use logging::init_logging;
