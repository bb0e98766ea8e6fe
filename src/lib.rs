//! # Gradeshot
//!
//! Adaptive image normalization for collectible photos bound for
//! vision-analysis APIs. Takes an arbitrary user-supplied photograph —
//! any camera format the decoders support — and produces a byte-budget
//! constrained, correctly oriented JPEG payload ready for upload.
//!
//! # Architecture: Four-Stage Pipeline
//!
//! Each image flows through four stages, each stage's output feeding the
//! next:
//!
//! ```text
//! 1. exif      bytes      →  Orientation      (camera metadata, never fails)
//! 2. rotation  metadata   →  RotationPlan     (exif + manual + auto-portrait)
//! 3. planner   plan       →  SizePlan         (swap + min/max clamp)
//! 4. encode    raster     →  EncodeResult     (scale × quality grid search)
//! ```
//!
//! The first three stages are pure functions over plain data, so pipeline
//! logic is unit-testable without decoding a single pixel. Only the encode
//! stage touches rasters.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`exif`] | Bounded-prefix EXIF orientation reader — all malformation degrades to "no rotation" |
//! | [`rotation`] | Three-term rotation resolution with the auto-portrait heuristic |
//! | [`planner`] | Rotation-aware dimension planning with floor/ceiling clamps |
//! | [`encode`] | First-fit scale × quality search with a forced-fit fallback |
//! | [`pipeline`] | Orchestration — [`pipeline::normalize`], the one public entry point |
//! | [`config`] | Contract constants as a validated, TOML-loadable config |
//! | [`output`] | CLI report formatting |
//!
//! # Design Decisions
//!
//! ## JPEG-Only Output
//!
//! Every payload is a baseline JPEG. A single output format keeps the
//! downstream vision-service request body trivial and makes payload sizes
//! predictable across heterogeneous inputs.
//!
//! ## First Success Wins
//!
//! The encode search scans a fixed priority order — largest scale first,
//! then highest quality — and returns the first combination under budget.
//! Scale is varied outermost because pixel-count reduction buys file-size
//! headroom faster than quality reduction; quality is probed innermost
//! because quality steps preserve the legibility downstream fine-detail
//! inspection needs. The grid is finite and the fallback encode is
//! unconditional, so normalization terminates in bounded time.
//!
//! ## Auto-Portrait as Policy
//!
//! Collectibles are taller than wide, so a landscape frame with no manual
//! rotation gets stood upright. That is a domain heuristic, not a law of
//! nature — it is a config flag (`auto_portrait`), and any manual rotation
//! disables it for that image.
//!
//! ## Stateless Invocations
//!
//! The pipeline holds no session or process-wide state. Each call owns its
//! intermediates and drops them on return, bounding peak memory to roughly
//! one decoded raster plus one working canvas. Concurrency and pacing
//! between images belong to the caller.

pub mod config;
pub mod encode;
pub mod exif;
pub mod output;
pub mod pipeline;
pub mod planner;
pub mod rotation;

pub use config::{ConfigError, PipelineConfig};
pub use encode::{EncodeResult, MEDIA_TYPE};
pub use exif::Orientation;
pub use pipeline::{NormalizeError, normalize};
pub use planner::SizePlan;
pub use rotation::{ManualRotation, RotationPlan};
