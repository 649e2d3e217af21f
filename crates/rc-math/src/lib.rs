//! # rc-math — Deterministic slot math model
//!
//! The math side of a slot game: weighted reel strips, payline and scatter
//! evaluation, pay accumulation, and the configuration documents that
//! define them. Everything is presentation-free and entropy-free; spins
//! consume injected draws, so any outcome is exactly reproducible from
//! its math document and draw sequence.
//!
//! ## Architecture
//!
//! ```text
//! MathConfig (JSON/YAML)
//!     │  build() — validates every cross reference
//!     v
//! MathModel
//!     ├── SymbolCatalog  (ids + wild-match relations)
//!     ├── Strip / StripSetDef → StripModel (weighted stops, eval order)
//!     ├── PaylineSet     (line offsets, scatter positions)
//!     ├── ComboSet / PaytableSet (awards, bonus codes)
//!     └── WeightedTable / ValueTable
//!           │
//!           v
//! SlotGroupModel::generate_stops(DrawSource)
//! SlotGroupModel::evaluate(...) → PlayResult → SlotResults
//! ```

pub mod config;
pub mod draws;
pub mod error;
pub mod group;
pub mod model;
pub mod payline;
pub mod paytable;
pub mod result;
pub mod strip;
pub mod symbol;
pub mod table;

pub use config::*;
pub use draws::*;
pub use error::*;
pub use group::*;
pub use model::*;
pub use payline::*;
pub use paytable::*;
pub use result::*;
pub use strip::*;
pub use symbol::*;
pub use table::*;
