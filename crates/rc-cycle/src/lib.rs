//! # rc-cycle — Spin Cycle Controller for ReelCore
//!
//! Drives a session of the rc-math model through the sixteen-state spin
//! cycle: wagering, stop generation, evaluation, the presentation
//! phases, bonus hand-off and settlement.
//!
//! ## Architecture
//!
//! ```text
//! SpinCycle ── advance(math, draws, presentation)
//!     │
//!     ├── BetLedger (credits, line bet, wager guard)
//!     ├── SlotGroupModel × N (stops + evaluation, from rc-math)
//!     ├── SlotResults (pay passes of the spin under way)
//!     └── SessionStats (wagered / won / hits per session)
//!           │
//!           v
//!     Presentation (spin, bonus and award shows; host-owned)
//! ```
//!
//! One transition is considered per tick. The controller never spins a
//! thread and never sleeps; states that wait on a presentation phase
//! simply hold until the phase reports done.

pub mod bet;
pub mod controller;
pub mod error;
pub mod presentation;
pub mod stats;

pub use bet::*;
pub use controller::*;
pub use error::*;
pub use presentation::*;
pub use stats::*;
