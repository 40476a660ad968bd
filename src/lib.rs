//! Implied relative risk aversion from a certainty equivalent.
//!
//! Given a binary lottery that pays `Wce + gain` with probability `p1` and
//! `Wce - loss` otherwise, and the statement that the decision-maker values it
//! exactly like `Wce` for sure, this crate recovers the coefficient of
//! constant relative risk aversion (Gamma) that makes the two indifferent.
//!
//! The crate offers tools to
//!
//! - validate the lottery parameters (`lottery` module),
//! - evaluate CRRA utility and the indifference objective (`utility` module),
//! - locate a sign change by doubling the search interval and refine it with
//!   Brent's method (`solver` and `solving` modules), and
//! - sample the objective for plotting and classify the result (`curve` and
//!   `classification` modules).
//!
//! # Quick start
//!
//! ```no_run
//! use crra_gamma::{GammaSolver, LotteryInput, SearchConfig};
//!
//! let lottery = LotteryInput::new(20_000.0, 0.5, 110.0, 100.0).expect("valid lottery");
//! let solver = GammaSolver::new(lottery, SearchConfig::default()).expect("valid config");
//!
//! let result = solver.solve().expect("gamma found");
//! println!("Gamma = {:.4} ({})", result.gamma, result.behavior);
//! for point in result.curve() {
//!     println!("{} {}", point.gamma, point.difference);
//! }
//! ```

pub mod classification;
pub mod curve;
pub mod error;
pub mod lottery;
pub mod options;
pub mod solver;
pub mod solving;
pub mod utility;

pub use classification::RiskBehavior;
pub use curve::{CurvePoint, UtilityCurve};
pub use error::{GammaError, Result};
pub use lottery::{LotteryInput, LotteryInputBuilder};
pub use options::{CurveOptions, SearchConfig};
pub use solver::{implied_gamma, GammaSolver, SearchSummary, SolveResult, Utilities};
pub use solving::{brent_root, RootOptions, RootSummary};
