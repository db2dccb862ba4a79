//! Classical Tagger Rules
//!
//! Style-guide validation for releases. Each rule is a pure function from a
//! [`RuleContext`] to a list of leveled [`Issue`](classical_core::Issue)s; the
//! [`RuleEngine`] runs the full catalog and wraps the result in a [`Report`].
//!
//! | id | scope | level |
//! |----|-------|-------|
//! | `2.3.2` | directory | warning |
//! | `2.3.3` | directory | error / warning |
//! | `2.3.8` | track | error |
//! | `2.3.12` | directory | error |
//! | `2.3.13` | track | error |
//! | `2.3.14` | track | info |
//! | `2.3.16.4` | album | error |
//! | `2.3.20` | directory | error |
//! | `enc.album` | album | error |
//! | `enc.track` | track | error |
//! | `ed.catalog` | album | warning |
//! | `ed.missing` | album | warning |
//! | `cls.folder` | directory | warning |
//! | `album.empty` | album | error |
//! | `trk.artists` | album | error |
//!
//! The engine never fails: unrepresentable input shows up as issues.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod engine;
pub mod report;
pub mod rule;
pub mod rules;

pub use engine::RuleEngine;
pub use report::Report;
pub use rule::{Rule, RuleContext};
pub use rules::encoding_problem;
