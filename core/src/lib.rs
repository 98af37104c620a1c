//! Game logic for a 15-puzzle and a beginner minesweeper.
//!
//! Both engines are plain state machines: the caller feeds clicks in and draws whatever the returned reports and
//! snapshots describe.

pub use error::*;
pub use mines::*;
pub use puzzle::*;
pub use timer::*;
pub use types::*;

mod error;
pub mod mines;
pub mod puzzle;
mod timer;
mod types;
