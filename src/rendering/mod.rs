//! # Rendering Module
//!
//! Text composition for everything the player reads.
//!
//! Nothing here performs I/O. Functions return strings, with `\n` separating the
//! lines of multi-line blocks; the shell decides how to print them.

pub mod describe;
pub mod narration;

pub use describe::*;
pub use narration::*;

/// Joins output lines with the line separator the core always uses.
pub fn join_lines<I, S>(lines: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    lines
        .into_iter()
        .map(|line| line.as_ref().to_string())
        .collect::<Vec<_>>()
        .join("\n")
}
