use std::io::Write;

use serde::Serialize;

/// How snapshots are written after each command.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Format {
    Text,
    Json,
}

pub(crate) fn write_json<W: Write, T: Serialize>(out: &mut W, value: &T) -> anyhow::Result<()> {
    serde_json::to_writer(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}

/// Hands out one seed per game: consecutive values from a forced start, random otherwise.
#[derive(Clone, Debug)]
pub(crate) struct Seeds {
    next: Option<u64>,
}

impl Seeds {
    pub(crate) fn new(start: Option<u64>) -> Self {
        Self { next: start }
    }

    pub(crate) fn next_seed(&mut self) -> u64 {
        match self.next {
            Some(seed) => {
                self.next = Some(seed.wrapping_add(1));
                seed
            }
            None => rand::random(),
        }
    }
}

/// Splits a command line into lowercase words.
pub(crate) fn words(line: &str) -> Vec<String> {
    line.split_whitespace()
        .map(|word| word.to_ascii_lowercase())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forced_seeds_count_up() {
        let mut seeds = Seeds::new(Some(u64::MAX));

        assert_eq!(seeds.next_seed(), u64::MAX);
        assert_eq!(seeds.next_seed(), 0);
    }

    #[test]
    fn words_are_normalized() {
        assert_eq!(words("  O 1\t2 "), vec!["o", "1", "2"]);
        assert!(words("   ").is_empty());
    }
}
