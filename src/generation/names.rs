//! # Monster Names
//!
//! Prefix and base-name pools combined into monster display names.

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Base name used when the base-name pool is empty.
pub const FALLBACK_BASE_NAME: &str = "creature";

/// How a prefix and base name are chosen for each new monster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NamingPolicy {
    /// Uniform draw from the frame's seeded random source
    #[default]
    Random,
    /// Walks every prefix for a base name before moving to the next base name
    RoundRobin,
}

/// The prefix and base-name pools a session spawns monsters from.
///
/// Both pools are ordered and free of duplicates so that seeded and round-robin
/// picks are reproducible.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NamePools {
    prefixes: Vec<String>,
    names: Vec<String>,
}

impl NamePools {
    /// Creates pools from already-split entries, cleaning them the same way
    /// [`NamePools::from_text`] does.
    pub fn new(prefixes: Vec<String>, names: Vec<String>) -> Self {
        Self {
            prefixes: clean_entries(prefixes),
            names: clean_entries(names),
        }
    }

    /// Builds pools from the raw contents of the prefix and name files.
    ///
    /// # Examples
    ///
    /// ```
    /// use ticktale::NamePools;
    ///
    /// let pools = NamePools::from_text("Grim\r\nVile\r\n\r\nGrim\r\n", "Rat\n");
    /// assert_eq!(pools.prefixes(), &["Grim".to_string(), "Vile".to_string()]);
    /// assert_eq!(pools.names(), &["Rat".to_string()]);
    /// ```
    pub fn from_text(prefix_text: &str, name_text: &str) -> Self {
        Self::new(split_pool(prefix_text), split_pool(name_text))
    }

    pub fn prefixes(&self) -> &[String] {
        &self.prefixes
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Picks a display name.
    ///
    /// An empty prefix pool yields the bare base name; an empty base-name pool
    /// falls back to [`FALLBACK_BASE_NAME`].
    pub fn pick_name<R: Rng + ?Sized>(
        &self,
        policy: NamingPolicy,
        rng: &mut R,
        spawn_index: u64,
    ) -> String {
        let (prefix, base) = match policy {
            NamingPolicy::Random => (
                pick_random(&self.prefixes, rng),
                pick_random(&self.names, rng),
            ),
            NamingPolicy::RoundRobin => {
                let prefix_count = self.prefixes.len().max(1) as u64;
                (
                    pick_nth(&self.prefixes, spawn_index),
                    pick_nth(&self.names, spawn_index / prefix_count),
                )
            }
        };

        let base = base.unwrap_or(FALLBACK_BASE_NAME);
        match prefix {
            Some(prefix) => format!("{} {}", prefix, base),
            None => base.to_string(),
        }
    }
}

fn pick_random<'a, R: Rng + ?Sized>(pool: &'a [String], rng: &mut R) -> Option<&'a str> {
    if pool.is_empty() {
        return None;
    }
    Some(pool[rng.gen_range(0..pool.len())].as_str())
}

fn pick_nth(pool: &[String], index: u64) -> Option<&str> {
    if pool.is_empty() {
        return None;
    }
    pool.get((index % pool.len() as u64) as usize)
        .map(String::as_str)
}

/// Splits a pool file into entries, normalizing line endings.
fn split_pool(text: &str) -> Vec<String> {
    text.replace('\r', "")
        .split('\n')
        .map(str::to_string)
        .collect()
}

/// Trims entries, drops blanks and keeps the first of any duplicates.
fn clean_entries(entries: Vec<String>) -> Vec<String> {
    let mut cleaned: Vec<String> = Vec::with_capacity(entries.len());
    for entry in entries {
        let entry = entry.trim();
        if !entry.is_empty() && !cleaned.iter().any(|seen| seen == entry) {
            cleaned.push(entry.to_string());
        }
    }
    cleaned
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    fn pools() -> NamePools {
        NamePools::from_text("Grim\nVile\nAncient", "Rat\nGoblin")
    }

    #[test]
    fn test_from_text_cleans_entries() {
        let pools = NamePools::from_text("  Grim \r\n\r\nVile\r\nGrim\n", "");
        assert_eq!(pools.prefixes(), &["Grim".to_string(), "Vile".to_string()]);
        assert!(pools.names().is_empty());
    }

    #[test]
    fn test_random_pick_is_seeded() {
        let pools = pools();
        let first: Vec<String> = {
            let mut rng = StdRng::seed_from_u64(42);
            (0..10).map(|i| pools.pick_name(NamingPolicy::Random, &mut rng, i)).collect()
        };
        let second: Vec<String> = {
            let mut rng = StdRng::seed_from_u64(42);
            (0..10).map(|i| pools.pick_name(NamingPolicy::Random, &mut rng, i)).collect()
        };
        assert_eq!(first, second);
    }

    #[test]
    fn test_round_robin_covers_every_pair() {
        let pools = pools();
        let mut rng = StdRng::seed_from_u64(0);
        let mut names: Vec<String> = (0..6)
            .map(|i| pools.pick_name(NamingPolicy::RoundRobin, &mut rng, i))
            .collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), 6);
    }

    #[test]
    fn test_empty_pools_fall_back() {
        let mut rng = StdRng::seed_from_u64(0);
        let no_prefixes = NamePools::from_text("", "Rat");
        assert_eq!(no_prefixes.pick_name(NamingPolicy::Random, &mut rng, 0), "Rat");

        let no_names = NamePools::from_text("Grim", "");
        assert_eq!(
            no_names.pick_name(NamingPolicy::RoundRobin, &mut rng, 3),
            "Grim creature"
        );

        let empty = NamePools::default();
        assert_eq!(empty.pick_name(NamingPolicy::Random, &mut rng, 0), "creature");
    }
}
