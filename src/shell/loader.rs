//! # Loader
//!
//! Reads the map and name-pool files a session starts from.

use crate::game::{GameMap, MapCell, Position};
use crate::generation::NamePools;
use crate::TicktaleResult;
use log::info;
use std::path::Path;

/// Reads and parses a map file.
pub async fn load_map(path: impl AsRef<Path>) -> TicktaleResult<GameMap> {
    let path = path.as_ref();
    let text = tokio::fs::read_to_string(path).await?;
    let map = GameMap::from_text(&text)?;
    info!(
        "Loaded {}x{} map from {}",
        map.width(),
        map.height(),
        path.display()
    );
    Ok(map)
}

/// Reads the prefix and base-name files. A missing path means an empty pool.
pub async fn load_name_pools(
    prefix_path: Option<&Path>,
    name_path: Option<&Path>,
) -> TicktaleResult<NamePools> {
    let prefix_text = read_optional(prefix_path).await?;
    let name_text = read_optional(name_path).await?;
    let pools = NamePools::from_text(&prefix_text, &name_text);
    info!(
        "Loaded {} monster prefixes and {} base names",
        pools.prefixes().len(),
        pools.names().len()
    );
    Ok(pools)
}

/// Where the player starts when no position is given: the first passable cell in
/// reading order that is not a spawn point, else the first passable cell.
pub fn default_start(map: &GameMap) -> Option<Position> {
    let passable = map.passable_positions();
    passable
        .iter()
        .copied()
        .find(|&pos| map.cell_at(pos) != Some(MapCell::SpawnPoint))
        .or_else(|| passable.first().copied())
}

async fn read_optional(path: Option<&Path>) -> TicktaleResult<String> {
    match path {
        Some(path) => Ok(tokio::fs::read_to_string(path).await?),
        None => Ok(String::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::MapError;
    use crate::TicktaleError;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn temp_file(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_map_with_windows_line_endings() {
        let file = temp_file("S.#\r\n...\r\n");
        let map = tokio_test::block_on(load_map(file.path())).unwrap();
        assert_eq!(map.width(), 3);
        assert_eq!(map.height(), 2);
        assert_eq!(map.cell_at(Position::new(0, 0)), Some(MapCell::SpawnPoint));
    }

    #[test]
    fn test_load_malformed_map() {
        let file = temp_file("...\n..\n");
        let result = tokio_test::block_on(load_map(file.path()));
        assert!(matches!(
            result,
            Err(TicktaleError::MalformedMap(MapError::RaggedRow { row: 1, .. }))
        ));
    }

    #[test]
    fn test_missing_map_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = tokio_test::block_on(load_map(dir.path().join("absent.txt")));
        assert!(matches!(result, Err(TicktaleError::Io(_))));
    }

    #[test]
    fn test_load_name_pools() {
        let prefixes = temp_file("Grim\r\nVile\r\n");
        let names = temp_file("Rat\nBat\n\n");
        let pools = tokio_test::block_on(load_name_pools(
            Some(prefixes.path()),
            Some(names.path()),
        ))
        .unwrap();
        assert_eq!(pools.prefixes(), &["Grim".to_string(), "Vile".to_string()]);
        assert_eq!(pools.names(), &["Rat".to_string(), "Bat".to_string()]);

        let empty = tokio_test::block_on(load_name_pools(None, None)).unwrap();
        assert_eq!(empty, NamePools::default());
    }

    #[test]
    fn test_default_start_skips_spawn_points() {
        let map = GameMap::from_text("#S.\n...").unwrap();
        assert_eq!(default_start(&map), Some(Position::new(2, 0)));

        let burrows = GameMap::from_text("#S").unwrap();
        assert_eq!(default_start(&burrows), Some(Position::new(1, 0)));

        let solid = GameMap::from_text("##\n~#").unwrap();
        assert_eq!(default_start(&solid), None);
    }
}
