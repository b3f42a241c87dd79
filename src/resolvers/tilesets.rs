use crate::config::layout;
use crate::content::DataCache;
use crate::discovery::file_name;
use crate::resolvers::Mark;
use serde_json::Value;
use tracing::warn;

/// Resolver joining map records against the tileset database.
///
/// Every map record declares a tilesetId; the matching tileset record lists
/// the image names that map needs, each living under img/tilesets.
pub struct TilesetResolver<'a> {
    root: &'a str,
}

impl<'a> TilesetResolver<'a> {
    pub fn new(root: &'a str) -> Self {
        Self { root }
    }

    /// Resolve tileset image marks for every map-like code file.
    ///
    /// A tilesetId with no matching record is a warning; an empty tileset
    /// name is a warning and is never joined into a path, since that would
    /// fabricate a directory-only path.
    pub fn resolve(&self, cache: &mut DataCache, code_files: &[String]) -> Vec<Mark> {
        let db = format!("{}/{}/{}", self.root, layout::DATA_DIR, layout::TILESETS_DB);
        let mut marks = Vec::new();

        for path in code_files {
            let name = file_name(path);
            if !path.ends_with(".json") || !name.contains("Map") || name.contains("MapInfo") {
                continue;
            }

            let tileset_id = match cache
                .load(path)
                .and_then(|map| map.get("tilesetId"))
                .and_then(Value::as_i64)
            {
                Some(id) => id,
                None => continue,
            };

            let tileset_names = match Self::tileset_names(cache, &db, tileset_id) {
                Some(names) => names,
                None => {
                    warn!(
                        "No tileset found with ID {} for map {}",
                        tileset_id, path
                    );
                    continue;
                }
            };

            for tileset_name in tileset_names {
                if tileset_name.is_empty() {
                    warn!("Tileset name is empty");
                    continue;
                }
                marks.push(Mark::new(
                    format!(
                        "{}/{}/{}.{}",
                        self.root,
                        layout::TILESETS_DIR,
                        tileset_name,
                        layout::IMAGE_EXT
                    ),
                    path.clone(),
                ));
            }
        }
        marks
    }

    /// Look up the declared image names of one tileset record
    fn tileset_names(cache: &mut DataCache, db: &str, tileset_id: i64) -> Option<Vec<String>> {
        let records = cache.load(db)?.as_array()?;
        let record = records
            .iter()
            .find(|r| r.get("id").and_then(Value::as_i64) == Some(tileset_id))?;
        Some(
            record
                .get("tilesetNames")
                .and_then(Value::as_array)
                .map(|names| {
                    names
                        .iter()
                        .filter_map(Value::as_str)
                        .map(str::to_string)
                        .collect()
                })
                .unwrap_or_default(),
        )
    }
}
