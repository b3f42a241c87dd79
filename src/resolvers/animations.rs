use crate::config::layout;
use crate::content::{read_text, DataCache};
use crate::resolvers::{Mark, ANIMATION_SOURCE};
use regex::Regex;
use serde_json::Value;
use std::collections::BTreeSet;
use tracing::{debug, warn};

/// One entry of an animation record's sound-timing list.
///
/// The database stores these in heterogeneous shapes: an object carrying a
/// nested sound-effect name, a bare scalar name, or a nested list of further
/// entries. Anything else is an explicit Unknown and is skipped with a log
/// line instead of silently falling through.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SoundTiming {
    Direct(String),
    Nested(Vec<SoundTiming>),
    Unknown,
}

impl SoundTiming {
    /// Classify one raw sound-timing value
    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::String(name) => SoundTiming::Direct(name.clone()),
            Value::Object(_) => match value
                .get("se")
                .and_then(|se| se.get("name"))
                .and_then(Value::as_str)
            {
                Some(name) => SoundTiming::Direct(name.to_string()),
                None => SoundTiming::Unknown,
            },
            Value::Array(items) => {
                SoundTiming::Nested(items.iter().map(SoundTiming::from_value).collect())
            }
            _ => SoundTiming::Unknown,
        }
    }

    /// Collect every sound name reachable through this entry
    pub fn collect_names(&self, out: &mut BTreeSet<String>) {
        match self {
            SoundTiming::Direct(name) => {
                if !name.is_empty() {
                    out.insert(name.clone());
                }
            }
            SoundTiming::Nested(entries) => {
                for entry in entries {
                    entry.collect_names(out);
                }
            }
            SoundTiming::Unknown => {
                warn!("Unrecognized sound timing shape, skipping");
            }
        }
    }
}

/// Resolver joining collected animation ids against the animation database
/// to mark effect containers and their sound effects as used
pub struct AnimationResolver<'a> {
    root: &'a str,
    manifest_patterns: Vec<Regex>,
}

impl<'a> AnimationResolver<'a> {
    pub fn new(root: &'a str) -> Self {
        // Plugin parameter keys whose serialized value carries a default
        // animation id: the key name, five separator characters, then the id
        let manifest_patterns = [
            r"AttackAnimation:num.{5}(\d+)",
            r"CastCertain:num.{5}(\d+)",
            r"CastPhysical:num.{5}(\d+)",
            r"CastMagical:num.{5}(\d+)",
            r"ReflectAnimation:num.{5}(\d+)",
        ]
        .iter()
        .map(|p| Regex::new(p).unwrap())
        .collect();

        Self {
            root,
            manifest_patterns,
        }
    }

    /// Scan every structured-data code file for animationId values, at any
    /// nesting depth, excluding the normal-attack sentinel
    pub fn collect_database_ids(
        &self,
        cache: &mut DataCache,
        code_files: &[String],
    ) -> BTreeSet<i64> {
        let mut ids = BTreeSet::new();
        for path in code_files {
            if !path.ends_with(".json") {
                continue;
            }
            if let Some(value) = cache.load(path) {
                collect_animation_ids(value, &mut ids);
            }
        }
        debug!("Collected {} animation ids from database files", ids.len());
        ids
    }

    /// Recover default animation ids a plugin may declare in the manifest,
    /// outside the database
    pub fn collect_manifest_ids(&self) -> BTreeSet<i64> {
        let manifest = format!("{}/{}/{}", self.root, layout::JS_DIR, layout::PLUGIN_MANIFEST);
        let mut ids = BTreeSet::new();

        let content = match read_text(&manifest) {
            Ok(content) => content,
            Err(e) => {
                warn!("Error reading {}: {}", manifest, e);
                return ids;
            }
        };

        for pattern in &self.manifest_patterns {
            for cap in pattern.captures_iter(&content) {
                if let Ok(id) = cap[1].parse::<i64>() {
                    ids.insert(id);
                }
            }
        }
        debug!("Collected {} animation ids from plugin manifest", ids.len());
        ids
    }

    /// Join collected ids against the animation database.
    ///
    /// Each id with a matching record marks its effect container used; the
    /// record's sound timings mark the corresponding audio files used. An id
    /// with no record is a warning, not an error.
    pub fn resolve(&self, cache: &mut DataCache, ids: &BTreeSet<i64>) -> Vec<Mark> {
        let db = format!("{}/{}/{}", self.root, layout::DATA_DIR, layout::ANIMATIONS_DB);
        let records: Vec<Value> = match cache.load(&db).and_then(Value::as_array) {
            Some(records) => records.clone(),
            None => {
                warn!("Animation database unavailable at {}", db);
                return Vec::new();
            }
        };

        // (effectName, id) lookup across all non-null records
        let lookup: Vec<(String, i64)> = records
            .iter()
            .filter_map(|record| {
                let name = record.get("effectName")?.as_str()?;
                let id = record.get("id")?.as_i64()?;
                Some((name.to_string(), id))
            })
            .collect();

        let mut marks = Vec::new();
        for &id in ids {
            let record = records
                .iter()
                .find(|r| r.get("id").and_then(Value::as_i64) == Some(id));
            let record = match record {
                Some(record) => record,
                None => {
                    warn!("Animation with ID {} not found", id);
                    continue;
                }
            };

            for (effect_name, effect_id) in &lookup {
                if *effect_id != id {
                    continue;
                }
                marks.push(Mark::new(
                    format!(
                        "{}/{}/{}.{}",
                        self.root,
                        layout::EFFECTS_DIR,
                        effect_name,
                        layout::CONTAINER_EXT
                    ),
                    ANIMATION_SOURCE,
                ));

                let mut sound_names = BTreeSet::new();
                if let Some(timings) = record.get("soundTimings").and_then(Value::as_array) {
                    for timing in timings {
                        SoundTiming::from_value(timing).collect_names(&mut sound_names);
                    }
                }
                for name in sound_names {
                    marks.push(Mark::new(
                        format!("{}/{}/{}.ogg", self.root, layout::AUDIO_SE_DIR, name),
                        ANIMATION_SOURCE,
                    ));
                }
                break;
            }
        }
        marks
    }
}

/// Recursively collect positive animationId values over objects and arrays
fn collect_animation_ids(value: &Value, out: &mut BTreeSet<i64>) {
    match value {
        Value::Object(map) => {
            for (key, nested) in map {
                if key == "animationId" {
                    // -1 is the normal-attack sentinel, 0 is an empty slot
                    if let Some(id) = nested.as_i64() {
                        if id > 0 {
                            out.insert(id);
                        }
                    }
                }
                collect_animation_ids(nested, out);
            }
        }
        Value::Array(items) => {
            for item in items {
                collect_animation_ids(item, out);
            }
        }
        _ => {}
    }
}
