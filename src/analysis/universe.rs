use std::collections::{BTreeMap, BTreeSet};

/// Which source files justified marking each target used.
///
/// Append-only: a target's source set only ever grows. Both groupings are
/// kept so reports can pivot either way. Provenance is diagnostic output
/// only; no correctness decision reads it back.
#[derive(Debug, Clone, Default)]
pub struct Provenance {
    by_target: BTreeMap<String, BTreeSet<String>>,
    by_source: BTreeMap<String, BTreeSet<String>>,
}

impl Provenance {
    /// Record that `source` justified keeping `target`
    pub fn record(&mut self, target: &str, source: &str) {
        self.by_target
            .entry(target.to_string())
            .or_default()
            .insert(source.to_string());
        self.by_source
            .entry(source.to_string())
            .or_default()
            .insert(target.to_string());
    }

    /// Targets mapped to the sources that justified them
    pub fn by_target(&self) -> &BTreeMap<String, BTreeSet<String>> {
        &self.by_target
    }

    /// Sources mapped to the targets they justified
    pub fn by_source(&self) -> &BTreeMap<String, BTreeSet<String>> {
        &self.by_source
    }
}

/// The mutable state of one analysis run: the used/unused partition, the
/// code-file classification, and the provenance log.
///
/// Owned exclusively by the orchestrator; resolvers hand back marks for it
/// to apply. A path is in exactly one of `used`/`unused` at any time, and
/// across phases `used` only grows while `unused` only shrinks. The code set
/// is a separate classification, not partitioned against the other two: a
/// code file can itself be a referenced target.
#[derive(Debug, Default)]
pub struct UniverseSets {
    used: BTreeSet<String>,
    unused: BTreeSet<String>,
    code: BTreeSet<String>,
    provenance: Provenance,
}

impl UniverseSets {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a root-level file, which is used by definition
    pub fn seed_root(&mut self, path: &str) {
        self.used.insert(path.to_string());
        self.provenance.record(path, crate::resolvers::ROOT_SOURCE);
    }

    /// Seed a code file: used, and scanned as a reference source
    pub fn seed_code(&mut self, path: &str) {
        self.used.insert(path.to_string());
        self.code.insert(path.to_string());
        self.provenance.record(path, crate::resolvers::SEED_SOURCE);
    }

    /// Add a candidate to the initial unused set
    pub fn add_candidate(&mut self, path: &str) {
        if !self.used.contains(path) {
            self.unused.insert(path.to_string());
        }
    }

    /// Promote a path into the code set as well as the used set
    pub fn promote_code(&mut self, path: &str, source: &str) {
        self.code.insert(path.to_string());
        self.mark_used(path, source);
    }

    /// Move a target from unused to used and append provenance.
    ///
    /// Idempotent: the target leaves the unused set at most once. Returns
    /// true only when the unused set actually shrank, which is what the
    /// fixpoint mode and progress counters care about.
    pub fn mark_used(&mut self, target: &str, source: &str) -> bool {
        let newly_used = self.unused.remove(target);
        self.used.insert(target.to_string());
        self.provenance.record(target, source);
        newly_used
    }

    pub fn used(&self) -> &BTreeSet<String> {
        &self.used
    }

    pub fn unused(&self) -> &BTreeSet<String> {
        &self.unused
    }

    pub fn code_files(&self) -> &BTreeSet<String> {
        &self.code
    }

    pub fn provenance(&self) -> &Provenance {
        &self.provenance
    }

    /// Tear down into the final partition and provenance log
    pub fn into_parts(self) -> (BTreeSet<String>, BTreeSet<String>, Provenance) {
        (self.used, self.unused, self.provenance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partition_is_exclusive() {
        let mut sets = UniverseSets::new();
        sets.add_candidate("a.png");
        sets.add_candidate("b.png");
        assert_eq!(sets.unused().len(), 2);

        assert!(sets.mark_used("a.png", "main.js"));
        assert!(sets.used().contains("a.png"));
        assert!(!sets.unused().contains("a.png"));

        // Second mark is idempotent but still appends provenance
        assert!(!sets.mark_used("a.png", "plugins.js"));
        assert_eq!(
            sets.provenance().by_target()["a.png"].len(),
            2
        );
    }

    #[test]
    fn test_candidate_never_shadows_used() {
        let mut sets = UniverseSets::new();
        sets.seed_root("game.exe");
        sets.add_candidate("game.exe");
        assert!(sets.used().contains("game.exe"));
        assert!(!sets.unused().contains("game.exe"));
    }

    #[test]
    fn test_code_files_are_also_used() {
        let mut sets = UniverseSets::new();
        sets.seed_code("data/Map001.json");
        assert!(sets.used().contains("data/Map001.json"));
        assert!(sets.code_files().contains("data/Map001.json"));
        assert!(
            sets.provenance().by_target()["data/Map001.json"].contains(".")
        );
    }

    #[test]
    fn test_mark_used_outside_universe_grows_used_only() {
        // Resolver-constructed paths may not exist in the candidate set
        let mut sets = UniverseSets::new();
        assert!(!sets.mark_used("audio/se/Missing.ogg", "animations"));
        assert!(sets.used().contains("audio/se/Missing.ogg"));
        assert!(sets.unused().is_empty());
    }

    #[test]
    fn test_provenance_groups_both_ways() {
        let mut prov = Provenance::default();
        prov.record("a.png", "main.js");
        prov.record("b.png", "main.js");
        prov.record("a.png", "plugins.js");

        assert_eq!(prov.by_target()["a.png"].len(), 2);
        assert_eq!(prov.by_source()["main.js"].len(), 2);
    }
}
