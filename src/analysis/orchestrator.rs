use crate::analysis::{Provenance, UniverseSets};
use crate::config::{layout, Config};
use crate::content::{read_text, DataCache};
use crate::discovery::{normalize, FileKind, ProjectIndex};
use crate::effekseer::ContainerExtractor;
use crate::matcher::{references, SourceText};
use crate::resolvers::{AnimationResolver, PluginResolver, TilesetResolver};
use miette::{IntoDiagnostic, Result};
use rayon::prelude::*;
use std::collections::BTreeSet;
use std::path::Path;
use tracing::{debug, info, warn};

/// Running counts handed to the progress callback after bounded units of work
#[derive(Debug, Clone, Copy)]
pub struct Progress {
    /// Source files evaluated so far in the current sweep
    pub evaluated: usize,
    /// Total source files the sweep will evaluate
    pub code_files: usize,
    pub used: usize,
    pub unused: usize,
}

type ProgressFn = dyn Fn(Progress) + Send + Sync;

/// Final partition of the file universe, plus the provenance log
#[derive(Debug)]
pub struct Analysis {
    /// Every path proven reachable
    pub used: BTreeSet<String>,
    /// Unreached files, in lexicographic order
    pub unused: Vec<String>,
    /// Which source justified each inclusion
    pub provenance: Provenance,
}

/// Drives the multi-phase mark/sweep over a project directory.
///
/// Phases run in a fixed sequential order with no backtracking: seed, plugin
/// resolution, animation-id collection, tileset resolution, the generic
/// reference sweep, animation resolution, container image resolution,
/// terminal. Each phase fully completes before the next begins because later
/// phases depend on the unused set already reflecting earlier removals.
///
/// Resolution is one-pass by default: a file marked used by a late phase is
/// not fed back into the sweep. Fixpoint mode repeats the sweep and
/// container phases until no new file is marked.
pub struct Analyzer<'a> {
    config: &'a Config,
    fixpoint: bool,
    parallel: bool,
    progress: Option<Box<ProgressFn>>,
}

impl<'a> Analyzer<'a> {
    pub fn new(config: &'a Config) -> Self {
        Self {
            config,
            fixpoint: config.resolve.fixpoint,
            parallel: config.resolve.parallel,
            progress: None,
        }
    }

    /// Iterate the sweep to a fixpoint instead of the default single pass
    pub fn with_fixpoint(mut self, fixpoint: bool) -> Self {
        self.fixpoint = fixpoint;
        self
    }

    /// Scan sweep sources in parallel; marks still apply single-writer
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Install a progress callback
    pub fn with_progress(mut self, progress: Box<ProgressFn>) -> Self {
        self.progress = Some(progress);
        self
    }

    /// Run the full resolution over a project root
    pub fn analyze(&self, root: &Path) -> Result<Analysis> {
        let index = ProjectIndex::build(root, self.config).into_diagnostic()?;
        let root_key = index.root().trim_end_matches('/').to_string();
        let stats = index.stats();
        info!(
            "Cataloguing files: {} root, {} code, {} candidates",
            stats.root_files, stats.code_files, stats.candidates
        );

        // Phase 1: seed
        let mut sets = UniverseSets::new();
        for record in index.records() {
            match record.kind {
                FileKind::Root => sets.seed_root(&record.path),
                FileKind::Code => sets.seed_code(&record.path),
                FileKind::Candidate => sets.add_candidate(&record.path),
            }
        }

        // Phase 2: plugin resolution
        info!("Processing {} for used plugins", layout::PLUGIN_MANIFEST);
        let plugin_resolution = PluginResolver::new(&root_key).resolve();
        for mark in &plugin_resolution.marks {
            sets.mark_used(&mark.target, &mark.source);
        }
        for path in &plugin_resolution.code_files {
            sets.promote_code(path, crate::resolvers::SEED_SOURCE);
        }

        // Phase 3: animation-id collection (no set mutation yet)
        info!("Collecting animation ids");
        let mut cache = DataCache::new();
        let code_files: Vec<String> = sets.code_files().iter().cloned().collect();
        let animation_resolver = AnimationResolver::new(&root_key);
        let mut animation_ids = animation_resolver.collect_database_ids(&mut cache, &code_files);
        animation_ids.extend(animation_resolver.collect_manifest_ids());

        // Phase 4: tileset resolution
        info!("Processing maps for required tilesets");
        for mark in TilesetResolver::new(&root_key).resolve(&mut cache, &code_files) {
            sets.mark_used(&mark.target, &mark.source);
        }

        // Phase 5: generic reference sweep
        info!(
            "Reviewing {} code files against {} candidates",
            sets.code_files().len(),
            sets.unused().len()
        );
        self.sweep(&mut sets);

        // Phase 6: animation resolution
        info!("Checking for used animations");
        for mark in animation_resolver.resolve(&mut cache, &animation_ids) {
            sets.mark_used(&mark.target, &mark.source);
        }

        // Phase 7: container image resolution
        info!("Checking used effects for embedded images");
        let extractor = ContainerExtractor::new();
        self.resolve_container_images(&mut sets, &extractor);

        if self.fixpoint {
            loop {
                let mut newly_marked = self.sweep(&mut sets);
                newly_marked += self.resolve_container_images(&mut sets, &extractor);
                if newly_marked == 0 {
                    break;
                }
                debug!("Fixpoint iteration marked {} more files", newly_marked);
            }
        }

        // Phase 8: terminal
        let (used, unused, provenance) = sets.into_parts();
        info!("{} unused files remain", unused.len());
        Ok(Analysis {
            used,
            unused: unused.into_iter().collect(),
            provenance,
        })
    }

    /// Scan every code file against the still-unused candidate snapshot.
    ///
    /// Reads are independent per source file and may run in parallel; the
    /// resulting marks are applied through this single-writer loop so a
    /// candidate leaves the unused set exactly once and provenance never
    /// races. Locale packages drag their sidecar info file along: the
    /// sidecar carries no reference signal of its own and inherits its
    /// pair's status.
    fn sweep(&self, sets: &mut UniverseSets) -> usize {
        let code_files: Vec<String> = sets.code_files().iter().cloned().collect();
        let candidates: Vec<String> = sets.unused().iter().cloned().collect();

        let scan = |source_path: &String| -> (String, Vec<String>) {
            let text = match read_text(source_path) {
                Ok(text) => text,
                Err(e) => {
                    warn!("Error reading {}: {}", source_path, e);
                    return (source_path.clone(), Vec::new());
                }
            };
            let source = SourceText {
                path: source_path,
                text: &text,
                container_names: None,
            };
            let matched = candidates
                .iter()
                .filter(|candidate| references(&source, candidate))
                .cloned()
                .collect();
            (source_path.clone(), matched)
        };

        let results: Vec<(String, Vec<String>)> = if self.parallel {
            code_files.par_iter().map(scan).collect()
        } else {
            code_files.iter().map(scan).collect()
        };

        let pack_suffix = format!(".{}", layout::LOCALE_PACK_EXT);
        let mut newly_marked = 0;
        for (evaluated, (source_path, targets)) in results.into_iter().enumerate() {
            for target in targets {
                if sets.mark_used(&target, &source_path) {
                    newly_marked += 1;
                }
                if target.ends_with(&pack_suffix) {
                    let sidecar = format!("{}{}", target, layout::LOCALE_INFO_SUFFIX);
                    if sets.mark_used(&sidecar, &source_path) {
                        newly_marked += 1;
                    }
                }
            }
            self.report_progress(evaluated + 1, code_files.len(), sets);
        }
        newly_marked
    }

    /// Carve image names out of every container already proven used and mark
    /// the matching candidates
    fn resolve_container_images(
        &self,
        sets: &mut UniverseSets,
        extractor: &ContainerExtractor,
    ) -> usize {
        let container_suffix = format!(".{}", layout::CONTAINER_EXT);
        let containers: Vec<String> = sets
            .used()
            .iter()
            .filter(|path| path.ends_with(&container_suffix))
            .cloned()
            .collect();
        let candidates: Vec<String> = sets.unused().iter().cloned().collect();

        let mut newly_marked = 0;
        for container in containers {
            let names = match extractor.extract_image_names(&container) {
                Ok(names) => names.into_iter().collect::<BTreeSet<String>>(),
                Err(e) => {
                    warn!("Error reading {}: {}", container, e);
                    continue;
                }
            };
            let source = SourceText {
                path: &container,
                text: "",
                container_names: Some(&names),
            };
            for candidate in &candidates {
                if references(&source, candidate) && sets.mark_used(candidate, &container) {
                    newly_marked += 1;
                }
            }
        }
        newly_marked
    }

    fn report_progress(&self, evaluated: usize, code_files: usize, sets: &UniverseSets) {
        if let Some(progress) = &self.progress {
            progress(Progress {
                evaluated,
                code_files,
                used: sets.used().len(),
                unused: sets.unused().len(),
            });
        }
    }
}
