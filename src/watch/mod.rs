//! Watch mode.
//!
//! Re-assembles the bundler configuration whenever something under the
//! page root or the config file changes.
//!
//! ```text
//! notify ─► Debouncer (300ms) ─► reload pagepack.toml? ─► assemble ─► emit ─► swap
//! ```
//!
//! Every rebuild produces a fresh [`BundlerConfig`]. It replaces the current
//! one only after assembly and emission both succeed, so a broken template
//! glob or a typo in `pagepack.toml` leaves the last good output in place.

mod debouncer;

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use arc_swap::ArcSwapOption;
use crossbeam::channel::{self, Receiver};
use notify::{RecommendedWatcher, RecursiveMode, Watcher};
use rustc_hash::FxHashMap;

use crate::bundle::{BundlerConfig, Plugin};
use crate::cli::EmitArgs;
use crate::config::{ProjectConfig, cfg, reload_config};
use crate::core::{Mode, is_shutdown, register_watcher};
use crate::logger::{status_error, status_success, status_unchanged, status_warning};
use crate::utils::hash;
use crate::utils::path::normalize_path;
use crate::{debug, log};

use debouncer::{ChangeKind, Debouncer};

/// Outcome of one rebuild.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rebuild {
    /// New config assembled, emitted and swapped in.
    Updated,
    /// Assembled config is identical to the current one.
    Unchanged,
}

/// A successfully emitted config and the hash of its JSON.
#[derive(Debug)]
pub struct Snapshot {
    pub config: BundlerConfig,
    pub hash: u64,
}

impl Snapshot {
    /// Status-line summary: entry and page counts.
    pub fn summary(&self) -> String {
        let pages = self
            .config
            .plugins
            .iter()
            .filter(|p| matches!(p, Plugin::HtmlPage(_)))
            .count();
        format!("{} entries, {} pages", self.config.entry.len(), pages)
    }
}

/// Watch session holding the last good snapshot.
pub struct Session {
    mode: Mode,
    emit: EmitArgs,
    current: ArcSwapOption<Snapshot>,
}

impl Session {
    pub fn new(mode: Mode, emit: EmitArgs) -> Self {
        Self {
            mode,
            emit,
            current: ArcSwapOption::empty(),
        }
    }

    /// The last successfully emitted snapshot.
    pub fn current(&self) -> Option<Arc<Snapshot>> {
        self.current.load_full()
    }

    /// Assemble from `config` and swap the result in on success.
    ///
    /// Unchanged output is neither emitted nor swapped. On error nothing is
    /// emitted and the current snapshot is kept.
    pub fn rebuild(&self, config: &ProjectConfig) -> Result<Rebuild> {
        let next = BundlerConfig::assemble(config, self.mode)?;
        let json = next.to_json(self.emit.pretty)?;
        let hash = hash::compute(&json);

        if self.current.load().as_ref().is_some_and(|s| s.hash == hash) {
            return Ok(Rebuild::Unchanged);
        }

        crate::cli::write_output(&json, self.emit.output.as_deref())?;
        self.current.store(Some(Arc::new(Snapshot { config: next, hash })));
        Ok(Rebuild::Updated)
    }
}

/// Run the watch loop until Ctrl+C.
pub fn run(mode: Mode, emit: EmitArgs) -> Result<()> {
    let (shutdown_tx, shutdown_rx) = channel::bounded::<()>(1);
    register_watcher(shutdown_tx);

    let (event_tx, event_rx) = channel::unbounded();
    let mut watcher = notify::recommended_watcher(move |res| {
        let _ = event_tx.send(res);
    })
    .context("failed to create file watcher")?;

    let mut roots = WatchRoots::default();
    roots.attach(&mut watcher, &cfg())?;

    let session = Session::new(mode, emit);
    report(&session, session.rebuild(&cfg()), "initial build");
    log!("watch"; "watching {} ({mode}), press Ctrl+C to stop", cfg().pages.root.display());

    event_loop(&session, &mut watcher, &mut roots, &event_rx, &shutdown_rx);
    log!("watch"; "stopped");
    Ok(())
}

fn event_loop(
    session: &Session,
    watcher: &mut RecommendedWatcher,
    roots: &mut WatchRoots,
    event_rx: &Receiver<notify::Result<notify::Event>>,
    shutdown_rx: &Receiver<()>,
) {
    let mut debouncer = Debouncer::new();

    while !is_shutdown() {
        let stop = channel::select! {
            recv(event_rx) -> msg => match msg {
                Ok(Ok(event)) => {
                    debouncer.add_event(&event);
                    false
                }
                Ok(Err(e)) => {
                    log!("watch"; "notify error: {}", e);
                    false
                }
                Err(_) => true,
            },
            recv(shutdown_rx) -> _ => true,
            default(roots.poll_interval(debouncer.sleep_duration())) => false,
        };
        if stop {
            break;
        }

        match roots.maintain(watcher) {
            Ok(true) => report(session, session.rebuild(&cfg()), "page root appeared"),
            Ok(false) => {}
            Err(e) => status_warning(&format!("{e:#}")),
        }

        let Some(changes) = debouncer.take_if_ready() else {
            continue;
        };
        let config = cfg();
        if !is_relevant(&changes, &config, session.emit.output.as_deref()) {
            continue;
        }

        if touches(&changes, &config.config_path) {
            match reload_config() {
                Ok(true) => {
                    log!("config"; "reloaded {}", config.config_path.display());
                    if let Err(e) = roots.attach(watcher, &cfg()) {
                        status_warning(&format!("{e:#}"));
                    }
                }
                Ok(false) => {}
                Err(e) => {
                    status_error("config reload failed, keeping previous config", &format!("{e:#}"));
                    continue;
                }
            }
        }

        report(session, session.rebuild(&cfg()), &summarize(&changes));
    }
}

fn report(session: &Session, result: Result<Rebuild>, trigger: &str) {
    match result {
        Ok(Rebuild::Updated) => {
            let summary = session.current().map(|s| s.summary()).unwrap_or_default();
            status_success(&format!("regenerated ({trigger}): {summary}"));
        }
        Ok(Rebuild::Unchanged) => status_unchanged(&format!("unchanged ({trigger})")),
        Err(e) => status_error(
            &format!("rebuild failed ({trigger}), keeping previous config"),
            &format!("{e:#}"),
        ),
    }
}

/// Whether any change can affect the assembled config.
fn is_relevant(
    changes: &FxHashMap<PathBuf, ChangeKind>,
    config: &ProjectConfig,
    output: Option<&Path>,
) -> bool {
    let page_root = config.page_root();
    let output = output.map(normalize_path);
    changes.keys().any(|path| {
        output.as_deref() != Some(path.as_path())
            && (path.starts_with(&page_root) || *path == config.config_path)
    })
}

fn touches(changes: &FxHashMap<PathBuf, ChangeKind>, path: &Path) -> bool {
    changes.contains_key(path)
}

/// Short description of a change batch for the status line.
fn summarize(changes: &FxHashMap<PathBuf, ChangeKind>) -> String {
    let mut paths: Vec<_> = changes.iter().collect();
    paths.sort_by(|a, b| a.0.cmp(b.0));
    match paths.as_slice() {
        [(path, kind)] => format!("{} {}", kind.label(), display_name(path)),
        _ => format!("{} changes", paths.len()),
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned())
}

/// How often missing watch roots are checked for.
const MISSING_ROOT_POLL: Duration = Duration::from_millis(1000);

/// Paths registered with the watcher, plus wanted paths that do not exist yet.
#[derive(Default)]
struct WatchRoots {
    attached: Vec<PathBuf>,
    missing: Vec<(PathBuf, RecursiveMode)>,
}

impl WatchRoots {
    /// Watch the page root recursively and the config file's directory.
    ///
    /// Previously attached paths that the new config no longer needs are
    /// released first. Paths that do not exist yet are remembered and
    /// picked up by [`WatchRoots::maintain`].
    fn attach(&mut self, watcher: &mut RecommendedWatcher, config: &ProjectConfig) -> Result<()> {
        let wanted = Self::wanted(config);

        for path in std::mem::take(&mut self.attached) {
            if !wanted.iter().any(|(p, _)| *p == path) {
                let _ = watcher.unwatch(&path);
            } else {
                self.attached.push(path);
            }
        }

        self.missing.clear();
        for (path, mode) in wanted {
            if self.attached.contains(&path) {
                continue;
            }
            if !path.exists() {
                status_warning(&format!("{} does not exist yet, waiting for it", path.display()));
                self.missing.push((path, mode));
                continue;
            }
            self.watch(watcher, path, mode)?;
        }
        Ok(())
    }

    /// Attach missing roots that have appeared since. Returns whether any did.
    fn maintain(&mut self, watcher: &mut RecommendedWatcher) -> Result<bool> {
        if self.missing.is_empty() {
            return Ok(false);
        }
        let (ready, still_missing): (Vec<_>, Vec<_>) =
            std::mem::take(&mut self.missing).into_iter().partition(|(p, _)| p.exists());
        self.missing = still_missing;

        let appeared = !ready.is_empty();
        for (path, mode) in ready {
            self.watch(watcher, path, mode)?;
        }
        Ok(appeared)
    }

    /// Cap the event wait while a root is still missing.
    fn poll_interval(&self, wait: Duration) -> Duration {
        if self.missing.is_empty() {
            wait
        } else {
            wait.min(MISSING_ROOT_POLL)
        }
    }

    fn watch(&mut self, watcher: &mut RecommendedWatcher, path: PathBuf, mode: RecursiveMode) -> Result<()> {
        watcher
            .watch(&path, mode)
            .with_context(|| format!("failed to watch {}", path.display()))?;
        debug!("watch"; "attached {}", path.display());
        self.attached.push(path);
        Ok(())
    }

    fn wanted(config: &ProjectConfig) -> Vec<(PathBuf, RecursiveMode)> {
        let mut wanted = vec![(config.page_root(), RecursiveMode::Recursive)];
        if let Some(dir) = config.config_path.parent()
            && !dir.starts_with(config.page_root())
        {
            wanted.push((dir.to_path_buf(), RecursiveMode::NonRecursive));
        }
        wanted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_config_at;
    use std::fs;
    use tempfile::TempDir;

    fn make_project(files: &[&str]) -> (TempDir, ProjectConfig) {
        let temp = TempDir::new().unwrap();
        for file in files {
            let path = temp.path().join(file);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(path, "").unwrap();
        }
        let mut config = test_config_at(temp.path());
        config.config_path = temp.path().join("pagepack.toml");
        (temp, config)
    }

    fn session_writing_to(temp: &TempDir) -> (Session, PathBuf) {
        let out = temp.path().join("build/webpack.json");
        let emit = EmitArgs {
            output: Some(out.clone()),
            pretty: false,
        };
        (Session::new(Mode::Development, emit), out)
    }

    fn changes(paths: &[(&Path, ChangeKind)]) -> FxHashMap<PathBuf, ChangeKind> {
        paths.iter().map(|(p, k)| (p.to_path_buf(), *k)).collect()
    }

    #[test]
    fn test_rebuild_swaps_on_success() {
        let (temp, config) = make_project(&["src/pages/home/index.js"]);
        let (session, out) = session_writing_to(&temp);

        assert!(session.current().is_none());
        assert_eq!(session.rebuild(&config).unwrap(), Rebuild::Updated);
        assert!(out.exists());
        let first = session.current().unwrap();
        assert!(first.config.entry.contains("home/index"));
        assert_eq!(first.summary(), "2 entries, 0 pages");

        // same tree, same output
        assert_eq!(session.rebuild(&config).unwrap(), Rebuild::Unchanged);

        fs::write(temp.path().join("src/pages/about.js"), "").unwrap();
        assert_eq!(session.rebuild(&config).unwrap(), Rebuild::Updated);
        let second = session.current().unwrap();
        assert!(second.config.entry.contains("about"));
        assert_ne!(second.hash, first.hash);
        // the earlier snapshot is untouched
        assert!(!first.config.entry.contains("about"));
    }

    #[test]
    fn test_failed_rebuild_keeps_previous() {
        let (temp, mut config) = make_project(&["src/pages/home/index.js"]);
        let (session, out) = session_writing_to(&temp);
        session.rebuild(&config).unwrap();
        let written = fs::read_to_string(&out).unwrap();

        config.pages.scripts = "[".into();
        assert!(session.rebuild(&config).is_err());

        assert!(session.current().unwrap().config.entry.contains("home/index"));
        assert_eq!(fs::read_to_string(&out).unwrap(), written);
    }

    #[test]
    fn test_relevance_filter() {
        let (temp, config) = make_project(&[]);
        let page = temp.path().join("src/pages/a.js");
        let other = temp.path().join("README.md");
        let own = temp.path().join("src/pages/out.json");

        assert!(is_relevant(&changes(&[(&page, ChangeKind::Modified)]), &config, None));
        assert!(!is_relevant(&changes(&[(&other, ChangeKind::Modified)]), &config, None));
        assert!(is_relevant(
            &changes(&[(&config.config_path, ChangeKind::Modified)]),
            &config,
            None
        ));
        // writing our own output never retriggers
        assert!(!is_relevant(&changes(&[(&own, ChangeKind::Modified)]), &config, Some(&own)));
    }

    #[test]
    fn test_summarize() {
        let one = changes(&[(Path::new("/p/src/pages/a.js"), ChangeKind::Created)]);
        assert_eq!(summarize(&one), "created a.js");

        let two = changes(&[
            (Path::new("/p/src/pages/a.js"), ChangeKind::Created),
            (Path::new("/p/src/pages/b.js"), ChangeKind::Removed),
        ]);
        assert_eq!(summarize(&two), "2 changes");
    }

    #[test]
    fn test_wanted_roots() {
        let (temp, config) = make_project(&[]);
        let wanted = WatchRoots::wanted(&config);
        assert_eq!(wanted.len(), 2);
        assert_eq!(wanted[0].0, temp.path().join("src/pages"));
        assert_eq!(wanted[1].0, temp.path());
    }

    #[test]
    fn test_missing_page_root_attached_once_created() {
        let (temp, config) = make_project(&[]);
        let mut watcher =
            notify::recommended_watcher(|_: notify::Result<notify::Event>| {}).unwrap();
        let mut roots = WatchRoots::default();

        roots.attach(&mut watcher, &config).unwrap();
        assert_eq!(roots.attached, vec![temp.path().to_path_buf()]);
        assert_eq!(roots.missing.len(), 1);
        assert_eq!(
            roots.poll_interval(Duration::from_secs(86400)),
            MISSING_ROOT_POLL
        );
        assert!(!roots.maintain(&mut watcher).unwrap());

        fs::create_dir_all(temp.path().join("src/pages")).unwrap();
        assert!(roots.maintain(&mut watcher).unwrap());
        assert!(roots.attached.contains(&temp.path().join("src/pages")));
        assert!(roots.missing.is_empty());
        assert_eq!(
            roots.poll_interval(Duration::from_secs(86400)),
            Duration::from_secs(86400)
        );
    }
}
