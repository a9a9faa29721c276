//! Batch, single-file, and continuous-watch drivers.
//!
//! All three modes funnel into the importer's single-file processing path.
//! Batch mode isolates per-file failures: a file that fails to read or
//! import is logged and the rest of the pass continues. Single-file mode
//! propagates the failure so the process exits non-zero.

use std::path::Path;

use chrono::Utc;
use memolog_core::import::ImportReport;
use memolog_core::state_store::StateStore;

use crate::state::AppState;
use crate::{Cli, shutdown_signal};

/// Aggregate counts for one batch pass, for operator-facing reporting.
#[derive(Debug, Default)]
pub struct BatchSummary {
    pub files_seen: usize,
    pub files_imported: usize,
    pub files_unchanged: usize,
    pub files_failed: usize,
    pub weights_written: usize,
    pub nutrition_written: usize,
    pub workouts_written: usize,
}

impl BatchSummary {
    fn absorb(&mut self, report: &ImportReport) {
        if report.skipped_unchanged {
            self.files_unchanged += 1;
        } else {
            self.files_imported += 1;
        }
        self.weights_written += report.weights_written;
        self.nutrition_written += report.nutrition_written;
        self.workouts_written += report.workouts_written;
    }
}

/// Process a single named file and persist the updated state.
///
/// Persistence failures propagate; the caller exits non-zero.
pub async fn run_single_file(app: &AppState, path: &Path, cli: &Cli) -> anyhow::Result<()> {
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| anyhow::anyhow!("invalid file name: {}", path.display()))?;

    let content = tokio::fs::read_to_string(path).await?;

    let state = app.state_store.load().await?;
    let (next_state, report) = app.importer.process_file(&state, file_name, &content).await?;
    app.state_store.save(&next_state).await?;

    print_report(&report, cli);
    Ok(())
}

/// Run one sequential pass over every `*.md` file in the watched directory.
///
/// Each file is processed to completion (hash check, extract, upsert, state
/// save) before the next begins. A failing file is logged and skipped;
/// `last_run` is stamped and the state saved at the end of the pass.
pub async fn run_batch(app: &AppState, cli: &Cli) -> anyhow::Result<BatchSummary> {
    let mut state = app.state_store.load().await?;
    let mut summary = BatchSummary::default();

    for file_name in markdown_files(&app.watch_dir).await? {
        summary.files_seen += 1;
        let path = app.watch_dir.join(&file_name);

        let content = match tokio::fs::read_to_string(&path).await {
            Ok(content) => content,
            Err(err) => {
                tracing::warn!(file = %file_name, error = %err, "failed to read file, skipping");
                summary.files_failed += 1;
                continue;
            }
        };

        match app.importer.process_file(&state, &file_name, &content).await {
            Ok((next_state, report)) => {
                app.state_store.save(&next_state).await?;
                state = next_state;
                summary.absorb(&report);
            }
            Err(err) => {
                tracing::warn!(file = %file_name, error = %err, "import failed, skipping file");
                summary.files_failed += 1;
            }
        }
    }

    let state = state.with_last_run(Utc::now());
    app.state_store.save(&state).await?;

    print_summary(&summary, cli);
    Ok(summary)
}

/// One batch pass, then continuous watch until an interrupt signal.
///
/// Change notifications are handled one at a time in arrival order; every
/// persistence call is awaited before the next event is taken, so no two
/// files are ever processed concurrently.
pub async fn run_watch(app: &AppState, cli: &Cli) -> anyhow::Result<()> {
    run_batch(app, cli).await?;

    let (handle, mut rx) = memolog_infra::watch::start_watcher(&app.watch_dir, app.debounce_ms)?;

    if !cli.quiet && !cli.json {
        println!(
            "  {} Watching {} {}",
            console::style("👁").bold(),
            console::style(app.watch_dir.display()).cyan(),
            console::style("(press Ctrl+C to stop)").dim()
        );
    }

    let shutdown = shutdown_signal();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            _ = &mut shutdown => break,
            batch = rx.recv() => {
                let Some(events) = batch else { break };
                for event in events {
                    let Some(file_name) = event.file_name() else { continue };
                    if let Err(err) = process_event(app, file_name, &event.path, cli).await {
                        tracing::warn!(file = %file_name, error = %err, "import failed");
                    }
                }
            }
        }
    }

    drop(handle);
    if !cli.quiet && !cli.json {
        println!("\n  Watcher stopped.");
    }
    Ok(())
}

async fn process_event(
    app: &AppState,
    file_name: &str,
    path: &Path,
    cli: &Cli,
) -> anyhow::Result<()> {
    // The file may already be gone (editor temp files, deletions); that is
    // not an error worth surfacing.
    let content = match tokio::fs::read_to_string(path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!(file = %file_name, "file vanished before import");
            return Ok(());
        }
        Err(err) => return Err(err.into()),
    };

    let state = app.state_store.load().await?;
    let (next_state, report) = app.importer.process_file(&state, file_name, &content).await?;
    app.state_store.save(&next_state).await?;

    if !report.skipped_unchanged {
        print_report(&report, cli);
    }
    Ok(())
}

/// Sorted list of markdown file names in the watched (flat) directory.
async fn markdown_files(dir: &Path) -> anyhow::Result<Vec<String>> {
    let mut names = Vec::new();
    let mut entries = tokio::fs::read_dir(dir).await?;
    while let Some(entry) = entries.next_entry().await? {
        if !entry.file_type().await?.is_file() {
            continue;
        }
        let name = entry.file_name();
        let Some(name) = name.to_str() else { continue };
        if name.ends_with(".md") {
            names.push(name.to_string());
        }
    }
    names.sort();
    Ok(names)
}

fn print_report(report: &ImportReport, cli: &Cli) {
    if cli.quiet {
        return;
    }
    if cli.json {
        let json = serde_json::json!({
            "file": report.file_name,
            "skippedUnchanged": report.skipped_unchanged,
            "weightsWritten": report.weights_written,
            "nutritionWritten": report.nutrition_written,
            "workoutsWritten": report.workouts_written,
        });
        println!("{json}");
        return;
    }

    if report.skipped_unchanged {
        println!(
            "  {} {} unchanged",
            console::style("·").dim(),
            report.file_name
        );
    } else {
        println!(
            "  {} {}: {} weight, {} nutrition, {} workout",
            console::style("✓").green(),
            console::style(&report.file_name).cyan(),
            report.weights_written,
            report.nutrition_written,
            report.workouts_written
        );
    }
}

fn print_summary(summary: &BatchSummary, cli: &Cli) {
    if cli.quiet {
        return;
    }
    if cli.json {
        let json = serde_json::json!({
            "filesSeen": summary.files_seen,
            "filesImported": summary.files_imported,
            "filesUnchanged": summary.files_unchanged,
            "filesFailed": summary.files_failed,
            "weightsWritten": summary.weights_written,
            "nutritionWritten": summary.nutrition_written,
            "workoutsWritten": summary.workouts_written,
        });
        println!("{json}");
        return;
    }

    println!(
        "  {} {} files scanned: {} imported, {} unchanged, {} failed",
        console::style("∑").bold(),
        summary.files_seen,
        summary.files_imported,
        summary.files_unchanged,
        summary.files_failed
    );
    println!(
        "    {} weight, {} nutrition, {} workout records written",
        summary.weights_written,
        summary.nutrition_written,
        summary.workouts_written
    );
}
