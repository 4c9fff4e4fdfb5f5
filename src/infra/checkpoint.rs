// ============================================================
// Layer 6 — Checkpoint Writer
// ============================================================
// Persists training state (model record, optimizer record,
// epoch counters... anything implementing Burn's Record) and
// keeps a copy of the best one seen so far.
//
// save(state, path, is_best) does, in order:
//   1. create the parent directory of `path` (mkdir -p)
//   2. record `state` with the recorder
//        → lands at `path` with the recorder's extension,
//          e.g. checkpoints/epoch_3 → checkpoints/epoch_3.mpk
//   3. if is_best: copy that file to the configured
//      best_checkpoint path (same extension rule). When both
//      name the same file the copy is skipped; copying a file
//      onto itself would truncate it.
//
// Saving is best-effort. No failure is ever returned as Err:
// it is logged with its cause and reported through SaveOutcome,
// so a training loop can ignore the result and keep going, or
// inspect it and stop.
//
// The best-checkpoint destination comes from CheckpointConfig,
// passed in at construction.
//
// Burn's CompactRecorder:
//   - Serialises records to MessagePack
//   - Stores floats at half precision
//
// Reference: Burn Book §5 (Records and Checkpointing)

use anyhow::{Context, Result};
use burn::{
    record::{CompactRecorder, FileRecorder, Record, Recorder},
    tensor::backend::Backend,
};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::domain::config::CheckpointConfig;

// ─── SaveOutcome ──────────────────────────────────────────────────────────────
/// What happened during a best-effort checkpoint save.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    /// State written (and copied to the best path, if requested)
    Saved { path: PathBuf },
    /// State written, but the copy to the best path failed
    SavedBestCopyFailed { path: PathBuf, reason: String },
    /// Nothing usable was written
    Failed { reason: String },
}

impl SaveOutcome {
    /// True when the checkpoint itself reached disk.
    pub fn is_saved(&self) -> bool {
        !matches!(self, SaveOutcome::Failed { .. })
    }

    /// True only when both the checkpoint and the requested best copy succeeded,
    /// or no best copy was requested.
    pub fn best_copied(&self) -> bool {
        matches!(self, SaveOutcome::Saved { .. })
    }

    /// Path of the written checkpoint, if any.
    pub fn path(&self) -> Option<&Path> {
        match self {
            SaveOutcome::Saved { path } | SaveOutcome::SavedBestCopyFailed { path, .. } => Some(path),
            SaveOutcome::Failed { .. } => None,
        }
    }
}

// ─── CheckpointWriter ─────────────────────────────────────────────────────────
/// Writes checkpoints with a Burn file recorder (CompactRecorder by default).
pub struct CheckpointWriter<FR = CompactRecorder> {
    config:   CheckpointConfig,
    recorder: FR,
}

impl CheckpointWriter<CompactRecorder> {
    pub fn new(config: CheckpointConfig) -> Self {
        Self::with_recorder(config, CompactRecorder::new())
    }
}

impl<FR> CheckpointWriter<FR> {
    /// Use a different file recorder, e.g. a full-precision one.
    pub fn with_recorder(config: CheckpointConfig, recorder: FR) -> Self {
        Self { config, recorder }
    }

    pub fn config(&self) -> &CheckpointConfig {
        &self.config
    }

    /// The file the recorder actually writes for `model_path`.
    pub fn written_path<B: Backend>(&self, model_path: &Path) -> PathBuf
    where
        FR: FileRecorder<B>,
    {
        let mut path = model_path.to_path_buf();
        path.set_extension(<FR as FileRecorder<B>>::file_extension());
        path
    }

    /// The file a best checkpoint is copied to.
    pub fn best_path<B: Backend>(&self) -> PathBuf
    where
        FR: FileRecorder<B>,
    {
        self.written_path::<B>(&self.config.best_checkpoint)
    }

    /// Save `state` at `model_path`, copying it to the best path when
    /// `is_best`. Never fails; see [`SaveOutcome`].
    pub fn save<B, R>(&self, state: R, model_path: impl AsRef<Path>, is_best: bool) -> SaveOutcome
    where
        B: Backend,
        R: Record<B>,
        FR: FileRecorder<B>,
    {
        let model_path = model_path.as_ref();
        tracing::info!("Saving checkpoint to '{}'", model_path.display());

        let path = match self.write::<B, R>(state, model_path) {
            Ok(path) => path,
            Err(e) => {
                tracing::error!("Failed to save checkpoint: {e:#}");
                return SaveOutcome::Failed { reason: format!("{e:#}") };
            }
        };

        if is_best {
            let best = self.best_path::<B>();
            if same_file(&path, &best) {
                tracing::info!("Checkpoint already at best path '{}'", best.display());
                return SaveOutcome::Saved { path };
            }
            if let Err(e) = fs::copy(&path, &best) {
                let reason = format!(
                    "cannot copy '{}' to '{}': {e}",
                    path.display(),
                    best.display()
                );
                tracing::error!("Failed to update best checkpoint: {reason}");
                return SaveOutcome::SavedBestCopyFailed { path, reason };
            }
            tracing::info!("Best checkpoint updated at '{}'", best.display());
        }

        SaveOutcome::Saved { path }
    }

    /// Load a record previously written by [`CheckpointWriter::save`].
    /// `model_path` is given without the recorder's extension, exactly as
    /// it was passed to `save`.
    pub fn load<B, R>(&self, model_path: impl AsRef<Path>, device: &B::Device) -> Result<R>
    where
        B: Backend,
        R: Record<B>,
        FR: FileRecorder<B>,
    {
        let model_path = model_path.as_ref();
        let record = <FR as Recorder<B>>::load(&self.recorder, model_path.to_path_buf(), device)
            .with_context(|| {
                format!("Cannot load checkpoint '{}'", self.written_path::<B>(model_path).display())
            })?;

        tracing::info!("Loaded checkpoint from '{}'", model_path.display());
        Ok(record)
    }

    fn write<B, R>(&self, state: R, model_path: &Path) -> Result<PathBuf>
    where
        B: Backend,
        R: Record<B>,
        FR: FileRecorder<B>,
    {
        if let Some(dir) = model_path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir)
                .with_context(|| format!("Cannot create checkpoint directory '{}'", dir.display()))?;
        }

        <FR as Recorder<B>>::record(&self.recorder, state, model_path.to_path_buf())
            .with_context(|| format!("Cannot record checkpoint to '{}'", model_path.display()))?;

        Ok(self.written_path::<B>(model_path))
    }
}

/// True when `dest` names the existing file `src`, even through a
/// different spelling of the path. `dest` itself need not exist.
fn same_file(src: &Path, dest: &Path) -> bool {
    let Ok(src) = fs::canonicalize(src) else {
        return false;
    };
    if let Ok(dest) = fs::canonicalize(dest) {
        return src == dest;
    }
    let (Some(dir), Some(name)) = (dest.parent(), dest.file_name()) else {
        return false;
    };
    let dir = if dir.as_os_str().is_empty() { Path::new(".") } else { dir };
    fs::canonicalize(dir).map(|d| d.join(name) == src).unwrap_or(false)
}
