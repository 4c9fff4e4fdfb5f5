// ============================================================
// Layer 6 — Infrastructure Layer
// ============================================================
// Everything that touches the filesystem on behalf of the
// other layers:
//
//   checkpoint.rs      — CheckpointWriter
//                        Records training state through Burn's
//                        CompactRecorder, optionally copies it to
//                        the configured best-model path, and
//                        reports the result as a SaveOutcome
//                        instead of failing the caller.
//
//   threshold_store.rs — Threshold persistence
//                        Saves a threshold search result as JSON
//                        and loads it back, so tuned per-class
//                        thresholds can be reused for scoring.
//
// Reference: Burn Book §5 (Records and Checkpointing)
//            Rust Book §9 (Error Handling with anyhow)

/// Best-effort checkpoint writing and loading
pub mod checkpoint;

/// Per-class threshold JSON persistence
pub mod threshold_store;
