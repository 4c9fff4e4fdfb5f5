// ============================================================
// Layer 4 — Data Input
// ============================================================
// Reads the numeric matrices the CLI scores:
//
//   predictions.csv   → [batch_size, num_classes] model scores
//   targets.csv       → [batch_size, num_classes] 0/1 labels
//   labels.csv        → [batch_size] class indices (top-k)
//
// Files are plain headerless CSV, one sample per row.
//
// Reference: csv crate documentation
//            Rust Book §9 (Error Handling)

/// CSV → ndarray loaders
pub mod loader;
