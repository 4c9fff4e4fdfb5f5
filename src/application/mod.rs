// ============================================================
// Layer 2 — Application / Use Cases
// ============================================================
// Each use case wires the data, metrics, ml and infra layers
// together for one CLI command:
//
//   evaluate_use_case.rs  — score a prediction file (scores,
//                           f2_score) and top-k accuracy
//   threshold_use_case.rs — greedy per-class threshold search,
//                           optionally persisted
//   optimizer_use_case.rs — resolve the optimizer a training
//                           configuration would build
//
// Rules for this layer:
//   - No metric math here (that's the metrics layer)
//   - No printing (that's Layer 1)
//   - Only workflow coordination
//
// Reference: Clean Architecture pattern
//            Rust Book §7 (Module System)

// Batch scoring and top-k accuracy
pub mod evaluate_use_case;

// Per-class threshold optimisation
pub mod threshold_use_case;

// Optimizer configuration inspection
pub mod optimizer_use_case;
