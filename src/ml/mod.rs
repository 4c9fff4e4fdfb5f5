// ============================================================
// Layer 5 — ML Layer (Burn)
// ============================================================
// All Burn optimizer code lives here.
//
//   optimizer.rs — OptimizerKind + build_optimizer: dispatch a
//                  configured name to a Burn optimizer bound
//                  to a module type
//
//   adabound.rs  — AdaBound as a Burn SimpleOptimizer
//
//   radam.rs     — Rectified Adam as a Burn SimpleOptimizer
//
// Burn ships SGD, RMSprop, Adam and AdamW; the two remaining
// algorithms plug into the same OptimizerAdaptor machinery.
//
// Reference: Burn Book §5 (Training)

/// Configured optimizer construction
pub mod optimizer;

/// AdaBound optimizer
pub mod adabound;

/// RAdam optimizer
pub mod radam;
