// ============================================================
// Metrics — Top-k Accuracy
// ============================================================
// For a batch of class scores [batch_size, num_classes] and one
// integer label per sample, the top-k accuracy is the fraction
// of samples whose label is among the k highest-scoring classes.
//
// Classes are ranked by score, descending, with a stable sort:
// equal scores keep their class-index order, so the lower class
// index ranks first on a tie.
//
// One ranking of length max(k) is computed per sample and every
// requested k reads a prefix of it. Results come back in the
// order the k values were given.

use ndarray::{ArrayView1, ArrayView2};

use crate::domain::error::{Error, Result};

/// Top-k accuracy for each k in `topk`, in the same order.
pub fn topk_accuracy(
    output: ArrayView2<f32>,
    target: ArrayView1<usize>,
    topk:   &[usize],
) -> Result<Vec<f64>> {
    let (batch_size, classes) = output.dim();
    if target.len() != batch_size {
        return Err(Error::ShapeMismatch {
            output: output.shape().to_vec(),
            target: target.shape().to_vec(),
        });
    }
    if batch_size == 0 {
        return Err(Error::EmptyBatch);
    }

    let max_k = topk.iter().copied().max().ok_or(Error::EmptyTopK)?;
    if max_k > classes {
        return Err(Error::TopKOutOfRange { k: max_k, classes });
    }

    let mut correct = vec![0usize; topk.len()];
    for (row, &label) in output.rows().into_iter().zip(target.iter()) {
        let rank = ranked_classes(row, max_k).iter().position(|&c| c == label);
        if let Some(rank) = rank {
            for (hits, &k) in correct.iter_mut().zip(topk) {
                if rank < k {
                    *hits += 1;
                }
            }
        }
    }

    Ok(correct
        .into_iter()
        .map(|hits| hits as f64 / batch_size as f64)
        .collect())
}

/// Indices of the `k` highest scores, best first.
fn ranked_classes(row: ArrayView1<f32>, k: usize) -> Vec<usize> {
    let mut order: Vec<usize> = (0..row.len()).collect();
    // sort_by is stable: ties keep ascending class order
    order.sort_by(|&a, &b| row[b].total_cmp(&row[a]));
    order.truncate(k);
    order
}
