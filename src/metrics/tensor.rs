//! Conversion between Burn tensors and the ndarray values the metrics
//! operate on.
//!
//! Model output usually lives in a `Tensor<B, 2>` on some device; the
//! metric helpers read host-side arrays. These functions pull the data
//! back with `into_data()`, whatever the backend's element types are.

use burn::tensor::{backend::Backend, Int, Tensor, TensorData};
use ndarray::{Array1, Array2, ArrayView2};

use crate::domain::error::{Error, Result};

/// Copy a float tensor `[rows, cols]` into an `Array2<f32>`.
pub fn to_array2<B: Backend>(tensor: Tensor<B, 2>) -> Array2<f32> {
    let [rows, cols] = tensor.dims();
    let values: Vec<f32> = tensor.into_data().iter::<f32>().collect();
    Array2::from_shape_fn((rows, cols), |(r, c)| values[r * cols + c])
}

/// Flatten an integer label tensor (`[B]` or `[B, 1]`) into class indices.
pub fn to_labels<B: Backend, const D: usize>(tensor: Tensor<B, D, Int>) -> Result<Array1<usize>> {
    tensor
        .into_data()
        .iter::<i64>()
        .map(|label| usize::try_from(label).map_err(|_| Error::InvalidLabel(label.to_string())))
        .collect::<Result<Vec<_>>>()
        .map(Array1::from)
}

/// Upload a host array as a float tensor on `device`.
pub fn from_array2<B: Backend>(array: ArrayView2<f32>, device: &B::Device) -> Tensor<B, 2> {
    let (rows, cols) = array.dim();
    let values: Vec<f32> = array.iter().copied().collect();
    Tensor::from_data(TensorData::new(values, [rows, cols]), device)
}
