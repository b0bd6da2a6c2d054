use burn::tensor::{backend::Backend, Data, ElementConversion, Int, Shape, Tensor};

/// Stack fixed-length index sequences into a `[batch_size, seq_length]` Int tensor
pub fn sequences_to_tensor<B: Backend>(
    sequences: Vec<Vec<usize>>,
    seq_length: usize,
    device: &B::Device,
) -> Tensor<B, 2, Int> {
    let batch_size = sequences.len();

    let values: Vec<B::IntElem> = sequences
        .into_iter()
        .flat_map(|sequence| {
            debug_assert_eq!(sequence.len(), seq_length);
            sequence.into_iter().map(|e| (e as i64).elem())
        })
        .collect();

    Tensor::from_data(
        Data::<B::IntElem, 2>::new(values, Shape::new([batch_size, seq_length])),
        device,
    )
}

/// Build a 1D Int tensor of class indices
pub fn class_ids_to_tensor<B: Backend>(
    class_ids: Vec<usize>,
    device: &B::Device,
) -> Tensor<B, 1, Int> {
    let n = class_ids.len();
    let values: Vec<B::IntElem> = class_ids.into_iter().map(|e| (e as i64).elem()).collect();

    Tensor::from_data(Data::<B::IntElem, 1>::new(values, Shape::new([n])), device)
}

#[cfg(test)]
mod tests {
    use burn::backend::NdArray;
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_sequences_to_tensor() {
        let device = Default::default();
        let tensor = sequences_to_tensor::<NdArray>(vec![vec![2, 3, 0], vec![1, 0, 0]], 3, &device);

        assert_eq!(tensor.dims(), [2, 3]);

        let values = tensor.into_data().convert::<i64>().value;
        assert_eq!(values, vec![2, 3, 0, 1, 0, 0]);
    }

    #[test]
    fn test_class_ids_to_tensor() {
        let device = Default::default();
        let tensor = class_ids_to_tensor::<NdArray>(vec![4, 0, 2], &device);

        assert_eq!(tensor.into_data().convert::<i64>().value, vec![4, 0, 2]);
    }
}
