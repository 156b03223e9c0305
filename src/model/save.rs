//! Network saving to SafeTensors

use super::DenseNetwork;
use crate::{Error, Result};
use safetensors::tensor::{Dtype, TensorView};
use std::collections::HashMap;
use std::path::Path;

/// Save a dense network in the layout `load_network` reads.
///
/// Used to export weights produced elsewhere and to build fixtures.
pub fn save_network(network: &DenseNetwork, path: impl AsRef<Path>) -> Result<()> {
    let mut tensor_data: Vec<(String, Vec<u8>, Vec<usize>)> = Vec::new();

    for (i, layer) in network.layers().iter().enumerate() {
        let kernel: Vec<f32> = layer.kernel().iter().copied().collect();
        tensor_data.push((
            format!("dense_{i}.kernel"),
            bytemuck::cast_slice(&kernel).to_vec(),
            vec![layer.input_dim(), layer.output_dim()],
        ));

        let bias: Vec<f32> = layer.bias().iter().copied().collect();
        tensor_data.push((
            format!("dense_{i}.bias"),
            bytemuck::cast_slice(&bias).to_vec(),
            vec![layer.output_dim()],
        ));
    }

    let views = tensor_data
        .iter()
        .map(|(name, bytes, shape)| {
            TensorView::new(Dtype::F32, shape.clone(), bytes)
                .map(|view| (name.as_str(), view))
                .map_err(|e| Error::Serialization(format!("invalid tensor {name}: {e}")))
        })
        .collect::<Result<Vec<_>>>()?;

    let activations: Vec<String> =
        network.layers().iter().map(|l| l.activation().to_string()).collect();

    let mut metadata = HashMap::new();
    metadata.insert("name".to_string(), network.name().to_string());
    metadata.insert("architecture".to_string(), "dense".to_string());
    metadata.insert("activations".to_string(), activations.join(","));

    let bytes = safetensors::serialize(views, Some(metadata))
        .map_err(|e| Error::Serialization(format!("SafeTensors serialization failed: {e}")))?;
    std::fs::write(path, bytes)?;

    Ok(())
}
