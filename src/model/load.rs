//! Network loading from SafeTensors

use super::{Activation, DenseLayer, DenseNetwork};
use crate::{Error, Result};
use ndarray::{Array1, Array2};
use safetensors::tensor::{Dtype, TensorView};
use safetensors::SafeTensors;
use std::path::Path;

/// Load a dense network from a SafeTensors file.
///
/// Layers are read as `dense_0`, `dense_1`, ... until no kernel is found.
/// When the file carries no `activations` metadata, hidden layers use ReLU
/// and the output layer is linear.
pub fn load_network(path: impl AsRef<Path>) -> Result<DenseNetwork> {
    let path = path.as_ref();
    let data = std::fs::read(path)?;

    let (_, st_metadata) =
        SafeTensors::read_metadata(&data).map_err(|e| Error::corrupt(path, e))?;
    let custom = st_metadata.metadata().clone().unwrap_or_default();

    let name = custom.get("name").cloned().unwrap_or_else(|| {
        path.file_stem().and_then(|s| s.to_str()).unwrap_or("model").to_string()
    });

    let tensors = SafeTensors::deserialize(&data).map_err(|e| Error::corrupt(path, e))?;

    let mut kernels = Vec::new();
    while let Ok(view) = tensors.tensor(&format!("dense_{}.kernel", kernels.len())) {
        let idx = kernels.len();
        let kernel = to_matrix(&view)
            .map_err(|m| Error::corrupt(path, format!("dense_{idx}.kernel: {m}")))?;
        let bias_name = format!("dense_{idx}.bias");
        let bias_view = tensors
            .tensor(&bias_name)
            .map_err(|e| Error::corrupt(path, format!("{bias_name}: {e}")))?;
        let bias =
            to_vector(&bias_view).map_err(|m| Error::corrupt(path, format!("{bias_name}: {m}")))?;
        kernels.push((kernel, bias));
    }

    if kernels.is_empty() {
        return Err(Error::corrupt(path, "no dense_0.kernel tensor found"));
    }

    let activations = match custom.get("activations") {
        Some(spec) => spec
            .split(',')
            .map(str::parse::<Activation>)
            .collect::<Result<Vec<_>>>()?,
        None => {
            let mut acts = vec![Activation::Relu; kernels.len() - 1];
            acts.push(Activation::Linear);
            acts
        }
    };
    if activations.len() != kernels.len() {
        return Err(Error::InvalidModel(format!(
            "{} activations declared for {} layers",
            activations.len(),
            kernels.len()
        )));
    }

    let layers = kernels
        .into_iter()
        .zip(activations)
        .map(|((kernel, bias), act)| DenseLayer::new(kernel, bias, act))
        .collect::<Result<Vec<_>>>()?;

    DenseNetwork::new(name, layers)
}

fn f32_data(view: &TensorView<'_>) -> std::result::Result<Vec<f32>, String> {
    if view.dtype() != Dtype::F32 {
        return Err(format!("expected F32, found {:?}", view.dtype()));
    }
    // pod_collect_to_vec copies, so unaligned buffers are fine
    Ok(bytemuck::pod_collect_to_vec::<u8, f32>(view.data()))
}

fn to_matrix(view: &TensorView<'_>) -> std::result::Result<Array2<f32>, String> {
    let shape = view.shape();
    if shape.len() != 2 {
        return Err(format!("expected 2-D tensor, got shape {shape:?}"));
    }
    Array2::from_shape_vec((shape[0], shape[1]), f32_data(view)?).map_err(|e| e.to_string())
}

fn to_vector(view: &TensorView<'_>) -> std::result::Result<Array1<f32>, String> {
    let shape = view.shape();
    if shape.len() != 1 {
        return Err(format!("expected 1-D tensor, got shape {shape:?}"));
    }
    Ok(Array1::from_vec(f32_data(view)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{save_network, Regressor};
    use ndarray::array;
    use std::collections::HashMap;
    use tempfile::TempDir;

    fn write_raw(
        path: &Path,
        tensors: Vec<(&str, Vec<f32>, Vec<usize>)>,
        meta: Option<HashMap<String, String>>,
    ) {
        let bytes: Vec<(String, Vec<u8>, Vec<usize>)> = tensors
            .into_iter()
            .map(|(n, d, s)| (n.to_string(), bytemuck::cast_slice(&d).to_vec(), s))
            .collect();
        let views: Vec<(&str, TensorView<'_>)> = bytes
            .iter()
            .map(|(n, b, s)| (n.as_str(), TensorView::new(Dtype::F32, s.clone(), b).unwrap()))
            .collect();
        std::fs::write(path, safetensors::serialize(views, meta).unwrap()).unwrap();
    }

    #[test]
    fn test_load_roundtrip_preserves_predictions() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("modelo_envios.safetensors");

        let hidden =
            DenseLayer::new(array![[0.5, -1.0], [1.0, 2.0]], array![0.1, 0.2], Activation::Relu)
                .unwrap();
        let out = DenseLayer::new(array![[1.5], [-0.5]], array![3.0], Activation::Linear).unwrap();
        let original = DenseNetwork::new("envios", vec![hidden, out]).unwrap();
        save_network(&original, &path).unwrap();

        let loaded = load_network(&path).unwrap();
        assert_eq!(loaded.name(), "envios");
        assert_eq!(loaded.layers().len(), 2);
        assert_eq!(loaded.layers()[0].activation(), Activation::Relu);

        let x = array![[2.0, 1.0]];
        assert_eq!(original.predict(x.view()).unwrap(), loaded.predict(x.view()).unwrap());
    }

    #[test]
    fn test_default_activations_without_metadata() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("net.safetensors");
        write_raw(
            &path,
            vec![
                ("dense_0.kernel", vec![1.0, 1.0], vec![1, 2]),
                ("dense_0.bias", vec![0.0, 0.0], vec![2]),
                ("dense_1.kernel", vec![1.0, 1.0], vec![2, 1]),
                ("dense_1.bias", vec![0.0], vec![1]),
            ],
            None,
        );

        let net = load_network(&path).unwrap();
        assert_eq!(net.name(), "net");
        assert_eq!(net.layers()[0].activation(), Activation::Relu);
        assert_eq!(net.layers()[1].activation(), Activation::Linear);
    }

    #[test]
    fn test_missing_bias_is_corrupt() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("net.safetensors");
        write_raw(&path, vec![("dense_0.kernel", vec![1.0], vec![1, 1])], None);

        let err = load_network(&path).unwrap_err();
        assert!(matches!(err, Error::ArtifactCorrupt { .. }));
        assert!(err.to_string().contains("dense_0.bias"));
    }

    #[test]
    fn test_no_layers_is_corrupt() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("net.safetensors");
        write_raw(&path, vec![("weight", vec![1.0], vec![1])], None);

        assert!(matches!(load_network(&path), Err(Error::ArtifactCorrupt { .. })));
    }

    #[test]
    fn test_activation_count_mismatch() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("net.safetensors");
        let mut meta = HashMap::new();
        meta.insert("activations".to_string(), "relu,linear".to_string());
        write_raw(
            &path,
            vec![("dense_0.kernel", vec![1.0], vec![1, 1]), ("dense_0.bias", vec![0.0], vec![1])],
            Some(meta),
        );

        assert!(matches!(load_network(&path), Err(Error::InvalidModel(_))));
    }

    #[test]
    fn test_garbage_file_is_corrupt() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("net.safetensors");
        std::fs::write(&path, b"not a safetensors file").unwrap();

        assert!(matches!(load_network(&path), Err(Error::ArtifactCorrupt { .. })));
    }

    #[test]
    fn test_missing_file_is_io() {
        let dir = TempDir::new().unwrap();
        let err = load_network(dir.path().join("absent.safetensors")).unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
