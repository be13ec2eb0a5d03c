//! SafeTensors slot helpers shared by the native matrix archives and the
//! recommender persistence layer.
//!
//! An archive is a single SafeTensors file: named tensor slots for numeric
//! payloads plus a string metadata map in the header for everything small.

use crate::{Error, Result};
use safetensors::tensor::{Dtype, TensorView};
use safetensors::SafeTensors;
use std::collections::HashMap;
use std::path::Path;

use super::csr::CsrMatrix;

/// One named tensor slot, owned until it is handed to the serializer.
pub(crate) struct Slot {
    pub name: &'static str,
    pub dtype: Dtype,
    pub shape: Vec<usize>,
    pub bytes: Vec<u8>,
}

impl Slot {
    pub fn f32(name: &'static str, values: &[f32]) -> Self {
        Self {
            name,
            dtype: Dtype::F32,
            shape: vec![values.len()],
            bytes: bytemuck::cast_slice(values).to_vec(),
        }
    }

    pub fn f32_2d(name: &'static str, rows: usize, cols: usize, values: &[f32]) -> Self {
        Self {
            name,
            dtype: Dtype::F32,
            shape: vec![rows, cols],
            bytes: bytemuck::cast_slice(values).to_vec(),
        }
    }

    pub fn u32(name: &'static str, values: &[u32]) -> Self {
        Self {
            name,
            dtype: Dtype::U32,
            shape: vec![values.len()],
            bytes: bytemuck::cast_slice(values).to_vec(),
        }
    }

    pub fn u64(name: &'static str, values: &[u64]) -> Self {
        Self {
            name,
            dtype: Dtype::U64,
            shape: vec![values.len()],
            bytes: bytemuck::cast_slice(values).to_vec(),
        }
    }
}

/// Write a single archive file holding `metadata` and the given slots.
pub(crate) fn write_archive(
    path: &Path,
    metadata: HashMap<String, String>,
    slots: &[Slot],
) -> Result<()> {
    let views: Vec<(&str, TensorView<'_>)> = slots
        .iter()
        .map(|s| {
            TensorView::new(s.dtype, s.shape.clone(), &s.bytes)
                .map(|view| (s.name, view))
                .map_err(|e| Error::Serialization(format!("archive slot {}: {e}", s.name)))
        })
        .collect::<Result<_>>()?;

    let payload = safetensors::serialize(views, &Some(metadata))
        .map_err(|e| Error::Serialization(format!("archive serialization failed: {e}")))?;
    std::fs::write(path, payload)?;
    Ok(())
}

/// Read a slot as `f32` values. `None` if the slot is missing or its dtype
/// does not match.
pub(crate) fn slot_f32(st: &SafeTensors, name: &str) -> Option<Vec<f32>> {
    let view = st.tensor(name).ok()?;
    if view.dtype() != Dtype::F32 {
        return None;
    }
    Some(bytemuck::pod_collect_to_vec(view.data()))
}

/// Read a 2-dimensional `f32` slot together with its shape.
pub(crate) fn slot_f32_2d(st: &SafeTensors, name: &str) -> Option<(usize, usize, Vec<f32>)> {
    let view = st.tensor(name).ok()?;
    if view.dtype() != Dtype::F32 || view.shape().len() != 2 {
        return None;
    }
    let (rows, cols) = (view.shape()[0], view.shape()[1]);
    Some((rows, cols, bytemuck::pod_collect_to_vec(view.data())))
}

/// Read a slot as `u32` values converted to `usize`.
pub(crate) fn slot_u32(st: &SafeTensors, name: &str) -> Option<Vec<usize>> {
    let view = st.tensor(name).ok()?;
    if view.dtype() != Dtype::U32 {
        return None;
    }
    let values: Vec<u32> = bytemuck::pod_collect_to_vec(view.data());
    Some(values.into_iter().map(|v| v as usize).collect())
}

/// Read a slot as `u64` values converted to `usize`.
pub(crate) fn slot_u64(st: &SafeTensors, name: &str) -> Option<Vec<usize>> {
    let view = st.tensor(name).ok()?;
    if view.dtype() != Dtype::U64 {
        return None;
    }
    let values: Vec<u64> = bytemuck::pod_collect_to_vec(view.data());
    Some(values.into_iter().map(|v| v as usize).collect())
}

/// Write a compressed-row matrix as a native archive. The `container` tag
/// distinguishes a bare CSR archive from one wrapped by the row-fast
/// structure, so the two native formats cannot be confused on load.
pub(crate) fn write_native(path: &Path, container: &str, matrix: &CsrMatrix) -> Result<()> {
    let indptr: Vec<u64> = matrix.indptr().iter().map(|&v| v as u64).collect();
    let indices: Vec<u64> = matrix.col_indices().iter().map(|&v| v as u64).collect();
    let shape = [matrix.rows() as u64, matrix.cols() as u64];

    let mut metadata = HashMap::new();
    metadata.insert("container".to_string(), container.to_string());

    let slots = [
        Slot::u64("indptr", &indptr),
        Slot::u64("indices", &indices),
        Slot::f32("data", matrix.values()),
        Slot::u64("shape", &shape),
    ];
    write_archive(path, metadata, &slots)
}

/// Read a native archive written by [`write_native`], verifying the
/// container tag.
pub(crate) fn read_native(path: &Path, container: &str) -> Result<CsrMatrix> {
    let buf = std::fs::read(path)?;

    let (_, header) = SafeTensors::read_metadata(&buf)
        .map_err(|e| Error::Serialization(format!("archive parsing failed: {e}")))?;
    let found = header
        .metadata()
        .as_ref()
        .and_then(|m| m.get("container").cloned())
        .ok_or_else(|| Error::Serialization("archive has no container tag".to_string()))?;
    if found != container {
        return Err(Error::Serialization(format!(
            "archive holds a {found} matrix, expected {container}"
        )));
    }

    let st = SafeTensors::deserialize(&buf)
        .map_err(|e| Error::Serialization(format!("archive parsing failed: {e}")))?;

    let missing = |name: &str| Error::Serialization(format!("archive is missing slot {name}"));
    let indptr = slot_u64(&st, "indptr").ok_or_else(|| missing("indptr"))?;
    let indices = slot_u64(&st, "indices").ok_or_else(|| missing("indices"))?;
    let data = slot_f32(&st, "data").ok_or_else(|| missing("data"))?;
    let shape = slot_u64(&st, "shape").ok_or_else(|| missing("shape"))?;

    let consistent = shape.len() == 2
        && indptr.len() == shape[0] + 1
        && indptr.first() == Some(&0)
        && indptr.windows(2).all(|w| w[0] <= w[1])
        && indptr.last() == Some(&indices.len())
        && indices.len() == data.len()
        && indices.iter().all(|&c| c < shape[1]);
    if !consistent {
        return Err(Error::Serialization(
            "archive slots are inconsistent".to_string(),
        ));
    }

    Ok(CsrMatrix::from_parts(
        shape[0], shape[1], indptr, indices, data,
    ))
}
