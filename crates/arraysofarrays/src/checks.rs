//! Consistency checking policies for raw-table adoption.
//!
//! When a `VectorOfArrays` adopts caller-built tables, the requested policy
//! decides how much validation runs. Mirrors ArraysOfArrays.jl's
//! `no_consistency_checks`, `simple_consistency_checks` and
//! `full_consistency_checks`.

use crate::dims::{total_size, Dims};
use crate::error::ArrayError;

/// Validation level applied when adopting externally supplied tables.
///
/// Represented as a closed set of strategies selected at construction, so the
/// trusted hot path (`None`) carries no dispatch overhead.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ConsistencyChecks {
    /// No validation. O(1). For trusted, performance-critical call sites.
    None,
    /// O(n) element-pointer checks: starts at 0, non-decreasing, ends at the
    /// flat data length; kernel-shape table (if any) has one entry per
    /// element. Does not verify per-element shape/size agreement.
    Simple,
    /// `Simple` plus per-element checks: every kernel shape has the element
    /// rank and its product equals the segment length.
    #[default]
    Full,
}

/// Validate `(data, elem_ptr, kernel_size)` under a checking policy.
///
/// Reports the first violated invariant only.
///
/// # Errors
///
/// Returns `ArrayError::InvalidStructure` naming the violation.
pub fn validate_structure(
    data_len: usize,
    elem_ptr: &[usize],
    kernel_size: Option<&[Dims]>,
    elem_ndims: usize,
    checks: ConsistencyChecks,
) -> Result<(), ArrayError> {
    if checks == ConsistencyChecks::None {
        return Ok(());
    }

    // Simple checks.
    if elem_ptr.is_empty() {
        return invalid("element pointer table is empty".to_string());
    }
    if elem_ptr[0] != 0 {
        return invalid(format!(
            "element pointer table must start at 0, got {}",
            elem_ptr[0]
        ));
    }
    let last = elem_ptr[elem_ptr.len() - 1];
    if last != data_len {
        return invalid(format!(
            "element pointer table must end at the flat data length {data_len}, got {last}"
        ));
    }
    for (i, w) in elem_ptr.windows(2).enumerate() {
        if w[1] < w[0] {
            return invalid(format!(
                "element pointer table decreases at entry {} ({} < {})",
                i + 1,
                w[1],
                w[0]
            ));
        }
    }
    let n_elems = elem_ptr.len() - 1;
    if let Some(kernel_size) = kernel_size {
        if kernel_size.len() != n_elems {
            return invalid(format!(
                "kernel size table has {} entries for {} elements",
                kernel_size.len(),
                n_elems
            ));
        }
    }

    if checks == ConsistencyChecks::Simple {
        return Ok(());
    }

    // Full checks.
    if let Some(kernel_size) = kernel_size {
        for (i, shape) in kernel_size.iter().enumerate() {
            if shape.len() != elem_ndims {
                return invalid(format!(
                    "kernel size of element {} has rank {}, expected {}",
                    i,
                    shape.len(),
                    elem_ndims
                ));
            }
            let seg_len = elem_ptr[i + 1] - elem_ptr[i];
            let prod = total_size(shape);
            if prod != seg_len {
                return invalid(format!(
                    "kernel size product {prod} of element {i} does not match segment length {seg_len}"
                ));
            }
        }
    }
    Ok(())
}

fn invalid(reason: String) -> Result<(), ArrayError> {
    Err(ArrayError::InvalidStructure { reason })
}
