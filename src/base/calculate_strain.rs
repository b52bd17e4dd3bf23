use super::Config;
use crate::StrError;
use russell_lab::Vector;
use russell_tensor::Tensor2;

/// Calculates the total strain tensor from displacement gradients
///
/// ```text
/// ε = (∇u + ∇uᵀ) / 2
/// ```
///
/// # Input
///
/// * `eps` -- The strain tensor with the Mandel representation of `config`
/// * `grads` -- One gradient vector per active displacement field, with
///   `config.ndim` entries of dimension `config.ndim` each, such that
///   `grads[i][j] = ∂uᵢ/∂xⱼ`
#[rustfmt::skip]
pub fn calculate_strain(eps: &mut Tensor2, grads: &[Vector], config: &Config) -> Result<(), StrError> {
    if grads.len() != config.ndim {
        return Err("the number of displacement gradients must equal ndim");
    }
    for g in grads {
        if g.dim() != config.ndim {
            return Err("the dimension of each displacement gradient must equal ndim");
        }
    }
    assert_eq!(eps.mandel(), config.mandel());
    eps.clear();
    match config.ndim {
        1 => {
            eps.sym_set(0, 0, grads[0][0]);
        }
        2 => {
            eps.sym_set(0, 0, grads[0][0]);
            eps.sym_set(1, 1, grads[1][1]);
            eps.sym_set(0, 1, (grads[0][1] + grads[1][0]) / 2.0);
        }
        _ => {
            eps.sym_set(0, 0, grads[0][0]);
            eps.sym_set(1, 1, grads[1][1]);
            eps.sym_set(2, 2, grads[2][2]);
            eps.sym_set(0, 1, (grads[0][1] + grads[1][0]) / 2.0);
            eps.sym_set(1, 2, (grads[1][2] + grads[2][1]) / 2.0);
            eps.sym_set(0, 2, (grads[0][2] + grads[2][0]) / 2.0);
        }
    }
    Ok(())
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
