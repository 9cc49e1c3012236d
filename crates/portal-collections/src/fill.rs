//! Random-fill construction.

use rand::Rng;
use tracing::trace;

use crate::error::{CollectionError, Result};

/// Builds a vector of `len` values, each drawn uniformly (with replacement)
/// from `fillers`, using the thread-local RNG.
///
/// Output is not reproducible; use [`random_fill_with`] with a seeded RNG
/// when it has to be.
///
/// # Errors
///
/// [`CollectionError::NoFillers`] if `fillers` is empty, whatever `len` is.
///
/// # Example
///
/// ```
/// use portal_collections::random_fill;
///
/// let shades = random_fill(8, &["light", "dark"]).unwrap();
/// assert_eq!(shades.len(), 8);
/// assert!(shades.iter().all(|s| *s == "light" || *s == "dark"));
/// ```
pub fn random_fill<T: Clone>(len: usize, fillers: &[T]) -> Result<Vec<T>> {
    random_fill_with(&mut rand::rng(), len, fillers)
}

/// Like [`random_fill`], drawing from a caller-supplied RNG.
pub fn random_fill_with<T, R>(rng: &mut R, len: usize, fillers: &[T]) -> Result<Vec<T>>
where
    T: Clone,
    R: Rng + ?Sized,
{
    if fillers.is_empty() {
        return Err(CollectionError::NoFillers);
    }

    trace!(len, fillers = fillers.len(), "random fill");
    Ok((0..len)
        .map(|_| fillers[rng.random_range(0..fillers.len())].clone())
        .collect())
}
