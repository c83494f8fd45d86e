//! Random line sampling for `pickline`.

use rand::seq::index;
use std::io::BufRead;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SampleError {
    #[error("asked for {wanted} lines but the input only has {available}")]
    NotEnoughLines { wanted: usize, available: usize },
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Sample `k` distinct lines from `reader`, in random order.
pub fn sample_lines<R: BufRead>(reader: R, k: usize) -> Result<Vec<String>, SampleError> {
    let lines = reader.lines().collect::<Result<Vec<_>, _>>()?;
    if k > lines.len() {
        return Err(SampleError::NotEnoughLines {
            wanted: k,
            available: lines.len(),
        });
    }

    let mut rng = rand::rng();
    let picked = index::sample(&mut rng, lines.len(), k);
    Ok(picked.iter().map(|i| lines[i].clone()).collect())
}
