use rand::Rng;

/// Normalizes a configured sample count: only positive values sample.
pub fn sample_size(count: Option<i64>) -> Option<usize> {
    match count {
        Some(c) if c > 0 => Some(usize::try_from(c).unwrap_or(usize::MAX)),
        _ => None,
    }
}

/// Fisher–Yates shuffle of a copy of `items`. The input is left untouched.
pub fn shuffled<T: Clone, R: Rng>(items: &[T], rng: &mut R) -> Vec<T> {
    let mut copy = items.to_vec();
    for i in (1..copy.len()).rev() {
        let j = rng.gen_range(0..=i);
        copy.swap(i, j);
    }
    copy
}

/// The first `limit` elements of a shuffled copy, or everything in original
/// order when there is no limit.
pub fn sample<T: Clone, R: Rng>(items: &[T], limit: Option<usize>, rng: &mut R) -> Vec<T> {
    match limit {
        None => items.to_vec(),
        Some(n) => {
            let mut picked = shuffled(items, rng);
            picked.truncate(n);
            picked
        }
    }
}
