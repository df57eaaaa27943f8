use rand::Rng;
use rand::thread_rng;

/// Fisher-Yates permutation of `items` into a new vector. The input is left
/// untouched and every one of the n! orderings is equally likely given an
/// unbiased source. Sequences of length <= 1 come back unchanged.
pub fn shuffled<T: Clone>(items: &[T]) -> Vec<T> {
    let mut out = items.to_vec();
    let mut rng = thread_rng();
    for i in (1..out.len()).rev() {
        let j = rng.gen_range(0..=i);
        out.swap(i, j);
    }
    out
}
