//! Enumeration primitives for the generators. All of these materialize their
//! results; the spaces involved are small (operand counts, operator slots),
//! never the full candidate product.

/// Every permutation of `items`, in generation order. Duplicated items yield
/// duplicated permutations; see [`distinct_permutations`].
pub fn permutations<T: Clone>(items: &[T]) -> Vec<Vec<T>> {
    if items.len() <= 1 {
        return vec![items.to_vec()];
    }
    let mut result = Vec::new();
    for i in 0..items.len() {
        let mut rest = items.to_vec();
        let current = rest.remove(i);
        for perm in permutations(&rest) {
            let mut full = Vec::with_capacity(items.len());
            full.push(current.clone());
            full.extend(perm);
            result.push(full);
        }
    }
    result
}

/// Permutations with duplicates collapsed, for operand identity conflicts
/// (repeated values in a concrete tuple).
pub fn distinct_permutations<T: Clone + PartialEq>(items: &[T]) -> Vec<Vec<T>> {
    let mut seen: Vec<Vec<T>> = Vec::new();
    for perm in permutations(items) {
        if !seen.contains(&perm) {
            seen.push(perm);
        }
    }
    seen
}

/// Every `size`-element subset of `0..n`, ascending within each subset,
/// lexicographic across subsets.
pub fn index_combinations(n: usize, size: usize) -> Vec<Vec<usize>> {
    fn walk(start: usize, n: usize, size: usize, current: &mut Vec<usize>, out: &mut Vec<Vec<usize>>) {
        if current.len() == size {
            out.push(current.clone());
            return;
        }
        for i in start..n {
            current.push(i);
            walk(i + 1, n, size, current, out);
            current.pop();
        }
    }
    let mut out = Vec::new();
    let mut current = Vec::with_capacity(size);
    walk(0, n, size, &mut current, &mut out);
    out
}

/// Every multiset of `count` items drawn from `items`, each emitted as a
/// sorted-by-source-order vector.
pub fn multisets<T: Clone>(items: &[T], count: usize) -> Vec<Vec<T>> {
    fn walk<T: Clone>(items: &[T], remaining: usize, prefix: &mut Vec<T>, out: &mut Vec<Vec<T>>) {
        if items.len() == 1 {
            let mut multiset = prefix.clone();
            multiset.extend(std::iter::repeat(items[0].clone()).take(remaining));
            out.push(multiset);
            return;
        }
        for copies in 0..=remaining {
            let len_before = prefix.len();
            prefix.extend(std::iter::repeat(items[0].clone()).take(copies));
            walk(&items[1..], remaining - copies, prefix, out);
            prefix.truncate(len_before);
        }
    }
    if items.is_empty() {
        return if count == 0 { vec![Vec::new()] } else { Vec::new() };
    }
    let mut out = Vec::new();
    let mut prefix = Vec::new();
    walk(items, count, &mut prefix, &mut out);
    out
}
