pub fn wraparound_get<T>(vec: &[T], idx: isize) -> &T {
    let len = vec.len() as isize;
    let idx = idx % len;
    let idx = if idx >= 0 { idx } else { idx + len };
    &vec[idx as usize]
}

/// Every consecutive pair. When `wrap` is set, the last item pairs with the first one.
pub fn adjacent_pairs<T>(items: &[T], wrap: bool) -> Vec<(&T, &T)> {
    let n = items.len();
    if n < 2 {
        return Vec::new();
    }
    let count = if wrap { n } else { n - 1 };
    (0..count)
        .map(|i| (&items[i], wraparound_get(items, i as isize + 1)))
        .collect()
}

/// Every consecutive triple. When `wrap` is set, triples continue around the end, so there are as
/// many triples as items.
pub fn adjacent_triples<T>(items: &[T], wrap: bool) -> Vec<(&T, &T, &T)> {
    let n = items.len();
    if n < 3 {
        return Vec::new();
    }
    let count = if wrap { n } else { n - 2 };
    (0..count)
        .map(|i| {
            let i = i as isize;
            (
                wraparound_get(items, i),
                wraparound_get(items, i + 1),
                wraparound_get(items, i + 2),
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wraparound() {
        let v = vec![1, 2, 3];
        assert_eq!(*wraparound_get(&v, -1), 3);
        assert_eq!(*wraparound_get(&v, 4), 2);
    }

    #[test]
    fn pairs_and_triples() {
        let v = vec!['a', 'b', 'c', 'd'];
        assert_eq!(adjacent_pairs(&v, false).len(), 3);
        assert_eq!(adjacent_pairs(&v, true).last(), Some(&(&'d', &'a')));
        assert_eq!(adjacent_triples(&v, false), vec![(&'a', &'b', &'c'), (&'b', &'c', &'d')]);
        assert_eq!(adjacent_triples(&v, true)[3], (&'d', &'a', &'b'));
        assert!(adjacent_triples(&v[0..2], true).is_empty());
    }
}
