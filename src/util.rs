use std::cmp::Ordering;

#[derive(PartialEq)]
pub struct OrdWrapper<'a, T: PartialOrd>(pub &'a T);

impl<'a, T: PartialOrd> Eq for OrdWrapper<'a, T> {}

impl<'a, T: PartialOrd> PartialOrd for OrdWrapper<'a, T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<'a, T: PartialOrd> Ord for OrdWrapper<'a, T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.partial_cmp(other.0).unwrap_or(Ordering::Equal)
    }
}

/// Index of the first maximal element.
pub fn argmax<T: PartialOrd>(iter: impl Iterator<Item = T>) -> Option<usize> {
    let mut best: Option<(usize, T)> = None;
    for (i, v) in iter.enumerate() {
        let better = match &best {
            Some((_, b)) => OrdWrapper(&v) > OrdWrapper(b),
            None => true,
        };
        if better {
            best = Some((i, v));
        }
    }
    best.map(|(i, _)| i)
}

/// Indices of all elements equal to the maximum, in order.
///
/// Uses the same order as [`argmax`], so its result is always included.
pub fn maximal_indices(values: &[f64]) -> Vec<usize> {
    match argmax(values.iter()) {
        Some(i) => {
            let max = OrdWrapper(&values[i]);
            (0..values.len())
                .filter(|&j| OrdWrapper(&values[j]).cmp(&max) == Ordering::Equal)
                .collect()
        }
        None => Vec::new(),
    }
}
