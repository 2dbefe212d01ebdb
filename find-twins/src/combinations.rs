pub struct PairIter<'a, T> {
    items: &'a [T],
    i: usize,
    j: usize,
}

impl<'a, T> PairIter<'a, T> {
    pub const fn new(items: &'a [T]) -> Self {
        Self { items, i: 0, j: 1 }
    }
}

impl<'a, T> Iterator for PairIter<'a, T> {
    type Item = (&'a T, &'a T);

    fn next(&mut self) -> Option<Self::Item> {
        if self.j >= self.items.len() {
            self.i += 1;
            self.j = self.i + 1;
            if self.j >= self.items.len() {
                return None;
            }
        }
        let pair = (&self.items[self.i], &self.items[self.j]);
        self.j += 1;
        Some(pair)
    }
}

/// Number of 2-combinations out of `n` items.
pub const fn num_pairs(n: usize) -> usize {
    n * n.saturating_sub(1) / 2
}
