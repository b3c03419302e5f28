use std::ops::Range;

/// Half-open index range `[from, to)` handed to one worker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Chunk {
    pub from: u64,
    pub to: u64,
}

impl Chunk {
    pub fn len(&self) -> u64 { self.to - self.from }
    pub fn is_empty(&self) -> bool { self.from == self.to }
    pub fn indices(&self) -> Range<u64> { self.from..self.to }
}

/// Split `[0, total)` into chunks of `max(1, total / n_chunks)` indices.
/// A remainder gets its own trailing chunk, clipped at `total`.
pub fn plan_chunks(total: u64, n_chunks: usize) -> Vec<Chunk> {
    if total == 0 {
        return Vec::new();
    }
    let size = (total / n_chunks.max(1) as u64).max(1);
    let count = total.div_ceil(size);
    (0..count)
        .map(|i| Chunk { from: i * size, to: ((i + 1) * size).min(total) })
        .collect()
}
