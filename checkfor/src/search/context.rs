/// Lines in `[index - n, index)`, clamped to the start of the slice
pub fn before<T>(lines: &[T], index: usize, n: usize) -> &[T] {
    let end = index.min(lines.len());
    let start = end.saturating_sub(n);
    &lines[start..end]
}

/// Lines in `(index, index + n]`, clamped to the end of the slice
pub fn after<T>(lines: &[T], index: usize, n: usize) -> &[T] {
    if index >= lines.len() {
        return &[];
    }
    let start = index + 1;
    let end = index.saturating_add(n).saturating_add(1).min(lines.len());
    &lines[start..end]
}
