/// Splits `items` into contiguous slices of at most `max` elements.
///
/// Order is preserved and only the last slice may be shorter. An empty
/// input yields no slices. A `max` of zero is treated as one.
pub fn split<T>(items: &[T], max: usize) -> std::slice::Chunks<'_, T> {
    items.chunks(max.max(1))
}
