//! Stateless slicing of an already-fetched list

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub index: usize,
    pub size: usize,
}

impl PageRequest {
    pub fn new(index: usize, size: usize) -> Self {
        Self { index, size }
    }

    pub fn first(size: usize) -> Self {
        Self { index: 0, size }
    }

    /// Changing the page size goes back to the first page
    pub fn with_size(self, size: usize) -> Self {
        Self::first(size)
    }
}

/// Rows of page `request.index`; empty past the end or for a zero size
pub fn paginate<T>(items: &[T], request: PageRequest) -> &[T] {
    if request.size == 0 {
        return &[];
    }
    let start = request.index.saturating_mul(request.size).min(items.len());
    let end = start.saturating_add(request.size).min(items.len());
    &items[start..end]
}

pub fn page_count(len: usize, size: usize) -> usize {
    if size == 0 {
        0
    } else {
        len.div_ceil(size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slices_pages() {
        let items: Vec<u32> = (1..=12).collect();
        assert_eq!(paginate(&items, PageRequest::new(0, 5)), &[1, 2, 3, 4, 5]);
        assert_eq!(paginate(&items, PageRequest::new(2, 5)), &[11, 12]);
        assert!(paginate(&items, PageRequest::new(3, 5)).is_empty());
        assert!(paginate(&items, PageRequest::new(0, 0)).is_empty());
        assert_eq!(page_count(items.len(), 5), 3);
        assert_eq!(page_count(0, 5), 0);
    }

    #[test]
    fn slicing_is_repeatable() {
        let items = vec!["a", "b", "c", "d"];
        let request = PageRequest::new(1, 3);
        assert_eq!(paginate(&items, request), paginate(&items, request));
        assert_eq!(items, vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn huge_indexes_do_not_overflow() {
        let items = vec![1, 2, 3];
        assert!(paginate(&items, PageRequest::new(usize::MAX, usize::MAX)).is_empty());
    }

    #[test]
    fn resizing_resets_index() {
        assert_eq!(PageRequest::new(3, 5).with_size(10), PageRequest::first(10));
    }
}
