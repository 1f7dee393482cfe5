//! # Paginated List Controller
//!
//! Presents an in-memory collection in fixed-size pages with forward/back
//! navigation. The same controller drives the product search view (page
//! size 5) and the recipe browser (page size 3): callers refresh the item
//! set after every mutation and re-render from [`Pager::page_items`].

type Filter<T> = Box<dyn Fn(&T) -> bool>;

/// Fixed-page-size view over a filtered collection.
///
/// The page index is zero based and always clamped into
/// `[0, total_pages - 1]`; an empty filtered set still counts as one page so
/// the view can render a "1 / 1" placeholder with navigation disabled.
pub struct Pager<T> {
    items: Vec<T>,
    filter: Option<Filter<T>>,
    page_size: usize,
    page_index: usize,
}

impl<T> Pager<T> {
    /// Create an empty pager. `page_size` must be positive.
    pub fn new(page_size: usize) -> Self {
        assert!(page_size > 0, "page size must be positive");
        Self {
            items: Vec::new(),
            filter: None,
            page_size,
            page_index: 0,
        }
    }

    /// Replace the full item set (a refresh from the collaborator) and
    /// clamp the current page into the new range.
    pub fn set_items(&mut self, items: Vec<T>) {
        self.items = items;
        self.clamp_page_index();
    }

    /// Install or clear the filter predicate; resets to the first page.
    pub fn set_filter(&mut self, filter: Option<Filter<T>>) {
        self.filter = filter;
        self.page_index = 0;
    }

    fn matches(&self, item: &T) -> bool {
        match &self.filter {
            Some(predicate) => predicate(item),
            None => true,
        }
    }

    /// Items passing the current filter, in collection order.
    pub fn filtered(&self) -> Vec<&T> {
        self.items.iter().filter(|item| self.matches(item)).collect()
    }

    fn filtered_len(&self) -> usize {
        self.items.iter().filter(|item| self.matches(item)).count()
    }

    /// Page count with a floor of one page for the empty set.
    pub fn total_pages(&self) -> usize {
        self.filtered_len().div_ceil(self.page_size).max(1)
    }

    pub fn page_index(&self) -> usize {
        self.page_index
    }

    /// The "N / M" pager label, 1-based.
    pub fn label(&self) -> String {
        format!("{} / {}", self.page_index + 1, self.total_pages())
    }

    pub fn has_prev(&self) -> bool {
        self.page_index > 0
    }

    pub fn has_next(&self) -> bool {
        self.page_index + 1 < self.total_pages()
    }

    /// Step forward; no-op on the last page. Returns whether the page moved.
    pub fn next_page(&mut self) -> bool {
        if self.has_next() {
            self.page_index += 1;
            true
        } else {
            false
        }
    }

    /// Step back; no-op on the first page. Returns whether the page moved.
    pub fn prev_page(&mut self) -> bool {
        if self.has_prev() {
            self.page_index -= 1;
            true
        } else {
            false
        }
    }

    /// The slice of filtered items visible on the current page.
    pub fn page_items(&self) -> Vec<&T> {
        let start = self.page_index * self.page_size;
        self.items
            .iter()
            .filter(|item| self.matches(item))
            .skip(start)
            .take(self.page_size)
            .collect()
    }

    /// Account for one item about to disappear from the filtered set: if it
    /// was the last one on a non-first page, step back so the view never
    /// shows a page past the new end. Called before the item set is
    /// refreshed, against the pre-deletion counts.
    pub fn note_removed(&mut self) {
        let remaining = self.filtered_len().saturating_sub(1);
        if self.page_index > 0 && self.page_index * self.page_size >= remaining {
            self.page_index -= 1;
        }
    }

    fn clamp_page_index(&mut self) {
        let last = self.total_pages() - 1;
        if self.page_index > last {
            self.page_index = last;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pager_with(n: usize, page_size: usize) -> Pager<usize> {
        let mut pager = Pager::new(page_size);
        pager.set_items((0..n).collect());
        pager
    }

    #[test]
    fn test_page_math() {
        let pager = pager_with(12, 5);
        assert_eq!(pager.total_pages(), 3);
        assert_eq!(pager.label(), "1 / 3");
        assert_eq!(pager.page_items(), vec![&0, &1, &2, &3, &4]);
    }

    #[test]
    fn test_empty_set_is_one_page() {
        let pager = pager_with(0, 5);
        assert_eq!(pager.total_pages(), 1);
        assert_eq!(pager.label(), "1 / 1");
        assert!(!pager.has_prev());
        assert!(!pager.has_next());
        assert!(pager.page_items().is_empty());
    }

    #[test]
    fn test_navigation_stops_at_edges() {
        let mut pager = pager_with(7, 5);
        assert!(!pager.prev_page());
        assert!(pager.next_page());
        assert_eq!(pager.label(), "2 / 2");
        assert_eq!(pager.page_items(), vec![&5, &6]);
        assert!(!pager.next_page());
        assert!(pager.prev_page());
        assert_eq!(pager.page_index(), 0);
    }

    #[test]
    fn test_filter_resets_to_first_page() {
        let mut pager = pager_with(12, 5);
        pager.next_page();
        pager.set_filter(Some(Box::new(|n: &usize| n % 2 == 0)));
        assert_eq!(pager.page_index(), 0);
        assert_eq!(pager.filtered().len(), 6);
        assert_eq!(pager.total_pages(), 2);
    }

    #[test]
    fn test_refresh_clamps_page_index() {
        let mut pager = pager_with(12, 5);
        pager.next_page();
        pager.next_page();
        assert_eq!(pager.page_index(), 2);

        pager.set_items((0..4).collect());
        assert_eq!(pager.page_index(), 0);
        assert_eq!(pager.total_pages(), 1);
    }

    #[test]
    fn test_note_removed_steps_back_from_emptied_last_page() {
        // 11 items, page size 5: page 3 holds only the 11th. Deleting it
        // satisfies 2 * 5 >= 11 - 1 and the view steps back to page 2.
        let mut pager = pager_with(11, 5);
        pager.next_page();
        pager.next_page();
        pager.note_removed();
        assert_eq!(pager.page_index(), 1);
    }

    #[test]
    fn test_note_removed_keeps_last_page_while_it_still_has_items() {
        // 12 items: page 3 holds two, so removing one keeps the view there.
        let mut pager = pager_with(12, 5);
        pager.next_page();
        pager.next_page();
        pager.note_removed();
        assert_eq!(pager.page_index(), 2);

        // And a removal from a full middle page stays put as well.
        let mut pager = pager_with(12, 5);
        pager.next_page();
        pager.note_removed();
        assert_eq!(pager.page_index(), 1);
    }

    #[test]
    fn test_note_removed_never_leaves_first_page() {
        let mut pager = pager_with(1, 5);
        pager.note_removed();
        assert_eq!(pager.page_index(), 0);
    }
}
