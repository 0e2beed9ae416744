//! # Pager
//!
//! Splits an executed result list into pages and clamps the requested page
//! into range. The page actually delivered is written back into the option
//! set as `page`, so "next"/"previous" links are built from what the user is
//! looking at, not from what they asked for.
//!
//! Requests below range or that are not integers get page 1; requests above
//! range get the last page. A short trailing page of up to `orphans` items is
//! folded into the page before it.

use crate::options::{validate_integer, OptionKey, OptionSet};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paginator {
    pub per_page: usize,
    pub orphans: usize,
}

impl Default for Paginator {
    fn default() -> Self {
        Self {
            per_page: 10,
            orphans: 3,
        }
    }
}

/// One page of results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// 1-based page number.
    pub number: usize,
    pub num_pages: usize,
    /// Total items across all pages.
    pub count: usize,
}

impl<T> Page<T> {
    pub fn has_previous(&self) -> bool {
        self.number > 1
    }

    pub fn has_next(&self) -> bool {
        self.number < self.num_pages
    }

    /// 1-based index of the first item on this page, 0 when empty.
    pub fn start_index(&self, paginator: &Paginator) -> usize {
        if self.count == 0 {
            0
        } else {
            (self.number - 1) * paginator.per_page.max(1) + 1
        }
    }

    /// 1-based index of the last item on this page, 0 when empty.
    pub fn end_index(&self, paginator: &Paginator) -> usize {
        if self.count == 0 {
            0
        } else {
            self.start_index(paginator) + self.items.len() - 1
        }
    }

    /// Converts the items of this page, keeping its position.
    pub fn try_map_items<U, E>(
        self,
        f: impl FnOnce(Vec<T>) -> std::result::Result<Vec<U>, E>,
    ) -> std::result::Result<Page<U>, E> {
        Ok(Page {
            items: f(self.items)?,
            number: self.number,
            num_pages: self.num_pages,
            count: self.count,
        })
    }
}

impl Paginator {
    pub fn new(per_page: usize, orphans: usize) -> Self {
        Self { per_page, orphans }
    }

    /// Number of pages for `count` items. Never less than one.
    pub fn num_pages(&self, count: usize) -> usize {
        let per_page = self.per_page.max(1);
        if count == 0 {
            return 1;
        }
        let hits = count.saturating_sub(self.orphans).max(1);
        hits.div_ceil(per_page)
    }

    /// Clamps `requested` into `1..=num_pages(count)`.
    pub fn clamp(&self, requested: Option<i64>, count: usize) -> usize {
        let last = self.num_pages(count);
        match requested {
            Some(n) if n < 1 => 1,
            Some(n) if n as u64 > last as u64 => last,
            Some(n) => n as usize,
            None => 1,
        }
    }

    /// Delivers the page named by the `page` option and the option set with
    /// `page` set to the page delivered.
    pub fn paginate<T>(&self, items: Vec<T>, options: &OptionSet) -> (Page<T>, OptionSet) {
        let key = OptionKey::Page.as_str();
        let requested = validate_integer(options, key);
        let count = items.len();
        let number = self.clamp(requested.value, count);

        let mut effective = requested.options;
        effective.insert(key, number.to_string());

        (self.page(items, number), effective)
    }

    /// Page `number`, which must already be in range.
    fn page<T>(&self, items: Vec<T>, number: usize) -> Page<T> {
        let per_page = self.per_page.max(1);
        let count = items.len();
        let bottom = (number - 1) * per_page;
        let mut top = bottom + per_page;
        if top + self.orphans >= count {
            top = count;
        }

        Page {
            items: items.into_iter().skip(bottom).take(top - bottom).collect(),
            number,
            num_pages: self.num_pages(count),
            count,
        }
    }
}
