//! Partial-page consumption of provider pages.
//!
//! The provider's page size and the display batch size are independent, so
//! one provider page usually feeds several display batches. The buffer is
//! indexed in provider pages only; the next page number is never derived
//! from how many cards are on screen.

use std::collections::HashSet;

use crate::provider::{Card, ProviderPage};

/// What the next load-more has to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorStep {
    /// Unconsumed cards remain in the buffer.
    Consume,
    /// The buffer is spent; fetch this provider page.
    Fetch { page: u32 },
    /// The buffer is spent and the provider has nothing after it.
    Exhausted,
}

/// The most recently fetched provider page.
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderPageBuffer {
    /// 1-based provider page index.
    pub page_index: u32,
    /// The page exactly as the provider returned it.
    pub items: Vec<Card>,
    /// How many of `items` have been handed to the display list.
    pub consumed_count: usize,
    /// Provider reported pages after this one.
    pub provider_has_more: bool,
}

impl ProviderPageBuffer {
    pub fn new(page_index: u32, page: ProviderPage) -> Self {
        Self {
            page_index,
            items: page.items,
            consumed_count: 0,
            provider_has_more: page.has_more,
        }
    }

    pub fn remaining(&self) -> usize {
        self.items.len() - self.consumed_count
    }

    pub fn is_exhausted(&self) -> bool {
        self.consumed_count >= self.items.len()
    }

    pub fn plan(&self) -> CursorStep {
        if !self.is_exhausted() {
            CursorStep::Consume
        } else if self.provider_has_more {
            CursorStep::Fetch {
                page: self.page_index + 1,
            }
        } else {
            CursorStep::Exhausted
        }
    }

    /// Consume up to `batch_size` cards that are not already in `loaded`.
    ///
    /// Duplicates still advance `consumed_count`, so a page overlapping the
    /// previous one cannot stall the cursor.
    pub fn take_batch(&mut self, batch_size: usize, loaded: &[Card]) -> Vec<Card> {
        let mut seen: HashSet<&str> = loaded.iter().map(|c| c.id.as_str()).collect();
        let mut batch = Vec::with_capacity(batch_size.min(self.remaining()));

        while batch.len() < batch_size && self.consumed_count < self.items.len() {
            let card = &self.items[self.consumed_count];
            self.consumed_count += 1;
            if seen.insert(card.id.as_str()) {
                batch.push(card.clone());
            }
        }

        batch
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(range: std::ops::Range<usize>, has_more: bool) -> ProviderPage {
        ProviderPage {
            items: range
                .map(|i| Card::new(format!("card-{i}"), format!("Card {i}")))
                .collect(),
            total_count: 260,
            has_more,
        }
    }

    #[test]
    fn consumes_one_page_across_batches() {
        let mut buffer = ProviderPageBuffer::new(1, page(0..175, true));
        let mut loaded = Vec::new();

        for expected in [75, 150, 175] {
            assert_eq!(buffer.plan(), CursorStep::Consume);
            let batch = buffer.take_batch(75, &loaded);
            loaded.extend(batch);
            assert_eq!(loaded.len(), expected);
        }

        assert_eq!(buffer.consumed_count, 175);
        assert_eq!(buffer.plan(), CursorStep::Fetch { page: 2 });
    }

    #[test]
    fn last_page_is_exhausted_not_fetched() {
        let mut buffer = ProviderPageBuffer::new(2, page(175..260, false));
        let batch = buffer.take_batch(100, &[]);
        assert_eq!(batch.len(), 85);
        assert_eq!(buffer.plan(), CursorStep::Exhausted);
    }

    #[test]
    fn duplicates_are_skipped_but_consumed() {
        let mut buffer = ProviderPageBuffer::new(2, page(170..180, true));
        let loaded: Vec<Card> = page(165..175, true).items;

        let batch = buffer.take_batch(3, &loaded);
        let ids: Vec<&str> = batch.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["card-175", "card-176", "card-177"]);
        assert_eq!(buffer.consumed_count, 8);
    }

    #[test]
    fn empty_page_plans_from_provider_flag() {
        let buffer = ProviderPageBuffer::new(1, ProviderPage::empty());
        assert!(buffer.is_exhausted());
        assert_eq!(buffer.plan(), CursorStep::Exhausted);
    }
}
