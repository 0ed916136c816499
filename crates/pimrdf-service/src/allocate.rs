//! Entity identifier allocation.

use std::collections::HashSet;

use pimrdf_core::util::slug::generate_slug;

/// Hands out identifiers that are unique for the allocator's lifetime.
///
/// Named records get `<prefix>-<slug>`; nameless records, and named records
/// whose slug is already taken, get `<prefix>-NNN` from a counter. Every
/// token returned is reserved, so slug and counter tokens never collide.
#[derive(Debug, Clone)]
pub struct EntityAllocator {
    prefix: String,
    counter: u32,
    reserved: HashSet<String>,
}

impl EntityAllocator {
    #[must_use]
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            counter: 1,
            reserved: HashSet::new(),
        }
    }

    /// Next counter value that a fallback token will start from.
    #[must_use]
    pub fn counter(&self) -> u32 {
        self.counter
    }

    /// Number of identifiers handed out so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.reserved.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.reserved.is_empty()
    }

    /// ## Summary
    /// Reserves and returns an identifier for a record.
    ///
    /// The counter advances on every call, and past any reserved value it had
    /// to skip.
    pub fn allocate(&mut self, display_name: Option<&str>) -> String {
        let sequence = self.counter;
        self.counter = sequence.saturating_add(1);

        if let Some(name) = display_name {
            let slug = generate_slug(name);
            if !slug.is_empty() {
                let candidate = format!("{}-{slug}", self.prefix);
                if self.reserved.insert(candidate.clone()) {
                    return candidate;
                }
                tracing::debug!(%candidate, "Slug already taken, falling back to counter");
            }
        }

        let mut n = sequence;
        loop {
            let candidate = format!("{}-{n:03}", self.prefix);
            if self.reserved.insert(candidate.clone()) {
                self.counter = self.counter.max(n.saturating_add(1));
                return candidate;
            }
            n = n.saturating_add(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn named_record_gets_slug() {
        let mut allocator = EntityAllocator::new("contact");
        assert_eq!(allocator.allocate(Some("Test User")), "contact-test-user");
        assert_eq!(allocator.counter(), 2);
    }

    #[test]
    fn nameless_records_get_counter_tokens() {
        let mut allocator = EntityAllocator::new("place-takeout");
        assert_eq!(allocator.allocate(None), "place-takeout-001");
        assert_eq!(allocator.allocate(None), "place-takeout-002");
    }

    #[test]
    fn duplicate_names_get_distinct_tokens() {
        let mut allocator = EntityAllocator::new("contact");
        let first = allocator.allocate(Some("Jane Doe"));
        let second = allocator.allocate(Some("Jane Doe"));

        assert_eq!(first, "contact-jane-doe");
        assert_eq!(second, "contact-002");
        assert_ne!(first, second);
    }

    #[test]
    fn counter_skips_numeric_looking_slugs() {
        let mut allocator = EntityAllocator::new("contact");
        assert_eq!(allocator.allocate(Some("002")), "contact-002");
        assert_eq!(allocator.allocate(None), "contact-003");
        assert_eq!(allocator.counter(), 4);
    }

    #[test]
    fn unsluggable_name_falls_back() {
        let mut allocator = EntityAllocator::new("event");
        assert_eq!(allocator.allocate(Some("???")), "event-001");
    }

    #[test]
    fn many_allocations_are_unique() {
        let mut allocator = EntityAllocator::new("contact");
        assert!(allocator.is_empty());
        let names = ["A", "A", "B", "", "A", "001", "b"];
        let mut tokens: HashSet<_> = names
            .iter()
            .map(|name| allocator.allocate(Some(name)))
            .collect();
        tokens.extend((0..5).map(|_| allocator.allocate(None)));

        assert_eq!(tokens.len(), names.len() + 5);
        assert_eq!(allocator.len(), tokens.len());
    }

    #[test]
    fn allocators_are_independent() {
        let mut first = EntityAllocator::new("contact");
        let mut second = EntityAllocator::new("contact");
        assert_eq!(first.allocate(None), second.allocate(None));
    }
}
