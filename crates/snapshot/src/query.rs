//! In-memory interpretation of a `ContentFilter`.
//!
//! Recognized keys: `slug`, `include`, `exclude`, `status`, `author`, `search`,
//! `per_page`/`page`, and any term-list key the items carry (`categories`,
//! `tags`, custom taxonomies). Other keys are ignored. Pagination applies only
//! when `per_page` is present.

use propcontent::markup::strip_tags;
use propcontent::{ContentFilter, FilterValue, RawContentItem, Term};

const PAGING_KEYS: [&str; 2] = ["per_page", "page"];

pub(crate) fn filter_items(items: &[RawContentItem], filter: &ContentFilter) -> Vec<RawContentItem> {
    let matched = items
        .iter()
        .filter(|item| {
            filter
                .iter()
                .all(|(key, value)| item_matches(item, key, value, items))
        })
        .cloned()
        .collect();
    paginate(matched, filter)
}

pub(crate) fn filter_terms(terms: &[Term], filter: &ContentFilter) -> Vec<Term> {
    let matched = terms
        .iter()
        .filter(|term| {
            filter.iter().all(|(key, value)| match key {
                "slug" => value.values().contains(&term.slug.as_str()),
                "include" => value.ids().contains(&term.id),
                "exclude" => !value.ids().contains(&term.id),
                "parent" => value.ids().contains(&term.parent),
                "search" => contains_ci(&term.name, value),
                _ => true,
            })
        })
        .cloned()
        .collect();
    paginate(matched, filter)
}

fn item_matches(
    item: &RawContentItem,
    key: &str,
    value: &FilterValue,
    collection: &[RawContentItem],
) -> bool {
    match key {
        "slug" => value.values().contains(&item.slug.as_str()),
        "include" => value.ids().contains(&item.id),
        "exclude" => !value.ids().contains(&item.id),
        "status" => value.values().contains(&item.status.as_str()),
        "author" => value.ids().contains(&item.author),
        "search" => {
            contains_ci(&strip_tags(&item.title.rendered), value)
                || contains_ci(&strip_tags(&item.content.rendered), value)
        }
        key if PAGING_KEYS.contains(&key) => true,
        key => {
            // A key becomes a term filter only when the collection carries that list.
            if !collection.iter().any(|i| i.term_ids(key).is_some()) {
                return true;
            }
            let wanted = value.ids();
            item.term_ids(key)
                .is_some_and(|ids| ids.iter().any(|id| wanted.contains(id)))
        }
    }
}

fn contains_ci(haystack: &str, needle: &FilterValue) -> bool {
    let haystack = haystack.to_lowercase();
    needle
        .values()
        .iter()
        .any(|n| haystack.contains(&n.trim().to_lowercase()))
}

fn paginate<T>(items: Vec<T>, filter: &ContentFilter) -> Vec<T> {
    let Some(per_page) = filter.per_page() else {
        return items;
    };
    let page = filter.page().unwrap_or(1).max(1);
    let Some(offset) = (page - 1).checked_mul(per_page) else {
        return Vec::new();
    };
    items.into_iter().skip(offset).take(per_page).collect()
}
