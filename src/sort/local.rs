//! Stable comparator-based sorting of already-loaded cards.

use std::cmp::Ordering;

use crate::provider::Card;
use crate::sort::{SortCriterion, SortDirection, SortState};

const COLOR_ORDER: [&str; 5] = ["W", "U", "B", "R", "G"];
const RARITY_ORDER: [&str; 6] = ["common", "uncommon", "rare", "mythic", "special", "bonus"];

/// Sort `items` in place. Cards that compare equal keep their relative order.
pub fn sort_local(items: &mut [Card], sort: SortState) {
    items.sort_by(|a, b| {
        let ordering = compare(a, b, sort.criterion);
        match sort.direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    });
}

/// Ascending order of two cards under `criterion`.
pub fn compare(a: &Card, b: &Card, criterion: SortCriterion) -> Ordering {
    match criterion {
        SortCriterion::Name => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
        SortCriterion::ManaValue => a.mana_value.total_cmp(&b.mana_value),
        SortCriterion::Color => color_key(a).cmp(&color_key(b)),
        SortCriterion::Rarity => rarity_rank(&a.rarity).cmp(&rarity_rank(&b.rarity)),
        SortCriterion::Set => a.set.cmp(&b.set),
        SortCriterion::Power => stat_cmp(a.power.as_deref(), b.power.as_deref()),
        SortCriterion::Toughness => stat_cmp(a.toughness.as_deref(), b.toughness.as_deref()),
        SortCriterion::Price => missing_last(a.price_usd(), b.price_usd(), f64::total_cmp),
        SortCriterion::Released => {
            missing_last(a.released_at.as_deref(), b.released_at.as_deref(), |x, y| x.cmp(y))
        }
    }
}

/// Mono-colored cards in WUBRG order, then multicolor, then colorless.
fn color_key(card: &Card) -> (u8, Vec<usize>) {
    let mut indices: Vec<usize> = card
        .colors
        .iter()
        .filter_map(|c| COLOR_ORDER.iter().position(|o| o == c))
        .collect();
    indices.sort_unstable();

    let group = match indices.len() {
        0 => 2,
        1 => 0,
        _ => 1,
    };
    (group, indices)
}

fn rarity_rank(rarity: &str) -> usize {
    RARITY_ORDER
        .iter()
        .position(|r| r.eq_ignore_ascii_case(rarity))
        .unwrap_or(RARITY_ORDER.len())
}

/// Numeric power/toughness first, then variable values like `*`, then none.
fn stat_cmp(a: Option<&str>, b: Option<&str>) -> Ordering {
    fn rank(stat: Option<&str>) -> (u8, f64) {
        match stat {
            Some(s) => match s.parse::<f64>() {
                Ok(v) => (0, v),
                Err(_) => (1, 0.0),
            },
            None => (2, 0.0),
        }
    }
    let (ga, va) = rank(a);
    let (gb, vb) = rank(b);
    ga.cmp(&gb).then(va.total_cmp(&vb))
}

fn missing_last<T>(a: Option<T>, b: Option<T>, cmp: impl Fn(&T, &T) -> Ordering) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => cmp(&x, &y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
