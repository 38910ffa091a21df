// Sum-by-key aggregation feeding the pie and bar charts
use shared::models::{Aggregation, RentalRecord, Slice};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupKey {
    EquipmentType,
    Destination,
}

impl GroupKey {
    pub fn of<'a>(&self, record: &'a RentalRecord) -> &'a str {
        match self {
            GroupKey::EquipmentType => &record.equipment_type,
            GroupKey::Destination => &record.destination,
        }
    }
}

/// Value summed per group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKey {
    Quantity,
}

impl ValueKey {
    pub fn of(&self, record: &RentalRecord) -> u64 {
        match self {
            ValueKey::Quantity => record.quantity as u64,
        }
    }
}

/// Shares of `total` in tenths of a percent, one per value. Each share is
/// floored, then the leftover tenths go to the largest remainders (earlier
/// values first on ties), so the shares always add up to exactly 1000.
/// All zeros when the total is 0.
pub fn percent_tenths(values: &[u64], total: u64) -> Vec<u64> {
    if total == 0 {
        return vec![0; values.len()];
    }
    let exact: Vec<(u64, u64)> = values
        .iter()
        .map(|&v| {
            let scaled = v as u128 * 1000;
            ((scaled / total as u128) as u64, (scaled % total as u128) as u64)
        })
        .collect();
    let mut tenths: Vec<u64> = exact.iter().map(|&(floor, _)| floor).collect();

    let assigned: u64 = tenths.iter().sum();
    let mut order: Vec<usize> = (0..exact.len()).collect();
    order.sort_by(|&a, &b| exact[b].1.cmp(&exact[a].1).then(a.cmp(&b)));
    for &i in order.iter().take(1000u64.saturating_sub(assigned) as usize) {
        tenths[i] += 1;
    }
    tenths
}

/// Sums `value` per distinct `group` key. Slices come out ordered by label.
pub fn aggregate_by_group<'a, I>(records: I, group: GroupKey, value: ValueKey) -> Aggregation
where
    I: IntoIterator<Item = &'a RentalRecord>,
{
    let mut sums: BTreeMap<&'a str, u64> = BTreeMap::new();
    for record in records {
        *sums.entry(group.of(record)).or_insert(0) += value.of(record);
    }

    let total: u64 = sums.values().sum();
    let values: Vec<u64> = sums.values().copied().collect();
    let tenths = percent_tenths(&values, total);
    let slices = sums
        .into_iter()
        .zip(tenths)
        .map(|((label, v), t)| Slice {
            label: label.to_string(),
            value: v,
            percent: t as f64 / 10.0,
        })
        .collect();

    Aggregation { total, slices }
}

/// Groups by `outer`, then aggregates each group by `inner`. Percentages are
/// relative to the outer group's total. Groups are ordered by outer key.
pub fn aggregate_two_level<'a, I>(records: I, outer: GroupKey, inner: GroupKey, value: ValueKey) -> Vec<(String, Aggregation)>
where
    I: IntoIterator<Item = &'a RentalRecord>,
{
    let mut groups: BTreeMap<&'a str, Vec<&'a RentalRecord>> = BTreeMap::new();
    for record in records {
        groups.entry(outer.of(record)).or_default().push(record);
    }

    groups
        .into_iter()
        .map(|(key, members)| (key.to_string(), aggregate_by_group(members, inner, value)))
        .collect()
}
