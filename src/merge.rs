use std::cmp::Ordering;
use std::collections::HashSet;

use anyhow::{anyhow, Result};
use icu_collator::{Collator, CollatorOptions, Strength};
use log::warn;

use crate::models::LicenseRecord;

/// Collation for library names: root-locale UCA ordering at secondary strength,
/// so case is ignored while accented letters sort beside their base letter.
pub struct NameCollator(Collator);

impl NameCollator {
    pub fn new() -> Result<Self> {
        let mut options = CollatorOptions::new();
        options.strength = Some(Strength::Secondary);
        let collator = Collator::try_new(&Default::default(), options)
            .map_err(|e| anyhow!("cannot load collation data: {:?}", e))?;
        Ok(Self(collator))
    }

    pub fn compare(&self, a: &str, b: &str) -> Ordering {
        self.0.compare(a, b)
    }
}

/// Concatenate `primary` and `supplemental` and sort by library name.
///
/// The sort is stable, so records whose names collate equal (e.g. differ only
/// in case) keep their input order. Duplicate names are kept; see
/// [`duplicate_names`].
pub fn merge(
    primary: Vec<LicenseRecord>,
    supplemental: Vec<LicenseRecord>,
) -> Result<Vec<LicenseRecord>> {
    let collator = NameCollator::new()?;
    let mut records = primary;
    records.extend(supplemental);
    records.sort_by(|a, b| collator.compare(&a.name, &b.name));
    Ok(records)
}

/// Names that occur more than once, in first-seen order.
pub fn duplicate_names(records: &[LicenseRecord]) -> Vec<&str> {
    let mut seen = HashSet::new();
    let mut reported = HashSet::new();
    records
        .iter()
        .map(|r| r.name.as_str())
        .filter(|name| !seen.insert(*name) && reported.insert(*name))
        .collect()
}

/// Log every duplicated name; the later record overwrites the earlier one in
/// bundle output and both are written in list output.
pub fn warn_duplicates(records: &[LicenseRecord]) {
    for name in duplicate_names(records) {
        warn!("license for `{}` appears more than once", name);
    }
}
