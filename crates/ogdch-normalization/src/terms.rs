//! Terms-of-use aggregation.
//!
//! A resource's term comes from its `license` field, or from `rights` when
//! the license is not an open term. A dataset carries the least open term of
//! its resources, and a single resource without any open term closes it.

use ogdch_model::{Dataset, DatasetRights, Resource, TermOfUse};
use tracing::debug;

/// The open term named by `id`, or `ClosedData`.
pub fn simplify_term(id: &str) -> TermOfUse {
    TermOfUse::open_term(id).unwrap_or(TermOfUse::ClosedData)
}

/// Effective term of one resource: license first, then rights.
pub fn resource_term(resource: &Resource) -> TermOfUse {
    resource
        .open_license()
        .or_else(|| resource.open_rights())
        .unwrap_or(TermOfUse::ClosedData)
}

/// Least open term over `resources`; `ClosedData` when there are none.
pub fn least_open_term<'a, I>(resources: I) -> TermOfUse
where
    I: IntoIterator<Item = &'a Resource>,
{
    let mut least_open: Option<TermOfUse> = None;
    for (index, resource) in resources.into_iter().enumerate() {
        let Some(term) = resource.open_license().or_else(|| resource.open_rights()) else {
            debug!(resource = index, "resource has no open term, dataset is closed");
            return TermOfUse::ClosedData;
        };
        least_open = Some(least_open.map_or(term, |current| current.least_open(term)));
    }
    least_open.unwrap_or(TermOfUse::ClosedData)
}

pub fn dataset_term(dataset: &Dataset) -> TermOfUse {
    least_open_term(&dataset.resources)
}

/// The rights lookup result for `dataset`.
pub fn dataset_rights(dataset: &Dataset) -> DatasetRights {
    DatasetRights {
        dataset_rights: dataset_term(dataset),
    }
}
