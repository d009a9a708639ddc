//! Splits one "leave exactly one item uncovered" instance into independent
//! sub-instances, one per disallowed item
//!
//! Every solution of the global instance leaves exactly one item `i`
//! uncovered, so it is produced by the sub-instance that disallows `i` and by
//! no other. Sub-instances are returned largest first so that the slowest one
//! is dispatched early.

use crate::algorithm::matrix::{Item, OptionMap};
use crate::algorithm::protocol::WorkerRequest;
use crate::io::error::{CoverError, Result, invalid_parameter};
use std::cmp::Reverse;
use std::collections::HashSet;

/// A restricted exact-cover instance in which one item may stay uncovered
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SubInstance<I> {
    /// The item no option of this sub-instance touches
    pub disallowed: I,
    /// The universe without the disallowed item, in universe order
    pub items: Vec<I>,
    /// Every option that does not touch the disallowed item
    pub options: OptionMap<I>,
    /// Option names forced into every solution
    pub given_options: Vec<String>,
}

impl<I: Item> SubInstance<I> {
    /// Number of options left after the restriction
    pub fn option_count(&self) -> usize {
        self.options.len()
    }

    /// Convert into the message that asks a worker to solve it
    pub fn into_request(self) -> WorkerRequest<I> {
        WorkerRequest::Solve {
            options: self.options,
            items: self.items,
            given_options: self.given_options,
        }
    }
}

/// Pre-flight check of a global instance
///
/// # Errors
///
/// Returns an error if:
/// - An item appears twice in the universe
/// - An option is empty, lists an item twice or names an item outside the universe
/// - Some universe items are covered by no option at all, listing every one of them
pub fn validate<I: Item>(universe: &[I], options: &OptionMap<I>) -> Result<()> {
    let mut known = HashSet::with_capacity(universe.len());
    for item in universe {
        if !known.insert(item) {
            return Err(invalid_parameter(
                "items",
                item,
                &"item appears more than once in the universe",
            ));
        }
    }

    let mut covered = HashSet::with_capacity(universe.len());
    for (name, option_items) in options {
        if option_items.is_empty() {
            return Err(CoverError::EmptyOption {
                option: name.clone(),
            });
        }
        let mut seen = HashSet::with_capacity(option_items.len());
        for item in option_items {
            if !known.contains(item) {
                return Err(CoverError::UnknownItem {
                    option: name.clone(),
                    item: item.to_string(),
                });
            }
            if !seen.insert(item) {
                return Err(CoverError::DuplicateItem {
                    option: name.clone(),
                    item: item.to_string(),
                });
            }
            covered.insert(item);
        }
    }

    let uncoverable: Vec<String> = universe
        .iter()
        .filter(|item| !covered.contains(item))
        .map(ToString::to_string)
        .collect();
    if uncoverable.is_empty() {
        Ok(())
    } else {
        Err(CoverError::UncoverableItems { items: uncoverable })
    }
}

/// Build one sub-instance per universe item, sorted by descending option
/// count
///
/// The sort is stable, so sub-instances of equal size keep universe order.
/// Every sub-instance carries the same forced options; one whose forced
/// option touches its disallowed item simply has no solutions.
///
/// # Errors
///
/// Returns an error if [`validate`] rejects the instance
pub fn partition<I: Item>(
    universe: &[I],
    options: &OptionMap<I>,
    given_options: &[String],
) -> Result<Vec<SubInstance<I>>> {
    validate(universe, options)?;

    let mut sub_instances: Vec<SubInstance<I>> = universe
        .iter()
        .map(|disallowed| SubInstance {
            disallowed: disallowed.clone(),
            items: universe
                .iter()
                .filter(|item| *item != disallowed)
                .cloned()
                .collect(),
            options: options
                .iter()
                .filter(|(_, option_items)| !option_items.contains(disallowed))
                .map(|(name, option_items)| (name.clone(), option_items.clone()))
                .collect(),
            given_options: given_options.to_vec(),
        })
        .collect();

    sub_instances.sort_by_key(|sub_instance| Reverse(sub_instance.option_count()));
    Ok(sub_instances)
}
