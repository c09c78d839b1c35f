mod rules;

pub use rules::{Predicate, Rule, RuleTable, UNMATCHED_CATEGORY};

use crate::records::RecordSet;
use tracing::debug;

/// A named bucket owning a disjoint subset of the record set's indices.
#[derive(Debug, Clone)]
pub struct Category {
    pub name: &'static str,
    pub indices: Vec<usize>,
}

impl Category {
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

/// Ordered partition of a record set. Every input index appears in exactly
/// one category; the trailing "Unmatched" bucket is the complement of the
/// claimed indices, never a re-evaluation of predicates.
#[derive(Debug, Clone)]
pub struct Partition {
    categories: Vec<Category>,
    total: usize,
}

impl Partition {
    /// Folds the ordered rule list over the record set carrying the claimed
    /// set forward: a record assigned by an earlier rule is excluded from
    /// consideration by every later rule.
    pub fn build(records: &RecordSet, table: &RuleTable) -> Self {
        let mut claimed = vec![false; records.len()];
        let mut categories = Vec::with_capacity(table.rules().len() + 1);

        for rule in table.rules() {
            let mut indices = Vec::new();
            for (index, record) in records.iter().enumerate() {
                if claimed[index] {
                    continue;
                }
                if rule.predicate.matches(record) {
                    claimed[index] = true;
                    indices.push(index);
                }
            }
            categories.push(Category {
                name: rule.category,
                indices,
            });
        }

        let unmatched: Vec<usize> = claimed
            .iter()
            .enumerate()
            .filter(|(_, taken)| !**taken)
            .map(|(index, _)| index)
            .collect();
        debug!(
            records = records.len(),
            unmatched = unmatched.len(),
            "partitioned case export"
        );
        categories.push(Category {
            name: UNMATCHED_CATEGORY,
            indices: unmatched,
        });

        Self {
            categories,
            total: records.len(),
        }
    }

    /// All categories in rule order, empty ones included.
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn category(&self, name: &str) -> Option<&Category> {
        self.categories.iter().find(|category| category.name == name)
    }

    /// Number of records in the partitioned set.
    pub fn total(&self) -> usize {
        self.total
    }
}
