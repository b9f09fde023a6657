use crate::config::ReportConfig;
use crate::facts::{FactIndex, MethodEntry, TypeIndex};
use serde::Serialize;
use std::cmp::Reverse;

/// Size metrics of one declared type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassSummary {
    #[serde(skip)]
    pub index: TypeIndex,
    pub full_name: String,
    pub methods: usize,
    pub fields: usize,
    pub lines: usize,
}

/// Size metrics of one declared method.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MethodSummary {
    /// `Owner.name(P1, P2)`
    pub short_name: String,
    /// `package.Owner.name`
    pub full_name: String,
    pub lines: usize,
    pub parameters: usize,
}

/// A class together with the signatures it declares.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassListing {
    pub full_name: String,
    pub signatures: Vec<String>,
}

/// Items picked from a population of `population` candidates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Selection<T> {
    pub percentage: u32,
    pub population: usize,
    pub items: Vec<T>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectStatistics {
    pub class_count: usize,
    pub method_count: usize,
    pub total_lines: usize,
    pub average_methods_per_class: f64,
    pub average_lines_per_method: f64,
    pub average_fields_per_class: f64,
    pub packages: Vec<String>,
    pub most_methods: Selection<ClassSummary>,
    pub most_fields: Selection<ClassSummary>,
    pub most_methods_and_fields: Selection<ClassSummary>,
    pub min_methods: usize,
    pub above_min_methods: Vec<ClassSummary>,
    pub longest_methods: Selection<MethodSummary>,
    pub most_parameters: Vec<MethodSummary>,
    pub class_list: Vec<ClassListing>,
}

impl ProjectStatistics {
    pub fn compute(index: &FactIndex, config: &ReportConfig) -> Self {
        let classes: Vec<ClassSummary> = index
            .types()
            .iter()
            .enumerate()
            .map(|(position, type_fact)| {
                let owner = TypeIndex(position);
                ClassSummary {
                    index: owner,
                    full_name: type_fact.full_name(),
                    methods: index.method_count_of(owner),
                    fields: type_fact.fields,
                    lines: type_fact.lines,
                }
            })
            .collect();
        let methods: Vec<MethodSummary> = index
            .methods()
            .iter()
            .map(|entry| summarize_method(index, entry))
            .collect();

        let class_count = classes.len();
        let method_count = methods.len();

        let most_methods = top_percent(&classes, config.method_percentage, |c| c.methods);
        let most_fields = top_percent(&classes, config.field_percentage, |c| c.fields);

        let mut both = intersect(&most_methods, &most_fields, |c| c.index);
        both.sort_by_key(|c| Reverse(c.methods + c.fields));
        let both_percentage = ceil_percentage(both.len(), class_count);

        let longest_methods =
            top_percent(&methods, config.method_lines_percentage, |m| m.lines);

        Self {
            class_count,
            method_count,
            total_lines: classes.iter().map(|c| c.lines).sum(),
            average_methods_per_class: average(method_count, class_count),
            average_lines_per_method: average(methods.iter().map(|m| m.lines).sum(), method_count),
            average_fields_per_class: average(classes.iter().map(|c| c.fields).sum(), class_count),
            packages: packages(index),
            most_methods: selection(config.method_percentage, class_count, most_methods),
            most_fields: selection(config.field_percentage, class_count, most_fields),
            most_methods_and_fields: selection(both_percentage, class_count, both),
            min_methods: config.min_methods,
            above_min_methods: has_more_than(&classes, config.min_methods, |c| c.methods)
                .into_iter()
                .cloned()
                .collect(),
            longest_methods: selection(config.method_lines_percentage, method_count, longest_methods),
            most_parameters: same_as_max(&methods, |m| m.parameters)
                .into_iter()
                .cloned()
                .collect(),
            class_list: class_list(index),
        }
    }
}

fn summarize_method(index: &FactIndex, entry: &MethodEntry) -> MethodSummary {
    MethodSummary {
        short_name: index.short_with_param_types(entry),
        full_name: index.method_full_name(entry),
        lines: entry.method.lines,
        parameters: entry.method.parameter_count(),
    }
}

fn selection<T: Clone>(percentage: u32, population: usize, items: Vec<&T>) -> Selection<T> {
    Selection {
        percentage,
        population,
        items: items.into_iter().cloned().collect(),
    }
}

fn class_list(index: &FactIndex) -> Vec<ClassListing> {
    index
        .types()
        .iter()
        .enumerate()
        .map(|(position, type_fact)| ClassListing {
            full_name: type_fact.full_name(),
            signatures: index
                .methods_of(TypeIndex(position))
                .iter()
                .map(|entry| entry.method.signature())
                .collect(),
        })
        .collect()
}

fn average(sum: usize, count: usize) -> f64 {
    if count == 0 {
        0.0
    } else {
        sum as f64 / count as f64
    }
}

fn ceil_percentage(part: usize, whole: usize) -> u32 {
    if whole == 0 {
        return 0;
    }
    (100 * part).div_ceil(whole) as u32
}

/// Number of items a `percentage` selection keeps out of `len`, rounded up.
pub fn top_count(len: usize, percentage: u32) -> usize {
    (len * percentage as usize).div_ceil(100).min(len)
}

/// The `percentage`% items with the largest `key`. Ties keep input order.
pub fn top_percent<T, K, F>(items: &[T], percentage: u32, key: F) -> Vec<&T>
where
    K: Ord,
    F: Fn(&T) -> K,
{
    let mut sorted: Vec<&T> = items.iter().collect();
    sorted.sort_by_key(|item| Reverse(key(*item)));
    sorted.truncate(top_count(items.len(), percentage));
    sorted
}

/// Items whose `value` is strictly greater than `threshold`.
pub fn has_more_than<T, F>(items: &[T], threshold: usize, value: F) -> Vec<&T>
where
    F: Fn(&T) -> usize,
{
    items.iter().filter(|&item| value(item) > threshold).collect()
}

/// Items of `first` whose identity also appears in `second`, in `first` order.
pub fn intersect<'a, T, K, F>(first: &[&'a T], second: &[&'a T], identity: F) -> Vec<&'a T>
where
    K: PartialEq,
    F: Fn(&T) -> K,
{
    first
        .iter()
        .copied()
        .filter(|&item| second.iter().any(|&other| identity(other) == identity(item)))
        .collect()
}

/// Every item sharing the maximum `value`. Empty input yields nothing.
pub fn same_as_max<T, K, F>(items: &[T], value: F) -> Vec<&T>
where
    K: Ord,
    F: Fn(&T) -> K,
{
    let Some(max) = items.iter().map(&value).max() else {
        return Vec::new();
    };
    items.iter().filter(|&item| value(item) == max).collect()
}

/// Distinct non-empty package names, sorted.
pub fn packages(index: &FactIndex) -> Vec<String> {
    let mut packages: Vec<String> = index
        .types()
        .iter()
        .map(|t| t.package.clone())
        .filter(|p| !p.is_empty())
        .collect();
    packages.sort();
    packages.dedup();
    packages
}
