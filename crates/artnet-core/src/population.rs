//! Population-level attribute statistics.
//!
//! Descriptive numbers reported alongside the network: how often each
//! attribute value occurs, column means and spreads, where artists lived,
//! and the share of women among artists of known gender.

use std::hash::Hash;

use rustc_hash::FxHashMap;

use crate::similarity::attributes::ArtistRecord;

/// Occurrences of each distinct value, most frequent first; ties keep the
/// order of first appearance. Missing values are dropped.
pub fn value_counts<T, I>(values: I) -> Vec<(T, usize)>
where
    T: Eq + Hash + Clone,
    I: IntoIterator<Item = Option<T>>,
{
    let mut index: FxHashMap<T, usize> = FxHashMap::default();
    let mut counts: Vec<(T, usize)> = Vec::new();
    for value in values.into_iter().flatten() {
        match index.get(&value) {
            Some(&i) => counts[i].1 += 1,
            None => {
                index.insert(value.clone(), counts.len());
                counts.push((value, 1));
            }
        }
    }
    // stable sort keeps first-appearance order among ties
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}

/// [`value_counts`] normalized to fractions of the non-missing values.
pub fn value_frequencies<T, I>(values: I) -> Vec<(T, f64)>
where
    T: Eq + Hash + Clone,
    I: IntoIterator<Item = Option<T>>,
{
    let counts = value_counts(values);
    let total: usize = counts.iter().map(|(_, c)| c).sum();
    counts
        .into_iter()
        .map(|(v, c)| (v, c as f64 / total as f64))
        .collect()
}

/// Mean of the known values; `None` if there are none.
pub fn column_mean<I>(values: I) -> Option<f64>
where
    I: IntoIterator<Item = Option<f64>>,
{
    let known: Vec<f64> = values.into_iter().flatten().filter(|v| !v.is_nan()).collect();
    if known.is_empty() {
        return None;
    }
    Some(known.iter().sum::<f64>() / known.len() as f64)
}

/// Sample standard deviation (n - 1 denominator) of the known values;
/// `None` with fewer than two.
pub fn column_std<I>(values: I) -> Option<f64>
where
    I: IntoIterator<Item = Option<f64>>,
{
    let known: Vec<f64> = values.into_iter().flatten().filter(|v| !v.is_nan()).collect();
    if known.len() < 2 {
        return None;
    }
    let mean = known.iter().sum::<f64>() / known.len() as f64;
    let ss: f64 = known.iter().map(|v| (v - mean).powi(2)).sum();
    Some((ss / (known.len() - 1) as f64).sqrt())
}

/// Share of each place over all places listed by all artists.
pub fn location_frequencies(records: &[ArtistRecord]) -> Vec<(String, f64)> {
    value_frequencies(
        records
            .iter()
            .filter_map(|r| r.attributes.places.as_ref())
            .flatten()
            .map(|p| Some(p.clone())),
    )
}

/// Which genders occur among the known values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenderPresence {
    Neither,
    OnlyMale,
    OnlyFemale,
    Both,
}

impl GenderPresence {
    fn of(male: usize, female: usize) -> Self {
        match (male > 0, female > 0) {
            (false, false) => GenderPresence::Neither,
            (true, false) => GenderPresence::OnlyMale,
            (false, true) => GenderPresence::OnlyFemale,
            (true, true) => GenderPresence::Both,
        }
    }
}

/// Percentage of women among artists recorded as `"male"` or `"female"`.
///
/// | presence    | result                          |
/// |-------------|---------------------------------|
/// | neither     | `None`                          |
/// | only male   | `Some(0.0)`                     |
/// | only female | `Some(100.0)`                   |
/// | both        | `Some(100 · female / (m + f))`  |
pub fn female_percentage<'a, I>(genders: I) -> Option<f64>
where
    I: IntoIterator<Item = Option<&'a str>>,
{
    let (mut male, mut female) = (0usize, 0usize);
    for gender in genders.into_iter().flatten() {
        match gender {
            "male" => male += 1,
            "female" => female += 1,
            _ => {}
        }
    }
    match GenderPresence::of(male, female) {
        GenderPresence::Neither => None,
        GenderPresence::OnlyMale => Some(0.0),
        GenderPresence::OnlyFemale => Some(100.0),
        GenderPresence::Both => Some(100.0 * female as f64 / (male + female) as f64),
    }
}
