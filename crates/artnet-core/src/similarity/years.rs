//! Year repair for partially-known biographical timelines.
//!
//! A timeline is the 4-tuple `(birth, first_active, last_active, death)`.
//! Source data routinely misses one or more of these; [`fix_years`] rejects
//! timelines that cannot be trusted and fills the gaps of the rest so the
//! scorer always works on four finite, ordered boundaries.

/// Years assumed between birth and the start of activity, used to fill
/// whichever of the two is missing.
pub const ACTIVITY_ONSET_YEARS: f64 = 20.0;

/// Longest plausible lifespan in years.
pub const MAX_LIFESPAN_YEARS: f64 = 130.0;

/// Raw, possibly partially missing timeline of one artist.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct YearRecord {
    pub birth: Option<f64>,
    pub first_active: Option<f64>,
    pub last_active: Option<f64>,
    pub death: Option<f64>,
}

impl YearRecord {
    pub fn new(
        birth: Option<f64>,
        first_active: Option<f64>,
        last_active: Option<f64>,
        death: Option<f64>,
    ) -> Self {
        Self {
            birth,
            first_active,
            last_active,
            death,
        }
    }

    /// Builds a record from tabular values where NaN marks a missing year.
    pub fn from_raw(raw: [f64; 4]) -> Self {
        let known = |v: f64| if v.is_nan() { None } else { Some(v) };
        Self::new(known(raw[0]), known(raw[1]), known(raw[2]), known(raw[3]))
    }

    /// The record with every field missing.
    pub fn missing() -> Self {
        Self::default()
    }

    fn is_fillable(&self) -> bool {
        (self.birth.is_some() || self.first_active.is_some())
            && (self.last_active.is_some() || self.death.is_some())
    }

    fn is_plausible(&self) -> bool {
        match (self.birth, self.death) {
            (Some(b), Some(d)) => b <= d && d - b <= MAX_LIFESPAN_YEARS,
            _ => true,
        }
    }
}

/// How an invalid record is reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InvalidStyle {
    /// A single [`RepairOutcome::Invalid`] marker.
    #[default]
    Scalar,
    /// [`RepairOutcome::AllMissing`], a record with every year missing.
    AllMissing,
}

/// Knobs of [`fix_years`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RepairOptions {
    /// Reject implausible lifespans (death before birth, more than
    /// [`MAX_LIFESPAN_YEARS`]).
    pub check_years: bool,
    /// Clamp the active span into the lifespan after filling.
    pub override_active_years: bool,
    pub invalid_style: InvalidStyle,
}

impl Default for RepairOptions {
    fn default() -> Self {
        Self {
            check_years: true,
            override_active_years: true,
            invalid_style: InvalidStyle::Scalar,
        }
    }
}

impl RepairOptions {
    pub fn with_check_years(mut self, check: bool) -> Self {
        self.check_years = check;
        self
    }

    pub fn with_override_active_years(mut self, clamp: bool) -> Self {
        self.override_active_years = clamp;
        self
    }

    pub fn with_invalid_style(mut self, style: InvalidStyle) -> Self {
        self.invalid_style = style;
        self
    }
}

/// Four finite year boundaries in ascending order.
///
/// The ascending sort is applied after filling, so the positions are
/// boundaries `(min, .., max)` rather than the named fields they came from:
/// `bounds()[0]..=bounds()[3]` is the lifespan and `bounds()[1]..=bounds()[2]`
/// the active span.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RepairedYears([f64; 4]);

impl RepairedYears {
    pub fn bounds(&self) -> [f64; 4] {
        self.0
    }

    pub fn lifespan(&self) -> (f64, f64) {
        (self.0[0], self.0[3])
    }

    pub fn active_span(&self) -> (f64, f64) {
        (self.0[1], self.0[2])
    }
}

/// Result of [`fix_years`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RepairOutcome {
    Repaired(RepairedYears),
    /// The record should be excluded ([`InvalidStyle::Scalar`]).
    Invalid,
    /// The record should be excluded ([`InvalidStyle::AllMissing`]).
    AllMissing(YearRecord),
}

impl RepairOutcome {
    pub fn repaired(self) -> Option<RepairedYears> {
        match self {
            RepairOutcome::Repaired(years) => Some(years),
            RepairOutcome::Invalid | RepairOutcome::AllMissing(_) => None,
        }
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, RepairOutcome::Repaired(_))
    }

    fn invalid(style: InvalidStyle) -> Self {
        match style {
            InvalidStyle::Scalar => RepairOutcome::Invalid,
            InvalidStyle::AllMissing => RepairOutcome::AllMissing(YearRecord::missing()),
        }
    }
}

/// Validates and repairs a timeline.
///
/// A record is invalid when birth and first-active are both missing, when
/// last-active and death are both missing, or (with `check_years`) when both
/// birth and death are known and death precedes birth or follows it by more
/// than [`MAX_LIFESPAN_YEARS`]. The first two conditions always apply since
/// such gaps cannot be filled.
///
/// Valid records are filled in this order: birth from first-active minus
/// [`ACTIVITY_ONSET_YEARS`], first-active from birth plus the same, last-active
/// from death, death from last-active. With `override_active_years` the
/// active span is then clamped into the lifespan. The four values are
/// returned sorted ascending.
pub fn fix_years(record: YearRecord, options: &RepairOptions) -> RepairOutcome {
    if !record.is_fillable() || (options.check_years && !record.is_plausible()) {
        return RepairOutcome::invalid(options.invalid_style);
    }

    let (birth, first_active) = match (record.birth, record.first_active) {
        (Some(b), Some(f)) => (b, f),
        (Some(b), None) => (b, b + ACTIVITY_ONSET_YEARS),
        (None, Some(f)) => (f - ACTIVITY_ONSET_YEARS, f),
        (None, None) => return RepairOutcome::invalid(options.invalid_style),
    };
    let (mut last_active, death) = match (record.last_active, record.death) {
        (Some(l), Some(d)) => (l, d),
        (Some(l), None) => (l, l),
        (None, Some(d)) => (d, d),
        (None, None) => return RepairOutcome::invalid(options.invalid_style),
    };
    let mut first_active = first_active;

    if options.override_active_years {
        if last_active > death {
            last_active = death;
        }
        if first_active < birth {
            first_active = birth;
        }
    }

    let mut bounds = [birth, first_active, last_active, death];
    bounds.sort_by(f64::total_cmp);
    RepairOutcome::Repaired(RepairedYears(bounds))
}
