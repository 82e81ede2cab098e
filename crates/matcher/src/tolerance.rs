/// How a combined value is compared against a target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToleranceRule {
    /// `|value - target| <= tolerance`
    Absolute,
    /// `|value - target| <= tolerance * target`
    ///
    /// A target of 0 collapses this to exact equality and a negative target
    /// never matches. Both follow directly from the formula.
    RelativeToTarget,
    /// `|value - target| <= tolerance * max(|value|, |target|)`
    RelativeCloseness,
}

impl ToleranceRule {
    pub fn accepts(self, value: f64, target: f64, tolerance: f64) -> bool {
        match self {
            Self::Absolute => (value - target).abs() <= tolerance,
            Self::RelativeToTarget => (value - target).abs() <= tolerance * target,
            Self::RelativeCloseness => is_close(value, target, tolerance),
        }
    }
}

/// Relative closeness: equal values are always close, otherwise the gap
/// must be within `rel_tol` of the larger magnitude.
pub fn is_close(a: f64, b: f64, rel_tol: f64) -> bool {
    if a == b {
        return true;
    }
    if !a.is_finite() || !b.is_finite() {
        return false;
    }
    (a - b).abs() <= rel_tol * a.abs().max(b.abs())
}

/// A target plus its tolerance and rule, resolved once per target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Check {
    pub rule: ToleranceRule,
    pub target: f64,
    pub tolerance: f64,
}

impl Check {
    pub fn new(rule: ToleranceRule, target: f64, tolerance: f64) -> Self {
        Self { rule, target, tolerance }
    }

    #[inline]
    pub fn accepts(&self, value: f64) -> bool {
        self.rule.accepts(value, self.target, self.tolerance)
    }
}
