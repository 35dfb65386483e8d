//! Compound interest math for the calculator page: the closed form
//! `A = P(1 + r/n)^(nt)` plus a per-year breakdown for charting.

#[derive(Debug, Clone, PartialEq)]
pub struct YearBreakdown {
    pub year: String,
    pub principal: f64,
    pub interest: f64,
    pub total: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CompoundInterest {
    pub final_amount: f64,
    pub total_interest: f64,
    pub yearly_breakdown: Vec<YearBreakdown>,
}

/// `principal` in currency units, `rate` as a decimal (0.07 for 7%),
/// `time` in years, `compounding_frequency` in periods per year.
/// All money values are rounded to cents.
pub fn compound_interest(
    principal: f64,
    rate: f64,
    time: f64,
    compounding_frequency: u32,
) -> CompoundInterest {
    let n = compounding_frequency as f64;
    let final_amount = principal * (1.0 + rate / n).powf(n * time);
    let total_interest = final_amount - principal;

    let mut yearly_breakdown = Vec::new();
    let mut current_principal = principal;
    let whole_years = time.trunc() as u32;

    for year in 1..=whole_years {
        let yearly_amount = current_principal * (1.0 + rate / n).powf(n);
        yearly_breakdown.push(YearBreakdown {
            year: year.to_string(),
            principal: round_cents(current_principal),
            interest: round_cents(yearly_amount - current_principal),
            total: round_cents(yearly_amount),
        });
        current_principal = yearly_amount;
    }

    // Trailing fractional year, labelled as a half step.
    if time > whole_years as f64 {
        let remaining = time - whole_years as f64;
        let yearly_amount = current_principal * (1.0 + rate / n).powf(n * remaining);
        yearly_breakdown.push(YearBreakdown {
            year: format!("{}.5", whole_years),
            principal: round_cents(current_principal),
            interest: round_cents(yearly_amount - current_principal),
            total: round_cents(yearly_amount),
        });
    }

    CompoundInterest {
        final_amount: round_cents(final_amount),
        total_interest: round_cents(total_interest),
        yearly_breakdown,
    }
}

fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
