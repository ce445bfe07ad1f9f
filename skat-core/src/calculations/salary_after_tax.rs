//! Salary-after-tax pipeline for Danish employees.
//!
//! Turns a gross salary into a fully itemized annual breakdown for one
//! income year.
//!
//! # Pipeline
//!
//! | Step | Description |
//! |------|-------------|
//! | 1    | Annual gross (monthly × 12) |
//! | 2    | Employee pension (gross × pension rate) and ATP (as given) |
//! | 3    | AM base: gross − pension − ATP |
//! | 4    | AM-bidrag: AM base × AM rate |
//! | 5    | Personal income after AM: AM base − AM-bidrag |
//! | 6    | Deduction chain: personfradrag, beskæftigelsesfradrag, jobfradrag, other |
//! | 7    | Taxable income: what the chain leaves |
//! | 8    | Kommuneskat, kirkeskat and bundskat on taxable income |
//! | 9    | Mellemskat, topskat and toptopskat on personal income after AM |
//! | 10   | Totals: total tax, net annual, net monthly |
//! | 11   | Effective and marginal rates |
//!
//! Every line is rounded to a whole currency unit before anything else uses
//! it, and totals are sums of rounded lines.
//!
//! The bracket taxes in step 9 are cumulative: each bracket taxes all income
//! above its own threshold and the three amounts are added. They are not
//! marginal slices of one schedule.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use skat_core::{GrossPeriod, SalaryAfterTaxCalculator, SalaryAfterTaxInputs, TaxYear};
//!
//! let inputs = SalaryAfterTaxInputs::new(TaxYear::Y2026, dec!(50000), GrossPeriod::Monthly);
//! let calculator = SalaryAfterTaxCalculator::new(TaxYear::Y2026.config());
//! let breakdown = calculator.calculate(&inputs);
//!
//! assert_eq!(breakdown.gross_annual, dec!(600000));
//! assert_eq!(breakdown.am_contribution, dec!(48000));
//! assert_eq!(breakdown.taxable_income, dec!(431500));
//! assert_eq!(breakdown.total_tax, dec!(207914));
//! assert_eq!(breakdown.net_annual, dec!(392086));
//! ```

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tracing::{debug, trace};

use crate::calculations::common::{
    guarded_div, guarded_mul, non_negative, round_whole, saturating_sub,
};
use crate::calculations::deductions::{AppliedDeductions, NominalDeductions, apply_deductions};
use crate::models::{
    GrossPeriod, MODEL_ASSUMPTIONS, SalaryAfterTaxBreakdown, SalaryAfterTaxInputs, TaxYearConfig,
};

const MONTHS_PER_YEAR: Decimal = dec!(12);

/// Calculator for one year's salary-after-tax pipeline.
///
/// Holds nothing but a reference to the year configuration; it can be
/// rebuilt or shared freely and the same inputs always give the same
/// breakdown.
#[derive(Debug, Clone, Copy)]
pub struct SalaryAfterTaxCalculator<'a> {
    config: &'a TaxYearConfig,
}

impl<'a> SalaryAfterTaxCalculator<'a> {
    pub fn new(config: &'a TaxYearConfig) -> Self {
        Self { config }
    }

    /// Runs the full pipeline.
    ///
    /// Never fails: negative inputs and overflowing intermediates are
    /// clamped to zero. A zero gross income yields
    /// [`SalaryAfterTaxBreakdown::zero`].
    pub fn calculate(
        &self,
        inputs: &SalaryAfterTaxInputs,
    ) -> SalaryAfterTaxBreakdown {
        // Step 1
        let gross_annual = self.annualize(inputs.gross_amount, inputs.gross_period);
        if gross_annual.is_zero() {
            return SalaryAfterTaxBreakdown::zero();
        }

        // Step 2
        let pension = self.pension(gross_annual, inputs.employee_pension_rate);
        let atp = self.atp(inputs.atp_annual_amount);

        // Steps 3-5
        let am_base = self.am_base(gross_annual, pension, atp);
        let am_contribution = self.am_contribution(am_base);
        let personal_income_after_am = self.personal_income_after_am(am_base, am_contribution);

        // Steps 6-7
        let nominal =
            self.nominal_deductions(personal_income_after_am, inputs.other_deductions_annual);
        let AppliedDeductions {
            personal_allowance,
            employment_deduction,
            job_deduction,
            other_deductions,
            taxable_income,
        } = apply_deductions(personal_income_after_am, &nominal);

        // Step 8
        let municipal_rate = clamp_input("municipal_tax_rate", inputs.municipal_tax_rate);
        let church_rate = if inputs.church_member {
            clamp_input("church_tax_rate", inputs.church_tax_rate)
        } else {
            Decimal::ZERO
        };
        let municipal_tax = self.flat_tax(taxable_income, municipal_rate);
        let church_tax = self.flat_tax(taxable_income, church_rate);
        let bundskat = self.flat_tax(taxable_income, self.config.bundskat_rate);

        // Step 9
        let [middle_bracket_tax, top_bracket_tax, top_top_bracket_tax] =
            self.bracket_taxes(personal_income_after_am);

        // Step 10
        let total_tax = self.total_tax(&[
            am_contribution,
            municipal_tax,
            church_tax,
            bundskat,
            middle_bracket_tax,
            top_bracket_tax,
            top_top_bracket_tax,
        ]);
        let net_annual = self.net_annual(gross_annual, pension, atp, total_tax);
        let net_monthly = self.net_monthly(net_annual);

        // Step 11
        let effective_tax_rate = self.effective_tax_rate(total_tax, gross_annual);
        let marginal_tax_rate =
            self.marginal_tax_rate(personal_income_after_am, municipal_rate, church_rate);

        trace!(
            gross_annual = %gross_annual,
            taxable_income = %taxable_income,
            total_tax = %total_tax,
            net_annual = %net_annual,
            "salary after tax computed"
        );

        SalaryAfterTaxBreakdown {
            gross_annual,
            pension,
            atp,
            am_base,
            am_contribution,
            personal_income_after_am,
            personal_allowance,
            employment_deduction,
            job_deduction,
            other_deductions,
            taxable_income,
            municipal_tax,
            church_tax,
            bundskat,
            middle_bracket_tax,
            top_bracket_tax,
            top_top_bracket_tax,
            total_tax,
            net_annual,
            net_monthly,
            effective_tax_rate,
            marginal_tax_rate,
            assumptions: MODEL_ASSUMPTIONS,
        }
    }

    /// Converts the entered gross amount to an annual figure.
    fn annualize(
        &self,
        gross_amount: Decimal,
        period: GrossPeriod,
    ) -> Decimal {
        let gross = clamp_input("gross_amount", gross_amount);
        let annual = match period {
            GrossPeriod::Monthly => guarded_mul(gross, MONTHS_PER_YEAR),
            GrossPeriod::Annual => gross,
        };
        round_whole(annual)
    }

    /// Employee pension contribution. The rate is a share of gross, so it is
    /// held to `[0, 1]`.
    fn pension(
        &self,
        gross_annual: Decimal,
        pension_rate: Decimal,
    ) -> Decimal {
        let rate = clamp_input("employee_pension_rate", pension_rate).min(Decimal::ONE);
        round_whole(guarded_mul(gross_annual, rate))
    }

    fn atp(
        &self,
        atp_annual_amount: Decimal,
    ) -> Decimal {
        round_whole(clamp_input("atp_annual_amount", atp_annual_amount))
    }

    fn am_base(
        &self,
        gross_annual: Decimal,
        pension: Decimal,
        atp: Decimal,
    ) -> Decimal {
        round_whole(saturating_sub(saturating_sub(gross_annual, pension), atp))
    }

    fn am_contribution(
        &self,
        am_base: Decimal,
    ) -> Decimal {
        round_whole(guarded_mul(am_base, self.config.am_rate))
    }

    fn personal_income_after_am(
        &self,
        am_base: Decimal,
        am_contribution: Decimal,
    ) -> Decimal {
        round_whole(saturating_sub(am_base, am_contribution))
    }

    /// Rounded deduction amounts before the chain caps them.
    fn nominal_deductions(
        &self,
        personal_income_after_am: Decimal,
        other_deductions: Decimal,
    ) -> NominalDeductions {
        NominalDeductions {
            personal_allowance: round_whole(non_negative(self.config.personal_allowance)),
            employment_deduction: self.employment_deduction(personal_income_after_am),
            job_deduction: self.job_deduction(personal_income_after_am),
            other_deductions: round_whole(clamp_input("other_deductions_annual", other_deductions)),
        }
    }

    /// Beskæftigelsesfradrag before capping against remaining income.
    fn employment_deduction(
        &self,
        personal_income_after_am: Decimal,
    ) -> Decimal {
        let uncapped = guarded_mul(personal_income_after_am, self.config.employment_deduction_rate);
        round_whole(uncapped.min(non_negative(self.config.employment_deduction_cap)))
    }

    /// Jobfradrag before capping against remaining income.
    fn job_deduction(
        &self,
        personal_income_after_am: Decimal,
    ) -> Decimal {
        let eligible =
            saturating_sub(personal_income_after_am, self.config.job_deduction_threshold);
        let uncapped = guarded_mul(eligible, self.config.job_deduction_rate);
        round_whole(uncapped.min(non_negative(self.config.job_deduction_cap)))
    }

    fn flat_tax(
        &self,
        taxable_income: Decimal,
        rate: Decimal,
    ) -> Decimal {
        round_whole(guarded_mul(taxable_income, rate))
    }

    /// Mellemskat, topskat and toptopskat.
    ///
    /// Each bracket is measured from its own threshold against personal
    /// income after AM, independently of the others.
    fn bracket_taxes(
        &self,
        personal_income_after_am: Decimal,
    ) -> [Decimal; 3] {
        self.config.brackets.map(|bracket| {
            let excess = saturating_sub(personal_income_after_am, bracket.threshold);
            round_whole(guarded_mul(excess, bracket.rate))
        })
    }

    /// Sum of already rounded tax lines.
    fn total_tax(
        &self,
        lines: &[Decimal],
    ) -> Decimal {
        lines
            .iter()
            .try_fold(Decimal::ZERO, |acc, line| acc.checked_add(*line))
            .unwrap_or(Decimal::ZERO)
    }

    fn net_annual(
        &self,
        gross_annual: Decimal,
        pension: Decimal,
        atp: Decimal,
        total_tax: Decimal,
    ) -> Decimal {
        let after_pension = saturating_sub(gross_annual, pension);
        let after_atp = saturating_sub(after_pension, atp);
        saturating_sub(after_atp, total_tax)
    }

    fn net_monthly(
        &self,
        net_annual: Decimal,
    ) -> Decimal {
        round_whole(guarded_div(net_annual, MONTHS_PER_YEAR))
    }

    fn effective_tax_rate(
        &self,
        total_tax: Decimal,
        gross_annual: Decimal,
    ) -> Decimal {
        guarded_div(total_tax, gross_annual)
    }

    /// Rate on the next unit earned, as a step function: the flat rates
    /// plus every bracket whose threshold personal income after AM exceeds.
    fn marginal_tax_rate(
        &self,
        personal_income_after_am: Decimal,
        municipal_rate: Decimal,
        church_rate: Decimal,
    ) -> Decimal {
        let exceeded = self
            .config
            .brackets
            .iter()
            .filter(|bracket| personal_income_after_am > bracket.threshold)
            .map(|bracket| bracket.rate);

        [self.config.am_rate, municipal_rate, church_rate, self.config.bundskat_rate]
            .into_iter()
            .chain(exceeded)
            .try_fold(Decimal::ZERO, Decimal::checked_add)
            .unwrap_or(Decimal::ZERO)
    }
}

/// Runs the pipeline with an explicit configuration.
pub fn compute(
    inputs: &SalaryAfterTaxInputs,
    config: &TaxYearConfig,
) -> SalaryAfterTaxBreakdown {
    SalaryAfterTaxCalculator::new(config).calculate(inputs)
}

/// Runs the pipeline with the configuration of `inputs.tax_year`.
pub fn salary_after_tax(inputs: &SalaryAfterTaxInputs) -> SalaryAfterTaxBreakdown {
    compute(inputs, inputs.tax_year.config())
}

fn clamp_input(
    field: &'static str,
    value: Decimal,
) -> Decimal {
    if value < Decimal::ZERO {
        debug!(field, value = %value, "negative input clamped to zero");
        return Decimal::ZERO;
    }
    value
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::models::{BracketKind, TaxYear};

    fn calculator() -> SalaryAfterTaxCalculator<'static> {
        SalaryAfterTaxCalculator::new(TaxYear::Y2026.config())
    }

    fn annual_inputs(gross: Decimal) -> SalaryAfterTaxInputs {
        SalaryAfterTaxInputs::new(TaxYear::Y2026, gross, GrossPeriod::Annual)
    }

    // =========================================================================
    // annualize tests
    // =========================================================================

    #[test]
    fn annualize_multiplies_monthly_by_twelve() {
        let result = calculator().annualize(dec!(50000), GrossPeriod::Monthly);

        assert_eq!(result, dec!(600000));
    }

    #[test]
    fn annualize_keeps_annual_amount() {
        let result = calculator().annualize(dec!(600000), GrossPeriod::Annual);

        assert_eq!(result, dec!(600000));
    }

    #[test]
    fn annualize_clamps_negative_gross() {
        let result = calculator().annualize(dec!(-45000), GrossPeriod::Monthly);

        assert_eq!(result, dec!(0));
    }

    #[test]
    fn annualize_rounds_to_whole_units() {
        let result = calculator().annualize(dec!(33333.33), GrossPeriod::Monthly);

        assert_eq!(result, dec!(400000));
    }

    #[test]
    fn annualize_treats_overflow_as_zero() {
        let result = calculator().annualize(Decimal::MAX, GrossPeriod::Monthly);

        assert_eq!(result, dec!(0));
    }

    // =========================================================================
    // pre-AM deduction tests
    // =========================================================================

    #[test]
    fn pension_applies_rate_to_gross() {
        let result = calculator().pension(dec!(100000), dec!(0.10));

        assert_eq!(result, dec!(10000));
    }

    #[test]
    fn pension_clamps_negative_rate() {
        let result = calculator().pension(dec!(100000), dec!(-0.05));

        assert_eq!(result, dec!(0));
    }

    #[test]
    fn pension_never_exceeds_gross() {
        let result = calculator().pension(dec!(100000), dec!(1.5));

        assert_eq!(result, dec!(100000));
    }

    #[test]
    fn atp_clamps_negative_amount() {
        assert_eq!(calculator().atp(dec!(-1188)), dec!(0));
        assert_eq!(calculator().atp(dec!(1188)), dec!(1188));
    }

    // =========================================================================
    // AM tests
    // =========================================================================

    #[test]
    fn am_base_subtracts_pension_and_atp() {
        let result = calculator().am_base(dec!(100000), dec!(10000), dec!(1000));

        assert_eq!(result, dec!(89000));
    }

    #[test]
    fn am_base_floors_at_zero() {
        let result = calculator().am_base(dec!(1000), dec!(0), dec!(1188));

        assert_eq!(result, dec!(0));
    }

    #[test]
    fn am_contribution_is_eight_percent() {
        let result = calculator().am_contribution(dec!(89000));

        assert_eq!(result, dec!(7120));
    }

    #[test]
    fn am_contribution_is_rounded() {
        // 796812 × 0.08 = 63744.96
        let result = calculator().am_contribution(dec!(796812));

        assert_eq!(result, dec!(63745));
    }

    #[test]
    fn personal_income_after_am_subtracts_contribution() {
        let result = calculator().personal_income_after_am(dec!(89000), dec!(7120));

        assert_eq!(result, dec!(81880));
    }

    // =========================================================================
    // earned-income credit tests
    // =========================================================================

    #[test]
    fn employment_deduction_applies_rate() {
        // 81880 × 0.1275 = 10439.70
        let result = calculator().employment_deduction(dec!(81880));

        assert_eq!(result, dec!(10440));
    }

    #[test]
    fn employment_deduction_is_capped() {
        let result = calculator().employment_deduction(dec!(1840000));

        assert_eq!(result, dec!(63300));
    }

    #[test]
    fn job_deduction_is_zero_at_threshold() {
        let result = calculator().job_deduction(dec!(235200));

        assert_eq!(result, dec!(0));
    }

    #[test]
    fn job_deduction_is_zero_below_threshold() {
        let result = calculator().job_deduction(dec!(100000));

        assert_eq!(result, dec!(0));
    }

    #[test]
    fn job_deduction_applies_rate_above_threshold() {
        // (255200 - 235200) × 0.045 = 900
        let result = calculator().job_deduction(dec!(255200));

        assert_eq!(result, dec!(900));
    }

    #[test]
    fn job_deduction_is_capped() {
        let result = calculator().job_deduction(dec!(552000));

        assert_eq!(result, dec!(3100));
    }

    #[test]
    fn nominal_deductions_clamp_negative_other_deductions() {
        let result = calculator().nominal_deductions(dec!(81880), dec!(-2500));

        assert_eq!(result.other_deductions, dec!(0));
        assert_eq!(result.personal_allowance, dec!(54100));
    }

    // =========================================================================
    // bracket tests
    // =========================================================================

    #[test]
    fn bracket_taxes_zero_below_every_threshold() {
        let result = calculator().bracket_taxes(dec!(552000));

        assert_eq!(result, [dec!(0), dec!(0), dec!(0)]);
    }

    #[test]
    fn bracket_taxes_zero_at_threshold() {
        let result = calculator().bracket_taxes(dec!(641200));

        assert_eq!(result, [dec!(0), dec!(0), dec!(0)]);
    }

    #[test]
    fn bracket_taxes_stack_from_independent_thresholds() {
        // Middle: (1840000 - 641200) × 0.075 = 89910
        // Top:    (1840000 - 777900) × 0.075 = 79657.5
        let result = calculator().bracket_taxes(dec!(1840000));

        assert_eq!(result, [dec!(89910), dec!(79658), dec!(0)]);
    }

    #[test]
    fn bracket_taxes_all_three_apply_above_top_top_threshold() {
        // Middle: (3000000 - 641200) × 0.075 = 176910
        // Top:    (3000000 - 777900) × 0.075 = 166657.5
        // TopTop: (3000000 - 2592700) × 0.05 = 20365
        let result = calculator().bracket_taxes(dec!(3000000));

        assert_eq!(result, [dec!(176910), dec!(166658), dec!(20365)]);
    }

    // =========================================================================
    // rate tests
    // =========================================================================

    #[test]
    fn marginal_rate_below_brackets_is_flat_rates() {
        let result = calculator().marginal_tax_rate(dec!(552000), dec!(0.2505), dec!(0));

        // 0.08 + 0.2505 + 0.1201
        assert_eq!(result, dec!(0.4506));
    }

    #[test]
    fn marginal_rate_excludes_bracket_at_exact_threshold() {
        let result = calculator().marginal_tax_rate(dec!(641200), dec!(0.2505), dec!(0));

        assert_eq!(result, dec!(0.4506));
    }

    #[test]
    fn marginal_rate_adds_exceeded_brackets() {
        let result = calculator().marginal_tax_rate(dec!(1840000), dec!(0.2505), dec!(0.007));

        // 0.08 + 0.2505 + 0.007 + 0.1201 + 0.075 + 0.075
        assert_eq!(result, dec!(0.6076));
    }

    #[test]
    fn effective_rate_is_zero_for_zero_gross() {
        let result = calculator().effective_tax_rate(dec!(0), dec!(0));

        assert_eq!(result, dec!(0));
    }

    #[test]
    fn net_monthly_divides_by_twelve_and_rounds() {
        // 392086 / 12 = 32673.83
        let result = calculator().net_monthly(dec!(392086));

        assert_eq!(result, dec!(32674));
    }

    #[test]
    fn net_annual_floors_at_zero() {
        let result = calculator().net_annual(dec!(1000), dec!(0), dec!(1188), dec!(0));

        assert_eq!(result, dec!(0));
    }

    // =========================================================================
    // calculate (integration) tests
    // =========================================================================

    #[test]
    fn calculate_zero_gross_returns_zero_breakdown() {
        let mut inputs = annual_inputs(dec!(0));
        inputs.atp_annual_amount = dec!(1188);
        inputs.church_member = true;
        inputs.church_tax_rate = dec!(0.008);

        let result = calculator().calculate(&inputs);

        assert_eq!(result, SalaryAfterTaxBreakdown::zero());
    }

    #[test]
    fn calculate_standard_case() {
        let inputs = SalaryAfterTaxInputs::new(TaxYear::Y2026, dec!(50000), GrossPeriod::Monthly);

        let result = calculator().calculate(&inputs);

        assert_eq!(result.gross_annual, dec!(600000));
        assert_eq!(result.am_base, dec!(600000));
        assert_eq!(result.am_contribution, dec!(48000));
        assert_eq!(result.personal_income_after_am, dec!(552000));
        assert_eq!(result.personal_allowance, dec!(54100));
        assert_eq!(result.employment_deduction, dec!(63300));
        assert_eq!(result.job_deduction, dec!(3100));
        assert_eq!(result.taxable_income, dec!(431500));
        // 431500 × 0.2505 = 108090.75
        assert_eq!(result.municipal_tax, dec!(108091));
        assert_eq!(result.church_tax, dec!(0));
        // 431500 × 0.1201 = 51823.15
        assert_eq!(result.bundskat, dec!(51823));
        assert_eq!(result.middle_bracket_tax, dec!(0));
        assert_eq!(result.total_tax, dec!(207914));
        assert_eq!(result.net_annual, dec!(392086));
        assert_eq!(result.net_monthly, dec!(32674));
        assert_eq!(result.marginal_tax_rate, dec!(0.4506));
        assert_eq!(result.effective_tax_rate, dec!(207914) / dec!(600000));
    }

    #[test]
    fn calculate_with_pension_atp_church_and_middle_bracket() {
        let mut inputs = SalaryAfterTaxInputs::new(TaxYear::Y2026, dec!(70000), GrossPeriod::Monthly);
        inputs.employee_pension_rate = dec!(0.05);
        inputs.atp_annual_amount = dec!(1188);
        inputs.municipal_tax_rate = dec!(0.2339);
        inputs.church_tax_rate = dec!(0.008);
        inputs.church_member = true;

        let result = calculator().calculate(&inputs);

        assert_eq!(result.gross_annual, dec!(840000));
        assert_eq!(result.pension, dec!(42000));
        assert_eq!(result.atp, dec!(1188));
        assert_eq!(result.am_base, dec!(796812));
        assert_eq!(result.am_contribution, dec!(63745));
        assert_eq!(result.personal_income_after_am, dec!(733067));
        assert_eq!(result.taxable_income, dec!(612567));
        assert_eq!(result.municipal_tax, dec!(143279));
        assert_eq!(result.church_tax, dec!(4901));
        assert_eq!(result.bundskat, dec!(73569));
        assert_eq!(result.bracket_tax(BracketKind::Middle), dec!(6890));
        assert_eq!(result.bracket_tax(BracketKind::Top), dec!(0));
        assert_eq!(result.total_tax, dec!(292384));
        assert_eq!(result.net_annual, dec!(504428));
        assert_eq!(result.net_monthly, dec!(42036));
        assert_eq!(result.marginal_tax_rate, dec!(0.517));
    }

    #[test]
    fn calculate_church_tax_requires_membership() {
        let mut inputs = annual_inputs(dec!(500000));
        inputs.church_tax_rate = dec!(0.05);
        inputs.church_member = false;

        let result = calculator().calculate(&inputs);

        assert_eq!(result.church_tax, dec!(0));
        assert_eq!(result.marginal_tax_rate, dec!(0.4506));
    }

    #[test]
    fn calculate_low_income_allowance_absorbs_everything() {
        let result = calculator().calculate(&annual_inputs(dec!(50000)));

        assert_eq!(result.personal_income_after_am, dec!(46000));
        assert_eq!(result.personal_allowance, dec!(46000));
        assert_eq!(result.employment_deduction, dec!(0));
        assert_eq!(result.taxable_income, dec!(0));
        assert_eq!(result.total_tax, dec!(4000));
        assert_eq!(result.net_annual, dec!(46000));
    }

    #[test]
    fn calculate_other_deductions_truncated_last() {
        let mut inputs = annual_inputs(dec!(70000));
        inputs.other_deductions_annual = dec!(5000);

        let result = calculator().calculate(&inputs);

        // 64400 - 54100 - 8211 = 2089 left for other deductions
        assert_eq!(result.personal_income_after_am, dec!(64400));
        assert_eq!(result.employment_deduction, dec!(8211));
        assert_eq!(result.other_deductions, dec!(2089));
        assert_eq!(result.taxable_income, dec!(0));
    }

    #[test]
    fn calculate_clamps_negative_inputs() {
        let mut inputs = annual_inputs(dec!(100000));
        inputs.employee_pension_rate = dec!(-0.1);
        inputs.atp_annual_amount = dec!(-1000);
        inputs.other_deductions_annual = dec!(-5000);
        inputs.municipal_tax_rate = dec!(-0.25);

        let result = calculator().calculate(&inputs);

        assert_eq!(result.pension, dec!(0));
        assert_eq!(result.atp, dec!(0));
        assert_eq!(result.other_deductions, dec!(0));
        assert_eq!(result.municipal_tax, dec!(0));
        assert_eq!(result.am_base, dec!(100000));
    }

    #[test]
    fn calculate_atp_above_gross_keeps_net_at_zero() {
        let mut inputs = annual_inputs(dec!(800));
        inputs.atp_annual_amount = dec!(1188);

        let result = calculator().calculate(&inputs);

        assert_eq!(result.am_base, dec!(0));
        assert_eq!(result.total_tax, dec!(0));
        assert_eq!(result.net_annual, dec!(0));
    }

    #[test]
    fn calculate_carries_model_assumptions() {
        let result = calculator().calculate(&annual_inputs(dec!(450000)));

        assert_eq!(result.assumptions, MODEL_ASSUMPTIONS);
    }

    #[test]
    fn salary_after_tax_uses_inputs_year() {
        let inputs = annual_inputs(dec!(450000));

        assert_eq!(salary_after_tax(&inputs), compute(&inputs, TaxYear::Y2026.config()));
    }
}
