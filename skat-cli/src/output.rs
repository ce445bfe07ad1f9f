//! Terminal tables and JSON for command results.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;
use skat_core::{
    BracketKind, BreakdownAssumptions, MunicipalityTable, SalaryAfterTaxBreakdown, TaxYear,
};
use tabled::{
    Table, Tabled,
    settings::{Alignment, Modify, Style, object::Columns},
};

#[derive(Debug, Clone, Tabled)]
struct LineRow {
    #[tabled(rename = "Line")]
    line: String,
    #[tabled(rename = "Amount")]
    amount: String,
}

#[derive(Debug, Clone, Tabled)]
struct ScenarioRow {
    #[tabled(rename = "Scenario")]
    label: String,
    #[tabled(rename = "Gross")]
    gross: String,
    #[tabled(rename = "Total tax")]
    total_tax: String,
    #[tabled(rename = "Net annual")]
    net_annual: String,
    #[tabled(rename = "Net monthly")]
    net_monthly: String,
    #[tabled(rename = "Effective")]
    effective: String,
    #[tabled(rename = "Marginal")]
    marginal: String,
}

#[derive(Debug, Clone, Tabled)]
struct MunicipalityRow {
    #[tabled(rename = "Id")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Kommuneskat")]
    municipal: String,
    #[tabled(rename = "Kirkeskat")]
    church: String,
}

#[derive(Debug, Clone, Tabled)]
struct ParameterRow {
    #[tabled(rename = "Year")]
    year: i32,
    #[tabled(rename = "Parameter")]
    parameter: String,
    #[tabled(rename = "Value")]
    value: String,
}

/// One batch result for JSON output.
#[derive(Debug, Serialize)]
pub struct ScenarioResult<'a> {
    pub label: &'a str,
    #[serde(flatten)]
    pub breakdown: &'a SalaryAfterTaxBreakdown,
}

/// Formats a whole-unit amount with thousands separators, e.g. `392,086 kr`.
pub fn format_kr(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    let digits = rounded.abs().to_string();

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if rounded.is_sign_negative() && !rounded.is_zero() { "-" } else { "" };
    format!("{sign}{grouped} kr")
}

/// Formats a fraction as a percentage with two decimals, e.g. `45.06 %`.
pub fn format_rate(rate: Decimal) -> String {
    let percent = (rate * Decimal::ONE_HUNDRED)
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    format!("{percent:.2} %")
}

fn render(table: &mut Table) -> String {
    table
        .with(Style::rounded())
        .with(Modify::new(Columns::new(1..)).with(Alignment::right()))
        .to_string()
}

fn describe_assumptions(assumptions: &BreakdownAssumptions) -> Vec<String> {
    let order = assumptions
        .deduction_order
        .iter()
        .map(|stage| stage.label())
        .collect::<Vec<_>>()
        .join(" → ");

    vec![
        "Every line is rounded to whole kroner before it is summed.".to_string(),
        "Mellemskat, topskat and toptopskat each tax personal income after AM above their own threshold, and are added together.".to_string(),
        format!("Deductions are taken in order: {order}."),
    ]
}

/// The itemized breakdown as a two-column table followed by the model
/// assumptions.
pub fn breakdown_table(
    year: TaxYear,
    municipality: &str,
    breakdown: &SalaryAfterTaxBreakdown,
) -> String {
    let mut rows = vec![
        LineRow::amount("Gross salary", breakdown.gross_annual),
        LineRow::amount("Pension", breakdown.pension),
        LineRow::amount("ATP", breakdown.atp),
        LineRow::amount("AM base", breakdown.am_base),
        LineRow::amount("Personal income after AM", breakdown.personal_income_after_am),
    ];
    rows.extend(
        breakdown
            .deductions()
            .into_iter()
            .map(|(stage, amount)| LineRow::amount(stage.label(), amount)),
    );
    rows.push(LineRow::amount("Taxable income", breakdown.taxable_income));
    rows.extend(
        breakdown
            .tax_lines()
            .into_iter()
            .map(|(label, amount)| LineRow::amount(label, amount)),
    );
    rows.extend([
        LineRow::amount("Total tax", breakdown.total_tax),
        LineRow::amount("Net annual", breakdown.net_annual),
        LineRow::amount("Net monthly", breakdown.net_monthly),
        LineRow::rate("Effective tax rate", breakdown.effective_tax_rate),
        LineRow::rate("Marginal tax rate", breakdown.marginal_tax_rate),
    ]);

    let mut out = format!("Income year {} · municipality: {municipality}\n", year.as_i32());
    out.push_str(&render(&mut Table::new(rows)));
    for note in describe_assumptions(&breakdown.assumptions) {
        out.push_str("\n  ");
        out.push_str(&note);
    }
    out
}

pub fn batch_table(results: &[ScenarioResult<'_>]) -> String {
    if results.is_empty() {
        return "No scenarios found".to_string();
    }

    let rows: Vec<ScenarioRow> = results
        .iter()
        .map(|result| ScenarioRow {
            label: result.label.to_string(),
            gross: format_kr(result.breakdown.gross_annual),
            total_tax: format_kr(result.breakdown.total_tax),
            net_annual: format_kr(result.breakdown.net_annual),
            net_monthly: format_kr(result.breakdown.net_monthly),
            effective: format_rate(result.breakdown.effective_tax_rate),
            marginal: format_rate(result.breakdown.marginal_tax_rate),
        })
        .collect();

    render(&mut Table::new(rows))
}

pub fn municipalities_table(table: &MunicipalityTable) -> String {
    if table.is_empty() {
        return "No municipalities loaded".to_string();
    }

    let rows: Vec<MunicipalityRow> = table
        .iter()
        .map(|municipality| MunicipalityRow {
            id: municipality.id.clone(),
            name: municipality.name.clone(),
            municipal: format_rate(municipality.municipal_rate()),
            church: format_rate(municipality.church_rate()),
        })
        .collect();

    render(&mut Table::new(rows))
}

pub fn years_table(years: &[TaxYear]) -> String {
    let rows: Vec<ParameterRow> = years
        .iter()
        .flat_map(|year| {
            let config = year.config();
            let year = year.as_i32();
            let mut rows = vec![
                ParameterRow::new(year, "AM-bidrag", format_rate(config.am_rate)),
                ParameterRow::new(year, "Bundskat", format_rate(config.bundskat_rate)),
                ParameterRow::new(year, "Personfradrag", format_kr(config.personal_allowance)),
                ParameterRow::new(
                    year,
                    "Beskæftigelsesfradrag",
                    format!(
                        "{}, max {}",
                        format_rate(config.employment_deduction_rate),
                        format_kr(config.employment_deduction_cap)
                    ),
                ),
                ParameterRow::new(
                    year,
                    "Jobfradrag",
                    format!(
                        "{} above {}, max {}",
                        format_rate(config.job_deduction_rate),
                        format_kr(config.job_deduction_threshold),
                        format_kr(config.job_deduction_cap)
                    ),
                ),
            ];
            rows.extend(BracketKind::ALL.iter().map(|kind| {
                let bracket = config.bracket(*kind);
                ParameterRow::new(
                    year,
                    kind.label(),
                    format!(
                        "{} above {}",
                        format_rate(bracket.rate),
                        format_kr(bracket.threshold)
                    ),
                )
            }));
            rows.push(ParameterRow::new(
                year,
                "Average kommuneskat",
                format_rate(config.default_municipal_rate),
            ));
            rows
        })
        .collect();

    render(&mut Table::new(rows))
}

pub fn to_json<T: Serialize + ?Sized>(value: &T) -> serde_json::Result<String> {
    serde_json::to_string_pretty(value)
}

impl LineRow {
    fn amount(
        line: &str,
        amount: Decimal,
    ) -> Self {
        Self {
            line: line.to_string(),
            amount: format_kr(amount),
        }
    }

    fn rate(
        line: &str,
        rate: Decimal,
    ) -> Self {
        Self {
            line: line.to_string(),
            amount: format_rate(rate),
        }
    }
}

impl ParameterRow {
    fn new(
        year: i32,
        parameter: &str,
        value: String,
    ) -> Self {
        Self {
            year,
            parameter: parameter.to_string(),
            value,
        }
    }
}
