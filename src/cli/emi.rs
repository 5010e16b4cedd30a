use super::ui;
use crate::core::amortization::{
    AmortizationResult, LoanParameters, PrepaymentImpact, compute_loan_amortization,
    prepayment_scenarios,
};
use anyhow::Result;
use comfy_table::Cell;

fn render_schedule(result: &AmortizationResult) -> String {
    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Year"),
        ui::header_cell("Principal Paid"),
        ui::header_cell("Interest Paid"),
        ui::header_cell("Balance"),
    ]);

    for entry in &result.schedule {
        table.add_row(vec![
            Cell::new(entry.period),
            ui::amount_cell(entry.principal_paid),
            ui::amount_cell(entry.interest_paid),
            ui::amount_cell(entry.remaining_balance),
        ]);
    }
    table.to_string()
}

fn render_prepayments(impacts: &[PrepaymentImpact]) -> String {
    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Prepayment"),
        ui::header_cell("New EMI"),
        ui::header_cell("Interest Saved"),
    ]);

    for impact in impacts {
        table.add_row(vec![
            ui::amount_cell(impact.prepayment),
            ui::amount_cell(impact.new_payment),
            ui::change_cell(
                ui::format_amount(impact.interest_saved, 0),
                impact.interest_saved,
            ),
        ]);
    }
    table.to_string()
}

/// Renders the loan summary, yearly schedule and prepayment scenarios.
pub fn render(
    params: &LoanParameters,
    result: &AmortizationResult,
    impacts: &[PrepaymentImpact],
) -> String {
    let mut output = format!(
        "{}\n\n",
        ui::style_text("Loan Amortization", ui::StyleType::Title)
    );

    output.push_str(&format!(
        "Monthly EMI: {}\n",
        ui::style_text(
            &ui::format_amount(result.periodic_payment, 0),
            ui::StyleType::TotalValue
        )
    ));
    output.push_str(&format!(
        "Total Interest: {} ({:.1}% of principal)\n",
        ui::format_amount(result.total_interest, 0),
        result.interest_to_principal_ratio(params.principal)
    ));
    output.push_str(&format!(
        "Total Payment: {} over {} years\n",
        ui::format_amount(result.total_payment, 0),
        params.term_years
    ));
    let crossover = result.crossover_period().unwrap_or(params.term_years);
    output.push_str(&format!(
        "Principal overtakes interest in year {crossover}\n\n"
    ));

    output.push_str(&render_schedule(result));

    if !impacts.is_empty() {
        output.push_str(&format!(
            "\n\n{}\n",
            ui::style_text("Prepayment Impact", ui::StyleType::TotalLabel)
        ));
        output.push_str(&render_prepayments(impacts));
    }

    output.push_str(&format!(
        "\n\n{}",
        ui::style_text(
            "Figures are indicative. Verify the exact EMI with your lender.",
            ui::StyleType::Subtle
        )
    ));
    output
}

pub fn run(params: &LoanParameters, prepayments: &[f64]) -> Result<()> {
    let result = compute_loan_amortization(params)?;
    // Candidates at or above the principal are meaningless for this loan.
    let candidates: Vec<f64> = prepayments
        .iter()
        .copied()
        .filter(|p| *p > 0.0 && *p < params.principal)
        .collect();
    let impacts = prepayment_scenarios(params, &result, &candidates)?;

    println!("{}", render(params, &result, &impacts));
    Ok(())
}
