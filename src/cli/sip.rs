use super::ui;
use crate::core::growth::{GrowthResult, InvestmentParameters, compute_growth};
use anyhow::Result;
use comfy_table::Cell;

pub fn render(params: &InvestmentParameters, result: &GrowthResult) -> String {
    let mut output = format!(
        "{}\n\n",
        ui::style_text("SIP Growth", ui::StyleType::Title)
    );
    output.push_str(&format!(
        "Monthly contribution of {} at {}% for {} years\n",
        ui::format_amount(params.monthly_contribution, 0),
        params.annual_rate_percent,
        params.term_years
    ));
    output.push_str(&format!(
        "Invested: {}\n",
        ui::format_amount(result.total_invested, 0)
    ));
    output.push_str(&format!(
        "Growth: {}\n",
        ui::format_amount(result.total_growth, 0)
    ));
    output.push_str(&format!(
        "Final Value: {}\n\n",
        ui::style_text(
            &ui::format_amount(result.total_value, 0),
            ui::StyleType::TotalValue
        )
    ));

    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Year"),
        ui::header_cell("Invested"),
        ui::header_cell("Value"),
        ui::header_cell("Growth"),
    ]);
    for entry in &result.schedule {
        table.add_row(vec![
            Cell::new(entry.year),
            ui::amount_cell(entry.invested_to_date),
            ui::amount_cell(entry.value_to_date),
            ui::change_cell(
                ui::format_amount(entry.growth_to_date, 0),
                entry.growth_to_date,
            ),
        ]);
    }
    output.push_str(&table.to_string());
    output
}

pub fn run(params: &InvestmentParameters) -> Result<()> {
    let result = compute_growth(params)?;
    println!("{}", render(params, &result));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_sip_totals() {
        let params = InvestmentParameters::new(5_000.0, 0.0, 3);
        let result = compute_growth(&params).unwrap();

        let output = console::strip_ansi_codes(&render(&params, &result)).to_string();
        assert!(output.contains("Invested: 1,80,000"));
        assert!(output.contains("Final Value: 1,80,000"));
        assert!(output.contains("Growth: 0"));
    }

    #[test]
    fn test_run_rejects_zero_contribution() {
        let params = InvestmentParameters::new(0.0, 12.0, 35);
        assert!(run(&params).is_err());
    }
}
