use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

/// Defines different styles for text elements.
pub enum StyleType {
    Title,
    TotalLabel,
    TotalValue,
    Subtle,
}

/// Applies a consistent style to a string.
pub fn style_text(text: &str, style_type: StyleType) -> String {
    let styled = match style_type {
        StyleType::Title => style(text).bold().underlined(),
        StyleType::TotalLabel => style(text).bold(),
        StyleType::TotalValue => style(text).green().bold(),
        StyleType::Subtle => style(text).dim(),
    };
    styled.to_string()
}

/// Creates a new `comfy_table::Table` with standard styling.
pub fn new_styled_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

/// Creates a styled header cell for a table.
pub fn header_cell(text: &str) -> Cell {
    Cell::new(text)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

/// Formats an amount with Indian digit grouping (12,34,567). Rounding to
/// `decimals` happens here and nowhere earlier.
pub fn format_amount(value: f64, decimals: usize) -> String {
    let formatted = format!("{:.*}", decimals, value.abs());
    let (int_part, frac_part) = match formatted.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (formatted.as_str(), None),
    };

    let mut grouped = String::new();
    if int_part.len() > 3 {
        let (head, tail) = int_part.split_at(int_part.len() - 3);
        let head_chars: Vec<char> = head.chars().collect();
        let first = head_chars.len() % 2;
        for (i, c) in head_chars.iter().enumerate() {
            if i > 0 && (i + 2 - first) % 2 == 0 {
                grouped.push(',');
            }
            grouped.push(*c);
        }
        grouped.push(',');
        grouped.push_str(tail);
    } else {
        grouped.push_str(int_part);
    }

    if let Some(frac) = frac_part {
        grouped.push('.');
        grouped.push_str(frac);
    }

    let is_zero = formatted.chars().all(|c| c == '0' || c == '.');
    if value < 0.0 && !is_zero {
        format!("-{grouped}")
    } else {
        grouped
    }
}

/// A right-aligned currency cell rounded to whole units.
pub fn amount_cell(value: f64) -> Cell {
    Cell::new(format_amount(value, 0)).set_alignment(CellAlignment::Right)
}

/// Creates a cell for displaying a signed change with color coding.
pub fn change_cell(text: String, change: f64) -> Cell {
    let color = if change >= 0.0 {
        Color::Green
    } else {
        Color::Red
    };
    Cell::new(text).fg(color).set_alignment(CellAlignment::Right)
}

/// Creates a cell for "N/A" values, with error-specific styling.
pub fn na_cell(has_error: bool) -> Cell {
    let color = if has_error {
        Color::Red
    } else {
        Color::DarkGrey
    };
    Cell::new("N/A").fg(color)
}

/// Creates a new `indicatif::ProgressBar` with standard styling.
pub fn new_progress_bar(len: u64, with_message: bool) -> ProgressBar {
    let template = if with_message {
        "{spinner:.green} {msg} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len}"
    } else {
        "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len}"
    };

    let pb = ProgressBar::new(len);
    let style = ProgressStyle::default_bar()
        .template(template)
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("#>-");
    pb.set_style(style);
    pb
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_amount_indian_grouping() {
        assert_eq!(format_amount(0.0, 0), "0");
        assert_eq!(format_amount(999.0, 0), "999");
        assert_eq!(format_amount(1_000.0, 0), "1,000");
        assert_eq!(format_amount(21_695.58, 0), "21,696");
        assert_eq!(format_amount(250_000.0, 0), "2,50,000");
        assert_eq!(format_amount(2_500_000.0, 0), "25,00,000");
        assert_eq!(format_amount(32_154_797.36, 2), "3,21,54,797.36");
        assert_eq!(format_amount(-132.45, 2), "-132.45");
        assert_eq!(format_amount(-1_234_567.0, 0), "-12,34,567");
        assert_eq!(format_amount(-0.2, 0), "0");
    }
}
