//! Terminal rendering of a breakdown, with Brazilian currency formatting.

use cost_core::{BreakdownInput, BreakdownResult, ItemKind};
use rust_decimal::Decimal;

const RULE_WIDTH: usize = 48;

/// Groups the integer digits of `digits` in threes with `.`.
fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    digits
        .chars()
        .enumerate()
        .fold(String::with_capacity(len + len / 3), |mut out, (i, c)| {
            if i > 0 && (len - i) % 3 == 0 {
                out.push('.');
            }
            out.push(c);
            out
        })
}

/// Two decimal places with `,` as decimal separator and `.` grouping.
fn decimal_pt_br(value: Decimal) -> String {
    let mut rounded = value.round_dp(2);
    rounded.rescale(2);
    let text = rounded.abs().to_string();
    let (int_part, frac_part) = text.split_once('.').unwrap_or((text.as_str(), "00"));
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    format!("{sign}{},{frac_part}", group_thousands(int_part))
}

/// Formats a monetary value as Brazilian reais, e.g. `R$ 5.000,00`.
pub fn format_brl(value: Decimal) -> String {
    format!("R$ {}", decimal_pt_br(value))
}

/// Formats a percentage value (already ×100), e.g. `62,17%`.
pub fn format_percent(value: Decimal) -> String {
    format!("{}%", decimal_pt_br(value))
}

/// Formats a rate fraction as a short percentage, e.g. `0.025` as `2,5%`.
fn format_rate(rate: Decimal) -> String {
    let points = (rate * Decimal::ONE_HUNDRED).normalize();
    format!("{}%", points.to_string().replace('.', ","))
}

fn row_label(
    input: &BreakdownInput,
    kind: ItemKind,
    name: &str,
) -> String {
    match kind {
        ItemKind::Charge { index } => input
            .charges
            .get(index)
            .map(|charge| format!("{name} ({})", format_rate(charge.rate)))
            .unwrap_or_else(|| name.to_string()),
        _ => name.to_string(),
    }
}

/// Renders one line per row, a rule before the total and the percentage
/// increase over the base salary.
///
/// `input` is only consulted for the charge rates shown next to each charge.
pub fn render(
    input: &BreakdownInput,
    result: &BreakdownResult,
) -> String {
    let rows: Vec<(String, String)> = result
        .items
        .iter()
        .map(|item| (row_label(input, item.kind, &item.name), format_brl(item.value)))
        .collect();
    let label_width = rows.iter().map(|(l, _)| l.chars().count()).max().unwrap_or(0);
    let value_width = rows.iter().map(|(_, v)| v.chars().count()).max().unwrap_or(0);

    let rule = "-".repeat(RULE_WIDTH.max(label_width + value_width + 2));

    let mut out = String::new();
    for (item, (label, value)) in result.items.iter().zip(&rows) {
        if item.kind == ItemKind::Total {
            out.push_str(&rule);
            out.push('\n');
        }
        let pad = " ".repeat(label_width - label.chars().count());
        out.push_str(&format!("{label}{pad}  {value:>value_width$}\n"));
    }
    out.push_str(&format!(
        "Acréscimo sobre o salário: {}\n",
        format_percent(result.percent_over_salary)
    ));
    out
}
