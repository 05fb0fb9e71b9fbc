//! Output formatting utilities

use colored::*;
use deposit_gate::{DepositPolicy, PolicyRow};
use tabled::{Table, Tabled};

/// One line of the deposit type table
#[derive(Tabled)]
pub struct PolicyTableRow {
    #[tabled(rename = "Type")]
    pub code: String,
    #[tabled(rename = "Name")]
    pub name: String,
    #[tabled(rename = "Status")]
    pub status: String,
    #[tabled(rename = "Token")]
    pub token: String,
}

impl From<&PolicyRow> for PolicyTableRow {
    fn from(row: &PolicyRow) -> Self {
        Self {
            code: row.deposit_type.to_string(),
            name: row.label.clone(),
            status: blocked_label(row.blocked).to_string(),
            token: token_label(row.no_token).to_string(),
        }
    }
}

pub fn blocked_label(blocked: bool) -> &'static str {
    if blocked {
        "BLOCKED"
    } else {
        "Allowed"
    }
}

pub fn token_label(no_token: bool) -> &'static str {
    if no_token {
        "No token required"
    } else {
        "Requires token"
    }
}

/// One-line rendering of a policy, e.g. `Allowed, Requires token`.
pub fn describe_policy(policy: DepositPolicy) -> String {
    let status = if policy.blocked {
        blocked_label(true).red().to_string()
    } else {
        blocked_label(false).green().to_string()
    };
    format!("{}, {}", status, token_label(policy.no_token))
}

/// Print the deposit type table
pub fn print_policy_table(rows: &[PolicyRow]) {
    if rows.is_empty() {
        println!("{}", "No results".dimmed());
        return;
    }
    let rows: Vec<PolicyTableRow> = rows.iter().map(PolicyTableRow::from).collect();
    println!("{}", Table::new(rows));
}

/// Print a section heading
pub fn print_heading(title: &str) {
    println!("{}", title.bold());
    println!("{}", "=".repeat(title.len()));
}

/// Print an aligned key/value line
pub fn print_field(label: &str, value: impl std::fmt::Display) {
    println!("  {:<16} {}", format!("{label}:"), value);
}

/// Print a success message
pub fn print_success(message: &str) {
    println!("{} {}", "✓".green(), message);
}

/// Print an error message
pub fn print_error(message: &str) {
    eprintln!("{} {}", "✗".red(), message);
}

/// Print a warning message
pub fn print_warning(message: &str) {
    println!("{} {}", "⚠".yellow(), message);
}

/// Print an info message
pub fn print_info(message: &str) {
    println!("{} {}", "ℹ".blue(), message);
}

#[cfg(test)]
mod tests {
    use super::*;
    use deposit_gate::DepositType;

    #[test]
    fn table_row_uses_operator_labels() {
        let row = PolicyRow::new(DepositType::TOP_UP, DepositPolicy::new(true, true));
        let table_row = PolicyTableRow::from(&row);
        assert_eq!(table_row.code, "0xffff");
        assert_eq!(table_row.name, "Top-up deposits");
        assert_eq!(table_row.status, "BLOCKED");
        assert_eq!(table_row.token, "No token required");
    }

    #[test]
    fn describe_policy_mentions_both_flags() {
        colored::control::set_override(false);
        assert_eq!(
            describe_policy(DepositPolicy::default()),
            "Allowed, Requires token"
        );
    }
}
