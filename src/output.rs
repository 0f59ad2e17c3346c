//! Output formatting for CLI display.
//!
//! Provides the [`PrettyPrint`] trait for human-readable output
//! as an alternative to JSON serialization.

use chrono::{DateTime, Utc};

use crate::{Account, Agent, BillingReport, IncidentReport, Organization, Report};

/// Trait for human-readable key-value output.
///
/// Implemented by entity types to provide formatted output
/// suitable for terminal display when `--json` is not specified.
pub trait PrettyPrint {
    /// Returns a formatted string for terminal display.
    fn pretty_print(&self) -> String;
}

fn timestamp(value: &DateTime<Utc>) -> String {
    value.format("%Y-%m-%d %H:%M:%S UTC").to_string()
}

fn heading(title: String) -> Vec<String> {
    let divider = "─".repeat(title.chars().count().max(30));
    vec![title, divider]
}

fn push_opt(lines: &mut Vec<String>, label: &str, value: Option<impl std::fmt::Display>) {
    if let Some(value) = value {
        lines.push(format!("{:<16}{}", format!("{label}:"), value));
    }
}

impl PrettyPrint for Account {
    fn pretty_print(&self) -> String {
        let mut lines = heading(format!("Account #{}", self.id));
        lines.push(format!("Name:           {}", self.name));
        push_opt(&mut lines, "Status", self.status.as_deref());
        push_opt(&mut lines, "Portal", self.portal_url());
        push_opt(&mut lines, "Created", self.created_at.as_ref().map(timestamp));
        lines.join("\n")
    }
}

impl PrettyPrint for Organization {
    fn pretty_print(&self) -> String {
        let mut lines = heading(format!("Organization #{}", self.id));
        lines.push(format!("Name:           {}", self.name));
        push_opt(&mut lines, "Key", self.key.as_deref());
        push_opt(&mut lines, "Agents", self.agents_count);
        push_opt(&mut lines, "Incidents", self.incident_reports_count);
        if !self.notify_emails.is_empty() {
            lines.push(format!("Notify:         {}", self.notify_emails.join(", ")));
        }
        lines.join("\n")
    }
}

impl PrettyPrint for Agent {
    fn pretty_print(&self) -> String {
        let mut lines = heading(format!("Agent #{}", self.id));
        lines.push(format!("Hostname:       {}", self.hostname));
        push_opt(&mut lines, "Organization", self.organization_id);
        push_opt(&mut lines, "Platform", self.platform.as_deref());
        push_opt(&mut lines, "OS", self.os.as_deref());
        push_opt(&mut lines, "Version", self.version.as_deref());
        push_opt(&mut lines, "IPv4", self.ipv4_address.as_deref());
        push_opt(&mut lines, "Last Callback", self.last_callback_at.as_ref().map(timestamp));
        lines.join("\n")
    }
}

impl PrettyPrint for IncidentReport {
    fn pretty_print(&self) -> String {
        let mut lines = heading(format!("Incident Report #{}", self.id));
        push_opt(&mut lines, "Subject", self.subject.as_deref());
        push_opt(&mut lines, "Status", self.status.as_deref());
        push_opt(&mut lines, "Severity", self.severity.as_deref());
        push_opt(&mut lines, "Organization", self.organization_id);
        push_opt(&mut lines, "Agent", self.agent_id);
        if !self.indicator_types.is_empty() {
            lines.push(format!("Indicators:     {}", self.indicator_types.join(", ")));
        }
        push_opt(&mut lines, "Sent", self.sent_at.as_ref().map(timestamp));
        push_opt(&mut lines, "Summary", self.summary.as_deref());
        lines.join("\n")
    }
}

impl PrettyPrint for Report {
    fn pretty_print(&self) -> String {
        let mut lines = heading(format!("Report #{}", self.id));
        push_opt(&mut lines, "Type", self.report_type.as_deref());
        push_opt(&mut lines, "Period", self.period.as_deref());
        push_opt(&mut lines, "Organization", self.organization_id);
        push_opt(&mut lines, "URL", self.url.as_deref());
        lines.join("\n")
    }
}

impl PrettyPrint for BillingReport {
    fn pretty_print(&self) -> String {
        let mut lines = heading(format!("Billing Report #{}", self.id));
        push_opt(&mut lines, "Plan", self.plan.as_deref());
        push_opt(&mut lines, "Quantity", self.quantity);
        if let Some(amount) = self.amount {
            let currency = self.currency_type.as_deref().unwrap_or("");
            lines.push(format!("Amount:         {amount:.2} {currency}").trim_end().to_string());
        }
        push_opt(&mut lines, "Status", self.status.as_deref());
        lines.join("\n")
    }
}
