//! Huntress API CLI binary.
//!
//! A command-line interface for interacting with the Huntress API.

use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use huntress::cli::{Cli, Command, Entity};
use huntress::output::PrettyPrint;
use huntress::{
    Account, Agent, AgentListQuery, BillingReport, ClientConfig, Context, Get, HuntressClient,
    HuntressError, IncidentReport, IncidentReportListQuery, List, Organization, Page, Report,
    ReportListQuery, TracingLogger,
};
use serde::Serialize;
use tabled::{Table, Tabled};

const DEFAULT_CLI_PAGE_SIZE: u32 = 20;

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let client = match ClientConfig::from_env()
        .and_then(|config| config.logger(Arc::new(TracingLogger)).build())
    {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {e}");
            eprintln!("Hint: Set HUNTRESS_API_KEY and HUNTRESS_API_SECRET environment variables");
            return ExitCode::FAILURE;
        }
    };

    let ctx = match cli.timeout {
        Some(secs) => Context::with_timeout(Duration::from_secs(secs)),
        None => Context::background(),
    };

    let interrupt = ctx.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            interrupt.cancel();
        }
    });

    match run(&client, &ctx, cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(client: &HuntressClient, ctx: &Context, cli: Cli) -> huntress::Result<()> {
    match cli.command {
        Command::Account => {
            let account = Account::current(client, ctx).await?;
            output_single(&account, cli.json)
        }
        Command::Get { entity, id } => handle_get(client, ctx, entity, id, cli.json).await,
        Command::List {
            entity,
            page,
            limit,
            organization,
        } => handle_list(client, ctx, entity, page, limit, organization, cli.json).await,
    }
}

async fn handle_get(
    client: &HuntressClient,
    ctx: &Context,
    entity: Entity,
    id: u64,
    json: bool,
) -> huntress::Result<()> {
    match entity {
        Entity::Organization => output_single(&Organization::get(client, ctx, id).await?, json),
        Entity::Agent => output_single(&Agent::get(client, ctx, id).await?, json),
        Entity::Incident => output_single(&IncidentReport::get(client, ctx, id).await?, json),
        Entity::Report => output_single(&Report::get(client, ctx, id).await?, json),
        Entity::BillingReport => output_single(&BillingReport::get(client, ctx, id).await?, json),
    }
}

async fn handle_list(
    client: &HuntressClient,
    ctx: &Context,
    entity: Entity,
    page: Option<u32>,
    limit: Option<u32>,
    organization: Option<u64>,
    json: bool,
) -> huntress::Result<()> {
    let page = page.unwrap_or(1);
    let limit = limit.unwrap_or(DEFAULT_CLI_PAGE_SIZE);

    if organization.is_some() && matches!(entity, Entity::Organization | Entity::BillingReport) {
        eprintln!("Warning: --organization is ignored when listing this entity");
    }

    match entity {
        Entity::Organization => {
            let orgs = Organization::list_page(client, ctx, &(), page, limit).await?;
            output_page(&orgs, json, |item| OrganizationRow::from(item))
        }
        Entity::Agent => {
            let query = AgentListQuery {
                organization_id: organization,
                ..Default::default()
            };
            let agents = Agent::list_page(client, ctx, &query, page, limit).await?;
            output_page(&agents, json, |item| AgentRow::from(item))
        }
        Entity::Incident => {
            let query = IncidentReportListQuery {
                organization_id: organization,
                ..Default::default()
            };
            let incidents = IncidentReport::list_page(client, ctx, &query, page, limit).await?;
            output_page(&incidents, json, |item| IncidentRow::from(item))
        }
        Entity::Report => {
            let query = ReportListQuery {
                organization_id: organization,
                ..Default::default()
            };
            let reports = Report::list_page(client, ctx, &query, page, limit).await?;
            output_page(&reports, json, |item| ReportRow::from(item))
        }
        Entity::BillingReport => {
            let reports =
                BillingReport::list_page(client, ctx, &Default::default(), page, limit).await?;
            output_page(&reports, json, |item| BillingRow::from(item))
        }
    }
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> huntress::Result<String> {
    serde_json::to_string_pretty(value).map_err(HuntressError::Serialize)
}

fn output_single<T: Serialize + PrettyPrint>(item: &T, json: bool) -> huntress::Result<()> {
    if json {
        println!("{}", to_json(item)?);
    } else {
        println!("{}", item.pretty_print());
    }
    Ok(())
}

fn output_page<T, R, F>(page: &Page<T>, json: bool, to_row: F) -> huntress::Result<()>
where
    T: Serialize,
    R: Tabled,
    F: Fn(&T) -> R,
{
    if json {
        println!("{}", to_json(&page.items)?);
    } else {
        println!("{}", render_page(page, to_row));
    }
    Ok(())
}

fn render_page<T, R, F>(page: &Page<T>, to_row: F) -> String
where
    R: Tabled,
    F: Fn(&T) -> R,
{
    let rows: Vec<R> = page.items.iter().map(to_row).collect();
    let p = &page.pagination;
    let footer = if p.total_items > 0 {
        format!(
            "Page {}/{} ({} total items)",
            p.page, p.total_pages, p.total_items
        )
    } else if page.has_more() {
        format!("Page {} (more available)", p.page)
    } else {
        format!("Page {} (end)", p.page)
    };
    format!("{}\n\n{footer}", Table::new(rows))
}

fn opt<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

// Table row types for non-JSON output

#[derive(Tabled)]
struct OrganizationRow {
    id: u64,
    name: String,
    agents: String,
    incidents: String,
}

impl From<&Organization> for OrganizationRow {
    fn from(o: &Organization) -> Self {
        Self {
            id: o.id,
            name: o.name.clone(),
            agents: opt(o.agents_count),
            incidents: opt(o.incident_reports_count),
        }
    }
}

#[derive(Tabled)]
struct AgentRow {
    id: u64,
    hostname: String,
    platform: String,
    version: String,
    #[tabled(rename = "last callback")]
    last_callback: String,
}

impl From<&Agent> for AgentRow {
    fn from(a: &Agent) -> Self {
        Self {
            id: a.id,
            hostname: a.hostname.clone(),
            platform: a.platform.clone().unwrap_or_default(),
            version: a.version.clone().unwrap_or_default(),
            last_callback: opt(a.last_callback_at.map(|t| t.format("%Y-%m-%d %H:%M"))),
        }
    }
}

#[derive(Tabled)]
struct IncidentRow {
    id: u64,
    status: String,
    severity: String,
    subject: String,
}

impl From<&IncidentReport> for IncidentRow {
    fn from(i: &IncidentReport) -> Self {
        Self {
            id: i.id,
            status: i.status.clone().unwrap_or_default(),
            severity: i.severity.clone().unwrap_or_default(),
            subject: i.subject.clone().unwrap_or_default(),
        }
    }
}

#[derive(Tabled)]
struct ReportRow {
    id: u64,
    #[tabled(rename = "type")]
    report_type: String,
    period: String,
    organization: String,
}

impl From<&Report> for ReportRow {
    fn from(r: &Report) -> Self {
        Self {
            id: r.id,
            report_type: r.report_type.clone().unwrap_or_default(),
            period: r.period.clone().unwrap_or_default(),
            organization: opt(r.organization_id),
        }
    }
}

#[derive(Tabled)]
struct BillingRow {
    id: u64,
    plan: String,
    quantity: String,
    amount: String,
    status: String,
}

impl From<&BillingReport> for BillingRow {
    fn from(b: &BillingReport) -> Self {
        Self {
            id: b.id,
            plan: b.plan.clone().unwrap_or_default(),
            quantity: opt(b.quantity),
            amount: opt(b.amount.map(|a| format!("{a:.2}"))),
            status: b.status.clone().unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use huntress::Pagination;

    use super::*;

    fn page<T>(items: Vec<T>, pagination: Pagination) -> Page<T> {
        Page::new(items, pagination)
    }

    #[test]
    fn test_render_agent_page() {
        let agent: Agent = serde_json::from_value(serde_json::json!({
            "id": 17,
            "hostname": "WS-0042",
            "platform": "windows"
        }))
        .unwrap();
        let pagination = Pagination {
            page: 1,
            per_page: 20,
            total_pages: 3,
            total_items: 41,
        };

        let output = render_page(&page(vec![agent], pagination), |item| AgentRow::from(item));
        assert!(output.contains("WS-0042"));
        assert!(output.contains("last callback"));
        assert!(output.ends_with("Page 1/3 (41 total items)"));
    }

    #[test]
    fn test_render_billing_page_without_totals() {
        let report: BillingReport = serde_json::from_value(serde_json::json!({
            "id": 3,
            "plan": "managed_edr",
            "amount": 120.5
        }))
        .unwrap();

        let output = render_page(&page(vec![report], Pagination::default()), |item| {
            BillingRow::from(item)
        });
        assert!(output.contains("managed_edr"));
        assert!(output.contains("120.50"));
        assert!(output.ends_with("Page 1 (end)"));
    }
}
