mod api;
mod charge;
mod config;
mod error;
mod soa;
mod store;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tabled::{settings::Style, Table, Tabled};

use crate::api::types::{AdmittedPatient, FinalizedBill};
use crate::api::BillingClient;
use crate::charge::{finalize, ChargeLineItem, StagingStore};
use crate::config::{config_dir, load_config, Config, CONFIG_TEMPLATE};
use crate::error::{BillingError, Result};
use crate::soa::{
    build_payment_request, build_view, suggest_reference, validate_payment, PaymentMethod, SoaView,
};
use crate::store::JsonFileStore;

#[derive(Parser)]
#[command(name = "wardbill")]
#[command(version, about = "Billing and statement-of-account CLI for a birthing-care facility", long_about = None)]
struct Cli {
    /// Path to config directory (default: ~/.wardbill or XDG config)
    #[arg(short = 'C', long, global = true)]
    config_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize config directory with a template config file
    Init,

    /// List currently admitted patients
    Patients,

    /// List the billable service catalog
    Services {
        /// Include inactive services
        #[arg(long)]
        all: bool,
    },

    /// Stage charges for a patient (merged into their open staging group)
    Stage {
        /// Patient id from 'patients'
        #[arg(short, long)]
        patient: u64,

        /// Charges in format "service_id:quantity" (can be repeated)
        #[arg(short, long, value_name = "SERVICE:QTY")]
        item: Vec<String>,
    },

    /// Show a patient's staged (not yet billed) charges
    Staged {
        /// Patient id from 'patients'
        #[arg(short, long)]
        patient: u64,
    },

    /// Change a staged line's quantity (0 removes the line)
    SetQty {
        /// Patient id from 'patients'
        #[arg(short, long)]
        patient: u64,

        /// Service id of the staged line
        #[arg(short, long)]
        service: u64,

        /// New quantity; 0 deletes the line
        #[arg(short, long)]
        qty: i64,
    },

    /// Remove one staged group
    Unstage {
        /// Patient id from 'patients'
        #[arg(short, long)]
        patient: u64,

        /// Group id from 'staged'
        #[arg(short, long)]
        group: String,
    },

    /// Drop everything staged for a patient
    ClearStaged {
        /// Patient id from 'patients'
        #[arg(short, long)]
        patient: u64,
    },

    /// Send staged charges to the billing server as a bill
    Finalize {
        /// Patient id from 'patients'
        #[arg(short, long)]
        patient: u64,
    },

    /// Show the reconciled statement of account
    Soa {
        /// Patient id from 'patients'
        #[arg(short, long)]
        patient: u64,
    },

    /// Record a payment against the outstanding balance
    Pay {
        /// Patient id from 'patients'
        #[arg(short, long)]
        patient: u64,

        /// Payment amount
        #[arg(short, long)]
        amount: f64,

        /// Payment method
        #[arg(short, long, value_enum)]
        method: PaymentMethod,

        /// Payment date (default: today)
        #[arg(long)]
        date: Option<String>,

        /// Reference number (default: suggested from method and date)
        #[arg(long)]
        reference: Option<String>,

        /// Free-text notes
        #[arg(long)]
        notes: Option<String>,
    },

    /// Show a patient's payment history
    Payments {
        /// Patient id from 'patients'
        #[arg(short, long)]
        patient: u64,
    },
}

fn main() {
    init_tracing();
    if let Err(e) = run() {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_env("WARDBILL_LOG")
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    // Determine config directory
    let cfg_dir = match cli.config_dir {
        Some(p) => p,
        None => config_dir()?,
    };

    match cli.command {
        Commands::Init => cmd_init(&cfg_dir),
        Commands::Patients => cmd_patients(&cfg_dir),
        Commands::Services { all } => cmd_services(&cfg_dir, all),
        Commands::Stage { patient, item } => cmd_stage(&cfg_dir, patient, &item),
        Commands::Staged { patient } => cmd_staged(&cfg_dir, patient),
        Commands::SetQty {
            patient,
            service,
            qty,
        } => cmd_set_qty(&cfg_dir, patient, service, qty),
        Commands::Unstage { patient, group } => cmd_unstage(&cfg_dir, patient, &group),
        Commands::ClearStaged { patient } => cmd_clear_staged(&cfg_dir, patient),
        Commands::Finalize { patient } => cmd_finalize(&cfg_dir, patient),
        Commands::Soa { patient } => cmd_soa(&cfg_dir, patient),
        Commands::Pay {
            patient,
            amount,
            method,
            date,
            reference,
            notes,
        } => cmd_pay(&cfg_dir, patient, amount, method, date, reference, notes),
        Commands::Payments { patient } => cmd_payments(&cfg_dir, patient),
    }
}

/// Initialize config directory with a template config file
fn cmd_init(cfg_dir: &PathBuf) -> Result<()> {
    use std::fs;

    if cfg_dir.exists() {
        return Err(BillingError::AlreadyInitialized(cfg_dir.clone()));
    }

    fs::create_dir_all(cfg_dir)?;
    fs::write(cfg_dir.join("config.toml"), CONFIG_TEMPLATE)?;

    println!("Initialized wardbill config at: {}", cfg_dir.display());
    println!();
    println!("Next steps:");
    println!(
        "  1. Point it at your billing server:  $EDITOR {}/config.toml",
        cfg_dir.display()
    );
    println!("  2. List admitted patients:           wardbill patients");
    println!();
    println!("Then stage charges and finalize:");
    println!("  wardbill stage --patient <id> --item <service_id>:<quantity>");
    println!("  wardbill finalize --patient <id>");

    Ok(())
}

// Table row structs for tabled
#[derive(Tabled)]
struct PatientRow {
    #[tabled(rename = "ID")]
    id: u64,
    #[tabled(rename = "NAME")]
    name: String,
    #[tabled(rename = "ADMISSION")]
    admission: u64,
    #[tabled(rename = "ROOM RATE")]
    room_rate: String,
    #[tabled(rename = "ADMITTED")]
    admitted: String,
}

#[derive(Tabled)]
struct ServiceRow {
    #[tabled(rename = "ID")]
    id: u64,
    #[tabled(rename = "NAME")]
    name: String,
    #[tabled(rename = "CATEGORY")]
    category: String,
    #[tabled(rename = "PRICE")]
    price: String,
    #[tabled(rename = "ACTIVE")]
    active: String,
}

#[derive(Tabled)]
struct StagedRow {
    #[tabled(rename = "GROUP")]
    group: String,
    #[tabled(rename = "SERVICE")]
    service: String,
    #[tabled(rename = "QTY")]
    qty: u32,
    #[tabled(rename = "UNIT")]
    unit: String,
    #[tabled(rename = "AMOUNT")]
    amount: String,
}

#[derive(Tabled)]
struct SoaRow {
    #[tabled(rename = "DATE")]
    date: String,
    #[tabled(rename = "SERVICE")]
    service: String,
    #[tabled(rename = "QTY")]
    qty: String,
    #[tabled(rename = "UNIT")]
    unit: String,
    #[tabled(rename = "AMOUNT")]
    amount: String,
}

#[derive(Tabled)]
struct PaymentRow {
    #[tabled(rename = "#")]
    index: usize,
    #[tabled(rename = "DATE")]
    date: String,
    #[tabled(rename = "METHOD")]
    method: String,
    #[tabled(rename = "REFERENCE")]
    reference: String,
    #[tabled(rename = "AMOUNT")]
    amount: String,
}

/// Format a money amount with two decimal places and thousands separators
fn format_money(value: f64, currency_symbol: &str) -> String {
    let rounded = format!("{:.2}", value.abs());
    let parts: Vec<&str> = rounded.split('.').collect();
    let grouped = format_grouped_int(parts[0].parse::<i64>().unwrap_or(0));
    let sign = if value < -0.005 { "-" } else { "" };
    format!("{sign}{currency_symbol}{grouped}.{}", parts[1])
}

fn format_grouped_int(value: i64) -> String {
    let negative = value < 0;
    let digits = value.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, ch) in digits.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }

    let mut grouped: String = out.chars().rev().collect();
    if negative {
        grouped.insert(0, '-');
    }
    grouped
}

/// Append CHARGES / PAYMENTS / BALANCE rows under a 5-column SOA table,
/// merging the first four columns into one label cell.
fn add_soa_footer(table: &str, charges: &str, payments: &str, balance: &str) -> String {
    let lines: Vec<&str> = table.lines().collect();
    if lines.len() < 4 {
        return table.to_string();
    }

    // Parse the top border to discover column widths
    let top = lines[0];
    let Some(inner) = top.strip_prefix('╭').and_then(|s| s.strip_suffix('╮')) else {
        return table.to_string();
    };

    let widths: Vec<usize> = inner.split('┬').map(|p| p.chars().count()).collect();
    if widths.len() < 5 {
        return table.to_string();
    }

    // Merge DATE, SERVICE, QTY, UNIT into one label cell; keep AMOUNT
    let left_width = widths[0] + widths[1] + widths[2] + widths[3] + 3;
    let amount_width = widths[4];

    let rows = [
        ("CHARGES", charges),
        ("(-) PAYMENTS", payments),
        ("(=) BALANCE", balance),
    ];

    // Strip the original bottom border and start building
    let mut out = lines[..lines.len() - 1].join("\n");
    out.push('\n');

    out.push_str(&format!(
        "├{}┴{}┴{}┴{}┼{}┤\n",
        "─".repeat(widths[0]),
        "─".repeat(widths[1]),
        "─".repeat(widths[2]),
        "─".repeat(widths[3]),
        "─".repeat(amount_width),
    ));

    for (idx, (label, value)) in rows.iter().enumerate() {
        out.push_str(&format!(
            "│ {:>left$} │ {:>amount$} │\n",
            label,
            value,
            left = left_width - 2,
            amount = amount_width - 2
        ));
        if idx < rows.len() - 1 {
            out.push_str(&format!(
                "├{}┼{}┤\n",
                "─".repeat(left_width),
                "─".repeat(amount_width)
            ));
        }
    }

    out.push_str(&format!(
        "╰{}┴{}╯",
        "─".repeat(left_width),
        "─".repeat(amount_width)
    ));

    out
}

fn load_setup(cfg_dir: &PathBuf) -> Result<(Config, BillingClient)> {
    if !cfg_dir.exists() {
        return Err(BillingError::ConfigNotFound(cfg_dir.clone()));
    }
    let config = load_config(cfg_dir)?;
    let client = BillingClient::new(&config.server);
    Ok((config, client))
}

fn staging_store(cfg_dir: &PathBuf, config: &Config) -> StagingStore<JsonFileStore> {
    StagingStore::new(
        JsonFileStore::new(cfg_dir.clone()),
        &config.facility.id,
    )
}

/// Parse charge input like "12:3" into (service_id, quantity)
fn parse_item_input(input: &str) -> Result<(u64, u32)> {
    let parts: Vec<&str> = input.split(':').collect();
    if parts.len() != 2 {
        return Err(BillingError::InvalidItemFormat(input.to_string()));
    }

    let service_id: u64 = parts[0]
        .parse()
        .map_err(|_| BillingError::InvalidItemFormat(input.to_string()))?;

    let quantity: u32 = parts[1].parse().map_err(|_| BillingError::InvalidQuantity {
        service: parts[0].to_string(),
        qty: parts[1].to_string(),
        reason: "must be a whole number".to_string(),
    })?;

    if quantity == 0 {
        return Err(BillingError::InvalidQuantity {
            service: parts[0].to_string(),
            qty: parts[1].to_string(),
            reason: "must be greater than 0".to_string(),
        });
    }

    Ok((service_id, quantity))
}

fn find_patient(patients: &[AdmittedPatient], patient_id: u64) -> Result<AdmittedPatient> {
    patients
        .iter()
        .find(|p| p.id == patient_id)
        .cloned()
        .ok_or(BillingError::PatientNotFound(patient_id))
}

/// List currently admitted patients
fn cmd_patients(cfg_dir: &PathBuf) -> Result<()> {
    let (config, client) = load_setup(cfg_dir)?;
    let patients = client.admitted_patients()?;

    if patients.is_empty() {
        println!("No admitted patients.");
        return Ok(());
    }

    let symbol = &config.billing.currency_symbol;
    let rows: Vec<PatientRow> = patients
        .iter()
        .map(|p| PatientRow {
            id: p.id,
            name: p.name.clone(),
            admission: p.admission_id,
            room_rate: p
                .room_price
                .map(|r| format_money(r, symbol))
                .unwrap_or_else(|| "-".to_string()),
            admitted: p.admitted_at.clone().unwrap_or_else(|| "-".to_string()),
        })
        .collect();

    let table = Table::new(rows).with(Style::rounded()).to_string();
    println!("{table}");
    println!();
    println!("{} — {} admitted", config.facility.name, patients.len());

    Ok(())
}

/// List the billable service catalog
fn cmd_services(cfg_dir: &PathBuf, all: bool) -> Result<()> {
    let (config, client) = load_setup(cfg_dir)?;
    let mut services = client.services()?;

    if !all {
        services.retain(|s| s.is_active);
    }
    services.sort_by_key(|s| s.id);

    if services.is_empty() {
        println!("No services in the catalog.");
        return Ok(());
    }

    let symbol = &config.billing.currency_symbol;
    let rows: Vec<ServiceRow> = services
        .iter()
        .map(|s| ServiceRow {
            id: s.id,
            name: s.name.clone(),
            category: s.category.clone(),
            price: format_money(s.price, symbol),
            active: if s.is_active { "yes" } else { "no" }.to_string(),
        })
        .collect();

    let table = Table::new(rows).with(Style::rounded()).to_string();
    println!("{table}");

    Ok(())
}

/// Stage charges for a patient
fn cmd_stage(cfg_dir: &PathBuf, patient_id: u64, items_input: &[String]) -> Result<()> {
    if items_input.is_empty() {
        return Err(BillingError::NoItems);
    }

    // Parse before touching config or network so bad input fails fast
    let mut parsed: Vec<(u64, u32)> = Vec::new();
    for input in items_input {
        parsed.push(parse_item_input(input)?);
    }

    let (config, client) = load_setup(cfg_dir)?;
    let catalog = client.services()?;

    // Denormalize name and price into the staged line at staging time
    let mut items: Vec<ChargeLineItem> = Vec::new();
    for (service_id, quantity) in parsed {
        let service = catalog
            .iter()
            .find(|s| s.id == service_id)
            .ok_or(BillingError::ServiceNotFound(service_id))?;
        if !service.is_active {
            return Err(BillingError::ServiceInactive {
                id: service.id,
                name: service.name.clone(),
            });
        }
        items.push(ChargeLineItem {
            service_id: service.id,
            service_name: service.name.clone(),
            unit_price: service.price,
            quantity,
        });
    }

    let mut staging = staging_store(cfg_dir, &config);
    staging.stage(patient_id, items);

    let groups = staging.groups(patient_id);
    let staged_total: f64 = groups
        .iter()
        .flat_map(|g| g.items.iter())
        .map(|i| i.total())
        .sum();

    println!("Staged charges for patient {patient_id}");
    println!(
        "  Pending total: {}",
        format_money(staged_total, &config.billing.currency_symbol)
    );
    println!("  Review with:   wardbill staged --patient {patient_id}");

    Ok(())
}

/// Show a patient's staged charges
fn cmd_staged(cfg_dir: &PathBuf, patient_id: u64) -> Result<()> {
    if !cfg_dir.exists() {
        return Err(BillingError::ConfigNotFound(cfg_dir.clone()));
    }
    let config = load_config(cfg_dir)?;
    let staging = staging_store(cfg_dir, &config);
    let groups = staging.groups(patient_id);

    if groups.is_empty() {
        println!("No staged charges for patient {patient_id}.");
        return Ok(());
    }

    let symbol = &config.billing.currency_symbol;
    let mut rows: Vec<StagedRow> = Vec::new();
    let mut total = 0.0;
    for group in &groups {
        for item in &group.items {
            total += item.total();
            rows.push(StagedRow {
                group: group.id.clone(),
                service: item.service_name.clone(),
                qty: item.quantity,
                unit: format_money(item.unit_price, symbol),
                amount: format_money(item.total(), symbol),
            });
        }
    }

    let table = Table::new(rows).with(Style::rounded()).to_string();
    println!("{table}");
    println!();
    println!(
        "{} group(s), pending total {}",
        groups.len(),
        format_money(total, symbol)
    );
    println!("Finalize with: wardbill finalize --patient {patient_id}");

    Ok(())
}

/// Change a staged line's quantity
fn cmd_set_qty(cfg_dir: &PathBuf, patient_id: u64, service_id: u64, qty: i64) -> Result<()> {
    if !cfg_dir.exists() {
        return Err(BillingError::ConfigNotFound(cfg_dir.clone()));
    }
    let config = load_config(cfg_dir)?;
    let mut staging = staging_store(cfg_dir, &config);

    if !staging.set_item_quantity(patient_id, service_id, qty) {
        return Err(BillingError::NotStaged(service_id));
    }

    if qty <= 0 {
        println!("Removed service {service_id} from patient {patient_id}'s staged charges");
    } else {
        println!("Set service {service_id} to quantity {qty} for patient {patient_id}");
    }
    Ok(())
}

/// Remove one staged group
fn cmd_unstage(cfg_dir: &PathBuf, patient_id: u64, group_id: &str) -> Result<()> {
    if !cfg_dir.exists() {
        return Err(BillingError::ConfigNotFound(cfg_dir.clone()));
    }
    let config = load_config(cfg_dir)?;
    let mut staging = staging_store(cfg_dir, &config);

    if !staging.remove_group(patient_id, group_id) {
        return Err(BillingError::GroupNotFound(group_id.to_string()));
    }

    println!("Removed staged group {group_id} for patient {patient_id}");
    Ok(())
}

/// Drop everything staged for a patient
fn cmd_clear_staged(cfg_dir: &PathBuf, patient_id: u64) -> Result<()> {
    if !cfg_dir.exists() {
        return Err(BillingError::ConfigNotFound(cfg_dir.clone()));
    }
    let config = load_config(cfg_dir)?;
    let mut staging = staging_store(cfg_dir, &config);

    staging.clear(patient_id);
    println!("Cleared staged charges for patient {patient_id}");
    Ok(())
}

/// Send staged charges to the billing server
fn cmd_finalize(cfg_dir: &PathBuf, patient_id: u64) -> Result<()> {
    let (config, client) = load_setup(cfg_dir)?;

    let patients = client.admitted_patients()?;
    let patient = find_patient(&patients, patient_id)?;
    let catalog = client.services()?;
    let mut staging = staging_store(cfg_dir, &config);

    // Staging is cleared inside only after the POST succeeds
    let request = finalize(&mut staging, &patient, &catalog, |req| {
        client.post_charge(req)
    })?;

    println!("Finalized {} service line(s) for {}", request.services.len(), patient.name);

    // Refresh the read side now that the server owns the charges
    let bill = client.bill_summary(patient_id)?;
    print_bill_summary(&bill, &config.billing.currency_symbol);

    Ok(())
}

fn print_bill_summary(bill: &FinalizedBill, symbol: &str) {
    println!();
    println!(
        "Bill {}  [{}]",
        bill.bill_number.as_deref().unwrap_or("-"),
        bill.status.as_deref().unwrap_or("pending")
    );
    if let Some(date) = &bill.bill_date {
        println!("  Date:    {date}");
    }
    if let Some(total) = bill.total_amount {
        println!("  Total:   {}", format_money(total, symbol));
    }
    if let Some(balance) = bill.balance_amount {
        println!("  Balance: {}", format_money(balance, symbol));
    }
}

/// Show the reconciled statement of account
fn cmd_soa(cfg_dir: &PathBuf, patient_id: u64) -> Result<()> {
    let (config, client) = load_setup(cfg_dir)?;

    let response = client.soa(patient_id)?;
    let view = build_view(patient_id, &response)?;
    print_soa(&view, &config.billing.currency_symbol);

    Ok(())
}

fn print_soa(view: &SoaView, symbol: &str) {
    if view.lines.is_empty() {
        println!("No charges on record for patient {}.", view.patient_id);
    } else {
        let rows: Vec<SoaRow> = view
            .lines
            .iter()
            .map(|l| SoaRow {
                date: l
                    .date
                    .map(|d| d.to_string())
                    .unwrap_or_else(|| "-".to_string()),
                service: l.service_name.clone().unwrap_or_else(|| "(unnamed)".to_string()),
                qty: format!("{}", l.quantity),
                unit: l
                    .unit_price
                    .map(|u| format_money(u, symbol))
                    .unwrap_or_else(|| "-".to_string()),
                amount: format_money(l.total, symbol),
            })
            .collect();

        let table = Table::new(rows).with(Style::rounded()).to_string();
        let table = add_soa_footer(
            &table,
            &format_money(view.current_charges, symbol),
            &format_money(view.current_payments, symbol),
            &format_money(view.outstanding_balance, symbol),
        );
        println!("{table}");
    }

    println!();
    println!(
        "Charges {}  Payments {}  Balance {}",
        format_money(view.current_charges, symbol),
        format_money(view.current_payments, symbol),
        format_money(view.outstanding_balance, symbol),
    );
}

/// Record a payment against the outstanding balance
#[allow(clippy::too_many_arguments)]
fn cmd_pay(
    cfg_dir: &PathBuf,
    patient_id: u64,
    amount: f64,
    method: PaymentMethod,
    date_str: Option<String>,
    reference: Option<String>,
    notes: Option<String>,
) -> Result<()> {
    // Cheap validation before any network round trip
    if amount <= 0.0 {
        return Err(BillingError::InvalidPaymentAmount);
    }

    let (config, client) = load_setup(cfg_dir)?;

    // Parse payment date (default to today)
    let date = match date_str {
        Some(s) => NaiveDate::parse_from_str(&s, "%Y-%m-%d")
            .map_err(|_| BillingError::InvalidDate(s.clone()))?,
        None => chrono::Local::now().date_naive(),
    };

    let response = client.soa(patient_id)?;
    let view = build_view(patient_id, &response)?;

    validate_payment(
        &view,
        amount,
        method,
        Some(date),
        reference.as_deref(),
        &config.billing.currency_symbol,
    )?;

    let reference = reference.unwrap_or_else(|| suggest_reference(method, date));
    let request = build_payment_request(&view, amount, method, date, Some(reference.clone()), notes);

    let outcome = client.process_payment(&request)?;

    let symbol = &config.billing.currency_symbol;
    println!(
        "Recorded {} {} payment for patient {patient_id} (ref {reference})",
        format_money(amount, symbol),
        method.as_str(),
    );
    if let Some(remaining) = outcome.remaining_balance {
        println!("  Remaining balance: {}", format_money(remaining, symbol));
    }

    // Refresh only after the server acknowledged the payment
    let response = client.soa(patient_id)?;
    let view = build_view(patient_id, &response)?;
    println!();
    println!(
        "Updated balance: {}",
        format_money(view.outstanding_balance, symbol)
    );

    Ok(())
}

/// Show a patient's payment history
fn cmd_payments(cfg_dir: &PathBuf, patient_id: u64) -> Result<()> {
    let (config, client) = load_setup(cfg_dir)?;

    let response = client.soa(patient_id)?;
    let view = build_view(patient_id, &response)?;
    let symbol = &config.billing.currency_symbol;

    println!("Payments for patient {patient_id}");

    if view.payments.is_empty() {
        println!("  No payments recorded.");
    } else {
        let rows: Vec<PaymentRow> = view
            .payments
            .iter()
            .enumerate()
            .map(|(idx, p)| PaymentRow {
                index: idx + 1,
                date: p.payment_date.clone().unwrap_or_else(|| "-".to_string()),
                method: p.payment_method.clone().unwrap_or_else(|| "-".to_string()),
                reference: p
                    .reference_number
                    .clone()
                    .unwrap_or_else(|| "-".to_string()),
                amount: format_money(p.amount, symbol),
            })
            .collect();

        let table = Table::new(rows).with(Style::rounded()).to_string();
        println!("{table}");
    }

    println!(
        "Total paid: {} / {} (Balance: {})",
        format_money(view.current_payments, symbol),
        format_money(view.current_charges, symbol),
        format_money(view.outstanding_balance, symbol),
    );

    Ok(())
}
