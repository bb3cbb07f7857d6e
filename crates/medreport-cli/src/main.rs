use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use medreport_core::{
    catalogue::form_fields, load_report, parse_date, render_text, CoreConfig, FieldUpdate,
    FormState, ReportPage, Route, Submission, DEFAULT_DATA_DIR, PATIENT_DATA_KEY,
};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "medreport")]
#[command(about = "MedReport patient intake and report CLI")]
struct Cli {
    /// Directory holding submitted records
    #[arg(long, global = true, default_value = DEFAULT_DATA_DIR)]
    data_dir: PathBuf,

    /// Storage key of the submitted record
    #[arg(long, global = true, default_value = PATIENT_DATA_KEY)]
    key: String,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Fill in and submit the intake form
    Submit(SubmitArgs),
    /// Show the report for the last submitted record
    Report,
    /// Describe the fields of the intake form
    Fields,
}

/// Every field is optional here so that validation can report what is missing.
#[derive(clap::Args)]
struct SubmitArgs {
    #[arg(long)]
    subject_id: Option<String>,
    #[arg(long)]
    patient_id: Option<String>,
    #[arg(long)]
    patient_name: Option<String>,
    /// Age in years
    #[arg(long)]
    age: Option<String>,
    /// male, female or other
    #[arg(long)]
    gender: Option<String>,
    /// Admission date (YYYY-MM-DD)
    #[arg(long, value_parser = date_arg)]
    admit_date: Option<NaiveDate>,
    /// Discharge date (YYYY-MM-DD)
    #[arg(long, value_parser = date_arg)]
    discharge_date: Option<NaiveDate>,
    /// home, nursing-home, rehabilitation, another-hospital or deceased
    #[arg(long)]
    discharge_location: Option<String>,
}

impl SubmitArgs {
    fn into_updates(self) -> Vec<FieldUpdate> {
        let mut updates = Vec::new();
        if let Some(v) = self.subject_id {
            updates.push(FieldUpdate::SubjectId(v));
        }
        if let Some(v) = self.patient_id {
            updates.push(FieldUpdate::PatientId(v));
        }
        if let Some(v) = self.patient_name {
            updates.push(FieldUpdate::PatientName(v));
        }
        if let Some(v) = self.age {
            updates.push(FieldUpdate::Age(v));
        }
        if let Some(v) = self.gender {
            updates.push(FieldUpdate::Gender(v));
        }
        if self.admit_date.is_some() {
            updates.push(FieldUpdate::AdmitDate(self.admit_date));
        }
        if self.discharge_date.is_some() {
            updates.push(FieldUpdate::DischargeDate(self.discharge_date));
        }
        if let Some(v) = self.discharge_location {
            updates.push(FieldUpdate::DischargeLocation(v));
        }
        updates
    }
}

fn date_arg(raw: &str) -> Result<NaiveDate, String> {
    match parse_date(raw) {
        Ok(Some(date)) => Ok(date),
        Ok(None) => Err("date cannot be blank".into()),
        Err(e) => Err(e.to_string()),
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("medreport_core=warn".parse()?),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let cfg = CoreConfig::new(cli.data_dir, cli.key)?;
    let store = cfg.file_store();

    match cli.command {
        Some(Commands::Submit(args)) => {
            let mut form = FormState::new();
            for update in args.into_updates() {
                form.apply(update);
            }

            let submission = form.submit(&store, cfg.storage_key())?;
            let notification = submission.notification().clone();
            match submission {
                Submission::Accepted { redirect, .. } => {
                    println!("{}: {}", notification.title, notification.description);
                    if redirect == Route::Report {
                        print_report(&cfg)?;
                    }
                }
                Submission::Rejected { .. } => {
                    eprintln!("{}: {}", notification.title, notification.description);
                    for (field, error) in form.errors().iter() {
                        eprintln!("  --{}: {}", flag_name(field.wire_name()), error);
                    }
                    anyhow::bail!("form was not submitted");
                }
            }
        }
        Some(Commands::Report) => print_report(&cfg)?,
        Some(Commands::Fields) => {
            for spec in form_fields() {
                println!(
                    "--{:<20} {} ({})",
                    flag_name(spec.field.wire_name()),
                    spec.label,
                    spec.help
                );
                for option in &spec.options {
                    println!("    {:<18} {}", option.value, option.label);
                }
            }
        }
        None => {
            println!("Use 'medreport --help' for commands");
        }
    }

    Ok(())
}

fn print_report(cfg: &CoreConfig) -> anyhow::Result<()> {
    let store = cfg.file_store();
    let now = Local::now().naive_local();
    match load_report(&store, cfg.storage_key(), now)? {
        ReportPage::Ready(view) => print!("{}", render_text(&view)),
        ReportPage::Redirect(route) => {
            eprintln!(
                "No patient data found in {}. Fill in the form first ({}): medreport submit --help",
                cfg.data_dir().display(),
                route
            );
        }
    }
    Ok(())
}

/// `patientName` → `patient-name`.
fn flag_name(wire_name: &str) -> String {
    let mut out = String::with_capacity(wire_name.len() + 2);
    for c in wire_name.chars() {
        if c.is_ascii_uppercase() {
            out.push('-');
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}
