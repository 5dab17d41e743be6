use anyhow::Result;
use clap::Parser;

use courier::cli::{Cli, Command};
use courier::config::{CourierConfig, OutputFormat};
use courier::logging::init_logging;
use courier::state_machine::{DeliveryContext, PackageState, RecordingSink};
use courier::tracker::DeliveryTracker;
use courier::ui::{self, DeliveryProgress};

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = CourierConfig::load(cli.config.as_deref())?;
    init_logging(&config.log_level, cli.verbose)?;
    let format = cli.format.unwrap_or(config.format);

    match cli.command {
        Command::Track {
            subject,
            from,
            steps,
        } => {
            let subject = subject.unwrap_or_else(|| config.subject.clone());
            let tracker = DeliveryTracker::steps(steps.unwrap_or(config.steps));
            track(subject, from, tracker, format)?;
        }
        Command::Deliver { subject, from } => {
            let subject = subject.unwrap_or_else(|| config.subject.clone());
            track(subject, from, DeliveryTracker::until_delivered(), format)?;
        }
        Command::States => ui::print_states(),
        Command::Demo => match format {
            OutputFormat::Text => {
                let mut ctx = DeliveryContext::new(None, "Test Package");
                DeliveryTracker::steps(5).run(&mut ctx);
            }
            OutputFormat::Json => {
                let mut ctx = DeliveryContext::with_sink(None, "Test Package", RecordingSink::new());
                let record = DeliveryTracker::steps(5).run(&mut ctx);
                ui::print_audit_json(&record)?;
            }
        },
    }

    Ok(())
}

fn track(
    subject: String,
    from: Option<PackageState>,
    tracker: DeliveryTracker,
    format: OutputFormat,
) -> Result<()> {
    match format {
        OutputFormat::Text => {
            let progress = DeliveryProgress::start(&subject, from.unwrap_or_default());
            let mut ctx = DeliveryContext::with_sink(from, subject, progress);
            let record = tracker.run(&mut ctx);
            ctx.sink().finish(&record);
        }
        OutputFormat::Json => {
            let mut ctx = DeliveryContext::with_sink(from, subject, RecordingSink::new());
            let record = tracker.run(&mut ctx);
            ui::print_audit_json(&record)?;
        }
    }
    Ok(())
}
