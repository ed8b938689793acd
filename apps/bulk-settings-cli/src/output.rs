use bulk_user_settings::{
    DirectoryUser, LookupCatalog, SaveProgress, SaveReport, SettingsField, SettingsSession, UpdateRequest,
    display_effective, format_field_value,
};
use bulk_user_settings_sdk::{Notification, Severity};
use colored::Colorize;

const FIELD_WIDTH: usize = 36;
const NAME_WIDTH: usize = 28;

pub fn print_directory(users: &[&DirectoryUser]) {
    for user in users {
        println!(
            "{:<NAME_WIDTH$} {:<32} {:<24} {}",
            user.display_name.bold(),
            user.email.as_deref().unwrap_or("-"),
            user.business_unit_name.as_deref().unwrap_or("-"),
            user.user_id.to_string().dimmed()
        );
    }
    println!("{} user(s)", users.len());
}

pub fn print_selection(session: &SettingsSession, catalog: &LookupCatalog) {
    println!("{}", session.selection_label().bold());
    print_excluded(session);
    if session.loaded().is_empty() {
        return;
    }
    println!();

    let config = session.config();
    for field in SettingsField::ALL {
        let effective = session.effective_value(*field);
        let text = display_effective(*field, &effective, catalog, config);
        if effective.show_no_change {
            println!("  {:<FIELD_WIDTH$} {}", field.as_str(), text.yellow());
        } else {
            println!("  {:<FIELD_WIDTH$} {text}", field.as_str());
        }

        for diff in session.field_differences(*field).unwrap_or_default() {
            println!(
                "  {:<FIELD_WIDTH$}   {}: {}",
                "",
                diff.user.display_name.dimmed(),
                format_field_value(*field, &diff.value, catalog, config)
            );
        }
    }
}

/// Users whose settings could not be loaded take no part in the edit.
pub fn print_excluded(session: &SettingsSession) {
    let loaded = session.loaded();
    for user in loaded.failed() {
        println!(
            "{} {} ({}): settings not available, skipped",
            "!".red().bold(),
            user.display_name,
            user.user_id
        );
    }
}

pub fn print_requests(requests: &[UpdateRequest]) -> anyhow::Result<()> {
    if requests.is_empty() {
        println!("Nothing to save");
    }
    for request in requests {
        println!("{} ({})", request.user_name.bold(), request.user_id);
        println!("{}", serde_json::to_string_pretty(&request.payload)?);
    }
    Ok(())
}

pub fn print_progress(progress: &SaveProgress<'_>) {
    if progress.index < progress.total {
        println!(
            "[{}/{}] Saving {}",
            progress.index + 1,
            progress.total,
            progress.user_name
        );
    } else {
        println!("[{}/{}] {}", progress.total, progress.total, progress.user_name);
    }
}

pub fn print_outcome(report: &SaveReport) {
    let outcome = &report.outcome;
    println!(
        "Saved {} of {} user(s)",
        outcome.successful_user_ids.len(),
        outcome.attempted()
    );
    for failure in &outcome.failures {
        println!(
            "  {} {}: {}",
            "x".red().bold(),
            failure.user_name,
            failure.error_message
        );
    }
}

pub fn print_notifications(notifications: &[Notification]) {
    for n in notifications {
        let title = match n.severity {
            Severity::Success => n.title.green(),
            Severity::Info => n.title.blue(),
            Severity::Warning => n.title.yellow(),
            Severity::Error => n.title.red(),
        };
        println!("{}: {}", title.bold(), n.body);
    }
}
