//! # Lot Simulator
//!
//! Drives a scripted day of entries and exits against a fresh in-memory
//! lot, then prints the history and the reports. Useful for eyeballing
//! tariff behavior after a rule change without wiring up the front-end.
//!
//! ## Usage
//! ```bash
//! # Run with the default tariff
//! cargo run -p plaza-store --bin simulate
//!
//! # Override the night rate (decimal dollars)
//! cargo run -p plaza-store --bin simulate -- --night-rate 12.50
//! ```

use std::env;

use chrono::{Duration, NaiveDate, TimeZone, Utc};
use plaza_store::{ConfigUpdate, ParkingLot};

/// The scripted sessions: (plate, space, entry day, entry hh:mm, stay minutes).
/// Evening entries land inside the default 19:00-07:00 night window; the
/// overnight stays enter on the 9th and exit on the report day, the 10th.
const SESSIONS: &[(&str, u32, u32, (u32, u32), i64)] = &[
    ("mno345", 5, 9, (20, 0), 540),   // overnight, flat night rate
    ("pqr678", 6, 9, (22, 30), 420),  // overnight, flat night rate
    ("abc123", 1, 10, (8, 30), 20),   // short stop, base rate
    ("def456", 2, 10, (9, 0), 125),   // 2h 5m, two extra hours
    ("ghi789", 3, 10, (10, 15), 65),  // one started extra hour
    ("jkl012", 4, 10, (13, 45), 30),  // exactly the base period
];

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command line arguments
    let args: Vec<String> = env::args().collect();

    let mut night_rate: Option<String> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--night-rate" | "-n" => {
                if i + 1 < args.len() {
                    night_rate = Some(args[i + 1].clone());
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Plaza Parking Lot Simulator");
                println!();
                println!("Usage: simulate [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -n, --night-rate <AMOUNT>  Flat night rate in dollars (default: 10.00)");
                println!("  -h, --help                 Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("Plaza Parking Lot Simulator");
    println!("===========================");

    let lot = ParkingLot::new();

    if let Some(rate) = night_rate {
        let updated = lot.update_config(&ConfigUpdate {
            night_rate: Some(rate),
            ..ConfigUpdate::default()
        })?;
        println!("Night rate overridden: {}", updated.night_rate());
    }

    let config = lot.current_config();
    println!(
        "Tariff: {} first half hour, {} per extra hour, {} overnight ({}-{})",
        config.half_hour_rate(),
        config.extra_hour_rate(),
        config.night_rate(),
        config.night_start,
        config.night_end
    );
    println!();

    // A fixed date keeps the output reproducible
    let report_day = NaiveDate::from_ymd_opt(2026, 3, 10).ok_or("bad simulation date")?;

    for (plate, space, entry_day, (hour, minute), stay_minutes) in SESSIONS {
        let entry = Utc
            .with_ymd_and_hms(2026, 3, *entry_day, *hour, *minute, 0)
            .single()
            .ok_or("bad entry time")?;
        let exit = entry + Duration::minutes(*stay_minutes);

        let session = lot.register_entry(plate, *space, entry)?;
        let receipt = lot.register_exit(plate, exit)?;

        println!(
            "  {}  space {:>2}  {:>7}  {}  {}",
            receipt.invoice.plate,
            session.space_number,
            receipt.invoice.elapsed_display(),
            receipt.invoice.charge(),
            receipt.invoice.detail
        );
    }

    println!();
    println!("History ({} invoices, newest first):", lot.invoices().len());
    for invoice in lot.history(Some(report_day), 100) {
        println!(
            "  {}  {}  {}",
            invoice.exit_time.format("%H:%M"),
            invoice.plate,
            invoice.charge()
        );
    }

    let report = lot.daily_report(report_day);
    println!();
    println!("Daily report {}:", report.period_label);
    println!("  Vehicles: {}", report.vehicle_count);
    println!(
        "  Normal:   {} invoices, {}",
        report.normal_count,
        report.normal_revenue()
    );
    println!(
        "  Night:    {} invoices, {}",
        report.night_count,
        report.night_revenue()
    );
    println!("  Total:    {}", report.total_revenue());

    let monthly = lot.monthly_report(2026, 3);
    println!();
    println!(
        "Monthly report {}: {} vehicles, {}",
        monthly.period_label,
        monthly.vehicle_count,
        monthly.total_revenue()
    );

    Ok(())
}
