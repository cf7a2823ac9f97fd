//! Console output utilities
//!
//! Renders municipality lists, details and comparisons as plain text. The
//! `render_*` functions build the text and the `print_*` wrappers write it
//! to stdout.

use std::fmt::Write as _;

use itertools::Itertools;

use crate::compare::best_value;
use crate::format::{
    format_currency, format_decimal, format_number, format_percentage, format_score,
};
use crate::models::{MunicipalityRecord, NumericField, share_of_foreign_born};
use crate::paginate::Page;
use crate::statistics::{Averages, Insight};
use crate::store::Dataset;

/// Birth countries listed in the detail view
const TOP_COUNTRIES: usize = 10;

fn optional<F>(value: Option<f64>, format: F) -> String
where
    F: Fn(f64) -> String,
{
    value.map_or_else(|| "–".to_string(), format)
}

fn cell(record: &MunicipalityRecord, field: NumericField) -> String {
    match field {
        NumericField::Population => format_number(record.population),
        NumericField::PricePerSqm => optional(record.price_per_sqm, format_currency),
        NumericField::EmploymentRate | NumericField::ForeignBackground => {
            optional(field.value(record), format_percentage)
        }
        NumericField::SafetyScore | NumericField::SchoolRating => format_score(field.value(record)),
    }
}

/// Render one page of the municipality table
#[must_use]
pub fn render_page(page: &Page<'_, MunicipalityRecord>, favorites: &[String]) -> String {
    let mut out = String::new();
    if page.total_items == 0 {
        out.push_str("Inga kommuner matchar filtren.\n");
        return out;
    }

    let _ = writeln!(
        out,
        "{:<2}{:<8}{:<22}{:>14}{:>12}{:>14}{:>12}",
        "", "ID", "Kommun", "Befolkning", "Säkerhet", "Pris/m²", "Skolor"
    );
    for record in page.items {
        let marker = if favorites.contains(&record.id) { "*" } else { "" };
        let _ = writeln!(
            out,
            "{:<2}{:<8}{:<22}{:>14}{:>12}{:>14}{:>12}",
            marker,
            record.id,
            record.name,
            cell(record, NumericField::Population),
            cell(record, NumericField::SafetyScore),
            cell(record, NumericField::PricePerSqm),
            cell(record, NumericField::SchoolRating),
        );
    }
    let _ = writeln!(
        out,
        "Sida {} av {} ({} kommuner)",
        page.number,
        page.total_pages,
        format_number(page.total_items as u64)
    );
    out
}

/// Render the detail view of one municipality
#[must_use]
pub fn render_details(record: &MunicipalityRecord, domestic_country: &str) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} ({})", record.name, record.id);
    if let Some(county) = &record.county {
        let _ = writeln!(out, "  Län: {county}");
    }
    for field in NumericField::ALL {
        let _ = writeln!(out, "  {}: {}", field.label(), cell(record, field));
    }
    if let Some(crime_rate) = record.crime_rate {
        let _ = writeln!(out, "  Brottslighet: {}", format_decimal(crime_rate, 1));
    }

    let origin = [
        ("Utrikes födda", record.utrikes_fodda),
        ("Två utrikes födda föräldrar", record.tva_utrikes_foraldrar),
        ("En utrikes född förälder", record.en_utrikes_foraldrar),
        ("Två inrikes födda föräldrar", record.tva_inrikes_foraldrar),
        ("Utländsk bakgrund totalt", record.utlandsk_bakgrund_total),
    ];
    if origin.iter().any(|(_, count)| count.is_some()) {
        let _ = writeln!(out, "Bakgrund:");
        for (label, count) in origin {
            if let Some(count) = count {
                let _ = writeln!(out, "  {label}: {}", format_number(count));
            }
        }
    }

    let countries = record.birth_countries(domestic_country);
    if !countries.is_empty() {
        let _ = writeln!(out, "Vanligaste födelseländer:");
        for entry in countries.iter().take(TOP_COUNTRIES) {
            let share = share_of_foreign_born(entry.count, record.utrikes_fodda)
                .map(|share| format!(" ({})", format_percentage(share)))
                .unwrap_or_default();
            let _ = writeln!(
                out,
                "  {}: {}{share}",
                entry.country,
                format_number(entry.count)
            );
        }
    }
    out
}

/// Render records side by side, marking the best value per row
#[must_use]
pub fn render_comparison(records: &[MunicipalityRecord]) -> String {
    let mut out = String::new();
    let header = records.iter().map(|r| format!("{:>16}", r.name)).join("");
    let _ = writeln!(out, "{:<24}{header}", "");

    for field in NumericField::ALL {
        let best = best_value(records, field);
        let row = records
            .iter()
            .map(|record| {
                let is_best = best.is_some() && field.value(record) == best;
                let marker = if is_best { "*" } else { "" };
                format!("{:>16}", format!("{}{marker}", cell(record, field)))
            })
            .join("");
        let _ = writeln!(out, "{:<24}{row}", field.label());
    }
    out
}

/// Render the insight list followed by the averages
#[must_use]
pub fn render_insights(insights: &[Insight], averages: &Averages) -> String {
    let mut out = String::new();
    for insight in insights {
        let _ = writeln!(out, "- {insight}");
    }
    let _ = write!(out, "{averages}");
    out
}

/// Print one page of the municipality table
pub fn print_page(page: &Page<'_, MunicipalityRecord>, favorites: &[String]) {
    print!("{}", render_page(page, favorites));
}

/// Print the detail view of one municipality
pub fn print_details(record: &MunicipalityRecord, domestic_country: &str) {
    print!("{}", render_details(record, domestic_country));
}

/// Print records side by side
pub fn print_comparison(records: &[MunicipalityRecord]) {
    print!("{}", render_comparison(records));
}

/// Print insights and averages
pub fn print_insights(insights: &[Insight], averages: &Averages) {
    print!("{}", render_insights(insights, averages));
}

/// Print where a dataset came from and when it was loaded
pub fn print_dataset_summary(dataset: &Dataset) {
    println!(
        "Källa: {} (uppdaterad {})",
        dataset.source,
        dataset.loaded_at.format("%Y-%m-%d %H:%M UTC")
    );
    if let Some(error) = &dataset.error {
        println!("Kunde inte hämta kommundata: {error}");
    }
}
