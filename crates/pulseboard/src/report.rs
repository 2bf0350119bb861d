use comfy_table::presets::UTF8_FULL;
use comfy_table::Table;
use pulseboard_core::dataset::{CountryRisk, Summary};
use pulseboard_emotion::{Analysis, CheckinHistory, Emotion};

pub fn render_summary(summary: &Summary) -> String {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["Metric", "Value"]);
    table.add_row(vec!["Date".to_string(), summary.date.to_string()]);
    table.add_row(vec!["Confirmed".to_string(), summary.confirmed.to_string()]);
    table.add_row(vec!["Deaths".to_string(), summary.deaths.to_string()]);
    table.add_row(vec!["Recovered".to_string(), summary.recovered.to_string()]);
    table.add_row(vec!["Active".to_string(), summary.active.to_string()]);
    table.add_row(vec!["New cases".to_string(), summary.new_cases.to_string()]);
    table.add_row(vec![
        "Fatality rate".to_string(),
        format_fatality(summary.fatality_rate),
    ]);
    table.to_string()
}

pub fn render_risk(entries: &[CountryRisk]) -> String {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["Country", "New cases (7-day avg)", "Risk", "Color"]);
    for entry in entries {
        table.add_row(vec![
            entry.country.clone(),
            format!("{:.1}", entry.new_cases_7ma),
            entry.tier.label().to_string(),
            entry.tier.color().to_string(),
        ]);
    }
    table.to_string()
}

pub fn render_analysis(analysis: &Analysis, tip: &str) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{} {} ({:.0}% confidence)\n",
        analysis.emotion.emoji(),
        analysis.label,
        analysis.confidence * 100.0
    ));
    out.push_str(&format!("Tip: {tip}\n"));

    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["Label", "Score"]);
    for score in &analysis.distribution {
        table.add_row(vec![score.label.clone(), format!("{:.3}", score.score)]);
    }
    out.push_str(&table.to_string());
    out
}

pub fn render_recent(history: &CheckinHistory) -> String {
    let recent = history.recent();
    if recent.is_empty() {
        return "No check-ins recorded yet.".to_string();
    }

    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["When", "Feeling", "Note"]);
    for entry in recent {
        table.add_row(vec![
            entry.formatted_timestamp(),
            format!("{} {}", entry.emotion.emoji(), entry.emotion.canonical_name()),
            entry.text.clone(),
        ]);
    }
    table.to_string()
}

pub fn render_counts(counts: &[(Emotion, usize)]) -> String {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["Emotion", "Check-ins"]);
    for (emotion, count) in counts {
        table.add_row(vec![
            format!("{} {}", emotion.emoji(), emotion.canonical_name()),
            count.to_string(),
        ]);
    }
    table.to_string()
}

fn format_fatality(rate: Option<f64>) -> String {
    match rate {
        Some(rate) => format!("{:.2}%", rate * 100.0),
        None => "--".to_string(),
    }
}
