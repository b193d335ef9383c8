//! Text rendering for the terminal frontend.

use boss_core::{distort, Page, Report, SessionView};

const BAR_WIDTH: usize = 20;

/// One line per report, in the order they happened.
pub fn format_reports(reports: &[Report]) -> Vec<String> {
    reports
        .iter()
        .map(|report| match report {
            Report::Correct { damage } => format!("[CORRECT] The boss takes {damage} damage."),
            Report::Wrong { damage } => format!("[WRONG] You take {damage} damage."),
            Report::TimedOut { damage } => format!("[TIMEOUT] Time ran out! -{damage} damage."),
            Report::Victory => "[VICTORY] The boss has fallen!".to_string(),
            Report::Defeat => "[DEFEAT] You have been defeated.".to_string(),
        })
        .collect()
}

/// A labelled text HP bar, e.g. `YOU  [##########..........] 50/100`.
pub fn hp_bar(label: &str, hp: u32, max: u32) -> String {
    let filled = if max == 0 {
        0
    } else {
        (hp.min(max) as usize * BAR_WIDTH) / max as usize
    };
    format!(
        "{label} [{}{}] {hp}/{max}",
        "#".repeat(filled),
        ".".repeat(BAR_WIDTH - filled)
    )
}

/// The battle screen: HP, boss line, timer, and numbered options.
pub fn render_battle(view: &SessionView, distortion: bool) -> String {
    let boss_text = if distortion {
        distort(&view.boss_text)
    } else {
        view.boss_text.clone()
    };

    let mut out = String::new();
    out.push_str(&format!("=== {} ===\n", view.boss_name));
    out.push_str(&hp_bar("YOU ", view.player_hp, view.max_hp));
    out.push('\n');
    out.push_str(&hp_bar("BOSS", view.boss_hp, view.max_hp));
    out.push_str("\n\n");
    out.push_str(&format!("  {boss_text}\n\n"));
    if view.accepts_answers() {
        out.push_str(&format!("Time remaining: {}s\n", view.remaining_secs));
        for (i, label) in view.options.iter().enumerate() {
            out.push_str(&format!("  {}) {label}\n", i + 1));
        }
    }
    out
}

/// The end screen with score and epilogue.
pub fn render_end(view: &SessionView) -> String {
    let Some(ref score) = view.score else {
        return String::new();
    };

    let title = match view.page {
        Page::EndVictory => "Victory!",
        _ => "Defeat.",
    };

    format!(
        "=== {title} ===\n{}\nYour Score: {}/{}\n",
        score.epilogue(&view.boss_name, &view.topic),
        score.value,
        score.max
    )
}
