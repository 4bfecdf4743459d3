//! Text rendering of server messages.

use burgerclick_server::domain::ScoreBoard;

/// Scoreboard ranked by total (highest first), ties by name.
pub fn render_scoreboard(board: &ScoreBoard) -> String {
    if board.is_empty() {
        return "(no scores yet)".to_string();
    }

    let mut rows: Vec<_> = board.iter().collect();
    rows.sort_by(|(a_name, a_total), (b_name, b_total)| {
        b_total.cmp(a_total).then_with(|| a_name.cmp(b_name))
    });

    let width = rows
        .iter()
        .map(|(name, _)| name.as_str().len())
        .max()
        .unwrap_or(0);

    rows.iter()
        .enumerate()
        .map(|(rank, (name, total))| {
            format!("{:>3}. {:<width$}  {}", rank + 1, name.as_str(), total)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// One-line notification of a counted click.
pub fn render_click(name: &str, total: u64, at: &str) -> String {
    format!("[{at}] {name} clicked (total {total})")
}
