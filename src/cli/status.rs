//! Status command implementation

use anyhow::Result;

use questlog::stats::PlayerStats;
use questlog::store::LoadedStore;

const BAR_WIDTH: usize = 30;

/// Show level, XP and progress to the next level
pub fn status_command(quests: LoadedStore<'_>) -> Result<()> {
    let stats = quests.stats();

    println!("Level {}", stats.level);
    println!("{}", progress_bar(&stats));
    println!(
        "{} XP total, {} XP to Level {}",
        stats.total_xp,
        stats.xp_until_next_level,
        stats.level + 1
    );
    println!(
        "{} active, {} completed",
        quests.active_quests().len(),
        quests.completed_quests().len()
    );

    Ok(())
}

fn progress_bar(stats: &PlayerStats) -> String {
    let filled = ((stats.progress_to_next() * BAR_WIDTH as f32).round() as usize).min(BAR_WIDTH);
    format!(
        "[{}{}] {}/{}",
        "#".repeat(filled),
        "-".repeat(BAR_WIDTH - filled),
        stats.xp_into_level(),
        stats.level_xp_requirement
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_bar() {
        assert_eq!(
            progress_bar(&PlayerStats::new(0)),
            format!("[{}] 0/100", "-".repeat(BAR_WIDTH))
        );

        let half = progress_bar(&PlayerStats::new(153));
        assert!(half.starts_with(&format!("[{}{}]", "#".repeat(15), "-".repeat(15))));
        assert!(half.ends_with("53/106"));
    }
}
