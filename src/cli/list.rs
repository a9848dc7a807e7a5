//! List command implementation

use anyhow::Result;

use questlog::store::LoadedStore;
use questlog::Quest;

/// Which quest lists to print
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListFilter {
    All,
    Active,
    Completed,
}

/// Print active and/or completed quests
pub fn list_command(quests: LoadedStore<'_>, filter: ListFilter) -> Result<()> {
    if filter != ListFilter::Completed {
        print_section("Active quests", &quests.active_quests());
    }

    if filter == ListFilter::All {
        println!();
    }

    if filter != ListFilter::Active {
        print_section("Completed quests", &quests.completed_quests());
    }

    Ok(())
}

fn print_section(heading: &str, quests: &[Quest]) {
    println!("{} ({}):", heading, quests.len());

    if quests.is_empty() {
        println!("  (none)");
        return;
    }

    for quest in quests {
        println!("  #{} {} - {} XP", quest.id, quest.title, quest.xp);
        if !quest.desc.is_empty() {
            println!("    {}", quest.desc);
        }
    }
}
