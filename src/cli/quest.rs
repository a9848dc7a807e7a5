//! Quest commands: create, cancel, claim, unclaim, delete

use anyhow::{bail, Result};

use questlog::store::LoadedStore;
use questlog::{QuestArgs, QuestId};

/// Add a new active quest
pub fn create_command(
    quests: LoadedStore<'_>,
    title: String,
    desc: String,
    xp: u32,
) -> Result<()> {
    let id = quests.create_quest(QuestArgs::new(title, desc, xp))?;
    println!("Created quest #{} ({} XP)", id, xp);
    Ok(())
}

/// Drop an active quest without collecting XP
pub fn cancel_command(quests: LoadedStore<'_>, id: QuestId) -> Result<()> {
    if !quests.cancel_quest(id) {
        bail!("No active quest #{}", id);
    }
    println!("Cancelled quest #{}", id);
    Ok(())
}

/// Complete an active quest
pub fn claim_command(quests: LoadedStore<'_>, id: QuestId) -> Result<()> {
    let before = quests.stats();

    if !quests.claim_quest(id) {
        bail!("No active quest #{}", id);
    }

    let after = quests.stats();
    println!(
        "Claimed quest #{} (+{} XP)",
        id,
        after.total_xp - before.total_xp
    );

    if after.level > before.level {
        println!("Level up! {} -> {}", before.level, after.level);
    }

    Ok(())
}

/// Return a completed quest to the active list
pub fn unclaim_command(quests: LoadedStore<'_>, id: QuestId) -> Result<()> {
    let before = quests.level();

    if !quests.unclaim_quest(id) {
        bail!("No completed quest #{}", id);
    }

    println!("Unclaimed quest #{}", id);
    if quests.level() < before {
        println!("Back to level {}", quests.level());
    }

    Ok(())
}

/// Delete a completed quest and the XP it earned
pub fn delete_command(quests: LoadedStore<'_>, id: QuestId) -> Result<()> {
    let Some(quest) = quests.delete_completed_quest(id) else {
        bail!("No completed quest #{}", id);
    };

    println!("Deleted {} (lost {} XP)", quest.title, quest.xp);
    Ok(())
}
