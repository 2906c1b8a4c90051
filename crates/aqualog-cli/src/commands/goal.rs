use aqualog_core::goal::UnspecifiedGenderPolicy;
use aqualog_core::storage::{FileStore, ProfileStore};
use aqualog_core::{format_amount, DisplayUnit};
use clap::Subcommand;

#[derive(Subcommand)]
pub enum GoalAction {
    /// Show the current daily goal in all units
    Show,
    /// Re-derive the goal from the stored weight and gender
    Recalculate,
}

pub fn run(action: GoalAction) -> Result<(), Box<dyn std::error::Error>> {
    let store = ProfileStore::new(FileStore::open()?);

    let profile = match action {
        GoalAction::Show => store.load(),
        GoalAction::Recalculate => store.recalculate_goal(UnspecifiedGenderPolicy::FemaleRate)?,
    };

    println!("{}", serde_json::to_string_pretty(&profile.daily_goal)?);
    let unit = profile.display_unit;
    println!(
        "goal: {}",
        format_amount(profile.daily_goal.milliliters, unit)
    );
    if unit == DisplayUnit::Oz {
        println!("({} fl oz stored)", profile.daily_goal.ounces);
    }
    Ok(())
}
