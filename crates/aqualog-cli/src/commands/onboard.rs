use aqualog_core::goal::UnspecifiedGenderPolicy;
use aqualog_core::storage::{FileStore, ProfileStore, ProfileUpdate};
use clap::Args;

use super::{parse_gender, parse_time_12h, parse_weight_unit};

#[derive(Args)]
pub struct OnboardArgs {
    /// Gender: male, female, or unspecified
    #[arg(long)]
    pub gender: String,
    /// Body weight
    #[arg(long)]
    pub weight: f64,
    /// Weight unit: kg or lbs
    #[arg(long, default_value = "kg")]
    pub weight_unit: String,
    /// Wake-up time, e.g. "7:30 AM"
    #[arg(long, default_value = "7:30 AM")]
    pub wake: String,
    /// Bed time, e.g. "11:30 PM"
    #[arg(long, default_value = "11:30 PM")]
    pub bed: String,
}

pub fn run(args: OnboardArgs) -> Result<(), Box<dyn std::error::Error>> {
    let store = ProfileStore::new(FileStore::open()?);
    store.update(&ProfileUpdate {
        gender: Some(parse_gender(&args.gender)?),
        weight: Some(args.weight),
        weight_unit: Some(parse_weight_unit(&args.weight_unit)?),
        wake_time: Some(parse_time_12h(&args.wake)?),
        bed_time: Some(parse_time_12h(&args.bed)?),
        ..Default::default()
    })?;

    let profile = store.complete_onboarding(UnspecifiedGenderPolicy::FemaleRate)?;
    println!("{}", serde_json::to_string_pretty(&profile)?);
    Ok(())
}
