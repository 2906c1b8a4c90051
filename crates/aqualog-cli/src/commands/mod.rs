pub mod drink;
pub mod goal;
pub mod history;
pub mod onboard;
pub mod profile;
pub mod remind;

use aqualog_core::{
    ContainerType, DisplayUnit, Gender, Meridiem, SchedulePolicy, TimeOfDay, WeightUnit,
};

type CliError = Box<dyn std::error::Error>;

/// Parse a 12-hour time string like "7:30 AM" or "11:05pm".
pub fn parse_time_12h(input: &str) -> Result<TimeOfDay, CliError> {
    let trimmed = input.trim();
    let upper = trimmed.to_ascii_uppercase();
    let (clock_part, meridiem) = if let Some(rest) = upper.strip_suffix("AM") {
        (rest.trim().to_string(), Meridiem::Am)
    } else if let Some(rest) = upper.strip_suffix("PM") {
        (rest.trim().to_string(), Meridiem::Pm)
    } else {
        return Err(format!("expected AM/PM suffix in '{input}'").into());
    };

    let (hour_str, minute_str) = clock_part
        .split_once(':')
        .ok_or_else(|| format!("expected H:MM in '{input}'"))?;
    let hour: u32 = hour_str.trim().parse()?;
    let minute: u32 = minute_str.trim().parse()?;
    Ok(TimeOfDay::new(hour, minute, meridiem)?)
}

pub fn parse_gender(input: &str) -> Result<Gender, CliError> {
    match input.to_ascii_lowercase().as_str() {
        "male" | "m" => Ok(Gender::Male),
        "female" | "f" => Ok(Gender::Female),
        "unspecified" | "none" => Ok(Gender::Unspecified),
        other => Err(format!("unknown gender '{other}' (male/female/unspecified)").into()),
    }
}

pub fn parse_weight_unit(input: &str) -> Result<WeightUnit, CliError> {
    match input.to_ascii_lowercase().as_str() {
        "kg" => Ok(WeightUnit::Kg),
        "lbs" | "lb" => Ok(WeightUnit::Lbs),
        other => Err(format!("unknown weight unit '{other}' (kg/lbs)").into()),
    }
}

pub fn parse_display_unit(input: &str) -> Result<DisplayUnit, CliError> {
    match input.to_ascii_lowercase().as_str() {
        "ml" => Ok(DisplayUnit::Ml),
        "oz" => Ok(DisplayUnit::Oz),
        other => Err(format!("unknown display unit '{other}' (ml/oz)").into()),
    }
}

pub fn parse_container(input: &str) -> Result<ContainerType, CliError> {
    match input.to_ascii_lowercase().as_str() {
        "cup" => Ok(ContainerType::Cup),
        "glass" => Ok(ContainerType::Glass),
        "bottle" => Ok(ContainerType::Bottle),
        "jug" => Ok(ContainerType::Jug),
        "custom" => Ok(ContainerType::Custom),
        other => Err(format!("unknown container '{other}' (cup/glass/bottle/jug/custom)").into()),
    }
}

pub fn parse_policy(input: &str) -> Result<SchedulePolicy, CliError> {
    match input.to_ascii_lowercase().as_str() {
        "evenly-spaced" | "even" => Ok(SchedulePolicy::EvenlySpaced),
        "fixed-interval" | "fixed" => Ok(SchedulePolicy::FixedInterval),
        other => Err(format!("unknown policy '{other}' (evenly-spaced/fixed-interval)").into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_12_hour_times() {
        let t = parse_time_12h("7:30 AM").unwrap();
        assert_eq!((t.hour, t.minute), (7, 30));
        assert_eq!(t.hour24(), 7);

        let t = parse_time_12h("11:05pm").unwrap();
        assert_eq!(t.hour24(), 23);

        let t = parse_time_12h("12:00 AM").unwrap();
        assert_eq!(t.hour24(), 0);
    }

    #[test]
    fn rejects_malformed_times() {
        assert!(parse_time_12h("7:30").is_err());
        assert!(parse_time_12h("25:00 AM").is_err());
        assert!(parse_time_12h("7:61 AM").is_err());
        assert!(parse_time_12h("noon").is_err());
    }
}
