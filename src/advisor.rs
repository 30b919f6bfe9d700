use crate::components::Tile;
use crate::stats::CityStats;
use crate::zone::ZoneType;

const MAX_SENTENCES: usize = 3;
const LOW_MORALE: u8 = 40;
const THIN_TREASURY: i64 = 1_000;
const PRESSURE_THRESHOLD: usize = 3;

/// Short status brief for the mayor. Pure: reads stats and tiles only.
pub fn brief(stats: &CityStats, tiles: &[Tile]) -> String {
    let mut sentences: Vec<String> = Vec::new();

    if stats.day % 10 == 0 {
        sentences.push(format!(
            "Day {} marks a new growth phase. Expect faster demands and higher strain on utilities.",
            stats.day
        ));
    }
    if stats.happiness < LOW_MORALE {
        sentences.push(
            "City morale is low. Add parks, services, or stabilize utilities to recover happiness."
                .into(),
        );
    }
    if stats.treasury < THIN_TREASURY {
        sentences.push(
            "Treasury is thin. Expand revenue zones or reduce costly infrastructure for a few days."
                .into(),
        );
    }

    let resources = &stats.resources;
    let pressure = [
        resources.power_short(),
        resources.water_short(),
        resources.sewage_short(),
        stats.net_income < 0,
        stats.happiness < LOW_MORALE,
    ]
    .into_iter()
    .filter(|hit| *hit)
    .count();

    if pressure >= PRESSURE_THRESHOLD {
        sentences.push(
            "City pressure is high due to shortages or deficits. Resolve power, water, or sewage bottlenecks first."
                .into(),
        );
    } else if sentences.is_empty() {
        sentences.push(format!(
            "Systems are stable. Population {} and treasury are trending steady.",
            group_thousands(stats.population)
        ));
        let has_parks = tiles.iter().any(|tile| tile.zone == ZoneType::Park);
        if has_parks {
            sentences.push("Maintain balance between residential growth and utility capacity.".into());
        } else {
            sentences.push("Consider adding green space to preserve long-term happiness.".into());
        }
    }

    sentences.truncate(MAX_SENTENCES);
    sentences.join(" ")
}

/// `1234567` -> `"1,234,567"`.
pub fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
