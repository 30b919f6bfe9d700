use rand::seq::SliceRandom;
use rand::Rng;

const PREFIXES: [&str; 10] = [
    "Neo", "Aurora", "Iron", "Silver", "Verdant", "Nova", "Crystal", "Harbor", "Sunset", "Atlas",
];

const SUFFIXES: [&str; 10] = [
    "Haven", "Bay", "Heights", "Crossing", "Vale", "Point", "City", "Reach", "District", "Harbor",
];

pub fn generate_city_name<R: Rng + ?Sized>(rng: &mut R) -> String {
    let prefix = PREFIXES.choose(rng).copied().unwrap_or("Neo");
    let suffix = SUFFIXES.choose(rng).copied().unwrap_or("Haven");
    format!("{prefix} {suffix}")
}
