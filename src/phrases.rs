use crate::color::ColorName;
use rand::Rng;
use rand::seq::IndexedRandom;

pub const WELCOME: &str = "Welcome to Learning Colors Game!";
pub const WELL_DONE: &str = "You did it! Good job!";

pub const RIGHT: [&str; 7] = [
    "Awesome!",
    "Excellent!",
    "Good!",
    "Great!",
    "Right!",
    "Very good!",
    "Yes!",
];

pub const WRONG: [&str; 6] = [
    "Bad!",
    "No!",
    "Not good!",
    "Wrong!",
    "No good!",
    "Not right!",
];

pub fn prompt<R: Rng + ?Sized>(color: ColorName, rng: &mut R) -> String {
    match rng.random_range(0..3) {
        0 => format!("Find {color}!"),
        1 => format!("Where is {color}?"),
        _ => format!("Point to {color}!"),
    }
}

pub fn pick<R: Rng + ?Sized>(phrases: &[&'static str], rng: &mut R) -> &'static str {
    phrases.choose(rng).copied().unwrap_or_default()
}
