/// Flat mapping from player name to the string-encoded current rating.
pub const RATINGS: &str = "ratings";
