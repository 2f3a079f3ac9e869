use rand::seq::IndexedRandom;

pub const ICEBREAKERS: [&str; 10] = [
    "What's the most interesting place you've traveled to?",
    "Best airport food you've ever had?",
    "Window or aisle seat?",
    "What's your travel essential that others might find weird?",
    "If you could fly anywhere right now, where would you go?",
    "What's your airport routine?",
    "Coffee or tea person?",
    "What's the longest layover you've ever had?",
    "Do you prefer early morning or late night flights?",
    "What's your go-to travel playlist?",
];

/// A prompt for the check-in form.
pub fn random() -> &'static str {
    ICEBREAKERS.choose(&mut rand::rng()).copied().unwrap_or(ICEBREAKERS[0])
}
