//! Fixed safety content shown on the resources tab: who to call and how to
//! stay safe. Name/number pairs, dial strings kept verbatim.

pub const EMERGENCY_NUMBERS: &[(&str, &str)] = &[
    ("Police", "100"),
    ("Women's Helpline", "1098"),
    ("Medical Emergency", "108"),
    ("National Emergency Number", "112"),
    ("Fire", "101"),
];

pub const SAFETY_TIPS: &[&str] = &[
    "Be aware of your surroundings",
    "Trust your instincts",
    "Stay in well-lit areas at night",
    "Keep your phone charged",
    "Share your location with trusted contacts",
    "Avoid isolated areas, especially at night",
    "Carry pepper spray for safety",
];
