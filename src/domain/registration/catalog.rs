use serde::Serialize;

/// An event offered at the fest
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EventInfo {
    pub name: &'static str,
    /// Expected team size; advisory only
    #[serde(rename = "participants")]
    pub expected_participants: usize,
}

const fn event(name: &'static str, expected_participants: usize) -> EventInfo {
    EventInfo {
        name,
        expected_participants,
    }
}

/// Every known event, in the order the admin panel lists them
pub const EVENT_CATALOG: &[EventInfo] = &[
    event("Treasure Hunt", 4),
    event("IT Brand Rangoli", 2),
    event("Quiz", 2),
    event("Coding", 2),
    event("Photo Edits", 1),
    event("Video Edits", 1),
    event("Soft Interview", 1),
    event("Gaming Girls (Militia)", 2),
    event("Free Fire", 2),
    event("BGMI", 2),
    event("PPT Presentation", 1),
];

/// Looks up an event by exact (case-sensitive) name
pub fn find_event(name: &str) -> Option<&'static EventInfo> {
    EVENT_CATALOG.iter().find(|info| info.name == name)
}

/// Returns the advisory participant count for an event
pub fn expected_participants(name: &str) -> Option<usize> {
    find_event(name).map(|info| info.expected_participants)
}

pub fn is_known_event(name: &str) -> bool {
    find_event(name).is_some()
}
