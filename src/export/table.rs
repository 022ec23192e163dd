use std::collections::HashMap;

use crate::domain::registration::Registration;

/// Fixed column header of every report
pub const COLUMNS: [&str; 6] = ["Team", "Event", "S.No", "Name", "Class", "Contact"];

/// Title used when the report is not filtered by event
pub const ALL_EVENTS_TITLE: &str = "All Events";

/// One participant line of the report
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParticipantRow {
    pub team: String,
    pub event: String,
    /// 1-based position within the team's group
    pub sequence: usize,
    pub name: String,
    pub class: String,
    pub contact: String,
}

impl ParticipantRow {
    /// Cell texts in [`COLUMNS`] order
    pub fn cells(&self) -> [String; 6] {
        [
            self.team.clone(),
            self.event.clone(),
            self.sequence.to_string(),
            self.name.clone(),
            self.class.clone(),
            self.contact.clone(),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportRow {
    /// Full-width row carrying the team name
    TeamHeader(String),
    Participant(ParticipantRow),
    /// Full-width blank row closing a team group
    Spacer,
}

/// Team-grouped tabular layout of a registration list
///
/// # Layout
/// - Teams appear in the order they are first seen in the input.
/// - Every team group is a header row, then one row per participant across
///   all of the team's registrations (input order), then a spacer.
/// - Sequence numbers restart at 1 for each team and run across all of that
///   team's registrations.
///
/// Building a table is deterministic: the same input always yields an equal
/// table.
///
/// # Example
/// ```
/// use fest_admin_api::domain::registration::{Participant, Registration, RegistrationId};
/// use fest_admin_api::export::{ReportRow, ReportTable};
///
/// let registration = Registration::from_persistence(
///     RegistrationId::generate(),
///     "Byte Busters".to_string(),
///     "Quiz".to_string(),
///     vec![Participant::new("Asha", "XII-B", "1").unwrap()],
/// );
///
/// let table = ReportTable::build(Some("Quiz"), &[registration]);
/// assert_eq!(table.title(), "Quiz");
/// assert_eq!(table.file_name(), "Quiz_Registrations.pdf");
/// assert_eq!(table.rows()[0], ReportRow::TeamHeader("Byte Busters".to_string()));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportTable {
    title: String,
    rows: Vec<ReportRow>,
}

impl ReportTable {
    /// Lays out `registrations` under the title derived from `event_filter`
    pub fn build(event_filter: Option<&str>, registrations: &[Registration]) -> Self {
        let mut rows = Vec::new();

        for (team, group) in group_by_team(registrations) {
            rows.push(ReportRow::TeamHeader(team.to_string()));

            let participants = group
                .iter()
                .flat_map(|reg| reg.participants().iter().map(move |p| (reg, p)));

            for (sequence, (reg, participant)) in participants.enumerate() {
                rows.push(ReportRow::Participant(ParticipantRow {
                    team: team.to_string(),
                    event: reg.event().to_string(),
                    sequence: sequence + 1,
                    name: participant.name.clone(),
                    class: participant.class.clone(),
                    contact: participant.contact.clone(),
                }));
            }

            rows.push(ReportRow::Spacer);
        }

        Self {
            title: report_title(event_filter),
            rows,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn rows(&self) -> &[ReportRow] {
        &self.rows
    }

    /// Download name of the rendered document
    pub fn file_name(&self) -> String {
        file_name_for(&self.title)
    }

    /// Number of participant rows across all teams
    pub fn participant_count(&self) -> usize {
        self.rows
            .iter()
            .filter(|row| matches!(row, ReportRow::Participant(_)))
            .count()
    }
}

/// Partitions registrations by team, teams in first-seen order
fn group_by_team(registrations: &[Registration]) -> Vec<(&str, Vec<&Registration>)> {
    let mut groups: Vec<(&str, Vec<&Registration>)> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for reg in registrations {
        match index.get(reg.team()) {
            Some(&i) => groups[i].1.push(reg),
            None => {
                index.insert(reg.team(), groups.len());
                groups.push((reg.team(), vec![reg]));
            }
        }
    }

    groups
}

/// Report title: the event filter, or [`ALL_EVENTS_TITLE`] when unfiltered
///
/// The filter is used as given; callers normalize it before selecting rows.
pub fn report_title(event_filter: Option<&str>) -> String {
    match event_filter {
        Some(event) if !event.is_empty() => event.to_string(),
        _ => ALL_EVENTS_TITLE.to_string(),
    }
}

/// `<title, whitespace runs replaced by '_'>_Registrations.pdf`
///
/// Quotes, backslashes and control characters also become `_`, so the name
/// can sit inside a quoted `Content-Disposition` parameter.
pub fn file_name_for(title: &str) -> String {
    let stem: String = title
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
        .chars()
        .map(|c| match c {
            '"' | '\\' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();
    format!("{}_Registrations.pdf", stem)
}
