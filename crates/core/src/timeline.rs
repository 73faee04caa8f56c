//! Human-readable activity feed entries

use crate::types::TimelineEntry;
use chrono::{DateTime, Utc};

/// One-line description of a timeline event
pub fn describe(entry: &TimelineEntry) -> String {
    let kind = entry.event_type.as_str();
    let project = entry.project_name().unwrap_or_default();

    if kind.contains("project.create") {
        format!("Created project \"{project}\"")
    } else if kind.contains("userstory") {
        format!("Updated user story in \"{project}\"")
    } else if kind.contains("task") {
        format!("Task activity in \"{project}\"")
    } else if kind.contains("issue") {
        format!("Issue update in \"{project}\"")
    } else if kind.contains("membership") {
        "Team membership changed".to_string()
    } else if kind.contains("milestone") {
        format!("Sprint updated in \"{project}\"")
    } else if let Some(project) = entry.project_name() {
        format!("Activity in \"{project}\"")
    } else {
        "System activity".to_string()
    }
}

/// Coarse "time ago" rendering relative to `now`
pub fn relative_time(at: Option<DateTime<Utc>>, now: DateTime<Utc>) -> String {
    let Some(at) = at else {
        return String::new();
    };
    let seconds = (now - at).num_seconds();
    match seconds {
        s if s < 60 => "Just now".to_string(),
        s if s < 3_600 => format!("{}m ago", s / 60),
        s if s < 86_400 => format!("{}h ago", s / 3_600),
        s => format!("{}d ago", s / 86_400),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use serde_json::json;

    fn entry(kind: &str, project: Option<&str>) -> TimelineEntry {
        let data = project.map_or(json!({}), |name| json!({"project": {"name": name}}));
        serde_json::from_value(json!({"id": 1, "event_type": kind, "data": data})).unwrap()
    }

    #[test]
    fn describes_known_events() {
        assert_eq!(
            describe(&entry("projects.project.create", Some("Apollo"))),
            "Created project \"Apollo\""
        );
        assert_eq!(
            describe(&entry("userstories.userstory.change", Some("Apollo"))),
            "Updated user story in \"Apollo\""
        );
        assert_eq!(describe(&entry("projects.membership.create", None)), "Team membership changed");
        assert_eq!(describe(&entry("wiki.wikipage.change", Some("Apollo"))), "Activity in \"Apollo\"");
        assert_eq!(describe(&entry("users.user.change", None)), "System activity");
    }

    #[test]
    fn relative_times() {
        let now = Utc::now();
        assert_eq!(relative_time(None, now), "");
        assert_eq!(relative_time(Some(now - Duration::seconds(30)), now), "Just now");
        assert_eq!(relative_time(Some(now - Duration::minutes(5)), now), "5m ago");
        assert_eq!(relative_time(Some(now - Duration::hours(3)), now), "3h ago");
        assert_eq!(relative_time(Some(now - Duration::days(2)), now), "2d ago");
    }
}
