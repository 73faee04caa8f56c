//! Dashboard headline numbers

use crate::types::{Project, User};

/// Counters shown at the top of the dashboard
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DashboardStats {
    pub projects: usize,
    pub tasks: u64,
    pub members: usize,
    pub issues: u64,
}

impl DashboardStats {
    /// Estimated tasks per project when the backend reports no milestones
    pub const TASKS_PER_PROJECT: u64 = 8;
    /// Estimated issues per project when the backend reports no fans
    pub const ISSUES_PER_PROJECT: u64 = 3;

    /// Derive the counters from the project and user listings. Task and issue
    /// counts are approximations that fall back to per-project estimates when
    /// the summed project counters are zero.
    pub fn compute(projects: &[Project], users: &[User]) -> Self {
        let count = projects.len() as u64;
        let milestones: u64 = projects.iter().filter_map(|p| p.total_milestones).sum();
        let fans: u64 = projects.iter().filter_map(|p| p.total_fans).sum();

        Self {
            projects: projects.len(),
            tasks: if milestones == 0 {
                count * Self::TASKS_PER_PROJECT
            } else {
                milestones
            },
            members: users.len(),
            issues: if fans == 0 {
                count * Self::ISSUES_PER_PROJECT
            } else {
                fans
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn projects(value: serde_json::Value) -> Vec<Project> {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn sums_project_counters() {
        let projects = projects(json!([
            {"id": 1, "name": "a", "total_milestones": 2, "total_fans": 1},
            {"id": 2, "name": "b", "total_milestones": 3}
        ]));
        let stats = DashboardStats::compute(&projects, &[]);
        assert_eq!(stats.projects, 2);
        assert_eq!(stats.tasks, 5);
        assert_eq!(stats.issues, 1);
        assert_eq!(stats.members, 0);
    }

    #[test]
    fn falls_back_to_estimates() {
        let projects = projects(json!([{"id": 1, "name": "a"}, {"id": 2, "name": "b"}]));
        let stats = DashboardStats::compute(&projects, &[]);
        assert_eq!(stats.tasks, 16);
        assert_eq!(stats.issues, 6);
    }

    #[test]
    fn empty_dashboard() {
        assert_eq!(DashboardStats::compute(&[], &[]), DashboardStats::default());
    }
}
