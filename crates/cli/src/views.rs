//! Plain-text renderings of every page
//!
//! Each function takes already-fetched data and returns the text to print, so
//! the layouts can be tested without a backend.

use chrono::{DateTime, NaiveDate, Utc};
use crmai_core::board::{self, IssuePriority, KanbanColumn, SprintPhase, TaskProgress};
use crmai_core::insights::{self, Kpi, ModelStatus, Series};
use crmai_core::timeline;
use crmai_core::{
    DashboardStats, Epic, Issue, Milestone, Principal, Project, Task, TimelineEntry, User,
    UserStory, WikiPage,
};
use crmai_session::Route;
use std::fmt::Display;

fn heading(title: &str) -> Vec<String> {
    vec![title.to_string(), "=".repeat(title.chars().count())]
}

fn finish(lines: Vec<String>) -> String {
    let mut out = lines.join("\n");
    out.push('\n');
    out
}

fn empty_note(lines: &mut Vec<String>, what: &str) {
    lines.push(format!("  No {what} yet."));
}

fn status_label(info: Option<&crmai_core::StatusInfo>) -> &str {
    info.map_or("-", |info| info.name.as_str())
}

fn reference(reference: Option<u64>, id: u64) -> String {
    format!("#{}", reference.unwrap_or(id))
}

/// Inline note for a section that failed to load
pub fn fetch_error(what: &str, err: impl Display) -> String {
    format!("  ! Could not load {what}: {err}\n")
}

/// Shown while the startup check has not finished
pub fn loading() -> String {
    "Loading...\n".to_string()
}

pub fn redirected(route: Route) -> String {
    format!("-> Redirected to {route}\n")
}

pub fn marketing(route: Route) -> String {
    let mut lines = heading(route.title());
    let body: &[&str] = match route {
        Route::Features => &[
            "AI lead scoring, sales forecasting and churn prediction",
            "Kanban boards, sprints, backlog and issue tracking",
            "Team activity timeline and analytics dashboards",
        ],
        Route::Solutions => &[
            "Sales teams: prioritise the leads most likely to convert",
            "Product teams: plan sprints and track delivery",
            "Support teams: triage issues by priority and severity",
        ],
        Route::Pricing => &[
            "Starter   free      up to 3 projects",
            "Team      $29/mo    unlimited projects, analytics",
            "Business  $99/mo    AI insights, priority support",
        ],
        _ => &[
            "AI-powered CRM and project management in one workspace.",
            "Run `crmai login <username>` to sign in or `crmai register` to get started.",
        ],
    };
    lines.extend(body.iter().map(|line| format!("  {line}")));
    finish(lines)
}

/// Login and registration have no data; point at the commands instead
pub fn auth_page(route: Route) -> String {
    let mut lines = heading(route.title());
    lines.push(match route {
        Route::Register => {
            "  crmai register --username <name> --email <email> --full-name <name> --password <pw> --confirm-password <pw>".to_string()
        }
        _ => "  crmai login <username> --password <password>".to_string(),
    });
    finish(lines)
}

pub fn dashboard(
    principal: Option<&Principal>,
    stats: &DashboardStats,
    projects: &[Project],
    activity: &[TimelineEntry],
    now: DateTime<Utc>,
) -> String {
    let mut lines = heading(Route::Dashboard.title());
    if let Some(principal) = principal {
        lines.push(format!("Welcome back, {}", principal.display_name()));
    }
    lines.push(format!(
        "  Projects {}   Tasks {}   Team members {}   Issues {}",
        stats.projects, stats.tasks, stats.members, stats.issues
    ));

    lines.push(String::new());
    lines.push("Recent projects".to_string());
    if projects.is_empty() {
        empty_note(&mut lines, "projects");
    }
    for project in projects.iter().take(5) {
        lines.push(format!("  [{}] {}", project.id, project.name));
    }

    lines.push(String::new());
    lines.push("Recent activity".to_string());
    if activity.is_empty() {
        empty_note(&mut lines, "activity");
    }
    for entry in activity {
        lines.push(format!(
            "  {}  {}",
            timeline::describe(entry),
            timeline::relative_time(entry.created, now)
        ));
    }
    finish(lines)
}

pub fn projects(projects: &[Project]) -> String {
    let mut lines = heading(Route::Projects.title());
    if projects.is_empty() {
        empty_note(&mut lines, "projects");
    }
    for project in projects {
        let visibility = if project.is_private { "private" } else { "public" };
        lines.push(format!("  [{}] {} ({visibility})", project.id, project.name));
        if !project.description.is_empty() {
            lines.push(format!("      {}", project.description));
        }
    }
    finish(lines)
}

pub fn backlog(stories: &[UserStory]) -> String {
    let mut lines = heading(Route::Backlog.title());
    if stories.is_empty() {
        empty_note(&mut lines, "user stories");
    }
    for story in stories {
        let points = story
            .total_points
            .map(|points| format!("  {points} pts"))
            .unwrap_or_default();
        lines.push(format!(
            "  {} {}  [{}]{points}",
            reference(story.reference, story.id),
            story.subject,
            status_label(story.status_extra_info.as_ref())
        ));
    }
    finish(lines)
}

pub fn kanban(stories: &[UserStory]) -> String {
    let mut lines = heading(Route::Kanban.title());
    for (column, cards) in KanbanColumn::group(stories) {
        lines.push(format!("{} ({})", column.label(), cards.len()));
        for story in cards {
            let assignee = story
                .assigned_to_extra_info
                .as_ref()
                .and_then(|info| info.full_name_display.as_deref().or(info.username.as_deref()))
                .map(|name| format!("  @{name}"))
                .unwrap_or_default();
            lines.push(format!(
                "  {} {}{assignee}",
                reference(story.reference, story.id),
                story.subject
            ));
        }
    }
    finish(lines)
}

pub fn sprints(milestones: &[Milestone], today: NaiveDate) -> String {
    let mut lines = heading(Route::Sprints.title());
    if milestones.is_empty() {
        empty_note(&mut lines, "sprints");
    }
    for sprint in milestones {
        let window = match (sprint.estimated_start, sprint.estimated_finish) {
            (Some(start), Some(end)) => format!("{start} .. {end}"),
            _ => "unscheduled".to_string(),
        };
        lines.push(format!(
            "  [{}] {}  {}  {window}  {}%",
            sprint.id,
            sprint.name,
            SprintPhase::of(sprint, today),
            board::sprint_progress(sprint)
        ));
    }
    finish(lines)
}

pub fn tasks(tasks: &[Task], filter: Option<TaskProgress>) -> String {
    let mut lines = heading(Route::Tasks.title());
    if let Some(filter) = filter {
        lines.push(format!("Filter: {filter}"));
    }
    let shown = TaskProgress::filter(tasks, filter);
    if shown.is_empty() {
        empty_note(&mut lines, "tasks");
    }
    for task in shown {
        lines.push(format!(
            "  {} {}  [{}]",
            reference(task.reference, task.id),
            task.subject,
            status_label(task.status_extra_info.as_ref())
        ));
    }
    finish(lines)
}

pub fn issues(issues: &[Issue]) -> String {
    let mut lines = heading(Route::Issues.title());
    if issues.is_empty() {
        empty_note(&mut lines, "issues");
    }
    for issue in issues {
        lines.push(format!(
            "  {} {}  [{}] priority {}  severity {}",
            reference(issue.reference, issue.id),
            issue.subject,
            status_label(issue.status_extra_info.as_ref()),
            IssuePriority::of(issue),
            status_label(issue.severity_extra_info.as_ref())
        ));
    }
    finish(lines)
}

pub fn epics(epics: &[Epic]) -> String {
    let mut lines = heading(Route::Epics.title());
    if epics.is_empty() {
        empty_note(&mut lines, "epics");
    }
    for epic in epics {
        lines.push(format!("  {} {}", reference(epic.reference, epic.id), epic.subject));
    }
    finish(lines)
}

pub fn team(users: &[User], query: Option<&str>) -> String {
    let mut lines = heading(Route::Team.title());
    let members = match query {
        Some(query) => {
            lines.push(format!("Search: {query}"));
            board::search_users(users, query)
        }
        None => users.iter().collect(),
    };
    if members.is_empty() {
        empty_note(&mut lines, "team members");
    }
    for user in members {
        let email = user.email.as_deref().unwrap_or("-");
        lines.push(format!(
            "  ({}) {}  @{}  {email}",
            board::initials(user.display_name()),
            user.display_name(),
            user.username
        ));
    }
    finish(lines)
}

fn kpis(lines: &mut Vec<String>, kpis: &[Kpi]) {
    for kpi in kpis {
        lines.push(format!("  {:<18} {} {}", kpi.label, kpi.value, kpi.unit).trim_end().to_string());
    }
}

fn series(lines: &mut Vec<String>, series: &Series) {
    lines.push(series.label.to_string());
    for (label, value) in series.labels.iter().zip(series.values) {
        lines.push(format!("  {label:<12} {value:>4}"));
    }
}

pub fn analytics() -> String {
    let mut lines = heading(Route::Analytics.title());
    kpis(&mut lines, &insights::ANALYTICS_KPIS);
    for chart in [
        insights::TASK_DISTRIBUTION,
        insights::VELOCITY_PLANNED,
        insights::VELOCITY_COMPLETED,
        insights::BURNDOWN_IDEAL,
        insights::BURNDOWN_ACTUAL,
        insights::TEAM_PERFORMANCE,
        insights::ISSUE_SEVERITY,
    ] {
        lines.push(String::new());
        series(&mut lines, &chart);
    }
    finish(lines)
}

pub fn ai_insights() -> String {
    let mut lines = heading(Route::AiInsights.title());
    kpis(&mut lines, &insights::INSIGHT_OVERVIEW);
    for model in &insights::INSIGHT_MODELS {
        let status = match model.status {
            ModelStatus::Active => "active",
            ModelStatus::Training => "training",
        };
        lines.push(String::new());
        lines.push(format!("{} ({}) [{status}]", model.name, model.algorithm));
        lines.push(format!(
            "  accuracy {}%  precision {}%  recall {}%  f1 {}%",
            model.accuracy, model.precision, model.recall, model.f1
        ));
        lines.push(format!("  {}", model.description));
        lines.push(format!("  features: {}", model.features.join(", ")));
        lines.push(format!(
            "  trained {} on {} data points",
            model.last_trained, model.data_points
        ));
    }
    lines.push(String::new());
    lines.push(format!("Mean F1 {:.1}%", insights::mean_f1()));
    finish(lines)
}

pub fn wiki(pages: &[WikiPage]) -> String {
    let mut lines = heading(Route::Wiki.title());
    if pages.is_empty() {
        empty_note(&mut lines, "wiki pages");
    }
    for page in pages {
        lines.push(format!("  {}", page.slug));
        if let Some(first) = page.content.lines().find(|line| !line.trim().is_empty()) {
            lines.push(format!("      {}", first.trim()));
        }
    }
    finish(lines)
}

/// `cached` marks a principal read from the display-only snapshot
pub fn settings(principal: Option<&Principal>, cached: bool) -> String {
    let mut lines = heading(Route::Settings.title());
    match principal {
        Some(principal) => {
            lines.push(format!("  Name      {}", principal.display_name()));
            lines.push(format!("  Username  {}", principal.username));
            lines.push(format!(
                "  Email     {}",
                principal.email.as_deref().unwrap_or("-")
            ));
            if principal.is_admin {
                lines.push("  Role      administrator".to_string());
            }
            if cached {
                lines.push("  (cached, not yet verified)".to_string());
            }
        }
        None => lines.push("  Profile unavailable.".to_string()),
    }
    finish(lines)
}
