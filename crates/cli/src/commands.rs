//! CLI commands

use anyhow::{Context, Result};
use chrono::{NaiveDate, TimeDelta, Utc};
use clap::Subcommand;
use crmai_core::board::TaskProgress;
use crmai_core::{
    DashboardStats, NewEpic, NewIssue, NewMilestone, NewProject, NewTask, NewUserStory,
    NewWikiPage, Registration,
};
use crmai_http::{ApiClient, ClientError};
use crmai_session::{
    FileStorage, GuardDecision, HistoryNavigator, Route, SessionError, SessionStore,
};
use std::future::Future;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

use crate::config::{AppConfig, CONFIG_FILE};
use crate::views;

#[derive(Subcommand)]
pub enum Commands {
    /// Sign in and remember the session
    Login {
        username: String,

        #[arg(long, env = "CRMAI_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Create an account and sign in to it
    Register {
        #[arg(long)]
        username: String,

        #[arg(long)]
        email: String,

        #[arg(long)]
        full_name: String,

        #[arg(long, env = "CRMAI_PASSWORD", hide_env_values = true)]
        password: String,

        #[arg(long)]
        confirm_password: String,
    },

    /// Forget the stored session
    Logout,

    /// Show who is signed in
    Status,

    /// Render a page, e.g. `/dashboard`, `/kanban` or `/pricing`
    Open {
        #[arg(default_value = "/dashboard")]
        location: String,

        /// Project for project-scoped pages (defaults to the first project)
        #[arg(short, long)]
        project: Option<u64>,

        /// Task filter on `/tasks`: new, progress or done
        #[arg(long)]
        filter: Option<TaskProgress>,

        /// Name filter on `/team`
        #[arg(long)]
        search: Option<String>,
    },

    /// Create a record
    Create {
        #[command(subcommand)]
        command: CreateCommands,
    },

    /// Delete a record
    Delete {
        #[command(subcommand)]
        command: DeleteCommands,
    },

    /// Configuration file helpers
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand)]
pub enum CreateCommands {
    Project {
        name: String,

        #[arg(long, default_value = "")]
        description: String,

        #[arg(long)]
        private: bool,
    },

    Sprint {
        name: String,

        #[arg(short, long)]
        project: Option<u64>,

        /// First day (defaults to today)
        #[arg(long)]
        start: Option<NaiveDate>,

        /// Last day (defaults to two weeks after start)
        #[arg(long)]
        finish: Option<NaiveDate>,
    },

    Story {
        subject: String,

        #[arg(short, long)]
        project: Option<u64>,

        #[arg(long, default_value = "")]
        description: String,
    },

    Task {
        subject: String,

        #[arg(short, long)]
        project: Option<u64>,

        #[arg(long, default_value = "")]
        description: String,
    },

    Issue {
        subject: String,

        #[arg(short, long)]
        project: Option<u64>,

        #[arg(long, default_value = "")]
        description: String,
    },

    Epic {
        subject: String,

        #[arg(short, long)]
        project: Option<u64>,

        #[arg(long, default_value = "")]
        description: String,

        #[arg(long, default_value = "#A5694F")]
        color: String,
    },

    Wiki {
        slug: String,

        #[arg(short, long)]
        project: Option<u64>,

        #[arg(long, default_value = "")]
        content: String,
    },
}

#[derive(Subcommand)]
pub enum DeleteCommands {
    Project { id: u64 },
    Story { id: u64 },
    Task { id: u64 },
    Issue { id: u64 },
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Write a configuration file with default values
    Init {
        /// Output file path (defaults to <data_dir>/config.toml)
        output: Option<PathBuf>,
    },

    /// Print the effective configuration
    Show,
}

/// Options for project-scoped and filtered pages
#[derive(Debug, Clone, Default)]
struct PageOptions {
    project: Option<u64>,
    filter: Option<TaskProgress>,
    search: Option<String>,
}

impl Commands {
    pub async fn execute(self, config: AppConfig) -> Result<()> {
        match self {
            Self::Config { command } => command.execute(&config),
            Self::Login { username, password } => {
                let shell = Shell::new(&config)?;
                let principal = shell.store.login(&username, &password).await?;
                println!("Signed in as {}", principal.display_name());
                Ok(())
            }
            Self::Register {
                username,
                email,
                full_name,
                password,
                confirm_password,
            } => {
                let shell = Shell::new(&config)?;
                let registration = Registration::public(username, password, email, full_name);
                let principal = shell.store.register(&registration, &confirm_password).await?;
                println!("Account created. Signed in as {}", principal.display_name());
                Ok(())
            }
            Self::Logout => {
                let shell = Shell::new(&config)?;
                shell.store.logout();
                println!("Signed out");
                Ok(())
            }
            Self::Status => {
                let shell = Shell::start(&config).await?;
                match shell.store.principal() {
                    Some(principal) => println!(
                        "Signed in to {} as {} (@{})",
                        shell.store.client().base_url(),
                        principal.display_name(),
                        principal.username
                    ),
                    None => println!("Not signed in"),
                }
                Ok(())
            }
            Self::Open {
                location,
                project,
                filter,
                search,
            } => {
                let shell = Shell::start(&config).await?;
                let options = PageOptions {
                    project,
                    filter,
                    search,
                };
                shell.open(&location, &options).await
            }
            Self::Create { command } => {
                let shell = Shell::start(&config).await?;
                command.execute(&shell).await
            }
            Self::Delete { command } => {
                let shell = Shell::start(&config).await?;
                command.execute(&shell).await
            }
        }
    }
}

impl ConfigCommands {
    fn execute(self, config: &AppConfig) -> Result<()> {
        match self {
            Self::Init { output } => {
                let path = output.unwrap_or_else(|| config.data_dir.join(CONFIG_FILE));
                let defaults = AppConfig {
                    data_dir: config.data_dir.clone(),
                    ..AppConfig::default()
                };
                defaults.save(&path)?;
                println!("Generated configuration at: {}", path.display());
                Ok(())
            }
            Self::Show => {
                print!("{}", toml::to_string_pretty(config)?);
                Ok(())
            }
        }
    }
}

impl CreateCommands {
    async fn execute(self, shell: &Shell) -> Result<()> {
        let created = match self {
            Self::Project {
                name,
                description,
                private,
            } => {
                let new = NewProject::new(name, description, private);
                let project = shell
                    .call(|api| async move { api.create_project(&new).await })
                    .await?;
                format!("Created project [{}] {}", project.id, project.name)
            }
            Self::Sprint {
                name,
                project,
                start,
                finish,
            } => {
                let start = start.unwrap_or_else(|| Utc::now().date_naive());
                let new = NewMilestone {
                    project: shell.project_or_first(project).await?,
                    name,
                    estimated_start: start,
                    estimated_finish: finish.unwrap_or(start + TimeDelta::days(14)),
                };
                let sprint = shell
                    .call(|api| async move { api.create_milestone(&new).await })
                    .await?;
                format!("Created sprint [{}] {}", sprint.id, sprint.name)
            }
            Self::Story {
                subject,
                project,
                description,
            } => {
                let new = NewUserStory {
                    project: shell.project_or_first(project).await?,
                    subject,
                    description,
                };
                let story = shell
                    .call(|api| async move { api.create_user_story(&new).await })
                    .await?;
                format!("Created user story [{}] {}", story.id, story.subject)
            }
            Self::Task {
                subject,
                project,
                description,
            } => {
                let new = NewTask {
                    project: shell.project_or_first(project).await?,
                    subject,
                    description,
                };
                let task = shell
                    .call(|api| async move { api.create_task(&new).await })
                    .await?;
                format!("Created task [{}] {}", task.id, task.subject)
            }
            Self::Issue {
                subject,
                project,
                description,
            } => {
                let new = NewIssue::new(shell.project_or_first(project).await?, subject, description);
                let issue = shell
                    .call(|api| async move { api.create_issue(&new).await })
                    .await?;
                format!("Created issue [{}] {}", issue.id, issue.subject)
            }
            Self::Epic {
                subject,
                project,
                description,
                color,
            } => {
                let new = NewEpic {
                    project: shell.project_or_first(project).await?,
                    subject,
                    description,
                    color,
                };
                let epic = shell
                    .call(|api| async move { api.create_epic(&new).await })
                    .await?;
                format!("Created epic [{}] {}", epic.id, epic.subject)
            }
            Self::Wiki {
                slug,
                project,
                content,
            } => {
                let new = NewWikiPage {
                    project: shell.project_or_first(project).await?,
                    slug,
                    content,
                };
                let page = shell
                    .call(|api| async move { api.create_wiki_page(&new).await })
                    .await?;
                format!("Created wiki page [{}] {}", page.id, page.slug)
            }
        };

        info!("{created}");
        println!("{created}");
        Ok(())
    }
}

impl DeleteCommands {
    async fn execute(self, shell: &Shell) -> Result<()> {
        let deleted = match self {
            Self::Project { id } => {
                shell
                    .call(move |api| async move { api.delete_project(id).await })
                    .await?;
                format!("Deleted project {id}")
            }
            Self::Story { id } => {
                shell
                    .call(move |api| async move { api.delete_user_story(id).await })
                    .await?;
                format!("Deleted user story {id}")
            }
            Self::Task { id } => {
                shell
                    .call(move |api| async move { api.delete_task(id).await })
                    .await?;
                format!("Deleted task {id}")
            }
            Self::Issue { id } => {
                shell
                    .call(move |api| async move { api.delete_issue(id).await })
                    .await?;
                format!("Deleted issue {id}")
            }
        };

        info!("{deleted}");
        println!("{deleted}");
        Ok(())
    }
}

/// Keep rendering when one section fails; a rejected session aborts the page
fn section<T: Default>(
    notes: &mut String,
    what: &str,
    result: Result<T, SessionError>,
) -> Result<T, SessionError> {
    match result {
        Ok(value) => Ok(value),
        Err(SessionError::SessionExpired) => Err(SessionError::SessionExpired),
        Err(e) => {
            notes.push_str(&views::fetch_error(what, &e));
            Ok(T::default())
        }
    }
}

/// One process-lifetime application shell around the session store
struct Shell {
    store: SessionStore,
    navigator: Arc<HistoryNavigator>,
}

impl Shell {
    /// Build the shell without validating a persisted credential
    fn new(config: &AppConfig) -> Result<Self> {
        let mut builder = ApiClient::builder()
            .base_url(&config.api.base_url)
            .api_prefix(&config.api.prefix);
        if config.api.timeout_secs > 0 {
            builder = builder.timeout(Duration::from_secs(config.api.timeout_secs));
        }
        let client = builder.build().context("invalid API configuration")?;

        let storage = Arc::new(FileStorage::new(config.session_file()));
        debug!(path = %storage.path().display(), "using session file");
        let navigator = Arc::new(HistoryNavigator::new());
        let store = SessionStore::new(client, storage, navigator.clone());

        Ok(Self { store, navigator })
    }

    /// Build the shell and finish the startup check
    async fn start(config: &AppConfig) -> Result<Self> {
        let shell = Self::new(config)?;
        shell.store.bootstrap().await;
        // A rejected stored credential has already sent us to the login page
        if let Some(route) = shell.navigator.take() {
            print!("{}", views::redirected(route));
        }
        Ok(shell)
    }

    /// Report a forced navigation, if one happened, and convert the error
    fn fail(&self, err: SessionError) -> anyhow::Error {
        if let Some(route) = self.navigator.take() {
            print!("{}", views::redirected(route));
            print!("{}", views::auth_page(route));
        }
        err.into()
    }

    async fn call<T, F, Fut>(&self, op: F) -> Result<T>
    where
        F: FnOnce(ApiClient) -> Fut,
        Fut: Future<Output = Result<T, ClientError>>,
    {
        self.store
            .guarded()
            .call(op)
            .await
            .map_err(|e| self.fail(e))
    }

    async fn project_or_first(&self, wanted: Option<u64>) -> Result<u64> {
        if let Some(id) = wanted {
            return Ok(id);
        }
        let projects = self
            .call(|api| async move { api.list_projects().await })
            .await?;
        projects
            .first()
            .map(|project| project.id)
            .context("no projects found, pass --project <id>")
    }

    async fn open(&self, location: &str, options: &PageOptions) -> Result<()> {
        let route = match self.store.decide(location) {
            GuardDecision::Loading => {
                print!("{}", views::loading());
                return Ok(());
            }
            GuardDecision::Redirect(target) => {
                print!("{}", views::redirected(target));
                target
            }
            GuardDecision::Render(route) => route,
        };

        match self.render(route, options).await {
            Ok(page) => {
                print!("{page}");
                Ok(())
            }
            Err(e) => Err(self.fail(e)),
        }
    }

    async fn project_scope(
        &self,
        wanted: Option<u64>,
        notes: &mut String,
    ) -> Result<Option<u64>, SessionError> {
        if wanted.is_some() {
            return Ok(wanted);
        }
        let projects = section(
            notes,
            "projects",
            self.store
                .guarded()
                .call(|api| async move { api.list_projects().await })
                .await,
        )?;
        Ok(projects.first().map(|project| project.id))
    }

    /// Fetch a project-scoped listing; nothing is fetched without a project
    async fn scoped<T, F, Fut>(
        &self,
        project: Option<u64>,
        notes: &mut String,
        what: &str,
        op: F,
    ) -> Result<Vec<T>, SessionError>
    where
        F: FnOnce(ApiClient, u64) -> Fut,
        Fut: Future<Output = Result<Vec<T>, ClientError>>,
    {
        let Some(project) = project else {
            return Ok(Vec::new());
        };
        section(
            notes,
            what,
            self.store.guarded().call(|api| op(api, project)).await,
        )
    }

    async fn render(&self, route: Route, options: &PageOptions) -> Result<String, SessionError> {
        let guarded = self.store.guarded();
        let mut notes = String::new();

        let page = match route {
            Route::Landing | Route::Features | Route::Solutions | Route::Pricing => {
                views::marketing(route)
            }
            Route::Login | Route::Register => views::auth_page(route),
            Route::Dashboard => {
                let projects = section(
                    &mut notes,
                    "projects",
                    guarded
                        .call(|api| async move { api.list_projects().await })
                        .await,
                )?;
                let users = section(
                    &mut notes,
                    "team members",
                    guarded
                        .call(|api| async move { api.list_users().await })
                        .await,
                )?;
                let principal = self.store.principal();
                let activity = match principal.as_ref().and_then(|principal| principal.id) {
                    Some(id) => section(
                        &mut notes,
                        "activity",
                        guarded
                            .call(move |api| async move { api.user_timeline(id).await })
                            .await,
                    )?,
                    None => Vec::new(),
                };
                let stats = DashboardStats::compute(&projects, &users);
                views::dashboard(principal.as_ref(), &stats, &projects, &activity, Utc::now())
            }
            Route::Projects => {
                let projects = section(
                    &mut notes,
                    "projects",
                    guarded
                        .call(|api| async move { api.list_projects().await })
                        .await,
                )?;
                views::projects(&projects)
            }
            Route::Backlog => {
                let project = self.project_scope(options.project, &mut notes).await?;
                let stories = self
                    .scoped(project, &mut notes, "user stories", |api, id| async move {
                        api.list_user_stories(id).await
                    })
                    .await?;
                views::backlog(&stories)
            }
            Route::Kanban => {
                let project = self.project_scope(options.project, &mut notes).await?;
                let stories = self
                    .scoped(project, &mut notes, "user stories", |api, id| async move {
                        api.list_user_stories(id).await
                    })
                    .await?;
                views::kanban(&stories)
            }
            Route::Sprints => {
                let project = self.project_scope(options.project, &mut notes).await?;
                let milestones = self
                    .scoped(project, &mut notes, "sprints", |api, id| async move {
                        api.list_milestones(id).await
                    })
                    .await?;
                views::sprints(&milestones, Utc::now().date_naive())
            }
            Route::Tasks => {
                let project = self.project_scope(options.project, &mut notes).await?;
                let tasks = self
                    .scoped(project, &mut notes, "tasks", |api, id| async move {
                        api.list_tasks(id).await
                    })
                    .await?;
                views::tasks(&tasks, options.filter)
            }
            Route::Issues => {
                let project = self.project_scope(options.project, &mut notes).await?;
                let issues = self
                    .scoped(project, &mut notes, "issues", |api, id| async move {
                        api.list_issues(id).await
                    })
                    .await?;
                views::issues(&issues)
            }
            Route::Epics => {
                let project = self.project_scope(options.project, &mut notes).await?;
                let epics = self
                    .scoped(project, &mut notes, "epics", |api, id| async move {
                        api.list_epics(id).await
                    })
                    .await?;
                views::epics(&epics)
            }
            Route::Wiki => {
                let project = self.project_scope(options.project, &mut notes).await?;
                let pages = self
                    .scoped(project, &mut notes, "wiki pages", |api, id| async move {
                        api.list_wiki_pages(id).await
                    })
                    .await?;
                views::wiki(&pages)
            }
            Route::Team => {
                let users = section(
                    &mut notes,
                    "team members",
                    guarded
                        .call(|api| async move { api.list_users().await })
                        .await,
                )?;
                views::team(&users, options.search.as_deref())
            }
            Route::Analytics => views::analytics(),
            Route::AiInsights => views::ai_insights(),
            Route::Settings => match self.store.principal() {
                Some(principal) => views::settings(Some(&principal), false),
                None => views::settings(self.store.cached_principal().as_ref(), true),
            },
        };

        Ok(page + &notes)
    }
}
