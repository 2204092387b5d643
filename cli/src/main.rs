use clap::{Parser, Subcommand};
use uniportal::error::{AppResult, run_with_error_handler};
use uniportal::model::entity::{CourseFilters, Credentials, Registration};
use uniportal::view::{
    CourseDetailView, CourseListView, DashboardView, HomeView, ModuleDetailView, Redirect,
};
use uniportal::{Config, Portal};

#[derive(Parser, Debug)]
#[command(
    name = "uniportal",
    about = "Browse courses and manage module enrollments",
    long_about = None
)]
pub struct Cli {
    /// Use ./config.toml and ./session.json instead of the per-user ones
    #[arg(long, global = true)]
    pub local: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Sign in and remember the session
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },

    /// Create an account and sign in
    Register {
        #[arg(long)]
        first_name: String,
        #[arg(long)]
        last_name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },

    /// Sign out and forget the session
    Logout,

    /// Landing page
    Home,

    /// List available courses
    Courses {
        #[arg(long)]
        level: Option<String>,
        #[arg(long)]
        search: Option<String>,
    },

    /// Show a course with its modules
    Course { course_id: String },

    /// Show a module and whether you're enrolled
    Module { course_id: String, module_id: String },

    /// Register for a module
    Enroll { course_id: String, module_id: String },

    /// Drop a module
    Drop { course_id: String, module_id: String },

    /// Show your learning dashboard
    Dashboard,

    /// Read or write progress of an enrolled module
    Progress {
        #[command(subcommand)]
        action: ProgressCommands,
    },

    /// Write a default config.toml into the per-user config directory
    InitConfig,
}

#[derive(Subcommand, Debug)]
pub enum ProgressCommands {
    Get {
        course_id: String,
        module_id: String,
    },
    Set {
        course_id: String,
        module_id: String,
        #[arg(value_parser = clap::value_parser!(u8).range(0..=100))]
        progress: u8,
    },
}

fn redirected(redirect: Redirect) {
    println!("You are not logged in ({}). Run `uniportal login` first.", redirect.to);
}

/// Enroll and drop go through the module view, so the usual enrollment check runs first.
async fn toggle(portal: &Portal, course_id: &str, module_id: &str, enroll: bool) {
    let mut view = match ModuleDetailView::mount(portal.session().session(), course_id, module_id) {
        Ok(view) => view,
        Err(redirect) => return redirected(redirect),
    };

    view.load(portal.api()).await;
    if let Some(message) = view.state().error() {
        println!("{message}");
        return;
    }

    if view.is_enrolled() == enroll {
        let state = if enroll { "already" } else { "not" };
        println!("You are {state} enrolled in this module.");
        return;
    }

    if let Some(notice) = view.toggle_enrollment(portal.api()).await {
        println!("{notice}");
    }
}

fn init_config(local: bool) -> AppResult<()> {
    let dir = uniportal::config::app_dir(local);
    let path = Config::write_default(&dir)?;
    println!("Config written to {}", path.display());
    Ok(())
}

async fn run(cli: Cli) -> AppResult<()> {
    // works without a readable config
    if let Commands::InitConfig = cli.command {
        return init_config(cli.local);
    }

    let mut portal = Portal::init(cli.local).await?;
    execute(&mut portal, cli.command, cli.local).await
}

async fn execute(portal: &mut Portal, command: Commands, local: bool) -> AppResult<()> {
    match command {
        Commands::Login { email, password } => {
            let (api, session) = portal.parts_mut();
            match session.login(api, &Credentials { email, password }).await {
                Ok(session) => println!("Welcome, {}", session.user().display_name()),
                Err(e) => println!("{}", e.client_display()),
            }
        }

        Commands::Register {
            first_name,
            last_name,
            email,
            password,
        } => {
            let registration = Registration {
                first_name,
                last_name,
                email,
                password,
            };
            let (api, session) = portal.parts_mut();
            match session.register(api, &registration).await {
                Ok(session) => println!("Welcome, {}", session.user().display_name()),
                Err(e) => println!("{}", e.client_display()),
            }
        }

        Commands::Logout => {
            let (api, session) = portal.parts_mut();
            let route = uniportal::view::logout(session, api).await?;
            println!("Logged out. {}", HomeView::mount(None).to_string().trim_end());
            tracing::debug!("redirect to {}", route);
        }

        Commands::Home => print!("{}", HomeView::mount(portal.session().session())),

        Commands::Courses { level, search } => {
            let filters = CourseFilters { level, search };
            match CourseListView::mount(portal.session().session(), filters) {
                Ok(mut view) => {
                    view.load(portal.api()).await;
                    print!("{view}");
                }
                Err(redirect) => redirected(redirect),
            }
        }

        Commands::Course { course_id } => {
            match CourseDetailView::mount(portal.session().session(), &course_id) {
                Ok(mut view) => {
                    view.load(portal.api()).await;
                    print!("{view}");
                }
                Err(redirect) => redirected(redirect),
            }
        }

        Commands::Module {
            course_id,
            module_id,
        } => match ModuleDetailView::mount(portal.session().session(), &course_id, &module_id) {
            Ok(mut view) => {
                view.load(portal.api()).await;
                print!("{view}");
            }
            Err(redirect) => redirected(redirect),
        },

        Commands::Enroll {
            course_id,
            module_id,
        } => toggle(portal, &course_id, &module_id, true).await,

        Commands::Drop {
            course_id,
            module_id,
        } => toggle(portal, &course_id, &module_id, false).await,

        Commands::Dashboard => match DashboardView::mount(portal.session().session()) {
            Ok(mut view) => {
                view.load(portal.api()).await;
                print!("{view}");
            }
            Err(redirect) => redirected(redirect),
        },

        Commands::Progress { action } => {
            let Some(session) = portal.session().session() else {
                redirected(Redirect::login());
                return Ok(());
            };

            let result = match action {
                ProgressCommands::Get {
                    course_id,
                    module_id,
                } => portal
                    .api()
                    .get_progress(session.token(), &course_id, &module_id)
                    .await
                    .map(|progress| format!("Progress: {progress}%")),
                ProgressCommands::Set {
                    course_id,
                    module_id,
                    progress,
                } => portal
                    .api()
                    .update_progress(session.token(), &course_id, &module_id, progress)
                    .await
                    .map(|()| format!("Progress set to {progress}%")),
            };

            match result {
                Ok(line) => println!("{line}"),
                Err(e) => println!("{}", e.client_display()),
            }
        }

        Commands::InitConfig => init_config(local)?,
    }

    Ok(())
}

#[tokio::main]
async fn main() {
    uniportal::setup_trace();
    let cli = Cli::parse();

    run_with_error_handler(async move || run(cli).await).await;
}
