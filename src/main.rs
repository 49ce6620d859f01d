use chrono::Utc;
use clap::Parser;
use log::{debug, info};
use std::process;

use subdash::api::ApiClient;
use subdash::cli::{AdminCommands, Cli, Commands};
use subdash::config::Config;
use subdash::controllers::{admin, dashboard, identity, PageError, Redirect, Route};
use subdash::dispatcher::{Dispatcher, Outcome};
use subdash::forms::RegisterForm;
use subdash::logger;
use subdash::prompt::{Prompter, TerminalPrompter};
use subdash::storage::SessionStore;
use subdash::types::user::Session;
use subdash::utilities::messages::{failure, SessionMessages, UiMessages};
use subdash::view::{admin::render_plan_form, auth::render_login, text::TextRenderer, Node};

struct App {
    config: Config,
    store: SessionStore,
    prompter: TerminalPrompter,
    renderer: TextRenderer,
}

enum DashboardAction {
    Choose(String),
    Renew,
    Cancel,
}

impl App {
    fn client(&self, session: &Session) -> ApiClient {
        ApiClient::new(&self.config.api_url).with_token(session.token.clone())
    }

    fn print(&self, page: &Node) {
        println!("{}", self.renderer.render(page));
    }

    fn read(&self, label: &str, given: Option<String>) -> Option<String> {
        if given.is_some() {
            return given;
        }
        match self.prompter.ask(label) {
            Ok(value) => Some(value),
            Err(err) => {
                self.prompter.alert(&err.to_string());
                None
            }
        }
    }

    /// Returns whether the command succeeded.
    async fn run(&self, command: Commands) -> Result<bool, PageError> {
        match command {
            Commands::Login { username, password } => self.login(&username, password).await,
            Commands::Register {
                username,
                name,
                password,
            } => self.register(username, name, password).await,
            Commands::Logout => {
                identity::logout(&self.store)?;
                self.prompter
                    .notify(&UiMessages::Session(SessionMessages::LoggedOut).to_string());
                self.print(&render_login(None));
                Ok(true)
            }
            Commands::Dashboard => {
                let session = identity::guard(&self.store, Utc::now())?;
                self.show_dashboard(session).await?;
                Ok(true)
            }
            Commands::Subscribe { plan_id } => self.on_dashboard(DashboardAction::Choose(plan_id)).await,
            Commands::Renew => self.on_dashboard(DashboardAction::Renew).await,
            Commands::Cancel => self.on_dashboard(DashboardAction::Cancel).await,
            Commands::Admin { command } => self.on_admin(command).await,
        }
    }

    async fn login(&self, username: &str, password: Option<String>) -> Result<bool, PageError> {
        if let Some(session) = identity::existing_session(&self.store, Utc::now()) {
            info!("already logged in as {}", session.user.username);
            self.show_dashboard(session).await?;
            return Ok(true);
        }

        let password = match self.read("Password:", password) {
            Some(password) => password,
            None => return Ok(false),
        };

        let api = ApiClient::new(&self.config.api_url);
        match identity::login(&api, &self.store, username, &password).await {
            Ok(session) => {
                self.prompter
                    .notify(&UiMessages::Session(SessionMessages::LoggedIn(session.user.name.clone())).to_string());
                self.show_dashboard(session).await?;
                Ok(true)
            }
            Err(err) => {
                self.prompter.alert(&err.to_string());
                Ok(false)
            }
        }
    }

    async fn register(&self, username: String, name: String, password: Option<String>) -> Result<bool, PageError> {
        let password = match self.read("Password:", password) {
            Some(password) => password,
            None => return Ok(false),
        };
        let form = RegisterForm {
            username,
            name,
            password,
        };

        let api = ApiClient::new(&self.config.api_url);
        match identity::register(&api, &form).await {
            Ok(()) => {
                self.prompter
                    .notify(&UiMessages::Session(SessionMessages::RegistrationSuccessful).to_string());
                self.print(&render_login(None));
                Ok(true)
            }
            Err(err) => {
                self.prompter.alert(&err.to_string());
                Ok(false)
            }
        }
    }

    async fn show_dashboard(&self, session: Session) -> Result<(), PageError> {
        let api = self.client(&session);
        let context = dashboard::open(&api, &self.store, session).await?;
        self.print(&dashboard::view(&context, &self.config.admin_username));
        Ok(())
    }

    async fn on_dashboard(&self, action: DashboardAction) -> Result<bool, PageError> {
        let session = identity::guard(&self.store, Utc::now())?;
        let api = self.client(&session);
        let mut context = dashboard::open(&api, &self.store, session).await?;
        let dispatcher = Dispatcher::new(&api, &self.prompter);

        let outcome = match action {
            DashboardAction::Choose(plan_id) => dashboard::choose_plan(&dispatcher, &mut context, &plan_id).await,
            DashboardAction::Renew => dashboard::renew(&dispatcher, &mut context).await,
            DashboardAction::Cancel => dashboard::cancel(&dispatcher, &mut context).await,
        };

        self.settle(outcome, dashboard::view(&context, &self.config.admin_username))
    }

    async fn on_admin(&self, command: AdminCommands) -> Result<bool, PageError> {
        let session = identity::guard_admin(&self.store, Utc::now(), &self.config.admin_username)?;
        let api = self.client(&session);
        let mut context = admin::open(&api, &self.store, session).await?;
        let dispatcher = Dispatcher::new(&api, &self.prompter);

        let outcome = match command {
            AdminCommands::Plans => {
                self.print(&admin::view(&context));
                return Ok(true);
            }
            AdminCommands::Create(plan) => admin::create_plan(&dispatcher, &mut context, &plan.into_form()).await,
            AdminCommands::Edit { plan_id, plan } => {
                let edits = plan.into_edits();
                if let Some(form) = admin::edit_form(&context, &plan_id, edits.clone()) {
                    self.print(&render_plan_form("Edit Plan", &form));
                }
                admin::edit_plan(&dispatcher, &mut context, &plan_id, edits).await
            }
            AdminCommands::Delete { plan_id } => admin::delete_plan(&dispatcher, &mut context, &plan_id).await,
        };

        self.settle(outcome, admin::view(&context))
    }

    // the prompter has already shown the outcome's message
    fn settle(&self, outcome: Outcome, page: Node) -> Result<bool, PageError> {
        match outcome {
            Outcome::Completed(_) => {
                self.print(&page);
                Ok(true)
            }
            Outcome::Declined => Ok(true),
            Outcome::Rejected(_) | Outcome::Failed(_) => Ok(false),
            Outcome::SessionExpired => Err(identity::expire(&self.store)?.into()),
        }
    }

    async fn follow(&self, redirect: Redirect) {
        match redirect.to {
            Route::Login => self.print(&render_login(redirect.reason.as_deref())),
            Route::Dashboard => {
                if let Some(reason) = &redirect.reason {
                    self.prompter.alert(reason);
                }
                let shown = match identity::guard(&self.store, Utc::now()) {
                    Ok(session) => self.show_dashboard(session).await,
                    Err(err) => Err(err),
                };
                match shown {
                    Ok(()) => (),
                    Err(PageError::Redirect(redirect)) => self.print(&render_login(redirect.reason.as_deref())),
                    Err(err) => self.report(err),
                }
            }
        }
    }

    fn report(&self, err: PageError) {
        debug!("command failed: {:?}", err);
        match err {
            PageError::Client(err) => self
                .prompter
                .alert(&format!("{}{}", failure::DASHBOARD, err.message())),
            other => self.prompter.alert(&other.to_string()),
        }
    }
}

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    let mut config = match Config::from_env() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{}", err);
            process::exit(2);
        }
    };
    if let Some(url) = &cli.api_url {
        config = match config.with_api_url(url) {
            Ok(config) => config,
            Err(err) => {
                eprintln!("{}", err);
                process::exit(2);
            }
        };
    }
    if let Some(path) = &cli.session_file {
        config.session_file = path.into();
    }

    if let Err(err) = logger::init(config.log_level) {
        eprintln!("Error initializing logger: {}", err);
    }

    let app = App {
        store: SessionStore::new(config.session_file.clone()),
        config,
        prompter: TerminalPrompter::new(cli.yes),
        renderer: TextRenderer::colored(),
    };

    let succeeded = match app.run(cli.command).await {
        Ok(succeeded) => succeeded,
        Err(PageError::Redirect(redirect)) => {
            app.follow(redirect).await;
            false
        }
        Err(err) => {
            app.report(err);
            false
        }
    };

    if !succeeded {
        process::exit(1);
    }
}
