//! Command execution
//!
//! Every command returns the text to print so it can be checked without a
//! terminal. Backend commands are generic over [`AdminApi`].

use crate::cli::{
    CategoryCommands, Commands, ListArgs, OrderCommands, PlanCommands, ProductCommands,
    SubscriptionCommands, UserCommands,
};
use crate::output::{self, OutputFormat, Tabular};
use chrono::NaiveDate;
use gymadmin_auth::{AuthContext, SessionStore};
use gymadmin_client::{AdminApi, Resource};
use gymadmin_core::types::{Category, MembershipPlan, Order, Product, Subscription, User};
use gymadmin_core::validation::{CategoryForm, PlanForm, ProductForm, UserForm};
use gymadmin_core::{Config, DashboardSummary, Error, Result};
use gymadmin_listing::Filterable;
use std::path::PathBuf;
use tracing::{debug, info};

/// Settings every command reads
#[derive(Debug, Clone)]
pub struct Settings {
    /// Output format
    pub format: OutputFormat,
    /// Page size when `--per-page` is not given
    pub default_per_page: usize,
    /// Stock level below which a product is flagged
    pub low_stock_threshold: u32,
    /// Date used for renewals
    pub today: NaiveDate,
}

impl Settings {
    /// Settings from the loaded configuration
    pub fn from_config(config: &Config, format: OutputFormat, today: NaiveDate) -> Self {
        Self {
            format,
            default_per_page: config.listing.default_per_page,
            low_stock_threshold: config.listing.low_stock_threshold,
            today,
        }
    }
}

/// Log the outcome of reading `.env`; a missing file is normal
pub fn note_env_file(result: dotenvy::Result<PathBuf>) -> Option<PathBuf> {
    match result {
        Ok(path) => {
            debug!(path = %path.display(), "Loaded .env file");
            Some(path)
        }
        Err(e) => {
            debug!(error = %e, ".env file not loaded");
            None
        }
    }
}

/// Sign in and report who is signed in
///
/// # Errors
///
/// Propagates sign-in failures.
pub fn login<S: SessionStore>(
    auth: &AuthContext<S>,
    email: &str,
    password: &str,
    format: OutputFormat,
) -> Result<String> {
    let user = auth.login(email, password)?;
    match format {
        OutputFormat::Json => output::json(&user),
        OutputFormat::Text => Ok(format!("Signed in as {} <{}>\n", user.name, user.email)),
    }
}

/// Sign out
///
/// # Errors
///
/// Propagates session store failures.
pub fn logout<S: SessionStore>(auth: &AuthContext<S>) -> Result<String> {
    auth.logout()?;
    Ok("Signed out\n".to_string())
}

/// Describe the signed-in admin
///
/// # Errors
///
/// Returns a serialization error in JSON mode.
pub fn whoami<S: SessionStore>(auth: &AuthContext<S>, format: OutputFormat) -> Result<String> {
    match (auth.current_user(), format) {
        (Some(user), OutputFormat::Json) => output::json(&user),
        (None, OutputFormat::Json) => output::json(&serde_json::Value::Null),
        (Some(user), OutputFormat::Text) => {
            Ok(format!("{} <{}> ({})\n", user.name, user.email, user.role))
        }
        (None, OutputFormat::Text) => Ok("Not signed in\n".to_string()),
    }
}

/// Resolved configuration as TOML
///
/// # Errors
///
/// Returns a configuration error if serialization fails.
pub fn show_config(config: &Config, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => output::json(config),
        OutputFormat::Text => toml::to_string_pretty(config).map_err(|e| Error::Configuration {
            message: format!("Failed to serialize configuration: {e}"),
        }),
    }
}

/// Fail unless an admin is signed in
///
/// # Errors
///
/// Returns [`Error::Authentication`] when signed out.
pub fn require_session<S: SessionStore>(auth: &AuthContext<S>) -> Result<()> {
    if auth.is_authenticated() {
        Ok(())
    } else {
        Err(Error::Authentication(
            "Not signed in; run `gym-admin login <email>` first".to_string(),
        ))
    }
}

/// Run a backend command
///
/// # Errors
///
/// Propagates backend, listing, form and state-change failures.
pub async fn run<A: AdminApi>(api: &A, command: &Commands, settings: &Settings) -> Result<String> {
    match command {
        Commands::Dashboard => dashboard(api, settings).await,
        Commands::Users { action } => users(api, action, settings).await,
        Commands::Plans { action } => plans(api, action, settings).await,
        Commands::Products { action } => products(api, action, settings).await,
        Commands::Categories { action } => categories(api, action, settings).await,
        Commands::Subscriptions { action } => subscriptions(api, action, settings).await,
        Commands::Orders { action } => orders(api, action, settings).await,
        Commands::Login { .. } | Commands::Logout | Commands::Whoami | Commands::Config => Err(
            Error::Other("command does not use the backend".to_string()),
        ),
    }
}

async fn list<R, A>(api: &A, args: &ListArgs, settings: &Settings) -> Result<String>
where
    R: Resource + Filterable + Tabular,
    A: AdminApi,
{
    list_with::<R, A, _>(api, args, settings, |_| ()).await
}

/// List after adjusting each fetched item
async fn list_with<R, A, F>(
    api: &A,
    args: &ListArgs,
    settings: &Settings,
    prepare: F,
) -> Result<String>
where
    R: Resource + Filterable + Tabular,
    A: AdminApi,
    F: FnMut(&mut R),
{
    let query = args.to_query(settings.default_per_page)?;
    let mut items: Vec<R> = api.list().await?;
    items.iter_mut().for_each(prepare);
    let page = query.run(&items)?;
    info!(
        resource = R::PATH,
        matched = page.total_count,
        page = page.current_page,
        "Listed collection"
    );
    output::page(&page, R::PATH, settings.format)
}

async fn show<R, A>(api: &A, id: &str, settings: &Settings) -> Result<String>
where
    R: Resource + Tabular,
    A: AdminApi,
{
    let item: R = api.get(id).await?;
    output::item(&item, settings.format)
}

async fn create<R, A>(api: &A, item: R, settings: &Settings) -> Result<String>
where
    R: Resource + Tabular,
    A: AdminApi,
{
    let created = api.create(item).await?;
    info!(resource = R::PATH, id = created.id(), "Created");
    output::item(&created, settings.format)
}

async fn save<R, A>(api: &A, id: &str, item: R, settings: &Settings) -> Result<String>
where
    R: Resource + Tabular,
    A: AdminApi,
{
    let saved = api.update(id, item).await?;
    info!(resource = R::PATH, id, "Saved change");
    output::item(&saved, settings.format)
}

/// Fetch, change locally, save back
async fn modify<R, A, F>(api: &A, id: &str, settings: &Settings, change: F) -> Result<String>
where
    R: Resource + Tabular,
    A: AdminApi,
    F: FnOnce(&mut R) -> Result<()> + Send,
{
    let mut item: R = api.get(id).await?;
    change(&mut item)?;
    save(api, id, item, settings).await
}

async fn users<A: AdminApi>(api: &A, action: &UserCommands, settings: &Settings) -> Result<String> {
    match action {
        UserCommands::List(args) => list::<User, A>(api, args, settings).await,
        UserCommands::Show { id } => show::<User, A>(api, id, settings).await,
        UserCommands::Create(fields) => {
            let mut form = UserForm::default();
            fields.apply(&mut form)?;
            form.validate_for_create().into_result()?;
            create(api, form.into_user(String::new()), settings).await
        }
        UserCommands::Update { id, fields } => {
            let existing: User = api.get(id).await?;
            let mut form = UserForm::from(&existing);
            fields.apply(&mut form)?;
            form.validate_fields().into_result()?;
            let user = User {
                created_at: existing.created_at,
                ..form.into_user(id.clone())
            };
            save(api, id, user, settings).await
        }
    }
}

async fn plans<A: AdminApi>(api: &A, action: &PlanCommands, settings: &Settings) -> Result<String> {
    match action {
        PlanCommands::List(args) => list::<MembershipPlan, A>(api, args, settings).await,
        PlanCommands::Show { id } => show::<MembershipPlan, A>(api, id, settings).await,
        PlanCommands::Create(fields) => {
            let mut form = PlanForm::default();
            fields.apply(&mut form);
            form.validate_fields().into_result()?;
            create(api, form.into_plan(String::new()), settings).await
        }
        PlanCommands::Update { id, fields } => {
            let existing: MembershipPlan = api.get(id).await?;
            let mut form = PlanForm::from(&existing);
            fields.apply(&mut form);
            form.validate_fields().into_result()?;
            let plan = MembershipPlan {
                active_subscriptions: existing.active_subscriptions,
                ..form.into_plan(id.clone())
            };
            save(api, id, plan, settings).await
        }
    }
}

async fn products<A: AdminApi>(
    api: &A,
    action: &ProductCommands,
    settings: &Settings,
) -> Result<String> {
    match action {
        ProductCommands::List(args) => list::<Product, A>(api, args, settings).await,
        ProductCommands::Show { id } => show::<Product, A>(api, id, settings).await,
        ProductCommands::Create(fields) => {
            let mut form = ProductForm::default();
            fields.apply(&mut form);
            form.validate_fields().into_result()?;
            create(api, form.into_product(String::new()), settings).await
        }
        ProductCommands::Update { id, fields } => {
            let existing: Product = api.get(id).await?;
            let mut form = ProductForm::from(&existing);
            fields.apply(&mut form);
            form.validate_fields().into_result()?;
            let product = Product {
                rating: existing.rating,
                ..form.into_product(id.clone())
            };
            save(api, id, product, settings).await
        }
    }
}

async fn categories<A: AdminApi>(
    api: &A,
    action: &CategoryCommands,
    settings: &Settings,
) -> Result<String> {
    match action {
        CategoryCommands::List(args) => list::<Category, A>(api, args, settings).await,
        CategoryCommands::Show { id } => show::<Category, A>(api, id, settings).await,
        CategoryCommands::Create(fields) => {
            let mut form = CategoryForm::default();
            fields.apply(&mut form);
            form.validate_fields().into_result()?;
            create(api, form.into_category(String::new()), settings).await
        }
        CategoryCommands::Update { id, fields } => {
            let existing: Category = api.get(id).await?;
            let mut form = CategoryForm::from(&existing);
            fields.apply(&mut form);
            form.validate_fields().into_result()?;
            save(api, id, form.into_category(id.clone()), settings).await
        }
    }
}

/// Mark an active subscription past its end date as expired
fn lapse(subscription: &mut Subscription, today: NaiveDate) {
    if subscription.refresh_status(today) {
        debug!(id = %subscription.id, "Subscription has lapsed");
    }
}

async fn subscriptions<A: AdminApi>(
    api: &A,
    action: &SubscriptionCommands,
    settings: &Settings,
) -> Result<String> {
    let today = settings.today;
    match action {
        SubscriptionCommands::List(args) => {
            list_with::<Subscription, A, _>(api, args, settings, |s| lapse(s, today)).await
        }
        SubscriptionCommands::Show { id } => {
            let mut subscription: Subscription = api.get(id).await?;
            lapse(&mut subscription, today);
            output::item(&subscription, settings.format)
        }
        SubscriptionCommands::Cancel { id } => {
            modify(api, id, settings, Subscription::cancel).await
        }
        SubscriptionCommands::Renew { id, months } => {
            let months = *months;
            modify(api, id, settings, move |s: &mut Subscription| {
                s.renew(months, today).map(|_| ())
            })
            .await
        }
    }
}

async fn orders<A: AdminApi>(
    api: &A,
    action: &OrderCommands,
    settings: &Settings,
) -> Result<String> {
    match action {
        OrderCommands::List(args) => list::<Order, A>(api, args, settings).await,
        OrderCommands::Show { id } => show::<Order, A>(api, id, settings).await,
        OrderCommands::Advance { id } => {
            modify(api, id, settings, |o: &mut Order| o.advance_status().map(|_| ())).await
        }
        OrderCommands::Cancel { id } => modify(api, id, settings, Order::cancel).await,
        OrderCommands::Track { id, number } => {
            let number = number.clone();
            modify(api, id, settings, move |o: &mut Order| o.set_tracking(&number)).await
        }
    }
}

async fn dashboard<A: AdminApi>(api: &A, settings: &Settings) -> Result<String> {
    let (users, mut subscriptions, orders, products) = tokio::try_join!(
        api.list::<User>(),
        api.list::<Subscription>(),
        api.list::<Order>(),
        api.list::<Product>(),
    )?;
    for subscription in &mut subscriptions {
        lapse(subscription, settings.today);
    }

    let summary = DashboardSummary::compute(
        &users,
        &subscriptions,
        &orders,
        &products,
        settings.low_stock_threshold,
    );
    output::dashboard(&summary, settings.format)
}
