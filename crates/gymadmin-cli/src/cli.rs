//! Command-line arguments

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use gymadmin_core::validation::{CategoryForm, PlanForm, ProductForm, UserForm};
use gymadmin_core::{Color, Error, Result};
use gymadmin_listing::{Filter, ListQuery, PageRequest, Sort, SortDirection};
use rust_decimal::Decimal;
use std::path::PathBuf;

/// Admin console for the gym membership and shop platform
#[derive(Debug, Parser)]
#[command(
    name = "gym-admin",
    version = env!("CARGO_PKG_VERSION"),
    about = "Admin console for the gym membership and shop platform",
    long_about = "Manage members, plans, subscriptions, products and orders from the terminal, against the REST backend or an in-memory mock."
)]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error); overrides the config file
    #[arg(short, long, global = true)]
    pub log_level: Option<String>,

    /// Print results as JSON instead of tables
    #[arg(long, global = true)]
    pub json: bool,

    /// Use the in-memory backend instead of the REST API
    #[arg(long, global = true)]
    pub mock: bool,

    /// Subcommand
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Sign in with an admin account
    Login {
        /// Account email
        email: String,

        /// Password; read from stdin when omitted
        #[arg(long, env = "GYMADMIN_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },

    /// Sign out
    Logout,

    /// Show the signed-in admin
    Whoami,

    /// Headline figures across members, subscriptions, orders and stock
    Dashboard,

    /// Member and customer accounts
    Users {
        /// Action
        #[command(subcommand)]
        action: UserCommands,
    },

    /// Membership plans
    Plans {
        /// Action
        #[command(subcommand)]
        action: PlanCommands,
    },

    /// Shop products
    Products {
        /// Action
        #[command(subcommand)]
        action: ProductCommands,
    },

    /// Product categories
    Categories {
        /// Action
        #[command(subcommand)]
        action: CategoryCommands,
    },

    /// Member subscriptions
    Subscriptions {
        /// Action
        #[command(subcommand)]
        action: SubscriptionCommands,
    },

    /// Shop orders
    Orders {
        /// Action
        #[command(subcommand)]
        action: OrderCommands,
    },

    /// Show the resolved configuration
    Config,
}

/// Account commands
#[derive(Debug, Subcommand)]
pub enum UserCommands {
    /// One page of accounts
    List(ListArgs),

    /// One account by id
    Show {
        /// User id
        id: String,
    },

    /// Create an account
    Create(UserFields),

    /// Change an account; omitted fields keep their value
    Update {
        /// User id
        id: String,

        /// Fields to change
        #[command(flatten)]
        fields: UserFields,
    },
}

/// Membership plan commands
#[derive(Debug, Subcommand)]
pub enum PlanCommands {
    /// One page of plans
    List(ListArgs),

    /// One plan by id
    Show {
        /// Plan id
        id: String,
    },

    /// Create a plan
    Create(PlanFields),

    /// Change a plan; omitted fields keep their value
    Update {
        /// Plan id
        id: String,

        /// Fields to change
        #[command(flatten)]
        fields: PlanFields,
    },
}

/// Product commands
#[derive(Debug, Subcommand)]
pub enum ProductCommands {
    /// One page of products
    List(ListArgs),

    /// One product by id
    Show {
        /// Product id
        id: String,
    },

    /// Create a product
    Create(ProductFields),

    /// Change a product; omitted fields keep their value
    Update {
        /// Product id
        id: String,

        /// Fields to change
        #[command(flatten)]
        fields: ProductFields,
    },
}

/// Category commands
#[derive(Debug, Subcommand)]
pub enum CategoryCommands {
    /// One page of categories
    List(ListArgs),

    /// One category by id
    Show {
        /// Category id
        id: String,
    },

    /// Create a category
    Create(CategoryFields),

    /// Change a category; omitted fields keep their value
    Update {
        /// Category id
        id: String,

        /// Fields to change
        #[command(flatten)]
        fields: CategoryFields,
    },
}

/// Subscription commands
#[derive(Debug, Subcommand)]
pub enum SubscriptionCommands {
    /// One page of subscriptions
    List(ListArgs),

    /// One subscription by id
    Show {
        /// Subscription id
        id: String,
    },

    /// Cancel an active or pending subscription
    Cancel {
        /// Subscription id
        id: String,
    },

    /// Extend a subscription
    Renew {
        /// Subscription id
        id: String,

        /// Months to add
        #[arg(long, default_value_t = 1)]
        months: u32,
    },
}

/// Order commands
#[derive(Debug, Subcommand)]
pub enum OrderCommands {
    /// One page of orders
    List(ListArgs),

    /// One order by id
    Show {
        /// Order id
        id: String,
    },

    /// Move an order to its next status
    Advance {
        /// Order id
        id: String,
    },

    /// Cancel an order that has not shipped
    Cancel {
        /// Order id
        id: String,
    },

    /// Attach a carrier tracking number
    Track {
        /// Order id
        id: String,

        /// Tracking number
        number: String,
    },
}

/// Filter, sort and paging options for list commands
#[derive(Debug, Clone, Default, Args)]
pub struct ListArgs {
    /// Case-insensitive text search
    #[arg(short, long)]
    pub search: Option<String>,

    /// Status to keep ("all" keeps everything)
    #[arg(long)]
    pub status: Option<String>,

    /// Category to keep (plan id for subscriptions)
    #[arg(long)]
    pub category: Option<String>,

    /// Role to keep
    #[arg(long)]
    pub role: Option<String>,

    /// Earliest date, inclusive (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub from: Option<NaiveDate>,

    /// Latest date, inclusive (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub to: Option<NaiveDate>,

    /// Sort key; prefix with '-' for descending
    #[arg(long, allow_hyphen_values = true)]
    pub sort: Option<String>,

    /// Sort descending
    #[arg(long)]
    pub desc: bool,

    /// Page number, starting at 1
    #[arg(short, long, default_value_t = 1)]
    pub page: usize,

    /// Items per page; defaults to the configured page size
    #[arg(long)]
    pub per_page: Option<usize>,
}

impl ListArgs {
    /// Build the list query, falling back to `default_per_page`
    ///
    /// # Errors
    ///
    /// Returns a validation error for an unparsable sort key.
    pub fn to_query(&self, default_per_page: usize) -> Result<ListQuery> {
        let filter = Filter {
            search: self.search.clone(),
            status: self.status.clone(),
            category: self.category.clone(),
            role: self.role.clone(),
            from: self.from,
            to: self.to,
        };

        let mut query = ListQuery::new(PageRequest::new(
            self.page,
            self.per_page.unwrap_or(default_per_page),
        ))
        .with_filter(filter);

        if let Some(key) = &self.sort {
            let mut sort: Sort = key.parse()?;
            if self.desc {
                sort.direction = SortDirection::Desc;
            }
            query = query.with_sort(sort);
        }

        Ok(query)
    }
}

/// Account form fields
#[derive(Debug, Clone, Default, Args)]
pub struct UserFields {
    /// Display name
    #[arg(long)]
    pub name: Option<String>,

    /// Login email
    #[arg(long)]
    pub email: Option<String>,

    /// Role (admin, member, customer)
    #[arg(long)]
    pub role: Option<String>,

    /// Status (active, inactive, suspended)
    #[arg(long)]
    pub status: Option<String>,

    /// Contact phone
    #[arg(long)]
    pub phone: Option<String>,

    /// Password; required when creating
    #[arg(long)]
    pub password: Option<String>,
}

impl UserFields {
    /// Copy the given fields onto `form`
    ///
    /// # Errors
    ///
    /// Returns a validation error for an unknown role or status.
    pub fn apply(&self, form: &mut UserForm) -> Result<()> {
        overwrite(&mut form.name, self.name.as_ref());
        overwrite(&mut form.email, self.email.as_ref());
        if let Some(role) = &self.role {
            form.role = role.parse().map_err(|_| {
                Error::validation("role", "Role must be admin, member or customer")
            })?;
        }
        if let Some(status) = &self.status {
            form.status = status.parse().map_err(|_| {
                Error::validation("status", "Status must be active, inactive or suspended")
            })?;
        }
        if self.phone.is_some() {
            form.phone.clone_from(&self.phone);
        }
        if self.password.is_some() {
            form.password.clone_from(&self.password);
        }
        Ok(())
    }
}

/// Membership plan form fields
#[derive(Debug, Clone, Default, Args)]
pub struct PlanFields {
    /// Plan name
    #[arg(long)]
    pub name: Option<String>,

    /// Price per billing period
    #[arg(long, allow_hyphen_values = true)]
    pub price: Option<Decimal>,

    /// Duration in months
    #[arg(long)]
    pub duration: Option<u32>,

    /// Description
    #[arg(long)]
    pub description: Option<String>,

    /// Included feature; repeat for several, replaces the current list
    #[arg(long = "feature", value_name = "FEATURE")]
    pub features: Vec<String>,
}

impl PlanFields {
    /// Copy the given fields onto `form`
    pub fn apply(&self, form: &mut PlanForm) {
        overwrite(&mut form.name, self.name.as_ref());
        if let Some(price) = self.price {
            form.price = price;
        }
        if let Some(duration) = self.duration {
            form.duration = duration;
        }
        overwrite(&mut form.description, self.description.as_ref());
        if !self.features.is_empty() {
            form.features.clone_from(&self.features);
        }
    }
}

/// Product form fields
#[derive(Debug, Clone, Default, Args)]
pub struct ProductFields {
    /// Product name
    #[arg(long)]
    pub name: Option<String>,

    /// Description
    #[arg(long)]
    pub description: Option<String>,

    /// Unit price
    #[arg(long, allow_hyphen_values = true)]
    pub price: Option<Decimal>,

    /// Category name
    #[arg(long)]
    pub category: Option<String>,

    /// Units in stock
    #[arg(long, allow_hyphen_values = true)]
    pub stock: Option<i64>,

    /// Size; repeat for several, replaces the current list
    #[arg(long = "size", value_name = "SIZE")]
    pub sizes: Vec<String>,

    /// Color name; repeat for several, replaces the current list
    #[arg(long = "color", value_name = "COLOR")]
    pub colors: Vec<String>,

    /// Image URL; repeat for several, replaces the current list
    #[arg(long = "image", value_name = "URL")]
    pub images: Vec<String>,

    /// Featured on the storefront (true or false)
    #[arg(long)]
    pub featured: Option<bool>,
}

impl ProductFields {
    /// Copy the given fields onto `form`
    pub fn apply(&self, form: &mut ProductForm) {
        overwrite(&mut form.name, self.name.as_ref());
        overwrite(&mut form.description, self.description.as_ref());
        if let Some(price) = self.price {
            form.price = price;
        }
        overwrite(&mut form.category, self.category.as_ref());
        if let Some(stock) = self.stock {
            form.stock_quantity = stock;
        }
        if !self.sizes.is_empty() {
            form.sizes.clone_from(&self.sizes);
        }
        if !self.colors.is_empty() {
            form.colors = self.colors.iter().cloned().map(Color::Named).collect();
        }
        if !self.images.is_empty() {
            form.images.clone_from(&self.images);
        }
        if let Some(featured) = self.featured {
            form.featured = featured;
        }
    }
}

/// Category form fields
#[derive(Debug, Clone, Default, Args)]
pub struct CategoryFields {
    /// Category name
    #[arg(long)]
    pub name: Option<String>,

    /// URL slug; derived from the name when blank
    #[arg(long)]
    pub slug: Option<String>,

    /// Description
    #[arg(long)]
    pub description: Option<String>,
}

impl CategoryFields {
    /// Copy the given fields onto `form`
    pub fn apply(&self, form: &mut CategoryForm) {
        overwrite(&mut form.name, self.name.as_ref());
        overwrite(&mut form.slug, self.slug.as_ref());
        overwrite(&mut form.description, self.description.as_ref());
    }
}

fn overwrite(target: &mut String, value: Option<&String>) {
    if let Some(value) = value {
        target.clone_from(value);
    }
}
