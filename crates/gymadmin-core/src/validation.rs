//! Form input validation
//!
//! Forms collect raw input, validate it into field-keyed messages and only
//! then build the entity that is submitted. A field's message is cleared as
//! soon as that field is edited again.

use crate::types::{Category, Color, MembershipPlan, Product, Role, User, UserStatus};
use crate::utils::{normalize_email, slugify};
use crate::{Error, Result};
use indexmap::IndexMap;
use regex::Regex;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use validator::{Validate, ValidationErrors};

static PHONE_RE: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::expect_used)]
    Regex::new(r"^\+?[0-9][0-9 \-]{5,19}$").expect("phone pattern is a valid literal")
});

/// Minimum password length for new accounts
pub const MIN_PASSWORD_LEN: usize = 6;

/// Field-keyed validation messages
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FormErrors(IndexMap<String, String>);

impl FormErrors {
    /// No errors
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a message for `field`, replacing any previous one
    pub fn set(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.insert(field.into(), message.into());
    }

    /// Message for `field`, if any
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    /// Drop the message for `field`; called when the field is edited
    pub fn clear(&mut self, field: &str) {
        self.0.shift_remove(field);
    }

    /// Whether the form is valid
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of invalid fields
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterate `(field, message)` pairs in the order they were recorded
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// `Ok` when empty, otherwise the first message as a validation error
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] for the first recorded field.
    pub fn into_result(self) -> Result<()> {
        match self.0.into_iter().next() {
            None => Ok(()),
            Some((field, message)) => Err(Error::Validation { field, message }),
        }
    }

    fn merge_validator(&mut self, errors: &ValidationErrors) {
        let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
        fields.sort_by(|a, b| a.0.cmp(&b.0));
        for (field, errs) in fields {
            if let Some(first) = errs.first() {
                let message = first
                    .message
                    .as_ref()
                    .map_or_else(|| first.code.to_string(), ToString::to_string);
                self.0.entry(field.to_string()).or_insert(message);
            }
        }
    }
}

fn run_validator<T: Validate>(form: &T, errors: &mut FormErrors) {
    if let Err(e) = form.validate() {
        errors.merge_validator(&e);
    }
}

fn require(errors: &mut FormErrors, field: &str, value: &str, message: &str) {
    if value.trim().is_empty() {
        errors.set(field, message);
    }
}

/// Create/edit form for a user
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UserForm {
    /// Display name
    #[validate(length(max = 100, message = "Name is too long"))]
    pub name: String,
    /// Login email
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    /// Role
    #[serde(default)]
    pub role: Role,
    /// Status
    #[serde(default)]
    pub status: UserStatus,
    /// Optional phone
    #[validate(regex(path = *PHONE_RE, message = "Invalid phone number"))]
    pub phone: Option<String>,
    /// Password, required only when creating
    pub password: Option<String>,
}

impl UserForm {
    /// Validate for an edit; a password is checked only if given
    pub fn validate_fields(&self) -> FormErrors {
        let mut errors = FormErrors::new();
        require(&mut errors, "name", &self.name, "Name is required");
        require(&mut errors, "email", &self.email, "Email is required");
        run_validator(self, &mut errors);

        if let Some(password) = self.password.as_deref().filter(|p| !p.is_empty()) {
            if password.chars().count() < MIN_PASSWORD_LEN {
                errors.set(
                    "password",
                    format!("Password must be at least {MIN_PASSWORD_LEN} characters"),
                );
            }
        }
        errors
    }

    /// Validate for account creation, where a password is mandatory
    pub fn validate_for_create(&self) -> FormErrors {
        let mut errors = self.validate_fields();
        if self.password.as_deref().is_none_or(str::is_empty) {
            errors.set("password", "Password is required");
        }
        errors
    }

    /// Build the user record to submit
    pub fn into_user(self, id: impl Into<String>) -> User {
        User {
            id: id.into(),
            name: self.name.trim().to_string(),
            email: normalize_email(&self.email),
            role: self.role,
            status: self.status,
            phone: self
                .phone
                .map(|p| p.trim().to_string())
                .filter(|p| !p.is_empty()),
            created_at: None,
            updated_at: None,
        }
    }
}

impl From<&User> for UserForm {
    /// Edit form pre-filled from an existing account
    fn from(user: &User) -> Self {
        Self {
            name: user.name.clone(),
            email: user.email.clone(),
            role: user.role,
            status: user.status,
            phone: user.phone.clone(),
            password: None,
        }
    }
}

/// Create/edit form for a membership plan
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct PlanForm {
    /// Plan name
    #[validate(length(max = 100, message = "Name is too long"))]
    pub name: String,
    /// Price
    pub price: Decimal,
    /// Duration in months
    #[validate(range(min = 1, max = 36, message = "Duration must be between 1 and 36 months"))]
    pub duration: u32,
    /// Description
    #[serde(default)]
    #[validate(length(max = 2000, message = "Description is too long"))]
    pub description: String,
    /// Included features
    #[serde(default)]
    pub features: Vec<String>,
}

impl PlanForm {
    /// Validate every field
    pub fn validate_fields(&self) -> FormErrors {
        let mut errors = FormErrors::new();
        require(&mut errors, "name", &self.name, "Plan name is required");
        if self.price <= Decimal::ZERO {
            errors.set("price", "Price must be greater than zero");
        }
        run_validator(self, &mut errors);
        errors
    }

    /// Build the plan record to submit
    pub fn into_plan(self, id: impl Into<String>) -> MembershipPlan {
        MembershipPlan {
            id: id.into(),
            name: self.name.trim().to_string(),
            price: self.price,
            duration: self.duration,
            description: self.description,
            features: self
                .features
                .into_iter()
                .map(|f| f.trim().to_string())
                .filter(|f| !f.is_empty())
                .collect(),
            active_subscriptions: 0,
        }
    }
}

impl From<&MembershipPlan> for PlanForm {
    fn from(plan: &MembershipPlan) -> Self {
        Self {
            name: plan.name.clone(),
            price: plan.price,
            duration: plan.duration,
            description: plan.description.clone(),
            features: plan.features.clone(),
        }
    }
}

/// Create/edit form for a product
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct ProductForm {
    /// Product name
    #[validate(length(max = 200, message = "Name is too long"))]
    pub name: String,
    /// Description
    #[serde(default)]
    pub description: String,
    /// Unit price
    pub price: Decimal,
    /// Category name
    pub category: String,
    /// Units in stock; signed so negative input can be reported
    #[validate(range(min = 0, message = "Stock cannot be negative"))]
    pub stock_quantity: i64,
    /// Sizes
    #[serde(default)]
    pub sizes: Vec<String>,
    /// Colors, either form
    #[serde(default)]
    pub colors: Vec<Color>,
    /// Image URLs
    #[serde(default)]
    pub images: Vec<String>,
    /// Featured flag
    #[serde(default)]
    pub featured: bool,
}

impl ProductForm {
    /// Validate every field
    pub fn validate_fields(&self) -> FormErrors {
        let mut errors = FormErrors::new();
        require(&mut errors, "name", &self.name, "Product name is required");
        if self.price <= Decimal::ZERO {
            errors.set("price", "Price must be greater than zero");
        }
        require(&mut errors, "category", &self.category, "Category is required");
        if u32::try_from(self.stock_quantity).is_err() && self.stock_quantity > 0 {
            errors.set("stock_quantity", "Stock is too large");
        }
        if self.colors.iter().any(|c| c.name().trim().is_empty()) {
            errors.set("colors", "Color names cannot be empty");
        }
        run_validator(self, &mut errors);
        errors
    }

    /// Build the product record to submit; colors are stored in object form
    pub fn into_product(self, id: impl Into<String>) -> Product {
        Product {
            id: id.into(),
            name: self.name.trim().to_string(),
            description: self.description,
            price: self.price,
            category: self.category.trim().to_string(),
            stock_quantity: u32::try_from(self.stock_quantity).unwrap_or(0),
            sizes: self.sizes,
            colors: self.colors.into_iter().map(Color::normalized).collect(),
            images: self.images,
            rating: 0.0,
            featured: self.featured,
        }
    }
}

impl From<&Product> for ProductForm {
    fn from(product: &Product) -> Self {
        Self {
            name: product.name.clone(),
            description: product.description.clone(),
            price: product.price,
            category: product.category.clone(),
            stock_quantity: i64::from(product.stock_quantity),
            sizes: product.sizes.clone(),
            colors: product.colors.clone(),
            images: product.images.clone(),
            featured: product.featured,
        }
    }
}

/// Create/edit form for a product category
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct CategoryForm {
    /// Category name
    #[validate(length(max = 100, message = "Name is too long"))]
    pub name: String,
    /// URL slug; derived from the name when blank
    #[serde(default)]
    pub slug: String,
    /// Description
    #[serde(default)]
    #[validate(length(max = 2000, message = "Description is too long"))]
    pub description: String,
}

impl CategoryForm {
    /// Validate every field
    pub fn validate_fields(&self) -> FormErrors {
        let mut errors = FormErrors::new();
        require(&mut errors, "name", &self.name, "Category name is required");
        let slug = self.slug.trim();
        if !slug.is_empty() && slugify(slug) != slug {
            errors.set(
                "slug",
                "Slug may only contain lowercase letters, digits and single hyphens",
            );
        } else if slug.is_empty() && !self.name.trim().is_empty() && slugify(&self.name).is_empty()
        {
            errors.set("slug", "Slug is required when the name has no letters or digits");
        }
        run_validator(self, &mut errors);
        errors
    }

    /// Build the category record to submit
    pub fn into_category(self, id: impl Into<String>) -> Category {
        let slug = match self.slug.trim() {
            "" => slugify(&self.name),
            given => given.to_string(),
        };
        Category {
            id: id.into(),
            name: self.name.trim().to_string(),
            slug,
            description: self.description,
        }
    }
}

impl From<&Category> for CategoryForm {
    fn from(category: &Category) -> Self {
        Self {
            name: category.name.clone(),
            slug: category.slug.clone(),
            description: category.description.clone(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    fn valid_user() -> UserForm {
        UserForm {
            name: "Ana Lima".to_string(),
            email: "ana@example.com".to_string(),
            role: Role::Member,
            status: UserStatus::Active,
            phone: Some("+1 555-0100".to_string()),
            password: Some("secret1".to_string()),
        }
    }

    #[test]
    fn test_valid_user_has_no_errors() {
        assert!(valid_user().validate_for_create().is_empty());
    }

    #[test]
    fn test_user_required_fields() {
        let form = UserForm::default();
        let errors = form.validate_for_create();

        assert_eq!(errors.get("name"), Some("Name is required"));
        assert_eq!(errors.get("email"), Some("Email is required"));
        assert_eq!(errors.get("password"), Some("Password is required"));
    }

    #[rstest]
    #[case("not-an-email")]
    #[case("ana@")]
    fn test_user_bad_email(#[case] email: &str) {
        let mut form = valid_user();
        form.email = email.to_string();
        assert_eq!(
            form.validate_fields().get("email"),
            Some("Invalid email address")
        );
    }

    #[rstest]
    #[case("abc")]
    #[case("12")]
    fn test_user_bad_phone(#[case] phone: &str) {
        let mut form = valid_user();
        form.phone = Some(phone.to_string());
        assert_eq!(
            form.validate_fields().get("phone"),
            Some("Invalid phone number")
        );
    }

    #[test]
    fn test_short_password() {
        let mut form = valid_user();
        form.password = Some("abc".to_string());
        assert!(form.validate_fields().get("password").is_some());

        // editing without a password is fine
        form.password = None;
        assert!(form.validate_fields().is_empty());
    }

    #[test]
    fn test_clear_on_edit() {
        let mut errors = UserForm::default().validate_for_create();
        let before = errors.len();

        errors.clear("email");
        assert_eq!(errors.len(), before - 1);
        assert!(errors.get("email").is_none());
        assert!(errors.get("name").is_some());
    }

    #[test]
    fn test_into_result_reports_first_field() {
        let errors = UserForm::default().validate_for_create();
        let err = errors.into_result().unwrap_err();
        assert_eq!(err.to_string(), "Validation error: name - Name is required");
        assert!(FormErrors::new().into_result().is_ok());
    }

    #[test]
    fn test_into_user_normalizes() {
        let mut form = valid_user();
        form.email = "  Ana@Example.COM ".to_string();
        form.phone = Some("   ".to_string());
        let user = form.into_user("u9");

        assert_eq!(user.id, "u9");
        assert_eq!(user.email, "ana@example.com");
        assert!(user.phone.is_none());
    }

    #[test]
    fn test_plan_form() {
        let form = PlanForm {
            name: " ".to_string(),
            price: dec!(0),
            duration: 48,
            description: String::new(),
            features: vec![" Sauna ".to_string(), String::new()],
        };
        let errors = form.validate_fields();

        assert_eq!(errors.get("name"), Some("Plan name is required"));
        assert_eq!(errors.get("price"), Some("Price must be greater than zero"));
        assert_eq!(
            errors.get("duration"),
            Some("Duration must be between 1 and 36 months")
        );

        let plan = PlanForm {
            name: "Annual".to_string(),
            price: dec!(299),
            duration: 12,
            ..form
        }
        .into_plan("pl1");
        assert_eq!(plan.features, vec!["Sauna".to_string()]);
        assert_eq!(plan.active_subscriptions, 0);
    }

    #[test]
    fn test_product_form() {
        let form = ProductForm {
            name: "Kettlebell".to_string(),
            price: dec!(45),
            category: String::new(),
            stock_quantity: -3,
            colors: vec![Color::Named(String::new())],
            ..ProductForm::default()
        };
        let errors = form.validate_fields();

        assert_eq!(errors.get("category"), Some("Category is required"));
        assert_eq!(errors.get("stock_quantity"), Some("Stock cannot be negative"));
        assert_eq!(errors.get("colors"), Some("Color names cannot be empty"));
        assert!(errors.get("name").is_none());
    }

    #[test]
    fn test_product_colors_normalized() {
        let product = ProductForm {
            name: "Tee".to_string(),
            price: dec!(20),
            category: "apparel".to_string(),
            stock_quantity: 10,
            colors: vec![Color::Named("red".to_string())],
            ..ProductForm::default()
        }
        .into_product("p1");

        assert_eq!(product.stock_quantity, 10);
        assert_eq!(product.colors[0].hex(), None);
        assert!(matches!(product.colors[0], Color::Detailed { .. }));
    }

    #[test]
    fn test_edit_form_round_trips_record() {
        let user = valid_user().into_user("u1");
        let form = UserForm::from(&user);
        assert!(form.password.is_none());
        assert!(form.validate_fields().is_empty());
        assert_eq!(form.into_user("u1"), user);
    }

    #[test]
    fn test_category_slug_from_name() {
        let form = CategoryForm {
            name: " Home Gym & Cardio ".to_string(),
            ..CategoryForm::default()
        };
        assert!(form.validate_fields().is_empty());

        let category = form.into_category("c1");
        assert_eq!(category.name, "Home Gym & Cardio");
        assert_eq!(category.slug, "home-gym-cardio");
    }

    #[rstest]
    #[case("", "", Some("Category name is required"), None)]
    #[case("Yoga", "Yoga Mats", None, Some("Slug may only contain lowercase letters, digits and single hyphens"))]
    #[case("***", "", None, Some("Slug is required when the name has no letters or digits"))]
    #[case("Yoga", "yoga-mats", None, None)]
    fn test_category_form(
        #[case] name: &str,
        #[case] slug: &str,
        #[case] name_error: Option<&str>,
        #[case] slug_error: Option<&str>,
    ) {
        let form = CategoryForm {
            name: name.to_string(),
            slug: slug.to_string(),
            description: String::new(),
        };
        let errors = form.validate_fields();
        assert_eq!(errors.get("name"), name_error);
        assert_eq!(errors.get("slug"), slug_error);
    }
}
